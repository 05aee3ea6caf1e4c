//! Swipe gesture state machine for the recommendation card.
//!
//! Driven purely by input deltas and elapsed time, independent of any
//! animation runtime:
//!
//! ```text
//! Idle -> Dragging -> Committing -> Dismissed -> (next card) Idle
//!                  \-> Resetting -> Idle
//! ```
//!
//! A decision is emitted from [`SwipeCard::release`] at most once per
//! gesture. Input is ignored while the card is committing or dismissed, so
//! a rapid re-drag cannot fire a second decision.

use std::time::Duration;

use serde::Serialize;

/// Fraction of the screen width a drag must exceed to commit.
pub const SWIPE_THRESHOLD_FRACTION: f64 = 0.3;
/// Duration of the slide-off animation after a commit.
pub const COMMIT_DURATION: Duration = Duration::from_millis(250);
/// Slide-off target as a multiple of screen width (fully off the edge).
pub const OFFSCREEN_MULTIPLIER: f64 = 1.5;
/// Card tilt at a drag of one full screen width.
pub const MAX_ROTATION_DEGREES: f64 = 15.0;

/// Largest integration step for the spring simulation.
const SPRING_STEP_SECS: f64 = 1.0 / 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDecision {
    Like,
    Skip,
}

impl SwipeDecision {
    fn direction(self) -> f64 {
        match self {
            SwipeDecision::Like => 1.0,
            SwipeDecision::Skip => -1.0,
        }
    }
}

/// Damped spring used for the spring-back animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Below this displacement (px) and velocity (px/s) the spring is at rest.
    pub rest_threshold: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 30.0,
            mass: 1.0,
            rest_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub threshold_fraction: f64,
    pub commit_duration: Duration,
    pub spring: SpringConfig,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold_fraction: SWIPE_THRESHOLD_FRACTION,
            commit_duration: COMMIT_DURATION,
            spring: SpringConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipePhase {
    Idle,
    Dragging {
        origin_x: f64,
        translate_x: f64,
    },
    Committing {
        decision: SwipeDecision,
        start_x: f64,
        target_x: f64,
        elapsed: Duration,
    },
    Resetting {
        translate_x: f64,
        velocity: f64,
    },
    Dismissed {
        decision: SwipeDecision,
        translate_x: f64,
    },
}

/// Gesture state for one card on a screen of a given width.
#[derive(Debug, Clone)]
pub struct SwipeCard {
    screen_width: f64,
    config: SwipeConfig,
    phase: SwipePhase,
}

impl SwipeCard {
    pub fn new(screen_width: f64) -> Self {
        Self::with_config(screen_width, SwipeConfig::default())
    }

    pub fn with_config(screen_width: f64, config: SwipeConfig) -> Self {
        Self {
            screen_width: screen_width.max(1.0),
            config,
            phase: SwipePhase::Idle,
        }
    }

    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    /// Drag distance that must be exceeded to commit.
    pub fn threshold(&self) -> f64 {
        self.screen_width * self.config.threshold_fraction
    }

    pub fn translate_x(&self) -> f64 {
        match self.phase {
            SwipePhase::Idle => 0.0,
            SwipePhase::Dragging { translate_x, .. }
            | SwipePhase::Resetting { translate_x, .. }
            | SwipePhase::Dismissed { translate_x, .. } => translate_x,
            SwipePhase::Committing {
                start_x,
                target_x,
                elapsed,
                ..
            } => {
                let p = self.commit_progress(elapsed);
                start_x + (target_x - start_x) * ease_out_cubic(p)
            }
        }
    }

    /// Tilt in degrees, proportional to horizontal offset.
    pub fn rotation_degrees(&self) -> f64 {
        (self.translate_x() / self.screen_width * MAX_ROTATION_DEGREES)
            .clamp(-MAX_ROTATION_DEGREES, MAX_ROTATION_DEGREES)
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            self.phase,
            SwipePhase::Committing { .. } | SwipePhase::Resetting { .. }
        )
    }

    /// Start a gesture. Returns `false` (and ignores it) while committing or
    /// dismissed. Grabbing a card mid spring-back continues from its offset.
    pub fn begin_drag(&mut self) -> bool {
        let origin_x = match self.phase {
            SwipePhase::Idle => 0.0,
            SwipePhase::Resetting { translate_x, .. } => translate_x,
            SwipePhase::Dragging { .. } => return true,
            SwipePhase::Committing { .. } | SwipePhase::Dismissed { .. } => return false,
        };
        self.phase = SwipePhase::Dragging {
            origin_x,
            translate_x: origin_x,
        };
        true
    }

    /// Update with the gesture's cumulative horizontal translation.
    pub fn drag_to(&mut self, translation_x: f64) {
        if let SwipePhase::Dragging { origin_x, .. } = self.phase {
            self.phase = SwipePhase::Dragging {
                origin_x,
                translate_x: origin_x + translation_x,
            };
        }
    }

    /// End the gesture. Past the threshold the card commits and the
    /// decision is returned; otherwise it springs back and `None` is returned.
    pub fn release(&mut self) -> Option<SwipeDecision> {
        let SwipePhase::Dragging { translate_x, .. } = self.phase else {
            return None;
        };

        if translate_x.abs() > self.threshold() {
            let decision = if translate_x > 0.0 {
                SwipeDecision::Like
            } else {
                SwipeDecision::Skip
            };
            self.phase = SwipePhase::Committing {
                decision,
                start_x: translate_x,
                target_x: decision.direction() * self.screen_width * OFFSCREEN_MULTIPLIER,
                elapsed: Duration::ZERO,
            };
            Some(decision)
        } else {
            self.phase = SwipePhase::Resetting {
                translate_x,
                velocity: 0.0,
            };
            None
        }
    }

    /// Advance any running animation by `dt` and return the new offset.
    pub fn tick(&mut self, dt: Duration) -> f64 {
        match self.phase {
            SwipePhase::Committing {
                decision,
                start_x,
                target_x,
                elapsed,
            } => {
                let elapsed = elapsed + dt;
                self.phase = if elapsed >= self.config.commit_duration {
                    SwipePhase::Dismissed {
                        decision,
                        translate_x: target_x,
                    }
                } else {
                    SwipePhase::Committing {
                        decision,
                        start_x,
                        target_x,
                        elapsed,
                    }
                };
            }
            SwipePhase::Resetting {
                translate_x,
                velocity,
            } => {
                self.phase = self.step_spring(translate_x, velocity, dt.as_secs_f64());
            }
            _ => {}
        }
        self.translate_x()
    }

    /// Bring the next card in after a dismissal.
    pub fn next_card(&mut self) {
        self.phase = SwipePhase::Idle;
    }

    fn commit_progress(&self, elapsed: Duration) -> f64 {
        let total = self.config.commit_duration.as_secs_f64();
        if total <= 0.0 {
            1.0
        } else {
            (elapsed.as_secs_f64() / total).clamp(0.0, 1.0)
        }
    }

    fn step_spring(&self, mut x: f64, mut v: f64, mut remaining: f64) -> SwipePhase {
        let spring = self.config.spring;
        while remaining > 0.0 {
            let h = remaining.min(SPRING_STEP_SECS);
            let accel = (-spring.stiffness * x - spring.damping * v) / spring.mass;
            v += accel * h;
            x += v * h;
            remaining -= h;

            if x.abs() < spring.rest_threshold && v.abs() < spring.rest_threshold {
                return SwipePhase::Idle;
            }
        }
        SwipePhase::Resetting {
            translate_x: x,
            velocity: v,
        }
    }
}

fn ease_out_cubic(p: f64) -> f64 {
    1.0 - (1.0 - p).powi(3)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const WIDTH: f64 = 400.0;
    const FRAME: Duration = Duration::from_millis(16);

    fn run_frames(card: &mut SwipeCard, frames: usize) {
        for _ in 0..frames {
            card.tick(FRAME);
        }
    }

    #[test]
    fn threshold_is_thirty_percent_of_width() {
        assert!((SwipeCard::new(WIDTH).threshold() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn swipe_right_past_threshold_likes_once_and_leaves_right_edge() {
        let mut card = SwipeCard::new(WIDTH);
        assert!(card.begin_drag());
        card.drag_to(150.0);
        assert_eq!(card.release(), Some(SwipeDecision::Like));

        // Rapid re-drag while committing is ignored and fires nothing.
        assert!(!card.begin_drag());
        card.drag_to(-300.0);
        assert_eq!(card.release(), None);

        run_frames(&mut card, 30);
        assert_matches!(
            card.phase(),
            SwipePhase::Dismissed {
                decision: SwipeDecision::Like,
                ..
            }
        );
        assert!(card.translate_x() >= WIDTH);
        assert_eq!(card.release(), None);
    }

    #[test]
    fn swipe_left_past_threshold_skips() {
        let mut card = SwipeCard::new(WIDTH);
        card.begin_drag();
        card.drag_to(-200.0);
        assert_eq!(card.release(), Some(SwipeDecision::Skip));
        run_frames(&mut card, 30);
        assert!(card.translate_x() <= -WIDTH);
    }

    #[test]
    fn short_drag_springs_back_to_center() {
        let mut card = SwipeCard::new(WIDTH);
        card.begin_drag();
        card.drag_to(100.0);
        assert_eq!(card.release(), None);
        assert_matches!(card.phase(), SwipePhase::Resetting { .. });

        run_frames(&mut card, 120);
        assert_eq!(card.phase(), SwipePhase::Idle);
        assert_eq!(card.translate_x(), 0.0);
    }

    #[test]
    fn drag_exactly_at_threshold_does_not_commit() {
        let mut card = SwipeCard::new(WIDTH);
        card.begin_drag();
        card.drag_to(120.0);
        assert_eq!(card.release(), None);
    }

    #[test]
    fn commit_animation_moves_monotonically() {
        let mut card = SwipeCard::new(WIDTH);
        card.begin_drag();
        card.drag_to(200.0);
        card.release();
        let mut last = card.translate_x();
        for _ in 0..20 {
            let x = card.tick(FRAME);
            assert!(x >= last);
            last = x;
        }
    }

    #[test]
    fn regrab_during_spring_back_continues_from_offset() {
        let mut card = SwipeCard::new(WIDTH);
        card.begin_drag();
        card.drag_to(100.0);
        card.release();
        card.tick(FRAME);
        let offset = card.translate_x();

        assert!(card.begin_drag());
        card.drag_to(50.0);
        assert!((card.translate_x() - (offset + 50.0)).abs() < 1e-9);
    }

    #[test]
    fn next_card_returns_to_idle() {
        let mut card = SwipeCard::new(WIDTH);
        card.begin_drag();
        card.drag_to(-300.0);
        card.release();
        run_frames(&mut card, 30);
        card.next_card();
        assert_eq!(card.phase(), SwipePhase::Idle);
        assert!(card.begin_drag());
    }

    #[test]
    fn rotation_follows_drag() {
        let mut card = SwipeCard::new(WIDTH);
        card.begin_drag();
        card.drag_to(WIDTH / 2.0);
        assert!((card.rotation_degrees() - MAX_ROTATION_DEGREES / 2.0).abs() < 1e-9);
    }
}
