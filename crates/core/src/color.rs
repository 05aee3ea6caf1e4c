//! Color parsing and palette harmony classification.
//!
//! Item colors are hex strings. Each is converted to HSL; low-saturation or
//! extreme-lightness colors count as neutrals and never affect harmony.
//! Chromatic hues are clustered on the hue wheel and the resulting cluster
//! layout is classified into a [`ColorHarmony`] category.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Colors below this saturation are treated as neutrals (greys, beiges).
pub const NEUTRAL_MAX_SATURATION: f64 = 0.15;
/// Colors darker than this lightness are treated as neutrals (near-black).
pub const NEUTRAL_MIN_LIGHTNESS: f64 = 0.12;
/// Colors lighter than this lightness are treated as neutrals (near-white).
pub const NEUTRAL_MAX_LIGHTNESS: f64 = 0.92;

/// Adjacent hues closer than this (degrees) belong to the same cluster.
pub const CLUSTER_GAP_DEGREES: f64 = 30.0;

const MONOCHROMATIC_MAX_SPAN: f64 = 20.0;
const ANALOGOUS_MAX_SPAN: f64 = 90.0;
const ANALOGOUS_MAX_DISTANCE: f64 = 60.0;
const COMPLEMENTARY_MIN_DISTANCE: f64 = 150.0;
const TRIADIC_MIN_DISTANCE: f64 = 90.0;
const TRIADIC_MAX_DISTANCE: f64 = 150.0;

// ---------------------------------------------------------------------------
// Hex / HSL
// ---------------------------------------------------------------------------

/// A color in HSL space. Hue in degrees `[0, 360)`, saturation and
/// lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn is_neutral(&self) -> bool {
        self.saturation < NEUTRAL_MAX_SATURATION
            || self.lightness < NEUTRAL_MIN_LIGHTNESS
            || self.lightness > NEUTRAL_MAX_LIGHTNESS
    }
}

/// Parse `#RGB`, `#RRGGBB` (leading `#` optional, case-insensitive).
pub fn parse_hex(input: &str) -> Result<(u8, u8, u8), CoreError> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let invalid = || CoreError::Validation(format!("Invalid hex color '{input}'"));

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    match hex.len() {
        3 => {
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 1], 16)
                    .map(|v| v * 17)
                    .map_err(|_| invalid())
            };
            Ok((channel(0)?, channel(1)?, channel(2)?))
        }
        6 => {
            let channel =
                |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            Ok((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => Err(invalid()),
    }
}

/// Convert 8-bit RGB to HSL.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    if (max - min).abs() < f64::EPSILON {
        return Hsl {
            hue: 0.0,
            saturation: 0.0,
            lightness,
        };
    }

    let delta = max - min;
    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl {
        hue: (sector * 60.0).rem_euclid(360.0),
        saturation,
        lightness,
    }
}

pub fn parse_hsl(input: &str) -> Result<Hsl, CoreError> {
    let (r, g, b) = parse_hex(input)?;
    Ok(rgb_to_hsl(r, g, b))
}

/// Shortest angular distance between two hues, in `[0, 180]`.
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

// ---------------------------------------------------------------------------
// Harmony
// ---------------------------------------------------------------------------

/// Palette harmony category.
///
/// Classification tests categories in [`HARMONY_PRIORITY`] order and the
/// first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorHarmony {
    Neutral,
    Monochromatic,
    Complementary,
    Analogous,
    Triadic,
    #[serde(rename = "none")]
    NoHarmony,
}

pub const HARMONY_PRIORITY: [ColorHarmony; 6] = [
    ColorHarmony::Neutral,
    ColorHarmony::Monochromatic,
    ColorHarmony::Complementary,
    ColorHarmony::Analogous,
    ColorHarmony::Triadic,
    ColorHarmony::NoHarmony,
];

impl ColorHarmony {
    /// Sub-score for the color axis.
    pub fn score(self) -> f64 {
        match self {
            ColorHarmony::Complementary => 0.95,
            ColorHarmony::Analogous => 0.90,
            ColorHarmony::Neutral => 0.90,
            ColorHarmony::Monochromatic => 0.85,
            ColorHarmony::Triadic => 0.80,
            ColorHarmony::NoHarmony => 0.40,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorHarmony::Neutral => "Neutral palette",
            ColorHarmony::Monochromatic => "Monochromatic",
            ColorHarmony::Complementary => "Complementary colors",
            ColorHarmony::Analogous => "Analogous colors",
            ColorHarmony::Triadic => "Triadic palette",
            ColorHarmony::NoHarmony => "Mixed colors",
        }
    }

    fn matches(self, clusters: &[HueCluster]) -> bool {
        match self {
            ColorHarmony::Neutral => clusters.is_empty(),
            ColorHarmony::Monochromatic => {
                clusters.len() == 1 && clusters[0].span <= MONOCHROMATIC_MAX_SPAN
            }
            ColorHarmony::Complementary => {
                clusters.len() == 2
                    && hue_distance(clusters[0].center, clusters[1].center)
                        >= COMPLEMENTARY_MIN_DISTANCE
            }
            ColorHarmony::Analogous => match clusters {
                [only] => only.span <= ANALOGOUS_MAX_SPAN,
                [a, b] => hue_distance(a.center, b.center) <= ANALOGOUS_MAX_DISTANCE,
                _ => false,
            },
            ColorHarmony::Triadic => {
                clusters.len() == 3
                    && (0..3).all(|i| {
                        let d = hue_distance(clusters[i].center, clusters[(i + 1) % 3].center);
                        (TRIADIC_MIN_DISTANCE..=TRIADIC_MAX_DISTANCE).contains(&d)
                    })
            }
            ColorHarmony::NoHarmony => true,
        }
    }
}

/// A run of hues on the wheel with no gap larger than [`CLUSTER_GAP_DEGREES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueCluster {
    pub center: f64,
    pub span: f64,
}

/// Group hues into clusters, handling wrap-around at 0°/360°.
pub fn cluster_hues(hues: &[f64]) -> Vec<HueCluster> {
    if hues.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<f64> = hues.iter().map(|h| h.rem_euclid(360.0)).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    // Start walking right after the widest gap so no cluster straddles it.
    let n = sorted.len();
    let mut start = 0;
    let mut widest = -1.0;
    for i in 0..n {
        let next = sorted[(i + 1) % n] + if i + 1 == n { 360.0 } else { 0.0 };
        let gap = next - sorted[i];
        if gap > widest {
            widest = gap;
            start = (i + 1) % n;
        }
    }

    let unwrapped: Vec<f64> = (0..n)
        .map(|k| {
            let idx = (start + k) % n;
            sorted[idx] + if idx < start { 360.0 } else { 0.0 }
        })
        .collect();

    let mut clusters = Vec::new();
    let mut members = vec![unwrapped[0]];
    for pair in unwrapped.windows(2) {
        if pair[1] - pair[0] > CLUSTER_GAP_DEGREES {
            clusters.push(close_cluster(&members));
            members.clear();
        }
        members.push(pair[1]);
    }
    clusters.push(close_cluster(&members));
    clusters
}

fn close_cluster(members: &[f64]) -> HueCluster {
    let first = members[0];
    let last = members[members.len() - 1];
    let mean = members.iter().sum::<f64>() / members.len() as f64;
    HueCluster {
        center: mean.rem_euclid(360.0),
        span: last - first,
    }
}

/// Classify a palette of hex colors.
///
/// Returns an error if any color fails to parse; callers fall back to a
/// neutral sub-score in that case.
pub fn classify_palette<S: AsRef<str>>(colors: &[S]) -> Result<ColorHarmony, CoreError> {
    let mut hues = Vec::with_capacity(colors.len());
    for color in colors {
        let hsl = parse_hsl(color.as_ref())?;
        if !hsl.is_neutral() {
            hues.push(hsl.hue);
        }
    }

    let clusters = cluster_hues(&hues);
    Ok(HARMONY_PRIORITY
        .into_iter()
        .find(|h| h.matches(&clusters))
        .unwrap_or(ColorHarmony::NoHarmony))
}
