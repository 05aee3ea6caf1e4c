//! Stylisto domain logic.
//!
//! Pure, synchronous building blocks for the wardrobe and outfit features:
//! item types, palette analysis, outfit scoring and ranking, the
//! recommendation card view model, the swipe gesture state machine and
//! favorite-flag bookkeeping. Nothing in this crate performs I/O.

pub mod card;
pub mod color;
pub mod error;
pub mod favorites;
pub mod generator;
pub mod outfit;
pub mod scoring;
pub mod style;
pub mod swipe;
pub mod types;
pub mod wardrobe;
pub mod weather;
