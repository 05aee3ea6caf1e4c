//! Style vocabulary and pairwise style compatibility.
//!
//! Styles are read from item tags. Tags outside the vocabulary are ignored
//! for style matching (they remain free-form labels for the user).

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::Serialize;

use crate::wardrobe::ClothingItem;

/// Compatibility of two identical styles.
pub const SAME_STYLE_COMPATIBILITY: f64 = 1.0;
/// Compatibility of two known styles with no listed affinity.
pub const DEFAULT_COMPATIBILITY: f64 = 0.3;
/// Pair score when either item carries no recognised style tag.
pub const UNKNOWN_STYLE_COMPATIBILITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Casual,
    Formal,
    Business,
    Sporty,
    Streetwear,
    Bohemian,
    Classic,
    Minimalist,
    Vintage,
    Elegant,
}

impl FromStr for Style {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "casual" => Ok(Style::Casual),
            "formal" => Ok(Style::Formal),
            "business" => Ok(Style::Business),
            "sporty" | "athletic" | "sport" => Ok(Style::Sporty),
            "streetwear" | "street" => Ok(Style::Streetwear),
            "bohemian" | "boho" => Ok(Style::Bohemian),
            "classic" => Ok(Style::Classic),
            "minimalist" | "minimal" => Ok(Style::Minimalist),
            "vintage" | "retro" => Ok(Style::Vintage),
            "elegant" | "chic" => Ok(Style::Elegant),
            _ => Err(()),
        }
    }
}

/// Symmetric affinities between distinct styles. Pairs not listed score
/// [`DEFAULT_COMPATIBILITY`].
const AFFINITIES: &[(Style, Style, f64)] = &[
    (Style::Formal, Style::Business, 0.9),
    (Style::Formal, Style::Elegant, 0.9),
    (Style::Formal, Style::Classic, 0.8),
    (Style::Business, Style::Classic, 0.9),
    (Style::Business, Style::Minimalist, 0.8),
    (Style::Business, Style::Elegant, 0.7),
    (Style::Classic, Style::Elegant, 0.8),
    (Style::Classic, Style::Minimalist, 0.8),
    (Style::Classic, Style::Casual, 0.7),
    (Style::Classic, Style::Vintage, 0.7),
    (Style::Casual, Style::Streetwear, 0.8),
    (Style::Casual, Style::Sporty, 0.7),
    (Style::Casual, Style::Minimalist, 0.8),
    (Style::Casual, Style::Bohemian, 0.7),
    (Style::Casual, Style::Vintage, 0.6),
    (Style::Sporty, Style::Streetwear, 0.8),
    (Style::Streetwear, Style::Vintage, 0.6),
    (Style::Bohemian, Style::Vintage, 0.8),
    (Style::Minimalist, Style::Elegant, 0.7),
];

/// Compatibility of two styles in `[0, 1]`.
pub fn compatibility(a: Style, b: Style) -> f64 {
    if a == b {
        return SAME_STYLE_COMPATIBILITY;
    }
    AFFINITIES
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, score)| *score)
        .unwrap_or(DEFAULT_COMPATIBILITY)
}

/// Recognised styles among an item's tags.
pub fn item_styles(item: &ClothingItem) -> BTreeSet<Style> {
    item.tags.iter().filter_map(|t| t.parse().ok()).collect()
}

/// Best compatibility between any style of `a` and any style of `b`.
pub fn pair_compatibility(a: &BTreeSet<Style>, b: &BTreeSet<Style>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return UNKNOWN_STYLE_COMPATIBILITY;
    }
    a.iter()
        .flat_map(|x| b.iter().map(move |y| compatibility(*x, *y)))
        .fold(0.0, f64::max)
}

/// Mean pairwise compatibility across the outfit. Single items score 1.0.
pub fn style_matching(items: &[ClothingItem]) -> f64 {
    let styles: Vec<BTreeSet<Style>> = items.iter().map(item_styles).collect();

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..styles.len() {
        for j in (i + 1)..styles.len() {
            total += pair_compatibility(&styles[i], &styles[j]);
            pairs += 1;
        }
    }

    if pairs == 0 {
        1.0
    } else {
        (total / pairs as f64).clamp(0.0, 1.0)
    }
}
