//! Outfit generation and ranking.
//!
//! Items are bucketed by category and each bucket is trimmed to its best
//! `per_bucket_limit` items before the cross product is enumerated, so the
//! number of scored candidates stays bounded regardless of wardrobe size.
//! Output is a pure function of the inputs.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::scoring::{score_outfit, Score, ScoringContext, UNKNOWN_SUB_SCORE};
use crate::types::DbId;
use crate::wardrobe::{Category, ClothingItem, Occasion};
use crate::weather::item_fitness;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Items kept per category bucket before combination.
pub const DEFAULT_PER_BUCKET_LIMIT: usize = 6;
/// Maximum candidates scored across all templates.
pub const DEFAULT_MAX_CANDIDATES: usize = 500;
/// Maximum outfits returned.
pub const DEFAULT_MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub per_bucket_limit: usize,
    pub max_candidates: usize,
    pub max_results: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            per_bucket_limit: DEFAULT_PER_BUCKET_LIMIT,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Slot structure of an outfit: one item per listed category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutfitTemplate {
    pub name: String,
    pub slots: Vec<Category>,
}

impl OutfitTemplate {
    pub fn new(name: impl Into<String>, slots: impl IntoIterator<Item = Category>) -> Self {
        Self {
            name: name.into(),
            slots: slots.into_iter().collect(),
        }
    }
}

/// `top + bottom + shoes` and `dress + shoes`.
pub fn default_templates() -> Vec<OutfitTemplate> {
    vec![
        OutfitTemplate::new(
            "separates",
            [Category::Tops, Category::Bottoms, Category::Shoes],
        ),
        OutfitTemplate::new("dress", [Category::Dresses, Category::Shoes]),
    ]
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedOutfit {
    pub template: String,
    pub items: Vec<ClothingItem>,
    pub score: Score,
}

impl GeneratedOutfit {
    /// Item ids sorted ascending; identifies the outfit regardless of slot order.
    pub fn item_set(&self) -> Vec<DbId> {
        let mut ids: Vec<DbId> = self.items.iter().map(|i| i.id).collect();
        ids.sort();
        ids
    }

    pub fn total_times_worn(&self) -> u64 {
        self.items.iter().map(|i| i.times_worn as u64).sum()
    }
}

/// Ranking order: total descending, then less-worn first, then item ids.
pub fn rank_order(a: &GeneratedOutfit, b: &GeneratedOutfit) -> Ordering {
    b.score
        .total
        .total_cmp(&a.score.total)
        .then_with(|| a.total_times_worn().cmp(&b.total_times_worn()))
        .then_with(|| a.item_set().cmp(&b.item_set()))
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Context fit of a single item, used to pre-rank buckets.
pub fn item_suitability(item: &ClothingItem, ctx: &ScoringContext) -> f64 {
    let mut parts = Vec::with_capacity(3);

    if let Some(raw) = ctx.occasion.as_deref().filter(|o| !o.trim().is_empty()) {
        parts.push(match raw.parse::<Occasion>() {
            Ok(occasion) if item.suits_occasion(occasion) => 1.0,
            Ok(_) => 0.0,
            Err(_) => UNKNOWN_SUB_SCORE,
        });
    }
    if let Some(season) = ctx.season {
        parts.push(if item.fits_season(season) { 1.0 } else { 0.0 });
    }
    if let Some(weather) = &ctx.weather {
        parts.push(item_fitness(item, weather));
    }

    if parts.is_empty() {
        1.0
    } else {
        parts.iter().sum::<f64>() / parts.len() as f64
    }
}

fn bucket_wardrobe<'a>(
    wardrobe: &'a [ClothingItem],
    ctx: &ScoringContext,
    per_bucket_limit: usize,
) -> BTreeMap<Category, Vec<&'a ClothingItem>> {
    let mut buckets: BTreeMap<Category, Vec<(f64, &ClothingItem)>> = BTreeMap::new();
    for item in wardrobe {
        buckets
            .entry(item.category)
            .or_default()
            .push((item_suitability(item, ctx), item));
    }

    buckets
        .into_iter()
        .map(|(category, mut ranked)| {
            ranked.sort_by(|(sa, a), (sb, b)| {
                sb.total_cmp(sa)
                    .then_with(|| a.times_worn.cmp(&b.times_worn))
                    .then_with(|| a.id.cmp(&b.id))
            });
            ranked.truncate(per_bucket_limit);
            (category, ranked.into_iter().map(|(_, i)| i).collect())
        })
        .collect()
}

/// Generate ranked, deduplicated outfits from a wardrobe.
///
/// The candidate budget is split evenly across templates. Templates whose
/// categories are missing from the wardrobe contribute nothing.
pub fn generate_outfits(
    wardrobe: &[ClothingItem],
    templates: &[OutfitTemplate],
    ctx: &ScoringContext,
    config: &GeneratorConfig,
) -> Vec<GeneratedOutfit> {
    if wardrobe.is_empty() || templates.is_empty() || config.max_results == 0 {
        return Vec::new();
    }

    let buckets = bucket_wardrobe(wardrobe, ctx, config.per_bucket_limit.max(1));
    let budget_per_template = (config.max_candidates / templates.len()).max(1);

    let mut outfits = Vec::new();
    for template in templates {
        outfits.extend(enumerate_template(template, &buckets, ctx, budget_per_template));
    }

    outfits.sort_by(rank_order);

    let mut seen: HashSet<Vec<DbId>> = HashSet::new();
    outfits.retain(|o| seen.insert(o.item_set()));
    outfits.truncate(config.max_results);
    outfits
}

fn enumerate_template(
    template: &OutfitTemplate,
    buckets: &BTreeMap<Category, Vec<&ClothingItem>>,
    ctx: &ScoringContext,
    budget: usize,
) -> Vec<GeneratedOutfit> {
    if template.slots.is_empty() {
        return Vec::new();
    }

    let mut slot_items: Vec<&[&ClothingItem]> = Vec::with_capacity(template.slots.len());
    for category in &template.slots {
        match buckets.get(category) {
            Some(items) if !items.is_empty() => slot_items.push(items.as_slice()),
            _ => return Vec::new(),
        }
    }

    // Odometer over the trimmed buckets.
    let mut indices = vec![0usize; slot_items.len()];
    let mut results = Vec::new();
    let mut considered = 0usize;

    loop {
        if considered >= budget {
            break;
        }
        considered += 1;

        let items: Vec<ClothingItem> = indices
            .iter()
            .zip(&slot_items)
            .map(|(&i, bucket)| bucket[i].clone())
            .collect();

        let mut ids: Vec<DbId> = items.iter().map(|i| i.id).collect();
        ids.sort();
        ids.dedup();
        if ids.len() == items.len() {
            if let Ok(score) = score_outfit(&items, ctx) {
                results.push(GeneratedOutfit {
                    template: template.name.clone(),
                    items,
                    score,
                });
            }
        }

        // Advance the odometer; stop once every combination was visited.
        let mut pos = indices.len();
        loop {
            if pos == 0 {
                return results;
            }
            pos -= 1;
            indices[pos] += 1;
            if indices[pos] < slot_items[pos].len() {
                break;
            }
            indices[pos] = 0;
        }
    }

    results
}
