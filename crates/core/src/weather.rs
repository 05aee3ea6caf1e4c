//! Weather context and garment suitability for the weather axis.

use serde::{Deserialize, Serialize};

use crate::wardrobe::{Category, ClothingItem, Season};

/// Lower bound (inclusive, Celsius) of the hot band.
pub const HOT_MIN_C: f64 = 25.0;
/// Lower bound (inclusive, Celsius) of the warm band.
pub const WARM_MIN_C: f64 = 15.0;
/// Lower bound (inclusive, Celsius) of the cool band. Anything below is cold.
pub const COOL_MIN_C: f64 = 5.0;

const COLD_WITHOUT_OUTERWEAR_PENALTY: f64 = 0.2;
const WET_OUTERWEAR_ADJUSTMENT: f64 = 0.1;
const UNKNOWN_CATEGORY_FITNESS: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Windy,
    #[serde(other)]
    Unknown,
}

impl WeatherCondition {
    pub fn is_wet(self) -> bool {
        matches!(self, WeatherCondition::Rainy | WeatherCondition::Snowy)
    }
}

/// Current or forecast weather supplied by the client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherContext {
    pub temperature_c: f64,
    pub condition: WeatherCondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Hot,
    Warm,
    Cool,
    Cold,
}

impl TemperatureBand {
    pub fn from_celsius(t: f64) -> Self {
        if t >= HOT_MIN_C {
            TemperatureBand::Hot
        } else if t >= WARM_MIN_C {
            TemperatureBand::Warm
        } else if t >= COOL_MIN_C {
            TemperatureBand::Cool
        } else {
            TemperatureBand::Cold
        }
    }
}

/// How well a single garment suits the weather, in `[0, 1]`.
pub fn item_fitness(item: &ClothingItem, weather: &WeatherContext) -> f64 {
    if item.category == Category::Other {
        return UNKNOWN_CATEGORY_FITNESS;
    }
    let outerwear = item.category == Category::Outerwear;

    match TemperatureBand::from_celsius(weather.temperature_c) {
        TemperatureBand::Hot => {
            if outerwear {
                0.1
            } else if item.season.contains(&Season::Summer) {
                1.0
            } else if item.is_only_for(Season::Winter) {
                0.2
            } else {
                0.7
            }
        }
        TemperatureBand::Warm => {
            if outerwear {
                0.6
            } else if item.is_only_for(Season::Winter) {
                0.5
            } else {
                0.9
            }
        }
        TemperatureBand::Cool => {
            if outerwear {
                1.0
            } else if item.is_only_for(Season::Summer) {
                0.4
            } else {
                0.8
            }
        }
        TemperatureBand::Cold => {
            if outerwear || item.season.contains(&Season::Winter) {
                1.0
            } else if item.is_only_for(Season::Summer) {
                0.1
            } else {
                0.6
            }
        }
    }
}

/// Weather suitability of a whole outfit.
///
/// Mean item fitness, adjusted for outfit-level needs: cold weather without
/// outerwear is penalised, and wet weather rewards (or penalises the lack of)
/// an outer layer.
pub fn weather_suitability(items: &[ClothingItem], weather: &WeatherContext) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    let mean = items.iter().map(|i| item_fitness(i, weather)).sum::<f64>() / items.len() as f64;
    let has_outerwear = items.iter().any(|i| i.category == Category::Outerwear);

    let mut score = mean;
    if TemperatureBand::from_celsius(weather.temperature_c) == TemperatureBand::Cold && !has_outerwear
    {
        score -= COLD_WITHOUT_OUTERWEAR_PENALTY;
    }
    if weather.condition.is_wet() {
        if has_outerwear {
            score += WET_OUTERWEAR_ADJUSTMENT;
        } else {
            score -= WET_OUTERWEAR_ADJUSTMENT;
        }
    }
    score.clamp(0.0, 1.0)
}
