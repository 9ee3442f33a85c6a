use serde::{Deserialize, Serialize};

use super::engine::DEFAULT_STAR_VALUE;
use super::mix::StarMix;

/// Projection defaults.
///
/// Example YAML:
/// ```yaml
/// projection:
///   star_value: 5.0
///   growth_factor: 1.25
///   strategy_mix:
///     five_star: 80
///     four_star: 15
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Rating each new review is assumed to land at (default: 5.0).
    /// Ignored when `strategy_mix` is set.
    #[serde(default)]
    pub star_value: Option<f64>,

    /// Multiplier applied to the monthly review velocity, e.g. after a
    /// review-request campaign. Unset means the velocity is used as-is.
    #[serde(default)]
    pub growth_factor: Option<f64>,

    /// Mixed-quality acquisition strategy. The 3-star share is the remainder.
    #[serde(default)]
    pub strategy_mix: Option<StarMix>,
}

impl ProjectionConfig {
    /// Star value new reviews are assumed to average: the mix's weighted
    /// star value if a mix is configured, else `star_value`.
    pub fn effective_star_value(&self) -> f64 {
        match self.strategy_mix {
            Some(mix) => mix.weighted_star_value(),
            None => self.star_value.unwrap_or(DEFAULT_STAR_VALUE),
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            star_value: Some(DEFAULT_STAR_VALUE),
            growth_factor: None,
            strategy_mix: None,
        }
    }
}
