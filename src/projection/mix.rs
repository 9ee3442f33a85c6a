use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::engine::calculate_weighted_star_value;
use super::error::ProjectionError;

/// Probability of each star level (1-5) among newly acquired reviews.
///
/// Probabilities are not required to sum to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StarDistribution(BTreeMap<u8, f64>);

impl StarDistribution {
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ProjectionError>
    where
        I: IntoIterator<Item = (u8, f64)>,
    {
        let mut map = BTreeMap::new();
        for (star, probability) in pairs {
            if !(1..=5).contains(&star) {
                return Err(ProjectionError::InvalidDistribution(format!(
                    "star level {} is outside 1-5",
                    star
                )));
            }
            if !probability.is_finite() || probability < 0.0 {
                return Err(ProjectionError::InvalidDistribution(format!(
                    "probability for {} stars must be a non-negative number, got {}",
                    star, probability
                )));
            }
            map.insert(star, probability);
        }
        Ok(Self(map))
    }

    /// Star levels with their probabilities, highest star first.
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.0.iter().rev().map(|(&star, &p)| (star, p))
    }

    pub fn probability(&self, star: u8) -> f64 {
        self.0.get(&star).copied().unwrap_or(0.0)
    }

    pub fn total_probability(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parses "5:0.8,4:0.15,3:0.05".
impl FromStr for StarDistribution {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pairs = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (star, probability) = part.split_once(':').ok_or_else(|| {
                ProjectionError::InvalidDistribution(format!(
                    "expected STAR:PROBABILITY, got '{}'",
                    part
                ))
            })?;
            let star: u8 = star.trim().parse().map_err(|_| {
                ProjectionError::InvalidDistribution(format!("invalid star level '{}'", star.trim()))
            })?;
            let probability: f64 = probability.trim().parse().map_err(|_| {
                ProjectionError::InvalidDistribution(format!(
                    "invalid probability '{}'",
                    probability.trim()
                ))
            })?;
            pairs.push((star, probability));
        }
        if pairs.is_empty() {
            return Err(ProjectionError::InvalidDistribution(
                "no star levels given".to_string(),
            ));
        }
        Self::from_pairs(pairs)
    }
}

/// Manual acquisition strategy: a share of 5-star and 4-star reviews in
/// percent, with whatever is left over landing at 3 stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StarMix {
    pub five_star: u8,
    pub four_star: u8,
}

impl StarMix {
    pub fn from_percentages(five_star: u8, four_star: u8) -> Result<Self, ProjectionError> {
        let mix = Self {
            five_star,
            four_star,
        };
        mix.check()?;
        Ok(mix)
    }

    pub fn check(&self) -> Result<(), ProjectionError> {
        if self.five_star as u16 + self.four_star as u16 > 100 {
            return Err(ProjectionError::InvalidMix {
                five_star: self.five_star,
                four_star: self.four_star,
            });
        }
        Ok(())
    }

    pub fn three_star(&self) -> u8 {
        100u8.saturating_sub(self.five_star).saturating_sub(self.four_star)
    }

    pub fn distribution(&self) -> StarDistribution {
        let mut map = BTreeMap::new();
        map.insert(5, self.five_star as f64 / 100.0);
        map.insert(4, self.four_star as f64 / 100.0);
        map.insert(3, self.three_star() as f64 / 100.0);
        StarDistribution(map)
    }

    pub fn weighted_star_value(&self) -> f64 {
        calculate_weighted_star_value(&self.distribution())
    }
}

impl Default for StarMix {
    fn default() -> Self {
        Self {
            five_star: 80,
            four_star: 15,
        }
    }
}
