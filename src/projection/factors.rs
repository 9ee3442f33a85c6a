use serde::Serialize;
use std::fmt;

use super::engine::Projection;

/// Business age brackets. Older businesses carry more review history, so each
/// new review moves their average less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    Newcomer,    // <= 12 months
    Growing,     // <= 36 months
    Established, // <= 60 months
    Veteran,     // > 60 months
}

impl AgeBracket {
    /// Bracket for an age in months. Boundaries belong to the lower bracket.
    pub fn from_months(age_months: u32) -> Self {
        if age_months <= 12 {
            AgeBracket::Newcomer
        } else if age_months <= 36 {
            AgeBracket::Growing
        } else if age_months <= 60 {
            AgeBracket::Established
        } else {
            AgeBracket::Veteran
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            AgeBracket::Newcomer => 1.0,
            AgeBracket::Growing => 1.2,
            AgeBracket::Established => 1.5,
            AgeBracket::Veteran => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::Newcomer => "newcomer",
            AgeBracket::Growing => "growing",
            AgeBracket::Established => "established",
            AgeBracket::Veteran => "veteran",
        }
    }
}

pub fn get_age_factor(age_months: u32) -> f64 {
    AgeBracket::from_months(age_months).factor()
}

/// Required reviews scaled by the business's age factor.
pub fn calculate_difficulty_score(required_reviews: u64, age_months: u32) -> f64 {
    required_reviews as f64 * get_age_factor(age_months)
}

/// How far out a target sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTier {
    /// More than 24 months away (or never).
    LongTerm,
    /// 12 to 24 months.
    WithinTwoYears,
    /// 12 months or less.
    WithinYear,
}

impl StrategyTier {
    pub fn from_horizon(months_needed: Projection<f64>) -> Self {
        match months_needed {
            Projection::Impossible => StrategyTier::LongTerm,
            Projection::Reachable(m) if m > 24.0 => StrategyTier::LongTerm,
            Projection::Reachable(m) if m > 12.0 => StrategyTier::WithinTwoYears,
            Projection::Reachable(_) => StrategyTier::WithinYear,
        }
    }
}

/// Advisory for a target: the tier plus the rating it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub tier: StrategyTier,
    pub target_rating: f64,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = if self.target_rating.fract() == 0.0 {
            format!("{:.1}", self.target_rating)
        } else {
            format!("{}", self.target_rating)
        };
        match self.tier {
            StrategyTier::LongTerm => write!(
                f,
                "Moving to {} is a long-term goal. Consider a more practical intermediate target.",
                target
            ),
            StrategyTier::WithinTwoYears => write!(
                f,
                "Achieving {} is achievable in 1-2 years with consistent effort.",
                target
            ),
            StrategyTier::WithinYear => {
                write!(f, "Moving to {} is achievable in less than 12 months.", target)
            }
        }
    }
}

/// Classify a target by how long it takes to reach.
///
/// `required_reviews` is accepted for callers that build messages around it;
/// the classification itself only looks at the time horizon.
pub fn get_strategy_recommendation(
    _required_reviews: u64,
    months_needed: Projection<f64>,
    target_rating: f64,
) -> Recommendation {
    Recommendation {
        tier: StrategyTier::from_horizon(months_needed),
        target_rating,
    }
}
