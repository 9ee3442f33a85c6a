use serde::{Deserialize, Serialize};

use crate::projection::ProjectionConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub business: Option<BusinessProfile>,

    #[serde(default)]
    pub projection: Option<ProjectionConfig>,
}

/// The business being modeled. Each field fills in for a CLI flag left unset.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BusinessProfile {
    #[serde(default)]
    pub total_reviews: Option<u64>,

    #[serde(default)]
    pub average_rating: Option<f64>,

    /// Months since the business opened (or started collecting reviews).
    #[serde(default)]
    pub age_months: Option<u32>,

    /// Average new reviews per month.
    #[serde(default)]
    pub monthly_velocity: Option<f64>,
}

impl Config {
    /// Config written by `reputex init`.
    pub fn starter() -> Self {
        Self {
            business: Some(BusinessProfile {
                total_reviews: Some(320),
                average_rating: Some(4.4),
                age_months: Some(24),
                monthly_velocity: Some(13.3),
            }),
            projection: Some(ProjectionConfig::default()),
        }
    }
}
