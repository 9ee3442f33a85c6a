use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use super::engine::{
    simulate_negative_impact, solve_for_additional_reviews, Projection, DEFAULT_STAR_VALUE,
};
use super::error::ProjectionError;

/// Rating of each review in a negative influx unless told otherwise.
pub const DEFAULT_INFLUX_RATING: f64 = 1.0;

/// What set off the burst of negative reviews. Informational only; every
/// event is modeled the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisEvent {
    ViralIncident,
    PolicyBacklash,
    SafetyReport,
    StaffMisconduct,
    SmearCampaign,
}

impl CrisisEvent {
    pub const ALL: [CrisisEvent; 5] = [
        CrisisEvent::ViralIncident,
        CrisisEvent::PolicyBacklash,
        CrisisEvent::SafetyReport,
        CrisisEvent::StaffMisconduct,
        CrisisEvent::SmearCampaign,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CrisisEvent::ViralIncident => "Viral Social Media Incident",
            CrisisEvent::PolicyBacklash => "Policy Change Backlash",
            CrisisEvent::SafetyReport => "Hygiene/Safety Report",
            CrisisEvent::StaffMisconduct => "Staff Misconduct",
            CrisisEvent::SmearCampaign => "Competitor Smear Campaign",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            CrisisEvent::ViralIncident => "viral",
            CrisisEvent::PolicyBacklash => "policy",
            CrisisEvent::SafetyReport => "safety",
            CrisisEvent::StaffMisconduct => "misconduct",
            CrisisEvent::SmearCampaign => "smear",
        }
    }
}

impl fmt::Display for CrisisEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CrisisEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        CrisisEvent::ALL
            .into_iter()
            .find(|e| e.slug().eq_ignore_ascii_case(s) || e.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let options: Vec<&str> = CrisisEvent::ALL.iter().map(|e| e.slug()).collect();
                format!("unknown event '{}' (expected one of: {})", s, options.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrisisScenario {
    pub event: CrisisEvent,
    pub negative_influx: u64,
    pub influx_rating: f64,
    pub duration: Duration,
    pub total_reviews: u64,
    pub current_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrisisOutcome {
    pub event: CrisisEvent,
    pub negative_influx: u64,
    pub duration_hours: u64,
    pub previous_rating: f64,
    pub projected_rating: f64,
    pub rating_drop: f64,
    /// 5-star reviews needed to climb back to the previous rating.
    pub recovery_reviews: Projection<u64>,
}

pub fn run_crisis(scenario: &CrisisScenario) -> Result<CrisisOutcome, ProjectionError> {
    let projected_rating = simulate_negative_impact(
        scenario.total_reviews,
        scenario.current_rating,
        scenario.negative_influx,
        scenario.influx_rating,
    )?;

    let recovery_reviews = solve_for_additional_reviews(
        scenario.total_reviews.saturating_add(scenario.negative_influx),
        projected_rating,
        scenario.current_rating,
        DEFAULT_STAR_VALUE,
    );

    debug!(
        event = scenario.event.slug(),
        influx = scenario.negative_influx,
        projected_rating,
        recovery = ?recovery_reviews,
        "ran crisis simulation"
    );

    Ok(CrisisOutcome {
        event: scenario.event,
        negative_influx: scenario.negative_influx,
        duration_hours: scenario.duration.as_secs() / 3600,
        previous_rating: scenario.current_rating,
        projected_rating,
        rating_drop: scenario.current_rating - projected_rating,
        recovery_reviews,
    })
}
