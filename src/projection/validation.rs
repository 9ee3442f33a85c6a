use std::time::Duration;

use super::config::ProjectionConfig;
use super::crisis::CrisisScenario;
use super::plan::PlanInputs;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;
pub const MIN_CRISIS_DURATION: Duration = Duration::from_secs(24 * 3600);
pub const MAX_CRISIS_DURATION: Duration = Duration::from_secs(168 * 3600);

fn check_rating(errors: &mut Vec<String>, field: &str, value: f64) {
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        errors.push(format!(
            "{}: must be between {} and {}, got {}",
            field, MIN_RATING, MAX_RATING, value
        ));
    }
}

fn check_star_value(errors: &mut Vec<String>, field: &str, value: f64) {
    if !(value > 0.0 && value <= MAX_RATING) {
        errors.push(format!(
            "{}: must be greater than 0 and at most {}, got {}",
            field, MAX_RATING, value
        ));
    }
}

fn check_growth_factor(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(format!("{}: must be a finite number", field));
    }
}

/// Validate target planner inputs.
/// Returns all validation errors at once (not just the first).
pub fn validate_plan_inputs(inputs: &PlanInputs) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if inputs.total_reviews < 1 {
        errors.push("total_reviews: must be at least 1".to_string());
    }
    check_rating(&mut errors, "current_rating", inputs.current_rating);
    check_rating(&mut errors, "target_rating", inputs.target_rating);
    check_star_value(&mut errors, "star_value", inputs.star_value);

    // Non-positive velocity is allowed: it just makes the timeline impossible.
    if !inputs.velocity.is_finite() {
        errors.push("velocity: must be a finite number".to_string());
    }
    if let Some(growth) = inputs.growth_factor {
        check_growth_factor(&mut errors, "growth_factor", growth);
    }
    if inputs.age_months < 1 {
        errors.push("age_months: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a crisis scenario.
/// Returns all validation errors at once (not just the first).
pub fn validate_crisis(scenario: &CrisisScenario) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if scenario.total_reviews < 1 {
        errors.push("total_reviews: must be at least 1".to_string());
    }
    check_rating(&mut errors, "current_rating", scenario.current_rating);
    check_rating(&mut errors, "influx_rating", scenario.influx_rating);
    if scenario.negative_influx < 1 {
        errors.push("negative_influx: must be at least 1".to_string());
    }
    if scenario.duration < MIN_CRISIS_DURATION || scenario.duration > MAX_CRISIS_DURATION {
        errors.push(format!(
            "duration: must be between {} and {}, got {}",
            humantime::format_duration(MIN_CRISIS_DURATION),
            humantime::format_duration(MAX_CRISIS_DURATION),
            humantime::format_duration(scenario.duration)
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate projection settings loaded from the config file.
/// Returns all validation errors at once (not just the first).
pub fn validate_projection_config(config: &ProjectionConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(star_value) = config.star_value {
        check_star_value(&mut errors, "projection.star_value", star_value);
    }
    if let Some(growth) = config.growth_factor {
        check_growth_factor(&mut errors, "projection.growth_factor", growth);
    }
    if let Some(mix) = config.strategy_mix {
        if let Err(e) = mix.check() {
            errors.push(format!("projection.strategy_mix: {}", e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
