use serde::Serialize;
use tracing::debug;

use super::engine::{
    calculate_adjusted_velocity, predict_time, solve_for_additional_reviews, Projection,
};
use super::factors::{
    calculate_difficulty_score, get_age_factor, get_strategy_recommendation, AgeBracket,
    Recommendation,
};

/// Everything the target planner needs to know about a business and its goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanInputs {
    pub total_reviews: u64,
    pub current_rating: f64,
    pub target_rating: f64,
    /// Assumed rating of each new review (5.0, or a star mix's weighted value).
    pub star_value: f64,
    /// Reviews per month.
    pub velocity: f64,
    pub growth_factor: Option<f64>,
    pub age_months: u32,
}

/// How long a reachable target takes and how hard it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub new_total_reviews: u64,
    pub effective_velocity: f64,
    pub months_needed: Projection<f64>,
    pub years_needed: Projection<f64>,
    pub difficulty_score: f64,
    pub age_bracket: AgeBracket,
    pub age_factor: f64,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetPlan {
    pub inputs: PlanInputs,
    pub required_reviews: Projection<u64>,
    /// None when the target can't be reached at the assumed star value.
    pub timeline: Option<Timeline>,
}

impl TargetPlan {
    pub fn is_reachable(&self) -> bool {
        !self.required_reviews.is_impossible()
    }
}

pub fn build_plan(inputs: &PlanInputs) -> TargetPlan {
    let required_reviews = solve_for_additional_reviews(
        inputs.total_reviews,
        inputs.current_rating,
        inputs.target_rating,
        inputs.star_value,
    );

    let timeline = required_reviews.value().map(|required| {
        let effective_velocity = match inputs.growth_factor {
            Some(growth) => calculate_adjusted_velocity(inputs.velocity, growth),
            None => inputs.velocity,
        };
        let months_needed = predict_time(required, effective_velocity);

        Timeline {
            new_total_reviews: inputs.total_reviews.saturating_add(required),
            effective_velocity,
            months_needed,
            years_needed: months_needed.map(|m| m / 12.0),
            difficulty_score: calculate_difficulty_score(required, inputs.age_months),
            age_bracket: AgeBracket::from_months(inputs.age_months),
            age_factor: get_age_factor(inputs.age_months),
            recommendation: get_strategy_recommendation(
                required,
                months_needed,
                inputs.target_rating,
            ),
        }
    });

    debug!(
        total_reviews = inputs.total_reviews,
        current_rating = inputs.current_rating,
        target_rating = inputs.target_rating,
        star_value = inputs.star_value,
        required = ?required_reviews,
        "built target plan"
    );

    TargetPlan {
        inputs: inputs.clone(),
        required_reviews,
        timeline,
    }
}
