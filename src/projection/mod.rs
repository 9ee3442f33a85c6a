pub mod config;
pub mod crisis;
pub mod engine;
pub mod error;
pub mod factors;
pub mod mix;
pub mod plan;
pub mod validation;

pub use config::ProjectionConfig;
pub use crisis::{run_crisis, CrisisEvent, CrisisOutcome, CrisisScenario, DEFAULT_INFLUX_RATING};
pub use engine::{
    calculate_adjusted_velocity, calculate_total_points, calculate_weighted_star_value,
    get_approximate_distribution, predict_time, simulate_negative_impact,
    solve_for_additional_reviews, Projection, DEFAULT_STAR_VALUE,
};
pub use error::ProjectionError;
pub use factors::{
    calculate_difficulty_score, get_age_factor, get_strategy_recommendation, AgeBracket,
    Recommendation, StrategyTier,
};
pub use mix::{StarDistribution, StarMix};
pub use plan::{build_plan, PlanInputs, TargetPlan, Timeline};
pub use validation::{validate_crisis, validate_plan_inputs, validate_projection_config};
