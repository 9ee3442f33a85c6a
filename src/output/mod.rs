pub mod formatter;

pub use formatter::{
    format_crisis, format_crisis_tsv, format_difficulty, format_distribution, format_mix, format_months,
    format_plan, format_plan_tsv, format_rating, format_reviews,
    should_use_colors, to_json,
};
