use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::IsTerminal;

use crate::projection::{CrisisOutcome, Projection, StarMix, TargetPlan};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

pub fn format_rating(rating: f64) -> String {
    format!("{:.2}", rating)
}

/// Difficulty as a whole number, fractional part dropped
pub fn format_difficulty(score: f64) -> String {
    format!("{}", score.trunc() as u64)
}

pub fn format_reviews(required: Projection<u64>) -> String {
    match required {
        Projection::Reachable(n) => n.to_string(),
        Projection::Impossible => "impossible".to_string(),
    }
}

/// "120.0 months (10.0 years)", or "never" when no velocity
pub fn format_months(months: Projection<f64>) -> String {
    match months {
        Projection::Reachable(m) => format!("{:.1} months ({:.1} years)", m, m / 12.0),
        Projection::Impossible => "never (no review velocity)".to_string(),
    }
}

/// Multi-line report for a target plan.
pub fn format_plan(plan: &TargetPlan, use_colors: bool) -> String {
    let inputs = &plan.inputs;
    let mut lines = vec![format!(
        "Target: {} -> {} over {} reviews (new reviews avg {})",
        format_rating(inputs.current_rating),
        format_rating(inputs.target_rating),
        inputs.total_reviews,
        format_rating(inputs.star_value)
    )];

    let Some(timeline) = &plan.timeline else {
        let msg = "Target rating is impossible with the current star mix.";
        lines.push(if use_colors {
            msg.red().to_string()
        } else {
            msg.to_string()
        });
        return lines.join("\n");
    };

    let required = format_reviews(plan.required_reviews);
    lines.push(format!(
        "  Required new reviews: {}",
        if use_colors {
            required.bold().to_string()
        } else {
            required
        }
    ));
    lines.push(format!("  New total volume: {}", timeline.new_total_reviews));
    lines.push(format!(
        "  Velocity: {:.1}/month",
        timeline.effective_velocity
    ));
    lines.push(format!(
        "  Estimated time: {}",
        format_months(timeline.months_needed)
    ));
    lines.push(format!(
        "  Difficulty: {} ({}, x{})",
        format_difficulty(timeline.difficulty_score),
        timeline.age_bracket.as_str(),
        timeline.age_factor
    ));

    let advice = timeline.recommendation.to_string();
    lines.push(format!(
        "  Advisor: {}",
        if use_colors {
            advice.cyan().to_string()
        } else {
            advice
        }
    ));

    lines.join("\n")
}

/// Multi-line report for a crisis simulation.
pub fn format_crisis(outcome: &CrisisOutcome, use_colors: bool) -> String {
    let projected = format_rating(outcome.projected_rating);
    let drop = format!("-{:.2}", outcome.rating_drop);
    let headline = if use_colors {
        format!("{} {}", projected.bold(), drop.red())
    } else {
        format!("{} {}", projected, drop)
    };

    let recovery = match outcome.recovery_reviews {
        Projection::Reachable(n) => format!(
            "{} consistent 5-star reviews to recover to {}",
            n,
            format_rating(outcome.previous_rating)
        ),
        Projection::Impossible => format!(
            "a {} rating cannot be fully recovered",
            format_rating(outcome.previous_rating)
        ),
    };

    [
        format!(
            "{}: {} negative reviews over {}",
            outcome.event.label(),
            outcome.negative_influx,
            humantime::format_duration(std::time::Duration::from_secs(
                outcome.duration_hours * 3600
            ))
        ),
        format!("  Projected rating: {}", headline),
        format!("  Recovery: {}", recovery),
    ]
    .join("\n")
}

/// One line per star level, highest first: "5★  224"
pub fn format_distribution(counts: &BTreeMap<u8, u64>, use_colors: bool) -> String {
    counts
        .iter()
        .rev()
        .map(|(star, count)| {
            let label = format!("{}★", star);
            if use_colors {
                format!("{}  {:>6}", label.yellow(), count)
            } else {
                format!("{}  {:>6}", label, count)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_mix(mix: &StarMix) -> String {
    format!(
        "Mix: {}% 5★, {}% 4★, {}% 3★\nWeighted star value: {}",
        mix.five_star,
        mix.four_star,
        mix.three_star(),
        format_rating(mix.weighted_star_value())
    )
}

/// Tab-separated plan for scripting
/// Columns: required, new_total, months, difficulty, tier (no headers, no colors)
pub fn format_plan_tsv(plan: &TargetPlan) -> String {
    match &plan.timeline {
        None => "impossible".to_string(),
        Some(t) => {
            let months = match t.months_needed {
                Projection::Reachable(m) => format!("{:.2}", m),
                Projection::Impossible => "inf".to_string(),
            };
            format!(
                "{}\t{}\t{}\t{:.2}\t{:?}",
                format_reviews(plan.required_reviews),
                t.new_total_reviews,
                months,
                t.difficulty_score,
                t.recommendation.tier
            )
        }
    }
}

/// Tab-separated crisis outcome
/// Columns: event, projected_rating, drop, recovery_reviews
pub fn format_crisis_tsv(outcome: &CrisisOutcome) -> String {
    format!(
        "{}\t{:.4}\t{:.4}\t{}",
        outcome.event.slug(),
        outcome.projected_rating,
        outcome.rating_drop,
        format_reviews(outcome.recovery_reviews)
    )
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}
