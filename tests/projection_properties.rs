use proptest::prelude::*;

use reputex::projection::{
    build_plan, calculate_difficulty_score, get_age_factor, predict_time,
    simulate_negative_impact, solve_for_additional_reviews, PlanInputs, Projection, StarMix,
};

const EPS: f64 = 1e-9;

fn average_after(total: u64, rating: f64, added: u64, star_value: f64) -> f64 {
    (total as f64 * rating + added as f64 * star_value) / (total + added) as f64
}

/// Ratings in tenths, as entered on the dashboard (1.0, 1.1, ... 5.0).
fn rating() -> impl Strategy<Value = f64> {
    (10u32..=50).prop_map(|tenths| tenths as f64 / 10.0)
}

proptest! {
    #[test]
    fn solve_reaches_target_minimally(
        total in 1u64..=1_000_000,
        current in rating(),
        target in rating(),
    ) {
        prop_assume!(target < 5.0);
        let x = solve_for_additional_reviews(total, current, target, 5.0)
            .value()
            .expect("target below star value is reachable");

        prop_assert!(average_after(total, current, x, 5.0) >= target - EPS);
        if x > 0 {
            prop_assert!(average_after(total, current, x - 1, 5.0) < target);
        }
    }

    #[test]
    fn solve_with_mix_reaches_target_minimally(
        total in 1u64..=100_000,
        current in rating(),
        target in rating(),
        five in 0u8..=100,
        four_share in 0u8..=100,
    ) {
        let four = four_share.min(100 - five);
        let star_value = StarMix::from_percentages(five, four).unwrap().weighted_star_value();
        // Mixes whose value equals the target only differ from it by float noise.
        prop_assume!((star_value - target).abs() > 1e-9);

        match solve_for_additional_reviews(total, current, target, star_value) {
            Projection::Impossible => prop_assert!(target > star_value),
            Projection::Reachable(x) => {
                prop_assert!(target < star_value);
                prop_assert!(average_after(total, current, x, star_value) >= target - EPS);
                if x > 0 {
                    prop_assert!(average_after(total, current, x - 1, star_value) < target);
                }
            }
        }
    }

    #[test]
    fn solve_is_zero_when_already_there(
        total in 1u64..5000,
        current in rating(),
        target in rating(),
    ) {
        prop_assume!(current >= target && target < 5.0);
        prop_assert_eq!(
            solve_for_additional_reviews(total, current, target, 5.0),
            Projection::Reachable(0)
        );
    }

    #[test]
    fn target_at_or_above_star_value_is_impossible(
        total in 0u64..5000,
        current in rating(),
        star_value in rating(),
        bump in 0u32..10,
    ) {
        let target = star_value + bump as f64 / 10.0;
        prop_assert!(solve_for_additional_reviews(total, current, target, star_value).is_impossible());
    }

    #[test]
    fn target_just_below_star_value_never_saturates(
        total in 1u64..=u64::MAX / 2,
        current in rating(),
        ulps_below in 1u64..8,
    ) {
        let target = f64::from_bits(5.0f64.to_bits() - ulps_below);
        prop_assume!(current < target);

        let plan = build_plan(&PlanInputs {
            total_reviews: total,
            current_rating: current,
            target_rating: target,
            star_value: 5.0,
            velocity: 13.3,
            growth_factor: None,
            age_months: 24,
        });
        if let Projection::Reachable(x) = plan.required_reviews {
            prop_assert!(x < u64::MAX);
            prop_assert!(plan.timeline.unwrap().new_total_reviews >= total);
        }
    }

    #[test]
    fn age_factor_is_monotonic(a in 1u32..600, b in 1u32..600) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(get_age_factor(lo) <= get_age_factor(hi));
    }

    #[test]
    fn difficulty_never_below_required(required in 0u64..100_000, age in 1u32..600) {
        prop_assert!(calculate_difficulty_score(required, age) >= required as f64);
    }

    #[test]
    fn non_positive_velocity_is_impossible(required in 0u64..100_000, velocity in -100.0f64..=0.0) {
        prop_assert!(predict_time(required, velocity).is_impossible());
    }

    #[test]
    fn negative_burst_never_raises_rating(
        total in 1u64..5000,
        current in rating(),
        influx in 0u64..1000,
    ) {
        let projected = simulate_negative_impact(total, current, influx, 1.0).unwrap();
        prop_assert!(projected <= current + EPS);
        prop_assert!(projected >= 1.0 - EPS);
    }
}

#[test]
fn age_factor_breakpoints() {
    for (age, factor) in [(12, 1.0), (13, 1.2), (36, 1.2), (37, 1.5), (60, 1.5), (61, 2.0)] {
        assert_eq!(get_age_factor(age), factor, "age {}", age);
    }
}
