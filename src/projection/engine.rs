use serde::Serialize;
use std::collections::BTreeMap;

use super::error::ProjectionError;
use super::mix::StarDistribution;

/// Assumed rating of each newly acquired review when no star mix is given.
pub const DEFAULT_STAR_VALUE: f64 = 5.0;

const SNAP_TOLERANCE: f64 = 1e-10;

/// Default industry split used by `get_approximate_distribution`, highest star first.
const INDUSTRY_DISTRIBUTION: [(u8, f64); 5] = [
    (5, 0.70),
    (4, 0.15),
    (3, 0.07),
    (2, 0.04),
    (1, 0.04),
];

/// Outcome of a projection that may have no finite answer.
///
/// `Impossible` covers targets at or above the assumed star value, answers
/// too large for a `u64` and non-positive review velocities. It deliberately carries no number so it
/// can't leak into downstream arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Projection<T> {
    Reachable(T),
    Impossible,
}

impl<T> Projection<T> {
    pub fn is_impossible(&self) -> bool {
        matches!(self, Projection::Impossible)
    }

    /// The finite result, if there is one.
    pub fn value(self) -> Option<T> {
        match self {
            Projection::Reachable(v) => Some(v),
            Projection::Impossible => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Projection<U> {
        match self {
            Projection::Reachable(v) => Projection::Reachable(f(v)),
            Projection::Impossible => Projection::Impossible,
        }
    }

    pub fn and_then<U, F: FnOnce(T) -> Projection<U>>(self, f: F) -> Projection<U> {
        match self {
            Projection::Reachable(v) => f(v),
            Projection::Impossible => Projection::Impossible,
        }
    }
}

/// Sum of every star ever given: T x R.
pub fn calculate_total_points(total_reviews: u64, average_rating: f64) -> f64 {
    total_reviews as f64 * average_rating
}

/// Approximate star counts for `total_reviews` under the default industry split.
///
/// Counts are rounded half-to-even, so they may not add back up to the total.
pub fn get_approximate_distribution(total_reviews: u64) -> BTreeMap<u8, u64> {
    INDUSTRY_DISTRIBUTION
        .iter()
        .map(|&(star, share)| {
            let count = (total_reviews as f64 * share).round_ties_even();
            (star, count as u64)
        })
        .collect()
}

/// Minimum number of additional reviews, each rated `star_value`, that lifts
/// an average of `current_rating` over `total_reviews` to at least `target_rating`.
///
/// Solves (T*R + x*S) / (T + x) >= D for x, i.e. x >= T(D - R) / (S - D).
pub fn solve_for_additional_reviews(
    total_reviews: u64,
    current_rating: f64,
    target_rating: f64,
    star_value: f64,
) -> Projection<u64> {
    if target_rating >= star_value {
        return Projection::Impossible;
    }

    let x = total_reviews as f64 * (target_rating - current_rating) / (star_value - target_rating);
    let x = snap_to_integer(x).ceil().max(0.0);
    // Targets a hair below the star value need more reviews than a u64 holds.
    if x >= u64::MAX as f64 {
        return Projection::Impossible;
    }
    Projection::Reachable(x as u64)
}

/// Strip float noise (e.g. 1600.0000000001 or 116000.00000000003) before
/// taking the ceiling. The tolerance scales with the magnitude of `x`.
fn snap_to_integer(x: f64) -> f64 {
    let nearest = x.round();
    if (x - nearest).abs() <= SNAP_TOLERANCE * x.abs().max(1.0) {
        nearest
    } else {
        x
    }
}

/// Months needed to collect `required_reviews` at `velocity` reviews per month.
pub fn predict_time(required_reviews: u64, velocity: f64) -> Projection<f64> {
    if velocity <= 0.0 {
        return Projection::Impossible;
    }
    Projection::Reachable(required_reviews as f64 / velocity)
}

pub fn calculate_adjusted_velocity(base_velocity: f64, growth_factor: f64) -> f64 {
    base_velocity * growth_factor
}

/// New average after `new_count` reviews rated `new_rating` join the existing pool.
pub fn simulate_negative_impact(
    total_reviews: u64,
    current_rating: f64,
    new_count: u64,
    new_rating: f64,
) -> Result<f64, ProjectionError> {
    if total_reviews == 0 && new_count == 0 {
        return Err(ProjectionError::EmptyReviewPool {
            total_reviews,
            new_count,
        });
    }

    let total_points = calculate_total_points(total_reviews, current_rating);
    let added_points = new_count as f64 * new_rating;
    // Summed as f64 so huge pools can't overflow.
    let new_total = total_reviews as f64 + new_count as f64;
    Ok((total_points + added_points) / new_total)
}

/// Expected rating per review under a star mix: sum of star x probability.
///
/// Probabilities are taken as given; no normalization happens here.
pub fn calculate_weighted_star_value(distribution: &StarDistribution) -> f64 {
    distribution
        .iter()
        .map(|(star, probability)| star as f64 * probability)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64, rel_tol: f64) -> bool {
        (actual - expected).abs() <= rel_tol * expected.abs().max(actual.abs())
    }

    #[test]
    fn test_total_points() {
        assert_eq!(calculate_total_points(320, 4.4), 1408.0);
        assert_eq!(calculate_total_points(0, 4.4), 0.0);
    }

    #[test]
    fn test_approximate_distribution() {
        let dist = get_approximate_distribution(320);
        assert_eq!(dist[&5], 224);
        assert_eq!(dist[&4], 48);
        assert_eq!(dist[&3], 22); // 22.4
        assert_eq!(dist[&2], 13); // 12.8
        assert_eq!(dist[&1], 13);
    }

    #[test]
    fn test_approximate_distribution_rounds_half_to_even() {
        // 30 * 0.15 = 4.5 -> 4
        let dist = get_approximate_distribution(30);
        assert_eq!(dist[&5], 21);
        assert_eq!(dist[&4], 4);
        assert_eq!(dist[&3], 2);
        assert_eq!(dist[&1], 1);
    }

    #[test]
    fn test_approximate_distribution_empty() {
        let dist = get_approximate_distribution(0);
        assert_eq!(dist.len(), 5);
        assert!(dist.values().all(|&c| c == 0));
    }

    #[test]
    fn test_solve_five_star() {
        let x = solve_for_additional_reviews(320, 4.4, 4.9, DEFAULT_STAR_VALUE);
        assert_eq!(x, Projection::Reachable(1600));
    }

    #[test]
    fn test_solve_already_at_target() {
        assert_eq!(
            solve_for_additional_reviews(320, 4.8, 4.5, 5.0),
            Projection::Reachable(0)
        );
        assert_eq!(
            solve_for_additional_reviews(320, 4.5, 4.5, 5.0),
            Projection::Reachable(0)
        );
    }

    #[test]
    fn test_solve_target_at_star_value_is_impossible() {
        assert!(solve_for_additional_reviews(320, 4.4, 5.0, 5.0).is_impossible());
        assert!(solve_for_additional_reviews(320, 4.4, 4.9, 4.75).is_impossible());
    }

    #[test]
    fn test_solve_rounds_up() {
        // 320 * 0.2 / 0.15 = 426.67
        assert_eq!(
            solve_for_additional_reviews(320, 4.4, 4.6, 4.75),
            Projection::Reachable(427)
        );
    }

    #[test]
    fn test_solve_large_pools_stay_minimal() {
        // Exact answers; float noise must not add an extra review.
        assert_eq!(
            solve_for_additional_reviews(32_000, 1.3, 4.2, 5.0),
            Projection::Reachable(116_000)
        );
        assert_eq!(
            solve_for_additional_reviews(100_000, 3.3, 4.5, 5.0),
            Projection::Reachable(240_000)
        );
        assert_eq!(
            solve_for_additional_reviews(320_000, 2.3, 3.5, 5.0),
            Projection::Reachable(256_000)
        );
    }

    #[test]
    fn test_solve_near_star_value_does_not_saturate() {
        let x = solve_for_additional_reviews(10_000, 1.0, 4.999999999999999, 5.0);
        assert!(x.is_impossible());
    }

    #[test]
    fn test_solve_huge_but_representable() {
        // 2^63 * 0.5 / 0.5
        assert_eq!(
            solve_for_additional_reviews(1 << 63, 4.0, 4.5, 5.0),
            Projection::Reachable(1 << 63)
        );
    }

    #[test]
    fn test_predict_time() {
        let months = predict_time(1600, 320.0 / 24.0).value().unwrap();
        assert!(close(months, 120.0, 1e-5));
    }

    #[test]
    fn test_predict_time_zero_velocity() {
        assert!(predict_time(1600, 0.0).is_impossible());
        assert!(predict_time(1600, -3.0).is_impossible());
    }

    #[test]
    fn test_predict_time_nothing_required() {
        assert_eq!(predict_time(0, 13.3), Projection::Reachable(0.0));
    }

    #[test]
    fn test_adjusted_velocity() {
        let v = calculate_adjusted_velocity(13.3, 20.0 / 13.0);
        assert!(close(v, 20.4615, 1e-3));
    }

    #[test]
    fn test_negative_impact() {
        let rating = simulate_negative_impact(320, 4.4, 10, 1.0).unwrap();
        assert!(close(rating, 4.2969, 1e-4));
    }

    #[test]
    fn test_negative_impact_no_new_reviews() {
        let rating = simulate_negative_impact(320, 4.4, 0, 1.0).unwrap();
        assert!(close(rating, 4.4, 1e-12));
    }

    #[test]
    fn test_negative_impact_huge_pool() {
        let rating = simulate_negative_impact(u64::MAX, 4.0, u64::MAX, 4.0).unwrap();
        assert!(close(rating, 4.0, 1e-12));
    }

    #[test]
    fn test_negative_impact_empty_pool() {
        let err = simulate_negative_impact(0, 4.4, 0, 1.0).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::EmptyReviewPool {
                total_reviews: 0,
                new_count: 0
            }
        );
    }

    #[test]
    fn test_weighted_star_value_and_solve() {
        let dist = StarDistribution::from_pairs([(5, 0.8), (4, 0.15), (3, 0.05)]).unwrap();
        let wsv = calculate_weighted_star_value(&dist);
        assert_eq!(wsv, 4.75);

        assert!(solve_for_additional_reviews(320, 4.4, 4.9, wsv).is_impossible());
        assert_eq!(
            solve_for_additional_reviews(320, 4.4, 4.6, wsv),
            Projection::Reachable(427)
        );
    }

    #[test]
    fn test_weighted_star_value_is_not_normalized() {
        let dist = StarDistribution::from_pairs([(5, 0.5)]).unwrap();
        assert_eq!(calculate_weighted_star_value(&dist), 2.5);
    }

    #[test]
    fn test_projection_map_and_value() {
        let p = Projection::Reachable(10u64).map(|x| x * 2);
        assert_eq!(p.value(), Some(20));
        let none: Projection<u64> = Projection::Impossible;
        assert_eq!(none.map(|x| x * 2).value(), None);
        assert!(Projection::Reachable(5u64)
            .and_then(|x| predict_time(x, 0.0))
            .is_impossible());
    }

    #[test]
    fn test_projection_serializes_tagged() {
        let json = serde_json::to_string(&Projection::Reachable(1600u64)).unwrap();
        assert_eq!(json, r#"{"status":"reachable","value":1600}"#);
        let json = serde_json::to_string(&Projection::<u64>::Impossible).unwrap();
        assert_eq!(json, r#"{"status":"impossible"}"#);
    }
}
