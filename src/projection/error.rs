use thiserror::Error;

/// Domain errors raised by the projection engine and its workflows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("review pool is empty: {total_reviews} existing + {new_count} new reviews")]
    EmptyReviewPool { total_reviews: u64, new_count: u64 },

    #[error("invalid star mix: {five_star}% 5-star + {four_star}% 4-star exceeds 100%")]
    InvalidMix { five_star: u8, four_star: u8 },

    #[error("invalid star distribution: {0}")]
    InvalidDistribution(String),
}
