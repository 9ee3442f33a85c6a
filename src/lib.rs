//! Review-rating projections: how many reviews it takes to reach a target
//! average, how long that takes, and what a burst of negative reviews costs.

pub mod config;
pub mod output;
pub mod projection;
pub mod session;
