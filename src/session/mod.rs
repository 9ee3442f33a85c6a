pub mod types;

pub use types::{SimulationKey, SimulationOutput, SimulationRecord, SimulationSession};
