use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::projection::{CrisisEvent, CrisisOutcome, TargetPlan};

/// Identity of a simulation within a session. Re-running the same simulation
/// overwrites its previous result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationKey {
    Crisis(CrisisEvent),
    Target,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationOutput {
    Crisis(CrisisOutcome),
    Target(TargetPlan),
}

impl SimulationOutput {
    /// The key this output is stored under.
    pub fn key(&self) -> SimulationKey {
        match self {
            SimulationOutput::Crisis(outcome) => SimulationKey::Crisis(outcome.event),
            SimulationOutput::Target(_) => SimulationKey::Target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRecord {
    pub output: SimulationOutput,
    pub ran_at: DateTime<Utc>,
}

/// Most recent simulation results for one interactive session.
///
/// Owned by the caller and passed to whatever needs it; nothing outlives the
/// session and nothing is written to disk.
#[derive(Debug, Clone, Default)]
pub struct SimulationSession {
    records: HashMap<SimulationKey, SimulationRecord>,
}

impl SimulationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an output, replacing any earlier result for the same key.
    /// Returns the key it was stored under.
    pub fn record(&mut self, output: SimulationOutput) -> SimulationKey {
        let key = output.key();
        self.records.insert(
            key,
            SimulationRecord {
                output,
                ran_at: Utc::now(),
            },
        );
        key
    }

    pub fn latest(&self, key: &SimulationKey) -> Option<&SimulationRecord> {
        self.records.get(key)
    }

    pub fn has_run(&self, key: &SimulationKey) -> bool {
        self.records.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
