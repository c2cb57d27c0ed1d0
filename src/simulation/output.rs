//! Run output and serialization

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::config::SimulationConfig;
use crate::simulation::stats::{Census, RoundStats};

/// Complete record of a headless run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub config: SimulationConfig,
    pub side: usize,
    pub initial: Census,
    pub final_census: Census,
    /// One entry per measurement, starting with the state before round 1
    pub history: Vec<RoundStats>,
    pub rounds_run: u64,
    /// Whether the run ended because the grid stopped changing
    pub stabilized: bool,
    pub simulation_time_ms: u64,
}

impl SimulationOutput {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: SimulationConfig,
        side: usize,
        initial: Census,
        final_census: Census,
        history: Vec<RoundStats>,
        rounds_run: u64,
        stabilized: bool,
        elapsed: Duration,
    ) -> Self {
        Self {
            config,
            side,
            initial,
            final_census,
            history,
            rounds_run,
            stabilized,
            simulation_time_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn to_json(&self) -> crate::core::error::Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn summary(&self) -> String {
        let last = self.history.last();
        let satisfied = last.map_or(1.0, RoundStats::satisfied_fraction);
        let segregation = last
            .and_then(|s| s.segregation)
            .map_or_else(|| "n/a".to_string(), |s| format!("{:.3}", s));

        format!(
            "Ran {} rounds on a {}x{} grid in {}ms{}\n{} A, {} B, {} vacant | {:.1}% satisfied | segregation {}",
            self.rounds_run,
            self.side,
            self.side,
            self.simulation_time_ms,
            if self.stabilized { " (stable)" } else { "" },
            self.final_census.type_a,
            self.final_census.type_b,
            self.final_census.empty,
            satisfied * 100.0,
            segregation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimulationOutput {
        let census = Census {
            type_a: 4,
            type_b: 4,
            empty: 1,
        };
        let history = vec![RoundStats {
            round: 2,
            satisfied: 6,
            unsatisfied: 2,
            moved: 1,
            segregation: Some(0.75),
        }];
        SimulationOutput::new(
            SimulationConfig::default(),
            3,
            census,
            census,
            history,
            2,
            false,
            Duration::from_millis(12),
        )
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert!(summary.contains("Ran 2 rounds on a 3x3 grid in 12ms"));
        assert!(summary.contains("75.0% satisfied"));
        assert!(summary.contains("segregation 0.750"));
        assert!(!summary.contains("stable"));
    }

    #[test]
    fn test_json_roundtrip() {
        let output = sample();
        let json = output.to_json().unwrap();
        let parsed: SimulationOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.final_census, output.final_census);
        assert_eq!(parsed.history, output.history);
    }
}
