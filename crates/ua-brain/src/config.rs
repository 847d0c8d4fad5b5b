//! Brain configuration.

use crate::{BrainError, BrainResult, SelectionAlgorithm};

/// Tuning of one brain's cadences and selection rules.
///
/// | Field                          | Default        |
/// |--------------------------------|----------------|
/// | `think_interval`               | `2.0` s        |
/// | `target_refresh_interval`      | `5.0` s        |
/// | `selection`                    | `HighestScore` |
/// | `interruption_delta_threshold` | `0.0`          |
/// | `top_n`                        | `5`            |
/// | `fixed_timestep`               | `0.02` s       |
/// | `max_fixed_steps`              | `16`           |
/// | `trace`                        | `false`        |
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BrainConfig {
    /// Seconds between think passes while an action is running.  An idle
    /// brain thinks every tick regardless.
    pub think_interval: f32,

    /// Seconds between target-list refreshes.
    pub target_refresh_interval: f32,

    pub selection: SelectionAlgorithm,

    /// Under `HighestScoreWithPriority`, how much an equal-priority action
    /// must outscore the current one to replace it.
    pub interruption_delta_threshold: f32,

    /// Pool size of the top-N selection algorithms.
    pub top_n: usize,

    /// Step of the fixed-update pass, in seconds.
    pub fixed_timestep: f32,

    /// Most fixed steps run in one tick.  A larger backlog is dropped.
    pub max_fixed_steps: u32,

    /// Record a full `ScoreTrace` on every think pass.  Disables the
    /// zero-score short-circuit.
    pub trace: bool,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            think_interval:               2.0,
            target_refresh_interval:      5.0,
            selection:                    SelectionAlgorithm::HighestScore,
            interruption_delta_threshold: 0.0,
            top_n:                        5,
            fixed_timestep:               0.02,
            max_fixed_steps:              16,
            trace:                        false,
        }
    }
}

impl BrainConfig {
    pub fn validate(&self) -> BrainResult<()> {
        non_negative("think_interval", self.think_interval)?;
        non_negative("target_refresh_interval", self.target_refresh_interval)?;
        non_negative("interruption_delta_threshold", self.interruption_delta_threshold)?;
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(BrainError::Config(format!(
                "fixed_timestep must be positive, got {}",
                self.fixed_timestep
            )));
        }
        if self.max_fixed_steps == 0 {
            return Err(BrainError::Config("max_fixed_steps must be at least 1".into()));
        }
        if self.top_n == 0 {
            return Err(BrainError::Config("top_n must be at least 1".into()));
        }
        self.selection.ensure_supported(self.top_n)
    }
}

fn non_negative(name: &str, v: f32) -> BrainResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(BrainError::Config(format!("{name} must be a non-negative number, got {v}")))
    }
}
