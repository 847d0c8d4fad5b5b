//! Fluent builder for constructing a [`Brain`].

use std::sync::Arc;

use ua_behavior::{AgentContext, BehaviorTemplate, RuntimeBehavior};

use crate::{Brain, BrainConfig, BrainResult, SelectionAlgorithm};

/// Fluent builder for [`Brain<C>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                               | Default                   |
/// |--------------------------------------|---------------------------|
/// | `.config(c)`                         | `BrainConfig::default()`  |
/// | `.think_interval(s)`                 | `2.0`                     |
/// | `.target_refresh_interval(s)`        | `5.0`                     |
/// | `.selection(a)`                      | `HighestScore`            |
/// | `.interruption_delta_threshold(d)`   | `0.0`                     |
/// | `.fixed_timestep(s)`                 | `0.02`                    |
/// | `.max_fixed_steps(n)`                | `16`                      |
/// | `.trace(on)`                         | `false`                   |
///
/// # Example
///
/// ```rust,ignore
/// let template = Arc::new(load_template_csv(path, "soldier", &registry)?);
/// let mut brain = BrainBuilder::new(Arc::clone(&template))
///     .think_interval(0.5)
///     .selection(SelectionAlgorithm::HighestScoreWithPriority)
///     .build(&world)?;
/// brain.tick(dt, &mut world, &mut NoopObserver)?;
/// ```
pub struct BrainBuilder<C> {
    template: Arc<BehaviorTemplate<C>>,
    config:   BrainConfig,
}

impl<C: AgentContext> BrainBuilder<C> {
    pub fn new(template: Arc<BehaviorTemplate<C>>) -> Self {
        Self { template, config: BrainConfig::default() }
    }

    pub fn config(mut self, config: BrainConfig) -> Self {
        self.config = config;
        self
    }

    pub fn think_interval(mut self, secs: f32) -> Self {
        self.config.think_interval = secs;
        self
    }

    pub fn target_refresh_interval(mut self, secs: f32) -> Self {
        self.config.target_refresh_interval = secs;
        self
    }

    pub fn selection(mut self, algorithm: SelectionAlgorithm) -> Self {
        self.config.selection = algorithm;
        self
    }

    pub fn interruption_delta_threshold(mut self, delta: f32) -> Self {
        self.config.interruption_delta_threshold = delta;
        self
    }

    pub fn fixed_timestep(mut self, secs: f32) -> Self {
        self.config.fixed_timestep = secs;
        self
    }

    pub fn max_fixed_steps(mut self, n: u32) -> Self {
        self.config.max_fixed_steps = n;
        self
    }

    pub fn trace(mut self, on: bool) -> Self {
        self.config.trace = on;
        self
    }

    /// Validate the configuration, clone and initialize the template, and
    /// fill every target list.  No think pass runs until the first tick.
    pub fn build(self, ctx: &C) -> BrainResult<Brain<C>> {
        self.config.validate()?;
        let mut runtime = RuntimeBehavior::from_template(&self.template, ctx)?;
        runtime.refresh_targets(ctx);
        Ok(Brain::assemble(self.template, self.config, runtime))
    }
}
