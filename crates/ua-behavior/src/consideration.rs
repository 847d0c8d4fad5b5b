//! Considerations: normalized scoring inputs of an action.
//!
//! A consideration has two halves:
//!
//! - the **input**: a user type implementing [`Consideration`] that reads a
//!   raw domain value out of the context (health, distance to a target);
//! - the **spec**: [`ConsiderationSpec`], the range and response curve that
//!   turn the raw value into a utility score.
//!
//! [`RuntimeConsideration`] pairs the two inside a brain's runtime arena and
//! remembers the last score it produced.

use std::fmt;
use std::sync::Arc;

use ua_core::{Identity, ResponseCurve, TargetId, UaError, UaResult};

use crate::HasBlackboard;
use crate::scoring::normalize;

// ── Consideration trait ───────────────────────────────────────────────────────

/// Source of a raw input value.
///
/// `target` is `None` for self considerations and the candidate being scored
/// for targeted ones (see [`ConsiderationSpec::needs_target`]).
pub trait Consideration<C>: ConsiderationClone<C> + Send + Sync {
    /// The raw, un-normalized input value.
    fn value(&self, ctx: &C, target: Option<TargetId>) -> f32;

    /// Called once when the owning brain initializes its runtime copy.
    ///
    /// Not called for shared instances; see [`on_shared_initialized`].
    ///
    /// [`on_shared_initialized`]: Self::on_shared_initialized
    fn on_initialized(&mut self, _ctx: &C) {}

    /// Called on a shared instance once for every runtime slot that uses it,
    /// so a shared input sees each agent that reads it.
    fn on_shared_initialized(&self, _ctx: &C) {}
}

/// Object-safe cloning for boxed considerations.  Blanket-implemented for
/// every `Clone` consideration.
pub trait ConsiderationClone<C> {
    fn clone_boxed(&self) -> Box<dyn Consideration<C>>;
}

impl<C, T> ConsiderationClone<C> for T
where
    T: Consideration<C> + Clone + 'static,
{
    fn clone_boxed(&self) -> Box<dyn Consideration<C>> {
        Box::new(self.clone())
    }
}

// ── ConsiderationSpec ─────────────────────────────────────────────────────────

/// Static configuration of one consideration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsiderationSpec {
    /// Raw value mapped to 0.
    pub min_range:       f32,
    /// Raw value mapped to 1.  Must be greater than `min_range`.
    pub max_range:       f32,
    pub curve:           ResponseCurve,
    /// Scored once per candidate target instead of once per action.
    pub needs_target:    bool,
    /// One input instance serves every agent instead of a per-agent clone.
    pub shared_instance: bool,
}

impl Default for ConsiderationSpec {
    fn default() -> Self {
        Self {
            min_range:       0.0,
            max_range:       1.0,
            curve:           ResponseCurve::Linear,
            needs_target:    false,
            shared_instance: false,
        }
    }
}

impl ConsiderationSpec {
    /// Fail with [`UaError::InvalidRange`] unless `min_range < max_range`.
    pub fn validate(&self, name: &str) -> UaResult<()> {
        check_range(name, self.min_range, self.max_range)
    }
}

fn check_range(name: &str, min: f32, max: f32) -> UaResult<()> {
    if min.is_nan() || max.is_nan() || min >= max {
        return Err(UaError::InvalidRange { name: name.to_owned(), min, max });
    }
    Ok(())
}

// ── Runtime instance ──────────────────────────────────────────────────────────

/// The input half of a runtime consideration.
pub enum ConsiderationInstance<C> {
    /// Shared with the template (and every other agent).
    Shared(Arc<dyn Consideration<C>>),
    /// Private to one brain.
    Owned(Box<dyn Consideration<C>>),
}

impl<C> ConsiderationInstance<C> {
    pub fn value(&self, ctx: &C, target: Option<TargetId>) -> f32 {
        match self {
            ConsiderationInstance::Shared(c) => c.value(ctx, target),
            ConsiderationInstance::Owned(c) => c.value(ctx, target),
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, ConsiderationInstance::Shared(_))
    }
}

impl<C> Clone for ConsiderationInstance<C> {
    fn clone(&self) -> Self {
        match self {
            ConsiderationInstance::Shared(c) => ConsiderationInstance::Shared(Arc::clone(c)),
            ConsiderationInstance::Owned(c) => ConsiderationInstance::Owned(c.clone_boxed()),
        }
    }
}

/// A consideration inside a brain's runtime arena.
pub struct RuntimeConsideration<C> {
    pub identity: Identity,
    spec:         ConsiderationSpec,
    instance:     ConsiderationInstance<C>,
    last_score:   f32,
    initialized:  bool,
}

impl<C> RuntimeConsideration<C> {
    pub fn new(identity: Identity, spec: ConsiderationSpec, instance: ConsiderationInstance<C>) -> Self {
        Self {
            identity,
            spec,
            instance,
            last_score: 0.0,
            initialized: false,
        }
    }

    /// Validate the range and run the input's initialization hook.
    ///
    /// Idempotent; the hook runs at most once per runtime slot.
    pub fn initialize(&mut self, ctx: &C) -> UaResult<()> {
        if self.initialized {
            return Ok(());
        }
        self.spec.validate(&self.identity.name)?;
        match &mut self.instance {
            ConsiderationInstance::Owned(c) => c.on_initialized(ctx),
            ConsiderationInstance::Shared(c) => c.on_shared_initialized(ctx),
        }
        self.initialized = true;
        Ok(())
    }

    /// Normalize the raw input into `[0, 1]`, shape it through the curve,
    /// and remember the result.
    pub fn score(&mut self, ctx: &C, target: Option<TargetId>) -> f32 {
        let raw = self.instance.value(ctx, target);
        let s = self.score_raw(raw);
        self.last_score = s;
        s
    }

    /// Score a raw value without touching `last_score`.
    pub fn score_raw(&self, raw: f32) -> f32 {
        let x = normalize(raw, self.spec.min_range, self.spec.max_range);
        self.spec.curve.evaluate(x)
    }

    /// Replace the input range.  Fails without changing anything when
    /// `min >= max`.
    pub fn update_range(&mut self, min: f32, max: f32) -> UaResult<()> {
        check_range(&self.identity.name, min, max)?;
        self.spec.min_range = min;
        self.spec.max_range = max;
        Ok(())
    }

    /// Score produced by the most recent [`score`](Self::score) call.
    /// Telemetry only.
    pub fn last_score(&self) -> f32 {
        self.last_score
    }

    pub(crate) fn set_last_score(&mut self, s: f32) {
        self.last_score = s;
    }

    pub fn needs_target(&self) -> bool {
        self.spec.needs_target
    }

    pub fn spec(&self) -> &ConsiderationSpec {
        &self.spec
    }

    pub fn is_shared(&self) -> bool {
        self.instance.is_shared()
    }
}

impl<C> fmt::Debug for RuntimeConsideration<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConsideration")
            .field("name", &self.identity.name)
            .field("spec", &self.spec)
            .field("shared", &self.is_shared())
            .field("last_score", &self.last_score)
            .finish()
    }
}

// ── Built-in inputs ───────────────────────────────────────────────────────────

/// An input backed by a closure.
pub struct FnConsideration<C> {
    f: Arc<dyn Fn(&C, Option<TargetId>) -> f32 + Send + Sync>,
}

impl<C> FnConsideration<C> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&C, Option<TargetId>) -> f32 + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }
}

impl<C> Clone for FnConsideration<C> {
    fn clone(&self) -> Self {
        Self { f: Arc::clone(&self.f) }
    }
}

impl<C: 'static> Consideration<C> for FnConsideration<C> {
    fn value(&self, ctx: &C, target: Option<TargetId>) -> f32 {
        (self.f)(ctx, target)
    }
}

/// An input that always yields the same raw value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantConsideration(pub f32);

impl<C> Consideration<C> for ConstantConsideration {
    fn value(&self, _ctx: &C, _target: Option<TargetId>) -> f32 {
        self.0
    }
}

/// Reads a numeric blackboard key.
///
/// Int keys are widened to `f32`, bool keys read as 0/1.  A missing key or a
/// key of another type reads as 0.
#[derive(Clone, Debug, PartialEq)]
pub struct BlackboardConsideration {
    pub key: String,
}

impl BlackboardConsideration {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl<C: HasBlackboard> Consideration<C> for BlackboardConsideration {
    fn value(&self, ctx: &C, _target: Option<TargetId>) -> f32 {
        ctx.blackboard().get(&self.key).map(|v| v.as_f32()).unwrap_or(0.0)
    }
}
