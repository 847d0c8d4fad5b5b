//! Immutable behavior templates.
//!
//! A [`BehaviorTemplate`] is the master copy of an agent's decision graph:
//!
//! ```text
//! BehaviorTemplate
//!   └─ ActionSetTemplate   (grouping only)
//!        └─ ActionTemplate (ActionSpec + ActionBehavior prototype)
//!             └─ ConsiderationTemplate (ConsiderationSpec + input)
//! ```
//!
//! Templates are built with by-value fluent methods and are usually wrapped
//! in an `Arc` and shared between brains.  Brains never mutate them; see
//! [`RuntimeBehavior`](crate::RuntimeBehavior) for the per-agent copy.

use std::fmt;
use std::sync::Arc;

use ua_core::{Identity, ResponseCurve, UaResult};

use crate::action::{ActionBehavior, ActionSpec};
use crate::consideration::{
    Consideration, ConsiderationInstance, ConsiderationSpec, RuntimeConsideration,
};

// ── ConsiderationTemplate ─────────────────────────────────────────────────────

pub struct ConsiderationTemplate<C> {
    pub identity: Identity,
    pub spec:     ConsiderationSpec,
    input:        Arc<dyn Consideration<C>>,
}

impl<C> ConsiderationTemplate<C> {
    /// A consideration over `input` with the default `[0, 1]` linear spec.
    pub fn new<T>(name: impl Into<String>, input: T) -> Self
    where
        T: Consideration<C> + 'static,
    {
        Self::from_arc(name, Arc::new(input))
    }

    pub fn from_arc(name: impl Into<String>, input: Arc<dyn Consideration<C>>) -> Self {
        Self {
            identity: Identity::new(name),
            spec: ConsiderationSpec::default(),
            input,
        }
    }

    pub fn range(mut self, min: f32, max: f32) -> Self {
        self.spec.min_range = min;
        self.spec.max_range = max;
        self
    }

    pub fn curve(mut self, curve: ResponseCurve) -> Self {
        self.spec.curve = curve;
        self
    }

    /// Score once per candidate target.
    pub fn targeted(mut self) -> Self {
        self.spec.needs_target = true;
        self
    }

    /// Share one input instance between all agents.
    pub fn shared(mut self) -> Self {
        self.spec.shared_instance = true;
        self
    }

    pub fn with_spec(mut self, spec: ConsiderationSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn input(&self) -> &Arc<dyn Consideration<C>> {
        &self.input
    }

    /// Build the runtime copy: the shared input itself for shared
    /// considerations, a private clone otherwise.
    pub fn instantiate(&self) -> RuntimeConsideration<C> {
        let instance = if self.spec.shared_instance {
            ConsiderationInstance::Shared(Arc::clone(&self.input))
        } else {
            ConsiderationInstance::Owned(self.input.clone_boxed())
        };
        RuntimeConsideration::new(self.identity.clone(), self.spec.clone(), instance)
    }
}

impl<C> Clone for ConsiderationTemplate<C> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            spec:     self.spec.clone(),
            input:    Arc::clone(&self.input),
        }
    }
}

impl<C> fmt::Debug for ConsiderationTemplate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsiderationTemplate")
            .field("identity", &self.identity)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

// ── ActionTemplate ────────────────────────────────────────────────────────────

pub struct ActionTemplate<C> {
    pub identity:       Identity,
    pub spec:           ActionSpec,
    behavior:           Box<dyn ActionBehavior<C>>,
    pub considerations: Vec<ConsiderationTemplate<C>>,
}

impl<C> ActionTemplate<C> {
    pub fn new<B>(name: impl Into<String>, behavior: B) -> Self
    where
        B: ActionBehavior<C> + 'static,
    {
        Self::from_boxed(name, Box::new(behavior))
    }

    pub fn from_boxed(name: impl Into<String>, behavior: Box<dyn ActionBehavior<C>>) -> Self {
        Self {
            identity: Identity::new(name),
            spec: ActionSpec::default(),
            behavior,
            considerations: Vec::new(),
        }
    }

    pub fn with_consideration(mut self, consideration: ConsiderationTemplate<C>) -> Self {
        self.considerations.push(consideration);
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.spec.priority = priority;
        self
    }

    pub fn interruptable(mut self, interruptable: bool) -> Self {
        self.spec.interruptable = interruptable;
        self
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.spec.weight = weight;
        self
    }

    pub fn max_target_count(mut self, count: usize) -> Self {
        self.spec.max_target_count = count;
        self
    }

    pub fn use_momentum(mut self, on: bool) -> Self {
        self.spec.use_momentum = on;
        self
    }

    pub fn with_spec(mut self, spec: ActionSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn behavior(&self) -> &dyn ActionBehavior<C> {
        self.behavior.as_ref()
    }

    pub fn validate(&self) -> UaResult<()> {
        self.spec.validate(&self.identity.name)?;
        self.considerations
            .iter()
            .try_for_each(|c| c.spec.validate(&c.identity.name))
    }
}

impl<C> Clone for ActionTemplate<C> {
    fn clone(&self) -> Self {
        Self {
            identity:       self.identity.clone(),
            spec:           self.spec.clone(),
            behavior:       self.behavior.clone_boxed(),
            considerations: self.considerations.clone(),
        }
    }
}

impl<C> fmt::Debug for ActionTemplate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTemplate")
            .field("identity", &self.identity)
            .field("spec", &self.spec)
            .field("considerations", &self.considerations)
            .finish_non_exhaustive()
    }
}

// ── ActionSetTemplate ─────────────────────────────────────────────────────────

pub struct ActionSetTemplate<C> {
    pub identity: Identity,
    pub actions:  Vec<ActionTemplate<C>>,
}

impl<C> ActionSetTemplate<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { identity: Identity::new(name), actions: Vec::new() }
    }

    pub fn with_action(mut self, action: ActionTemplate<C>) -> Self {
        self.actions.push(action);
        self
    }
}

impl<C> Clone for ActionSetTemplate<C> {
    fn clone(&self) -> Self {
        Self { identity: self.identity.clone(), actions: self.actions.clone() }
    }
}

impl<C> fmt::Debug for ActionSetTemplate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSetTemplate")
            .field("identity", &self.identity)
            .field("actions", &self.actions)
            .finish()
    }
}

// ── BehaviorTemplate ──────────────────────────────────────────────────────────

pub struct BehaviorTemplate<C> {
    pub identity:    Identity,
    pub action_sets: Vec<ActionSetTemplate<C>>,
}

impl<C> BehaviorTemplate<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { identity: Identity::new(name), action_sets: Vec::new() }
    }

    pub fn with_action_set(mut self, set: ActionSetTemplate<C>) -> Self {
        self.action_sets.push(set);
        self
    }

    pub fn action_count(&self) -> usize {
        self.action_sets.iter().map(|s| s.actions.len()).sum()
    }

    /// Check every action and consideration spec without building anything.
    pub fn validate(&self) -> UaResult<()> {
        self.action_sets
            .iter()
            .flat_map(|s| &s.actions)
            .try_for_each(ActionTemplate::validate)
    }
}

impl<C> Clone for BehaviorTemplate<C> {
    fn clone(&self) -> Self {
        Self { identity: self.identity.clone(), action_sets: self.action_sets.clone() }
    }
}

impl<C> fmt::Debug for BehaviorTemplate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorTemplate")
            .field("identity", &self.identity)
            .field("action_sets", &self.action_sets)
            .finish()
    }
}
