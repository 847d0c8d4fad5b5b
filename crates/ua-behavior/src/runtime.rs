//! Per-agent runtime copy of a behavior template.
//!
//! # Layout
//!
//! ```text
//! RuntimeBehavior
//!   sets:    [ RuntimeActionSet { id, identity, actions: [ActionId, …] }, … ]
//!   actions: [ Some(RuntimeAction), Some(RuntimeAction), None, … ]   ← arena
//! ```
//!
//! Actions live in a flat arena indexed by [`ActionId`].  Removing a set
//! tombstones its slots (`None`) instead of compacting, so ids handed out
//! earlier never alias a newer action.  Declaration order is set order, then
//! action order within a set; slots are allocated in that order too.

use std::fmt;

use tracing::warn;

use ua_core::{ActionId, ActionSetId, Guid, Identity, TargetId, UaResult};

use crate::action::{ActionBehavior, ActionControl, ActionOutcome, ActionSpec};
use crate::consideration::RuntimeConsideration;
use crate::targets::TargetList;
use crate::template::{ActionSetTemplate, ActionTemplate, BehaviorTemplate};

// ── RuntimeAction ─────────────────────────────────────────────────────────────

/// One action inside a brain, with its own considerations and targets.
pub struct RuntimeAction<C> {
    pub id:                    ActionId,
    pub set:                   ActionSetId,
    pub identity:              Identity,
    pub(crate) spec:           ActionSpec,
    behavior:                  Box<dyn ActionBehavior<C>>,
    pub(crate) considerations: Vec<RuntimeConsideration<C>>,
    /// Indices into `considerations`; fixed by `initialize`.
    pub(crate) self_idx:       Vec<usize>,
    pub(crate) targeted_idx:   Vec<usize>,
    pub(crate) targets:        TargetList,
    pub(crate) chosen_target:  Option<TargetId>,
    pub(crate) score:          f32,
    initialized:               bool,
}

impl<C> RuntimeAction<C> {
    pub fn from_template(id: ActionId, set: ActionSetId, template: &ActionTemplate<C>) -> Self {
        Self {
            id,
            set,
            identity:       template.identity.clone(),
            spec:           template.spec.clone(),
            behavior:       template.behavior().clone_boxed(),
            considerations: template.considerations.iter().map(|c| c.instantiate()).collect(),
            self_idx:       Vec::new(),
            targeted_idx:   Vec::new(),
            targets:        TargetList::with_limit(template.spec.max_target_count),
            chosen_target:  None,
            score:          0.0,
            initialized:    false,
        }
    }

    /// Validate the configuration, split considerations into self and
    /// targeted, and run the `on_initialized` hooks.  Runs once.
    pub fn initialize(&mut self, ctx: &C) -> UaResult<()> {
        if self.initialized {
            return Ok(());
        }
        self.spec.validate(&self.identity.name)?;
        for c in &mut self.considerations {
            c.initialize(ctx)?;
        }
        let (targeted, own): (Vec<usize>, Vec<usize>) =
            (0..self.considerations.len()).partition(|&i| self.considerations[i].needs_target());
        self.targeted_idx = targeted;
        self.self_idx = own;
        self.behavior.on_initialized(ctx);
        self.initialized = true;
        Ok(())
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    pub fn refresh_targets(&mut self, ctx: &C) {
        self.behavior.refresh_targets(ctx, &mut self.targets);
    }

    pub fn start(&mut self, ctx: &mut C) -> Option<ActionOutcome> {
        let mut ctl = self.control();
        self.behavior.on_start(ctx, &mut ctl);
        ctl.outcome()
    }

    pub fn update(&mut self, ctx: &mut C, dt: f32) -> Option<ActionOutcome> {
        let mut ctl = self.control();
        self.behavior.on_update(ctx, dt, &mut ctl);
        ctl.outcome()
    }

    pub fn late_update(&mut self, ctx: &mut C, dt: f32) -> Option<ActionOutcome> {
        let mut ctl = self.control();
        self.behavior.on_late_update(ctx, dt, &mut ctl);
        ctl.outcome()
    }

    pub fn fixed_update(&mut self, ctx: &mut C, step: f32) -> Option<ActionOutcome> {
        let mut ctl = self.control();
        self.behavior.on_fixed_update(ctx, step, &mut ctl);
        ctl.outcome()
    }

    pub fn finish(&mut self, ctx: &mut C) {
        self.behavior.on_finish(ctx);
    }

    fn control(&self) -> ActionControl {
        ActionControl::new(self.id, self.chosen_target)
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn spec(&self) -> &ActionSpec {
        &self.spec
    }

    pub fn priority(&self) -> i32 {
        self.spec.priority
    }

    pub fn is_interruptable(&self) -> bool {
        self.spec.interruptable
    }

    /// Score from the most recent [`compute_score`](Self::compute_score).
    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn chosen_target(&self) -> Option<TargetId> {
        self.chosen_target
    }

    pub fn targets(&self) -> &TargetList {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut TargetList {
        &mut self.targets
    }

    pub fn considerations(&self) -> &[RuntimeConsideration<C>] {
        &self.considerations
    }

    /// Mutable access, e.g. for [`RuntimeConsideration::update_range`].
    pub fn consideration_mut(&mut self, index: usize) -> Option<&mut RuntimeConsideration<C>> {
        self.considerations.get_mut(index)
    }

    pub fn self_considerations(&self) -> impl Iterator<Item = &RuntimeConsideration<C>> {
        self.self_idx.iter().map(|&i| &self.considerations[i])
    }

    pub fn targeted_considerations(&self) -> impl Iterator<Item = &RuntimeConsideration<C>> {
        self.targeted_idx.iter().map(|&i| &self.considerations[i])
    }

    pub fn behavior(&self) -> &dyn ActionBehavior<C> {
        self.behavior.as_ref()
    }

    pub fn behavior_mut(&mut self) -> &mut dyn ActionBehavior<C> {
        self.behavior.as_mut()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl<C> fmt::Debug for RuntimeAction<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeAction")
            .field("id", &self.id)
            .field("set", &self.set)
            .field("name", &self.identity.name)
            .field("spec", &self.spec)
            .field("score", &self.score)
            .field("chosen_target", &self.chosen_target)
            .field("targets", &self.targets)
            .field("considerations", &self.considerations)
            .finish()
    }
}

// ── RuntimeActionSet ──────────────────────────────────────────────────────────

/// An action set inside a brain.  Only groups action ids.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeActionSet {
    pub id:       ActionSetId,
    pub identity: Identity,
    pub actions:  Vec<ActionId>,
}

// ── RuntimeBehavior ───────────────────────────────────────────────────────────

/// The mutable action graph owned by one brain.
pub struct RuntimeBehavior<C> {
    sets:     Vec<RuntimeActionSet>,
    actions:  Vec<Option<RuntimeAction<C>>>,
    next_set: u32,
    /// Bumped on every structural change.
    revision: u64,
}

impl<C> Default for RuntimeBehavior<C> {
    fn default() -> Self {
        Self {
            sets:     Vec::new(),
            actions:  Vec::new(),
            next_set: 0,
            revision: 0,
        }
    }
}

impl<C> RuntimeBehavior<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone and initialize every action set of `template`.
    pub fn from_template(template: &BehaviorTemplate<C>, ctx: &C) -> UaResult<Self> {
        let mut rt = Self::new();
        rt.add_behavior(template, ctx)?;
        Ok(rt)
    }

    /// Add every action set of `template`; returns the ids of the sets that
    /// were not duplicates.
    pub fn add_behavior(&mut self, template: &BehaviorTemplate<C>, ctx: &C) -> UaResult<Vec<ActionSetId>> {
        let mut added = Vec::with_capacity(template.action_sets.len());
        for set in &template.action_sets {
            if let Some(id) = self.add_set(set, ctx)? {
                added.push(id);
            }
        }
        Ok(added)
    }

    /// Clone, initialize, and append one action set.
    ///
    /// A set whose guid is already loaded is skipped with a warning and
    /// `Ok(None)` is returned.  Sets without a guid are never duplicates.
    /// Nothing is added if any action fails to initialize.
    pub fn add_set(&mut self, template: &ActionSetTemplate<C>, ctx: &C) -> UaResult<Option<ActionSetId>> {
        if let Some(guid) = template.identity.guid() {
            if self.contains_set(guid) {
                warn!(set = %template.identity, %guid, "action set already loaded, ignoring");
                return Ok(None);
            }
        }

        let set_id = ActionSetId(self.next_set);
        let first = self.actions.len();
        let mut built = Vec::with_capacity(template.actions.len());
        for (i, action) in template.actions.iter().enumerate() {
            let id = ActionId((first + i) as u32);
            let mut rt = RuntimeAction::from_template(id, set_id, action);
            rt.initialize(ctx)?;
            built.push(rt);
        }

        let ids = built.iter().map(|a| a.id).collect();
        self.actions.extend(built.into_iter().map(Some));
        self.sets.push(RuntimeActionSet {
            id:       set_id,
            identity: template.identity.clone(),
            actions:  ids,
        });
        self.next_set += 1;
        self.revision += 1;
        Ok(Some(set_id))
    }

    /// Remove the set with `guid`, returning it and its actions.
    pub fn remove_set(&mut self, guid: Guid) -> Option<(RuntimeActionSet, Vec<RuntimeAction<C>>)> {
        let pos = self.sets.iter().position(|s| s.identity.guid() == Some(guid))?;
        let set = self.sets.remove(pos);
        let actions = set
            .actions
            .iter()
            .filter_map(|id| self.actions.get_mut(id.index()).and_then(Option::take))
            .collect();
        self.revision += 1;
        Some((set, actions))
    }

    pub fn contains_set(&self, guid: Guid) -> bool {
        self.sets.iter().any(|s| s.identity.guid() == Some(guid))
    }

    pub fn sets(&self) -> &[RuntimeActionSet] {
        &self.sets
    }

    pub fn action(&self, id: ActionId) -> Option<&RuntimeAction<C>> {
        self.actions.get(id.index()).and_then(Option::as_ref)
    }

    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut RuntimeAction<C>> {
        self.actions.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Live actions in declaration order.
    pub fn iter_actions(&self) -> impl Iterator<Item = &RuntimeAction<C>> {
        self.actions.iter().flatten()
    }

    /// Live actions in declaration order.
    pub fn iter_actions_mut(&mut self) -> impl Iterator<Item = &mut RuntimeAction<C>> {
        self.actions.iter_mut().flatten()
    }

    pub fn action_ids(&self) -> Vec<ActionId> {
        self.iter_actions().map(|a| a.id).collect()
    }

    /// Number of live actions.
    pub fn len(&self) -> usize {
        self.iter_actions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Let every action rebuild its candidate list.
    pub fn refresh_targets(&mut self, ctx: &C) {
        for action in self.iter_actions_mut() {
            action.refresh_targets(ctx);
        }
    }
}
