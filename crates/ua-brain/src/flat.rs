//! The flat scoring list.
//!
//! A struct-of-arrays view of every live action in declaration order.  It is
//! rebuilt only when the action graph changes; think passes rewrite the
//! `scores` column in place.

use ua_behavior::RuntimeBehavior;
use ua_core::{ActionId, ActionSetId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatActionList {
    pub(crate) sets:       Vec<ActionSetId>,
    pub(crate) actions:    Vec<ActionId>,
    pub(crate) scores:     Vec<f32>,
    pub(crate) priorities: Vec<i32>,
    /// `RuntimeBehavior::revision` at the last rebuild.
    revision:              Option<u64>,
}

impl FlatActionList {
    pub fn rebuild<C>(&mut self, runtime: &RuntimeBehavior<C>) {
        self.sets.clear();
        self.actions.clear();
        self.scores.clear();
        self.priorities.clear();
        for action in runtime.iter_actions() {
            self.sets.push(action.set);
            self.actions.push(action.id);
            self.scores.push(action.score());
            self.priorities.push(action.priority());
        }
        self.revision = Some(runtime.revision());
    }

    /// `true` when the graph changed since the last rebuild.
    pub fn is_stale<C>(&self, runtime: &RuntimeBehavior<C>) -> bool {
        self.revision != Some(runtime.revision())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Row of `id`, if live.
    pub fn position(&self, id: ActionId) -> Option<usize> {
        self.actions.iter().position(|&a| a == id)
    }

    pub fn sets(&self) -> &[ActionSetId] {
        &self.sets
    }

    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    pub fn priorities(&self) -> &[i32] {
        &self.priorities
    }
}
