//! The host-world capabilities a brain needs from its context type.

use ua_core::TargetId;

use crate::Blackboard;

/// Host world as seen by one agent's brain.
///
/// The brain is generic over the context type `C`; considerations read it
/// (`&C`) while scoring and action hooks may mutate it (`&mut C`).  The only
/// thing the framework itself asks of the host is whether a target handle
/// still refers to something: dead candidates are pruned from target lists
/// right before scoring.
pub trait AgentContext {
    /// `false` once `target` no longer refers to a live object.
    ///
    /// Default: every target is live.
    fn resolves(&self, _target: TargetId) -> bool {
        true
    }
}

/// A context with no world state.  Every target resolves.
impl AgentContext for () {}

/// A context that owns (or can lend) an agent's blackboard.
pub trait HasBlackboard {
    fn blackboard(&self) -> &Blackboard;
}
