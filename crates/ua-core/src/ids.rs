//! Typed handles into a brain's action arena, and for host-side targets.
//!
//! Action and action-set ids are arena slots assigned in declaration order
//! when a template is cloned into a brain.  Target ids are opaque to the
//! framework.  All three are `Copy + Ord + Hash` integers; use `.index()`
//! to address a `Vec`.

use std::fmt;

/// Declare an id newtype over an unsigned integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel for "no valid ID" (the inner type's `MAX`).
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Slot position for indexing an arena `Vec`.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `false` for the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// `INVALID`.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Slot of a runtime action in a brain's action arena.
    ///
    /// Slots are never reused: removing an action set tombstones its slots, so
    /// an `ActionId` held by an observer can never alias a newer action.
    pub struct ActionId(u32);
}

typed_id! {
    /// Slot of a runtime action set in a brain's action arena.
    pub struct ActionSetId(u32);
}

typed_id! {
    /// Host-side handle of a candidate target (an entity, a pickup, a cover
    /// point, …).  The framework never dereferences it; liveness is asked of
    /// the host through `AgentContext::resolves`.
    pub struct TargetId(u32);
}
