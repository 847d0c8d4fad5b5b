//! Identity of behavior-definition objects.
//!
//! Action sets, actions and considerations in a template each carry an
//! [`Identity`]: a display name and a write-once [`Guid`].  The guid is what
//! the brain compares when deciding whether an action set is already loaded;
//! names are for logs and traces only and need not be unique.

use std::fmt;

use uuid::Uuid;

use crate::{UaError, UaResult};

// ── Guid ──────────────────────────────────────────────────────────────────────

/// A globally unique identifier for a template object.
///
/// Uniqueness is not enforced by the framework; applications that assign
/// their own guids (e.g. from an asset database) are responsible for the
/// guarantees they need.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Guid(pub Uuid);

impl Guid {
    /// A fresh random (v4) guid.
    pub fn generate() -> Self {
        Guid(Uuid::new_v4())
    }

    /// Parse the hyphenated textual form.
    pub fn parse(s: &str) -> UaResult<Self> {
        Uuid::parse_str(s.trim())
            .map(Guid)
            .map_err(|e| UaError::Parse(format!("invalid guid {s:?}: {e}")))
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

// ── Identity ──────────────────────────────────────────────────────────────────

/// Name plus write-once guid of a template object.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identity {
    pub name: String,
    guid:     Option<Guid>,
}

impl Identity {
    /// A named identity with a freshly generated guid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            guid: Some(Guid::generate()),
        }
    }

    /// A named identity with no guid yet; assign one with [`set_guid`].
    ///
    /// [`set_guid`]: Self::set_guid
    pub fn unassigned(name: impl Into<String>) -> Self {
        Self { name: name.into(), guid: None }
    }

    pub fn guid(&self) -> Option<Guid> {
        self.guid
    }

    /// Assign the guid.
    ///
    /// Fails with [`UaError::GuidReassigned`] when a guid is already present
    /// and `can_replace` is `false`.
    pub fn set_guid(&mut self, guid: Guid, can_replace: bool) -> UaResult<()> {
        if self.guid.is_some() && !can_replace {
            return Err(UaError::GuidReassigned { name: self.name.clone() });
        }
        self.guid = Some(guid);
        Ok(())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
