//! Typed per-agent key/value store.
//!
//! A [`BlackboardDefinition`] declares the keys and their types once; every
//! agent builds its own [`Blackboard`] from it.  Keys start at the zero value
//! of their type.  Reading or writing an undeclared key, or writing a value
//! of the wrong type, is an error rather than an implicit insert.

use std::collections::HashMap;

use ua_core::TargetId;

use crate::{BehaviorError, BehaviorResult};

// ── Key types ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeyKind {
    Bool,
    Int,
    Float,
    Text,
    Target,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlackboardValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Text(String),
    Target(Option<TargetId>),
}

impl BlackboardValue {
    /// The zero value of `kind`.
    pub fn zero(kind: KeyKind) -> Self {
        match kind {
            KeyKind::Bool => BlackboardValue::Bool(false),
            KeyKind::Int => BlackboardValue::Int(0),
            KeyKind::Float => BlackboardValue::Float(0.0),
            KeyKind::Text => BlackboardValue::Text(String::new()),
            KeyKind::Target => BlackboardValue::Target(None),
        }
    }

    pub fn kind(&self) -> KeyKind {
        match self {
            BlackboardValue::Bool(_) => KeyKind::Bool,
            BlackboardValue::Int(_) => KeyKind::Int,
            BlackboardValue::Float(_) => KeyKind::Float,
            BlackboardValue::Text(_) => KeyKind::Text,
            BlackboardValue::Target(_) => KeyKind::Target,
        }
    }

    /// Numeric view: bools are 0/1, ints are widened, non-numeric values
    /// are 0.
    pub fn as_f32(&self) -> f32 {
        match self {
            BlackboardValue::Bool(b) => f32::from(u8::from(*b)),
            BlackboardValue::Int(i) => *i as f32,
            BlackboardValue::Float(f) => *f,
            BlackboardValue::Text(_) | BlackboardValue::Target(_) => 0.0,
        }
    }
}

impl From<bool> for BlackboardValue {
    fn from(v: bool) -> Self {
        BlackboardValue::Bool(v)
    }
}

impl From<i64> for BlackboardValue {
    fn from(v: i64) -> Self {
        BlackboardValue::Int(v)
    }
}

impl From<f32> for BlackboardValue {
    fn from(v: f32) -> Self {
        BlackboardValue::Float(v)
    }
}

impl From<String> for BlackboardValue {
    fn from(v: String) -> Self {
        BlackboardValue::Text(v)
    }
}

impl From<&str> for BlackboardValue {
    fn from(v: &str) -> Self {
        BlackboardValue::Text(v.to_owned())
    }
}

impl From<Option<TargetId>> for BlackboardValue {
    fn from(v: Option<TargetId>) -> Self {
        BlackboardValue::Target(v)
    }
}

// ── Definition ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyDefinition {
    pub name: String,
    pub kind: KeyKind,
}

/// The declared keys of a blackboard, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackboardDefinition {
    pub keys: Vec<KeyDefinition>,
}

impl BlackboardDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, name: impl Into<String>, kind: KeyKind) -> Self {
        self.keys.push(KeyDefinition { name: name.into(), kind });
        self
    }
}

// ── Blackboard ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Blackboard {
    values: HashMap<String, BlackboardValue>,
}

impl Blackboard {
    /// Build a blackboard with every declared key at its zero value.
    ///
    /// Fails with [`BehaviorError::DuplicateKey`] if a name is declared twice.
    pub fn from_definition(def: &BlackboardDefinition) -> BehaviorResult<Self> {
        let mut values = HashMap::with_capacity(def.keys.len());
        for key in &def.keys {
            if values.insert(key.name.clone(), BlackboardValue::zero(key.kind)).is_some() {
                return Err(BehaviorError::DuplicateKey(key.name.clone()));
            }
        }
        Ok(Self { values })
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: &str) -> BehaviorResult<&BlackboardValue> {
        self.values
            .get(key)
            .ok_or_else(|| BehaviorError::UnknownKey(key.to_owned()))
    }

    /// Overwrite a declared key with a value of the same type.
    pub fn set(&mut self, key: &str, value: impl Into<BlackboardValue>) -> BehaviorResult<()> {
        let value = value.into();
        let slot = self
            .values
            .get_mut(key)
            .ok_or_else(|| BehaviorError::UnknownKey(key.to_owned()))?;
        if slot.kind() != value.kind() {
            return Err(BehaviorError::KeyTypeMismatch {
                key:      key.to_owned(),
                expected: slot.kind(),
                found:    value.kind(),
            });
        }
        *slot = value;
        Ok(())
    }

    pub fn get_bool(&self, key: &str) -> BehaviorResult<bool> {
        match self.get(key)? {
            BlackboardValue::Bool(v) => Ok(*v),
            other => Err(mismatch(key, KeyKind::Bool, other)),
        }
    }

    pub fn get_int(&self, key: &str) -> BehaviorResult<i64> {
        match self.get(key)? {
            BlackboardValue::Int(v) => Ok(*v),
            other => Err(mismatch(key, KeyKind::Int, other)),
        }
    }

    pub fn get_float(&self, key: &str) -> BehaviorResult<f32> {
        match self.get(key)? {
            BlackboardValue::Float(v) => Ok(*v),
            other => Err(mismatch(key, KeyKind::Float, other)),
        }
    }

    pub fn get_text(&self, key: &str) -> BehaviorResult<&str> {
        match self.get(key)? {
            BlackboardValue::Text(v) => Ok(v),
            other => Err(mismatch(key, KeyKind::Text, other)),
        }
    }

    pub fn get_target(&self, key: &str) -> BehaviorResult<Option<TargetId>> {
        match self.get(key)? {
            BlackboardValue::Target(v) => Ok(*v),
            other => Err(mismatch(key, KeyKind::Target, other)),
        }
    }
}

fn mismatch(key: &str, expected: KeyKind, found: &BlackboardValue) -> BehaviorError {
    BehaviorError::KeyTypeMismatch {
        key: key.to_owned(),
        expected,
        found: found.kind(),
    }
}
