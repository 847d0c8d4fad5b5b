//! Scheduled blackboard mutations.
//!
//! A [`BlackboardChange`] writes one key: either a plain set, or an add on
//! numeric keys with optional clamping.  Float adds can be scaled by the
//! frame delta so a rate such as "0.5 per second" accumulates correctly.
//! Int adds are never scaled.
//!
//! A [`BlackboardChanger`] wraps a change with a [`ChangeSchedule`] and is
//! ticked by the host once per frame.
//!
//! | Schedule          | Applies                                                    |
//! |-------------------|------------------------------------------------------------|
//! | `None`            | never                                                      |
//! | `Once`            | on the first update after creation or [`reset`]            |
//! | `RepeatWithDelay` | each time `delay_secs` has accumulated, up to the cap      |
//! | `EveryFrame`      | on every update                                            |
//!
//! [`reset`]: BlackboardChanger::reset

use ua_core::Timer;

use crate::{BehaviorResult, Blackboard, BlackboardValue};

// ── Change ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChangeMode {
    #[default]
    Set,
    /// Add to int and float keys; other kinds fall back to a set.
    Add,
}

/// One write to one blackboard key.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackboardChange {
    pub key:         String,
    pub value:       BlackboardValue,
    pub mode:        ChangeMode,
    /// Multiply float adds by the frame delta.
    pub scale_by_dt: bool,
    pub min:         Option<f64>,
    pub max:         Option<f64>,
}

impl BlackboardChange {
    pub fn set(key: impl Into<String>, value: impl Into<BlackboardValue>) -> Self {
        Self {
            key:         key.into(),
            value:       value.into(),
            mode:        ChangeMode::Set,
            scale_by_dt: false,
            min:         None,
            max:         None,
        }
    }

    /// An add, scaled by the frame delta for float keys.
    pub fn add(key: impl Into<String>, value: impl Into<BlackboardValue>) -> Self {
        Self {
            mode: ChangeMode::Add,
            scale_by_dt: true,
            ..Self::set(key, value)
        }
    }

    pub fn unscaled(mut self) -> Self {
        self.scale_by_dt = false;
        self
    }

    /// Clamp numeric results to `[min, max]`.  Either bound may be open.
    pub fn clamped(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Write the change into `bb`.
    ///
    /// Fails if the key is undeclared or the value's kind differs from the
    /// key's.
    pub fn apply(&self, bb: &mut Blackboard, dt: f32) -> BehaviorResult<()> {
        let next = match (self.mode, bb.get(&self.key)?, &self.value) {
            (ChangeMode::Add, BlackboardValue::Float(cur), BlackboardValue::Float(delta)) => {
                let delta = if self.scale_by_dt { delta * dt } else { *delta };
                BlackboardValue::Float(self.clamp_float(cur + delta))
            }
            (ChangeMode::Add, BlackboardValue::Int(cur), BlackboardValue::Int(delta)) => {
                BlackboardValue::Int(self.clamp_int(cur.saturating_add(*delta)))
            }
            (_, _, BlackboardValue::Float(v)) => BlackboardValue::Float(self.clamp_float(*v)),
            (_, _, BlackboardValue::Int(v)) => BlackboardValue::Int(self.clamp_int(*v)),
            (_, _, other) => other.clone(),
        };
        bb.set(&self.key, next)
    }

    fn clamp_float(&self, v: f32) -> f32 {
        let mut v = v;
        if let Some(lo) = self.min {
            v = v.max(lo as f32);
        }
        if let Some(hi) = self.max {
            v = v.min(hi as f32);
        }
        v
    }

    fn clamp_int(&self, v: i64) -> i64 {
        let mut v = v;
        if let Some(lo) = self.min {
            v = v.max(lo.ceil() as i64);
        }
        if let Some(hi) = self.max {
            v = v.min(hi.floor() as i64);
        }
        v
    }
}

// ── Changer ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChangeSchedule {
    #[default]
    None,
    Once,
    /// `max_executions == 0` means unlimited.
    RepeatWithDelay { delay_secs: f32, max_executions: u32 },
    EveryFrame,
}

/// A [`BlackboardChange`] applied on a schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct BlackboardChanger {
    pub schedule: ChangeSchedule,
    pub change:   BlackboardChange,
    executions:   u32,
    delay:        Timer,
}

impl BlackboardChanger {
    pub fn new(schedule: ChangeSchedule, change: BlackboardChange) -> Self {
        let delay = match schedule {
            ChangeSchedule::RepeatWithDelay { delay_secs, .. } => Timer::new(delay_secs),
            _ => Timer::new(0.0),
        };
        Self { schedule, change, executions: 0, delay }
    }

    pub fn executions(&self) -> u32 {
        self.executions
    }

    /// Advance by `dt` and apply the change if the schedule says so.
    ///
    /// Returns `true` when the change was applied this update.
    pub fn update(&mut self, bb: &mut Blackboard, dt: f32) -> BehaviorResult<bool> {
        let due = match self.schedule {
            ChangeSchedule::None => false,
            ChangeSchedule::Once => self.executions == 0,
            ChangeSchedule::RepeatWithDelay { max_executions, .. } => {
                self.delay.accumulate(dt);
                self.delay.is_due() && (max_executions == 0 || self.executions < max_executions)
            }
            ChangeSchedule::EveryFrame => true,
        };
        if !due {
            return Ok(false);
        }
        self.change.apply(bb, dt)?;
        self.executions = self.executions.saturating_add(1);
        self.delay.reset();
        Ok(true)
    }

    /// Forget past executions and restart the delay.
    pub fn reset(&mut self) {
        self.executions = 0;
        self.delay.reset();
    }
}
