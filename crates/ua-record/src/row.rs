//! Plain data records produced by the recorder.

use ua_behavior::{TraceKind, TraceLine};

/// One indented line of a think-pass trace, stamped with its frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRow {
    pub tick:      u64,
    pub time_secs: f64,
    pub depth:     u8,
    pub kind:      TraceKind,
    pub subject:   String,
    pub score:     Option<f32>,
    pub note:      Option<&'static str>,
}

impl TraceRow {
    pub fn from_line(tick: u64, time_secs: f64, line: &TraceLine) -> Self {
        Self {
            tick,
            time_secs,
            depth:   line.depth,
            kind:    line.kind,
            subject: line.subject.clone(),
            score:   line.score,
            note:    line.note,
        }
    }
}

/// Everything recorded about one think pass.
///
/// `lines` is empty unless the brain ran with tracing on.
#[derive(Debug, Clone, PartialEq)]
pub struct ThinkRecord {
    pub tick:      u64,
    pub time_secs: f64,
    pub skipped:   bool,
    pub winner:    Option<u32>,
    pub target:    Option<u32>,
    pub score:     f32,
    pub changed:   bool,
    pub lines:     Vec<TraceRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    TargetsRefreshed,
    ThinkCompleted,
    CurrentActionChanged,
    ActionSucceeded,
    ActionFailed,
    BehaviorListModified,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::TargetsRefreshed => "targets_refreshed",
            EventKind::ThinkCompleted => "think_completed",
            EventKind::CurrentActionChanged => "current_action_changed",
            EventKind::ActionSucceeded => "action_succeeded",
            EventKind::ActionFailed => "action_failed",
            EventKind::BehaviorListModified => "behavior_list_modified",
        }
    }
}

/// One lifecycle event.
///
/// For `CurrentActionChanged`, `action` is the new current action and
/// `previous` the old one; either may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub tick:      u64,
    pub time_secs: f64,
    pub kind:      EventKind,
    pub action:    Option<u32>,
    pub name:      Option<String>,
    pub previous:  Option<u32>,
    pub target:    Option<u32>,
    pub score:     Option<f32>,
}

impl EventRow {
    pub fn new(tick: u64, time_secs: f64, kind: EventKind) -> Self {
        Self {
            tick,
            time_secs,
            kind,
            action: None,
            name: None,
            previous: None,
            target: None,
            score: None,
        }
    }
}
