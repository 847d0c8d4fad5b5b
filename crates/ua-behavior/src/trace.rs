//! Per-think-pass score trace.
//!
//! When tracing is enabled the brain hands a [`ScoreTrace`] to every action
//! it scores.  Each action appends one line for itself and one per
//! consideration (and per target for targeted considerations), indented by
//! graph depth:
//!
//! ```text
//! Actions                         depth 0
//!   Attack  score 0.81            depth 1
//!     Hunger  0.90                depth 2   (self consideration)
//!     Target: TargetId(4)         depth 2
//!       Distance  0.90            depth 3   (targeted consideration)
//! ```
//!
//! Tracing disables the zero-score short-circuit so every consideration gets
//! evaluated and shows up in the trace.

use std::fmt::Write as _;

use ua_core::TargetId;

/// What a [`TraceLine`] describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceKind {
    /// A heading such as `Actions`.
    Section,
    Action,
    Consideration,
    Target,
    /// The action (and target) that won the think pass.
    Winner,
}

impl TraceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceKind::Section => "section",
            TraceKind::Action => "action",
            TraceKind::Consideration => "consideration",
            TraceKind::Target => "target",
            TraceKind::Winner => "winner",
        }
    }
}

/// One indented line of a score trace.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceLine {
    pub depth:   u8,
    pub kind:    TraceKind,
    pub subject: String,
    pub score:   Option<f32>,
    pub note:    Option<&'static str>,
}

/// Ordered trace lines of one think pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreTrace {
    lines: Vec<TraceLine>,
}

impl ScoreTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and return its index (for a later [`set_score`]).
    ///
    /// [`set_score`]: Self::set_score
    pub fn push(
        &mut self,
        depth:   u8,
        kind:    TraceKind,
        subject: impl Into<String>,
        score:   Option<f32>,
    ) -> usize {
        self.lines.push(TraceLine {
            depth,
            kind,
            subject: subject.into(),
            score,
            note: None,
        });
        self.lines.len() - 1
    }

    pub fn section(&mut self, depth: u8, subject: impl Into<String>) -> usize {
        self.push(depth, TraceKind::Section, subject, None)
    }

    pub fn target(&mut self, depth: u8, target: TargetId) -> usize {
        self.push(depth, TraceKind::Target, format!("Target: {target}"), None)
    }

    pub fn set_score(&mut self, line: usize, score: f32) {
        if let Some(l) = self.lines.get_mut(line) {
            l.score = Some(score);
        }
    }

    pub fn set_note(&mut self, line: usize, note: &'static str) {
        if let Some(l) = self.lines.get_mut(line) {
            l.note = Some(note);
        }
    }

    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Render as indented text, two spaces per depth level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let _ = write!(out, "{:indent$}{}", "", line.subject, indent = line.depth as usize * 2);
            if let Some(score) = line.score {
                let _ = write!(out, "  score {score:.4}");
            }
            if let Some(note) = line.note {
                let _ = write!(out, "  [{note}]");
            }
            out.push('\n');
        }
        out
    }
}
