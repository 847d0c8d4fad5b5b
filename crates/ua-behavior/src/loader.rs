//! CSV behavior-template loader.
//!
//! # CSV format
//!
//! One row per consideration.  Rows naming the same `action_set` and
//! `action` belong to the same action; action fields are read from the first
//! row of each action and ignored afterwards.  Sets and actions keep the
//! order in which they first appear.
//!
//! ```csv
//! action_set,action,action_type,priority,interruptable,weight,consideration,consideration_type,min_range,max_range,curve,needs_target
//! combat,Idle,idle,0,true,1,Boredom,boredom,0,1,const:0.3,false
//! combat,Attack,attack,0,true,1,Distance,distance,0,20,inverse,true
//! combat,Attack,attack,,,,Health,health,0,100,linear,false
//! ```
//!
//! | Column               | Required | Default          |
//! |----------------------|----------|------------------|
//! | `action_set`         | yes      |                  |
//! | `action_set_guid`    | no       | random guid      |
//! | `action`             | yes      |                  |
//! | `action_type`        | yes      |                  |
//! | `priority`           | no       | `0`              |
//! | `interruptable`      | no       | `true`           |
//! | `weight`             | no       | `1`              |
//! | `max_target_count`   | no       | `5`              |
//! | `use_momentum`       | no       | `true`           |
//! | `consideration`      | no       | type name        |
//! | `consideration_type` | no       | (no consideration on this row) |
//! | `min_range`          | no       | `0`              |
//! | `max_range`          | no       | `1`              |
//! | `curve`              | no       | `linear`         |
//! | `needs_target`       | no       | `false`          |
//! | `shared_instance`    | no       | `false`          |
//!
//! `action_type` and `consideration_type` are looked up in a
//! [`TypeRegistry`]; every action and consideration is a clone of the
//! registered prototype.  `curve` uses the `ResponseCurve` text form.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use ua_core::{Guid, ResponseCurve};

use crate::action::{ActionBehavior, ActionSpec};
use crate::consideration::{Consideration, ConsiderationSpec};
use crate::template::{ActionSetTemplate, ActionTemplate, BehaviorTemplate, ConsiderationTemplate};
use crate::{BehaviorError, BehaviorResult};

// ── TypeRegistry ──────────────────────────────────────────────────────────────

/// Maps type names used in template files to prototype instances.
pub struct TypeRegistry<C> {
    actions:        HashMap<String, Box<dyn ActionBehavior<C>>>,
    considerations: HashMap<String, Box<dyn Consideration<C>>>,
}

impl<C> Default for TypeRegistry<C> {
    fn default() -> Self {
        Self { actions: HashMap::new(), considerations: HashMap::new() }
    }
}

impl<C> TypeRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action prototype.  A later registration under the same
    /// name replaces the earlier one.
    pub fn with_action<B>(mut self, name: impl Into<String>, prototype: B) -> Self
    where
        B: ActionBehavior<C> + 'static,
    {
        self.actions.insert(name.into(), Box::new(prototype));
        self
    }

    /// Register a consideration input prototype.
    pub fn with_consideration<T>(mut self, name: impl Into<String>, prototype: T) -> Self
    where
        T: Consideration<C> + 'static,
    {
        self.considerations.insert(name.into(), Box::new(prototype));
        self
    }

    fn action(&self, name: &str) -> BehaviorResult<Box<dyn ActionBehavior<C>>> {
        self.actions
            .get(name)
            .map(|p| p.clone_boxed())
            .ok_or_else(|| BehaviorError::UnknownType { kind: "action", name: name.to_owned() })
    }

    fn consideration(&self, name: &str) -> BehaviorResult<Arc<dyn Consideration<C>>> {
        self.considerations
            .get(name)
            .map(|p| Arc::from(p.clone_boxed()))
            .ok_or_else(|| BehaviorError::UnknownType { kind: "consideration", name: name.to_owned() })
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TemplateRecord {
    action_set:         String,
    action_set_guid:    Option<String>,
    action:             String,
    action_type:        String,
    priority:           Option<i32>,
    interruptable:      Option<bool>,
    weight:             Option<f32>,
    max_target_count:   Option<usize>,
    use_momentum:       Option<bool>,
    consideration:      Option<String>,
    consideration_type: Option<String>,
    min_range:          Option<f32>,
    max_range:          Option<f32>,
    curve:              Option<String>,
    needs_target:       Option<bool>,
    shared_instance:    Option<bool>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a behavior template named `name` from a CSV file.
pub fn load_template_csv<C>(
    path:     &Path,
    name:     &str,
    registry: &TypeRegistry<C>,
) -> BehaviorResult<BehaviorTemplate<C>> {
    let file = std::fs::File::open(path).map_err(BehaviorError::Io)?;
    load_template_reader(file, name, registry)
}

/// Like [`load_template_csv`] but accepts any `Read` source.
pub fn load_template_reader<C, R: Read>(
    reader:   R,
    name:     &str,
    registry: &TypeRegistry<C>,
) -> BehaviorResult<BehaviorTemplate<C>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut template = BehaviorTemplate::new(name);

    for result in csv_reader.deserialize::<TemplateRecord>() {
        let row = result.map_err(|e| BehaviorError::Parse(e.to_string()))?;

        // ── Locate or open the action set ────────────────────────────────
        let set_pos = match template
            .action_sets
            .iter()
            .position(|s| s.identity.name == row.action_set)
        {
            Some(pos) => pos,
            None => {
                let mut set = ActionSetTemplate::new(row.action_set.clone());
                if let Some(text) = non_empty(&row.action_set_guid) {
                    set.identity.set_guid(Guid::parse(text)?, true)?;
                }
                template.action_sets.push(set);
                template.action_sets.len() - 1
            }
        };
        let set = &mut template.action_sets[set_pos];

        // ── Locate or open the action ────────────────────────────────────
        let action_pos = match set.actions.iter().position(|a| a.identity.name == row.action) {
            Some(pos) => pos,
            None => {
                let behavior = registry.action(&row.action_type)?;
                let action = ActionTemplate::from_boxed(row.action.clone(), behavior)
                    .with_spec(action_spec(&row));
                set.actions.push(action);
                set.actions.len() - 1
            }
        };
        let action = &mut set.actions[action_pos];

        // ── Consideration (optional) ─────────────────────────────────────
        if let Some(kind) = non_empty(&row.consideration_type) {
            let input = registry.consideration(kind)?;
            let name = non_empty(&row.consideration).unwrap_or(kind);
            let consideration =
                ConsiderationTemplate::from_arc(name, input).with_spec(consideration_spec(&row)?);
            action.considerations.push(consideration);
        }
    }

    template.validate()?;
    Ok(template)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn action_spec(row: &TemplateRecord) -> ActionSpec {
    let d = ActionSpec::default();
    ActionSpec {
        priority:         row.priority.unwrap_or(d.priority),
        interruptable:    row.interruptable.unwrap_or(d.interruptable),
        weight:           row.weight.unwrap_or(d.weight),
        max_target_count: row.max_target_count.unwrap_or(d.max_target_count),
        use_momentum:     row.use_momentum.unwrap_or(d.use_momentum),
    }
}

fn consideration_spec(row: &TemplateRecord) -> BehaviorResult<ConsiderationSpec> {
    let d = ConsiderationSpec::default();
    let curve = match non_empty(&row.curve) {
        Some(text) => text.parse::<ResponseCurve>()?,
        None => d.curve,
    };
    Ok(ConsiderationSpec {
        min_range: row.min_range.unwrap_or(d.min_range),
        max_range: row.max_range.unwrap_or(d.max_range),
        curve,
        needs_target:    row.needs_target.unwrap_or(d.needs_target),
        shared_instance: row.shared_instance.unwrap_or(d.shared_instance),
    })
}
