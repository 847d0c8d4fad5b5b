//! skirmish: a soldier holding a one-dimensional arena against waves of
//! raiders, driven by a utility-AI brain loaded from an embedded CSV
//! template.
//!
//! Usage: `skirmish [OUTPUT_DIR]`.  The think trace and lifecycle events are
//! written as CSV to `OUTPUT_DIR` (default: `<tmp>/ua_skirmish`).  Set
//! `RUST_LOG=debug` to watch every decision.

mod actions;
mod arena;

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ua_behavior::{BlackboardConsideration, ConstantConsideration, FnConsideration, TypeRegistry, load_template_reader};
use ua_brain::{BrainBuilder, SelectionAlgorithm};
use ua_record::{CsvWriter, RecorderObserver};

use actions::{Attack, Patrol, Reload, Retreat};
use arena::Arena;

// ── Constants ─────────────────────────────────────────────────────────────────

const DT:          f32   = 1.0 / 30.0;
const MAX_FRAMES:  u32   = 30 * 120;
const WAVE_FRAMES: u32   = 30 * 20;
const WAVES:       usize = 3;

// ── Template CSV ──────────────────────────────────────────────────────────────

// Retreat outranks everything below 30 % health; Reload fires on an empty
// magazine and cannot be interrupted.
const TEMPLATE_CSV: &str = "\
action_set,action,action_type,priority,interruptable,weight,consideration,consideration_type,min_range,max_range,curve,needs_target\n\
patrol,Patrol,patrol,0,true,1,Baseline,always,0,1,const:0.2,false\n\
combat,Attack,attack,0,true,1,Distance,distance,0,20,inverse,true\n\
combat,Attack,attack,,,,Loaded,ammo,0,6,step:0.1,false\n\
combat,Reload,reload,0,false,1,Empty,ammo,0,6,keys:0=1;0.1=0;1=0,false\n\
survival,Retreat,retreat,1,false,1,Wounded,health,0,100,keys:0=1;0.3=1;0.31=0;1=0,false\n\
";

fn registry() -> TypeRegistry<Arena> {
    TypeRegistry::new()
        .with_action("patrol", Patrol::default())
        .with_action("attack", Attack::default())
        .with_action("reload", Reload::default())
        .with_action("retreat", Retreat)
        .with_consideration("always", ConstantConsideration(1.0))
        .with_consideration("ammo", BlackboardConsideration::new("ammo"))
        .with_consideration("health", FnConsideration::new(|a: &Arena, _| a.health))
        .with_consideration(
            "distance",
            FnConsideration::new(|a: &Arena, t| t.and_then(|t| a.offset_to(t)).map_or(f32::MAX, f32::abs)),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("ua_skirmish"));
    std::fs::create_dir_all(&out_dir)?;

    let template = Arc::new(load_template_reader(Cursor::new(TEMPLATE_CSV), "soldier", &registry())?);
    info!(
        action_sets = template.action_sets.len(),
        actions = template.action_count(),
        "template loaded"
    );

    let mut arena = Arena::new()?;
    arena.spawn(14.0, 40.0);
    arena.spawn(-18.0, 40.0);

    let mut brain = BrainBuilder::new(Arc::clone(&template))
        .think_interval(0.25)
        .target_refresh_interval(1.0)
        .selection(SelectionAlgorithm::HighestScoreWithPriority)
        .interruption_delta_threshold(0.05)
        .trace(true)
        .build(&arena)?;
    let mut recorder = RecorderObserver::new(CsvWriter::new(&out_dir)?);

    let mut waves = 1;
    let mut frame = 0;
    while frame < MAX_FRAMES {
        frame += 1;
        if frame % WAVE_FRAMES == 0 && waves < WAVES {
            waves += 1;
            let side = if waves % 2 == 0 { 1.0 } else { -1.0 };
            arena.spawn(arena.position + side * 16.0, 40.0 + 10.0 * waves as f32);
            arena.spawn(arena.position - side * 20.0, 40.0);
        }

        arena.step(DT);
        brain.tick(DT, &mut arena, &mut recorder)?;

        if arena.health <= 0.0 {
            info!(frame, "soldier down");
            break;
        }
        if arena.raiders.is_empty() && waves == WAVES {
            info!(frame, "arena cleared");
            break;
        }
    }

    recorder.finish()?;
    if let Some(e) = recorder.take_error() {
        return Err(e.into());
    }

    info!(
        frames = frame,
        seconds = brain.clock().elapsed_secs,
        kills = arena.kills(),
        health = arena.health,
        current = brain.current().map(|a| a.identity.name.as_str()).unwrap_or("none"),
        output = %out_dir.display(),
        "skirmish finished"
    );
    Ok(())
}
