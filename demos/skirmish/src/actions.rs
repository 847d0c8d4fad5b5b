//! The soldier's action behaviors.

use tracing::{debug, info};

use ua_behavior::{ActionBehavior, ActionControl, TargetList};

use crate::arena::{Arena, MAGAZINE, MAX_HEALTH};

const WALK_SPEED:    f32 = 3.0;
const FIRING_RANGE:  f32 = 6.0;
const SHOT_DAMAGE:   f32 = 20.0;
const SHOT_COOLDOWN: f32 = 0.5;
const RELOAD_SECS:   f32 = 1.5;
const HEAL_PER_SEC:  f32 = 12.0;

/// Drift back and forth around the origin.
#[derive(Clone, Default)]
pub struct Patrol {
    heading: f32,
}

impl ActionBehavior<Arena> for Patrol {
    fn refresh_targets(&mut self, _ctx: &Arena, _targets: &mut TargetList) {}

    fn on_start(&mut self, ctx: &mut Arena, _ctl: &mut ActionControl) {
        self.heading = if ctx.position > 0.0 { -1.0 } else { 1.0 };
    }

    fn on_update(&mut self, ctx: &mut Arena, dt: f32, _ctl: &mut ActionControl) {
        ctx.position += self.heading * WALK_SPEED * 0.5 * dt;
        if ctx.position.abs() > 3.0 {
            self.heading = -ctx.position.signum();
        }
    }
}

/// Close to firing range of the chosen raider and shoot it.
#[derive(Clone, Default)]
pub struct Attack {
    cooldown: f32,
}

impl ActionBehavior<Arena> for Attack {
    fn refresh_targets(&mut self, ctx: &Arena, targets: &mut TargetList) {
        targets.clear();
        targets.extend(ctx.raiders.keys().copied());
    }

    fn on_start(&mut self, _ctx: &mut Arena, ctl: &mut ActionControl) {
        self.cooldown = 0.0;
        debug!(target = ?ctl.target(), "engaging");
    }

    fn on_update(&mut self, ctx: &mut Arena, dt: f32, ctl: &mut ActionControl) {
        let Some(target) = ctl.target() else {
            ctl.fail();
            return;
        };
        let Some(offset) = ctx.offset_to(target) else {
            ctl.succeed();
            return;
        };
        if offset.abs() > FIRING_RANGE {
            ctx.position += offset.signum() * WALK_SPEED * dt;
            return;
        }

        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return;
        }
        if ctx.ammo() == 0 {
            ctl.fail();
            return;
        }
        self.cooldown = SHOT_COOLDOWN;
        ctx.set_ammo(ctx.ammo() - 1);
        if ctx.hit(target, SHOT_DAMAGE) {
            ctl.succeed();
        }
    }
}

/// Stand still until the magazine is full.
#[derive(Clone, Default)]
pub struct Reload {
    elapsed: f32,
}

impl ActionBehavior<Arena> for Reload {
    fn refresh_targets(&mut self, _ctx: &Arena, _targets: &mut TargetList) {}

    fn on_start(&mut self, _ctx: &mut Arena, _ctl: &mut ActionControl) {
        self.elapsed = 0.0;
    }

    fn on_fixed_update(&mut self, ctx: &mut Arena, step: f32, ctl: &mut ActionControl) {
        self.elapsed += step;
        if self.elapsed >= RELOAD_SECS {
            ctx.set_ammo(MAGAZINE);
            info!("reloaded");
            ctl.succeed();
        }
    }
}

/// Back away from the nearest raider and patch up.
#[derive(Clone, Default)]
pub struct Retreat;

impl ActionBehavior<Arena> for Retreat {
    fn refresh_targets(&mut self, _ctx: &Arena, _targets: &mut TargetList) {}

    fn on_start(&mut self, ctx: &mut Arena, _ctl: &mut ActionControl) {
        info!(health = ctx.health, "retreating");
    }

    fn on_update(&mut self, ctx: &mut Arena, dt: f32, ctl: &mut ActionControl) {
        let nearest = ctx
            .raiders
            .values()
            .map(|r| r.position)
            .min_by(|a, b| (a - ctx.position).abs().total_cmp(&(b - ctx.position).abs()));
        if let Some(p) = nearest {
            ctx.position -= (p - ctx.position).signum() * WALK_SPEED * dt;
        }
        ctx.health = (ctx.health + HEAL_PER_SEC * dt).min(MAX_HEALTH);
        if ctx.health >= 0.7 * MAX_HEALTH {
            ctl.succeed();
        }
    }
}
