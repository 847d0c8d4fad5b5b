//! A one-dimensional arena: the soldier, a handful of raiders, and the
//! soldier's blackboard.

use std::collections::BTreeMap;

use tracing::{info, warn};

use ua_behavior::{
    AgentContext, Blackboard, BlackboardDefinition, BehaviorResult, HasBlackboard, KeyKind,
};
use ua_core::TargetId;

pub const MAX_HEALTH: f32 = 100.0;
pub const MAGAZINE:   i64 = 6;

const RAIDER_SPEED:  f32 = 1.5;
const RAIDER_REACH:  f32 = 2.0;
const RAIDER_DPS:    f32 = 6.0;

#[derive(Clone, Debug)]
pub struct Raider {
    pub position: f32,
    pub health:   f32,
}

pub struct Arena {
    pub position: f32,
    pub health:   f32,
    pub raiders:  BTreeMap<TargetId, Raider>,
    next_raider:  u32,
    bb:           Blackboard,
}

impl Arena {
    pub fn new() -> BehaviorResult<Self> {
        let def = BlackboardDefinition::new()
            .with_key("ammo", KeyKind::Int)
            .with_key("kills", KeyKind::Int);
        let mut bb = Blackboard::from_definition(&def)?;
        bb.set("ammo", MAGAZINE)?;
        Ok(Self {
            position: 0.0,
            health: MAX_HEALTH,
            raiders: BTreeMap::new(),
            next_raider: 0,
            bb,
        })
    }

    pub fn spawn(&mut self, position: f32, health: f32) -> TargetId {
        let id = TargetId(self.next_raider);
        self.next_raider += 1;
        self.raiders.insert(id, Raider { position, health });
        info!(raider = %id, position, "raider spawned");
        id
    }

    /// Raiders close in and hit the soldier when in reach.
    pub fn step(&mut self, dt: f32) {
        for raider in self.raiders.values_mut() {
            let gap = self.position - raider.position;
            if gap.abs() > RAIDER_REACH {
                raider.position += gap.signum() * RAIDER_SPEED * dt;
            } else {
                self.health = (self.health - RAIDER_DPS * dt).max(0.0);
            }
        }
    }

    /// Signed distance from the soldier to `target`.
    pub fn offset_to(&self, target: TargetId) -> Option<f32> {
        self.raiders.get(&target).map(|r| r.position - self.position)
    }

    /// Damage a raider; removes it and counts a kill when it drops.
    pub fn hit(&mut self, target: TargetId, damage: f32) -> bool {
        let Some(raider) = self.raiders.get_mut(&target) else {
            return false;
        };
        raider.health -= damage;
        if raider.health > 0.0 {
            return false;
        }
        self.raiders.remove(&target);
        let kills = self.kills() + 1;
        self.write("kills", kills);
        info!(raider = %target, kills, "raider down");
        true
    }

    pub fn ammo(&self) -> i64 {
        self.bb.get_int("ammo").unwrap_or(0)
    }

    pub fn set_ammo(&mut self, ammo: i64) {
        self.write("ammo", ammo);
    }

    pub fn kills(&self) -> i64 {
        self.bb.get_int("kills").unwrap_or(0)
    }

    fn write(&mut self, key: &str, value: i64) {
        if let Err(e) = self.bb.set(key, value) {
            warn!(key, error = %e, "blackboard write failed");
        }
    }
}

impl AgentContext for Arena {
    fn resolves(&self, target: TargetId) -> bool {
        self.raiders.contains_key(&target)
    }
}

impl HasBlackboard for Arena {
    fn blackboard(&self) -> &Blackboard {
        &self.bb
    }
}
