//! Hazard spawners
//!
//! One countdown per hazard kind. When a timer expires it spawns, then rewinds
//! to its base interval divided by the current density, clamped so the worst
//! case object count stays bounded.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::state::{Bonus, BonusKind, Drone, GameState, Meteor, Shard, Shot, Wall};
use crate::consts::*;

/// Spawn interval tuning for one hazard kind
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    /// Seconds between spawns at density 1.0
    pub base: f32,
    pub floor: f32,
    pub ceiling: f32,
}

impl Cadence {
    /// Seconds until the next spawn at the given density
    pub fn interval(&self, density: f32) -> f32 {
        (self.base / density.max(1.0)).clamp(self.floor, self.ceiling)
    }
}

pub const METEOR_CADENCE: Cadence = Cadence { base: 1.1, floor: 0.22, ceiling: 1.2 };
pub const SHARD_CADENCE: Cadence = Cadence { base: 3.2, floor: 0.7, ceiling: 3.5 };
pub const DRONE_CADENCE: Cadence = Cadence { base: 6.0, floor: 1.6, ceiling: 6.0 };
pub const BONUS_CADENCE: Cadence = Cadence { base: 5.0, floor: 3.0, ceiling: 5.0 };
pub const WALL_CADENCE: Cadence = Cadence { base: 10.0, floor: 3.5, ceiling: 9.0 };

/// Share of meteors entering from the top (the rest split left/right)
const METEOR_TOP_SHARE: f32 = 0.72;
const METEOR_LEFT_SHARE: f32 = 0.14;

/// Countdown per hazard kind (seconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub meteor: f32,
    pub shard: f32,
    pub drone: f32,
    pub bonus: f32,
    pub wall: f32,
}

impl Default for SpawnTimers {
    /// Short grace period at the start of a run
    fn default() -> Self {
        Self {
            meteor: 0.6,
            shard: 2.5,
            drone: 4.0,
            bonus: 4.0,
            wall: 6.0,
        }
    }
}

impl SpawnTimers {
    /// Timers far enough out that nothing spawns
    #[cfg(test)]
    pub(crate) fn idle() -> Self {
        Self {
            meteor: f32::MAX,
            shard: f32::MAX,
            drone: f32::MAX,
            bonus: f32::MAX,
            wall: f32::MAX,
        }
    }
}

/// Count a timer down; true (and rewound) when it expired
fn expire(timer: &mut f32, dt: f32, cadence: &Cadence, density: f32) -> bool {
    *timer -= dt;
    if *timer > 0.0 {
        return false;
    }
    *timer = cadence.interval(density);
    true
}

/// Gap width for walls at a given wave (narrows to a floor)
pub fn wall_gap_width(wave: u32) -> f32 {
    (WALL_GAP_MAX - WALL_GAP_SHRINK * wave.saturating_sub(1) as f32).max(WALL_GAP_MIN)
}

/// Chance that a meteor/shard spawn comes as a pair
pub fn pair_chance(wave: u32) -> f64 {
    (0.05 * wave as f64).min(0.45)
}

/// Chance that an expired bonus timer actually drops a bonus
pub fn bonus_chance(wave: u32) -> f64 {
    (0.25 + 0.05 * wave as f64).min(0.55)
}

/// Advance every spawner by `dt`
pub fn tick_spawners(state: &mut GameState, diff: &Difficulty, dt: f32) {
    if expire(&mut state.timers.meteor, dt, &METEOR_CADENCE, diff.density) {
        spawn_meteor(state, diff);
        if state.rng.random_bool(pair_chance(diff.wave)) {
            spawn_meteor(state, diff);
        }
    }

    if expire(&mut state.timers.shard, dt, &SHARD_CADENCE, diff.density) {
        spawn_shard(state, diff);
        if state.rng.random_bool(pair_chance(diff.wave)) {
            spawn_shard(state, diff);
        }
    }

    // No drones in the first wave
    if expire(&mut state.timers.drone, dt, &DRONE_CADENCE, diff.density) && diff.wave >= 2 {
        spawn_drone(state, diff);
    }

    if expire(&mut state.timers.bonus, dt, &BONUS_CADENCE, diff.density)
        && state.bonus.is_none()
        && state.rng.random_bool(bonus_chance(diff.wave))
    {
        spawn_bonus(state, diff);
    }

    if expire(&mut state.timers.wall, dt, &WALL_CADENCE, diff.density) {
        spawn_wall(state, diff);
    }
}

/// Meteor from the top, left, or right edge
pub fn spawn_meteor(state: &mut GameState, diff: &Difficulty) {
    let id = state.next_entity_id();
    let rng = &mut state.rng;
    let radius = rng.random_range(METEOR_MIN_RADIUS..=METEOR_MAX_RADIUS);
    let speed = diff.speed;
    let roll: f32 = rng.random();

    let (pos, vel) = if roll < METEOR_TOP_SHARE {
        let x = rng.random_range(radius..=PLAY_WIDTH - radius);
        let vx = rng.random_range(-20.0f32..=20.0) * speed;
        let vy = rng.random_range(40.0f32..=90.0) * speed;
        (Vec2::new(x, -radius - 4.0), Vec2::new(vx, vy))
    } else {
        let y = rng.random_range(SHIP_MARGIN_TOP..=PLAY_HEIGHT * 0.5);
        let vx = rng.random_range(40.0f32..=80.0) * speed;
        let vy = rng.random_range(15.0f32..=45.0) * speed;
        if roll < METEOR_TOP_SHARE + METEOR_LEFT_SHARE {
            (Vec2::new(-radius, y), Vec2::new(vx, vy))
        } else {
            (Vec2::new(PLAY_WIDTH + radius, y), Vec2::new(-vx, vy))
        }
    };

    log::debug!("spawn meteor #{} r={:.1} at {:?}", id, radius, pos);
    state.meteors.push(Meteor::new(id, pos, vel, radius));
}

pub fn spawn_shard(state: &mut GameState, diff: &Difficulty) {
    let id = state.next_entity_id();
    let rng = &mut state.rng;
    let half = SHARD_WIDTH / 2.0;
    let x = rng.random_range(half..=PLAY_WIDTH - half);
    let vx = rng.random_range(10.0f32..=40.0) * if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let vy = rng.random_range(90.0f32..=140.0);
    let shard = Shard::new(id, Vec2::new(x, -4.0), Vec2::new(vx, vy) * diff.speed);
    state.shards.push(shard);
}

/// Two debris shards thrown sideways from a destroyed meteor
pub fn spawn_debris(state: &mut GameState, origin: Vec2) {
    for dir in [-1.0f32, 1.0] {
        let id = state.next_entity_id();
        let vx = state.rng.random_range(30.0f32..=60.0) * dir;
        let vy = state.rng.random_range(60.0f32..=100.0);
        state.shards.push(Shard::new(id, origin, Vec2::new(vx, vy)));
    }
}

pub fn spawn_drone(state: &mut GameState, diff: &Difficulty) {
    let id = state.next_entity_id();
    let x = state.rng.random_range(16.0f32..=PLAY_WIDTH - 16.0);
    let vy = state.rng.random_range(30.0f32..=45.0) * diff.speed;
    log::debug!("spawn drone #{} at x={:.0}", id, x);
    state.drones.push(Drone::new(id, Vec2::new(x, -8.0), Vec2::new(0.0, vy)));
}

pub fn spawn_bonus(state: &mut GameState, diff: &Difficulty) {
    let id = state.next_entity_id();
    let x = state.rng.random_range(14.0f32..=PLAY_WIDTH - 14.0);
    let roll: f32 = state.rng.random();
    let kind = if roll < 0.45 {
        BonusKind::Score
    } else if roll < 0.80 {
        BonusKind::Energy
    } else {
        BonusKind::Slow
    };
    log::debug!("spawn bonus #{} {:?}", id, kind);
    state.bonus = Some(Bonus {
        id,
        pos: Vec2::new(x, -10.0),
        vel: Vec2::new(0.0, 60.0 + 4.0 * diff.wave as f32),
        kind,
        ttl: BONUS_TTL,
    });
}

pub fn spawn_wall(state: &mut GameState, diff: &Difficulty) {
    let id = state.next_entity_id();
    let gap_w = wall_gap_width(diff.wave);
    let gap_x = state.rng.random_range(4.0f32..=PLAY_WIDTH - 4.0 - gap_w);
    log::debug!("spawn wall #{} gap {:.0}+{:.0}", id, gap_x, gap_w);
    state.walls.push(Wall {
        id,
        y: -WALL_HEIGHT,
        gap_x,
        gap_w,
        vel_y: 45.0 * diff.speed,
        scored: false,
        alive: true,
    });
}

/// Three-shot spread from the ship's nose
pub fn spawn_volley(state: &mut GameState) {
    let nose = state.ship.nose();
    for vx in [0.0, -SHOT_SPREAD_VX, SHOT_SPREAD_VX] {
        let id = state.next_entity_id();
        state.shots.push(Shot {
            id,
            pos: nose,
            vel: Vec2::new(vx, -SHOT_SPEED),
            alive: true,
        });
    }
}
