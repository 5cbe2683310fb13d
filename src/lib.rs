//! Galattica - a survival space-combat arcade cartridge
//!
//! Core modules:
//! - `sim`: Simulation (session state machine, spawning, movement, collisions)
//! - `renderer`: Draw-primitive adapter for an external raster surface
//! - `cartridge`: The `reset`/`update`/`render`/`back` game object
//! - `persistence`: Key-value stores for the best score
//! - `best_score`: Write-through best score bridge

pub mod best_score;
pub mod cartridge;
pub mod error;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_score::BestScore;
pub use cartridge::{Cartridge, Galattica};
pub use error::StoreError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the frame driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play area dimensions (handheld screen)
    pub const PLAY_WIDTH: f32 = 256.0;
    pub const PLAY_HEIGHT: f32 = 256.0;
    /// Entities this far outside the play area are culled
    pub const CULL_MARGIN: f32 = 40.0;

    /// Ship
    pub const SHIP_RADIUS: f32 = 6.0;
    pub const SHIP_SPEED: f32 = 130.0;
    /// Horizontal clamp margin (ship stays in [10, W-10])
    pub const SHIP_MARGIN_X: f32 = 10.0;
    /// Top clamp leaves room for the HUD strip
    pub const SHIP_MARGIN_TOP: f32 = 22.0;
    pub const SHIP_MARGIN_BOTTOM: f32 = 10.0;
    /// Distance from the bottom edge where the ship starts
    pub const SHIP_START_OFFSET: f32 = 26.0;

    /// Energy and shield
    pub const MAX_ENERGY: f32 = 100.0;
    pub const SHIELD_DRAIN: f32 = 42.0;
    pub const ENERGY_REGEN: f32 = 7.5;
    pub const SHIELD_WINDOW: f32 = 0.12;

    /// Weapon
    pub const SHOT_COST: f32 = 10.0;
    pub const SHOT_MIN_ENERGY: f32 = 8.0;
    pub const SHOT_COOLDOWN: f32 = 0.22;
    pub const SHOT_SPEED: f32 = 220.0;
    pub const SHOT_SPREAD_VX: f32 = 35.0;
    pub const SHOT_RADIUS: f32 = 2.0;
    pub const FIRE_SHAKE: f32 = 0.08;

    /// Damage
    pub const HARD_PENALTY: f32 = 35.0;
    pub const SCRAPE_PENALTY: f32 = 8.0;
    pub const HIT_PROTECTION: f32 = 0.8;
    pub const HIT_SHAKE: f32 = 0.25;
    /// Upward displacement applied to a meteor that struck the ship
    pub const METEOR_HIT_NUDGE: f32 = 14.0;

    /// Hazard geometry
    pub const METEOR_MIN_RADIUS: f32 = 6.0;
    pub const METEOR_MAX_RADIUS: f32 = 16.0;
    /// Meteors above this radius are armored (2 hp) and may split
    pub const METEOR_LARGE_RADIUS: f32 = 12.0;
    pub const METEOR_SPLIT_CHANCE: f64 = 0.75;
    pub const SHARD_WIDTH: f32 = 12.0;
    pub const SHARD_HEIGHT: f32 = 2.0;
    pub const DRONE_RADIUS: f32 = 6.0;
    pub const DRONE_HP: u8 = 2;
    pub const DRONE_STEER: f32 = 80.0;
    pub const DRONE_STEER_GAIN: f32 = 2.0;
    pub const DRONE_DAMPING: f32 = 0.8;
    pub const BONUS_RADIUS: f32 = 7.0;
    pub const BONUS_TTL: f32 = 6.0;
    pub const WALL_HEIGHT: f32 = 10.0;
    pub const WALL_GAP_MAX: f32 = 54.0;
    pub const WALL_GAP_MIN: f32 = 26.0;
    pub const WALL_GAP_SHRINK: f32 = 4.0;

    /// Near-miss margins
    pub const METEOR_GRAZE: f32 = 6.0;
    pub const SHARD_GRAZE: f32 = 4.0;
    pub const DRONE_GRAZE: f32 = 8.0;

    /// Scoring
    pub const MAX_SCORE: u32 = 999;
    pub const SURVIVAL_RATE: f32 = 14.0;
    pub const SCORE_PER_WAVE: u32 = 80;
    pub const METEOR_REWARD: u32 = 6;
    pub const DRONE_REWARD: u32 = 18;
    pub const WALL_REWARD: u32 = 12;
    pub const METEOR_GRAZE_REWARD: u32 = 2;
    pub const SHARD_GRAZE_REWARD: u32 = 1;
    pub const DRONE_GRAZE_REWARD: u32 = 3;
    pub const BONUS_SCORE: u32 = 35;
    pub const BONUS_ENERGY: f32 = 55.0;
    /// Populations kept by the Slow bonus
    pub const SLOW_KEEP_METEORS: usize = 4;
    pub const SLOW_KEEP_SHARDS: usize = 2;
}

/// Squared distance between two points (avoids the square root in hit tests)
#[inline]
pub fn dist_sq(a: glam::Vec2, b: glam::Vec2) -> f32 {
    (a - b).length_squared()
}

/// Zero-padded decimal used by the HUD (`pad(7, 3)` -> `"007"`)
#[inline]
pub fn pad(value: u32, width: usize) -> String {
    format!("{:0width$}", value, width = width)
}
