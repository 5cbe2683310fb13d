//! Simulation module
//!
//! All gameplay logic lives here, free of rendering and platform concerns:
//! - One `GameState` per session, passed by `&mut` into `tick`
//! - Explicit `alive` flags, swept at the end of every tick
//! - The session RNG is the only source of randomness

pub mod collision;
pub mod difficulty;
pub mod movement;
pub mod resources;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circle_box_overlap, circles_overlap};
pub use difficulty::{Difficulty, wave_for_score};
pub use resources::{HitSeverity, Resources};
pub use spawn::SpawnTimers;
pub use state::{
    Bonus, BonusKind, Drone, GameEvent, GamePhase, GameState, HazardKind, Meteor, Shard, Ship,
    Shot, Wall,
};
pub use tick::{TickInput, tick};
