//! Session state and entity types
//!
//! Everything a run needs lives in one `GameState`, owned by the caller and
//! passed by `&mut` into `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::wave_for_score;
use super::resources::Resources;
use super::spawn::SpawnTimers;
use crate::consts::*;

/// Session state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ready screen, waiting for START
    WaitingStart,
    /// Active gameplay
    Playing,
    /// Suspended, state kept
    Paused,
    /// Energy depleted; START or back() begins a new run
    Dead,
}

impl GamePhase {
    /// Centered label drawn over the play area when not playing
    pub fn overlay_label(&self) -> Option<&'static str> {
        match self {
            GamePhase::WaitingStart => Some("PRESS START"),
            GamePhase::Paused => Some("PAUSE"),
            GamePhase::Dead => Some("GAME OVER"),
            GamePhase::Playing => None,
        }
    }
}

/// Kinds of entity that can damage the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Meteor,
    Shard,
    Drone,
    Wall,
}

impl HazardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Meteor => "METEOR",
            HazardKind::Shard => "SHARD",
            HazardKind::Drone => "DRONE",
            HazardKind::Wall => "WALL",
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub radius: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAY_WIDTH / 2.0, PLAY_HEIGHT - SHIP_START_OFFSET),
            radius: SHIP_RADIUS,
        }
    }
}

impl Ship {
    /// Spawn point for player shots
    pub fn nose(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.radius - 2.0)
    }
}

/// A destroyable rock; large ones take two hits and may split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meteor {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hp: u8,
    pub alive: bool,
    /// Near-miss already awarded for this meteor
    pub grazed: bool,
}

impl Meteor {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        let radius = radius.clamp(METEOR_MIN_RADIUS, METEOR_MAX_RADIUS);
        Self {
            id,
            pos,
            vel,
            radius,
            hp: if radius > METEOR_LARGE_RADIUS { 2 } else { 1 },
            alive: true,
            grazed: false,
        }
    }

    pub fn is_large(&self) -> bool {
        self.radius > METEOR_LARGE_RADIUS
    }
}

/// Indestructible debris with a thin rectangular hitbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shard {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub alive: bool,
    pub grazed: bool,
}

impl Shard {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            alive: true,
            grazed: false,
        }
    }

    #[inline]
    pub fn half_extents() -> Vec2 {
        Vec2::new(SHARD_WIDTH / 2.0, SHARD_HEIGHT / 2.0)
    }
}

/// Homing enemy that steers toward the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub hp: u8,
    pub alive: bool,
    pub grazed: bool,
}

impl Drone {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            hp: DRONE_HP,
            alive: true,
            grazed: false,
        }
    }
}

/// Player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub alive: bool,
}

/// Bonus types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// Flat score reward
    Score,
    /// Refills energy
    Energy,
    /// Thins out meteors and shards
    Slow,
}

impl BonusKind {
    /// Single-letter glyph drawn inside the bonus box
    pub fn glyph(&self) -> &'static str {
        match self {
            BonusKind::Score => "S",
            BonusKind::Energy => "E",
            BonusKind::Slow => "T",
        }
    }

    /// Apply the pickup effect to the session, returning the HUD message
    pub fn apply(self, state: &mut GameState) -> String {
        match self {
            BonusKind::Score => {
                state.add_score(BONUS_SCORE);
                format!("BONUS +{}", BONUS_SCORE)
            }
            BonusKind::Energy => {
                state.resources.add_energy(BONUS_ENERGY);
                format!("BONUS: ENERGY +{}", BONUS_ENERGY as u32)
            }
            BonusKind::Slow => {
                let meteors = trim_oldest(
                    &mut state.meteors,
                    SLOW_KEEP_METEORS,
                    |m| m.alive,
                    |m| m.alive = false,
                );
                let shards = trim_oldest(
                    &mut state.shards,
                    SLOW_KEEP_SHARDS,
                    |s| s.alive,
                    |s| s.alive = false,
                );
                log::debug!("Slow bonus cleared {} meteors, {} shards", meteors, shards);
                "BONUS: SLOW".to_string()
            }
        }
    }
}

/// Kill the oldest live entries so that at most `keep` stay alive.
/// Lists are kept in spawn order, so the front is the oldest.
fn trim_oldest<T>(
    items: &mut [T],
    keep: usize,
    is_alive: impl Fn(&T) -> bool,
    kill: impl Fn(&mut T),
) -> usize {
    let live = items.iter().filter(|item| is_alive(*item)).count();
    let mut excess = live.saturating_sub(keep);
    let removed = excess;
    for item in items.iter_mut() {
        if excess == 0 {
            break;
        }
        if is_alive(item) {
            kill(item);
            excess -= 1;
        }
    }
    removed
}

/// A pickup falling through the play area
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bonus {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: BonusKind,
    /// Seconds left before it vanishes
    pub ttl: f32,
}

/// Full-width barrier with a gap the ship must thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: u32,
    /// Top edge of the band
    pub y: f32,
    pub gap_x: f32,
    pub gap_w: f32,
    pub vel_y: f32,
    /// Pass reward already paid
    pub scored: bool,
    pub alive: bool,
}

impl Wall {
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + WALL_HEIGHT
    }

    /// Whether a ship centered at `x` fits through the gap
    pub fn admits(&self, x: f32, radius: f32) -> bool {
        x >= self.gap_x + radius && x <= self.gap_x + self.gap_w - radius
    }
}

/// Events produced during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    WaveChanged { wave: u32 },
    Hit { kind: HazardKind },
    Scraped { kind: HazardKind },
    Destroyed { kind: HazardKind, reward: u32 },
    NearMiss { kind: HazardKind, id: u32, reward: u32 },
    BonusCollected { kind: BonusKind },
    WallCleared { id: u32 },
    NewBest { score: u32 },
    Died { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Score for the current run, clamped to `MAX_SCORE`
    pub score: u32,
    /// Best score known to this session (loaded from the store on reset)
    pub best: u32,
    /// Current wave, always `wave_for_score(score)` after a tick
    pub wave: u32,
    pub resources: Resources,
    pub timers: SpawnTimers,
    pub ship: Ship,
    pub meteors: Vec<Meteor>,
    pub shards: Vec<Shard>,
    pub drones: Vec<Drone>,
    pub shots: Vec<Shot>,
    pub bonus: Option<Bonus>,
    pub walls: Vec<Wall>,
    /// Seconds of play time; drives blink animations
    pub elapsed: f32,
    /// Status line shown under the play area
    pub message: String,
    pub events: Vec<GameEvent>,
    /// Fractional survival points not yet added to `score`
    pub(crate) survival_carry: f32,
    /// `NewBest` already announced this run
    pub(crate) best_beaten: bool,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// New session seeded from OS entropy
    pub fn new(best: u32) -> Self {
        Self::with_rng(best, Pcg32::seed_from_u64(rand::random()))
    }

    /// New session with a fixed seed (tests, demos)
    pub fn with_seed(best: u32, seed: u64) -> Self {
        Self::with_rng(best, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(best: u32, rng: Pcg32) -> Self {
        Self {
            phase: GamePhase::WaitingStart,
            score: 0,
            best: best.min(MAX_SCORE),
            wave: 1,
            resources: Resources::new(),
            timers: SpawnTimers::default(),
            ship: Ship::default(),
            meteors: Vec::new(),
            shards: Vec::new(),
            drones: Vec::new(),
            shots: Vec::new(),
            bonus: None,
            walls: Vec::new(),
            elapsed: 0.0,
            message: "GALATTICA: ARROWS move - A shield - B fire - START play/pause".to_string(),
            events: Vec::new(),
            survival_carry: 0.0,
            best_beaten: false,
            rng,
            next_id: 1,
        }
    }

    /// Discard the run and start over in `WaitingStart`, keeping best and RNG
    pub fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = Self::with_rng(self.best, rng);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Add points, clamped to `MAX_SCORE`
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points).min(MAX_SCORE);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recompute the wave from the score; true when it changed
    pub fn refresh_wave(&mut self) -> bool {
        let wave = wave_for_score(self.score);
        if wave == self.wave {
            return false;
        }
        self.wave = wave;
        true
    }

    /// Number of live hazards of every kind (walls included)
    pub fn hazard_count(&self) -> usize {
        self.meteors.iter().filter(|m| m.alive).count()
            + self.shards.iter().filter(|s| s.alive).count()
            + self.drones.iter().filter(|d| d.alive).count()
            + self.walls.iter().filter(|w| w.alive).count()
    }

    /// Sweep pass: drop destroyed entities and anything past the cull margin
    pub fn sweep(&mut self) {
        self.meteors.retain(|m| m.alive && in_play(m.pos));
        self.shards.retain(|s| s.alive && in_play(s.pos));
        self.drones.retain(|d| d.alive && in_play(d.pos));
        self.shots.retain(|s| s.alive && in_play(s.pos));
        self.walls.retain(|w| w.alive && w.y <= PLAY_HEIGHT + CULL_MARGIN);
        if self
            .bonus
            .is_some_and(|b| b.ttl <= 0.0 || !in_play(b.pos))
        {
            self.bonus = None;
        }
    }
}

/// Inside the play area extended by the cull margin
#[inline]
pub fn in_play(pos: Vec2) -> bool {
    pos.x >= -CULL_MARGIN
        && pos.x <= PLAY_WIDTH + CULL_MARGIN
        && pos.y >= -CULL_MARGIN
        && pos.y <= PLAY_HEIGHT + CULL_MARGIN
}
