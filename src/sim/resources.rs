//! Energy, shield, and weapon bookkeeping

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Outcome of a ship collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSeverity {
    /// Absorbed while invulnerable
    Scrape,
    Hard,
}

impl HitSeverity {
    pub fn penalty(&self) -> f32 {
        match self {
            HitSeverity::Scrape => SCRAPE_PENALTY,
            HitSeverity::Hard => HARD_PENALTY,
        }
    }
}

/// Player energy pool and the timers that hang off it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resources {
    /// Energy in `[0, MAX_ENERGY]`
    pub energy: f32,
    /// Seconds of invulnerability left
    pub invulnerable: f32,
    /// Seconds until the weapon can fire again
    pub cooldown: f32,
    /// Seconds of screen shake left
    pub shake: f32,
    /// Shield was up during the last update
    pub shield_active: bool,
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

impl Resources {
    pub fn new() -> Self {
        Self {
            energy: MAX_ENERGY,
            invulnerable: 0.0,
            cooldown: 0.0,
            shake: 0.0,
            shield_active: false,
        }
    }

    /// Decay timers, then drain for the shield or regenerate.
    pub fn update(&mut self, shield_held: bool, dt: f32) {
        self.invulnerable = (self.invulnerable - dt).max(0.0);
        self.cooldown = (self.cooldown - dt).max(0.0);
        self.shake = (self.shake - dt).max(0.0);

        self.shield_active = shield_held && self.energy > 0.0;
        if self.shield_active {
            self.energy = (self.energy - SHIELD_DRAIN * dt).max(0.0);
            self.invulnerable = self.invulnerable.max(SHIELD_WINDOW);
        } else {
            self.add_energy(ENERGY_REGEN * dt);
        }
    }

    /// Pay for a volley if the weapon is ready. Returns false when rejected.
    pub fn try_fire(&mut self) -> bool {
        if self.cooldown > 0.0 || self.energy < SHOT_MIN_ENERGY {
            return false;
        }
        self.energy = (self.energy - SHOT_COST).max(0.0);
        self.cooldown = SHOT_COOLDOWN;
        self.shake = self.shake.max(FIRE_SHAKE);
        true
    }

    /// Charge a collision. Invulnerability downgrades the hit to a scrape,
    /// and either way the protection window restarts.
    pub fn take_hit(&mut self) -> HitSeverity {
        let severity = if self.is_invulnerable() {
            HitSeverity::Scrape
        } else {
            HitSeverity::Hard
        };
        self.energy = (self.energy - severity.penalty()).max(0.0);
        self.invulnerable = HIT_PROTECTION;
        self.shake = self.shake.max(HIT_SHAKE);
        severity
    }

    pub fn add_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).clamp(0.0, MAX_ENERGY);
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    /// Out of energy with no shield up: the run is over
    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.energy <= 0.0 && !self.shield_active
    }
}
