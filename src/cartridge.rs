//! The cartridge game object
//!
//! A host drives a cartridge with one `update(dt, input)` per frame and asks
//! it to `render` onto whatever surface it owns. The best score is written
//! through to the store as soon as the running score beats it.

use crate::best_score::{BEST_SCORE_KEY, BestScore};
use crate::pad;
use crate::persistence::ScoreStore;
use crate::renderer::{Canvas, draw_scene, hud_left, hud_right};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Fixed interface every cartridge exposes to the frame loop
pub trait Cartridge {
    /// Reinitialize to the ready screen, reloading the best score
    fn reset(&mut self);
    /// Advance by one tick
    fn update(&mut self, dt: f32, input: &TickInput);
    /// Draw the current snapshot
    fn render(&self, canvas: &mut dyn Canvas);
    /// Restart straight into play, skipping the ready screen
    fn back(&mut self);
}

/// The survival space-combat cartridge
pub struct Galattica<S: ScoreStore> {
    state: GameState,
    store: S,
    best: BestScore,
    settings: Settings,
}

impl<S: ScoreStore> Galattica<S> {
    pub fn new(store: S) -> Self {
        Self::with_settings(store, Settings::default())
    }

    pub fn with_settings(store: S, settings: Settings) -> Self {
        let best = BestScore::load(&store, BEST_SCORE_KEY);
        let state = GameState::new(best.value());
        Self {
            state,
            store,
            best,
            settings,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that need to poke the session
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// HUD strings: `(left, right)`
    pub fn hud(&self) -> (String, String) {
        (hud_left(&self.state), hud_right(&self.state))
    }

    /// Events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    fn flush_best(&mut self) {
        if self.best.record(&mut self.store, self.state.score) {
            log::info!("New best {}", pad(self.best.value(), 3));
        }
        self.state.best = self.state.best.max(self.best.value());
    }
}

impl<S: ScoreStore> Cartridge for Galattica<S> {
    fn reset(&mut self) {
        self.best = BestScore::load(&self.store, BEST_SCORE_KEY);
        self.state = GameState::new(self.best.value());
    }

    fn update(&mut self, dt: f32, input: &TickInput) {
        let was_dead = self.state.phase == GamePhase::Dead;
        if was_dead && input.start_pressed {
            // Full reset, then the same START carries it straight into play
            self.reset();
        }
        tick(&mut self.state, input, dt);
        self.flush_best();
        if !was_dead && self.state.phase == GamePhase::Dead {
            log::info!(
                "Run over at {} (best {})",
                pad(self.state.score, 3),
                pad(self.best.value(), 3)
            );
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        draw_scene(&self.state, &self.settings, canvas);
    }

    fn back(&mut self) {
        self.reset();
        self.state.phase = GamePhase::Playing;
        self.state.set_message("PLAY");
        self.state.push_event(GameEvent::Started);
        log::info!("Run restarted from back");
    }
}
