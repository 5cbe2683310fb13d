//! Per-frame simulation tick
//!
//! The session state machine gates everything: nothing moves, spawns, or
//! scores unless the phase is `Playing`.

use glam::Vec2;

use super::collision;
use super::difficulty::Difficulty;
use super::movement;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::pad;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Shield button held
    pub a_held: bool,
    /// START pressed this tick
    pub start_pressed: bool,
    /// Shield button pressed this tick (a tap raises the shield for one tick)
    pub a_pressed: bool,
    /// Fire button pressed this tick
    pub b_pressed: bool,
}

impl TickInput {
    /// Unnormalized movement direction from the d-pad
    pub fn direction(&self) -> Vec2 {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        Vec2::new(x, y)
    }

    pub fn shield(&self) -> bool {
        self.a_held || self.a_pressed
    }
}

/// Non-finite or negative frame times advance nothing
#[inline]
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = sanitize_dt(dt);

    if input.start_pressed {
        handle_start(state);
    }

    // Energy may have been drained outside a tick; this ends a paused run too
    if state.phase != GamePhase::Dead && state.resources.is_depleted() {
        end_run(state);
        return;
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.elapsed += dt;
    let diff = Difficulty::for_wave(state.wave);

    state.resources.update(input.shield(), dt);
    if input.b_pressed && state.resources.try_fire() {
        spawn::spawn_volley(state);
    }

    movement::steer_ship(&mut state.ship, input.direction(), dt);
    spawn::tick_spawners(state, &diff, dt);
    movement::integrate(state, dt);
    collision::resolve(state);

    accrue_survival(state, dt);

    if state.refresh_wave() {
        let wave = state.wave;
        log::info!("Wave {} (score {})", wave, state.score);
        state.set_message(format!("WAVE {} - denser", pad(wave, 2)));
        state.push_event(GameEvent::WaveChanged { wave });
    }

    if state.score > state.best {
        state.best = state.score;
        if !state.best_beaten {
            state.best_beaten = true;
            state.push_event(GameEvent::NewBest { score: state.best });
        }
    }

    if state.resources.is_depleted() {
        end_run(state);
    }

    state.sweep();
}

/// START: begin, pause/resume, or restart after a game over
fn handle_start(state: &mut GameState) {
    match state.phase {
        GamePhase::WaitingStart => {
            state.phase = GamePhase::Playing;
            state.set_message("PLAY");
            state.push_event(GameEvent::Started);
            log::info!("Run started");
        }
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            state.set_message("PAUSE");
            state.push_event(GameEvent::Paused);
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            state.set_message("PLAY");
            state.push_event(GameEvent::Resumed);
        }
        GamePhase::Dead => {
            // The cartridge reloads the stored best before this point
            state.restart();
            state.phase = GamePhase::Playing;
            state.set_message("PLAY");
            state.push_event(GameEvent::Started);
            log::info!("Run restarted");
        }
    }
}

/// Whole survival points for this tick; the fraction carries over
fn accrue_survival(state: &mut GameState, dt: f32) {
    state.survival_carry += SURVIVAL_RATE * dt;
    // Guard against 13.9999 after many small steps
    let whole = (state.survival_carry + 1e-4).floor();
    if whole >= 1.0 {
        state.survival_carry = (state.survival_carry - whole).max(0.0);
        state.add_score(whole as u32);
    }
}

fn end_run(state: &mut GameState) {
    state.phase = GamePhase::Dead;
    state.best = state.best.max(state.score);
    state.set_message("GAME OVER. START to play again");
    state.push_event(GameEvent::Died { score: state.score });
    log::info!("Game over: score {} wave {} best {}", state.score, state.wave, state.best);
}
