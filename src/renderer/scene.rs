//! Scene drawing
//!
//! Everything is boxes and strokes in the handheld's single ink color. Blink
//! and shake read the session's `elapsed` clock, so a frame is fully derived
//! from simulation state.

use glam::Vec2;

use super::canvas::{Canvas, Rgba};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, Shard};

const INK: Rgba = [0.078, 0.125, 0.086, 1.0];
const INK_HIGH_CONTRAST: Rgba = [0.0, 0.0, 0.0, 1.0];
const INK_FAINT: Rgba = [0.078, 0.125, 0.086, 0.35];
const BACKDROP: Rgba = [0.0, 0.0, 0.0, 0.06];
const BONUS_DIM: Rgba = [0.0, 0.0, 0.0, 0.12];
const OVERLAY: Rgba = [1.0, 1.0, 1.0, 0.30];

/// Blink period for the bonus (seconds per phase)
const BONUS_BLINK: f32 = 0.12;
/// Blink period for the invulnerable ship
const SHIP_BLINK: f32 = 0.1;
/// Peak shake displacement in pixels
const SHAKE_AMPLITUDE: f32 = 2.0;

/// True during the "on" half of a blink with the given phase length
#[inline]
pub fn blink_on(elapsed: f32, period: f32) -> bool {
    (elapsed / period) as i64 % 2 == 0
}

/// Camera offset while the screen is shaking
pub fn shake_offset(state: &GameState, settings: &Settings) -> Vec2 {
    let shake = state.resources.shake;
    if shake <= 0.0 || !settings.effective_screen_shake() {
        return Vec2::ZERO;
    }
    let amp = SHAKE_AMPLITUDE * (shake / HIT_SHAKE).min(1.0);
    let t = state.elapsed;
    Vec2::new((t * 91.0).sin() * amp, (t * 57.0).cos() * amp)
}

/// Draw the full frame
pub fn draw_scene(state: &GameState, settings: &Settings, canvas: &mut dyn Canvas) {
    let ink = if settings.high_contrast {
        INK_HIGH_CONTRAST
    } else {
        INK
    };
    let flicker = settings.effective_flicker();
    let o = shake_offset(state, settings);

    canvas.clear();
    canvas.fill_rect(0.0, 0.0, PLAY_WIDTH, PLAY_HEIGHT, BACKDROP);

    // Walls: two slabs either side of the gap
    for wall in state.walls.iter().filter(|w| w.alive) {
        let right = wall.gap_x + wall.gap_w;
        canvas.fill_rect(o.x, wall.y + o.y, wall.gap_x, WALL_HEIGHT, ink);
        canvas.fill_rect(right + o.x, wall.y + o.y, PLAY_WIDTH - right, WALL_HEIGHT, ink);
    }

    for meteor in state.meteors.iter().filter(|m| m.alive) {
        let p = meteor.pos + o;
        let r = meteor.radius;
        canvas.fill_rect(p.x - r, p.y - r, r * 2.0, r * 2.0, ink);
        if meteor.hp > 1 {
            canvas.stroke_rect(p.x - r - 2.0, p.y - r - 2.0, r * 2.0 + 4.0, r * 2.0 + 4.0, 1.0, ink);
        }
    }

    let half = Shard::half_extents();
    for shard in state.shards.iter().filter(|s| s.alive) {
        let p = shard.pos + o;
        canvas.fill_rect(p.x - half.x, p.y - half.y, SHARD_WIDTH, SHARD_HEIGHT, ink);
    }

    for drone in state.drones.iter().filter(|d| d.alive) {
        let p = drone.pos + o;
        let r = DRONE_RADIUS;
        canvas.stroke_rect(p.x - r, p.y - r, r * 2.0, r * 2.0, 2.0, ink);
        canvas.fill_rect(p.x - 2.0, p.y - 2.0, 4.0, 4.0, ink);
    }

    for shot in state.shots.iter().filter(|s| s.alive) {
        let p = shot.pos + o;
        canvas.fill_rect(p.x - 1.0, p.y - 2.0, 2.0, 4.0, ink);
    }

    if let Some(bonus) = &state.bonus {
        let p = bonus.pos + o;
        let lit = !flicker || blink_on(state.elapsed, BONUS_BLINK);
        let r = BONUS_RADIUS - 1.0;
        canvas.fill_rect(p.x - r, p.y - r, r * 2.0, r * 2.0, if lit { ink } else { BONUS_DIM });
        canvas.fill_text(bonus.kind.glyph(), p.x, p.y, 8.0, OVERLAY);
    }

    // Ship, blinking while invulnerable, with the shield box around it
    let ship = state.ship.pos + o;
    let r = state.ship.radius;
    let invulnerable = state.resources.is_invulnerable();
    let faded = invulnerable && flicker && blink_on(state.elapsed, SHIP_BLINK);
    canvas.fill_rect(ship.x - r, ship.y - r, r * 2.0, r * 2.0, if faded { INK_FAINT } else { ink });
    if invulnerable {
        canvas.stroke_rect(ship.x - 10.0, ship.y - 10.0, 20.0, 20.0, 2.0, ink);
    }

    if let Some(label) = state.phase.overlay_label() {
        canvas.fill_rect(0.0, 0.0, PLAY_WIDTH, PLAY_HEIGHT, OVERLAY);
        canvas.fill_text(label, PLAY_WIDTH / 2.0, PLAY_HEIGHT / 2.0, 18.0, ink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::canvas::{DrawCmd, DrawList};
    use crate::sim::{GamePhase, Meteor};

    fn draw(state: &GameState, settings: &Settings) -> DrawList {
        let mut list = DrawList::new();
        draw_scene(state, settings, &mut list);
        list
    }

    #[test]
    fn test_overlay_labels_by_phase() {
        let mut state = GameState::with_seed(0, 1);
        let settings = Settings::default();
        assert!(draw(&state, &settings).texts().any(|t| t == "PRESS START"));

        state.phase = GamePhase::Paused;
        assert!(draw(&state, &settings).texts().any(|t| t == "PAUSE"));

        state.phase = GamePhase::Dead;
        assert!(draw(&state, &settings).texts().any(|t| t == "GAME OVER"));

        state.phase = GamePhase::Playing;
        assert_eq!(draw(&state, &settings).texts().count(), 0);
    }

    #[test]
    fn test_first_command_clears() {
        let state = GameState::with_seed(0, 1);
        let list = draw(&state, &Settings::default());
        assert_eq!(list.commands[0], DrawCmd::Clear);
    }

    #[test]
    fn test_dead_meteors_not_drawn() {
        let mut state = GameState::with_seed(0, 1);
        state.phase = GamePhase::Playing;
        let base = draw(&state, &Settings::default()).len();
        state
            .meteors
            .push(Meteor::new(1, Vec2::new(50.0, 50.0), Vec2::ZERO, 8.0));
        assert_eq!(draw(&state, &Settings::default()).len(), base + 1);
        state.meteors[0].alive = false;
        assert_eq!(draw(&state, &Settings::default()).len(), base);
    }

    #[test]
    fn test_shield_box_while_invulnerable() {
        let mut state = GameState::with_seed(0, 1);
        state.phase = GamePhase::Playing;
        state.resources.invulnerable = 0.5;
        let list = draw(&state, &Settings::default());
        assert!(list.commands.iter().any(|c| matches!(
            c,
            DrawCmd::StrokeRect { w, .. } if *w == 20.0
        )));
    }

    #[test]
    fn test_shake_respects_settings() {
        let mut state = GameState::with_seed(0, 1);
        state.resources.shake = HIT_SHAKE;
        state.elapsed = 0.37;
        assert_ne!(shake_offset(&state, &Settings::default()), Vec2::ZERO);
        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(shake_offset(&state, &calm), Vec2::ZERO);
    }

    #[test]
    fn test_blink_alternates() {
        assert!(blink_on(0.05, 0.1));
        assert!(!blink_on(0.15, 0.1));
        assert!(blink_on(0.25, 0.1));
    }
}
