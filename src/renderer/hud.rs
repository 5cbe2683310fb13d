//! HUD text
//!
//! Left: `SC 000  WV 00  EN 000`. Right: `BEST 000`.

use crate::pad;
use crate::sim::GameState;

pub fn hud_left(state: &GameState) -> String {
    format!(
        "SC {}  WV {}  EN {}",
        pad(state.score, 3),
        pad(state.wave, 2),
        pad(state.resources.energy.floor() as u32, 3)
    )
}

pub fn hud_right(state: &GameState) -> String {
    format!("BEST {}", pad(state.best, 3))
}
