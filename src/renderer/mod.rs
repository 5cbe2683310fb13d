//! Rendering adapter
//!
//! The raster surface is external; the cartridge only issues draw primitives
//! through the `Canvas` trait.

pub mod canvas;
pub mod hud;
pub mod scene;

pub use canvas::{Canvas, DrawCmd, DrawList, Rgba};
pub use hud::{hud_left, hud_right};
pub use scene::draw_scene;
