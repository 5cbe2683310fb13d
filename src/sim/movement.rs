//! Movement integration
//!
//! Straight-line motion for most entities, edge bounce for drifting rocks,
//! and damped pursuit for drones.

use glam::Vec2;

use super::state::{GameState, Ship};
use crate::consts::*;

/// Move the ship along the input direction and keep it on screen
pub fn steer_ship(ship: &mut Ship, direction: Vec2, dt: f32) {
    ship.pos += direction * SHIP_SPEED * dt;
    ship.pos.x = ship.pos.x.clamp(SHIP_MARGIN_X, PLAY_WIDTH - SHIP_MARGIN_X);
    ship.pos.y = ship
        .pos
        .y
        .clamp(SHIP_MARGIN_TOP, PLAY_HEIGHT - SHIP_MARGIN_BOTTOM);
}

/// Flip horizontal velocity at the side bounds, only when heading outward
#[inline]
fn bounce_x(pos: Vec2, vel: &mut Vec2, half_width: f32) {
    if (pos.x < half_width && vel.x < 0.0) || (pos.x > PLAY_WIDTH - half_width && vel.x > 0.0) {
        vel.x = -vel.x;
    }
}

/// Horizontal acceleration a drone at `drone_x` applies toward `target_x`
#[inline]
pub fn drone_steering(drone_x: f32, target_x: f32) -> f32 {
    ((target_x - drone_x) * DRONE_STEER_GAIN).clamp(-DRONE_STEER, DRONE_STEER)
}

/// Advance every entity by `dt`
pub fn integrate(state: &mut GameState, dt: f32) {
    for meteor in state.meteors.iter_mut().filter(|m| m.alive) {
        meteor.pos += meteor.vel * dt;
        bounce_x(meteor.pos, &mut meteor.vel, meteor.radius);
    }

    let shard_half = SHARD_WIDTH / 2.0;
    for shard in state.shards.iter_mut().filter(|s| s.alive) {
        shard.pos += shard.vel * dt;
        bounce_x(shard.pos, &mut shard.vel, shard_half);
    }

    let target_x = state.ship.pos.x;
    let damping = (1.0 - DRONE_DAMPING * dt).max(0.0);
    for drone in state.drones.iter_mut().filter(|d| d.alive) {
        drone.vel.x += drone_steering(drone.pos.x, target_x) * dt;
        drone.vel.x *= damping;
        drone.pos += drone.vel * dt;
    }

    for shot in state.shots.iter_mut().filter(|s| s.alive) {
        shot.pos += shot.vel * dt;
    }

    for wall in state.walls.iter_mut().filter(|w| w.alive) {
        wall.y += wall.vel_y * dt;
    }

    if let Some(bonus) = state.bonus.as_mut() {
        bonus.pos += bonus.vel * dt;
        bonus.ttl = (bonus.ttl - dt).max(0.0);
    }
}
