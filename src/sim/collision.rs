//! Collision detection and hazard resolution
//!
//! Hit tests are ad-hoc per geometry: circle-circle for rocks, drones, shots,
//! and the bonus; an inflated box for shards; a band/gap test for walls. All
//! circle tests compare squared distances.
//!
//! Shots stop at the first target they hit. Ship hits are resolved per hazard
//! kind, so overlapping hazards of different kinds each land a penalty in the
//! same tick.

use glam::Vec2;
use rand::Rng;

use super::resources::HitSeverity;
use super::spawn::spawn_debris;
use super::state::{GameEvent, GameState, HazardKind, Shard, Ship, Wall};
use crate::consts::*;
use crate::dist_sq;

/// Circle-circle overlap
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    dist_sq(a, b) < reach * reach
}

/// Circle against an axis-aligned box, approximated by inflating the box by
/// the circle radius on every side
#[inline]
pub fn circle_box_overlap(center: Vec2, radius: f32, box_center: Vec2, half: Vec2) -> bool {
    let d = (center - box_center).abs();
    d.x < half.x + radius && d.y < half.y + radius
}

/// Ship's vertical extent overlaps the wall band
#[inline]
pub fn ship_in_band(ship: &Ship, wall: &Wall) -> bool {
    ship.pos.y + ship.radius > wall.y && ship.pos.y - ship.radius < wall.bottom()
}

/// Run every collision rule for this tick
pub fn resolve(state: &mut GameState) {
    resolve_shots(state);
    resolve_ship_hits(state);
    resolve_walls(state);
    resolve_near_misses(state);
    resolve_bonus(state);
}

/// Shots against meteors, then drones. One target per shot.
fn resolve_shots(state: &mut GameState) {
    let mut reward = 0;
    let mut splits: Vec<Vec2> = Vec::new();
    let mut kills: Vec<HazardKind> = Vec::new();

    for shot in state.shots.iter_mut().filter(|s| s.alive) {
        for meteor in state.meteors.iter_mut().filter(|m| m.alive) {
            if !circles_overlap(shot.pos, SHOT_RADIUS, meteor.pos, meteor.radius) {
                continue;
            }
            shot.alive = false;
            meteor.hp = meteor.hp.saturating_sub(1);
            if meteor.hp == 0 {
                meteor.alive = false;
                reward += METEOR_REWARD;
                kills.push(HazardKind::Meteor);
                if meteor.is_large() {
                    splits.push(meteor.pos);
                }
            }
            break;
        }
        if !shot.alive {
            continue;
        }

        for drone in state.drones.iter_mut().filter(|d| d.alive) {
            if !circles_overlap(shot.pos, SHOT_RADIUS, drone.pos, DRONE_RADIUS) {
                continue;
            }
            shot.alive = false;
            drone.hp = drone.hp.saturating_sub(1);
            if drone.hp == 0 {
                drone.alive = false;
                reward += DRONE_REWARD;
                kills.push(HazardKind::Drone);
            }
            break;
        }
    }

    for origin in splits {
        if state.rng.random_bool(METEOR_SPLIT_CHANCE) {
            spawn_debris(state, origin);
        }
    }
    for kind in kills {
        let reward = match kind {
            HazardKind::Drone => DRONE_REWARD,
            _ => METEOR_REWARD,
        };
        state.push_event(GameEvent::Destroyed { kind, reward });
    }
    state.add_score(reward);
}

/// First overlapping meteor, drone, and shard each land a hit
fn resolve_ship_hits(state: &mut GameState) {
    let ship = state.ship;

    let meteor_hit = state
        .meteors
        .iter()
        .position(|m| m.alive && circles_overlap(ship.pos, ship.radius, m.pos, m.radius));
    if let Some(i) = meteor_hit {
        let meteor = &mut state.meteors[i];
        meteor.pos.y -= METEOR_HIT_NUDGE;
        meteor.grazed = true;
        hit_ship(state, HazardKind::Meteor);
    }

    let drone_hit = state
        .drones
        .iter()
        .position(|d| d.alive && circles_overlap(ship.pos, ship.radius, d.pos, DRONE_RADIUS));
    if let Some(i) = drone_hit {
        state.drones[i].grazed = true;
        hit_ship(state, HazardKind::Drone);
    }

    let half = Shard::half_extents();
    let shard_hit = state
        .shards
        .iter()
        .position(|s| s.alive && circle_box_overlap(ship.pos, ship.radius, s.pos, half));
    if let Some(i) = shard_hit {
        state.shards[i].grazed = true;
        hit_ship(state, HazardKind::Shard);
    }
}

/// Walls hit the ship on every tick it sits in a band outside the gap (one
/// wall per tick), and pay out once when they move past the ship
fn resolve_walls(state: &mut GameState) {
    let ship = state.ship;
    let mut struck = false;
    let mut cleared: Vec<u32> = Vec::new();

    for wall in state.walls.iter_mut().filter(|w| w.alive) {
        if !struck && ship_in_band(&ship, wall) && !wall.admits(ship.pos.x, ship.radius) {
            struck = true;
        }
        if !wall.scored && wall.y > ship.pos.y + ship.radius {
            wall.scored = true;
            cleared.push(wall.id);
        }
    }

    if struck {
        hit_ship(state, HazardKind::Wall);
    }
    for id in cleared {
        state.add_score(WALL_REWARD);
        state.push_event(GameEvent::WallCleared { id });
        state.set_message(format!("WALL +{}", WALL_REWARD));
    }
}

/// One-time reward for hazards that pass close without touching
fn resolve_near_misses(state: &mut GameState) {
    let ship = state.ship;
    let mut grazes: Vec<(HazardKind, u32, u32)> = Vec::new();

    for meteor in state.meteors.iter_mut().filter(|m| m.alive && !m.grazed) {
        if !circles_overlap(ship.pos, ship.radius, meteor.pos, meteor.radius)
            && circles_overlap(ship.pos, ship.radius + METEOR_GRAZE, meteor.pos, meteor.radius)
        {
            meteor.grazed = true;
            grazes.push((HazardKind::Meteor, meteor.id, METEOR_GRAZE_REWARD));
        }
    }

    let half = Shard::half_extents();
    for shard in state.shards.iter_mut().filter(|s| s.alive && !s.grazed) {
        if !circle_box_overlap(ship.pos, ship.radius, shard.pos, half)
            && circle_box_overlap(ship.pos, ship.radius + SHARD_GRAZE, shard.pos, half)
        {
            shard.grazed = true;
            grazes.push((HazardKind::Shard, shard.id, SHARD_GRAZE_REWARD));
        }
    }

    for drone in state.drones.iter_mut().filter(|d| d.alive && !d.grazed) {
        if !circles_overlap(ship.pos, ship.radius, drone.pos, DRONE_RADIUS)
            && circles_overlap(ship.pos, ship.radius + DRONE_GRAZE, drone.pos, DRONE_RADIUS)
        {
            drone.grazed = true;
            grazes.push((HazardKind::Drone, drone.id, DRONE_GRAZE_REWARD));
        }
    }

    for (kind, id, reward) in grazes {
        state.add_score(reward);
        state.push_event(GameEvent::NearMiss { kind, id, reward });
    }
}

fn resolve_bonus(state: &mut GameState) {
    let Some(bonus) = state.bonus else {
        return;
    };
    if !circles_overlap(state.ship.pos, state.ship.radius, bonus.pos, BONUS_RADIUS) {
        return;
    }
    state.bonus = None;
    let message = bonus.kind.apply(state);
    log::debug!("bonus {:?} collected", bonus.kind);
    state.set_message(message);
    state.push_event(GameEvent::BonusCollected { kind: bonus.kind });
}

/// Charge the ship for a collision with `kind`
fn hit_ship(state: &mut GameState, kind: HazardKind) {
    let severity = state.resources.take_hit();
    let penalty = severity.penalty() as u32;
    match severity {
        HitSeverity::Hard => {
            state.set_message(format!("HIT! {} -{}", kind.as_str(), penalty));
            state.push_event(GameEvent::Hit { kind });
        }
        HitSeverity::Scrape => {
            state.set_message(format!("SCRAPE {} -{}", kind.as_str(), penalty));
            state.push_event(GameEvent::Scraped { kind });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::SpawnTimers;
    use crate::sim::state::{Bonus, BonusKind, Drone, Meteor, Shot};

    fn fixture() -> GameState {
        let mut state = GameState::with_seed(0, 7);
        state.timers = SpawnTimers::idle();
        state.ship.pos = Vec2::new(128.0, 200.0);
        state
    }

    fn shot_at(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        state.shots.push(Shot {
            id,
            pos,
            vel: Vec2::ZERO,
            alive: true,
        });
    }

    fn wall(id: u32, y: f32, gap_x: f32, gap_w: f32) -> Wall {
        Wall {
            id,
            y,
            gap_x,
            gap_w,
            vel_y: 0.0,
            scored: false,
            alive: true,
        }
    }

    #[test]
    fn test_circle_tests() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        let half = Shard::half_extents();
        assert!(circle_box_overlap(Vec2::new(11.0, 0.0), 6.0, Vec2::ZERO, half));
        assert!(!circle_box_overlap(Vec2::new(12.0, 0.0), 6.0, Vec2::ZERO, half));
        assert!(circle_box_overlap(Vec2::new(0.0, 6.5), 6.0, Vec2::ZERO, half));
        assert!(!circle_box_overlap(Vec2::new(0.0, 7.0), 6.0, Vec2::ZERO, half));
    }

    #[test]
    fn test_armored_meteor_needs_two_hits() {
        let mut state = fixture();
        state
            .meteors
            .push(Meteor::new(100, Vec2::new(60.0, 60.0), Vec2::ZERO, 14.0));
        shot_at(&mut state, Vec2::new(60.0, 60.0));
        resolve(&mut state);
        assert!(state.meteors[0].alive);
        assert_eq!(state.meteors[0].hp, 1);
        assert_eq!(state.score, 0);
        assert!(!state.shots[0].alive);

        shot_at(&mut state, Vec2::new(60.0, 60.0));
        resolve(&mut state);
        assert!(!state.meteors[0].alive);
        assert_eq!(state.score, METEOR_REWARD);
    }

    #[test]
    fn test_shot_hits_only_one_target() {
        let mut state = fixture();
        state
            .meteors
            .push(Meteor::new(100, Vec2::new(60.0, 60.0), Vec2::ZERO, 8.0));
        state
            .meteors
            .push(Meteor::new(101, Vec2::new(62.0, 60.0), Vec2::ZERO, 8.0));
        shot_at(&mut state, Vec2::new(61.0, 60.0));
        resolve(&mut state);
        assert_eq!(state.meteors.iter().filter(|m| !m.alive).count(), 1);
        assert_eq!(state.score, METEOR_REWARD);
    }

    #[test]
    fn test_drone_kill_rewards() {
        let mut state = fixture();
        state
            .drones
            .push(Drone::new(100, Vec2::new(60.0, 60.0), Vec2::ZERO));
        shot_at(&mut state, Vec2::new(60.0, 60.0));
        shot_at(&mut state, Vec2::new(60.0, 60.0));
        resolve(&mut state);
        assert!(!state.drones[0].alive);
        assert_eq!(state.score, DRONE_REWARD);
        assert!(state
            .events
            .contains(&GameEvent::Destroyed { kind: HazardKind::Drone, reward: DRONE_REWARD }));
    }

    #[test]
    fn test_shots_pass_through_shards() {
        let mut state = fixture();
        let id = state.next_entity_id();
        state.shards.push(Shard::new(id, Vec2::new(60.0, 60.0), Vec2::ZERO));
        shot_at(&mut state, Vec2::new(60.0, 60.0));
        resolve(&mut state);
        assert!(state.shots[0].alive);
        assert!(state.shards[0].alive);
    }

    #[test]
    fn test_large_meteors_split_most_of_the_time() {
        let mut state = fixture();
        for i in 0..40 {
            let pos = Vec2::new(20.0 + i as f32 * 5.0, 40.0);
            state.meteors.clear();
            state.shots.clear();
            let mut meteor = Meteor::new(1000 + i, pos, Vec2::ZERO, 15.0);
            meteor.hp = 1;
            state.meteors.push(meteor);
            shot_at(&mut state, pos);
            resolve(&mut state);
        }
        // Debris comes in pairs
        assert_eq!(state.shards.len() % 2, 0);
        let splits = state.shards.len() / 2;
        assert!(splits > 15 && splits < 40, "splits = {}", splits);
    }

    #[test]
    fn test_small_meteor_never_splits() {
        let mut state = fixture();
        state
            .meteors
            .push(Meteor::new(100, Vec2::new(60.0, 60.0), Vec2::ZERO, 10.0));
        shot_at(&mut state, Vec2::new(60.0, 60.0));
        resolve(&mut state);
        assert!(state.shards.is_empty());
    }

    #[test]
    fn test_ship_hit_hard_then_nudged() {
        let mut state = fixture();
        let pos = state.ship.pos + Vec2::new(0.0, -8.0);
        state.meteors.push(Meteor::new(100, pos, Vec2::ZERO, 8.0));
        resolve(&mut state);
        assert_eq!(state.resources.energy, MAX_ENERGY - HARD_PENALTY);
        assert_eq!(state.resources.invulnerable, HIT_PROTECTION);
        assert!(state.meteors[0].pos.y < pos.y);
        assert!(state.events.contains(&GameEvent::Hit { kind: HazardKind::Meteor }));
    }

    #[test]
    fn test_shielded_hit_is_scrape() {
        let mut state = fixture();
        state.resources.invulnerable = SHIELD_WINDOW;
        state
            .drones
            .push(Drone::new(100, state.ship.pos, Vec2::ZERO));
        resolve(&mut state);
        assert_eq!(state.resources.energy, MAX_ENERGY - SCRAPE_PENALTY);
        assert!(state.events.contains(&GameEvent::Scraped { kind: HazardKind::Drone }));
    }

    #[test]
    fn test_one_hit_per_kind_but_kinds_stack() {
        let mut state = fixture();
        let at = state.ship.pos;
        state.meteors.push(Meteor::new(100, at, Vec2::ZERO, 8.0));
        state.meteors.push(Meteor::new(101, at, Vec2::ZERO, 8.0));
        state.drones.push(Drone::new(102, at, Vec2::ZERO));
        state.shards.push(Shard::new(103, at, Vec2::ZERO));
        resolve(&mut state);
        let hits = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Hit { .. } | GameEvent::Scraped { .. }))
            .count();
        assert_eq!(hits, 3);
        assert_eq!(
            state.resources.energy,
            MAX_ENERGY - HARD_PENALTY - 2.0 * SCRAPE_PENALTY
        );
    }

    #[test]
    fn test_wall_gap_pass_scores_once() {
        let mut state = fixture();
        let x = state.ship.pos.x;
        // Ship centered in a gap exactly as wide as it needs, wall in band
        state.walls.push(wall(100, state.ship.pos.y - 2.0, x - 12.0, 24.0));
        resolve(&mut state);
        assert_eq!(state.resources.energy, MAX_ENERGY);
        assert_eq!(state.score, 0);

        // Wall drifts below the ship
        state.walls[0].y = state.ship.pos.y + state.ship.radius + 1.0;
        resolve(&mut state);
        assert_eq!(state.score, WALL_REWARD);
        resolve(&mut state);
        assert_eq!(state.score, WALL_REWARD);
    }

    #[test]
    fn test_wall_outside_gap_hits_every_tick() {
        let mut state = fixture();
        let x = state.ship.pos.x;
        // Gap admits [x + 2, x + 14], ship center sits just left of it
        state.walls.push(wall(100, state.ship.pos.y - 2.0, x - 4.0, 24.0));
        resolve(&mut state);
        assert_eq!(state.resources.energy, MAX_ENERGY - HARD_PENALTY);

        // Still in the band while protected: a scrape
        resolve(&mut state);
        assert_eq!(
            state.resources.energy,
            MAX_ENERGY - HARD_PENALTY - SCRAPE_PENALTY
        );

        // Protection over: a full hit again
        state.resources.invulnerable = 0.0;
        resolve(&mut state);
        assert_eq!(
            state.resources.energy,
            MAX_ENERGY - 2.0 * HARD_PENALTY - SCRAPE_PENALTY
        );
    }

    #[test]
    fn test_wall_that_hit_still_pays_on_pass() {
        let mut state = fixture();
        let x = state.ship.pos.x;
        state.walls.push(wall(100, state.ship.pos.y - 2.0, x - 4.0, 24.0));
        resolve(&mut state);
        assert_eq!(state.score, 0);

        state.walls[0].y = state.ship.pos.y + state.ship.radius + 1.0;
        resolve(&mut state);
        assert_eq!(state.score, WALL_REWARD);
        resolve(&mut state);
        assert_eq!(state.score, WALL_REWARD);
    }

    #[test]
    fn test_one_wall_hit_per_tick() {
        let mut state = fixture();
        let y = state.ship.pos.y - 2.0;
        state.walls.push(wall(100, y, 0.0, 20.0));
        state.walls.push(wall(101, y + 1.0, 0.0, 20.0));
        resolve(&mut state);
        assert_eq!(state.resources.energy, MAX_ENERGY - HARD_PENALTY);
    }

    #[test]
    fn test_wall_out_of_band_is_harmless() {
        let mut state = fixture();
        state.walls.push(wall(100, 40.0, 0.0, 30.0));
        resolve(&mut state);
        assert_eq!(state.resources.energy, MAX_ENERGY);
    }

    #[test]
    fn test_near_miss_awarded_once() {
        let mut state = fixture();
        // 6 (ship) + 8 (meteor) + 3 gap
        let pos = state.ship.pos + Vec2::new(17.0, 0.0);
        state.meteors.push(Meteor::new(100, pos, Vec2::ZERO, 8.0));
        for _ in 0..5 {
            resolve(&mut state);
        }
        assert_eq!(state.score, METEOR_GRAZE_REWARD);
        assert!(state.meteors[0].grazed);

        // Leaving and re-entering the band does not pay again
        state.meteors[0].pos.x += 40.0;
        resolve(&mut state);
        state.meteors[0].pos.x -= 40.0;
        resolve(&mut state);
        assert_eq!(state.score, METEOR_GRAZE_REWARD);
    }

    #[test]
    fn test_near_miss_margins_per_kind() {
        let mut state = fixture();
        let ship = state.ship.pos;
        // Drone margin is 8: gap of 7 counts
        state
            .drones
            .push(Drone::new(100, ship + Vec2::new(6.0 + 6.0 + 7.0, 0.0), Vec2::ZERO));
        // Shard margin is 4: gap of 5 does not
        state
            .shards
            .push(Shard::new(101, ship + Vec2::new(6.0 + 6.0 + 5.0, 0.0), Vec2::ZERO));
        resolve(&mut state);
        assert_eq!(state.score, DRONE_GRAZE_REWARD);
        assert!(state.drones[0].grazed);
        assert!(!state.shards[0].grazed);
    }

    #[test]
    fn test_bonus_pickup_clears_it() {
        let mut state = fixture();
        state.bonus = Some(Bonus {
            id: 100,
            pos: state.ship.pos,
            vel: Vec2::ZERO,
            kind: BonusKind::Score,
            ttl: BONUS_TTL,
        });
        resolve(&mut state);
        assert!(state.bonus.is_none());
        assert_eq!(state.score, BONUS_SCORE);
        assert!(state
            .events
            .contains(&GameEvent::BonusCollected { kind: BonusKind::Score }));
    }
}
