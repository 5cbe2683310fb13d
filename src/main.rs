//! Galattica native entry point
//!
//! Runs the cartridge headless with a simple autopilot at a fixed timestep,
//! logging the HUD once per second. The best score persists to a JSON file.
//!
//! Usage: `galattica [seconds]`
//! - `GALATTICA_STORE`: best-score file (default `galattica_best.json`)
//! - `GALATTICA_SETTINGS`: optional settings JSON
//! - `RUST_LOG`: log filter (default `info`)

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use galattica::consts::*;
    use galattica::persistence::JsonFileStore;
    use galattica::renderer::DrawList;
    use galattica::sim::{GameEvent, GamePhase, GameState, TickInput};
    use galattica::{Cartridge, Galattica, Settings, StoreError};

    /// Wall-clock frame time the driver pretends to render at
    const FRAME_DT: f32 = 1.0 / 50.0;
    /// Hazards closer than this (vertically above the ship) are dodged
    const LOOKAHEAD: f32 = 70.0;

    /// Crude pilot: shield when something is about to land, sidestep the
    /// nearest threat, line up on wall gaps, and fire at whatever is overhead.
    fn autopilot(state: &GameState, frame: u64) -> TickInput {
        let ship = state.ship.pos;
        let mut input = TickInput::default();

        let threats = state
            .meteors
            .iter()
            .map(|m| (m.pos, m.radius))
            .chain(state.drones.iter().map(|d| (d.pos, DRONE_RADIUS)))
            .chain(state.shards.iter().map(|s| (s.pos, SHARD_WIDTH / 2.0)))
            .filter(|(pos, _)| pos.y < ship.y && ship.y - pos.y < LOOKAHEAD);

        let nearest = threats.min_by(|a, b| {
            a.0.distance_squared(ship)
                .total_cmp(&b.0.distance_squared(ship))
        });

        let mut target_x = PLAY_WIDTH / 2.0;
        if let Some(wall) = state.walls.iter().find(|w| w.y < ship.y) {
            target_x = wall.gap_x + wall.gap_w / 2.0;
        } else if let Some(bonus) = &state.bonus {
            target_x = bonus.pos.x;
        }
        if let Some((pos, radius)) = nearest {
            let side = if pos.x > ship.x { -1.0 } else { 1.0 };
            target_x = ship.x + side * (radius + SHIP_RADIUS + 8.0);
            let close = ship.distance(pos) < radius + SHIP_RADIUS + 10.0;
            input.a_held = close && state.resources.energy > 20.0;
        }

        input.left = target_x < ship.x - 2.0;
        input.right = target_x > ship.x + 2.0;
        input.b_pressed = frame % 8 == 0 && state.resources.energy > 40.0 && overhead(state, ship);
        input
    }

    fn overhead(state: &GameState, ship: Vec2) -> bool {
        state
            .meteors
            .iter()
            .map(|m| m.pos)
            .chain(state.drones.iter().map(|d| d.pos))
            .any(|pos| pos.y < ship.y && (pos.x - ship.x).abs() < 14.0)
    }

    pub fn run() -> Result<(), StoreError> {
        let seconds: f32 = std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(30.0);
        let store_path =
            std::env::var("GALATTICA_STORE").unwrap_or_else(|_| "galattica_best.json".to_string());
        let settings = std::env::var("GALATTICA_SETTINGS")
            .map(Settings::load_from)
            .unwrap_or_default();

        let store = JsonFileStore::open(&store_path)?;
        log::info!("Best score file: {}", store.path().display());
        let mut cart = Galattica::with_settings(store, settings);

        let mut accumulator = 0.0;
        let mut frame: u64 = 0;
        let mut clock = 0.0;
        let mut next_report = 0.0;
        let mut canvas = DrawList::new();

        cart.update(
            0.0,
            &TickInput {
                start_pressed: true,
                ..Default::default()
            },
        );

        while clock < seconds {
            let dt = FRAME_DT.min(0.1);
            accumulator += dt;
            clock += dt;

            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = autopilot(cart.state(), frame);
                cart.update(SIM_DT, &input);
                accumulator -= SIM_DT;
                substeps += 1;
            }
            frame += 1;

            for event in cart.drain_events() {
                match event {
                    GameEvent::WaveChanged { wave } => log::info!("wave {}", wave),
                    GameEvent::BonusCollected { kind } => log::info!("bonus {:?}", kind),
                    GameEvent::Hit { kind } => log::debug!("hit by {}", kind.as_str()),
                    _ => log::trace!("{:?}", event),
                }
            }

            cart.render(&mut canvas);

            if clock >= next_report {
                let (left, right) = cart.hud();
                log::info!(
                    "{}  {}  [{} hazards, {} draws] {}",
                    left,
                    right,
                    cart.state().hazard_count(),
                    canvas.len(),
                    cart.state().message
                );
                next_report += 1.0;
            }

            if cart.state().phase == GamePhase::Dead {
                break;
            }
        }

        let (left, right) = cart.hud();
        log::info!("Final: {}  {}", left, right);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Galattica (native) starting...");

    if let Err(e) = demo::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is galattica::web::start, this is just to satisfy the compiler
}
