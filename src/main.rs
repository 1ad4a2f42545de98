//! Flappy Cone entry point
//!
//! Native builds run a headless autopilot session and log what happens.
//! The browser build is driven through `flappy_cone::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{path}: {e}");
                std::process::exit(1);
            }
        },
        None => flappy_cone::Tuning::default(),
    };

    let mut game = match flappy_cone::Game::new(tuning) {
        Ok(game) => game,
        Err(e) => {
            log::error!("refusing to start: {e}");
            std::process::exit(1);
        }
    };

    log::info!("Flappy Cone (native autopilot) starting...");
    let summary = autopilot::run_session(&mut game, 120.0);
    println!(
        "runs: {}  best: {}  total: {}",
        summary.runs, summary.best, summary.total
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<flappy_cone::Tuning, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    flappy_cone::Tuning::from_json(&json).map_err(|e| e.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use flappy_cone::{Game, GameEvent, GamePhase};

    /// Frame rate the autopilot drives the game at
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// How far below the target the actor may sink before tapping
    const TAP_MARGIN: f32 = 30.0;

    #[derive(Debug, Default)]
    pub struct Summary {
        pub runs: u32,
        pub best: u32,
        pub total: u32,
    }

    /// Play for `seconds` of simulated time, restarting after each crash
    pub fn run_session(game: &mut Game, seconds: f32) -> Summary {
        let mut summary = Summary::default();
        let frames = (seconds / FRAME_DT).round() as u32;

        for _ in 0..frames {
            if should_tap(game) {
                game.activate();
            }
            game.tick(FRAME_DT);

            for event in game.drain_events() {
                match event {
                    GameEvent::Started => summary.runs += 1,
                    GameEvent::GameOver { score } => {
                        summary.best = summary.best.max(score);
                        summary.total += score;
                        log::info!("crashed with {score}");
                    }
                    GameEvent::Scored { score } => log::debug!("score {score}"),
                    GameEvent::Jumped => {}
                    other => log::trace!("{other:?}"),
                }
            }
        }
        summary
    }

    /// Tap when sinking below the next gap (or the start height)
    fn should_tap(game: &Game) -> bool {
        match game.phase() {
            GamePhase::Idle | GamePhase::GameOver => true,
            GamePhase::Running => {
                let actor = game.actor_position();
                let tuning = game.tuning();
                let reach = tuning.obstacle_width / 2.0 + tuning.actor_radius;
                let target = game
                    .obstacle_list()
                    .iter()
                    .find(|p| p.x + reach >= actor.x)
                    .map(|p| p.gap_center)
                    .unwrap_or(tuning.actor_start_y);
                let falling = game.run().actor.vel.y < 0.0;
                falling && actor.y < target - TAP_MARGIN
            }
        }
    }
}
