//! Sushi Dash native entry point
//!
//! Runs a headless autopilot game and prints a JSON summary. The browser
//! build enters through `sushi_dash::web` instead.
//!
//! Usage: `sushi-dash [tuning.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;
    use sushi_dash::sim::{GameEvent, GameState, Rect};
    use sushi_dash::{GameDriver, PowerUpLevels, Tuning};

    /// Hard stop so a perfect autopilot still terminates
    const MAX_TICKS: u64 = 200_000;
    /// Hazards closer than this (px ahead of the player) trigger a jump
    const JUMP_LOOKAHEAD: f32 = 70.0;

    #[derive(Debug, Default, Serialize)]
    struct RunSummary {
        seed: u64,
        ticks: u64,
        meters: u64,
        game_over: bool,
        jumps: u32,
        rockets_fired: u32,
        enemies_defeated: u32,
        power_ups_collected: u32,
        shield_blocks: u32,
    }

    impl RunSummary {
        fn record(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Jumped => self.jumps += 1,
                GameEvent::Shot { rockets } => self.rockets_fired += rockets,
                GameEvent::EnemyDefeated { .. } => self.enemies_defeated += 1,
                GameEvent::PowerUpCollected(_) => self.power_ups_collected += 1,
                GameEvent::ShieldAbsorbed => self.shield_blocks += 1,
                _ => {}
            }
        }
    }

    fn ahead_within(player: &Rect, rect: &Rect, range: f32) -> bool {
        let gap = rect.x - player.right();
        (-rect.width..=range).contains(&gap)
    }

    fn hazard_ahead(state: &GameState) -> bool {
        let p = &state.player.rect;
        state.sushis.iter().any(|s| ahead_within(p, &s.rect, JUMP_LOOKAHEAD))
            || state
                .enemies
                .iter()
                .any(|e| ahead_within(p, &e.rect, JUMP_LOOKAHEAD))
            || state
                .samurai_bullets
                .iter()
                .any(|b| ahead_within(p, &b.rect, JUMP_LOOKAHEAD))
    }

    fn target_ahead(state: &GameState, width: f32) -> bool {
        let p = &state.player.rect;
        state
            .enemies
            .iter()
            .any(|e| e.rect.x > p.right() && e.rect.x < width)
    }

    fn load_tuning(path: Option<&String>) -> Result<Tuning, Box<dyn std::error::Error>> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                Ok(Tuning::from_json(&json)?)
            }
            None => Ok(Tuning::default()),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let tuning = load_tuning(args.first())?;
        let seed = match args.get(1) {
            Some(s) => s.parse::<u64>()?,
            None => 42,
        };

        let interval = tuning.frame_interval_ms();
        let width = tuning.canvas.width;
        let mut driver = GameDriver::new(tuning, PowerUpLevels::default(), seed)?;
        let mut summary = RunSummary {
            seed,
            ..Default::default()
        };

        driver.start(0.0);
        let mut now = 0.0;
        while driver.is_running() && summary.ticks < MAX_TICKS {
            let state = driver.state();
            let jump = state.player.is_grounded() && hazard_ahead(state);
            let shoot = target_ahead(state, width);
            if jump {
                driver.jump();
            }
            if shoot {
                driver.shoot();
            }
            summary.ticks += u64::from(driver.on_animation_frame(now));
            for event in driver.drain_events() {
                summary.record(&event);
            }
            now += interval;
        }

        summary.meters = driver.distance_meters();
        summary.game_over = driver.is_game_over();
        log::info!(
            "Run finished after {} ticks at {} m",
            summary.ticks,
            summary.meters
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sushi Dash (native) starting...");
    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is sushi_dash::web::wasm_start
}
