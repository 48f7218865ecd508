//! Game loop driver
//!
//! Owns the authoritative `GameState`, buffers intents between ticks and
//! turns animation-frame callbacks into simulation ticks.

use crate::config::{PowerUpLevels, TimingMode, TimingTuning, Tuning};
use crate::error::ConfigError;
use crate::sim::entities::reset_player;
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::{TickInput, tick};

/// Seed step between consecutive runs
const RUN_SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// Decides how many ticks an animation frame is worth
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    mode: TimingMode,
    interval_ms: f64,
    max_substeps: u32,
    last_frame_time: Option<f64>,
    accumulator: f64,
}

impl FrameThrottle {
    pub fn new(timing: &TimingTuning, interval_ms: f64) -> Self {
        Self {
            mode: timing.mode,
            interval_ms,
            max_substeps: timing.max_substeps.max(1),
            last_frame_time: None,
            accumulator: 0.0,
        }
    }

    /// Forget frame history (new run)
    pub fn reset(&mut self) {
        self.last_frame_time = None;
        self.accumulator = 0.0;
    }

    /// Ticks to run for a frame arriving at `now` (ms)
    pub fn ticks_due(&mut self, now: f64) -> u32 {
        let Some(last) = self.last_frame_time else {
            self.last_frame_time = Some(now);
            return 1;
        };
        let elapsed = (now - last).max(0.0);

        match self.mode {
            TimingMode::FrameLocked => {
                if elapsed < self.interval_ms {
                    return 0;
                }
                // Keep the phase so a steady display rate does not drift
                self.last_frame_time = Some(now - elapsed % self.interval_ms);
                1
            }
            TimingMode::FixedStep => {
                self.last_frame_time = Some(now);
                self.accumulator += elapsed;
                let due = (self.accumulator / self.interval_ms).floor() as u32;
                let ticks = due.min(self.max_substeps);
                self.accumulator -= ticks as f64 * self.interval_ms;
                if due > self.max_substeps {
                    // Drop the backlog rather than spiral
                    self.accumulator = self.accumulator.min(self.interval_ms);
                }
                ticks
            }
        }
    }
}

/// The embeddable game: intents in, state snapshots and events out
#[derive(Debug, Clone)]
pub struct GameDriver {
    tuning: Tuning,
    levels: PowerUpLevels,
    state: GameState,
    input: TickInput,
    throttle: FrameThrottle,
    events: Vec<GameEvent>,
    next_seed: u64,
}

impl GameDriver {
    /// Validate tuning and build an idle driver
    pub fn new(tuning: Tuning, levels: PowerUpLevels, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let throttle = FrameThrottle::new(&tuning.timing, tuning.frame_interval_ms());
        let state = GameState::new(seed, &tuning, levels);
        log::info!(
            "Driver ready (seed {}, {} at {} fps)",
            seed,
            tuning.timing.mode.as_str(),
            tuning.timing.target_fps
        );
        Ok(Self {
            tuning,
            levels,
            state,
            input: TickInput::default(),
            throttle,
            events: Vec::new(),
            next_seed: seed,
        })
    }

    /// Begin a fresh run at `now` (ms)
    pub fn start(&mut self, now: f64) {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(RUN_SEED_STEP);

        let player = reset_player(&self.state.player, &self.tuning, self.levels, now);
        let mut state = GameState::new(seed, &self.tuning, self.levels);
        state.player = player;
        state.is_game_running = true;
        self.state = state;

        self.input = TickInput::default();
        self.throttle.reset();
        self.events.clear();
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started (seed {})", seed);
    }

    /// Request a jump on the next tick (ignored while airborne)
    pub fn jump(&mut self) {
        if self.state.is_active() {
            self.input.jump = true;
        }
    }

    /// Queue a volley for the next tick (dropped there once ammo runs out)
    pub fn shoot(&mut self) {
        if self.state.is_active() {
            self.input.shots = self.input.shots.saturating_add(1);
        }
    }

    /// Animation-frame callback; returns the number of ticks executed
    pub fn on_animation_frame(&mut self, now: f64) -> u32 {
        if !self.state.is_active() {
            return 0;
        }
        let due = self.throttle.ticks_due(now);
        let mut ran = 0;
        for _ in 0..due {
            if !self.state.is_active() {
                break;
            }
            self.tick(now);
            ran += 1;
        }
        ran
    }

    /// Run exactly one tick, bypassing the throttle
    pub fn tick(&mut self, now: f64) {
        if !self.state.is_active() {
            return;
        }
        tick(&mut self.state, &self.input, &self.tuning, now);
        self.input = TickInput::default();
        self.events.append(&mut self.state.events);
    }

    /// Shop tiers for the next run
    pub fn set_power_up_levels(&mut self, levels: PowerUpLevels) {
        if self.state.is_active() {
            log::warn!("Power-up levels changed mid-run; they apply from the next start");
        }
        self.levels = levels;
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Renderer snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }

    /// HUD distance in whole meters
    pub fn distance_meters(&self) -> u64 {
        self.state.meters()
    }

    /// HUD ammo: current, capacity, infinite
    pub fn ammo_display(&self) -> (u32, u32, bool) {
        let p = &self.state.player;
        (p.rice_rocket_ammo, p.max_rice_rocket_ammo, p.has_infinite_ammo())
    }

    pub fn is_running(&self) -> bool {
        self.state.is_game_running
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over
    }
}
