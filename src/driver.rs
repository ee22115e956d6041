//! Frame driver
//!
//! Owns the game state and input, and turns variable frame deltas into fixed
//! simulation steps. Renderers call [`Driver::frame`] once per display frame
//! and read [`Driver::snapshot`] afterwards; tests can call
//! [`Driver::step`] directly.

use crate::consts::*;
use crate::input::{InputState, Key};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, apply_upgrade, tick};
use crate::snapshot::Snapshot;

/// Game instance holding all state
#[derive(Debug)]
pub struct Driver {
    pub state: GameState,
    pub input: InputState,
    accumulator: f32,
    max_substeps: u32,
    /// Events from every step run during the last frame
    frame_events: Vec<GameEvent>,
}

impl Driver {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            input: InputState::new(),
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
            frame_events: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut driver = Self::new(settings.resolve_seed());
        driver.max_substeps = settings.max_substeps.max(1);
        driver.input.autopilot = settings.autopilot;
        driver
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Advance by a real frame delta (seconds). Returns the steps run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.frame_events.clear();
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };

        // Level-up and menus are paused; don't bank time while they are up
        if self.state.phase != GamePhase::Playing {
            self.accumulator = 0.0;
            if self.input.confirm_pending() {
                self.step();
            }
            return 0;
        }

        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < self.max_substeps {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
            if self.state.phase != GamePhase::Playing {
                self.accumulator = 0.0;
                break;
            }
        }
        // Spiral of death guard: drop time we could not catch up on
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Run exactly one fixed step with the current input
    pub fn step(&mut self) {
        let input = self.input.to_tick_input();
        tick(&mut self.state, &input, SIM_DT);
        self.input.clear_one_shots();
        self.frame_events.extend(self.state.events.iter().cloned());

        if self.state.phase == GamePhase::LevelUp && self.input.autopilot {
            self.select_upgrade(0);
        }
    }

    /// Forward the player's upgrade choice
    pub fn select_upgrade(&mut self, index: usize) -> bool {
        let applied = apply_upgrade(&mut self.state, index);
        if applied {
            self.frame_events.extend(self.state.events.last().cloned());
        }
        applied
    }

    /// Events from the last frame, in order
    pub fn events(&self) -> &[GameEvent] {
        &self.frame_events
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn started(seed: u64) -> Driver {
        let mut driver = Driver::new(seed);
        driver.key_down(Key::Space);
        driver.frame(SIM_DT);
        driver.key_up(Key::Space);
        driver
    }

    #[test]
    fn test_space_starts_game() {
        let mut driver = Driver::new(1);
        assert_eq!(driver.phase(), GamePhase::Start);
        driver.frame(SIM_DT);
        assert_eq!(driver.phase(), GamePhase::Start);

        let driver = started(1);
        assert_eq!(driver.phase(), GamePhase::Playing);
        assert!(driver.events().contains(&GameEvent::RunStarted));
        assert!(!driver.input.confirm_pending());
    }

    #[test]
    fn test_frame_runs_fixed_steps() {
        let mut driver = started(1);
        let steps = driver.frame(SIM_DT * 3.5);
        assert_eq!(steps, 3);
        assert_eq!(driver.state.time_ticks, 3);
        let steps = driver.frame(SIM_DT * 0.6);
        assert_eq!(steps, 1);
    }

    #[test]
    fn test_frame_clamps_large_delta() {
        let mut driver = started(1);
        let steps = driver.frame(10.0);
        assert!(steps <= MAX_SUBSTEPS);
        assert!(driver.state.elapsed <= MAX_FRAME_DT + SIM_DT);
    }

    #[test]
    fn test_held_keys_move_player() {
        let mut driver = started(1);
        driver.key_down(Key::ArrowRight);
        for _ in 0..60 {
            driver.step();
        }
        assert!((driver.state.player.pos.x - PLAYER_SPEED).abs() < 0.5);
        assert!(driver.state.player.pos.y.abs() < 1e-3);
    }

    #[test]
    fn test_manual_upgrade_selection() {
        let mut driver = started(1);
        crate::sim::progression::enter_level_up(&mut driver.state);
        driver.frame(SIM_DT);
        assert_eq!(driver.phase(), GamePhase::LevelUp);
        assert!(!driver.select_upgrade(5));
        assert!(driver.select_upgrade(2));
        assert_eq!(driver.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_autopilot_picks_upgrades() {
        let mut driver = started(3);
        driver.input.autopilot = true;
        driver.state.player.xp = driver.state.player.xp_to_next - 1;
        let id = driver.state.next_entity_id();
        driver.state.orbs.push(crate::sim::XpOrb {
            id,
            pos: Vec2::new(5.0, 0.0),
            value: 1,
        });
        driver.step();
        assert_eq!(driver.phase(), GamePhase::Playing);
        assert_eq!(driver.state.player.level, 2);
        assert!(
            driver
                .events()
                .iter()
                .any(|e| matches!(e, GameEvent::UpgradeApplied { .. }))
        );
    }

    #[test]
    fn test_autopilot_session_finishes() {
        let settings = Settings {
            seed: Some(2024),
            autopilot: true,
            ..Default::default()
        };
        let mut driver = Driver::from_settings(&settings);
        driver.key_down(Key::Space);
        let mut frames = 0;
        while !driver.phase().is_terminal() && frames < 60 * 400 {
            driver.frame(SIM_DT);
            frames += 1;
        }
        assert!(driver.phase().is_terminal());
        let snap = driver.snapshot();
        assert!(snap.player.hp >= 0.0);
    }
}
