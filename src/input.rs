//! Input intents
//!
//! Renderers forward raw key-down/key-up events here. The simulation only
//! sees the derived direction (level-triggered) and a confirm edge.
//! World space is y-down, matching screen space.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    /// Start / restart
    Space,
}

impl Key {
    /// Map a DOM-style key code (`"ArrowLeft"`, `"KeyA"`, `"Space"`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "KeyW" => Some(Key::W),
            "KeyA" => Some(Key::A),
            "KeyS" => Some(Key::S),
            "KeyD" => Some(Key::D),
            "Space" => Some(Key::Space),
            _ => None,
        }
    }

    /// Unit step this key contributes to movement
    fn step(&self) -> Vec2 {
        match self {
            Key::ArrowUp | Key::W => Vec2::new(0.0, -1.0),
            Key::ArrowDown | Key::S => Vec2::new(0.0, 1.0),
            Key::ArrowLeft | Key::A => Vec2::new(-1.0, 0.0),
            Key::ArrowRight | Key::D => Vec2::new(1.0, 0.0),
            Key::Space => Vec2::ZERO,
        }
    }
}

/// Held keys plus pending one-shot actions
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<Key>,
    confirm_pressed: bool,
    pub autopilot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        // Auto-repeat keydowns don't re-trigger confirm
        if self.keys_held.insert(key) && key == Key::Space {
            self.confirm_pressed = true;
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys_held.remove(&key);
    }

    /// Forward a DOM-style key event; unknown codes are ignored
    pub fn handle_code(&mut self, code: &str, pressed: bool) {
        match (Key::from_code(code), pressed) {
            (Some(key), true) => self.key_down(key),
            (Some(key), false) => self.key_up(key),
            (None, _) => {}
        }
    }

    pub fn is_key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    /// Movement direction from the held keys, normalised.
    ///
    /// An arrow and its letter alias count once; opposite keys cancel.
    pub fn direction(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        for pair in [
            (Key::ArrowLeft, Key::A),
            (Key::ArrowRight, Key::D),
            (Key::ArrowUp, Key::W),
            (Key::ArrowDown, Key::S),
        ] {
            if self.is_key_held(pair.0) || self.is_key_held(pair.1) {
                axis += pair.0.step();
            }
        }
        axis.normalize_or_zero()
    }

    /// Whether confirm is pending
    pub fn confirm_pending(&self) -> bool {
        self.confirm_pressed
    }

    /// Build the input for the next tick
    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            direction: self.direction(),
            confirm: self.confirm_pressed,
            autopilot: self.autopilot,
        }
    }

    /// Clear one-shot inputs after a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.confirm_pressed = false;
    }

    /// Forget everything held (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.keys_held.clear();
        self.confirm_pressed = false;
    }
}
