//! Input events folded into per-tick input
//!
//! Events arrive between frames and only touch [`InputState`]; the simulation
//! sees them once per tick as a [`TickInput`]. Fire and power presses are
//! one-shot, aim rotation stays active while its button is held.

use serde::{Deserialize, Serialize};

use crate::sim::{AimDirection, PowerPress, TickInput};

/// Physical keys and buttons the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Space,
    Left,
    Right,
    Escape,
    Char(char),
    MouseLeft,
    MouseRight,
}

/// Press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Press,
    Release,
}

/// Game-level input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Fire,
    /// Start rotating the tunnel
    AimPressed(AimDirection),
    /// Stop rotating
    AimReleased,
    PowerUp,
    PowerDown,
    Quit,
}

impl InputEvent {
    /// Default bindings: Space fires, Right/Left change power, left/right mouse
    /// buttons raise/lower the tunnel, Escape or Q quits
    pub fn from_key(key: Key, action: Action) -> Option<Self> {
        match (key, action) {
            (Key::Space, Action::Press) => Some(InputEvent::Fire),
            (Key::Right, Action::Press) => Some(InputEvent::PowerUp),
            (Key::Left, Action::Press) => Some(InputEvent::PowerDown),
            (Key::Escape, Action::Press) => Some(InputEvent::Quit),
            (Key::Char('q' | 'Q'), _) => Some(InputEvent::Quit),
            (Key::MouseLeft, Action::Press) => Some(InputEvent::AimPressed(AimDirection::Raise)),
            (Key::MouseRight, Action::Press) => Some(InputEvent::AimPressed(AimDirection::Lower)),
            (Key::MouseLeft | Key::MouseRight, Action::Release) => Some(InputEvent::AimReleased),
            _ => None,
        }
    }
}

/// Controller state between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pending: TickInput,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Fire => self.pending.fire = true,
            InputEvent::AimPressed(dir) => self.pending.aim = dir,
            InputEvent::AimReleased => self.pending.aim = AimDirection::Hold,
            InputEvent::PowerUp => self.pending.power.push(PowerPress::Up),
            InputEvent::PowerDown => self.pending.power.push(PowerPress::Down),
            InputEvent::Quit => self.quit = true,
        }
    }

    /// Translate and apply a raw key event
    pub fn handle_key(&mut self, key: Key, action: Action) {
        if let Some(event) = InputEvent::from_key(key, action) {
            self.apply(event);
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Input for the next tick; clears one-shot commands, keeps held aim
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            fire: self.pending.fire,
            power: std::mem::take(&mut self.pending.power),
            aim: self.pending.aim,
        };
        self.pending.fire = false;
        input
    }
}
