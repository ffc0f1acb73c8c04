// Input manager - tracks the keyboard and turns it into per-frame intents

use super::action::Control;
use super::config::InputConfigManager;
use super::player::{FrameInput, PlayerIntent};
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Number of local players sharing the keyboard
pub const LOCAL_PLAYERS: usize = 2;

/// Key-down queries the game polls once per frame
pub trait KeyState {
    /// Key is currently held
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Key went down since the last `end_frame`
    fn was_key_pressed(&self, key: KeyCode) -> bool;
}

/// Raw keyboard state
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    down: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Register a key press; repeats of a held key are not new presses
    pub fn press(&mut self, key: KeyCode) {
        if self.down.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    /// Register a key release
    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }

    /// Forget edge-triggered presses
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.down.clear();
        self.just_pressed.clear();
    }
}

impl KeyState for KeyboardState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    fn was_key_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }
}

/// Main input manager that coordinates keyboard input for both players
pub struct InputManager {
    /// Configuration manager for all players
    config: InputConfigManager,

    /// Current keyboard state
    keyboard: KeyboardState,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            config: InputConfigManager::new(LOCAL_PLAYERS),
            keyboard: KeyboardState::default(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only physical keys; layout-independent
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.handle_key(key_code, event.state == ElementState::Pressed, event.repeat);
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) {
        match (pressed, repeat) {
            (true, false) => self.keyboard.press(key),
            (true, true) => {}
            (false, _) => self.keyboard.release(key),
        }
    }

    /// Intent of one player, or neutral for an unknown player
    pub fn intent(&self, player_id: usize) -> PlayerIntent {
        self.config
            .get_config(player_id)
            .map(|config| PlayerIntent::poll(config, &self.keyboard))
            .unwrap_or_default()
    }

    /// Whether any restart key went down since the last `end_frame`
    pub fn restart_requested(&self) -> bool {
        self.config
            .global_config()
            .keys_for(Control::Restart)
            .iter()
            .any(|&key| self.keyboard.was_key_pressed(key))
    }

    /// Snapshot of everything the match needs for one update
    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            players: [self.intent(0), self.intent(1)],
            restart: self.restart_requested(),
        }
    }

    /// Clear edge-triggered state once an update consumed it
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
    }

    /// Release every key
    pub fn reset(&mut self) {
        self.keyboard.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
