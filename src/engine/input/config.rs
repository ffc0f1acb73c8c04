// Fixed key bindings per player

use super::action::{default_p1_bindings, default_p2_bindings, global_bindings, Control};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Key bindings for a single player
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// Control -> every key that triggers it
    control_to_keys: HashMap<Control, Vec<KeyCode>>,
}

impl InputConfig {
    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(KeyCode, Control)>) -> Self {
        let mut control_to_keys: HashMap<Control, Vec<KeyCode>> = HashMap::new();
        for (key, control) in bindings {
            let keys = control_to_keys.entry(control).or_default();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        Self { control_to_keys }
    }

    /// Default bindings for a player; unknown players get none
    pub fn for_player(player_id: usize) -> Self {
        match player_id {
            0 => Self::from_bindings(default_p1_bindings()),
            1 => Self::from_bindings(default_p2_bindings()),
            _ => Self::default(),
        }
    }

    /// Get all keys bound to a control
    pub fn keys_for(&self, control: Control) -> &[KeyCode] {
        self.control_to_keys
            .get(&control)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Bindings for every local player plus the global ones
#[derive(Debug)]
pub struct InputConfigManager {
    /// Configurations for each player
    configs: Vec<InputConfig>,

    /// Global bindings (not player-specific)
    global_config: InputConfig,
}

impl InputConfigManager {
    /// Create a config manager with default bindings for `players` players
    pub fn new(players: usize) -> Self {
        Self {
            configs: (0..players).map(InputConfig::for_player).collect(),
            global_config: InputConfig::from_bindings(global_bindings()),
        }
    }

    /// Get a player's configuration
    pub fn get_config(&self, player_id: usize) -> Option<&InputConfig> {
        self.configs.get(player_id)
    }

    /// Get the global configuration
    pub fn global_config(&self) -> &InputConfig {
        &self.global_config
    }
}
