// Per-player input intents

use super::action::Control;
use super::config::InputConfig;
use super::manager::KeyState;

/// What one player is asking for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
}

impl PlayerIntent {
    /// Poll every control bound in `config` against the current key state
    pub fn poll(config: &InputConfig, keys: &impl KeyState) -> Self {
        let held = |control| config.keys_for(control).iter().any(|&k| keys.is_key_down(k));

        Self {
            left: held(Control::MoveLeft),
            right: held(Control::MoveRight),
            jump: held(Control::Jump),
            attack: held(Control::Attack),
        }
    }
}

/// Everything the match needs from the keyboard for one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub players: [PlayerIntent; 2],
    /// Restart key went down since the last update
    pub restart: bool,
}
