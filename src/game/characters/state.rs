// Character action state

use std::fmt;

/// Mutually exclusive animated behaviours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterAction {
    #[default]
    Idle,
    Attack,
    Jump,
}

impl CharacterAction {
    #[cfg(test)]
    pub const ALL: [CharacterAction; 3] = [Self::Idle, Self::Attack, Self::Jump];

    /// Get the animation name for this action
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Attack => "attack",
            Self::Jump => "jump",
        }
    }
}

impl fmt::Display for CharacterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.animation_name())
    }
}

/// Current action plus how far its animation has progressed
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    action: CharacterAction,
    phase: f32,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(&self) -> CharacterAction {
        self.action
    }

    /// Fractional animation frame
    #[cfg(test)]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Switch action; the phase restarts only on an actual change.
    /// Returns true if the action changed.
    pub fn set(&mut self, action: CharacterAction) -> bool {
        if self.action == action {
            return false;
        }
        self.action = action;
        self.phase = 0.0;
        true
    }

    /// Advance the phase, wrapping at the current clip's frame count
    pub fn advance(&mut self, speed: f32, frame_count: u32) {
        let frames = frame_count.max(1) as f32;
        self.phase = (self.phase + speed) % frames;
    }

    /// Sprite sheet column for the current phase
    pub fn frame_index(&self, frame_count: u32) -> u32 {
        (self.phase.floor() as u32) % frame_count.max(1)
    }
}
