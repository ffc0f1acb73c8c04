// Character system
//
// This module contains everything related to playable characters:
// - Character data structure, combat and timers
// - Character stats and properties
// - Action state for character behavior
// - Sprite sheet configuration per variant

pub mod animation;
pub mod character;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{CharacterVariant, PLAYER1_VARIANT, PLAYER2_VARIANT};
pub use character::{Character, CharacterId, CharacterTimers};
pub use state::CharacterAction;
pub use stats::CharacterStats;
