// Input handling system
//
// Keyboard input for two local players sharing one keyboard.
//
// ## Architecture
//
// - `action`: Defines game controls and default key bindings
// - `config`: Fixed per-player and global key bindings
// - `player`: Per-frame intents derived from held keys
// - `manager`: Tracks keyboard state from winit events and builds intents
//
// ## Usage Example
//
// ```rust
// use engine::input::InputManager;
//
// let mut input = InputManager::new();
//
// // In your event loop, process keyboard events
// input.process_keyboard_event(&key_event);
//
// // Once per update, read what both players want to do
// let frame = input.frame_input();
//
// // After the update consumed it, clear edge-triggered state
// input.end_frame();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use manager::InputManager;
pub use player::{FrameInput, PlayerIntent};
