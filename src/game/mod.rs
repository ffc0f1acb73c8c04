// Game rules: fighters, effects, the match state machine and its scene

pub mod characters;
pub mod controller;
pub mod effect;
pub mod scene;

pub use controller::{MatchController, Playfield};
pub use scene::{draw_scene, SceneAssets};
