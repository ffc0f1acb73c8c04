// Physics: ground-bound vertical integration and hitbox overlap tests

pub mod body;
mod collision;

pub use body::{Body, Landing};
pub use collision::overlaps;
