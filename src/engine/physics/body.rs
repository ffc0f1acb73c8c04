use glam::Vec2;

/// Result of a single integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// Still above ground after the step
    Airborne,
    /// Touching the ground (either just landed or already standing)
    Grounded,
}

/// Point body that falls under gravity and rests on a flat ground line
///
/// Screen coordinates: y grows downward, so "above ground" means y < ground_y.
/// Only the vertical axis carries velocity; horizontal motion is positional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Top-left of the sprite in screen space
    pub position: Vec2,
    /// Vertical velocity (negative = upward)
    pub velocity_y: f32,
}

impl Body {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity_y: 0.0,
        }
    }

    /// Apply a vertical impulse, replacing the current velocity
    pub fn launch(&mut self, velocity_y: f32) {
        self.velocity_y = velocity_y;
    }

    /// Integrate one frame of gravity, clamping to the ground line
    pub fn step(&mut self, gravity: f32, ground_y: f32) -> Landing {
        self.velocity_y += gravity;
        self.position.y += self.velocity_y;

        if self.position.y >= ground_y {
            self.position.y = ground_y;
            self.velocity_y = 0.0;
            Landing::Grounded
        } else {
            Landing::Airborne
        }
    }

    /// Shift horizontally and clamp into `[0, max_x]`; the lower bound wins if `max_x < 0`
    pub fn shift_x(&mut self, dx: f32, max_x: f32) {
        self.position.x = (self.position.x + dx).min(max_x).max(0.0);
    }
}
