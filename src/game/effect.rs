// Attack spark effect - cosmetic only, never collides

use std::f32::consts::TAU;

use glam::Vec2;

use crate::core::math::map_range;

/// Frames an effect lives for
pub const EFFECT_LIFETIME_FRAMES: u32 = 5;
/// Ticks per effect frame
pub const EFFECT_FRAME_DELAY: u32 = 3;
/// Outer radius at spawn, in pixels
pub const EFFECT_SIZE: f32 = 80.0;

const OUTLINE_POINTS: usize = 8;

/// Short-lived burst spawned in front of an attacker
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub position: Vec2,
    pub facing_right: bool,
    frame: u32,
    ticks: u32,
    frame_delay: u32,
    lifetime: u32,
    size: f32,
}

impl Effect {
    pub fn new(position: Vec2, facing_right: bool) -> Self {
        Self::with_timing(position, facing_right, EFFECT_LIFETIME_FRAMES, EFFECT_FRAME_DELAY)
    }

    pub fn with_timing(
        position: Vec2,
        facing_right: bool,
        lifetime: u32,
        frame_delay: u32,
    ) -> Self {
        Self {
            position,
            facing_right,
            frame: 0,
            ticks: 0,
            frame_delay: frame_delay.max(1),
            lifetime,
            size: EFFECT_SIZE,
        }
    }

    /// One update tick; the frame index moves every `frame_delay` ticks
    pub fn advance(&mut self) {
        self.ticks += 1;
        if self.ticks % self.frame_delay == 0 {
            self.frame += 1;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.frame >= self.lifetime
    }

    #[cfg(test)]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    #[cfg(test)]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Fraction of the lifetime still remaining, 1.0 at spawn
    fn remaining(&self) -> f32 {
        if self.lifetime == 0 {
            return 0.0;
        }
        (1.0 - self.frame as f32 / self.lifetime as f32).max(0.0)
    }

    /// Opacity fading linearly from 255 to 0 over the lifetime
    pub fn alpha(&self) -> u8 {
        map_range(self.frame as f32, 0.0, self.lifetime as f32, 255.0, 0.0)
            .clamp(0.0, 255.0)
            .round() as u8
    }

    /// Radius of a ring drawn at `scale` of full size
    pub fn radius(&self, scale: f32) -> f32 {
        self.size * scale * self.remaining()
    }

    /// Octagon outline centered on the effect
    pub fn outline(&self, scale: f32) -> Vec<Vec2> {
        let radius = self.radius(scale);
        (0..OUTLINE_POINTS)
            .map(|i| {
                let angle = i as f32 * TAU / OUTLINE_POINTS as f32;
                self.position + Vec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect()
    }
}
