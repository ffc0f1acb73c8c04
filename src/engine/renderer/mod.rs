// Rendering interface
//
// The game describes each frame as a sequence of 2D draw calls against a
// `RenderTarget`. Backends (a GPU renderer, a test recorder) implement the
// trait; `DrawList` records the calls and `Rasterizer` paints a recorded
// list into an image.

mod draw_list;
mod raster;

pub use draw_list::{DrawCommand, DrawList};
pub use raster::Rasterizer;

use glam::Vec2;

use crate::core::math::Rect;
use crate::engine::assets::ImageHandle;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GOLD: Color = Color::rgb(255, 215, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Drawing primitives the game needs from a backend
///
/// Coordinates are screen pixels with the origin at the top-left.
/// Calls are layered in submission order.
pub trait RenderTarget {
    /// Copy `src` (pixels inside the image) into `dest`, optionally mirrored
    fn draw_sprite(&mut self, image: ImageHandle, dest: Rect, src: Rect, flip_horizontal: bool);

    /// Filled closed polygon
    fn draw_shape(&mut self, vertices: &[Vec2], fill: Color);

    /// Filled rectangle
    fn draw_rect(&mut self, rect: Rect, fill: Color);

    /// One pixel wide line
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// Text centered on `position`
    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, fill: Color);
}
