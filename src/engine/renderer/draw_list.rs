// Recorded draw calls

use glam::Vec2;

use super::{Color, RenderTarget};
use crate::core::math::Rect;
use crate::engine::assets::ImageHandle;

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        image: ImageHandle,
        dest: Rect,
        src: Rect,
        flip_horizontal: bool,
    },
    Shape {
        vertices: Vec<Vec2>,
        fill: Color,
    },
    Rect {
        rect: Rect,
        fill: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Text {
        text: String,
        position: Vec2,
        size: f32,
        fill: Color,
    },
}

/// Frame's worth of draw calls in submission order
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded commands, keeping the allocation for the next frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Every text string drawn this frame
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of sprite draws using `image`
    #[cfg(test)]
    pub fn sprite_count(&self, image: ImageHandle) -> usize {
        self.commands
            .iter()
            .filter(|command| {
                matches!(command, DrawCommand::Sprite { image: i, .. } if *i == image)
            })
            .count()
    }
}

impl RenderTarget for DrawList {
    fn draw_sprite(&mut self, image: ImageHandle, dest: Rect, src: Rect, flip_horizontal: bool) {
        self.commands.push(DrawCommand::Sprite {
            image,
            dest,
            src,
            flip_horizontal,
        });
    }

    fn draw_shape(&mut self, vertices: &[Vec2], fill: Color) {
        self.commands.push(DrawCommand::Shape {
            vertices: vertices.to_vec(),
            fill,
        });
    }

    fn draw_rect(&mut self, rect: Rect, fill: Color) {
        self.commands.push(DrawCommand::Rect { rect, fill });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, fill: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            size,
            fill,
        });
    }
}
