// CPU rasterizer for recorded draw calls
//
// Used for screenshots; nearest-neighbour sampling, source-over blending.
// No font is bundled, so text is drawn as one solid block per glyph.

use glam::Vec2;
use image::{Rgba, RgbaImage};
use log::warn;

use super::{Color, DrawCommand, DrawList};
use crate::core::math::Rect;
use crate::engine::assets::{AssetManager, ImageHandle};

/// Glyph block width relative to the text size
const GLYPH_WIDTH: f32 = 0.5;
/// Gap between glyph blocks relative to the text size
const GLYPH_GAP: f32 = 0.1;

/// Paints a `DrawList` into an RGBA image using the decoded assets
pub struct Rasterizer<'a> {
    assets: &'a AssetManager,
}

impl<'a> Rasterizer<'a> {
    pub fn new(assets: &'a AssetManager) -> Self {
        Self { assets }
    }

    /// Render every command in submission order onto a transparent canvas
    pub fn render(&self, list: &DrawList, width: u32, height: u32) -> RgbaImage {
        let mut canvas = RgbaImage::new(width, height);

        for command in list.commands() {
            match command {
                DrawCommand::Sprite {
                    image,
                    dest,
                    src,
                    flip_horizontal,
                } => self.sprite(&mut canvas, *image, dest, src, *flip_horizontal),
                DrawCommand::Shape { vertices, fill } => fill_polygon(&mut canvas, vertices, *fill),
                DrawCommand::Rect { rect, fill } => fill_rect(&mut canvas, rect, *fill),
                DrawCommand::Line { from, to, color } => draw_line(&mut canvas, *from, *to, *color),
                DrawCommand::Text {
                    text,
                    position,
                    size,
                    fill,
                } => draw_text_blocks(&mut canvas, text, *position, *size, *fill),
            }
        }

        canvas
    }

    fn sprite(
        &self,
        canvas: &mut RgbaImage,
        image: ImageHandle,
        dest: &Rect,
        src: &Rect,
        flip_horizontal: bool,
    ) {
        let Some(source) = self.assets.image(image) else {
            warn!("Skipping sprite with unloaded image {:?}", image.id());
            return;
        };
        if dest.width() <= 0.0 || dest.height() <= 0.0 {
            return;
        }

        for (x, y) in covered_pixels(canvas, dest) {
            let mut u = (x as f32 + 0.5 - dest.origin.x) / dest.width();
            let v = (y as f32 + 0.5 - dest.origin.y) / dest.height();
            if flip_horizontal {
                u = 1.0 - u;
            }

            let sx = (src.origin.x + u * src.width()).floor();
            let sy = (src.origin.y + v * src.height()).floor();
            if sx < 0.0 || sy < 0.0 || sx >= source.width() as f32 || sy >= source.height() as f32 {
                continue;
            }

            let texel = source.get_pixel(sx as u32, sy as u32).0;
            blend(canvas, x, y, Color::rgb(texel[0], texel[1], texel[2]).with_alpha(texel[3]));
        }
    }
}

/// Canvas pixels whose centers fall inside `rect`
fn covered_pixels(canvas: &RgbaImage, rect: &Rect) -> impl Iterator<Item = (u32, u32)> {
    let min = rect.min();
    let max = rect.max();
    let x0 = (min.x - 0.5).ceil().max(0.0) as u32;
    let y0 = (min.y - 0.5).ceil().max(0.0) as u32;
    let x1 = ((max.x - 0.5).ceil().max(0.0) as u32).min(canvas.width());
    let y1 = ((max.y - 0.5).ceil().max(0.0) as u32).min(canvas.height());

    (y0..y1).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
}

/// Source-over blend of `color` onto one pixel; out-of-bounds writes are dropped
fn blend(canvas: &mut RgbaImage, x: u32, y: u32, color: Color) {
    if x >= canvas.width() || y >= canvas.height() || color.a == 0 {
        return;
    }

    let pixel = canvas.get_pixel_mut(x, y);
    let alpha = color.a as f32 / 255.0;
    let under = pixel.0;
    let mix =
        |over: u8, under: u8| (over as f32 * alpha + under as f32 * (1.0 - alpha)).round() as u8;
    let out_alpha = color.a as f32 + under[3] as f32 * (1.0 - alpha);

    *pixel = Rgba([
        mix(color.r, under[0]),
        mix(color.g, under[1]),
        mix(color.b, under[2]),
        out_alpha.round().min(255.0) as u8,
    ]);
}

fn fill_rect(canvas: &mut RgbaImage, rect: &Rect, fill: Color) {
    let pixels: Vec<(u32, u32)> = covered_pixels(canvas, rect).collect();
    for (x, y) in pixels {
        blend(canvas, x, y, fill);
    }
}

/// Even-odd fill over the polygon's bounding box
fn fill_polygon(canvas: &mut RgbaImage, vertices: &[Vec2], fill: Color) {
    if vertices.len() < 3 {
        return;
    }

    let min = vertices.iter().copied().reduce(Vec2::min).unwrap_or(Vec2::ZERO);
    let max = vertices.iter().copied().reduce(Vec2::max).unwrap_or(Vec2::ZERO);
    let bounds = Rect::from_origin_size(min, max - min);

    let pixels: Vec<(u32, u32)> = covered_pixels(canvas, &bounds)
        .filter(|&(x, y)| contains(vertices, Vec2::new(x as f32 + 0.5, y as f32 + 0.5)))
        .collect();
    for (x, y) in pixels {
        blend(canvas, x, y, fill);
    }
}

fn contains(vertices: &[Vec2], point: Vec2) -> bool {
    let mut inside = false;
    let mut previous = vertices[vertices.len() - 1];

    for &current in vertices {
        if (current.y > point.y) != (previous.y > point.y) {
            let t = (point.y - current.y) / (previous.y - current.y);
            if point.x < current.x + t * (previous.x - current.x) {
                inside = !inside;
            }
        }
        previous = current;
    }

    inside
}

fn draw_line(canvas: &mut RgbaImage, from: Vec2, to: Vec2, color: Color) {
    let delta = to - from;
    let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as u32;

    for step in 0..=steps {
        let point = from + delta * (step as f32 / steps as f32);
        if point.x >= 0.0 && point.y >= 0.0 {
            blend(canvas, point.x as u32, point.y as u32, color);
        }
    }
}

/// Text centered on `position`, one block per non-space character
fn draw_text_blocks(canvas: &mut RgbaImage, text: &str, position: Vec2, size: f32, fill: Color) {
    if size <= 0.0 {
        return;
    }

    let advance = size * (GLYPH_WIDTH + GLYPH_GAP);
    let total = advance * text.chars().count() as f32 - size * GLYPH_GAP;
    let left = position.x - total / 2.0;
    let top = position.y - size / 2.0;

    for (i, glyph) in text.chars().enumerate() {
        if glyph.is_whitespace() {
            continue;
        }
        let block = Rect::new(left + i as f32 * advance, top, size * GLYPH_WIDTH, size);
        fill_rect(canvas, &block, fill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::RenderTarget;
    use std::path::PathBuf;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rusted-duel-raster-{}-{}",
            test,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn pixel(canvas: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
        canvas.get_pixel(x, y).0
    }

    #[test]
    fn test_rect_fill_and_clipping() {
        let assets = AssetManager::new(scratch_dir("rect"));
        let mut list = DrawList::new();
        list.draw_rect(Rect::new(2.0, 2.0, 100.0, 3.0), RED);

        let canvas = Rasterizer::new(&assets).render(&list, 8, 8);
        assert_eq!(pixel(&canvas, 1, 2), [0, 0, 0, 0]);
        assert_eq!(pixel(&canvas, 2, 2), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 7, 4), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 7, 5), [0, 0, 0, 0]);
    }

    #[test]
    fn test_later_commands_blend_over_earlier() {
        let assets = AssetManager::new(scratch_dir("blend"));
        let mut list = DrawList::new();
        list.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
        list.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::BLACK.with_alpha(0));
        list.draw_rect(Rect::new(0.0, 0.0, 2.0, 4.0), BLUE);

        let canvas = Rasterizer::new(&assets).render(&list, 4, 4);
        assert_eq!(pixel(&canvas, 0, 0), [0, 0, 255, 255]);
        assert_eq!(pixel(&canvas, 3, 3), [255, 255, 255, 255]);
    }

    #[test]
    fn test_sprite_sampling_and_flip() {
        let dir = scratch_dir("sprite");
        let mut sheet = RgbaImage::new(2, 1);
        sheet.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        sheet.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        sheet.save(dir.join("sheet.png")).unwrap();

        let mut assets = AssetManager::new(&dir);
        let handle = assets.load_image("sheet.png").unwrap();
        let src = Rect::new(0.0, 0.0, 2.0, 1.0);

        let mut list = DrawList::new();
        list.draw_sprite(handle, Rect::new(0.0, 0.0, 4.0, 2.0), src, false);
        list.draw_sprite(handle, Rect::new(0.0, 2.0, 4.0, 2.0), src, true);

        let canvas = Rasterizer::new(&assets).render(&list, 4, 4);
        // Scaled up 2x
        assert_eq!(pixel(&canvas, 1, 1), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 2, 1), [0, 0, 255, 255]);
        // Mirrored
        assert_eq!(pixel(&canvas, 0, 3), [0, 0, 255, 255]);
        assert_eq!(pixel(&canvas, 3, 3), [255, 0, 0, 255]);
    }

    #[test]
    fn test_polygon_fill() {
        let assets = AssetManager::new(scratch_dir("polygon"));
        let mut list = DrawList::new();
        let triangle = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        list.draw_shape(&triangle, RED);

        let canvas = Rasterizer::new(&assets).render(&list, 10, 10);
        assert_eq!(pixel(&canvas, 1, 1), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 8, 8), [0, 0, 0, 0]);
    }

    #[test]
    fn test_line_endpoints() {
        let assets = AssetManager::new(scratch_dir("line"));
        let mut list = DrawList::new();
        list.draw_line(Vec2::new(0.0, 3.0), Vec2::new(9.0, 3.0), RED);

        let canvas = Rasterizer::new(&assets).render(&list, 10, 10);
        assert_eq!(pixel(&canvas, 0, 3), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 9, 3), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 5, 4), [0, 0, 0, 0]);
    }

    #[test]
    fn test_text_blocks_are_centered() {
        let assets = AssetManager::new(scratch_dir("text"));
        let mut list = DrawList::new();
        // Two glyphs of size 10: blocks at 14.5..19.5 and 20.5..25.5
        list.draw_text("AB", Vec2::new(20.0, 10.0), 10.0, RED);

        let canvas = Rasterizer::new(&assets).render(&list, 40, 20);
        assert_eq!(pixel(&canvas, 15, 10), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 19, 10), [0, 0, 0, 0]);
        assert_eq!(pixel(&canvas, 24, 10), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 26, 10), [0, 0, 0, 0]);
    }
}
