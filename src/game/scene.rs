// Scene composer - turns match state into draw calls

use glam::Vec2;
use log::{debug, info};

use super::characters::{Character, CharacterAction, CharacterVariant};
use super::controller::{MatchController, MatchState, PlayerSlot};
use crate::core::math::{map_range, Rect};
use crate::engine::assets::{AssetError, AssetManager, ImageHandle};
use crate::engine::renderer::{Color, RenderTarget};

pub const BACKGROUND_IMAGE: &str = "bg1.png";
pub const HEART_IMAGE: &str = "heart.png";

const HEART_SIZE: f32 = 25.0;
const HEART_SPACING: f32 = 30.0;
const HEART_Y: f32 = 20.0;
const P1_HEARTS_X: f32 = 50.0;
/// P2 hearts start this far from the right edge
const P2_HEARTS_INSET: f32 = 200.0;
/// Ground line sits below the characters' top edge
const GROUND_LINE_DROP: f32 = 32.0;
/// Inner ring of the attack spark, relative to the outer one
const EFFECT_INNER_SCALE: f32 = 0.6;

const SCORE_TEXT_SIZE: f32 = 32.0;
const SCORE_LINE_SPACING: f32 = 40.0;
const PROMPT_TEXT_SIZE: f32 = 24.0;
const PROMPT_BLINK_RATE: f32 = 0.1;

/// Sheet handles for one fighter's actions
#[derive(Debug, Clone, Copy)]
struct FighterSheets {
    idle: ImageHandle,
    attack: ImageHandle,
    jump: ImageHandle,
}

impl FighterSheets {
    fn load(assets: &mut AssetManager, variant: &CharacterVariant) -> Result<Self, AssetError> {
        debug!("Loading sprite sheets for {}", variant.name);
        let mut load = |action: CharacterAction| {
            let sprite = variant.sprite(action);
            assets.load_sprite_sheet(sprite.sheet, sprite.required_sheet_size())
        };

        Ok(Self {
            idle: load(CharacterAction::Idle)?,
            attack: load(CharacterAction::Attack)?,
            jump: load(CharacterAction::Jump)?,
        })
    }

    fn sheet(&self, action: CharacterAction) -> ImageHandle {
        match action {
            CharacterAction::Idle => self.idle,
            CharacterAction::Attack => self.attack,
            CharacterAction::Jump => self.jump,
        }
    }
}

/// Every image the scene needs, resolved before the first frame
#[derive(Debug, Clone)]
pub struct SceneAssets {
    background: ImageHandle,
    background_src: Rect,
    heart: ImageHandle,
    heart_src: Rect,
    fighters: [FighterSheets; 2],
}

impl SceneAssets {
    /// Load backgrounds, hearts and both fighters' sprite sheets
    pub fn load(
        assets: &mut AssetManager,
        variants: [&CharacterVariant; 2],
    ) -> Result<Self, AssetError> {
        let (background, background_src) = load_whole(assets, BACKGROUND_IMAGE)?;
        let (heart, heart_src) = load_whole(assets, HEART_IMAGE)?;

        let fighters = [
            FighterSheets::load(assets, variants[0])?,
            FighterSheets::load(assets, variants[1])?,
        ];

        info!(
            "Scene assets ready ({} images from {})",
            assets.image_count(),
            assets.loader().base_path().display()
        );

        Ok(Self {
            background,
            background_src,
            heart,
            heart_src,
            fighters,
        })
    }

    pub fn background(&self) -> ImageHandle {
        self.background
    }

    pub fn heart(&self) -> ImageHandle {
        self.heart
    }

    /// Sheet for a fighter's action
    pub fn sheet(&self, slot: PlayerSlot, action: CharacterAction) -> ImageHandle {
        self.fighters[slot.index()].sheet(action)
    }
}

/// Load an image drawn in full, with its source rectangle
fn load_whole(assets: &mut AssetManager, name: &str) -> Result<(ImageHandle, Rect), AssetError> {
    let handle = assets.load_image(name)?;
    let (width, height) = assets
        .image_size(handle)
        .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
    Ok((handle, Rect::new(0.0, 0.0, width as f32, height as f32)))
}

/// Draw one frame of the match
pub fn draw_scene<T: RenderTarget>(
    controller: &MatchController,
    assets: &SceneAssets,
    target: &mut T,
) {
    let playfield = controller.playfield();
    let (width, height) = (playfield.width, playfield.height);

    draw_background(controller.background_offset(), width, height, assets, target);

    let ground_y = controller.fighter(PlayerSlot::One).stats.ground_y + GROUND_LINE_DROP;
    target.draw_line(Vec2::new(0.0, ground_y), Vec2::new(width, ground_y), Color::BLACK);

    for slot in PlayerSlot::BOTH {
        draw_fighter(controller.fighter(slot), assets, slot, target);
    }

    draw_hearts(controller.fighter(PlayerSlot::One), P1_HEARTS_X, assets, target);
    draw_hearts(controller.fighter(PlayerSlot::Two), width - P2_HEARTS_INSET, assets, target);

    match controller.state() {
        MatchState::Playing => {
            for effect in controller.effects() {
                let alpha = effect.alpha();
                target.draw_shape(&effect.outline(1.0), Color::ORANGE.with_alpha(alpha));
                target.draw_shape(
                    &effect.outline(EFFECT_INNER_SCALE),
                    Color::YELLOW.with_alpha(alpha),
                );
            }
        }
        MatchState::GameOver { outcome, .. } => {
            draw_end_screen(controller, &outcome.headline(), target);
        }
    }
}

/// Three tiles so the scroll never shows a gap in either direction
fn draw_background<T: RenderTarget>(
    offset: f32,
    width: f32,
    height: f32,
    assets: &SceneAssets,
    target: &mut T,
) {
    for x in [offset - width, offset, offset + width] {
        target.draw_sprite(
            assets.background,
            Rect::new(x, 0.0, width, height),
            assets.background_src,
            false,
        );
    }
}

fn draw_fighter<T: RenderTarget>(
    fighter: &Character,
    assets: &SceneAssets,
    slot: PlayerSlot,
    target: &mut T,
) {
    let sprite = fighter.current_sprite();
    let position = fighter.position();
    let dest = Rect::new(
        position.x,
        position.y,
        sprite.frame_width as f32,
        sprite.frame_height as f32,
    );

    target.draw_sprite(
        assets.sheet(slot, fighter.action()),
        dest,
        sprite.source_rect(fighter.current_frame()),
        !fighter.facing_right,
    );
}

fn draw_hearts<T: RenderTarget>(
    fighter: &Character,
    offset_x: f32,
    assets: &SceneAssets,
    target: &mut T,
) {
    for i in 0..fighter.hearts() {
        let dest = Rect::new(
            offset_x + i as f32 * HEART_SPACING,
            HEART_Y,
            HEART_SIZE,
            HEART_SIZE,
        );
        target.draw_sprite(assets.heart, dest, assets.heart_src, false);
    }
}

fn draw_end_screen<T: RenderTarget>(controller: &MatchController, headline: &str, target: &mut T) {
    let playfield = controller.playfield();
    let (width, height) = (playfield.width, playfield.height);
    let reveal = controller.end_screen_reveal();
    let center_x = width / 2.0;

    target.draw_rect(
        Rect::new(0.0, 0.0, width, height),
        Color::BLACK.with_alpha(reveal.overlay_alpha),
    );

    target.draw_text(
        headline,
        Vec2::new(center_x, height / 3.0),
        reveal.headline_size,
        Color::GOLD,
    );

    if reveal.show_scores {
        for (line, slot) in PlayerSlot::BOTH.into_iter().enumerate() {
            let text = format!("{}: {} hearts", slot, controller.fighter(slot).hearts());
            let y = height / 2.0 + line as f32 * SCORE_LINE_SPACING;
            target.draw_text(&text, Vec2::new(center_x, y), SCORE_TEXT_SIZE, Color::WHITE);
        }
    }

    if reveal.show_prompt {
        target.draw_text(
            "Press SPACE to restart",
            Vec2::new(center_x, height * 0.8),
            PROMPT_TEXT_SIZE,
            Color::WHITE.with_alpha(prompt_alpha(controller.frame_count())),
        );
    }
}

/// Blinking restart prompt opacity, between 150 and 255
fn prompt_alpha(frame: u64) -> u8 {
    let wave = (frame as f32 * PROMPT_BLINK_RATE).sin();
    map_range(wave, -1.0, 1.0, 150.0, 255.0).round() as u8
}
