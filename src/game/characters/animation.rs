// Character sprite sheets and frame selection

use super::state::CharacterAction;
use crate::core::math::Rect;

/// One horizontal strip of animation frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSprite {
    /// Sprite sheet file name, relative to the asset directory
    pub sheet: &'static str,
    /// Width of each frame in pixels
    pub frame_width: u32,
    /// Height of each frame in pixels
    pub frame_height: u32,
    /// Number of frames laid out left to right
    pub frame_count: u32,
}

impl ActionSprite {
    pub const fn new(
        sheet: &'static str,
        frame_width: u32,
        frame_height: u32,
        frame_count: u32,
    ) -> Self {
        Self {
            sheet,
            frame_width,
            frame_height,
            frame_count,
        }
    }

    /// Pixel rectangle of `frame` inside the sheet
    pub fn source_rect(&self, frame: u32) -> Rect {
        let column = frame % self.frame_count.max(1);
        Rect::new(
            (column * self.frame_width) as f32,
            0.0,
            self.frame_width as f32,
            self.frame_height as f32,
        )
    }

    /// Minimum sheet dimensions needed to hold every frame
    pub fn required_sheet_size(&self) -> (u32, u32) {
        (self.frame_width * self.frame_count, self.frame_height)
    }
}

/// Sprite configuration for one playable look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterVariant {
    pub name: &'static str,
    pub idle: ActionSprite,
    pub attack: ActionSprite,
    pub jump: ActionSprite,
}

impl CharacterVariant {
    /// Sprite strip for an action
    pub fn sprite(&self, action: CharacterAction) -> &ActionSprite {
        match action {
            CharacterAction::Idle => &self.idle,
            CharacterAction::Attack => &self.attack,
            CharacterAction::Jump => &self.jump,
        }
    }

    /// Every sprite strip, paired with its action
    #[cfg(test)]
    pub fn sprites(&self) -> impl Iterator<Item = (CharacterAction, &ActionSprite)> + '_ {
        CharacterAction::ALL
            .into_iter()
            .map(move |action| (action, self.sprite(action)))
    }
}

pub static PLAYER1_VARIANT: CharacterVariant = CharacterVariant {
    name: "Player 1",
    idle: ActionSprite::new("player1_idle.png", 40, 36, 6),
    attack: ActionSprite::new("player1_attack.png", 39, 36, 3),
    jump: ActionSprite::new("player1_jump.png", 46, 42, 9),
};

pub static PLAYER2_VARIANT: CharacterVariant = CharacterVariant {
    name: "Player 2",
    idle: ActionSprite::new("player2_idle.png", 22, 24, 5),
    attack: ActionSprite::new("player2_attack.png", 27, 23, 8),
    jump: ActionSprite::new("player2_jump.png", 23, 25, 6),
};
