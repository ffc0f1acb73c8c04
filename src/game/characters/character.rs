// Character entity

use glam::Vec2;
use log::debug;

use super::animation::{ActionSprite, CharacterVariant};
use super::state::{ActionState, CharacterAction};
use super::stats::CharacterStats;
use crate::core::math::Rect;
use crate::engine::physics::{self, Body, Landing};
use crate::engine::timer::{TimerHandle, TimerQueue};
use crate::game::effect::Effect;

/// Unique identifier for a character instance
///
/// A fresh id is issued every time a character is (re)built, so timers that
/// belong to a discarded instance can be recognised as stale.
pub type CharacterId = u32;

/// Which deferred state clear a timer performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Ends the damaging window of an attack
    AttackWindow,
    /// Ends post-hit invincibility
    Invincibility,
}

/// Timer payload routed back to the owning character when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterTimer {
    pub owner: CharacterId,
    pub kind: TimerKind,
}

/// Timer queue shared by every character in a match
pub type CharacterTimers = TimerQueue<CharacterTimer>;

/// A player-controlled fighter
#[derive(Debug, Clone)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Sprite configuration
    pub variant: &'static CharacterVariant,
    /// Tuning values
    pub stats: CharacterStats,
    /// Position and vertical velocity
    pub body: Body,
    /// Direction the character is facing
    pub facing_right: bool,

    action: ActionState,
    hearts: u32,
    is_jumping: bool,
    is_attacking: bool,
    /// Frames until the next attack may start
    attack_cooldown: u32,
    invincible: bool,
    attack_timer: Option<TimerHandle>,
    invincibility_timer: Option<TimerHandle>,
}

impl Character {
    /// Create a character standing on the ground at `spawn_x`
    pub fn new(
        id: CharacterId,
        variant: &'static CharacterVariant,
        stats: CharacterStats,
        spawn_x: f32,
    ) -> Self {
        Self {
            id,
            variant,
            body: Body::new(spawn_x, stats.ground_y),
            hearts: stats.max_hearts,
            stats,
            facing_right: true,
            action: ActionState::new(),
            is_jumping: false,
            is_attacking: false,
            attack_cooldown: 0,
            invincible: false,
            attack_timer: None,
            invincibility_timer: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[cfg(test)]
    pub fn velocity_y(&self) -> f32 {
        self.body.velocity_y
    }

    pub fn hearts(&self) -> u32 {
        self.hearts
    }

    pub fn is_defeated(&self) -> bool {
        self.hearts == 0
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn is_attacking(&self) -> bool {
        self.is_attacking
    }

    #[cfg(test)]
    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    #[cfg(test)]
    pub fn attack_cooldown(&self) -> u32 {
        self.attack_cooldown
    }

    pub fn action(&self) -> CharacterAction {
        self.action.action()
    }

    #[cfg(test)]
    pub fn animation_phase(&self) -> f32 {
        self.action.phase()
    }

    /// Sprite strip for the current action
    pub fn current_sprite(&self) -> &ActionSprite {
        self.variant.sprite(self.action.action())
    }

    /// Sprite sheet column to draw this frame
    pub fn current_frame(&self) -> u32 {
        self.action.frame_index(self.current_sprite().frame_count)
    }

    /// Move horizontally, face the direction of travel and stay inside the playfield
    pub fn move_by(&mut self, dx: f32, playfield_width: f32) {
        self.facing_right = dx > 0.0;
        let max_x = playfield_width - self.current_sprite().frame_width as f32;
        self.body.shift_x(dx, max_x);
    }

    /// Start a jump unless already airborne
    pub fn jump(&mut self) {
        if self.is_jumping {
            return;
        }
        self.body.launch(self.stats.jump_force);
        self.is_jumping = true;
        self.set_action(CharacterAction::Jump);
    }

    /// Start an attack if neither attacking nor cooling down.
    /// Returns the spark effect to show in front of the character.
    pub fn attack(&mut self, timers: &mut CharacterTimers) -> Option<Effect> {
        if self.is_attacking || self.attack_cooldown > 0 {
            return None;
        }

        self.is_attacking = true;
        self.set_action(CharacterAction::Attack);
        self.attack_cooldown = self.stats.attack_cooldown_frames;
        self.attack_timer = Some(timers.schedule(
            self.stats.attack_window,
            CharacterTimer {
                owner: self.id,
                kind: TimerKind::AttackWindow,
            },
        ));

        let offset = self.stats.effect_offset;
        let effect_x = if self.facing_right {
            self.body.position.x + offset.x
        } else {
            self.body.position.x - offset.x
        };

        debug!("character {} attacks", self.id);
        Some(Effect::new(
            Vec2::new(effect_x, self.body.position.y + offset.y),
            self.facing_right,
        ))
    }

    /// Take one heart of damage unless invincible. Returns true if damage was applied.
    pub fn get_hit(&mut self, timers: &mut CharacterTimers) -> bool {
        if self.invincible {
            return false;
        }

        self.hearts = self.hearts.saturating_sub(1);
        self.invincible = true;
        self.invincibility_timer = Some(timers.schedule(
            self.stats.invincibility,
            CharacterTimer {
                owner: self.id,
                kind: TimerKind::Invincibility,
            },
        ));

        debug!("character {} hit, {} hearts left", self.id, self.hearts);
        true
    }

    /// Apply one frame of gravity and tick the attack cooldown
    pub fn physics_step(&mut self) {
        if self.body.step(self.stats.gravity, self.stats.ground_y) == Landing::Grounded {
            self.is_jumping = false;
        }

        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
    }

    /// Switch action, restarting its animation only on an actual change
    pub fn set_action(&mut self, action: CharacterAction) {
        self.action.set(action);
    }

    /// Advance the sprite animation by one frame
    pub fn advance_animation(&mut self) {
        let frame_count = self.current_sprite().frame_count;
        self.action.advance(self.stats.animation_speed, frame_count);
    }

    /// Damaging area in front of the character, only while attacking
    pub fn attack_hitbox(&self) -> Option<Rect> {
        if !self.is_attacking {
            return None;
        }

        let position = self.body.position;
        let size = self.stats.attack_box;
        let x = if self.facing_right {
            position.x + self.stats.attack_reach
        } else {
            position.x - size.x
        };

        Some(Rect::new(x, position.y, size.x, size.y))
    }

    /// Vulnerable area anchored at the character's position
    pub fn hurtbox(&self) -> Rect {
        Rect::from_origin_size(self.body.position, self.stats.hurtbox)
    }

    /// Whether this character's active attack overlaps `defender`
    pub fn attack_hits(&self, defender: &Character) -> bool {
        self.attack_hitbox()
            .is_some_and(|hitbox| physics::overlaps(&hitbox, &defender.hurtbox()))
    }

    /// Apply a fired timer. Timers this character is no longer waiting on are ignored.
    pub fn on_timer(&mut self, kind: TimerKind, handle: TimerHandle) -> bool {
        match kind {
            TimerKind::AttackWindow if self.attack_timer == Some(handle) => {
                self.attack_timer = None;
                self.is_attacking = false;
                true
            }
            TimerKind::Invincibility if self.invincibility_timer == Some(handle) => {
                self.invincibility_timer = None;
                self.invincible = false;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_hearts(&mut self, hearts: u32) {
        self.hearts = hearts.min(self.stats.max_hearts);
    }
}
