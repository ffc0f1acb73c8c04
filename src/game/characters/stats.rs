// Character stats - both fighters share the same numbers
// Differentiation comes from the sprite variant only

use std::time::Duration;

use glam::Vec2;

/// Fixed character tuning, in pixels and frames unless noted
#[derive(Debug, Clone)]
pub struct CharacterStats {
    // Movement
    /// Horizontal distance per frame while a direction is held
    pub move_speed: f32,
    /// Vertical velocity applied on jump (negative = upward)
    pub jump_force: f32,

    // Physics
    /// Added to vertical velocity every frame
    pub gravity: f32,
    /// Screen y of a standing character's top edge
    pub ground_y: f32,

    // Combat
    /// Starting (and maximum) hearts
    pub max_hearts: u32,
    /// Frames before another attack may start
    pub attack_cooldown_frames: u32,
    /// Wall-clock length of the damaging part of an attack
    pub attack_window: Duration,
    /// Wall-clock length of post-hit invincibility
    pub invincibility: Duration,
    /// Size of the attack hitbox
    pub attack_box: Vec2,
    /// Hitbox x offset from the attacker when facing right
    pub attack_reach: f32,
    /// Size of the vulnerable area anchored at the character's position
    pub hurtbox: Vec2,
    /// Where the attack effect spawns relative to the attacker (x mirrored when facing left)
    pub effect_offset: Vec2,

    // Animation
    /// Animation phase advance per frame
    pub animation_speed: f32,
}

/// The ONE set of stats used by both players
pub const BASE_STATS: CharacterStats = CharacterStats {
    move_speed: 5.0,
    jump_force: -15.0,

    gravity: 0.8,
    ground_y: 300.0,

    max_hearts: 5,
    attack_cooldown_frames: 20,
    attack_window: Duration::from_millis(500),
    invincibility: Duration::from_millis(1000),
    attack_box: Vec2::new(60.0, 40.0),
    attack_reach: 30.0,
    hurtbox: Vec2::new(30.0, 60.0),
    effect_offset: Vec2::new(60.0, 30.0),

    animation_speed: 0.1,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Get the standard character stats (same for both players)
    pub fn standard() -> Self {
        BASE_STATS
    }
}
