// Match controller: owns both fighters and runs the per-frame rules

use std::fmt;
use std::time::Duration;

use log::{debug, info};

use super::characters::{
    Character, CharacterAction, CharacterId, CharacterStats, CharacterTimers, CharacterVariant,
    PLAYER1_VARIANT, PLAYER2_VARIANT,
};
use super::effect::Effect;
use crate::engine::input::{FrameInput, PlayerIntent};

/// Which side of the keyboard a fighter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerSlot::One => "Player 1",
            PlayerSlot::Two => "Player 2",
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a finished match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(PlayerSlot),
    /// Both fighters ran out of hearts in the same frame
    Draw,
}

impl Outcome {
    /// End screen headline
    pub fn headline(&self) -> String {
        match self {
            Outcome::Winner(slot) => format!("{} WINS!", slot),
            Outcome::Draw => "DRAW!".to_string(),
        }
    }
}

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchState {
    Playing,
    GameOver {
        outcome: Outcome,
        /// End screen animation, 0.0 on entry and saturating at 1.0
        progress: f32,
    },
}

/// Match-level tuning
#[derive(Debug, Clone)]
pub struct MatchRules {
    /// Spawn x for each slot
    pub spawn_x: [f32; 2],
    /// Background scroll per pixel of net player movement
    pub background_scroll_speed: f32,
    /// End screen progress gained per frame
    pub end_screen_speed: f32,
    /// Progress past which the heart totals appear
    pub scores_reveal_at: f32,
    /// Progress past which the restart prompt appears
    pub prompt_reveal_at: f32,
    /// Overlay alpha at full progress
    pub overlay_max_alpha: f32,
    /// Headline text size at full progress
    pub headline_max_size: f32,
}

impl MatchRules {
    pub const STANDARD: MatchRules = MatchRules {
        spawn_x: [100.0, 600.0],
        background_scroll_speed: 0.5,
        end_screen_speed: 0.02,
        scores_reveal_at: 0.3,
        prompt_reveal_at: 0.6,
        overlay_max_alpha: 150.0,
        headline_max_size: 64.0,
    };
}

impl Default for MatchRules {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// What parts of the end screen are visible at a given progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndScreenReveal {
    pub overlay_alpha: u8,
    pub headline_size: f32,
    pub show_scores: bool,
    pub show_prompt: bool,
}

impl EndScreenReveal {
    pub fn at(progress: f32, rules: &MatchRules) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        Self {
            overlay_alpha: (rules.overlay_max_alpha * progress).round() as u8,
            headline_size: rules.headline_max_size * progress,
            show_scores: progress > rules.scores_reveal_at,
            show_prompt: progress > rules.prompt_reveal_at,
        }
    }
}

/// Visible area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Owns everything a match needs and advances it one frame at a time
#[derive(Debug)]
pub struct MatchController {
    rules: MatchRules,
    playfield: Playfield,
    fighters: [Character; 2],
    effects: Vec<Effect>,
    timers: CharacterTimers,
    state: MatchState,
    background_offset: f32,
    next_id: CharacterId,
    frame_count: u64,
}

impl MatchController {
    pub fn new(playfield: Playfield) -> Self {
        Self::with_rules(playfield, MatchRules::STANDARD)
    }

    pub fn with_rules(playfield: Playfield, rules: MatchRules) -> Self {
        let mut next_id = 0;
        let fighters = Self::spawn_fighters(&rules, &mut next_id);

        info!(
            "Match started on a {}x{} playfield",
            playfield.width, playfield.height
        );

        Self {
            rules,
            playfield,
            fighters,
            effects: Vec::new(),
            timers: CharacterTimers::new(),
            state: MatchState::Playing,
            background_offset: 0.0,
            next_id,
            frame_count: 0,
        }
    }

    fn spawn_fighters(rules: &MatchRules, next_id: &mut CharacterId) -> [Character; 2] {
        let mut spawn = |variant: &'static CharacterVariant, x: f32| {
            let id = *next_id;
            *next_id += 1;
            Character::new(id, variant, CharacterStats::standard(), x)
        };

        [
            spawn(&PLAYER1_VARIANT, rules.spawn_x[0]),
            spawn(&PLAYER2_VARIANT, rules.spawn_x[1]),
        ]
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// Window resized
    pub fn set_playfield(&mut self, playfield: Playfield) {
        self.playfield = playfield;
    }

    pub fn fighter(&self, slot: PlayerSlot) -> &Character {
        &self.fighters[slot.index()]
    }

    #[cfg(test)]
    pub fn fighters(&self) -> &[Character; 2] {
        &self.fighters
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, MatchState::GameOver { .. })
    }

    #[cfg(test)]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            MatchState::GameOver { outcome, .. } => Some(outcome),
            MatchState::Playing => None,
        }
    }

    /// End screen animation progress, 0.0 while playing
    pub fn end_screen_progress(&self) -> f32 {
        match self.state {
            MatchState::GameOver { progress, .. } => progress,
            MatchState::Playing => 0.0,
        }
    }

    pub fn end_screen_reveal(&self) -> EndScreenReveal {
        EndScreenReveal::at(self.end_screen_progress(), &self.rules)
    }

    pub fn background_offset(&self) -> f32 {
        self.background_offset
    }

    /// Updates run since the program started (not reset by restarts)
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Timers not yet fired
    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Advance wall-clock timers and apply whatever came due
    pub fn advance_clock(&mut self, elapsed: Duration) {
        for (handle, timer) in self.timers.advance(elapsed) {
            match self.fighters.iter_mut().find(|f| f.id == timer.owner) {
                Some(fighter) => {
                    if !fighter.on_timer(timer.kind, handle) {
                        debug!(
                            "Character {} no longer waiting on {:?} timer",
                            timer.owner, timer.kind
                        );
                    }
                }
                None => debug!(
                    "Ignoring {:?} timer for discarded character {}",
                    timer.kind, timer.owner
                ),
            }
        }
    }

    /// Run one frame
    pub fn update(&mut self, input: &FrameInput) {
        self.frame_count += 1;

        match self.state {
            MatchState::Playing => {
                if input.restart {
                    debug!("Restart ignored while playing");
                }
                self.update_playing(input);
            }
            MatchState::GameOver { outcome, progress } => {
                if input.restart && self.restart() {
                    return;
                }
                self.state = MatchState::GameOver {
                    outcome,
                    progress: (progress + self.rules.end_screen_speed).min(1.0),
                };
            }
        }

        for fighter in &mut self.fighters {
            fighter.advance_animation();
        }
    }

    /// Start a fresh match. Only honoured on the end screen; returns whether it happened.
    pub fn restart(&mut self) -> bool {
        if !self.is_game_over() {
            return false;
        }

        let discarded = [self.fighters[0].id, self.fighters[1].id];
        let cancelled = self
            .timers
            .cancel_where(|timer| discarded.contains(&timer.owner));

        self.fighters = Self::spawn_fighters(&self.rules, &mut self.next_id);
        self.effects.clear();
        self.state = MatchState::Playing;
        self.background_offset = 0.0;

        info!("Match restarted ({} pending timers cancelled)", cancelled);
        true
    }

    fn update_playing(&mut self, input: &FrameInput) {
        let before = [self.fighters[0].position().x, self.fighters[1].position().x];

        for slot in PlayerSlot::BOTH {
            self.apply_intent(slot, input.players[slot.index()]);
        }

        self.resolve_attacks();

        for fighter in &mut self.fighters {
            fighter.physics_step();
        }

        for effect in &mut self.effects {
            effect.advance();
        }
        self.effects.retain(|effect| !effect.is_expired());

        self.evaluate_outcome();

        let net_movement: f32 = self
            .fighters
            .iter()
            .zip(before)
            .map(|(fighter, x)| fighter.position().x - x)
            .sum();
        self.scroll_background(net_movement);
    }

    fn apply_intent(&mut self, slot: PlayerSlot, intent: PlayerIntent) {
        let width = self.playfield.width;
        let fighter = &mut self.fighters[slot.index()];
        let speed = fighter.stats.move_speed;

        if intent.left {
            fighter.move_by(-speed, width);
        }
        if intent.right {
            fighter.move_by(speed, width);
        }
        if intent.jump {
            fighter.jump();
        }

        if intent.attack {
            if let Some(effect) = fighter.attack(&mut self.timers) {
                self.effects.push(effect);
            }
        } else if !fighter.is_jumping() && !fighter.is_attacking() {
            fighter.set_action(CharacterAction::Idle);
        }
    }

    fn resolve_attacks(&mut self) {
        for attacker in PlayerSlot::BOTH {
            let defender = attacker.opponent();
            if self.fighters[attacker.index()].attack_hits(&self.fighters[defender.index()])
                && self.fighters[defender.index()].get_hit(&mut self.timers)
            {
                debug!("{} hit {}", attacker, defender);
            }
        }
    }

    fn evaluate_outcome(&mut self) {
        let outcome = match (self.fighters[0].is_defeated(), self.fighters[1].is_defeated()) {
            (true, true) => Outcome::Draw,
            (true, false) => Outcome::Winner(PlayerSlot::Two),
            (false, true) => Outcome::Winner(PlayerSlot::One),
            (false, false) => return,
        };

        info!("Game over: {}", outcome.headline());
        self.state = MatchState::GameOver {
            outcome,
            progress: 0.0,
        };
    }

    fn scroll_background(&mut self, net_movement: f32) {
        self.background_offset -= net_movement * self.rules.background_scroll_speed;
        if self.background_offset.abs() >= self.playfield.width {
            self.background_offset = 0.0;
        }
    }

    #[cfg(test)]
    pub(crate) fn fighter_mut(&mut self, slot: PlayerSlot) -> &mut Character {
        &mut self.fighters[slot.index()]
    }

    #[cfg(test)]
    pub(crate) fn timers_mut(&mut self) -> &mut CharacterTimers {
        &mut self.timers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::character::{CharacterTimer, TimerKind};
    use approx::assert_relative_eq;

    fn controller() -> MatchController {
        MatchController::new(Playfield::new(1280.0, 720.0))
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    fn p1(intent: PlayerIntent) -> FrameInput {
        FrameInput {
            players: [intent, PlayerIntent::default()],
            restart: false,
        }
    }

    fn restart() -> FrameInput {
        FrameInput {
            restart: true,
            ..Default::default()
        }
    }

    const RIGHT: PlayerIntent = PlayerIntent {
        left: false,
        right: true,
        jump: false,
        attack: false,
    };

    const ATTACK: PlayerIntent = PlayerIntent {
        left: false,
        right: false,
        jump: false,
        attack: true,
    };

    /// Put P2 right in front of P1's attack
    fn face_off(controller: &mut MatchController) {
        controller.fighter_mut(PlayerSlot::Two).body.position.x = 150.0;
    }

    fn finish_p2(controller: &mut MatchController) {
        face_off(controller);
        controller.fighter_mut(PlayerSlot::Two).set_hearts(1);
        controller.update(&p1(ATTACK));
    }

    #[test]
    fn test_initial_state() {
        let c = controller();
        assert_eq!(c.state(), MatchState::Playing);
        assert_eq!(c.fighter(PlayerSlot::One).position().x, 100.0);
        assert_eq!(c.fighter(PlayerSlot::Two).position().x, 600.0);
        assert_eq!(c.fighter(PlayerSlot::One).hearts(), 5);
        assert!(c.effects().is_empty());
        assert_eq!(c.background_offset(), 0.0);
    }

    #[test]
    fn test_movement_applies_to_right_player() {
        let mut c = controller();
        c.update(&p1(RIGHT));
        assert_eq!(c.fighter(PlayerSlot::One).position().x, 105.0);
        assert_eq!(c.fighter(PlayerSlot::Two).position().x, 600.0);
    }

    #[test]
    fn test_attack_spawns_effect() {
        let mut c = controller();
        c.update(&p1(ATTACK));
        assert_eq!(c.effects().len(), 1);
        assert!(c.fighter(PlayerSlot::One).is_attacking());

        // Held attack does not spawn more while the first is active
        c.update(&p1(ATTACK));
        assert_eq!(c.effects().len(), 1);
    }

    #[test]
    fn test_effects_are_pruned() {
        let mut c = controller();
        c.update(&p1(ATTACK));
        for _ in 0..20 {
            c.update(&idle());
        }
        assert!(c.effects().is_empty());
    }

    #[test]
    fn test_releasing_attack_returns_to_idle_after_window() {
        let mut c = controller();
        c.update(&p1(ATTACK));
        c.update(&idle());
        assert_eq!(c.fighter(PlayerSlot::One).action(), CharacterAction::Attack);

        c.advance_clock(Duration::from_millis(500));
        c.update(&idle());
        assert_eq!(c.fighter(PlayerSlot::One).action(), CharacterAction::Idle);
    }

    #[test]
    fn test_hit_lands_once_per_frame() {
        let mut c = controller();
        face_off(&mut c);

        c.update(&p1(ATTACK));
        assert_eq!(c.fighter(PlayerSlot::Two).hearts(), 4);
        assert!(c.fighter(PlayerSlot::Two).is_invincible());

        // Attack still active, defender invincible
        for _ in 0..10 {
            c.update(&idle());
        }
        assert_eq!(c.fighter(PlayerSlot::Two).hearts(), 4);
    }

    #[test]
    fn test_hitbox_edge_contact_is_a_miss() {
        // Facing right from x=100 the hitbox spans 130..190
        let mut c = controller();
        c.fighter_mut(PlayerSlot::Two).body.position.x = 190.0;
        c.update(&p1(ATTACK));
        assert_eq!(c.fighter(PlayerSlot::Two).hearts(), 5);
        assert!(!c.fighter(PlayerSlot::Two).is_invincible());

        let mut c = controller();
        c.fighter_mut(PlayerSlot::Two).body.position.x = 189.0;
        c.update(&p1(ATTACK));
        assert_eq!(c.fighter(PlayerSlot::Two).hearts(), 4);
    }

    #[test]
    fn test_invincibility_expires_on_wall_clock() {
        let mut c = controller();
        face_off(&mut c);
        c.update(&p1(ATTACK));

        c.advance_clock(Duration::from_millis(999));
        assert!(c.fighter(PlayerSlot::Two).is_invincible());
        c.advance_clock(Duration::from_millis(1));
        assert!(!c.fighter(PlayerSlot::Two).is_invincible());
    }

    #[test]
    fn test_knockout_ends_match() {
        let mut c = controller();
        finish_p2(&mut c);

        assert_eq!(c.fighter(PlayerSlot::Two).hearts(), 0);
        assert_eq!(c.outcome(), Some(Outcome::Winner(PlayerSlot::One)));
        assert_eq!(c.end_screen_progress(), 0.0);
    }

    #[test]
    fn test_p1_knockout_means_p2_wins() {
        let mut c = controller();
        c.fighter_mut(PlayerSlot::One).body.position.x = 650.0;
        c.fighter_mut(PlayerSlot::One).set_hearts(1);
        c.fighter_mut(PlayerSlot::Two).facing_right = true;

        c.update(&FrameInput {
            players: [PlayerIntent::default(), ATTACK],
            restart: false,
        });
        assert_eq!(c.outcome(), Some(Outcome::Winner(PlayerSlot::Two)));
    }

    #[test]
    fn test_double_knockout_is_draw() {
        let mut c = controller();
        // Back to back, both facing each other
        c.fighter_mut(PlayerSlot::One).body.position.x = 100.0;
        c.fighter_mut(PlayerSlot::Two).body.position.x = 140.0;
        c.fighter_mut(PlayerSlot::Two).facing_right = false;
        c.fighter_mut(PlayerSlot::One).set_hearts(1);
        c.fighter_mut(PlayerSlot::Two).set_hearts(1);

        c.update(&FrameInput {
            players: [ATTACK, ATTACK],
            restart: false,
        });
        assert_eq!(c.outcome(), Some(Outcome::Draw));
        assert_eq!(Outcome::Draw.headline(), "DRAW!");
    }

    #[test]
    fn test_game_over_freezes_gameplay() {
        let mut c = controller();
        finish_p2(&mut c);
        let p1_x = c.fighter(PlayerSlot::One).position().x;
        let hearts = c.fighter(PlayerSlot::One).hearts();

        c.advance_clock(Duration::from_secs(2));
        for _ in 0..30 {
            c.update(&FrameInput {
                players: [RIGHT, ATTACK],
                restart: false,
            });
        }

        assert_eq!(c.fighter(PlayerSlot::One).position().x, p1_x);
        assert_eq!(c.fighter(PlayerSlot::One).hearts(), hearts);
        assert!(c.is_game_over());
    }

    #[test]
    fn test_end_screen_progress_saturates() {
        let mut c = controller();
        finish_p2(&mut c);

        let mut last = c.end_screen_progress();
        for _ in 0..200 {
            c.update(&idle());
            let progress = c.end_screen_progress();
            assert!(progress >= last);
            assert!(progress <= 1.0);
            last = progress;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_end_screen_stages() {
        let rules = MatchRules::STANDARD;

        let start = EndScreenReveal::at(0.0, &rules);
        assert_eq!(start.overlay_alpha, 0);
        assert!(!start.show_scores && !start.show_prompt);

        let middle = EndScreenReveal::at(0.5, &rules);
        assert_eq!(middle.overlay_alpha, 75);
        assert_relative_eq!(middle.headline_size, 32.0);
        assert!(middle.show_scores && !middle.show_prompt);

        let done = EndScreenReveal::at(1.0, &rules);
        assert_eq!(done.overlay_alpha, 150);
        assert!(done.show_scores && done.show_prompt);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut c = controller();
        c.update(&p1(RIGHT));
        c.update(&restart());

        assert_eq!(c.state(), MatchState::Playing);
        assert_eq!(c.fighter(PlayerSlot::One).position().x, 105.0);
        assert!(!c.restart());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut c = controller();
        finish_p2(&mut c);
        let old_ids = [c.fighters()[0].id, c.fighters()[1].id];
        assert!(c.pending_timers() > 0);

        c.update(&restart());

        assert_eq!(c.state(), MatchState::Playing);
        assert_eq!(c.fighter(PlayerSlot::One).hearts(), 5);
        assert_eq!(c.fighter(PlayerSlot::Two).hearts(), 5);
        assert_eq!(c.fighter(PlayerSlot::Two).position().x, 600.0);
        assert!(c.effects().is_empty());
        assert_eq!(c.background_offset(), 0.0);
        assert_eq!(c.pending_timers(), 0);
        assert!(!old_ids.contains(&c.fighters()[0].id));
        assert!(!old_ids.contains(&c.fighters()[1].id));
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut c = controller();
        c.timers_mut().schedule(
            Duration::from_millis(10),
            CharacterTimer {
                owner: 9999,
                kind: TimerKind::Invincibility,
            },
        );
        face_off(&mut c);
        c.update(&p1(ATTACK));

        c.advance_clock(Duration::from_millis(10));
        assert!(c.fighter(PlayerSlot::Two).is_invincible());
        assert!(c.fighter(PlayerSlot::One).is_attacking());
    }

    #[test]
    fn test_background_scrolls_against_movement() {
        let mut c = controller();
        c.update(&p1(RIGHT));
        assert_relative_eq!(c.background_offset(), -2.5);

        c.update(&FrameInput {
            players: [RIGHT, RIGHT],
            restart: false,
        });
        assert_relative_eq!(c.background_offset(), -7.5);
    }

    #[test]
    fn test_background_offset_resets_at_width() {
        let mut c = controller();
        c.set_playfield(Playfield::new(5.0, 100.0));
        c.fighter_mut(PlayerSlot::One).body.position.x = -100.0;
        // Clamp pulls P1 back to 0 (+100 px), scroll = -50 => wraps
        c.update(&p1(RIGHT));
        assert_eq!(c.background_offset(), 0.0);
    }

    #[test]
    fn test_animation_advances_in_both_states() {
        let mut c = controller();
        c.update(&idle());
        assert!(c.fighter(PlayerSlot::One).animation_phase() > 0.0);

        finish_p2(&mut c);
        let phase = c.fighter(PlayerSlot::Two).animation_phase();
        c.update(&idle());
        assert_ne!(c.fighter(PlayerSlot::Two).animation_phase(), phase);
    }
}
