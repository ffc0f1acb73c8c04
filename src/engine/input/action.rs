// Game control definitions and default key bindings

use winit::keyboard::KeyCode;

/// Everything a player (or the match) can be told to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,

    // Combat
    Attack,

    // Meta
    Restart,
}

/// Default bindings for Player 1 (WASD, S attacks)
pub fn default_p1_bindings() -> Vec<(KeyCode, Control)> {
    vec![
        (KeyCode::KeyA, Control::MoveLeft),
        (KeyCode::KeyD, Control::MoveRight),
        (KeyCode::KeyW, Control::Jump),
        (KeyCode::KeyS, Control::Attack),
    ]
}

/// Default bindings for Player 2 (arrows, Space attacks)
pub fn default_p2_bindings() -> Vec<(KeyCode, Control)> {
    vec![
        (KeyCode::ArrowLeft, Control::MoveLeft),
        (KeyCode::ArrowRight, Control::MoveRight),
        (KeyCode::ArrowUp, Control::Jump),
        (KeyCode::Space, Control::Attack),
    ]
}

/// Global bindings (not player-specific)
///
/// Space doubles as Player 2's attack; restart is only honoured on the end screen.
pub fn global_bindings() -> Vec<(KeyCode, Control)> {
    vec![(KeyCode::Space, Control::Restart)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_control_equality() {
        assert_eq!(Control::Jump, Control::Jump);
        assert_ne!(Control::Jump, Control::Attack);
    }

    #[test]
    fn test_player_bindings_cover_all_player_controls() {
        for bindings in [default_p1_bindings(), default_p2_bindings()] {
            let controls: HashSet<Control> = bindings.iter().map(|(_, c)| *c).collect();
            assert!(controls.contains(&Control::MoveLeft));
            assert!(controls.contains(&Control::MoveRight));
            assert!(controls.contains(&Control::Jump));
            assert!(controls.contains(&Control::Attack));
            assert!(!controls.contains(&Control::Restart));
        }
    }

    #[test]
    fn test_players_use_disjoint_keys() {
        let p1: HashSet<KeyCode> = default_p1_bindings().into_iter().map(|(k, _)| k).collect();
        let p2: HashSet<KeyCode> = default_p2_bindings().into_iter().map(|(k, _)| k).collect();
        assert!(p1.is_disjoint(&p2));
    }

    #[test]
    fn test_restart_is_space() {
        assert_eq!(global_bindings(), vec![(KeyCode::Space, Control::Restart)]);
    }
}
