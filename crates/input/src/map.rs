//! Key mapping from terminal events to session commands.
//!
//! Single player:
//!
//! | Key | Command |
//! |---|---|
//! | ← / → / ↓ | move left / right / down |
//! | ↑ | rotate |
//! | Space | hard drop |
//! | C | hold |
//!
//! Two players:
//!
//! | Player 1 | Player 2 | Command |
//! |---|---|---|
//! | A / D / S | ← / → / ↓ | move left / right / down |
//! | W | ↑ | rotate |
//! | Space | Enter | hard drop |
//! | C | `/` | hold |
//!
//! Player 2 hard-drops with Enter and holds with `/` rather than bare Ctrl and
//! Shift: terminals deliver modifiers only together with another key.
//!
//! Both modes: P pauses, R restarts (the front-end only honors it after game
//! over), M / Q / Esc / Ctrl-C quit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{GameAction, GameMode, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Play(PlayerId, GameAction),
    Pause,
    Restart,
    Quit,
}

/// Map a key press to a command for the given mode.
pub fn map_key(mode: GameMode, key: KeyEvent) -> Option<KeyCommand> {
    if should_quit(key) {
        return Some(KeyCommand::Quit);
    }
    if let Some(command) = session_command(key.code) {
        return Some(command);
    }

    let play = match mode {
        GameMode::Single => single_player_action(key.code).map(|a| (PlayerId::One, a)),
        GameMode::Versus => versus_action(key.code),
    };
    play.map(|(player, action)| KeyCommand::Play(player, action))
}

fn session_command(code: KeyCode) -> Option<KeyCommand> {
    match code {
        KeyCode::Char('p') | KeyCode::Char('P') => Some(KeyCommand::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyCommand::Restart),
        _ => None,
    }
}

fn arrow_action(code: KeyCode) -> Option<GameAction> {
    match code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::MoveDown),
        KeyCode::Up => Some(GameAction::Rotate),
        _ => None,
    }
}

fn single_player_action(code: KeyCode) -> Option<GameAction> {
    match code {
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Hold),
        other => arrow_action(other),
    }
}

fn versus_action(code: KeyCode) -> Option<(PlayerId, GameAction)> {
    let player_one = match code {
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::MoveDown),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::Rotate),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Hold),
        _ => None,
    };
    if let Some(action) = player_one {
        return Some((PlayerId::One, action));
    }

    let player_two = match code {
        KeyCode::Enter => Some(GameAction::HardDrop),
        KeyCode::Char('/') => Some(GameAction::Hold),
        other => arrow_action(other),
    };
    player_two.map(|action| (PlayerId::Two, action))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc
    ) || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL))
}
