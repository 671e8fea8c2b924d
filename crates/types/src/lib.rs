//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the simulation core, the
//! session engine and the terminal front-end alike.
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! Boards of other sizes are supported by the core; these are the defaults.
//!
//! # Gravity
//!
//! The gravity period depends on the level:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 950ms |
//! | 10 | 550ms |
//! | 19+ | 100ms (floor) |
//!
//! `interval = max(100, 1000 - (level - 1) * 50)`
//!
//! # Examples
//!
//! ```
//! use cosmic_tetris_types::{GameAction, PieceKind, PlayerId, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.color(), 6);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(PlayerId::One.other(), PlayerId::Two);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_GRAVITY_MS: u64 = 1000;

/// Gravity speed-up per level
pub const GRAVITY_STEP_MS: u64 = 50;

/// Fastest gravity interval, reached at level 19
pub const MIN_GRAVITY_MS: u64 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Starting level of every game
pub const START_LEVEL: u32 = 1;

/// Line clear scoring table
///
/// Base points for clearing N lines in one placement, multiplied by the
/// current level:
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Any other count scores nothing.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each kind doubles as a palette index (see [`PieceKind::color`]):
/// - **I** (1): Cyan, horizontal bar
/// - **J** (2): Blue, J-shaped
/// - **L** (3): Orange, L-shaped (mirror of J)
/// - **O** (4): Yellow, 2x2 square
/// - **S** (5): Green, S-shaped
/// - **T** (6): Magenta, T-shaped
/// - **Z** (7): Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in palette order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Palette index in `1..=7`.
    ///
    /// This is the value written into the board grid when a piece locks.
    ///
    /// ```
    /// use cosmic_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color(), 1);
    /// assert_eq!(PieceKind::Z.color(), 7);
    /// ```
    pub fn color(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color`]. Returns `None` for 0 and anything above 7.
    pub fn from_color(color: u8) -> Option<Self> {
        match color {
            1..=7 => Some(Self::ALL[(color - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use cosmic_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Identifies a board within a session.
///
/// Single-player sessions only have [`PlayerId::One`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Zero-based slot index.
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// The opposing player in a two-player session.
    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerId::One => "player1",
            PlayerId::Two => "player2",
        }
    }
}

/// Session composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Single,
    Versus,
}

impl GameMode {
    pub fn player_count(self) -> usize {
        match self {
            GameMode::Single => 1,
            GameMode::Versus => 2,
        }
    }

    /// Players taking part, in slot order.
    pub fn players(self) -> &'static [PlayerId] {
        match self {
            GameMode::Single => &[PlayerId::One],
            GameMode::Versus => &[PlayerId::One, PlayerId::Two],
        }
    }
}

/// Piece actions a player can request
///
/// These are the board-mutating inputs; session-level commands (pause,
/// restart, quit) live with the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Soft drop: move piece one cell down
    MoveDown,
    /// Rotate piece 90° clockwise (with wall kicks)
    Rotate,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Hold current piece (once per spawned piece)
    Hold,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use cosmic_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" | "softdrop" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
        }
    }
}

/// A grid coordinate (column `x`, row `y`).
///
/// `y` may be negative for cells above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_round_trips_through_palette() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_color(kind.color()), Some(kind));
        }
        assert_eq!(PieceKind::from_color(0), None);
        assert_eq!(PieceKind::from_color(8), None);
    }

    #[test]
    fn palette_matches_classic_ordering() {
        let colors: Vec<u8> = PieceKind::ALL.iter().map(|k| k.color()).collect();
        assert_eq!(colors, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn player_slots() {
        assert_eq!(PlayerId::One.index(), 0);
        assert_eq!(PlayerId::Two.index(), 1);
        assert_eq!(PlayerId::Two.other(), PlayerId::One);
        assert_eq!(GameMode::Single.players(), &[PlayerId::One]);
        assert_eq!(GameMode::Versus.player_count(), 2);
    }

    #[test]
    fn soft_drop_alias_parses() {
        assert_eq!(GameAction::from_str("softDrop"), Some(GameAction::MoveDown));
        assert_eq!(GameAction::MoveDown.as_str(), "moveDown");
    }

    #[test]
    fn line_scores_table() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }
}
