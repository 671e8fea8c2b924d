//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and nothing else. It has no
//! dependencies on timers, threads, terminals or I/O, which keeps it:
//!
//! - **Deterministic**: a seeded [`UniformSource`] replays identical games
//! - **Testable**: every rule is a plain method call on a [`Board`]
//! - **Portable**: the session engine and the terminal front-end both build on it
//!
//! # Module Structure
//!
//! - [`piece`]: tetromino shapes and clockwise matrix rotation
//! - [`board`]: grid, piece slots, movement, wall kicks, hold, placement and line clears
//! - [`rng`]: piece sources (seeded uniform, scripted)
//! - [`scoring`]: line clear points, levels, gravity intervals and [`Stats`]
//! - [`snapshot`]: read-only board copies for rendering
//!
//! # Game Rules
//!
//! - **Rotation**: clockwise only; a blocked rotation retries one cell left,
//!   one cell right, then one cell up
//! - **Hold**: once per spawned piece; swapping a held piece back in resets it
//!   to its spawn position
//! - **Top-out**: the game ends when a freshly spawned piece collides
//! - **Scoring**: 100/300/500/800 times the level for 1-4 lines
//!
//! # Example
//!
//! ```
//! use cosmic_tetris_core::{Board, ScriptedSource};
//! use cosmic_tetris_core::types::PieceKind;
//!
//! let mut board = Board::new(10, 20, Box::new(ScriptedSource::new([PieceKind::I])));
//! assert_eq!(board.position().x, 3);
//!
//! board.move_right();
//! board.rotate();
//! let placement = board.hard_drop().unwrap();
//! assert!(placement.cleared_rows.is_empty());
//! ```

pub mod board;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use cosmic_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardEvent, Placement, KICK_OFFSETS};
pub use piece::Piece;
pub use rng::{PieceSource, ScriptedSource, SimpleRng, UniformSource};
pub use scoring::{gravity_interval, level_for_lines, line_clear_points, Stats};
pub use snapshot::{ActivePiece, BoardSnapshot};
