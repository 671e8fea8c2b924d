//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: views draw into a [`FrameBuffer`],
//! and [`TerminalRenderer`] flushes it to the terminal, rewriting only cells
//! that changed. No widget toolkit is involved.
//!
//! - [`fb`]: framebuffer and cell styles
//! - [`game_view`]: one or two boards with score panels, previews and overlays
//! - [`renderer`]: crossterm output

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use cosmic_tetris_core as core;
pub use cosmic_tetris_engine as engine;
pub use cosmic_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, MatchView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
