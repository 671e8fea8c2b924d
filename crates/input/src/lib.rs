//! Terminal input module.
//!
//! Maps `crossterm` key events to [`KeyCommand`]s for one or two players.
//! Terminal auto-repeat provides held-key movement; there is no DAS layer.

pub mod map;

pub use cosmic_tetris_types as types;

pub use map::{map_key, should_quit, KeyCommand};
