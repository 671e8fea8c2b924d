//! Cosmic Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benchmarks can write `cosmic_tetris::core::Board`
//! and friends. The implementation lives in dedicated crates under `crates/`.

pub use cosmic_tetris_core as core;
pub use cosmic_tetris_engine as engine;
pub use cosmic_tetris_input as input;
pub use cosmic_tetris_term as term;
pub use cosmic_tetris_types as types;
