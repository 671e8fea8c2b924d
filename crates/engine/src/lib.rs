//! Session engine - gravity tasks, input, notifications
//!
//! Builds on the pure rules in `cosmic_tetris_core` and adds time and
//! concurrency:
//!
//! - [`session`]: [`Session`] runs one or two players, each behind its own lock
//! - `gravity`: one cancellable tokio task per player
//! - [`player`]: board + stats, turning board events into [`GameEvent`]s
//! - [`events`]: [`GameEvent`], the [`GameListener`] capability trait and
//!   stock listeners
//! - [`event_log`]: JSONL log of every event
//! - [`highscore`]: in-memory top-5 table
//! - [`config`] and [`error`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cosmic_tetris_engine::{NullListener, Session, SessionConfig};
//! use cosmic_tetris_types::{GameAction, GameMode, PlayerId};
//!
//! # async fn demo() -> Result<(), cosmic_tetris_engine::EngineError> {
//! let mut session = Session::new(
//!     GameMode::Single,
//!     SessionConfig::default(),
//!     Arc::new(NullListener),
//!     tokio::runtime::Handle::current(),
//! )?;
//! session.start()?;
//! session.apply(PlayerId::One, GameAction::Rotate);
//! session.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod event_log;
pub mod events;
mod gravity;
pub mod highscore;
pub mod player;
pub mod session;

pub use config::SessionConfig;
pub use error::EngineError;
pub use event_log::{EventLog, EventLogWriter};
pub use events::{EventRecorder, Fanout, GameEvent, GameListener, GameOutcome, NullListener};
pub use highscore::{HighScoreEntry, HighScores};
pub use player::{Player, PlayerSnapshot};
pub use session::Session;
