//! One player's board and stats
//!
//! A [`Player`] is only ever touched through its mutex. Mutating calls leave
//! board events queued; [`Player::publish`] turns them into [`GameEvent`]s,
//! applies line clears to the stats and reports whether the board topped out.

use cosmic_tetris_core::{Board, BoardEvent, BoardSnapshot, PieceSource, Stats, UniformSource};
use cosmic_tetris_types::{GameAction, PlayerId};

use crate::config::SessionConfig;
use crate::events::{GameEvent, GameListener};

pub struct Player {
    id: PlayerId,
    board: Board,
    stats: Stats,
}

/// Read-only copy of a player for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub board: BoardSnapshot,
    pub stats: Stats,
}

impl Player {
    pub fn new(id: PlayerId, config: &SessionConfig, seed: u32) -> Self {
        Self::with_source(id, config, Box::new(UniformSource::new(seed)))
    }

    pub fn with_source(id: PlayerId, config: &SessionConfig, source: Box<dyn PieceSource>) -> Self {
        Self {
            id,
            board: Board::new(config.width, config.height, source),
            stats: Stats::default(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn is_topped_out(&self) -> bool {
        self.board.is_topped_out()
    }

    /// Fresh board and stats; the piece source carries on.
    pub fn reset(&mut self) {
        self.board.reset();
        self.stats = Stats::default();
    }

    /// Apply one input. Returns whether the board accepted it.
    pub fn apply(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.board.move_left(),
            GameAction::MoveRight => self.board.move_right(),
            GameAction::MoveDown => self.board.move_down(),
            GameAction::Rotate => self.board.rotate(),
            GameAction::HardDrop => self.board.hard_drop().is_some(),
            GameAction::Hold => self.board.hold(),
        }
    }

    /// One gravity tick: fall a row, or lock if the piece is resting.
    pub fn gravity_step(&mut self) -> bool {
        if self.board.move_down() {
            return true;
        }
        self.board.place().is_some()
    }

    /// Announce current stats (used when a game starts).
    pub(crate) fn score_event(&self) -> GameEvent {
        GameEvent::ScoreChanged {
            player: self.id,
            score: self.stats.score,
            level: self.stats.level,
            lines: self.stats.lines,
        }
    }

    /// Deliver queued board events. Returns true if the board topped out.
    pub fn publish(&mut self, listener: &dyn GameListener) -> bool {
        let mut topped_out = false;
        for event in self.board.take_events() {
            match event {
                BoardEvent::NextPieceChanged(piece) => {
                    listener.on_event(&GameEvent::NextPieceChanged {
                        player: self.id,
                        piece: piece.kind(),
                    });
                }
                BoardEvent::HeldPieceChanged(piece) => {
                    listener.on_event(&GameEvent::HeldPieceChanged {
                        player: self.id,
                        piece: piece.kind(),
                    });
                }
                BoardEvent::PiecePlaced { center } => {
                    listener.on_event(&GameEvent::PiecePlaced {
                        player: self.id,
                        position: center,
                    });
                }
                BoardEvent::Rotated { center } => {
                    listener.on_event(&GameEvent::Rotated {
                        player: self.id,
                        center,
                    });
                }
                BoardEvent::LinesCleared { rows } => {
                    self.stats.record_clear(rows.len());
                    listener.on_event(&GameEvent::LinesCleared {
                        player: self.id,
                        count: rows.len(),
                        rows,
                    });
                    listener.on_event(&self.score_event());
                }
                BoardEvent::ToppedOut => topped_out = true,
            }
        }
        topped_out
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            board: self.board.snapshot(),
            stats: self.stats,
        }
    }
}
