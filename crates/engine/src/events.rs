//! Notifications pushed out of a session
//!
//! Every notification is a [`GameEvent`]. Listeners receive them through
//! [`GameListener::on_event`], whose default implementation fans each event
//! out to a per-kind hook, so a listener only overrides what it cares about.
//!
//! Events are delivered while the emitting player's board lock is held.
//! A listener must return quickly and must never call back into the session.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use cosmic_tetris_types::{GameMode, PieceKind, PlayerId, Position};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameOutcome {
    /// The board that topped out.
    pub loser: PlayerId,
    /// The surviving player in a two-player session.
    pub winner: Option<PlayerId>,
}

impl GameOutcome {
    pub fn new(mode: GameMode, loser: PlayerId) -> Self {
        let winner = match mode {
            GameMode::Single => None,
            GameMode::Versus => Some(loser.other()),
        };
        Self { loser, winner }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GameEvent {
    /// Gravity tasks were spawned.
    Started { mode: GameMode },
    NextPieceChanged { player: PlayerId, piece: PieceKind },
    HeldPieceChanged { player: PlayerId, piece: PieceKind },
    /// Fired for every placement, before line clearing.
    PiecePlaced { player: PlayerId, position: Position },
    Rotated { player: PlayerId, center: Position },
    /// Rows are pre-clear indices, bottom first.
    LinesCleared {
        player: PlayerId,
        count: usize,
        rows: Vec<usize>,
    },
    ScoreChanged {
        player: PlayerId,
        score: u32,
        level: u32,
        lines: u32,
    },
    GameOver { outcome: GameOutcome },
    Paused { paused: bool },
    /// Gravity tasks have been joined.
    Stopped,
}

/// Capability trait for session collaborators (effects, sound, UI, logs).
pub trait GameListener: Send + Sync {
    fn on_event(&self, event: &GameEvent) {
        match event {
            GameEvent::NextPieceChanged { player, piece } => {
                self.on_next_piece_changed(*player, *piece)
            }
            GameEvent::HeldPieceChanged { player, piece } => {
                self.on_held_piece_changed(*player, *piece)
            }
            GameEvent::PiecePlaced { player, position } => self.on_piece_placed(*player, *position),
            GameEvent::Rotated { player, center } => self.on_rotated(*player, *center),
            GameEvent::LinesCleared {
                player,
                count,
                rows,
            } => self.on_lines_cleared(*player, *count, rows),
            GameEvent::ScoreChanged {
                player,
                score,
                level,
                lines,
            } => self.on_score_changed(*player, *score, *level, *lines),
            GameEvent::GameOver { outcome } => self.on_game_over(*outcome),
            GameEvent::Started { .. } | GameEvent::Paused { .. } | GameEvent::Stopped => {}
        }
    }

    fn on_next_piece_changed(&self, _player: PlayerId, _piece: PieceKind) {}
    fn on_held_piece_changed(&self, _player: PlayerId, _piece: PieceKind) {}
    fn on_lines_cleared(&self, _player: PlayerId, _count: usize, _rows: &[usize]) {}
    fn on_piece_placed(&self, _player: PlayerId, _position: Position) {}
    fn on_rotated(&self, _player: PlayerId, _center: Position) {}
    fn on_game_over(&self, _outcome: GameOutcome) {}
    fn on_score_changed(&self, _player: PlayerId, _score: u32, _level: u32, _lines: u32) {}
}

/// Ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl GameListener for NullListener {
    fn on_event(&self, _event: &GameEvent) {}
}

/// Keeps every event in memory. Used by tests and replays.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Mutex<Vec<GameEvent>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| pred(e))
            .count()
    }
}

impl GameListener for EventRecorder {
    fn on_event(&self, event: &GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Forwards each event to several listeners, in order.
#[derive(Default, Clone)]
pub struct Fanout {
    listeners: Vec<Arc<dyn GameListener>>,
}

impl Fanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, listener: Arc<dyn GameListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl GameListener for Fanout {
    fn on_event(&self, event: &GameEvent) {
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct ClearCounter {
        lines: AtomicUsize,
        game_overs: AtomicUsize,
    }

    impl GameListener for ClearCounter {
        fn on_lines_cleared(&self, _player: PlayerId, count: usize, _rows: &[usize]) {
            self.lines.fetch_add(count, Ordering::SeqCst);
        }

        fn on_game_over(&self, _outcome: GameOutcome) {
            self.game_overs.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn default_on_event_dispatches_to_hooks() {
        let counter = ClearCounter::default();
        counter.on_event(&GameEvent::LinesCleared {
            player: PlayerId::One,
            count: 2,
            rows: vec![19, 18],
        });
        counter.on_event(&GameEvent::Stopped);
        counter.on_event(&GameEvent::GameOver {
            outcome: GameOutcome::new(GameMode::Single, PlayerId::One),
        });
        assert_eq!(counter.lines.load(Ordering::SeqCst), 2);
        assert_eq!(counter.game_overs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn outcome_names_winner_only_in_versus() {
        let single = GameOutcome::new(GameMode::Single, PlayerId::One);
        assert_eq!(single.winner, None);

        let versus = GameOutcome::new(GameMode::Versus, PlayerId::Two);
        assert_eq!(versus.loser, PlayerId::Two);
        assert_eq!(versus.winner, Some(PlayerId::One));
    }

    #[test]
    fn fanout_reaches_every_listener() {
        let a = Arc::new(EventRecorder::new());
        let b = Arc::new(EventRecorder::new());
        let fanout = Fanout::new().with(a.clone()).with(b.clone());
        fanout.on_event(&GameEvent::Paused { paused: true });
        assert_eq!(a.events(), vec![GameEvent::Paused { paused: true }]);
        assert_eq!(b.take().len(), 1);
        assert!(b.events().is_empty());
        assert_eq!(fanout.len(), 2);
    }

    #[test]
    fn events_serialize_tagged() {
        let json = serde_json::to_string(&GameEvent::LinesCleared {
            player: PlayerId::Two,
            count: 1,
            rows: vec![19],
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"event":"linesCleared","player":"two","count":1,"rows":[19]}"#
        );
    }
}
