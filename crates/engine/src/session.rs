//! Session - one or two players, their gravity tasks and shared flags
//!
//! Each player lives behind its own `Mutex`; input and gravity both go
//! through [`drive`], which holds that lock for the whole operation,
//! including event delivery. The players share one pause flag, one
//! game-over flag and one stop channel. The first board to top out ends the
//! session for everyone.
//!
//! Lifecycle:
//!
//! ```text
//! new ──start──▶ running ──stop().await──▶ stopped ──start──▶ running
//!                   │                                  ▲
//!                   └──── top-out (tasks exit) ────restart().await
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;

use cosmic_tetris_core::PieceSource;
use cosmic_tetris_types::{GameAction, GameMode, PlayerId};

use crate::config::SessionConfig;
use crate::error::{EngineError, Result};
use crate::events::{GameEvent, GameListener, GameOutcome};
use crate::gravity::GravityTask;
use crate::player::{Player, PlayerSnapshot};

/// Flags shared by every player of one game.
pub(crate) struct Shared {
    mode: GameMode,
    paused: AtomicBool,
    over: AtomicBool,
    outcome: Mutex<Option<GameOutcome>>,
    stop_tx: watch::Sender<bool>,
}

impl Shared {
    fn new(mode: GameMode) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            mode,
            paused: AtomicBool::new(false),
            over: AtomicBool::new(false),
            outcome: Mutex::new(None),
            stop_tx,
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.stop_tx.subscribe()
    }

    pub(crate) fn is_over(&self) -> bool {
        self.over.load(Ordering::SeqCst)
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn stop_requested(&self) -> bool {
        *self.stop_tx.borrow()
    }

    fn signal_stop(&self) {
        self.stop_tx.send_replace(true);
    }

    fn outcome(&self) -> Option<GameOutcome> {
        *self.outcome.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// First caller wins; later top-outs are ignored.
    fn finish(&self, loser: PlayerId, listener: &dyn GameListener) {
        if self
            .over
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }
        let outcome = GameOutcome::new(self.mode, loser);
        *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
        listener.on_event(&GameEvent::GameOver { outcome });
        self.signal_stop();
    }
}

pub(crate) fn lock_player(player: &Mutex<Player>) -> MutexGuard<'_, Player> {
    player.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run `op` on a player under its lock and deliver the resulting events.
///
/// Returns `None` without touching the board while paused or over.
pub(crate) fn drive<R>(
    player: &Mutex<Player>,
    shared: &Shared,
    listener: &dyn GameListener,
    op: impl FnOnce(&mut Player) -> R,
) -> Option<R> {
    let mut guard = lock_player(player);
    if shared.is_over() || shared.is_paused() {
        return None;
    }
    let result = op(&mut *guard);
    if guard.publish(listener) {
        shared.finish(guard.id(), listener);
    }
    Some(result)
}

pub struct Session {
    mode: GameMode,
    config: SessionConfig,
    players: Vec<Arc<Mutex<Player>>>,
    listener: Arc<dyn GameListener>,
    shared: Arc<Shared>,
    tasks: Vec<GravityTask>,
    /// Tasks that exited on their own before a `start`; joined by `stop`.
    retired: Vec<GravityTask>,
    runtime: Handle,
}

impl Session {
    /// Build a session with seeded uniform piece sources.
    ///
    /// In two-player mode both players draw from the same seed, so they
    /// receive the same piece sequence.
    pub fn new(
        mode: GameMode,
        config: SessionConfig,
        listener: Arc<dyn GameListener>,
        runtime: Handle,
    ) -> Result<Self> {
        config.validate()?;
        let seed = config.resolve_seed();
        let players = mode
            .players()
            .iter()
            .map(|&id| Player::new(id, &config, seed))
            .collect();
        Ok(Self::assemble(mode, config, players, listener, runtime))
    }

    /// Build a session with explicit piece sources, one per player.
    pub fn with_sources(
        mode: GameMode,
        config: SessionConfig,
        sources: Vec<Box<dyn PieceSource>>,
        listener: Arc<dyn GameListener>,
        runtime: Handle,
    ) -> Result<Self> {
        config.validate()?;
        if sources.len() != mode.player_count() {
            return Err(EngineError::InvalidConfig(format!(
                "{} piece sources for {} players",
                sources.len(),
                mode.player_count()
            )));
        }
        let players = mode
            .players()
            .iter()
            .zip(sources)
            .map(|(&id, source)| Player::with_source(id, &config, source))
            .collect();
        Ok(Self::assemble(mode, config, players, listener, runtime))
    }

    fn assemble(
        mode: GameMode,
        config: SessionConfig,
        players: Vec<Player>,
        listener: Arc<dyn GameListener>,
        runtime: Handle,
    ) -> Self {
        Self {
            mode,
            config,
            players: players
                .into_iter()
                .map(|p| Arc::new(Mutex::new(p)))
                .collect(),
            listener,
            shared: Arc::new(Shared::new(mode)),
            tasks: Vec::new(),
            retired: Vec::new(),
            runtime,
        }
    }

    /// Spawn one gravity task per player.
    ///
    /// Fails with [`EngineError::AlreadyRunning`] while a previous task is
    /// still alive. Tasks that already exited are kept so the next
    /// [`Session::stop`] still reports a panic among them.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Err(EngineError::AlreadyRunning);
        }
        self.retired.append(&mut self.tasks);

        if self.shared.stop_requested() && !self.shared.is_over() {
            // Resuming after stop(): same game, fresh stop channel.
            let fresh = Shared::new(self.mode);
            fresh.paused.store(self.shared.is_paused(), Ordering::SeqCst);
            self.shared = Arc::new(fresh);
        }

        self.listener.on_event(&GameEvent::Started { mode: self.mode });
        for player in &self.players {
            let mut guard = lock_player(player);
            if guard.publish(self.listener.as_ref()) {
                self.shared.finish(guard.id(), self.listener.as_ref());
            }
            self.listener.on_event(&guard.score_event());
        }

        for player in &self.players {
            let id = lock_player(player).id();
            self.tasks.push(GravityTask::spawn(
                &self.runtime,
                id,
                Arc::clone(player),
                Arc::clone(&self.shared),
                Arc::clone(&self.listener),
            ));
        }
        Ok(())
    }

    /// Signal every gravity task and wait until all have exited.
    ///
    /// Returns the first task failure, including tasks that ended before
    /// an intervening `start`.
    pub async fn stop(&mut self) -> Result<()> {
        self.shared.signal_stop();

        let mut result = Ok(());
        let retired = std::mem::take(&mut self.retired);
        for task in retired.into_iter().chain(std::mem::take(&mut self.tasks)) {
            if let Err(err) = task.join().await {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        self.listener.on_event(&GameEvent::Stopped);
        result
    }

    /// Stop, reset every board and stat, and start again.
    pub async fn restart(&mut self) -> Result<()> {
        self.stop().await?;
        self.shared = Arc::new(Shared::new(self.mode));
        for player in &self.players {
            lock_player(player).reset();
        }
        self.start()
    }

    /// Apply one input for `player`. Ignored while paused or over.
    pub fn apply(&self, player: PlayerId, action: GameAction) -> bool {
        let Some(slot) = self.players.get(player.index()) else {
            return false;
        };
        drive(slot, &self.shared, self.listener.as_ref(), |p| p.apply(action)).unwrap_or(false)
    }

    /// Flip the shared pause flag. Ignored once the game is over.
    /// Returns the resulting state.
    pub fn toggle_pause(&self) -> bool {
        if self.shared.is_over() {
            return self.shared.is_paused();
        }
        let paused = !self.shared.paused.fetch_xor(true, Ordering::SeqCst);
        self.listener.on_event(&GameEvent::Paused { paused });
        paused
    }

    /// Direct access to a player for setup and inspection.
    ///
    /// Board events queued by `f` are delivered by the next operation.
    pub fn with_player<R>(&self, player: PlayerId, f: impl FnOnce(&mut Player) -> R) -> Option<R> {
        self.players
            .get(player.index())
            .map(|slot| f(&mut *lock_player(slot)))
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }

    pub fn is_paused(&self) -> bool {
        self.shared.is_paused()
    }

    pub fn is_over(&self) -> bool {
        self.shared.is_over()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.shared.outcome()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn snapshot(&self, player: PlayerId) -> Option<PlayerSnapshot> {
        self.with_player(player, |p| p.snapshot())
    }

    /// Snapshots of every player, in slot order.
    pub fn snapshots(&self) -> Vec<PlayerSnapshot> {
        self.players
            .iter()
            .map(|slot| lock_player(slot).snapshot())
            .collect()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shared.signal_stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventRecorder, NullListener};
    use cosmic_tetris_core::ScriptedSource;
    use cosmic_tetris_types::PieceKind;

    fn scripted(mode: GameMode, kinds: &[PieceKind]) -> Vec<Box<dyn PieceSource>> {
        (0..mode.player_count())
            .map(|_| Box::new(ScriptedSource::new(kinds.to_vec())) as Box<dyn PieceSource>)
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_is_rejected() {
        let mut session = Session::new(
            GameMode::Single,
            SessionConfig::default(),
            Arc::new(NullListener),
            Handle::current(),
        )
        .unwrap();

        session.start().unwrap();
        assert_eq!(session.start(), Err(EngineError::AlreadyRunning));

        session.stop().await.unwrap();
        assert!(!session.is_running());
        session.start().unwrap();
        assert!(session.is_running());
        session.stop().await.unwrap();
    }

    #[test]
    fn stop_returns_promptly_on_plain_runtime() {
        tokio_test::block_on(async {
            let mut session = Session::new(
                GameMode::Versus,
                SessionConfig::default(),
                Arc::new(NullListener),
                Handle::current(),
            )
            .unwrap();
            session.start().unwrap();
            // Both tasks are mid-sleep (1s); stop must not wait it out.
            let begin = std::time::Instant::now();
            session.stop().await.unwrap();
            assert!(begin.elapsed() < std::time::Duration::from_millis(500));
            assert!(!session.is_running());
        });
    }

    #[tokio::test(start_paused = true)]
    async fn source_count_must_match_mode() {
        let err = Session::with_sources(
            GameMode::Versus,
            SessionConfig::default(),
            scripted(GameMode::Single, &[PieceKind::O]),
            Arc::new(NullListener),
            Handle::current(),
        )
        .err();
        assert!(matches!(err, Some(EngineError::InvalidConfig(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_config_is_rejected() {
        let config = SessionConfig {
            width: 2,
            ..SessionConfig::default()
        };
        let result = Session::new(
            GameMode::Single,
            config,
            Arc::new(NullListener),
            Handle::current(),
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_blocks_input_and_is_announced() {
        let recorder = Arc::new(EventRecorder::new());
        let session = Session::with_sources(
            GameMode::Single,
            SessionConfig::default(),
            scripted(GameMode::Single, &[PieceKind::T]),
            recorder.clone(),
            Handle::current(),
        )
        .unwrap();

        assert!(session.toggle_pause());
        assert!(!session.apply(PlayerId::One, GameAction::MoveLeft));
        assert!(!session.toggle_pause());
        assert!(session.apply(PlayerId::One, GameAction::MoveLeft));
        assert_eq!(
            recorder.count(|e| matches!(e, GameEvent::Paused { .. })),
            2
        );
    }

    #[tokio::test(start_paused = true)]
    async fn apply_for_absent_player_is_ignored() {
        let session = Session::with_sources(
            GameMode::Single,
            SessionConfig::default(),
            scripted(GameMode::Single, &[PieceKind::T]),
            Arc::new(NullListener),
            Handle::current(),
        )
        .unwrap();
        assert!(!session.apply(PlayerId::Two, GameAction::MoveLeft));
        assert!(session.snapshot(PlayerId::Two).is_none());
        assert_eq!(session.snapshots().len(), 1);
    }
}
