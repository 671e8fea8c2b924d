//! Per-player gravity tasks
//!
//! Each task sleeps for the player's current gravity interval, then runs one
//! gravity step under the player's lock. The interval is re-read every tick,
//! so level-ups take effect on the next sleep. The sleep races the session's
//! stop channel, so stopping never waits out a full interval.

use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use cosmic_tetris_types::PlayerId;

use crate::error::{EngineError, Result};
use crate::events::GameListener;
use crate::player::Player;
use crate::session::{drive, lock_player, Shared};

pub(crate) struct GravityTask {
    player: PlayerId,
    handle: JoinHandle<()>,
}

impl GravityTask {
    pub(crate) fn spawn(
        runtime: &Handle,
        id: PlayerId,
        player: Arc<Mutex<Player>>,
        shared: Arc<Shared>,
        listener: Arc<dyn GameListener>,
    ) -> Self {
        let mut stop_rx = shared.subscribe();
        let handle = runtime.spawn(async move {
            loop {
                if *stop_rx.borrow() || shared.is_over() {
                    break;
                }

                let interval = lock_player(&player).stats().gravity_interval();
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = stop_rx.changed() => break,
                }

                if shared.is_over() {
                    break;
                }
                if shared.is_paused() {
                    continue;
                }
                drive(&player, &shared, listener.as_ref(), Player::gravity_step);
            }
        });

        Self { player: id, handle }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to exit.
    pub(crate) async fn join(self) -> Result<()> {
        let player = self.player;
        self.handle
            .await
            .map_err(|_| EngineError::TaskFailed { player })
    }
}
