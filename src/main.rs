//! Terminal Tetris runner (default binary).
//!
//! Gravity runs on tokio tasks owned by the session; this thread only polls
//! crossterm for keys and redraws the framebuffer.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::runtime::Runtime;

use cosmic_tetris::engine::{EventLog, Fanout, HighScores, Session, SessionConfig};
use cosmic_tetris::input::{map_key, KeyCommand};
use cosmic_tetris::term::{FrameBuffer, GameView, MatchView, TerminalRenderer, Viewport};
use cosmic_tetris::types::GameMode;

/// Redraw period while waiting for keys.
const FRAME_MS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Single,
    Two,
}

#[derive(Debug, Parser)]
#[command(name = "cosmic-tetris")]
#[command(about = "Terminal Tetris with single and split-screen two-player modes")]
struct Args {
    #[arg(long, value_enum, default_value_t = ModeArg::Single)]
    mode: ModeArg,

    /// Piece RNG seed (overrides TETRIS_SEED)
    #[arg(long)]
    seed: Option<u32>,

    /// Board columns (overrides TETRIS_BOARD_WIDTH)
    #[arg(long)]
    width: Option<u8>,

    /// Board rows (overrides TETRIS_BOARD_HEIGHT)
    #[arg(long)]
    height: Option<u8>,

    /// Append every game event as JSON lines to this file (overrides TETRIS_EVENT_LOG)
    #[arg(long)]
    event_log: Option<String>,
}

impl Args {
    fn game_mode(&self) -> GameMode {
        match self.mode {
            ModeArg::Single => GameMode::Single,
            ModeArg::Two => GameMode::Versus,
        }
    }

    fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::from_env();
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(path) = &self.event_log {
            config.event_log_path = Some(path.clone());
        }
        config
    }
}

fn main() {
    let args = Args::parse();

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, &args));

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Err(err) = result {
        eprintln!("[cosmic-tetris] {:#}", err);
        std::process::exit(1);
    }
}

fn run(term: &mut TerminalRenderer, args: &Args) -> Result<()> {
    let mode = args.game_mode();
    let config = args.session_config();
    config.validate()?;

    let rt = Runtime::new().context("failed to start tokio runtime")?;

    let mut listeners = Fanout::new();
    let mut log_writer = None;
    if let Some(path) = &config.event_log_path {
        let (log, writer) = EventLog::spawn(path, rt.handle());
        listeners = listeners.with(Arc::new(log));
        log_writer = Some(writer);
    }

    let mut session = Session::new(mode, config, Arc::new(listeners), rt.handle().clone())?;
    session.start()?;

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut high_scores = HighScores::new();
    let mut recorded = false;

    loop {
        let snapshots = session.snapshots();
        if session.is_over() && !recorded {
            high_scores.record_all(&snapshots);
            recorded = true;
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let frame = MatchView {
            players: &snapshots,
            paused: session.is_paused(),
            outcome: session.outcome(),
            best_score: high_scores.best(),
        };
        view.render_into(&frame, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        if !event::poll(Duration::from_millis(FRAME_MS))? {
            continue;
        }
        match event::read()? {
            // Terminal auto-repeat doubles as held-key movement.
            Event::Key(key) if key.kind != KeyEventKind::Release => match map_key(mode, key) {
                Some(KeyCommand::Quit) => break,
                Some(KeyCommand::Pause) => {
                    session.toggle_pause();
                }
                Some(KeyCommand::Restart) if session.is_over() => {
                    rt.block_on(session.restart())?;
                    recorded = false;
                }
                Some(KeyCommand::Play(player, action)) => {
                    session.apply(player, action);
                }
                Some(KeyCommand::Restart) | None => {}
            },
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }

    rt.block_on(session.stop())?;
    drop(session);

    if let Some(writer) = log_writer {
        rt.block_on(writer.finish())
            .context("event log writer failed")?;
    }
    Ok(())
}
