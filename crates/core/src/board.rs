//! Board module - the playfield state machine
//!
//! The board owns a `width x height` grid plus the current/next/held piece
//! slots. Coordinates: (x, y) where x grows left to right and y grows top to
//! bottom; row 0 is the top visible row. The current piece is positioned by the
//! top-left corner of its bounding box and may poke above row 0.
//!
//! Every mutation validates before it writes, so a failed move or rotation
//! leaves the board untouched. Observable side effects are queued as
//! [`BoardEvent`]s and drained by the owner with [`Board::take_events`].

use std::fmt;

use crate::piece::Piece;
use crate::rng::{PieceSource, UniformSource};
use crate::snapshot::{ActivePiece, BoardSnapshot};
use crate::types::{Cell, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Rotation retry offsets, tried in order: in place, left, right, up.
pub const KICK_OFFSETS: [(i8, i8); 4] = [(0, 0), (-1, 0), (1, 0), (0, -1)];

/// Something observable happened on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// `next` was replaced.
    NextPieceChanged(Piece),
    /// `held` was set or swapped.
    HeldPieceChanged(Piece),
    /// A piece was written into the grid, centered at the given cell.
    PiecePlaced { center: Position },
    /// The current piece rotated; `center` is the center of its new bounding box.
    Rotated { center: Position },
    /// Full rows were removed. Indices are pre-clear rows, bottom first.
    LinesCleared { rows: Vec<usize> },
    /// A freshly spawned piece collided; the board is finished.
    ToppedOut,
}

/// Result of locking the current piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub center: Position,
    pub cleared_rows: Vec<usize>,
    pub topped_out: bool,
}

impl Placement {
    pub fn lines_cleared(&self) -> usize {
        self.cleared_rows.len()
    }
}

pub struct Board {
    width: u8,
    height: u8,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
    current: Option<Piece>,
    next: Option<Piece>,
    held: Option<Piece>,
    x: i8,
    y: i8,
    can_hold: bool,
    topped_out: bool,
    source: Box<dyn PieceSource>,
    events: Vec<BoardEvent>,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("current", &self.current.map(|p| p.kind()))
            .field("next", &self.next.map(|p| p.kind()))
            .field("held", &self.held.map(|p| p.kind()))
            .field("position", &(self.x, self.y))
            .field("can_hold", &self.can_hold)
            .field("topped_out", &self.topped_out)
            .finish()
    }
}

impl Board {
    /// Create a board and start a game on it.
    ///
    /// The caller is responsible for keeping the dimensions sane (at least
    /// 4x4 so every piece fits, and small enough for `i8` coordinates).
    pub fn new(width: u8, height: u8, source: Box<dyn PieceSource>) -> Self {
        let mut board = Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            current: None,
            next: None,
            held: None,
            x: 0,
            y: 0,
            can_hold: true,
            topped_out: false,
            source,
            events: Vec::new(),
        };
        board.reset();
        board
    }

    /// Standard 10x20 board with a seeded uniform source.
    pub fn standard(seed: u32) -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT, Box::new(UniformSource::new(seed)))
    }

    /// Zero the grid, empty the hold slot and spawn a fresh piece.
    ///
    /// The piece source keeps its state, so a reset continues the sequence.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.current = None;
        self.next = None;
        self.held = None;
        self.can_hold = true;
        self.topped_out = false;
        self.events.clear();
        self.spawn_next();
    }

    /// Swap in a different piece source (takes effect from the next draw).
    pub fn set_source(&mut self, source: Box<dyn PieceSource>) {
        self.source = source;
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at (x, y); `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    /// Top-left corner of the current piece's bounding box.
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn is_topped_out(&self) -> bool {
        self.topped_out
    }

    /// Drain queued events in the order they happened.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether `piece` fits with its top-left corner at (x, y).
    ///
    /// Columns must lie in `[0, width)` and rows below `height`. Rows above
    /// the board are always free; rows on the board must be empty.
    pub fn is_valid(&self, x: i8, y: i8, piece: &Piece) -> bool {
        piece.minos().iter().all(|&(dx, dy)| {
            let col = x as i16 + dx as i16;
            let row = y as i16 + dy as i16;
            if col < 0 || col >= self.width as i16 || row >= self.height as i16 {
                return false;
            }
            row < 0 || self.cells[row as usize * self.width as usize + col as usize].is_none()
        })
    }

    /// Spawn position for `piece`: horizontally centered, top row.
    pub fn spawn_position(&self, piece: &Piece) -> Position {
        let x = (self.width / 2) as i8 - (piece.width() / 2) as i8;
        Position::new(x, 0)
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        if self.is_valid(self.x + dx, self.y + dy, &piece) {
            self.x += dx;
            self.y += dy;
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_shift(0, 1)
    }

    /// Rotate clockwise, retrying with [`KICK_OFFSETS`].
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let rotated = piece.rotated_cw();

        for (dx, dy) in KICK_OFFSETS {
            let (nx, ny) = (self.x + dx, self.y + dy);
            if self.is_valid(nx, ny, &rotated) {
                self.current = Some(rotated);
                self.x = nx;
                self.y = ny;
                let center = self.center_of(&rotated);
                self.events.push(BoardEvent::Rotated { center });
                return true;
            }
        }
        false
    }

    /// How far the current piece can fall from where it is.
    pub fn drop_distance(&self) -> i8 {
        let Some(piece) = self.current else {
            return 0;
        };
        let mut d = 0;
        while self.is_valid(self.x, self.y + d + 1, &piece) {
            d += 1;
        }
        d
    }

    /// Landing row of the current piece (the ghost).
    pub fn ghost_y(&self) -> Option<i8> {
        self.current.map(|_| self.y + self.drop_distance())
    }

    /// Drop to the landing row and lock.
    pub fn hard_drop(&mut self) -> Option<Placement> {
        self.current?;
        self.y += self.drop_distance();
        self.place()
    }

    /// Set aside the current piece, once per spawned piece.
    ///
    /// With an empty hold slot the next piece spawns normally (and may top
    /// out). Otherwise the held piece swaps in at its spawn position without
    /// a collision check.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(piece) = self.current.take() else {
            return false;
        };

        match self.held.replace(piece) {
            None => {
                self.spawn_next();
            }
            Some(previous) => {
                let pos = self.spawn_position(&previous);
                self.current = Some(previous);
                self.x = pos.x;
                self.y = pos.y;
            }
        }
        self.events.push(BoardEvent::HeldPieceChanged(piece));
        self.can_hold = false;
        true
    }

    /// Lock the current piece, clear lines and spawn the next piece.
    ///
    /// Cells above row 0 are dropped. Returns `None` when there is no piece.
    pub fn place(&mut self) -> Option<Placement> {
        let piece = self.current.take()?;
        let color = piece.kind();
        for &(dx, dy) in piece.minos().iter() {
            self.set(self.x + dx, self.y + dy, Some(color));
        }

        let center = self.center_of(&piece);
        self.events.push(BoardEvent::PiecePlaced { center });

        let cleared_rows = self.clear_lines();
        if !cleared_rows.is_empty() {
            self.events.push(BoardEvent::LinesCleared {
                rows: cleared_rows.clone(),
            });
        }

        self.can_hold = true;
        let spawned = self.spawn_next();

        Some(Placement {
            center,
            cleared_rows,
            topped_out: !spawned,
        })
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        let width = self.width as usize;
        self.cells[y * width..(y + 1) * width]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove every full row, scanning bottom to top.
    ///
    /// After a shift the same index is examined again, so stacked full rows
    /// are never skipped. Returns the pre-clear indices of removed rows,
    /// bottom first.
    pub fn clear_lines(&mut self) -> Vec<usize> {
        let width = self.width as usize;
        let mut cleared = Vec::new();
        let mut y = self.height as usize;

        while y > 0 {
            let row = y - 1;
            if !self.is_row_full(row) {
                y -= 1;
                continue;
            }

            // Rows above shifted down once per earlier clear.
            cleared.push(row - cleared.len());
            self.cells.copy_within(0..row * width, width);
            self.cells[..width].iter_mut().for_each(|cell| *cell = None);
        }

        cleared
    }

    /// current <- next, next <- fresh draw. Returns false on top-out.
    fn spawn_next(&mut self) -> bool {
        let piece = match self.next.take() {
            Some(piece) => piece,
            None => Piece::random(self.source.as_mut()),
        };
        let next = Piece::random(self.source.as_mut());
        self.next = Some(next);
        self.events.push(BoardEvent::NextPieceChanged(next));

        let pos = self.spawn_position(&piece);
        if !self.is_valid(pos.x, pos.y, &piece) {
            self.current = None;
            self.topped_out = true;
            self.events.push(BoardEvent::ToppedOut);
            return false;
        }

        self.current = Some(piece);
        self.x = pos.x;
        self.y = pos.y;
        true
    }

    fn center_of(&self, piece: &Piece) -> Position {
        Position::new(
            self.x + (piece.width() / 2) as i8,
            self.y + (piece.height() / 2) as i8,
        )
    }

    /// Read-only copy for rendering.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .map(|cell| cell.map_or(0, |kind| kind.color()))
                .collect(),
            active: self.current.map(|piece| ActivePiece {
                piece,
                x: self.x,
                y: self.y,
            }),
            ghost_y: self.ghost_y(),
            next: self.next,
            held: self.held,
            can_hold: self.can_hold,
            topped_out: self.topped_out,
        }
    }
}
