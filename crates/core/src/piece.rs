//! Piece module - tetromino shapes and clockwise rotation
//!
//! A [`Piece`] is a small occupancy matrix (at most 4x4) tagged with its kind.
//! Pieces are plain values: rotating one returns a new piece, the original is
//! never touched. Rotation is a pure matrix transform; whether the rotated
//! piece fits is decided by the board (see [`crate::board::Board::rotate`]).

use arrayvec::ArrayVec;

use crate::rng::PieceSource;
use crate::types::PieceKind;

/// Largest bounding box of any tetromino (the I piece).
pub const MAX_PIECE_SIZE: usize = 4;

/// Offset of a single mino relative to the piece's top-left corner, as
/// `(column, row)`.
pub type MinoOffset = (i8, i8);

/// A tetromino in a specific orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rows: u8,
    cols: u8,
    grid: [[bool; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
}

impl Piece {
    /// Create a piece of the given kind in its canonical orientation.
    pub fn spawn(kind: PieceKind) -> Self {
        let pattern: &[&str] = match kind {
            PieceKind::I => &["....", "####", "....", "...."],
            PieceKind::J => &["#..", "###", "..."],
            PieceKind::L => &["..#", "###", "..."],
            PieceKind::O => &["##", "##"],
            PieceKind::S => &[".##", "##.", "..."],
            PieceKind::T => &[".#.", "###", "..."],
            PieceKind::Z => &["##.", ".##", "..."],
        };

        let mut grid = [[false; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (row, line) in pattern.iter().enumerate() {
            for (col, ch) in line.bytes().enumerate() {
                grid[row][col] = ch == b'#';
            }
        }

        Self {
            kind,
            rows: pattern.len() as u8,
            cols: pattern[0].len() as u8,
            grid,
        }
    }

    /// Draw a piece of uniformly random kind from `source`.
    pub fn random(source: &mut dyn PieceSource) -> Self {
        Self::spawn(source.next_kind())
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Palette index written into the grid when this piece locks (`1..=7`).
    pub fn color(&self) -> u8 {
        self.kind.color()
    }

    /// Bounding box width in cells.
    pub fn width(&self) -> u8 {
        self.cols
    }

    /// Bounding box height in cells.
    pub fn height(&self) -> u8 {
        self.rows
    }

    /// Whether the cell at (`row`, `col`) of the bounding box is occupied.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.grid[row][col]
    }

    /// The four occupied cells as `(column, row)` offsets, row-major order.
    pub fn minos(&self) -> ArrayVec<MinoOffset, 4> {
        let mut out = ArrayVec::new();
        for row in 0..self.rows as usize {
            for col in 0..self.cols as usize {
                if self.grid[row][col] {
                    out.push((col as i8, row as i8));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise.
    ///
    /// Cell (i, j) of the N×M shape moves to (j, N-1-i) of the new M×N shape.
    /// The O piece is returned unchanged.
    pub fn rotated_cw(&self) -> Self {
        if self.kind == PieceKind::O {
            return *self;
        }

        let n = self.rows as usize;
        let m = self.cols as usize;
        let mut grid = [[false; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (i, row) in self.grid.iter().enumerate().take(n) {
            for (j, &filled) in row.iter().enumerate().take(m) {
                grid[j][n - 1 - i] = filled;
            }
        }

        Self {
            kind: self.kind,
            rows: self.cols,
            cols: self.rows,
            grid,
        }
    }
}
