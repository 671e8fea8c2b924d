use crate::piece::Piece;

/// The falling piece and the top-left corner of its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Piece,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Absolute board cells covered by the piece, as `(x, y)`.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.piece
            .minos()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Read-only copy of a board, grid exported as palette indices (0 = empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major, `width * height` entries in `0..=7`
    pub cells: Vec<u8>,
    pub active: Option<ActivePiece>,
    pub ghost_y: Option<i8>,
    pub next: Option<Piece>,
    pub held: Option<Piece>,
    pub can_hold: bool,
    pub topped_out: bool,
}

impl BoardSnapshot {
    /// Palette index at (x, y), 0 when empty or out of range.
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        if x >= self.width as usize || y >= self.height as usize {
            return 0;
        }
        self.cells[y * self.width as usize + x]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::rng::ScriptedSource;
    use crate::types::PieceKind;

    #[test]
    fn snapshot_exports_palette_indices() {
        let mut board = Board::new(10, 20, Box::new(ScriptedSource::new([PieceKind::T])));
        board.set(2, 19, Some(PieceKind::Z));

        let snap = board.snapshot();
        assert_eq!(snap.cell(2, 19), 7);
        assert_eq!(snap.cell(3, 19), 0);
        assert_eq!(snap.cell(99, 0), 0);
        assert_eq!(snap.filled_cells(), 1);
        assert_eq!(snap.rows().count(), 20);
        assert!(snap.cells.iter().all(|&c| c <= 7));
    }

    #[test]
    fn active_cells_are_absolute() {
        let board = Board::new(10, 20, Box::new(ScriptedSource::new([PieceKind::O])));
        let active = board.snapshot().active.unwrap();
        let cells: Vec<_> = active.cells().collect();
        assert_eq!(cells, vec![(4, 0), (5, 0), (4, 1), (5, 1)]);
    }
}
