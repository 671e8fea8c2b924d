//! In-memory high score table (top 5, best first).

use serde::Serialize;

use cosmic_tetris_core::Stats;
use cosmic_tetris_types::PlayerId;

use crate::player::PlayerSnapshot;

pub const HIGH_SCORE_SLOTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighScoreEntry {
    pub player: PlayerId,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Whether `score` would make the table.
    pub fn qualifies(&self, score: u32) -> bool {
        match self.entries.last() {
            Some(lowest) if self.entries.len() >= HIGH_SCORE_SLOTS => score > lowest.score,
            _ => true,
        }
    }

    /// Insert a finished game. Returns its rank (0 = best) if it made the table.
    ///
    /// Ties rank below the entries already present.
    pub fn record(&mut self, player: PlayerId, stats: Stats) -> Option<usize> {
        if !self.qualifies(stats.score) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| e.score < stats.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            rank,
            HighScoreEntry {
                player,
                score: stats.score,
                level: stats.level,
                lines: stats.lines,
            },
        );
        self.entries.truncate(HIGH_SCORE_SLOTS);
        Some(rank)
    }

    /// Record every player of a finished session, in slot order.
    pub fn record_all(&mut self, players: &[PlayerSnapshot]) -> Vec<Option<usize>> {
        players
            .iter()
            .map(|p| self.record(p.id, p.stats))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(score: u32) -> Stats {
        Stats {
            score,
            ..Stats::default()
        }
    }

    #[test]
    fn keeps_top_five_descending() {
        let mut table = HighScores::new();
        for score in [300, 100, 500, 200, 400, 600] {
            table.record(PlayerId::One, stats(score));
        }
        let scores: Vec<u32> = table.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![600, 500, 400, 300, 200]);
        assert_eq!(table.best(), Some(600));
    }

    #[test]
    fn full_table_rejects_scores_not_beating_lowest() {
        let mut table = HighScores::new();
        for score in [500, 400, 300, 200, 100] {
            assert!(table.record(PlayerId::One, stats(score)).is_some());
        }
        assert!(!table.qualifies(100));
        assert_eq!(table.record(PlayerId::Two, stats(100)), None);
        assert_eq!(table.record(PlayerId::Two, stats(101)), Some(4));
        assert_eq!(table.entries()[4].player, PlayerId::Two);
    }

    #[test]
    fn ties_rank_after_existing() {
        let mut table = HighScores::new();
        table.record(PlayerId::One, stats(300));
        assert_eq!(table.record(PlayerId::Two, stats(300)), Some(1));
    }

    #[test]
    fn empty_table_admits_zero() {
        let mut table = HighScores::new();
        assert_eq!(table.record(PlayerId::One, stats(0)), Some(0));
    }
}
