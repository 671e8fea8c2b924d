//! Scoring module - line clear points, levels and gravity speed
//!
//! - Clearing 1/2/3/4 lines in one placement scores 100/300/500/800 times the
//!   level in effect before the clear. Other counts score nothing.
//! - `level = lines / 10 + 1`
//! - Gravity interval: `max(100ms, 1000ms - (level - 1) * 50ms)`

use std::time::Duration;

use crate::types::{
    BASE_GRAVITY_MS, GRAVITY_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_GRAVITY_MS, START_LEVEL,
};

/// Points for clearing `lines` rows at `level`.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Level reached after `lines` total cleared lines.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + START_LEVEL
}

/// Milliseconds between gravity ticks at `level`.
pub fn gravity_interval_ms(level: u32) -> u64 {
    let speedup = (level.max(1) as u64 - 1).saturating_mul(GRAVITY_STEP_MS);
    BASE_GRAVITY_MS.saturating_sub(speedup).max(MIN_GRAVITY_MS)
}

pub fn gravity_interval(level: u32) -> Duration {
    Duration::from_millis(gravity_interval_ms(level))
}

/// Per-player score, level and line totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stats {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            score: 0,
            level: START_LEVEL,
            lines: 0,
        }
    }
}

impl Stats {
    /// Apply one placement's clear. Returns the points awarded.
    pub fn record_clear(&mut self, lines: usize) -> u32 {
        if lines == 0 {
            return 0;
        }
        let points = line_clear_points(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines as u32);
        self.level = level_for_lines(self.lines);
        points
    }

    pub fn gravity_interval(&self) -> Duration {
        gravity_interval(self.level)
    }
}
