//! Scoring module - Classic line-clear scoring and level progression
//!
//! Counters are a pure function of the cumulative cleared-line count:
//! - level advances every 10 lines,
//! - gravity follows the 23-entry [`DROP_INTERVALS`] table, clamped at its last entry,
//! - each clear awards `LINE_SCORES[lines] * (level + 1)` using the level *after*
//!   the clear was counted.

use crate::types::{DROP_INTERVALS, LINES_PER_LEVEL, LINE_SCORES};

/// Cumulative lines/level/score plus the gravity interval derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreCounters {
    pub lines: u32,
    pub level: u32,
    pub score: u32,
    /// Milliseconds per gravity row at the current level.
    pub interval_ms: u32,
}

impl Default for ScoreCounters {
    fn default() -> Self {
        Self::reset()
    }
}

impl ScoreCounters {
    /// Fresh counters: everything zero, level-0 gravity.
    pub fn reset() -> Self {
        Self {
            lines: 0,
            level: 0,
            score: 0,
            interval_ms: DROP_INTERVALS[0],
        }
    }

    /// Fold a line clear into the counters.
    ///
    /// `lines_cleared` above 4 is clamped (a single piece spans at most four rows).
    /// Clearing zero lines returns the counters unchanged.
    #[must_use]
    pub fn apply_line_clear(self, lines_cleared: usize) -> Self {
        if lines_cleared == 0 {
            return self;
        }
        let lines_cleared = lines_cleared.min(LINE_SCORES.len() - 1);
        let lines = self.lines.saturating_add(lines_cleared as u32);
        let level = calculate_level(lines);

        Self {
            lines,
            level,
            score: self
                .score
                .saturating_add(calculate_line_score(lines_cleared, level)),
            interval_ms: drop_interval_ms(level),
        }
    }
}

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level + 1)
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Get drop interval for a level (in milliseconds)
/// Levels past the end of the table reuse its last (fastest) entry
pub fn drop_interval_ms(level: u32) -> u32 {
    let idx = (level as usize).min(DROP_INTERVALS.len() - 1);
    DROP_INTERVALS[idx]
}
