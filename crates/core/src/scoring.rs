//! Scoring module - line clears, combos, back-to-back tetrises and T-spins
//!
//! A lock that clears lines is worth:
//! - base: `LINE_SCORES[lines] * level`
//! - combo: `50 * combo_count * level` (combo_count counts consecutive clearing locks)
//! - back-to-back: `400 * level` for a tetris directly after a tetris
//! - T-spin: `400 * lines * level`
//! - plus the hard-drop distance
//!
//! A lock that clears nothing is worth the hard-drop distance and breaks the combo.
//! Level is `total_lines / 10 + 1`.

use crate::types::{
    B2B_TETRIS_BONUS, BASE_FALL_INTERVAL_MS, COMBO_BASE, FALL_INTERVAL_STEP_MS, LINES_PER_LEVEL,
    LINE_SCORES, MIN_FALL_INTERVAL_MS, TSPIN_LINE_BONUS,
};

/// Breakdown of the points awarded for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub line_clear_score: u32,
    pub combo_bonus: u32,
    pub b2b_bonus: u32,
    pub t_spin_bonus: u32,
    pub drop_bonus: u32,
    pub total: u32,
    /// Level after this lock, and whether it went up
    pub level: u32,
    pub level_up: bool,
}

/// Base points for a line clear (1-4 lines)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0) * level
}

/// Combo bonus for the `combo_count`-th consecutive clearing lock
pub fn calculate_combo_bonus(combo_count: u32, level: u32) -> u32 {
    COMBO_BASE * combo_count * level
}

/// T-spin bonus for a clear of `lines` lines
pub fn calculate_tspin_bonus(lines: usize, level: u32) -> u32 {
    TSPIN_LINE_BONUS * lines as u32 * level
}

/// Level for a running line total (starts at 1)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Fall interval for a level, in milliseconds
///
/// `max(50, 500 - (level - 1) * 50)`
pub fn fall_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(FALL_INTERVAL_STEP_MS);
    BASE_FALL_INTERVAL_MS
        .saturating_sub(reduction)
        .max(MIN_FALL_INTERVAL_MS)
}

/// Score, level and streak state for one game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringEngine {
    score: u32,
    level: u32,
    lines_cleared: u32,
    combo_count: u32,
    back_to_back_tetris: bool,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines_cleared: 0,
            combo_count: 0,
            back_to_back_tetris: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn back_to_back_tetris(&self) -> bool {
        self.back_to_back_tetris
    }

    /// Score a locked piece and update the session state.
    ///
    /// `drop_distance` is the number of rows a hard drop travelled (0 otherwise).
    /// Points are computed at the level in effect before the lock; the level is then
    /// recomputed from the new line total.
    pub fn score_lock(&mut self, lines_cleared: usize, drop_distance: u32, is_t_spin: bool) -> ScoreResult {
        if lines_cleared == 0 {
            self.combo_count = 0;
            self.score = self.score.saturating_add(drop_distance);
            return ScoreResult {
                drop_bonus: drop_distance,
                total: drop_distance,
                level: self.level,
                ..ScoreResult::default()
            };
        }

        let level = self.level;
        let line_clear_score = calculate_line_score(lines_cleared, level);

        self.combo_count += 1;
        let combo_bonus = calculate_combo_bonus(self.combo_count, level);

        let b2b_bonus = if lines_cleared == 4 {
            let bonus = if self.back_to_back_tetris {
                B2B_TETRIS_BONUS * level
            } else {
                0
            };
            self.back_to_back_tetris = true;
            bonus
        } else {
            self.back_to_back_tetris = false;
            0
        };

        let t_spin_bonus = if is_t_spin {
            calculate_tspin_bonus(lines_cleared, level)
        } else {
            0
        };

        let total = line_clear_score + combo_bonus + b2b_bonus + t_spin_bonus + drop_distance;
        self.score = self.score.saturating_add(total);
        self.lines_cleared += lines_cleared as u32;
        self.level = calculate_level(self.lines_cleared);

        ScoreResult {
            line_clear_score,
            combo_bonus,
            b2b_bonus,
            t_spin_bonus,
            drop_bonus: drop_distance,
            total,
            level: self.level,
            level_up: self.level > level,
        }
    }

    /// Back to a fresh session
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}
