//! Scoring engine tests

use tui_blockfall::core::scoring::{calculate_level, fall_interval_ms, ScoringEngine};

#[test]
fn test_base_values_at_level_one() {
    for (lines, base) in [(1, 100), (2, 300), (3, 500), (4, 800)] {
        let mut engine = ScoringEngine::new();
        let result = engine.score_lock(lines, 0, false);
        assert_eq!(result.line_clear_score, base);
        // First clearing lock is combo 1
        assert_eq!(result.total, base + 50);
    }
}

#[test]
fn test_tetris_then_tetris_gets_back_to_back() {
    let mut engine = ScoringEngine::new();
    assert_eq!(engine.score_lock(4, 0, false).b2b_bonus, 0);
    assert_eq!(engine.score_lock(4, 0, false).b2b_bonus, 400);
    assert_eq!(engine.score_lock(4, 0, false).b2b_bonus, 400);
}

#[test]
fn test_tetris_streak_broken_by_smaller_clear() {
    let mut engine = ScoringEngine::new();
    engine.score_lock(4, 0, false);
    engine.score_lock(2, 0, false);
    assert_eq!(engine.score_lock(4, 0, false).b2b_bonus, 0);
}

#[test]
fn test_empty_lock_keeps_back_to_back() {
    let mut engine = ScoringEngine::new();
    engine.score_lock(4, 0, false);
    engine.score_lock(0, 5, false);
    assert!(engine.back_to_back_tetris());
    assert_eq!(engine.score_lock(4, 0, false).b2b_bonus, 400);
}

#[test]
fn test_combo_grows_across_consecutive_clears() {
    let mut engine = ScoringEngine::new();
    let bonuses: Vec<u32> = (0..4).map(|_| engine.score_lock(1, 0, false).combo_bonus).collect();
    assert_eq!(bonuses, vec![50, 100, 150, 200]);
    assert_eq!(engine.combo_count(), 4);
}

#[test]
fn test_drop_distance_added_on_top() {
    let mut engine = ScoringEngine::new();
    let result = engine.score_lock(1, 17, false);
    assert_eq!(result.drop_bonus, 17);
    assert_eq!(result.total, 100 + 50 + 17);
    assert_eq!(engine.score(), 167);
}

#[test]
fn test_level_follows_total_lines() {
    let mut engine = ScoringEngine::new();
    let mut ups = Vec::new();
    for _ in 0..25 {
        let result = engine.score_lock(1, 0, false);
        if result.level_up {
            ups.push((engine.lines_cleared(), result.level));
        }
    }
    assert_eq!(ups, vec![(10, 2), (20, 3)]);
    assert_eq!(engine.level(), calculate_level(25));
}

#[test]
fn test_points_scale_with_level() {
    let mut engine = ScoringEngine::new();
    for _ in 0..10 {
        engine.score_lock(1, 0, false);
        engine.score_lock(0, 0, false);
    }
    assert_eq!(engine.level(), 2);

    let result = engine.score_lock(4, 0, true);
    assert_eq!(result.line_clear_score, 1600);
    assert_eq!(result.combo_bonus, 100);
    assert_eq!(result.t_spin_bonus, 400 * 4 * 2);
}

#[test]
fn test_fall_interval_formula() {
    for level in 1..=20 {
        let expected = 500u32.saturating_sub((level - 1) * 50).max(50);
        assert_eq!(fall_interval_ms(level), expected);
    }
}

#[test]
fn test_reset_returns_to_fresh_session() {
    let mut engine = ScoringEngine::new();
    engine.score_lock(4, 10, false);
    engine.reset();
    assert_eq!(engine, ScoringEngine::new());
    assert_eq!(engine.level(), 1);
}
