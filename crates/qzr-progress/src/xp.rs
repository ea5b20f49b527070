//! Experience points and level progression.

use crate::model::Difficulty;

/// XP needed to advance one level
pub const XP_PER_LEVEL: u64 = 1000;

/// XP awarded per correct answer before the difficulty multiplier
pub const XP_PER_CORRECT_ANSWER: u64 = 10;

/// Get the difficulty multiplier for a quiz, in tenths.
///
/// Tenths keep the arithmetic exact: easy is 1x, medium 1.5x, hard 2x.
pub const fn difficulty_multiplier_tenths(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 15,
        Difficulty::Hard => 20,
    }
}

/// Get the speed bonus for finishing a whole quiz in `time_spent_ms`.
///
/// The thresholds apply to the total time of the quiz, not per question:
///
/// * Under 30 seconds: 20 XP
/// * Under 60 seconds: 10 XP
/// * Otherwise: no bonus
pub const fn time_bonus(time_spent_ms: u64) -> u64 {
    match time_spent_ms {
        t if t < 30_000 => 20,
        t if t < 60_000 => 10,
        _ => 0,
    }
}

/// Compute the XP earned by one completed quiz.
///
/// # Arguments
///
/// * `score` - Number of correct answers
/// * `difficulty` - Difficulty of the quiz
/// * `time_spent_ms` - Total time spent on the quiz, in milliseconds
///
/// # Returns
///
/// `floor(score * 10 * multiplier) + time_bonus`
pub const fn xp_for_result(score: u32, difficulty: Difficulty, time_spent_ms: u64) -> u64 {
    let base = score as u64 * XP_PER_CORRECT_ANSWER * difficulty_multiplier_tenths(difficulty) / 10;
    base + time_bonus(time_spent_ms)
}

/// Get the level for a total amount of XP: `floor(xp / 1000) + 1`.
pub const fn level_for_xp(xp: u64) -> u64 {
    xp / XP_PER_LEVEL + 1
}
