//! Folding completed quizzes into the aggregate stats.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    badges,
    model::{Badge, Quiz, QuizResult, TopicStat, UserStats},
    streak, xp,
};

/// Fold one completed quiz into the aggregate stats.
///
/// Updates the totals, the daily streak, XP, the topic and difficulty rollups,
/// then appends any badge whose rule became true. `now` decides which calendar
/// day the completion belongs to, in its own time zone.
///
/// The score is clamped to the result's question count so that
/// `correct_answers <= total_questions` holds at every granularity.
///
/// Returns the badges unlocked by this update.
pub fn record_result<Tz: TimeZone>(
    stats: &mut UserStats,
    quiz: &Quiz,
    result: &QuizResult,
    now: &DateTime<Tz>,
) -> Vec<Badge> {
    let now_utc = now.with_timezone(&Utc);
    let total = result.total_questions;
    let score = result.score.min(total);

    stats.total_quizzes += 1;
    stats.total_questions += total;
    stats.correct_answers += score;

    stats.streak = streak::classify(stats.last_quiz_date, now).apply(stats.streak);
    stats.last_quiz_date = Some(now_utc);

    stats.xp += xp::xp_for_result(score, quiz.difficulty, result.time_spent_ms);

    let topic = stats
        .topic_stats
        .entry(quiz.topic.clone())
        .or_insert_with(|| TopicStat::new(now_utc));
    topic.total_questions += total;
    topic.correct_answers += score;
    // Single-step running average, not a true mean over all attempts
    topic.average_time_ms = (topic.average_time_ms + result.time_spent_ms as f64) / 2.0;
    topic.last_studied = now_utc;

    let bucket = stats.difficulty_stats.get_mut(quiz.difficulty);
    bucket.total_questions += total;
    bucket.correct_answers += score;
    bucket.average_score = if bucket.total_questions > 0 {
        f64::from(bucket.correct_answers) / f64::from(bucket.total_questions) * 100.0
    } else {
        0.0
    };

    let unlocked = badges::newly_unlocked(stats, now_utc);
    stats.badges.extend(unlocked.iter().cloned());
    unlocked
}

/// Overview of all stored results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub total_quizzes: usize,
    /// Percentage of all questions answered correctly, rounded
    pub average_score: u32,
    /// Best single-quiz percentage, rounded
    pub best_score: u32,
}

/// Summarize a list of results
pub fn summarize_results(results: &[QuizResult]) -> ResultsSummary {
    if results.is_empty() {
        return ResultsSummary::default();
    }

    let total_score: u64 = results.iter().map(|r| u64::from(r.score)).sum();
    let total_questions: u64 = results.iter().map(|r| u64::from(r.total_questions)).sum();
    let average_score = if total_questions > 0 {
        (total_score as f64 / total_questions as f64 * 100.0).round() as u32
    } else {
        0
    };

    let best_score = results
        .iter()
        .filter(|r| r.total_questions > 0)
        .map(|r| f64::from(r.score) / f64::from(r.total_questions) * 100.0)
        .fold(0.0_f64, f64::max)
        .round() as u32;

    ResultsSummary {
        total_quizzes: results.len(),
        average_score,
        best_score,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::{
        badges::{FIRST_QUIZ, MONTH_STREAK, PERFECTIONIST, QUIZ_10, QUIZ_50, WEEK_STREAK},
        model::{Difficulty, Question, QuizMode},
    };

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 18, 0, 0).unwrap()
    }

    fn quiz(topic: &str, difficulty: Difficulty, questions: usize) -> Quiz {
        Quiz {
            id: format!("{topic}-{difficulty}"),
            title: topic.to_string(),
            topic: topic.to_string(),
            difficulty,
            mode: QuizMode::Quiz,
            questions: (0..questions)
                .map(|i| Question {
                    question: format!("q{i}"),
                    options: vec!["a".into(), "b".into()],
                    correct_answer: 0,
                    explanation: String::new(),
                    difficulty,
                })
                .collect(),
            created_at: start(),
            time_limit: None,
        }
    }

    fn result(quiz: &Quiz, score: u32, time_spent_ms: u64) -> QuizResult {
        QuizResult {
            quiz_id: quiz.id.clone(),
            score,
            total_questions: quiz.questions.len() as u32,
            answers: Vec::new(),
            time_spent_ms,
            analysis: String::new(),
            completed_at: start(),
            mode: QuizMode::Quiz,
            time_limit_exceeded: false,
        }
    }

    fn assert_invariants(stats: &UserStats) {
        assert!(stats.correct_answers <= stats.total_questions);
        for topic in stats.topic_stats.values() {
            assert!(topic.correct_answers <= topic.total_questions);
        }
        for difficulty in Difficulty::ALL {
            let bucket = stats.difficulty_stats.get(difficulty);
            assert!(bucket.correct_answers <= bucket.total_questions);
        }
        let ids: HashSet<_> = stats.badges.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), stats.badges.len());
        assert_eq!(stats.level(), stats.xp / 1000 + 1);
    }

    #[test]
    fn test_first_completion() {
        let mut stats = UserStats::default();
        let quiz = quiz("rust", Difficulty::Easy, 5);

        let unlocked = record_result(&mut stats, &quiz, &result(&quiz, 3, 45_000), &start());

        assert_eq!(stats.total_quizzes, 1);
        assert_eq!(stats.total_questions, 5);
        assert_eq!(stats.correct_answers, 3);
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.last_quiz_date, Some(start()));
        assert_eq!(stats.xp, 40);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, FIRST_QUIZ);
        assert_eq!(stats.badges, unlocked);
        assert_invariants(&stats);
    }

    #[test]
    fn test_xp_crossing_level_boundary() {
        let mut stats = UserStats {
            xp: 950,
            ..Default::default()
        };
        assert_eq!(stats.level(), 1);
        let quiz = quiz("math", Difficulty::Easy, 5);

        record_result(&mut stats, &quiz, &result(&quiz, 3, 25_000), &start());

        assert_eq!(stats.xp, 1000);
        assert_eq!(stats.level(), 2);
    }

    #[test]
    fn test_streak_over_days() {
        let mut stats = UserStats::default();
        let quiz = quiz("rust", Difficulty::Medium, 4);
        let r = result(&quiz, 2, 90_000);

        record_result(&mut stats, &quiz, &r, &start());
        assert_eq!(stats.streak, 1);

        record_result(&mut stats, &quiz, &r, &(start() + Duration::hours(2)));
        assert_eq!(stats.streak, 1);

        record_result(&mut stats, &quiz, &r, &(start() + Duration::days(1)));
        assert_eq!(stats.streak, 2);

        record_result(&mut stats, &quiz, &r, &(start() + Duration::days(4)));
        assert_eq!(stats.streak, 1);
        assert_invariants(&stats);
    }

    #[test]
    fn test_week_streak_badge_unlocks_once() {
        let mut stats = UserStats::default();
        let quiz = quiz("rust", Difficulty::Medium, 4);
        let r = result(&quiz, 2, 90_000);

        let mut unlock_times = Vec::new();
        for day in 0..10 {
            let now = start() + Duration::days(day);
            for badge in record_result(&mut stats, &quiz, &r, &now) {
                if badge.id == WEEK_STREAK {
                    unlock_times.push(badge.unlocked_at);
                }
            }
        }

        assert_eq!(stats.streak, 10);
        assert_eq!(unlock_times, vec![start() + Duration::days(6)]);
        let stored = stats.badges.iter().find(|b| b.id == WEEK_STREAK).unwrap();
        assert_eq!(stored.unlocked_at, unlock_times[0]);
        assert_invariants(&stats);
    }

    #[test]
    fn test_month_streak_badge_unlocks_on_thirtieth_day() {
        let mut stats = UserStats::default();
        let quiz = quiz("rust", Difficulty::Easy, 2);
        let r = result(&quiz, 1, 90_000);

        let mut unlocked_on = Vec::new();
        for day in 0..35 {
            let unlocked = record_result(&mut stats, &quiz, &r, &(start() + Duration::days(day)));
            if unlocked.iter().any(|b| b.id == MONTH_STREAK) {
                unlocked_on.push(day);
            }
        }

        assert_eq!(stats.streak, 35);
        assert_eq!(unlocked_on, vec![29]);
        let stored = stats.badges.iter().find(|b| b.id == MONTH_STREAK).unwrap();
        assert_eq!(stored.unlocked_at, start() + Duration::days(29));
        assert_invariants(&stats);
    }

    #[test]
    fn test_quiz_count_badges_unlock_once() {
        let mut stats = UserStats::default();
        let quiz = quiz("history", Difficulty::Hard, 3);
        let r = result(&quiz, 1, 90_000);

        let mut tenth = Vec::new();
        let mut fiftieth = Vec::new();
        for n in 1..=60 {
            for badge in record_result(&mut stats, &quiz, &r, &start()) {
                if badge.id == QUIZ_10 {
                    tenth.push(n);
                } else if badge.id == QUIZ_50 {
                    fiftieth.push(n);
                }
            }
        }

        assert_eq!(stats.total_quizzes, 60);
        assert_eq!(tenth, vec![10]);
        assert_eq!(fiftieth, vec![50]);
        assert_eq!(stats.badges.iter().filter(|b| b.id == QUIZ_50).count(), 1);
        assert_invariants(&stats);
    }

    #[test]
    fn test_topic_average_time_is_single_step() {
        let mut stats = UserStats::default();
        let quiz = quiz("chemistry", Difficulty::Hard, 3);

        record_result(&mut stats, &quiz, &result(&quiz, 3, 40_000), &start());
        assert_eq!(stats.topic_stats["chemistry"].average_time_ms, 20_000.0);

        record_result(&mut stats, &quiz, &result(&quiz, 1, 60_000), &start());
        let topic = &stats.topic_stats["chemistry"];
        assert_eq!(topic.average_time_ms, 40_000.0);
        assert_eq!(topic.total_questions, 6);
        assert_eq!(topic.correct_answers, 4);
    }

    #[test]
    fn test_difficulty_bucket_average_score() {
        let mut stats = UserStats::default();
        let quiz = quiz("art", Difficulty::Medium, 4);

        record_result(&mut stats, &quiz, &result(&quiz, 4, 70_000), &start());
        record_result(&mut stats, &quiz, &result(&quiz, 2, 70_000), &start());

        let bucket = stats.difficulty_stats.get(Difficulty::Medium);
        assert_eq!(bucket.total_questions, 8);
        assert_eq!(bucket.correct_answers, 6);
        assert_eq!(bucket.average_score, 75.0);
        assert_eq!(stats.difficulty_stats.get(Difficulty::Easy).total_questions, 0);
    }

    #[test]
    fn test_inconsistent_score_is_clamped() {
        let mut stats = UserStats::default();
        let quiz = quiz("geo", Difficulty::Easy, 2);

        record_result(&mut stats, &quiz, &result(&quiz, 7, 70_000), &start());

        assert_eq!(stats.correct_answers, 2);
        assert_invariants(&stats);
    }

    #[test]
    fn test_perfect_run_unlocks_perfectionist_on_fifth_quiz() {
        let mut stats = UserStats::default();
        let quiz = quiz("music", Difficulty::Easy, 5);

        for n in 1..=5 {
            let unlocked = record_result(&mut stats, &quiz, &result(&quiz, 5, 70_000), &start());
            let has_perfectionist = unlocked.iter().any(|b| b.id == PERFECTIONIST);
            assert_eq!(has_perfectionist, n == 5, "quiz {n}");
        }
        assert_invariants(&stats);
    }

    #[test]
    fn test_summarize_results() {
        let quiz = quiz("rust", Difficulty::Easy, 4);
        let results = vec![result(&quiz, 4, 0), result(&quiz, 1, 0), result(&quiz, 2, 0)];

        let summary = summarize_results(&results);

        assert_eq!(summary.total_quizzes, 3);
        assert_eq!(summary.average_score, 58);
        assert_eq!(summary.best_score, 100);
        assert_eq!(summarize_results(&[]), ResultsSummary::default());
    }
}
