//! Progress engine for Quizzer
//!
//! This crate holds the domain model of quizzes and results together with the
//! pure rules that turn completed quizzes into progress: totals, daily streak,
//! XP and level, badges, and the spaced-review queue of missed questions.
//!
//! Nothing here performs I/O. Callers load the aggregate, apply the rules with
//! an explicit `now`, and persist the outcome.

pub mod badges;
pub mod grading;
pub mod model;
pub mod review;
pub mod stats;
pub mod streak;
pub mod xp;

pub use model::{
    Badge, Difficulty, DifficultyBreakdown, DifficultyStat, Flashcard, Question, Quiz, QuizMode,
    QuizResult, Rarity, ReviewItem, TopicStat, UserStats,
};
pub use review::{DEFAULT_REVIEW_BATCH, record_misses, select_review_batch};
pub use stats::{ResultsSummary, record_result, summarize_results};
