use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::xp::level_for_xp;

/// Difficulty of a quiz or of a single question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulty levels, in ascending order
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a quiz is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    #[default]
    Quiz,
    Flashcard,
    Exam,
}

/// A multiple choice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Question text
    pub question: String,
    /// Answer options shown to the user
    pub options: Vec<String>,
    /// Index of the correct option in `options`
    pub correct_answer: usize,
    /// Why the correct answer is correct
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl Question {
    /// Text of the option at `index`, if there is one
    pub fn option_text(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Text of the correct option
    pub fn correct_text(&self) -> &str {
        self.option_text(self.correct_answer).unwrap_or_default()
    }
}

/// A generated quiz. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Unique quiz identifier
    pub id: String,
    pub title: String,
    /// Topic the user asked for
    pub topic: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub mode: QuizMode,
    pub questions: Vec<Question>,
    /// When the quiz was generated
    pub created_at: DateTime<Utc>,
    /// Time limit in minutes (exam mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
}

/// The outcome of one completed quiz. Created once, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// The quiz this result belongs to
    pub quiz_id: String,
    /// Number of correct answers
    pub score: u32,
    pub total_questions: u32,
    /// Selected option index per question, in question order
    pub answers: Vec<usize>,
    /// Total time spent on the quiz, in milliseconds
    #[serde(rename = "timeSpent")]
    pub time_spent_ms: u64,
    /// Free-text feedback on the attempt
    pub analysis: String,
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub mode: QuizMode,
    #[serde(default)]
    pub time_limit_exceeded: bool,
}

/// A generated study flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Question or term
    pub front: String,
    /// Answer or definition
    pub back: String,
    pub difficulty: Difficulty,
}

/// Rarity tier of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// A one-time achievement. Never mutated after it is unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Stable badge key
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: DateTime<Utc>,
    pub rarity: Rarity,
}

/// Per-topic rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStat {
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Running average of time per quiz, in milliseconds
    #[serde(rename = "averageTime")]
    pub average_time_ms: f64,
    pub last_studied: DateTime<Utc>,
}

impl TopicStat {
    /// A zero-valued entry for a topic first studied at `at`
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self {
            total_questions: 0,
            correct_answers: 0,
            average_time_ms: 0.0,
            last_studied: at,
        }
    }
}

/// Per-difficulty rollup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyStat {
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Accuracy in percent over the bucket's totals
    pub average_score: f64,
}

/// The three fixed difficulty buckets, always present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyBreakdown {
    #[serde(default)]
    pub easy: DifficultyStat,
    #[serde(default)]
    pub medium: DifficultyStat,
    #[serde(default)]
    pub hard: DifficultyStat,
}

impl DifficultyBreakdown {
    pub const fn get(&self, difficulty: Difficulty) -> &DifficultyStat {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub const fn get_mut(&mut self, difficulty: Difficulty) -> &mut DifficultyStat {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

/// The aggregate progress record, one per installation
///
/// `level` is not stored: it is always derived from `xp` via [`UserStats::level`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub total_quizzes: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Consecutive calendar days with at least one completed quiz
    pub streak: u32,
    /// When the most recent quiz was completed, `None` before the first one
    pub last_quiz_date: Option<DateTime<Utc>>,
    pub xp: u64,
    /// Unlocked badges, in unlock order
    pub badges: Vec<Badge>,
    pub topic_stats: BTreeMap<String, TopicStat>,
    pub difficulty_stats: DifficultyBreakdown,
}

impl UserStats {
    pub const fn level(&self) -> u64 {
        level_for_xp(self.xp)
    }

    /// Cumulative accuracy in percent, `None` before any question was answered
    pub fn accuracy(&self) -> Option<f64> {
        (self.total_questions > 0)
            .then(|| f64::from(self.correct_answers) / f64::from(self.total_questions) * 100.0)
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|badge| badge.id == id)
    }
}

/// A previously missed question, kept for re-study
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub quiz_id: String,
    /// Position of the question inside its quiz
    pub question_index: usize,
    pub question: String,
    pub correct_answer: String,
    /// The option the user picked, `None` if the question was left unanswered
    pub user_answer: Option<String>,
    pub explanation: String,
    pub topic: String,
    pub difficulty: Difficulty,
    /// How many times this question has been missed
    pub wrong_count: u32,
    /// When the question was last missed
    pub last_reviewed: DateTime<Utc>,
}

impl ReviewItem {
    /// Whether this item tracks question `index` of quiz `quiz_id`
    pub fn is_for(&self, quiz_id: &str, index: usize) -> bool {
        self.quiz_id == quiz_id && self.question_index == index
    }
}
