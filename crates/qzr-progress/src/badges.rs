//! Badge catalogue and unlock rules.
//!
//! Every rule reads only the aggregate stats, so rules can be evaluated in any
//! order. A rule fires at most once per badge id.

use chrono::{DateTime, Utc};

use crate::model::{Badge, Rarity, UserStats};

pub const FIRST_QUIZ: &str = "first_quiz";
pub const WEEK_STREAK: &str = "week_streak";
pub const MONTH_STREAK: &str = "month_streak";
pub const QUIZ_10: &str = "quiz_10";
pub const QUIZ_50: &str = "quiz_50";
pub const PERFECTIONIST: &str = "perfectionist";

/// A declarative unlock rule
#[derive(Debug, Clone, Copy)]
pub struct BadgeRule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rarity: Rarity,
    /// Whether the stats satisfy this badge
    pub unlocks: fn(&UserStats) -> bool,
}

impl BadgeRule {
    /// Build the badge this rule grants
    pub fn award(&self, unlocked_at: DateTime<Utc>) -> Badge {
        Badge {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            unlocked_at,
            rarity: self.rarity,
        }
    }
}

/// The fixed badge catalogue
pub const BADGE_RULES: &[BadgeRule] = &[
    BadgeRule {
        id: FIRST_QUIZ,
        name: "Getting Started",
        description: "Complete your first quiz",
        icon: "🎯",
        rarity: Rarity::Common,
        unlocks: completed_first_quiz,
    },
    BadgeRule {
        id: WEEK_STREAK,
        name: "Week Warrior",
        description: "7-day learning streak",
        icon: "🔥",
        rarity: Rarity::Rare,
        unlocks: reached_week_streak,
    },
    BadgeRule {
        id: MONTH_STREAK,
        name: "Monthly Master",
        description: "30-day learning streak",
        icon: "🏆",
        rarity: Rarity::Epic,
        unlocks: reached_month_streak,
    },
    BadgeRule {
        id: QUIZ_10,
        name: "Quiz Explorer",
        description: "Complete 10 quizzes",
        icon: "🧭",
        rarity: Rarity::Common,
        unlocks: completed_10_quizzes,
    },
    BadgeRule {
        id: QUIZ_50,
        name: "Quiz Enthusiast",
        description: "Complete 50 quizzes",
        icon: "⭐",
        rarity: Rarity::Rare,
        unlocks: completed_50_quizzes,
    },
    BadgeRule {
        id: PERFECTIONIST,
        name: "Perfectionist",
        description: "100% accuracy across 5+ quizzes",
        icon: "💎",
        rarity: Rarity::Legendary,
        unlocks: perfect_accuracy,
    },
];

const fn completed_first_quiz(stats: &UserStats) -> bool {
    stats.total_quizzes >= 1
}

const fn reached_week_streak(stats: &UserStats) -> bool {
    stats.streak >= 7
}

const fn reached_month_streak(stats: &UserStats) -> bool {
    stats.streak >= 30
}

const fn completed_10_quizzes(stats: &UserStats) -> bool {
    stats.total_quizzes >= 10
}

const fn completed_50_quizzes(stats: &UserStats) -> bool {
    stats.total_quizzes >= 50
}

const fn perfect_accuracy(stats: &UserStats) -> bool {
    stats.total_quizzes >= 5
        && stats.total_questions > 0
        && stats.correct_answers == stats.total_questions
}

/// Find the catalogue entry for a badge id
pub fn rule(id: &str) -> Option<&'static BadgeRule> {
    BADGE_RULES.iter().find(|rule| rule.id == id)
}

/// Evaluate every rule against the updated stats.
///
/// Returns the badges whose rule is satisfied and which are not yet in
/// `stats.badges`, stamped with `now`. The stats are not modified.
pub fn newly_unlocked(stats: &UserStats, now: DateTime<Utc>) -> Vec<Badge> {
    BADGE_RULES
        .iter()
        .filter(|rule| !stats.has_badge(rule.id) && (rule.unlocks)(stats))
        .map(|rule| rule.award(now))
        .collect()
}
