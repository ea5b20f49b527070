use chrono::{DateTime, Utc};
use qzr_progress::{Rarity, UserStats, badges::BadgeRule};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stats as shown to the user, with the derived values filled in
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    #[serde(flatten)]
    pub stats: UserStats,
    pub level: u64,
    /// Percent of all answers that were correct, absent before the first quiz
    pub accuracy: Option<f64>,
}

impl From<UserStats> for StatsView {
    fn from(stats: UserStats) -> Self {
        Self {
            level: stats.level(),
            accuracy: stats.accuracy(),
            stats,
        }
    }
}

/// One catalogue entry with its unlock state
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rarity: Rarity,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl BadgeStatus {
    pub fn new(rule: &BadgeRule, stats: &UserStats) -> Self {
        let unlocked_at = stats
            .badges
            .iter()
            .find(|badge| badge.id == rule.id)
            .map(|badge| badge.unlocked_at);

        Self {
            id: rule.id,
            name: rule.name,
            description: rule.description,
            icon: rule.icon,
            rarity: rule.rarity,
            unlocked: unlocked_at.is_some(),
            unlocked_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}
