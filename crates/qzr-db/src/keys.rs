//! Fixed storage keys, one per stored collection.

/// Generated quizzes, newest first
pub const QUIZ_HISTORY_KEY: &str = "quiz_history";
/// Completed quiz results, newest first
pub const QUIZ_RESULTS_KEY: &str = "quiz_results";
/// The aggregate user stats record
pub const USER_STATS_KEY: &str = "user_stats";
/// The log of missed questions
pub const REVIEW_ITEMS_KEY: &str = "review_items";
/// Appearance preferences
pub const THEME_SETTINGS_KEY: &str = "theme_settings";
