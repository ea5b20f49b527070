//! Local reminders and badge announcements.
//!
//! Delivery is fire-and-forget: the helpers here log failures and never
//! return them, so a broken notifier can't fail a quiz completion.

use async_trait::async_trait;
use chrono::Duration;
use qzr_progress::Badge;
use serde::Serialize;
use thiserror::Error;

pub const STREAK_REMINDER_DELAY_HOURS: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    DailyReminder,
    StreakReminder,
    BadgeUnlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    /// Set for badge announcements
    pub badge_name: Option<String>,
}

/// When a notification should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Immediate,
    After(Duration),
    /// Every day at the given local time
    DailyAt { hour: u32, minute: u32 },
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn schedule(&self, notification: Notification, trigger: Trigger)
    -> Result<(), NotifyError>;

    /// Drop every pending scheduled notification
    async fn cancel_all(&self) -> Result<(), NotifyError>;
}

pub fn daily_reminder() -> Notification {
    Notification {
        kind: NotificationKind::DailyReminder,
        title: "🧠 Daily Quiz Time!".to_string(),
        body: "Your daily quiz is ready! Don't lose your streak!".to_string(),
        badge_name: None,
    }
}

pub fn streak_reminder() -> Notification {
    Notification {
        kind: NotificationKind::StreakReminder,
        title: "🔥 Don't Break Your Streak!".to_string(),
        body: "You haven't taken a quiz today. Keep your learning streak alive!".to_string(),
        badge_name: None,
    }
}

pub fn badge_unlocked(badge: &Badge) -> Notification {
    Notification {
        kind: NotificationKind::BadgeUnlock,
        title: "🎉 New Badge Unlocked!".to_string(),
        body: format!("{} You earned the \"{}\" badge!", badge.icon, badge.name),
        badge_name: Some(badge.name.clone()),
    }
}

/// Replace all scheduled notifications with one repeating daily reminder
pub async fn schedule_daily_reminder(notifier: &dyn Notifier, hour: u32) {
    if let Err(e) = notifier.cancel_all().await {
        tracing::error!(error = %e, "Failed to cancel scheduled notifications");
        return;
    }
    match notifier
        .schedule(daily_reminder(), Trigger::DailyAt { hour, minute: 0 })
        .await
    {
        Ok(()) => tracing::info!(hour, "Daily quiz reminder scheduled"),
        Err(e) => tracing::error!(error = %e, "Failed to schedule daily reminder"),
    }
}

/// Remind the user to keep the streak alive a day after finishing a quiz
pub async fn schedule_streak_reminder(notifier: &dyn Notifier) {
    let trigger = Trigger::After(Duration::hours(STREAK_REMINDER_DELAY_HOURS));
    if let Err(e) = notifier.schedule(streak_reminder(), trigger).await {
        tracing::error!(error = %e, "Failed to schedule streak reminder");
    }
}

/// Announce each newly unlocked badge right away
pub async fn announce_badges(notifier: &dyn Notifier, badges: &[Badge]) {
    for badge in badges {
        if let Err(e) = notifier
            .schedule(badge_unlocked(badge), Trigger::Immediate)
            .await
        {
            tracing::error!(badge = %badge.id, error = %e, "Failed to show badge notification");
        }
    }
}

/// Notifier that records notifications in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn schedule(
        &self,
        notification: Notification,
        trigger: Trigger,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            kind = ?notification.kind,
            title = %notification.title,
            body = %notification.body,
            trigger = ?trigger,
            "Notification scheduled"
        );
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), NotifyError> {
        tracing::debug!("Scheduled notifications cancelled");
        Ok(())
    }
}
