//! Notifications derived from upcoming deadlines.
//!
//! The notification list is rebuilt from scratch after every assignment change. At present a
//! single rule applies: if anything is due this week, emit one high-priority reminder that counts
//! it; otherwise emit nothing.

use chrono::{DateTime, Utc};
use course_model::assignment::Assignment;
use course_model::notification::{Notification, NotificationId, NotificationKind, Priority};

pub const DUE_THIS_WEEK_ID: NotificationId = NotificationId::new(1);
pub const DUE_THIS_WEEK_TITLE: &str = "Assignments Due This Week";

pub fn generate_notifications(
    due_this_week: &[&Assignment],
    now: DateTime<Utc>,
) -> Vec<Notification> {
    match due_this_week.len() {
        0 => Vec::new(),
        count => vec![due_this_week_reminder(count, now)],
    }
}

fn due_this_week_reminder(count: usize, now: DateTime<Utc>) -> Notification {
    let assignments = if count == 1 { "assignment" } else { "assignments" };

    Notification::new(
        DUE_THIS_WEEK_ID,
        NotificationKind::Assignment,
        DUE_THIS_WEEK_TITLE.to_owned(),
        format!("{count} {assignments} due this week"),
        Priority::High,
        now,
    )
    .with_assignments_action()
}
