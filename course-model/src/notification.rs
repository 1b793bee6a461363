use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::assignment::AssignmentId;
use crate::course::CourseId;
use crate::types::entity_id;
use crate::util::ASSIGNMENTS_PATH;

entity_id!(NotificationId);

/// A message derived from the course data. Notifications are rebuilt wholesale, never edited.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    id: NotificationId,
    #[serde(rename = "type")]
    kind: NotificationKind,
    title: String,
    message: String,
    priority: Priority,
    course_id: Option<CourseId>,
    assignment_id: Option<AssignmentId>,
    created_at: DateTime<Utc>,
    read: bool,
    action_link: Option<String>,
    action_text: Option<String>,
}

impl Notification {
    pub fn new(
        id: NotificationId,
        kind: NotificationKind,
        title: String,
        message: String,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            title,
            message,
            priority,
            course_id: None,
            assignment_id: None,
            created_at,
            read: false,
            action_link: None,
            action_text: None,
        }
    }

    pub fn with_action(mut self, link: impl Into<String>, text: impl Into<String>) -> Self {
        self.action_link = Some(link.into());
        self.action_text = Some(text.into());
        self
    }

    /// Links to the assignments view.
    pub fn with_assignments_action(self) -> Self {
        self.with_action(ASSIGNMENTS_PATH, "View Assignments")
    }

    pub fn with_course(mut self, course_id: CourseId) -> Self {
        self.course_id = Some(course_id);
        self
    }

    pub fn with_assignment(mut self, assignment_id: AssignmentId) -> Self {
        self.assignment_id = Some(assignment_id);
        self
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn course_id(&self) -> Option<CourseId> {
        self.course_id
    }

    pub fn assignment_id(&self) -> Option<AssignmentId> {
        self.assignment_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn read(&self) -> bool {
        self.read
    }

    pub fn action_link(&self) -> Option<&str> {
        self.action_link.as_deref()
    }

    pub fn action_text(&self) -> Option<&str> {
        self.action_text.as_deref()
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Assignment,
    Grade,
    Deadline,
    Alert,
    Success,
    Info,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_links_are_omitted() {
        let notification = Notification::new(
            NotificationId::new(1),
            NotificationKind::Deadline,
            "Title".to_owned(),
            "Message".to_owned(),
            Priority::Low,
            DateTime::<Utc>::UNIX_EPOCH,
        );
        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["type"], "deadline");
        assert!(json.get("courseId").is_none());
        assert!(json.get("actionLink").is_none());
    }

    #[test]
    fn assignments_action_points_at_the_assignments_view() {
        let notification = Notification::new(
            NotificationId::new(1),
            NotificationKind::Assignment,
            "Title".to_owned(),
            "Message".to_owned(),
            Priority::High,
            DateTime::<Utc>::UNIX_EPOCH,
        )
        .with_assignments_action();
        assert_eq!(notification.action_link(), Some("/assignments"));
        assert_eq!(notification.action_text(), Some("View Assignments"));
        assert!(!notification.read());
    }

    #[test]
    fn links_to_a_course_and_assignment() {
        let notification = Notification::new(
            NotificationId::new(2),
            NotificationKind::Grade,
            "Graded".to_owned(),
            "Quiz 1 was graded".to_owned(),
            Priority::Medium,
            DateTime::<Utc>::UNIX_EPOCH,
        )
        .with_course(CourseId::new(1))
        .with_assignment(AssignmentId::new(2));

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["courseId"], 1);
        assert_eq!(json["assignmentId"], 2);
        assert_eq!(json["priority"], "medium");
    }
}
