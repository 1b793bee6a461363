use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::course::CourseId;
use crate::types::{Points, entity_id};
use crate::util::midnight_utc;

entity_id!(
    /// Unique within the owning course only.
    AssignmentId
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    id: AssignmentId,
    course_id: CourseId,
    name: String,
    due_date: NaiveDate,
    category: Category,
    points_earned: Option<Points>,
    points_possible: Points,
    weight: f64,
    status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Assignment {
    pub fn id(&self) -> AssignmentId {
        self.id
    }

    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// The instant the assignment falls due: midnight UTC of its due date.
    pub fn due_at(&self) -> DateTime<Utc> {
        midnight_utc(self.due_date)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// `None` while the assignment is ungraded.
    pub fn points_earned(&self) -> Option<Points> {
        self.points_earned
    }

    pub fn points_possible(&self) -> Points {
        self.points_possible
    }

    /// Percentage contribution to the course grade. Carried for display; the course grade itself
    /// is points-weighted.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_graded(&self) -> bool {
        self.points_earned.is_some()
    }

    pub fn percentage(&self) -> Option<f64> {
        let earned = self.points_earned?.as_f64();
        let possible = self.points_possible.as_f64();
        (possible > 0.0).then(|| earned / possible * 100.0)
    }

    /// `earned/possible (pct%)`, or `Not graded`.
    pub fn score_summary(&self) -> String {
        match (self.points_earned, self.percentage()) {
            (Some(earned), Some(percentage)) => {
                format!("{earned}/{} ({percentage:.1}%)", self.points_possible)
            }
            (Some(earned), None) => format!("{earned}/{}", self.points_possible),
            (None, _) => "Not graded".to_owned(),
        }
    }

    pub fn apply(&mut self, update: AssignmentUpdate) {
        let AssignmentUpdate {
            name,
            due_date,
            category,
            points_earned,
            points_possible,
            weight,
            status,
            description,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(points_earned) = points_earned {
            self.points_earned = points_earned;
        }
        if let Some(points_possible) = points_possible {
            self.points_possible = points_possible;
        }
        if let Some(weight) = weight {
            self.weight = weight;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(description) = description {
            self.description = description;
        }
    }
}

/// An assignment as submitted by a form, before the store gives it an id and an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub name: String,
    pub due_date: NaiveDate,
    pub category: Category,
    pub points_earned: Option<Points>,
    pub points_possible: Points,
    pub weight: f64,
    pub status: Status,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewAssignment {
    pub fn new(
        name: impl Into<String>,
        due_date: NaiveDate,
        category: Category,
        points_possible: Points,
        weight: f64,
    ) -> Self {
        Self {
            name: name.into(),
            due_date,
            category,
            points_earned: None,
            points_possible,
            weight,
            status: Status::Pending,
            description: None,
        }
    }

    pub fn graded(mut self, points_earned: Points) -> Self {
        self.points_earned = Some(points_earned);
        self.status = Status::Graded;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn into_assignment(self, id: AssignmentId, course_id: CourseId) -> Assignment {
        let Self {
            name,
            due_date,
            category,
            points_earned,
            points_possible,
            weight,
            status,
            description,
        } = self;

        Assignment {
            id,
            course_id,
            name,
            due_date,
            category,
            points_earned,
            points_possible,
            weight,
            status,
            description,
        }
    }
}

/// Fields to merge into an existing assignment; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentUpdate {
    pub name: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub category: Option<Category>,
    /// `Some(None)` clears the score.
    pub points_earned: Option<Option<Points>>,
    pub points_possible: Option<Points>,
    pub weight: Option<f64>,
    pub status: Option<Status>,
    pub description: Option<Option<String>>,
}

impl AssignmentUpdate {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn score(points_earned: Option<Points>) -> Self {
        Self {
            points_earned: Some(points_earned),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Homework,
    Quiz,
    Exam,
    Project,
    Participation,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Submitted,
    Graded,
    Overdue,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Graded => "graded",
            Self::Overdue => "overdue",
        }
    }

    /// Submitted and graded work both count toward completion.
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Submitted | Self::Graded)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.as_str().fmt(f)
    }
}
