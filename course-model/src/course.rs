use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assignment::{Assignment, AssignmentId, NewAssignment};
use crate::types::entity_id;

entity_id!(CourseId);
entity_id!(ResourceId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: CourseId,
    name: String,
    code: String,
    /// Name of the semester this course belongs to. Not checked against the semester list.
    semester: String,
    instructor: String,
    credits: u32,
    target_grade: f64,
    current_grade: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    assignments: Vec<Assignment>,
    #[serde(default)]
    resources: Vec<Resource>,
    updated: DateTime<Utc>,
}

impl Course {
    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn semester(&self) -> &str {
        &self.semester
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn target_grade(&self) -> f64 {
        self.target_grade
    }

    /// Derived from the assignments whenever they change; `None` until something is graded.
    pub fn current_grade(&self) -> Option<f64> {
        self.current_grade
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn assignment(&self, id: AssignmentId) -> Option<&Assignment> {
        self.assignments.iter().find(|assignment| assignment.id() == id)
    }

    pub fn assignment_mut(&mut self, id: AssignmentId) -> Option<&mut Assignment> {
        self.assignments
            .iter_mut()
            .find(|assignment| assignment.id() == id)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// Appends `assignment` with the next free id among this course's assignments.
    pub fn push_assignment(&mut self, assignment: NewAssignment) -> AssignmentId {
        let id = AssignmentId::next_after(self.assignments.iter().map(Assignment::id));
        self.assignments.push(assignment.into_assignment(id, self.id));
        id
    }

    pub fn apply(&mut self, update: CourseUpdate) {
        let CourseUpdate {
            name,
            code,
            semester,
            instructor,
            credits,
            target_grade,
            color,
            assignments,
            resources,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(code) = code {
            self.code = code;
        }
        if let Some(semester) = semester {
            self.semester = semester;
        }
        if let Some(instructor) = instructor {
            self.instructor = instructor;
        }
        if let Some(credits) = credits {
            self.credits = credits;
        }
        if let Some(target_grade) = target_grade {
            self.target_grade = target_grade;
        }
        if let Some(color) = color {
            self.color = color;
        }
        if let Some(assignments) = assignments {
            self.assignments = assignments;
        }
        if let Some(resources) = resources {
            self.resources = resources;
        }
    }

    /// Recomputes the current grade from the assignments and stamps the course as updated.
    pub fn refresh(
        &mut self,
        grade: impl FnOnce(&[Assignment]) -> Option<f64>,
        now: DateTime<Utc>,
    ) {
        self.current_grade = grade(&self.assignments);
        self.updated = now;
    }
}

/// A course as submitted by a form, before the store gives it an id and a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    pub code: String,
    pub semester: String,
    pub instructor: String,
    pub credits: u32,
    pub target_grade: f64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub assignments: Vec<NewAssignment>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl NewCourse {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        semester: impl Into<String>,
        instructor: impl Into<String>,
        credits: u32,
        target_grade: f64,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            semester: semester.into(),
            instructor: instructor.into(),
            credits,
            target_grade,
            color: None,
            assignments: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn with_assignment(mut self, assignment: NewAssignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    /// Builds the course with its assignments numbered from 1. The grade is left unset until the
    /// first [`Course::refresh`].
    pub fn into_course(self, id: CourseId, updated: DateTime<Utc>) -> Course {
        let Self {
            name,
            code,
            semester,
            instructor,
            credits,
            target_grade,
            color,
            assignments,
            resources,
        } = self;

        let mut course = Course {
            id,
            name,
            code,
            semester,
            instructor,
            credits,
            target_grade,
            current_grade: None,
            color,
            assignments: Vec::with_capacity(assignments.len()),
            resources,
            updated,
        };
        for assignment in assignments {
            course.push_assignment(assignment);
        }
        course
    }
}

/// Fields to merge into an existing course; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseUpdate {
    pub name: Option<String>,
    pub code: Option<String>,
    pub semester: Option<String>,
    pub instructor: Option<String>,
    pub credits: Option<u32>,
    pub target_grade: Option<f64>,
    pub color: Option<Option<String>>,
    pub assignments: Option<Vec<Assignment>>,
    pub resources: Option<Vec<Resource>>,
}

/// Supporting material attached to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    id: ResourceId,
    name: String,
    url: String,
    #[serde(rename = "type")]
    kind: ResourceKind,
}

impl Resource {
    pub fn new(id: ResourceId, name: String, url: String, kind: ResourceKind) -> Self {
        Self {
            id,
            name,
            url,
            kind,
        }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Syllabus,
    Textbook,
    Notes,
    Video,
    Other,
}
