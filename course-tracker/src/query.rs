//! Read-only lookups over a snapshot of the records.

use chrono::{DateTime, Duration, Utc};
use course_model::assignment::{Assignment, Status};
use course_model::course::{Course, CourseId};
use course_model::semester::Semester;
use itertools::Itertools;
use serde::Serialize;

use crate::derive::{active_courses, active_semester};

pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Used in place of a course code when an upcoming assignment's course is not active.
pub const UNKNOWN_COURSE: &str = "Unknown";

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Ungraded assignments due within [`DUE_SOON_WINDOW_DAYS`] of `now`. Both ends are inclusive.
pub fn due_this_week<'a>(
    assignments: impl IntoIterator<Item = &'a Assignment>,
    now: DateTime<Utc>,
) -> Vec<&'a Assignment> {
    let window_end = now + Duration::days(DUE_SOON_WINDOW_DAYS);

    assignments
        .into_iter()
        .filter(|assignment| {
            let due = assignment.due_at();
            now <= due && due <= window_end && assignment.status() != Status::Graded
        })
        .collect()
}

/// Courses whose name, code, or instructor contains `text`, ignoring case. Blank text gives the
/// active courses instead.
pub fn search_courses<'a>(
    courses: &'a [Course],
    semesters: &[Semester],
    text: &str,
) -> Vec<&'a Course> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return active_courses(courses, active_semester(semesters));
    }

    courses
        .iter()
        .filter(|course| {
            [course.name(), course.code(), course.instructor()]
                .into_iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Whole days until `assignment` is due, rounded up. Negative once it is past due.
pub fn days_until_due(assignment: &Assignment, now: DateTime<Utc>) -> i64 {
    let millis = (assignment.due_at() - now).num_milliseconds();
    (millis as f64 / MILLIS_PER_DAY).ceil() as i64
}

/// An assignment together with the course that owns it.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentRow<'a> {
    assignment: &'a Assignment,
    course: &'a Course,
}

impl<'a> AssignmentRow<'a> {
    pub fn from_courses(courses: impl IntoIterator<Item = &'a Course>) -> Vec<Self> {
        courses
            .into_iter()
            .flat_map(|course| {
                course
                    .assignments()
                    .iter()
                    .map(move |assignment| Self { assignment, course })
            })
            .collect()
    }

    pub fn assignment(&self) -> &'a Assignment {
        self.assignment
    }

    pub fn course(&self) -> &'a Course {
        self.course
    }

    pub fn course_name(&self) -> &'a str {
        self.course.name()
    }

    pub fn course_code(&self) -> &'a str {
        self.course.code()
    }

    pub fn course_color(&self) -> Option<&'a str> {
        self.course.color()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentFilter {
    /// `None` keeps every status.
    pub status: Option<Status>,
    /// `None` keeps every course.
    pub course: Option<CourseId>,
}

impl AssignmentFilter {
    fn matches(&self, row: &AssignmentRow) -> bool {
        let status_ok = self
            .status
            .map_or(true, |status| row.assignment.status() == status);
        let course_ok = self
            .course
            .map_or(true, |course| row.assignment.course_id() == course);
        status_ok && course_ok
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssignmentSort {
    #[default]
    DueDate,
    Course,
    Status,
}

/// Filters and sorts the assignments of `courses`. Sorting is stable.
pub fn list_assignments<'a>(
    courses: impl IntoIterator<Item = &'a Course>,
    filter: AssignmentFilter,
    sort: AssignmentSort,
) -> Vec<AssignmentRow<'a>> {
    let rows = AssignmentRow::from_courses(courses)
        .into_iter()
        .filter(|row| filter.matches(row));

    match sort {
        AssignmentSort::DueDate => rows
            .sorted_by_key(|row| row.assignment.due_date())
            .collect(),
        AssignmentSort::Course => rows.sorted_by_key(|row| row.course_name()).collect(),
        AssignmentSort::Status => rows
            .sorted_by_key(|row| row.assignment.status().as_str())
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentCounts {
    pub total: usize,
    pub pending: usize,
    pub submitted: usize,
    pub graded: usize,
    pub overdue: usize,
}

impl AssignmentCounts {
    pub fn tally<'a>(assignments: impl IntoIterator<Item = &'a Assignment>) -> Self {
        assignments
            .into_iter()
            .fold(Self::default(), |mut counts, assignment| {
                counts.total += 1;
                match assignment.status() {
                    Status::Pending => counts.pending += 1,
                    Status::Submitted => counts.submitted += 1,
                    Status::Graded => counts.graded += 1,
                    Status::Overdue => counts.overdue += 1,
                }
                counts
            })
    }
}

/// An assignment due this week, labelled with its course's code.
#[derive(Debug, Clone, Copy)]
pub struct UpcomingAssignment<'a> {
    assignment: &'a Assignment,
    course_code: &'a str,
}

impl<'a> UpcomingAssignment<'a> {
    pub fn assignment(&self) -> &'a Assignment {
        self.assignment
    }

    pub fn course_code(&self) -> &'a str {
        self.course_code
    }
}

/// Everything due this week across all courses. Only active courses lend their code; the rest
/// are labelled [`UNKNOWN_COURSE`].
pub fn upcoming_assignments<'a>(
    courses: &'a [Course],
    active: &[&'a Course],
    now: DateTime<Utc>,
) -> Vec<UpcomingAssignment<'a>> {
    due_this_week(courses.iter().flat_map(Course::assignments), now)
        .into_iter()
        .map(|assignment| {
            let course_code = active
                .iter()
                .find(|course| course.id() == assignment.course_id())
                .map_or(UNKNOWN_COURSE, |&course| course.code());
            UpcomingAssignment {
                assignment,
                course_code,
            }
        })
        .collect()
}
