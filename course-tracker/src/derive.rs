//! Views recomputed from the current records on every read.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use course_model::assignment::Assignment;
use course_model::course::Course;
use course_model::semester::Semester;
use itertools::Itertools;
use serde::Serialize;

use crate::query::due_this_week;

pub const RECENT_COURSES: usize = 3;

/// The first semester flagged active, falling back to the first semester.
pub fn active_semester(semesters: &[Semester]) -> Option<&Semester> {
    semesters
        .iter()
        .find(|semester| semester.is_active())
        .or_else(|| semesters.first())
}

/// Courses whose semester name matches `semester`, in their original order.
pub fn active_courses<'a>(courses: &'a [Course], semester: Option<&Semester>) -> Vec<&'a Course> {
    let Some(semester) = semester else {
        return Vec::new();
    };

    courses
        .iter()
        .filter(|course| course.semester() == semester.name())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Number of active courses.
    pub total: usize,
    /// Number of distinct semester names across all courses.
    pub categories: usize,
    /// Number of assignments due this week across all courses.
    pub latest: usize,
}

pub fn stats(courses: &[Course], semesters: &[Semester], now: DateTime<Utc>) -> Stats {
    let active = active_courses(courses, active_semester(semesters));
    let categories = courses.iter().map(Course::semester).unique().count();
    let latest = due_this_week(courses.iter().flat_map(Course::assignments), now).len();

    Stats {
        total: active.len(),
        categories,
        latest,
    }
}

/// Most recently updated courses first, at most [`RECENT_COURSES`] of them.
pub fn recent_courses(courses: &[Course]) -> Vec<&Course> {
    courses
        .iter()
        .sorted_by_key(|course| Reverse(course.updated()))
        .take(RECENT_COURSES)
        .collect()
}

/// Percentage of assignments that are submitted or graded; 0 when there are none.
pub fn completion_rate<'a>(assignments: impl IntoIterator<Item = &'a Assignment>) -> f64 {
    let (completed, total) = assignments
        .into_iter()
        .fold((0usize, 0usize), |(completed, total), assignment| {
            let done = usize::from(assignment.status().is_completed());
            (completed + done, total + 1)
        });

    if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};
    use course_model::assignment::{Category, NewAssignment, Status};
    use course_model::course::{CourseId, NewCourse};
    use course_model::semester::{NewSemester, SemesterId};
    use course_model::types::Points;

    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn semester(id: u32, name: &str, active: bool) -> Semester {
        let new = NewSemester::new(name, date(1, 15), date(5, 15));
        let new = if active { new.active() } else { new };
        new.into_semester(SemesterId::new(id))
    }

    fn course(id: u32, semester: &str, updated_days: i64) -> Course {
        NewCourse::new(format!("Course {id}"), format!("C {id}"), semester, "Dr. X", 3, 90.0)
            .into_course(
                CourseId::new(id),
                DateTime::<Utc>::UNIX_EPOCH + Duration::days(updated_days),
            )
    }

    fn homework(status: Status) -> NewAssignment {
        NewAssignment::new(
            "Homework",
            date(2, 1),
            Category::Homework,
            Points::new(10.0).unwrap(),
            5.0,
        )
        .with_status(status)
    }

    #[test]
    fn active_semester_prefers_the_flag() {
        let semesters = [
            semester(1, "Fall 2025", false),
            semester(2, "Spring 2026", true),
        ];
        assert_eq!(active_semester(&semesters).map(Semester::name), Some("Spring 2026"));
    }

    #[test]
    fn active_semester_falls_back_to_the_first() {
        let semesters = [
            semester(1, "Fall 2025", false),
            semester(2, "Spring 2026", false),
        ];
        assert_eq!(active_semester(&semesters).map(Semester::name), Some("Fall 2025"));
        assert!(active_semester(&[]).is_none());
    }

    #[test]
    fn active_courses_match_the_semester_name() {
        let courses = [
            course(1, "Spring 2026", 0),
            course(2, "Fall 2025", 0),
            course(3, "Spring 2026", 0),
        ];
        let spring = semester(1, "Spring 2026", true);
        let ids = active_courses(&courses, Some(&spring))
            .into_iter()
            .map(Course::id)
            .collect::<Vec<_>>();
        assert_eq!(ids, [CourseId::new(1), CourseId::new(3)]);
        assert!(active_courses(&courses, None).is_empty());
    }

    #[test]
    fn stats_count_semesters_across_all_courses() {
        let courses = [
            course(1, "Spring 2026", 0),
            course(2, "Fall 2025", 0),
            course(3, "Spring 2026", 0),
            course(4, "Summer 2024", 0),
        ];
        let semesters = [semester(1, "Spring 2026", true)];
        let stats = stats(&courses, &semesters, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(
            stats,
            Stats {
                total: 2,
                categories: 3,
                latest: 0,
            }
        );
    }

    #[test]
    fn recent_courses_are_newest_first_and_capped() {
        let courses = [
            course(1, "Spring 2026", 2),
            course(2, "Spring 2026", 5),
            course(3, "Spring 2026", 1),
            course(4, "Spring 2026", 4),
        ];
        let ids = recent_courses(&courses)
            .into_iter()
            .map(|course| course.id().as_u32())
            .collect::<Vec<_>>();
        assert_eq!(ids, [2, 4, 1]);
    }

    #[test]
    fn completion_counts_submitted_and_graded() {
        let course = NewCourse::new("Course", "C 1", "Spring 2026", "Dr. X", 3, 90.0)
            .with_assignment(homework(Status::Graded))
            .with_assignment(homework(Status::Submitted))
            .with_assignment(homework(Status::Pending))
            .with_assignment(homework(Status::Overdue))
            .into_course(CourseId::new(1), DateTime::<Utc>::UNIX_EPOCH);
        assert_relative_eq!(completion_rate(course.assignments()), 50.0);
        assert_eq!(completion_rate(Vec::<&Assignment>::new()), 0.0);
    }
}
