use course_model::assignment::{Assignment, Status};
use course_model::course::Course;
use serde::Serialize;

use crate::derive::completion_rate;

/// Assignment completion figures for one course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress<'a> {
    #[serde(skip)]
    pub course: &'a Course,
    pub total_assignments: usize,
    pub completed_assignments: usize,
    pub graded_count: usize,
    pub pending_count: usize,
    pub completion_percentage: f64,
}

impl<'a> CourseProgress<'a> {
    pub fn new(course: &'a Course) -> Self {
        let assignments = course.assignments();
        let count = |pred: fn(&Assignment) -> bool| {
            assignments
                .iter()
                .filter(|assignment| pred(assignment))
                .count()
        };

        Self {
            course,
            total_assignments: assignments.len(),
            completed_assignments: count(|a| a.status().is_completed()),
            graded_count: count(|a| a.status() == Status::Graded),
            pending_count: count(|a| a.status() == Status::Pending),
            completion_percentage: completion_rate(assignments),
        }
    }
}
