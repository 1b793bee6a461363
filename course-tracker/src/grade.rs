//! Course grades, letter grades, and GPA.
//!
//! A course grade is the share of points earned over the points possible of the *graded*
//! assignments only. It is weighted by points: the per-assignment `weight` does not enter into it.

use std::fmt;

use course_model::assignment::Assignment;
use course_model::course::Course;
use serde::Serialize;

/// Shown in place of a letter when a course has no grade yet.
pub const NOT_AVAILABLE: &str = "N/A";

/// Percentage of points earned across graded assignments, or `None` if nothing is graded.
pub fn course_grade(assignments: &[Assignment]) -> Option<f64> {
    let (earned, possible) = assignments
        .iter()
        .filter_map(|assignment| {
            let earned = assignment.points_earned()?;
            Some((earned.as_f64(), assignment.points_possible().as_f64()))
        })
        .fold(None, |totals, (earned, possible)| {
            let (total_earned, total_possible) = totals.unwrap_or((0.0, 0.0));
            Some((total_earned + earned, total_possible + possible))
        })?;

    (possible > 0.0).then(|| earned / possible * 100.0)
}

/// The letter for `grade`, or [`NOT_AVAILABLE`].
pub fn letter_grade(grade: Option<f64>) -> &'static str {
    grade.map_or(NOT_AVAILABLE, |grade| {
        LetterGrade::from_percentage(grade).as_str()
    })
}

pub fn gpa_points(grade: f64) -> f64 {
    LetterGrade::from_percentage(grade).grade_points()
}

/// Credit-weighted mean of grade points over the courses that have a grade; 0 if none do.
pub fn semester_gpa<'a>(courses: impl IntoIterator<Item = &'a Course>) -> f64 {
    let (points, credits) = courses
        .into_iter()
        .filter_map(|course| {
            let credits = f64::from(course.credits());
            course
                .current_grade()
                .map(|grade| (gpa_points(grade) * credits, credits))
        })
        .fold((0.0, 0.0), |(points, credits), (more_points, more_credits)| {
            (points + more_points, credits + more_credits)
        });

    if credits > 0.0 {
        points / credits
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LetterGrade {
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
    F,
}

// Lower bound of each band, highest first. A grade equal to a bound is in that band.
const BANDS: [(f64, LetterGrade); 11] = [
    (93.0, LetterGrade::A),
    (90.0, LetterGrade::AMinus),
    (87.0, LetterGrade::BPlus),
    (83.0, LetterGrade::B),
    (80.0, LetterGrade::BMinus),
    (77.0, LetterGrade::CPlus),
    (73.0, LetterGrade::C),
    (70.0, LetterGrade::CMinus),
    (67.0, LetterGrade::DPlus),
    (63.0, LetterGrade::D),
    (60.0, LetterGrade::DMinus),
];

impl LetterGrade {
    pub fn from_percentage(grade: f64) -> Self {
        BANDS
            .iter()
            .find(|(lower, _)| grade >= *lower)
            .map_or(Self::F, |(_, letter)| *letter)
    }

    pub fn grade_points(self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::AMinus => 3.7,
            Self::BPlus => 3.3,
            Self::B => 3.0,
            Self::BMinus => 2.7,
            Self::CPlus => 2.3,
            Self::C => 2.0,
            Self::CMinus => 1.7,
            Self::DPlus => 1.3,
            Self::D => 1.0,
            Self::DMinus => 0.7,
            Self::F => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

/// Coarse band for colouring grades and GPAs.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Standing {
    pub fn for_grade(grade: f64) -> Self {
        match grade {
            g if g >= 90.0 => Self::Excellent,
            g if g >= 80.0 => Self::Good,
            g if g >= 70.0 => Self::Average,
            _ => Self::Poor,
        }
    }

    pub fn for_gpa(gpa: f64) -> Self {
        match gpa {
            g if g >= 3.5 => Self::Excellent,
            g if g >= 3.0 => Self::Good,
            g if g >= 2.5 => Self::Average,
            _ => Self::Poor,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::{DateTime, NaiveDate, Utc};
    use course_model::assignment::{AssignmentId, Category, NewAssignment};
    use course_model::course::{CourseId, NewCourse};
    use course_model::types::Points;

    use super::*;

    fn assignment(earned: Option<f64>, possible: f64) -> Assignment {
        let new = NewAssignment::new(
            "Homework",
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            Category::Homework,
            Points::new(possible).unwrap(),
            10.0,
        );
        let new = match earned {
            Some(earned) => new.graded(Points::new(earned).unwrap()),
            None => new,
        };
        new.into_assignment(AssignmentId::new(1), CourseId::new(1))
    }

    fn course(grade: f64, credits: u32) -> Course {
        let mut course = NewCourse::new("Course", "C 100", "Spring 2026", "Dr. X", credits, 90.0)
            .into_course(CourseId::new(1), DateTime::<Utc>::UNIX_EPOCH);
        course.refresh(|_| Some(grade), DateTime::<Utc>::UNIX_EPOCH);
        course
    }

    #[test]
    fn ungraded_assignments_are_skipped() {
        let assignments = [
            assignment(Some(95.0), 100.0),
            assignment(Some(80.0), 100.0),
            assignment(None, 200.0),
        ];
        assert_relative_eq!(course_grade(&assignments).unwrap(), 87.5);
    }

    #[test]
    fn no_graded_assignments_means_no_grade() {
        assert_eq!(course_grade(&[]), None);
        assert_eq!(course_grade(&[assignment(None, 100.0)]), None);
    }

    #[test]
    fn zero_possible_points_means_no_grade() {
        assert_eq!(course_grade(&[assignment(Some(0.0), 0.0)]), None);
    }

    #[test]
    fn weights_do_not_affect_the_grade() {
        let heavy = assignment(Some(46.0), 50.0);
        assert_relative_eq!(course_grade(&[heavy]).unwrap(), 92.0);
    }

    #[test]
    fn letter_bands_include_their_lower_bound() {
        assert_eq!(letter_grade(Some(93.0)), "A");
        assert_eq!(letter_grade(Some(92.99)), "A-");
        assert_eq!(letter_grade(Some(90.0)), "A-");
        assert_eq!(letter_grade(Some(89.99)), "B+");
        assert_eq!(letter_grade(Some(60.0)), "D-");
        assert_eq!(letter_grade(Some(59.99)), "F");
        assert_eq!(letter_grade(None), NOT_AVAILABLE);
    }

    #[test]
    fn gpa_points_at_boundaries() {
        assert_eq!(gpa_points(100.0), 4.0);
        assert_eq!(gpa_points(93.0), 4.0);
        assert_eq!(gpa_points(90.0), 3.7);
        assert_eq!(gpa_points(89.99), 3.3);
        assert_eq!(gpa_points(72.0), 1.7);
        assert_eq!(gpa_points(73.0), 2.0);
        assert_eq!(gpa_points(0.0), 0.0);
    }

    #[test]
    fn gpa_points_never_decrease() {
        let points = (0..=1000)
            .map(|tenths| gpa_points(f64::from(tenths) / 10.0))
            .collect::<Vec<_>>();
        assert!(points.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn semester_gpa_weights_by_credits() {
        let courses = [course(95.0, 4), course(73.0, 3)];
        assert_relative_eq!(semester_gpa(&courses), (4.0 * 4.0 + 2.0 * 3.0) / 7.0);
    }

    #[test]
    fn semester_gpa_skips_ungraded_courses() {
        let ungraded = NewCourse::new("Essay", "ENG 201", "Spring 2026", "Dr. W", 3, 88.0)
            .into_course(CourseId::new(2), DateTime::<Utc>::UNIX_EPOCH);
        let courses = [course(91.0, 4), ungraded];
        assert_relative_eq!(semester_gpa(&courses), 3.7);
        assert_eq!(semester_gpa(&courses[1..]), 0.0);
    }

    #[test]
    fn standings() {
        assert_eq!(Standing::for_grade(90.0), Standing::Excellent);
        assert_eq!(Standing::for_grade(79.9), Standing::Average);
        assert_eq!(Standing::for_gpa(3.0), Standing::Good);
        assert_eq!(Standing::for_gpa(2.4), Standing::Poor);
    }
}
