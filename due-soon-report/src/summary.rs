//! Everything the report binary prints, in one serializable value.

use core::fmt;

use course_model::clock::Clock;
use course_model::course::Course;
use course_model::notification::Notification;
use course_tracker::derive::Stats;
use course_tracker::grade::{Standing, letter_grade};
use course_tracker::progress::CourseProgress;
use course_tracker::store::CourseStore;
use itertools::Itertools;
use serde::Serialize;

use crate::report::DueSoonReport;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseLine<'a> {
    code: &'a str,
    name: &'a str,
    current_grade: Option<f64>,
    letter: &'static str,
    standing: Option<Standing>,
    completion: f64,
}

impl<'a> CourseLine<'a> {
    pub fn new(progress: &CourseProgress<'a>) -> Self {
        let course = progress.course;
        let grade = course.current_grade();
        Self {
            code: course.code(),
            name: course.name(),
            current_grade: grade,
            letter: letter_grade(grade),
            standing: grade.map(Standing::for_grade),
            completion: progress.completion_percentage,
        }
    }
}

impl fmt::Display for CourseLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let grade = match self.current_grade {
            Some(grade) => format!("{grade:.1}%"),
            None => "--".to_owned(),
        };
        write!(
            f,
            "{:<10} {:<36} {grade:>6} {:<3} {:>5.1}% complete",
            self.code, self.name, self.letter, self.completion
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary<'a> {
    semester: Option<&'a str>,
    current_semester: Option<&'a str>,
    stats: Stats,
    gpa: f64,
    gpa_standing: Standing,
    completion_rate: f64,
    courses: Vec<CourseLine<'a>>,
    notifications: &'a [Notification],
    due_soon: DueSoonReport<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<SearchResults<'a>>,
}

impl<'a> Summary<'a> {
    pub fn new<C: Clock>(store: &'a CourseStore<C>, search: Option<&'a str>) -> Self {
        let gpa = store.semester_gpa();
        Self {
            semester: store.active_semester().map(|semester| semester.name()),
            current_semester: store
                .semesters()
                .iter()
                .find(|semester| semester.is_current())
                .map(|semester| semester.name()),
            stats: store.stats(),
            gpa,
            gpa_standing: Standing::for_gpa(gpa),
            completion_rate: store.completion_rate(),
            courses: store.course_progress().iter().map(CourseLine::new).collect(),
            notifications: store.notifications(),
            due_soon: DueSoonReport::new(store),
            search: search.map(|query| SearchResults {
                query,
                codes: store
                    .search_courses(query)
                    .into_iter()
                    .map(Course::code)
                    .collect(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<'a> {
    query: &'a str,
    codes: Vec<&'a str>,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Stats {
            total,
            categories,
            latest,
        } = self.stats;

        write!(f, "{}", self.semester.unwrap_or("No semester"))?;
        match self.current_semester {
            Some(current) if Some(current) != self.semester => {
                writeln!(f, " (marked current: {current})")?
            }
            _ => writeln!(f)?,
        }
        let semesters = if categories == 1 { "semester" } else { "semesters" };
        writeln!(
            f,
            "  {total} active courses, {categories} {semesters} on record, {latest} due this week"
        )?;
        writeln!(
            f,
            "  GPA {:.2} ({}), {:.1}% of assignments complete",
            self.gpa, self.gpa_standing, self.completion_rate
        )?;

        writeln!(f, "\nCourses:")?;
        for course in &self.courses {
            writeln!(f, "  {course}")?;
        }

        if !self.notifications.is_empty() {
            writeln!(f, "\nNotifications:")?;
            for notification in self.notifications {
                writeln!(
                    f,
                    "  {}: {}",
                    notification.title(),
                    notification.message()
                )?;
            }
        }

        if let Some(search) = &self.search {
            writeln!(
                f,
                "\nSearch \"{}\": {}",
                search.query,
                if search.codes.is_empty() {
                    "no matches".to_owned()
                } else {
                    search.codes.iter().join(", ")
                }
            )?;
        }

        write!(f, "\n{}", self.due_soon)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use course_model::clock::FixedClock;
    use course_model::course::{CourseId, CourseUpdate};
    use course_tracker::seed::Bootstrap;

    use super::*;

    fn store() -> CourseStore<FixedClock> {
        let now = Utc.with_ymd_and_hms(2026, 2, 9, 0, 0, 0).unwrap();
        CourseStore::from_bootstrap(FixedClock::new(now), Bootstrap::bundled().unwrap())
    }

    #[test]
    fn text_summary_mentions_every_section() {
        let store = store();
        let text = Summary::new(&store, Some("calc")).to_string();

        assert!(text.starts_with("Spring 2026\n"));
        assert!(text.contains("3 active courses, 1 semester on record, 2 due this week"));
        assert!(text.contains("GPA 3.50 (excellent), 50.0% of assignments complete"));
        assert!(text.contains("Assignments Due This Week: 2 assignments due this week"));
        assert!(text.contains("Search \"calc\": MATH 152"));
        assert!(text.contains("ENG 201"));
    }

    #[test]
    fn semester_count_is_pluralized() {
        let mut store = store();
        let fall = store
            .semesters()
            .iter()
            .find(|semester| semester.name() == "Fall 2025")
            .unwrap()
            .id();
        store.update_course(
            CourseId::new(3),
            CourseUpdate {
                semester: Some("Fall 2025".to_owned()),
                ..CourseUpdate::default()
            },
        );
        assert_eq!(store.stats().categories, 2);
        assert!(Summary::new(&store, None).to_string().contains(", 2 semesters on record,"));

        store.set_active_semester(fall);
        let text = Summary::new(&store, None).to_string();
        assert!(text.starts_with("Spring 2026 (marked current: Fall 2025)\n"));
    }

    #[test]
    fn json_summary_uses_camel_case() {
        let store = store();
        let json = serde_json::to_value(Summary::new(&store, None)).unwrap();

        assert_eq!(json["semester"], "Spring 2026");
        assert_eq!(json["currentSemester"], "Spring 2026");
        assert_eq!(json["stats"]["latest"], 2);
        assert_eq!(json["gpaStanding"], "excellent");
        assert_eq!(json["courses"][0]["letter"], "B+");
        assert_eq!(json["courses"][2]["letter"], "N/A");
        assert!(json["courses"][2]["standing"].is_null());
        assert_eq!(json["notifications"][0]["type"], "assignment");
        assert_eq!(json["dueSoon"]["due"][1]["daysLeft"], 1);
        assert!(json.get("search").is_none());
    }
}
