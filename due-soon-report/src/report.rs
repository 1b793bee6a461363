use core::fmt;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use course_model::assignment::Status;
use course_model::clock::Clock;
use course_tracker::query::{UpcomingAssignment, days_until_due};
use course_tracker::store::CourseStore;
use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueSoonItem<'a> {
    course_code: &'a str,
    name: &'a str,
    due_date: NaiveDate,
    days_left: i64,
    status: Status,
}

impl<'a> DueSoonItem<'a> {
    pub fn new(upcoming: &UpcomingAssignment<'a>, now: DateTime<Utc>) -> Self {
        let assignment = upcoming.assignment();
        Self {
            course_code: upcoming.course_code(),
            name: assignment.name(),
            due_date: assignment.due_date(),
            days_left: days_until_due(assignment, now),
            status: assignment.status(),
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn days_left(&self) -> i64 {
        self.days_left
    }
}

impl fmt::Display for DueSoonItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let when = match self.days_left {
            0 => "today".to_owned(),
            1 => "tomorrow".to_owned(),
            days => format!("in {days} days"),
        };
        write!(
            f,
            "{} ({}, due {} {when})",
            self.name, self.course_code, self.due_date
        )
    }
}

/// The upcoming assignments, joined into an English list.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct DueSoonItems<'a> {
    items: Vec<DueSoonItem<'a>>,
}

impl<'a> DueSoonItems<'a> {
    pub fn items(&self) -> &[DueSoonItem<'a>] {
        &self.items
    }
}

impl fmt::Display for DueSoonItems<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.items.len() {
            0 => write!(f, "nothing"),
            1 => self.items[0].fmt(f),
            2 => write!(f, "{} and {}", &self.items[0], &self.items[1]),
            n => {
                let first_items = self.items.iter().take(n - 1);
                write!(f, "{}, and {}", first_items.format(", "), &self.items[n - 1])
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueSoonReport<'a> {
    semester: Option<&'a str>,
    due: DueSoonItems<'a>,
}

impl<'a> DueSoonReport<'a> {
    pub fn new<C: Clock>(store: &'a CourseStore<C>) -> Self {
        let now = store.clock().now();
        let items = store
            .upcoming_assignments()
            .iter()
            .map(|upcoming| DueSoonItem::new(upcoming, now))
            .collect();

        Self {
            semester: store.active_semester().map(|semester| semester.name()),
            due: DueSoonItems { items },
        }
    }

    pub fn items(&self) -> &[DueSoonItem<'a>] {
        self.due.items()
    }

    pub fn csv_string(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for item in self.items() {
            writer
                .serialize(item)
                .with_context(|| format!("could not write row for {}", item.name))?;
        }
        let bytes = writer.into_inner().context("could not flush csv writer")?;
        String::from_utf8(bytes).context("csv output is not utf-8")
    }
}

impl fmt::Display for DueSoonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let semester = self.semester.unwrap_or("No semester");
        let count = self.items().len();
        if count == 0 {
            return write!(f, "{semester}:\n\nNothing is due this week.");
        }

        let (assignments, it) = if count == 1 {
            // Singular
            ("assignment", "it")
        } else {
            // Plural
            ("assignments", "them")
        };

        write!(
            f,
            "{semester}:\n\nYou have {count} {assignments} due this week: {}\n\nRemember to submit {it} on time.",
            self.due,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use course_model::clock::FixedClock;
    use course_tracker::seed::Bootstrap;

    use super::*;

    fn store_at(month: u32, day: u32) -> CourseStore<FixedClock> {
        let now = Utc.with_ymd_and_hms(2026, month, day, 0, 0, 0).unwrap();
        CourseStore::from_bootstrap(FixedClock::new(now), Bootstrap::bundled().unwrap())
    }

    #[test]
    fn plural_report_lists_every_item() {
        let store = store_at(2, 9);
        let report = DueSoonReport::new(&store);
        assert_eq!(
            report.to_string(),
            "Spring 2026:\n\nYou have 2 assignments due this week: \
             Project 1: Calculator App (CS 101, due 2026-02-15 in 6 days) and \
             Essay 1: Personal Narrative (ENG 201, due 2026-02-10 tomorrow)\n\n\
             Remember to submit them on time."
        );
    }

    #[test]
    fn singular_report() {
        let store = store_at(2, 11);
        let report = DueSoonReport::new(&store);
        assert_eq!(report.items().len(), 1);
        assert!(report.to_string().contains("You have 1 assignment due this week"));
        assert!(report.to_string().ends_with("submit it on time."));
    }

    #[test]
    fn empty_report() {
        let store = store_at(4, 1);
        let report = DueSoonReport::new(&store);
        assert_eq!(report.to_string(), "Spring 2026:\n\nNothing is due this week.");
    }

    #[test]
    fn csv_has_a_header_and_one_row_per_item() {
        let store = store_at(2, 9);
        let csv = DueSoonReport::new(&store).csv_string().unwrap();
        let lines = csv.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "courseCode,name,dueDate,daysLeft,status");
        assert_eq!(lines[2], "ENG 201,Essay 1: Personal Narrative,2026-02-10,1,pending");
        assert_eq!(lines.len(), 3);
    }
}
