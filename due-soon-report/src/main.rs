use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use app_utils::{TrackerConfig, init_store, init_tracing, parse_now};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use course_model::clock::Clock;
use course_model::course::Course;
use course_model::course_selector::CourseSelector;
use course_model::semester_selector::SemesterSelector;
use course_tracker::query::{AssignmentFilter, AssignmentSort};
use course_tracker::store::CourseStore;
use due_soon_report::report::DueSoonReport;
use due_soon_report::summary::Summary;
use tracing::{debug, trace, warn};

/// Prints what is due this week and how the active semester is going.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Treat this RFC 3339 instant as now (overrides TRACKER_NOW)
    #[arg(long, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,

    /// JSON file to load instead of the bundled data (overrides TRACKER_SEED)
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Also list courses whose name, code, or instructor contains this text
    #[arg(long)]
    search: Option<String>,

    /// Also list the assignments of this active course (id, code, or name); text output only
    #[arg(long)]
    course: Option<String>,

    /// Mark this semester (id or name) as the current one before reporting
    #[arg(long)]
    semester: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl Args {
    fn check(&self) -> Result<()> {
        ensure!(
            self.course.is_none() || matches!(self.format, Format::Text),
            "--course can only be used with --format text"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    trace!(?args, "parsed arguments");
    args.check()?;

    let mut config = TrackerConfig::from_env()?;
    if let Some(now) = args.now {
        config = config.with_now(now);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed_path(seed);
    }

    let mut store = init_store(&config)?;
    debug!("initialized");

    if let Some(selector) = args.semester {
        mark_current_semester(&mut store, SemesterSelector::new(selector))?;
    }

    match args.format {
        Format::Text => {
            println!("{}", Summary::new(&store, args.search.as_deref()));
            if let Some(selector) = args.course {
                print_course_assignments(&store, CourseSelector::new(selector));
            }
        }
        Format::Json => {
            let summary = Summary::new(&store, args.search.as_deref());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Format::Csv => print!("{}", DueSoonReport::new(&store).csv_string()?),
    }

    Ok(())
}

fn mark_current_semester(
    store: &mut CourseStore<impl Clock>,
    selector: SemesterSelector,
) -> Result<()> {
    let id = selector
        .select_from(store.semesters())
        .map(|semester| semester.id())
        .with_context(|| format!("could not find semester {selector:?}"))?;
    store.set_active_semester(id);
    Ok(())
}

fn print_course_assignments(store: &CourseStore<impl Clock>, selector: CourseSelector) {
    let Some(course) = selector.select_from(store.courses()) else {
        warn!(?selector, "could not find course");
        return;
    };

    let filter = AssignmentFilter {
        status: None,
        course: Some(course.id()),
    };
    let rows = store.list_assignments(filter, AssignmentSort::DueDate);
    if rows.is_empty() {
        println!("\n{} has no assignments in the active semester", label(course));
        return;
    }

    println!("\n{}:", label(course));
    for row in rows {
        let assignment = row.assignment();
        println!(
            "  {} {:<40} {:<9} {}",
            assignment.due_date(),
            assignment.name(),
            assignment.status(),
            assignment.score_summary()
        );
    }
}

fn label(course: &Course) -> String {
    format!("{} {}", course.code(), course.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(["due-soon-report"].iter().chain(args).copied()).unwrap()
    }

    #[test]
    fn course_listing_needs_text_output() {
        assert!(parse(&["--course", "CS 101"]).check().is_ok());
        assert!(parse(&["--course", "CS 101", "--format", "text"]).check().is_ok());
        assert!(parse(&["--course", "CS 101", "--format", "json"]).check().is_err());
        assert!(parse(&["--course", "CS 101", "--format", "csv"]).check().is_err());
        assert!(parse(&["--format", "csv"]).check().is_ok());
    }

    #[test]
    fn semester_flag_marks_a_semester_current() {
        let now = parse_now("2026-02-09T00:00:00Z").unwrap();
        let mut store = init_store(&TrackerConfig::default().with_now(now)).unwrap();

        mark_current_semester(&mut store, SemesterSelector::new("fall 2025")).unwrap();
        let current = store
            .semesters()
            .iter()
            .filter(|semester| semester.is_current())
            .map(|semester| semester.name())
            .collect::<Vec<_>>();
        assert_eq!(current, ["Fall 2025"]);

        assert!(mark_current_semester(&mut store, SemesterSelector::new("Winter 1999")).is_err());
    }
}
