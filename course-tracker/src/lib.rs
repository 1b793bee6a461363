//! An in-memory tracker for courses, their assignments, and the semesters they belong to.
//!
//! [`store::CourseStore`] owns the records and applies mutations. Everything else in this crate is
//! a pure function of the records: grades and GPA ([`grade`]), the summary views derived after
//! every change ([`derive`], [`progress`], [`notify`]), and ad hoc lookups ([`query`]).
//!
//! # Terminology:
//! - Active semester: the first semester flagged active, or else the first semester
//! - Active courses: courses whose semester name equals the active semester's name
//! - Due this week: not yet graded and due between now and seven days from now, inclusive

pub mod derive;
pub mod grade;
pub mod notify;
pub mod progress;
pub mod query;
pub mod seed;
pub mod store;
