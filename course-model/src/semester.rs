use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::entity_id;

entity_id!(SemesterId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    id: SemesterId,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    /// Decides which courses are current.
    is_active: bool,
    /// Selection flag written by [`Semester::set_current`]; independent of `is_active`.
    is_current: bool,
    #[serde(rename = "targetGPA")]
    target_gpa: f64,
    #[serde(rename = "currentGPA")]
    current_gpa: Option<f64>,
    gpa: f64,
    course_count: u32,
    total_credits: u32,
}

impl Semester {
    pub fn id(&self) -> SemesterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn set_current(&mut self, is_current: bool) {
        self.is_current = is_current;
    }

    pub fn target_gpa(&self) -> f64 {
        self.target_gpa
    }

    pub fn current_gpa(&self) -> Option<f64> {
        self.current_gpa
    }

    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    pub fn course_count(&self) -> u32 {
        self.course_count
    }

    pub fn total_credits(&self) -> u32 {
        self.total_credits
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSemester {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub is_current: bool,
    #[serde(rename = "targetGPA")]
    pub target_gpa: f64,
    #[serde(rename = "currentGPA")]
    pub current_gpa: Option<f64>,
    pub gpa: f64,
    pub course_count: u32,
    pub total_credits: u32,
}

impl NewSemester {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date,
            is_active: false,
            is_current: false,
            target_gpa: 0.0,
            current_gpa: None,
            gpa: 0.0,
            course_count: 0,
            total_credits: 0,
        }
    }

    pub fn active(mut self) -> Self {
        self.is_active = true;
        self.is_current = true;
        self
    }

    pub fn into_semester(self, id: SemesterId) -> Semester {
        let Self {
            name,
            start_date,
            end_date,
            is_active,
            is_current,
            target_gpa,
            current_gpa,
            gpa,
            course_count,
            total_credits,
        } = self;

        Semester {
            id,
            name,
            start_date,
            end_date,
            is_active,
            is_current,
            target_gpa,
            current_gpa,
            gpa,
            course_count,
            total_credits,
        }
    }
}
