//! The bootstrap data set the tracker starts from: two semesters and three courses.

use anyhow::{Context, Result};
use course_model::course::Course;
use course_model::semester::Semester;
use serde::Deserialize;

const BUNDLED: &str = include_str!("../data/bootstrap.json");

#[derive(Debug, Clone, Deserialize)]
pub struct Bootstrap {
    pub semesters: Vec<Semester>,
    pub courses: Vec<Course>,
}

impl Bootstrap {
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED).context("bundled bootstrap data is malformed")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("could not parse bootstrap data")
    }
}
