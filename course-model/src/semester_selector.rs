use crate::semester::Semester;

/// Picks a semester by id, then by name, ignoring surrounding whitespace and ASCII case.
#[derive(Debug, Clone)]
pub struct SemesterSelector {
    selector: String,
}

impl SemesterSelector {
    pub fn new(selector: impl AsRef<str>) -> Self {
        Self {
            selector: selector.as_ref().trim().to_owned(),
        }
    }

    pub fn select_from<'a>(&self, semesters: &'a [Semester]) -> Option<&'a Semester> {
        self.select_as_id(semesters)
            .or_else(|| self.select_as_name(semesters))
    }

    fn select_as_id<'a>(&self, semesters: &'a [Semester]) -> Option<&'a Semester> {
        let id = self.selector.parse::<u32>().ok()?;
        semesters.iter().find(|semester| semester.id().as_u32() == id)
    }

    fn select_as_name<'a>(&self, semesters: &'a [Semester]) -> Option<&'a Semester> {
        semesters
            .iter()
            .find(|semester| semester.name().eq_ignore_ascii_case(&self.selector))
    }
}
