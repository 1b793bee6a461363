use crate::course::Course;

/// Picks a course by id, then by code, then by name. Surrounding whitespace is ignored and
/// code and name compare without regard to ASCII case.
#[derive(Debug, Clone)]
pub struct CourseSelector {
    selector: String,
}

impl CourseSelector {
    pub fn new(selector: impl AsRef<str>) -> Self {
        Self {
            selector: selector.as_ref().trim().to_owned(),
        }
    }

    pub fn select_from<'a>(&self, courses: &'a [Course]) -> Option<&'a Course> {
        if self.selector.is_empty() {
            return None;
        }

        self.select_as_id(courses)
            .or_else(|| self.matching(courses, Course::code))
            .or_else(|| self.matching(courses, Course::name))
    }

    fn select_as_id<'a>(&self, courses: &'a [Course]) -> Option<&'a Course> {
        let id = self.selector.parse::<u32>().ok()?;
        courses.iter().find(|course| course.id().as_u32() == id)
    }

    fn matching<'a>(
        &self,
        courses: &'a [Course],
        field: impl Fn(&Course) -> &str,
    ) -> Option<&'a Course> {
        courses
            .iter()
            .find(|&course| field(course).eq_ignore_ascii_case(&self.selector))
    }
}
