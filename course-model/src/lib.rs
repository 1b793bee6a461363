pub mod assignment;
pub mod clock;
pub mod course;
pub mod course_selector;
pub mod notification;
pub mod semester;
pub mod semester_selector;
pub mod types;

mod util;
