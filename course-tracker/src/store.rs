//! The owned, single-writer store of courses, semesters, and notifications.
//!
//! Every mutation rewrites the affected record in place and is complete before the call returns.
//! Lookups that miss are ignored rather than reported: updating or deleting an unknown id does
//! nothing. Derived views are not cached; each accessor recomputes from the current records.

use course_model::assignment::{Assignment, AssignmentId, AssignmentUpdate, NewAssignment};
use course_model::clock::{Clock, SystemClock};
use course_model::course::{Course, CourseId, CourseUpdate, NewCourse};
use course_model::notification::{Notification, NotificationId};
use course_model::semester::{NewSemester, Semester, SemesterId};
use tracing::{debug, info, trace};

use crate::derive::{self, Stats};
use crate::grade::{course_grade, semester_gpa};
use crate::notify::generate_notifications;
use crate::progress::CourseProgress;
use crate::query::{
    self, AssignmentCounts, AssignmentFilter, AssignmentRow, AssignmentSort, UpcomingAssignment,
};
use crate::seed::Bootstrap;

#[derive(Debug, Clone)]
pub struct CourseStore<C = SystemClock> {
    clock: C,
    courses: Vec<Course>,
    semesters: Vec<Semester>,
    notifications: Vec<Notification>,
}

impl<C: Clock> CourseStore<C> {
    pub fn new(clock: C, courses: Vec<Course>, semesters: Vec<Semester>) -> Self {
        let mut store = Self {
            clock,
            courses,
            semesters,
            notifications: Vec::new(),
        };
        store.regenerate_notifications();
        store
    }

    pub fn from_bootstrap(clock: C, bootstrap: Bootstrap) -> Self {
        let Bootstrap { semesters, courses } = bootstrap;
        info!(
            num_courses = courses.len(),
            num_semesters = semesters.len(),
            "loaded bootstrap data"
        );
        Self::new(clock, courses, semesters)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn course_by_id(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id() == id)
    }

    fn course_mut(&mut self, id: CourseId) -> Option<&mut Course> {
        self.courses.iter_mut().find(|course| course.id() == id)
    }

    // ---- mutations ----

    /// Adds a course with a fresh id, stamped now, with its grade computed from its assignments.
    pub fn add_course(&mut self, course: NewCourse) -> &Course {
        let id = CourseId::next_after(self.courses.iter().map(Course::id));
        let now = self.clock.now();

        let mut course = course.into_course(id, now);
        course.refresh(course_grade, now);
        debug!(%id, code = course.code(), grade = ?course.current_grade(), "added course");

        self.courses.push(course);
        &self.courses[self.courses.len() - 1]
    }

    pub fn update_course(&mut self, id: CourseId, update: CourseUpdate) {
        let now = self.clock.now();
        let Some(course) = self.course_mut(id) else {
            debug!(%id, "no course to update");
            return;
        };

        trace!(%id, ?update, "updating course");
        course.apply(update);
        course.refresh(course_grade, now);
    }

    pub fn delete_course(&mut self, id: CourseId) {
        let before = self.courses.len();
        self.courses.retain(|course| course.id() != id);
        if self.courses.len() == before {
            debug!(%id, "no course to delete");
        } else {
            debug!(%id, "deleted course");
        }
    }

    /// Appends an assignment to a course and rebuilds the notifications. Returns the new
    /// assignment's id, or `None` if there is no such course.
    pub fn add_assignment(
        &mut self,
        course_id: CourseId,
        assignment: NewAssignment,
    ) -> Option<AssignmentId> {
        let now = self.clock.now();
        let added = self.course_mut(course_id).map(|course| {
            let id = course.push_assignment(assignment);
            course.refresh(course_grade, now);
            debug!(
                %course_id,
                assignment_id = %id,
                grade = ?course.current_grade(),
                "added assignment"
            );
            id
        });
        if added.is_none() {
            debug!(%course_id, "no course to add an assignment to");
        }

        self.regenerate_notifications();
        added
    }

    /// Merges `update` into one assignment and rebuilds the notifications.
    pub fn update_assignment(
        &mut self,
        course_id: CourseId,
        assignment_id: AssignmentId,
        update: AssignmentUpdate,
    ) {
        let now = self.clock.now();
        match self.course_mut(course_id) {
            Some(course) => match course.assignment_mut(assignment_id) {
                Some(assignment) => {
                    trace!(%course_id, %assignment_id, ?update, "updating assignment");
                    assignment.apply(update);
                    course.refresh(course_grade, now);
                }
                None => debug!(%course_id, %assignment_id, "no assignment to update"),
            },
            None => debug!(%course_id, "no course to update an assignment in"),
        }

        self.regenerate_notifications();
    }

    pub fn add_semester(&mut self, semester: NewSemester) -> &Semester {
        let id = SemesterId::next_after(self.semesters.iter().map(Semester::id));
        self.semesters.push(semester.into_semester(id));
        debug!(%id, "added semester");
        &self.semesters[self.semesters.len() - 1]
    }

    /// Marks exactly the semester with `id` as current and every other one as not current.
    pub fn set_active_semester(&mut self, id: SemesterId) {
        for semester in &mut self.semesters {
            semester.set_current(semester.id() == id);
        }
        debug!(%id, "set current semester");
    }

    /// Drops one notification. The next assignment change rebuilds the list, so a dismissed
    /// notification that still applies comes back.
    pub fn dismiss_notification(&mut self, id: NotificationId) {
        let before = self.notifications.len();
        self.notifications.retain(|notification| notification.id() != id);
        if self.notifications.len() == before {
            debug!(%id, "no notification to dismiss");
        } else {
            debug!(%id, "dismissed notification");
        }
    }

    pub fn clear_notifications(&mut self) {
        debug!(
            num_notifications = self.notifications.len(),
            "cleared notifications"
        );
        self.notifications.clear();
    }

    fn regenerate_notifications(&mut self) {
        let now = self.clock.now();
        let active = self.active_courses();
        let due = query::due_this_week(active.iter().copied().flat_map(Course::assignments), now);
        let notifications = generate_notifications(&due, now);
        trace!(
            num_due = due.len(),
            num_notifications = notifications.len(),
            "regenerated notifications"
        );
        self.notifications = notifications;
    }

    // ---- derived views ----

    pub fn active_semester(&self) -> Option<&Semester> {
        derive::active_semester(&self.semesters)
    }

    pub fn active_courses(&self) -> Vec<&Course> {
        derive::active_courses(&self.courses, self.active_semester())
    }

    pub fn stats(&self) -> Stats {
        derive::stats(&self.courses, &self.semesters, self.clock.now())
    }

    pub fn recent_courses(&self) -> Vec<&Course> {
        derive::recent_courses(&self.courses)
    }

    /// GPA over the active courses.
    pub fn semester_gpa(&self) -> f64 {
        semester_gpa(self.active_courses())
    }

    /// Completion over every assignment of the active courses.
    pub fn completion_rate(&self) -> f64 {
        derive::completion_rate(
            self.active_courses()
                .into_iter()
                .flat_map(Course::assignments),
        )
    }

    pub fn course_progress(&self) -> Vec<CourseProgress<'_>> {
        self.active_courses()
            .into_iter()
            .map(CourseProgress::new)
            .collect()
    }

    // ---- queries ----

    pub fn search_courses(&self, text: &str) -> Vec<&Course> {
        query::search_courses(&self.courses, &self.semesters, text)
    }

    /// Assignments due this week across every course, not just the active ones.
    pub fn assignments_due_this_week(&self) -> Vec<&Assignment> {
        query::due_this_week(
            self.courses.iter().flat_map(Course::assignments),
            self.clock.now(),
        )
    }

    pub fn upcoming_assignments(&self) -> Vec<UpcomingAssignment<'_>> {
        query::upcoming_assignments(&self.courses, &self.active_courses(), self.clock.now())
    }

    /// Assignments of the active courses, filtered and sorted.
    pub fn list_assignments(
        &self,
        filter: AssignmentFilter,
        sort: AssignmentSort,
    ) -> Vec<AssignmentRow<'_>> {
        query::list_assignments(self.active_courses(), filter, sort)
    }

    pub fn assignment_counts(&self) -> AssignmentCounts {
        AssignmentCounts::tally(
            self.active_courses()
                .into_iter()
                .flat_map(Course::assignments),
        )
    }
}

impl CourseStore<SystemClock> {
    pub fn with_system_clock(bootstrap: Bootstrap) -> Self {
        Self::from_bootstrap(SystemClock, bootstrap)
    }
}
