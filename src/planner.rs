//! The in-memory planning session.
//!
//! The [`Planner`] exclusively owns the semester/course tree for one editing
//! session. Other components read it through shared borrows and change it
//! only through the operations defined here. Each operation is a single
//! synchronous transition: it either applies completely or leaves the tree
//! untouched.
//!
//! Mutations that hit a lock, or name something that does not exist, are not
//! errors. They return [`Change::Rejected`] and leave the state as it was.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, instrument, warn};

use crate::{
    domain::{
        CatalogCode, Color, Course, CourseId, PlanSnapshot, Semester, SemesterCode, SemesterId,
    },
    drag::MoveDelta,
};

/// The outcome of a planner operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The state changed.
    Applied,
    /// The operation was accepted but the state already matched.
    Unchanged,
    /// The operation was refused; the state is untouched.
    Rejected(Rejection),
}

impl Change {
    /// Whether the state changed.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Whether the operation was refused.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The reason the operation was refused, if it was.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::Applied | Self::Unchanged => None,
        }
    }
}

impl From<Result<bool, Rejection>> for Change {
    fn from(result: Result<bool, Rejection>) -> Self {
        match result {
            Ok(true) => Self::Applied,
            Ok(false) => Self::Unchanged,
            Err(rejection) => {
                debug!(%rejection, "mutation rejected");
                Self::Rejected(rejection)
            }
        }
    }
}

/// Why an operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The semester is locked against structural changes.
    #[error("semester {0} is locked")]
    SemesterLocked(SemesterId),
    /// The course placement is locked.
    #[error("course {0} is locked")]
    CourseLocked(CourseId),
    /// No semester has this identifier.
    #[error("semester {0} not found")]
    UnknownSemester(SemesterId),
    /// The semester holds no placement with this identifier.
    #[error("course {course} not found in semester {semester}")]
    UnknownCourse {
        /// The semester searched.
        semester: SemesterId,
        /// The missing placement.
        course: CourseId,
    },
    /// The semester holds no placement of this catalog course.
    #[error("no {code} placement in semester {semester}")]
    UnknownCatalogCode {
        /// The semester searched.
        semester: SemesterId,
        /// The missing catalog code.
        code: CatalogCode,
    },
    /// The target semester already holds this placement.
    #[error("course {0} is already placed in the target semester")]
    DuplicateCourse(CourseId),
    /// No major at this position.
    #[error("no major at position {0}")]
    UnknownMajor(usize),
}

/// The planning session store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Planner {
    majors: Vec<String>,
    semesters: Vec<Semester>,
    transfer_credits: Vec<String>,
    selection: BTreeSet<CourseId>,
}

impl Planner {
    /// Builds a session from an upstream snapshot.
    ///
    /// Semesters with an identifier seen earlier in the snapshot are dropped.
    /// A placement identifier is kept only at its first occurrence in plan
    /// order, so every placement lives in exactly one semester.
    #[must_use]
    pub fn from_snapshot(snapshot: PlanSnapshot) -> Self {
        let mut seen_semesters = HashSet::with_capacity(snapshot.semesters.len());
        let mut semesters = Vec::with_capacity(snapshot.semesters.len());
        let mut seen_courses = HashSet::new();

        for mut semester in snapshot.semesters {
            if !seen_semesters.insert(semester.id) {
                warn!(semester = %semester.id, "dropping semester with duplicate id");
                continue;
            }

            let semester_id = semester.id;
            semester.courses.retain(|course| {
                let first = seen_courses.insert(course.id);
                if !first {
                    warn!(course = %course.id, semester = %semester_id, "dropping duplicate placement");
                }
                first
            });

            semesters.push(semester);
        }

        Self {
            majors: snapshot.majors,
            semesters,
            transfer_credits: snapshot.transfer_credits,
            selection: BTreeSet::new(),
        }
    }

    /// Replaces the whole session with a new snapshot.
    ///
    /// Nothing is merged: the previous tree and the selection are discarded.
    #[instrument(level = "debug", skip_all)]
    pub fn replace_snapshot(&mut self, snapshot: PlanSnapshot) {
        *self = Self::from_snapshot(snapshot);
    }

    /// Exports the current tree for persistence.
    #[must_use]
    pub fn snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            majors: self.majors.clone(),
            semesters: self.semesters.clone(),
            transfer_credits: self.transfer_credits.clone(),
            updated: None,
        }
    }

    /// All semesters, in plan order.
    #[must_use]
    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    /// Looks up a semester by identifier.
    #[must_use]
    pub fn semester(&self, id: SemesterId) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == id)
    }

    /// Looks up the first semester with the given term code.
    #[must_use]
    pub fn semester_by_code(&self, code: SemesterCode) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.code == code)
    }

    /// Finds the semester holding a placement.
    #[must_use]
    pub fn locate(&self, course: CourseId) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.contains(course))
    }

    /// Every catalog code placed in the plan, in plan order.
    pub fn planned_codes(&self) -> impl Iterator<Item = &CatalogCode> {
        self.semesters
            .iter()
            .flat_map(|s| s.courses.iter().map(|c| &c.code))
    }

    /// The plan's majors.
    #[must_use]
    pub fn majors(&self) -> &[String] {
        &self.majors
    }

    /// Credits transferred in.
    #[must_use]
    pub fn transfer_credits(&self) -> &[String] {
        &self.transfer_credits
    }

    /// The currently selected placements.
    pub fn selection(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.selection.iter().copied()
    }

    /// Whether a placement is selected.
    #[must_use]
    pub fn course_is_selected(&self, course: CourseId) -> bool {
        self.selection.contains(&course)
    }

    /// Adds placements to the selection.
    ///
    /// Identifiers that are already selected, or that name no placement, are
    /// ignored. Returns the number of newly selected placements.
    pub fn select_courses(&mut self, courses: impl IntoIterator<Item = CourseId>) -> usize {
        let mut added = 0;
        for course in courses {
            if self.locate(course).is_some() && self.selection.insert(course) {
                added += 1;
            }
        }
        added
    }

    /// Removes placements from the selection.
    ///
    /// Returns the number of placements that were deselected.
    pub fn deselect_courses(&mut self, courses: impl IntoIterator<Item = CourseId>) -> usize {
        courses
            .into_iter()
            .filter(|course| self.selection.remove(course))
            .count()
    }

    /// Selects every placement in a semester.
    ///
    /// Returns the number of newly selected placements.
    pub fn select_all_courses(&mut self, semester: SemesterId) -> usize {
        let Some(semester) = self.semester(semester) else {
            return 0;
        };
        let ids: Vec<CourseId> = semester.courses.iter().map(|c| c.id).collect();
        self.select_courses(ids)
    }

    /// Removes one placement from a semester.
    ///
    /// Rejected if the semester or the placement is locked. A removed
    /// placement is also dropped from the selection.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_course_from_semester(&mut self, semester: SemesterId, course: CourseId) -> Change {
        self.try_remove(semester, course).map(|_| true).into()
    }

    /// Removes every unlocked placement from a semester in one step.
    ///
    /// Rejected if the semester is locked. Locked placements stay put.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_all_courses_from_semester(&mut self, semester: SemesterId) -> Change {
        let result = self.unlocked_semester_mut(semester).map(|semester| {
            let mut removed = Vec::new();
            semester.courses.retain(|course| {
                if course.is_locked() {
                    true
                } else {
                    removed.push(course.id);
                    false
                }
            });
            removed
        });

        result
            .map(|removed| {
                for course in &removed {
                    self.selection.remove(course);
                }
                !removed.is_empty()
            })
            .into()
    }

    /// Sets a semester's colour tag.
    #[instrument(level = "debug", skip(self))]
    pub fn set_semester_color(&mut self, color: Color, semester: SemesterId) -> Change {
        self.semester_mut(semester)
            .map(|semester| std::mem::replace(&mut semester.color, color) != color)
            .into()
    }

    /// Sets the colour tag of a catalog course's placements in a semester.
    #[instrument(level = "debug", skip(self))]
    pub fn set_course_color(
        &mut self,
        color: Color,
        code: &CatalogCode,
        semester: SemesterId,
    ) -> Change {
        self.update_courses(semester, code, |course| {
            std::mem::replace(&mut course.color, color) != color
        })
        .into()
    }

    /// Locks or unlocks a semester.
    ///
    /// Course locks inside the semester are left as they are.
    #[instrument(level = "debug", skip(self))]
    pub fn set_semester_lock(&mut self, semester: SemesterId, locked: bool) -> Change {
        self.semester_mut(semester)
            .map(|semester| semester.locked.set(locked))
            .into()
    }

    /// Locks or unlocks a catalog course's placements in a semester.
    #[instrument(level = "debug", skip(self))]
    pub fn set_course_lock(
        &mut self,
        semester: SemesterId,
        locked: bool,
        code: &CatalogCode,
    ) -> Change {
        self.update_courses(semester, code, |course| course.locked.set(locked))
            .into()
    }

    /// Sets the prerequisite override of a catalog course's placements in a
    /// semester.
    ///
    /// The flag is advisory; nothing is re-validated here.
    #[instrument(level = "debug", skip(self))]
    pub fn set_course_prereq_override(
        &mut self,
        semester: SemesterId,
        prereq_override: bool,
        code: &CatalogCode,
    ) -> Change {
        self.update_courses(semester, code, |course| {
            std::mem::replace(&mut course.prereq_override, prereq_override) != prereq_override
        })
        .into()
    }

    /// Places a new instance of a catalog course at the end of a semester.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if the semester is unknown or locked.
    #[instrument(level = "debug", skip(self))]
    pub fn add_course(
        &mut self,
        semester: SemesterId,
        code: CatalogCode,
    ) -> Result<CourseId, Rejection> {
        let course = Course::new(code);
        let id = course.id;
        self.try_insert(semester, course)?;
        Ok(id)
    }

    /// Places a course at the end of a semester.
    ///
    /// Rejected if the semester is locked or the placement is already in the
    /// plan.
    #[instrument(level = "debug", skip(self, course), fields(course = %course.id))]
    pub fn insert_course(&mut self, semester: SemesterId, course: Course) -> Change {
        self.try_insert(semester, course).map(|()| true).into()
    }

    /// Commits a drag-and-drop delta.
    ///
    /// Every guard is checked before anything changes, so either both halves
    /// of a move apply or neither does.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_move(&mut self, delta: &MoveDelta) -> Change {
        self.try_apply_move(delta).into()
    }

    /// Removes every selected, unlocked placement held in unlocked semesters.
    ///
    /// Placements that cannot be removed stay selected.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_selected_courses(&mut self) -> Change {
        let selection = &self.selection;
        let mut removed = Vec::new();

        for semester in self.semesters.iter_mut().filter(|s| !s.is_locked()) {
            semester.courses.retain(|course| {
                let remove = selection.contains(&course.id) && !course.is_locked();
                if remove {
                    removed.push(course.id);
                }
                !remove
            });
        }

        for course in &removed {
            self.selection.remove(course);
        }

        Change::from(Ok(!removed.is_empty()))
    }

    /// Moves every selected, unlocked placement into the target semester.
    ///
    /// Placements held by locked semesters are skipped. Rejected outright if
    /// the target is unknown or locked.
    #[instrument(level = "debug", skip(self))]
    pub fn move_selected_courses(&mut self, target: SemesterId) -> Change {
        self.try_move_selected(target).into()
    }

    /// Renames the major at a position in the plan's major list.
    ///
    /// The change is applied locally and immediately; persisting it is up
    /// to the caller.
    #[instrument(level = "debug", skip(self))]
    pub fn set_major(&mut self, index: usize, major: String) -> Change {
        self.majors
            .get_mut(index)
            .ok_or(Rejection::UnknownMajor(index))
            .map(|current| std::mem::replace(current, major.clone()) != major)
            .into()
    }

    /// Records a credit transferred in.
    ///
    /// Surrounding whitespace is trimmed. Blank entries and entries already
    /// on the list leave the plan unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn add_transfer_credit(&mut self, credit: &str) -> Change {
        let credit = credit.trim();
        if credit.is_empty() || self.transfer_credits.iter().any(|c| c == credit) {
            return Change::Unchanged;
        }
        self.transfer_credits.push(credit.to_string());
        Change::Applied
    }

    /// Drops a transferred credit. Unknown entries are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_transfer_credit(&mut self, credit: &str) -> Change {
        let credit = credit.trim();
        let before = self.transfer_credits.len();
        self.transfer_credits.retain(|c| c != credit);
        if self.transfer_credits.len() == before {
            Change::Unchanged
        } else {
            Change::Applied
        }
    }
}

impl Planner {
    fn semester_mut(&mut self, id: SemesterId) -> Result<&mut Semester, Rejection> {
        self.semesters
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(Rejection::UnknownSemester(id))
    }

    fn unlocked_semester_mut(&mut self, id: SemesterId) -> Result<&mut Semester, Rejection> {
        let semester = self.semester_mut(id)?;
        if semester.is_locked() {
            return Err(Rejection::SemesterLocked(id));
        }
        Ok(semester)
    }

    /// Applies `update` to every placement of `code` in the semester.
    ///
    /// Returns whether any placement changed.
    fn update_courses(
        &mut self,
        semester: SemesterId,
        code: &CatalogCode,
        mut update: impl FnMut(&mut Course) -> bool,
    ) -> Result<bool, Rejection> {
        let target = self.semester_mut(semester)?;
        let mut found = false;
        let mut changed = false;
        for course in target.courses_with_code_mut(code) {
            found = true;
            changed |= update(course);
        }
        if found {
            Ok(changed)
        } else {
            Err(Rejection::UnknownCatalogCode {
                semester,
                code: code.clone(),
            })
        }
    }

    /// Checks that a placement may leave its semester.
    fn check_removable(&self, semester: SemesterId, course: CourseId) -> Result<usize, Rejection> {
        let source = self
            .semester(semester)
            .ok_or(Rejection::UnknownSemester(semester))?;
        if source.is_locked() {
            return Err(Rejection::SemesterLocked(semester));
        }
        let index = source
            .courses
            .iter()
            .position(|c| c.id == course)
            .ok_or(Rejection::UnknownCourse { semester, course })?;
        if source.courses[index].is_locked() {
            return Err(Rejection::CourseLocked(course));
        }
        Ok(index)
    }

    /// Checks that a placement may enter a semester.
    ///
    /// `leaving` names the semester the placement is moving out of, if any.
    fn check_insertable(
        &self,
        semester: SemesterId,
        course: CourseId,
        leaving: Option<SemesterId>,
    ) -> Result<(), Rejection> {
        let target = self
            .semester(semester)
            .ok_or(Rejection::UnknownSemester(semester))?;
        if target.is_locked() {
            return Err(Rejection::SemesterLocked(semester));
        }
        if self
            .semesters
            .iter()
            .any(|s| Some(s.id) != leaving && s.contains(course))
        {
            return Err(Rejection::DuplicateCourse(course));
        }
        Ok(())
    }

    fn try_remove(&mut self, semester: SemesterId, course: CourseId) -> Result<Course, Rejection> {
        let index = self.check_removable(semester, course)?;
        let removed = self.semester_mut(semester)?.courses.remove(index);
        self.selection.remove(&course);
        Ok(removed)
    }

    fn try_insert(&mut self, semester: SemesterId, course: Course) -> Result<(), Rejection> {
        self.check_insertable(semester, course.id, None)?;
        self.semester_mut(semester)?.courses.push(course);
        Ok(())
    }

    fn try_apply_move(&mut self, delta: &MoveDelta) -> Result<bool, Rejection> {
        match delta {
            MoveDelta::Insert { course, to } => {
                self.try_insert(*to, course.clone())?;
            }
            MoveDelta::Transfer { course, from, to } => {
                let index = self.check_removable(*from, *course)?;
                if from == to {
                    return Ok(false);
                }
                self.check_insertable(*to, *course, Some(*from))?;
                // the placement keeps its id, so the selection is untouched
                let moved = self.semester_mut(*from)?.courses.remove(index);
                self.semester_mut(*to)?.courses.push(moved);
            }
            MoveDelta::Remove { course, from } => {
                self.try_remove(*from, *course)?;
            }
        }
        Ok(true)
    }

    fn try_move_selected(&mut self, target: SemesterId) -> Result<bool, Rejection> {
        let destination = self
            .semester(target)
            .ok_or(Rejection::UnknownSemester(target))?;
        if destination.is_locked() {
            return Err(Rejection::SemesterLocked(target));
        }
        let mut placed: HashSet<CourseId> = destination.courses.iter().map(|c| c.id).collect();

        let selection = &self.selection;
        let mut moving = Vec::new();
        for semester in self
            .semesters
            .iter_mut()
            .filter(|s| s.id != target && !s.is_locked())
        {
            semester.courses.retain(|course| {
                let take = selection.contains(&course.id)
                    && !course.is_locked()
                    && placed.insert(course.id);
                if take {
                    moving.push(course.clone());
                }
                !take
            });
        }

        let moved = !moving.is_empty();
        self.semester_mut(target)?.courses.extend(moving);
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Lock, Season},
        validator::credits_taken,
    };

    fn code(s: &str) -> CatalogCode {
        CatalogCode::new(s).unwrap()
    }

    fn semester(year: u16, season: Season, codes: &[&str]) -> Semester {
        let mut semester = Semester::new(SemesterCode::new(year, season));
        semester.courses = codes.iter().map(|c| Course::new(code(c))).collect();
        semester
    }

    /// A plan with an empty-ish fall and a spring holding two courses.
    fn planner() -> (Planner, SemesterId, SemesterId) {
        let fall = semester(2024, Season::Fall, &["CS 1336", "MATH 2417", "CS 2336"]);
        let spring = semester(2025, Season::Spring, &["CS 1337", "GOVT 2305"]);
        let (fall_id, spring_id) = (fall.id, spring.id);
        let planner = Planner::from_snapshot(PlanSnapshot {
            majors: vec!["Computer Science".to_string()],
            semesters: vec![fall, spring],
            transfer_credits: vec!["HIST 1301".to_string()],
            updated: None,
        });
        (planner, fall_id, spring_id)
    }

    fn course_ids(planner: &Planner, semester: SemesterId) -> Vec<CourseId> {
        planner
            .semester(semester)
            .unwrap()
            .courses
            .iter()
            .map(|c| c.id)
            .collect()
    }

    #[test]
    fn snapshot_round_trips_through_planner() {
        let (planner, ..) = planner();
        let rebuilt = Planner::from_snapshot(planner.snapshot());
        assert_eq!(rebuilt, planner);
        assert_eq!(planner.majors(), ["Computer Science"]);
        assert_eq!(planner.transfer_credits(), ["HIST 1301"]);
    }

    #[test]
    fn duplicates_in_snapshot_are_dropped() {
        let mut fall = semester(2024, Season::Fall, &["CS 1336"]);
        let repeated = fall.courses[0].clone();
        fall.courses.push(repeated);
        let snapshot = PlanSnapshot {
            semesters: vec![fall.clone(), fall],
            ..PlanSnapshot::default()
        };

        let planner = Planner::from_snapshot(snapshot);

        assert_eq!(planner.semesters().len(), 1);
        assert_eq!(planner.semesters()[0].courses.len(), 1);
    }

    #[test]
    fn selection_laws() {
        let (mut planner, fall, spring) = planner();
        let fall_ids = course_ids(&planner, fall);
        let spring_ids = course_ids(&planner, spring);

        assert_eq!(planner.select_courses([spring_ids[0]]), 1);
        let before: Vec<_> = planner.selection().collect();

        assert_eq!(planner.select_courses(fall_ids.clone()), 3);
        assert_eq!(planner.select_courses(fall_ids.clone()), 0, "idempotent");
        assert_eq!(planner.deselect_courses(fall_ids.clone()), 3);
        assert_eq!(planner.selection().collect::<Vec<_>>(), before);

        assert_eq!(planner.deselect_courses(fall_ids), 0);
        assert!(planner.course_is_selected(spring_ids[0]));
    }

    #[test]
    fn selecting_unknown_ids_is_a_no_op() {
        let (mut planner, ..) = planner();
        assert_eq!(planner.select_courses([CourseId::new()]), 0);
        assert_eq!(planner.selection().count(), 0);
    }

    #[test]
    fn select_all_courses_in_semester() {
        let (mut planner, fall, _) = planner();
        assert_eq!(planner.select_all_courses(fall), 3);
        assert!(
            course_ids(&planner, fall)
                .into_iter()
                .all(|id| planner.course_is_selected(id))
        );
        assert_eq!(planner.select_all_courses(SemesterId::new()), 0);
    }

    #[test]
    fn remove_course_updates_list_and_selection() {
        let (mut planner, fall, _) = planner();
        let target = course_ids(&planner, fall)[1];
        planner.select_courses([target]);

        assert_eq!(
            planner.remove_course_from_semester(fall, target),
            Change::Applied
        );
        assert_eq!(planner.semester(fall).unwrap().courses.len(), 2);
        assert!(!planner.course_is_selected(target));
        assert_eq!(credits_taken(planner.semester(fall).unwrap()), 6);
    }

    #[test]
    fn remove_from_locked_semester_is_rejected() {
        let (mut planner, fall, _) = planner();
        let target = course_ids(&planner, fall)[0];
        planner.select_courses([target]);
        assert!(planner.set_semester_lock(fall, true).is_applied());

        let before = planner.clone();
        let change = planner.remove_course_from_semester(fall, target);

        assert_eq!(change, Change::Rejected(Rejection::SemesterLocked(fall)));
        assert_eq!(planner, before);
    }

    #[test]
    fn remove_locked_course_is_rejected() {
        let (mut planner, fall, _) = planner();
        let target = course_ids(&planner, fall)[0];
        planner.set_course_lock(fall, true, &code("CS 1336"));

        let change = planner.remove_course_from_semester(fall, target);
        assert_eq!(change, Change::Rejected(Rejection::CourseLocked(target)));
    }

    #[test]
    fn remove_unknown_course_is_rejected() {
        let (mut planner, fall, _) = planner();
        let missing = CourseId::new();
        assert_eq!(
            planner.remove_course_from_semester(fall, missing),
            Change::Rejected(Rejection::UnknownCourse {
                semester: fall,
                course: missing
            })
        );
    }

    #[test]
    fn delete_all_on_locked_semester_keeps_courses() {
        let (mut planner, _, spring) = planner();
        planner.set_semester_lock(spring, true);

        let change = planner.delete_all_courses_from_semester(spring);

        assert!(change.is_rejected());
        assert_eq!(planner.semester(spring).unwrap().courses.len(), 2);
    }

    #[test]
    fn delete_all_clears_unlocked_courses() {
        let (mut planner, fall, _) = planner();
        planner.select_all_courses(fall);
        planner.set_course_lock(fall, true, &code("MATH 2417"));

        assert!(planner.delete_all_courses_from_semester(fall).is_applied());

        let remaining = &planner.semester(fall).unwrap().courses;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].code, code("MATH 2417"));
        assert_eq!(planner.selection().collect::<Vec<_>>(), vec![remaining[0].id]);
        assert_eq!(
            planner.delete_all_courses_from_semester(fall),
            Change::Unchanged
        );
    }

    #[test]
    fn locking_is_idempotent_and_leaves_course_locks() {
        let (mut planner, fall, _) = planner();
        planner.set_course_lock(fall, true, &code("CS 2336"));

        assert_eq!(planner.set_semester_lock(fall, true), Change::Applied);
        let once = planner.clone();
        assert_eq!(planner.set_semester_lock(fall, true), Change::Unchanged);
        assert_eq!(planner, once);

        let locks: Vec<Lock> = planner
            .semester(fall)
            .unwrap()
            .courses
            .iter()
            .map(|c| c.locked)
            .collect();
        assert_eq!(locks, vec![Lock::Unlocked, Lock::Unlocked, Lock::Locked]);

        assert_eq!(planner.set_semester_lock(fall, false), Change::Applied);
        assert!(!planner.semester(fall).unwrap().is_locked());
    }

    #[test]
    fn lock_unknown_semester_is_rejected() {
        let (mut planner, ..) = planner();
        let missing = SemesterId::new();
        assert_eq!(
            planner.set_semester_lock(missing, true),
            Change::Rejected(Rejection::UnknownSemester(missing))
        );
    }

    #[test]
    fn colors_do_not_affect_credits() {
        let (mut planner, fall, _) = planner();
        let before = credits_taken(planner.semester(fall).unwrap());

        assert!(planner.set_semester_color(Color::Green, fall).is_applied());
        assert!(
            planner
                .set_course_color(Color::Red, &code("CS 1336"), fall)
                .is_applied()
        );
        assert_eq!(
            planner.set_course_color(Color::Red, &code("CS 1336"), fall),
            Change::Unchanged
        );

        let semester = planner.semester(fall).unwrap();
        assert_eq!(semester.color, Color::Green);
        assert_eq!(semester.courses[0].color, Color::Red);
        assert_eq!(semester.courses[1].color, Color::Plain);
        assert_eq!(credits_taken(semester), before);
    }

    #[test]
    fn course_updates_require_a_matching_code() {
        let (mut planner, fall, _) = planner();
        assert_eq!(
            planner.set_course_lock(fall, true, &code("CS 9999")),
            Change::Rejected(Rejection::UnknownCatalogCode {
                semester: fall,
                code: code("CS 9999"),
            })
        );
    }

    #[test]
    fn prereq_override_is_a_flag_only() {
        let (mut planner, fall, _) = planner();
        let before = credits_taken(planner.semester(fall).unwrap());

        assert!(
            planner
                .set_course_prereq_override(fall, true, &code("CS 2336"))
                .is_applied()
        );
        let semester = planner.semester(fall).unwrap();
        assert!(semester.courses[2].prereq_override);
        assert_eq!(credits_taken(semester), before);
    }

    #[test]
    fn course_lock_is_allowed_in_locked_semester() {
        let (mut planner, fall, _) = planner();
        planner.set_semester_lock(fall, true);
        assert!(
            planner
                .set_course_lock(fall, true, &code("CS 1336"))
                .is_applied()
        );
    }

    #[test]
    fn add_course_places_new_instance() {
        let (mut planner, fall, _) = planner();
        let first = planner.add_course(fall, code("CS 1336")).unwrap();
        let second = planner.add_course(fall, code("CS 1336")).unwrap();
        assert_ne!(first, second);
        assert_eq!(planner.semester(fall).unwrap().courses.len(), 5);

        planner.set_semester_lock(fall, true);
        assert_eq!(
            planner.add_course(fall, code("CS 3345")),
            Err(Rejection::SemesterLocked(fall))
        );
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let (mut planner, fall, _) = planner();
        let existing = planner.semester(fall).unwrap().courses[0].clone();
        assert_eq!(
            planner.insert_course(fall, existing.clone()),
            Change::Rejected(Rejection::DuplicateCourse(existing.id))
        );
    }

    #[test]
    fn insert_rejects_ids_placed_in_another_semester() {
        let (mut planner, fall, spring) = planner();
        let existing = planner.semester(fall).unwrap().courses[0].clone();
        let before = planner.clone();

        assert_eq!(
            planner.insert_course(spring, existing.clone()),
            Change::Rejected(Rejection::DuplicateCourse(existing.id))
        );
        assert_eq!(planner, before);
    }

    #[test]
    fn placement_shared_between_semesters_keeps_first() {
        let fall = semester(2024, Season::Fall, &["CS 1336"]);
        let mut spring = semester(2025, Season::Spring, &["CS 1337"]);
        let shared = fall.courses[0].clone();
        spring.courses.push(shared.clone());
        let (fall_id, spring_id) = (fall.id, spring.id);

        let planner = Planner::from_snapshot(PlanSnapshot {
            semesters: vec![fall, spring],
            ..PlanSnapshot::default()
        });

        assert_eq!(course_ids(&planner, fall_id), vec![shared.id]);
        assert_eq!(course_ids(&planner, spring_id).len(), 1);
        assert!(!planner.semester(spring_id).unwrap().contains(shared.id));
    }

    #[test]
    fn move_selected_never_duplicates_a_placement() {
        let fall = semester(2024, Season::Fall, &["CS 1336"]);
        let mut spring = semester(2025, Season::Spring, &[]);
        let summer = semester(2025, Season::Summer, &[]);
        let shared = fall.courses[0].clone();
        spring.courses.push(shared.clone());
        let summer_id = summer.id;

        // bypass snapshot cleaning to exercise the move on its own
        let mut planner = Planner {
            semesters: vec![fall, spring, summer],
            ..Planner::default()
        };
        planner.select_courses([shared.id]);

        assert!(planner.move_selected_courses(summer_id).is_applied());
        assert_eq!(course_ids(&planner, summer_id), vec![shared.id]);
    }

    #[test]
    fn transfer_moves_placement_and_keeps_selection() {
        let (mut planner, fall, spring) = planner();
        let course = course_ids(&planner, spring)[0];
        planner.select_courses([course]);

        let change = planner.apply_move(&MoveDelta::Transfer {
            course,
            from: spring,
            to: fall,
        });

        assert_eq!(change, Change::Applied);
        assert!(!planner.semester(spring).unwrap().contains(course));
        assert!(planner.semester(fall).unwrap().contains(course));
        assert!(planner.course_is_selected(course));
        assert_eq!(planner.locate(course).unwrap().id, fall);
    }

    #[test]
    fn transfer_into_locked_semester_is_all_or_nothing() {
        let (mut planner, fall, spring) = planner();
        let course = course_ids(&planner, spring)[0];
        planner.set_semester_lock(fall, true);
        let before = planner.clone();

        let change = planner.apply_move(&MoveDelta::Transfer {
            course,
            from: spring,
            to: fall,
        });

        assert_eq!(change, Change::Rejected(Rejection::SemesterLocked(fall)));
        assert_eq!(planner, before);
    }

    #[test]
    fn transfer_out_of_locked_semester_is_rejected() {
        let (mut planner, fall, spring) = planner();
        let course = course_ids(&planner, spring)[0];
        planner.set_semester_lock(spring, true);
        let before = planner.clone();

        let change = planner.apply_move(&MoveDelta::Transfer {
            course,
            from: spring,
            to: fall,
        });

        assert!(change.is_rejected());
        assert_eq!(planner, before);
    }

    #[test]
    fn transfer_within_semester_is_unchanged() {
        let (mut planner, fall, _) = planner();
        let course = course_ids(&planner, fall)[0];
        assert_eq!(
            planner.apply_move(&MoveDelta::Transfer {
                course,
                from: fall,
                to: fall
            }),
            Change::Unchanged
        );
    }

    #[test]
    fn delete_selected_skips_locked() {
        let (mut planner, fall, spring) = planner();
        planner.select_all_courses(fall);
        planner.select_all_courses(spring);
        planner.set_semester_lock(spring, true);
        planner.set_course_lock(fall, true, &code("CS 1336"));

        assert!(planner.delete_selected_courses().is_applied());

        assert_eq!(planner.semester(fall).unwrap().courses.len(), 1);
        assert_eq!(planner.semester(spring).unwrap().courses.len(), 2);
        assert_eq!(planner.selection().count(), 3);
    }

    #[test]
    fn move_selected_into_target() {
        let (mut planner, fall, spring) = planner();
        let moving = course_ids(&planner, fall);
        planner.select_courses(moving.clone());
        planner.set_course_lock(fall, true, &code("MATH 2417"));

        assert!(planner.move_selected_courses(spring).is_applied());

        let spring_ids = course_ids(&planner, spring);
        assert_eq!(spring_ids.len(), 4);
        assert!(spring_ids.contains(&moving[0]));
        assert!(spring_ids.contains(&moving[2]));
        assert_eq!(course_ids(&planner, fall), vec![moving[1]]);
    }

    #[test]
    fn move_selected_into_locked_target_is_rejected() {
        let (mut planner, fall, spring) = planner();
        planner.select_all_courses(fall);
        planner.set_semester_lock(spring, true);
        let before = planner.clone();

        assert_eq!(
            planner.move_selected_courses(spring),
            Change::Rejected(Rejection::SemesterLocked(spring))
        );
        assert_eq!(planner, before);
    }

    #[test]
    fn set_major_is_optimistic() {
        let (mut planner, ..) = planner();
        assert!(
            planner
                .set_major(0, "Software Engineering".to_string())
                .is_applied()
        );
        assert_eq!(planner.majors(), ["Software Engineering"]);
        assert_eq!(
            planner.set_major(3, "Physics".to_string()),
            Change::Rejected(Rejection::UnknownMajor(3))
        );
    }

    #[test]
    fn replace_snapshot_discards_everything() {
        let (mut planner, fall, _) = planner();
        planner.select_all_courses(fall);

        let replacement = semester(2026, Season::Summer, &["CS 4349"]);
        planner.replace_snapshot(PlanSnapshot {
            semesters: vec![replacement.clone()],
            ..PlanSnapshot::default()
        });

        assert_eq!(planner.semesters(), [replacement]);
        assert_eq!(planner.selection().count(), 0);
        assert!(planner.majors().is_empty());
        assert!(planner.semester(fall).is_none());
    }

    #[test]
    fn transfer_credits_are_a_set() {
        let (mut planner, ..) = planner();

        assert_eq!(planner.add_transfer_credit(" RHET 1302 "), Change::Applied);
        assert_eq!(planner.add_transfer_credit("RHET 1302"), Change::Unchanged);
        assert_eq!(planner.add_transfer_credit("   "), Change::Unchanged);
        assert_eq!(planner.transfer_credits(), ["HIST 1301", "RHET 1302"]);

        assert_eq!(planner.remove_transfer_credit("HIST 1301"), Change::Applied);
        assert_eq!(planner.remove_transfer_credit("HIST 1301"), Change::Unchanged);
        assert_eq!(planner.transfer_credits(), ["RHET 1302"]);
        assert_eq!(
            Planner::from_snapshot(planner.snapshot()).transfer_credits(),
            ["RHET 1302"]
        );
    }

    #[test]
    fn planned_codes_follow_plan_order() {
        let (planner, ..) = planner();
        let codes: Vec<&str> = planner.planned_codes().map(CatalogCode::as_str).collect();
        assert_eq!(
            codes,
            ["CS 1336", "MATH 2417", "CS 2336", "CS 1337", "GOVT 2305"]
        );
    }
}
