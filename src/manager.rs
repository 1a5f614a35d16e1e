use crate::persistence::{RecordStore, StoreError};
use crate::{Course, EntryFields, TimetableEntry, TimetableFilter};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("Course '{0}' not found")]
    CourseNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, TimetableError>;

/// Resolves course names to identifiers and forwards timetable CRUD to the
/// record store.
///
/// Every call is independent: the course is looked up again each time and
/// nothing is cached between calls.
#[derive(Clone)]
pub struct TimetableManager {
    store: Arc<dyn RecordStore>,
}

impl TimetableManager {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn from_store<S: RecordStore + 'static>(store: S) -> Self {
        Self::new(Arc::new(store))
    }

    fn resolve(&self, course_name: &str) -> Result<i64> {
        match self.store.find_course_id(course_name)? {
            Some(course_id) => Ok(course_id),
            None => {
                warn!(course_name, "course lookup missed");
                Err(TimetableError::CourseNotFound(course_name.to_string()))
            }
        }
    }

    pub fn add_course(&self, course_name: &str) -> Result<Course> {
        let course = self.store.insert_course(course_name)?;
        info!(course_id = course.course_id, course_name, "course added");
        Ok(course)
    }

    pub fn get_all_courses(&self) -> Result<Vec<Course>> {
        Ok(self.store.list_courses()?)
    }

    /// Course names in alphabetical order, for pickers.
    pub fn course_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .store
            .list_courses()?
            .into_iter()
            .map(|c| c.course_name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Entries for the course on `day`, ascending by period.
    ///
    /// An unknown course yields an empty list. Use [`find_timetable`] to tell
    /// that case apart from a day without classes.
    ///
    /// [`find_timetable`]: TimetableManager::find_timetable
    pub fn get_timetable(&self, course_name: &str, day: &str) -> Result<Vec<TimetableEntry>> {
        Ok(self.find_timetable(course_name, day)?.unwrap_or_default())
    }

    /// Like [`get_timetable`](TimetableManager::get_timetable) but `None` when
    /// the course does not exist.
    pub fn find_timetable(
        &self,
        course_name: &str,
        day: &str,
    ) -> Result<Option<Vec<TimetableEntry>>> {
        let Some(course_id) = self.store.find_course_id(course_name)? else {
            debug!(course_name, day, "timetable requested for unknown course");
            return Ok(None);
        };
        let mut entries = self
            .store
            .list_timetable(&TimetableFilter::course_day(course_id, day))?;
        sort_by_period(&mut entries);
        debug!(course_name, day, count = entries.len(), "timetable fetched");
        Ok(Some(entries))
    }

    pub fn get_all_timetables(&self) -> Result<Vec<TimetableEntry>> {
        Ok(self.store.list_timetable(&TimetableFilter::all())?)
    }

    pub fn add_timetable_entry(
        &self,
        course_name: &str,
        day: &str,
        period: i32,
        subject_name: &str,
        teacher_name: &str,
        classroom: &str,
    ) -> Result<TimetableEntry> {
        let course_id = self.resolve(course_name)?;
        let entry = TimetableEntry::new(
            course_id,
            day,
            period,
            subject_name,
            teacher_name,
            classroom,
        );
        let created = self.store.insert_timetable_entry(&entry)?;
        info!(course_name, day, period, "timetable entry added");
        Ok(created)
    }

    /// Rewrites subject, teacher and classroom of every row in the slot.
    /// Returns an empty list when the slot has no rows.
    pub fn update_timetable_entry(
        &self,
        course_name: &str,
        day: &str,
        period: i32,
        subject_name: &str,
        teacher_name: &str,
        classroom: &str,
    ) -> Result<Vec<TimetableEntry>> {
        let course_id = self.resolve(course_name)?;
        let fields = EntryFields::new(subject_name, teacher_name, classroom);
        let updated = self
            .store
            .update_timetable_entry(course_id, day, period, &fields)?;
        info!(course_name, day, period, updated = updated.len(), "timetable entry updated");
        Ok(updated)
    }

    pub fn delete_timetable_entry(
        &self,
        course_name: &str,
        day: &str,
        period: i32,
    ) -> Result<Vec<TimetableEntry>> {
        let course_id = self.resolve(course_name)?;
        let deleted = self.store.delete_timetable_entry(course_id, day, period)?;
        info!(course_name, day, period, deleted = deleted.len(), "timetable entry deleted");
        Ok(deleted)
    }
}

/// Stable ascending sort on period.
pub fn sort_by_period(entries: &mut [TimetableEntry]) {
    entries.sort_by_key(|entry| entry.period);
}
