use super::{PersistenceResult, RecordStore, StoreError};
use crate::{Course, EntryFields, TimetableEntry, TimetableFilter};
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct Tables {
    next_course_id: i64,
    courses: Vec<Course>,
    timetable: Vec<TimetableEntry>,
}

/// In-process record store with the same observable semantics as the SQLite
/// store: unique course names, entries only for existing courses,
/// insertion-ordered rows, no slot uniqueness.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: RwLock<Tables>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn list_courses(&self) -> PersistenceResult<Vec<Course>> {
        Ok(self.tables.read().courses.clone())
    }

    fn insert_course(&self, course_name: &str) -> PersistenceResult<Course> {
        let mut tables = self.tables.write();
        if tables.courses.iter().any(|c| c.course_name == course_name) {
            return Err(StoreError::DuplicateKey(format!(
                "course '{course_name}' already exists"
            )));
        }
        tables.next_course_id += 1;
        let course = Course::new(tables.next_course_id, course_name);
        tables.courses.push(course.clone());
        Ok(course)
    }

    fn find_course_id(&self, course_name: &str) -> PersistenceResult<Option<i64>> {
        Ok(self
            .tables
            .read()
            .courses
            .iter()
            .find(|c| c.course_name == course_name)
            .map(|c| c.course_id))
    }

    fn list_timetable(&self, filter: &TimetableFilter) -> PersistenceResult<Vec<TimetableEntry>> {
        Ok(self
            .tables
            .read()
            .timetable
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect())
    }

    fn insert_timetable_entry(
        &self,
        entry: &TimetableEntry,
    ) -> PersistenceResult<TimetableEntry> {
        let mut tables = self.tables.write();
        if !tables.courses.iter().any(|c| c.course_id == entry.course_id) {
            return Err(StoreError::MissingCourse(entry.course_id));
        }
        tables.timetable.push(entry.clone());
        Ok(entry.clone())
    }

    fn update_timetable_entry(
        &self,
        course_id: i64,
        day: &str,
        period: i32,
        fields: &EntryFields,
    ) -> PersistenceResult<Vec<TimetableEntry>> {
        let mut tables = self.tables.write();
        let mut updated = Vec::new();
        for entry in tables
            .timetable
            .iter_mut()
            .filter(|entry| entry.matches_slot(course_id, day, period))
        {
            entry.apply(fields);
            updated.push(entry.clone());
        }
        Ok(updated)
    }

    fn delete_timetable_entry(
        &self,
        course_id: i64,
        day: &str,
        period: i32,
    ) -> PersistenceResult<Vec<TimetableEntry>> {
        let mut tables = self.tables.write();
        let (deleted, kept): (Vec<_>, Vec<_>) = tables
            .timetable
            .drain(..)
            .partition(|entry| entry.matches_slot(course_id, day, period));
        tables.timetable = kept;
        Ok(deleted)
    }
}
