use crate::{Course, EntryFields, TimetableEntry, TimetableFilter};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("course {0} does not exist")]
    MissingCourse(i64),

    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type PersistenceResult<T> = Result<T, StoreError>;

/// CRUD access to the `courses` and `timetable` tables.
///
/// Implementations take `&self` and acquire whatever handle they need for the
/// duration of a single call, so one store can be shared across request
/// handlers behind an `Arc`.
pub trait RecordStore: Send + Sync {
    /// All courses in ascending `course_id` order.
    fn list_courses(&self) -> PersistenceResult<Vec<Course>>;

    /// Fails with [`StoreError::DuplicateKey`] when the name is already taken.
    fn insert_course(&self, course_name: &str) -> PersistenceResult<Course>;

    /// Exact, case-sensitive name match.
    fn find_course_id(&self, course_name: &str) -> PersistenceResult<Option<i64>>;

    /// Rows in insertion order.
    fn list_timetable(&self, filter: &TimetableFilter) -> PersistenceResult<Vec<TimetableEntry>>;

    /// Fails with [`StoreError::MissingCourse`] when `entry.course_id` has no
    /// course row.
    fn insert_timetable_entry(&self, entry: &TimetableEntry)
    -> PersistenceResult<TimetableEntry>;

    /// Rewrites every row in the slot and returns them. Never inserts.
    fn update_timetable_entry(
        &self,
        course_id: i64,
        day: &str,
        period: i32,
        fields: &EntryFields,
    ) -> PersistenceResult<Vec<TimetableEntry>>;

    /// Removes every row in the slot and returns what was removed.
    fn delete_timetable_entry(
        &self,
        course_id: i64,
        day: &str,
        period: i32,
    ) -> PersistenceResult<Vec<TimetableEntry>>;
}

pub mod file;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{export_timetable_to_csv, export_timetable_to_json};
pub use memory::MemoryRecordStore;
