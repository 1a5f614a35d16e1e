use super::{PersistenceResult, RecordStore, StoreError};
use crate::{Course, EntryFields, TimetableEntry, TimetableFilter};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, ffi, params};
use std::path::Path;
use tracing::debug;

const ENTRY_COLUMNS: &str = "course_id, day, period, subject_name, teacher_name, classroom";

pub struct SqliteRecordStore {
    connection: Mutex<Connection>,
}

impl SqliteRecordStore {
    pub fn new<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        debug!(path = %path.as_ref().display(), "opening sqlite record store");
        let connection = Connection::open(path)?;
        Self::from_connection(connection)
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        debug!("opening in-memory sqlite record store");
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> PersistenceResult<Self> {
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        // No uniqueness on (course_id, day, period): duplicate slots are accepted.
        let ddl = r#"
            PRAGMA foreign_keys = ON;
            CREATE TABLE IF NOT EXISTS courses (
                course_id INTEGER PRIMARY KEY AUTOINCREMENT,
                course_name TEXT NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS timetable (
                course_id INTEGER NOT NULL REFERENCES courses(course_id),
                day TEXT NOT NULL,
                period INTEGER NOT NULL,
                subject_name TEXT NOT NULL,
                teacher_name TEXT NOT NULL,
                classroom TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS timetable_course_day
                ON timetable (course_id, day);
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<TimetableEntry> {
    Ok(TimetableEntry {
        course_id: row.get(0)?,
        day: row.get(1)?,
        period: row.get(2)?,
        subject_name: row.get(3)?,
        teacher_name: row.get(4)?,
        classroom: row.get(5)?,
    })
}

fn has_extended_code(err: &rusqlite::Error, code: std::os::raw::c_int) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(inner, _) if inner.extended_code == code)
}

impl RecordStore for SqliteRecordStore {
    fn list_courses(&self) -> PersistenceResult<Vec<Course>> {
        let conn = self.connection.lock();
        let mut stmt =
            conn.prepare("SELECT course_id, course_name FROM courses ORDER BY course_id ASC")?;
        let rows = stmt.query_map([], |row| Ok(Course::new(row.get(0)?, row.get::<_, String>(1)?)))?;
        let mut courses = Vec::new();
        for course in rows {
            courses.push(course?);
        }
        Ok(courses)
    }

    fn insert_course(&self, course_name: &str) -> PersistenceResult<Course> {
        let conn = self.connection.lock();
        match conn.execute(
            "INSERT INTO courses (course_name) VALUES (?1)",
            params![course_name],
        ) {
            Ok(_) => Ok(Course::new(conn.last_insert_rowid(), course_name)),
            Err(err) if has_extended_code(&err, ffi::SQLITE_CONSTRAINT_UNIQUE) => Err(
                StoreError::DuplicateKey(format!("course '{course_name}' already exists")),
            ),
            Err(err) => Err(err.into()),
        }
    }

    fn find_course_id(&self, course_name: &str) -> PersistenceResult<Option<i64>> {
        let conn = self.connection.lock();
        let id = conn
            .query_row(
                "SELECT course_id FROM courses WHERE course_name = ?1",
                params![course_name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn list_timetable(&self, filter: &TimetableFilter) -> PersistenceResult<Vec<TimetableEntry>> {
        let conn = self.connection.lock();
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM timetable \
             WHERE (?1 IS NULL OR course_id = ?1) AND (?2 IS NULL OR day = ?2) \
             ORDER BY rowid ASC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![filter.course_id, filter.day.as_deref()], row_to_entry)?;
        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }
        Ok(entries)
    }

    fn insert_timetable_entry(
        &self,
        entry: &TimetableEntry,
    ) -> PersistenceResult<TimetableEntry> {
        let conn = self.connection.lock();
        match conn.execute(
            &format!("INSERT INTO timetable ({ENTRY_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
            params![
                entry.course_id,
                entry.day,
                entry.period,
                entry.subject_name,
                entry.teacher_name,
                entry.classroom
            ],
        ) {
            Ok(_) => Ok(entry.clone()),
            Err(err) if has_extended_code(&err, ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
                Err(StoreError::MissingCourse(entry.course_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_timetable_entry(
        &self,
        course_id: i64,
        day: &str,
        period: i32,
        fields: &EntryFields,
    ) -> PersistenceResult<Vec<TimetableEntry>> {
        let conn = self.connection.lock();
        let sql = format!(
            "UPDATE timetable SET subject_name = ?4, teacher_name = ?5, classroom = ?6 \
             WHERE course_id = ?1 AND day = ?2 AND period = ?3 \
             RETURNING {ENTRY_COLUMNS}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![
                course_id,
                day,
                period,
                fields.subject_name,
                fields.teacher_name,
                fields.classroom
            ],
            row_to_entry,
        )?;
        let mut updated = Vec::new();
        for entry in rows {
            updated.push(entry?);
        }
        Ok(updated)
    }

    fn delete_timetable_entry(
        &self,
        course_id: i64,
        day: &str,
        period: i32,
    ) -> PersistenceResult<Vec<TimetableEntry>> {
        let conn = self.connection.lock();
        let sql = format!(
            "DELETE FROM timetable WHERE course_id = ?1 AND day = ?2 AND period = ?3 \
             RETURNING {ENTRY_COLUMNS}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![course_id, day, period], row_to_entry)?;
        let mut deleted = Vec::new();
        for entry in rows {
            deleted.push(entry?);
        }
        Ok(deleted)
    }
}
