use super::PersistenceResult;
use crate::{Course, TimetableEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Flat export row: the entry with its course name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableExportRow {
    pub course_id: i64,
    pub course_name: String,
    pub day: String,
    pub period: i32,
    pub subject_name: String,
    pub teacher_name: String,
    pub classroom: String,
}

pub fn export_rows(courses: &[Course], entries: &[TimetableEntry]) -> Vec<TimetableExportRow> {
    let names: HashMap<i64, &str> = courses
        .iter()
        .map(|c| (c.course_id, c.course_name.as_str()))
        .collect();
    entries
        .iter()
        .map(|entry| TimetableExportRow {
            course_id: entry.course_id,
            course_name: names
                .get(&entry.course_id)
                .map(|name| name.to_string())
                .unwrap_or_default(),
            day: entry.day.clone(),
            period: entry.period,
            subject_name: entry.subject_name.clone(),
            teacher_name: entry.teacher_name.clone(),
            classroom: entry.classroom.clone(),
        })
        .collect()
}

pub fn export_timetable_to_csv<P: AsRef<Path>>(
    courses: &[Course],
    entries: &[TimetableEntry],
    path: P,
) -> PersistenceResult<usize> {
    let rows = export_rows(courses, entries);
    let mut writer = csv::Writer::from_path(path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

pub fn export_timetable_to_json<P: AsRef<Path>>(
    courses: &[Course],
    entries: &[TimetableEntry],
    path: P,
) -> PersistenceResult<usize> {
    let rows = export_rows(courses, entries);
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &rows)?;
    Ok(rows.len())
}
