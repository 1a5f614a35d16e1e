use course_timetable::{
    Course, TimetableEntry, export_timetable_to_csv, export_timetable_to_json,
    persistence::file::{TimetableExportRow, export_rows},
};
use tempfile::NamedTempFile;

fn sample() -> (Vec<Course>, Vec<TimetableEntry>) {
    let courses = vec![Course::new(1, "CS101"), Course::new(2, "MATH200")];
    let entries = vec![
        TimetableEntry::new(2, "Tuesday", 3, "Calculus", "Dr. B", "Hall 1"),
        TimetableEntry::new(1, "Monday", 1, "Algorithms", "Dr. A", "Room 5"),
    ];
    (courses, entries)
}

#[test]
fn export_rows_resolve_course_names() {
    let (courses, entries) = sample();
    let rows = export_rows(&courses, &entries);
    assert_eq!(rows[0].course_name, "MATH200");
    assert_eq!(rows[1].course_name, "CS101");
}

#[test]
fn export_rows_leave_unknown_course_name_blank() {
    let entries = vec![TimetableEntry::new(5, "Monday", 1, "S", "T", "R")];
    let rows = export_rows(&[], &entries);
    assert_eq!(rows[0].course_name, "");
    assert_eq!(rows[0].course_id, 5);
}

#[test]
fn csv_export_writes_header_and_rows() {
    let (courses, entries) = sample();
    let file = NamedTempFile::new().unwrap();
    let written = export_timetable_to_csv(&courses, &entries, file.path()).unwrap();
    assert_eq!(written, 2);

    let mut reader = csv::Reader::from_path(file.path()).unwrap();
    let rows: Vec<TimetableExportRow> = reader.deserialize().map(Result::unwrap).collect();
    assert_eq!(rows, export_rows(&courses, &entries));
}

#[test]
fn json_export_is_an_array_of_rows() {
    let (courses, entries) = sample();
    let file = NamedTempFile::new().unwrap();
    export_timetable_to_json(&courses, &entries, file.path()).unwrap();

    let raw = std::fs::read_to_string(file.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["course_name"], "CS101");
    assert_eq!(value[1]["classroom"], "Room 5");
}
