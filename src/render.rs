//! Plain-text views of courses and timetable entries for terminal output.

use crate::{Course, TimetableEntry};

pub const NO_TIMETABLE: &str = "No timetable to display.";

pub fn format_entry_line(entry: &TimetableEntry) -> String {
    format!(
        "Period {}: {} - {} (Class: {})",
        entry.period, entry.subject_name, entry.teacher_name, entry.classroom
    )
}

/// One line per entry between rules, or [`NO_TIMETABLE`] when empty.
pub fn render_timetable(entries: &[TimetableEntry]) -> String {
    if entries.is_empty() {
        return format!("{NO_TIMETABLE}\n");
    }
    let rule = "-".repeat(50);
    let mut out = String::from("Timetable:\n");
    out.push_str(&rule);
    out.push('\n');
    for entry in entries {
        out.push_str(&format_entry_line(entry));
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

pub fn courses_table(courses: &[Course]) -> String {
    let rows: Vec<Vec<String>> = courses
        .iter()
        .map(|c| vec![c.course_id.to_string(), c.course_name.clone()])
        .collect();
    render_table(&["course_id", "course_name"], &rows)
}

pub fn entries_table(entries: &[TimetableEntry]) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.course_id.to_string(),
                e.day.clone(),
                e.period.to_string(),
                e.subject_name.clone(),
                e.teacher_name.clone(),
                e.classroom.clone(),
            ]
        })
        .collect();
    render_table(
        &[
            "course_id",
            "day",
            "period",
            "subject_name",
            "teacher_name",
            "classroom",
        ],
        &rows,
    )
}

/// Boxed ASCII grid. Rows shorter than the header are padded with blanks.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate().take(widths.len()) {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&grid_line(&widths, headers));
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&grid_line(&widths, &cells));
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn grid_line(widths: &[usize], cells: &[&str]) -> String {
    let mut out = String::from("|");
    for (ci, w) in widths.iter().enumerate() {
        let cell = cells.get(ci).copied().unwrap_or("");
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(w.saturating_sub(cell.chars().count())));
        out.push_str(" |");
    }
    out.push('\n');
    out
}
