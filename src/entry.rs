use chrono::{Datelike, Local, Weekday};
use serde::{Deserialize, Serialize};

/// Days offered by the viewers. Stored days are not checked against this list.
pub const WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full name of the current local weekday.
pub fn today() -> &'static str {
    weekday_name(Local::now().weekday())
}

/// One scheduled class slot, identified by `(course_id, day, period)`.
///
/// The store does not enforce uniqueness of that tuple, so two entries may
/// share a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub course_id: i64,
    pub day: String,
    pub period: i32,
    pub subject_name: String,
    pub teacher_name: String,
    pub classroom: String,
}

impl TimetableEntry {
    pub fn new(
        course_id: i64,
        day: impl Into<String>,
        period: i32,
        subject_name: impl Into<String>,
        teacher_name: impl Into<String>,
        classroom: impl Into<String>,
    ) -> Self {
        Self {
            course_id,
            day: day.into(),
            period,
            subject_name: subject_name.into(),
            teacher_name: teacher_name.into(),
            classroom: classroom.into(),
        }
    }

    pub fn matches_slot(&self, course_id: i64, day: &str, period: i32) -> bool {
        self.course_id == course_id && self.day == day && self.period == period
    }

    pub fn fields(&self) -> EntryFields {
        EntryFields {
            subject_name: self.subject_name.clone(),
            teacher_name: self.teacher_name.clone(),
            classroom: self.classroom.clone(),
        }
    }

    pub(crate) fn apply(&mut self, fields: &EntryFields) {
        self.subject_name = fields.subject_name.clone();
        self.teacher_name = fields.teacher_name.clone();
        self.classroom = fields.classroom.clone();
    }
}

/// The columns an update rewrites. The slot itself never moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    pub subject_name: String,
    pub teacher_name: String,
    pub classroom: String,
}

impl EntryFields {
    pub fn new(
        subject_name: impl Into<String>,
        teacher_name: impl Into<String>,
        classroom: impl Into<String>,
    ) -> Self {
        Self {
            subject_name: subject_name.into(),
            teacher_name: teacher_name.into(),
            classroom: classroom.into(),
        }
    }
}

/// Row filter for timetable reads. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetableFilter {
    pub course_id: Option<i64>,
    pub day: Option<String>,
}

impl TimetableFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn course_day(course_id: i64, day: impl Into<String>) -> Self {
        Self {
            course_id: Some(course_id),
            day: Some(day.into()),
        }
    }

    pub fn matches(&self, entry: &TimetableEntry) -> bool {
        self.course_id.is_none_or(|id| id == entry.course_id)
            && self.day.as_deref().is_none_or(|day| day == entry.day)
    }
}
