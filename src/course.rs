use serde::{Deserialize, Serialize};

/// A named academic offering. `course_name` is the lookup key clients use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
}

impl Course {
    pub fn new(course_id: i64, course_name: impl Into<String>) -> Self {
        Self {
            course_id,
            course_name: course_name.into(),
        }
    }
}
