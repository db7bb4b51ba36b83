//! Meeting metadata supplied alongside a transcript

use serde::{Deserialize, Serialize};

/// Title used when the caller does not name the meeting
pub const DEFAULT_TITLE: &str = "Meeting Summary";

/// Descriptive metadata for one meeting
///
/// All fields are free text exactly as the user typed them. Empty
/// `date`/`duration` mean "not supplied".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingMetadata {
    /// Meeting title
    pub title: String,

    /// Meeting date, any human format
    pub date: String,

    /// Meeting duration, any human format
    pub duration: String,
}

impl MeetingMetadata {
    /// Create metadata with a title and no date or duration
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            title: if title.trim().is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title
            },
            date: String::new(),
            duration: String::new(),
        }
    }

    /// Set the meeting date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set the meeting duration
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    /// Date as shown in prompts
    pub fn date_or_unknown(&self) -> &str {
        if self.date.trim().is_empty() {
            "unknown date"
        } else {
            &self.date
        }
    }

    /// Duration as shown in prompts
    pub fn duration_or_unknown(&self) -> &str {
        if self.duration.trim().is_empty() {
            "unknown duration"
        } else {
            &self.duration
        }
    }
}

impl Default for MeetingMetadata {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}
