//! Saved summary records

use crate::error::SummarizerError;
use scribe_domain::{MeetingMetadata, SummaryDocument, SummaryId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Everything produced by one summarization request
///
/// Written to disk as JSON so later commands can view or export the
/// summary without another generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Record identifier
    pub id: SummaryId,

    /// Meeting metadata supplied with the transcript
    #[serde(default)]
    pub metadata: MeetingMetadata,

    /// Persona used for generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,

    /// Meeting context supplied with the transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// The summary
    pub document: SummaryDocument,

    /// Unix timestamp (seconds)
    #[serde(default)]
    pub created_at: u64,
}

impl SummaryRecord {
    /// Create a record stamped with a fresh id and the current time
    pub fn new(metadata: MeetingMetadata, document: SummaryDocument) -> Self {
        Self {
            id: SummaryId::new(),
            metadata,
            persona: None,
            context: None,
            document,
            created_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        }
    }

    /// Attach the persona and context used for generation
    pub fn with_prompts(mut self, persona: Option<String>, context: Option<String>) -> Self {
        self.persona = persona;
        self.context = context;
        self
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SummarizerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, SummarizerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the record to `path` as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SummarizerError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a record written by [`SummaryRecord::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SummarizerError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::{KeyQuote, SectionField};

    fn sample() -> SummaryRecord {
        let mut document = SummaryDocument {
            executive_summary: "Short.".to_string(),
            raw_markdown: "## 1. Executive Summary\nShort.".to_string(),
            ..SummaryDocument::default()
        };
        document.key_quotes.push(KeyQuote {
            quote: "Yes.".to_string(),
            attribution: "Ana".to_string(),
        });
        SummaryRecord::new(MeetingMetadata::new("Sync").with_date("2024-02-02"), document)
            .with_prompts(Some("a coach".to_string()), None)
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");

        let record = sample();
        record.save(&path).unwrap();
        let loaded = SummaryRecord::load(&path).unwrap();

        assert_eq!(loaded, record);
        assert!(loaded.created_at > 0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SummaryRecord::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(SummarizerError::Io(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        assert!(matches!(
            SummaryRecord::from_json("{not json"),
            Err(SummarizerError::Json(_))
        ));
    }

    #[test]
    fn test_foreign_record_shapes() {
        let json = r#"{
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "document": {
                "participants": ["Ana (Acme)"],
                "key_quotes": "Nothing quotable",
                "markdown": ""
            }
        }"#;
        let record = SummaryRecord::from_json(json).unwrap();
        assert_eq!(record.metadata, MeetingMetadata::default());
        assert!(matches!(record.document.participants, SectionField::PlainStrings(_)));
        assert!(matches!(record.document.key_quotes, SectionField::SingleText(_)));
    }
}
