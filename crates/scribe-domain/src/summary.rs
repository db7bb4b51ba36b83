//! Structured summary records

use crate::field::SectionField;
use serde::{Deserialize, Serialize};

/// A meeting participant (Participants table row)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Participant {
    /// Person's name
    pub name: String,
    /// Organization they represent
    pub organization: String,
    /// Role in the meeting
    pub role: String,
}

/// One conversation-flow scene
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Scene title, stored as `"<n>. <title>"`
    pub title: String,
    /// Scene narrative
    pub content: String,
}

/// A decision (Decisions Made table row)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Decision {
    /// What was decided
    pub decision: String,
    /// Supporting details
    pub details: String,
    /// Who owns the decision
    #[serde(alias = "owner")]
    pub owners: String,
}

/// A planned action (Actions Planned table row)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionItem {
    /// The action
    pub action: String,
    /// Person or team responsible
    pub responsible: String,
    /// Deadline or timeframe
    pub timeline: String,
    /// Free-form notes
    pub notes: String,
}

/// An unresolved question (Open Questions table row)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenQuestion {
    /// The question
    pub question: String,
    /// Why it came up
    pub context: String,
    /// Who follows up
    pub owner: String,
}

/// A risk and its mitigation (Risks & Mitigations table row)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Risk {
    /// The risk
    pub risk: String,
    /// Impact if it materializes
    pub impact: String,
    /// Planned mitigation
    pub mitigation: String,
    /// Who owns the mitigation
    pub owner: String,
}

/// A notable quote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyQuote {
    /// Quoted text without surrounding quote marks
    pub quote: String,
    /// Speaker and organization
    pub attribution: String,
}

/// A glossary entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Term {
    /// Term or acronym
    pub term: String,
    /// Its definition
    pub definition: String,
}

/// Structured form of an 11-section summary
///
/// `raw_markdown` is the source of truth. The other fields are a lossy,
/// best-effort derivation from it and may be empty even when the Markdown
/// has content. List fields keep insertion order and are never
/// deduplicated.
///
/// Field aliases accept the key names used by earlier record files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryDocument {
    /// Section 1
    pub executive_summary: String,

    /// Section 2
    pub participants: SectionField<Participant>,

    /// Section 3
    #[serde(alias = "detailed_summary")]
    pub conversation_flow: SectionField<Scene>,

    /// Section 4
    #[serde(alias = "decisions_made")]
    pub decisions: SectionField<Decision>,

    /// Section 5
    #[serde(alias = "actions_planned")]
    pub actions: SectionField<ActionItem>,

    /// Section 6
    pub open_questions: SectionField<OpenQuestion>,

    /// Section 7
    #[serde(alias = "risks_mitigations")]
    pub risks: SectionField<Risk>,

    /// Section 8
    pub key_quotes: SectionField<KeyQuote>,

    /// Section 9
    #[serde(alias = "sentiment_analysis")]
    pub sentiment: String,

    /// Section 10
    pub content_gaps: Vec<String>,

    /// Section 11
    pub terminology: SectionField<Term>,

    /// The sanitized Markdown the fields were parsed from
    #[serde(alias = "markdown")]
    pub raw_markdown: String,
}

impl SummaryDocument {
    /// True when neither the Markdown nor any field carries content
    pub fn is_blank(&self) -> bool {
        self.raw_markdown.trim().is_empty()
            && self.executive_summary.trim().is_empty()
            && self.participants.is_empty()
            && self.conversation_flow.is_empty()
            && self.decisions.is_empty()
            && self.actions.is_empty()
            && self.open_questions.is_empty()
            && self.risks.is_empty()
            && self.key_quotes.is_empty()
            && self.sentiment.trim().is_empty()
            && self.content_gaps.is_empty()
            && self.terminology.is_empty()
    }
}
