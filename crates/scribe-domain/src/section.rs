//! The fixed 11-section contract

use serde::{Deserialize, Serialize};
use std::fmt;

/// One section of the summary contract, in contract order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// 1. Executive Summary
    ExecutiveSummary,
    /// 2. Participants
    Participants,
    /// 3. Conversation Flow Summary
    ConversationFlow,
    /// 4. Decisions Made
    Decisions,
    /// 5. Actions Planned
    Actions,
    /// 6. Open Questions
    OpenQuestions,
    /// 7. Risks & Mitigations
    Risks,
    /// 8. Key Quotes
    KeyQuotes,
    /// 9. Sentiment Analysis
    Sentiment,
    /// 10. Content Gaps
    ContentGaps,
    /// 11. Technical Terminology & Acronyms
    Terminology,
}

impl SectionKind {
    /// All sections in contract order
    pub const ALL: [SectionKind; 11] = [
        SectionKind::ExecutiveSummary,
        SectionKind::Participants,
        SectionKind::ConversationFlow,
        SectionKind::Decisions,
        SectionKind::Actions,
        SectionKind::OpenQuestions,
        SectionKind::Risks,
        SectionKind::KeyQuotes,
        SectionKind::Sentiment,
        SectionKind::ContentGaps,
        SectionKind::Terminology,
    ];

    /// 1-based position in the contract
    pub fn number(self) -> usize {
        match self {
            SectionKind::ExecutiveSummary => 1,
            SectionKind::Participants => 2,
            SectionKind::ConversationFlow => 3,
            SectionKind::Decisions => 4,
            SectionKind::Actions => 5,
            SectionKind::OpenQuestions => 6,
            SectionKind::Risks => 7,
            SectionKind::KeyQuotes => 8,
            SectionKind::Sentiment => 9,
            SectionKind::ContentGaps => 10,
            SectionKind::Terminology => 11,
        }
    }

    /// Canonical heading title
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::ExecutiveSummary => "Executive Summary",
            SectionKind::Participants => "Participants",
            SectionKind::ConversationFlow => "Conversation Flow Summary",
            SectionKind::Decisions => "Decisions Made",
            SectionKind::Actions => "Actions Planned",
            SectionKind::OpenQuestions => "Open Questions",
            SectionKind::Risks => "Risks & Mitigations",
            SectionKind::KeyQuotes => "Key Quotes",
            SectionKind::Sentiment => "Sentiment Analysis",
            SectionKind::ContentGaps => "Content Gaps",
            SectionKind::Terminology => "Technical Terminology & Acronyms",
        }
    }

    /// Canonical Markdown heading, e.g. `## 4. Decisions Made`
    pub fn heading(self) -> String {
        format!("## {}. {}", self.number(), self.title())
    }

    /// Identify a section from a heading title
    ///
    /// Matching is a case-sensitive substring test on keywords, so
    /// `"Decisions Made (summary)"` still maps to [`SectionKind::Decisions`].
    /// The heading numeral is never consulted.
    ///
    /// # Examples
    ///
    /// ```
    /// use scribe_domain::SectionKind;
    ///
    /// assert_eq!(SectionKind::from_title("Key Quotes"), Some(SectionKind::KeyQuotes));
    /// assert_eq!(SectionKind::from_title("Acronyms"), Some(SectionKind::Terminology));
    /// assert_eq!(SectionKind::from_title("key quotes"), None);
    /// ```
    pub fn from_title(title: &str) -> Option<SectionKind> {
        const KEYWORDS: [(&str, SectionKind); 12] = [
            ("Executive Summary", SectionKind::ExecutiveSummary),
            ("Participants", SectionKind::Participants),
            ("Conversation Flow", SectionKind::ConversationFlow),
            ("Decisions", SectionKind::Decisions),
            ("Actions", SectionKind::Actions),
            ("Open Questions", SectionKind::OpenQuestions),
            ("Risks", SectionKind::Risks),
            ("Key Quotes", SectionKind::KeyQuotes),
            ("Sentiment", SectionKind::Sentiment),
            ("Content Gaps", SectionKind::ContentGaps),
            ("Technical Terminology", SectionKind::Terminology),
            ("Acronyms", SectionKind::Terminology),
        ];

        KEYWORDS
            .iter()
            .find(|(keyword, _)| title.contains(keyword))
            .map(|(_, kind)| *kind)
    }

    /// Column count for sections rendered as pipe tables
    pub fn table_columns(self) -> Option<usize> {
        match self {
            SectionKind::Participants => Some(3),
            SectionKind::Decisions => Some(4),
            SectionKind::Actions => Some(4),
            SectionKind::OpenQuestions => Some(3),
            SectionKind::Risks => Some(4),
            SectionKind::Terminology => Some(2),
            _ => None,
        }
    }

    /// First-cell text identifying the header row of this section's table
    pub fn header_keyword(self) -> Option<&'static str> {
        match self {
            SectionKind::Participants => Some("Name"),
            SectionKind::Decisions => Some("#"),
            SectionKind::Actions => Some("Action"),
            SectionKind::OpenQuestions => Some("Question"),
            SectionKind::Risks => Some("Risk"),
            SectionKind::Terminology => Some("Term"),
            _ => None,
        }
    }

    /// Paragraph emitted when the section has no usable content
    pub fn placeholder(self) -> &'static str {
        match self {
            SectionKind::ExecutiveSummary => "No executive summary available.",
            SectionKind::Participants => "No participant information available.",
            SectionKind::ConversationFlow => "No detailed summary available.",
            SectionKind::Decisions => "No decisions recorded.",
            SectionKind::Actions => "No actions recorded.",
            SectionKind::OpenQuestions => "No open questions recorded.",
            SectionKind::Risks => "No risks recorded.",
            SectionKind::KeyQuotes => "No notable quotes recorded.",
            SectionKind::Sentiment => "No sentiment analysis available.",
            SectionKind::ContentGaps => "No content gaps identified.",
            SectionKind::Terminology => "No technical terminology recorded.",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
