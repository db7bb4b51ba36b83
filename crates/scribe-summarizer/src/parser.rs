//! Parse a contract-shaped Markdown summary into a `SummaryDocument`

use crate::quotes::parse_quotes;
use crate::sections::{bullets, split_scenes, split_sections, table_rows};
use scribe_domain::{
    ActionItem, Decision, OpenQuestion, Participant, Risk, Scene, SectionKind, SummaryDocument,
    Term,
};
use tracing::debug;

/// Parse Markdown into structured fields
///
/// Sections are identified by title keywords, not numerals, and any
/// section that does not match its expected shape leaves its field empty.
/// `raw_markdown` is left empty for the caller to fill.
pub fn parse(markdown: &str) -> SummaryDocument {
    let mut doc = SummaryDocument::default();

    for section in split_sections(markdown) {
        let Some(kind) = section.kind else {
            debug!(title = %section.title, "Skipping unrecognized section");
            continue;
        };
        let body = section.body.as_str();

        match kind {
            SectionKind::ExecutiveSummary => doc.executive_summary = body.to_string(),
            SectionKind::Participants => {
                for cells in rows(body, kind) {
                    doc.participants.push(Participant {
                        name: cells[0].clone(),
                        organization: cells[1].clone(),
                        role: cells[2].clone(),
                    });
                }
            }
            SectionKind::ConversationFlow => {
                for scene in split_scenes(body) {
                    doc.conversation_flow.push(Scene {
                        title: format!("{}. {}", scene.number, scene.title),
                        content: scene.body,
                    });
                }
            }
            SectionKind::Decisions => {
                // First column is the row number
                for cells in rows(body, kind) {
                    doc.decisions.push(Decision {
                        decision: cells[1].clone(),
                        details: cells[2].clone(),
                        owners: cells[3].clone(),
                    });
                }
            }
            SectionKind::Actions => {
                for cells in rows(body, kind) {
                    doc.actions.push(ActionItem {
                        action: cells[0].clone(),
                        responsible: cells[1].clone(),
                        timeline: cells[2].clone(),
                        notes: cells[3].clone(),
                    });
                }
            }
            SectionKind::OpenQuestions => {
                for cells in rows(body, kind) {
                    doc.open_questions.push(OpenQuestion {
                        question: cells[0].clone(),
                        context: cells[1].clone(),
                        owner: cells[2].clone(),
                    });
                }
            }
            SectionKind::Risks => {
                for cells in rows(body, kind) {
                    doc.risks.push(Risk {
                        risk: cells[0].clone(),
                        impact: cells[1].clone(),
                        mitigation: cells[2].clone(),
                        owner: cells[3].clone(),
                    });
                }
            }
            SectionKind::KeyQuotes => {
                for quote in parse_quotes(body) {
                    doc.key_quotes.push(quote);
                }
            }
            SectionKind::Sentiment => doc.sentiment = body.to_string(),
            SectionKind::ContentGaps => doc.content_gaps.extend(bullets(body)),
            SectionKind::Terminology => {
                for cells in rows(body, kind) {
                    doc.terminology.push(Term {
                        term: cells[0].clone(),
                        definition: cells[1].clone(),
                    });
                }
            }
        }
    }

    debug!(
        participants = doc.participants.len(),
        scenes = doc.conversation_flow.len(),
        decisions = doc.decisions.len(),
        actions = doc.actions.len(),
        quotes = doc.key_quotes.len(),
        "Parsed summary sections"
    );

    doc
}

fn rows(body: &str, kind: SectionKind) -> Vec<Vec<String>> {
    match (kind.table_columns(), kind.header_keyword()) {
        (Some(columns), Some(header)) => table_rows(body, columns, header),
        _ => Vec::new(),
    }
}
