//! Document assembly
//!
//! Walks a [`SummaryDocument`] into a [`Document`]. The Markdown is
//! preferred because it is the source of truth; the structured fields are
//! only used when there is no Markdown, or to repair a Key Quotes section
//! the Markdown left unusable.

use crate::document::{Block, Document, Header, Table};
use scribe_domain::{
    ActionItem, Decision, KeyQuote, MeetingMetadata, OpenQuestion, Participant, Risk, Scene,
    SectionField, SectionKind, SummaryDocument, Term,
};
use scribe_summarizer::quotes::{match_quotes, raw_quote_lines};
use scribe_summarizer::sections::{
    bullets, is_separator_row, paragraphs, split_scenes, split_sections, table_cells,
    MarkdownSection,
};
use tracing::debug;

/// A Key Quotes section shorter than this is treated as empty
const MIN_QUOTES_SECTION_CHARS: usize = 20;

/// Body for a scene heading with nothing under it
const EMPTY_SCENE: &str = "No details recorded.";

/// Builds documents for one meeting
#[derive(Debug, Clone)]
pub struct Assembler {
    metadata: MeetingMetadata,
}

impl Assembler {
    /// Create an assembler for the meeting described by `metadata`
    pub fn new(metadata: MeetingMetadata) -> Self {
        Self { metadata }
    }

    /// Title block: `"<title> Summary"` and the date/duration line
    pub fn header(&self) -> Header {
        let meta_line = [self.metadata.date.trim(), self.metadata.duration.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" • ");

        Header {
            title: format!("{} Summary", self.metadata.title),
            meta_line: (!meta_line.is_empty()).then_some(meta_line),
        }
    }

    /// Assemble the document
    ///
    /// Every contract section that ends up with no usable content carries
    /// exactly one placeholder paragraph.
    pub fn assemble(&self, summary: &SummaryDocument) -> Document {
        let blocks = if summary.raw_markdown.trim().is_empty() {
            debug!("No Markdown available, assembling from structured fields");
            structured_blocks(summary)
        } else {
            markdown_blocks(summary)
        };

        Document {
            header: self.header(),
            blocks,
        }
    }
}

/// Append a section heading and its content, or its placeholder
///
/// Unrecognized sections with no content are dropped entirely.
fn push_section(blocks: &mut Vec<Block>, title: &str, kind: Option<SectionKind>, content: Vec<Block>) {
    if content.is_empty() {
        if let Some(kind) = kind {
            blocks.push(Block::section(title));
            blocks.push(Block::Paragraph(kind.placeholder().to_string()));
        }
        return;
    }
    blocks.push(Block::section(title));
    blocks.extend(content);
}

fn paragraph_blocks(text: &str) -> Vec<Block> {
    paragraphs(text).into_iter().map(Block::Paragraph).collect()
}

// ---------------------------------------------------------------------------
// Markdown path
// ---------------------------------------------------------------------------

fn markdown_blocks(summary: &SummaryDocument) -> Vec<Block> {
    let sections = split_sections(&summary.raw_markdown);
    if sections.is_empty() {
        debug!("Markdown has no numbered sections, keeping it as paragraphs");
        return paragraph_blocks(&summary.raw_markdown);
    }

    let repair_quotes = !summary.key_quotes.is_empty() && quotes_section_unusable(&sections);
    let mut quotes_written = false;
    let mut blocks = Vec::new();

    for section in &sections {
        let content = match section.kind {
            Some(SectionKind::KeyQuotes) if repair_quotes => {
                debug!("Key Quotes section unusable, using structured quotes");
                quotes_written = true;
                quote_field_blocks(&summary.key_quotes)
            }
            Some(kind) => markdown_section_blocks(kind, &section.body),
            None => paragraph_blocks(&section.body),
        };
        push_section(&mut blocks, &section.title, section.kind, content);
    }

    if repair_quotes && !quotes_written {
        debug!("Markdown has no Key Quotes section, appending structured quotes");
        push_section(
            &mut blocks,
            SectionKind::KeyQuotes.title(),
            Some(SectionKind::KeyQuotes),
            quote_field_blocks(&summary.key_quotes),
        );
    }

    blocks
}

/// True when the Markdown Key Quotes section is missing, near-empty, a
/// "No notable quotes" note, or has no quote markers at all
fn quotes_section_unusable(sections: &[MarkdownSection]) -> bool {
    let Some(section) = sections
        .iter()
        .find(|s| s.kind == Some(SectionKind::KeyQuotes))
    else {
        return true;
    };

    let body = section.body.trim();
    body.chars().count() < MIN_QUOTES_SECTION_CHARS
        || body.contains("No notable quotes")
        || !(body.contains('>') || body.contains('"'))
}

fn markdown_section_blocks(kind: SectionKind, body: &str) -> Vec<Block> {
    match kind {
        SectionKind::Participants
        | SectionKind::Decisions
        | SectionKind::Actions
        | SectionKind::OpenQuestions
        | SectionKind::Risks
        | SectionKind::Terminology => markdown_table(body),
        SectionKind::ConversationFlow => markdown_scenes(body),
        SectionKind::KeyQuotes => markdown_quotes(body),
        SectionKind::ContentGaps => {
            let items = bullets(body);
            if items.is_empty() {
                paragraph_blocks(body)
            } else {
                items.into_iter().map(Block::Bullet).collect()
            }
        }
        SectionKind::ExecutiveSummary | SectionKind::Sentiment => paragraph_blocks(body),
    }
}

/// Convert a pipe table, keeping any prose before or after it
///
/// The column count comes from the header row's pipe count. Separator
/// rows and rows with too few cells are skipped, and dash-only cells are
/// blanked. A table without data rows is not emitted.
fn markdown_table(body: &str) -> Vec<Block> {
    if !body.contains('|') {
        return paragraph_blocks(body);
    }

    let mut before = Vec::new();
    let mut after = Vec::new();
    let mut table_lines = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('|') && after.is_empty() {
            table_lines.push(trimmed);
        } else if table_lines.is_empty() {
            before.push(line);
        } else {
            after.push(line);
        }
    }

    let mut blocks = paragraph_blocks(&before.join("\n"));

    let columns = table_lines
        .first()
        .map(|header| header.matches('|').count().saturating_sub(1))
        .unwrap_or(0);

    if columns > 0 {
        let mut rows = table_lines
            .iter()
            .filter(|line| !is_separator_row(line))
            .filter_map(|line| table_cells(line))
            .filter(|cells| cells.len() >= columns)
            .map(|mut cells| {
                cells.truncate(columns);
                for cell in &mut cells {
                    if cell.chars().all(|c| c == '-') {
                        cell.clear();
                    }
                }
                cells
            });

        if let Some(header) = rows.next() {
            let rows: Vec<_> = rows.collect();
            if rows.is_empty() {
                debug!("Table has a header row only, skipping it");
            } else {
                blocks.push(Block::Table(Table { header, rows }));
            }
        }
    } else {
        blocks.extend(paragraph_blocks(&table_lines.join("\n")));
    }

    blocks.extend(paragraph_blocks(&after.join("\n")));
    blocks
}

fn markdown_scenes(body: &str) -> Vec<Block> {
    let scenes = split_scenes(body);
    if scenes.is_empty() {
        return paragraph_blocks(body);
    }

    let mut blocks = Vec::new();
    for scene in scenes {
        push_scene(&mut blocks, &scene.title, &scene.body);
    }
    blocks
}

/// A scene heading followed by its paragraphs; never a bare heading
fn push_scene(blocks: &mut Vec<Block>, title: &str, body: &str) {
    blocks.push(Block::scene(title.trim()));
    let content = paragraph_blocks(body);
    if content.is_empty() {
        blocks.push(Block::Paragraph(EMPTY_SCENE.to_string()));
    } else {
        blocks.extend(content);
    }
}

/// Quotes via the ordered matchers, else the raw text lines
fn markdown_quotes(body: &str) -> Vec<Block> {
    if let Some((matcher, quotes)) = match_quotes(body) {
        debug!(matcher, count = quotes.len(), "Key quotes matched");
        if !quotes.is_empty() {
            return quotes
                .iter()
                .map(|q| Block::quoted(&q.quote, Some(q.attribution.as_str())))
                .collect();
        }
    }

    raw_quote_lines(body)
        .into_iter()
        .map(|line| Block::Quote {
            text: line,
            attribution: None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Structured path
// ---------------------------------------------------------------------------

fn structured_blocks(summary: &SummaryDocument) -> Vec<Block> {
    let mut blocks = Vec::new();

    for kind in SectionKind::ALL {
        let content = match kind {
            SectionKind::ExecutiveSummary => paragraph_blocks(&summary.executive_summary),
            SectionKind::Participants => table_field(&summary.participants),
            SectionKind::ConversationFlow => flow_field(&summary.conversation_flow),
            SectionKind::Decisions => table_field(&summary.decisions),
            SectionKind::Actions => table_field(&summary.actions),
            SectionKind::OpenQuestions => table_field(&summary.open_questions),
            SectionKind::Risks => table_field(&summary.risks),
            SectionKind::KeyQuotes => quote_field_blocks(&summary.key_quotes),
            SectionKind::Sentiment => paragraph_blocks(&summary.sentiment),
            SectionKind::ContentGaps => summary
                .content_gaps
                .iter()
                .map(|gap| gap.trim())
                .filter(|gap| !gap.is_empty())
                .map(|gap| Block::Bullet(gap.to_string()))
                .collect(),
            SectionKind::Terminology => table_field(&summary.terminology),
        };
        push_section(&mut blocks, kind.title(), Some(kind), content);
    }

    blocks
}

/// A record type shown as one table row
trait TableRow {
    const HEADER: &'static [&'static str];

    fn cells(&self) -> Vec<String>;

    /// Row for a free-text entry: the text in the first column
    fn text_row(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }
}

impl TableRow for Participant {
    const HEADER: &'static [&'static str] = &["Name", "Organization / Title", "Meeting Role"];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.organization.clone(), self.role.clone()]
    }
}

impl TableRow for Decision {
    const HEADER: &'static [&'static str] = &["Decision", "Details", "Owner(s)"];

    fn cells(&self) -> Vec<String> {
        vec![self.decision.clone(), self.details.clone(), self.owners.clone()]
    }
}

impl TableRow for ActionItem {
    const HEADER: &'static [&'static str] = &["Action", "Responsible", "Timeline", "Notes"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.action.clone(),
            self.responsible.clone(),
            self.timeline.clone(),
            self.notes.clone(),
        ]
    }
}

impl TableRow for OpenQuestion {
    const HEADER: &'static [&'static str] = &["Question", "Context", "Owner"];

    fn cells(&self) -> Vec<String> {
        vec![self.question.clone(), self.context.clone(), self.owner.clone()]
    }
}

impl TableRow for Risk {
    const HEADER: &'static [&'static str] = &["Risk", "Impact", "Mitigation", "Owner"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.risk.clone(),
            self.impact.clone(),
            self.mitigation.clone(),
            self.owner.clone(),
        ]
    }
}

impl TableRow for Term {
    const HEADER: &'static [&'static str] = &["Term", "Definition"];

    fn cells(&self) -> Vec<String> {
        vec![self.term.clone(), self.definition.clone()]
    }

    /// `"term: definition"` entries are split at the first colon
    fn text_row(text: &str) -> Vec<String> {
        match text.split_once(':') {
            Some((term, definition)) => vec![term.trim().to_string(), definition.trim().to_string()],
            None => vec![text.to_string()],
        }
    }
}

fn table_field<T: TableRow>(field: &SectionField<T>) -> Vec<Block> {
    let width = T::HEADER.len();
    let rows: Vec<Vec<String>> = match field {
        SectionField::Records(records) => records.iter().map(T::cells).collect(),
        SectionField::PlainStrings(items) => items.iter().map(|item| T::text_row(item.trim())).collect(),
        SectionField::SingleText(text) => return paragraph_blocks(text),
        SectionField::Mapping(map) => map
            .iter()
            .map(|(key, value)| vec![key.clone(), value.clone()])
            .collect(),
    };

    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, String::new());
            row
        })
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    if rows.is_empty() {
        return Vec::new();
    }

    vec![Block::Table(Table {
        header: T::HEADER.iter().map(|h| h.to_string()).collect(),
        rows,
    })]
}

fn flow_field(field: &SectionField<Scene>) -> Vec<Block> {
    let mut blocks = Vec::new();
    match field {
        SectionField::Records(scenes) => {
            for scene in scenes {
                if scene.title.trim().is_empty() {
                    blocks.extend(paragraph_blocks(&scene.content));
                } else {
                    push_scene(&mut blocks, &scene.title, &scene.content);
                }
            }
        }
        SectionField::PlainStrings(items) => {
            for item in items {
                blocks.extend(paragraph_blocks(item));
            }
        }
        SectionField::SingleText(text) => blocks.extend(paragraph_blocks(text)),
        SectionField::Mapping(pairs) => {
            for (title, content) in pairs {
                push_scene(&mut blocks, title, content);
            }
        }
    }
    blocks
}

/// Quote blocks from the structured field; a mapping is read as
/// attribution → quote
fn quote_field_blocks(field: &SectionField<KeyQuote>) -> Vec<Block> {
    match field {
        SectionField::Records(quotes) => quotes
            .iter()
            .filter(|q| !q.quote.trim().is_empty())
            .map(|q| Block::quoted(&q.quote, Some(q.attribution.as_str())))
            .collect(),
        SectionField::PlainStrings(items) => items
            .iter()
            .filter(|item| !item.trim().is_empty())
            .map(|item| Block::quoted(item, None))
            .collect(),
        SectionField::SingleText(text) => paragraph_blocks(text),
        SectionField::Mapping(map) => map
            .iter()
            .filter(|(_, quote)| !quote.trim().is_empty())
            .map(|(attribution, quote)| Block::quoted(quote, Some(attribution.as_str())))
            .collect(),
    }
}
