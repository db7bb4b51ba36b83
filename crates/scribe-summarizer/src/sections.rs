//! Line-level tokenizing of the section contract
//!
//! Shared by the parser and the document assembler, so both see the same
//! sections, table rows, scenes and bullets for a given Markdown text.

use scribe_domain::SectionKind;

/// One `## <n>. <Title>` section of a summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownSection {
    /// Heading title as written, without the numeral
    pub title: String,
    /// Contract section the title identifies, if any
    pub kind: Option<SectionKind>,
    /// Text between this heading and the next, trimmed
    pub body: String,
}

/// Title of a `## <n>. <Title>` heading line
///
/// `###` headings, unnumbered headings and headings with an empty title
/// are not section headings.
pub fn section_heading(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("##")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = rest[digits..].strip_prefix('.')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let title = rest.trim();
    (!title.is_empty()).then_some(title)
}

/// Split Markdown into its numbered sections, in document order
///
/// Text before the first section heading is ignored.
pub fn split_sections(markdown: &str) -> Vec<MarkdownSection> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in markdown.lines() {
        if let Some(title) = section_heading(line) {
            sections.extend(current.take().map(finish_section));
            current = Some((title.to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    sections.extend(current.map(finish_section));
    sections
}

fn finish_section((title, lines): (String, Vec<&str>)) -> MarkdownSection {
    MarkdownSection {
        kind: SectionKind::from_title(&title),
        body: lines.join("\n").trim().to_string(),
        title,
    }
}

/// Cells of a pipe-table row, trimmed, with the outer pipes removed
///
/// Returns `None` for lines that are not table rows.
pub fn table_cells(line: &str) -> Option<Vec<String>> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|')?;
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    Some(inner.split('|').map(|cell| cell.trim().to_string()).collect())
}

/// True for `|---|:---:|` style separator rows
pub fn is_separator_row(line: &str) -> bool {
    match table_cells(line) {
        Some(cells) => cells.iter().all(|cell| {
            !cell.is_empty()
                && cell.contains('-')
                && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
        }),
        None => false,
    }
}

/// Data rows of a contract table: header and separator rows are skipped,
/// rows with fewer than `columns` cells are dropped, and each row is cut
/// to its first `columns` cells
pub fn table_rows(body: &str, columns: usize, header_keyword: &str) -> Vec<Vec<String>> {
    body.lines()
        .filter(|line| !is_separator_row(line))
        .filter_map(table_cells)
        .filter(|cells| cells.len() >= columns)
        .filter(|cells| cells.first().map(String::as_str) != Some(header_keyword))
        .map(|mut cells| {
            cells.truncate(columns);
            cells
        })
        .collect()
}

/// `(number, title)` of a `### <n> · <title>` scene heading
pub fn scene_heading(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix("###")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let (number, rest) = rest.split_at(digits);
    let title = rest.trim_start().strip_prefix('·')?.trim();
    (!title.is_empty()).then_some((number, title))
}

/// One conversation-flow scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownScene {
    /// Scene number as written
    pub number: String,
    /// Scene title
    pub title: String,
    /// Scene text, trimmed
    pub body: String,
}

/// Scenes of a Conversation Flow section; text before the first scene
/// heading is ignored
pub fn split_scenes(body: &str) -> Vec<MarkdownScene> {
    let mut scenes = Vec::new();
    let mut current: Option<(MarkdownScene, Vec<&str>)> = None;

    let finish = |(mut scene, lines): (MarkdownScene, Vec<&str>)| {
        scene.body = lines.join("\n").trim().to_string();
        scene
    };

    for line in body.lines() {
        if let Some((number, title)) = scene_heading(line) {
            scenes.extend(current.take().map(finish));
            let scene = MarkdownScene {
                number: number.to_string(),
                title: title.to_string(),
                body: String::new(),
            };
            current = Some((scene, Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }

    scenes.extend(current.map(finish));
    scenes
}

/// Top-level `- ` bullets; following non-blank lines continue the current
/// bullet and a blank line ends it
pub fn bullets(body: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current: Option<String> = None;

    for line in body.lines() {
        if let Some(item) = line.strip_prefix("- ") {
            items.extend(current.replace(item.trim().to_string()));
        } else if line.trim().is_empty() {
            items.extend(current.take());
        } else if let Some(item) = current.as_mut() {
            item.push(' ');
            item.push_str(line.trim());
        }
    }

    items.extend(current);
    items.retain(|item| !item.is_empty());
    items
}

/// Blank-line separated paragraphs, trimmed, without separator-only blocks
pub fn paragraphs(body: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in body.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !current.is_empty() {
                let text = current.join("\n").trim().to_string();
                if !is_markup_only(&text) {
                    paragraphs.push(text);
                }
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    paragraphs
}

/// True for text made only of whitespace and `-`, `|` or `:`
pub fn is_markup_only(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || matches!(c, '-' | '|' | ':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Preamble text\n\n## 1. Executive Summary\n\nWe met.\n\n## 2. Participants\n\n| Name | Organization / Title | Meeting Role |\n|------|------|------|\n| Ana | Acme | Lead |\n\n### 3 · Not a section\n## 12. Appendix\nextra";

    #[test]
    fn test_split_sections_in_order() {
        let sections = split_sections(SAMPLE);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, "Executive Summary");
        assert_eq!(sections[0].kind, Some(SectionKind::ExecutiveSummary));
        assert_eq!(sections[0].body, "We met.");
        assert_eq!(sections[1].kind, Some(SectionKind::Participants));
        assert!(sections[1].body.ends_with("### 3 · Not a section"));
        assert_eq!(sections[2].kind, None);
        assert_eq!(sections[2].body, "extra");
    }

    #[test]
    fn test_section_heading_forms() {
        assert_eq!(section_heading("## 4. Decisions Made"), Some("Decisions Made"));
        assert_eq!(section_heading("  ##   10.  Content Gaps  "), Some("Content Gaps"));
        assert_eq!(section_heading("### 4. Decisions Made"), None);
        assert_eq!(section_heading("## Decisions Made"), None);
        assert_eq!(section_heading("##4. Decisions"), None);
        assert_eq!(section_heading("## 4 Decisions"), None);
        assert_eq!(section_heading("## 4."), None);
    }

    #[test]
    fn test_table_rows_skip_header_and_separator() {
        let body = "| Name | Org | Role |\n|:---|---|---:|\n|  Ana  | Acme | Lead |\n| Ben | Initech |\n| Cy | Globex | Guest | extra |";
        let rows = table_rows(body, 3, "Name");
        assert_eq!(
            rows,
            vec![
                vec!["Ana".to_string(), "Acme".to_string(), "Lead".to_string()],
                vec!["Cy".to_string(), "Globex".to_string(), "Guest".to_string()],
            ]
        );
    }

    #[test]
    fn test_separator_row_detection() {
        assert!(is_separator_row("|---|---|"));
        assert!(is_separator_row(" | :--- | ---: | "));
        assert!(!is_separator_row("| | |"));
        assert!(!is_separator_row("| a | --- |"));
        assert!(!is_separator_row("---"));
    }

    #[test]
    fn test_split_scenes() {
        let body = "intro\n### 1 · Opening Remarks\nAna welcomed everyone.\n\nShe set goals.\n### 2 · Budget\nNumbers.\n### x · Bad";
        let scenes = split_scenes(body);
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].number, "1");
        assert_eq!(scenes[0].title, "Opening Remarks");
        assert_eq!(scenes[0].body, "Ana welcomed everyone.\n\nShe set goals.");
        assert_eq!(scenes[1].body, "Numbers.\n### x · Bad");
    }

    #[test]
    fn test_bullets_with_continuations() {
        let body = "Intro line\n- First gap\n  continued here\n- Second gap\n\nstray text\n- Third";
        assert_eq!(
            bullets(body),
            vec![
                "First gap continued here".to_string(),
                "Second gap".to_string(),
                "Third".to_string(),
            ]
        );
    }

    #[test]
    fn test_paragraphs_skip_markup() {
        let body = "First para\nstill first\n\n---\n\n| - |\n\nSecond";
        assert_eq!(
            paragraphs(body),
            vec!["First para\nstill first".to_string(), "Second".to_string()]
        );
    }
}
