//! Word (.docx) export
//!
//! Writes a minimal WordprocessingML package: content types, package and
//! document relationships, the document body, styles and bullet
//! numbering. Formatting lives in named styles (Normal, Heading1,
//! Heading2, Quote, ListBullet, TableGrid) so the output stays editable in
//! Word; only the title block uses direct formatting.

use crate::document::{Block, Document, Table};
use crate::error::RenderError;
use crate::html::escape_text;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use tracing::debug;
use zip::write::FileOptions;
use zip::ZipWriter;

/// Usable page width in twentieths of a point (8.5in page, 1in margins)
const TEXT_WIDTH_TWIPS: usize = 9360;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#;

// Sizes are in half-points: 22 = 11pt, 32 = 16pt, 28 = 14pt.
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:docDefaults>
<w:rPrDefault><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman" w:cs="Times New Roman" w:eastAsia="Times New Roman"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault>
<w:pPrDefault><w:pPr><w:spacing w:after="120"/></w:pPr></w:pPrDefault>
</w:docDefaults>
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:bCs/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="200" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:bCs/><w:sz w:val="28"/><w:szCs w:val="28"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Quote"><w:name w:val="Quote"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:before="120" w:after="120"/><w:ind w:left="720"/></w:pPr><w:rPr><w:i/><w:iCs/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:numPr><w:numId w:val="1"/></w:numPr><w:spacing w:after="60"/></w:pPr></w:style>
<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:left w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:right w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="000000"/></w:tblBorders><w:tblCellMar><w:left w:w="108" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>
</w:styles>"#;

const NUMBERING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>
<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#;

/// Title run: bold, underlined, 16pt, dark blue
const TITLE_RUN: &str = r#"<w:b/><w:u w:val="single"/><w:color w:val="003366"/><w:sz w:val="32"/><w:szCs w:val="32"/>"#;

/// Writes documents as .docx packages
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxWriter;

impl DocxWriter {
    /// Create a writer
    pub fn new() -> Self {
        Self
    }

    /// Write the package for `document` into `writer`
    pub fn write<W: Write + Seek>(&self, document: &Document, writer: W) -> Result<(), RenderError> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", PACKAGE_RELS.to_string()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
            ("word/styles.xml", STYLES.to_string()),
            ("word/numbering.xml", NUMBERING.to_string()),
            ("word/document.xml", document_xml(document)),
        ];

        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
        }

        zip.finish()?;
        debug!(blocks = document.blocks.len(), "DOCX package written");
        Ok(())
    }

    /// Write the package to an in-memory buffer
    pub fn to_bytes(&self, document: &Document) -> Result<Vec<u8>, RenderError> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        self.write(document, &mut buffer)?;
        Ok(buffer.into_inner())
    }

    /// Write the package to a file at `path`, replacing any existing file
    pub fn write_to_path(&self, document: &Document, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let file = File::create(path.as_ref())?;
        self.write(document, file)
    }
}

/// Download name for a meeting's export: spaces become underscores
///
/// Path separators are replaced too, so the name is always a single
/// path component.
pub fn export_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    format!("{}_Summary.docx", stem)
}

/// XML-escape `text`, dropping characters XML 1.0 cannot carry
fn xml_text(text: &str) -> String {
    let allowed: String = text
        .chars()
        .filter(|&c| !c.is_control() || matches!(c, '\t' | '\n'))
        .collect();
    escape_text(&allowed)
}

/// One run; line breaks inside `text` become `<w:br/>`
fn run(out: &mut String, text: &str, properties: &str) {
    out.push_str("<w:r>");
    if !properties.is_empty() {
        let _ = write!(out, "<w:rPr>{}</w:rPr>", properties);
    }
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push_str("<w:br/>");
        }
        let _ = write!(out, r#"<w:t xml:space="preserve">{}</w:t>"#, xml_text(line));
    }
    out.push_str("</w:r>");
}

fn paragraph(out: &mut String, style: Option<&str>, text: &str) {
    out.push_str("<w:p>");
    if let Some(style) = style {
        let _ = write!(out, r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, style);
    }
    if !text.is_empty() {
        run(out, text, "");
    }
    out.push_str("</w:p>");
}

fn table(out: &mut String, table: &Table) {
    let columns = table.header.len().max(1);
    let width = TEXT_WIDTH_TWIPS / columns;

    out.push_str(r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="0" w:type="auto"/></w:tblPr><w:tblGrid>"#);
    for _ in 0..columns {
        let _ = write!(out, r#"<w:gridCol w:w="{}"/>"#, width);
    }
    out.push_str("</w:tblGrid>");

    table_row(out, &table.header, width, true);
    for row in &table.rows {
        table_row(out, row, width, false);
    }
    out.push_str("</w:tbl>");
}

fn table_row(out: &mut String, cells: &[String], width: usize, header: bool) {
    out.push_str("<w:tr>");
    if header {
        out.push_str("<w:trPr><w:tblHeader/></w:trPr>");
    }
    for cell in cells {
        let _ = write!(out, r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/></w:tcPr><w:p>"#, width);
        if !cell.is_empty() {
            run(out, cell, if header { "<w:b/>" } else { "" });
        }
        out.push_str("</w:p></w:tc>");
    }
    out.push_str("</w:tr>");
}

fn document_xml(document: &Document) -> String {
    let mut out = String::from(DOCUMENT_OPEN);

    // Centred title, italic metadata line, then a blank line
    out.push_str(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>"#);
    run(&mut out, &document.header.title, TITLE_RUN);
    out.push_str("</w:p>");
    if let Some(meta) = &document.header.meta_line {
        out.push_str(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>"#);
        run(&mut out, meta, "<w:i/>");
        out.push_str("</w:p>");
    }
    paragraph(&mut out, None, "");

    for block in &document.blocks {
        match block {
            Block::Heading { level, text } => {
                let style = if *level <= 1 { "Heading1" } else { "Heading2" };
                paragraph(&mut out, Some(style), text);
            }
            Block::Paragraph(text) => paragraph(&mut out, None, text),
            Block::Quote { text, attribution } => {
                out.push_str(r#"<w:p><w:pPr><w:pStyle w:val="Quote"/></w:pPr>"#);
                run(&mut out, text, "");
                if let Some(attribution) = attribution {
                    run(&mut out, &format!(" — {}", attribution), "");
                }
                out.push_str("</w:p>");
            }
            Block::Table(t) => table(&mut out, t),
            Block::Bullet(text) => paragraph(&mut out, Some("ListBullet"), text),
        }
    }

    // A body must not end with a table
    if matches!(document.blocks.last(), Some(Block::Table(_))) {
        paragraph(&mut out, None, "");
    }

    out.push_str(SECTION_PROPERTIES);
    out.push_str("</w:body></w:document>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Header;
    use std::io::Read;
    use zip::ZipArchive;

    fn sample() -> Document {
        Document {
            header: Header {
                title: "Launch Review Summary".to_string(),
                meta_line: Some("2024-05-01 • 1 hour".to_string()),
            },
            blocks: vec![
                Block::section("Participants"),
                Block::Table(Table {
                    header: vec!["Name".to_string(), "Role".to_string()],
                    rows: vec![vec!["Ana & Co".to_string(), String::new()]],
                }),
                Block::section("Key Quotes"),
                Block::quoted("Ship <it>", Some("Ana")),
                Block::section("Content Gaps"),
                Block::Bullet("Training".to_string()),
                Block::Paragraph("Line one\nLine two".to_string()),
            ],
        }
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_parts() {
        let bytes = DocxWriter::new().to_bytes(&sample()).unwrap();
        let archive = ZipArchive::new(std::io::Cursor::new(bytes.as_slice())).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/numbering.xml",
                "word/styles.xml",
            ]
        );
    }

    #[test]
    fn test_document_body() {
        let bytes = DocxWriter::new().to_bytes(&sample()).unwrap();
        let body = read_part(&bytes, "word/document.xml");

        assert!(body.contains(r#"<w:jc w:val="center"/>"#));
        assert!(body.contains(r#"<w:color w:val="003366"/>"#));
        assert!(body.contains("Launch Review Summary"));
        assert!(body.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(body.contains(r#"<w:tblStyle w:val="TableGrid"/>"#));
        assert!(body.contains("<w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">Name</w:t>"));
        assert!(body.contains("Ana &amp; Co"));
        assert!(body.contains(r#"<w:pStyle w:val="Quote"/>"#));
        assert!(body.contains("\"Ship &lt;it&gt;\""));
        assert!(body.contains(" — Ana"));
        assert!(body.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
        assert!(body.contains("Line one</w:t><w:br/><w:t xml:space=\"preserve\">Line two"));
        assert!(body.ends_with("</w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_styles_part() {
        let bytes = DocxWriter::new().to_bytes(&sample()).unwrap();
        let styles = read_part(&bytes, "word/styles.xml");
        assert!(styles.contains("Times New Roman"));
        assert!(styles.contains(r#"w:styleId="Quote""#));
        assert!(styles.contains(r#"<w:name w:val="Table Grid"/>"#));
    }

    #[test]
    fn test_trailing_table_gets_paragraph() {
        let doc = Document {
            header: Header {
                title: "T".to_string(),
                meta_line: None,
            },
            blocks: vec![Block::Table(Table {
                header: vec!["Term".to_string()],
                rows: vec![vec!["SLA".to_string()]],
            })],
        };
        let xml = document_xml(&doc);
        assert!(xml.contains("</w:tbl><w:p></w:p><w:sectPr>"));
    }

    #[test]
    fn test_control_characters_dropped() {
        assert_eq!(xml_text("a\u{0007}b<"), "ab&lt;");
    }

    #[test]
    fn test_write_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(export_file_name("Launch Review"));
        DocxWriter::new().write_to_path(&sample(), &path).unwrap();
        assert!(path.ends_with("Launch_Review_Summary.docx"));
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Weekly Team Sync"), "Weekly_Team_Sync_Summary.docx");
        assert_eq!(export_file_name("Q1/Q2 Plan"), "Q1_Q2_Plan_Summary.docx");
    }
}
