//! Standalone HTML view of a document

use crate::document::{Block, Document, Table};
use std::fmt::Write;

const STYLE: &str = "body{font-family:'Times New Roman',serif;font-size:11pt;max-width:60em;margin:2em auto;}\
header{text-align:center;margin-bottom:2em;}\
header h1{color:#003366;text-decoration:underline;font-size:16pt;}\
header p{font-style:italic;}\
h2{font-size:16pt;}h3{font-size:14pt;}\
table{border-collapse:collapse;margin:1em 0;}\
th,td{border:1px solid #000;padding:4px 8px;text-align:left;vertical-align:top;}\
th{font-weight:bold;}\
blockquote{font-style:italic;margin:6pt 0 6pt 0.5in;}";

/// Render `document` as a complete HTML page
///
/// Every piece of text is escaped; nothing from the summary is emitted as
/// markup.
pub fn render_html(document: &Document) -> String {
    let mut out = String::new();
    let title = escape_text(&document.header.title);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", title);
    let _ = writeln!(out, "<style>{}</style>", STYLE);
    out.push_str("</head>\n<body>\n<header>\n");
    let _ = writeln!(out, "<h1>{}</h1>", title);
    if let Some(meta) = &document.header.meta_line {
        let _ = writeln!(out, "<p>{}</p>", escape_text(meta));
    }
    out.push_str("</header>\n<main>\n");

    let mut in_list = false;
    for block in &document.blocks {
        let is_bullet = matches!(block, Block::Bullet(_));
        if in_list && !is_bullet {
            out.push_str("</ul>\n");
        } else if !in_list && is_bullet {
            out.push_str("<ul>\n");
        }
        in_list = is_bullet;

        write_block(&mut out, block);
    }
    if in_list {
        out.push_str("</ul>\n");
    }

    out.push_str("</main>\n</body>\n</html>\n");
    out
}

/// Escape text for element content; also valid for XML text nodes
pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        // h1 is the document title
        Block::Heading { level, text } => {
            let tag = if *level <= 1 { "h2" } else { "h3" };
            let _ = writeln!(out, "<{tag}>{}</{tag}>", escape_text(text));
        }
        Block::Paragraph(text) => {
            let _ = writeln!(out, "<p>{}</p>", escape_text(text));
        }
        Block::Quote { text, attribution } => {
            out.push_str("<blockquote>");
            out.push_str(&escape_text(text));
            if let Some(attribution) = attribution {
                let _ = write!(out, " — {}", escape_text(attribution));
            }
            out.push_str("</blockquote>\n");
        }
        Block::Table(table) => write_table(out, table),
        Block::Bullet(text) => {
            let _ = writeln!(out, "<li>{}</li>", escape_text(text));
        }
    }
}

fn write_table(out: &mut String, table: &Table) {
    out.push_str("<table>\n<thead><tr>");
    for cell in &table.header {
        let _ = write!(out, "<th>{}</th>", escape_text(cell));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape_text(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}
