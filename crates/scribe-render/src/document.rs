//! Logical structure of a rendered summary
//!
//! The assembler produces a [`Document`]; the HTML and DOCX renderers only
//! walk it, so both outputs always agree on content.

use serde::Serialize;

/// Centred title block at the top of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// `"<meeting title> Summary"`
    pub title: String,
    /// `"<date> • <duration>"`, or whichever of the two is known
    pub meta_line: Option<String>,
}

/// A pipe table with a bold header row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Header cells
    pub header: Vec<String>,
    /// Data rows, each exactly as wide as the header
    pub rows: Vec<Vec<String>>,
}

/// One block of body content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    /// Section (level 1) or scene (level 2) heading
    Heading {
        /// 1 or 2
        level: u8,
        /// Heading text
        text: String,
    },
    /// Plain paragraph
    Paragraph(String),
    /// Indented italic quote, rendered as `text — attribution`
    Quote {
        /// Text as displayed, including any quote marks
        text: String,
        /// Speaker, when known
        attribution: Option<String>,
    },
    /// Bordered table
    Table(Table),
    /// One bullet list item
    Bullet(String),
}

impl Block {
    /// Level-1 heading
    pub fn section(text: impl Into<String>) -> Self {
        Block::Heading {
            level: 1,
            text: text.into(),
        }
    }

    /// Level-2 heading
    pub fn scene(text: impl Into<String>) -> Self {
        Block::Heading {
            level: 2,
            text: text.into(),
        }
    }

    /// Quote block for `words`, wrapped in quote marks unless already
    /// wrapped; a blank attribution is dropped
    pub fn quoted(words: &str, attribution: Option<&str>) -> Self {
        let words = words.trim();
        let text = if words.len() >= 2 && words.starts_with('"') && words.ends_with('"') {
            words.to_string()
        } else {
            format!("\"{}\"", words)
        };
        Block::Quote {
            text,
            attribution: attribution
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
        }
    }
}

/// A fully assembled summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Title block
    pub header: Header,
    /// Body, in reading order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Text of every level-1 heading, in order
    pub fn section_titles(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { level: 1, text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Blocks between the level-1 heading `title` and the next one
    pub fn section(&self, title: &str) -> Option<&[Block]> {
        let start = self.blocks.iter().position(
            |block| matches!(block, Block::Heading { level: 1, text } if text == title),
        )? + 1;
        let len = self.blocks[start..]
            .iter()
            .position(|block| matches!(block, Block::Heading { level: 1, .. }))
            .unwrap_or(self.blocks.len() - start);
        Some(&self.blocks[start..start + len])
    }
}
