//! Paragraph-boundary chunking for oversized transcripts

/// Separator between paragraphs
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Splits text into bounded-size segments on paragraph boundaries
///
/// Segments are contiguous, ordered and non-empty, and joining them with
/// [`PARAGRAPH_SEPARATOR`] reproduces the input byte for byte. A segment
/// exceeds the limit only when one paragraph alone is larger than it.
/// Sizes are UTF-8 byte lengths.
pub struct TextChunker {
    max_chunk_size: usize,
}

impl TextChunker {
    /// Create a new text chunker
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    /// Chunk the given text
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.len() <= self.max_chunk_size {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut current: Option<String> = None;

        for paragraph in text.split(PARAGRAPH_SEPARATOR) {
            match current.as_mut() {
                None => current = Some(paragraph.to_string()),
                Some(buffer) => {
                    let fits = buffer.len() + PARAGRAPH_SEPARATOR.len() + paragraph.len()
                        <= self.max_chunk_size;
                    // An empty buffer or blank paragraph never opens a segment
                    // of its own, which would leave an empty segment behind.
                    if fits || buffer.is_empty() || paragraph.is_empty() {
                        buffer.push_str(PARAGRAPH_SEPARATOR);
                        buffer.push_str(paragraph);
                    } else {
                        chunks.extend(current.replace(paragraph.to_string()));
                    }
                }
            }
        }

        chunks.extend(current);
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_chunking_needed_for_small_text() {
        let chunker = TextChunker::new(100);
        let text = "Short text here.";
        let chunks = chunker.chunk(text);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn test_chunk_by_paragraph() {
        let chunker = TextChunker::new(50);
        let text = "First paragraph here.\n\nSecond paragraph here.\n\nThird paragraph here.";
        let chunks = chunker.chunk(text);

        assert_eq!(
            chunks,
            vec![
                "First paragraph here.\n\nSecond paragraph here.".to_string(),
                "Third paragraph here.".to_string(),
            ]
        );
        assert_eq!(chunks.join(PARAGRAPH_SEPARATOR), text);
    }

    #[test]
    fn test_separator_counts_toward_limit() {
        // "aaaa" + "\n\n" + "bbbb" is 10 bytes
        let chunker = TextChunker::new(9);
        let chunks = chunker.chunk("aaaa\n\nbbbb");
        assert_eq!(chunks, vec!["aaaa".to_string(), "bbbb".to_string()]);

        let chunker = TextChunker::new(10);
        assert_eq!(chunker.chunk("aaaa\n\nbbbb\n\ncc").len(), 2);
    }

    #[test]
    fn test_empty_text() {
        let chunker = TextChunker::new(100);
        let chunks = chunker.chunk("");
        assert_eq!(chunks, vec![String::new()]);
    }

    #[test]
    fn test_very_long_single_paragraph_not_split() {
        let chunker = TextChunker::new(20);
        let text = format!("short\n\n{}\n\ntail", "a".repeat(100));
        let chunks = chunker.chunk(&text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].len(), 100);
        assert_eq!(chunks.join(PARAGRAPH_SEPARATOR), text);
    }

    #[test]
    fn test_blank_paragraphs_never_produce_empty_segments() {
        let chunker = TextChunker::new(6);
        let text = "\n\naaaaaa\n\n\n\nbbbbbb\n\n";
        let chunks = chunker.chunk(text);

        assert!(chunks.iter().all(|c| !c.is_empty()));
        assert_eq!(chunks.join(PARAGRAPH_SEPARATOR), text);
    }

    #[test]
    fn test_multibyte_sizes_in_bytes() {
        // Each "é" is two bytes
        let chunker = TextChunker::new(8);
        let text = "éééé\n\néé";
        let chunks = chunker.chunk(text);
        assert_eq!(chunks, vec!["éééé".to_string(), "éé".to_string()]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn paragraphs() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-zA-Z0-9 .,é]{1,80}", 1..40)
    }

    proptest! {
        /// Property: joining segments reproduces the input exactly
        #[test]
        fn test_chunks_round_trip(paras in paragraphs(), max in 1usize..300) {
            let text = paras.join(PARAGRAPH_SEPARATOR);
            let chunks = TextChunker::new(max).chunk(&text);
            prop_assert_eq!(chunks.join(PARAGRAPH_SEPARATOR), text);
        }

        /// Property: segments are non-empty and over-limit only when they
        /// hold exactly one paragraph
        #[test]
        fn test_chunk_size_bound(paras in paragraphs(), max in 1usize..300) {
            let text = paras.join(PARAGRAPH_SEPARATOR);
            let chunks = TextChunker::new(max).chunk(&text);

            if text.len() > max {
                for chunk in &chunks {
                    prop_assert!(!chunk.is_empty());
                    prop_assert!(
                        chunk.len() <= max || !chunk.contains(PARAGRAPH_SEPARATOR),
                        "segment of {} bytes holds several paragraphs", chunk.len()
                    );
                }
            }
        }

        /// Property: text within the limit comes back as a single segment
        #[test]
        fn test_small_text_identity(text in "[a-z\n ]{0,50}") {
            let chunks = TextChunker::new(50).chunk(&text);
            prop_assert_eq!(chunks, vec![text]);
        }
    }
}
