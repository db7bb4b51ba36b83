//! Removal of stray code-fence lines from generated Markdown
//!
//! Models often wrap the whole summary in a fenced block, or open and
//! close fences around single sections. Every line that is only a fence,
//! optionally followed by a one-word language tag, is dropped; all other
//! lines are kept byte for byte.

use tracing::debug;

/// True for "```" or "```lang" lines, ignoring surrounding whitespace
fn is_fence_line(line: &str) -> bool {
    match line.trim().strip_prefix("```") {
        Some(tag) => tag
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '+')),
        None => false,
    }
}

/// Strip fence-only lines from `text`
///
/// Idempotent, and the identity on text without fence lines.
///
/// # Examples
///
/// ```
/// use scribe_summarizer::sanitizer::clean;
///
/// let raw = "```markdown\n## 1. Executive Summary\nWe met.\n```";
/// assert_eq!(clean(raw), "## 1. Executive Summary\nWe met.");
/// ```
pub fn clean(text: &str) -> String {
    let mut in_code_block = false;
    let mut removed = 0usize;

    let kept: Vec<&str> = text
        .split('\n')
        .filter(|line| {
            if is_fence_line(line) {
                in_code_block = !in_code_block;
                removed += 1;
                false
            } else {
                true
            }
        })
        .collect();

    if removed > 0 {
        debug!(removed, unbalanced = in_code_block, "Removed code fence lines");
    }

    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_summary() {
        let raw = "```markdown\n## 1. Executive Summary\n\nText\n```\n";
        assert_eq!(clean(raw), "## 1. Executive Summary\n\nText\n");
    }

    #[test]
    fn test_inner_fences_removed() {
        let raw = "## 2. Participants\n```\n| Name | Org | Role |\n```\n## 3. Conversation Flow Summary";
        assert_eq!(
            clean(raw),
            "## 2. Participants\n| Name | Org | Role |\n## 3. Conversation Flow Summary"
        );
    }

    #[test]
    fn test_indented_and_tagged_fences() {
        assert_eq!(clean("  ```json  \nx\n```c++"), "x");
    }

    #[test]
    fn test_inline_backticks_kept() {
        let raw = "Use ```code``` inline\n```not a fence line```\n`single`";
        assert_eq!(clean(raw), raw);
    }

    #[test]
    fn test_fence_free_identity() {
        let raw = "\n  leading space\n\n## 1. Executive Summary\ntrailing  \n\n";
        assert_eq!(clean(raw), raw);
    }

    #[test]
    fn test_unbalanced_fence() {
        assert_eq!(clean("```\nopen only"), "open only");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn markdownish() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just("```".to_string()),
                Just("```markdown".to_string()),
                Just("  ``` ".to_string()),
                "[a-z #|>-]{0,20}",
                "`{1,4}[a-z]{0,5}",
            ],
            0..30,
        )
        .prop_map(|lines| lines.join("\n"))
    }

    proptest! {
        /// Property: cleaning twice equals cleaning once
        #[test]
        fn test_clean_idempotent(text in markdownish()) {
            let once = clean(&text);
            prop_assert_eq!(clean(&once), once);
        }

        /// Property: no fence lines survive
        #[test]
        fn test_no_fences_remain(text in markdownish()) {
            prop_assert!(!clean(&text).split('\n').any(is_fence_line));
        }

        /// Property: text without backticks is untouched
        #[test]
        fn test_backtick_free_identity(text in "[a-zA-Z0-9 #|>\n.-]{0,200}") {
            prop_assert_eq!(clean(&text), text);
        }
    }
}
