//! Key quote extraction
//!
//! The parser accepts only the contract form `> "<quote>" – <attribution>`.
//! Document assembly is more forgiving and tries [`QUOTE_MATCHERS`] in
//! order, from that strict form down to a bare `"quote" — attribution`.

use scribe_domain::KeyQuote;

const EN_DASH: char = '–';
const EM_DASH: char = '—';

/// Split `"quote" <dash> attribution` at the first closing quote mark that
/// is followed (after whitespace) by `dash`
///
/// `nested` allows quote marks inside the quoted text.
fn quoted_with_dash(text: &str, dash: char, nested: bool) -> Option<(String, String)> {
    let inner = text.strip_prefix('"')?;
    for (pos, _) in inner.match_indices('"') {
        if let Some(attribution) = inner[pos + 1..].trim_start().strip_prefix(dash) {
            return Some((inner[..pos].to_string(), attribution.trim().to_string()));
        }
        if !nested {
            return None;
        }
    }
    None
}

fn blockquote_body(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix('>').map(str::trim_start)
}

/// One way of recognizing a quote line
#[derive(Debug, Clone, Copy)]
pub struct QuoteMatcher {
    /// Short description, for logs
    pub name: &'static str,
    matcher: fn(&str) -> Option<KeyQuote>,
}

impl QuoteMatcher {
    /// Every quote this matcher finds in `body`, one per matching line
    ///
    /// Matches with an empty quote or attribution are included; callers
    /// decide what to do with them.
    pub fn find_all(&self, body: &str) -> Vec<KeyQuote> {
        body.lines().filter_map(self.matcher).collect()
    }
}

fn pair(quote: String, attribution: String) -> KeyQuote {
    KeyQuote {
        quote: quote.trim().to_string(),
        attribution,
    }
}

fn blockquote_en_dash(line: &str) -> Option<KeyQuote> {
    let (q, a) = quoted_with_dash(blockquote_body(line)?, EN_DASH, false)?;
    Some(pair(q, a))
}

fn blockquote_em_dash(line: &str) -> Option<KeyQuote> {
    let (q, a) = quoted_with_dash(blockquote_body(line)?, EM_DASH, false)?;
    Some(pair(q, a))
}

fn blockquote_unquoted(line: &str) -> Option<KeyQuote> {
    let body = blockquote_body(line)?;
    let (quote, attribution) = body.split_once(EN_DASH)?;
    if quote.contains(['"', EM_DASH]) || quote.trim().is_empty() {
        return None;
    }
    Some(pair(quote.to_string(), attribution.trim().to_string()))
}

fn anywhere(line: &str, dash: char) -> Option<KeyQuote> {
    line.match_indices('"').find_map(|(start, _)| {
        let (q, a) = quoted_with_dash(&line[start..], dash, false)?;
        Some(pair(q, a))
    })
}

fn plain_en_dash(line: &str) -> Option<KeyQuote> {
    anywhere(line, EN_DASH)
}

fn plain_em_dash(line: &str) -> Option<KeyQuote> {
    anywhere(line, EM_DASH)
}

/// Quote recognizers in priority order; the first that finds anything wins
pub const QUOTE_MATCHERS: [QuoteMatcher; 5] = [
    QuoteMatcher {
        name: "blockquote, en dash",
        matcher: blockquote_en_dash,
    },
    QuoteMatcher {
        name: "blockquote, em dash",
        matcher: blockquote_em_dash,
    },
    QuoteMatcher {
        name: "blockquote without quote marks",
        matcher: blockquote_unquoted,
    },
    QuoteMatcher {
        name: "quoted text, en dash",
        matcher: plain_en_dash,
    },
    QuoteMatcher {
        name: "quoted text, em dash",
        matcher: plain_em_dash,
    },
];

/// Quotes found by the first matcher that finds any, with empty entries
/// dropped
///
/// Returns the matcher name alongside the quotes.
pub fn match_quotes(body: &str) -> Option<(&'static str, Vec<KeyQuote>)> {
    QUOTE_MATCHERS.iter().find_map(|matcher| {
        let found = matcher.find_all(body);
        if found.is_empty() {
            return None;
        }
        let usable = found
            .into_iter()
            .filter(|q| !q.quote.is_empty() && !q.attribution.is_empty())
            .collect();
        Some((matcher.name, usable))
    })
}

/// Lines of a quote section that carry text, with blockquote markers removed
pub fn raw_quote_lines(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| {
            !line
                .chars()
                .all(|c| c.is_whitespace() || matches!(c, '-' | '|' | ':' | '>'))
        })
        .map(|line| line.trim_start_matches('>').trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Contract-form quotes of a Key Quotes section body
///
/// The attribution continues over following lines until the next
/// blockquote line or a blank line.
pub fn parse_quotes(body: &str) -> Vec<KeyQuote> {
    let mut quotes = Vec::new();
    let mut current: Option<KeyQuote> = None;

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('>') || trimmed.is_empty() {
            quotes.extend(current.take());
            if let Some((quote, attribution)) = blockquote_body(trimmed)
                .and_then(|body| quoted_with_dash(body, EN_DASH, true))
            {
                current = Some(KeyQuote {
                    quote: quote.trim().to_string(),
                    attribution,
                });
            }
        } else if let Some(quote) = current.as_mut() {
            if !quote.attribution.is_empty() {
                quote.attribution.push(' ');
            }
            quote.attribution.push_str(trimmed);
        }
    }

    quotes.extend(current);
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(quote: &str, attribution: &str) -> KeyQuote {
        KeyQuote {
            quote: quote.to_string(),
            attribution: attribution.to_string(),
        }
    }

    #[test]
    fn test_parse_contract_quotes() {
        let body = "> \"We need this live by June.\" – Dana Ruiz, Acme\n> \"Budget is fixed.\" – Lee Park";
        assert_eq!(
            parse_quotes(body),
            vec![
                q("We need this live by June.", "Dana Ruiz, Acme"),
                q("Budget is fixed.", "Lee Park"),
            ]
        );
    }

    #[test]
    fn test_parse_quote_with_continued_attribution() {
        let body = "> \"Ship it.\" – Dana Ruiz,\nVP Operations, Acme\n\nTrailing note";
        assert_eq!(
            parse_quotes(body),
            vec![q("Ship it.", "Dana Ruiz, VP Operations, Acme")]
        );
    }

    #[test]
    fn test_parse_nested_quote_marks() {
        let body = "> \"They called it \"urgent\" twice.\" – Sam";
        assert_eq!(parse_quotes(body), vec![q("They called it \"urgent\" twice.", "Sam")]);
    }

    #[test]
    fn test_parse_rejects_other_forms() {
        assert!(parse_quotes("> \"Quote\" — Em Dash").is_empty());
        assert!(parse_quotes("\"Quote\" – No Marker").is_empty());
        assert!(parse_quotes("No notable quotes recorded.").is_empty());
    }

    #[test]
    fn test_matcher_priority() {
        let body = "> \"Strict\" – A\n\"Loose\" – B";
        let (name, quotes) = match_quotes(body).unwrap();
        assert_eq!(name, QUOTE_MATCHERS[0].name);
        assert_eq!(quotes, vec![q("Strict", "A")]);
    }

    #[test]
    fn test_em_dash_blockquote() {
        let (name, quotes) = match_quotes("> \"Keep going\" — Pat").unwrap();
        assert_eq!(name, "blockquote, em dash");
        assert_eq!(quotes, vec![q("Keep going", "Pat")]);
    }

    #[test]
    fn test_unquoted_blockquote() {
        let (_, quotes) = match_quotes("> Costs will rise – Finance lead").unwrap();
        assert_eq!(quotes, vec![q("Costs will rise", "Finance lead")]);
    }

    #[test]
    fn test_loose_forms() {
        let (_, quotes) = match_quotes("1. \"Go live\" – Ana").unwrap();
        assert_eq!(quotes, vec![q("Go live", "Ana")]);

        let (name, quotes) = match_quotes("- \"Hold\" — Ben").unwrap();
        assert_eq!(name, "quoted text, em dash");
        assert_eq!(quotes, vec![q("Hold", "Ben")]);
    }

    #[test]
    fn test_empty_attribution_dropped_but_matcher_still_wins() {
        let (name, quotes) = match_quotes("> \"Only words\" –").unwrap();
        assert_eq!(name, QUOTE_MATCHERS[0].name);
        assert!(quotes.is_empty());
    }

    #[test]
    fn test_no_matcher() {
        assert!(match_quotes("Nothing quotable here.").is_none());
    }

    #[test]
    fn test_raw_quote_lines() {
        let body = "## heading\n> Plain remark without dash\n>\n---\n\nAnother line";
        assert_eq!(
            raw_quote_lines(body),
            vec!["Plain remark without dash".to_string(), "Another line".to_string()]
        );
    }
}
