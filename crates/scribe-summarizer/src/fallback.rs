//! Degraded summary returned when consolidation fails

/// Fixed Markdown summary for a meeting whose consolidation call failed
///
/// Carries sections 1, 2, 3, 4, 5, 9, 10 and 11 of the contract, each with
/// a placeholder entry recommending manual review of the transcript.
pub fn fallback_summary(title: &str) -> String {
    format!(
        r#"
## 1. Executive Summary

This meeting titled '{title}' faced technical processing challenges. The transcript was too large for complete analysis and some information may be missing.

Despite processing limitations, a partial summary is provided below. It's recommended to review the original transcript for complete understanding of all discussed topics.

## 2. Participants

| Name | Organization / Title | Meeting Role |
|------|---------------------|--------------|
| (Unable to extract complete participant list due to processing limitations) | | |

## 3. Conversation Flow Summary

### 1 · Meeting overview

The meeting covered multiple topics that could not be fully processed due to the large transcript size.

## 4. Decisions Made

| # | Decision | Details | Owner(s) |
|---|----------|---------|----------|
| 1 | Review transcript manually | The system was unable to fully process this large transcript | All participants |

## 5. Actions Planned

| Action | Responsible | Timeline | Notes |
|--------|------------|----------|-------|
| Review original transcript | All participants | As soon as possible | Due to processing limitations |

## 9. Sentiment Analysis

The sentiment analysis could not be completed due to processing limitations with this large transcript.

## 10. Content Gaps

- Complete analysis of the transcript
- Detailed extraction of all meeting elements

## 11. Technical Terminology & Acronyms

| Term | Definition |
|------|------------|
| N/A | No terminology could be reliably extracted due to processing limitations |
"#
    )
}
