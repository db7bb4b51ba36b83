//! Prompt construction for the 11-section summary contract
//!
//! Three modes share one formatter: a single pass over the whole
//! transcript, a free-text partial analysis per chunk, and a consolidation
//! pass that merges the partial analyses into the contract.

use scribe_domain::MeetingMetadata;

/// Which generation call a prompt is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Whole transcript in one call
    SinglePass,
    /// One chunk of a long transcript; `index` is 0-based
    ChunkPartial {
        /// Position of this chunk, 0-based
        index: usize,
        /// Number of chunks
        total: usize,
    },
    /// Merge of the per-chunk analyses
    Consolidation {
        /// False when every chunk call failed
        analyses_available: bool,
    },
}

/// Caller-supplied material for one prompt
#[derive(Debug, Clone)]
pub struct PromptInput<'a> {
    /// Meeting metadata
    pub metadata: &'a MeetingMetadata,
    /// Optional stylistic persona
    pub persona: Option<&'a str>,
    /// Optional background on the meeting
    pub context: Option<&'a str>,
    /// Transcript, chunk text or joined analyses, depending on the mode
    pub payload: &'a str,
}

/// System and user prompt for one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    /// System prompt
    pub system: String,
    /// User prompt
    pub user: String,
}

/// Builds prompts for the summary contract
pub struct SectionFormatter {
    host_organization: String,
}

impl SectionFormatter {
    /// Create a formatter excluding quotes from `host_organization` members
    pub fn new(host_organization: impl Into<String>) -> Self {
        Self {
            host_organization: host_organization.into(),
        }
    }

    /// Build the prompt pair for `mode`
    pub fn build(&self, mode: PromptMode, input: &PromptInput<'_>) -> PromptPair {
        let persona = input.persona.map(str::trim).filter(|p| !p.is_empty());
        let context = input.context.map(str::trim).filter(|c| !c.is_empty());

        match mode {
            PromptMode::SinglePass => PromptPair {
                system: self.contract_system_prompt(persona),
                user: self.single_pass_user_prompt(input, persona, context),
            },
            PromptMode::ChunkPartial { index, total } => PromptPair {
                system: self.chunk_system_prompt(persona),
                user: self.chunk_user_prompt(input, persona, context, index, total),
            },
            PromptMode::Consolidation { analyses_available } => PromptPair {
                system: self.contract_system_prompt(persona),
                user: self.consolidation_user_prompt(input, persona, context, analyses_available),
            },
        }
    }

    fn host(&self, template: &str) -> String {
        template.replace("{host}", &self.host_organization)
    }

    fn contract_system_prompt(&self, persona: Option<&str>) -> String {
        let mut prompt = String::new();

        // 1. Persona preamble, or the neutral analyst role
        match persona {
            Some(persona) => {
                prompt.push_str(persona);
                prompt.push_str("\n\n");
                prompt.push_str(&PERSONA_PREAMBLE.replace("{persona}", persona));
            }
            None => prompt.push_str(ANALYST_ROLE),
        }
        prompt.push_str("\n\n");

        // 2. The fixed section contract
        prompt.push_str(&self.host(SECTION_CONTRACT));

        // 3. Persona reminder
        if let Some(persona) = persona {
            prompt.push_str("\n\n");
            prompt.push_str(&PERSONA_REMINDER.replace("{persona}", persona));
        }

        prompt
    }

    fn chunk_system_prompt(&self, persona: Option<&str>) -> String {
        let mut prompt = String::new();
        match persona {
            Some(persona) => {
                prompt.push_str(persona);
                prompt.push_str("\n\n");
                prompt.push_str(
                    "While maintaining this persona, you are analyzing one section of a longer meeting transcript.",
                );
            }
            None => prompt.push_str(
                "You are an expert in analyzing business meeting transcripts. You are currently analyzing one section of a longer transcript.",
            ),
        }
        prompt.push_str("\n\n");
        prompt.push_str(&self.host(CHUNK_CATEGORIES));
        if persona.is_some() {
            prompt.push_str("\nYour analysis should reflect your persona in tone, vocabulary and style.");
        }
        prompt
    }

    fn single_pass_user_prompt(
        &self,
        input: &PromptInput<'_>,
        persona: Option<&str>,
        context: Option<&str>,
    ) -> String {
        let meta = input.metadata;
        let mut prompt = String::new();

        prompt.push_str("Please analyze and create a comprehensive markdown summary from this meeting transcript.\n\n");
        prompt.push_str("MEETING METADATA:\n");
        prompt.push_str(&format!("Title: {}\n", meta.title));
        prompt.push_str(&format!("Date: {}\n", meta.date));
        prompt.push_str(&format!("Duration: {}\n\n", meta.duration));

        if let Some(context) = context {
            prompt.push_str(&format!("MEETING CONTEXT:\n{}\n\n", context));
        }

        prompt.push_str("MEETING TRANSCRIPT:\n");
        prompt.push_str(input.payload);
        prompt.push_str("\n\n");
        prompt.push_str(
            "Provide a thorough, detailed analysis of this specific transcript in Markdown format following the structure in your instructions. \
             Extract actual names, roles, decisions, actions, and quotes from the transcript. \
             Do not provide generic placeholders - if information isn't present, indicate this fact.\n",
        );

        if let Some(persona) = persona {
            prompt.push_str(&format!(
                "\nREMEMBER: You must maintain the persona of {} throughout your entire summary, in every section.\n",
                persona
            ));
        }

        prompt.push('\n');
        prompt.push_str(&self.host(CONTRACT_NOTES));
        prompt
    }

    fn chunk_user_prompt(
        &self,
        input: &PromptInput<'_>,
        persona: Option<&str>,
        context: Option<&str>,
        index: usize,
        total: usize,
    ) -> String {
        let meta = input.metadata;
        let mut prompt = format!(
            "This is PART {} of {} of a meeting transcript titled \"{}\" from {} lasting {}.\n\n",
            index + 1,
            total,
            meta.title,
            meta.date_or_unknown(),
            meta.duration_or_unknown()
        );

        // Context once, with the first chunk
        if let (Some(context), 0) = (context, index) {
            prompt.push_str(&format!("MEETING CONTEXT:\n{}\n\n", context));
        }

        prompt.push_str("Analyze this transcript section thoroughly and extract all relevant information:\n\n");
        prompt.push_str(input.payload);
        prompt.push_str("\n\nProvide detailed, specific information from THIS section in an organized format.\n");

        if let Some(persona) = persona {
            prompt.push_str(&format!(
                "\nIMPORTANT: Maintain the persona of {} in your analysis. Your tone, vocabulary, and style should reflect this persona.\n",
                persona
            ));
        }

        prompt.push('\n');
        prompt.push_str(&self.host(CHUNK_NOTES));
        prompt
    }

    fn consolidation_user_prompt(
        &self,
        input: &PromptInput<'_>,
        persona: Option<&str>,
        context: Option<&str>,
        analyses_available: bool,
    ) -> String {
        let meta = input.metadata;
        let mut prompt = format!(
            "Create a comprehensive markdown summary of a meeting titled \"{}\" that took place on {} lasting {}.\n\n",
            meta.title,
            meta.date_or_unknown(),
            meta.duration_or_unknown()
        );

        if let Some(context) = context {
            prompt.push_str(&format!("MEETING CONTEXT:\n{}\n\n", context));
        }

        if analyses_available {
            prompt.push_str(
                "Below are analyses of different chunks of the meeting transcript. \
                 Please consolidate these into a single coherent summary following the markdown structure in your instructions.\n\n",
            );
        } else {
            prompt.push_str(
                "No partial analyses were available: every section of the transcript failed to process. \
                 Follow the markdown structure in your instructions, state in each section that the information could not be extracted, \
                 and do not invent participants, decisions, actions or quotes.\n\n",
            );
        }

        prompt.push_str("CHUNK ANALYSES:\n");
        prompt.push_str(ANALYSIS_SEPARATOR);
        prompt.push('\n');
        prompt.push_str(input.payload);
        prompt.push('\n');
        prompt.push_str(ANALYSIS_SEPARATOR);
        prompt.push_str("\n\n");
        prompt.push_str(
            "Create a well-structured markdown summary that captures the key elements from all these analyses, \
             eliminating duplications and organizing the information logically.\n",
        );

        if let Some(persona) = persona {
            prompt.push_str(&format!(
                "\nREMEMBER: You must maintain the persona of {} throughout your entire summary, in every section. \
                 Your vocabulary, tone, and style should clearly reflect this persona while still following the required structure.\n",
                persona
            ));
        }

        prompt.push('\n');
        prompt.push_str(&self.host(CONTRACT_NOTES));
        prompt
    }
}

/// Separator between partial analyses in the consolidation prompt
pub const ANALYSIS_SEPARATOR: &str =
    "==================================================";

const ANALYST_ROLE: &str = "You are an expert in analyzing and summarizing business meeting transcripts. \
Your task is to extract key information and create a comprehensive structured summary.";

const PERSONA_PREAMBLE: &str = "While maintaining the above persona, your task is to create a comprehensive meeting summary in markdown format.

Even though you're {persona}, you still need to follow these format requirements:

Your output must be structured in exactly the format below with numbered sections 1-11.
The persona changes your tone, vocabulary, and style only. It never changes the number of sections, their order, or their headings.";

const PERSONA_REMINDER: &str = "IMPORTANT REMINDER: While following these structural requirements, make sure your entire summary reflects {persona}. \
Your tone, vocabulary, explanations, and perspective should clearly demonstrate this persona throughout all sections. \
You must still output exactly 11 numbered sections with the headings above.";

const SECTION_CONTRACT: &str = r#"Your task is to produce a Markdown summary document of the meeting transcript provided. The output **must** use exactly the structure and formatting described here, no more and no fewer sections, so it can be repeated reliably across different calls.
You MUST analyze the transcript thoroughly and extract specific details - do not provide generic or placeholder responses.

## 1. Executive Summary
- **Output:** A two paragraph summary that captures the key points, outcomes, and significance of the meeting:
  - **Paragraph 1:** Why we met, the major context, and overall aims.
  - **Paragraph 2:** Key agreements, tone, and top take-aways.
- **Style:** Active voice, plain business language, ~120–150 words per paragraph, no bullet lists.

## 2. Participants
- **Output:** A three-column Markdown table:
  | Name | Organization / Title | Meeting Role |
  - Pull names from every speaker introduction.
  - Capture the exact "Organization / Title" string if stated; else use "(Affiliation not stated)".
  - Derive a concise "Meeting Role" (e.g., "Executive sponsor", "Change-management lead").
  - Ensure that each participant is represented but do not duplicate participants.

## 3. Conversation Flow Summary
- **Output:** Eight to twelve numbered "scenes" (or adjust to the natural breaks in the transcript).
  - Each scene gets a `### n · Title` heading (3–5 words).
  - Under each, write **MINIMUM 3-4 detailed sentences** summarizing: main discussion point(s), key participants, and notable tone or reaction.
  - Keep tense past, third-person, no bullets.

## 4. Decisions Made
- **Output:** A four-column Markdown table:
  | # | Decision | Details | Owner(s) |
  - Extract every firm decision (words like "agreed", "decided", "confirmed").
  - "Decision" = 3–7 word noun phrase; "Details" ≤25 words; "Owner(s)" = comma-separated names.

## 5. Actions Planned
- **Output:** A four-column Markdown table:
  | Action | Responsible | Timeline | Notes |
  - Find "action" statements ("we will", "please", "I'll", etc.).
  - Convert relative dates (e.g. "next week") into calendar dates.

## 6. Open Questions
- **Output:** A three-column Markdown table:
  | Question | Context | Owner |
  - Identify questions that received no definitive answer in the meeting transcript.
  - Keep them as direct quotes or close paraphrases.

## 7. Risks & Mitigations
- **Output:** A four-column Markdown table:
  | Risk | Impact | Mitigation | Owner |
  - Capture any "risk", "concern", or "issue" language, pair with nearby mitigation suggestions.

## 8. Key Quotes
- **Output:** 3-5 block-quoted lines of quotes that were of particular importance within the meeting, each in the form `> "<quote>" – <attribution>`. Prioritize quotes that support the executive summary.
  - IMPORTANT: Do NOT include any quotes from {host} members or employees. Only include quotes from external participants, clients, vendors, or consultants.
  - Each quote should be ≤50 words and must include speaker attribution.
  - If you cannot find enough important quotes from non-{host} participants, include fewer quotes rather than using quotes from {host} members.

## 9. Sentiment Analysis
- **Output:** One short paragraph, at least 3 sentences, naming the overall tone (e.g. "constructively optimistic"), the main positive driver (if present), and main concern (if present).

## 10. Content Gaps
- **Output:** A bulleted list (`- `) of what should have been discussed but wasn't, questions that should have been asked but weren't, missing topics, missing people, etc. For each content gap include a short description of the gap and potential remediation.

## 11. Technical Terminology & Acronyms
- **Output:** A two-column Markdown table:
  | Term | Definition |
  - Gather all capitalized tokens or acronyms ≥2 characters used ≥2 times.
  - Provide a one-sentence plain-English definition for each. Add a disclaimer for definitions not stated in the transcript."#;

const CONTRACT_NOTES: &str = "IMPORTANT NOTES:
1. For the Conversation Flow Summary section, each scene MUST include at least 3-4 detailed sentences (minimum 50-75 words per scene) with specific information about what was discussed, who spoke, and how the conversation progressed.
2. For the Key Quotes section, DO NOT include quotes from {host} members or employees. Only select quotes from external participants, clients, vendors, or consultants. If you can't find enough non-{host} quotes, include fewer quotes rather than using any from {host} members.
";

const CHUNK_CATEGORIES: &str = "Extract key information from this transcript section including:
1. A brief summary of the main points discussed in this section (2-3 sentences)
2. Any participants mentioned with their roles or affiliations
  - IMPORTANT: Only note organizations or titles that are EXPLICITLY stated in the text
  - For any participant whose organization or title is not clearly stated, mark as \"(Affiliation not stated)\"
  - Clearly mark participants from {host} (the host organization) vs external participants
3. Key discussion topics (with minimum 3-4 sentences of detail per topic)
4. Any decisions made
5. Any actions planned
6. Any open questions raised
7. Any risks or concerns mentioned
8. Notable quotes from participants (clearly indicate which quotes are from non-{host}/external participants)
9. Any technical terms or acronyms used

Respond in plain text, organized by the categories above. Be specific and extract actual details from the transcript.";

const CHUNK_NOTES: &str = "IMPORTANT NOTES:
1. For participant affiliations, ONLY note organizations or titles that are EXPLICITLY stated in the text.
2. For any quotes you extract, clearly mark which are from {host} members (the host organization) versus external participants (clients, consultants, vendors, etc.).
";
