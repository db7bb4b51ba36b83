//! Core Summarizer implementation

use crate::chunking::TextChunker;
use crate::config::SummarizerConfig;
use crate::error::SummarizerError;
use crate::fallback::fallback_summary;
use crate::parser::parse;
use crate::prompt::{PromptInput, PromptMode, PromptPair, SectionFormatter, ANALYSIS_SEPARATOR};
use crate::record::SummaryRecord;
use crate::sanitizer::clean;
use scribe_domain::{GenerationProvider, GenerationRequest, MeetingMetadata};
use std::sync::{Arc, Mutex};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// One transcript to summarize
#[derive(Debug, Clone, Default)]
pub struct SummaryRequest {
    /// Raw transcript text
    pub transcript: String,

    /// Meeting metadata
    pub metadata: MeetingMetadata,

    /// Optional stylistic persona
    pub persona: Option<String>,

    /// Optional background on the meeting
    pub context: Option<String>,
}

impl SummaryRequest {
    /// Request with default metadata
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            ..Self::default()
        }
    }

    /// Set the meeting metadata
    pub fn with_metadata(mut self, metadata: MeetingMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the persona
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// Set the meeting context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn prompt_input<'a>(&'a self, payload: &'a str) -> PromptInput<'a> {
        PromptInput {
            metadata: &self.metadata,
            persona: self.persona.as_deref(),
            context: self.context.as_deref(),
            payload,
        }
    }
}

/// Turns transcripts into 11-section Markdown summaries
///
/// Short transcripts take one generation call. Transcripts above the
/// configured threshold are chunked, each chunk is analyzed on its own and
/// a final call consolidates the analyses. Calls run one at a time.
pub struct Summarizer<P>
where
    P: GenerationProvider,
{
    provider: Arc<P>,
    config: SummarizerConfig,
    formatter: SectionFormatter,
    /// Held for the whole provider call, including calls abandoned on timeout
    turn: Arc<Mutex<()>>,
}

impl<P> Summarizer<P>
where
    P: GenerationProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
{
    /// Create a new Summarizer
    ///
    /// # Errors
    ///
    /// `SummarizerError::Config` when `config` fails validation.
    pub fn new(provider: P, config: SummarizerConfig) -> Result<Self, SummarizerError> {
        config.validate().map_err(SummarizerError::Config)?;
        Ok(Self {
            formatter: SectionFormatter::new(config.host_organization.clone()),
            provider: Arc::new(provider),
            config,
            turn: Arc::new(Mutex::new(())),
        })
    }

    /// The active configuration
    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Run the full pipeline and return a record of the result
    ///
    /// Validates the transcript, generates the Markdown, strips stray code
    /// fences and parses the sections.
    pub async fn generate(&self, request: &SummaryRequest) -> Result<SummaryRecord, SummarizerError> {
        let length = request.transcript.trim().chars().count();
        if length < self.config.min_transcript_length {
            return Err(SummarizerError::TranscriptTooShort(
                length,
                self.config.min_transcript_length,
            ));
        }

        let markdown = clean(&self.summarize(request).await?);
        if markdown.trim().is_empty() {
            return Err(SummarizerError::EmptySummary);
        }

        let mut document = parse(&markdown);
        document.raw_markdown = markdown;

        let record = SummaryRecord::new(request.metadata.clone(), document)
            .with_prompts(request.persona.clone(), request.context.clone());
        info!(id = %record.id, title = %record.metadata.title, "Summary record created");
        Ok(record)
    }

    /// Produce the raw Markdown summary for a transcript
    ///
    /// # Errors
    ///
    /// Only the single-pass path fails; the chunked path always returns
    /// contract-shaped Markdown, falling back to a fixed document when
    /// consolidation fails.
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<String, SummarizerError> {
        let length = request.transcript.len();
        info!(
            "Starting summary for '{}', transcript length {}, model {}",
            request.metadata.title,
            length,
            self.provider.model_name()
        );

        if length <= self.config.large_input_threshold {
            return self.summarize_single(request).await;
        }

        info!("Transcript exceeds large input threshold, chunking...");
        Ok(self.summarize_chunked(request).await)
    }

    async fn summarize_single(&self, request: &SummaryRequest) -> Result<String, SummarizerError> {
        let prompt = self.formatter.build(
            PromptMode::SinglePass,
            &request.prompt_input(&request.transcript),
        );
        let summary = self
            .call_llm(prompt, self.config.single_pass_max_tokens)
            .await?;
        info!("Summary complete: {} chars", summary.len());
        Ok(summary)
    }

    async fn summarize_chunked(&self, request: &SummaryRequest) -> String {
        let chunks = TextChunker::new(self.config.chunk_size).chunk(&request.transcript);
        let total = chunks.len();
        info!("Split transcript into {} chunks", total);

        let mut analyses = Vec::with_capacity(total);
        for (index, chunk) in chunks.iter().enumerate() {
            debug!("Processing chunk {}/{}", index + 1, total);
            let prompt = self.formatter.build(
                PromptMode::ChunkPartial { index, total },
                &request.prompt_input(chunk),
            );
            match self.call_llm(prompt, self.config.chunk_max_tokens).await {
                Ok(analysis) => analyses.push(analysis),
                Err(e) => warn!("Chunk {}/{} failed, skipping: {}", index + 1, total, e),
            }
        }

        let analyses_available = !analyses.is_empty();
        if !analyses_available {
            warn!("Every chunk failed; consolidating without partial analyses");
        }

        let joined = analyses.join(ANALYSIS_SEPARATOR);
        let prompt = self.formatter.build(
            PromptMode::Consolidation { analyses_available },
            &request.prompt_input(&joined),
        );

        match self
            .call_llm(prompt, self.config.consolidation_max_tokens)
            .await
        {
            Ok(summary) => {
                info!(
                    "Large transcript processing complete: {}/{} chunks analyzed",
                    analyses.len(),
                    total
                );
                summary
            }
            Err(e) => {
                error!("Consolidation failed, returning fallback summary: {}", e);
                fallback_summary(&request.metadata.title)
            }
        }
    }

    /// Call the provider on a blocking thread, bounded by the timeout
    ///
    /// A blocking call cannot be cancelled. On timeout it is abandoned and
    /// keeps its turn until the provider returns, so the next call waits for
    /// it instead of overlapping. The provider's own HTTP timeout bounds the
    /// wait; the next call's timeout includes it.
    async fn call_llm(&self, prompt: PromptPair, max_tokens: u32) -> Result<String, SummarizerError> {
        let llm = Arc::clone(&self.provider);
        let turn = Arc::clone(&self.turn);
        let request = GenerationRequest::new(prompt.user)
            .with_system_prompt(prompt.system)
            .with_max_tokens(max_tokens);

        debug!("Prompt length: {} chars", request.prompt.len());

        // Call in a blocking context since GenerationProvider is not async
        let call = tokio::task::spawn_blocking(move || {
            // A panicking provider poisons the lock; the unit inside is still valid
            let _turn = turn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            llm.generate(&request)
                .map_err(|e| SummarizerError::Generation(e.to_string()))
        });

        timeout(self.config.generation_timeout(), call)
            .await
            .map_err(|_| SummarizerError::Timeout)?
            .map_err(|e| SummarizerError::Generation(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_llm::MockProvider;

    fn transcript(len: usize) -> String {
        "Speaker: words here. ".repeat(len / 21 + 1)[..len].to_string()
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        let mut config = SummarizerConfig::default();
        config.chunk_size = 0;
        assert!(matches!(
            Summarizer::new(MockProvider::default(), config),
            Err(SummarizerError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_transcript_too_short() {
        let summarizer = Summarizer::new(MockProvider::default(), SummarizerConfig::default()).unwrap();
        let result = summarizer.generate(&SummaryRequest::new("too short")).await;
        assert!(matches!(result, Err(SummarizerError::TranscriptTooShort(9, 100))));
    }

    #[tokio::test]
    async fn test_empty_summary_rejected() {
        let summarizer = Summarizer::new(MockProvider::new("```markdown\n\n```"), SummarizerConfig::default()).unwrap();
        let result = summarizer.generate(&SummaryRequest::new(transcript(500))).await;
        assert!(matches!(result, Err(SummarizerError::EmptySummary)));
    }

    #[tokio::test]
    async fn test_single_pass_failure_propagates() {
        let mut provider = MockProvider::default();
        provider.add_error_containing("MEETING TRANSCRIPT");
        let summarizer = Summarizer::new(provider, SummarizerConfig::default()).unwrap();

        let result = summarizer.summarize(&SummaryRequest::new(transcript(500))).await;
        assert!(matches!(result, Err(SummarizerError::Generation(_))));
    }

    #[tokio::test]
    async fn test_single_pass_token_budget_and_system_prompt() {
        let provider = MockProvider::new("## 1. Executive Summary\nOk.");
        let summarizer = Summarizer::new(provider.clone(), SummarizerConfig::default()).unwrap();

        summarizer.summarize(&SummaryRequest::new(transcript(500))).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_tokens, 4000);
        assert!(requests[0]
            .system_prompt
            .as_deref()
            .unwrap_or_default()
            .contains("## 8. Key Quotes"));
    }

    struct SlowProvider;

    impl GenerationProvider for SlowProvider {
        type Error = String;

        fn generate(&self, _request: &GenerationRequest) -> Result<String, Self::Error> {
            std::thread::sleep(std::time::Duration::from_millis(1500));
            Ok("late".to_string())
        }
    }

    #[tokio::test]
    async fn test_single_pass_timeout() {
        let config = SummarizerConfig {
            generation_timeout_secs: 1,
            ..SummarizerConfig::default()
        };
        let summarizer = Summarizer::new(SlowProvider, config).unwrap();
        let result = summarizer.summarize(&SummaryRequest::new(transcript(500))).await;
        assert!(matches!(result, Err(SummarizerError::Timeout)));
    }

    /// Sleeps past the timeout and records how many calls ran at once
    #[derive(Default)]
    struct CountingSlowProvider {
        running: std::sync::atomic::AtomicUsize,
        peak: Arc<std::sync::atomic::AtomicUsize>,
        calls: Arc<std::sync::atomic::AtomicUsize>,
    }

    impl GenerationProvider for CountingSlowProvider {
        type Error = String;

        fn generate(&self, _request: &GenerationRequest) -> Result<String, Self::Error> {
            use std::sync::atomic::Ordering;

            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(1200));
            self.running.fetch_sub(1, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("late".to_string())
        }
    }

    #[tokio::test]
    async fn test_timed_out_calls_never_overlap() {
        use std::sync::atomic::Ordering;

        let provider = CountingSlowProvider::default();
        let peak = Arc::clone(&provider.peak);
        let calls = Arc::clone(&provider.calls);
        let config = SummarizerConfig {
            large_input_threshold: 300,
            chunk_size: 300,
            generation_timeout_secs: 1,
            ..SummarizerConfig::default()
        };
        let summarizer = Summarizer::new(provider, config).unwrap();

        // Two chunks plus consolidation, each abandoned on timeout
        let text = format!("{}\n\n{}", transcript(250), transcript(250));
        let summary = summarizer
            .summarize(&SummaryRequest::new(text).with_metadata(MeetingMetadata::new("Sync")))
            .await
            .unwrap();
        assert_eq!(summary, fallback_summary("Sync"));

        // Let the last abandoned call finish
        tokio::time::sleep(std::time::Duration::from_millis(2500)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }
}
