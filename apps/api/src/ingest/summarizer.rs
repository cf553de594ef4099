use async_trait::async_trait;
use thiserror::Error;

use crate::ingest::prompts::{build_summary_prompt, SUMMARY_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Summarization failed: {0}")]
    Llm(#[from] LlmError),
}

/// Turns extracted resume text into card text.
///
/// Carried in the ingestion pipeline as `Arc<dyn Summarizer>`.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, resume_text: &str) -> Result<String, SummaryError>;
}

/// Summarizer backed by the shared LLM client.
pub struct LlmSummarizer(pub LlmClient);

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, resume_text: &str) -> Result<String, SummaryError> {
        let prompt = build_summary_prompt(resume_text);
        Ok(self.0.complete(&prompt, SUMMARY_SYSTEM).await?)
    }
}
