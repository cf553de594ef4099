//! Ingestion pipeline — uploaded resumes in, queued cards out.
//!
//! Files are processed strictly one after another: extract → summarize →
//! enqueue. Failures degrade per file instead of aborting the batch:
//! - not a PDF → `Rejected`, never extracted
//! - extraction fails or yields no text → summarize empty text, `SummarizedFromEmpty`
//! - summarization or enqueue fails → `Failed`, move on to the next file
//!
//! Only one batch runs at a time; a second one is refused with `IngestError::Busy`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ingest::extractor::TextExtractor;
use crate::ingest::summarizer::Summarizer;
use crate::models::Card;
use crate::triage::CoordinatorHandle;

const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("A batch is already being processed")]
    Busy,
}

/// A file received from the upload form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn is_pdf(&self) -> bool {
        self.content_type.as_deref() == Some(PDF_CONTENT_TYPE)
            || self.name.to_ascii_lowercase().ends_with(".pdf")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileResult {
    Summarized { card: Card },
    SummarizedFromEmpty { card: Card },
    Failed { reason: String },
    Rejected { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file: String,
    #[serde(flatten)]
    pub result: FileResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub outcomes: Vec<FileOutcome>,
    pub cards_created: usize,
    pub failed: usize,
    pub rejected: usize,
}

impl BatchReport {
    fn new(batch_id: Uuid, outcomes: Vec<FileOutcome>) -> Self {
        let count = |pred: fn(&FileResult) -> bool| outcomes.iter().filter(|o| pred(&o.result)).count();
        let cards_created = count(|r| {
            matches!(
                r,
                FileResult::Summarized { .. } | FileResult::SummarizedFromEmpty { .. }
            )
        });
        let failed = count(|r| matches!(r, FileResult::Failed { .. }));
        let rejected = count(|r| matches!(r, FileResult::Rejected { .. }));
        Self {
            batch_id,
            outcomes,
            cards_created,
            failed,
            rejected,
        }
    }
}

/// Clears the processing flag when the batch ends, on every exit path.
struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct IngestionPipeline {
    extractor: Arc<dyn TextExtractor>,
    summarizer: Arc<dyn Summarizer>,
    triage: CoordinatorHandle,
    processing: AtomicBool,
}

impl IngestionPipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        summarizer: Arc<dyn Summarizer>,
        triage: CoordinatorHandle,
    ) -> Self {
        Self {
            extractor,
            summarizer,
            triage,
            processing: AtomicBool::new(false),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<ProcessingGuard<'_>, IngestError> {
        self.processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ProcessingGuard(&self.processing))
            .map_err(|_| IngestError::Busy)
    }

    /// Processes `files` in order and reports one outcome per file.
    pub async fn run_batch(&self, files: Vec<UploadedFile>) -> Result<BatchReport, IngestError> {
        let _guard = self.begin()?;
        let batch_id = Uuid::new_v4();
        info!("Batch {batch_id}: processing {} file(s)", files.len());

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let result = self.process_file(&file).await;
            outcomes.push(FileOutcome {
                file: file.name,
                result,
            });
        }

        let report = BatchReport::new(batch_id, outcomes);
        info!(
            "Batch {batch_id}: {} card(s) created, {} failed, {} rejected",
            report.cards_created, report.failed, report.rejected
        );
        Ok(report)
    }

    async fn process_file(&self, file: &UploadedFile) -> FileResult {
        if !file.is_pdf() {
            warn!("Rejected '{}': not a PDF", file.name);
            return FileResult::Rejected {
                reason: "Please select a PDF file.".to_string(),
            };
        }

        let text = self.extract_text(file).await;
        let extracted = !text.trim().is_empty();

        let summary = match self.summarizer.summarize(&text).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summarization failed for '{}': {e}", file.name);
                return FileResult::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match self.triage.enqueue(summary).await {
            Ok(card) if extracted => FileResult::Summarized { card },
            Ok(card) => FileResult::SummarizedFromEmpty { card },
            Err(e) => {
                warn!("Could not queue card for '{}': {e}", file.name);
                FileResult::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Extracted text, or empty text if extraction fails for any reason.
    async fn extract_text(&self, file: &UploadedFile) -> String {
        let extractor = self.extractor.clone();
        let bytes = file.bytes.clone();
        match tokio::task::spawn_blocking(move || extractor.extract(&bytes)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Failed to extract text from '{}': {e}", file.name);
                String::new()
            }
            Err(e) => {
                warn!("Text extraction for '{}' aborted: {e}", file.name);
                String::new()
            }
        }
    }
}
