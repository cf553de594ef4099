// Upload view: resume PDFs are extracted, summarized by the LLM and queued as cards.
// All LLM calls go through llm_client.

pub mod extractor;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod summarizer;

pub use extractor::PdfTextExtractor;
pub use pipeline::IngestionPipeline;
pub use summarizer::LlmSummarizer;
