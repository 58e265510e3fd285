pub mod llm_service;
pub mod pdf_extractor;
pub mod prompt;

pub use llm_service::{AssessmentModel, LlmService};
pub use pdf_extractor::PdfExtractor;
