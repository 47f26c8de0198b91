// Resume upload and file-to-text extraction.

pub mod extractor;
pub mod handlers;

pub use extractor::ExtractionError;
