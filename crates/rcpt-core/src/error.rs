//! Error types for the rcpt-core library.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Filename scoring error.
    #[error("scoring error: {0}")]
    Score(#[from] ScoreError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file type has no text extraction path.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// OCR support was not compiled in or no models are configured.
    #[error("OCR unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while comparing filenames or aggregating results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// The filename does not follow the `YYYY-MM-DD-<name>-$<amount>` convention.
    #[error("filename does not follow the date-name-price convention: {name}")]
    MalformedName { name: String },

    /// No comparison results were available to aggregate.
    #[error("no data: no comparable input files")]
    EmptyBatch,
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
