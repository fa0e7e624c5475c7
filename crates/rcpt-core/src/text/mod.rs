//! Text extraction from receipt documents.

#[cfg(feature = "native")]
mod ocr;
mod pdf;

#[cfg(feature = "native")]
pub use ocr::OcrEngine;
pub use pdf::PdfExtractor;

use std::fs;
use std::path::Path;

use image::DynamicImage;
use tracing::{debug, warn};

use crate::error::{OcrError, RcptError, Result};
use crate::models::config::OcrConfig;
use crate::models::record::ReceiptText;

/// Image extensions handled by OCR.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "tif", "bmp"];

/// Trait for receipt text sources.
pub trait TextExtractor {
    /// Extract the text of a receipt file, one entry per line.
    fn extract(&self, path: &Path) -> Result<ReceiptText>;
}

/// Extracts receipt text by file type: plain text, PDF, or image (OCR).
pub struct DocumentTextExtractor {
    #[cfg(feature = "native")]
    ocr: Option<OcrEngine>,
}

impl DocumentTextExtractor {
    /// Extractor without OCR; handles `.txt` and text-based PDFs.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "native")]
            ocr: None,
        }
    }

    /// Extractor with OCR enabled when a model directory is configured.
    pub fn from_config(config: &OcrConfig) -> Result<Self> {
        if config.model_dir.is_none() {
            return Ok(Self::new());
        }

        #[cfg(feature = "native")]
        {
            Ok(Self {
                ocr: Some(OcrEngine::from_config(config)?),
            })
        }

        #[cfg(not(feature = "native"))]
        {
            warn!("OCR model directory configured but OCR support is not compiled in");
            Ok(Self::new())
        }
    }

    fn extract_pdf(&self, path: &Path) -> Result<String> {
        let data = fs::read(path)?;
        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;

        let text = extractor.first_page_text()?;
        if !text.trim().is_empty() {
            return Ok(text);
        }

        debug!("{} has no embedded text, trying OCR", path.display());
        let images = extractor.first_page_images()?;
        match images.first() {
            Some(image) => self.ocr_image(image),
            None => {
                warn!("{} has neither text nor images on its first page", path.display());
                Ok(String::new())
            }
        }
    }

    #[cfg(feature = "native")]
    fn ocr_image(&self, image: &DynamicImage) -> Result<String> {
        let engine = self.ocr.as_ref().ok_or_else(|| {
            OcrError::Unavailable("set ocr.model_dir to enable OCR".to_string())
        })?;
        Ok(engine.extract_text(image)?)
    }

    #[cfg(not(feature = "native"))]
    fn ocr_image(&self, _image: &DynamicImage) -> Result<String> {
        Err(OcrError::Unavailable("built without the `native` feature".to_string()).into())
    }
}

impl Default for DocumentTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, path: &Path) -> Result<ReceiptText> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let text = match extension.as_str() {
            "txt" => fs::read_to_string(path)?,
            "pdf" => self.extract_pdf(path)?,
            ext if IMAGE_EXTENSIONS.contains(&ext) => {
                let image = image::open(path)?;
                self.ocr_image(&image)?
            }
            _ => return Err(RcptError::UnsupportedFormat(extension)),
        };

        let receipt = ReceiptText::from_text(&text);
        debug!("Extracted {} lines from {}", receipt.len(), path.display());
        Ok(receipt)
    }
}
