//! OCR engine wrapper using `pure-onnx-ocr`.

use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Vertical bucket size (pixels) for grouping text boxes into lines.
const ROW_HEIGHT: f64 = 20.0;

/// A recognized text region.
#[derive(Debug, Clone)]
struct TextBox {
    text: String,
    left: f64,
    top: f64,
}

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct OcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

impl OcrEngine {
    /// Load models from the configured model directory.
    pub fn from_config(config: &OcrConfig) -> Result<Self, OcrError> {
        let (det_path, rec_path, dict_path) = config
            .model_paths()
            .ok_or_else(|| OcrError::Unavailable("no OCR model directory configured".to_string()))?;

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!("missing model file {}", path.display())));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded OCR models: {}, {}", det_path.display(), rec_path.display());

        Ok(Self {
            engine,
            keep_unk: config.keep_unk,
        })
    }

    /// Recognize text and return it in reading order, one receipt line per row.
    pub fn extract_text(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        debug!("Running OCR on {}x{} image", width, height);

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let boxes: Vec<TextBox> = results
            .iter()
            .map(|r| {
                let (left, top) = top_left(&r.bounding_box);
                let text = if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                TextBox { text, left, top }
            })
            .collect();

        let text = join_rows(boxes);

        info!(
            "OCR complete: {} text regions in {}ms",
            results.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f64, f64) {
    polygon
        .exterior()
        .coords()
        .fold((f64::INFINITY, f64::INFINITY), |(x, y), c| (x.min(c.x), y.min(c.y)))
}

/// Sort boxes top-to-bottom, left-to-right, and join boxes on the same row with a space.
fn join_rows(mut boxes: Vec<TextBox>) -> String {
    let row = |b: &TextBox| (b.top / ROW_HEIGHT) as i64;

    boxes.sort_by(|a, b| {
        row(a)
            .cmp(&row(b))
            .then(a.left.partial_cmp(&b.left).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<String> = Vec::new();
    let mut current_row = None;

    for b in &boxes {
        let r = row(b);
        match lines.last_mut() {
            Some(line) if current_row == Some(r) => {
                line.push(' ');
                line.push_str(b.text.trim());
            }
            _ => lines.push(b.text.trim().to_string()),
        }
        current_row = Some(r);
    }

    lines.join("\n")
}
