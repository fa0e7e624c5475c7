//! First-page text and image extraction from PDF receipts using lopdf and pdf-extract.

use image::{DynamicImage, ImageBuffer, Rgba};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// PDF receipt reader.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF from bytes, decrypting it if it uses an empty password.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads raw bytes, so keep the decrypted form.
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))
    }

    /// Embedded text of the first page.
    ///
    /// Falls back to pdf-extract when lopdf finds nothing on the page. Later
    /// pages are never read.
    pub fn first_page_text(&self) -> Result<String> {
        let doc = self.document()?;

        let text = doc.extract_text(&[1]).unwrap_or_default();
        if !text.trim().is_empty() {
            return Ok(text);
        }

        trace!("lopdf found no text on page 1, trying pdf-extract");
        let pages = pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(pages.into_iter().next().unwrap_or_default())
    }

    /// Images drawn on the first page (scanned receipts).
    pub fn first_page_images(&self) -> Result<Vec<DynamicImage>> {
        let doc = self.document()?;
        let pages = doc.get_pages();
        let page_id = pages.get(&1).ok_or(PdfError::NoPages)?;

        let mut images = Vec::new();
        if let Some(resources) = page_resources(doc, *page_id) {
            if let Ok(xobjects) = resources.get(b"XObject") {
                if let Ok((_, Object::Dictionary(xobj_dict))) = doc.dereference(xobjects) {
                    for (_name, obj_ref) in xobj_dict.iter() {
                        if let Ok((_, obj)) = doc.dereference(obj_ref) {
                            if let Some(img) = decode_image_object(doc, obj) {
                                images.push(img);
                            }
                        }
                    }
                }
            }
        }

        debug!("Extracted {} images from page 1", images.len());
        Ok(images)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Resources dictionary for a page, following `Parent` inheritance.
fn page_resources(doc: &Document, node_id: ObjectId) -> Option<Dictionary> {
    let Ok(Object::Dictionary(dict)) = doc.get_object(node_id) else {
        return None;
    };

    if let Ok(resources) = dict.get(b"Resources") {
        if let Ok((_, Object::Dictionary(res_dict))) = doc.dereference(resources) {
            return Some(res_dict.clone());
        }
    }

    match dict.get(b"Parent") {
        Ok(Object::Reference(parent_id)) => page_resources(doc, *parent_id),
        _ => None,
    }
}

fn decode_image_object(doc: &Document, obj: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = obj else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
    let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;
    trace!("Found image object: {}x{}", width, height);

    let filter = dict.get(b"Filter").ok().and_then(|f| match f {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
        _ => None,
    });

    match filter {
        Some(b"DCTDecode") => {
            return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg).ok();
        }
        Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
            trace!("Unsupported image filter");
            return None;
        }
        _ => {}
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);

    if bits != 8 {
        trace!("Unsupported bits per component: {}", bits);
        return None;
    }

    raw_to_image(&data, width, height, color_space)
}

fn raw_to_image(data: &[u8], width: u32, height: u32, color_space: &[u8]) -> Option<DynamicImage> {
    let pixels = (width as usize) * (height as usize);
    let channels = match color_space {
        b"DeviceRGB" | b"RGB" => 3,
        b"DeviceGray" | b"G" => 1,
        _ => return None,
    };

    if data.len() < pixels * channels {
        trace!("Image data too short: {} < {}", data.len(), pixels * channels);
        return None;
    }

    let mut rgba = Vec::with_capacity(pixels * 4);
    for px in data[..pixels * channels].chunks(channels) {
        match px {
            [r, g, b] => rgba.extend_from_slice(&[*r, *g, *b, 255]),
            [v] => rgba.extend_from_slice(&[*v, *v, *v, 255]),
            _ => return None,
        }
    }

    ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba).map(DynamicImage::ImageRgba8)
}
