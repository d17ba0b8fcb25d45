//! Document-level types: spans, lines, pages, and the document itself.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The smallest unit of styled text: a run of characters carrying one font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    /// Text content of the run
    pub text: String,

    /// Font size in points
    pub font_size: f32,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }
}

/// A visual text line: ordered spans sharing one baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Spans in reading order
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Create a single-span line.
    pub fn from_text(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            spans: vec![Span::new(text, font_size)],
        }
    }

    /// Concatenated span texts in order, with no separator inserted.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Largest span font size in the line, or `None` for a line without spans.
    pub fn max_font_size(&self) -> Option<f32> {
        self.spans.iter().map(|s| s.font_size).reduce(f32::max)
    }

    /// Check if the line holds no non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(|s| s.text.trim().is_empty())
    }
}

/// A raw image acquired alongside a page's text.
///
/// These are inputs to [`ImageLocator`](crate::images::ImageLocator)
/// implementations; the reference strings a locator produces live in the
/// image map, not in the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageImage {
    /// Raw binary data
    pub data: Vec<u8>,

    /// MIME type when the acquirer knew it (e.g. "image/png")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl PageImage {
    /// Create an image from raw bytes; the MIME type is sniffed on demand.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            mime_type: None,
        }
    }

    /// Set the declared MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// The declared MIME type, or one sniffed from the data's magic bytes.
    pub fn effective_mime(&self) -> Option<&str> {
        self.mime_type
            .as_deref()
            .or_else(|| Self::detect_mime_type(&self.data))
    }

    /// File extension for the effective MIME type, if recognized.
    pub fn extension(&self) -> Option<&'static str> {
        match self.effective_mime()? {
            "image/jpeg" => Some("jpg"),
            "image/png" => Some("png"),
            "image/gif" => Some("gif"),
            "image/tiff" => Some("tiff"),
            "image/bmp" => Some("bmp"),
            "image/webp" => Some("webp"),
            _ => None,
        }
    }

    /// Detect MIME type from data magic bytes.
    pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
        if data.len() < 8 {
            return None;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some("image/jpeg");
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some("image/png");
        }

        // GIF: GIF87a or GIF89a
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some("image/gif");
        }

        // TIFF: 49 49 2A 00 (little-endian) or 4D 4D 00 2A (big-endian)
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some("image/tiff");
        }

        // BMP: BM
        if data.starts_with(b"BM") {
            return Some("image/bmp");
        }

        // WEBP: RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some("image/webp");
        }

        None
    }

    /// Size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// One page: ordered lines plus the raw images placed on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Lines in reading order
    pub lines: Vec<Line>,

    /// Raw images on this page, in placement order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<PageImage>,
}

impl Page {
    /// Create a new empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line to the page.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Add a line (builder form).
    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    /// Add a single-span line (builder form).
    pub fn with_text(self, text: impl Into<String>, font_size: f32) -> Self {
        self.with_line(Line::from_text(text, font_size))
    }

    /// Add a raw image (builder form).
    pub fn with_image(mut self, image: PageImage) -> Self {
        self.images.push(image);
        self
    }

    /// Check if the page has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Trimmed line texts joined with newlines.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A paginated document: the unit of segmentation and of batch processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Pages in reading order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Add a page (builder form).
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of spans across all pages.
    pub fn span_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.lines)
            .map(|l| l.spans.len())
            .sum()
    }

    /// Total number of lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// Total number of raw page images.
    pub fn image_count(&self) -> usize {
        self.pages.iter().map(|p| p.images.len()).sum()
    }

    /// Iterate over every span in reading order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.pages
            .iter()
            .flat_map(|p| &p.lines)
            .flat_map(|l| &l.spans)
    }

    /// Plain text of the whole document, pages separated by blank lines.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check model preconditions: every span must carry a finite,
    /// non-negative font size. Segmentation assumes this holds.
    pub fn validate(&self) -> Result<()> {
        for (page_idx, page) in self.pages.iter().enumerate() {
            for line in &page.lines {
                for span in &line.spans {
                    if !span.font_size.is_finite() || span.font_size < 0.0 {
                        return Err(Error::InvalidDocument(format!(
                            "page {}: span has invalid font size {}",
                            page_idx, span.font_size
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.span_count(), 0);
    }

    #[test]
    fn test_line_text_concatenates_without_separator() {
        let line = Line::new(vec![Span::new("Hel", 11.0), Span::new("lo", 11.0)]);
        assert_eq!(line.text(), "Hello");
        assert_eq!(line.max_font_size(), Some(11.0));
    }

    #[test]
    fn test_line_max_font_size_mixed() {
        let line = Line::new(vec![Span::new("D", 24.0), Span::new("rop cap", 10.0)]);
        assert_eq!(line.max_font_size(), Some(24.0));
        assert_eq!(Line::default().max_font_size(), None);
    }

    #[test]
    fn test_page_builders() {
        let page = Page::new()
            .with_text("Heading", 18.0)
            .with_text("Body text", 10.0);
        assert_eq!(page.lines.len(), 2);
        assert_eq!(page.plain_text(), "Heading\nBody text");
    }

    #[test]
    fn test_document_counts() {
        let doc = Document::new()
            .with_page(Page::new().with_text("a", 10.0).with_text("b", 10.0))
            .with_page(Page::new().with_line(Line::new(vec![
                Span::new("c", 10.0),
                Span::new("d", 12.0),
            ])));
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.span_count(), 4);
    }

    #[test]
    fn test_validate_rejects_nan_sizes() {
        let doc = Document::new().with_page(Page::new().with_text("x", f32::NAN));
        assert!(doc.validate().is_err());

        let doc = Document::new().with_page(Page::new().with_text("x", 12.0));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_image_mime_detection() {
        let png = PageImage::new(vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(png.effective_mime(), Some("image/png"));
        assert_eq!(png.extension(), Some("png"));

        let declared = PageImage::new(vec![0; 16]).with_mime_type("image/jpeg");
        assert_eq!(declared.effective_mime(), Some("image/jpeg"));
        assert_eq!(declared.extension(), Some("jpg"));

        let unknown = PageImage::new(vec![0; 16]);
        assert_eq!(unknown.effective_mime(), None);
        assert_eq!(unknown.extension(), None);
    }

    #[test]
    fn test_document_serde_roundtrip() {
        let doc = Document::new().with_page(Page::new().with_text("Intro", 16.0));
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"fontSize\":16.0"));
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back.page_count(), 1);
        assert_eq!(back.pages[0].lines[0].text(), "Intro");
    }
}
