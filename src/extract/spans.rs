//! Page text extraction: PDF bytes to positioned spans.
//!
//! Walks each page's decompressed content stream tracking the text
//! matrix, decodes strings through the page font's encoding, and merges
//! runs sharing a baseline into one logical span per visual line. When
//! the structured walk finds no text at all, falls back to plain-text
//! extraction with layout-unknown spans.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::Span;

/// Extracts positioned spans from a parsed PDF.
pub struct SpanExtractor {
    doc: LopdfDocument,
    raw: Vec<u8>,
}

impl SpanExtractor {
    /// Parse a PDF byte stream. Encrypted or structurally corrupt input
    /// fails with `UnreadablePdf`.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        crate::detect::detect_version(bytes)?;

        let doc = LopdfDocument::load_mem(bytes)?;
        if doc.is_encrypted() {
            return Err(Error::UnreadablePdf("document is encrypted".to_string()));
        }

        Ok(Self {
            doc,
            raw: bytes.to_vec(),
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Page numbers in document order (1-based).
    pub fn page_numbers(&self) -> Vec<u32> {
        self.doc.get_pages().keys().copied().collect()
    }

    /// Extract the line-level spans of a single page.
    pub fn extract_page(&self, page_num: u32) -> Result<Vec<Span>> {
        let pages = self.doc.get_pages();
        let page_id = *pages.get(&page_num).ok_or_else(|| {
            Error::UnreadablePdf(format!("page {} missing from page tree", page_num))
        })?;

        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();
        let content = self.page_content(page_id)?;
        let raw_spans = self.walk_content(&content, page_num, &fonts)?;
        Ok(merge_line_spans(raw_spans))
    }

    /// Plain-text fallback for documents with no usable layout metadata.
    /// Produces one layout-unknown span per non-empty line, with pages
    /// split on form feeds.
    pub fn extract_plain_fallback(&self) -> Result<Vec<Span>> {
        let text = pdf_extract::extract_text_from_mem(&self.raw)?;
        if text.trim().is_empty() {
            return Err(Error::UnreadablePdf("no extractable text".to_string()));
        }

        let mut spans = Vec::new();
        for (page_idx, page_text) in text.split('\x0C').enumerate() {
            for line in page_text.lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                spans.push(Span::plain(line.to_string(), page_idx as u32 + 1));
            }
        }
        Ok(spans)
    }

    /// Fetch and concatenate the decompressed content streams of a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::UnreadablePdf(e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::UnreadablePdf(e.to_string()))?;

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::UnreadablePdf(e.to_string()));
                }
                Err(Error::UnreadablePdf("invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::UnreadablePdf("invalid content stream".to_string())),
        }
    }

    /// Walk a content stream and emit one raw span per text-showing op.
    fn walk_content(
        &self,
        content: &[u8],
        page_num: u32,
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> Result<Vec<Span>> {
        let content = lopdf::content::Content::decode(content)
            .map_err(|e| Error::UnreadablePdf(e.to_string()))?;

        let mut spans = Vec::new();
        let mut current_font = String::new();
        let mut current_font_name: Vec<u8> = Vec::new();
        let mut current_font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                }
                "ET" => in_text = false,
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            current_font_name = name.clone();
                            current_font = fonts
                                .get(name.as_slice())
                                .and_then(|d| d.get(b"BaseFont").ok())
                                .and_then(|o| o.as_name().ok())
                                .map(|n| String::from_utf8_lossy(n).to_string())
                                .unwrap_or_else(|| {
                                    String::from_utf8_lossy(name.as_slice()).to_string()
                                });
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => matrix.next_line(),
                "Tj" | "TJ" => {
                    if !in_text {
                        continue;
                    }
                    let text = if op.operator == "TJ" {
                        if let Some(Object::Array(arr)) = op.operands.first() {
                            let mut combined = String::new();
                            for item in arr {
                                match item {
                                    Object::String(bytes, _) => {
                                        combined.push_str(&self.decode_text(
                                            fonts,
                                            &current_font_name,
                                            bytes,
                                        ));
                                    }
                                    // Large negative adjustments encode word spaces.
                                    Object::Integer(n) if -(*n as f32) > 200.0 => {
                                        push_space(&mut combined);
                                    }
                                    Object::Real(n) if -n > 200.0 => {
                                        push_space(&mut combined);
                                    }
                                    _ => {}
                                }
                            }
                            combined
                        } else {
                            String::new()
                        }
                    } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                        self.decode_text(fonts, &current_font_name, bytes)
                    } else {
                        String::new()
                    };

                    if !text.trim().is_empty() {
                        let (x, y) = matrix.position();
                        let size = current_font_size * matrix.scale();
                        spans.push(Span::new(text, page_num, x, y, size, &current_font));
                    }
                }
                "'" | "\"" => {
                    matrix.next_line();
                    if !in_text {
                        continue;
                    }
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let text = self.decode_text(fonts, &current_font_name, bytes);
                        if !text.trim().is_empty() {
                            let (x, y) = matrix.position();
                            let size = current_font_size * matrix.scale();
                            spans.push(Span::new(text, page_num, x, y, size, &current_font));
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Decode a text byte sequence through the font's encoding, falling
    /// back to simple decoding when the font or encoding is unavailable.
    fn decode_text(
        &self,
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
        font_name: &[u8],
        bytes: &[u8],
    ) -> String {
        if let Some(font) = fonts.get(font_name) {
            if let Ok(enc) = font.get_font_encoding(&self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }
}

/// Merge raw spans sharing a baseline into one logical span per visual
/// line, sorted top-to-bottom then left-to-right.
pub fn merge_line_spans(mut spans: Vec<Span>) -> Vec<Span> {
    if spans.is_empty() {
        return spans;
    }

    // PDF Y is bottom-up, so descending Y reads top-to-bottom.
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<Vec<Span>> = Vec::new();
    for span in spans {
        let tolerance = span.font_size * 0.3;
        match lines.last_mut() {
            Some(line) if (line[0].y - span.y).abs() <= tolerance => line.push(span),
            _ => lines.push(vec![span]),
        }
    }

    lines.into_iter().map(join_line).collect()
}

/// Collapse the spans of one visual line into a single span, inserting
/// spaces where the X gap between runs warrants one.
fn join_line(mut line: Vec<Span>) -> Span {
    line.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    let mut merged = line[0].clone();
    for span in line.iter().skip(1) {
        let gap = span.x - (merged.x + merged.width);
        let gap_needs_space = gap > span.font_size * 0.1;
        if gap_needs_space && !merged.text.ends_with(' ') && !span.text.starts_with(' ') {
            merged.text.push(' ');
        }
        merged.text.push_str(&span.text);
        merged.width = (span.x + span.width) - merged.x;
        // The line inherits its largest run's size and any bold run.
        if span.font_size > merged.font_size {
            merged.font_size = span.font_size;
            merged.height = span.height;
        }
        merged.bold |= span.bold;
        merged.italic |= span.italic;
    }
    merged.text = merged.text.trim().to_string();
    merged
}

fn push_space(s: &mut String) {
    if !s.is_empty() && !s.ends_with(' ') {
        s.push(' ');
    }
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM first
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading; a TL operator would refine this.
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
