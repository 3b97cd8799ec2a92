//! A4 PDF rendering with the standard Helvetica fonts.
//!
//! Layout (wrapping, spacing, page breaks) is computed here independently of
//! the PDF backend; the `pdf` feature only controls whether the laid-out
//! pages can be serialised.

use crate::markup::{self, Block, Span};

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN_LEFT: f32 = 50.0;
pub const MARGIN_RIGHT: f32 = 50.0;
pub const MARGIN_TOP: f32 = 50.0;
pub const MARGIN_BOTTOM: f32 = 30.0;

const INCH: f32 = 72.0;
const BODY_SIZE: f32 = 11.0;
const BODY_LEADING: f32 = 14.0;
const BODY_SPACE_AFTER: f32 = 6.0;
const BULLET: &str = "•";

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub runs: Vec<Run>,
}

pub type Page = Vec<PlacedLine>;

struct TextStyle {
    size: f32,
    leading: f32,
    bold: bool,
}

const H1: TextStyle = TextStyle { size: 18.0, leading: 22.0, bold: true };
const H2: TextStyle = TextStyle { size: 14.0, leading: 18.0, bold: true };
const H3: TextStyle = TextStyle { size: 12.0, leading: 14.4, bold: true };
const BODY: TextStyle = TextStyle { size: BODY_SIZE, leading: BODY_LEADING, bold: false };

/// Approximate advance width of `text` in points.
fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let factor = if bold { 0.56 } else { 0.52 };
    text.chars().count() as f32 * size * factor
}

struct Layout {
    pages: Vec<Page>,
    current: Page,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - MARGIN_TOP,
        }
    }

    /// Start a fresh page. An empty page is reused rather than emitted.
    fn break_page(&mut self) {
        if !self.current.is_empty() {
            let page = std::mem::take(&mut self.current);
            self.pages.push(page);
        }
        self.y = PAGE_HEIGHT - MARGIN_TOP;
    }

    fn space(&mut self, amount: f32) {
        self.y -= amount;
        if self.y < MARGIN_BOTTOM {
            self.break_page();
        }
    }

    fn place(&mut self, runs: Vec<Run>, style: &TextStyle) {
        if self.y - style.leading < MARGIN_BOTTOM {
            self.break_page();
        }
        self.y -= style.leading;
        self.current.push(PlacedLine {
            x: MARGIN_LEFT,
            y: self.y,
            size: style.size,
            runs,
        });
    }

    /// Greedy word wrap over styled spans.
    fn paragraph(&mut self, spans: &[Span], style: &TextStyle, prefix: Option<&str>) {
        let max_width = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let mut words: Vec<(&str, bool)> = Vec::new();
        if let Some(prefix) = prefix {
            words.push((prefix, false));
        }
        for span in spans {
            let bold = style.bold || span.bold;
            words.extend(span.text.split_whitespace().map(|word| (word, bold)));
        }

        let mut line: Vec<Run> = Vec::new();
        let mut width = 0.0;
        for (word, bold) in words {
            let word_width = text_width(word, style.size, bold);
            let space_width = if line.is_empty() { 0.0 } else { text_width(" ", style.size, bold) };
            if !line.is_empty() && width + space_width + word_width > max_width {
                self.place(std::mem::take(&mut line), style);
                width = 0.0;
            }
            let separator = if line.is_empty() { "" } else { " " };
            match line.last_mut() {
                Some(run) if run.bold == bold => {
                    run.text.push_str(separator);
                    run.text.push_str(word);
                }
                Some(run) => {
                    run.text.push_str(separator);
                    line.push(Run { text: word.to_string(), bold });
                }
                None => line.push(Run { text: word.to_string(), bold }),
            }
            width += if separator.is_empty() { word_width } else { space_width + word_width };
        }
        if !line.is_empty() {
            self.place(line, style);
        }
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Lay out article markup into positioned lines, one vector per page.
pub fn layout(text: &str) -> Vec<Page> {
    let mut layout = Layout::new();
    for block in markup::parse(text) {
        match block {
            Block::Blank => layout.space(0.1 * INCH),
            Block::Heading { level: 1, spans } => {
                layout.paragraph(&spans, &H1, None);
                layout.space(0.15 * INCH);
            }
            Block::Heading { level: 2, spans } => {
                layout.space(0.1 * INCH);
                layout.paragraph(&spans, &H2, None);
                layout.space(0.1 * INCH);
            }
            Block::Heading { spans, .. } => {
                layout.paragraph(&spans, &H3, None);
                layout.space(0.08 * INCH);
            }
            Block::ListItem(spans) => {
                layout.paragraph(&spans, &BODY, Some(BULLET));
                layout.space(BODY_SPACE_AFTER);
            }
            Block::Paragraph(spans) => {
                layout.paragraph(&spans, &BODY, None);
                layout.space(BODY_SPACE_AFTER + 0.08 * INCH);
            }
        }
    }
    layout.finish()
}

/// Encode text for the standard fonts' WinAnsiEncoding.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '§' => 0xA7,
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Render article markup as PDF bytes. `None` when rendering fails.
#[cfg(feature = "pdf")]
pub fn to_pdf(text: &str) -> Option<Vec<u8>> {
    match backend::render(&layout(text)) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::error!("❌ PDF generation failed: {}", e);
            None
        }
    }
}

/// Always `None`: this build has no PDF backend.
#[cfg(not(feature = "pdf"))]
pub fn to_pdf(_text: &str) -> Option<Vec<u8>> {
    tracing::warn!("⚠️ PDF export unavailable: built without the `pdf` feature");
    None
}

#[cfg(feature = "pdf")]
mod backend {
    use lc_core::{Error, Result};
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

    use super::{win_ansi, Page, PAGE_HEIGHT, PAGE_WIDTH};

    fn font(document: &mut Document, base_font: &str) -> ObjectId {
        document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
            "Encoding" => "WinAnsiEncoding",
        })
    }

    fn page_content(page: &Page) -> Content {
        let mut operations = Vec::new();
        for line in page {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
            for run in &line.runs {
                let font = if run.bold { "F2" } else { "F1" };
                operations.push(Operation::new("Tf", vec![font.into(), line.size.into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(win_ansi(&run.text), StringFormat::Hexadecimal)],
                ));
            }
            operations.push(Operation::new("ET", vec![]));
        }
        Content { operations }
    }

    pub(super) fn render(pages: &[Page]) -> Result<Vec<u8>> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let regular = font(&mut document, "Helvetica");
        let bold = font(&mut document, "Helvetica-Bold");
        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular,
                "F2" => bold,
            },
        });

        let mut kids = Vec::with_capacity(pages.len());
        for page in pages {
            let content = page_content(page)
                .encode()
                .map_err(|e| Error::Export(format!("Failed to encode page content: {}", e)))?;
            let content_id = document.add_object(Stream::new(Dictionary::new(), content));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);
        document.compress();

        let mut bytes = Vec::new();
        document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}
