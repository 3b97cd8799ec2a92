//! Export of finished articles to HTML and PDF.

pub mod html;
pub mod markup;
pub mod pdf;

pub use html::to_html;
pub use pdf::to_pdf;

/// Whether this build can produce PDF output.
pub const fn pdf_available() -> bool {
    cfg!(feature = "pdf")
}
