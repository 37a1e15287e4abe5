pub mod pdf_pages;

pub use pdf_pages::{MemoryPages, PageTextProvider, PdfDirectory};
