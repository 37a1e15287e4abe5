pub mod document_flow;
pub mod page_ctx;

pub use document_flow::{DocumentExtraction, DocumentFlow, DocumentStatus};
pub use page_ctx::PageCtx;
