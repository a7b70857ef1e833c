pub mod document_flow;
pub mod metadata_flow;
pub mod paper_ctx;

pub use document_flow::{DocumentFlow, RenderResult};
pub use metadata_flow::{Fixes, MetadataFlow};
pub use paper_ctx::PaperCtx;
