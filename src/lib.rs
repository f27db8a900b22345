pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod subgraph;
pub mod tagging;
pub mod types;
pub mod validation;

pub use error::TagError;
pub use pipeline::TagPipeline;
pub use types::{Market, TagReport, TaggingRecord, Token};
