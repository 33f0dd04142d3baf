pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod inference;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod storage;

pub use error::{DirectiveError, Result};
pub use record::{AnalysisRecord, Team};
