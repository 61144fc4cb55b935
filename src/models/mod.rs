pub mod chapter;
pub mod cli;

pub use chapter::{ChapterMetadata, ChapterReport, Cursor, RunSummary, StopReason};
pub use cli::Cli;
