//! Response bodies of the MangaDex endpoints we read. Only the fields the
//! downloader consumes are modelled; everything else is ignored.
pub mod schema;

pub use schema::{AtHomeServer, ChapterList, ChapterResponse};
