use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// What the chapter endpoint tells us about a chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterMetadata {
    pub work_id: Uuid,
    /// Chapter number as the server sends it, e.g. `"12.5"`. Oneshots have none.
    pub number: Option<String>,
}

/// Position in the chapter chain. Each step produces a new cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub chapter_id: Uuid,
    pub counter: u32,
}

impl Cursor {
    pub fn new(chapter_id: Uuid, counter: u32) -> Self {
        Self {
            chapter_id,
            counter,
        }
    }

    pub fn advance(self, next_chapter: Uuid) -> Self {
        Self {
            chapter_id: next_chapter,
            counter: self.counter + 1,
        }
    }

    pub fn folder_name(&self) -> String {
        format!("Chapter_{:02}", self.counter)
    }

    pub fn folder(&self, base: &Path) -> PathBuf {
        base.join(self.folder_name())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChapterReport {
    pub written: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The image manifest was empty or could not be fetched.
    NoImages,
    /// Chapter metadata had no owning manga.
    NoWork,
    NoNextChapter,
    ChapterLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::NoImages => "no images found",
            StopReason::NoWork => "chapter has no manga",
            StopReason::NoNextChapter => "no next chapter",
            StopReason::ChapterLimit => "chapter limit reached",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub chapters: u32,
    pub pages_written: usize,
    pub pages_failed: usize,
    pub last: Cursor,
    pub stop: StopReason,
}
