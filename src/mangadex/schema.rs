use serde::Deserialize;
use url::Url;
use uuid::Uuid;

/// `GET /chapter/{id}`
#[derive(Deserialize, Debug)]
pub struct ChapterResponse {
    pub data: ChapterObject,
}

#[derive(Deserialize, Debug)]
pub struct ChapterObject {
    pub id: Uuid,
    #[serde(default)]
    pub attributes: ChapterAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChapterAttributes {
    pub chapter: Option<String>,
    pub volume: Option<String>,
    pub title: Option<String>,
    pub translated_language: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Relationship {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub rel_type: String,
}

impl ChapterObject {
    pub fn manga_id(&self) -> Option<Uuid> {
        self.relationships
            .iter()
            .find(|r| r.rel_type == "manga")
            .map(|r| r.id)
    }
}

/// `GET /chapter?manga=...`, one page of the listing.
#[derive(Deserialize, Debug)]
pub struct ChapterList {
    pub data: Vec<ChapterObject>,
    pub total: u32,
}

/// `GET /at-home/server/{id}`
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeServer {
    pub base_url: Url,
    pub chapter: AtHomeChapter,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeChapter {
    pub hash: String,
    pub data: Vec<String>,
    #[serde(default)]
    pub data_saver: Vec<String>,
}
