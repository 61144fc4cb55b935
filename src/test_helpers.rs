//! Shared fixtures for tests that talk to a mock MangaDex.
use crate::configuration::{ImageQuality, ListingOrder, Settings};
use serde_json::{json, Value};
use std::path::Path;
use url::Url;
use uuid::{uuid, Uuid};
use wiremock::MockServer;

pub const MANGA: Uuid = uuid!("69060a67-1d4e-4110-9d29-838bfd99917f");
pub const CHAPTER_A: Uuid = uuid!("a5e4b6c1-7f1d-4c3e-9b0a-2f3d4e5f6a7b");
pub const CHAPTER_B: Uuid = uuid!("0f1e2d3c-4b5a-4968-8776-655443322110");
pub const CHAPTER_C: Uuid = uuid!("b77668ed-0810-4327-9684-46ca371e370e");

pub fn settings(server: &MockServer, output: &Path) -> Settings {
    Settings {
        output_directory: output.to_string_lossy().into_owned(),
        start_chapter: CHAPTER_A,
        start_number: 1,
        api_url: Url::parse(&server.uri()).unwrap(),
        language: "en".into(),
        order: ListingOrder::CreatedAt,
        quality: ImageQuality::Data,
        chapter_delay_ms: 0,
        max_retries: 0,
        max_chapters: None,
    }
}

pub fn chapter_body(id: Uuid, manga: Option<Uuid>, number: Option<&str>) -> Value {
    let relationships: Vec<Value> = manga
        .map(|m| json!({"id": m, "type": "manga"}))
        .into_iter()
        .collect();
    json!({
        "result": "ok",
        "response": "entity",
        "data": {
            "id": id,
            "type": "chapter",
            "attributes": {"chapter": number, "translatedLanguage": "en"},
            "relationships": relationships,
        }
    })
}

pub fn listing_body(ids: &[Uuid], offset: u32, total: u32) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "type": "chapter", "attributes": {}}))
        .collect();
    json!({
        "result": "ok",
        "response": "collection",
        "data": data,
        "limit": 100,
        "offset": offset,
        "total": total,
    })
}

pub fn at_home_body(base_url: &str, hash: &str, files: &[&str]) -> Value {
    json!({
        "result": "ok",
        "baseUrl": base_url,
        "chapter": {
            "hash": hash,
            "data": files,
            "dataSaver": files.iter().map(|f| format!("s-{}", f)).collect::<Vec<_>>(),
        }
    })
}
