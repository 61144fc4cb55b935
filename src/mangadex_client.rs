use crate::configuration::{ImageQuality, ListingOrder, Settings};
use crate::error::{Error, Result};
use crate::mangadex::{AtHomeServer, ChapterList, ChapterResponse};
use crate::models::ChapterMetadata;
use log::{debug, error, warn};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

pub const API_URL: &str = "https://api.mangadex.org";
/// Largest page the chapter listing endpoint hands out.
pub const PAGE_SIZE: u32 = 100;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client that retries transient failures with exponential backoff.
pub fn http_client(max_retries: u32) -> Result<ClientWithMiddleware> {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// `base` with `segments` appended to its path, keeping any path it already has.
pub fn with_segments<S: AsRef<str>>(base: &Url, segments: &[S]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::BaseUrl(base.clone()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub struct MangaDexClient {
    http: ClientWithMiddleware,
    api_url: Url,
    language: String,
    order: ListingOrder,
    quality: ImageQuality,
}

impl MangaDexClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            http: http_client(settings.max_retries)?,
            api_url: settings.api_url.clone(),
            language: settings.language.clone(),
            order: settings.order,
            quality: settings.quality,
        })
    }

    pub fn http(&self) -> &ClientWithMiddleware {
        &self.http
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { url, status });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Owning manga and chapter number of `chapter_id`. `Ok(None)` when the
    /// chapter has no manga relationship.
    pub async fn try_chapter_metadata(&self, chapter_id: Uuid) -> Result<Option<ChapterMetadata>> {
        let id = chapter_id.to_string();
        let url = with_segments(&self.api_url, &["chapter", id.as_str()])?;
        let response: ChapterResponse = self.get_json(url).await?;
        let data = response.data;

        Ok(data.manga_id().map(|work_id| ChapterMetadata {
            work_id,
            number: data.attributes.chapter,
        }))
    }

    pub async fn chapter_metadata(&self, chapter_id: Uuid) -> Option<ChapterMetadata> {
        match self.try_chapter_metadata(chapter_id).await {
            Ok(Some(metadata)) => Some(metadata),
            Ok(None) => {
                warn!("Chapter {} does not belong to any manga", chapter_id);
                None
            }
            Err(e) => {
                error!("Error accessing chapter {}: {}", chapter_id, e);
                None
            }
        }
    }

    fn listing_url(&self, manga_id: Uuid, offset: u32) -> Result<Url> {
        let mut url = with_segments(&self.api_url, &["chapter"])?;
        url.query_pairs_mut()
            .append_pair("manga", &manga_id.to_string())
            .append_pair("translatedLanguage[]", &self.language)
            .append_pair(self.order.query_key(), "asc")
            .append_pair("limit", &PAGE_SIZE.to_string())
            .append_pair("offset", &offset.to_string());
        Ok(url)
    }

    /// Walks the manga's chapter listing page by page and returns the chapter
    /// right after `current`. The first listing entry matching `current` wins;
    /// repeats of `current` right after it are skipped.
    pub async fn try_next_chapter(&self, manga_id: Uuid, current: Uuid) -> Result<Option<Uuid>> {
        let mut offset: u32 = 0;
        let mut found = false;
        loop {
            let page: ChapterList = self.get_json(self.listing_url(manga_id, offset)?).await?;

            for chapter in &page.data {
                if chapter.id == current {
                    found = true;
                } else if found {
                    return Ok(Some(chapter.id));
                }
            }

            offset += page.data.len() as u32;
            if page.data.is_empty() || offset >= page.total {
                return Ok(None);
            }
        }
    }

    pub async fn next_chapter(&self, manga_id: Uuid, current: Uuid) -> Option<Uuid> {
        match self.try_next_chapter(manga_id, current).await {
            Ok(next) => next,
            Err(e) => {
                error!("Error fetching next chapter of manga {}: {}", manga_id, e);
                None
            }
        }
    }

    /// Page URLs of `chapter_id` in reading order.
    pub async fn try_image_manifest(&self, chapter_id: Uuid) -> Result<Vec<Url>> {
        let id = chapter_id.to_string();
        let url = with_segments(&self.api_url, &["at-home", "server", id.as_str()])?;
        let at_home: AtHomeServer = self.get_json(url).await?;

        let quality = self.quality.path_segment();
        let chapter = &at_home.chapter;
        let files = match self.quality {
            ImageQuality::Data => &chapter.data,
            ImageQuality::DataSaver => &chapter.data_saver,
        };

        files
            .iter()
            .map(|file| {
                with_segments(
                    &at_home.base_url,
                    &[quality, chapter.hash.as_str(), file.as_str()],
                )
            })
            .collect()
    }

    pub async fn image_manifest(&self, chapter_id: Uuid) -> Vec<Url> {
        match self.try_image_manifest(chapter_id).await {
            Ok(urls) => urls,
            Err(e) => {
                error!("Error accessing image API for {}: {}", chapter_id, e);
                Vec::new()
            }
        }
    }
}
