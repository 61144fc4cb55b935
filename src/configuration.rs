use crate::models::Cli;
use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

pub const ENV_PREFIX: &str = "MANGA_CHAIN";

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub output_directory: String,
    pub start_chapter: Uuid,
    #[serde(default = "default_start_number")]
    pub start_number: u32,
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub order: ListingOrder,
    #[serde(default)]
    pub quality: ImageQuality,
    #[serde(default = "default_chapter_delay_ms")]
    pub chapter_delay_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    pub max_chapters: Option<u32>,
}

/// Field the chapter listing is sorted on, ascending.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingOrder {
    #[default]
    CreatedAt,
    Chapter,
}

impl ListingOrder {
    pub fn query_key(self) -> &'static str {
        match self {
            ListingOrder::CreatedAt => "order[createdAt]",
            ListingOrder::Chapter => "order[chapter]",
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageQuality {
    #[default]
    Data,
    DataSaver,
}

impl ImageQuality {
    pub fn path_segment(self) -> &'static str {
        match self {
            ImageQuality::Data => "data",
            ImageQuality::DataSaver => "data-saver",
        }
    }
}

fn default_start_number() -> u32 {
    1
}

fn default_api_url() -> Url {
    Url::parse(crate::mangadex_client::API_URL).expect("API_URL is a valid URL")
}

fn default_language() -> String {
    "en".into()
}

fn default_chapter_delay_ms() -> u64 {
    1000
}

fn default_max_retries() -> u32 {
    3
}

impl Settings {
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        Self::load(config_file, None)
    }

    /// Loads `config_file` (optional), then `MANGA_CHAIN_*` variables, then any
    /// values given on the command line.
    pub fn load(config_file: &str, cli: Option<&Cli>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX));

        if let Some(cli) = cli {
            if let Some(chapter) = cli.start_chapter {
                builder = builder.set_override("start_chapter", chapter.to_string())?;
            }
            if let Some(dir) = &cli.output_directory {
                builder = builder.set_override("output_directory", dir.as_str())?;
            }
            if let Some(max) = cli.max_chapters {
                builder = builder.set_override("max_chapters", i64::from(max))?;
            }
        }

        builder.build()?.try_deserialize()
    }

    pub fn chapter_delay(&self) -> Duration {
        Duration::from_millis(self.chapter_delay_ms)
    }
}
