use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong talking to MangaDex or writing pages.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection failure, or the retry middleware gave up.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// Building the client or reading a response body failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status { url: Url, status: StatusCode },

    /// The body was not the JSON we expected.
    #[error("unexpected response shape: {0}")]
    DataShape(#[from] serde_json::Error),

    #[error("{0} cannot be used as a base URL")]
    BaseUrl(Url),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
