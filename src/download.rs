use crate::error::{Error, Result};
use crate::models::ChapterReport;
use futures::StreamExt;
use log::{debug, error, info};
use reqwest_middleware::ClientWithMiddleware;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};
use url::Url;

pub fn page_filename(index: usize) -> String {
    format!("{:02}.jpg", index)
}

/// Downloads `urls` in order into `folder` as `01.jpg`, `02.jpg`, ...
///
/// A page that fails is logged and skipped, so a chapter may end up with gaps.
/// Only failing to create `folder` is an error.
pub async fn download_chapter(
    http: &ClientWithMiddleware,
    urls: &[Url],
    folder: &Path,
) -> Result<ChapterReport> {
    fs::create_dir_all(folder).await?;

    let mut report = ChapterReport::default();
    for (i, url) in urls.iter().enumerate() {
        let filename = page_filename(i + 1);
        let path = folder.join(&filename);

        debug!("Getting page #{}: {}", i + 1, url);
        match download_page(http, url, &path).await {
            Ok(()) => {
                info!("Downloaded: {} ({})", filename, folder.display());
                report.written += 1;
            }
            Err(e) => {
                error!("Error downloading {}: {}", url, e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

async fn download_page(http: &ClientWithMiddleware, url: &Url, path: &Path) -> Result<()> {
    let response = http.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.clone(),
            status,
        });
    }

    // Write next to the target so a broken stream never leaves a truncated page
    let part = part_path(path);
    let written = match write_body(response, &part).await {
        Ok(()) => fs::rename(&part, path).await.map_err(Error::from),
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        if let Err(rm) = fs::remove_file(&part).await {
            debug!("Could not remove {}: {}", part.display(), rm);
        }
        return Err(e);
    }

    Ok(())
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

async fn write_body(response: reqwest::Response, path: &Path) -> Result<()> {
    let mut file = fs::File::create(path).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mangadex_client::http_client;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_page(server: &MockServer, name: &str, status: u16, body: &[u8]) -> Url {
        Mock::given(method("GET"))
            .and(path(format!("/data/hash/{}", name)))
            .respond_with(ResponseTemplate::new(status).set_body_bytes(body.to_vec()))
            .mount(server)
            .await;
        Url::parse(&format!("{}/data/hash/{}", server.uri(), name)).unwrap()
    }

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn filenames_are_zero_padded() {
        assert_eq!("01.jpg", page_filename(1));
        assert_eq!("10.jpg", page_filename(10));
        assert_eq!("123.jpg", page_filename(123));
    }

    #[tokio::test]
    async fn writes_every_page_in_order() {
        let server = MockServer::start().await;
        let mut urls = Vec::new();
        for n in 1..=12 {
            let body = format!("page {}", n);
            urls.push(mount_page(&server, &format!("p{}.png", n), 200, body.as_bytes()).await);
        }
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("Chapter_01");

        let http = http_client(0).unwrap();
        let report = download_chapter(&http, &urls, &folder).await.unwrap();

        assert_eq!(ChapterReport { written: 12, failed: 0 }, report);
        let expected: Vec<String> = (1..=12).map(page_filename).collect();
        assert_eq!(expected, files_in(&folder));
        assert_eq!("page 3", std::fs::read_to_string(folder.join("03.jpg")).unwrap());
        assert_eq!("page 12", std::fs::read_to_string(folder.join("12.jpg")).unwrap());
    }

    #[tokio::test]
    async fn failed_page_is_skipped() {
        let server = MockServer::start().await;
        let urls = vec![
            mount_page(&server, "1.jpg", 200, b"one").await,
            mount_page(&server, "2.jpg", 500, b"").await,
            mount_page(&server, "3.jpg", 200, b"three").await,
        ];
        let dir = TempDir::new().unwrap();

        let http = http_client(0).unwrap();
        let report = download_chapter(&http, &urls, dir.path()).await.unwrap();

        assert_eq!(ChapterReport { written: 2, failed: 1 }, report);
        assert_eq!(vec!["01.jpg", "03.jpg"], files_in(dir.path()));
        assert_eq!("three", std::fs::read_to_string(dir.path().join("03.jpg")).unwrap());
    }

    #[tokio::test]
    async fn unreachable_host_is_skipped() {
        let urls = vec![Url::parse("http://127.0.0.1:9/data/hash/1.jpg").unwrap()];
        let dir = TempDir::new().unwrap();

        let http = http_client(0).unwrap();
        let report = download_chapter(&http, &urls, dir.path()).await.unwrap();

        assert_eq!(ChapterReport { written: 0, failed: 1 }, report);
        assert!(files_in(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn existing_pages_are_overwritten() {
        let server = MockServer::start().await;
        let urls = vec![mount_page(&server, "1.jpg", 200, b"fresh").await];
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("01.jpg"), "stale").unwrap();

        let http = http_client(0).unwrap();
        download_chapter(&http, &urls, dir.path()).await.unwrap();

        assert_eq!("fresh", std::fs::read_to_string(dir.path().join("01.jpg")).unwrap());
    }

    #[tokio::test]
    async fn failed_rename_leaves_no_part_file() {
        let server = MockServer::start().await;
        let urls = vec![mount_page(&server, "1.jpg", 200, b"one").await];
        let dir = TempDir::new().unwrap();
        // A directory in the way makes the final rename fail
        std::fs::create_dir(dir.path().join("01.jpg")).unwrap();

        let http = http_client(0).unwrap();
        let report = download_chapter(&http, &urls, dir.path()).await.unwrap();

        assert_eq!(ChapterReport { written: 0, failed: 1 }, report);
        assert_eq!(vec!["01.jpg"], files_in(dir.path()));
        assert!(!dir.path().join("01.jpg.part").exists());
    }

    #[tokio::test]
    async fn empty_manifest_creates_only_the_folder() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("Chapter_07");

        let http = http_client(0).unwrap();
        let report = download_chapter(&http, &[], &folder).await.unwrap();

        assert_eq!(ChapterReport::default(), report);
        assert!(folder.is_dir());
        assert!(files_in(&folder).is_empty());
    }
}
