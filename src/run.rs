use crate::configuration::Settings;
use crate::download::download_chapter;
use crate::mangadex_client::MangaDexClient;
use crate::models::{Cursor, RunSummary, StopReason};
use log::{debug, info, warn};
use resolve_path::PathResolveExt;
use std::path::Path;
use tokio::{fs, time};

/// Outcome of one pass through the loop.
enum Step {
    Next(Cursor),
    Done(StopReason),
}

pub async fn run(settings: Settings) -> anyhow::Result<RunSummary> {
    info!("Output Directory: {}", settings.output_directory);
    let base_path = settings.output_directory.resolve().into_owned();
    fs::create_dir_all(&base_path).await?;

    debug!("Settings {:?}", settings);

    let client = MangaDexClient::new(&settings)?;
    let mut cursor = Cursor::new(settings.start_chapter, settings.start_number);
    let mut summary = RunSummary {
        chapters: 0,
        pages_written: 0,
        pages_failed: 0,
        last: cursor,
        stop: StopReason::NoImages,
    };

    loop {
        summary.last = cursor;
        match step(&client, &settings, &base_path, cursor, &mut summary).await? {
            Step::Next(next) => {
                cursor = next;
                time::sleep(settings.chapter_delay()).await;
            }
            Step::Done(reason) => {
                summary.stop = reason;
                break;
            }
        }
    }

    info!(
        "Finished after {} chapter(s), {} page(s) written, {} failed: {}",
        summary.chapters, summary.pages_written, summary.pages_failed, summary.stop
    );
    Ok(summary)
}

async fn step(
    client: &MangaDexClient,
    settings: &Settings,
    base_path: &Path,
    cursor: Cursor,
    summary: &mut RunSummary,
) -> anyhow::Result<Step> {
    if limit_reached(settings, summary) {
        return Ok(Step::Done(StopReason::ChapterLimit));
    }

    let folder = cursor.folder(base_path);
    info!("Downloading {}...", folder.display());

    let urls = client.image_manifest(cursor.chapter_id).await;
    if urls.is_empty() {
        warn!("No images found for {}", cursor.chapter_id);
        return Ok(Step::Done(StopReason::NoImages));
    }

    let report = download_chapter(client.http(), &urls, &folder).await?;
    if report.failed > 0 {
        warn!(
            "{} is missing {} of {} page(s)",
            folder.display(),
            report.failed,
            urls.len()
        );
    }
    summary.chapters += 1;
    summary.pages_written += report.written;
    summary.pages_failed += report.failed;

    if limit_reached(settings, summary) {
        return Ok(Step::Done(StopReason::ChapterLimit));
    }

    let Some(metadata) = client.chapter_metadata(cursor.chapter_id).await else {
        return Ok(Step::Done(StopReason::NoWork));
    };
    debug!(
        "Chapter {} is number {} of manga {}",
        cursor.chapter_id,
        metadata.number.as_deref().unwrap_or("none"),
        metadata.work_id
    );

    let Some(next) = client.next_chapter(metadata.work_id, cursor.chapter_id).await else {
        info!("No next chapter found. Download complete!");
        return Ok(Step::Done(StopReason::NoNextChapter));
    };
    if next == cursor.chapter_id {
        warn!("Chapter {} lists itself as the next chapter", next);
        return Ok(Step::Done(StopReason::NoNextChapter));
    }

    Ok(Step::Next(cursor.advance(next)))
}

fn limit_reached(settings: &Settings, summary: &RunSummary) -> bool {
    let reached = settings
        .max_chapters
        .is_some_and(|max| summary.chapters >= max);
    if reached {
        info!("Reached the limit of {} chapter(s)", summary.chapters);
    }
    reached
}
