use super::types::{DownloadOptions, DownloadTask, FetchSummary};
use crate::error::AssetPrepError;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use tracing::warn;

enum TaskOutcome {
    Downloaded,
    AlreadyPresent,
}

/// Fetch every task's resource to its destination with at most
/// `options.parallelism` requests in flight, returning only after all tasks
/// have completed.
///
/// A destination that already exists on disk satisfies its task without any
/// network activity; this presence check is the pipeline's only cache. One
/// task's failure does not cancel its siblings: every task runs to
/// completion, failures are collected, and the first one is returned, so a
/// rerun picks up from whatever did land on disk.
pub async fn fetch_all(
    client: &reqwest::Client,
    tasks: Vec<DownloadTask>,
    options: &DownloadOptions,
) -> Result<FetchSummary, AssetPrepError> {
    let semaphore = Arc::new(Semaphore::new(options.parallelism));

    let mut futs = FuturesUnordered::new();
    for task in tasks {
        let client = client.clone();
        let semaphore = semaphore.clone();
        futs.push(async move { fetch_one(&client, &task, semaphore).await });
    }

    let mut summary = FetchSummary::default();
    let mut failures = Vec::new();
    while let Some(result) = futs.next().await {
        match result {
            Ok(TaskOutcome::Downloaded) => summary.downloaded += 1,
            Ok(TaskOutcome::AlreadyPresent) => summary.skipped += 1,
            Err(err) => {
                warn!("Download failed: {}", err);
                failures.push(err);
            }
        }
    }

    tracing::info!(
        "Fetched {} files, {} already present, {} failed",
        summary.downloaded,
        summary.skipped,
        failures.len()
    );

    match failures.into_iter().next() {
        Some(first) => Err(first),
        None => Ok(summary),
    }
}

async fn fetch_one(
    client: &reqwest::Client,
    task: &DownloadTask,
    semaphore: Arc<Semaphore>,
) -> Result<TaskOutcome, AssetPrepError> {
    if task.dest.exists() {
        tracing::debug!(url = %task.url, dest = %task.dest.display(), "Already present, skipping");
        return Ok(TaskOutcome::AlreadyPresent);
    }

    let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|e| eyre::eyre!("download gate closed: {e}"))?;

    tracing::debug!(url = %task.url, dest = %task.dest.display(), "Downloading");

    if let Some(parent) = task.dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AssetPrepError::Download {
                url: task.url.clone(),
                reason: format!("failed to create directory {}: {}", parent.display(), e),
            })?;
    }

    let response = client
        .get(&task.url)
        .send()
        .await
        .map_err(|e| AssetPrepError::Download {
            url: task.url.clone(),
            reason: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(AssetPrepError::Download {
            url: task.url.clone(),
            reason: format!("HTTP status {}", response.status()),
        });
    }

    // Stream the body straight to disk; manifests routinely list files far
    // larger than we want to hold in memory.
    let file = tokio::fs::File::create(&task.dest)
        .await
        .map_err(|e| AssetPrepError::Download {
            url: task.url.clone(),
            reason: format!("failed to create {}: {}", task.dest.display(), e),
        })?;
    let mut writer = tokio::io::BufWriter::new(file);

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AssetPrepError::Download {
            url: task.url.clone(),
            reason: e.to_string(),
        })?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| AssetPrepError::Download {
                url: task.url.clone(),
                reason: format!("failed to write {}: {}", task.dest.display(), e),
            })?;
    }

    writer.flush().await.map_err(|e| AssetPrepError::Download {
        url: task.url.clone(),
        reason: format!("failed to flush {}: {}", task.dest.display(), e),
    })?;

    Ok(TaskOutcome::Downloaded)
}
