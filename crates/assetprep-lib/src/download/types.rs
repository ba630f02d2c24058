use crate::error::AssetPrepError;
use crate::manifest::FileEntry;
use std::path::{Path, PathBuf};

/// One admitted fetch: source URL paired with its absolute destination.
#[derive(Clone, Debug)]
pub struct DownloadTask {
    pub url: String,
    pub dest: PathBuf,
}

impl DownloadTask {
    pub fn from_entry(entry: &FileEntry, package_root: &Path) -> Result<Self, AssetPrepError> {
        Ok(Self {
            url: entry.url.clone(),
            dest: entry.local_path(package_root)?,
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DownloadOptions {
    /// Maximum number of simultaneous in-flight fetches.
    pub parallelism: usize,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self { parallelism: 8 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub downloaded: usize,
    /// Destinations that already existed on disk and were not re-fetched.
    pub skipped: usize,
}
