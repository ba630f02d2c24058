use crate::convert::ModelConverter;
use crate::download::{DownloadOptions, DownloadTask, FetchSummary, fetch_all};
use crate::error::AssetPrepError;
use crate::loader::AssetLoader;
use crate::manifest::Manifest;
use crate::primary::select_primary;
use crate::registry::{DEFAULT_ENDPOINT, PackageIdent, resolve_manifest};
use std::path::PathBuf;
use tracing;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Registry service root.
    pub endpoint: String,
    /// Directory that receives one subdirectory per package.
    pub output_dir: PathBuf,
    pub download: DownloadOptions,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_dir: PathBuf::from("downloads"),
            download: DownloadOptions::default(),
        }
    }
}

/// Outcome of the fetch phase: the downloaded tree and the selected primary
/// asset, verified to exist on disk.
#[derive(Debug)]
pub struct FetchedPackage {
    pub ident: PackageIdent,
    pub package_root: PathBuf,
    pub manifest: Manifest,
    /// Manifest-relative path of the primary asset.
    pub primary_rel: String,
    /// Absolute path of the primary asset under `package_root`.
    pub primary_path: PathBuf,
    pub summary: FetchSummary,
}

impl FetchedPackage {
    pub fn loader(&self) -> AssetLoader {
        AssetLoader::new(&self.package_root)
    }
}

/// Resolve, download and select: everything up to the converter boundary.
///
/// Single linear pass; the first failing step aborts the run. Files that
/// landed before a failure stay on disk and satisfy their tasks on the next
/// run via the presence check.
pub async fn fetch_package(
    client: &reqwest::Client,
    ident: &PackageIdent,
    options: &FetchOptions,
) -> Result<FetchedPackage, AssetPrepError> {
    let (descriptor, manifest) = resolve_manifest(client, &options.endpoint, ident).await?;

    let package_root = options.output_dir.join(ident.to_string());
    let tasks = manifest
        .files
        .iter()
        .map(|entry| DownloadTask::from_entry(entry, &package_root))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        "Downloading {} files into {}",
        tasks.len(),
        package_root.display()
    );
    let summary = fetch_all(client, tasks, &options.download).await?;

    let meta = descriptor.meta();
    let primary_rel = select_primary(ident, meta.as_ref(), &manifest)?;

    let loader = AssetLoader::new(&package_root);
    let primary_path =
        loader
            .resolve(&primary_rel)
            .ok_or_else(|| AssetPrepError::PrimaryAssetNotDownloaded {
                path: PathBuf::from(&primary_rel),
            })?;
    if !primary_path.exists() {
        // Selected but never fetched: either metadata named a file outside
        // the manifest, or its download failed in an earlier run.
        return Err(AssetPrepError::PrimaryAssetNotDownloaded { path: primary_path });
    }

    tracing::info!("Primary asset: {}", primary_path.display());

    Ok(FetchedPackage {
        ident: ident.clone(),
        package_root,
        manifest,
        primary_rel,
        primary_path,
        summary,
    })
}

/// Hand the fetched package across the converter boundary.
pub async fn convert_package<C>(
    converter: &C,
    fetched: &FetchedPackage,
) -> Result<(), AssetPrepError>
where
    C: ModelConverter + ?Sized,
{
    let loader = fetched.loader();
    converter.convert(&fetched.primary_path, &loader).await
}
