use crate::error::AssetPrepError;
use crate::manifest::Manifest;
use crate::registry::ident::PackageIdent;
use crate::registry::types::PackageDescriptor;
use itertools::Itertools;
use tracing;
use url::Url;

/// Production registry backend. Tests point this at a local server.
pub const DEFAULT_ENDPOINT: &str = "https://services.facepunch.com/sbox";

pub async fn fetch_descriptor(
    client: &reqwest::Client,
    endpoint: &str,
    ident: &PackageIdent,
) -> Result<PackageDescriptor, AssetPrepError> {
    let url = Url::parse(&format!(
        "{}/package/get/{}",
        endpoint.trim_end_matches('/'),
        ident
    ))
    .map_err(|e| AssetPrepError::DescriptorFetch {
        package: ident.to_string(),
        reason: format!("invalid registry endpoint '{endpoint}': {e}"),
    })?;
    tracing::info!("Fetching package descriptor from {}", url);

    let response =
        client
            .get(url)
            .send()
            .await
            .map_err(|e| AssetPrepError::DescriptorFetch {
                package: ident.to_string(),
                reason: e.to_string(),
            })?;

    if !response.status().is_success() {
        return Err(AssetPrepError::DescriptorFetch {
            package: ident.to_string(),
            reason: format!("HTTP status {}", response.status()),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| AssetPrepError::DescriptorFetch {
            package: ident.to_string(),
            reason: e.to_string(),
        })?;

    serde_json::from_str(&body).map_err(|e| AssetPrepError::DescriptorParse {
        package: ident.to_string(),
        reason: e.to_string(),
    })
}

pub async fn fetch_manifest(
    client: &reqwest::Client,
    url: &str,
) -> Result<Manifest, AssetPrepError> {
    tracing::info!("Fetching manifest from {}", url);

    let parsed = Url::parse(url).map_err(|e| AssetPrepError::ManifestFetch {
        url: url.to_string(),
        reason: format!("invalid manifest URL: {e}"),
    })?;

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| AssetPrepError::ManifestFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(AssetPrepError::ManifestFetch {
            url: url.to_string(),
            reason: format!("HTTP status {}", response.status()),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| AssetPrepError::ManifestFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let manifest: Manifest =
        serde_json::from_str(&body).map_err(|e| AssetPrepError::ManifestParse {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    for path in manifest.files.iter().map(|file| &file.path).duplicates() {
        tracing::warn!("Manifest lists {} more than once, last entry wins", path);
    }

    Ok(manifest)
}

/// Resolve a package identifier into its descriptor and manifest.
///
/// A descriptor without a manifest URL cannot drive the pipeline; the manifest
/// endpoint is never contacted in that case.
pub async fn resolve_manifest(
    client: &reqwest::Client,
    endpoint: &str,
    ident: &PackageIdent,
) -> Result<(PackageDescriptor, Manifest), AssetPrepError> {
    let descriptor = fetch_descriptor(client, endpoint, ident).await?;

    let manifest_url = descriptor
        .manifest_url()
        .ok_or_else(|| AssetPrepError::MissingManifestUrl {
            package: ident.to_string(),
        })?
        .to_string();

    let manifest = fetch_manifest(client, &manifest_url).await?;
    tracing::info!(
        "Manifest for {} lists {} files ({} bytes declared)",
        ident,
        manifest.files.len(),
        manifest.total_size
    );

    Ok((descriptor, manifest))
}
