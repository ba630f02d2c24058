use crate::cli::params::ManifestParams;
use crate::error::AssetPrepError;
use crate::registry::resolve_manifest;
use tracing;

pub async fn run_manifest(params: ManifestParams) -> Result<(), AssetPrepError> {
    let ManifestParams { ident, endpoint } = params;

    let client = reqwest::Client::new();
    let (_descriptor, manifest) = resolve_manifest(&client, &endpoint, &ident).await?;

    tracing::info!("Resolved manifest for {}", ident);
    println!("{}", serde_json::to_string_pretty(&manifest)?);

    Ok(())
}
