use crate::cli::params::FetchParams;
use crate::error::AssetPrepError;
use crate::pipeline::fetch_package;
use tracing;

pub async fn run_fetch(params: FetchParams) -> Result<(), AssetPrepError> {
    let FetchParams { ident, options } = params;

    tracing::info!("Fetching package {}", ident);
    let client = reqwest::Client::new();
    let fetched = fetch_package(&client, &ident, &options).await?;

    tracing::info!(
        "Fetched {} files ({} already present) into {}",
        fetched.summary.downloaded,
        fetched.summary.skipped,
        fetched.package_root.display()
    );
    println!("{}", fetched.primary_path.display());

    Ok(())
}
