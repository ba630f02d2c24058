use crate::cli::params::ConvertParams;
use crate::error::AssetPrepError;
use crate::pipeline::{convert_package, fetch_package};
use tracing;

pub async fn run_convert(params: ConvertParams) -> Result<(), AssetPrepError> {
    let ConvertParams {
        ident,
        options,
        converter,
    } = params;

    tracing::info!("Fetching package {}", ident);
    let client = reqwest::Client::new();
    let fetched = fetch_package(&client, &ident, &options).await?;

    convert_package(&converter, &fetched).await?;

    tracing::info!("Converted {}", fetched.primary_path.display());
    Ok(())
}
