use assetprep_lib::cli::{
    ResolvedCommand, parse_args, resolve_command, run_convert, run_fetch, run_manifest,
};
use assetprep_lib::error::AssetPrepError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), AssetPrepError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Manifest(params) => run_manifest(params).await?,
        ResolvedCommand::Fetch(params) => run_fetch(params).await?,
        ResolvedCommand::Convert(params) => run_convert(params).await?,
    }

    Ok(())
}
