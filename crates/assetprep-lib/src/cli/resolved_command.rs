use crate::cli::args::Command;
use crate::cli::params::{ConvertParams, FetchParams, ManifestParams};
use crate::config::{Config, load_config};
use crate::convert::CommandConverter;
use crate::download::DownloadOptions;
use crate::error::AssetPrepError;
use crate::pipeline::FetchOptions;
use crate::registry::PackageIdent;
use std::path::PathBuf;

const DEFAULT_OUTPUT_DIR: &str = "downloads";

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Manifest(ManifestParams),
    Fetch(FetchParams),
    Convert(ConvertParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, AssetPrepError> {
    match command {
        Command::Manifest {
            package,
            config_path,
            endpoint,
        } => {
            let app_config = load_optional_config(config_path.as_deref())?;
            let ident = PackageIdent::parse(&package)?;

            Ok(ResolvedCommand::Manifest(ManifestParams {
                ident,
                endpoint: endpoint.unwrap_or_else(|| app_config.registry.endpoint.clone()),
            }))
        }
        Command::Fetch {
            package,
            config_path,
            endpoint,
            output_dir,
            parallelism,
        } => {
            let app_config = load_optional_config(config_path.as_deref())?;
            let ident = PackageIdent::parse(&package)?;
            let options =
                resolve_fetch_options(&app_config, endpoint, output_dir, parallelism)?;

            Ok(ResolvedCommand::Fetch(FetchParams { ident, options }))
        }
        Command::Convert {
            package,
            config_path,
            endpoint,
            output_dir,
            parallelism,
            converter_cmd,
            converter_args,
        } => {
            let app_config = load_optional_config(config_path.as_deref())?;
            let ident = PackageIdent::parse(&package)?;
            let options =
                resolve_fetch_options(&app_config, endpoint, output_dir, parallelism)?;

            let converter = match (converter_cmd, app_config.converter.clone()) {
                (Some(cmd), _) => CommandConverter::new(cmd, converter_args),
                (None, Some(converter_config)) => {
                    let mut args = converter_config.args;
                    args.extend(converter_args);
                    CommandConverter::new(converter_config.command, args)
                }
                (None, None) => {
                    return Err(AssetPrepError::CliArgumentValidation {
                        details: "No converter command provided. Pass --converter-cmd or configure converter.command.".to_string(),
                    });
                }
            };

            Ok(ResolvedCommand::Convert(ConvertParams {
                ident,
                options,
                converter,
            }))
        }
    }
}

fn load_optional_config(config_path: Option<&str>) -> Result<Config, AssetPrepError> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}

fn resolve_fetch_options(
    app_config: &Config,
    endpoint: Option<String>,
    output_dir: Option<String>,
    parallelism: Option<usize>,
) -> Result<FetchOptions, AssetPrepError> {
    let parallelism = parallelism.unwrap_or(app_config.download.parallelism);
    if parallelism == 0 {
        return Err(AssetPrepError::CliArgumentValidation {
            details: "parallelism must be greater than 0.".to_string(),
        });
    }

    let output_dir = output_dir
        .map(PathBuf::from)
        .or_else(|| app_config.output.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    Ok(FetchOptions {
        endpoint: endpoint.unwrap_or_else(|| app_config.registry.endpoint.clone()),
        output_dir,
        download: DownloadOptions { parallelism },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DEFAULT_ENDPOINT;

    #[test]
    fn test_fetch_defaults_without_config_file() {
        let command = Command::Fetch {
            package: "facepunch.crate".to_string(),
            config_path: None,
            endpoint: None,
            output_dir: None,
            parallelism: None,
        };

        let ResolvedCommand::Fetch(params) = resolve_command(command).unwrap() else {
            panic!("resolved command type mismatch");
        };
        assert_eq!(params.ident.to_string(), "facepunch.crate");
        assert_eq!(params.options.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(params.options.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(params.options.download.parallelism, 8);
    }

    #[test]
    fn test_fetch_rejects_zero_parallelism() {
        let command = Command::Fetch {
            package: "facepunch.crate".to_string(),
            config_path: None,
            endpoint: None,
            output_dir: None,
            parallelism: Some(0),
        };

        let err = resolve_command(command).unwrap_err();
        assert!(matches!(err, AssetPrepError::CliArgumentValidation { .. }));
    }

    #[test]
    fn test_fetch_rejects_invalid_ident() {
        let command = Command::Fetch {
            package: "no-separator".to_string(),
            config_path: None,
            endpoint: None,
            output_dir: None,
            parallelism: None,
        };

        let err = resolve_command(command).unwrap_err();
        assert!(matches!(err, AssetPrepError::InvalidPackageIdent { .. }));
    }

    #[test]
    fn test_convert_requires_a_converter_command() {
        let command = Command::Convert {
            package: "facepunch.crate".to_string(),
            config_path: None,
            endpoint: None,
            output_dir: None,
            parallelism: None,
            converter_cmd: None,
            converter_args: vec![],
        };

        let err = resolve_command(command).unwrap_err();
        assert!(matches!(err, AssetPrepError::CliArgumentValidation { .. }));
    }
}
