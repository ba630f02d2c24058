use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetPrepError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid package identifier: {details}")]
    InvalidPackageIdent { details: String },

    #[error("Failed to fetch package descriptor for {package}: {reason}")]
    DescriptorFetch { package: String, reason: String },

    #[error("Failed to parse package descriptor for {package}: {reason}")]
    DescriptorParse { package: String, reason: String },

    #[error("Package {package} declares no manifest URL")]
    MissingManifestUrl { package: String },

    #[error("Failed to fetch manifest from {url}: {reason}")]
    ManifestFetch { url: String, reason: String },

    #[error("Failed to parse manifest from {url}: {reason}")]
    ManifestParse { url: String, reason: String },

    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("No primary asset found in package {package}")]
    NoPrimaryAsset { package: String },

    #[error("Primary asset {path} was not downloaded")]
    PrimaryAssetNotDownloaded { path: PathBuf },

    #[error("Conversion of {path} failed: {reason}")]
    Conversion { path: PathBuf, reason: String },

    #[error("Invalid command line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
