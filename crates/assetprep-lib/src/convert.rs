use crate::error::AssetPrepError;
use crate::loader::AssetLoader;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// External collaborator that turns the primary compiled asset into another
/// format.
///
/// The pipeline's responsibility ends at this boundary: it supplies the
/// primary file's local path and a loader over the package root, and treats
/// whatever the converter does with them as opaque.
#[async_trait]
pub trait ModelConverter {
    async fn convert(&self, primary: &Path, loader: &AssetLoader) -> Result<(), AssetPrepError>;
}

/// Adapter that drives an external converter executable.
///
/// The command receives the primary file's absolute path as its final
/// argument and runs with the package root as its working directory, so
/// relative resource references resolve against the downloaded tree.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl ModelConverter for CommandConverter {
    async fn convert(&self, primary: &Path, loader: &AssetLoader) -> Result<(), AssetPrepError> {
        tracing::info!("Converting {} with {}", primary.display(), self.program);

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(primary)
            .current_dir(loader.root())
            .status()
            .await
            .map_err(|e| AssetPrepError::Conversion {
                path: primary.to_path_buf(),
                reason: format!("failed to launch {}: {}", self.program, e),
            })?;

        if !status.success() {
            return Err(AssetPrepError::Conversion {
                path: primary.to_path_buf(),
                reason: format!("{} exited with {}", self.program, status),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_command_converter_succeeds_on_zero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path());
        let converter = CommandConverter::new("true", vec![]);

        let result = converter
            .convert(&dir.path().join("primary.vmdl_c"), &loader)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_command_converter_fails_on_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path());
        let converter = CommandConverter::new("false", vec![]);

        let err = converter
            .convert(&dir.path().join("primary.vmdl_c"), &loader)
            .await
            .unwrap_err();
        assert!(matches!(err, AssetPrepError::Conversion { .. }));
    }

    #[tokio::test]
    async fn test_command_converter_fails_on_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path());
        let converter = CommandConverter::new("assetprep-no-such-converter", vec![]);

        let err = converter
            .convert(&dir.path().join("primary.vmdl_c"), &loader)
            .await
            .unwrap_err();
        assert!(matches!(err, AssetPrepError::Conversion { .. }));
    }
}
