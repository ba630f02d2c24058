use crate::error::AssetPrepError;
use crate::manifest::Manifest;
use crate::registry::{PackageIdent, PackageMeta};

/// Marker appended to a source asset name to address its compiled form.
pub const COMPILED_SUFFIX: &str = "_c";

/// Compiled model extension the fallback scan looks for.
pub const COMPILED_MODEL_EXTENSION: &str = ".vmdl_c";

/// The compiled-variant name for `name`, appending the marker when absent.
pub fn compiled_name(name: &str) -> String {
    if name.ends_with(COMPILED_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{COMPILED_SUFFIX}")
    }
}

/// Pick the package's primary asset as a manifest-relative path.
///
/// A metadata-declared primary asset wins and is trusted as-is (existence is
/// checked later, against the downloaded tree). Without one the manifest is
/// scanned in order for the first compiled model. Metadata that failed to
/// decode arrives here as `None` and falls through to the scan.
pub fn select_primary(
    ident: &PackageIdent,
    meta: Option<&PackageMeta>,
    manifest: &Manifest,
) -> Result<String, AssetPrepError> {
    if let Some(primary) = meta
        .and_then(|meta| meta.primary_asset.as_deref())
        .filter(|primary| !primary.is_empty())
    {
        return Ok(compiled_name(primary));
    }

    manifest
        .files
        .iter()
        .find(|file| file.path.ends_with(COMPILED_MODEL_EXTENSION))
        .map(|file| file.path.clone())
        .ok_or_else(|| AssetPrepError::NoPrimaryAsset {
            package: ident.to_string(),
        })
}
