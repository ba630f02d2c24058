use serde::Deserialize;

/// Package descriptor as served by the registry's `package/get` endpoint.
///
/// Only the fields the pipeline consumes are modeled; the service returns
/// considerably more.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDescriptor {
    #[serde(rename = "Version", default)]
    pub version: Option<PackageVersion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageVersion {
    #[serde(rename = "ManifestUrl", default)]
    pub manifest_url: Option<String>,
    /// Free-form metadata blob: a string containing embedded JSON.
    #[serde(rename = "Meta", default)]
    pub meta: Option<String>,
}

/// Decoded subset of the version metadata blob.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageMeta {
    #[serde(rename = "PrimaryAsset", default)]
    pub primary_asset: Option<String>,
}

impl PackageDescriptor {
    /// The manifest URL, if the descriptor carries a non-empty one.
    pub fn manifest_url(&self) -> Option<&str> {
        self.version
            .as_ref()
            .and_then(|version| version.manifest_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Best-effort decode of the embedded metadata JSON.
    ///
    /// The blob is produced by an external editor and is frequently absent or
    /// malformed; any decode failure yields `None`, never an error.
    pub fn meta(&self) -> Option<PackageMeta> {
        let raw = self.version.as_ref()?.meta.as_deref()?;
        serde_json::from_str(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_with_manifest_url_and_meta() {
        let descriptor: PackageDescriptor = serde_json::from_str(
            r#"{
                "Version": {
                    "ManifestUrl": "https://files.example/manifest.json",
                    "Meta": "{\"PrimaryAsset\": \"models/foo.vmdl\"}"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            descriptor.manifest_url(),
            Some("https://files.example/manifest.json")
        );
        let meta = descriptor.meta().unwrap();
        assert_eq!(meta.primary_asset.as_deref(), Some("models/foo.vmdl"));
    }

    #[test]
    fn test_empty_manifest_url_is_treated_as_absent() {
        let descriptor: PackageDescriptor =
            serde_json::from_str(r#"{"Version": {"ManifestUrl": ""}}"#).unwrap();
        assert_eq!(descriptor.manifest_url(), None);
    }

    #[test]
    fn test_missing_version_block() {
        let descriptor: PackageDescriptor = serde_json::from_str("{}").unwrap();
        assert_eq!(descriptor.manifest_url(), None);
        assert!(descriptor.meta().is_none());
    }

    #[test]
    fn test_malformed_meta_decodes_to_none() {
        let descriptor: PackageDescriptor = serde_json::from_str(
            r#"{"Version": {"ManifestUrl": "https://x/m.json", "Meta": "not json {"}}"#,
        )
        .unwrap();
        assert!(descriptor.meta().is_none());
    }

    #[test]
    fn test_meta_without_primary_asset_field() {
        let descriptor: PackageDescriptor = serde_json::from_str(
            r#"{"Version": {"Meta": "{\"ProjectTemplate\": null}"}}"#,
        )
        .unwrap();
        let meta = descriptor.meta().unwrap();
        assert!(meta.primary_asset.is_none());
    }
}
