use crate::error::AssetPrepError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Download manifest as served from the descriptor's manifest URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "Files", default)]
    pub files: Vec<FileEntry>,
    /// Declared total byte size. Informational only, never checked against
    /// the bytes actually received.
    #[serde(rename = "TotalSize", default)]
    pub total_size: u64,
}

/// One remote file in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub url: String,
    /// Relative path, forward-slash separated on the wire.
    pub path: String,
    /// Declared checksum. Carried but never verified.
    #[serde(default)]
    pub crc: Option<u32>,
    #[serde(default)]
    pub size: u64,
}

impl FileEntry {
    /// Resolve this entry's destination under `package_root`.
    ///
    /// Wire paths are untrusted: absolute paths and parent-directory segments
    /// would land writes outside the package root, so they are rejected here,
    /// before the entry is admitted as a download task.
    pub fn local_path(&self, package_root: &Path) -> Result<PathBuf, AssetPrepError> {
        let mut rel = PathBuf::new();

        if self.path.starts_with('/') {
            return Err(self.unsafe_path_error("absolute path"));
        }

        for segment in self.path.split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    return Err(self.unsafe_path_error("parent directory segment"));
                }
                _ if segment.contains('\\') => {
                    return Err(self.unsafe_path_error("backslash in path segment"));
                }
                _ => rel.push(segment),
            }
        }

        if rel.as_os_str().is_empty() {
            return Err(self.unsafe_path_error("empty path"));
        }

        Ok(package_root.join(rel))
    }

    fn unsafe_path_error(&self, what: &str) -> AssetPrepError {
        AssetPrepError::Download {
            url: self.url.clone(),
            reason: format!("manifest path '{}' rejected: {}", self.path, what),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> FileEntry {
        FileEntry {
            url: format!("https://files.example/{path}"),
            path: path.to_string(),
            crc: None,
            size: 0,
        }
    }

    #[test]
    fn test_parse_manifest_wire_format() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "Files": [
                    {"url": "https://files.example/a", "path": "models/foo.vmdl_c", "crc": 123456, "size": 2048},
                    {"url": "https://files.example/b", "path": "textures/foo.vtex_c", "size": 512}
                ],
                "TotalSize": 2560
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.total_size, 2560);
        assert_eq!(manifest.files[0].crc, Some(123_456));
        assert_eq!(manifest.files[1].crc, None);
        assert_eq!(manifest.files[0].path, "models/foo.vmdl_c");
    }

    #[test]
    fn test_parse_manifest_without_files_is_empty() {
        let manifest: Manifest = serde_json::from_str(r#"{"TotalSize": 0}"#).unwrap();
        assert!(manifest.files.is_empty());
    }

    #[test]
    fn test_local_path_uses_native_separators() {
        let root = Path::new("out");
        let resolved = entry("models/props/crate.vmdl_c").local_path(root).unwrap();
        assert_eq!(
            resolved,
            Path::new("out").join("models").join("props").join("crate.vmdl_c")
        );
    }

    #[test]
    fn test_local_path_skips_redundant_segments() {
        let root = Path::new("out");
        let resolved = entry("./models//crate.vmdl_c").local_path(root).unwrap();
        assert_eq!(resolved, Path::new("out").join("models").join("crate.vmdl_c"));
    }

    #[test]
    fn test_local_path_rejects_parent_segments() {
        let err = entry("../outside.txt").local_path(Path::new("out")).unwrap_err();
        assert!(matches!(err, AssetPrepError::Download { .. }));

        let err = entry("models/../../outside.txt")
            .local_path(Path::new("out"))
            .unwrap_err();
        assert!(matches!(err, AssetPrepError::Download { .. }));
    }

    #[test]
    fn test_local_path_rejects_absolute_and_empty() {
        assert!(entry("/etc/passwd").local_path(Path::new("out")).is_err());
        assert!(entry("").local_path(Path::new("out")).is_err());
        assert!(entry("././").local_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_local_path_rejects_backslash_segments() {
        assert!(
            entry("models\\crate.vmdl_c")
                .local_path(Path::new("out"))
                .is_err()
        );
    }
}
