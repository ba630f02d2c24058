use crate::primary::compiled_name;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only view of a package's downloaded file tree.
///
/// Handed across the converter boundary so the converter can probe for
/// resources referenced by the primary asset. Converters routinely look up
/// optional resources, so a name that is not present locally reads as
/// `Ok(None)`, not an error.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Translate a manifest-relative, forward-slash name into an absolute
    /// path under the root. Names that try to leave the root resolve to
    /// nothing.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let mut path = self.root.clone();
        let mut pushed = false;

        for segment in name.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return None,
                _ => {
                    path.push(segment);
                    pushed = true;
                }
            }
        }

        pushed.then_some(path)
    }

    /// Read a resource by its manifest-relative name.
    pub fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        let Some(path) = self.resolve(name) else {
            return Ok(None);
        };
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Read the compiled variant of a resource, appending the compiled
    /// marker when `name` lacks it.
    pub fn read_compiled(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        self.read(&compiled_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader_with_files(files: &[(&str, &[u8])]) -> (tempfile::TempDir, AssetLoader) {
        let dir = tempfile::tempdir().unwrap();
        for (rel, contents) in files {
            let path = dir.path().join(rel.replace('/', std::path::MAIN_SEPARATOR_STR));
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, contents).unwrap();
        }
        let loader = AssetLoader::new(dir.path());
        (dir, loader)
    }

    #[test]
    fn test_read_existing_resource() {
        let (_dir, loader) = loader_with_files(&[("models/crate.vmdl_c", b"compiled")]);
        let bytes = loader.read("models/crate.vmdl_c").unwrap().unwrap();
        assert_eq!(bytes, b"compiled");
    }

    #[test]
    fn test_read_missing_resource_is_absent_not_error() {
        let (_dir, loader) = loader_with_files(&[]);
        assert!(loader.read("models/nothere.vmdl_c").unwrap().is_none());
    }

    #[test]
    fn test_read_compiled_appends_marker() {
        let (_dir, loader) = loader_with_files(&[("models/crate.vmdl_c", b"compiled")]);
        let bytes = loader.read_compiled("models/crate.vmdl").unwrap().unwrap();
        assert_eq!(bytes, b"compiled");
    }

    #[test]
    fn test_read_compiled_accepts_already_compiled_name() {
        let (_dir, loader) = loader_with_files(&[("models/crate.vmdl_c", b"compiled")]);
        assert!(loader.read_compiled("models/crate.vmdl_c").unwrap().is_some());
    }

    #[test]
    fn test_escaping_names_resolve_to_nothing() {
        let (_dir, loader) = loader_with_files(&[]);
        assert!(loader.resolve("../outside").is_none());
        assert!(loader.resolve("").is_none());
        assert!(loader.read("../outside").unwrap().is_none());
    }
}
