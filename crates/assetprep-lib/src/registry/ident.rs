use crate::error::AssetPrepError;
use std::fmt;

/// Fully-qualified package identifier: `author.name`.
///
/// The joined form doubles as the registry lookup key and the on-disk
/// directory name for the package's downloaded files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageIdent {
    author: String,
    name: String,
}

impl PackageIdent {
    pub fn parse(input: &str) -> Result<Self, AssetPrepError> {
        let Some((author, name)) = input.split_once('.') else {
            return Err(AssetPrepError::InvalidPackageIdent {
                details: format!(
                    "expected '<author>.<name>', got '{input}' (missing separator)"
                ),
            });
        };

        if author.is_empty() || name.is_empty() {
            return Err(AssetPrepError::InvalidPackageIdent {
                details: format!("expected '<author>.<name>', got '{input}' (empty segment)"),
            });
        }
        if name.contains('.') {
            return Err(AssetPrepError::InvalidPackageIdent {
                details: format!("'.' is not allowed inside identifier segments: '{input}'"),
            });
        }

        Ok(Self {
            author: author.to_string(),
            name: name.to_string(),
        })
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PackageIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.author, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ident() {
        let ident = PackageIdent::parse("facepunch.sandbox").unwrap();
        assert_eq!(ident.author(), "facepunch");
        assert_eq!(ident.name(), "sandbox");
        assert_eq!(ident.to_string(), "facepunch.sandbox");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = PackageIdent::parse("sandbox").unwrap_err();
        assert!(matches!(err, AssetPrepError::InvalidPackageIdent { .. }));
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(PackageIdent::parse(".sandbox").is_err());
        assert!(PackageIdent::parse("facepunch.").is_err());
        assert!(PackageIdent::parse(".").is_err());
    }

    #[test]
    fn test_parse_rejects_extra_separators() {
        assert!(PackageIdent::parse("facepunch.sandbox.v2").is_err());
    }
}
