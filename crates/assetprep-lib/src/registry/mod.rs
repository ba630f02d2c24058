mod ident;
mod resolver;
mod types;

pub use ident::PackageIdent;
pub use resolver::{DEFAULT_ENDPOINT, fetch_descriptor, fetch_manifest, resolve_manifest};
pub use types::{PackageDescriptor, PackageMeta, PackageVersion};
