use crate::convert::CommandConverter;
use crate::pipeline::FetchOptions;
use crate::registry::PackageIdent;

#[derive(Debug, Clone)]
pub struct ManifestParams {
    pub ident: PackageIdent,
    pub endpoint: String,
}

#[derive(Debug, Clone)]
pub struct FetchParams {
    pub ident: PackageIdent,
    pub options: FetchOptions,
}

#[derive(Debug, Clone)]
pub struct ConvertParams {
    pub ident: PackageIdent,
    pub options: FetchOptions,
    pub converter: CommandConverter,
}
