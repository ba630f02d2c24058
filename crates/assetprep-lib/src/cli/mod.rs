mod args;
mod convert;
mod fetch;
mod manifest;
mod params;
mod resolved_command;

pub use args::{Args, Command, parse_args};
pub use convert::run_convert;
pub use fetch::run_fetch;
pub use manifest::run_manifest;
pub use params::{ConvertParams, FetchParams, ManifestParams};
pub use resolved_command::{ResolvedCommand, resolve_command};
