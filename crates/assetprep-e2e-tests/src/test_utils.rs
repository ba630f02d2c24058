use assetprep_lib::convert::ModelConverter;
use assetprep_lib::download::DownloadOptions;
use assetprep_lib::error::AssetPrepError;
use assetprep_lib::loader::AssetLoader;
use assetprep_lib::pipeline::FetchOptions;
use async_trait::async_trait;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_PACKAGE: &str = "facepunch.crate";

pub fn manifest_route(ident: &str) -> String {
    format!("/manifests/{ident}.json")
}

pub fn manifest_url(server: &MockServer, ident: &str) -> String {
    format!("{}{}", server.uri(), manifest_route(ident))
}

pub fn fetch_options(server: &MockServer, output_dir: &Path) -> FetchOptions {
    FetchOptions {
        endpoint: server.uri(),
        output_dir: output_dir.to_path_buf(),
        download: DownloadOptions::default(),
    }
}

/// Mount the descriptor endpoint with the given `Version` object.
pub async fn mount_descriptor(server: &MockServer, ident: &str, version: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/package/get/{ident}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Version": version })))
        .mount(server)
        .await;
}

/// Mount a manifest whose entries point back at this server's `/files/...`
/// routes.
pub async fn mount_manifest(server: &MockServer, ident: &str, files: &[(&str, &[u8])]) {
    let entries: Vec<serde_json::Value> = files
        .iter()
        .map(|(rel, contents)| {
            json!({
                "url": format!("{}/files/{}", server.uri(), rel),
                "path": rel,
                "crc": 0,
                "size": contents.len(),
            })
        })
        .collect();
    let total_size: usize = files.iter().map(|(_, contents)| contents.len()).sum();

    Mock::given(method("GET"))
        .and(path(manifest_route(ident)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "Files": entries, "TotalSize": total_size })),
        )
        .mount(server)
        .await;
}

pub async fn mount_file(server: &MockServer, rel: &str, contents: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/files/{rel}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(contents.to_vec()))
        .mount(server)
        .await;
}

/// Like `mount_file`, but the mock asserts it is hit exactly `times` times
/// over the server's lifetime.
pub async fn mount_file_expect(server: &MockServer, rel: &str, contents: &[u8], times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/files/{rel}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(contents.to_vec()))
        .expect(times)
        .mount(server)
        .await;
}

/// Mount a complete healthy package: descriptor, manifest and every file.
pub async fn mount_package(
    server: &MockServer,
    ident: &str,
    meta: Option<&str>,
    files: &[(&str, &[u8])],
) {
    let mut version = json!({ "ManifestUrl": manifest_url(server, ident) });
    if let Some(meta) = meta {
        version["Meta"] = json!(meta);
    }
    mount_descriptor(server, ident, version).await;
    mount_manifest(server, ident, files).await;
    for (rel, contents) in files {
        mount_file(server, rel, contents).await;
    }
}

/// In-process converter stand-in that records its invocations.
#[derive(Debug, Default)]
pub struct RecordingConverter {
    pub calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

#[async_trait]
impl ModelConverter for RecordingConverter {
    async fn convert(&self, primary: &Path, loader: &AssetLoader) -> Result<(), AssetPrepError> {
        self.calls
            .lock()
            .unwrap()
            .push((primary.to_path_buf(), loader.root().to_path_buf()));
        Ok(())
    }
}
