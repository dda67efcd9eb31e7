//! Fixture builders for release feeds and release archives
//!
//! Tests never reach GitHub: feeds are rendered to the JSON shape of the
//! `GET /repos/{owner}/{repo}/releases` endpoint and archives are built
//! in memory.

use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::json;

/// One release of a fixture feed
#[derive(Debug, Clone)]
pub struct FeedRelease {
    pub tag: String,
    pub assets: Vec<FeedAsset>,
}

/// One downloadable asset of a fixture release
#[derive(Debug, Clone)]
pub struct FeedAsset {
    pub name: String,
    pub url: String,
}

impl FeedRelease {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            assets: Vec::new(),
        }
    }

    pub fn asset(mut self, name: &str, url: &str) -> Self {
        self.assets.push(FeedAsset {
            name: name.to_string(),
            url: url.to_string(),
        });
        self
    }
}

/// Renders releases (newest first) as a GitHub release-list response body
///
/// Extra fields the API returns are included so decoding is exercised
/// against a realistic payload.
pub fn release_feed_json(releases: &[FeedRelease]) -> String {
    let body: Vec<_> = releases
        .iter()
        .enumerate()
        .map(|(i, release)| {
            json!({
                "id": 1000 + i,
                "tag_name": release.tag,
                "name": release.tag,
                "draft": false,
                "prerelease": false,
                "assets": release
                    .assets
                    .iter()
                    .enumerate()
                    .map(|(j, asset)| json!({
                        "id": 5000 + j,
                        "name": asset.name,
                        "content_type": "application/gzip",
                        "size": 1024,
                        "browser_download_url": asset.url,
                    }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::Value::Array(body).to_string()
}

/// Shell script standing in for a tool binary
pub fn fake_tool_script(tool: &str, version: &str) -> String {
    format!("#!/bin/sh\necho '{} {}'\n", tool, version)
}

/// Builds a `.tar.gz` archive holding a single executable at its root
///
/// # Panics
///
/// Panics if the in-memory archive cannot be written.
pub fn tar_gz_with_binary(binary_name: &str, contents: &str) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let mut header = tar::Header::new_gnu();
    header.set_size(contents.len() as u64);
    header.set_mode(0o755);
    header.set_cksum();
    builder
        .append_data(&mut header, binary_name, contents.as_bytes())
        .expect("Failed to append binary to archive");

    builder
        .into_inner()
        .expect("Failed to finish tar stream")
        .finish()
        .expect("Failed to finish gzip stream")
}
