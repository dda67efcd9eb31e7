//! Release and asset selection
//!
//! Both selections are first-match-wins: releases in feed order (newest
//! first), assets in the order the release lists them. There is no
//! fallback to older releases and no fuzzy asset matching.
//!
//! # Example
//!
//! ```
//! use kozmo_setup_release::install::{find_release, select_asset, Release};
//! use kozmo_setup_release::resolve::VersionSpec;
//!
//! let releases: Vec<Release> = serde_json::from_str(r#"[
//!     {"tag_name": "v1.2.3", "assets": [
//!         {"name": "kozmoctl_Linux_x86_64.tar.gz",
//!          "browser_download_url": "https://example.com/kozmoctl_Linux_x86_64.tar.gz"}
//!     ]}
//! ]"#)?;
//!
//! let spec = VersionSpec::parse("1.2.3")?;
//! let release = find_release(&releases, &spec, "v").expect("tag should match");
//! let asset = select_asset(release, "kozmoctl_Linux_x86_64.tar.gz").expect("asset should exist");
//! assert_eq!(asset.browser_download_url, "https://example.com/kozmoctl_Linux_x86_64.tar.gz");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::install::release::{Asset, Release};
use crate::resolve::VersionSpec;

/// Removes at most one leading `prefix` from `value`
pub fn strip_version_prefix<'a>(value: &'a str, prefix: &str) -> &'a str {
    value.strip_prefix(prefix).unwrap_or(value)
}

/// True if `tag` names `version` once each side loses at most one leading prefix
pub fn tag_matches(tag: &str, version: &str, prefix: &str) -> bool {
    strip_version_prefix(tag, prefix) == strip_version_prefix(version, prefix)
}

/// Picks the release a version spec refers to
///
/// - `Latest`: the first release of the feed, if any
/// - `Exact`: the first release whose tag matches; later releases are never considered
pub fn find_release<'a>(
    releases: &'a [Release],
    spec: &VersionSpec,
    prefix: &str,
) -> Option<&'a Release> {
    match spec {
        VersionSpec::Latest => releases.first(),
        VersionSpec::Exact(version) => releases
            .iter()
            .find(|release| tag_matches(&release.tag_name, version, prefix)),
    }
}

/// First asset of `release` whose name equals `asset_name` exactly
pub fn select_asset<'a>(release: &'a Release, asset_name: &str) -> Option<&'a Asset> {
    release.assets.iter().find(|asset| asset.name == asset_name)
}
