//! GitHub Release metadata

use serde::{Deserialize, Serialize};

/// GitHub Release metadata from API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Release {
    /// Release tag name (e.g., "v1.2.3")
    pub tag_name: String,
    /// List of downloadable assets
    pub assets: Vec<Asset>,
}

/// GitHub Release asset (downloadable file)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Asset {
    /// Asset filename (e.g., "kozmoctl_Linux_x86_64.tar.gz")
    pub name: String,
    /// Direct download URL, kept as the feed sent it
    ///
    /// Only the selected asset's URL is ever parsed, so a malformed URL on
    /// an unrelated asset does not break the feed.
    pub browser_download_url: String,
    /// File size in bytes
    #[serde(default)]
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that Release struct can deserialize from GitHub API JSON
    #[test]
    fn test_release_deserialization() {
        let json = r#"{
            "url": "https://api.github.com/repos/kozmoai/kozmoctl/releases/1",
            "tag_name": "v1.2.3",
            "draft": false,
            "assets": [
                {
                    "name": "kozmoctl_Linux_x86_64.tar.gz",
                    "browser_download_url": "https://github.com/kozmoai/kozmoctl/releases/download/v1.2.3/kozmoctl_Linux_x86_64.tar.gz",
                    "size": 12345678
                }
            ]
        }"#;

        let release: Release = serde_json::from_str(json).expect("Failed to deserialize Release");
        assert_eq!(release.tag_name, "v1.2.3");
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].size, 12345678);
        assert_eq!(
            release.assets[0].browser_download_url,
            "https://github.com/kozmoai/kozmoctl/releases/download/v1.2.3/kozmoctl_Linux_x86_64.tar.gz"
        );
    }

    #[test]
    fn test_asset_without_size() {
        let json = r#"{
            "name": "kozmoctl_Linux_x86_64.tar.gz",
            "browser_download_url": "https://example.com/kozmoctl.tar.gz"
        }"#;

        let asset: Asset = serde_json::from_str(json).expect("Failed to deserialize Asset");
        assert_eq!(asset.size, 0);
    }

    #[test]
    fn test_asset_with_malformed_url_still_parses() {
        let json = r#"{
            "name": "kozmoctl_Linux_x86_64.tar.gz",
            "browser_download_url": "not a url"
        }"#;

        let asset: Asset = serde_json::from_str(json).expect("Failed to deserialize Asset");
        assert_eq!(asset.browser_download_url, "not a url");
    }

    /// Test Release with no assets (edge case)
    #[test]
    fn test_release_no_assets() {
        let json = r#"{
            "tag_name": "v0.1.0",
            "assets": []
        }"#;

        let release: Release = serde_json::from_str(json).expect("Failed to deserialize Release");
        assert_eq!(release.tag_name, "v0.1.0");
        assert!(release.assets.is_empty());
    }
}
