pub mod download;
pub mod platform;
pub mod release;
pub mod select;

// Re-export for convenience
pub use download::{ArchiveFetcher, HttpArchiveFetcher};
pub use platform::{Arch, HostPlatform, Os};
pub use release::{Asset, Release};
pub use select::{find_release, select_asset, strip_version_prefix, tag_matches};
