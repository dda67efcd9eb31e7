//! Release archive download and extraction
//!
//! Archives are streamed to a uniquely named file under the scratch root
//! (`RUNNER_TEMP` on a hosted runner) and unpacked into a fresh directory
//! next to it. Both paths outlive the call; the scratch root is owned by
//! the CI job and is wiped with it.

use flate2::read::GzDecoder;
use kozmo_setup_core::{Result, SetupError};
use reqwest::blocking::Client;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

use crate::github::{download_client, download_to_writer};

/// Fetches a release archive and unpacks it
pub trait ArchiveFetcher {
    /// Downloads `url` to a local file and returns its path
    ///
    /// # Errors
    ///
    /// Returns `SetupError::DownloadFailed` on any HTTP or I/O failure
    fn download(&mut self, url: &Url) -> Result<PathBuf>;

    /// Unpacks a `.tar.gz` archive and returns the directory holding its contents
    ///
    /// # Errors
    ///
    /// Returns `SetupError::ExtractionFailed` if the archive is corrupt or
    /// an entry cannot be written
    fn extract(&mut self, archive: &Path) -> Result<PathBuf>;
}

/// [`ArchiveFetcher`] downloading over HTTP with `reqwest`
#[derive(Debug, Clone)]
pub struct HttpArchiveFetcher {
    client: Client,
    temp_root: PathBuf,
}

impl HttpArchiveFetcher {
    pub fn new(client: Client, temp_root: impl Into<PathBuf>) -> Self {
        Self {
            client,
            temp_root: temp_root.into(),
        }
    }

    /// Fetcher using the long download timeout, working under `temp_root`
    pub fn with_temp_root(temp_root: impl Into<PathBuf>) -> Result<Self> {
        let client = download_client().map_err(|e| {
            SetupError::DownloadFailed(format!("failed to build HTTP client: {}", e))
        })?;
        Ok(Self::new(client, temp_root))
    }

    pub fn temp_root(&self) -> &Path {
        &self.temp_root
    }

    fn ensure_temp_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.temp_root).map_err(|e| {
            SetupError::DownloadFailed(format!(
                "failed to create scratch directory {}: {}",
                self.temp_root.display(),
                e
            ))
        })
    }
}

impl ArchiveFetcher for HttpArchiveFetcher {
    fn download(&mut self, url: &Url) -> Result<PathBuf> {
        self.ensure_temp_root()?;

        let mut file = tempfile::Builder::new()
            .prefix("kozmo-setup-")
            .suffix(".tar.gz")
            .tempfile_in(&self.temp_root)
            .map_err(|e| {
                SetupError::DownloadFailed(format!("failed to create download file: {}", e))
            })?;

        let bytes = download_to_writer(&self.client, url, file.as_file_mut())?;

        let path = file.into_temp_path().keep().map_err(|e| {
            SetupError::DownloadFailed(format!("failed to keep downloaded archive: {}", e))
        })?;

        debug!(%url, bytes, path = %path.display(), "Archive downloaded");
        Ok(path)
    }

    fn extract(&mut self, archive: &Path) -> Result<PathBuf> {
        self.ensure_temp_root()?;

        let file = File::open(archive).map_err(|e| {
            SetupError::ExtractionFailed(format!("failed to open {}: {}", archive.display(), e))
        })?;

        let dest = tempfile::Builder::new()
            .prefix("kozmo-setup-extract-")
            .tempdir_in(&self.temp_root)
            .map_err(|e| {
                SetupError::ExtractionFailed(format!("failed to create extraction directory: {}", e))
            })?
            .keep();

        unpack_tar_gz(file, &dest).map_err(|e| {
            SetupError::ExtractionFailed(format!("failed to extract {}: {}", archive.display(), e))
        })?;

        debug!(archive = %archive.display(), dest = %dest.display(), "Archive extracted");
        Ok(dest)
    }
}

/// Unpacks every entry of a gzip-compressed tarball under `dest`
///
/// `unpack_in` refuses entries that would escape `dest` (absolute paths,
/// `..` components) and keeps file modes, so executables stay executable.
fn unpack_tar_gz(file: File, dest: &Path) -> std::io::Result<()> {
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive.set_preserve_permissions(true);

    for entry in archive.entries()? {
        let mut entry = entry?;
        entry.unpack_in(dest)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kozmo_setup_testkit::{fake_tool_script, tar_gz_with_binary, temp_dir_in_workspace};
    use mockito::Server;

    fn fetcher(temp_root: &Path) -> HttpArchiveFetcher {
        HttpArchiveFetcher::with_temp_root(temp_root).unwrap()
    }

    #[test]
    fn test_download_writes_archive_under_temp_root() {
        let temp = temp_dir_in_workspace();
        let archive = tar_gz_with_binary("kozmoctl", &fake_tool_script("kozmoctl", "1.2.3"));

        let mut server = Server::new();
        let mock = server
            .mock("GET", "/kozmoctl_Linux_x86_64.tar.gz")
            .with_status(200)
            .with_body(archive.clone())
            .create();

        let url = Url::parse(&format!("{}/kozmoctl_Linux_x86_64.tar.gz", server.url())).unwrap();
        let path = fetcher(temp.path()).download(&url).unwrap();

        mock.assert();
        assert!(path.starts_with(temp.path()));
        assert_eq!(std::fs::read(&path).unwrap(), archive);
    }

    #[test]
    fn test_download_http_error() {
        let temp = temp_dir_in_workspace();
        let mut server = Server::new();
        let _mock = server.mock("GET", "/missing.tar.gz").with_status(404).create();

        let url = Url::parse(&format!("{}/missing.tar.gz", server.url())).unwrap();
        let err = fetcher(temp.path()).download(&url).unwrap_err();

        match err {
            SetupError::DownloadFailed(msg) => assert!(msg.contains("404"), "got: {}", msg),
            other => panic!("Expected DownloadFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_download_creates_missing_temp_root() {
        let temp = temp_dir_in_workspace();
        let nested = temp.path().join("runner").join("_temp");

        let mut server = Server::new();
        let _mock = server.mock("GET", "/a.tar.gz").with_body("data").create();

        let url = Url::parse(&format!("{}/a.tar.gz", server.url())).unwrap();
        let path = fetcher(&nested).download(&url).unwrap();
        assert!(path.starts_with(&nested));
    }

    #[test]
    #[cfg(unix)]
    fn test_extract_keeps_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let temp = temp_dir_in_workspace();
        let archive_path = temp.path().join("kozmoctl.tar.gz");
        std::fs::write(
            &archive_path,
            tar_gz_with_binary("kozmoctl", &fake_tool_script("kozmoctl", "1.2.3")),
        )
        .unwrap();

        let dir = fetcher(temp.path()).extract(&archive_path).unwrap();
        let binary = dir.join("kozmoctl");

        assert!(dir.starts_with(temp.path()));
        assert!(binary.is_file());
        let mode = std::fs::metadata(&binary).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
        assert!(std::fs::read_to_string(&binary).unwrap().contains("kozmoctl 1.2.3"));
    }

    #[test]
    fn test_extract_corrupt_archive() {
        let temp = temp_dir_in_workspace();
        let archive_path = temp.path().join("broken.tar.gz");
        std::fs::write(&archive_path, b"definitely not gzip").unwrap();

        let err = fetcher(temp.path()).extract(&archive_path).unwrap_err();
        assert!(matches!(err, SetupError::ExtractionFailed(_)));
    }

    #[test]
    fn test_extract_missing_archive() {
        let temp = temp_dir_in_workspace();
        let err = fetcher(temp.path())
            .extract(&temp.path().join("nope.tar.gz"))
            .unwrap_err();
        assert!(matches!(err, SetupError::ExtractionFailed(_)));
    }
}
