//! PATH registration for installed tools
//!
//! Later steps of a GitHub Actions job read their PATH additions from the
//! file named by `GITHUB_PATH`, one directory per line. The current
//! process keeps its own search path instead of rewriting its environment.

use kozmo_setup_core::{Result, RunnerEnv, SetupError};
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Makes directories reachable through PATH and looks tools up on it
pub trait PathRegistry {
    /// Puts `dir` in front of the search path
    ///
    /// # Errors
    ///
    /// Returns an error if the addition cannot be recorded
    fn add_to_path(&mut self, dir: &Path) -> Result<()>;

    /// Location of `tool` on the search path, if any
    fn which(&self, tool: &str) -> Result<Option<PathBuf>>;
}

/// [`PathRegistry`] for a CI runner step
#[derive(Debug, Clone)]
pub struct RunnerPath {
    search_path: OsString,
    github_path: Option<PathBuf>,
}

impl RunnerPath {
    pub fn new(search_path: impl Into<OsString>, github_path: Option<PathBuf>) -> Self {
        Self {
            search_path: search_path.into(),
            github_path,
        }
    }

    pub fn from_runner(env: &RunnerEnv) -> Self {
        Self::new(env.search_path.clone(), env.github_path.clone())
    }

    /// Search path including every directory added so far
    pub fn search_path(&self) -> &OsString {
        &self.search_path
    }

    pub fn github_path(&self) -> Option<&Path> {
        self.github_path.as_deref()
    }

    fn append_github_path(file: &Path, dir: &Path) -> Result<()> {
        let mut out = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .map_err(|e| github_path_failed(file, e))?;
        writeln!(out, "{}", dir.display()).map_err(|e| github_path_failed(file, e))
    }
}

fn github_path_failed(file: &Path, err: std::io::Error) -> SetupError {
    SetupError::IoError(std::io::Error::new(
        err.kind(),
        format!("failed to append to GITHUB_PATH file {}: {}", file.display(), err),
    ))
}

impl PathRegistry for RunnerPath {
    fn add_to_path(&mut self, dir: &Path) -> Result<()> {
        let entries = std::iter::once(dir.to_path_buf())
            .chain(std::env::split_paths(&self.search_path))
            .filter(|entry| !entry.as_os_str().is_empty());
        self.search_path = std::env::join_paths(entries).map_err(|e| {
            SetupError::Internal(format!("cannot add {} to PATH: {}", dir.display(), e))
        })?;

        match &self.github_path {
            Some(file) => {
                Self::append_github_path(file, dir)?;
                debug!(dir = %dir.display(), file = %file.display(), "Recorded PATH addition");
            }
            None => debug!(dir = %dir.display(), "GITHUB_PATH not set; PATH updated for this process only"),
        }

        Ok(())
    }

    fn which(&self, tool: &str) -> Result<Option<PathBuf>> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match which::which_in(tool, Some(&self.search_path), cwd) {
            Ok(path) => Ok(Some(path)),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kozmo_setup_testkit::temp_dir_in_workspace;

    #[cfg(unix)]
    fn write_executable(dir: &Path, name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_add_to_path_prepends() {
        let mut path = RunnerPath::new(
            std::env::join_paths(["/usr/bin", "/bin"]).unwrap(),
            None,
        );
        path.add_to_path(Path::new("/opt/kozmoctl")).unwrap();

        let entries: Vec<_> = std::env::split_paths(path.search_path()).collect();
        assert_eq!(
            entries,
            vec![
                PathBuf::from("/opt/kozmoctl"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin")
            ]
        );
    }

    #[test]
    fn test_add_to_path_appends_github_path_lines() {
        let temp = temp_dir_in_workspace();
        let file = temp.path().join("add_path");
        std::fs::write(&file, "/already/there\n").unwrap();

        let mut path = RunnerPath::new("", Some(file.clone()));
        path.add_to_path(Path::new("/cache/kozmoctl/1.2.3/x86_64")).unwrap();
        path.add_to_path(Path::new("/cache/nebulactl/0.1.0/x86_64")).unwrap();

        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "/already/there\n/cache/kozmoctl/1.2.3/x86_64\n/cache/nebulactl/0.1.0/x86_64\n"
        );
    }

    #[test]
    fn test_add_to_path_creates_github_path_file() {
        let temp = temp_dir_in_workspace();
        let file = temp.path().join("add_path");

        let mut path = RunnerPath::new("", Some(file.clone()));
        path.add_to_path(Path::new("/cache/kozmoctl")).unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "/cache/kozmoctl\n");
    }

    #[test]
    fn test_unwritable_github_path_is_an_error() {
        let temp = temp_dir_in_workspace();
        let file = temp.path().join("missing-dir").join("add_path");

        let mut path = RunnerPath::new("", Some(file));
        let err = path.add_to_path(Path::new("/cache/kozmoctl")).unwrap_err();
        assert!(err.to_string().contains("GITHUB_PATH"), "got: {}", err);
    }

    #[test]
    #[cfg(unix)]
    fn test_which_finds_tool_after_registration() {
        let temp = temp_dir_in_workspace();
        let bin_dir = temp.path().join("bin");
        let binary = write_executable(&bin_dir, "kozmoctl-test-tool");

        let mut path = RunnerPath::new("", None);
        assert_eq!(path.which("kozmoctl-test-tool").unwrap(), None);

        path.add_to_path(&bin_dir).unwrap();
        let found = path.which("kozmoctl-test-tool").unwrap().unwrap();
        assert_eq!(
            found.canonicalize().unwrap(),
            binary.canonicalize().unwrap()
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_which_ignores_non_executables() {
        let temp = temp_dir_in_workspace();
        let bin_dir = temp.path().join("bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        std::fs::write(bin_dir.join("kozmoctl-plain-file"), "data").unwrap();

        let mut path = RunnerPath::new("", None);
        path.add_to_path(&bin_dir).unwrap();
        assert_eq!(path.which("kozmoctl-plain-file").unwrap(), None);
    }

    #[test]
    fn test_from_runner_copies_env() {
        let env = RunnerEnv {
            tool_cache: PathBuf::from("/cache"),
            temp_dir: PathBuf::from("/tmp"),
            github_path: Some(PathBuf::from("/tmp/add_path")),
            api_url: "https://api.github.com".to_string(),
            search_path: OsString::from("/usr/bin"),
        };

        let path = RunnerPath::from_runner(&env);
        assert_eq!(path.search_path(), &OsString::from("/usr/bin"));
        assert_eq!(path.github_path(), Some(Path::new("/tmp/add_path")));
    }
}
