//! Host platform detection and asset-name tokens

/// The (architecture, operating system) pair of the executing host
///
/// Values are kept raw so unsupported hosts can be reported by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub arch: String,
    pub os: String,
}

impl HostPlatform {
    pub fn new(arch: impl Into<String>, os: impl Into<String>) -> Self {
        Self {
            arch: arch.into(),
            os: os.into(),
        }
    }

    /// Platform this binary was compiled for
    pub fn current() -> Self {
        Self::new(std::env::consts::ARCH, std::env::consts::OS)
    }
}

/// Architectures with published release assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
}

impl Arch {
    pub fn from_host(arch: &str) -> Option<Self> {
        match arch {
            "x86_64" => Some(Arch::X86_64),
            _ => None,
        }
    }

    /// Token used in release asset names
    pub fn token(self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
        }
    }
}

/// Operating systems with published release assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
}

impl Os {
    pub fn from_host(os: &str) -> Option<Self> {
        match os {
            "linux" => Some(Os::Linux),
            _ => None,
        }
    }

    /// Token used in release asset names
    pub fn token(self) -> &'static str {
        match self {
            Os::Linux => "Linux",
        }
    }
}
