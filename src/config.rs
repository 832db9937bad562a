use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Port the server listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 12345;
/// Largest request line accepted, in bytes.
pub const MAX_LINE: usize = 8192;
/// Pending-connection queue length passed to `listen`.
pub const LISTEN_BACKLOG: u32 = 5;

/// Config file read from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "docroot.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub backlog: u32,
    /// Upper bound on connections handled at the same time.
    pub max_connections: usize,
    /// Requests whose first line does not end within this many bytes get 413.
    pub max_request_bytes: usize,
    /// Seconds to wait for a complete request line; 0 waits forever.
    pub read_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Document root. Targets are resolved relative to it.
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: format!("0.0.0.0:{}", DEFAULT_PORT),
            backlog: LISTEN_BACKLOG,
            max_connections: 256,
            max_request_bytes: MAX_LINE,
            read_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Option<Duration> {
        match self.read_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// The file named by `DOCROOT_CONFIG` is read if set, otherwise
    /// `docroot.yaml` if it exists, otherwise defaults apply. `LISTEN`
    /// overrides the listen address either way.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var_os("DOCROOT_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = listen_addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::from_yaml_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;

        if cfg.server.max_connections == 0 {
            anyhow::bail!("server.max_connections must be at least 1");
        }
        if cfg.server.max_request_bytes == 0 {
            anyhow::bail!("server.max_request_bytes must be at least 1");
        }

        Ok(cfg)
    }
}
