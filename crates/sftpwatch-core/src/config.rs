//! Configuration module for sftpwatch.
//!
//! Provides a typed configuration struct that maps to the YAML configuration
//! file, with loading, validation, defaults, and builder-style setters for
//! programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WatcherConfig struct
// ---------------------------------------------------------------------------

/// Connection and polling configuration for one watcher instance.
///
/// Every field has a default, so a config file (or builder chain) only needs
/// to name what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Remote host to connect to.
    pub host: String,
    /// SSH port on the remote host.
    pub port: u16,
    /// Username for authentication.
    pub username: String,
    /// Password for authentication. Ignored when `private_key` is set.
    pub password: String,
    /// Path to a private key file. When set, key authentication takes
    /// precedence over the password.
    pub private_key: Option<PathBuf>,
    /// Remote directory to watch (one flat level, no recursion).
    pub path: String,
    /// Milliseconds between poll ticks.
    pub poll_interval_ms: u64,
    /// When true, lifecycle diagnostics (connect, baseline init, diff check,
    /// stop) are logged at `info` instead of `debug`. No behavioral effect.
    pub verbose_logging: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 22,
            username: "root".to_string(),
            password: "root".to_string(),
            private_key: None,
            path: "/".to_string(),
            poll_interval_ms: 1000,
            verbose_logging: false,
        }
    }
}

impl WatcherConfig {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WatcherConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`WatcherConfig::default`] on
    /// any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Validates the configuration before a watcher is started.
    ///
    /// A zero poll interval would turn per-tick retry into a tight loop, and
    /// an empty remote path cannot be listed; both are rejected here rather
    /// than at tick time.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval_ms == 0 {
            anyhow::bail!("poll_interval_ms must be greater than zero");
        }
        if self.path.is_empty() {
            anyhow::bail!("remote path must not be empty");
        }
        Ok(())
    }

    /// The poll interval as a [`std::time::Duration`].
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }

    // -----------------------------------------------------------------------
    // Builder-style setters
    // -----------------------------------------------------------------------

    /// Sets the remote host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the SSH port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets username and password credentials.
    pub fn with_password_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Sets username and private-key credentials. Key authentication takes
    /// precedence over any configured password.
    pub fn with_key_auth(
        mut self,
        username: impl Into<String>,
        private_key: impl Into<PathBuf>,
    ) -> Self {
        self.username = username.into();
        self.private_key = Some(private_key.into());
        self
    }

    /// Sets the remote directory to watch.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the poll interval in milliseconds.
    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Enables or disables verbose lifecycle logging.
    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WatcherConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 22);
        assert_eq!(config.username, "root");
        assert_eq!(config.password, "root");
        assert_eq!(config.private_key, None);
        assert_eq!(config.path, "/");
        assert_eq!(config.poll_interval_ms, 1000);
        assert!(!config.verbose_logging);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_partial_yaml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host: files.example.com").unwrap();
        writeln!(file, "path: /srv/incoming").unwrap();
        writeln!(file, "poll_interval_ms: 250").unwrap();

        let config = WatcherConfig::load(file.path()).unwrap();
        assert_eq!(config.host, "files.example.com");
        assert_eq!(config.path, "/srv/incoming");
        assert_eq!(config.poll_interval_ms, 250);
        // Unspecified fields keep their defaults
        assert_eq!(config.port, 22);
        assert_eq!(config.username, "root");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = WatcherConfig::load_or_default(Path::new("/nonexistent/sftpwatch.yaml"));
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = WatcherConfig::default().with_poll_interval_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let config = WatcherConfig::default().with_path("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_chain() {
        let config = WatcherConfig::default()
            .with_host("10.0.0.5")
            .with_port(2222)
            .with_key_auth("deploy", "/home/deploy/.ssh/id_ed25519")
            .with_path("/var/uploads")
            .with_poll_interval_ms(500)
            .with_verbose_logging(true);

        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 2222);
        assert_eq!(config.username, "deploy");
        assert_eq!(
            config.private_key,
            Some(PathBuf::from("/home/deploy/.ssh/id_ed25519"))
        );
        assert_eq!(config.path, "/var/uploads");
        assert_eq!(config.poll_interval_ms, 500);
        assert!(config.verbose_logging);
    }

    #[test]
    fn test_poll_interval_duration() {
        let config = WatcherConfig::default().with_poll_interval_ms(1500);
        assert_eq!(config.poll_interval(), std::time::Duration::from_millis(1500));
    }
}
