// Startup configuration: API tokens read from local files, endpoints from
// the environment, everything else from the command line.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::Cli;
use crate::error::ConfigError;

pub const DEFAULT_VK_URL: &str = "https://api.vk.com";
pub const DEFAULT_DISK_URL: &str = "https://cloud-api.yandex.net";

/// Everything a run needs besides the command input. Built once at startup
/// and handed to the clients explicitly.
#[derive(Clone)]
pub struct Config {
    pub vk_token: String,
    pub disk_token: String,
    pub vk_base_url: String,
    pub disk_base_url: String,
    pub api_version: String,
    /// Destination folder on the disk.
    pub directory: String,
    pub manifest_path: PathBuf,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("vk_token", &"<redacted>")
            .field("disk_token", &"<redacted>")
            .field("vk_base_url", &self.vk_base_url)
            .field("disk_base_url", &self.disk_base_url)
            .field("api_version", &self.api_version)
            .field("directory", &self.directory)
            .field("manifest_path", &self.manifest_path)
            .finish()
    }
}

/// Expand ~ to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Read a token file, trimming surrounding whitespace. Missing, unreadable
/// and blank files are all errors.
pub fn read_token(path: &Path) -> Result<String, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::CredentialFile {
        path: path.to_path_buf(),
        source,
    })?;
    let token = raw.trim();
    if token.is_empty() {
        return Err(ConfigError::EmptyCredential(path.to_path_buf()));
    }
    debug!(path = %path.display(), "loaded credential");
    Ok(token.to_string())
}

impl Config {
    /// Build the configuration from parsed arguments. Base URLs come from
    /// `VK_API_URL` / `DISK_API_URL` when set.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let vk_token = read_token(&expand_tilde(&cli.vk_token_file))?;
        let disk_token = read_token(&expand_tilde(&cli.disk_token_file))?;
        Ok(Config {
            vk_token,
            disk_token,
            vk_base_url: std::env::var("VK_API_URL").unwrap_or_else(|_| DEFAULT_VK_URL.into()),
            disk_base_url: std::env::var("DISK_API_URL")
                .unwrap_or_else(|_| DEFAULT_DISK_URL.into()),
            api_version: cli.api_version.clone(),
            directory: cli.directory.clone(),
            manifest_path: expand_tilde(&cli.output),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn token_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vktoken.txt");
        std::fs::write(&path, "  vk1.a.secret\n").unwrap();
        assert_eq!(read_token(&path).unwrap(), "vk1.a.secret");
    }

    #[test]
    fn missing_token_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = read_token(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::CredentialFile { .. }));
    }

    #[test]
    fn blank_token_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("yatoken.txt");
        std::fs::write(&path, "\n\n").unwrap();
        assert!(matches!(
            read_token(&path),
            Err(ConfigError::EmptyCredential(_))
        ));
    }

    #[test]
    fn from_cli_reads_both_tokens() {
        let dir = TempDir::new().unwrap();
        let vk = dir.path().join("vk.txt");
        let disk = dir.path().join("disk.txt");
        std::fs::write(&vk, "vk-token").unwrap();
        std::fs::write(&disk, "disk-token\n").unwrap();

        let cli = Cli::parse_from([
            "vk-photo-backup",
            "--vk-token-file",
            vk.to_str().unwrap(),
            "--disk-token-file",
            disk.to_str().unwrap(),
            "--directory",
            "Backup",
        ]);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.vk_token, "vk-token");
        assert_eq!(config.disk_token, "disk-token");
        assert_eq!(config.directory, "Backup");
        assert_eq!(config.api_version, "5.131");
        assert_eq!(config.manifest_path, PathBuf::from("loaded_photos.json"));

        let debug = format!("{config:?}");
        assert!(!debug.contains("vk-token"));
        assert!(!debug.contains("disk-token"));
    }
}
