use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Safety limits applied to every tool operation.
///
/// `timeout_seconds` is informational: the scanner itself never watches the
/// clock, a surrounding request layer is expected to enforce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanLimits {
    /// Per-file size ceiling in bytes
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,

    /// Maximum number of files touched by one operation
    #[serde(default = "default_max_files_per_operation")]
    pub max_files_per_operation: usize,

    /// Maximum character count for inline-code tools
    #[serde(default = "default_max_code_length")]
    pub max_code_length: usize,

    /// Maximum search results returned by one query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Nominal whole-operation timeout, enforced externally
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_max_file_size_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_max_files_per_operation() -> usize {
    1000
}

fn default_max_code_length() -> usize {
    1_000_000
}

fn default_max_results() -> usize {
    500
}

fn default_timeout_seconds() -> u64 {
    300
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size_bytes(),
            max_files_per_operation: default_max_files_per_operation(),
            max_code_length: default_max_code_length(),
            max_results: default_max_results(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Directory and file patterns excluded from scans unless the caller
/// overrides them.
pub fn default_exclude_patterns() -> Vec<String> {
    [
        "venv",
        "__pycache__",
        ".git",
        "node_modules",
        ".tox",
        "build",
        "dist",
        "*.egg-info",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Top-level configuration, optionally loaded from `legacymap.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: ScanLimits,

    #[serde(default = "default_exclude_patterns")]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: ScanLimits::default(),
            exclude: default_exclude_patterns(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or from `legacymap.toml`
    /// in the current directory. Falls back to defaults when no file exists;
    /// a file that exists but does not parse is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let candidate: PathBuf = match path {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from("legacymap.toml"),
        };

        if !candidate.is_file() {
            if path.is_some() {
                anyhow::bail!("config file not found: {}", candidate.display());
            }
            log::debug!("no legacymap.toml found; using default configuration");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&candidate)?;
        let config = toml::from_str::<Config>(&contents)
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", candidate.display(), e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_documented_values() {
        let limits = ScanLimits::default();
        assert_eq!(limits.max_file_size_bytes, 10 * 1024 * 1024);
        assert_eq!(limits.max_files_per_operation, 1000);
        assert_eq!(limits.max_code_length, 1_000_000);
        assert_eq!(limits.max_results, 500);
        assert_eq!(limits.timeout_seconds, 300);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [limits]
            max_files_per_operation = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.limits.max_files_per_operation, 50);
        assert_eq!(config.limits.max_file_size_bytes, 10 * 1024 * 1024);
        assert!(config.exclude.contains(&"__pycache__".to_string()));
    }
}
