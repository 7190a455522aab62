//! Process-level configuration.
//!
//! Loaded from `<config-dir>/fieldnote/config.toml`:
//!
//! ```toml
//! default_root = "/home/me/notes"
//! excludes = ["/home/me/notes/templates"]
//! ```

use crate::error::{FieldnoteError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Root scanned when the command line names none.
    pub default_root: Option<PathBuf>,

    /// Directory prefixes excluded from every scan.
    #[serde(default)]
    pub excludes: Vec<PathBuf>,
}

impl Config {
    /// Location of the user config file, if a config directory exists.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("fieldnote").join("config.toml"))
    }

    /// Load the user config. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| FieldnoteError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve the effective scan roots: command-line roots win, then the
    /// configured default. Neither is an error at the boundary.
    pub fn resolve_roots(&self, cli_roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
        if !cli_roots.is_empty() {
            return Ok(cli_roots.to_vec());
        }

        match &self.default_root {
            Some(root) => Ok(vec![root.clone()]),
            None => Err(FieldnoteError::InvalidRoots(
                "no root paths given and no default_root configured".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "default_root = \"/notes\"\nexcludes = [\"/notes/templates\"]\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_root, Some(PathBuf::from("/notes")));
        assert_eq!(config.excludes, vec![PathBuf::from("/notes/templates")]);
    }

    #[test]
    fn test_load_from_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_root = [not toml").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(FieldnoteError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_roots_cli_wins() {
        let config = Config {
            default_root: Some(PathBuf::from("/configured")),
            excludes: Vec::new(),
        };

        let roots = config.resolve_roots(&[PathBuf::from("/cli")]).unwrap();
        assert_eq!(roots, vec![PathBuf::from("/cli")]);
    }

    #[test]
    fn test_resolve_roots_falls_back_to_default() {
        let config = Config {
            default_root: Some(PathBuf::from("/configured")),
            excludes: Vec::new(),
        };

        let roots = config.resolve_roots(&[]).unwrap();
        assert_eq!(roots, vec![PathBuf::from("/configured")]);
    }

    #[test]
    fn test_resolve_roots_none_is_an_error() {
        let config = Config::default();
        assert!(matches!(
            config.resolve_roots(&[]),
            Err(FieldnoteError::InvalidRoots(_))
        ));
    }
}
