//! Optional docfill configuration (`docfill.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::core::filename::{DEFAULT_MAX_FILENAME_LEN, DEFAULT_NAME_KEYS};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "docfill.toml";

/// Defaults for a run (TOML).
///
/// Every field is optional in the file. Command-line flags take precedence.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocfillConfig {
    /// Directory that receives generated documents.
    pub outdir: PathBuf,

    /// Maximum characters in a derived filename stem.
    pub max_filename_len: usize,

    /// Keys tried, in order, to derive the output filename.
    pub name_keys: Vec<String>,

    /// Fail on placeholders missing from the KV file instead of rendering them empty.
    pub strict: bool,
}

impl Default for DocfillConfig {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from("output_docs"),
            max_filename_len: DEFAULT_MAX_FILENAME_LEN,
            name_keys: DEFAULT_NAME_KEYS.iter().map(|key| key.to_string()).collect(),
            strict: false,
        }
    }
}

impl DocfillConfig {
    pub fn validate(&self) -> Result<()> {
        if self.outdir.as_os_str().is_empty() {
            return Err(anyhow!("outdir must not be empty"));
        }
        if self.max_filename_len == 0 {
            return Err(anyhow!("max_filename_len must be > 0"));
        }
        if self.name_keys.is_empty() {
            return Err(anyhow!("name_keys must be a non-empty array"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DocfillConfig::default()`.
pub fn load_config(path: &Path) -> Result<DocfillConfig> {
    if !path.exists() {
        let cfg = DocfillConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DocfillConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Resolve the config for a run.
///
/// An explicit path must exist; the default `docfill.toml` is optional.
pub fn resolve_config(explicit: Option<&Path>) -> Result<DocfillConfig> {
    match explicit {
        Some(path) if !path.exists() => Err(anyhow!("config not found: {}", path.display())),
        Some(path) => load_config(path),
        None => load_config(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, DocfillConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("docfill.toml");
        fs::write(&path, "strict = true\nname_keys = [\"CLIENT\"]\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert!(cfg.strict);
        assert_eq!(cfg.name_keys, vec!["CLIENT"]);
        assert_eq!(cfg.outdir, PathBuf::from("output_docs"));
        assert_eq!(cfg.max_filename_len, 120);
    }

    #[test]
    fn rejects_zero_filename_len() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("docfill.toml");
        fs::write(&path, "max_filename_len = 0\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("max_filename_len"), "{err:#}");
    }

    #[test]
    fn rejects_empty_name_keys() {
        let cfg = DocfillConfig {
            name_keys: Vec::new(),
            ..DocfillConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = resolve_config(Some(&temp.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("config not found"), "{err}");
    }
}
