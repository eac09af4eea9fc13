//! `docsee.yaml` registry persistence.
//!
//! # Storage layout
//!
//! ```text
//! <root>/
//!   docsee.yaml        (agents_md + sources)
//!   .docsee/<name>/    (one mirror per source)
//! ```
//!
//! # API pattern
//!
//! Every function takes the project root explicitly (`fn_at(root: &Path, …)`).
//! Nothing here consults the process working directory; the CLI resolves the
//! root once and passes it down, and tests pass a `TempDir`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, ConfigError};
use crate::types::Config;

/// File name of the registry inside the project root.
pub const CONFIG_FILENAME: &str = "docsee.yaml";

/// Outcome of [`init_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyExists,
}

/// `<root>/docsee.yaml` — pure, no I/O.
pub fn config_path_at(root: &Path) -> PathBuf {
    root.join(CONFIG_FILENAME)
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load `<root>/docsee.yaml`.
///
/// Returns `ConfigError::NotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(root: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(root);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::NotFound { path });
        }
        Err(err) => return Err(io_err(path, err)),
    };
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

/// Load the registry, creating a default one first if none exists.
pub fn load_or_init_at(root: &Path) -> Result<Config, ConfigError> {
    match load_at(root) {
        Err(ConfigError::NotFound { .. }) => {
            let config = Config::default();
            save_at(root, &config)?;
            Ok(config)
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save the registry to `<root>/docsee.yaml`.
///
/// Write flow: serialize → `docsee.yaml.tmp` sibling → `rename`.
/// `.tmp` is always in the same directory as the target (same filesystem — no EXDEV).
pub fn save_at(root: &Path, config: &Config) -> Result<(), ConfigError> {
    let path = config_path_at(root);
    let tmp_path = path.with_file_name(format!("{CONFIG_FILENAME}.tmp"));

    let yaml = serde_yaml::to_string(config)?;
    std::fs::create_dir_all(root).map_err(|e| io_err(root, e))?;
    std::fs::write(&tmp_path, yaml).map_err(|e| io_err(&tmp_path, e))?;
    if let Err(e) = std::fs::rename(&tmp_path, &path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

/// Create `<root>/docsee.yaml` with default settings.
///
/// Idempotent: an existing file is left untouched.
pub fn init_at(root: &Path) -> Result<InitOutcome, ConfigError> {
    let path = config_path_at(root);
    if path.exists() {
        return Ok(InitOutcome::AlreadyExists);
    }
    save_at(root, &Config::default())?;
    Ok(InitOutcome::Created)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Source, DEFAULT_AGENTS_MD};
    use tempfile::TempDir;

    fn make_root() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    #[test]
    fn config_path_is_correct() {
        let root = make_root();
        assert!(config_path_at(root.path()).ends_with("docsee.yaml"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let root = make_root();
        let mut config = Config::default();
        config
            .add_source(Source::new("ai", "vercel/ai", "content/docs", "main"))
            .unwrap();
        save_at(root.path(), &config).expect("save");
        let loaded = load_at(root.path()).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn atomic_write_cleans_up_tmp() {
        let root = make_root();
        save_at(root.path(), &Config::default()).expect("save");
        let tmp = root.path().join("docsee.yaml.tmp");
        assert!(!tmp.exists(), ".tmp must be gone after successful save");
    }

    #[test]
    fn load_missing_returns_not_found() {
        let root = make_root();
        let err = load_at(root.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn load_or_init_creates_default() {
        let root = make_root();
        let config = load_or_init_at(root.path()).expect("load_or_init");
        assert_eq!(config.agents_md, DEFAULT_AGENTS_MD);
        assert!(config_path_at(root.path()).exists());
    }

    #[test]
    fn init_is_idempotent() {
        let root = make_root();
        assert_eq!(init_at(root.path()).unwrap(), InitOutcome::Created);
        std::fs::write(config_path_at(root.path()), "agents_md: ./CLAUDE.md\n").unwrap();
        assert_eq!(init_at(root.path()).unwrap(), InitOutcome::AlreadyExists);
        let loaded = load_at(root.path()).unwrap();
        assert_eq!(loaded.agents_md, "./CLAUDE.md", "init must not overwrite");
    }
}
