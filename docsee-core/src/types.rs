//! Domain types for the docsee config registry.
//!
//! All types are serializable/deserializable via serde + serde_yaml and map
//! one-to-one onto the keys of `docsee.yaml`.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory (relative to the project root) holding every source mirror.
pub const MIRROR_DIR: &str = ".docsee";

/// Shared document used when `docsee.yaml` does not name one.
pub const DEFAULT_AGENTS_MD: &str = "./AGENTS.md";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a tracked documentation source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceName(pub String);

impl SourceName {
    /// Base used for the block markers in the shared document.
    ///
    /// Runs of spaces and underscores collapse to a single `-`, then the
    /// whole name is uppercased: `"my docs"` → `"MY-DOCS"`.
    pub fn marker_base(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut in_run = false;
        for ch in self.0.chars() {
            if ch == ' ' || ch == '_' {
                if !in_run {
                    out.push('-');
                }
                in_run = true;
            } else {
                in_run = false;
                out.extend(ch.to_uppercase());
            }
        }
        out
    }

    /// Check the name can serve as a single mirror directory component.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reason = match self.0.as_str() {
            name if name.trim().is_empty() => Some("name is empty"),
            "." | ".." => Some("name is a relative directory reference"),
            name if name.contains(['/', '\\']) => Some("name contains a path separator"),
            _ => None,
        };
        match reason {
            Some(reason) => Err(ConfigError::InvalidName {
                name: self.0.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Human-readable, uppercased name: `"next-js_docs"` → `"NEXT JS DOCS"`.
    pub fn display_name(&self) -> String {
        self.0
            .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::to_uppercase)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SourceName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SourceName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// One tracked remote documentation subtree and its local mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: SourceName,
    /// `owner/name` reference to the remote repository.
    pub repo: String,
    /// Subdirectory root inside the remote repository, without trailing slash.
    pub path: String,
    /// Remote ref to track.
    pub branch: String,
    /// Mirror directory relative to the project root, `./.docsee/<name>`.
    pub local: String,
    /// Last fully synchronized remote revision; `None` until the first sync.
    pub commit: Option<String>,
}

impl Source {
    /// Build a never-synced source whose mirror lives under [`MIRROR_DIR`].
    pub fn new(
        name: impl Into<SourceName>,
        repo: impl Into<String>,
        path: &str,
        branch: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let local = format!("./{MIRROR_DIR}/{}", name.0);
        Self {
            name,
            repo: repo.into(),
            path: normalize_root(path).to_string(),
            branch: branch.into(),
            local,
            commit: None,
        }
    }

    /// Mirror directory for a project rooted at `root`.
    ///
    /// `local` must name exactly one directory directly under
    /// [`MIRROR_DIR`], so a mirror can never contain another source's
    /// mirror or reach outside `.docsee/`.
    pub fn mirror_dir(&self, root: &Path) -> Result<PathBuf, ConfigError> {
        let unsafe_mirror = || ConfigError::UnsafeMirror {
            name: self.name.0.clone(),
            local: self.local.clone(),
        };
        let mut parts = Path::new(&self.local)
            .components()
            .filter(|c| !matches!(c, Component::CurDir));
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Component::Normal(dir)), Some(Component::Normal(leaf)), None)
                if dir == MIRROR_DIR && !leaf.to_string_lossy().contains('\\') =>
            {
                Ok(root.join(MIRROR_DIR).join(leaf))
            }
            _ => Err(unsafe_mirror()),
        }
    }
}

/// Strip trailing slashes from a remote subdirectory path.
pub fn normalize_root(path: &str) -> &str {
    path.trim_end_matches('/')
}

/// First seven characters of a commit id, for display.
pub fn short_sha(commit: &str) -> &str {
    commit.get(..7).unwrap_or(commit)
}

fn default_agents_md() -> String {
    DEFAULT_AGENTS_MD.to_string()
}

/// Root of `docsee.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Shared document receiving the index blocks, relative to the project root.
    #[serde(default = "default_agents_md")]
    pub agents_md: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agents_md: default_agents_md(),
            sources: Vec::new(),
        }
    }
}

impl Config {
    /// Absolute path of the shared document for a project rooted at `root`.
    pub fn agents_md_path(&self, root: &Path) -> PathBuf {
        root.join(&self.agents_md)
    }

    pub fn find_source(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name.0 == name)
    }

    pub fn find_source_mut(&mut self, name: &str) -> Option<&mut Source> {
        self.sources.iter_mut().find(|s| s.name.0 == name)
    }

    /// Register a new source.
    ///
    /// Rejects names that are not a single path component, an exact duplicate name, and any name whose marker base equals
    /// that of an existing source (e.g. `"my docs"` next to `"my_docs"`).
    pub fn add_source(&mut self, source: Source) -> Result<(), ConfigError> {
        source.name.validate()?;
        if self.find_source(&source.name.0).is_some() {
            return Err(ConfigError::DuplicateSource {
                name: source.name.0,
            });
        }
        let marker = source.name.marker_base();
        if let Some(existing) = self
            .sources
            .iter()
            .find(|s| s.name.marker_base() == marker)
        {
            return Err(ConfigError::MarkerCollision {
                name: source.name.0,
                existing: existing.name.0.clone(),
                marker,
            });
        }
        self.sources.push(source);
        Ok(())
    }

    /// Resolve the sources a command should act on: every source, or the
    /// single named one.
    pub fn select(&self, name: Option<&str>) -> Result<Vec<&Source>, ConfigError> {
        match name {
            None => Ok(self.sources.iter().collect()),
            Some(name) => self
                .find_source(name)
                .map(|s| vec![s])
                .ok_or_else(|| ConfigError::SourceNotFound {
                    name: name.to_string(),
                }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
