//! docsee core library — domain types, `docsee.yaml` persistence, errors.
//!
//! - [`types`] — [`Source`], [`Config`] and the [`SourceName`] newtype
//! - [`error`] — [`ConfigError`]
//! - [`registry`] — load / save / init

pub mod error;
pub mod registry;
pub mod types;

pub use error::ConfigError;
pub use types::{normalize_root, short_sha, Config, Source, SourceName, MIRROR_DIR};
