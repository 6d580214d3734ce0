//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for application-level glue (config, server, CLI).
///
/// Library modules return their own typed errors; everything above them adds
/// context via `.context()` and `.with_context()`.
pub type Result<T> = anyhow::Result<T>;

/// Errors raised while reading docset bundles from disk.
///
/// Only [`DocsetError::ReadDir`] ever escapes a scan. The other variants describe
/// a single bundle and are logged before that bundle is skipped.
#[derive(Debug, thiserror::Error)]
pub enum DocsetError {
    /// The docsets directory itself could not be listed.
    #[error("failed to read docsets directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A bundle's metadata file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadMeta {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A bundle's metadata file is not valid JSON or lacks a title.
    #[error("malformed docset metadata {}: {source}", path.display())]
    ParseMeta {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A bundle's property list exists but could not be decoded.
    #[error("malformed property list {}: {source}", path.display())]
    ParsePlist {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },
}

/// Errors raised when handing a query off to the documentation viewer.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("can't execute '{program}' - is Zeal installed?")]
    NotInstalled { program: String },
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
