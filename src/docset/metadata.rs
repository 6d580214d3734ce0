//! Typed schemas for the metadata files shipped inside a docset bundle.

use crate::error::DocsetError;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Metadata file name inside a bundle.
pub const META_FILE: &str = "meta.json";

/// Property list path inside a bundle, relative to the bundle root.
pub const PLIST_FILE: &str = "Contents/Info.plist";

/// `meta.json` as written by Zeal's docset downloader.
///
/// Only the fields the registry needs are decoded; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DocsetMeta {
    pub title: String,
    #[serde(default)]
    pub extra: Option<MetaExtra>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaExtra {
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

impl DocsetMeta {
    /// Keywords from `extra.keywords`, if present and non-empty.
    pub fn keywords(&self) -> Option<&[String]> {
        self.extra
            .as_ref()
            .and_then(|extra| extra.keywords.as_deref())
            .filter(|keywords| !keywords.is_empty())
    }
}

/// The subset of `Info.plist` used for keyword fallback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InfoPlist {
    #[serde(rename = "CFBundleIdentifier", default)]
    pub bundle_identifier: Option<String>,
}

/// Reads `meta.json` from a bundle.
///
/// Returns `Ok(None)` when the file does not exist, including when `bundle` is
/// not a directory: a bundle without metadata is treated as not installed yet.
pub fn read_meta(bundle: &Path) -> Result<Option<DocsetMeta>, DocsetError> {
    let path = bundle.join(META_FILE);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            return Ok(None);
        }
        Err(source) => return Err(DocsetError::ReadMeta { path, source }),
    };

    parse_meta(&content)
        .map(Some)
        .map_err(|source| DocsetError::ParseMeta { path, source })
}

/// Parses the contents of a `meta.json` file.
pub fn parse_meta(content: &str) -> Result<DocsetMeta, serde_json::Error> {
    serde_json::from_str(content)
}

/// Reads the bundle identifier from `Contents/Info.plist`.
///
/// Returns `Ok(None)` when the property list is missing or has no identifier.
/// A property list that exists but cannot be decoded is an error.
pub fn read_bundle_identifier(bundle: &Path) -> Result<Option<String>, DocsetError> {
    let path: PathBuf = bundle.join(PLIST_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    let plist: InfoPlist =
        plist::from_file(&path).map_err(|source| DocsetError::ParsePlist { path, source })?;
    Ok(plist.bundle_identifier.filter(|id| !id.is_empty()))
}
