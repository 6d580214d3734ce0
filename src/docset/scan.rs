//! Docset discovery: walks the docsets directory and turns bundles into [`Docset`]s.

use super::metadata::{DocsetMeta, read_bundle_identifier, read_meta};
use crate::error::DocsetError;
use crate::path::expand_tilde;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Directory name suffix identifying a docset bundle.
pub const DOCSET_SUFFIX: &str = ".docset";

/// Icon file name inside a bundle.
pub const ICON_FILE: &str = "icon@2x.png";

/// One installed documentation bundle.
///
/// Always carries at least one keyword; the first is the canonical keyword used
/// when the viewer is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docset {
    title: String,
    keywords: Vec<String>,
    icon: Option<PathBuf>,
}

impl Docset {
    /// Creates a docset, falling back to [`title_keyword`] when `keywords` is empty.
    pub fn new(title: impl Into<String>, keywords: Vec<String>, icon: Option<PathBuf>) -> Self {
        let title = title.into();
        let keywords = if keywords.is_empty() {
            vec![title_keyword(&title)]
        } else {
            keywords
        };
        Self {
            title,
            keywords,
            icon,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// The canonical keyword (first in the list).
    pub fn default_keyword(&self) -> &str {
        &self.keywords[0]
    }

    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }
}

/// Last-resort keyword derived from a title: lowercased, spaces removed.
pub fn title_keyword(title: &str) -> String {
    title.replace(' ', "").to_lowercase()
}

/// Scans a docsets directory and returns one [`Docset`] per readable bundle, in
/// directory-listing order.
///
/// A leading `~` in `dir` is expanded. Bundles without `meta.json` are skipped
/// silently; bundles whose metadata or property list cannot be decoded are logged
/// and skipped. Only failure to list `dir` itself is returned as an error.
pub fn scan(dir: impl AsRef<Path>) -> Result<Vec<Docset>, DocsetError> {
    let dir = expand_tilde(dir.as_ref());
    let entries = std::fs::read_dir(&dir).map_err(|source| DocsetError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut docsets = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let is_bundle = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(DOCSET_SUFFIX));
        if !is_bundle {
            continue;
        }

        match load_bundle(&entry.path()) {
            Ok(Some(docset)) => {
                debug!(
                    "Found docset '{}' with keywords {:?}",
                    docset.title, docset.keywords
                );
                docsets.push(docset);
            }
            Ok(None) => {}
            Err(e) => error!("{}", e),
        }
    }

    Ok(docsets)
}

/// Loads a single bundle. `Ok(None)` means the bundle has no metadata file.
pub fn load_bundle(bundle: &Path) -> Result<Option<Docset>, DocsetError> {
    let Some(meta) = read_meta(bundle)? else {
        return Ok(None);
    };

    let keywords = resolve_keywords(bundle, &meta)?;
    let icon = bundle.join(ICON_FILE);
    let icon = icon.is_file().then_some(icon);

    Ok(Some(Docset::new(meta.title, keywords, icon)))
}

/// Keyword resolution order: `extra.keywords`, then the property list's bundle
/// identifier. An empty result makes [`Docset::new`] fall back to the title.
fn resolve_keywords(bundle: &Path, meta: &DocsetMeta) -> Result<Vec<String>, DocsetError> {
    if let Some(keywords) = meta.keywords() {
        return Ok(keywords.to_vec());
    }

    Ok(read_bundle_identifier(bundle)?.into_iter().collect())
}
