//! Shared test fixtures and utilities for integration tests.
//!
//! [`TempDocsets`] builds a throwaway docsets directory with bundles laid out
//! the way Zeal installs them. [`ManualClock`] lets registry tests move time
//! forward without sleeping, and [`RecordingViewer`] captures viewer hand-offs.

use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use zeal_docs::docset::Clock;
use zeal_docs::{DocViewer, ViewerError};

const PLIST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
{entries}
</dict>
</plist>
"#;

/// A temporary docsets directory for test isolation.
///
/// Cleaned up on drop.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempDocsets {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempDocsets {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes a file relative to the root, creating parent directories.
    ///
    /// # Panics
    /// Panics if writing fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    pub fn create_dir(&self, path: &str) {
        std::fs::create_dir_all(self.root.join(path))
            .unwrap_or_else(|e| panic!("Failed to create directory '{}': {}", path, e));
    }

    /// Creates `<name>.docset/meta.json` with the given title and, if non-empty,
    /// `extra.keywords`.
    pub fn create_docset(&self, name: &str, title: &str, keywords: &[&str]) -> PathBuf {
        let meta = if keywords.is_empty() {
            serde_json::json!({ "name": name, "title": title, "version": "1.0" })
        } else {
            serde_json::json!({
                "name": name,
                "title": title,
                "version": "1.0",
                "extra": { "indexFilePath": "index.html", "keywords": keywords },
            })
        };
        self.create_meta(name, &meta.to_string())
    }

    /// Creates `<name>.docset/meta.json` with raw content.
    pub fn create_meta(&self, name: &str, content: &str) -> PathBuf {
        self.create_file(&format!("{}.docset/meta.json", name), content);
        self.bundle(name)
    }

    /// Writes `Contents/Info.plist` with a `CFBundleIdentifier`, or without one
    /// when `identifier` is `None`.
    pub fn create_plist(&self, name: &str, identifier: Option<&str>) {
        let mut entries = format!(
            "    <key>CFBundleName</key>\n    <string>{}</string>",
            name
        );
        if let Some(id) = identifier {
            entries.push_str(&format!(
                "\n    <key>CFBundleIdentifier</key>\n    <string>{}</string>",
                id
            ));
        }
        self.create_file(
            &format!("{}.docset/Contents/Info.plist", name),
            &PLIST_TEMPLATE.replace("{entries}", &entries),
        );
    }

    pub fn create_icon(&self, name: &str) -> PathBuf {
        self.create_file(&format!("{}.docset/icon@2x.png", name), "\u{89}PNG");
        self.bundle(name).join("icon@2x.png")
    }

    pub fn bundle(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.docset", name))
    }
}

/// Two installed docsets: Python with keywords and an icon, Lua with a plist
/// identifier and no icon.
#[allow(dead_code)]
#[fixture]
pub fn python_and_lua() -> TempDocsets {
    let docsets = TempDocsets::new();
    docsets.create_docset("Python_3", "Python 3", &["python", "python3", "py"]);
    docsets.create_icon("Python_3");
    docsets.create_docset("Lua", "Lua", &[]);
    docsets.create_plist("Lua", Some("lua"));
    docsets
}

/// Clock that only moves when told to.
#[allow(dead_code)]
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}

/// Viewer that records invocations instead of launching a process.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingViewer {
    calls: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[allow(dead_code)]
impl RecordingViewer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A viewer that reports the executable as missing.
    pub fn missing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl DocViewer for RecordingViewer {
    fn open(&self, keyword: &str, query: &str) -> Result<(), ViewerError> {
        self.calls
            .lock()
            .unwrap()
            .push((keyword.to_string(), query.to_string()));
        if self.fail {
            return Err(ViewerError::NotInstalled {
                program: "zeal".to_string(),
            });
        }
        Ok(())
    }
}
