//! Hand-off to the external documentation viewer.

use crate::error::ViewerError;
use std::io::ErrorKind;
use std::process::Command;
use tracing::{debug, error};

/// Default viewer executable.
pub const DEFAULT_VIEWER: &str = "zeal";

/// Something that can show documentation for a keyword and query.
pub trait DocViewer: Send + Sync {
    fn open(&self, keyword: &str, query: &str) -> Result<(), ViewerError>;
}

/// The argument Zeal expects on its command line: `keyword:query`.
pub fn invocation_string(keyword: &str, query: &str) -> String {
    format!("{}:{}", keyword, query)
}

/// Launches the Zeal executable with a single `keyword:query` argument.
#[derive(Debug, Clone)]
pub struct ZealViewer {
    program: String,
}

impl ZealViewer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for ZealViewer {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWER)
    }
}

impl DocViewer for ZealViewer {
    fn open(&self, keyword: &str, query: &str) -> Result<(), ViewerError> {
        let argument = invocation_string(keyword, query);
        debug!("Running {} {:?}", self.program, argument);

        let mut child = Command::new(&self.program)
            .arg(&argument)
            .spawn()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => ViewerError::NotInstalled {
                    program: self.program.clone(),
                },
                _ => ViewerError::Spawn {
                    program: self.program.clone(),
                    source,
                },
            })?;

        // Exit status is irrelevant; reap the child off-thread so it doesn't linger.
        std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                debug!("Viewer process wait failed: {}", e);
            }
        });
        Ok(())
    }
}

/// Opens `query` in the docset selected by `keyword`.
///
/// Failures are logged and otherwise swallowed; the return value only tells the
/// caller whether the viewer was started.
pub fn query_docset(viewer: &dyn DocViewer, keyword: &str, query: &str) -> bool {
    match viewer.open(keyword, query) {
        Ok(()) => true,
        Err(e) => {
            error!("{}", e);
            false
        }
    }
}
