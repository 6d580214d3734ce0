//! Launcher-facing coordinator: turns raw user input into a list of selectable
//! docsets.
//!
//! Input after the launcher keyword has the shape `<keyword> <query text>`. The
//! keyword part is fuzzy-matched against every indexed keyword; each result
//! either completes the keyword or, when query text is present, opens the
//! viewer on the chosen docset.

use crate::docset::{Clock, Docset, DocsetRegistry, RegistryIndex, SystemClock};
use crate::search::filter_and_rank;
use crate::viewer::{DocViewer, query_docset};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Number of docsets shown before the list is truncated.
pub const MAX_DOCSETS_VISIBLE: usize = 10;

/// Default keyword the launcher is bound to.
pub const DEFAULT_LAUNCHER_KEYWORD: &str = "zl";

/// Raw launcher input split into a keyword fragment and free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub keyword: String,
    pub query: String,
}

impl UserInput {
    /// Splits on the first space. Missing parts become empty strings.
    pub fn parse(input: Option<&str>) -> Self {
        let Some(input) = input.filter(|s| !s.is_empty()) else {
            return Self::default();
        };
        match input.split_once(' ') {
            Some((keyword, query)) => Self {
                keyword: keyword.to_string(),
                query: query.to_string(),
            },
            None => Self {
                keyword: input.to_string(),
                query: String::new(),
            },
        }
    }
}

/// What happens when a result is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultAction {
    /// Replace the launcher input with `query`.
    CompleteInput { query: String },
    /// Open the viewer on `keyword` with `query`.
    OpenViewer { keyword: String, query: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub name: String,
    pub description: String,
    pub icon: Option<PathBuf>,
    pub action: ResultAction,
}

/// Result list shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultList {
    pub items: Vec<ResultItem>,
    /// Number of matching docsets cut off by the visibility cap.
    pub hidden: usize,
}

impl ResultList {
    /// Summary line for truncated results, if any were hidden.
    pub fn hidden_summary(&self) -> Option<String> {
        match self.hidden {
            0 => None,
            1 => Some("...1 more docset available, refine the query to filter...".to_string()),
            n => Some(format!(
                "...{} more docsets available, refine the query to filter...",
                n
            )),
        }
    }
}

/// Docsets whose keywords match `fragment`, best first, each docset once.
///
/// An empty fragment lists every docset sorted by title.
pub fn matching_docsets<'a>(index: &'a RegistryIndex, fragment: &str) -> Vec<&'a Docset> {
    if fragment.is_empty() {
        return index.docsets_sorted();
    }

    let ranked = filter_and_rank(index.known_keywords().iter().map(String::as_str), fragment);
    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .filter_map(|keyword| index.lookup_by_keyword(keyword))
        .filter(|docset| seen.insert(docset.title()))
        .collect()
}

/// Coordinates the registry, the matcher and the viewer for one launcher.
pub struct DocsetLauncher<C: Clock = SystemClock> {
    registry: DocsetRegistry<C>,
    viewer: Arc<dyn DocViewer>,
    launcher_keyword: String,
    max_visible: usize,
}

impl<C: Clock> std::fmt::Debug for DocsetLauncher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsetLauncher")
            .field("registry", &self.registry)
            .field("launcher_keyword", &self.launcher_keyword)
            .field("max_visible", &self.max_visible)
            .finish_non_exhaustive()
    }
}

impl<C: Clock> DocsetLauncher<C> {
    pub fn new(registry: DocsetRegistry<C>, viewer: Arc<dyn DocViewer>) -> Self {
        Self {
            registry,
            viewer,
            launcher_keyword: DEFAULT_LAUNCHER_KEYWORD.to_string(),
            max_visible: MAX_DOCSETS_VISIBLE,
        }
    }

    pub fn with_launcher_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.launcher_keyword = keyword.into();
        self
    }

    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible;
        self
    }

    pub fn registry(&self) -> &DocsetRegistry<C> {
        &self.registry
    }

    /// Builds the result list for raw launcher input.
    pub fn resolve(&self, input: Option<&str>) -> ResultList {
        let input = UserInput::parse(input);
        let index = self.registry.get();
        let docsets = matching_docsets(&index, &input.keyword);

        let hidden = docsets.len().saturating_sub(self.max_visible);
        let items = docsets
            .into_iter()
            .take(self.max_visible)
            .map(|docset| self.result_item(docset, &input.query))
            .collect();

        ResultList { items, hidden }
    }

    /// Best-ranked docset for a keyword fragment.
    pub fn best_match(&self, fragment: &str) -> Option<Docset> {
        let index = self.registry.get();
        matching_docsets(&index, fragment).first().map(|d| (*d).clone())
    }

    /// Opens the viewer on the best docset for `fragment`. Returns the docset
    /// that was opened, or `None` if nothing matched or the viewer failed.
    pub fn open(&self, fragment: &str, query: &str) -> Option<Docset> {
        let docset = self.best_match(fragment)?;
        query_docset(self.viewer.as_ref(), docset.default_keyword(), query).then_some(docset)
    }

    /// Runs the action attached to a result item.
    pub fn activate(&self, action: &ResultAction) -> bool {
        match action {
            ResultAction::OpenViewer { keyword, query } => {
                query_docset(self.viewer.as_ref(), keyword, query)
            }
            ResultAction::CompleteInput { .. } => false,
        }
    }

    /// Applies a changed docsets-path preference, rescanning immediately.
    pub fn docsets_path_changed(&self, path: impl Into<PathBuf>) -> bool {
        self.registry.set_root(path).is_some()
    }

    fn result_item(&self, docset: &Docset, query: &str) -> ResultItem {
        let action = if query.is_empty() {
            ResultAction::CompleteInput {
                query: format!("{} {} ", self.launcher_keyword, docset.default_keyword()),
            }
        } else {
            ResultAction::OpenViewer {
                keyword: docset.default_keyword().to_string(),
                query: query.to_string(),
            }
        };

        ResultItem {
            name: format!("{} search", docset.title()),
            description: format!("Open Zeal and search {} documentation", docset.title()),
            icon: docset.icon().map(PathBuf::from),
            action,
        }
    }
}
