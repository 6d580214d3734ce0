//! MCP server exposing docset lookup and the viewer hand-off as tools.

use crate::launcher::{DocsetLauncher, ResultAction, ResultList};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
};
use std::fmt::Write as _;
use std::sync::Arc;

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ListDocsetsRequest {
    /// Launcher input: a keyword fragment optionally followed by a space and query text.
    /// Omit to list every installed docset.
    #[serde(default)]
    pub input: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct OpenDocsRequest {
    /// Keyword fragment selecting the docset (fuzzy matched)
    pub keyword: String,
    /// Text to search for inside the docset
    pub query: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SetDocsetsPathRequest {
    /// Directory containing *.docset bundles; a leading `~` is expanded
    pub path: String,
}

/// MCP server over a shared [`DocsetLauncher`].
#[derive(Clone)]
pub struct DocsetServer {
    launcher: Arc<DocsetLauncher>,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocsetServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsetServer")
            .field("launcher", &self.launcher)
            .finish()
    }
}

#[tool_router]
impl DocsetServer {
    pub fn new(launcher: DocsetLauncher) -> Self {
        Self {
            launcher: Arc::new(launcher),
            tool_router: Self::tool_router(),
        }
    }

    pub fn launcher(&self) -> &Arc<DocsetLauncher> {
        &self.launcher
    }

    #[tool(
        description = "List installed Zeal docsets whose keywords fuzzy-match the given keyword fragment, best match first. Input has the form '<keyword> [query]'."
    )]
    async fn list_docsets(
        &self,
        Parameters(ListDocsetsRequest { input }): Parameters<ListDocsetsRequest>,
    ) -> std::result::Result<String, String> {
        let launcher = Arc::clone(&self.launcher);
        let results = tokio::task::spawn_blocking(move || launcher.resolve(input.as_deref()))
            .await
            .map_err(|e| format!("Docset lookup failed: {}", e))?;
        Ok(format_result_list(&results))
    }

    #[tool(
        description = "Open Zeal on the docset best matching the keyword fragment and search it for the query text."
    )]
    async fn open_docs(
        &self,
        Parameters(OpenDocsRequest { keyword, query }): Parameters<OpenDocsRequest>,
    ) -> std::result::Result<String, String> {
        let launcher = Arc::clone(&self.launcher);
        let fragment = keyword.clone();
        let opened = tokio::task::spawn_blocking(move || launcher.open(&fragment, &query))
            .await
            .map_err(|e| format!("Viewer hand-off failed: {}", e))?;

        match opened {
            Some(docset) => Ok(format!(
                "Opened {} ({}) in Zeal",
                docset.title(),
                docset.default_keyword()
            )),
            None => Err(format!(
                "No docset could be opened for keyword '{}'. Use list_docsets to see installed docsets.",
                keyword
            )),
        }
    }

    #[tool(description = "Change the directory scanned for Zeal docsets and re-index immediately.")]
    async fn set_docsets_path(
        &self,
        Parameters(SetDocsetsPathRequest { path }): Parameters<SetDocsetsPathRequest>,
    ) -> std::result::Result<String, String> {
        let launcher = Arc::clone(&self.launcher);
        let display = path.clone();
        let (changed, count) = tokio::task::spawn_blocking(move || {
            let changed = launcher.docsets_path_changed(path);
            (changed, launcher.registry().get().len())
        })
        .await
        .map_err(|e| format!("Re-index failed: {}", e))?;

        if changed {
            Ok(format!("Docsets path set to {}: {} docsets indexed", display, count))
        } else {
            Ok(format!("Docsets path unchanged ({} docsets indexed)", count))
        }
    }
}

#[tool_handler]
impl ServerHandler for DocsetServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "zeal-docs: find locally installed Zeal docsets by fuzzy keyword and open searches in Zeal. \
                 Use list_docsets to discover keywords, then open_docs to search.",
            )
    }
}

/// Renders a result list as plain text, one docset per line.
pub fn format_result_list(results: &ResultList) -> String {
    if results.items.is_empty() {
        return "No matching docsets found.".to_string();
    }

    let mut out = String::new();
    for item in &results.items {
        let _ = write!(out, "• {}", item.name);
        match &item.action {
            ResultAction::CompleteInput { query } => {
                let _ = write!(out, " → `{}`", query.trim_end());
            }
            ResultAction::OpenViewer { keyword, query } => {
                let _ = write!(out, " → open `{}:{}`", keyword, query);
            }
        }
        out.push('\n');
    }
    if let Some(summary) = results.hidden_summary() {
        out.push_str(&summary);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docset::{CACHE_TTL, DocsetRegistry};
    use crate::launcher::ResultItem;
    use crate::viewer::ZealViewer;
    use assert2::check;

    fn item(name: &str, action: ResultAction) -> ResultItem {
        ResultItem {
            name: name.to_string(),
            description: String::new(),
            icon: None,
            action,
        }
    }

    #[tokio::test]
    async fn test_set_docsets_path_reports_count() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("Lua.docset");
        std::fs::create_dir(&bundle).unwrap();
        std::fs::write(bundle.join("meta.json"), r#"{"title": "Lua"}"#).unwrap();

        let registry = DocsetRegistry::new(dir.path().join("empty"), CACHE_TTL);
        let launcher = DocsetLauncher::new(registry, Arc::new(ZealViewer::default()));
        let server = DocsetServer::new(launcher);
        let path = dir.path().to_string_lossy().into_owned();

        let first = server
            .set_docsets_path(Parameters(SetDocsetsPathRequest { path: path.clone() }))
            .await;
        check!(first == Ok(format!("Docsets path set to {}: 1 docsets indexed", path)));

        let again = server
            .set_docsets_path(Parameters(SetDocsetsPathRequest { path }))
            .await;
        check!(again == Ok("Docsets path unchanged (1 docsets indexed)".to_string()));
    }

    #[test]
    fn test_format_empty() {
        check!(format_result_list(&ResultList::default()) == "No matching docsets found.");
    }

    #[test]
    fn test_format_items_and_summary() {
        let results = ResultList {
            items: vec![
                item(
                    "Python 3 search",
                    ResultAction::CompleteInput {
                        query: "zl python ".to_string(),
                    },
                ),
                item(
                    "Lua search",
                    ResultAction::OpenViewer {
                        keyword: "lua".to_string(),
                        query: "pairs".to_string(),
                    },
                ),
            ],
            hidden: 3,
        };

        let text = format_result_list(&results);
        check!(text.contains("• Python 3 search → `zl python`"));
        check!(text.contains("• Lua search → open `lua:pairs`"));
        check!(text.contains("...3 more docsets available"));
    }
}
