pub mod cli;
pub mod config;
pub mod docset;
pub mod error;
pub mod launcher;
pub mod path;
pub mod search;
pub mod server;
pub mod tracing;
pub mod viewer;

pub use config::Config;
pub use docset::{CACHE_TTL, Docset, DocsetRegistry, RegistryIndex, lookup_by_keyword, scan};
pub use error::{DocsetError, ViewerError};
pub use launcher::{DocsetLauncher, ResultAction, ResultItem, ResultList};
pub use search::filter_and_rank;
pub use viewer::{DocViewer, ZealViewer, query_docset};
