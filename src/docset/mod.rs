//! Docset discovery, metadata extraction and the cached registry index.

pub mod metadata;
pub mod registry;
pub mod scan;

pub use metadata::{DocsetMeta, InfoPlist, MetaExtra};
pub use registry::{
    CACHE_TTL, Clock, DocsetRegistry, RegistryIndex, SystemClock, lookup_by_keyword,
};
pub use scan::{DOCSET_SUFFIX, Docset, ICON_FILE, load_bundle, scan, title_keyword};
