//! Cached docset index with time-based expiry.
//!
//! [`DocsetRegistry`] owns the current [`RegistryIndex`] and rebuilds it from
//! disk when it goes stale. Each refresh builds a complete new index and
//! publishes it as one immutable snapshot; readers holding an older `Arc` keep
//! a consistent view until they drop it.

use super::scan::{Docset, scan};
use arc_swap::ArcSwapOption;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long a scanned index stays fresh.
pub const CACHE_TTL: Duration = Duration::from_secs(60);

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Immutable snapshot of all installed docsets.
#[derive(Debug, Clone)]
pub struct RegistryIndex {
    docsets_by_title: HashMap<String, Docset>,
    title_by_keyword: HashMap<String, String>,
    known_keywords: BTreeSet<String>,
    expires_at: Instant,
}

impl RegistryIndex {
    /// Builds an index from scan output.
    ///
    /// Later docsets win on duplicate titles and duplicate keywords.
    pub fn build(docsets: Vec<Docset>, expires_at: Instant) -> Self {
        let mut docsets_by_title = HashMap::with_capacity(docsets.len());
        let mut title_by_keyword = HashMap::new();

        for docset in docsets {
            for keyword in docset.keywords() {
                title_by_keyword.insert(keyword.clone(), docset.title().to_string());
            }
            docsets_by_title.insert(docset.title().to_string(), docset);
        }

        let known_keywords = title_by_keyword.keys().cloned().collect();

        Self {
            docsets_by_title,
            title_by_keyword,
            known_keywords,
            expires_at,
        }
    }

    /// Resolves a full keyword to its docset. Pure map lookup.
    pub fn lookup_by_keyword(&self, keyword: &str) -> Option<&Docset> {
        self.title_by_keyword
            .get(keyword)
            .and_then(|title| self.docsets_by_title.get(title))
    }

    pub fn docset(&self, title: &str) -> Option<&Docset> {
        self.docsets_by_title.get(title)
    }

    /// Every keyword currently indexed, in lexical order.
    pub fn known_keywords(&self) -> &BTreeSet<String> {
        &self.known_keywords
    }

    pub fn title_by_keyword(&self) -> &HashMap<String, String> {
        &self.title_by_keyword
    }

    pub fn docsets_by_title(&self) -> &HashMap<String, Docset> {
        &self.docsets_by_title
    }

    /// All docsets ordered by title, for presentation.
    pub fn docsets_sorted(&self) -> Vec<&Docset> {
        let mut docsets: Vec<_> = self.docsets_by_title.values().collect();
        docsets.sort_by(|a, b| a.title().cmp(b.title()));
        docsets
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// True at or after the expiry instant.
    pub fn is_stale(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn len(&self) -> usize {
        self.docsets_by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docsets_by_title.is_empty()
    }
}

/// Free-function form of [`RegistryIndex::lookup_by_keyword`].
pub fn lookup_by_keyword<'a>(index: &'a RegistryIndex, keyword: &str) -> Option<&'a Docset> {
    index.lookup_by_keyword(keyword)
}

/// Cache-aside owner of the docset index.
///
/// The index is scanned lazily on the first [`get`](Self::get) and again whenever
/// it has expired. [`refresh`](Self::refresh) and [`set_root`](Self::set_root)
/// rebuild immediately regardless of the TTL.
pub struct DocsetRegistry<C: Clock = SystemClock> {
    root: RwLock<PathBuf>,
    ttl: Duration,
    clock: C,
    current: ArcSwapOption<RegistryIndex>,
    /// Serializes rebuilds so concurrent callers don't scan twice.
    refresh_lock: Mutex<()>,
}

impl<C: Clock> std::fmt::Debug for DocsetRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsetRegistry")
            .field("root", &self.root())
            .field("ttl", &self.ttl)
            .field("indexed", &self.current.load_full().map(|index| index.len()))
            .finish()
    }
}

impl DocsetRegistry<SystemClock> {
    /// Creates a registry over `root` using the wall clock.
    pub fn new(root: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self::with_clock(root, ttl, SystemClock)
    }
}

impl<C: Clock> DocsetRegistry<C> {
    pub fn with_clock(root: impl Into<PathBuf>, ttl: Duration, clock: C) -> Self {
        Self {
            root: RwLock::new(root.into()),
            ttl,
            clock,
            current: ArcSwapOption::empty(),
            refresh_lock: Mutex::new(()),
        }
    }

    /// The configured docsets directory (before tilde expansion).
    pub fn root(&self) -> PathBuf {
        self.root
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the current index, rescanning first if none exists or it is stale.
    pub fn get(&self) -> Arc<RegistryIndex> {
        if let Some(index) = self.fresh_index() {
            return index;
        }

        let _guard = self
            .refresh_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have rebuilt while we waited for the lock.
        if let Some(index) = self.fresh_index() {
            return index;
        }
        self.rebuild()
    }

    /// Rescans now, ignoring the TTL.
    pub fn refresh(&self) -> Arc<RegistryIndex> {
        let _guard = self
            .refresh_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.rebuild()
    }

    /// Points the registry at a new docsets directory.
    ///
    /// Returns `None` when `root` equals the current directory (nothing to do),
    /// otherwise the freshly scanned index.
    pub fn set_root(&self, root: impl Into<PathBuf>) -> Option<Arc<RegistryIndex>> {
        let root = root.into();
        {
            let mut current = self.root.write().unwrap_or_else(PoisonError::into_inner);
            if *current == root {
                return None;
            }
            info!("Docsets path changed to {}", root.display());
            *current = root;
        }
        Some(self.refresh())
    }

    fn fresh_index(&self) -> Option<Arc<RegistryIndex>> {
        self.current
            .load_full()
            .filter(|index| !index.is_stale(self.clock.now()))
    }

    /// Must be called with `refresh_lock` held.
    fn rebuild(&self) -> Arc<RegistryIndex> {
        let root = self.root();
        let docsets = load_docsets(&root);
        let index = Arc::new(RegistryIndex::build(docsets, self.clock.now() + self.ttl));

        info!(
            "Indexed {} docsets ({} keywords) from {}",
            index.len(),
            index.known_keywords().len(),
            root.display()
        );

        self.current.store(Some(Arc::clone(&index)));
        index
    }
}

/// An unreadable root yields an empty index rather than an error.
fn load_docsets(root: &Path) -> Vec<Docset> {
    match scan(root) {
        Ok(docsets) => docsets,
        Err(e) => {
            warn!("{}", e);
            debug!("Publishing empty docset index");
            Vec::new()
        }
    }
}
