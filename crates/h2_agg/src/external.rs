//! Loose files overriding archive entries
//!

use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use h2_icn::{IcnEncoder, IcnEncoderOptions};

use crate::error::Result;

/// Asset types that can be rebuilt from an override directory
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExternalKind {
    /// ICN sprite container, rebuilt from images
    Icn,
}

impl ExternalKind {
    /// Look up the kind for an upper-case type tag such as `ICN`
    pub fn from_tag(tag: &str) -> Option<ExternalKind> {
        match tag {
            "ICN" => Some(ExternalKind::Icn),
            _ => None,
        }
    }

    /// Type tag of an override name, the part after its last `.`
    pub fn tag_of(name: &str) -> &str {
        name.rsplit('.').next().unwrap_or(name)
    }

    fn build(self, dir: &Path, encoder: &IcnEncoder) -> Result<Vec<u8>> {
        match self {
            ExternalKind::Icn => Ok(encoder.encode(dir)?),
        }
    }
}

/// Replacement bytes for one archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEntry {
    data: Vec<u8>,
    from_directory: bool,
}

impl ExternalEntry {
    /// The replacement bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the entry was built from an override directory on disk
    pub fn is_from_directory(&self) -> bool {
        self.from_directory
    }

    /// Unwrap the replacement bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Collection of overrides, keyed by upper-case entry name
///
/// Entries are only ever added; the first entry registered for a name wins.
#[derive(Debug, Clone, Default)]
pub struct ExternalStore {
    entries: IndexMap<Box<str>, ExternalEntry>,
}

impl ExternalStore {
    /// Create an empty store
    pub fn new() -> ExternalStore {
        ExternalStore::default()
    }

    /// Directory that may hold overrides for `archive_path`.
    ///
    /// This is the archive path without its extension, and only exists when the extension matches
    /// `extension` (case-insensitively).
    pub fn directory_for(archive_path: &Path, extension: &str) -> Option<PathBuf> {
        let ext = archive_path.extension()?.to_str()?;
        ext.eq_ignore_ascii_case(extension)
            .then(|| archive_path.with_extension(""))
    }

    /// Scan the override directory belonging to `archive_path`.
    ///
    /// Every subdirectory whose type tag has an encoder is encoded; directories that fail to
    /// encode or produce nothing are skipped.
    #[instrument(skip_all, fields(archive = %archive_path.as_ref().display()))]
    pub fn collect(
        archive_path: impl AsRef<Path>,
        extension: &str,
        options: &IcnEncoderOptions,
    ) -> ExternalStore {
        let mut store = ExternalStore::new();

        let Some(dir) = Self::directory_for(archive_path.as_ref(), extension) else {
            debug!("archive extension does not allow overrides");
            return store;
        };

        if !dir.is_dir() {
            debug!("no override directory at {}", dir.display());
            return store;
        }

        let encoder = IcnEncoder::new(options.clone());
        let children = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| {
                e.map_err(|err| warn!("skipping unreadable override: {err}"))
                    .ok()
            })
            .filter(|e| e.path().is_dir());

        for child in children {
            let name = child.file_name().to_string_lossy().to_ascii_uppercase();

            let Some(kind) = ExternalKind::from_tag(ExternalKind::tag_of(&name)) else {
                debug!("no encoder for {name}");
                continue;
            };

            match kind.build(child.path(), &encoder) {
                Ok(data) if data.is_empty() => debug!("{name} produced no data"),
                Ok(data) => {
                    let len = data.len();
                    if store.register(name.as_str(), data, true) {
                        info!("registered override {name} ({len} bytes)");
                    } else {
                        warn!(
                            "{name} already has an override, skipping {}",
                            child.path().display()
                        );
                    }
                }
                Err(err) => warn!("unable to build override {name}: {err}"),
            }
        }

        store
    }

    /// Add an override that did not come from disk.
    ///
    /// Returns false when `name` already has an override, which is kept.
    pub fn insert(&mut self, name: impl Into<Box<str>>, data: Vec<u8>) -> bool {
        self.register(name, data, false)
    }

    fn register(&mut self, name: impl Into<Box<str>>, data: Vec<u8>, from_directory: bool) -> bool {
        let mut inserted = false;
        self.entries.entry(name.into()).or_insert_with(|| {
            inserted = true;
            ExternalEntry {
                data,
                from_directory,
            }
        });
        inserted
    }

    /// Get the override for `name`
    pub fn get(&self, name: &str) -> Option<&ExternalEntry> {
        self.entries.get(name)
    }

    /// Whether `name` has an override
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of overrides
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no override
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of all overrides in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_ref())
    }
}
