use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::EmberlightError;

/// The fixed key under which the gallery list is persisted.
pub const GALLERY_STORAGE_KEY: &str = "imageGallery";

/// A narrow key-value interface over durable client-side storage.
///
/// The gallery only ever needs `get_item`/`set_item`, so the backing store
/// (a file, an embedded database, browser storage behind a bridge) is
/// swappable without touching the gallery's logic.
pub trait GalleryStore: Send + Sync {
    /// Reads the stored value for `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, EmberlightError>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), EmberlightError>;
}

/// A [`GalleryStore`] keeping each key as a JSON file inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, EmberlightError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl GalleryStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, EmberlightError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), EmberlightError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// An in-memory [`GalleryStore`] for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GalleryStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, EmberlightError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), EmberlightError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The user's durable, deduplicated collection of kept images.
///
/// Entries are data URLs, most recent first, deduplicated by value. The
/// whole list is loaded from the store once at construction and rewritten
/// in full on every mutation; there is no partial update and no teardown.
pub struct Gallery {
    store: Box<dyn GalleryStore>,
    images: Vec<String>,
}

impl Gallery {
    /// Loads the persisted gallery from `store`.
    ///
    /// Absent, unreadable, or unparseable state degrades to an empty
    /// gallery with a logged warning; corruption is never surfaced to the
    /// user.
    pub fn load(store: Box<dyn GalleryStore>) -> Self {
        let images = match store.get_item(GALLERY_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(images) => images,
                Err(error) => {
                    tracing::warn!(%error, "failed to parse persisted gallery, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "failed to read persisted gallery, starting empty");
                Vec::new()
            }
        };
        Self { store, images }
    }

    /// The gallery entries, most recent first.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the gallery holds no entries.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Whether `url` is already in the gallery.
    pub fn contains(&self, url: &str) -> bool {
        self.images.iter().any(|existing| existing == url)
    }

    /// Saves an image reference into the gallery.
    ///
    /// A duplicate is a no-op. Otherwise the entry is prepended and the
    /// entire list is rewritten to the store. A storage failure is logged
    /// and the entry is kept in memory only for this session; it is never
    /// surfaced to the user.
    pub fn save(&mut self, url: impl Into<String>) {
        let url = url.into();
        if self.contains(&url) {
            return;
        }
        self.images.insert(0, url);
        self.persist();
    }

    fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.images) {
            Ok(serialized) => serialized,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize gallery, entry kept in memory only");
                return;
            }
        };
        if let Err(error) = self.store.set_item(GALLERY_STORAGE_KEY, &serialized) {
            tracing::warn!(%error, "failed to persist gallery, entry kept in memory only");
        }
    }
}
