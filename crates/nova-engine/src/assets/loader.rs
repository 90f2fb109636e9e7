use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::error::ResourceError;

/// Locale table: `key -> language -> text`.
pub type LocaleTable = HashMap<String, HashMap<String, String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Image,
    Font,
    Sound,
    Locale,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Image => "image",
            ResourceKind::Font => "font",
            ResourceKind::Sound => "sound",
            ResourceKind::Locale => "locale",
        })
    }
}

/// Where resource bytes come from. The browser bridge hands in what the page
/// downloaded; native runs read from disk.
pub trait ResourceFetcher {
    fn fetch(&mut self, kind: ResourceKind, url: &str) -> Result<Vec<u8>, ResourceError>;
}

/// Fetcher serving bytes registered up front, keyed by URL.
#[derive(Debug, Default, Clone)]
pub struct MemoryFetcher {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(url.into(), bytes.into());
    }

    pub fn with(mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(url, bytes);
        self
    }
}

impl ResourceFetcher for MemoryFetcher {
    fn fetch(&mut self, _kind: ResourceKind, url: &str) -> Result<Vec<u8>, ResourceError> {
        self.files.get(url).cloned().ok_or_else(|| ResourceError::Fetch {
            url: url.to_string(),
            reason: "no such file was provided".to_string(),
        })
    }
}

/// Fetcher reading URLs as paths relative to `root`.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceFetcher for FileFetcher {
    fn fetch(&mut self, _kind: ResourceKind, url: &str) -> Result<Vec<u8>, ResourceError> {
        let path = self.root.join(url.trim_start_matches('/'));
        std::fs::read(&path).map_err(|e| ResourceError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// A queued resource and, once loaded, its payload.
#[derive(Debug, Clone)]
pub struct Resource<T> {
    pub name: String,
    pub url: String,
    payload: Option<T>,
}

impl<T> Resource<T> {
    pub fn is_loaded(&self) -> bool {
        self.payload.is_some()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }
}

/// Resource name for `url`: the last path segment up to its first `.`.
pub fn resource_name(url: &str) -> &str {
    let file = url.rsplit('/').next().unwrap_or(url);
    file.split('.').next().unwrap_or(file)
}

#[derive(Debug, Clone)]
struct Queue<T> {
    kind: ResourceKind,
    entries: Vec<Resource<T>>,
}

impl<T> Queue<T> {
    fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    fn push(&mut self, url: &str) {
        if self.entries.iter().any(|e| e.url == url) {
            return;
        }
        self.entries.push(Resource {
            name: resource_name(url).to_string(),
            url: url.to_string(),
            payload: None,
        });
    }

    fn get(&self, name: &str) -> Result<&Resource<T>, ResourceError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| ResourceError::NotFound {
                kind: self.kind,
                name: name.to_string(),
            })?;
        if !entry.is_loaded() {
            return Err(ResourceError::NotLoaded {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        Ok(entry)
    }

    fn loaded(&self) -> usize {
        self.entries.iter().filter(|e| e.is_loaded()).count()
    }

    /// Fetch and decode every entry not loaded yet.
    fn load<F>(&mut self, fetcher: &mut dyn ResourceFetcher, progress: &mut Progress, decode: F) -> Result<(), ResourceError>
    where
        F: Fn(&str, Vec<u8>) -> Result<T, ResourceError>,
    {
        for entry in self.entries.iter_mut().filter(|e| e.payload.is_none()) {
            let bytes = fetcher.fetch(self.kind, &entry.url)?;
            entry.payload = Some(decode(&entry.name, bytes)?);
            progress.done += 1;
            log::debug!(
                "loaded {} `{}` ({}/{})",
                self.kind,
                entry.name,
                progress.done,
                progress.total
            );
        }
        Ok(())
    }
}

struct Progress {
    done: usize,
    total: usize,
}

/// Queues resources per scene and serves them by name once loaded.
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    images: Queue<Vec<u8>>,
    fonts: Queue<Vec<u8>>,
    sounds: Queue<Vec<u8>>,
    locales: Queue<LocaleTable>,
}

impl ResourceLoader {
    pub fn new() -> Self {
        Self {
            images: Queue::new(ResourceKind::Image),
            fonts: Queue::new(ResourceKind::Font),
            sounds: Queue::new(ResourceKind::Sound),
            locales: Queue::new(ResourceKind::Locale),
        }
    }

    pub fn add_image_to_queue(&mut self, url: &str) {
        self.images.push(url);
    }

    pub fn add_font_to_queue(&mut self, url: &str) {
        self.fonts.push(url);
    }

    pub fn add_sound_to_queue(&mut self, url: &str) {
        self.sounds.push(url);
    }

    pub fn add_locale_to_queue(&mut self, url: &str) {
        self.locales.push(url);
    }

    /// Load everything queued and not loaded yet. The first failure aborts the
    /// load and is returned; entries loaded before it stay loaded.
    pub fn load_all_resources(&mut self, fetcher: &mut dyn ResourceFetcher) -> Result<(), ResourceError> {
        let (done, total) = self.progress();
        let mut progress = Progress { done, total };
        let raw = |_: &str, bytes: Vec<u8>| Ok(bytes);

        self.images.load(fetcher, &mut progress, raw)?;
        self.fonts.load(fetcher, &mut progress, raw)?;
        self.sounds.load(fetcher, &mut progress, raw)?;
        self.locales.load(fetcher, &mut progress, |name, bytes| {
            serde_json::from_slice(&bytes).map_err(|source| ResourceError::InvalidLocale {
                name: name.to_string(),
                source,
            })
        })?;
        Ok(())
    }

    /// `(loaded, queued)` over every resource kind.
    pub fn progress(&self) -> (usize, usize) {
        let loaded = self.images.loaded() + self.fonts.loaded() + self.sounds.loaded() + self.locales.loaded();
        let total = self.images.entries.len()
            + self.fonts.entries.len()
            + self.sounds.entries.len()
            + self.locales.entries.len();
        (loaded, total)
    }

    pub fn get_image_by_name(&self, name: &str) -> Result<&Resource<Vec<u8>>, ResourceError> {
        self.images.get(name)
    }

    pub fn get_font_by_name(&self, name: &str) -> Result<&Resource<Vec<u8>>, ResourceError> {
        self.fonts.get(name)
    }

    pub fn get_sound_by_name(&self, name: &str) -> Result<&Resource<Vec<u8>>, ResourceError> {
        self.sounds.get(name)
    }

    pub fn get_locale_by_name(&self, name: &str) -> Result<&LocaleTable, ResourceError> {
        let entry = self.locales.get(name)?;
        entry.payload().ok_or_else(|| ResourceError::NotLoaded {
            kind: ResourceKind::Locale,
            name: name.to_string(),
        })
    }
}

impl Default for ResourceLoader {
    fn default() -> Self {
        Self::new()
    }
}
