//! Local key-value preferences and the single saved place kept in them.

use parking_lot::Mutex;
use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    error::{Result, WeatherError},
    model::Place,
};

/// Name of the application-scoped preferences namespace.
pub const PREFERENCES_NAME: &str = "sunny_weather";

const PLACE_KEY: &str = "place";

/// String key-value storage.
pub trait Preferences: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn put(&mut self, key: &str, value: String) -> io::Result<()>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Preferences kept only in memory.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    entries: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: String) -> io::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

/// Preferences persisted as one JSON object in `<dir>/<name>.json`.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FilePreferences {
    pub fn open(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(format!("{name}.json"));

        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| WeatherError::parse("preferences file", e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), entries = entries.len(), "opened preferences");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let text = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;

        // Replace the file in one step so readers never see half a write.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)
    }
}

impl Preferences for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: String) -> io::Result<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value);
        self.write(&next)?;
        self.entries = next;
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

/// Holds the one saved place. Access goes through a mutex so concurrent
/// saves and loads never interleave.
pub struct PlaceStore {
    prefs: Mutex<Box<dyn Preferences>>,
}

impl std::fmt::Debug for PlaceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceStore").finish_non_exhaustive()
    }
}

impl PlaceStore {
    pub fn new(prefs: impl Preferences + 'static) -> Self {
        Self {
            prefs: Mutex::new(Box::new(prefs)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryPreferences::new())
    }

    /// Open the `sunny_weather` preferences file under `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        Ok(Self::new(FilePreferences::open(dir, PREFERENCES_NAME)?))
    }

    /// Overwrite the saved place.
    pub fn save(&self, place: &Place) -> Result<()> {
        let json = serde_json::to_string(place).map_err(|e| WeatherError::parse("place", e))?;
        self.prefs.lock().put(PLACE_KEY, json)?;
        debug!(name = %place.name, "saved place");
        Ok(())
    }

    pub fn load(&self) -> Result<Place> {
        let json = self.prefs.lock().get(PLACE_KEY).ok_or(WeatherError::NotFound)?;
        serde_json::from_str(&json).map_err(|e| WeatherError::parse("saved place", e))
    }

    pub fn is_saved(&self) -> bool {
        self.prefs.lock().contains(PLACE_KEY)
    }
}
