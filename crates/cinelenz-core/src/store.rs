use anyhow::{Context, Result};
use cinelenz_config::PathManager;
use cinelenz_models::SavedItem;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Which saved list a store operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedList {
    Watchlist,
    Compare,
}

impl SavedList {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavedList::Watchlist => "watchlist",
            SavedList::Compare => "compare",
        }
    }
}

/// JSON-file persistence for the watchlist and the compare list.
///
/// Each list is one flat array under the data directory, read in full and
/// overwritten in full on every mutation. A corrupted file is logged and
/// treated as empty rather than failing the command.
pub struct SavedListStore {
    watchlist_path: PathBuf,
    compare_path: PathBuf,
}

impl SavedListStore {
    pub fn new(paths: &PathManager) -> Result<Self> {
        std::fs::create_dir_all(paths.saved_dir())?;
        Ok(Self {
            watchlist_path: paths.watchlist_file(),
            compare_path: paths.compare_file(),
        })
    }

    fn path(&self, list: SavedList) -> &PathBuf {
        match list {
            SavedList::Watchlist => &self.watchlist_path,
            SavedList::Compare => &self.compare_path,
        }
    }

    pub fn load(&self, list: SavedList) -> Vec<SavedItem> {
        let path = self.path(list);
        if !path.exists() {
            return Vec::new();
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(list = list.as_str(), error = %e, "Failed to read saved list, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(items) => items,
            Err(e) => {
                warn!(list = list.as_str(), error = %e, "Corrupted saved list, treating as empty");
                Vec::new()
            }
        }
    }

    fn save(&self, list: SavedList, items: &[SavedItem]) -> Result<()> {
        let path = self.path(list);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(items)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {} file", list.as_str()))?;
        debug!(list = list.as_str(), count = items.len(), "Saved list written");
        Ok(())
    }

    pub fn contains(&self, list: SavedList, id: u64) -> bool {
        self.load(list).iter().any(|item| item.id == id)
    }

    /// Add the item if absent, remove it if present. Returns true when
    /// the item is in the list after the call.
    pub fn toggle(&self, list: SavedList, item: SavedItem) -> Result<bool> {
        let mut items = self.load(list);
        if let Some(position) = items.iter().position(|existing| existing.id == item.id) {
            items.remove(position);
            self.save(list, &items)?;
            Ok(false)
        } else {
            items.push(item);
            self.save(list, &items)?;
            Ok(true)
        }
    }

    /// Add the item if absent. Returns true when it was newly added.
    pub fn add(&self, list: SavedList, item: SavedItem) -> Result<bool> {
        let mut items = self.load(list);
        if items.iter().any(|existing| existing.id == item.id) {
            return Ok(false);
        }
        items.push(item);
        self.save(list, &items)?;
        Ok(true)
    }

    /// Remove by id. Returns true when something was removed.
    pub fn remove(&self, list: SavedList, id: u64) -> Result<bool> {
        let mut items = self.load(list);
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.save(list, &items)?;
        Ok(true)
    }

    pub fn clear(&self, list: SavedList) -> Result<()> {
        self.save(list, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> SavedListStore {
        let paths = PathManager::rooted_at(dir.path());
        SavedListStore::new(&paths).unwrap()
    }

    fn item(id: u64, title: &str) -> SavedItem {
        SavedItem {
            id,
            title: title.to_string(),
            year: Some(2024),
            poster: None,
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        assert!(store.load(SavedList::Watchlist).is_empty());
    }

    #[test]
    fn toggle_round_trip_restores_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.add(SavedList::Compare, item(1, "Dune: Part Two")).unwrap();
        let before = store.load(SavedList::Compare);

        assert!(store.toggle(SavedList::Compare, item(2, "Oppenheimer")).unwrap());
        assert!(store.contains(SavedList::Compare, 2));
        assert!(!store.toggle(SavedList::Compare, item(2, "Oppenheimer")).unwrap());

        assert_eq!(store.load(SavedList::Compare), before);
    }

    #[test]
    fn lists_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.add(SavedList::Watchlist, item(1, "Dune: Part Two")).unwrap();
        assert!(store.load(SavedList::Compare).is_empty());
        assert!(store.contains(SavedList::Watchlist, 1));
    }

    #[test]
    fn duplicate_add_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        assert!(store.add(SavedList::Watchlist, item(1, "Dune: Part Two")).unwrap());
        assert!(!store.add(SavedList::Watchlist, item(1, "Dune: Part Two")).unwrap());
        assert_eq!(store.load(SavedList::Watchlist).len(), 1);
    }

    #[test]
    fn remove_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.add(SavedList::Watchlist, item(1, "a")).unwrap();
        store.add(SavedList::Watchlist, item(2, "b")).unwrap();
        assert!(store.remove(SavedList::Watchlist, 1).unwrap());
        assert!(!store.remove(SavedList::Watchlist, 99).unwrap());
        store.clear(SavedList::Watchlist).unwrap();
        assert!(store.load(SavedList::Watchlist).is_empty());
    }

    #[test]
    fn corrupted_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(dir.path().join("data/saved")).unwrap();
        std::fs::write(dir.path().join("data/saved/watchlist.json"), "{not json").unwrap();
        assert!(store.load(SavedList::Watchlist).is_empty());

        // A mutation overwrites the corrupted file with valid content.
        store.add(SavedList::Watchlist, item(1, "a")).unwrap();
        assert_eq!(store.load(SavedList::Watchlist).len(), 1);
    }
}
