//! The world data provider seam.
//!
//! The session engine never reads data files itself; it consumes a
//! [`WorldProvider`]. [`JsonDirProvider`] is the stock implementation,
//! loading one JSON file per record (or an array of records per file) from
//! `locations/`, `npcs/`, and `lore/` subdirectories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{WorldError, WorldResult};
use crate::location::Location;
use crate::lore::LoreEntry;
use crate::npc::NpcRecord;

/// Source of world data for a session.
///
/// Each load is all-or-nothing: a failure means `DataUnavailable` and no
/// partial catalog is ever built from the result.
pub trait WorldProvider {
    /// Load every location.
    fn load_locations(&self) -> WorldResult<Vec<Location>>;
    /// Load every NPC record.
    fn load_npcs(&self) -> WorldResult<Vec<NpcRecord>>;
    /// Load every lore entry.
    fn load_lore(&self) -> WorldResult<Vec<LoreEntry>>;
}

/// Loads world data from a directory of JSON files.
///
/// Layout: `<root>/locations/*.json`, `<root>/npcs/*.json`,
/// `<root>/lore/*.json`. Each file holds either a single object or an
/// array of objects.
#[derive(Debug, Clone)]
pub struct JsonDirProvider {
    root: PathBuf,
}

impl JsonDirProvider {
    /// Create a provider rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn load_dir<T: DeserializeOwned>(&self, subdir: &str) -> WorldResult<Vec<T>> {
        let dir = self.root.join(subdir);
        if !dir.is_dir() {
            return Err(WorldError::DataUnavailable(format!(
                "data directory not found: {}",
                dir.display()
            )));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
            .map_err(|e| WorldError::DataUnavailable(format!("{}: {e}", dir.display())))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        // Deterministic load order regardless of directory iteration order.
        paths.sort();

        let mut records = Vec::new();
        for path in &paths {
            let mut loaded = read_json_file(path)?;
            debug!(file = %path.display(), count = loaded.len(), "loaded data file");
            records.append(&mut loaded);
        }
        Ok(records)
    }
}

impl WorldProvider for JsonDirProvider {
    fn load_locations(&self) -> WorldResult<Vec<Location>> {
        self.load_dir("locations")
    }

    fn load_npcs(&self) -> WorldResult<Vec<NpcRecord>> {
        self.load_dir("npcs")
    }

    fn load_lore(&self) -> WorldResult<Vec<LoreEntry>> {
        self.load_dir("lore")
    }
}

/// Read a JSON file holding either one record or an array of records.
fn read_json_file<T: DeserializeOwned>(path: &Path) -> WorldResult<Vec<T>> {
    let text = fs::read_to_string(path)
        .map_err(|e| WorldError::DataUnavailable(format!("{}: {e}", path.display())))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| WorldError::DataUnavailable(format!("{}: {e}", path.display())))?;

    let records = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>(),
        other => serde_json::from_value(other).map(|one| vec![one]),
    };
    records.map_err(|e| WorldError::DataUnavailable(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    fn provider_root() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for sub in ["locations", "npcs", "lore"] {
            fs::create_dir(tmp.path().join(sub)).unwrap();
        }
        tmp
    }

    #[test]
    fn loads_single_object_files() {
        let tmp = provider_root();
        write_file(
            &tmp.path().join("npcs"),
            "gorim.json",
            r#"{"name": "Gorim", "description": "A dour guard."}"#,
        );

        let provider = JsonDirProvider::new(tmp.path());
        let npcs = provider.load_npcs().unwrap();
        assert_eq!(npcs.len(), 1);
        assert_eq!(npcs[0].name, "Gorim");
    }

    #[test]
    fn loads_array_files() {
        let tmp = provider_root();
        write_file(
            &tmp.path().join("npcs"),
            "all.json",
            r#"[{"name": "Gorim"}, {"name": "Elara"}]"#,
        );

        let provider = JsonDirProvider::new(tmp.path());
        let npcs = provider.load_npcs().unwrap();
        assert_eq!(npcs.len(), 2);
    }

    #[test]
    fn load_order_is_deterministic() {
        let tmp = provider_root();
        write_file(&tmp.path().join("npcs"), "b.json", r#"{"name": "Beta"}"#);
        write_file(&tmp.path().join("npcs"), "a.json", r#"{"name": "Alpha"}"#);

        let provider = JsonDirProvider::new(tmp.path());
        let npcs = provider.load_npcs().unwrap();
        assert_eq!(npcs[0].name, "Alpha");
        assert_eq!(npcs[1].name, "Beta");
    }

    #[test]
    fn missing_directory_is_data_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = JsonDirProvider::new(tmp.path());
        let result = provider.load_locations();
        assert!(matches!(result, Err(WorldError::DataUnavailable(_))));
    }

    #[test]
    fn malformed_json_is_data_unavailable() {
        let tmp = provider_root();
        write_file(&tmp.path().join("lore"), "bad.json", "{not json");

        let provider = JsonDirProvider::new(tmp.path());
        let result = provider.load_lore();
        assert!(matches!(result, Err(WorldError::DataUnavailable(_))));
    }

    #[test]
    fn non_json_files_ignored() {
        let tmp = provider_root();
        write_file(&tmp.path().join("lore"), "notes.txt", "not data");
        write_file(
            &tmp.path().join("lore"),
            "founding.json",
            r#"{"lore_id": "founding", "title": "The Founding", "content": "..."}"#,
        );

        let provider = JsonDirProvider::new(tmp.path());
        let lore = provider.load_lore().unwrap();
        assert_eq!(lore.len(), 1);
    }

    #[test]
    fn full_catalog_from_provider() {
        let tmp = provider_root();
        write_file(
            &tmp.path().join("locations"),
            "citadel.json",
            r#"{"name": "The Iron Citadel", "rooms": [{"name": "Great Hall", "npc_names": ["Gorim"]}]}"#,
        );
        write_file(&tmp.path().join("npcs"), "gorim.json", r#"{"name": "Gorim"}"#);

        let provider = JsonDirProvider::new(tmp.path());
        let catalog = crate::Catalog::from_provider(&provider).unwrap();
        assert_eq!(catalog.location_count(), 1);
        assert_eq!(catalog.npc_count(), 1);
    }
}
