//! Catalog store - sphere and flange prices plus company settings
//!
//! The store owns both collections and persists the touched file after every
//! mutation before returning. A mutation whose save fails stays applied in
//! memory; the error is returned so the caller can retry the save.
//!
//! A data file that cannot be read is remembered per file. Work on the other
//! collections goes on, while mutations of the unreadable one are refused so
//! its file is never overwritten.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::settings::Settings;
use crate::core::storage::{ensure_finite, read_json, write_json, LoadStatus, Loaded, StoreError};
use crate::entities::part::{CatalogEntry, PartKind};

/// File holding the settings map
pub const SETTINGS_FILE: &str = "settings.json";

/// What an upsert did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Upsert {
    /// New key appended at the given position
    Inserted(usize),
    /// Existing key at the given position had its cost replaced
    Updated { index: usize, previous_cost: f64 },
}

/// Owned catalog of priced parts
#[derive(Debug)]
pub struct CatalogStore {
    data_dir: PathBuf,
    spheres: Vec<CatalogEntry>,
    flanges: Vec<CatalogEntry>,
    settings: Settings,
    /// Load failures by file path, cleared by the next successful load
    unreadable: BTreeMap<PathBuf, StoreError>,
}

impl CatalogStore {
    /// Create an empty store backed by `data_dir` without touching disk
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            spheres: Vec::new(),
            flanges: Vec::new(),
            settings: Settings::default(),
            unreadable: BTreeMap::new(),
        }
    }

    /// Create a store and load every data file that exists.
    ///
    /// A file that fails to load leaves its collection empty and is reported
    /// later by `check`/`check_settings` and by any mutation touching it.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(data_dir);
        for kind in PartKind::ALL {
            let _ = store.load(kind);
        }
        let _ = store.load_settings();
        store
    }

    /// Fails with the recorded load error if the collection's file is unreadable
    pub fn check(&self, kind: PartKind) -> Result<(), StoreError> {
        self.check_path(&self.path(kind))
    }

    /// Fails with the recorded load error if the settings file is unreadable
    pub fn check_settings(&self) -> Result<(), StoreError> {
        self.check_path(&self.settings_path())
    }

    fn check_path(&self, path: &Path) -> Result<(), StoreError> {
        match self.unreadable.get(path) {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the data file for a collection
    pub fn path(&self, kind: PartKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    /// Entries of a collection in stored order
    pub fn entries(&self, kind: PartKind) -> &[CatalogEntry] {
        match kind {
            PartKind::Sphere => &self.spheres,
            PartKind::Flange => &self.flanges,
        }
    }

    fn entries_mut(&mut self, kind: PartKind) -> &mut Vec<CatalogEntry> {
        match kind {
            PartKind::Sphere => &mut self.spheres,
            PartKind::Flange => &mut self.flanges,
        }
    }

    pub fn len(&self, kind: PartKind) -> usize {
        self.entries(kind).len()
    }

    pub fn is_empty(&self, kind: PartKind) -> bool {
        self.entries(kind).is_empty()
    }

    /// Replace a collection with its data file contents.
    ///
    /// A missing file leaves the collection as it was and reports `NotFound`.
    pub fn load(&mut self, kind: PartKind) -> Result<LoadStatus, StoreError> {
        let path = self.path(kind);
        match read_json::<Vec<CatalogEntry>>(&path) {
            Ok(Loaded::Found(entries)) => {
                debug!(%kind, path = %path.display(), count = entries.len(), "loaded catalog");
                let count = entries.len();
                *self.entries_mut(kind) = entries;
                self.unreadable.remove(&path);
                Ok(LoadStatus::Loaded(count))
            }
            Ok(Loaded::Missing) => {
                debug!(%kind, path = %path.display(), "no catalog file");
                self.unreadable.remove(&path);
                Ok(LoadStatus::NotFound)
            }
            Err(e) => {
                warn!(%kind, error = %e, "failed to load catalog");
                self.unreadable.insert(path, e.clone());
                Err(e)
            }
        }
    }

    /// Write a collection to its data file
    pub fn save(&self, kind: PartKind) -> Result<(), StoreError> {
        let path = self.path(kind);
        match write_json(&path, self.entries(kind)) {
            Ok(()) => {
                debug!(%kind, path = %path.display(), count = self.len(kind), "saved catalog");
                Ok(())
            }
            Err(e) => {
                warn!(%kind, error = %e, "failed to save catalog");
                Err(e)
            }
        }
    }

    /// Insert an entry, or overwrite the cost of the entry with the same key
    pub fn upsert(&mut self, kind: PartKind, entry: CatalogEntry) -> Result<Upsert, StoreError> {
        self.check(kind)?;
        ensure_finite("cost_price", entry.cost_price)?;
        let entries = self.entries_mut(kind);
        let outcome = match entries
            .iter()
            .position(|e| e.matches(&entry.type_name, &entry.model))
        {
            Some(index) => {
                let existing = &mut entries[index];
                let previous_cost = existing.cost_price;
                existing.cost_price = entry.cost_price;
                Upsert::Updated {
                    index,
                    previous_cost,
                }
            }
            None => {
                entries.push(entry);
                Upsert::Inserted(entries.len() - 1)
            }
        };
        self.save(kind)?;
        Ok(outcome)
    }

    /// Remove the entry at a zero-based position
    pub fn remove(&mut self, kind: PartKind, index: usize) -> Result<CatalogEntry, StoreError> {
        self.check(kind)?;
        let entries = self.entries_mut(kind);
        if index >= entries.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: entries.len(),
            });
        }
        let removed = entries.remove(index);
        self.save(kind)?;
        Ok(removed)
    }

    /// Distinct type names, sorted
    pub fn list_types(&self, kind: PartKind) -> Vec<String> {
        self.entries(kind)
            .iter()
            .map(|e| e.type_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct models, sorted, optionally limited to one type name
    pub fn list_models(&self, kind: PartKind, type_name: Option<&str>) -> Vec<String> {
        self.entries(kind)
            .iter()
            .filter(|e| type_name.map_or(true, |t| e.type_name == t))
            .map(|e| e.model.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// First entry with the given key
    pub fn find(&self, kind: PartKind, type_name: &str, model: &str) -> Option<&CatalogEntry> {
        self.entries(kind).iter().find(|e| e.matches(type_name, model))
    }

    /// Like `find`, but a miss is an error naming the key
    pub fn require(
        &self,
        kind: PartKind,
        type_name: &str,
        model: &str,
    ) -> Result<&CatalogEntry, StoreError> {
        self.find(kind, type_name, model)
            .ok_or_else(|| StoreError::EntryNotFound {
                kind: kind.to_string(),
                type_name: type_name.to_string(),
                model: model.to_string(),
            })
    }

    /// Replace a whole collection with imported entries and persist it.
    ///
    /// Entries are taken as given; duplicate keys are not merged. An empty
    /// batch, or one holding a non-finite cost, changes nothing.
    pub fn bulk_import(
        &mut self,
        kind: PartKind,
        entries: Vec<CatalogEntry>,
    ) -> Result<usize, StoreError> {
        if entries.is_empty() {
            warn!(%kind, "import rejected: no valid rows");
            return Err(StoreError::NoValidRows);
        }
        self.check(kind)?;
        for entry in &entries {
            ensure_finite("cost_price", entry.cost_price)?;
        }
        let count = entries.len();
        *self.entries_mut(kind) = entries;
        self.save(kind)?;
        info!(%kind, count, "imported catalog");
        Ok(count)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings with the settings file contents, if present
    pub fn load_settings(&mut self) -> Result<LoadStatus, StoreError> {
        let path = self.settings_path();
        match read_json::<Settings>(&path) {
            Ok(Loaded::Found(settings)) => {
                self.settings = settings;
                self.unreadable.remove(&path);
                Ok(LoadStatus::Loaded(1))
            }
            Ok(Loaded::Missing) => {
                self.unreadable.remove(&path);
                Ok(LoadStatus::NotFound)
            }
            Err(e) => {
                warn!(error = %e, "failed to load settings");
                self.unreadable.insert(path, e.clone());
                Err(e)
            }
        }
    }

    pub fn save_settings(&self) -> Result<(), StoreError> {
        write_json(&self.settings_path(), &self.settings).inspect_err(|e| {
            warn!(error = %e, "failed to save settings");
        })
    }

    /// Change one setting and persist the settings file
    pub fn update_setting(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_settings()?;
        self.settings.set(key, value)?;
        self.save_settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> CatalogStore {
        CatalogStore::new(dir.join("data"))
    }

    #[test]
    fn test_upsert_new_key_appends() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        let entry = CatalogEntry::new("DN50", "A1", 100.0);

        let outcome = store.upsert(PartKind::Sphere, entry.clone()).unwrap();
        assert_eq!(outcome, Upsert::Inserted(0));
        assert_eq!(store.len(PartKind::Sphere), 1);
        assert_eq!(store.find(PartKind::Sphere, "DN50", "A1"), Some(&entry));
        assert!(store.is_empty(PartKind::Flange));
        assert!(store.path(PartKind::Sphere).exists());
    }

    #[test]
    fn test_upsert_existing_key_updates_cost_only() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        store
            .upsert(PartKind::Flange, CatalogEntry::new("F1", "B1", 20.0))
            .unwrap();
        store
            .upsert(PartKind::Flange, CatalogEntry::new("F2", "B1", 25.0))
            .unwrap();

        let outcome = store
            .upsert(PartKind::Flange, CatalogEntry::new("F1", "B1", 22.5))
            .unwrap();
        assert_eq!(
            outcome,
            Upsert::Updated {
                index: 0,
                previous_cost: 20.0
            }
        );
        assert_eq!(store.len(PartKind::Flange), 2);
        let found = store.find(PartKind::Flange, "F1", "B1").unwrap();
        assert_eq!(found.cost_price, 22.5);
        assert_eq!(store.entries(PartKind::Flange)[0].type_name, "F1");
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        store
            .upsert(PartKind::Sphere, CatalogEntry::new("DN50", "A1", 100.0))
            .unwrap();
        store
            .upsert(PartKind::Sphere, CatalogEntry::new("DN80", "A2", 150.5))
            .unwrap();
        store
            .upsert(PartKind::Flange, CatalogEntry::new("F1", "B1", 20.0))
            .unwrap();

        let mut fresh = store_in(tmp.path());
        assert_eq!(fresh.load(PartKind::Sphere).unwrap(), LoadStatus::Loaded(2));
        assert_eq!(fresh.entries(PartKind::Sphere), store.entries(PartKind::Sphere));

        let reopened = CatalogStore::open(tmp.path().join("data"));
        assert_eq!(reopened.entries(PartKind::Flange), store.entries(PartKind::Flange));
    }

    #[test]
    fn test_load_missing_keeps_memory() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        store.spheres.push(CatalogEntry::new("DN50", "A1", 1.0));

        assert_eq!(store.load(PartKind::Sphere).unwrap(), LoadStatus::NotFound);
        assert_eq!(store.len(PartKind::Sphere), 1);
    }

    #[test]
    fn test_load_malformed_keeps_memory() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        store.spheres.push(CatalogEntry::new("DN50", "A1", 1.0));
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.path(PartKind::Sphere), "{ broken").unwrap();

        let err = store.load(PartKind::Sphere).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert_eq!(store.len(PartKind::Sphere), 1);
    }

    #[test]
    fn test_remove_in_bounds() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        for (t, m) in [("A", "1"), ("B", "2"), ("C", "3")] {
            store
                .upsert(PartKind::Sphere, CatalogEntry::new(t, m, 1.0))
                .unwrap();
        }

        let removed = store.remove(PartKind::Sphere, 1).unwrap();
        assert_eq!(removed.type_name, "B");
        assert_eq!(store.len(PartKind::Sphere), 2);
        assert!(store.find(PartKind::Sphere, "B", "2").is_none());

        let mut fresh = store_in(tmp.path());
        fresh.load(PartKind::Sphere).unwrap();
        assert_eq!(fresh.len(PartKind::Sphere), 2);
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        store
            .upsert(PartKind::Flange, CatalogEntry::new("F1", "B1", 1.0))
            .unwrap();

        let err = store.remove(PartKind::Flange, 1).unwrap_err();
        assert!(matches!(err, StoreError::IndexOutOfRange { index: 1, len: 1 }));
        assert_eq!(store.len(PartKind::Flange), 1);
    }

    #[test]
    fn test_list_types_and_models() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        for (t, m) in [("DN80", "B"), ("DN50", "C"), ("DN50", "A"), ("DN80", "A")] {
            store
                .upsert(PartKind::Sphere, CatalogEntry::new(t, m, 1.0))
                .unwrap();
        }

        assert_eq!(store.list_types(PartKind::Sphere), vec!["DN50", "DN80"]);
        assert_eq!(store.list_models(PartKind::Sphere, None), vec!["A", "B", "C"]);
        assert_eq!(
            store.list_models(PartKind::Sphere, Some("DN50")),
            vec!["A", "C"]
        );
        assert!(store.list_models(PartKind::Sphere, Some("DN99")).is_empty());
        assert!(store.list_types(PartKind::Flange).is_empty());
    }

    #[test]
    fn test_find_missing_and_require() {
        let tmp = tempdir().unwrap();
        let store = store_in(tmp.path());
        assert!(store.find(PartKind::Sphere, "X", "Y").is_none());
        let err = store.require(PartKind::Sphere, "X", "Y").unwrap_err();
        assert!(matches!(err, StoreError::EntryNotFound { .. }));
    }

    #[test]
    fn test_bulk_import_replaces_collection() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        store
            .upsert(PartKind::Sphere, CatalogEntry::new("OLD", "X", 9.0))
            .unwrap();

        let count = store
            .bulk_import(PartKind::Sphere, vec![CatalogEntry::new("DN50", "A1", 100.0)])
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.len(PartKind::Sphere), 1);
        assert!(store.find(PartKind::Sphere, "OLD", "X").is_none());
    }

    #[test]
    fn test_bulk_import_empty_changes_nothing() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        store
            .upsert(PartKind::Flange, CatalogEntry::new("F1", "B1", 20.0))
            .unwrap();
        let before = fs::read_to_string(store.path(PartKind::Flange)).unwrap();

        let err = store.bulk_import(PartKind::Flange, Vec::new()).unwrap_err();
        assert!(matches!(err, StoreError::NoValidRows));
        assert_eq!(store.len(PartKind::Flange), 1);
        assert_eq!(fs::read_to_string(store.path(PartKind::Flange)).unwrap(), before);
    }

    #[test]
    fn test_bulk_import_keeps_duplicate_keys() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        let rows = vec![
            CatalogEntry::new("DN50", "A1", 100.0),
            CatalogEntry::new("DN50", "A1", 120.0),
        ];
        assert_eq!(store.bulk_import(PartKind::Sphere, rows).unwrap(), 2);
        assert_eq!(store.len(PartKind::Sphere), 2);
        // find returns the first match
        assert_eq!(
            store.find(PartKind::Sphere, "DN50", "A1").unwrap().cost_price,
            100.0
        );
    }

    #[test]
    fn test_failed_save_keeps_mutation_in_memory() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();
        let mut store = CatalogStore::new(&blocker);

        let err = store
            .upsert(PartKind::Sphere, CatalogEntry::new("DN50", "A1", 1.0))
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.len(PartKind::Sphere), 1);
    }

    #[test]
    fn test_settings_update_persists() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        store.update_setting("company_name", "ACME Joints").unwrap();
        store.update_setting("show_cost_price", "true").unwrap();

        let mut fresh = store_in(tmp.path());
        assert_eq!(fresh.load_settings().unwrap(), LoadStatus::Loaded(1));
        assert_eq!(fresh.settings().company_name, "ACME Joints");
        assert!(fresh.settings().show_cost_price);
    }

    #[test]
    fn test_settings_invalid_value_not_saved() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        assert!(store.update_setting("show_cost_price", "perhaps").is_err());
        assert!(!store.settings_path().exists());
    }

    #[test]
    fn test_non_finite_cost_rejected_before_write() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        store
            .upsert(PartKind::Sphere, CatalogEntry::new("DN50", "A1", 100.0))
            .unwrap();
        let before = fs::read_to_string(store.path(PartKind::Sphere)).unwrap();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = store
                .upsert(PartKind::Sphere, CatalogEntry::new("DN80", "A2", bad))
                .unwrap_err();
            assert!(matches!(err, StoreError::NonFinite { .. }));

            let err = store
                .upsert(PartKind::Sphere, CatalogEntry::new("DN50", "A1", bad))
                .unwrap_err();
            assert!(matches!(err, StoreError::NonFinite { .. }));
        }

        let err = store
            .bulk_import(
                PartKind::Sphere,
                vec![
                    CatalogEntry::new("DN65", "B1", 10.0),
                    CatalogEntry::new("DN65", "B2", f64::NAN),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::NonFinite { .. }));

        assert_eq!(store.len(PartKind::Sphere), 1);
        assert_eq!(store.entries(PartKind::Sphere)[0].cost_price, 100.0);
        assert_eq!(fs::read_to_string(store.path(PartKind::Sphere)).unwrap(), before);

        let reopened = CatalogStore::open(store.data_dir());
        assert!(reopened.check(PartKind::Sphere).is_ok());
        assert_eq!(reopened.entries(PartKind::Sphere), store.entries(PartKind::Sphere));
    }

    #[test]
    fn test_open_isolates_unreadable_file() {
        let tmp = tempdir().unwrap();
        let mut store = store_in(tmp.path());
        store
            .upsert(PartKind::Flange, CatalogEntry::new("F1", "B1", 20.0))
            .unwrap();
        store.update_setting("company_name", "ACME Joints").unwrap();
        fs::write(store.path(PartKind::Sphere), "{ broken").unwrap();

        let mut reopened = CatalogStore::open(store.data_dir());
        assert!(matches!(
            reopened.check(PartKind::Sphere),
            Err(StoreError::Parse { .. })
        ));
        assert!(reopened.check(PartKind::Flange).is_ok());
        assert!(reopened.check_settings().is_ok());
        assert_eq!(reopened.settings().company_name, "ACME Joints");

        reopened
            .upsert(PartKind::Flange, CatalogEntry::new("F2", "B2", 30.0))
            .unwrap();
        assert_eq!(reopened.len(PartKind::Flange), 2);

        // the broken file is never overwritten
        let err = reopened
            .upsert(PartKind::Sphere, CatalogEntry::new("DN50", "A1", 1.0))
            .unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(reopened.remove(PartKind::Sphere, 0).is_err());
        assert!(reopened
            .bulk_import(PartKind::Sphere, vec![CatalogEntry::new("DN50", "A1", 1.0)])
            .is_err());
        assert_eq!(
            fs::read_to_string(reopened.path(PartKind::Sphere)).unwrap(),
            "{ broken"
        );
    }

    #[test]
    fn test_reload_clears_unreadable_mark() {
        let tmp = tempdir().unwrap();
        let store = store_in(tmp.path());
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.settings_path(), "not json").unwrap();

        let mut reopened = CatalogStore::open(store.data_dir());
        assert!(reopened.check_settings().is_err());
        assert!(reopened.update_setting("company_name", "X").is_err());

        fs::write(reopened.settings_path(), "{}").unwrap();
        assert_eq!(reopened.load_settings().unwrap(), LoadStatus::Loaded(1));
        assert!(reopened.check_settings().is_ok());
        reopened.update_setting("company_name", "X").unwrap();
    }

    /// Small key space so generated sequences revisit existing keys
    fn entry_strategy() -> impl Strategy<Value = CatalogEntry> {
        ("[A-C]", "[1-3]", 0u32..1_000_000)
            .prop_map(|(t, m, cents)| CatalogEntry::new(t, m, f64::from(cents) / 100.0))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_upsert_grows_only_for_new_keys(
            entries in prop::collection::vec(entry_strategy(), 1..24)
        ) {
            let tmp = tempdir().unwrap();
            let mut store = store_in(tmp.path());

            for entry in entries {
                let before = store.len(PartKind::Sphere);
                let existed = store.find(PartKind::Sphere, &entry.type_name, &entry.model).is_some();

                store.upsert(PartKind::Sphere, entry.clone()).unwrap();

                let expected = if existed { before } else { before + 1 };
                prop_assert_eq!(store.len(PartKind::Sphere), expected);
                prop_assert_eq!(
                    store.find(PartKind::Sphere, &entry.type_name, &entry.model),
                    Some(&entry)
                );
            }
        }

        #[test]
        fn prop_remove_takes_exactly_one(
            entries in prop::collection::vec(entry_strategy(), 1..16),
            index in 0usize..24,
        ) {
            let tmp = tempdir().unwrap();
            let mut store = store_in(tmp.path());
            store.bulk_import(PartKind::Flange, entries.clone()).unwrap();

            let result = store.remove(PartKind::Flange, index);
            if index < entries.len() {
                prop_assert_eq!(result.unwrap(), entries[index].clone());
                let mut expected = entries.clone();
                expected.remove(index);
                prop_assert_eq!(store.entries(PartKind::Flange), expected.as_slice());
            } else {
                let is_out_of_range = matches!(result, Err(StoreError::IndexOutOfRange { .. }));
                prop_assert!(is_out_of_range);
                prop_assert_eq!(store.entries(PartKind::Flange), entries.as_slice());
            }
        }

        #[test]
        fn prop_save_load_roundtrip(
            entries in prop::collection::vec(entry_strategy(), 0..16)
        ) {
            let tmp = tempdir().unwrap();
            let mut store = store_in(tmp.path());
            store.spheres = entries;
            store.save(PartKind::Sphere).unwrap();

            let mut fresh = store_in(tmp.path());
            prop_assert_eq!(
                fresh.load(PartKind::Sphere).unwrap(),
                LoadStatus::Loaded(store.len(PartKind::Sphere))
            );
            prop_assert_eq!(fresh.entries(PartKind::Sphere), store.entries(PartKind::Sphere));
        }
    }
}
