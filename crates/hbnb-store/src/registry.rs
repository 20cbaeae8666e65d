use hbnb_types::{Record, RecordKind};
use indexmap::IndexMap;

/// Composite registry key: `"<Kind>.<id>"`.
pub fn object_key(kind: RecordKind, id: &str) -> String {
    format!("{kind}.{id}")
}

/// In-memory, insertion-ordered mapping from composite key to record.
///
/// Kind-filtered operations are linear scans over every entry. Iteration
/// order is insertion order, which is also the order of the persisted
/// document and of `all` output.
#[derive(Clone, Default, PartialEq)]
pub struct Registry {
    objects: IndexMap<String, Record>,
}

/// An entry taken out of the registry, with the position it held.
#[derive(Clone, Debug, PartialEq)]
pub struct Removed {
    pub index: usize,
    pub key: String,
    pub record: Record,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All entries, or those whose record is a `kind` (subtype-inclusive),
    /// in insertion order.
    pub fn all(&self, kind: Option<RecordKind>) -> impl Iterator<Item = (&str, &Record)> + '_ {
        self.objects
            .iter()
            .filter(move |(_, record)| kind.map_or(true, |k| record.kind().is_a(k)))
            .map(|(key, record)| (key.as_str(), record))
    }

    /// Number of entries, or of those whose record is a `kind`.
    pub fn count(&self, kind: Option<RecordKind>) -> usize {
        match kind {
            None => self.objects.len(),
            Some(_) => self.all(kind).count(),
        }
    }

    /// Insert or replace the entry for `record`'s kind and id. Returns its key.
    ///
    /// Replacing keeps the entry's original position.
    pub fn insert(&mut self, record: Record) -> String {
        let key = object_key(record.kind(), record.id());
        self.objects.insert(key.clone(), record);
        key
    }

    pub fn get(&self, kind: RecordKind, id: &str) -> Option<&Record> {
        self.objects.get(&object_key(kind, id))
    }

    pub fn get_mut(&mut self, kind: RecordKind, id: &str) -> Option<&mut Record> {
        self.objects.get_mut(&object_key(kind, id))
    }

    pub fn contains(&self, kind: RecordKind, id: &str) -> bool {
        self.objects.contains_key(&object_key(kind, id))
    }

    /// Remove the entry for `kind` and `id`, keeping the order of the rest.
    ///
    /// Removing a missing entry is a no-op returning `None`.
    pub fn remove(&mut self, kind: RecordKind, id: &str) -> Option<Removed> {
        self.objects
            .shift_remove_full(&object_key(kind, id))
            .map(|(index, key, record)| Removed { index, key, record })
    }

    /// Put a removed entry back at the position it held.
    pub fn reinstate(&mut self, removed: Removed) {
        let index = removed.index.min(self.objects.len());
        self.objects.shift_insert(index, removed.key, removed.record);
    }

    /// Composite keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.objects.keys().map(String::as_str)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("object_count", &self.objects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn populated() -> (Registry, Vec<Record>) {
        let mut registry = Registry::new();
        let records: Vec<Record> = RecordKind::ALL.into_iter().map(Record::new).collect();
        for record in &records {
            registry.insert(record.clone());
        }
        (registry, records)
    }

    // -----------------------------------------------------------------------
    // Insert / get
    // -----------------------------------------------------------------------

    #[test]
    fn insert_uses_composite_key() {
        let mut registry = Registry::new();
        let record = Record::new(RecordKind::User);
        let key = registry.insert(record.clone());
        assert_eq!(key, format!("User.{}", record.id()));
        assert_eq!(registry.get(RecordKind::User, record.id()), Some(&record));
    }

    #[test]
    fn get_with_wrong_kind_is_none() {
        let mut registry = Registry::new();
        let record = Record::new(RecordKind::User);
        registry.insert(record.clone());
        assert!(registry.get(RecordKind::Place, record.id()).is_none());
        assert!(registry.get(RecordKind::BaseModel, record.id()).is_none());
        assert!(registry.get(RecordKind::User, "missing").is_none());
    }

    #[test]
    fn insert_is_idempotent_and_keeps_position() {
        let (mut registry, records) = populated();
        let mut changed = records[0].clone();
        changed.set_attribute("note", json!("x")).unwrap();
        registry.insert(changed.clone());
        assert_eq!(registry.len(), 7);
        let (first_key, first) = registry.all(None).next().unwrap();
        assert_eq!(first_key, object_key(changed.kind(), changed.id()));
        assert_eq!(first, &changed);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let (mut registry, records) = populated();
        let user = &records[1];
        registry
            .get_mut(RecordKind::User, user.id())
            .unwrap()
            .set_attribute("email", json!("a@b.c"))
            .unwrap();
        assert_eq!(
            registry.get(RecordKind::User, user.id()).unwrap().attribute("email"),
            Some(json!("a@b.c"))
        );
    }

    // -----------------------------------------------------------------------
    // All / count
    // -----------------------------------------------------------------------

    #[test]
    fn all_preserves_insertion_order() {
        let (registry, records) = populated();
        let ids: Vec<&str> = registry.all(None).map(|(_, r)| r.id()).collect();
        let expected: Vec<&str> = records.iter().map(Record::id).collect();
        assert_eq!(ids, expected);
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn all_filters_by_kind() {
        let (mut registry, _) = populated();
        registry.insert(Record::new(RecordKind::User));
        let users: Vec<&Record> = registry.all(Some(RecordKind::User)).map(|(_, r)| r).collect();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|r| r.kind() == RecordKind::User));
    }

    #[test]
    fn base_model_filter_includes_every_kind() {
        let (registry, _) = populated();
        assert_eq!(registry.all(Some(RecordKind::BaseModel)).count(), 7);
        assert_eq!(registry.count(Some(RecordKind::BaseModel)), 7);
    }

    #[test]
    fn count_total_and_per_kind() {
        let (registry, _) = populated();
        assert_eq!(registry.count(None), 7);
        for kind in RecordKind::ALL.into_iter().filter(|k| *k != RecordKind::BaseModel) {
            assert_eq!(registry.count(Some(kind)), 1, "{kind}");
        }
    }

    #[test]
    fn empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.count(None), 0);
        assert_eq!(registry.all(Some(RecordKind::User)).count(), 0);
    }

    // -----------------------------------------------------------------------
    // Remove / reinstate
    // -----------------------------------------------------------------------

    #[test]
    fn remove_present_entry() {
        let (mut registry, records) = populated();
        let city = &records[3];
        let removed = registry.remove(RecordKind::City, city.id()).unwrap();
        assert_eq!(removed.index, 3);
        assert_eq!(&removed.record, city);
        assert!(!registry.contains(RecordKind::City, city.id()));
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn remove_missing_entry_is_noop() {
        let (mut registry, _) = populated();
        assert!(registry.remove(RecordKind::City, "nope").is_none());
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn reinstate_restores_position() {
        let (mut registry, _) = populated();
        let before: Vec<String> = registry.keys().map(str::to_string).collect();
        let (kind, id) = {
            let (_, r) = registry.all(None).nth(2).unwrap();
            (r.kind(), r.id().to_string())
        };
        let removed = registry.remove(kind, &id).unwrap();
        registry.reinstate(removed);
        let after: Vec<String> = registry.keys().map(str::to_string).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn clear_removes_all() {
        let (mut registry, _) = populated();
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn debug_format() {
        let (registry, _) = populated();
        let debug = format!("{registry:?}");
        assert!(debug.contains("Registry"));
        assert!(debug.contains("object_count: 7"));
    }
}
