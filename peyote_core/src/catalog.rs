use std::path::Path;
use std::sync::Arc;

use crate::bead::{BeadType, Color};
use crate::document::CollectionDocument;
use crate::error::Result;

/// A named, ordered group of bead types. Insertion order is display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    name: String,
    bead_types: Vec<Arc<BeadType>>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bead_types: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bead_types(&self) -> &[Arc<BeadType>] {
        &self.bead_types
    }

    pub fn len(&self) -> usize {
        self.bead_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bead_types.is_empty()
    }

    /// Append a bead type and return the shared handle grids will hold.
    pub fn push(&mut self, bead_type: BeadType) -> Arc<BeadType> {
        let bead_type = Arc::new(bead_type);
        self.bead_types.push(Arc::clone(&bead_type));
        bead_type
    }

    /// Tree-style insertion: only bead types are accepted, nested collections
    /// are silently dropped. Returns whether the child was added.
    pub fn add_child(&mut self, child: CatalogItem) -> bool {
        match child {
            CatalogItem::BeadType(bead_type) => {
                self.bead_types.push(bead_type);
                true
            }
            CatalogItem::Collection(_) => false,
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Arc<BeadType>> {
        self.bead_types.iter().find(|b| b.name() == name)
    }

    pub fn find_by_catalog_number(&self, number: &str) -> Option<&Arc<BeadType>> {
        self.bead_types
            .iter()
            .find(|b| b.catalog_number() == Some(number))
    }

    /// Load a collection document (`.peyc`).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let collection = CollectionDocument::read_file(path.as_ref())?.into_collection();
        log::info!(
            "opened collection '{}' ({} bead types) from {}",
            collection.name,
            collection.len(),
            path.as_ref().display()
        );
        Ok(collection)
    }

    /// Save as a collection document (`.peyc`).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        CollectionDocument::from_collection(self).write_file(path.as_ref())?;
        log::info!(
            "saved collection '{}' to {}",
            self.name,
            path.as_ref().display()
        );
        Ok(())
    }
}

/// A node of the two-level catalog tree.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem {
    Collection(Collection),
    BeadType(Arc<BeadType>),
}

impl CatalogItem {
    pub fn name(&self) -> &str {
        match self {
            CatalogItem::Collection(c) => c.name(),
            CatalogItem::BeadType(b) => b.name(),
        }
    }

    /// Bead types are leaves: adding to one is a no-op.
    pub fn add_child(&mut self, child: CatalogItem) -> bool {
        match self {
            CatalogItem::Collection(collection) => collection.add_child(child),
            CatalogItem::BeadType(_) => false,
        }
    }
}

/// Every collection loaded into the session, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    collections: Vec<Collection>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicate names are allowed; lookups return the first match.
    pub fn add_collection(&mut self, collection: Collection) {
        self.collections.push(collection);
    }

    pub fn remove_collection(&mut self, index: usize) -> Option<Collection> {
        (index < self.collections.len()).then(|| self.collections.remove(index))
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Open a collection document and append it. Returns the number of bead
    /// types it brought in.
    pub fn import_collection(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let collection = Collection::open(path)?;
        let count = collection.len();
        self.add_collection(collection);
        Ok(count)
    }

    /// First match in registration order.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<BeadType>> {
        self.collections
            .iter()
            .find_map(|c| c.find_by_name(name))
            .cloned()
    }

    pub fn find_by_catalog_number(&self, number: &str) -> Option<Arc<BeadType>> {
        self.collections
            .iter()
            .find_map(|c| c.find_by_catalog_number(number))
            .cloned()
    }

    /// Name lookup for loaders: a miss is logged and `default` is used instead.
    pub fn resolve_name(&self, name: &str, default: &Arc<BeadType>) -> Arc<BeadType> {
        self.find_by_name(name).unwrap_or_else(|| {
            log::warn!(
                "bead type '{name}' not in catalog, using '{}'",
                default.name()
            );
            Arc::clone(default)
        })
    }

    pub fn resolve_catalog_number(&self, number: &str, default: &Arc<BeadType>) -> Arc<BeadType> {
        self.find_by_catalog_number(number).unwrap_or_else(|| {
            log::warn!(
                "catalog number '{number}' not in catalog, using '{}'",
                default.name()
            );
            Arc::clone(default)
        })
    }
}

/// A tiny starter collection so a fresh session has something to paint with.
pub fn sample_collection() -> Collection {
    let mut collection = Collection::new("Test set");
    collection.push(BeadType::new("Test red", Color::rgb(255, 0, 0)));
    collection.push(BeadType::new("Test blue", Color::rgb(0, 0, 255)));
    collection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bead::Texture;

    fn catalog_with_duplicates() -> (Catalog, Arc<BeadType>, Arc<BeadType>) {
        let mut first = Collection::new("First");
        let early = first.push(
            BeadType::new("Red", Color::rgb(200, 0, 0)).with_catalog_number("DB-0001"),
        );
        let mut second = Collection::new("Second");
        let late = second.push(
            BeadType::new("Red", Color::rgb(150, 0, 0))
                .with_texture(Texture::Polished)
                .with_catalog_number("DB-0001"),
        );
        second.push(BeadType::new("Green", Color::rgb(0, 150, 0)).with_catalog_number("DB-0002"));

        let mut catalog = Catalog::new();
        catalog.add_collection(first);
        catalog.add_collection(second);
        (catalog, early, late)
    }

    #[test]
    fn first_registered_match_wins() {
        let (catalog, early, late) = catalog_with_duplicates();

        let by_name = catalog.find_by_name("Red").expect("Red is registered");
        assert!(Arc::ptr_eq(&by_name, &early));
        assert!(!Arc::ptr_eq(&by_name, &late));

        let again = catalog.find_by_name("Red").expect("Red is registered");
        assert!(Arc::ptr_eq(&by_name, &again));

        let by_number = catalog
            .find_by_catalog_number("DB-0001")
            .expect("DB-0001 is registered");
        assert!(Arc::ptr_eq(&by_number, &early));
    }

    #[test]
    fn lookups_search_every_collection() {
        let (catalog, _, _) = catalog_with_duplicates();
        assert_eq!(
            catalog.find_by_catalog_number("DB-0002").map(|b| b.name().to_string()),
            Some("Green".to_string())
        );
        assert!(catalog.find_by_name("Purple").is_none());
        assert!(catalog.find_by_catalog_number("DB-9999").is_none());
    }

    #[test]
    fn collection_finders_stay_inside_the_collection() {
        let mut set = sample_collection();
        let blue = set.push(BeadType::new("Navy", Color::rgb(0, 0, 128)).with_catalog_number("DB-0206"));

        assert!(set.find_by_name("Navy").is_some_and(|b| Arc::ptr_eq(b, &blue)));
        assert!(set.find_by_catalog_number("DB-0206").is_some_and(|b| Arc::ptr_eq(b, &blue)));
        assert!(set.find_by_name("Red").is_none());
        assert!(set.find_by_catalog_number("").is_none());
    }

    #[test]
    fn misses_resolve_to_default() {
        let (catalog, _, _) = catalog_with_duplicates();
        let blank = Arc::new(BeadType::blank());

        assert!(Arc::ptr_eq(&catalog.resolve_name("Purple", &blank), &blank));
        assert!(Arc::ptr_eq(
            &catalog.resolve_catalog_number("nope", &blank),
            &blank
        ));
        assert_eq!(catalog.resolve_name("Green", &blank).name(), "Green");
    }

    #[test]
    fn collections_reject_nested_collections() {
        let mut item = CatalogItem::Collection(Collection::new("Outer"));
        assert!(!item.add_child(CatalogItem::Collection(Collection::new("Inner"))));

        let bead = Arc::new(BeadType::new("Gold", Color::rgb(212, 175, 55)));
        assert!(item.add_child(CatalogItem::BeadType(Arc::clone(&bead))));

        match &item {
            CatalogItem::Collection(c) => {
                assert_eq!(c.len(), 1);
                assert_eq!(c.bead_types()[0].name(), "Gold");
            }
            CatalogItem::BeadType(_) => unreachable!(),
        }

        let mut leaf = CatalogItem::BeadType(bead);
        assert!(!leaf.add_child(CatalogItem::BeadType(Arc::new(BeadType::blank()))));
    }

    #[test]
    fn remove_collection_keeps_order() {
        let (mut catalog, _, _) = catalog_with_duplicates();
        catalog.add_collection(sample_collection());

        let removed = catalog.remove_collection(0).expect("index 0 exists");
        assert_eq!(removed.name(), "First");
        assert!(catalog.remove_collection(5).is_none());

        let names: Vec<_> = catalog.collections().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Second", "Test set"]);
        // "Red" now resolves to the second collection's entry
        assert_eq!(
            catalog.find_by_name("Red").map(|b| b.texture()),
            Some(Texture::Polished)
        );
    }
}
