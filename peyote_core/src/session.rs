use std::path::Path;
use std::sync::Arc;

use crate::bead::BeadType;
use crate::catalog::{Catalog, CatalogItem};
use crate::design::Design;
use crate::error::{Error, Result};
use crate::grid::MAX_CELLS;

/// Smallest height the "new design" workflow accepts.
pub const MIN_NEW_DESIGN_ROWS: usize = 5;

/// What a click on a cell does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Paint the working bead.
    #[default]
    Bead,
    /// Reset the cell to the default bead.
    Remove,
}

/// Editing state shared by everything the UI layer does:
/// - the catalog
/// - the default ("blank") bead
/// - the working bead and the active tool
#[derive(Debug)]
pub struct Session {
    pub catalog: Catalog,
    pub tool: Tool,
    default_bead: Arc<BeadType>,
    working_bead: Arc<BeadType>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_default_bead(BeadType::blank())
    }

    pub fn with_default_bead(default_bead: BeadType) -> Self {
        let default_bead = Arc::new(default_bead);
        Self {
            catalog: Catalog::new(),
            tool: Tool::default(),
            working_bead: Arc::clone(&default_bead),
            default_bead,
        }
    }

    pub fn default_bead(&self) -> &Arc<BeadType> {
        &self.default_bead
    }

    pub fn working_bead(&self) -> &Arc<BeadType> {
        &self.working_bead
    }

    /// Make the first catalog bead named `name` the working bead.
    pub fn select_working_bead(&mut self, name: &str) -> Option<Arc<BeadType>> {
        let bead_type = self.catalog.find_by_name(name)?;
        self.working_bead = Arc::clone(&bead_type);
        Some(bead_type)
    }

    /// Selecting a collection leaves the working bead alone.
    pub fn select_item(&mut self, item: &CatalogItem) -> bool {
        match item {
            CatalogItem::BeadType(bead_type) => {
                self.working_bead = Arc::clone(bead_type);
                true
            }
            CatalogItem::Collection(_) => false,
        }
    }

    /// The "new design" workflow: a blank design at least
    /// [`MIN_NEW_DESIGN_ROWS`] tall.
    pub fn new_design(
        &self,
        name: &str,
        track_width: usize,
        track_count: usize,
        row_count: usize,
    ) -> Result<Design> {
        if row_count < MIN_NEW_DESIGN_ROWS {
            return Err(Error::InvalidDimension {
                field: "row_count",
                min: MIN_NEW_DESIGN_ROWS,
                max: MAX_CELLS,
                value: row_count,
            });
        }
        Design::create(name, track_width, track_count, row_count, &self.default_bead)
    }

    pub fn open_design(&self, path: impl AsRef<Path>) -> Result<Design> {
        Design::open(path, &self.catalog, &self.default_bead)
    }

    pub fn import_collection(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        self.catalog.import_collection(path)
    }

    /// Apply the active tool to one cell.
    pub fn apply_tool(&self, design: &mut Design, row: usize, col: usize) -> Result<()> {
        let bead_type = match self.tool {
            Tool::Bead => Arc::clone(&self.working_bead),
            Tool::Remove => Arc::clone(&self.default_bead),
        };
        design.set_cell(row, col, bead_type)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Collection, sample_collection};

    fn make_session() -> Session {
        let mut session = Session::new();
        session.catalog.add_collection(sample_collection());
        session
    }

    #[test]
    fn tools_paint_and_remove() -> anyhow::Result<()> {
        let mut session = make_session();
        let mut design = session.new_design("Rose", 5, 10, 40)?;

        // nothing selected yet: painting uses the default bead
        session.apply_tool(&mut design, 0, 0)?;
        assert_eq!(design.painted_count(), 0);

        let red = session
            .select_working_bead("Test red")
            .expect("sample bead");
        session.apply_tool(&mut design, 3, 7)?;
        assert!(Arc::ptr_eq(design.get_cell(3, 7)?, &red));

        session.tool = Tool::Remove;
        session.apply_tool(&mut design, 3, 7)?;
        assert!(Arc::ptr_eq(design.get_cell(3, 7)?, session.default_bead()));
        Ok(())
    }

    #[test]
    fn only_bead_types_can_be_selected() {
        let mut session = make_session();
        assert!(session.select_working_bead("Missing").is_none());
        assert!(!session.select_item(&CatalogItem::Collection(Collection::new("Set"))));
        assert!(Arc::ptr_eq(session.working_bead(), session.default_bead()));

        let blue = session.catalog.find_by_name("Test blue").expect("sample bead");
        assert!(session.select_item(&CatalogItem::BeadType(Arc::clone(&blue))));
        assert!(Arc::ptr_eq(session.working_bead(), &blue));
    }

    #[test]
    fn new_design_enforces_minimum_height() {
        let session = make_session();
        assert!(matches!(
            session.new_design("Short", 5, 10, 4),
            Err(Error::InvalidDimension {
                field: "row_count",
                min: 5,
                value: 4,
                ..
            })
        ));
        assert!(matches!(
            session.new_design("Narrow", 0, 10, 40),
            Err(Error::InvalidDimension {
                field: "track_width",
                ..
            })
        ));
    }

    #[test]
    fn imported_collections_resolve_on_open() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let collection_path = dir.path().join("greens.peyc");
        let design_path = dir.path().join("leaf.peyd");

        let mut greens = Collection::new("Greens");
        greens.push(BeadType::new("Moss", "#4a5d23".parse()?));
        greens.save(&collection_path)?;

        // write the design with a session that knows the collection...
        let mut writer = Session::new();
        assert_eq!(writer.import_collection(&collection_path)?, 1);
        writer.select_working_bead("Moss").expect("imported bead");
        let mut design = writer.new_design("Leaf", 2, 3, 5)?;
        writer.apply_tool(&mut design, 4, 5)?;
        design.save(&design_path)?;

        // ...and read it with one that does not
        let reader = make_session();
        let fallback = reader.open_design(&design_path)?;
        assert!(Arc::ptr_eq(fallback.get_cell(4, 5)?, reader.default_bead()));

        let mut reader = reader;
        reader.import_collection(&collection_path)?;
        let resolved = reader.open_design(&design_path)?;
        assert_eq!(resolved.get_cell(4, 5)?.name(), "Moss");
        Ok(())
    }
}
