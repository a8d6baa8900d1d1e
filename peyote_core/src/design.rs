use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::bead::BeadType;
use crate::catalog::Catalog;
use crate::document::DesignDocument;
use crate::error::Result;
use crate::grid::DesignGrid;

pub const UNTITLED: &str = "(Untitled)";

pub const DESIGN_EXTENSION: &str = "peyd";
pub const COLLECTION_EXTENSION: &str = "peyc";

/// A design is the document we save/load: a name and one bead grid.
/// Dimensions are fixed when it is created.
#[derive(Debug, Clone)]
pub struct Design {
    name: String,
    grid: DesignGrid,
    default_bead: Arc<BeadType>,
    filepath: Option<PathBuf>,
}

impl Design {
    /// A blank design. An empty name becomes [`UNTITLED`].
    pub fn create(
        name: impl Into<String>,
        track_width: usize,
        track_count: usize,
        row_count: usize,
        default_bead: &Arc<BeadType>,
    ) -> Result<Self> {
        let grid = DesignGrid::create(track_width, track_count, row_count, default_bead)?;
        let name = name.into();
        let name = if name.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            name
        };

        Ok(Self {
            name,
            grid,
            default_bead: Arc::clone(default_bead),
            filepath: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &DesignGrid {
        &self.grid
    }

    pub fn default_bead(&self) -> &Arc<BeadType> {
        &self.default_bead
    }

    /// True for the default bead or an identical copy of it.
    pub fn is_default(&self, bead_type: &Arc<BeadType>) -> bool {
        Arc::ptr_eq(bead_type, &self.default_bead) || **bead_type == *self.default_bead
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Result<&Arc<BeadType>> {
        self.grid.get_cell(row, col)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, bead_type: Arc<BeadType>) -> Result<()> {
        self.grid.set_cell(row, col, bead_type)
    }

    /// Reset one cell to the default bead.
    pub fn clear_cell(&mut self, row: usize, col: usize) -> Result<()> {
        let default = Arc::clone(&self.default_bead);
        self.grid.set_cell(row, col, default)
    }

    /// Number of cells holding something other than the default bead.
    pub fn painted_count(&self) -> usize {
        self.grid
            .iter()
            .filter(|(_, _, bead_type)| !self.is_default(bead_type))
            .count()
    }

    /// Where this design was last opened from or saved to.
    pub fn filepath(&self) -> Option<&Path> {
        self.filepath.as_deref()
    }

    /// A design that has never been written needs a "save as".
    pub fn requires_save_as(&self) -> bool {
        self.filepath.is_none()
    }

    pub fn to_document(&self) -> DesignDocument {
        DesignDocument::from_design(self)
    }

    /// Load a design document. Unknown bead names fall back to `default_bead`.
    pub fn open(
        path: impl AsRef<Path>,
        catalog: &Catalog,
        default_bead: &Arc<BeadType>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let mut design = DesignDocument::read_file(path)?.into_design(catalog, default_bead)?;
        design.filepath = Some(path.to_path_buf());

        log::info!(
            "opened design '{}' ({}x{}) from {}",
            design.name,
            design.grid.width(),
            design.grid.height(),
            path.display()
        );
        Ok(design)
    }

    /// Write the design and remember `path` for the next save.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_document().write_file(path)?;
        self.filepath = Some(path.to_path_buf());

        log::info!("saved design '{}' to {}", self.name, path.display());
        Ok(())
    }
}

/// Append `extension` unless the path already has one.
pub fn with_extension_if_missing(path: impl AsRef<Path>, extension: &str) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_collection;
    use crate::error::{Error, ParseError};

    fn setup() -> (Catalog, Arc<BeadType>) {
        let mut catalog = Catalog::new();
        catalog.add_collection(sample_collection());
        (catalog, Arc::new(BeadType::blank()))
    }

    #[test]
    fn empty_name_becomes_untitled() -> anyhow::Result<()> {
        let (_, blank) = setup();
        assert_eq!(Design::create("", 1, 1, 5, &blank)?.name(), UNTITLED);
        assert_eq!(Design::create("  ", 1, 1, 5, &blank)?.name(), UNTITLED);
        assert_eq!(Design::create("Rose", 1, 1, 5, &blank)?.name(), "Rose");
        Ok(())
    }

    #[test]
    fn painted_count_ignores_default_copies() -> anyhow::Result<()> {
        let (catalog, blank) = setup();
        let mut design = Design::create("Count", 2, 2, 5, &blank)?;

        design.set_cell(0, 0, catalog.find_by_name("Test red").expect("sample bead"))?;
        design.set_cell(1, 1, Arc::new(BeadType::blank()))?;
        assert_eq!(design.painted_count(), 1);

        design.clear_cell(0, 0)?;
        assert_eq!(design.painted_count(), 0);
        Ok(())
    }

    #[test]
    fn save_then_open_restores_cells() -> anyhow::Result<()> {
        let (catalog, blank) = setup();
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bracelet.peyd");

        let mut design = Design::create("Bracelet", 5, 10, 40, &blank)?;
        assert!(design.requires_save_as());
        design.set_cell(3, 7, catalog.find_by_name("Test red").expect("sample bead"))?;
        design.save(&path)?;
        assert_eq!(design.filepath(), Some(path.as_path()));

        let opened = Design::open(&path, &catalog, &blank)?;
        assert_eq!(opened.name(), "Bracelet");
        assert_eq!(opened.filepath(), Some(path.as_path()));
        assert_eq!(opened.get_cell(3, 7)?.name(), "Test red");
        assert_eq!(opened.painted_count(), 1);
        assert_eq!(opened.to_document(), design.to_document());
        Ok(())
    }

    #[test]
    fn open_reports_io_and_parse_errors() -> anyhow::Result<()> {
        let (catalog, blank) = setup();
        let dir = tempfile::tempdir()?;

        let missing = dir.path().join("nope.peyd");
        assert!(matches!(
            Design::open(&missing, &catalog, &blank),
            Err(Error::Io { .. })
        ));

        let broken = dir.path().join("broken.peyd");
        std::fs::write(&broken, r#"{ "__beads__": [] }"#)?;
        assert!(matches!(
            Design::open(&broken, &catalog, &blank),
            Err(Error::Parse(ParseError::MissingField { .. }))
        ));
        Ok(())
    }

    #[test]
    fn extension_helper_keeps_existing_extension() {
        assert_eq!(
            with_extension_if_missing("rose", DESIGN_EXTENSION),
            PathBuf::from("rose.peyd")
        );
        assert_eq!(
            with_extension_if_missing("rose.json", DESIGN_EXTENSION),
            PathBuf::from("rose.json")
        );
    }
}
