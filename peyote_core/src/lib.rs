//! Pattern model for peyote-stitch beadwork: bead types and the catalog
//! they live in, the staggered design grid, and the `.peyd` / `.peyc`
//! document formats.

pub mod bead;
pub mod catalog;
pub mod design;
pub mod document;
pub mod error;
pub mod grid;
pub mod guide;
pub mod session;

pub use bead::{BLANK_NAME, BeadIcon, BeadType, Color, Fill, Texture};
pub use catalog::{Catalog, CatalogItem, Collection, sample_collection};
pub use design::{COLLECTION_EXTENSION, DESIGN_EXTENSION, Design, UNTITLED};
pub use document::{CollectionDocument, DesignDocument};
pub use error::{Error, ParseError, Result};
pub use grid::{CellMetrics, DesignGrid, PixelPoint};
pub use guide::{GuideLine, guide_lines};
pub use session::{Session, Tool};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
