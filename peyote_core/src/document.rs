//! On-disk document trees for designs (`.peyd`) and collections (`.peyc`).
//!
//! Writing goes through the serde-derived records below. Reading walks a
//! `serde_json::Value` by hand so that a bad document reports *which* field
//! is missing or has the wrong kind. A document is fully parsed and checked
//! before any design or collection is built from it.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::bead::{BeadType, Color, Texture};
use crate::catalog::{Catalog, Collection};
use crate::design::Design;
use crate::error::{Error, ParseError, Result};
use crate::grid::cell_count;

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Serialized form of a [`Design`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignDocument {
    #[serde(rename = "__info__")]
    pub info: DesignInfo,
    /// Only cells that differ from the default bead.
    #[serde(rename = "__beads__")]
    pub beads: Vec<BeadPlacement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignInfo {
    #[serde(rename = "__name__")]
    pub name: String,
    #[serde(rename = "__track_width__")]
    pub track_width: usize,
    #[serde(rename = "__tracks__")]
    pub tracks: usize,
    #[serde(rename = "__height__")]
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeadPlacement {
    #[serde(rename = "__bead_type__")]
    pub bead_type: String,
    /// Column.
    #[serde(rename = "__x__")]
    pub x: usize,
    /// Row.
    #[serde(rename = "__y__")]
    pub y: usize,
}

impl DesignDocument {
    pub fn from_design(design: &Design) -> Self {
        let grid = design.grid();
        let beads = grid
            .iter()
            .filter(|(_, _, bead_type)| !design.is_default(bead_type))
            .map(|(row, col, bead_type)| BeadPlacement {
                bead_type: bead_type.name().to_string(),
                x: col,
                y: row,
            })
            .collect();

        Self {
            info: DesignInfo {
                name: design.name().to_string(),
                track_width: grid.track_width(),
                tracks: grid.track_count(),
                height: grid.row_count(),
            },
            beads,
        }
    }

    pub fn from_value(value: &Value) -> ParseResult<Self> {
        let root = as_object(value, "document")?;

        let info_value = field(root, "", "__info__")?;
        let info_obj = as_object(info_value, "__info__")?;
        let info = DesignInfo {
            name: str_field(info_obj, "__info__", "__name__")?.to_string(),
            track_width: positive_field(info_obj, "__info__", "__track_width__")?,
            tracks: positive_field(info_obj, "__info__", "__tracks__")?,
            height: positive_field(info_obj, "__info__", "__height__")?,
        };

        let beads = array_field(root, "", "__beads__")?
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let path = format!("__beads__[{i}]");
                let obj = as_object(entry, &path)?;
                Ok(BeadPlacement {
                    bead_type: str_field(obj, &path, "__bead_type__")?.to_string(),
                    x: uint_field(obj, &path, "__x__")?,
                    y: uint_field(obj, &path, "__y__")?,
                })
            })
            .collect::<ParseResult<Vec<_>>>()?;

        let doc = Self { info, beads };
        doc.check_placements()?;
        Ok(doc)
    }

    pub fn from_json_str(text: &str) -> ParseResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// (width, height) in cells, rejecting grids larger than
    /// [`MAX_CELLS`](crate::grid::MAX_CELLS).
    fn grid_size(&self) -> ParseResult<(usize, usize)> {
        let info = &self.info;
        cell_count(info.track_width, info.tracks, info.height)
            .map(|_| (info.track_width * info.tracks, info.height))
            .ok_or_else(|| {
                ParseError::type_mismatch("__info__", "dimensions within the grid cell limit")
            })
    }

    fn check_placements(&self) -> ParseResult<()> {
        let (width, height) = self.grid_size()?;
        for (index, bead) in self.beads.iter().enumerate() {
            if bead.x >= width || bead.y >= height {
                return Err(ParseError::MalformedSparseList {
                    index,
                    message: format!(
                        "cell (x {}, y {}) is outside the {width}x{height} design",
                        bead.x, bead.y
                    ),
                });
            }
        }
        Ok(())
    }

    /// Build the design: a blank grid sized from `__info__`, then the sparse
    /// entries in document order (a later entry for the same cell wins).
    /// Unknown bead names fall back to `default`.
    pub fn into_design(self, catalog: &Catalog, default: &Arc<BeadType>) -> Result<Design> {
        self.check_placements()?;

        let mut design = Design::create(
            self.info.name,
            self.info.track_width,
            self.info.tracks,
            self.info.height,
            default,
        )?;

        for bead in &self.beads {
            let bead_type = catalog.resolve_name(&bead.bead_type, default);
            design.set_cell(bead.y, bead.x, bead_type)?;
        }

        log::debug!(
            "built design '{}' with {} placed beads",
            design.name(),
            self.beads.len()
        );
        Ok(design)
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::Encode)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Encode)
    }

    pub fn read_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_json_str(&text)?)
    }

    pub fn write_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_string_pretty()?).map_err(|e| Error::io(path, e))
    }
}

/// Serialized form of a [`Collection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionDocument {
    #[serde(rename = "__name__")]
    pub name: String,
    #[serde(rename = "__bead_types__")]
    pub bead_types: Vec<BeadTypeRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeadTypeRecord {
    #[serde(rename = "__name__")]
    pub name: String,
    /// Empty when the bead has no catalog number.
    #[serde(rename = "__catalog_number__")]
    pub catalog_number: String,
    #[serde(rename = "__base_color__")]
    pub base_color: Color,
    #[serde(rename = "__highlight_color__")]
    pub highlight_color: Color,
    #[serde(rename = "__texture__")]
    pub texture: i64,
}

impl BeadTypeRecord {
    fn from_bead_type(bead_type: &BeadType) -> Self {
        Self {
            name: bead_type.name().to_string(),
            catalog_number: bead_type.catalog_number().unwrap_or_default().to_string(),
            base_color: bead_type.base_color(),
            highlight_color: bead_type.highlight_color(),
            texture: bead_type.texture().code(),
        }
    }

    fn to_bead_type(&self) -> BeadType {
        BeadType::new(self.name.clone(), self.base_color)
            .with_highlight(self.highlight_color)
            .with_texture(Texture::from_code(self.texture))
            .with_catalog_number(self.catalog_number.clone())
    }
}

impl CollectionDocument {
    pub fn from_collection(collection: &Collection) -> Self {
        Self {
            name: collection.name().to_string(),
            bead_types: collection
                .bead_types()
                .iter()
                .map(|b| BeadTypeRecord::from_bead_type(b))
                .collect(),
        }
    }

    pub fn from_value(value: &Value) -> ParseResult<Self> {
        let root = as_object(value, "document")?;
        let name = str_field(root, "", "__name__")?.to_string();

        let bead_types = array_field(root, "", "__bead_types__")?
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let path = format!("__bead_types__[{i}]");
                let obj = as_object(entry, &path)?;
                Ok(BeadTypeRecord {
                    name: str_field(obj, &path, "__name__")?.to_string(),
                    catalog_number: str_field(obj, &path, "__catalog_number__")?.to_string(),
                    base_color: color_field(obj, &path, "__base_color__")?,
                    highlight_color: color_field(obj, &path, "__highlight_color__")?,
                    texture: int_field(obj, &path, "__texture__")?,
                })
            })
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(Self { name, bead_types })
    }

    pub fn from_json_str(text: &str) -> ParseResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn into_collection(self) -> Collection {
        let mut collection = Collection::new(self.name);
        for record in &self.bead_types {
            collection.push(record.to_bead_type());
        }
        collection
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::Encode)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Encode)
    }

    pub fn read_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_json_str(&text)?)
    }

    pub fn write_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_string_pretty()?).map_err(|e| Error::io(path, e))
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> ParseResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ParseError::type_mismatch(path, "an object"))
}

fn field<'a>(obj: &'a Map<String, Value>, parent: &str, key: &str) -> ParseResult<&'a Value> {
    obj.get(key)
        .ok_or_else(|| ParseError::missing_field(join(parent, key)))
}

fn str_field<'a>(obj: &'a Map<String, Value>, parent: &str, key: &str) -> ParseResult<&'a str> {
    field(obj, parent, key)?
        .as_str()
        .ok_or_else(|| ParseError::type_mismatch(join(parent, key), "a string"))
}

fn array_field<'a>(
    obj: &'a Map<String, Value>,
    parent: &str,
    key: &str,
) -> ParseResult<&'a Vec<Value>> {
    field(obj, parent, key)?
        .as_array()
        .ok_or_else(|| ParseError::type_mismatch(join(parent, key), "an array"))
}

fn int_field(obj: &Map<String, Value>, parent: &str, key: &str) -> ParseResult<i64> {
    field(obj, parent, key)?
        .as_i64()
        .ok_or_else(|| ParseError::type_mismatch(join(parent, key), "an integer"))
}

fn uint_field(obj: &Map<String, Value>, parent: &str, key: &str) -> ParseResult<usize> {
    field(obj, parent, key)?
        .as_u64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| ParseError::type_mismatch(join(parent, key), "a non-negative integer"))
}

fn positive_field(obj: &Map<String, Value>, parent: &str, key: &str) -> ParseResult<usize> {
    match uint_field(obj, parent, key) {
        Ok(0) | Err(ParseError::TypeMismatch { .. }) => Err(ParseError::type_mismatch(
            join(parent, key),
            "an integer >= 1",
        )),
        other => other,
    }
}

fn color_field(obj: &Map<String, Value>, parent: &str, key: &str) -> ParseResult<Color> {
    str_field(obj, parent, key)?
        .parse()
        .map_err(|_| ParseError::type_mismatch(join(parent, key), "a hex color string"))
}
