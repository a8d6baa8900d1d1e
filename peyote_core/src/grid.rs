use std::sync::Arc;

use crate::bead::BeadType;
use crate::error::{Error, Result};

/// A position in scene pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

/// Size of one bead cell and the gap around it, in scene pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub cell_width: i64,
    pub cell_height: i64,
    pub margin: i64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 28,
            cell_height: 40,
            margin: 4,
        }
    }
}

impl CellMetrics {
    /// Top-left corner of the cell at (`row`, `col`).
    ///
    /// Columns are grouped into tracks of `track_width`; every odd track is
    /// pushed down by half a cell, which gives the staggered peyote look.
    pub fn pixel_offset(&self, row: usize, col: usize, track_width: usize) -> PixelPoint {
        let track = col / track_width;
        let mut y = row as i64 * (self.cell_height + self.margin) + self.margin;
        if track % 2 == 1 {
            y += self.cell_height / 2;
        }

        PixelPoint {
            x: col as i64 * (self.cell_width + self.margin) + self.margin,
            y,
        }
    }

    /// Scene bounds as (x, y, width, height), with 30 px of slack around the grid.
    pub fn scene_rect(&self, grid: &DesignGrid) -> (i64, i64, i64, i64) {
        (
            -30,
            -30,
            (self.cell_width + self.margin) * grid.width() as i64 + 30,
            (self.cell_height + self.margin) * grid.height() as i64 + 30,
        )
    }
}

/// Largest grid (in cells) a design may have.
pub const MAX_CELLS: usize = 1_000_000;

/// `track_width * track_count * row_count`, or `None` when that overflows or
/// exceeds [`MAX_CELLS`].
pub fn cell_count(track_width: usize, track_count: usize, row_count: usize) -> Option<usize> {
    track_width
        .checked_mul(track_count)?
        .checked_mul(row_count)
        .filter(|&cells| cells <= MAX_CELLS)
}

/// The staggered bead grid. Every cell holds a bead type; the default bead
/// stands for "empty".
#[derive(Debug, Clone)]
pub struct DesignGrid {
    track_width: usize,
    track_count: usize,
    row_count: usize,
    cells: Vec<Vec<Arc<BeadType>>>, // [row][col]
}

impl DesignGrid {
    /// Build a grid with every cell set to `default`.
    pub fn create(
        track_width: usize,
        track_count: usize,
        row_count: usize,
        default: &Arc<BeadType>,
    ) -> Result<Self> {
        check_dimension("track_width", track_width, 1)?;
        check_dimension("track_count", track_count, 1)?;
        check_dimension("row_count", row_count, 1)?;
        if cell_count(track_width, track_count, row_count).is_none() {
            return Err(Error::InvalidDimension {
                field: "cells",
                min: 1,
                max: MAX_CELLS,
                value: track_width
                    .saturating_mul(track_count)
                    .saturating_mul(row_count),
            });
        }

        // cannot overflow: the full product was checked above
        let width = track_width * track_count;
        let cells = (0..row_count)
            .map(|_| vec![Arc::clone(default); width])
            .collect();

        Ok(Self {
            track_width,
            track_count,
            row_count,
            cells,
        })
    }

    pub fn track_width(&self) -> usize {
        self.track_width
    }

    pub fn track_count(&self) -> usize {
        self.track_count
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.track_width * self.track_count
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.row_count
    }

    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                row,
                col,
                rows: self.height(),
                cols: self.width(),
            })
        }
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Result<&Arc<BeadType>> {
        self.check_bounds(row, col)?;
        Ok(&self.cells[row][col])
    }

    /// Overwrite one cell. No other cell changes.
    pub fn set_cell(&mut self, row: usize, col: usize, bead_type: Arc<BeadType>) -> Result<()> {
        self.check_bounds(row, col)?;
        self.cells[row][col] = bead_type;
        Ok(())
    }

    /// Row-major walk: row 0 first, columns left to right. Documents and
    /// layout both rely on this order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Arc<BeadType>)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, bead_type)| (row, col, bead_type))
        })
    }

    pub fn track_of(&self, col: usize) -> usize {
        col / self.track_width
    }

    pub fn is_shifted(&self, col: usize) -> bool {
        self.track_of(col) % 2 == 1
    }

    /// Top-left corner of a cell using the default cell metrics.
    pub fn pixel_offset(&self, row: usize, col: usize) -> PixelPoint {
        CellMetrics::default().pixel_offset(row, col, self.track_width)
    }
}

fn check_dimension(field: &'static str, value: usize, min: usize) -> Result<()> {
    if value < min || value > MAX_CELLS {
        return Err(Error::InvalidDimension {
            field,
            min,
            max: MAX_CELLS,
            value,
        });
    }
    Ok(())
}
