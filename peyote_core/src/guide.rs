//! Overlay guide lines drawn on top of a design to make it easier to count
//! tracks and rows. Pure geometry; painting is left to the UI.

use crate::grid::{CellMetrics, DesignGrid, PixelPoint};

/// Rows between two horizontal guides.
pub const ROWS_PER_GUIDE: usize = 5;

/// How far guide lines reach past the grid edge.
const OVERHANG: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideLine {
    pub from: PixelPoint,
    pub to: PixelPoint,
}

/// Vertical lines on every track boundary, then horizontal segments every
/// [`ROWS_PER_GUIDE`] rows, one per track and staggered like the beads.
pub fn guide_lines(grid: &DesignGrid, metrics: &CellMetrics) -> Vec<GuideLine> {
    let pitch_x = metrics.cell_width + metrics.margin;
    let pitch_y = metrics.cell_height + metrics.margin;
    let half_margin = metrics.margin / 2;
    let track_px = grid.track_width() as i64 * pitch_x;
    let bottom = pitch_y * grid.height() as i64 + metrics.cell_height / 2;
    let tracks = grid.track_count();

    let mut lines = Vec::new();

    for boundary in 0..=tracks {
        let x = boundary as i64 * track_px + half_margin;
        lines.push(GuideLine {
            from: PixelPoint { x, y: -OVERHANG },
            to: PixelPoint {
                x,
                y: bottom + OVERHANG,
            },
        });
    }

    for guide in 0..=grid.height() / ROWS_PER_GUIDE {
        let y = (ROWS_PER_GUIDE * guide) as i64 * pitch_y + half_margin;

        for track in 0..tracks {
            let shift = if track % 2 == 1 {
                metrics.cell_height / 2
            } else {
                0
            };
            let lead = if track == 0 { -OVERHANG } else { 0 };
            let tail = if track == tracks - 1 { OVERHANG } else { 0 };

            lines.push(GuideLine {
                from: PixelPoint {
                    x: track as i64 * track_px + half_margin + lead,
                    y: y + shift,
                },
                to: PixelPoint {
                    x: (track as i64 + 1) * track_px + half_margin + tail,
                    y: y + shift,
                },
            });
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bead::BeadType;
    use std::sync::Arc;

    #[test]
    fn counts_track_and_row_guides() -> anyhow::Result<()> {
        let grid = DesignGrid::create(5, 10, 40, &Arc::new(BeadType::blank()))?;
        let lines = guide_lines(&grid, &CellMetrics::default());

        let vertical = lines.iter().filter(|l| l.from.x == l.to.x).count();
        assert_eq!(vertical, 11);
        // 40 rows -> guides at rows 0, 5, ..., 40, one segment per track
        assert_eq!(lines.len() - vertical, 9 * 10);
        Ok(())
    }

    #[test]
    fn horizontal_guides_follow_the_stagger() -> anyhow::Result<()> {
        let grid = DesignGrid::create(2, 3, 5, &Arc::new(BeadType::blank()))?;
        let lines = guide_lines(&grid, &CellMetrics::default());
        let horizontal: Vec<_> = lines.iter().filter(|l| l.from.y == l.to.y).collect();

        // second guide row (row 5), tracks 0..3
        let row5 = &horizontal[3..6];
        assert_eq!(row5[0].from, PixelPoint { x: -28, y: 222 });
        assert_eq!(row5[1].from, PixelPoint { x: 66, y: 242 });
        assert_eq!(row5[2].to, PixelPoint { x: 224, y: 222 });
        Ok(())
    }
}
