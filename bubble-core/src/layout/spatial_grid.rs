// Spatial hash grid for collision candidate lookup.
//
// Instead of testing a spiral sample against every placed circle, this visits only
// circles whose bounding boxes share a cell with the query box.
//
// Boxes that are not finite or span more than MAX_CELLS_PER_AXIS cells are never
// expanded into cells: they sit in an overflow list that every query visits, and a
// query with such a box visits every inserted item.

use super::RectF;
use std::collections::HashMap;

/// Widest box, in cells per axis, that is still spread over the grid.
const MAX_CELLS_PER_AXIS: i64 = 16;

/// A spatial hash grid over circle bounding boxes, storing caller-side indices.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    /// Size of each cell in the grid.
    cell_size: f64,
    /// Map from cell coordinates to indices of boxes overlapping that cell.
    cells: HashMap<(i64, i64), Vec<usize>>,
    /// Items whose boxes are too large (or not finite) to spread over cells.
    overflow: Vec<usize>,
    /// One past the highest inserted index.
    len: usize,
}

/// Inclusive cell range covered by a box.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct CellSpan {
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

impl SpatialGrid {
    /// Create a new spatial grid with the given cell size.
    /// Cell size should be roughly the size of the largest expected item.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 { cell_size } else { 1.0 };
        Self {
            cell_size,
            cells: HashMap::new(),
            overflow: Vec::new(),
            len: 0,
        }
    }

    /// Cells a rectangle overlaps, or `None` when it cannot be bounded to a few cells.
    fn cell_span(&self, rect: &RectF) -> Option<CellSpan> {
        let edges = [rect.x / self.cell_size, rect.right() / self.cell_size, rect.y / self.cell_size, rect.bottom() / self.cell_size];
        let limit = (i64::MAX / 4) as f64;
        if edges.iter().any(|e| !e.is_finite() || e.abs() > limit) {
            return None;
        }

        let span = CellSpan {
            min_x: edges[0].floor() as i64,
            max_x: edges[1].floor() as i64,
            min_y: edges[2].floor() as i64,
            max_y: edges[3].floor() as i64,
        };
        if span.max_x - span.min_x >= MAX_CELLS_PER_AXIS || span.max_y - span.min_y >= MAX_CELLS_PER_AXIS {
            return None;
        }
        Some(span)
    }

    /// Insert the bounding box of item `index` into the grid.
    pub fn insert(&mut self, index: usize, rect: RectF) {
        self.len = self.len.max(index + 1);
        let Some(span) = self.cell_span(&rect) else {
            self.overflow.push(index);
            return;
        };
        for cx in span.min_x..=span.max_x {
            for cy in span.min_y..=span.max_y {
                self.cells.entry((cx, cy)).or_default().push(index);
            }
        }
    }

    /// Call `hit` for items that may overlap `rect` until it returns true.
    /// Items can be visited more than once and may be false positives;
    /// `hit` should do the exact circle check.
    pub fn any_candidate(&self, rect: &RectF, mut hit: impl FnMut(usize) -> bool) -> bool {
        if self.overflow.iter().any(|&i| hit(i)) {
            return true;
        }

        let Some(span) = self.cell_span(rect) else {
            return (0..self.len).any(hit);
        };
        for cx in span.min_x..=span.max_x {
            for cy in span.min_y..=span.max_y {
                if let Some(indices) = self.cells.get(&(cx, cy)) {
                    if indices.iter().any(|&i| hit(i)) {
                        return true;
                    }
                }
            }
        }
        false
    }
}
