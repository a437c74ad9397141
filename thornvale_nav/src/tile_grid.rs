// Occupancy grid for flat 2D tile maps.
//
// Built once per map from `MapGeometry`: every blocking rectangle is grown
// outward by the mover footprint, then each cell whose center falls inside a
// grown rectangle is marked unwalkable. Evaluating at cell centers pairs with
// the cell-center waypoint convention — a path over walkable centers keeps a
// footprint-sized mover clear of the original geometry.
//
// Storage is a flat `Vec<bool>` indexed by `x + y * width` for O(1) lookup.
// Out-of-bounds queries return "not walkable"; nothing here faults.
//
// See also: `grid.rs` for the `NavGrid` trait this implements, `geometry.rs`
// for the build input, `terrain_grid.rs` for the 3D counterpart.

use crate::config::{Connectivity, NavConfig};
use crate::geometry::{GridBuildError, MapGeometry, MAX_GRID_CELLS};
use crate::grid::{NavGrid, CARDINAL_OFFSETS, DIAGONAL_OFFSETS};
use crate::types::{Point2, TileCoord};
use smallvec::SmallVec;
use std::f32::consts::SQRT_2;

/// Immutable walkability grid over one flat tile map.
#[derive(Clone, Debug)]
pub struct TileGrid {
    /// Flat storage: index = x + y * width.
    walkable: Vec<bool>,
    width: u32,
    height: u32,
    cell_size: f32,
    connectivity: Connectivity,
}

impl TileGrid {
    /// Rasterize map geometry into a walkability grid.
    ///
    /// Reads the geometry exactly once; the result never changes afterwards.
    pub fn build(geometry: &MapGeometry, config: &NavConfig) -> Result<Self, GridBuildError> {
        let cell_size = config.cell_size;
        if !(cell_size > 0.0) {
            return Err(GridBuildError::InvalidCellSize(cell_size));
        }
        if geometry.width <= 0.0 || geometry.height <= 0.0 {
            return Err(GridBuildError::EmptyBounds {
                width: geometry.width,
                height: geometry.height,
            });
        }

        let width = (geometry.width / cell_size).ceil() as usize;
        let height = (geometry.height / cell_size).ceil() as usize;
        let cells = width * height;
        if cells > MAX_GRID_CELLS {
            return Err(GridBuildError::TooManyCells { cells });
        }

        let mut walkable = vec![true; cells];
        for blocker in &geometry.blockers {
            let grown = blocker.expanded(config.footprint_radius);
            // Cells whose center lies inside the grown rectangle.
            let x0 = ((grown.min.x / cell_size - 0.5).ceil() as i64).max(0) as usize;
            let y0 = ((grown.min.y / cell_size - 0.5).ceil() as i64).max(0) as usize;
            let x1 = ((grown.max.x / cell_size - 0.5).floor() as i64).min(width as i64 - 1);
            let y1 = ((grown.max.y / cell_size - 0.5).floor() as i64).min(height as i64 - 1);
            if x1 < 0 || y1 < 0 {
                continue;
            }
            for y in y0..=y1 as usize {
                for x in x0..=x1 as usize {
                    walkable[x + y * width] = false;
                }
            }
        }

        let blocked = walkable.iter().filter(|w| !**w).count();
        tracing::debug!(width, height, blocked, "tile grid built");

        Ok(Self {
            walkable,
            width: width as u32,
            height: height as u32,
            cell_size,
            connectivity: config.connectivity,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn in_bounds(&self, cell: TileCoord) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.width
            && (cell.y as u32) < self.height
    }
}

impl NavGrid for TileGrid {
    type Cell = TileCoord;
    type WorldPoint = Point2;

    fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    fn cell_index(&self, cell: TileCoord) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.x as usize + cell.y as usize * self.width as usize)
        } else {
            None
        }
    }

    fn cell_at(&self, index: usize) -> TileCoord {
        let w = self.width as usize;
        TileCoord::new((index % w) as i32, (index / w) as i32)
    }

    fn is_walkable(&self, cell: TileCoord) -> bool {
        self.cell_index(cell)
            .map(|i| self.walkable[i])
            .unwrap_or(false)
    }

    fn world_to_cell(&self, pos: Point2) -> TileCoord {
        TileCoord::new(
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    fn cell_to_world(&self, cell: TileCoord) -> Point2 {
        Point2::new(
            (cell.x as f32 + 0.5) * self.cell_size,
            (cell.y as f32 + 0.5) * self.cell_size,
        )
    }

    fn neighbors(&self, cell: TileCoord) -> SmallVec<[(TileCoord, f32); 8]> {
        let mut out = SmallVec::new();
        for (dx, dy) in CARDINAL_OFFSETS {
            let n = TileCoord::new(cell.x + dx, cell.y + dy);
            if self.is_walkable(n) {
                out.push((n, self.cell_size));
            }
        }
        if self.connectivity == Connectivity::Eight {
            for (dx, dy) in DIAGONAL_OFFSETS {
                let n = TileCoord::new(cell.x + dx, cell.y + dy);
                // Both flanking cardinal cells must be clear or the mover
                // would cut the corner between them.
                if self.is_walkable(n)
                    && self.is_walkable(TileCoord::new(cell.x + dx, cell.y))
                    && self.is_walkable(TileCoord::new(cell.x, cell.y + dy))
                {
                    out.push((n, SQRT_2 * self.cell_size));
                }
            }
        }
        out
    }

    fn heuristic(&self, from: TileCoord, to: TileCoord) -> f32 {
        let dx = (from.x - to.x) as f32;
        let dy = (from.y - to.y) as f32;
        dx.hypot(dy) * self.cell_size
    }
}
