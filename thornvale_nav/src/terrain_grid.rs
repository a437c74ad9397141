// Occupancy grid for the height-aware 3D block world.
//
// Built once per map from a `TerrainSource`: a column is walkable when the
// terrain resolves a surface height there, no static obstacle occupies its
// standing space, and no obstacle sits within the mover footprint of its
// center. Surface heights are captured at build time so the grid stays
// self-contained and immutable — `cell_to_world` never goes back to the
// terrain store.
//
// Cells carry a vertical layer index `y`. Terrain is single-layer today; the
// index is bounds-checked so multi-level maps slot in without an interface
// change.
//
// Storage mirrors `tile_grid.rs`: flat `Vec`s indexed by `x + z * width`,
// out-of-bounds queries safely report "not walkable".

use crate::config::{Connectivity, NavConfig};
use crate::geometry::{GridBuildError, TerrainSource, MAX_GRID_CELLS};
use crate::grid::{NavGrid, CARDINAL_OFFSETS, DIAGONAL_OFFSETS};
use crate::types::{BlockCoord, Point3};
use smallvec::SmallVec;
use std::f32::consts::SQRT_2;

/// Immutable walkability-and-height grid over one block-world map.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    /// Flat storage: index = x + z * width.
    walkable: Vec<bool>,
    /// Captured surface height per column; NaN where no surface resolved.
    surface: Vec<f32>,
    width: u32,
    depth: u32,
    cell_size: f32,
    connectivity: Connectivity,
}

impl TerrainGrid {
    /// Sample the terrain into a walkability grid, reading the source exactly
    /// once per column.
    pub fn build<S: TerrainSource + ?Sized>(
        source: &S,
        config: &NavConfig,
    ) -> Result<Self, GridBuildError> {
        let cell_size = config.cell_size;
        if !(cell_size > 0.0) {
            return Err(GridBuildError::InvalidCellSize(cell_size));
        }
        let width = source.width() as usize;
        let depth = source.depth() as usize;
        if width == 0 || depth == 0 {
            return Err(GridBuildError::EmptyBounds {
                width: width as f32,
                height: depth as f32,
            });
        }
        let cells = width * depth;
        if cells > MAX_GRID_CELLS {
            return Err(GridBuildError::TooManyCells { cells });
        }

        let mut surface = vec![f32::NAN; cells];
        let mut obstacle = vec![false; cells];
        for z in 0..depth {
            for x in 0..width {
                let i = x + z * width;
                if let Some(h) = source.surface_height(x as i32, z as i32) {
                    surface[i] = h;
                }
                obstacle[i] = source.is_blocked(x as i32, z as i32);
            }
        }

        // Footprint dilation: a column is also unwalkable when an obstacle
        // column's block sits within `footprint_radius` of its center. Block
        // faces are half a cell from the neighboring center, so a footprint
        // under `cell_size / 2` adds no rings.
        let reach = (config.footprint_radius / cell_size + 0.5).ceil() as i32;
        let mut blocked = obstacle.clone();
        if config.footprint_radius > 0.0 && reach > 0 {
            for z in 0..depth as i32 {
                for x in 0..width as i32 {
                    if !obstacle[x as usize + z as usize * width] {
                        continue;
                    }
                    for dz in -reach..=reach {
                        for dx in -reach..=reach {
                            let (nx, nz) = (x + dx, z + dz);
                            if nx < 0 || nz < 0 || nx >= width as i32 || nz >= depth as i32 {
                                continue;
                            }
                            // Chebyshev gap from the neighbor's center to the
                            // obstacle block's nearest face.
                            let gap_x = (dx.abs() as f32 - 0.5).max(0.0);
                            let gap_z = (dz.abs() as f32 - 0.5).max(0.0);
                            if gap_x.max(gap_z) * cell_size < config.footprint_radius {
                                blocked[nx as usize + nz as usize * width] = true;
                            }
                        }
                    }
                }
            }
        }

        let walkable: Vec<bool> = (0..cells)
            .map(|i| !surface[i].is_nan() && !blocked[i])
            .collect();

        let unwalkable = walkable.iter().filter(|w| !**w).count();
        tracing::debug!(width, depth, unwalkable, "terrain grid built");

        Ok(Self {
            walkable,
            surface,
            width: width as u32,
            depth: depth as u32,
            cell_size,
            connectivity: config.connectivity,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Captured surface height for a cell, or `None` where the terrain never
    /// resolved one (or the cell is out of bounds).
    pub fn surface_height(&self, cell: BlockCoord) -> Option<f32> {
        let h = self.surface[self.cell_index(cell)?];
        if h.is_nan() { None } else { Some(h) }
    }

    fn in_bounds(&self, cell: BlockCoord) -> bool {
        // Single vertical layer today.
        cell.x >= 0
            && cell.z >= 0
            && cell.y == 0
            && (cell.x as u32) < self.width
            && (cell.z as u32) < self.depth
    }
}

impl NavGrid for TerrainGrid {
    type Cell = BlockCoord;
    type WorldPoint = Point3;

    fn cell_count(&self) -> usize {
        (self.width as usize) * (self.depth as usize)
    }

    fn cell_index(&self, cell: BlockCoord) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.x as usize + cell.z as usize * self.width as usize)
        } else {
            None
        }
    }

    fn cell_at(&self, index: usize) -> BlockCoord {
        let w = self.width as usize;
        BlockCoord::new((index % w) as i32, 0, (index / w) as i32)
    }

    fn is_walkable(&self, cell: BlockCoord) -> bool {
        self.cell_index(cell)
            .map(|i| self.walkable[i])
            .unwrap_or(false)
    }

    fn world_to_cell(&self, pos: Point3) -> BlockCoord {
        BlockCoord::new(
            (pos.x / self.cell_size).floor() as i32,
            0,
            (pos.z / self.cell_size).floor() as i32,
        )
    }

    fn cell_to_world(&self, cell: BlockCoord) -> Point3 {
        Point3::new(
            (cell.x as f32 + 0.5) * self.cell_size,
            self.surface_height(cell).unwrap_or(0.0),
            (cell.z as f32 + 0.5) * self.cell_size,
        )
    }

    fn neighbors(&self, cell: BlockCoord) -> SmallVec<[(BlockCoord, f32); 8]> {
        let mut out = SmallVec::new();
        for (dx, dz) in CARDINAL_OFFSETS {
            let n = BlockCoord::new(cell.x + dx, cell.y, cell.z + dz);
            if self.is_walkable(n) {
                out.push((n, self.cell_size));
            }
        }
        if self.connectivity == Connectivity::Eight {
            for (dx, dz) in DIAGONAL_OFFSETS {
                let n = BlockCoord::new(cell.x + dx, cell.y, cell.z + dz);
                if self.is_walkable(n)
                    && self.is_walkable(BlockCoord::new(cell.x + dx, cell.y, cell.z))
                    && self.is_walkable(BlockCoord::new(cell.x, cell.y, cell.z + dz))
                {
                    out.push((n, SQRT_2 * self.cell_size));
                }
            }
        }
        out
    }

    fn heuristic(&self, from: BlockCoord, to: BlockCoord) -> f32 {
        let dx = (from.x - to.x) as f32;
        let dz = (from.z - to.z) as f32;
        dx.hypot(dz) * self.cell_size
    }
}
