// Nearest-walkable recovery for the block world.
//
// Continuous positions do not always land on a walkable cell index: a mover
// standing on a slope, a point a hair past a block's footprint, accumulated
// floating-point drift. Failing the whole path request in those cases would
// make movement near any terrain edge unreliable, so the 3D orchestrator
// snaps both endpoints here first.
//
// The search walks concentric square rings of increasing Chebyshev radius
// around the cell containing the position. Within a ring, candidates are
// visited in a fixed row-major order, so the result is deterministic for a
// given grid and position.

use crate::grid::NavGrid;
use crate::terrain_grid::TerrainGrid;
use crate::types::{BlockCoord, Point3};

/// Find the walkable cell nearest to `pos`, out to `max_radius` rings.
///
/// Returns the cell together with its terrain-surface world position (cell
/// center, surface height), or `None` when no walkable cell exists within
/// range — the caller falls back to its own safe default, never faults.
pub fn snap_to_walkable(
    grid: &TerrainGrid,
    pos: Point3,
    max_radius: i32,
) -> Option<(BlockCoord, Point3)> {
    let origin = grid.world_to_cell(pos);
    for radius in 0..=max_radius.max(0) {
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                // Ring perimeter only; interior cells were covered by
                // smaller radii.
                if dx.abs().max(dz.abs()) != radius {
                    continue;
                }
                let cell = BlockCoord::new(origin.x + dx, origin.y, origin.z + dz);
                if grid.is_walkable(cell) {
                    return Some((cell, grid.cell_to_world(cell)));
                }
            }
        }
    }
    None
}
