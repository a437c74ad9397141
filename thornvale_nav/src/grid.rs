// The shared navigation-grid interface.
//
// Both grid representations — `TileGrid` for flat 2D maps and `TerrainGrid`
// for the height-aware block world — implement `NavGrid`, so the A* search,
// the line-of-sight sampler, and the grid cache are each written once and
// instantiated for both. The trait exposes a dense `cell_index`/`cell_at`
// pair so search scratch buffers can be plain `Vec`s instead of hash maps.
//
// Grids are immutable after construction and shared read-only (`Arc`) across
// every entity and path query on their map.
//
// See also: `tile_grid.rs` / `terrain_grid.rs` for the two implementations,
// `search.rs` for the generic A* over this trait.

use crate::types::SegmentPoint;
use smallvec::SmallVec;
use std::fmt;

/// Cardinal neighbor offsets in the horizontal plane: +x, -x, +second-axis,
/// -second-axis. The second axis is `y` for tile maps and `z` for terrain.
pub(crate) const CARDINAL_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal neighbor offsets, used under eight-way connectivity.
pub(crate) const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// A static occupancy grid over one map, queryable for walkability and
/// convertible between grid cells and continuous world positions.
///
/// Out-of-bounds cells are always reported as not walkable — bounds checking
/// is a safe predicate, never a fault.
pub trait NavGrid {
    type Cell: Copy + Eq + fmt::Debug;
    type WorldPoint: SegmentPoint + fmt::Debug;

    /// Total number of cells, the arena size for search scratch buffers.
    fn cell_count(&self) -> usize;

    /// Dense index of a cell in `[0, cell_count)`, or `None` out of bounds.
    fn cell_index(&self, cell: Self::Cell) -> Option<usize>;

    /// Inverse of `cell_index`. Only called with indices previously produced
    /// by `cell_index` on the same grid.
    fn cell_at(&self, index: usize) -> Self::Cell;

    /// Whether a mover may stand in this cell. `false` for any cell outside
    /// `[0, width) x [0, depth)`.
    fn is_walkable(&self, cell: Self::Cell) -> bool;

    /// The cell containing a continuous world position.
    fn world_to_cell(&self, pos: Self::WorldPoint) -> Self::Cell;

    /// The world-space center of a cell. Cell centers keep waypoints off cell
    /// edges, so footprint clearance established at build time holds along
    /// the path.
    fn cell_to_world(&self, cell: Self::Cell) -> Self::WorldPoint;

    /// Walkable neighbors of a cell with their step costs in world units.
    /// Under eight-way connectivity a diagonal neighbor is included only when
    /// both adjacent cardinal cells are walkable, so no step clips a corner.
    fn neighbors(&self, cell: Self::Cell) -> SmallVec<[(Self::Cell, f32); 8]>;

    /// Straight-line distance between two cell centers in the horizontal
    /// plane, in world units. Admissible and consistent for the step costs
    /// `neighbors` reports.
    fn heuristic(&self, from: Self::Cell, to: Self::Cell) -> f32;
}
