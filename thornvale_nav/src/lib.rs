// thornvale_nav — navigation and pathfinding for the Thornvale server.
//
// This crate turns static map geometry into immutable walkability grids and
// answers path queries over them. It is pure in the load-bearing sense: no
// entity state, no event handling, no frame timing — those live in
// `thornvale_movement` and beyond. Everything here can be tested and
// benchmarked headless.
//
// Module overview:
// - `types.rs`:        Grid cells, world points, id newtypes.
// - `config.rs`:       NavConfig — every navigation tunable in one place.
// - `geometry.rs`:     Build inputs (MapGeometry, TerrainSource) and build errors.
// - `grid.rs`:         The NavGrid trait shared by both grid representations.
// - `tile_grid.rs`:    Flat 2D occupancy grid built from blocking rectangles.
// - `terrain_grid.rs`: Height-aware grid sampled from block-world terrain.
// - `search.rs`:       A* over any NavGrid + reusable scratch arena.
// - `los.rs`:          Sampled line-of-sight predicate (direct-motion gate).
// - `snap.rs`:         Nearest-walkable recovery for off-grid 3D positions.
// - `cache.rs`:        Build-once grid cache keyed by map id, with invalidate.
//
// Grids are immutable once built and shared read-only; paths are built fresh
// per query and owned by the caller. Every query degrades safely — out of
// bounds is "not walkable", unreachable is `None`, never a panic.

pub mod cache;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod los;
pub mod search;
pub mod snap;
pub mod terrain_grid;
pub mod tile_grid;
pub mod types;

pub use cache::GridCache;
pub use config::{Connectivity, NavConfig, TieBreak};
pub use geometry::{GridBuildError, MapGeometry, Rect, TerrainSource};
pub use grid::NavGrid;
pub use los::has_line_of_sight;
pub use search::{find_path, find_path_with, Path, SearchBuffers};
pub use snap::snap_to_walkable;
pub use terrain_grid::TerrainGrid;
pub use tile_grid::TileGrid;
pub use types::{BlockCoord, EntityId, MapId, Point2, Point3, SegmentPoint, TileCoord};
