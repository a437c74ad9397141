// Core types shared across the navigation subsystem.
//
// Defines grid cell coordinates for the flat tile world (`TileCoord`) and the
// height-aware block world (`BlockCoord`), continuous world-space points
// (`Point2`, `Point3`), and strongly-typed id newtypes (`EntityId`, `MapId`).
// All types derive `Serialize` and `Deserialize` so paths and directives can
// cross the state-transfer boundary unchanged.
//
// See also: `tile_grid.rs` / `terrain_grid.rs` for the grids indexed by these
// coordinates, `search.rs` for the paths built out of them.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Grid cells
// ---------------------------------------------------------------------------

/// A cell in a flat 2D tile grid. `(0, 0)` is the map's world origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance between two cells.
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        ((self.x - other.x).unsigned_abs()).max((self.y - other.y).unsigned_abs())
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A cell in the height-aware 3D block grid.
///
/// `x` and `z` index the horizontal tiling; `y` indexes the vertical layer.
/// Terrain is single-layer today — `y` is carried so multi-level maps do not
/// force a coordinate change later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chebyshev distance in the horizontal plane (layers are not compared).
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        ((self.x - other.x).unsigned_abs()).max((self.z - other.z).unsigned_abs())
    }
}

impl fmt::Display for BlockCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// World-space points
// ---------------------------------------------------------------------------

/// Straight-segment operations shared by 2D and 3D world points, used by the
/// line-of-sight sampler.
pub trait SegmentPoint: Copy {
    fn distance(self, other: Self) -> f32;
    /// Linear interpolation: `t = 0` is `self`, `t = 1` is `other`.
    fn lerp(self, other: Self, t: f32) -> Self;
}

/// A continuous position in a flat 2D map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl SegmentPoint for Point2 {
    fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// A continuous position in the 3D block world. Y is up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance in the horizontal (XZ) plane, ignoring height.
    pub fn horizontal_distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.z - other.z)
    }
}

impl SegmentPoint for Point3 {
    fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Id newtypes
// ---------------------------------------------------------------------------

/// Identifier of a mobile entity. Issued by the external entity store — this
/// subsystem only ever reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// Identifier of a loaded map. One navigation grid exists per map id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapId(pub u32);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapId({})", self.0)
    }
}
