// Map-geometry inputs consumed at grid-build time.
//
// The map loader (outside this crate) hands over static obstacle data in one
// of two shapes: `MapGeometry` — bounds plus axis-aligned blocking rectangles
// for flat tile maps — or a `TerrainSource` implementation exposing block
// occupancy and surface heights for the 3D block world. Either is read
// exactly once per map key, when the grid for that map is first built.
//
// Build failures (`GridBuildError`) mean the loader produced malformed data;
// they are distinct from walkability queries, which never fault.

use crate::types::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard cap on grid cells per map. Guards against a corrupt map definition
/// allocating gigabytes; 4096 x 4096 cells is far beyond any shipped map.
pub const MAX_GRID_CELLS: usize = 4096 * 4096;

/// An axis-aligned blocking rectangle in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point2,
    pub max: Point2,
}

impl Rect {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Point2::new(min_x, min_y),
            max: Point2::new(max_x, max_y),
        }
    }

    /// The rectangle grown outward by `margin` on every side.
    pub fn expanded(self, margin: f32) -> Self {
        Self {
            min: Point2::new(self.min.x - margin, self.min.y - margin),
            max: Point2::new(self.max.x + margin, self.max.y + margin),
        }
    }
}

/// Static collision geometry for one flat tile map: overall bounds plus the
/// walls and blocking objects inside them. World origin is the map's minimum
/// corner; `width` and `height` are in world units.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapGeometry {
    pub width: f32,
    pub height: f32,
    pub blockers: Vec<Rect>,
}

/// Read-only view of one 3D map's terrain, supplied by the terrain store.
///
/// `width`/`depth` are in cells (blocks). `surface_height` returns the world-
/// space height a mover stands at in that column, or `None` where there is no
/// standable surface (a void, an unloaded chunk edge). `is_blocked` reports a
/// static obstacle occupying the column's standing space.
pub trait TerrainSource {
    fn width(&self) -> u32;
    fn depth(&self) -> u32;
    fn surface_height(&self, x: i32, z: i32) -> Option<f32>;
    fn is_blocked(&self, x: i32, z: i32) -> bool;
}

/// Errors from grid construction. These indicate malformed loader output,
/// never a bad runtime query.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GridBuildError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f32),
    #[error("map bounds are empty ({width} x {height})")]
    EmptyBounds { width: f32, height: f32 },
    #[error("grid of {cells} cells exceeds the {MAX_GRID_CELLS}-cell cap")]
    TooManyCells { cells: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_expansion_grows_every_side() {
        let r = Rect::new(2.0, 3.0, 5.0, 7.0).expanded(0.5);
        assert_eq!(r.min.x, 1.5);
        assert_eq!(r.min.y, 2.5);
        assert_eq!(r.max.x, 5.5);
        assert_eq!(r.max.y, 7.5);
    }

    #[test]
    fn geometry_roundtrips_through_json() {
        let geom = MapGeometry {
            width: 32.0,
            height: 16.0,
            blockers: vec![Rect::new(4.0, 0.0, 5.0, 16.0)],
        };
        let json = serde_json::to_string(&geom).unwrap();
        let restored: MapGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.blockers.len(), 1);
        assert_eq!(restored.width, 32.0);
    }

    #[test]
    fn build_error_messages_name_the_problem() {
        let err = GridBuildError::InvalidCellSize(0.0);
        assert!(err.to_string().contains("cell size"));
        let err = GridBuildError::EmptyBounds {
            width: 0.0,
            height: 4.0,
        };
        assert!(err.to_string().contains("empty"));
    }
}
