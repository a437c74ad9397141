// Contracts between the movement orchestrators and the rest of the server.
//
// The navigation crate is pure; everything stateful it needs — where an
// entity currently is, what a map's geometry looks like, who is AI-driven,
// where movement transitions go — arrives through the traits here. The
// server's stores implement them; tests implement them with tiny fixtures.
//
// Each trait is read-only except `MovementSink`, which receives exactly one
// directive per handled intent.

use serde::{Deserialize, Serialize};
use thornvale_nav::{
    BlockCoord, EntityId, MapGeometry, MapId, Path, Point2, Point3, TerrainSource, TileCoord,
};

/// The orchestrator's single output: what the entity should do about the
/// intent it just handled. The movement-state store consumes this and the
/// per-frame integrator advances the entity from there.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum MovementDirective<C, P> {
    /// Walk straight to the target — it is close and visibly reachable.
    Direct { target: P },
    /// Follow the waypoint sequence produced by the path search. An empty
    /// waypoint list means "already arrived".
    Path(Path<C, P>),
    /// No route to the target; the entity stays put.
    Idle,
}

pub type TileDirective = MovementDirective<TileCoord, Point2>;
pub type TerrainDirective = MovementDirective<BlockCoord, Point3>;

/// Supplies collision geometry for flat tile maps. Consulted once per map
/// key, at grid-build time.
pub trait TileMapSource {
    fn map_geometry(&self, map: MapId) -> Option<MapGeometry>;
}

/// Supplies terrain data for block-world maps. Consulted once per map key,
/// at grid-build time.
pub trait TerrainMapSource {
    fn terrain(&self, map: MapId) -> Option<&dyn TerrainSource>;
}

/// Point-in-time projection of entity positions on flat maps.
pub trait TilePositions {
    fn locate(&self, entity: EntityId) -> Option<(MapId, Point2)>;
}

/// Point-in-time projection of entity positions in the block world.
pub trait TerrainPositions {
    fn locate(&self, entity: EntityId) -> Option<(MapId, Point3)>;
}

/// Classification of movers, from the controller registry. AI-controlled
/// movers never take the direct-motion shortcut.
pub trait MoverRegistry {
    fn is_ai_controlled(&self, entity: EntityId) -> bool;
}

/// Receives the movement-state transition for a handled intent. Called
/// exactly once per intent that was not dropped; a later call for the same
/// entity supersedes the earlier one (last write wins).
pub trait MovementSink<C, P> {
    fn apply(&mut self, entity: EntityId, directive: MovementDirective<C, P>);
}
