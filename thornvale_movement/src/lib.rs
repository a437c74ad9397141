// thornvale_movement — movement-intent orchestration for the Thornvale server.
//
// This crate is the side-effecting rim around `thornvale_nav`: it consumes
// "move entity E to P" intents, owns the per-map grid caches and search
// scratch, decides direct motion vs. path-following, and publishes exactly
// one movement-state transition per handled intent. State it does not own —
// entity positions, map geometry, controller classification, the movement
// store — is reached through the traits in `hooks.rs`.
//
// Module overview:
// - `hooks.rs`:   Collaborator traits + the MovementDirective output enum.
// - `tile.rs`:    TileNavigator — the flat-map orchestrator.
// - `terrain.rs`: TerrainNavigator — the block-world orchestrator, with
//                 endpoint snapping on top of the shared shape.
//
// Everything is synchronous and single-threaded; intents are handled in
// arrival order and a later intent for the same entity supersedes the
// earlier one at the sink.

pub mod hooks;
pub mod terrain;
pub mod tile;

pub use hooks::{
    MovementDirective, MovementSink, MoverRegistry, TerrainDirective, TerrainMapSource,
    TerrainPositions, TileDirective, TileMapSource, TilePositions,
};
pub use terrain::TerrainNavigator;
pub use tile::TileNavigator;
