// Movement-intent orchestration for flat tile maps.
//
// `TileNavigator` is the only side-effecting piece of the navigation stack:
// it reacts to "move entity E to P" intents, fetches or builds the map's
// walkability grid, picks direct motion or a full path search, and publishes
// exactly one movement-state transition to the sink. Intents for entities
// with no current position (despawned between dispatch and handling) are
// dropped without a transition.
//
// Everything runs synchronously inside the calling frame: grid build on
// first touch of a map, then search or line-of-sight, then one sink call.
// Intents are handled strictly in arrival order; when two target the same
// entity in one frame, the sink's last write wins.
//
// See also: `terrain.rs` for the block-world variant (same shape plus
// endpoint snapping), `hooks.rs` for the collaborator traits.

use crate::hooks::{MovementDirective, MovementSink, MoverRegistry, TileMapSource, TilePositions};
use thornvale_nav::{
    find_path_with, has_line_of_sight, EntityId, GridCache, MapId, NavConfig, NavGrid, Point2,
    SearchBuffers, SegmentPoint, TileCoord, TileGrid,
};

/// Orchestrates movement intents on flat tile maps.
pub struct TileNavigator {
    config: NavConfig,
    cache: GridCache<TileGrid>,
    buffers: SearchBuffers,
}

impl TileNavigator {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            cache: GridCache::new(),
            buffers: SearchBuffers::new(),
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Drop the cached grid for a reloaded map; the next intent on that map
    /// rebuilds from fresh geometry.
    pub fn invalidate_map(&mut self, map: MapId) -> bool {
        self.cache.invalidate(map)
    }

    /// Handle one "move to `target`" intent for `entity`.
    ///
    /// Publishes exactly one directive to `sink`, or none when the intent is
    /// dropped (entity has no position, or the map has no usable geometry).
    pub fn handle_move_intent<Maps, Pos, Movers, Sink>(
        &mut self,
        maps: &Maps,
        positions: &Pos,
        movers: &Movers,
        sink: &mut Sink,
        entity: EntityId,
        target: Point2,
    ) where
        Maps: TileMapSource,
        Pos: TilePositions,
        Movers: MoverRegistry,
        Sink: MovementSink<TileCoord, Point2>,
    {
        let Some((map, position)) = positions.locate(entity) else {
            tracing::debug!(%entity, "move intent for entity with no position, dropping");
            return;
        };

        let grid = match self.cache.get(map) {
            Some(grid) => grid,
            None => {
                let Some(geometry) = maps.map_geometry(map) else {
                    tracing::debug!(%entity, %map, "no geometry for map, dropping move intent");
                    return;
                };
                match TileGrid::build(&geometry, &self.config) {
                    Ok(grid) => self.cache.insert(map, grid),
                    Err(err) => {
                        tracing::warn!(%map, %err, "grid build failed, dropping move intent");
                        return;
                    }
                }
            }
        };

        let ai_controlled = movers.is_ai_controlled(entity);
        let los_step = self.config.cell_size * self.config.los_sample_fraction;

        // The shortcut is for short player-driven hops only: AI movers always
        // take the searched path so they cannot wedge into geometry gaps the
        // static grid does not model.
        let directive = if !ai_controlled
            && position.distance(target) <= self.config.free_move_distance
            && has_line_of_sight(grid.as_ref(), position, target, los_step)
        {
            MovementDirective::Direct { target }
        } else {
            let start = grid.world_to_cell(position);
            let goal = grid.world_to_cell(target);
            match find_path_with(
                &mut self.buffers,
                grid.as_ref(),
                start,
                goal,
                self.config.tie_break,
            ) {
                Some(path) => MovementDirective::Path(path),
                None => MovementDirective::Idle,
            }
        };

        tracing::trace!(%entity, %map, ?directive, "movement intent handled");
        sink.apply(entity, directive);
    }
}
