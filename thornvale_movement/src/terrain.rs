// Movement-intent orchestration for the height-aware block world.
//
// Same shape as `tile.rs` with one extra stage: continuous positions in the
// block world frequently sit just off a walkable cell (slopes, block edges,
// float drift), so both endpoints are snapped to the nearest walkable cell
// before the search. A failed snap falls back to the original cell and lets
// the search or sightline test fail naturally — the failure surfaces as an
// idle transition, never an error.

use crate::hooks::{
    MovementDirective, MovementSink, MoverRegistry, TerrainMapSource, TerrainPositions,
};
use thornvale_nav::{
    find_path_with, has_line_of_sight, snap_to_walkable, BlockCoord, EntityId, GridCache, MapId,
    NavConfig, NavGrid, Point3, SearchBuffers, SegmentPoint, TerrainGrid,
};

/// Orchestrates movement intents in the block world.
pub struct TerrainNavigator {
    config: NavConfig,
    cache: GridCache<TerrainGrid>,
    buffers: SearchBuffers,
}

impl TerrainNavigator {
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

    /// Drop the cached grid for a reloaded map.
    pub fn invalidate_map(&mut self, map: MapId) -> bool {
        self.cache.invalidate(map)
    }

    /// The search endpoint for a continuous position: its own cell when
    /// walkable, otherwise the nearest walkable cell within the snap radius,
    /// otherwise the original cell (and the search fails on it naturally).
    fn resolve_cell(&self, grid: &TerrainGrid, pos: Point3) -> BlockCoord {
        let cell = grid.world_to_cell(pos);
        if grid.is_walkable(cell) {
            return cell;
        }
        match snap_to_walkable(grid, pos, self.config.snap_max_radius) {
            Some((snapped, _)) => snapped,
            None => cell,
        }
    }

    /// Handle one "move to `target`" intent for `entity`.
    ///
    /// Publishes exactly one directive to `sink`, or none when the intent is
    /// dropped (entity has no position, or the map has no usable terrain).
    pub fn handle_move_intent<Maps, Pos, Movers, Sink>(
        &mut self,
        maps: &Maps,
        positions: &Pos,
        movers: &Movers,
        sink: &mut Sink,
        entity: EntityId,
        target: Point3,
    ) where
        Maps: TerrainMapSource,
        Pos: TerrainPositions,
        Movers: MoverRegistry,
        Sink: MovementSink<BlockCoord, Point3>,
    {
        let Some((map, position)) = positions.locate(entity) else {
            tracing::debug!(%entity, "move intent for entity with no position, dropping");
            return;
        };

        let grid = match self.cache.get(map) {
            Some(grid) => grid,
            None => {
                let Some(terrain) = maps.terrain(map) else {
                    tracing::debug!(%entity, %map, "no terrain for map, dropping move intent");
                    return;
                };
                match TerrainGrid::build(terrain, &self.config) {
                    Ok(grid) => self.cache.insert(map, grid),
                    Err(err) => {
                        tracing::warn!(%map, %err, "terrain grid build failed, dropping move intent");
                        return;
                    }
                }
            }
        };

        let ai_controlled = movers.is_ai_controlled(entity);
        let los_step = self.config.cell_size * self.config.los_sample_fraction;

        let directive = if !ai_controlled
            && position.distance(target) <= self.config.free_move_distance
            && has_line_of_sight(grid.as_ref(), position, target, los_step)
        {
            MovementDirective::Direct { target }
        } else {
            let start = self.resolve_cell(grid.as_ref(), position);
            let goal = self.resolve_cell(grid.as_ref(), target);
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
