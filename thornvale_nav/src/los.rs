// Line-of-sight test over a navigation grid.
//
// Samples the segment between two world positions at a fixed sub-step and
// fails on the first sample over a non-walkable cell. This is a shortcut
// gate, not a collision query: the movement orchestrators use it to skip the
// full path search for short, unobstructed player-driven hops. AI movers
// never take the shortcut (decided in the movement crate, not here).
//
// Sampling resolution comes from config (`los_sample_fraction` of the cell
// size); half a cell guarantees every crossed cell is sampled at least once.
//
// See also: `grid.rs` for the walkability queries this leans on, `tile.rs` /
// `terrain.rs` in the movement crate for the shortcut decision itself.

use crate::grid::NavGrid;
use crate::types::SegmentPoint;

/// Whether the straight segment `from -> to` stays over walkable cells at the
/// given sampling step (world units).
///
/// Both endpoints are sampled. A non-positive `sample_step` disables the
/// shortcut by reporting no line of sight.
pub fn has_line_of_sight<G: NavGrid>(
    grid: &G,
    from: G::WorldPoint,
    to: G::WorldPoint,
    sample_step: f32,
) -> bool {
    if !(sample_step > 0.0) {
        return false;
    }
    let distance = from.distance(to);
    let samples = (distance / sample_step).ceil() as u32;
    for i in 0..=samples {
        let t = if samples == 0 {
            0.0
        } else {
            i as f32 / samples as f32
        };
        let point = from.lerp(to, t);
        if !grid.is_walkable(grid.world_to_cell(point)) {
            return false;
        }
    }
    true
}
