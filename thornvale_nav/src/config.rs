// Data-driven navigation configuration.
//
// All tunable navigation parameters live here in `NavConfig`, deserialized
// from the server's config file at startup. The navigation code never uses
// magic numbers — it reads from the config. This enables tuning (footprint
// clearance, free-movement range, snap radius) without recompilation.
//
// See also: `tile_grid.rs` / `terrain_grid.rs` which consume `cell_size`,
// `footprint_radius`, and `connectivity` at build time, `search.rs` for the
// `tie_break` knob, the movement crate's orchestrators which read the
// decision thresholds.

use serde::{Deserialize, Serialize};

/// Grid neighbor adjacency used by the shortest-path search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    /// Cardinal neighbors only.
    Four,
    /// Cardinal plus diagonal neighbors. Diagonal steps are refused when
    /// either adjacent cardinal cell is blocked, so paths never clip corners.
    Eight,
}

/// How the search orders open-set entries whose estimated total cost ties.
///
/// `PreferNewer` (stack-like) reproduces the established path shapes: on
/// equal-cost branches the search keeps extending the branch it discovered
/// last, which avoids visually redundant staircase detours. Path optimality
/// is unaffected either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// Prefer the entry discovered most recently.
    PreferNewer,
    /// Prefer the entry discovered earliest.
    PreferOlder,
}

/// All navigation tunables. Immutable once handed to an orchestrator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavConfig {
    /// Edge length of one grid cell in world units.
    pub cell_size: f32,

    /// Half-width of a mover's physical footprint in world units. Blocked
    /// regions are dilated outward by this much at grid-build time, so a
    /// point-sized path guarantees clearance for a footprint-sized mover.
    pub footprint_radius: f32,

    /// Neighbor adjacency for the search.
    pub connectivity: Connectivity,

    /// Open-set ordering on cost ties.
    pub tie_break: TieBreak,

    /// Maximum distance (world units) at which a player-controlled mover may
    /// take the direct-motion shortcut instead of a full path search.
    /// AI-controlled movers never take the shortcut.
    pub free_move_distance: f32,

    /// Line-of-sight sampling step as a fraction of `cell_size`. Smaller
    /// values sample more densely; 0.5 tests every cell the segment crosses
    /// at least twice.
    pub los_sample_fraction: f32,

    /// Maximum Chebyshev ring radius, in cells, searched when snapping an
    /// off-grid position to the nearest walkable cell (3D variant).
    pub snap_max_radius: i32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            footprint_radius: 0.4,
            connectivity: Connectivity::Eight,
            tie_break: TieBreak::PreferNewer,
            free_move_distance: 8.0,
            los_sample_fraction: 0.5,
            snap_max_radius: 6,
        }
    }
}
