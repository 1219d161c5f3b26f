//! Synthetic city grid.
//!
//! A `GRID_SIZE × GRID_SIZE` lattice of two-way streets with 250 m blocks.
//! Every fourth row and column is an arterial at 50 km/h; the rest are
//! residential streets at 30 km/h.  Node elevation rises gently towards the
//! north-east corner so routes report a non-zero elevation gain.

use ti_core::{GeoPoint, NodeId};
use ti_network::{RoadNetwork, RoadNetworkBuilder};

pub const GRID_SIZE: usize = 12;

const ORIGIN:        GeoPoint = GeoPoint { lat: 46.515, lon: 6.610 };
const BLOCK_M:       f64 = 250.0;
const BLOCK_DEG_LAT: f32 = 0.00225; // ~250 m
const BLOCK_DEG_LON: f32 = 0.00327; // ~250 m at 46.5° N

const ARTERIAL_KPH:    f64 = 50.0;
const RESIDENTIAL_KPH: f64 = 30.0;

fn is_arterial(line: usize) -> bool {
    line % 4 == 0
}

/// Build the grid.  Node `r * GRID_SIZE + c` sits at row `r`, column `c`.
pub fn build_grid() -> RoadNetwork {
    let mut b = RoadNetworkBuilder::with_capacity(GRID_SIZE * GRID_SIZE, 4 * GRID_SIZE * GRID_SIZE);

    let mut ids: Vec<NodeId> = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            let pos = GeoPoint::new(
                ORIGIN.lat + r as f32 * BLOCK_DEG_LAT,
                ORIGIN.lon + c as f32 * BLOCK_DEG_LON,
            );
            ids.push(b.add_node_with_elevation(pos, Some(380.0 + 4.0 * (r + c) as f64)));
        }
    }

    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            let here = ids[r * GRID_SIZE + c];
            if c + 1 < GRID_SIZE {
                let speed = if is_arterial(r) { ARTERIAL_KPH } else { RESIDENTIAL_KPH };
                b.add_road(here, ids[r * GRID_SIZE + c + 1], BLOCK_M, speed);
            }
            if r + 1 < GRID_SIZE {
                let speed = if is_arterial(c) { ARTERIAL_KPH } else { RESIDENTIAL_KPH };
                b.add_road(here, ids[(r + 1) * GRID_SIZE + c], BLOCK_M, speed);
            }
        }
    }

    b.build()
}
