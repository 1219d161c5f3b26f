//! CSV road-network loader.
//!
//! # CSV format
//!
//! Two files.  Nodes must be listed with dense ids `0..n` in order:
//!
//! ```csv
//! node_id,lat,lon,elevation_m
//! 0,46.5191,6.6323,495.0
//! 1,46.5200,6.6350,
//! ```
//!
//! Edges are directed; list both directions for a two-way road:
//!
//! ```csv
//! u,v,length_m,speed_kph,travel_time_s
//! 0,1,250.0,50,
//! 1,0,250.0,,18.0
//! ```
//!
//! When `travel_time_s` is empty it is derived from `length_m` and
//! `speed_kph`; a row with neither is rejected.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use ti_core::{GeoPoint, NodeId};

use crate::network::{EdgeAttrs, RoadNetwork, RoadNetworkBuilder};
use crate::{NetworkError, NetworkResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    node_id:     u32,
    lat:         f32,
    lon:         f32,
    elevation_m: Option<f64>,
}

#[derive(Deserialize)]
struct EdgeRecord {
    u:             u32,
    v:             u32,
    length_m:      f64,
    speed_kph:     Option<f64>,
    travel_time_s: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RoadNetwork`] from a node CSV and an edge CSV on disk.
pub fn load_network_csv(nodes: &Path, edges: &Path) -> NetworkResult<RoadNetwork> {
    let nodes_file = std::fs::File::open(nodes)?;
    let edges_file = std::fs::File::open(edges)?;
    load_network_readers(nodes_file, edges_file)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
pub fn load_network_readers<N: Read, E: Read>(nodes: N, edges: E) -> NetworkResult<RoadNetwork> {
    let mut builder = RoadNetworkBuilder::new();

    // ── Nodes ─────────────────────────────────────────────────────────────
    for result in csv::Reader::from_reader(nodes).deserialize::<NodeRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        let expected = builder.node_count() as u32;
        if row.node_id != expected {
            return Err(NetworkError::Parse(format!(
                "node ids must be dense and ordered: expected {expected}, got {}",
                row.node_id
            )));
        }
        builder.add_node_with_elevation(GeoPoint::new(row.lat, row.lon), row.elevation_m);
    }

    // ── Edges ─────────────────────────────────────────────────────────────
    for result in csv::Reader::from_reader(edges).deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        builder.add_edge(NodeId(row.u), NodeId(row.v), edge_attrs(&row)?);
    }

    let network = builder.try_build()?;
    info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "loaded road network"
    );
    Ok(network)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn edge_attrs(row: &EdgeRecord) -> NetworkResult<EdgeAttrs> {
    let speed_kph = row.speed_kph.filter(|s| *s > 0.0);
    let travel_time_s = match (row.travel_time_s, speed_kph) {
        (Some(t), _)     => t,
        (None, Some(s))  => EdgeAttrs::travel_time_for(row.length_m, s),
        (None, None)     => {
            return Err(NetworkError::Parse(format!(
                "edge {} -> {} has neither travel_time_s nor a positive speed_kph",
                row.u, row.v
            )));
        }
    };
    Ok(EdgeAttrs { length_m: row.length_m, speed_kph, travel_time_s })
}
