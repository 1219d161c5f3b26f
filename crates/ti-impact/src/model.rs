//! Request and result records.
//!
//! With the `serde` feature these serialise with the field names the
//! front-end expects (`travel_time`, `distance`, `co2_emissions`, …); in
//! Rust the unit is carried in the field name instead.

use rustc_hash::FxHashSet;

use ti_core::NodeId;
use ti_network::{route_metrics, GraphView};

// ── Requests ──────────────────────────────────────────────────────────────────

/// One origin-destination request.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodePair {
    pub origin: NodeId,
    pub destination: NodeId,
}

impl NodePair {
    #[inline]
    pub fn new(origin: NodeId, destination: NodeId) -> Self {
        Self { origin, destination }
    }
}

/// What to do with an edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ModificationAction {
    /// Close the road segment.
    #[default]
    Remove,
    /// Change the segment's speed; requires `speed_kph`.
    Modify,
}

/// A requested change to the directed edge `u → v`.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeModification {
    pub u: NodeId,
    pub v: NodeId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub action: ModificationAction,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed_kph: Option<f64>,
}

impl EdgeModification {
    pub fn remove(u: NodeId, v: NodeId) -> Self {
        Self { u, v, action: ModificationAction::Remove, speed_kph: None }
    }

    pub fn set_speed(u: NodeId, v: NodeId, speed_kph: f64) -> Self {
        Self { u, v, action: ModificationAction::Modify, speed_kph: Some(speed_kph) }
    }

    /// The `(u, v)` pair this modification addresses.
    #[inline]
    pub fn key(&self) -> (NodeId, NodeId) {
        (self.u, self.v)
    }
}

// ── Routes ────────────────────────────────────────────────────────────────────

/// A found route and its metrics.
///
/// Only paths with at least two nodes become a `Route`; anything shorter has
/// no defined metrics and is left out of every output.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub origin: NodeId,
    pub destination: NodeId,
    pub path: Vec<NodeId>,
    #[cfg_attr(feature = "serde", serde(rename = "travel_time"))]
    pub travel_time_s: f64,
    #[cfg_attr(feature = "serde", serde(rename = "distance"))]
    pub distance_m: f64,
    #[cfg_attr(feature = "serde", serde(rename = "elevation_gain"))]
    pub elevation_gain_m: Option<f64>,
    #[cfg_attr(feature = "serde", serde(rename = "co2_emissions"))]
    pub co2_g: f64,
}

impl Route {
    /// Build a route for `path` with metrics read from `graph`.
    ///
    /// Returns `None` when `path` has fewer than two nodes.
    pub fn from_path<G: GraphView>(graph: &G, pair: NodePair, path: Vec<NodeId>) -> Option<Route> {
        let metrics = route_metrics(graph, &path)?;
        Some(Route {
            origin:           pair.origin,
            destination:      pair.destination,
            travel_time_s:    metrics.travel_time_s,
            distance_m:       metrics.distance_m,
            elevation_gain_m: metrics.elevation_gain_m,
            co2_g:            metrics.co2_g(),
            path,
        })
    }

    /// Consecutive `(u, v)` node pairs along the path.
    pub fn hops(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.path.windows(2).map(|w| (w[0], w[1]))
    }

    /// `true` if any hop of the path is in `edges`.
    pub fn traverses_any(&self, edges: &FxHashSet<(NodeId, NodeId)>) -> bool {
        self.hops().any(|hop| edges.contains(&hop))
    }
}

/// Before/after view of one affected pair.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteComparison {
    pub origin: NodeId,
    pub destination: NodeId,
    pub original_route: Route,
    /// `None` when the pair became unreachable.
    pub new_route: Option<Route>,
    /// First applied modification found on the original path.
    pub modified_edge_on_path: Option<EdgeModification>,
    pub distance_delta: Option<f64>,
    pub distance_delta_percent: Option<f64>,
    pub time_delta: Option<f64>,
    pub time_delta_percent: Option<f64>,
    pub co2_delta: Option<f64>,
    pub co2_delta_percent: Option<f64>,
    pub is_affected: bool,
    pub route_failed: bool,
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// How often one directed edge is used across a route set.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeUsageStat {
    pub u: NodeId,
    pub v: NodeId,
    pub count: u32,
    /// `count / total_routes`, or 0 when there are no routes.
    pub frequency: f64,
    /// Present whenever a prior baseline was supplied.
    pub delta_count: Option<i64>,
    pub delta_frequency: Option<f64>,
    /// CO2 in grams for one traversal of this edge.
    pub co2_per_use: Option<f64>,
}

/// Aggregate impact over one recalculation.
///
/// Every average, maximum, and total is `0.0` when its sample is empty.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactStatistics {
    pub total_routes: usize,
    pub affected_routes: usize,
    pub failed_routes: usize,
    pub total_distance_increase_km: f64,
    pub total_time_increase_minutes: f64,
    pub avg_distance_increase_km: f64,
    pub avg_time_increase_minutes: f64,
    pub max_distance_increase_km: f64,
    pub max_time_increase_minutes: f64,
    pub avg_distance_increase_percent: f64,
    pub avg_time_increase_percent: f64,
    pub total_co2_increase_grams: f64,
    pub avg_co2_increase_grams: f64,
    pub max_co2_increase_grams: f64,
    pub avg_co2_increase_percent: f64,
}

/// Everything a recalculation produces.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecalculateResult {
    /// Modifications whose edge existed and that were valid.
    pub applied_modifications: Vec<EdgeModification>,
    pub original_edge_usage: Vec<EdgeUsageStat>,
    /// Usage after modification, with deltas against `original_edge_usage`.
    pub new_edge_usage: Vec<EdgeUsageStat>,
    pub impact_statistics: ImpactStatistics,
    /// One entry per affected pair, in pair order.
    pub comparisons: Vec<RouteComparison>,
    /// The complete route set after modification, in pair order.
    pub routes: Vec<Route>,
}

/// Summary of the loaded network.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkInfo {
    pub node_count: usize,
    pub edge_count: usize,
    pub sample_nodes: Vec<NodeId>,
}
