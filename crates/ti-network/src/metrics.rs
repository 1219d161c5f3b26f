//! Per-path travel metrics and per-edge CO2 lookups.

use ti_core::{co2_for_edge, co2_for_route, EdgeEmissionInput, EdgeId, NodeId};

use crate::GraphView;

/// Summed attributes of one path under a given [`GraphView`].
#[derive(Clone, Debug, PartialEq)]
pub struct RouteMetrics {
    pub travel_time_s: f64,
    pub distance_m: f64,
    /// Total uphill gain; `None` when the path never climbs.
    pub elevation_gain_m: Option<f64>,
    /// One entry per traversed edge, in path order.
    pub per_edge: Vec<EdgeEmissionInput>,
}

impl RouteMetrics {
    /// CO2 in grams for the whole path.
    pub fn co2_g(&self) -> f64 {
        co2_for_route(&self.per_edge)
    }
}

/// Emission-relevant attributes of a single edge in `graph`.
pub fn edge_emission_input<G: GraphView>(graph: &G, edge: EdgeId) -> EdgeEmissionInput {
    let attrs = graph.attrs(edge);
    EdgeEmissionInput {
        travel_time_s:    attrs.travel_time_s,
        speed_kph:        attrs.effective_speed_kph(),
        elevation_gain_m: graph.base().edge_elevation_gain(edge),
    }
}

/// CO2 in grams for traversing the representative edge `u → v` once, or
/// `None` if no live edge connects them.
pub fn edge_co2<G: GraphView>(graph: &G, u: NodeId, v: NodeId) -> Option<f64> {
    let edge = graph.find_edge(u, v)?;
    let input = edge_emission_input(graph, edge);
    Some(co2_for_edge(input.travel_time_s, input.speed_kph, input.elevation_gain_m))
}

/// Sum travel time, distance, and elevation gain along `path`.
///
/// Returns `None` for paths with fewer than two nodes.  Consecutive pairs
/// with no live edge between them contribute nothing.
pub fn route_metrics<G: GraphView>(graph: &G, path: &[NodeId]) -> Option<RouteMetrics> {
    if path.len() < 2 {
        return None;
    }

    let mut travel_time_s = 0.0;
    let mut distance_m = 0.0;
    let mut elevation_gain_m = 0.0;
    let mut per_edge = Vec::with_capacity(path.len() - 1);

    for hop in path.windows(2) {
        let Some(edge) = graph.find_edge(hop[0], hop[1]) else {
            continue;
        };
        let attrs = graph.attrs(edge);
        let input = edge_emission_input(graph, edge);

        travel_time_s += attrs.travel_time_s;
        distance_m += attrs.length_m;
        elevation_gain_m += input.elevation_gain_m.unwrap_or(0.0);
        per_edge.push(input);
    }

    Some(RouteMetrics {
        travel_time_s,
        distance_m,
        elevation_gain_m: (elevation_gain_m > 0.0).then_some(elevation_gain_m),
        per_edge,
    })
}
