//! Shortest-path trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `ti-impact` calls path search via the [`PathFinder`] trait, so
//! applications can swap in contraction hierarchies or A* without touching
//! the impact engine.  The default [`DijkstraPathFinder`] is sufficient for
//! city-scale networks.
//!
//! # Cost units
//!
//! Costs are integer milli-units of the chosen [`Weight`] (milliseconds for
//! travel time, millimetres for length).  Integer costs make tie-breaking
//! exact: equal-cost paths always resolve the same way on every run.
//!
//! # Parallel edges
//!
//! Between any `(u, v)` only the representative edge (lowest live
//! `EdgeId`, see [`GraphView::find_edge`]) is relaxed, even when a
//! higher-id parallel edge is cheaper.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ti_core::{EdgeId, NodeId, Weight};

use crate::GraphView;

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// A path is the ordered node sequence from origin to destination inclusive.
/// `None` means the destination is unreachable (or either node is unknown);
/// that is an expected outcome, not an error.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a single finder can be shared by
/// concurrent recalculation requests.
pub trait PathFinder: Send + Sync {
    /// Shortest path from `origin` to `destination` minimising `weight`.
    fn shortest_path<G: GraphView>(
        &self,
        graph: &G,
        origin: NodeId,
        destination: NodeId,
        weight: Weight,
    ) -> Option<Vec<NodeId>>;

    /// Batched variant; the output is positionally aligned with `pairs`.
    ///
    /// The default runs the pairs sequentially.
    fn shortest_path_many<G: GraphView>(
        &self,
        graph: &G,
        pairs: &[(NodeId, NodeId)],
        weight: Weight,
    ) -> Vec<Option<Vec<NodeId>>> {
        pairs
            .iter()
            .map(|&(o, d)| self.shortest_path(graph, o, d, weight))
            .collect()
    }
}

// ── DijkstraPathFinder ────────────────────────────────────────────────────────

/// Standard Dijkstra over any [`GraphView`].
///
/// With the `parallel` feature, [`shortest_path_many`](PathFinder::shortest_path_many)
/// spreads the batch over Rayon's thread pool; results are identical to the
/// sequential run.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraPathFinder;

impl PathFinder for DijkstraPathFinder {
    fn shortest_path<G: GraphView>(
        &self,
        graph: &G,
        origin: NodeId,
        destination: NodeId,
        weight: Weight,
    ) -> Option<Vec<NodeId>> {
        dijkstra(graph, origin, destination, weight)
    }

    #[cfg(feature = "parallel")]
    fn shortest_path_many<G: GraphView>(
        &self,
        graph: &G,
        pairs: &[(NodeId, NodeId)],
        weight: Weight,
    ) -> Vec<Option<Vec<NodeId>>> {
        use rayon::prelude::*;

        pairs
            .par_iter()
            .map(|&(o, d)| dijkstra(graph, o, d, weight))
            .collect()
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Edge cost in milli-units of `weight`.
#[inline]
fn edge_cost<G: GraphView>(graph: &G, edge: EdgeId, weight: Weight) -> u64 {
    let attrs = graph.attrs(edge);
    let value = match weight {
        Weight::TravelTime => attrs.travel_time_s,
        Weight::Length     => attrs.length_m,
    };
    (value.max(0.0) * 1000.0).round() as u64
}

fn dijkstra<G: GraphView>(
    graph: &G,
    from: NodeId,
    to: NodeId,
    weight: Weight,
) -> Option<Vec<NodeId>> {
    if !graph.contains_node(from) || !graph.contains_node(to) {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }

    let n = graph.node_count();
    let mut dist      = vec![u64::MAX; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0;

    // Min-heap: (cost, node).  Secondary key NodeId keeps tie-breaking
    // deterministic.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Some(reconstruct(graph, &prev_edge, to));
        }

        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_target(edge);
            // First-edge-wins: only the representative of a parallel bundle
            // is routable, so path costs match `route_metrics`.
            if graph.find_edge(node, neighbor) != Some(edge) {
                continue;
            }
            let new_cost = cost.saturating_add(edge_cost(graph, edge, weight));

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    None
}

fn reconstruct<G: GraphView>(graph: &G, prev_edge: &[EdgeId], to: NodeId) -> Vec<NodeId> {
    let base = graph.base();
    let mut path = vec![to];
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        cur = base.edge_from[e.index()];
        path.push(cur);
    }
    path.reverse();
    path
}
