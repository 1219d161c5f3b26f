//! Edge-usage counting and frequency statistics.
//!
//! # Ordering
//!
//! Output is sorted by frequency, descending.  Ties keep discovery order:
//! the order in which edges are first seen walking the routes in pair order
//! and each path from origin to destination.

use rustc_hash::FxHashMap;

use ti_core::NodeId;
use ti_network::{edge_co2, GraphView};

use crate::model::{EdgeUsageStat, Route};

/// Per-edge traversal counts in discovery order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeCounts {
    index:   FxHashMap<(NodeId, NodeId), usize>,
    entries: Vec<((NodeId, NodeId), u32)>,
}

impl EdgeCounts {
    fn bump(&mut self, key: (NodeId, NodeId)) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Count for `(u, v)`, 0 if never traversed.
    pub fn get(&self, u: NodeId, v: NodeId) -> u32 {
        self.index.get(&(u, v)).map_or(0, |&i| self.entries[i].1)
    }

    /// `(edge, count)` in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = ((NodeId, NodeId), u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of edge traversals across all counted routes.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, c)| c as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Count every hop of every route's path.
pub fn count_edge_usage<'a, I>(routes: I) -> EdgeCounts
where
    I: IntoIterator<Item = &'a Route>,
{
    let mut counts = EdgeCounts::default();
    for route in routes {
        for hop in route.hops() {
            counts.bump(hop);
        }
    }
    counts
}

/// Usage statistics for `counts` over `total_routes` routes.
///
/// With a `prior`, every stat carries a delta; edges the prior never saw
/// are measured against zero.
pub fn compute_usage(
    counts: &EdgeCounts,
    total_routes: usize,
    prior: Option<&EdgeCounts>,
) -> Vec<EdgeUsageStat> {
    let freq = |count: u32| {
        if total_routes > 0 { count as f64 / total_routes as f64 } else { 0.0 }
    };

    let mut stats: Vec<EdgeUsageStat> = counts
        .iter()
        .map(|((u, v), count)| {
            let frequency = freq(count);
            let (delta_count, delta_frequency) = match prior {
                Some(p) => {
                    let before = p.get(u, v);
                    (Some(count as i64 - before as i64), Some(frequency - freq(before)))
                }
                None => (None, None),
            };
            EdgeUsageStat { u, v, count, frequency, delta_count, delta_frequency, co2_per_use: None }
        })
        .collect();

    // Stable: ties keep discovery order.
    stats.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));
    stats
}

/// Fill `co2_per_use` from the edge attributes in `graph`.
pub fn annotate_co2<G: GraphView>(stats: &mut [EdgeUsageStat], graph: &G) {
    for s in stats {
        s.co2_per_use = edge_co2(graph, s.u, s.v);
    }
}
