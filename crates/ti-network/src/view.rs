//! Read-only graph access shared by [`RoadNetwork`] and
//! [`NetworkOverlay`][crate::NetworkOverlay].
//!
//! Path finders, route metrics, and CO2 lookups are written against
//! [`GraphView`], so the same code runs on the live network and on a
//! modified view of it without copying the graph.

use ti_core::{EdgeId, NodeId};

use crate::network::{EdgeAttrs, RoadNetwork};

/// Topology from a base [`RoadNetwork`], with per-edge liveness and
/// attributes that an implementation may override.
///
/// Implementations must be `Sync` so batched path searches can share one
/// view across Rayon workers.
pub trait GraphView: Sync {
    /// The underlying immutable network.
    fn base(&self) -> &RoadNetwork;

    /// `false` if the edge has been removed in this view.
    fn is_live(&self, edge: EdgeId) -> bool;

    /// Effective attributes of `edge` in this view.
    fn attrs(&self, edge: EdgeId) -> EdgeAttrs;

    fn node_count(&self) -> usize {
        self.base().node_count()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.base().contains_node(node)
    }

    /// Live outgoing edges of `node`, ascending by `EdgeId`.
    fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.base().out_edges(node).filter(move |&e| self.is_live(e))
    }

    /// Target node of `edge`.
    #[inline]
    fn edge_target(&self, edge: EdgeId) -> NodeId {
        self.base().edge_to[edge.index()]
    }

    /// The representative live edge `u → v`: the one with the lowest
    /// `EdgeId` (first-edge-wins).  `None` if no live edge connects them or
    /// `u` is unknown.
    fn find_edge(&self, u: NodeId, v: NodeId) -> Option<EdgeId> {
        if !self.contains_node(u) {
            return None;
        }
        self.out_edges(u).find(|&e| self.edge_target(e) == v)
    }

    /// All edges `u → v`, live or not, ascending by `EdgeId`.
    fn parallel_edges(&self, u: NodeId, v: NodeId) -> Vec<EdgeId> {
        if !self.contains_node(u) {
            return Vec::new();
        }
        let base = self.base();
        base.out_edges(u).filter(|&e| base.edge_to[e.index()] == v).collect()
    }

    /// Attributes of the representative edge `u → v`.
    fn edge_attrs(&self, u: NodeId, v: NodeId) -> Option<EdgeAttrs> {
        self.find_edge(u, v).map(|e| self.attrs(e))
    }
}

impl GraphView for RoadNetwork {
    #[inline]
    fn base(&self) -> &RoadNetwork {
        self
    }

    #[inline]
    fn is_live(&self, _edge: EdgeId) -> bool {
        true
    }

    #[inline]
    fn attrs(&self, edge: EdgeId) -> EdgeAttrs {
        self.base_attrs(edge)
    }
}
