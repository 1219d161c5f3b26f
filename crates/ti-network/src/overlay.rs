//! Copy-on-write modification view over a shared [`RoadNetwork`].
//!
//! An overlay records removed edges and speed overrides in two small hash
//! maps and answers every [`GraphView`] query by consulting them before the
//! base arrays.  Building one is O(modifications), not O(graph), and the base
//! network is never touched, so any number of overlays can coexist over the
//! same `Arc<RoadNetwork>`.
//!
//! Modifications address the `(u, v)` node pair: removing or re-speeding
//! `(u, v)` applies to every parallel edge between the two nodes.

use rustc_hash::{FxHashMap, FxHashSet};

use ti_core::{EdgeId, NodeId};

use crate::network::{EdgeAttrs, RoadNetwork};
use crate::GraphView;

/// A modified view of a base network.  Dropping it discards the changes.
pub struct NetworkOverlay<'a> {
    base:      &'a RoadNetwork,
    removed:   FxHashSet<EdgeId>,
    overrides: FxHashMap<EdgeId, EdgeAttrs>,
}

impl<'a> NetworkOverlay<'a> {
    pub fn new(base: &'a RoadNetwork) -> Self {
        Self {
            base,
            removed:   FxHashSet::default(),
            overrides: FxHashMap::default(),
        }
    }

    /// Remove every live edge `u → v`.
    ///
    /// Returns `false` (and changes nothing) if no live edge connects them.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let live: Vec<EdgeId> = self
            .parallel_edges(u, v)
            .into_iter()
            .filter(|&e| self.is_live(e))
            .collect();
        if live.is_empty() {
            return false;
        }
        for e in live {
            self.overrides.remove(&e);
            self.removed.insert(e);
        }
        true
    }

    /// Set the speed of every live edge `u → v` and recompute its travel
    /// time from the unchanged length.
    ///
    /// Returns `false` if no live edge connects them or `speed_kph` is not a
    /// positive finite number.
    pub fn set_speed(&mut self, u: NodeId, v: NodeId, speed_kph: f64) -> bool {
        if !(speed_kph.is_finite() && speed_kph > 0.0) {
            return false;
        }
        let live: Vec<EdgeId> = self
            .parallel_edges(u, v)
            .into_iter()
            .filter(|&e| self.is_live(e))
            .collect();
        if live.is_empty() {
            return false;
        }
        for e in live {
            let length_m = self.base.edge_length_m[e.index()];
            self.overrides.insert(e, EdgeAttrs {
                length_m,
                speed_kph:     Some(speed_kph),
                travel_time_s: EdgeAttrs::travel_time_for(length_m, speed_kph),
            });
        }
        true
    }

    /// Number of edges removed or overridden.
    pub fn modified_edge_count(&self) -> usize {
        self.removed.len() + self.overrides.len()
    }

    pub fn is_unmodified(&self) -> bool {
        self.removed.is_empty() && self.overrides.is_empty()
    }
}

impl GraphView for NetworkOverlay<'_> {
    #[inline]
    fn base(&self) -> &RoadNetwork {
        self.base
    }

    #[inline]
    fn is_live(&self, edge: EdgeId) -> bool {
        !self.removed.contains(&edge)
    }

    #[inline]
    fn attrs(&self, edge: EdgeId) -> EdgeAttrs {
        match self.overrides.get(&edge) {
            Some(a) => *a,
            None    => self.base.base_attrs(edge),
        }
    }
}
