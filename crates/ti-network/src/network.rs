//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays are sorted by source node and indexed by `EdgeId`.  The
//! sort is stable, so parallel edges between the same `(u, v)` keep their
//! insertion order and the first one added has the lowest `EdgeId`.
//!
//! # First-edge-wins
//!
//! The network is a multigraph, but routing and statistics address edges by
//! their `(u, v)` node pair.  Whenever a single edge must stand for the pair
//! (path search, attribute lookups, CO2 per use, route metrics), the live edge with the
//! lowest `EdgeId` is used.  See [`GraphView::find_edge`].
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to `NodeId`.  Used to snap
//! coordinates to road nodes and to sample nodes around a city centre.
//!
//! [`GraphView::find_edge`]: crate::GraphView::find_edge

use std::fmt;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ti_core::{EdgeId, GeoPoint, NodeId};

use crate::{NetworkError, NetworkResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough to rank
    /// candidates within a city; exact filtering uses haversine.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── EdgeAttrs ─────────────────────────────────────────────────────────────────

/// Routing-relevant attributes of one directed edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeAttrs {
    /// Physical length in metres.
    pub length_m: f64,
    /// Posted or modelled speed, if known.
    pub speed_kph: Option<f64>,
    /// Free-flow travel time in seconds.
    pub travel_time_s: f64,
}

impl EdgeAttrs {
    /// Speed implied by length and travel time, when both are positive.
    ///
    /// This is what the CO2 model sees, so a speed override that rewrote
    /// `travel_time_s` is reflected here automatically.
    pub fn effective_speed_kph(&self) -> Option<f64> {
        if self.length_m > 0.0 && self.travel_time_s > 0.0 {
            Some((self.length_m / 1000.0) / (self.travel_time_s / 3600.0))
        } else {
            None
        }
    }

    /// Travel time in seconds for `length_m` at `speed_kph`.
    #[inline]
    pub fn travel_time_for(length_m: f64, speed_kph: f64) -> f64 {
        (length_m / 1000.0) / (speed_kph / 3600.0)
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road multigraph in CSR format plus a spatial index.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadNetworkBuilder`].  A built network is never
/// mutated: modifications go through a [`NetworkOverlay`][crate::NetworkOverlay].
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Elevation above sea level in metres, where known.
    pub node_elevation_m: Vec<Option<f64>>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    pub edge_from: Vec<NodeId>,
    pub edge_to: Vec<NodeId>,
    pub edge_length_m: Vec<f64>,
    pub edge_speed_kph: Vec<Option<f64>>,
    pub edge_travel_s: Vec<f64>,

    spatial_idx: RTree<NodeEntry>,
}

impl fmt::Debug for RoadNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadNetwork")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish_non_exhaustive()
    }
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`,
    /// ascending.
    ///
    /// # Panics
    /// Panics if `node` is not in the network.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Base attributes of `edge`, ignoring any overlay.
    #[inline]
    pub fn base_attrs(&self, edge: EdgeId) -> EdgeAttrs {
        let i = edge.index();
        EdgeAttrs {
            length_m:      self.edge_length_m[i],
            speed_kph:     self.edge_speed_kph[i],
            travel_time_s: self.edge_travel_s[i],
        }
    }

    /// Uphill gain in metres along `edge`, or `None` when either end lacks an
    /// elevation or the edge is flat/downhill.
    pub fn edge_elevation_gain(&self, edge: EdgeId) -> Option<f64> {
        let from = self.node_elevation_m[self.edge_from[edge.index()].index()]?;
        let to   = self.node_elevation_m[self.edge_to[edge.index()].index()]?;
        let gain = to - from;
        (gain > 0.0).then_some(gain)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest road node to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// All nodes within `radius_m` (haversine) of `center`, ascending by id.
    pub fn nodes_within(&self, center: GeoPoint, radius_m: f32) -> Vec<NodeId> {
        let (d_lat, d_lon) = center.degree_extent(radius_m);
        let envelope = AABB::from_corners(
            [center.lat - d_lat, center.lon - d_lon],
            [center.lat + d_lat, center.lon + d_lon],
        );
        let mut found: Vec<NodeId> = self
            .spatial_idx
            .locate_in_envelope(&envelope)
            .filter(|e| self.node_pos[e.id.index()].distance_m(center) <= radius_m)
            .map(|e| e.id)
            .collect();
        found.sort_unstable();
        found
    }

    /// Centre of the bounding box of all node positions.
    pub fn bbox_center(&self) -> Option<GeoPoint> {
        if self.is_empty() {
            return None;
        }
        let (mut min_lat, mut max_lat) = (f32::MAX, f32::MIN);
        let (mut min_lon, mut max_lon) = (f32::MAX, f32::MIN);
        for p in &self.node_pos {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lon = min_lon.min(p.lon);
            max_lon = max_lon.max(p.lon);
        }
        Some(GeoPoint::new((min_lat + max_lat) * 0.5, (min_lon + max_lon) * 0.5))
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ti_core::GeoPoint;
/// use ti_network::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(46.52, 6.63));
/// let c = b.add_node(GeoPoint::new(46.53, 6.64));
/// b.add_road(a, c, 1_200.0, 50.0); // 1.2 km at 50 km/h
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:      Vec<GeoPoint>,
    elevations: Vec<Option<f64>>,
    raw_edges:  Vec<RawEdge>,
}

struct RawEdge {
    from:  NodeId,
    to:    NodeId,
    attrs: EdgeAttrs,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), elevations: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:      Vec::with_capacity(nodes),
            elevations: Vec::with_capacity(nodes),
            raw_edges:  Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        self.add_node_with_elevation(pos, None)
    }

    pub fn add_node_with_elevation(&mut self, pos: GeoPoint, elevation_m: Option<f64>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.elevations.push(elevation_m);
        id
    }

    /// Add a **directed** edge with explicit attributes.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, attrs: EdgeAttrs) {
        self.raw_edges.push(RawEdge { from, to, attrs });
    }

    /// Add a **directed** edge whose travel time is derived from length and
    /// speed.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64, speed_kph: f64) {
        self.add_edge(from, to, EdgeAttrs {
            length_m,
            speed_kph:     Some(speed_kph),
            travel_time_s: EdgeAttrs::travel_time_for(length_m, speed_kph),
        });
    }

    /// Convenience: add edges in **both directions** for a two-way road.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64, speed_kph: f64) {
        self.add_directed_edge(a, b, length_m, speed_kph);
        self.add_directed_edge(b, a, length_m, speed_kph);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Fails with [`NetworkError::NodeNotFound`] if an edge references a node
    /// that was never added.
    pub fn try_build(self) -> NetworkResult<RoadNetwork> {
        let node_count = self.nodes.len();
        if let Some(bad) = self
            .raw_edges
            .iter()
            .flat_map(|e| [e.from, e.to])
            .find(|n| n.index() >= node_count)
        {
            return Err(NetworkError::NodeNotFound(bad));
        }
        Ok(self.build())
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// # Panics
    /// Panics if an edge references a node that was never added; use
    /// [`try_build`](Self::try_build) for untrusted input.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable: parallel edges keep insertion order (first-edge-wins).
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:      Vec<NodeId>      = raw.iter().map(|e| e.from).collect();
        let edge_to:        Vec<NodeId>      = raw.iter().map(|e| e.to).collect();
        let edge_length_m:  Vec<f64>         = raw.iter().map(|e| e.attrs.length_m).collect();
        let edge_speed_kph: Vec<Option<f64>> = raw.iter().map(|e| e.attrs.speed_kph).collect();
        let edge_travel_s:  Vec<f64>         = raw.iter().map(|e| e.attrs.travel_time_s).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_elevation_m: self.elevations,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_speed_kph,
            edge_travel_s,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
