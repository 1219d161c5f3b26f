//! Unit tests for ti-network.
//!
//! All tests use hand-crafted networks so they run without any data files.

#[cfg(test)]
mod helpers {
    use ti_core::{GeoPoint, NodeId};
    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Triangle network:
    ///
    /// ```text
    ///   n0 ──10s──▶ n1 ──10s──▶ n2
    ///    └──────────50s─────────▶┘
    /// ```
    ///
    /// n0→n1 and n1→n2 are 100 m at 36 km/h (10 s); n0→n2 is 500 m at
    /// 36 km/h (50 s).  n3 is isolated.
    pub fn triangle() -> (RoadNetwork, [NodeId; 4]) {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node(GeoPoint::new(0.0, 0.0));
        let n1 = b.add_node(GeoPoint::new(0.0, 0.001));
        let n2 = b.add_node(GeoPoint::new(0.0, 0.002));
        let n3 = b.add_node(GeoPoint::new(1.0, 1.0));
        b.add_directed_edge(n0, n1, 100.0, 36.0);
        b.add_directed_edge(n1, n2, 100.0, 36.0);
        b.add_directed_edge(n0, n2, 500.0, 36.0);
        (b.build(), [n0, n1, n2, n3])
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ti_core::{EdgeId, GeoPoint, NodeId};
    use crate::{EdgeAttrs, GraphView, NetworkError, RoadNetworkBuilder};

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(net.bbox_center().is_none());
    }

    #[test]
    fn debug_shows_dimensions() {
        let (net, _) = super::helpers::triangle();
        let shown = format!("{net:?}");
        assert!(shown.starts_with("RoadNetwork"));
        assert!(shown.contains("nodes: 4"));
        assert!(shown.contains("edges: 3"));
    }

    #[test]
    fn travel_time_derived_from_speed() {
        let (net, [n0, n1, ..]) = super::helpers::triangle();
        let attrs = net.edge_attrs(n0, n1).unwrap();
        assert_eq!(attrs.length_m, 100.0);
        assert!((attrs.travel_time_s - 10.0).abs() < 1e-9);
        assert!((attrs.effective_speed_kph().unwrap() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn edges_are_directed() {
        let (net, [n0, n1, ..]) = super::helpers::triangle();
        assert!(net.find_edge(n0, n1).is_some());
        assert!(net.find_edge(n1, n0).is_none());
    }

    #[test]
    fn parallel_edges_first_wins() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 100.0, 50.0);
        b.add_directed_edge(a, c, 300.0, 30.0);
        let net = b.build();

        let parallel = net.parallel_edges(a, c);
        assert_eq!(parallel, vec![EdgeId(0), EdgeId(1)]);
        assert_eq!(net.find_edge(a, c), Some(EdgeId(0)));
        assert_eq!(net.edge_attrs(a, c).unwrap().length_m, 100.0);
    }

    #[test]
    fn try_build_rejects_unknown_node() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        b.add_edge(a, NodeId(9), EdgeAttrs { length_m: 1.0, speed_kph: None, travel_time_s: 1.0 });
        assert!(matches!(b.try_build(), Err(NetworkError::NodeNotFound(NodeId(9)))));
    }

    #[test]
    fn elevation_gain_only_uphill() {
        let mut b = RoadNetworkBuilder::new();
        let low  = b.add_node_with_elevation(GeoPoint::new(0.0, 0.0), Some(400.0));
        let high = b.add_node_with_elevation(GeoPoint::new(0.0, 0.01), Some(430.0));
        let flat = b.add_node(GeoPoint::new(0.0, 0.02));
        b.add_road(low, high, 300.0, 30.0);
        b.add_directed_edge(high, flat, 300.0, 30.0);
        let net = b.build();

        let up   = net.find_edge(low, high).unwrap();
        let down = net.find_edge(high, low).unwrap();
        let unknown = net.find_edge(high, flat).unwrap();
        assert_eq!(net.edge_elevation_gain(up), Some(30.0));
        assert_eq!(net.edge_elevation_gain(down), None);
        assert_eq!(net.edge_elevation_gain(unknown), None);
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod spatial {
    use ti_core::GeoPoint;

    #[test]
    fn snap_nearest() {
        let (net, [n0, _, n2, n3]) = super::helpers::triangle();
        assert_eq!(net.snap_to_node(GeoPoint::new(0.0, -0.001)), Some(n0));
        assert_eq!(net.snap_to_node(GeoPoint::new(0.0, 0.0025)), Some(n2));
        assert_eq!(net.snap_to_node(GeoPoint::new(0.9, 0.9)), Some(n3));
    }

    #[test]
    fn nodes_within_radius() {
        let (net, [n0, n1, n2, _]) = super::helpers::triangle();
        // n1 is ~111 m from n0, n2 ~222 m; n3 is far away.
        let near = net.nodes_within(GeoPoint::new(0.0, 0.0), 150.0);
        assert_eq!(near, vec![n0, n1]);
        let wider = net.nodes_within(GeoPoint::new(0.0, 0.0), 1_000.0);
        assert_eq!(wider, vec![n0, n1, n2]);
    }

    #[test]
    fn bbox_center_spans_all_nodes() {
        let (net, _) = super::helpers::triangle();
        let c = net.bbox_center().unwrap();
        assert!((c.lat - 0.5).abs() < 1e-6);
        assert!((c.lon - 0.5).abs() < 1e-6);
    }
}

// ── Overlay ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod overlay {
    use ti_core::GeoPoint;
    use crate::{GraphView, NetworkOverlay, RoadNetworkBuilder};

    #[test]
    fn remove_hides_edge_without_touching_base() {
        let (net, [_, n1, n2, _]) = super::helpers::triangle();
        let mut view = NetworkOverlay::new(&net);
        assert!(view.remove_edge(n1, n2));
        assert!(view.find_edge(n1, n2).is_none());
        assert!(net.find_edge(n1, n2).is_some());
        assert_eq!(view.modified_edge_count(), 1);
    }

    #[test]
    fn remove_missing_edge_is_noop() {
        let (net, [n0, n1, _, n3]) = super::helpers::triangle();
        let mut view = NetworkOverlay::new(&net);
        assert!(!view.remove_edge(n1, n0));
        assert!(!view.remove_edge(n3, n0));
        assert!(view.is_unmodified());
        // Removing twice: the second call finds nothing live.
        assert!(view.remove_edge(n0, n1));
        assert!(!view.remove_edge(n0, n1));
    }

    #[test]
    fn set_speed_recomputes_travel_time() {
        let (net, [n0, n1, ..]) = super::helpers::triangle();
        let mut view = NetworkOverlay::new(&net);
        assert!(view.set_speed(n0, n1, 18.0));
        let attrs = view.edge_attrs(n0, n1).unwrap();
        assert_eq!(attrs.length_m, 100.0);
        assert!((attrs.travel_time_s - 20.0).abs() < 1e-9);
        assert_eq!(attrs.speed_kph, Some(18.0));
        assert!((net.edge_attrs(n0, n1).unwrap().travel_time_s - 10.0).abs() < 1e-9);
    }

    #[test]
    fn set_speed_rejects_non_positive() {
        let (net, [n0, n1, ..]) = super::helpers::triangle();
        let mut view = NetworkOverlay::new(&net);
        assert!(!view.set_speed(n0, n1, 0.0));
        assert!(!view.set_speed(n0, n1, -5.0));
        assert!(!view.set_speed(n0, n1, f64::NAN));
        assert!(view.is_unmodified());
    }

    #[test]
    fn removal_covers_parallel_edges() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 100.0, 50.0);
        b.add_directed_edge(a, c, 300.0, 30.0);
        let net = b.build();

        let mut view = NetworkOverlay::new(&net);
        assert!(view.remove_edge(a, c));
        assert!(view.find_edge(a, c).is_none());
        assert_eq!(view.out_edges(a).count(), 0);
    }
}

// ── Shortest paths ────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use ti_core::{GeoPoint, NodeId, Weight};
    use crate::{route_metrics, DijkstraPathFinder, NetworkOverlay, PathFinder, RoadNetworkBuilder};

    #[test]
    fn trivial_same_node() {
        let (net, [n0, ..]) = super::helpers::triangle();
        let path = DijkstraPathFinder.shortest_path(&net, n0, n0, Weight::TravelTime);
        assert_eq!(path, Some(vec![n0]));
    }

    #[test]
    fn shortest_by_travel_time() {
        let (net, [n0, n1, n2, _]) = super::helpers::triangle();
        let path = DijkstraPathFinder.shortest_path(&net, n0, n2, Weight::TravelTime);
        assert_eq!(path, Some(vec![n0, n1, n2]));
    }

    #[test]
    fn weight_changes_choice() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let m = b.add_node(GeoPoint::new(0.0, 0.5));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        // Short but slow direct road vs. long fast detour.
        b.add_directed_edge(a, c, 1_000.0, 10.0);  // 360 s
        b.add_directed_edge(a, m, 1_000.0, 100.0); // 36 s
        b.add_directed_edge(m, c, 1_000.0, 100.0); // 36 s
        let net = b.build();

        let by_time = DijkstraPathFinder.shortest_path(&net, a, c, Weight::TravelTime);
        let by_len  = DijkstraPathFinder.shortest_path(&net, a, c, Weight::Length);
        assert_eq!(by_time, Some(vec![a, m, c]));
        assert_eq!(by_len, Some(vec![a, c]));
    }

    /// a → c twice: 72 s (EdgeId 0) and 3.6 s (EdgeId 1); a → m → c is 20 s.
    fn parallel_bundle() -> (crate::RoadNetwork, [NodeId; 3]) {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let m = b.add_node(GeoPoint::new(0.0, 0.5));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 1_000.0, 50.0);    // 72 s, representative
        b.add_directed_edge(a, c, 1_000.0, 1_000.0); // 3.6 s, shadowed
        b.add_directed_edge(a, m, 100.0, 36.0);      // 10 s
        b.add_directed_edge(m, c, 100.0, 36.0);      // 10 s
        (b.build(), [a, m, c])
    }

    #[test]
    fn parallel_edges_route_on_representative() {
        let (net, [a, m, c]) = parallel_bundle();
        let path = DijkstraPathFinder.shortest_path(&net, a, c, Weight::TravelTime).unwrap();
        assert_eq!(path, vec![a, m, c]);

        let metrics = route_metrics(&net, &path).unwrap();
        assert!((metrics.travel_time_s - 20.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_edges_respeeded_together() {
        let (net, [a, _, c]) = parallel_bundle();
        let mut view = NetworkOverlay::new(&net);
        assert!(view.set_speed(a, c, 1_000.0));

        let path = DijkstraPathFinder.shortest_path(&view, a, c, Weight::TravelTime).unwrap();
        assert_eq!(path, vec![a, c]);
        let metrics = route_metrics(&view, &path).unwrap();
        assert!((metrics.travel_time_s - 3.6).abs() < 1e-9);
    }

    #[test]
    fn unreachable_and_unknown_nodes() {
        let (net, [n0, _, n2, n3]) = super::helpers::triangle();
        assert!(DijkstraPathFinder.shortest_path(&net, n0, n3, Weight::TravelTime).is_none());
        assert!(DijkstraPathFinder.shortest_path(&net, n2, n0, Weight::TravelTime).is_none());
        assert!(DijkstraPathFinder.shortest_path(&net, n0, NodeId(99), Weight::TravelTime).is_none());
    }

    #[test]
    fn overlay_reroutes() {
        let (net, [n0, n1, n2, _]) = super::helpers::triangle();
        let mut view = NetworkOverlay::new(&net);
        view.remove_edge(n1, n2);
        let path = DijkstraPathFinder.shortest_path(&view, n0, n2, Weight::TravelTime);
        assert_eq!(path, Some(vec![n0, n2]));
    }

    #[test]
    fn batch_is_positionally_aligned() {
        let (net, [n0, n1, n2, n3]) = super::helpers::triangle();
        let pairs = [(n0, n2), (n0, n3), (n1, n2)];
        let paths = DijkstraPathFinder.shortest_path_many(&net, &pairs, Weight::TravelTime);
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0], Some(vec![n0, n1, n2]));
        assert_eq!(paths[1], None);
        assert_eq!(paths[2], Some(vec![n1, n2]));
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics {
    use ti_core::{co2_for_edge, GeoPoint};
    use crate::{edge_co2, route_metrics, NetworkOverlay, RoadNetworkBuilder};

    #[test]
    fn sums_along_path() {
        let (net, [n0, n1, n2, _]) = super::helpers::triangle();
        let m = route_metrics(&net, &[n0, n1, n2]).unwrap();
        assert!((m.travel_time_s - 20.0).abs() < 1e-9);
        assert!((m.distance_m - 200.0).abs() < 1e-9);
        assert_eq!(m.elevation_gain_m, None);
        assert_eq!(m.per_edge.len(), 2);
        let expected = 2.0 * co2_for_edge(10.0, Some(36.0), None);
        assert!((m.co2_g() - expected).abs() < 1e-6);
    }

    #[test]
    fn short_paths_have_no_metrics() {
        let (net, [n0, ..]) = super::helpers::triangle();
        assert!(route_metrics(&net, &[]).is_none());
        assert!(route_metrics(&net, &[n0]).is_none());
    }

    #[test]
    fn elevation_gain_accumulates() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node_with_elevation(GeoPoint::new(0.0, 0.0), Some(100.0));
        let m = b.add_node_with_elevation(GeoPoint::new(0.0, 0.01), Some(110.0));
        let c = b.add_node_with_elevation(GeoPoint::new(0.0, 0.02), Some(105.0));
        b.add_directed_edge(a, m, 500.0, 50.0);
        b.add_directed_edge(m, c, 500.0, 50.0);
        let net = b.build();
        let metrics = route_metrics(&net, &[a, m, c]).unwrap();
        assert_eq!(metrics.elevation_gain_m, Some(10.0));
    }

    #[test]
    fn edge_co2_follows_overlay() {
        let (net, [n0, n1, ..]) = super::helpers::triangle();
        let base = edge_co2(&net, n0, n1).unwrap();

        let mut view = NetworkOverlay::new(&net);
        view.set_speed(n0, n1, 18.0);
        let slowed = edge_co2(&view, n0, n1).unwrap();
        assert!(slowed > base);

        view.remove_edge(n0, n1);
        assert!(edge_co2(&view, n0, n1).is_none());
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use crate::{load_network_csv, load_network_readers, GraphView, NetworkError};
    use ti_core::NodeId;

    const NODES: &str = "node_id,lat,lon,elevation_m\n0,46.5191,6.6323,495.0\n1,46.5200,6.6350,\n";

    #[test]
    fn loads_nodes_and_edges() {
        let edges = "u,v,length_m,speed_kph,travel_time_s\n0,1,250.0,50,\n1,0,250.0,,18.0\n";
        let net = load_network_readers(Cursor::new(NODES), Cursor::new(edges)).unwrap();
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 2);
        assert_eq!(net.node_elevation_m[0], Some(495.0));
        assert_eq!(net.node_elevation_m[1], None);

        let fwd = net.edge_attrs(NodeId(0), NodeId(1)).unwrap();
        assert!((fwd.travel_time_s - 18.0).abs() < 1e-9);
        let back = net.edge_attrs(NodeId(1), NodeId(0)).unwrap();
        assert_eq!(back.travel_time_s, 18.0);
        assert_eq!(back.speed_kph, None);
    }

    #[test]
    fn rejects_edge_without_time_or_speed() {
        let edges = "u,v,length_m,speed_kph,travel_time_s\n0,1,250.0,,\n";
        let err = load_network_readers(Cursor::new(NODES), Cursor::new(edges)).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)));
    }

    #[test]
    fn rejects_sparse_node_ids() {
        let nodes = "node_id,lat,lon,elevation_m\n0,46.5,6.6,\n5,46.6,6.7,\n";
        let edges = "u,v,length_m,speed_kph,travel_time_s\n";
        let err = load_network_readers(Cursor::new(nodes), Cursor::new(edges)).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)));
    }

    #[test]
    fn rejects_unknown_edge_endpoint() {
        let edges = "u,v,length_m,speed_kph,travel_time_s\n0,7,250.0,50,\n";
        let err = load_network_readers(Cursor::new(NODES), Cursor::new(edges)).unwrap_err();
        assert!(matches!(err, NetworkError::NodeNotFound(NodeId(7))));
    }

    #[test]
    fn loads_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let nodes_path = dir.path().join("nodes.csv");
        let edges_path = dir.path().join("edges.csv");
        std::fs::File::create(&nodes_path).unwrap().write_all(NODES.as_bytes()).unwrap();
        std::fs::File::create(&edges_path)
            .unwrap()
            .write_all(b"u,v,length_m,speed_kph,travel_time_s\n0,1,250.0,50,\n")
            .unwrap();
        let net = load_network_csv(&nodes_path, &edges_path).unwrap();
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        let err = load_network_csv(&missing, &missing).unwrap_err();
        assert!(matches!(err, NetworkError::Io(_)));
    }
}
