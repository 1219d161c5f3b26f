//! Random origin-destination pair sampling.

use ti_core::{GeoPoint, NodeId, SampleRng};
use ti_network::{NetworkError, NetworkResult, RoadNetwork};

use crate::model::NodePair;

/// Draw `count` pairs of distinct nodes.
///
/// With `radius_km`, candidates are limited to nodes within that distance
/// of `center` (default: the centre of the network's bounding box).
///
/// # Errors
///
/// [`NetworkError::TooFewNodes`] when fewer than two candidates remain.
pub fn sample_pairs(
    network: &RoadNetwork,
    count: usize,
    rng: &mut SampleRng,
    center: Option<GeoPoint>,
    radius_km: Option<f64>,
) -> NetworkResult<Vec<NodePair>> {
    let candidates: Vec<NodeId> = match (radius_km, center.or_else(|| network.bbox_center())) {
        (Some(r), Some(c)) => network.nodes_within(c, (r * 1000.0) as f32),
        _ => (0..network.node_count() as u32).map(NodeId).collect(),
    };

    let mut pairs = Vec::with_capacity(count);
    for _ in 0..count {
        let (i, j) = rng
            .distinct_pair(candidates.len())
            .ok_or(NetworkError::TooFewNodes { found: candidates.len() })?;
        pairs.push(NodePair::new(candidates[i], candidates[j]));
    }
    Ok(pairs)
}
