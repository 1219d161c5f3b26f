//! Selective recomputation.
//!
//! Given baseline routes and a set of edge modifications, only the pairs
//! whose baseline path crosses a modified `(u, v)` are re-routed, on a
//! [`NetworkOverlay`] that is dropped before returning.  Every other pair
//! keeps its baseline route unchanged.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use ti_core::{NodeId, Weight};
use ti_network::{NetworkOverlay, PathFinder, RoadNetwork};

use crate::cache::RouteBatch;
use crate::impact::compute_impact;
use crate::model::{EdgeModification, NodePair, RecalculateResult, Route};
use crate::modification::apply_modifications;
use crate::usage::{annotate_co2, compute_usage, count_edge_usage};

/// `(u, v)` of every modification, whatever its action or validity.
pub fn modified_edge_keys(modifications: &[EdgeModification]) -> FxHashSet<(NodeId, NodeId)> {
    modifications.iter().map(EdgeModification::key).collect()
}

/// Indices of baseline routes whose path crosses one of `keys`.
pub fn affected_indices(baseline: &RouteBatch, keys: &FxHashSet<(NodeId, NodeId)>) -> Vec<usize> {
    baseline
        .slots()
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.as_ref().filter(|r| r.traverses_any(keys)).map(|_| i))
        .collect()
}

/// Run the recalculation pipeline for `pairs` against `baseline`.
///
/// `baseline` must be the route batch for exactly `pairs` and `weight` on
/// `network`.
pub fn recalculate_routes<P: PathFinder>(
    network: &RoadNetwork,
    finder: &P,
    pairs: &[NodePair],
    baseline: &RouteBatch,
    modifications: &[EdgeModification],
    weight: Weight,
) -> RecalculateResult {
    debug_assert_eq!(pairs.len(), baseline.len());

    let keys = modified_edge_keys(modifications);
    let affected = affected_indices(baseline, &keys);

    let mut overlay = NetworkOverlay::new(network);
    let applied = apply_modifications(&mut overlay, modifications);

    // ── Recompute affected pairs on the overlay ───────────────────────────
    let mut recomputed: FxHashMap<usize, Option<Route>> = FxHashMap::default();
    if !affected.is_empty() {
        let od: Vec<(NodeId, NodeId)> = affected
            .iter()
            .map(|&i| (pairs[i].origin, pairs[i].destination))
            .collect();
        let paths = finder.shortest_path_many(&overlay, &od, weight);
        for (&i, path) in affected.iter().zip(paths) {
            let route = path.and_then(|p| Route::from_path(&overlay, pairs[i], p));
            recomputed.insert(i, route);
        }
    }
    debug!(
        pairs = pairs.len(),
        affected = affected.len(),
        applied = applied.len(),
        "selective recomputation done"
    );

    // ── Merge ─────────────────────────────────────────────────────────────
    let merged: Vec<Option<Route>> = baseline
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| match recomputed.get(&i) {
            Some(new) => new.clone(),
            None      => slot.clone(),
        })
        .collect();

    // ── Aggregate ─────────────────────────────────────────────────────────
    let total_routes = baseline.found_count();
    let (impact_statistics, comparisons) =
        compute_impact(baseline.slots(), &recomputed, &affected, &applied, total_routes);

    let before = count_edge_usage(baseline.routes());
    let after = count_edge_usage(merged.iter().flatten());

    let mut original_edge_usage = compute_usage(&before, total_routes, None);
    annotate_co2(&mut original_edge_usage, network);
    let mut new_edge_usage = compute_usage(&after, total_routes, Some(&before));
    annotate_co2(&mut new_edge_usage, &overlay);

    info!(
        total = impact_statistics.total_routes,
        affected = impact_statistics.affected_routes,
        failed = impact_statistics.failed_routes,
        "recalculated routes"
    );

    RecalculateResult {
        applied_modifications: applied,
        original_edge_usage,
        new_edge_usage,
        impact_statistics,
        comparisons,
        routes: merged.into_iter().flatten().collect(),
    }
}
