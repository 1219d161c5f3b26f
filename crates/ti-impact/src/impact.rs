//! Per-route deltas and aggregate impact statistics.
//!
//! # Aggregation policy
//!
//! - A pair whose new route is missing counts as failed and contributes no
//!   deltas.
//! - A route is *affected* when its distance or its travel time did not
//!   decrease (delta ≥ 0).
//! - For affected routes, each metric's delta enters the totals, maxima, and
//!   percentage samples only when it is ≥ 0.  Decreases are dropped, never
//!   subtracted, so totals are never negative.
//! - A percentage exists only when the original value is positive.
//! - Averages over an empty sample are 0.0.

use rustc_hash::FxHashMap;

use crate::model::{EdgeModification, ImpactStatistics, Route, RouteComparison};

// ── Per-route deltas ──────────────────────────────────────────────────────────

/// `new − original` for each metric, with percentages where defined.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RouteDeltas {
    pub distance: f64,
    pub distance_percent: Option<f64>,
    pub time: f64,
    pub time_percent: Option<f64>,
    pub co2: f64,
    pub co2_percent: Option<f64>,
    pub is_affected: bool,
}

fn percent(delta: f64, original: f64) -> Option<f64> {
    (original > 0.0).then(|| delta / original * 100.0)
}

/// Compare a baseline route with its recomputed replacement.
pub fn route_deltas(original: &Route, new: &Route) -> RouteDeltas {
    let distance = new.distance_m - original.distance_m;
    let time = new.travel_time_s - original.travel_time_s;
    let co2 = new.co2_g - original.co2_g;
    RouteDeltas {
        distance,
        distance_percent: percent(distance, original.distance_m),
        time,
        time_percent: percent(time, original.travel_time_s),
        co2,
        co2_percent: percent(co2, original.co2_g),
        is_affected: distance >= 0.0 || time >= 0.0,
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Running sum, maximum, and percentage sample for one metric.
#[derive(Default)]
struct MetricAccumulator {
    total:    f64,
    max:      f64,
    percents: Vec<f64>,
}

impl MetricAccumulator {
    fn add(&mut self, delta: f64, percent: Option<f64>) {
        if delta < 0.0 {
            return;
        }
        self.total += delta;
        self.max = self.max.max(delta);
        if let Some(p) = percent {
            self.percents.push(p);
        }
    }

    fn avg_percent(&self) -> f64 {
        mean(&self.percents)
    }
}

fn mean(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        0.0
    } else {
        sample.iter().sum::<f64>() / sample.len() as f64
    }
}

fn per_route(total: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { total / n as f64 }
}

/// Aggregate the impact of a recalculation.
///
/// `baseline` is positionally aligned with the request's pairs;
/// `recomputed` maps each affected index to its new route (`None` if the
/// pair became unreachable).  `total_routes` is the number of baseline
/// routes found.
pub fn compute_impact(
    baseline: &[Option<Route>],
    recomputed: &FxHashMap<usize, Option<Route>>,
    affected: &[usize],
    applied: &[EdgeModification],
    total_routes: usize,
) -> (ImpactStatistics, Vec<RouteComparison>) {
    let mut affected_routes = 0;
    let mut failed_routes = 0;
    let mut distance = MetricAccumulator::default();
    let mut time = MetricAccumulator::default();
    let mut co2 = MetricAccumulator::default();
    let mut comparisons = Vec::with_capacity(affected.len());

    for &idx in affected {
        let Some(original) = baseline.get(idx).and_then(Option::as_ref) else {
            continue;
        };
        let on_path = first_modification_on_path(original, applied);
        let new = recomputed.get(&idx).cloned().flatten();

        let Some(new) = new else {
            failed_routes += 1;
            comparisons.push(RouteComparison {
                origin:                 original.origin,
                destination:            original.destination,
                original_route:         original.clone(),
                new_route:              None,
                modified_edge_on_path:  on_path,
                distance_delta:         None,
                distance_delta_percent: None,
                time_delta:             None,
                time_delta_percent:     None,
                co2_delta:              None,
                co2_delta_percent:      None,
                is_affected:            true,
                route_failed:           true,
            });
            continue;
        };

        let d = route_deltas(original, &new);
        if d.is_affected {
            affected_routes += 1;
            distance.add(d.distance, d.distance_percent);
            time.add(d.time, d.time_percent);
            co2.add(d.co2, d.co2_percent);
        }

        comparisons.push(RouteComparison {
            origin:                 original.origin,
            destination:            original.destination,
            original_route:         original.clone(),
            new_route:              Some(new),
            modified_edge_on_path:  on_path,
            distance_delta:         Some(d.distance),
            distance_delta_percent: d.distance_percent,
            time_delta:             Some(d.time),
            time_delta_percent:     d.time_percent,
            co2_delta:              Some(d.co2),
            co2_delta_percent:      d.co2_percent,
            is_affected:            d.is_affected,
            route_failed:           false,
        });
    }

    let stats = ImpactStatistics {
        total_routes,
        affected_routes,
        failed_routes,
        total_distance_increase_km:    distance.total / 1000.0,
        total_time_increase_minutes:   time.total / 60.0,
        avg_distance_increase_km:      per_route(distance.total / 1000.0, affected_routes),
        avg_time_increase_minutes:     per_route(time.total / 60.0, affected_routes),
        max_distance_increase_km:      distance.max / 1000.0,
        max_time_increase_minutes:     time.max / 60.0,
        avg_distance_increase_percent: distance.avg_percent(),
        avg_time_increase_percent:     time.avg_percent(),
        total_co2_increase_grams:      co2.total,
        avg_co2_increase_grams:        per_route(co2.total, affected_routes),
        max_co2_increase_grams:        co2.max,
        avg_co2_increase_percent:      co2.avg_percent(),
    };

    (stats, comparisons)
}

/// The first applied modification (in request order) whose edge is a hop of
/// `route`'s path.
fn first_modification_on_path(route: &Route, applied: &[EdgeModification]) -> Option<EdgeModification> {
    applied
        .iter()
        .find(|m| route.hops().any(|hop| hop == m.key()))
        .copied()
}
