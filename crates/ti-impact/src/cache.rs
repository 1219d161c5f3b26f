//! Baseline route cache.
//!
//! The cache holds one entry: the routes for the most recently requested
//! ordered pair list.  A request with exactly the same pairs in exactly the
//! same order (and the same weight) is served without touching the network;
//! anything else replaces the entry.  There is no expiry.  Callers clear the
//! cache whenever the baseline changes for reasons other than an edge
//! modification request (new network, new default pairs).

use std::sync::Arc;

use tracing::debug;

use ti_core::Weight;
use ti_network::{GraphView, PathFinder};

use crate::model::{NodePair, Route};

// ── RouteBatch ────────────────────────────────────────────────────────────────

/// Routes for a pair list, positionally aligned with it.
///
/// A slot is `None` when no path exists (or the path is a single node).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RouteBatch {
    slots: Vec<Option<Route>>,
}

impl RouteBatch {
    /// Run `finder` over every pair in one batch call.
    pub fn compute<G: GraphView, P: PathFinder>(
        graph: &G,
        finder: &P,
        pairs: &[NodePair],
        weight: Weight,
    ) -> Self {
        let od: Vec<_> = pairs.iter().map(|p| (p.origin, p.destination)).collect();
        let paths = finder.shortest_path_many(graph, &od, weight);
        let slots = pairs
            .iter()
            .zip(paths)
            .map(|(&pair, path)| path.and_then(|p| Route::from_path(graph, pair, p)))
            .collect();
        Self { slots }
    }

    #[inline]
    pub fn slots(&self) -> &[Option<Route>] {
        &self.slots
    }

    /// Found routes in pair order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> + '_ {
        self.slots.iter().flatten()
    }

    /// Owned copy of the found routes; may be shorter than the pair list.
    pub fn to_routes(&self) -> Vec<Route> {
        self.routes().cloned().collect()
    }

    pub fn found_count(&self) -> usize {
        self.routes().count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// ── RouteCache ────────────────────────────────────────────────────────────────

struct CacheEntry {
    weight: Weight,
    pairs:  Vec<NodePair>,
    batch:  Arc<RouteBatch>,
}

/// Hit/miss counters since construction or the last [`RouteCache::clear`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Single-slot cache of baseline routes.
#[derive(Default)]
pub struct RouteCache {
    entry: Option<CacheEntry>,
    stats: CacheStats,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached batch if `pairs`/`weight` match the current key exactly.
    pub fn get(&self, pairs: &[NodePair], weight: Weight) -> Option<Arc<RouteBatch>> {
        self.entry
            .as_ref()
            .filter(|e| e.weight == weight && e.pairs == pairs)
            .map(|e| Arc::clone(&e.batch))
    }

    /// Return the cached batch for `pairs`, or compute it with one
    /// `shortest_path_many` call and make it the current entry.
    pub fn get_or_compute<G: GraphView, P: PathFinder>(
        &mut self,
        graph: &G,
        finder: &P,
        pairs: &[NodePair],
        weight: Weight,
    ) -> Arc<RouteBatch> {
        if let Some(batch) = self.get(pairs, weight) {
            self.stats.hits += 1;
            debug!(pairs = pairs.len(), "route cache hit");
            return batch;
        }

        self.stats.misses += 1;
        debug!(pairs = pairs.len(), %weight, "route cache miss, computing baseline");
        let batch = Arc::new(RouteBatch::compute(graph, finder, pairs, weight));
        self.entry = Some(CacheEntry {
            weight,
            pairs: pairs.to_vec(),
            batch: Arc::clone(&batch),
        });
        batch
    }

    /// Drop the cached entry and reset the counters.
    pub fn clear(&mut self) {
        self.entry = None;
        self.stats = CacheStats::default();
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
