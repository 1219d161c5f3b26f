//! The `ImpactService` — network, route cache, and default pairs in one
//! explicitly shared context.
//!
//! # Locking
//!
//! | State           | Guard          | Held during                               |
//! |-----------------|----------------|-------------------------------------------|
//! | network         | `RwLock<Arc>`  | cloning the `Arc` only                    |
//! | default pairs   | `RwLock<Arc>`  | cloning the `Arc` only                    |
//! | route cache     | `Mutex`        | the whole read-or-populate of a baseline  |
//!
//! The loaded network is immutable; each recalculation builds its own
//! overlay, so concurrent requests never see each other's modifications.
//! Holding the cache lock across population means one pair list is computed
//! once even when requests race, and the cached batch is never half-written.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tracing::info;

use ti_core::{NodeId, SampleRng, Weight};
use ti_network::{DijkstraPathFinder, PathFinder, RoadNetwork};

use crate::cache::{CacheStats, RouteBatch, RouteCache};
use crate::config::{validate_pair_count, validate_radius};
use crate::engine::recalculate_routes;
use crate::model::{EdgeModification, NetworkInfo, NodePair, RecalculateResult, Route};
use crate::sampling::sample_pairs;
use crate::{ImpactError, ImpactResult, ServiceConfig};

/// Number of node ids reported by [`ImpactService::network_info`].
const SAMPLE_NODE_COUNT: usize = 20;

/// Route calculation and impact analysis over one road network.
///
/// `P` is the shortest-path engine; [`DijkstraPathFinder`] by default.
pub struct ImpactService<P: PathFinder = DijkstraPathFinder> {
    config:        ServiceConfig,
    finder:        P,
    network:       RwLock<Option<Arc<RoadNetwork>>>,
    default_pairs: RwLock<Option<Arc<Vec<NodePair>>>>,
    cache:         Mutex<RouteCache>,
}

impl<P: PathFinder> ImpactService<P> {
    /// Create a service with no network loaded.
    pub fn new(config: ServiceConfig, finder: P) -> ImpactResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            finder,
            network:       RwLock::new(None),
            default_pairs: RwLock::new(None),
            cache:         Mutex::new(RouteCache::new()),
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn finder(&self) -> &P {
        &self.finder
    }

    // ── Network ───────────────────────────────────────────────────────────

    /// Install `network`, replacing any previous one.
    ///
    /// Cached routes and default pairs refer to the old network's nodes and
    /// are discarded.
    pub fn load_network(&self, network: RoadNetwork) {
        info!(
            nodes = network.node_count(),
            edges = network.edge_count(),
            "installing road network"
        );
        *self.network.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(network));
        *self.default_pairs.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.clear_cache();
    }

    /// The loaded network, or [`ImpactError::NetworkNotLoaded`].
    pub fn network(&self) -> ImpactResult<Arc<RoadNetwork>> {
        self.network
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ImpactError::NetworkNotLoaded)
    }

    pub fn network_info(&self) -> ImpactResult<NetworkInfo> {
        let network = self.network()?;
        Ok(NetworkInfo {
            node_count:   network.node_count(),
            edge_count:   network.edge_count(),
            sample_nodes: (0..network.node_count().min(SAMPLE_NODE_COUNT) as u32)
                .map(NodeId)
                .collect(),
        })
    }

    // ── Routes ────────────────────────────────────────────────────────────

    /// Baseline routes for `pairs`; pairs without a path are left out.
    pub fn calculate_routes(&self, pairs: &[NodePair], weight: Option<Weight>) -> ImpactResult<Vec<Route>> {
        let network = self.network()?;
        let weight = weight.unwrap_or(self.config.default_weight);
        Ok(self.baseline(&network, pairs, weight).to_routes())
    }

    /// Recalculate `pairs` (or the default sample) with `modifications`
    /// applied.
    pub fn recalculate(
        &self,
        pairs: Option<&[NodePair]>,
        modifications: &[EdgeModification],
        weight: Option<Weight>,
    ) -> ImpactResult<RecalculateResult> {
        let network = self.network()?;
        let weight = weight.unwrap_or(self.config.default_weight);

        let defaults;
        let pairs = match pairs {
            Some(p) => p,
            None => {
                defaults = self.default_pairs().ok_or(ImpactError::NoDefaultPairs)?;
                defaults.as_slice()
            }
        };

        let baseline = self.baseline(&network, pairs, weight);
        Ok(recalculate_routes(&network, &self.finder, pairs, &baseline, modifications, weight))
    }

    fn baseline(&self, network: &RoadNetwork, pairs: &[NodePair], weight: Weight) -> Arc<RouteBatch> {
        self.lock_cache().get_or_compute(network, &self.finder, pairs, weight)
    }

    // ── Cache ─────────────────────────────────────────────────────────────

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.lock_cache().stats()
    }

    fn lock_cache(&self) -> MutexGuard<'_, RouteCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Default pairs ─────────────────────────────────────────────────────

    pub fn default_pairs(&self) -> Option<Arc<Vec<NodePair>>> {
        self.default_pairs.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replace the default sample.  Clears the cache and, with
    /// `prewarm_cache`, computes the new baseline immediately.
    ///
    /// Fails with [`ImpactError::NetworkNotLoaded`] before touching any
    /// state.
    pub fn set_default_pairs(&self, pairs: Vec<NodePair>) -> ImpactResult<()> {
        let network = self.network()?;
        let pairs = Arc::new(pairs);
        *self.default_pairs.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&pairs));
        self.clear_cache();

        if self.config.prewarm_cache {
            let batch = self.baseline(&network, &pairs, self.config.default_weight);
            info!(pairs = pairs.len(), found = batch.found_count(), "pre-warmed route cache");
        }
        Ok(())
    }

    /// Sample a new default pair list and install it via
    /// [`set_default_pairs`](Self::set_default_pairs).
    ///
    /// Arguments left `None` fall back to the service configuration.
    pub fn generate_default_pairs(
        &self,
        count: Option<usize>,
        seed: Option<u64>,
        radius_km: Option<f64>,
    ) -> ImpactResult<Vec<NodePair>> {
        let network = self.network()?;
        let count = count.unwrap_or(self.config.default_pair_count);
        let radius_km = radius_km.or(self.config.sample_radius_km);
        validate_pair_count(count)?;
        validate_radius(radius_km)?;

        let mut rng = SampleRng::new(seed.or(self.config.default_pair_seed));
        let pairs = sample_pairs(&network, count, &mut rng, self.config.sample_center, radius_km)?;
        info!(count = pairs.len(), ?radius_km, "generated default pairs");

        self.set_default_pairs(pairs.clone())?;
        Ok(pairs)
    }
}

impl ImpactService<DijkstraPathFinder> {
    /// Service with the default Dijkstra path finder.
    pub fn with_config(config: ServiceConfig) -> ImpactResult<Self> {
        Self::new(config, DijkstraPathFinder)
    }
}
