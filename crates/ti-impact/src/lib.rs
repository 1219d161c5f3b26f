//! `ti-impact` — "what if this road were closed or slower?" analysis.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                        |
//! |------------------|-----------------------------------------------------------------|
//! | [`model`]        | `NodePair`, `Route`, `EdgeModification`, result records         |
//! | [`cache`]        | `RouteBatch`, `RouteCache` — baseline routes keyed by pair list |
//! | [`modification`] | Applying modifications to a `NetworkOverlay`                    |
//! | [`usage`]        | `EdgeCounts`, edge-usage frequency and deltas                   |
//! | [`impact`]       | Per-route deltas and `ImpactStatistics` aggregation             |
//! | [`engine`]       | Selective recomputation pipeline                                |
//! | [`sampling`]     | Seeded random OD-pair sampling                                  |
//! | [`config`]       | `ServiceConfig`                                                 |
//! | [`service`]      | `ImpactService` — network, cache, and default pairs together    |
//! | [`error`]        | `ImpactError`, `ImpactResult<T>`                                |
//!
//! # Recalculation pipeline
//!
//! ```text
//! pairs + modifications
//!   ① baseline   — RouteCache hit, or PathFinder over every pair
//!   ② partition  — affected = baseline path crosses a modified (u, v)
//!   ③ overlay    — NetworkOverlay over the shared network; apply edits
//!   ④ recompute  — PathFinder over affected pairs only, on the overlay
//!   ⑤ merge      — recomputed routes at affected positions, baseline elsewhere
//!   ⑥ aggregate  — ImpactStatistics + edge usage before/after
//! ```
//!
//! Unaffected routes are never recomputed, even if a modification elsewhere
//! could shorten them: the analysis measures the cost of losing specific
//! roads for the trips that used them.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Batched path searches run on Rayon's thread pool.      |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.     |

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod impact;
pub mod model;
pub mod modification;
pub mod sampling;
pub mod service;
pub mod usage;


pub use cache::{CacheStats, RouteBatch, RouteCache};
pub use config::ServiceConfig;
pub use engine::{affected_indices, modified_edge_keys, recalculate_routes};
pub use error::{ImpactError, ImpactResult};
pub use impact::{compute_impact, route_deltas, RouteDeltas};
pub use model::{
    EdgeModification, EdgeUsageStat, ImpactStatistics, ModificationAction, NetworkInfo, NodePair,
    RecalculateResult, Route, RouteComparison,
};
pub use modification::apply_modifications;
pub use sampling::sample_pairs;
pub use service::ImpactService;
pub use usage::{annotate_co2, compute_usage, count_edge_usage, EdgeCounts};
