//! `ti-network` — road network, modification overlay, and shortest paths.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`, `EdgeAttrs` |
//! | [`view`]    | `GraphView` trait — read access shared by network and overlay  |
//! | [`overlay`] | `NetworkOverlay` — removed edges and speed overrides on a base |
//! | [`router`]  | `PathFinder` trait, `DijkstraPathFinder`                       |
//! | [`metrics`] | `route_metrics`, per-edge emission inputs, `edge_co2`          |
//! | [`loader`]  | CSV node/edge loader                                           |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | `DijkstraPathFinder::shortest_path_many` runs on Rayon.    |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.         |

pub mod error;
pub mod loader;
pub mod metrics;
pub mod network;
pub mod overlay;
pub mod router;
pub mod view;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use loader::{load_network_csv, load_network_readers};
pub use metrics::{edge_co2, edge_emission_input, route_metrics, RouteMetrics};
pub use network::{EdgeAttrs, RoadNetwork, RoadNetworkBuilder};
pub use overlay::NetworkOverlay;
pub use router::{DijkstraPathFinder, PathFinder};
pub use view::GraphView;
