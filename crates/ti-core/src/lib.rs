//! `ti-core` — foundational types for the traffic-impact engine.
//!
//! This crate is a dependency of every other `ti-*` crate.  It has no `ti-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`                                       |
//! | [`geo`]      | `GeoPoint`, haversine distance                           |
//! | [`weight`]   | `Weight` — the edge attribute shortest paths minimise    |
//! | [`co2`]      | Per-edge and per-route CO2 emission model                |
//! | [`rng`]      | `SampleRng` — seeded RNG for OD-pair sampling            |
//! | [`error`]    | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod co2;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod weight;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use co2::{co2_for_edge, co2_for_route, EdgeEmissionInput};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId};
pub use rng::SampleRng;
pub use weight::Weight;
