use thiserror::Error;

use ti_network::NetworkError;

/// Structural failures of an impact request.
///
/// Per-pair failures (no path) and per-edge failures (unknown or invalid
/// modification) are never errors; they show up as missing routes,
/// `failed_routes`, or a shorter `applied_modifications` list.
#[derive(Debug, Error)]
pub enum ImpactError {
    #[error("no road network has been loaded")]
    NetworkNotLoaded,

    #[error("no pairs supplied and no default pair sample has been generated")]
    NoDefaultPairs,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

pub type ImpactResult<T> = Result<T, ImpactError>;
