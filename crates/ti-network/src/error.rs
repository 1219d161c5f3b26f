//! Network-subsystem error type.

use thiserror::Error;

use ti_core::NodeId;

/// Errors produced by `ti-network`.
///
/// A missing path between two nodes is *not* an error; path finders return
/// `None` for it.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("need at least 2 candidate nodes to sample pairs, found {found}")]
    TooFewNodes { found: usize },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
