//! Error types shared across crates.

use thiserror::Error;

/// A string did not name a serviced location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown location code `{0}`")]
pub struct ParseLocationError(pub String);
