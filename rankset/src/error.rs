use thiserror::Error;

/// Errors reported by the registry and the disjoint-set facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    #[error("key is not registered")]
    NotFound,

    #[error("key is already registered")]
    AlreadyExists,

    /// A slot index past the end of the store. Reaching this from the
    /// public API is a bug in the registry, not a caller error.
    #[error("slot index {index} out of bounds for capacity {capacity}")]
    Index { index: usize, capacity: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial capacity must be non-zero")]
    ZeroCapacity,

    #[error("load factor {0} is outside (0, 1)")]
    InvalidLoadFactor(f64),

    #[error("config error: {0}")]
    Parse(String),
}
