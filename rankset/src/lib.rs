//! Disjoint sets over keyed elements with collision-free seniority ranks.
//!
//! [`DisjointSet`] binds a double-hashing [`HashRegistry`] (key to node) to
//! a [`RankForest`] (union by size, path compression, rank offsets).

pub mod error;
pub mod prime;
pub mod slots;
pub mod hash;
pub mod config;
pub mod registry;
pub mod forest;
pub mod disjoint;

pub use config::RegistryConfig;
pub use disjoint::DisjointSet;
pub use error::{ConfigError, SetError};
pub use forest::{NodeId, RankForest};
pub use hash::{DoubleHash, FxDoubleHash, IntDoubleHash};
pub use registry::HashRegistry;
