//! Data structures for Dupliq.
//! FxHashMap, SmallVec, similarity pairs, and cluster values.

pub mod cluster;
pub mod collections;
pub mod pair;

pub use cluster::{ClusterStatus, QuestionCluster};
pub use collections::{FxHashMap, FxHashSet};
pub use pair::SimilarityPair;
