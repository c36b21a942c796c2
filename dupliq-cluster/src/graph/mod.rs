//! Similarity graph construction and connected-component extraction.

pub mod builder;
pub mod components;

pub use builder::{RetainedEdge, SimilarityGraph};
pub use components::{connected_components, ComponentSet};
