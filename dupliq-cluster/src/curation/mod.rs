//! Supervised curation: actions over clusters and regeneration reconciliation.

pub mod actions;
pub mod reconcile;

pub use actions::{apply_action, split_and_mark, CurationAction, CurationOutcome, SplitOutcome};
pub use reconcile::reconcile_regenerated;
