//! Curation errors.

use super::error_code::{self, DupliqErrorCode};

/// Errors that can occur when applying curation actions to a cluster.
///
/// Only membership violations are errors; re-applying an action that is
/// already in effect is a tolerated no-op.
#[derive(Debug, thiserror::Error)]
pub enum CurationError {
    #[error("Question {question_id} is not a member of cluster {cluster_id}")]
    UnknownMember {
        cluster_id: String,
        question_id: String,
    },

    #[error("Question {question_id} is not a proposed addition to cluster {cluster_id}")]
    UnknownProposal {
        cluster_id: String,
        question_id: String,
    },
}

impl DupliqErrorCode for CurationError {
    fn error_code(&self) -> &'static str {
        error_code::CURATION_ERROR
    }
}
