//! Error types for the builder

use courier_message::{MutationError, Problem};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Save blocked by {} problem(s)", problems.len())]
    SaveBlocked { problems: Vec<Problem> },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure reported by whatever fetches preview articles
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct FetchError {
    /// Shown to the user
    pub message: String,

    pub description: Option<String>,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
