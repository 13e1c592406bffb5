use thiserror::Error;

/// Error raised by a [`Model`](crate::model::Model) implementation while
/// enumerating or invoking methods.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The invoked method itself failed (an exception in the host runtime).
    #[error("{method}() threw: {message}")]
    Thrown { method: String, message: String },

    /// The model has no method with this name.
    #[error("Method {0} is not defined on the model")]
    UndefinedMethod(String),

    /// The method exists but this model source cannot execute it.
    #[error("Method {0} cannot be invoked by this model source")]
    NotInvocable(String),

    /// Anything else a reflection bridge wants to surface.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Error type for relation analysis.
///
/// There is no partial-result variant: the first failure aborts the analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Listing the model's public methods failed.
    #[error("Failed to enumerate methods of {class}: {source}")]
    Reflection {
        class: String,
        #[source]
        source: ModelError,
    },

    /// A zero-argument method invoked as a last-resort probe failed.
    ///
    /// The model's error is carried unchanged in `source`.
    #[error("Probing {class}::{method}() failed: {source}")]
    Invocation {
        class: String,
        method: String,
        #[source]
        source: ModelError,
    },
}

impl AnalysisError {
    /// The model error that caused this analysis failure.
    pub fn model_error(&self) -> &ModelError {
        match self {
            AnalysisError::Reflection { source, .. } | AnalysisError::Invocation { source, .. } => {
                source
            }
        }
    }
}

/// Convenience result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
