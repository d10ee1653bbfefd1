//! Build-error taxonomy.
//!
//! Every error in this crate is a build-time programmer error raised by an
//! invalid call from a collaborator. Nothing here is retried or recovered;
//! driver-level failures (connectivity, constraint violations) belong to the
//! execution layer and never surface through these types.

use thiserror::Error;

/// Errors raised while assembling a statement.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A part-cardinality rule was violated. Collected at validation time so
    /// the message enumerates every broken rule, not just the first.
    #[error("invalid statement structure: {}", .violations.join("; "))]
    Structural { violations: Vec<String> },

    /// A condition tree or filter expression could not be translated.
    #[error("invalid condition: {0}")]
    Condition(String),

    /// A value that is neither a scalar, a recognized raw-column or
    /// function string, nor a sub-query was passed where a bindable value
    /// was expected.
    #[error("unbindable value: {0}")]
    ValueType(String),
}

impl BuildError {
    /// Structural error with a single violation, for fail-fast call sites.
    pub(crate) fn structural(violation: impl Into<String>) -> Self {
        BuildError::Structural {
            violations: vec![violation.into()],
        }
    }
}

pub type BuildResult<T> = Result<T, BuildError>;
