//! Error types for the Lane-Emden ADM engine.
//!
//! Two layers of errors exist:
//! - [`SymbolicError`] is raised by the symbolic backend when an operation has
//!   no exact result in its expression class.
//! - [`AdmError`] is raised by the solver and carries the index of the term
//!   or polynomial that could not be produced.

use thiserror::Error;

/// Result type alias using [`AdmError`].
pub type Result<T> = std::result::Result<T, AdmError>;

/// Errors raised by the symbolic calculus backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolicError {
    /// The backend has no closed form for an antiderivative
    #[error("No closed-form antiderivative: {message}")]
    NoClosedForm { message: String },

    /// A definite integral diverges at one of its bounds
    #[error("Definite integral in '{variable}' diverges at a bound")]
    DivergentIntegral { variable: String },

    /// An expression has no Taylor expansion in the requested parameter
    #[error("Series expansion failed: {message}")]
    SeriesExpansion { message: String },

    /// Zero raised to a non-positive power
    #[error("Division by zero")]
    DivisionByZero,
}

impl SymbolicError {
    /// Create a no-closed-form error
    pub fn no_closed_form(message: impl Into<String>) -> Self {
        Self::NoClosedForm {
            message: message.into(),
        }
    }

    /// Create a series expansion error
    pub fn series(message: impl Into<String>) -> Self {
        Self::SeriesExpansion {
            message: message.into(),
        }
    }
}

/// Unified error type for all solver operations.
#[derive(Error, Debug)]
pub enum AdmError {
    // ============ Term Generation Errors ============
    /// The inverse operator could not integrate the polynomial for a term
    #[error("Integration failed while computing theta_{term}: {source}")]
    IntegrationFailure {
        term: usize,
        #[source]
        source: SymbolicError,
    },

    /// The Adomian polynomial could not be expanded
    #[error("Series expansion failed while computing A_{index}: {source}")]
    ExpansionFailure {
        index: usize,
        #[source]
        source: SymbolicError,
    },

    /// A polynomial was requested before its prerequisite terms exist
    #[error("A_{index} requires theta_0..theta_{index}, but only {available} terms exist")]
    OrderViolation { index: usize, available: usize },

    /// A generated expression exceeded the configured size guard
    #[error("theta_{term} grew to {size} monomials (limit {limit})")]
    ExpressionLimit {
        term: usize,
        size: usize,
        limit: usize,
    },

    /// A computed term does not satisfy its defining recurrence
    #[error("theta_{term} does not satisfy L[theta_{term}] = -A_{prev}", prev = .term.saturating_sub(1))]
    RecurrenceMismatch { term: usize },

    // ============ Configuration Errors ============
    /// Invalid solver configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl AdmError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an integration failure for the given term
    pub fn integration_failure(term: usize, source: SymbolicError) -> Self {
        Self::IntegrationFailure { term, source }
    }

    /// Create an order violation error
    pub fn order_violation(index: usize, available: usize) -> Self {
        Self::OrderViolation { index, available }
    }

    /// Index of the term or polynomial this error refers to, if any.
    pub fn term_index(&self) -> Option<usize> {
        match self {
            Self::IntegrationFailure { term, .. }
            | Self::ExpressionLimit { term, .. }
            | Self::RecurrenceMismatch { term } => Some(*term),
            Self::ExpansionFailure { index, .. } | Self::OrderViolation { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_term() {
        let err = AdmError::integration_failure(3, SymbolicError::no_closed_form("log term"));
        assert_eq!(
            err.to_string(),
            "Integration failed while computing theta_3: No closed-form antiderivative: log term"
        );
        assert_eq!(err.term_index(), Some(3));

        let err = AdmError::RecurrenceMismatch { term: 2 };
        assert_eq!(
            err.to_string(),
            "theta_2 does not satisfy L[theta_2] = -A_1"
        );
    }

    #[test]
    fn test_configuration_error_has_no_index() {
        let err = AdmError::invalid_configuration("num_terms must be at least 1");
        assert_eq!(err.term_index(), None);
    }
}
