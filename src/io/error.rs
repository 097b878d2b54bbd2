//! Error types for growth runs and configuration parsing

use std::fmt;

/// Main error type for all growing operations
///
/// Every variant except `InvalidParameter` reports a usage error in the
/// calling code. Growth is deterministic, so retrying the same call after such
/// an error can never succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrowError {
    /// Carried cell-state grid does not cover the label grid
    ShapeMismatch {
        /// Dimensions of the carried cell-state grid (rows, cols)
        expected: (usize, usize),
        /// Dimensions of the label grid (rows, cols)
        found: (usize, usize),
    },

    /// A component that must reuse carried cell states was asked to allocate
    /// fresh ones
    UnsupportedReset {
        /// Name of the component
        component: &'static str,
    },

    /// The label counter no longer fits the grid's label type
    LabelOverflow {
        /// Number of labels requested so far
        count: usize,
    },

    /// Configuration value rejected during validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Grid or group contents violate an operation's precondition
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for GrowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Cell-state grid is {}x{} but label grid is {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            Self::UnsupportedReset { component } => {
                write!(
                    f,
                    "{component} does not support resetting cell states; \
                     pass the states of the previous run"
                )
            }
            Self::LabelOverflow { count } => {
                write!(f, "Label {count} does not fit the grid label type")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for GrowError {}

/// Convenience type alias for growing results
pub type Result<T> = std::result::Result<T, GrowError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GrowError {
    GrowError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> GrowError {
    GrowError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
