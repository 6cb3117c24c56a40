//! Errors raised by the break transformations.

use std::fmt;

use crate::problem::ProblemError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakError {
    /// The reference depot index does not name a depot.
    DepotOutOfRange { index: usize, num_depots: usize },
    /// The transformed instance failed validation.
    Problem(ProblemError),
}

impl fmt::Display for BreakError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakError::DepotOutOfRange { index, num_depots } => write!(
                f,
                "depot index {} out of range (instance has {} depots)",
                index, num_depots
            ),
            BreakError::Problem(err) => write!(f, "invalid problem data: {}", err),
        }
    }
}

impl std::error::Error for BreakError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BreakError::Problem(err) => Some(err),
            BreakError::DepotOutOfRange { .. } => None,
        }
    }
}

impl From<ProblemError> for BreakError {
    fn from(err: ProblemError) -> Self {
        BreakError::Problem(err)
    }
}
