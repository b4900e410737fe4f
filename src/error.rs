//! Error types for network evaluation and breeding.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EvolveError>;

/// Errors that can occur while evaluating or breeding individuals
#[derive(Debug, Clone, PartialEq)]
pub enum EvolveError {
    /// An input or target vector did not match the expected arity.
    ///
    /// This is the only recoverable precondition in the core: the caller
    /// supplied a malformed example and can retry with a corrected one.
    InvalidInput { expected: usize, actual: usize },
    /// Breeding or cloning was attempted across incompatible topologies.
    ///
    /// This indicates a configuration or programming error; continuing
    /// would produce a corrupt child.
    StructuralMismatch(String),
}

impl std::fmt::Display for EvolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvolveError::InvalidInput { expected, actual } => {
                write!(f, "invalid input: expected {} values, got {}", expected, actual)
            }
            EvolveError::StructuralMismatch(msg) => {
                write!(f, "structural mismatch: {}", msg)
            }
        }
    }
}

impl std::error::Error for EvolveError {}
