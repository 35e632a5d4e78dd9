use thiserror::Error;

/// Errors raised by structural and indexing operations.
///
/// Both variants describe caller-input problems. They are deterministic
/// functions of the arguments, so an operation that fails with one of them
/// leaves its receiver untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinalgError {
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Index out of bounds: {0}")]
    OutOfBounds(String),
}

pub type Result<T, E = LinalgError> = std::result::Result<T, E>;

impl LinalgError {
    pub(crate) fn out_of_bounds(what: &str, index: usize, bound: usize) -> Self {
        Self::OutOfBounds(format!("{what} index {index} must be below {bound}"))
    }

    pub(crate) fn bad_range(what: &str, first: usize, last: usize, bound: usize) -> Self {
        Self::OutOfBounds(format!(
            "{what} range [{first}, {last}) is not within [0, {bound}]"
        ))
    }
}
