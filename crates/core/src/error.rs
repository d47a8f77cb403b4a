//! Error types for BoxRow

use thiserror::Error;

/// Result type alias using the BoxRow Error
pub type Result<T> = std::result::Result<T, Error>;

/// BoxRow error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid rotation direction: {0:?} (expected \"left\" or \"right\")")]
    InvalidDirection(String),
}
