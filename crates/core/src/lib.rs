//! BoxRow Core Library
//!
//! The rotation model shared by the web server and the test harness: an
//! explicitly-owned, ordered row of cell values and the pure left/right
//! rotations over it.

pub mod error;
pub mod row;

pub use error::{Error, Result};
pub use row::{CellRow, Direction};

/// BoxRow version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
