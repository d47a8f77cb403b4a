//! BoxRow E2E Test Framework
//!
//! A Rust-controlled browser test harness that:
//! - Spawns the BoxRow web server as a subprocess (or targets an external
//!   URL given via `BOXROW_BASE_URL`)
//! - Drives a browser through Playwright scripts generated from steps
//! - Parses declarative YAML test specs
//! - Checks the vertical alignment of cells and buttons against a pixel
//!   tolerance
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    E2E Test Runner (Rust)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── start_server() -> ServerHandle | external URL        │
//! │    ├── run_spec(spec: TestSpec) -> TestResult               │
//! │    └── align reports -> geometry::vertical_misalignment     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestSpec (YAML)                                            │
//! │    ├── name, description, tags, viewport, reset_state       │
//! │    └── steps: [Step]                                        │
//! │          ├── navigate { url }                               │
//! │          ├── click { selector, times? }                     │
//! │          ├── assert { selector, text? | texts? | count? }   │
//! │          ├── align_check { selectors, tolerance_px? }       │
//! │          └── screenshot { name }                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod geometry;
pub mod playwright;
pub mod runner;
pub mod server;
pub mod spec;

pub use error::{E2eError, E2eResult};
pub use runner::TestRunner;
pub use spec::{TestSpec, TestStep};

/// Environment variable naming the page under test. When set, the runner
/// does not spawn a server and targets this base URL instead.
pub const BASE_URL_ENV: &str = "BOXROW_BASE_URL";
