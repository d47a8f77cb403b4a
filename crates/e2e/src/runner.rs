//! Main test runner that orchestrates the server, Playwright, and the
//! alignment checks

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{E2eError, E2eResult};
use crate::geometry;
use crate::playwright::{PlaywrightConfig, PlaywrightHandle};
use crate::server::{ServerConfig, ServerHandle};
use crate::spec::{TestSpec, TestStep};
use crate::BASE_URL_ENV;

/// Result of running a single test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub failed_step: Option<String>,
    pub error: Option<String>,
}

/// Result of running all tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

/// Main E2E test runner
pub struct TestRunner {
    /// Server configuration
    server_config: ServerConfig,

    /// Playwright configuration
    playwright_config: PlaywrightConfig,

    /// Running server handle (if any)
    server: Option<ServerHandle>,

    /// HTTP client for state resets
    http: reqwest::Client,

    /// Test specs directory
    specs_dir: PathBuf,

    /// Output directory for results
    output_dir: PathBuf,
}

impl TestRunner {
    /// Create a new test runner with default configuration
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    /// Create a test runner with custom configuration
    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            server_config: config.server,
            playwright_config: config.playwright,
            server: None,
            http: reqwest::Client::new(),
            specs_dir: config.specs_dir,
            output_dir: config.output_dir,
        }
    }

    /// Start the server, or attach to the one named by `BOXROW_BASE_URL`
    pub async fn start_server(&mut self) -> E2eResult<()> {
        if self.server.is_some() {
            return Ok(()); // Already running
        }

        let server = match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => ServerHandle::external(url),
            _ => ServerHandle::spawn(self.server_config.clone()).await?,
        };

        // Point Playwright at the actual server URL
        self.playwright_config.base_url = server.base_url().to_string();

        self.server = Some(server);
        Ok(())
    }

    /// Stop the server
    pub fn stop_server(&mut self) -> E2eResult<()> {
        if let Some(mut server) = self.server.take() {
            server.stop()?;
        }
        Ok(())
    }

    /// Run all tests in the specs directory
    pub async fn run_all(&mut self) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.specs_dir)?;
        self.run_specs(&specs).await
    }

    /// Run tests matching a tag
    pub async fn run_tagged(&mut self, tag: &str) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.specs_dir)?;
        let filtered: Vec<TestSpec> = specs
            .into_iter()
            .filter(|s| s.tags.contains(&tag.to_string()))
            .collect();
        self.run_specs(&filtered).await
    }

    /// Run a specific test by name
    pub async fn run_test(&mut self, name: &str) -> E2eResult<TestResult> {
        let specs = TestSpec::load_all(&self.specs_dir)?;
        let spec = specs
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::SpecParse(format!("Test not found: {}", name)))?;

        self.run_spec(&spec).await
    }

    /// Run a list of test specs
    pub async fn run_specs(&mut self, specs: &[TestSpec]) -> E2eResult<TestSuiteResult> {
        let start = Instant::now();
        let mut results = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        // Ensure server is running
        self.start_server().await?;

        info!("Running {} test(s)...", specs.len());

        for spec in specs {
            match self.run_spec(spec).await {
                Ok(result) => {
                    if result.success {
                        passed += 1;
                        info!("✓ {} ({} ms)", result.name, result.duration_ms);
                    } else {
                        failed += 1;
                        error!(
                            "✗ {} - {}",
                            result.name,
                            result.error.as_deref().unwrap_or("unknown error")
                        );
                    }
                    results.push(result);
                }
                Err(e) => {
                    failed += 1;
                    error!("✗ {} - {}", spec.name, e);
                    results.push(TestResult {
                        name: spec.name.clone(),
                        success: false,
                        duration_ms: 0,
                        failed_step: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Test Results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(TestSuiteResult {
            total: specs.len(),
            passed,
            failed,
            duration_ms,
            results,
        })
    }

    /// Run a single test spec
    pub async fn run_spec(&mut self, spec: &TestSpec) -> E2eResult<TestResult> {
        let start = Instant::now();
        debug!("Running test: {}", spec.name);

        self.start_server().await?;

        if spec.reset_state {
            self.reset_server_state().await;
        }

        // Update viewport from spec
        let mut pw_config = self.playwright_config.clone();
        pw_config.viewport_width = spec.viewport.width;
        pw_config.viewport_height = spec.viewport.height;

        let playwright = PlaywrightHandle::new(pw_config)?;

        let mut failed_step: Option<String> = None;
        let mut test_error: Option<String> = None;

        match playwright.run(&spec.steps).await {
            Ok(output) => {
                // Alignment data comes back raw; the geometry check runs here.
                for report in &output.align_reports {
                    let tolerance = align_tolerance(&spec.steps, report.step);
                    if let Some(m) = geometry::vertical_misalignment(&report.boxes, tolerance) {
                        failed_step = spec.steps.get(report.step).map(PlaywrightHandle::step_name);
                        test_error = Some(format!(
                            "elements {} and {} are not vertically centered: \
                             centers {:.1} vs {:.1} differ by {:.1}px (tolerance {}px)",
                            m.first,
                            m.second,
                            m.first_center_y,
                            m.second_center_y,
                            m.delta(),
                            tolerance
                        ));
                        break;
                    }
                }
            }
            Err(E2eError::StepFailed { step, reason }) => {
                failed_step = Some(step);
                test_error = Some(reason);
            }
            Err(e) => return Err(e),
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let success = test_error.is_none();

        Ok(TestResult {
            name: spec.name.clone(),
            success,
            duration_ms,
            failed_step,
            error: test_error,
        })
    }

    /// Put the server's cell row back to its initial values.
    ///
    /// Best-effort: an external page under test may not expose the reset
    /// endpoint, and a freshly spawned server is already in its initial
    /// state.
    async fn reset_server_state(&self) {
        let Some(server) = &self.server else { return };
        let url = format!("{}/api/reset", server.base_url());

        match self.http.post(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!("Reset server state via {}", url);
            }
            Ok(resp) => warn!("State reset returned {}", resp.status()),
            Err(e) => warn!("State reset failed: {}", e),
        }
    }

    /// Write test results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestRunner {
    fn drop(&mut self) {
        let _ = self.stop_server();
    }
}

/// Tolerance of the align_check step at `index`, falling back to the 2px
/// default if the index does not name one.
fn align_tolerance(steps: &[TestStep], index: usize) -> f64 {
    match steps.get(index) {
        Some(TestStep::AlignCheck { tolerance_px, .. }) => *tolerance_px,
        _ => 2.0,
    }
}

/// Configuration for the test runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub server: ServerConfig,
    pub playwright: PlaywrightConfig,
    pub specs_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            playwright: PlaywrightConfig::default(),
            specs_dir: PathBuf::from("crates/e2e/specs"),
            output_dir: PathBuf::from("test-results"),
        }
    }
}
