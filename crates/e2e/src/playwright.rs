//! Playwright browser automation
//!
//! Steps are lowered into a single Node script which drives one browser
//! session through the whole spec, so clicks and the assertions that follow
//! them observe the same page. Alignment steps only collect bounding boxes;
//! the geometry check itself runs in Rust on the reported data.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::geometry::BoundingBox;
use crate::spec::{TestStep, WaitState};

/// Marker prefixing alignment data lines in script output.
const ALIGN_MARKER: &str = "ALIGN:";

/// Playwright browser handle
pub struct PlaywrightHandle {
    /// Base URL of the server
    base_url: String,

    /// Directory for screenshots
    screenshot_dir: PathBuf,

    /// Viewport dimensions
    viewport_width: u32,
    viewport_height: u32,

    /// Browser type
    browser: Browser,

    headless: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "firefox" => Browser::Firefox,
            "webkit" => Browser::Webkit,
            _ => Browser::Chromium,
        }
    }
}

/// Bounding boxes captured by one `align_check` step.
#[derive(Debug, Clone, Deserialize)]
pub struct AlignReport {
    /// Index of the step within the spec.
    pub step: usize,
    pub boxes: Vec<BoundingBox>,
}

/// Output of a successful script run.
#[derive(Debug, Default)]
pub struct RunOutput {
    pub align_reports: Vec<AlignReport>,
}

/// Failure record printed by the generated script's catch block.
#[derive(Debug, Deserialize)]
struct ScriptFailure {
    #[allow(dead_code)]
    success: bool,
    #[serde(default)]
    step: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl PlaywrightHandle {
    /// Create a new Playwright handle
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        // Verify playwright is installed
        Self::check_playwright_installed()?;

        // Create screenshot directory
        std::fs::create_dir_all(&config.screenshot_dir)?;

        Ok(Self {
            base_url: config.base_url,
            screenshot_dir: config.screenshot_dir,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            browser: config.browser,
            headless: config.headless,
        })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Generate a short name for a step, used in failure reports
    pub fn step_name(step: &TestStep) -> String {
        match step {
            TestStep::Navigate { url, .. } => format!("navigate:{}", url),
            TestStep::Click { selector, times, .. } => format!("click:{}x{}", selector, times),
            TestStep::Wait { selector, .. } => format!("wait:{}", selector),
            TestStep::Sleep { ms } => format!("sleep:{}ms", ms),
            TestStep::Assert { selector, .. } => format!("assert:{}", selector),
            TestStep::AlignCheck { selectors, .. } => {
                format!("align_check:{}", selectors.join(","))
            }
            TestStep::Screenshot { name, .. } => format!("screenshot:{}", name),
            TestStep::Log { message } => format!("log:{}", &message[..message.len().min(30)]),
        }
    }

    /// Build the Playwright script for a full spec's steps
    pub fn build_script(&self, steps: &[TestStep]) -> String {
        let mut script = String::new();

        // Header
        script.push_str(&format!(
            r#"
const {{ chromium, firefox, webkit }} = require('playwright');
const {{ expect }} = require('@playwright/test');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  const baseUrl = '{base_url}';
  let currentStep = 'start';

  try {{
"#,
            browser = self.browser.as_str(),
            headless = self.headless,
            width = self.viewport_width,
            height = self.viewport_height,
            base_url = self.base_url,
        ));

        // Generate step code
        for (i, step) in steps.iter().enumerate() {
            let name = Self::step_name(step);
            script.push_str(&format!("\n    // Step {}: {}\n", i + 1, name));
            script.push_str(&format!(
                "    currentStep = '{}';\n",
                name.replace('\\', "\\\\").replace('\'', "\\'")
            ));
            script.push_str(&self.step_to_js(step, i));
            script.push('\n');
        }

        // Footer
        script.push_str(
            r#"
    console.log(JSON.stringify({ success: true }));
  } catch (error) {
    console.error(JSON.stringify({ success: false, step: currentStep, error: error.message }));
    process.exit(1);
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    /// Convert a step to JavaScript code
    fn step_to_js(&self, step: &TestStep, step_index: usize) -> String {
        match step {
            TestStep::Navigate {
                url,
                wait_for_selector,
            } => {
                let wait = wait_for_selector
                    .as_ref()
                    .map(|s| {
                        format!(
                            r#"
    await page.waitForSelector('{}');"#,
                            s
                        )
                    })
                    .unwrap_or_default();
                format!(r#"    await page.goto(baseUrl + '{}');{}"#, url, wait)
            }
            TestStep::Click {
                selector,
                times,
                timeout_ms,
            } => {
                let timeout = timeout_ms.unwrap_or(5000);
                format!(
                    r#"    for (let i = 0; i < {}; i++) {{
      await page.click('{}', {{ timeout: {} }});
    }}"#,
                    times, selector, timeout
                )
            }
            TestStep::Wait {
                selector,
                timeout_ms,
                state,
            } => {
                let state_str = match state {
                    WaitState::Visible => "visible",
                    WaitState::Hidden => "hidden",
                    WaitState::Attached => "attached",
                    WaitState::Detached => "detached",
                };
                format!(
                    r#"    await page.waitForSelector('{}', {{ state: '{}', timeout: {} }});"#,
                    selector, state_str, timeout_ms
                )
            }
            TestStep::Sleep { ms } => {
                format!(r#"    await page.waitForTimeout({});"#, ms)
            }
            TestStep::Assert {
                selector,
                visible,
                text,
                texts,
                count,
            } => {
                let mut assertions = Vec::new();

                if let Some(vis) = visible {
                    if *vis {
                        assertions.push(format!(
                            r#"    await expect(page.locator('{}')).toBeVisible();"#,
                            selector
                        ));
                    } else {
                        assertions.push(format!(
                            r#"    await expect(page.locator('{}')).toBeHidden();"#,
                            selector
                        ));
                    }
                }

                if let Some(t) = text {
                    assertions.push(format!(
                        r#"    await expect(page.locator('{}')).toHaveText('{}');"#,
                        selector, t
                    ));
                }

                if let Some(ts) = texts {
                    let expected = serde_json::to_string(ts)
                        .unwrap_or_else(|_| "[]".to_string());
                    assertions.push(format!(
                        r#"    await expect(page.locator('{}')).toHaveText({});"#,
                        selector, expected
                    ));
                }

                if let Some(c) = count {
                    assertions.push(format!(
                        r#"    await expect(page.locator('{}')).toHaveCount({});"#,
                        selector, c
                    ));
                }

                assertions.join("\n")
            }
            TestStep::AlignCheck { selectors, .. } => {
                let selector_list = serde_json::to_string(selectors)
                    .unwrap_or_else(|_| "[]".to_string());
                format!(
                    r#"    {{
      const handles = [];
      for (const sel of {selector_list}) {{
        handles.push(...await page.$$(sel));
      }}
      const boxes = [];
      for (const handle of handles) {{
        const box = await handle.boundingBox();
        if (!box) {{
          throw new Error('align_check: element has no bounding box');
        }}
        boxes.push({{ x: box.x, y: box.y, width: box.width, height: box.height }});
      }}
      console.log('{ALIGN_MARKER}' + JSON.stringify({{ step: {step_index}, boxes }}));
    }}"#
                )
            }
            TestStep::Screenshot { name, full_page } => {
                let screenshot_path = self.screenshot_dir.join(format!("{}.png", name));
                let path_str = screenshot_path.to_string_lossy();
                format!(
                    r#"    await page.screenshot({{ path: '{}', fullPage: {} }});"#,
                    path_str, full_page
                )
            }
            TestStep::Log { message } => {
                format!(r#"    console.log('[TEST] {}');"#, message.replace('\'', "\\'"))
            }
        }
    }

    /// Execute a spec's steps as one script run
    pub async fn run(&self, steps: &[TestStep]) -> E2eResult<RunOutput> {
        let script = self.build_script(steps);

        // Write script to temp file
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("test.js");
        std::fs::write(&script_path, &script)?;

        debug!("Running Playwright script: {}", script_path.display());

        // Run with node
        let output = TokioCommand::new("node")
            .arg(&script_path)
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            // The catch block prints a structured failure on its last line.
            if let Some(failure) = stderr
                .lines()
                .rev()
                .find_map(|line| serde_json::from_str::<ScriptFailure>(line).ok())
            {
                return Err(E2eError::StepFailed {
                    step: failure.step.unwrap_or_else(|| "unknown".to_string()),
                    reason: failure.error.unwrap_or_else(|| "unknown".to_string()),
                });
            }
            return Err(E2eError::Playwright(format!(
                "Script failed:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )));
        }

        let mut align_reports = Vec::new();
        for line in stdout.lines() {
            if let Some(json) = line.trim().strip_prefix(ALIGN_MARKER) {
                align_reports.push(serde_json::from_str(json)?);
            }
        }

        Ok(RunOutput { align_reports })
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub screenshot_dir: PathBuf,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub browser: Browser,
    pub headless: bool,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
        }
    }
}
