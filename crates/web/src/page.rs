//! Server-side rendering of the box row page.
//!
//! The markup mirrors what the harness selects on: `button.left-shift-button`
//! and `button.right-shift-button` labeled `<<` / `>>`, and one `div.box`
//! per cell in left-to-right order. The flex row keeps every cell and both
//! buttons on the same vertical center.

use std::fmt::Write;

/// Render the full page for the given cell values, in positional order.
pub fn render(values: &[String]) -> String {
    let mut boxes = String::new();
    for (i, value) in values.iter().enumerate() {
        // box-N classes are 1-based to match visual position.
        let _ = write!(
            boxes,
            "      <div class=\"box box-{}\">{}</div>\n",
            i + 1,
            escape(value)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>BoxRow</title>
    <link rel="stylesheet" href="/assets/style.css">
  </head>
  <body>
    <div class="row">
      <button class="left-shift-button">&lt;&lt;</button>
{boxes}      <button class="right-shift-button">&gt;&gt;</button>
    </div>
    <script src="/assets/main.js"></script>
  </body>
</html>
"#
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
