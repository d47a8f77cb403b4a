//! Embedded static assets

/// Look up an embedded asset by path (relative, no leading slash).
///
/// Returns the content type and body, or `None` for unknown paths.
pub fn lookup(path: &str) -> Option<(&'static str, &'static str)> {
    match path {
        "main.js" => Some((guess_content_type(path), MAIN_JS)),
        "style.css" => Some((guess_content_type(path), STYLE_CSS)),
        _ => None,
    }
}

fn guess_content_type(path: &str) -> &'static str {
    if path.ends_with(".js") {
        "application/javascript"
    } else if path.ends_with(".css") {
        "text/css"
    } else if path.ends_with(".html") {
        "text/html"
    } else {
        "application/octet-stream"
    }
}

/// Thin DOM adapter. All rotation logic lives server-side; this script only
/// forwards clicks and syncs box text from the response, in positional order.
const MAIN_JS: &str = r#"
document.addEventListener('DOMContentLoaded', () => {
  const leftButton = document.querySelector('.left-shift-button');
  const rightButton = document.querySelector('.right-shift-button');
  const boxes = document.querySelectorAll('.box');

  // The page is malformed without its controls; refuse to bind anything.
  if (!leftButton || !rightButton || boxes.length === 0) {
    throw new Error('boxrow: shift buttons or boxes missing at bind time');
  }

  const rotate = async (direction) => {
    const resp = await fetch(`/api/rotate/${direction}`, { method: 'POST' });
    if (!resp.ok) {
      throw new Error(`boxrow: rotate ${direction} failed with ${resp.status}`);
    }
    const body = await resp.json();
    boxes.forEach((box, i) => {
      box.textContent = body.cells[i];
    });
  };

  leftButton.addEventListener('click', () => rotate('left'));
  rightButton.addEventListener('click', () => rotate('right'));
});
"#;

const STYLE_CSS: &str = r#"
body {
  font-family: sans-serif;
  margin: 2rem;
}

.row {
  display: flex;
  align-items: center;
  gap: 0.5rem;
}

.box {
  width: 3rem;
  height: 3rem;
  display: flex;
  align-items: center;
  justify-content: center;
  border: 1px solid #333;
  border-radius: 4px;
}

button {
  height: 2rem;
  padding: 0 0.75rem;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_assets_resolve() {
        let (ct, body) = lookup("main.js").unwrap();
        assert_eq!(ct, "application/javascript");
        assert!(body.contains("left-shift-button"));

        let (ct, body) = lookup("style.css").unwrap();
        assert_eq!(ct, "text/css");
        assert!(body.contains("align-items: center"));
    }

    #[test]
    fn test_unknown_asset_is_none() {
        assert!(lookup("nope.js").is_none());
        assert!(lookup("../main.js").is_none());
    }
}
