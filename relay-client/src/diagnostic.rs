//! Best-effort parsing of model output into a diagnostic report.
//!
//! The upstream model is asked, not guaranteed, to answer with a single JSON
//! object, so parsing is tolerant: strict parse first, then a fallback that
//! slices the substring between the first `{` and the last `}`. The slice is
//! defeated by unbalanced braces inside string literals or by multiple
//! objects in one response; in those cases the caller displays the raw text.

use serde::Deserialize;
use serde_json::Value;

/// Diagnostic report the model is prompted to produce. Any field may be
/// absent and defaults to empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Diagnostic {
    #[serde(default)]
    pub simulated_output: String,
    #[serde(default)]
    pub errors: String,
    #[serde(default)]
    pub diagnostic: String,
}

impl Diagnostic {
    /// Text for the output panel: simulated output, else errors, else a
    /// fixed placeholder.
    pub fn output_text(&self) -> &str {
        if !self.simulated_output.is_empty() {
            &self.simulated_output
        } else if !self.errors.is_empty() {
            &self.errors
        } else {
            "No simulated output."
        }
    }

    /// Text for the diagnostic panel.
    pub fn diagnostic_text(&self) -> &str {
        if self.diagnostic.is_empty() {
            "No diagnostic provided."
        } else {
            &self.diagnostic
        }
    }
}

/// Strict JSON parse, then the outermost-brace slice fallback. `None` when
/// both fail.
pub fn tolerant_parse(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }

    serde_json::from_str(&text[start..=end]).ok()
}

/// Parse model output into a [`Diagnostic`]. `None` means the text is not
/// structured and should be displayed raw.
pub fn parse_diagnostic(text: &str) -> Option<Diagnostic> {
    tolerant_parse(text).and_then(|value| serde_json::from_value(value).ok())
}
