//! relay-client: the editor-side invoker for the prompt relay.
//!
//! Packages a prompt into a POST to the relay's `/api` endpoint, extracts the
//! generated text from the provider's nested response shape, and parses the
//! model's output as JSON on a best-effort basis. Parse failures never reach
//! the caller as errors; they degrade to raw-text display.

pub mod diagnostic;
pub mod invoker;
pub mod prompt;

pub use diagnostic::{Diagnostic, parse_diagnostic, tolerant_parse};
pub use invoker::{InvokeError, RelayClient, extract_text};
pub use prompt::analysis_prompt;
