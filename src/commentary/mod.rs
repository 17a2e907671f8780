//! Optional qualitative commentary on a finished report.
//!
//! The deterministic scoring core never depends on this module: the prompt
//! is built from the completed report, and the API call (feature `ai`) is a
//! side effect that happens strictly after analysis.

mod gemini;
mod prompt;

pub use gemini::{is_ai_available, GeminiClient, GeminiError};
pub use prompt::CommentaryPrompt;
