//! Report output: colored console summary and machine-readable JSON.

mod console;
mod json;

pub use console::ConsoleReporter;
pub use json::JsonReporter;
