//! Terminal styling helpers
//!
//! Colors are always emitted; `anstream` strips them when the output stream
//! does not support them.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used in summaries
pub const CHECK: &str = "✓";
/// Cross used in summaries
pub const CROSS: &str = "✗";

/// Semantic styles for CLI output
pub trait Stylize {
    /// Bold
    fn emphasis(&self) -> String;
    /// Dimmed secondary text
    fn muted(&self) -> String;
    /// Highlighted values (numbers, names)
    fn accent(&self) -> String;
    /// Success
    fn success(&self) -> String;
    /// Warnings
    fn warn(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }

    fn warn(&self) -> String {
        self.yellow().to_string()
    }
}
