//! Output rendering for streamed replies.
//!
//! Fragments are printed as they arrive to preserve the live-typing effect;
//! diagnostics go to stderr so the reply on stdout stays clean.

use std::io::{self, Write};

/// ANSI escape code for dim text (used for the reasoning channel).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Trait for rendering streaming output.
///
/// This abstraction keeps decoding and accumulation testable without
/// capturing console output; tests substitute a recording implementation.
pub trait Renderer: Send {
    /// Print a chunk of reply text.
    ///
    /// This is called incrementally as fragments are streamed from the
    /// backend and must not buffer.
    fn print_text(&mut self, text: &str);

    /// Print a chunk of reasoning text.
    ///
    /// Reasoning is display-only; it never becomes part of the reply.
    fn print_reasoning(&mut self, text: &str);

    /// Print an informational diagnostic. Must not write to stdout.
    fn print_info(&mut self, info: &str);

    /// Print an error message. Must not write to stdout.
    fn print_error(&mut self, error: &str);

    /// Called once after a reply's stream is exhausted.
    fn finish_reply(&mut self) {}
}

/// Renderer that writes fragments to stdout as they arrive.
pub struct PlainTextRenderer {
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a renderer with ANSI styling enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a renderer with ANSI styling controlled by the flag.
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_text(&mut self, text: &str) {
        print!("{text}");
        let _ = io::stdout().flush();
    }

    fn print_reasoning(&mut self, text: &str) {
        if self.use_color {
            print!("{ANSI_DIM}{text}{ANSI_RESET}");
        } else {
            print!("{text}");
        }
        let _ = io::stdout().flush();
    }

    fn print_info(&mut self, info: &str) {
        eprintln!("{info}");
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("error: {error}");
    }

    fn finish_reply(&mut self) {
        println!();
    }
}
