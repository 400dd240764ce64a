//! Terminal assistant that streams chat replies from hosted or local models.
//!
//! # Usage
//!
//! ```bash
//! # Free-form conversation
//! courier chat how do I exit vim
//!
//! # Translate text
//! courier dic "ownership and borrowing"
//!
//! # Prompt from a pipe
//! git diff | courier chat summarize this change
//! ```
//!
//! The prompt comes from the positional arguments when stdin is a terminal,
//! otherwise from stdin with trailing whitespace trimmed. With internet
//! access and a `COURIER_API_KEY`, requests go to the hosted API; in every
//! other case they go to the local model daemon.

use std::io::{IsTerminal, Read};

use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use courier::{Config, Dispatcher, PlainTextRenderer, Renderer, translation_prompt};

/// Command-line arguments for the courier tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
struct Args {
    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    no_color: bool,
}

/// Main entry point for the courier command-line tool.
#[tokio::main]
async fn main() {
    let (args, free) = Args::from_command_line_relaxed("courier [OPTIONS] <chat|dic> [TEXT...]");
    let mut renderer = PlainTextRenderer::with_color(!args.no_color);

    let Some(command) = free.first() else {
        eprintln!("error: expected a subcommand: chat or dic");
        std::process::exit(1);
    };

    let text = if std::io::stdin().is_terminal() {
        free[1..].join(" ")
    } else {
        let mut piped = String::new();
        if let Err(err) = std::io::stdin().read_to_string(&mut piped) {
            eprintln!("error: could not read stdin: {err}");
            std::process::exit(1);
        }
        piped.trim_end().to_string()
    };

    if text.is_empty() {
        eprintln!("error: no input text provided");
        std::process::exit(1);
    }

    let prompt = match command.as_str() {
        "chat" => text,
        "dic" => translation_prompt(&text),
        other => {
            eprintln!("error: unknown subcommand {other:?}: expected chat or dic");
            std::process::exit(1);
        }
    };

    let config = Config::from_env();
    let dispatcher = Dispatcher::new(&config);
    if let Err(err) = dispatcher.dispatch(&prompt, &mut renderer).await {
        renderer.print_error(&err.to_string());
        std::process::exit(1);
    }
}
