use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "card-grader", version, about = "Grade model card pages and render the audit overlay")]
pub struct Cli {
    /// Config file (TOML). Missing files are ignored.
    #[arg(long, global = true, env = "CARD_GRADER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Grade a model card page the way a badge click would.
    Grade {
        /// Page URL; must be on the trusted host.
        url: String,
        /// Read the page markup from a file instead of fetching it.
        #[arg(long)]
        html: Option<PathBuf>,
        /// Write the rendered overlay HTML here.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Click once more after grading to open the detail panel.
        #[arg(long)]
        open_panel: bool,
        /// Also expand the full-text review in the opened panel.
        #[arg(long, requires = "open_panel")]
        expand_review: bool,
    },
    /// Run a local stand-in for the scoring service.
    DevBackend {
        #[arg(long)]
        port: Option<u16>,
        /// Serve a report derived from this filled review markdown.
        #[arg(long)]
        markdown: Option<PathBuf>,
        /// Canned response status (used when no markdown is given).
        #[arg(long, default_value_t = 200)]
        status: u16,
        /// Canned response body (used when no markdown is given).
        #[arg(long, default_value = "{\"score\": null, \"label\": null}")]
        body: String,
        /// Delay before answering canned responses, in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}
