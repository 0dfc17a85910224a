//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// polychat - terminal multi-AI chat
///
/// Opens a full-screen chat interface that sends each message to one or
/// several AI models at once. Per-model API keys and enablement flags are
/// stored under `.polychat/` in the base directory.
#[derive(Parser, Debug)]
#[command(name = "polychat", version, about, long_about = None)]
pub struct Args {
    /// Base directory for settings storage (defaults to the current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}
