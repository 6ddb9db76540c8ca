use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(
    name = "winrelay",
    version,
    about = "Relays window geometry, title, and transparency requests to a launched application's window"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the default configuration file
    Init,
    /// Control a window and serve requests until stopped
    Run(RunArgs),
    /// Stop the running host (the window is restored first)
    Stop,
    /// Show whether the host is running and what it controls
    Status,
    /// Relay one window message to the running host
    Send(SendArgs),
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
}

#[derive(Subcommand)]
pub enum DebugCommands {
    /// List visible top-level windows and their titles
    List,
}

/// Arguments for `run`. Flags override `config.toml`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Exact title of the window to control
    #[arg(long)]
    pub title: Option<String>,
    /// Allow SetWindow (move and resize)
    #[arg(long)]
    pub allow_move: bool,
    /// Allow SetWindowTitle
    #[arg(long)]
    pub allow_title: bool,
}

/// Arguments for `send`.
#[derive(Args, Debug)]
pub struct SendArgs {
    /// Command name, e.g. SetWindow or RestoreWindowState
    pub command: String,
    /// JSON payload, e.g. '{"x":100,"y":50}'
    #[arg(long, value_parser = parse_json)]
    pub data: Option<Value>,
}

fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {e}"))
}
