use clap::{Parser, Subcommand};

/// Save and restore game lobby settings in named slots.
#[derive(Parser, Debug)]
#[command(name = "memslot", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Use synthetic data instead of the host.
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the slot list.
    List,
    /// Rename a slot.
    Rename { index: usize, name: String },
    /// Capture the current game settings into a slot.
    Save { index: usize },
    /// Write a slot's settings back into the game.
    Load { index: usize },
    /// Open a URL in the browser.
    Open { url: String },
    /// Print the resource URL and the slot list.
    Init,
    /// Print process status changes.
    Watch {
        #[arg(long, default_value_t = 10)]
        seconds: u64,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
