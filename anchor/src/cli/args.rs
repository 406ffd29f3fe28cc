// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anchor", author, version, about, long_about = None)]
/// Drop anchors in directories and sail back to them from the shell
pub struct Cli {
    /// Sets a custom settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use this anchor store instead of the configured one
    #[arg(long, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[arg(long = "no-color", help = "disable colored output")]
    pub no_color: bool,

    #[arg(long = "generate-config", help = "print the default settings as TOML")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sets the current directory (or a saved anchor) as the default directory
    Down {
        /// saved anchor to use instead of the current directory
        name: Option<String>,
    },
    /// Unsets the default directory
    Up,
    /// Prints the path of the named anchor, or of the default anchor if none is given
    Go {
        name: Option<String>,
        #[arg(short = 'f', long = "fuzzy", help = "pick an anchor interactively")]
        fuzzy: bool,
    },
    /// Saves the current directory as NAME
    Save { name: String },
    /// Deletes the saved anchor NAME
    Remove { name: String },
    /// Lists saved anchors
    List {
        #[arg(long = "np", help = "no prompt, print name: path lines")]
        non_interactive: bool,

        #[arg(long = "json", help = "non-interactive mode, output as json")]
        is_json: bool,
    },
    /// Prints the path of the default anchor
    Get,
    /// Prints saved anchor names, one per line
    #[command(hide = true)]
    Names,
    /// Generates shell completion scripts (bash, zsh, fish, powershell)
    Completion {
        /// shell to generate completions for
        shell: String,
    },
    /// Prints the shell integration: a wrapper function that cds into anchors
    Init {
        /// bash, zsh or fish
        shell: String,
    },
}
