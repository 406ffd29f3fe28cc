// src/cli/completion.rs
use crate::cli::args::Cli;
use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Fish, PowerShell, Zsh},
};
use std::io::{self, Write};
use tracing::{debug, instrument};

/// Generates the static completion script for `shell` (subcommands and flags).
///
/// Anchor names are completed dynamically by the `anchor init` integration, which calls
/// the hidden `anchor names` command.
///
/// ```bash
/// anchor completion bash > ~/.bash_completion.d/anchor
/// eval "$(anchor completion bash)"
/// ```
#[instrument(level = "debug", skip(out))]
pub fn generate_completion<W: Write>(shell: &str, out: &mut W) -> io::Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    match shell.to_lowercase().as_str() {
        "bash" => {
            debug!("Generating bash completion");
            generate(Bash, &mut cmd, bin_name, out);
        }
        "zsh" => {
            debug!("Generating zsh completion");
            generate(Zsh, &mut cmd, bin_name, out);
        }
        "fish" => {
            debug!("Generating fish completion");
            generate(Fish, &mut cmd, bin_name, out);
        }
        "powershell" => {
            debug!("Generating powershell completion");
            generate(PowerShell, &mut cmd, bin_name, out);
        }
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Unsupported shell: {}. Supported shells: bash, zsh, fish, powershell",
                    shell
                ),
            ))
        }
    }
    out.flush()
}
