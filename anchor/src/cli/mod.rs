// anchor/src/cli/mod.rs
use crate::application::services::factory::create_anchor_service;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use clap::CommandFactory;
use std::io;

pub mod anchor_commands;
pub mod args;
pub mod completion;
pub mod display;
pub mod error;
pub mod fzf;
pub mod shell_init;

pub fn execute_command(cli: Cli, settings: &Settings) -> CliResult<()> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let service = create_anchor_service(settings);
    let service = service.as_ref();
    let mut stdout = io::stdout();
    match command {
        Commands::Down { name } => {
            anchor_commands::down(service, name.as_deref(), anchor_commands::working_directory)
                .map(|_| ())
        }
        Commands::Up => anchor_commands::up(service),
        Commands::Go { name, fuzzy } => {
            anchor_commands::go(service, settings, name.as_deref(), fuzzy, &mut stdout).map(|_| ())
        }
        Commands::Save { name } => {
            let cwd = anchor_commands::working_directory()?;
            anchor_commands::save(service, &name, &cwd)
        }
        Commands::Remove { name } => anchor_commands::remove(service, &name),
        Commands::List {
            non_interactive,
            is_json,
        } => anchor_commands::list(service, settings, non_interactive, is_json, &mut stdout),
        Commands::Get => anchor_commands::get(service, &mut stdout),
        Commands::Names => anchor_commands::names(service, &mut stdout),
        Commands::Completion { shell } => handle_completion(&shell),
        Commands::Init { shell } => {
            print!("{}", shell_init::render_init(&shell)?);
            Ok(())
        }
    }
}

fn handle_completion(shell: &str) -> CliResult<()> {
    // Write a brief comment to stderr about what's being output
    match shell.to_lowercase().as_str() {
        "bash" => {
            eprintln!("# Outputting bash completion script for anchor");
            eprintln!("# To use, run one of:");
            eprintln!("# - eval \"$(anchor completion bash)\"                     # one-time use");
            eprintln!("# - anchor completion bash >> ~/.bashrc                    # add to bashrc");
            eprintln!("# For anchor name completion and cd, use 'anchor init bash' instead.");
            eprintln!("#");
        }
        "zsh" => {
            eprintln!("# Outputting zsh completion script for anchor");
            eprintln!("# To use, run one of:");
            eprintln!("# - eval \"$(anchor completion zsh)\"                      # one-time use");
            eprintln!("# - anchor completion zsh > ~/.zfunc/_anchor               # save to fpath directory");
            eprintln!("#");
        }
        "fish" => {
            eprintln!("# Outputting fish completion script for anchor");
            eprintln!("# - anchor completion fish | source                        # one-time use");
            eprintln!("# - anchor completion fish > ~/.config/fish/completions/anchor.fish");
            eprintln!("#");
        }
        _ => {}
    }

    completion::generate_completion(shell, &mut io::stdout()).map_err(|e| {
        CliError::InvalidInput(format!("Failed to generate completion script: {}", e))
    })
}
