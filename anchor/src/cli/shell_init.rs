// src/cli/shell_init.rs
//! Shell integration printed by `anchor init <shell>`.
//!
//! A child process cannot change its parent's working directory, so `anchor go` only prints
//! a path. The wrapper function defined here captures that output and `cd`s into it when it
//! is non-empty. It also completes anchor names by calling `anchor names`.

use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use clap::CommandFactory;

/// Subcommands whose first positional argument is an anchor name
const NAME_COMMANDS: &[&str] = &["go", "down", "remove"];

const BASH_INIT: &str = r#"# anchor shell integration (bash)
# eval "$(anchor init bash)"
anchor() {
    if [ "$1" = "go" ]; then
        local target
        target="$(command anchor "$@")" || return $?
        if [ -n "$target" ]; then
            cd -- "$target" || return $?
        fi
    else
        command anchor "$@"
    fi
}

_anchor_complete() {
    local cur="${COMP_WORDS[COMP_CWORD]}"
    COMPREPLY=()
    if [ "$COMP_CWORD" -eq 1 ]; then
        COMPREPLY=($(compgen -W "@SUBCOMMANDS@" -- "$cur"))
    elif [ "$COMP_CWORD" -eq 2 ]; then
        case "${COMP_WORDS[1]}" in
            @NAME_COMMANDS_BAR@)
                COMPREPLY=($(compgen -W "$(command anchor names 2>/dev/null)" -- "$cur"))
                ;;
        esac
    fi
}
complete -F _anchor_complete anchor
"#;

const ZSH_INIT: &str = r#"# anchor shell integration (zsh)
# eval "$(anchor init zsh)"
anchor() {
    if [[ "$1" == go ]]; then
        local target
        target="$(command anchor "$@")" || return $?
        if [[ -n "$target" ]]; then
            cd -- "$target" || return $?
        fi
    else
        command anchor "$@"
    fi
}

_anchor_complete() {
    if (( CURRENT == 2 )); then
        compadd -- @SUBCOMMANDS@
    elif (( CURRENT == 3 )) && [[ ${words[2]} == (@NAME_COMMANDS_BAR@) ]]; then
        compadd -- ${(f)"$(command anchor names 2>/dev/null)"}
    fi
}
(( $+functions[compdef] )) && compdef _anchor_complete anchor
"#;

const FISH_INIT: &str = r#"# anchor shell integration (fish)
# anchor init fish | source
function anchor
    if test "$argv[1]" = go
        set -l target (command anchor $argv)
        or return $status
        if test -n "$target"
            cd -- $target
        end
    else
        command anchor $argv
    end
end

complete -c anchor -f
complete -c anchor -n '__fish_use_subcommand' -a '@SUBCOMMANDS@'
complete -c anchor -n '__fish_seen_subcommand_from @NAME_COMMANDS_SPACE@' -a '(command anchor names 2>/dev/null)'
"#;

/// Visible subcommand names, in declaration order
fn visible_subcommands() -> Vec<String> {
    Cli::command()
        .get_subcommands()
        .filter(|sub| !sub.is_hide_set())
        .map(|sub| sub.get_name().to_string())
        .collect()
}

/// Renders the integration script for `shell` (bash, zsh or fish).
pub fn render_init(shell: &str) -> CliResult<String> {
    let template = match shell.to_lowercase().as_str() {
        "bash" => BASH_INIT,
        "zsh" => ZSH_INIT,
        "fish" => FISH_INIT,
        _ => {
            return Err(CliError::InvalidInput(format!(
                "Unsupported shell: {}. Supported shells: bash, zsh, fish",
                shell
            )))
        }
    };

    Ok(template
        .replace("@SUBCOMMANDS@", &visible_subcommands().join(" "))
        .replace("@NAME_COMMANDS_BAR@", &NAME_COMMANDS.join("|"))
        .replace("@NAME_COMMANDS_SPACE@", &NAME_COMMANDS.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_bash_when_render_then_wrapper_and_completion_defined() {
        let script = render_init("bash").unwrap();

        assert!(script.contains("anchor() {"));
        assert!(script.contains("command anchor names"));
        assert!(script.contains("complete -F _anchor_complete anchor"));
        assert!(script.contains("go|down|remove)"));
        assert!(!script.contains("@SUBCOMMANDS@"));
        assert!(script.contains("\"$@\""));
    }

    #[test]
    fn given_zsh_and_fish_when_render_then_placeholders_filled() {
        for shell in ["zsh", "Fish"] {
            let script = render_init(shell).unwrap();
            assert!(!script.contains("@SUBCOMMANDS@"), "{}", shell);
            assert!(!script.contains("@NAME_COMMANDS"), "{}", shell);
            assert!(script.contains("command anchor names"), "{}", shell);
        }
    }

    #[test]
    fn given_subcommands_when_listed_then_hidden_names_excluded() {
        let subcommands = visible_subcommands();

        assert!(subcommands.contains(&"go".to_string()));
        assert!(subcommands.contains(&"save".to_string()));
        assert!(!subcommands.contains(&"names".to_string()));
    }

    #[test]
    fn given_unknown_shell_when_render_then_invalid_input() {
        assert!(matches!(
            render_init("powershell"),
            Err(CliError::InvalidInput(_))
        ));
    }
}
