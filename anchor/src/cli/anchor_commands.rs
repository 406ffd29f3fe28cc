// src/cli/anchor_commands.rs
//! Command handlers. Paths, names and JSON go to `out` (stdout in the binary) so the shell
//! wrapper can capture them; human messages go to stderr.

use crate::application::services::anchor_service::AnchorService;
use crate::cli::display::{format_anchor_lines, write_anchor_lines};
use crate::cli::error::{CliError, CliResult, StoreContext};
use crate::cli::fzf::select_anchor;
use crate::config::Settings;
use crate::infrastructure::json::{write_anchors_as_json, JsonAnchorView};
use crate::util::path::{abbreviate_home, current_dir_string};
use crate::util::validation::validate_anchor_name;
use std::io::Write;
use tracing::{debug, instrument};

/// Sets the default anchor to a saved anchor's path, or to the working directory when no
/// name is given. An unknown name changes nothing.
#[instrument(skip(service, cwd))]
pub fn down<F>(service: &dyn AnchorService, name: Option<&str>, cwd: F) -> CliResult<String>
where
    F: FnOnce() -> CliResult<String>,
{
    let path = match name {
        Some(name) => service
            .get_bookmark_path(name)
            .action("Failed to look up saved anchor")?
            .ok_or_else(|| CliError::UnknownAnchor(name.to_string()))?,
        None => cwd()?,
    };

    service.set_default(&path).action("Failed to set anchor")?;
    eprintln!("⚓️ Anchored to {}", path);
    Ok(path)
}

#[instrument(skip(service))]
pub fn up(service: &dyn AnchorService) -> CliResult<()> {
    service.clear_default().action("Failed to lift anchor")?;
    eprintln!("⛵️ Anchor lifted");
    Ok(())
}

/// Prints the path to navigate to: picked interactively, by name, or the default.
/// Printing nothing is the normal "no match" outcome.
#[instrument(skip(service, settings, out))]
pub fn go<W: Write>(
    service: &dyn AnchorService,
    settings: &Settings,
    name: Option<&str>,
    fuzzy: bool,
    out: &mut W,
) -> CliResult<Option<String>> {
    let path = if fuzzy {
        let anchors = service
            .list_bookmarks()
            .action("Failed to read saved anchors")?;
        select_anchor(&anchors, &settings.fzf_opts)?.map(|(_, path)| path)
    } else if let Some(name) = name {
        service
            .get_bookmark_path(name)
            .action("Failed to look up saved anchor")?
    } else {
        service.get_default().action("Failed to read default anchor")?
    };

    match &path {
        Some(path) => writeln!(out, "{}", path)?,
        None => debug!("Nothing to navigate to"),
    }
    Ok(path)
}

#[instrument(skip(service))]
pub fn save(service: &dyn AnchorService, name: &str, cwd: &str) -> CliResult<()> {
    validate_anchor_name(name).map_err(CliError::InvalidInput)?;

    service.save_bookmark(name, cwd).action("Failed to save anchor")?;
    eprintln!(
        "📍 Anchor '{}' stashed at {}. Drop it with 'anchor down {}'.",
        name, cwd, name
    );
    Ok(())
}

#[instrument(skip(service))]
pub fn remove(service: &dyn AnchorService, name: &str) -> CliResult<()> {
    if service.remove_bookmark(name).action("Failed to remove anchor")? {
        eprintln!("⚓️ Anchor '{}' removed.", name);
    } else {
        eprintln!("No saved anchor named '{}', nothing removed.", name);
    }
    Ok(())
}

#[instrument(skip(service, settings, out))]
pub fn list<W: Write>(
    service: &dyn AnchorService,
    settings: &Settings,
    non_interactive: bool,
    is_json: bool,
    out: &mut W,
) -> CliResult<()> {
    let config = service.load().action("Failed to list saved anchors")?;
    // same precedence as `get` and `go`: the session value wins
    let default = service
        .get_default()
        .action("Failed to read default anchor")?;
    let default = default.as_deref();

    if is_json {
        let views = JsonAnchorView::from_anchors(&config.saved_anchors, default);
        return write_anchors_as_json(out, &views).action("Failed to write anchors");
    }

    if config.saved_anchors.is_empty() {
        eprintln!("No saved anchors. Stash one with 'anchor save <name>'.");
        return Ok(());
    }

    let home = dirs::home_dir();
    if non_interactive {
        let lines = format_anchor_lines(&config.saved_anchors, default, home.as_deref());
        write_anchor_lines(out, &lines)?;
        return Ok(());
    }

    if let Some((name, path)) = select_anchor(&config.saved_anchors, &settings.fzf_opts)? {
        writeln!(out, "⚓ {}: {}", name, abbreviate_home(&path, home.as_deref()))?;
    }
    Ok(())
}

#[instrument(skip(service, out))]
pub fn get<W: Write>(service: &dyn AnchorService, out: &mut W) -> CliResult<()> {
    if let Some(path) = service
        .get_default()
        .action("Failed to read current anchor")?
    {
        writeln!(out, "{}", path)?;
    }
    Ok(())
}

pub fn names<W: Write>(service: &dyn AnchorService, out: &mut W) -> CliResult<()> {
    let names = service
        .list_bookmark_names()
        .action("Failed to read saved anchors")?;
    write_anchor_lines(out, &names)?;
    Ok(())
}

/// The working directory for `save` and `down` without a name.
pub fn working_directory() -> CliResult<String> {
    current_dir_string().map_err(|e| CliError::from(e).context("Failed to get current directory"))
}
