// src/cli/fzf.rs

use crate::cli::error::{CliError, CliResult};
use crate::config::FzfOpts;
use crate::util::path::{abbreviate_home, list_children};
use skim::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, instrument};

pub const PROMPT: &str = "⚓️ > ";

#[derive(Debug, Clone)]
struct AnchorItem {
    name: String,
    path: String,
    display_text: String,
}

impl AnchorItem {
    fn new(name: &str, path: &str, home: Option<&Path>) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            display_text: format!("{} ⚓️ {}", name, abbreviate_home(path, home)),
        }
    }
}

impl SkimItem for AnchorItem {
    fn text(&self) -> Cow<str> {
        Cow::Borrowed(&self.display_text)
    }

    fn preview(&self, _context: PreviewContext) -> ItemPreview {
        ItemPreview::Text(render_preview(Path::new(&self.path)))
    }

    // the name is the key back into the anchor map
    fn output(&self) -> Cow<str> {
        Cow::Borrowed(&self.name)
    }
}

/// Immediate children of `dir`, directories first, then files, each sorted by name.
pub fn render_preview(dir: &Path) -> String {
    match list_children(dir) {
        Ok((directories, files)) => {
            let mut preview = String::new();
            for name in directories {
                preview.push_str(&format!("📁  {}/\n", name));
            }
            for name in files {
                preview.push_str(&format!("📄  {}\n", name));
            }
            preview
        }
        Err(e) => {
            debug!("Cannot preview {}: {}", dir.display(), e);
            "Error reading directory".to_string()
        }
    }
}

/// Lets the user pick one anchor. Returns `(name, path)`, or `None` on abort or empty input.
#[instrument(skip(anchors, opts), level = "debug")]
pub fn select_anchor(
    anchors: &BTreeMap<String, String>,
    opts: &FzfOpts,
) -> CliResult<Option<(String, String)>> {
    if anchors.is_empty() {
        debug!("No anchors to pick from");
        return Ok(None);
    }

    let mut options_builder = SkimOptionsBuilder::default();
    options_builder
        .height(Some(opts.height.as_str()))
        .reverse(opts.reverse)
        .multi(false)
        .prompt(Some(PROMPT));
    if opts.preview {
        options_builder
            .preview(Some(""))
            .preview_window(Some("right:50%:wrap"));
    }
    let options = options_builder.build().map_err(|e| {
        CliError::CommandFailed(format!("Failed to build picker options: {}", e))
    })?;

    let (tx_item, rx_item): (SkimItemSender, SkimItemReceiver) = unbounded();
    let home = dirs::home_dir();
    for (name, path) in anchors {
        tx_item
            .send(Arc::new(AnchorItem::new(name, path, home.as_deref())))
            .map_err(|_| CliError::CommandFailed("Failed to send anchor to picker".to_string()))?;
    }
    drop(tx_item); // Close channel to signal end of items

    let Some(output) = Skim::run_with(&options, Some(rx_item)) else {
        return Ok(None);
    };
    if output.is_abort {
        debug!("Selection aborted");
        return Ok(None);
    }

    let selected = output.selected_items.first().and_then(|item| {
        let name = item.output().into_owned();
        anchors.get(&name).map(|path| (name, path.clone()))
    });
    debug!("Selected anchor: {:?}", selected);
    Ok(selected)
}
