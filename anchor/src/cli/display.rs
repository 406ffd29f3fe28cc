// src/cli/display.rs

use crate::util::path::abbreviate_home;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

/// One `name: path` line per anchor, home abbreviated, default marked with a trailing `*`.
pub fn format_anchor_lines(
    anchors: &BTreeMap<String, String>,
    default: Option<&str>,
    home: Option<&Path>,
) -> Vec<String> {
    anchors
        .iter()
        .map(|(name, path)| {
            let marker = if default == Some(path.as_str()) { " *" } else { "" };
            format!("{}: {}{}", name, abbreviate_home(path, home), marker)
        })
        .collect()
}

pub fn write_anchor_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_anchors_when_formatted_then_sorted_abbreviated_and_marked() {
        let anchors = BTreeMap::from([
            ("web".to_string(), "/home/u/web".to_string()),
            ("etc".to_string(), "/etc".to_string()),
        ]);

        let lines = format_anchor_lines(&anchors, Some("/etc"), Some(Path::new("/home/u")));

        assert_eq!(lines, vec!["etc: /etc *", "web: ~/web"]);
    }

    #[test]
    fn given_lines_when_written_then_newline_terminated() {
        let mut buffer = Vec::new();
        write_anchor_lines(&mut buffer, &["a: /a".to_string(), "b: /b".to_string()]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "a: /a\nb: /b\n");
    }
}
