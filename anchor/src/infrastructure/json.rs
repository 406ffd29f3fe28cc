// src/infrastructure/json.rs

use crate::domain::error::StoreResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Structure for serializing anchors to JSON output
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonAnchorView {
    pub name: String,
    pub path: String,
    /// true when this anchor's path is the current default
    pub is_default: bool,
}

impl JsonAnchorView {
    /// Views in name order
    pub fn from_anchors(anchors: &BTreeMap<String, String>, default: Option<&str>) -> Vec<Self> {
        anchors
            .iter()
            .map(|(name, path)| Self {
                name: name.clone(),
                path: path.clone(),
                is_default: default == Some(path.as_str()),
            })
            .collect()
    }
}

/// Writes anchors as pretty JSON to `out`.
/// Standard output is used for pipeable content without colors or formatting
pub fn write_anchors_as_json<W: Write>(out: &mut W, views: &[JsonAnchorView]) -> StoreResult<()> {
    serde_json::to_writer_pretty(&mut *out, views)?;
    writeln!(out).map_err(serde_json::Error::io)?;
    out.flush().map_err(serde_json::Error::io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_anchors_when_written_then_array_in_name_order() {
        let anchors = BTreeMap::from([
            ("web".to_string(), "/srv/web".to_string()),
            ("api".to_string(), "/srv/api".to_string()),
        ]);
        let views = JsonAnchorView::from_anchors(&anchors, Some("/srv/web"));

        let mut buffer = Vec::new();
        write_anchors_as_json(&mut buffer, &views).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["name"], "api");
        assert_eq!(value[0]["is_default"], false);
        assert_eq!(value[1]["path"], "/srv/web");
        assert_eq!(value[1]["is_default"], true);
    }

    #[test]
    fn given_no_anchors_when_written_then_empty_array() {
        let mut buffer = Vec::new();
        write_anchors_as_json(&mut buffer, &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().trim(), "[]");
    }
}
