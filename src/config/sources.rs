use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Decodes every readable config file and merges their top-level keys into one
/// tree. Later files replace earlier ones key by key; nested mappings are not
/// merged. Files that are missing, unreadable, undecodable or not a mapping
/// contribute nothing.
pub fn load_tree<P: AsRef<Path>>(paths: &[P]) -> Value {
    let mut merged = Map::new();

    for path in paths {
        let path = path.as_ref();
        match load_config_file(path) {
            Ok(Value::Object(map)) => {
                tracing::debug!(path = %path.display(), keys = map.len(), "loaded config file");
                merged.extend(map);
            }
            Ok(_) => {
                tracing::debug!(path = %path.display(), "config file is not a mapping, skipping");
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %format!("{:#}", err), "skipping config file");
            }
        }
    }

    Value::Object(merged)
}

fn load_config_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")
        }
        _ => serde_json::from_str(&content).context("Failed to parse JSON config"),
    }
}
