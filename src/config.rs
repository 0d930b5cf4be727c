use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::Path;

/// Plugin id -> description of the pipeline that produced records with that id.
pub type PipelineMetadata = HashMap<String, PluginInfo>;

/// What is known about one ingestion plugin. Every field is optional; a
/// non-string value in the source document is treated as missing.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PluginInfo {
    #[serde(default, rename = "type", deserialize_with = "string_or_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub version: Option<String>,
}

impl PluginInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Parse a metadata table from a JSON document of the form
/// `{"<plugin_id>": {"type": "..", "name": "..", "version": ".."}}`.
///
/// Entries that are not objects are skipped.
pub fn parse_pipelines(json: &str) -> Result<PipelineMetadata> {
    let raw: HashMap<String, serde_json::Value> =
        serde_json::from_str(json).context("pipeline metadata must be a JSON object")?;

    let mut table = PipelineMetadata::with_capacity(raw.len());
    for (id, entry) in raw {
        if !entry.is_object() {
            tracing::warn!(plugin_id = %id, "ignoring pipeline entry that is not an object");
            continue;
        }
        let info = PluginInfo::deserialize(entry)
            .with_context(|| format!("invalid pipeline entry for plugin {id}"))?;
        table.insert(id, info);
    }
    Ok(table)
}

pub fn load_pipelines(path: &Path) -> Result<PipelineMetadata> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading pipeline metadata from {}", path.display()))?;
    let table = parse_pipelines(&json)?;
    tracing::info!(path = %path.display(), plugins = table.len(), "loaded pipeline metadata");
    Ok(table)
}
