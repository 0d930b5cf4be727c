use crate::config::PipelineMetadata;
use crate::record::{AttributeValue, LogRecord};

pub const PLUGIN_ID: &str = "plugin_id";
pub const PLUGIN_TYPE: &str = "plugin_type";
pub const PLUGIN_NAME: &str = "plugin_name";
pub const PLUGIN_VERSION: &str = "plugin_version";

/// Attach `plugin_type`, `plugin_name` and `plugin_version` attributes for the
/// record's `plugin_id`, using whatever the metadata table knows about it.
pub fn add_plugin_info(record: &mut LogRecord, pipelines: Option<&PipelineMetadata>) {
    let Some(pipelines) = pipelines.filter(|p| !p.is_empty()) else {
        return;
    };
    let Some(id) = record.attributes.get(PLUGIN_ID).and_then(AttributeValue::as_str) else {
        return;
    };
    let Some(info) = pipelines.get(id) else {
        tracing::trace!(plugin_id = id, "no pipeline metadata for plugin");
        return;
    };

    let enrichment = [
        (PLUGIN_TYPE, &info.kind),
        (PLUGIN_NAME, &info.name),
        (PLUGIN_VERSION, &info.version),
    ];
    for (key, value) in enrichment {
        if let Some(value) = value {
            record
                .attributes
                .insert(key.to_string(), AttributeValue::Str(value.clone()));
        }
    }
}
