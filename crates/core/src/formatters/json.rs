use serde::Serialize;

use crate::Result;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Serialize any output value to a JSON string
pub fn convert_to_json<T: Serialize + ?Sized>(value: &T, config: &JsonConfig) -> Result<String> {
    let json = if config.pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    Ok(json)
}
