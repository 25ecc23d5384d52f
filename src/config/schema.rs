use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "server": {
                "type": "object",
                "properties": {
                    "host": { "type": "string", "minLength": 1 },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 }
                }
            },
            "database": {
                "type": "object",
                "properties": {
                    "path": { "type": "string", "minLength": 1 }
                }
            },
            "fetcher": {
                "type": "object",
                "properties": {
                    "url_template": { "type": "string" },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "scan": {
                "type": "object",
                "properties": {
                    "max_rounds": { "type": "integer", "minimum": 1 }
                }
            }
        }
    })
});
