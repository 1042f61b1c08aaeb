//! Tool listing presentation: table text and json.

use crate::catalog::OperationDescriptor;
use crate::error::ServiceError;
use comfy_table::Table;
use serde_json::{json, Value};

pub fn format_catalog_text(tools: &[OperationDescriptor]) -> String {
    if tools.is_empty() {
        return "No tools available.\n\nConfigured mode needs [endpoints.products], \
                [endpoints.customers] or [endpoints.reset]."
            .to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Tool", "Arguments", "Description"]);
    for tool in tools {
        table.add_row(vec![
            tool.name.clone(),
            argument_summary(&tool.input_schema),
            tool.description.clone(),
        ]);
    }
    format!("{}\n\nTotal: {} tool(s)", table, tools.len())
}

pub fn format_catalog_json(tools: &[OperationDescriptor]) -> Result<String, ServiceError> {
    let out = json!({ "tools": tools, "total": tools.len() });
    Ok(serde_json::to_string_pretty(&out)?)
}

/// `count: number, category?: string` from a JSON schema's properties.
fn argument_summary(schema: &Value) -> String {
    let required: Vec<&str> = schema["required"]
        .as_array()
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let Some(properties) = schema["properties"].as_object() else {
        return "-".to_string();
    };
    let args: Vec<String> = properties
        .iter()
        .map(|(name, prop)| {
            let marker = if required.contains(&name.as_str()) { "" } else { "?" };
            let ty = prop["type"].as_str().unwrap_or("any");
            format!("{}{}: {}", name, marker, ty)
        })
        .collect();
    if args.is_empty() {
        "-".to_string()
    } else {
        args.join(", ")
    }
}
