use std::path::Path;
use std::process;

use layout_expr_core::layout::{
    external_expression, item_id, layout_items, properties_with_expression,
};
use layout_expr_core::{flatten, ExpressionProperty};
use serde_json::{json, Value};
use tracing::debug;

use super::read_json_or_exit;
use crate::{print_json, report_error, OutputFormat};

/// One expression found on a layout item.
struct Finding<'a> {
    id: &'a str,
    property: ExpressionProperty,
    expression: &'a Value,
    complex_reason: Option<String>,
}

/// List expression-bearing properties of every layout item.
///
/// An empty `properties` filter reports every property.
pub(crate) fn cmd_inspect(
    layout: &Path,
    properties: &[ExpressionProperty],
    fail_on_complex: bool,
    pretty: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let document = read_json_or_exit(layout, output, quiet);
    let items = layout_items(&document);
    debug!(items = items.len(), "inspecting layout");

    let mut findings = Vec::new();
    for item in items {
        let id = item_id(item).unwrap_or("<no id>");
        for property in properties_with_expression(item) {
            if !properties.is_empty() && !properties.contains(&property) {
                continue;
            }
            let Some(expression) = external_expression(item, property) else {
                continue;
            };
            findings.push(Finding {
                id,
                property,
                expression,
                complex_reason: flatten(expression).err().map(|e| e.to_string()),
            });
        }
    }

    let complex = findings
        .iter()
        .filter(|f| f.complex_reason.is_some())
        .count();

    match output {
        OutputFormat::Text => {
            for f in &findings {
                match &f.complex_reason {
                    None => println!("{} {}: structured", f.id, f.property),
                    Some(reason) => println!("{} {}: complex ({})", f.id, f.property, reason),
                }
            }
            if !quiet {
                println!("{} expression(s), {} complex", findings.len(), complex);
            }
        }
        OutputFormat::Json => {
            let entries: Vec<Value> = findings
                .iter()
                .map(|f| {
                    json!({
                        "id": f.id,
                        "property": f.property,
                        "friendly": f.complex_reason.is_none(),
                        "reason": f.complex_reason,
                        "expression": f.expression,
                    })
                })
                .collect();
            let summary = json!({
                "expressions": entries,
                "total": findings.len(),
                "complex": complex,
            });
            print_json(&summary, pretty);
        }
    }

    if fail_on_complex && complex > 0 {
        let msg = format!("{} complex expression(s) found", complex);
        report_error(&msg, output, quiet);
        process::exit(1);
    }
}
