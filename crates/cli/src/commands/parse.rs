use std::path::Path;
use std::process;

use layout_expr_core::{load_for_editing, ExpressionProperty};

use super::read_json_or_exit;
use crate::{print_json, report_error, OutputFormat};

pub(crate) fn cmd_parse(
    file: &Path,
    property: ExpressionProperty,
    pretty: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let wire = read_json_or_exit(file, output, quiet);
    let expr = load_for_editing(&wire, property);

    match serde_json::to_value(&expr) {
        Ok(model) => print_json(&model, pretty),
        Err(e) => {
            let msg = format!("internal error: failed to serialize expression: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}
