use std::path::Path;
use std::process;

use layout_expr_core::{commit, InternalExpression};
use tracing::debug;

use super::read_json_or_exit;
use crate::{print_json, report_error, OutputFormat};

/// Print the wire form of an editor model. Exits 1 when the model is not
/// complete enough to save.
pub(crate) fn cmd_render(file: &Path, pretty: bool, output: OutputFormat, quiet: bool) {
    let value = read_json_or_exit(file, output, quiet);
    let expr: InternalExpression = match serde_json::from_value(value) {
        Ok(expr) => expr,
        Err(e) => {
            let msg = format!("invalid expression model in '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match commit(&expr) {
        Ok(wire) => {
            debug!(property = %expr.property, "rendered expression");
            print_json(&wire, pretty);
        }
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    }
}
