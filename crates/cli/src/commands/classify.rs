use std::path::Path;

use layout_expr_core::flatten;
use serde_json::json;

use super::read_json_or_exit;
use crate::OutputFormat;

pub(crate) fn cmd_classify(file: &Path, output: OutputFormat, quiet: bool) {
    let wire = read_json_or_exit(file, output, quiet);
    let result = flatten(&wire);

    match output {
        OutputFormat::Text => match &result {
            Ok(flat) => println!("structured ({} condition(s))", flat.sub_expressions.len()),
            Err(reason) => println!("complex: {}", reason),
        },
        OutputFormat::Json => {
            let report = match &result {
                Ok(flat) => json!({
                    "friendly": true,
                    "conditions": flat.sub_expressions.len(),
                }),
                Err(reason) => json!({
                    "friendly": false,
                    "reason": reason.to_string(),
                }),
            };
            println!("{}", report);
        }
    }
}
