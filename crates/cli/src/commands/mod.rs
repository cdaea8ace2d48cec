mod classify;
mod inspect;
mod parse;
mod render;

pub(crate) use classify::cmd_classify;
pub(crate) use inspect::cmd_inspect;
pub(crate) use parse::cmd_parse;
pub(crate) use render::cmd_render;

use std::path::Path;
use std::process;

use crate::{report_error, OutputFormat};

/// Read a JSON file, or report the failure and exit with status 1.
pub(crate) fn read_json_or_exit(
    path: &Path,
    output: OutputFormat,
    quiet: bool,
) -> serde_json::Value {
    let src = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match serde_json::from_str(&src) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}
