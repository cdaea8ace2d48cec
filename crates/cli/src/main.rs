mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use layout_expr_core::ExpressionProperty;
use tracing_subscriber::EnvFilter;

use commands::{cmd_classify, cmd_inspect, cmd_parse, cmd_render};
use config::{read_config, CliConfig};

/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "LAYOUT_EXPR_LOG";

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Layout condition expression toolkit.
#[derive(Parser)]
#[command(name = "layout-expr", version, about)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a wire expression into the editor model and print it as JSON
    Parse {
        /// Path to a JSON file holding the wire expression
        file: PathBuf,
        /// Layout property the expression belongs to
        #[arg(long, default_value = "hidden")]
        property: ExpressionProperty,
    },

    /// Render an editor model JSON file back to its wire expression
    Render {
        /// Path to a JSON file holding the editor model
        file: PathBuf,
    },

    /// Report whether a wire expression can be edited structurally
    Classify {
        /// Path to a JSON file holding the wire expression
        file: PathBuf,
    },

    /// List the expressions on every item of a form layout
    Inspect {
        /// Path to the layout JSON file
        layout: PathBuf,
        /// Only report these properties (repeatable)
        #[arg(long = "property")]
        properties: Vec<ExpressionProperty>,
        /// Exit with status 1 if any expression is complex
        #[arg(long)]
        fail_on_complex: bool,
    },
}

fn main() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match read_config(path) {
            Ok(config) => config,
            Err(e) => {
                report_error(&e, cli.output, cli.quiet);
                process::exit(1);
            }
        },
        None => CliConfig::default(),
    };
    let configured_properties = match config.inspect_properties() {
        Ok(properties) => properties,
        Err(errors) => {
            report_error(&errors.join("\n"), cli.output, cli.quiet);
            process::exit(1);
        }
    };
    let pretty = config.output.pretty;

    match cli.command {
        Commands::Parse { file, property } => {
            cmd_parse(&file, property, pretty, cli.output, cli.quiet);
        }
        Commands::Render { file } => {
            cmd_render(&file, pretty, cli.output, cli.quiet);
        }
        Commands::Classify { file } => {
            cmd_classify(&file, cli.output, cli.quiet);
        }
        Commands::Inspect {
            layout,
            properties,
            fail_on_complex,
        } => {
            let properties = if properties.is_empty() {
                configured_properties
            } else {
                properties
            };
            cmd_inspect(
                &layout,
                &properties,
                fail_on_complex || config.inspect.fail_on_complex,
                pretty,
                cli.output,
                cli.quiet,
            );
        }
    }
}

/// Print an error in the selected output format, unless quiet.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Print a JSON value to stdout.
pub(crate) fn print_json(value: &serde_json::Value, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("error serializing output: {}", e),
    }
}
