use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use ginkgo_log_html::config::ConfigLoader;
use ginkgo_log_html::report::ResultFormatter;
use ginkgo_log_html::{Error, ReportBuilder};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Convert a Ginkgo text log into a self-contained HTML report.
#[derive(Parser, Debug)]
#[command(name = "ginkgo-log-html", version, about, long_about = None)]
struct Cli {
    /// Path to the test report log file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to the output HTML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write the parsed report as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Print one line per test case before the summary
    #[arg(long)]
    list: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let (Some(input), Some(output)) = (cli.input.clone(), cli.output.clone()) else {
        println!("Please provide both input and output file paths");
        println!("{}", Cli::command().render_usage());
        process::exit(1);
    };

    let filter_handle = init_logging(cli.verbose);

    let config = ConfigLoader::new()
        .maybe_config_file(cli.config.clone())
        .load()
        .unwrap_or_else(|e| {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        });

    if config.verbose && cli.verbose == 0 {
        if let Some(handle) = &filter_handle {
            if let Err(e) = handle.reload(EnvFilter::new(level_for(1))) {
                eprintln!("Failed to raise log level: {e}");
            }
        }
    }

    let list_cases = cli.list || config.output.list_cases;

    let mut builder = ReportBuilder::new()
        .with_config(config)
        .input(input)
        .output(&output);
    if let Some(json) = cli.json {
        builder = builder.json_output(json);
    }

    let report = builder.run().unwrap_or_else(|e| {
        report_error(&e);
        process::exit(1);
    });

    ResultFormatter::new(list_cases).report(&report, &output);
}

fn report_error(err: &Error) {
    if err.is_input() {
        eprintln!("Error opening file: {err}");
    } else {
        eprintln!("Error generating HTML report: {err}");
    }
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Log to stderr. `RUST_LOG` wins over the verbosity count.
///
/// The returned handle can raise the level once the config is known; it is
/// `None` when `RUST_LOG` is in charge or no subscriber could be installed.
fn init_logging(verbosity: u8) -> Option<FilterHandle> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(level_for(verbosity)), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false);

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {e}");
        return None;
    }

    (!from_env).then_some(handle)
}
