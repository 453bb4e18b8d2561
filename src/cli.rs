//! CLI definitions and entry point

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use slashfind::config::{DEFAULT_EXTENSIONS, ScanConfig};
use slashfind::decode::DecodePolicy;
use slashfind::output::OutputMode;
use slashfind::scanner::{ScanError, Scanner};

/// slashfind - Find forward slashes that may break CSS minifiers
#[derive(Parser, Debug)]
#[command(
    name = "slashfind",
    version,
    about = "Find potentially problematic forward slashes in CSS files",
    long_about = "Find potentially problematic forward slashes in CSS files.\n\n\
                  Aggressive scan: every line containing '/' is flagged unless it is\n\
                  obviously safe (url(), http(s):, data URIs, comments, calc(), SVG paths)."
)]
pub struct Cli {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// File extensions to scan (e.g., --extensions .css .scss)
    #[arg(long, num_args = 1.., default_values_t = DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect::<Vec<_>>())]
    pub extensions: Vec<String>,

    /// Include node_modules, .git, build, dist and .next (skipped by default)
    #[arg(long)]
    pub include_node_modules: bool,

    /// How to handle bytes that are not valid UTF-8: ignore, replace
    #[arg(long, default_value = "ignore")]
    pub decode: DecodePolicy,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Run the CLI
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let mut config = ScanConfig::default()
        .with_extensions(cli.extensions)
        .with_decode_policy(cli.decode);
    if cli.include_node_modules {
        config = config.include_excluded_dirs();
    }

    let scanner = match Scanner::new(&cli.directory, config) {
        Ok(scanner) => scanner,
        Err(err) => {
            report_invalid_root(&err, output_mode);
            return Ok(ExitCode::FAILURE);
        },
    };

    let mut reporter = output_mode.reporter(io::stdout().lock());
    let summary = scanner.run(reporter.as_mut())?;
    log::debug!("scan finished: {summary:?}");

    Ok(ExitCode::SUCCESS)
}

fn report_invalid_root(err: &ScanError, output_mode: OutputMode) {
    if output_mode == OutputMode::Json {
        println!(
            "{}",
            serde_json::json!({
                "error": err.to_string()
            })
        );
        return;
    }

    match err {
        ScanError::RootNotFound(path) => {
            println!("❌ Error: Directory '{}' does not exist!", path.display());
        },
        ScanError::NotADirectory(path) => {
            println!("❌ Error: '{}' is not a directory!", path.display());
        },
        ScanError::Output(_) => println!("❌ Error: {err}"),
    }
}
