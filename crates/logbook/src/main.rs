mod check;
mod cli;
mod init;
mod input;
mod render;
mod transform;
mod types;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = match resolve_root(cli.root) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to get current directory: {e}");
            return ExitCode::from(1);
        }
    };

    match cli.command {
        Commands::Init => match init::init_at_root(&root) {
            Ok(report) => {
                println!("Initialized Logbook at {}", report.root.display());
                let dir = report.root.join(logbook_core::CONFIG_DIR);
                if report.created_dir {
                    println!("  created: {}", dir.display());
                }
                if report.created_config {
                    println!("  created: {}", dir.join(logbook_core::CONFIG_FILE).display());
                }
                for path in &report.created_templates {
                    println!("  created: {}", path.display());
                }
            }
            Err(e) => {
                eprintln!("init error: {e}");
                return ExitCode::from(1);
            }
        },
        Commands::Types(args) => {
            if let Err(e) = types::run(&root, &args) {
                eprintln!("Failed to list commit types: {e}");
                return ExitCode::from(1);
            }
        }
        Commands::Transform(args) => {
            if let Err(e) = transform::run(&root, &args) {
                eprintln!("Failed to transform commits: {e}");
                return ExitCode::from(1);
            }
        }
        Commands::Render(args) => {
            if let Err(e) = render::run(&root, &args) {
                eprintln!("Failed to render changelog: {e}");
                return ExitCode::from(1);
            }
        }
        Commands::Check => {
            if let Err(e) = check::run(&root) {
                eprintln!("Configuration check failed: {e}");
                return ExitCode::from(1);
            }
        }
    }
    ExitCode::SUCCESS
}

/// Logs go to stderr so stdout stays clean for JSON and Markdown output.
/// `LOGBOOK_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("LOGBOOK_LOG")
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}

fn resolve_root(root: Option<PathBuf>) -> std::io::Result<PathBuf> {
    match root {
        Some(dir) => Ok(dir),
        None => std::env::current_dir(),
    }
}
