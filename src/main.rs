//! view-router command line.
//!
//! Resolves navigation paths against the configured (or built-in) route
//! table and prints the results as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use view_router::config::{load_config, ConfigError, RouterConfig};
use view_router::history::{normalize_base, strip_base};
use view_router::lifecycle::{build_registry, build_resolver};
use view_router::observability::logging::init_logging;
use view_router::RouteResolver;

#[derive(Parser)]
#[command(name = "view-router")]
#[command(about = "Resolve navigation paths against the application route table", long_about = None)]
struct Cli {
    /// Route configuration file (TOML). Uses the built-in table when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve paths and load their views
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print the first matching route without following redirects
        #[arg(long)]
        no_follow: bool,
    },
    /// List the route table
    Routes,
    /// Validate the configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                report_config_error(&e);
                return Ok(ExitCode::FAILURE);
            }
        },
        None => RouterConfig::default(),
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.observability.log_level.clone());
    init_logging(&level);

    let resolver = match build_resolver(&config, build_registry(&config)) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    match cli.command {
        Commands::Resolve { paths, no_follow } => {
            let base = normalize_base(&config.base_path);
            let mut failed = false;
            for raw in &paths {
                // Accept external URLs served under the base path
                let path = strip_base(&base, raw).unwrap_or_else(|| raw.clone());
                let result = if no_follow {
                    match_once(&resolver, &path)
                } else {
                    resolve_path(&resolver, &path).await
                };
                if result.get("error").is_some() {
                    failed = true;
                }
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            if failed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Routes => {
            let routes: Vec<_> = resolver.table().routes().iter().map(|r| r.as_ref()).collect();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::Check => {
            println!(
                "Configuration OK: {} routes, base path '{}'",
                resolver.table().len(),
                config.base_path
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn resolve_path(resolver: &RouteResolver, path: &str) -> Value {
    match resolver.resolve_and_load(path).await {
        Ok((route, view)) => json!({ "request": path, "resolved": route, "view": view }),
        Err(e) => json!({ "request": path, "error": e.to_string() }),
    }
}

fn match_once(resolver: &RouteResolver, path: &str) -> Value {
    let matched = match resolver.match_path(path) {
        Ok(matched) => matched,
        Err(e) => return json!({ "request": path, "error": e.to_string() }),
    };
    let redirect = match matched.redirect_path() {
        Some(Ok(to)) => Some(to),
        Some(Err(e)) => return json!({ "request": path, "error": e.to_string() }),
        None => None,
    };
    json!({
        "request": path,
        "route": matched.route.as_ref(),
        "params": matched.params,
        "redirect": redirect,
    })
}

fn report_config_error(e: &ConfigError) {
    match e {
        ConfigError::Validation(errors) => {
            eprintln!("Configuration invalid:");
            for err in errors {
                eprintln!("  - {}", err);
            }
        }
        other => eprintln!("Error: {}", other),
    }
}
