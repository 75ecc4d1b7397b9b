use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use locale_redirector::config::{load_config, RedirectorConfig};
use locale_redirector::routing::{Router, RoutingDecision};

#[derive(Parser)]
#[command(name = "redirect-cli")]
#[command(about = "Offline tooling for the locale redirector", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "REDIRECTOR_CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the routing decision for one or more paths
    Check {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Load and validate the configuration
    Validate,
    /// Print the locale set and redirect table
    List,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Check { paths } => {
            let router = Router::from_config(&config);
            let decisions: Vec<Value> = paths
                .iter()
                .map(|path| decision_json(path, &router.route(path)))
                .collect();
            print_json(&Value::Array(decisions))?;
        }
        Commands::Validate => {
            println!(
                "OK: {} locales, {} redirects",
                config.site.locales.len(),
                config.redirects.entries.len()
            );
        }
        Commands::List => print_json(&listing(&config))?,
    }

    Ok(())
}

fn decision_json(path: &str, decision: &RoutingDecision) -> Value {
    match decision {
        RoutingDecision::RedirectTo { location, status, reason } => json!({
            "path": path,
            "decision": "redirect",
            "status": status.as_u16(),
            "location": location,
            "reason": reason.as_str(),
        }),
        RoutingDecision::PassThrough => json!({
            "path": path,
            "decision": "pass_through",
        }),
    }
}

fn listing(config: &RedirectorConfig) -> Value {
    let redirects: serde_json::Map<String, Value> = config
        .redirects
        .entries
        .sorted()
        .into_iter()
        .map(|(key, target)| (key.to_string(), Value::from(target)))
        .collect();

    json!({
        "canonical_host": config.site.canonical_host,
        "locales": config.site.locales,
        "redirects": redirects,
    })
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
