use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use notification_routes::config::load_or_default;
use notification_routes::http::echo_handlers;
use notification_routes::notifications::build_route_table;

#[derive(Parser)]
#[command(name = "routes-cli")]
#[command(about = "Inspect the notification route table", long_about = None)]
struct Cli {
    /// Config file to read routes from. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in match order
    Routes,
    /// Show which route a path resolves to
    Resolve {
        path: String,
    },
    /// Build the path for a route name
    UrlFor {
        name: String,
        /// Extra parameters as key=value
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    let table = build_route_table(&config, &echo_handlers())?;

    let output = match cli.command {
        Commands::Routes => {
            let routes: Vec<_> = table
                .routes()
                .map(|r| json!({ "name": r.name, "pattern": r.pattern.to_string() }))
                .collect();
            json!({ "mount": table.mount(), "routes": routes })
        }
        Commands::Resolve { path } => match table.resolve(&path) {
            Ok(m) => json!({
                "path": path,
                "route": m.route.name,
                "pattern": m.route.pattern.to_string(),
                "remaining_path": m.remaining_path,
            }),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::UrlFor { name, params } => {
            let params: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            json!({ "name": name, "path": table.url_for(&name, &params)? })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
