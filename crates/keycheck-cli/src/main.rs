use std::io::{self, BufRead};

use clap::{Parser, Subcommand};
use keycheck_cli::config::{Config, parse_hint};
use keycheck_cli::{logging, server};
use keycheck_registry::{KeyProvider, ProviderHint, Registry};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "keycheck", version, about = "Check AI-provider API keys")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    config: Config,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default).
    Serve,
    /// Validate keys given as arguments, or one per line on stdin.
    Check {
        /// Provider to validate against (`auto` detects it from the key).
        #[arg(long, short, default_value = "auto")]
        provider: String,

        keys: Vec<String>,
    },
    /// List known providers and their validation endpoints.
    Providers,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init_tracing();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(&cli.config).await,
        Command::Check { provider, keys } => run_check(&cli.config, &provider, keys).await,
        Command::Providers => {
            let registry = Registry::new(&cli.config.endpoints())?;
            print_providers(&registry);
            Ok(())
        }
    }
}

async fn run_server(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let batch = config.build()?;
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    server::serve(listener, batch, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        info!("shutting down");
    })
    .await?;
    Ok(())
}

async fn run_check(
    config: &Config,
    provider: &str,
    keys: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let hint: ProviderHint = parse_hint(provider)?;
    let keys = if keys.is_empty() {
        read_keys(io::stdin().lock())?
    } else {
        keys
    };

    let batch = config.build()?;
    let results = batch.validate_batch(keys, hint).await;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// One key per line; blank lines are skipped.
fn read_keys(input: impl BufRead) -> io::Result<Vec<String>> {
    let mut keys = Vec::new();
    for line in input.lines() {
        let line = line?;
        let key = line.trim();
        if !key.is_empty() {
            keys.push(key.to_string());
        }
    }
    Ok(keys)
}

fn print_providers(registry: &Registry) {
    for provider in registry.providers() {
        println!("{}", provider_line(provider.as_ref()));
    }
}

fn provider_line(provider: &dyn KeyProvider) -> String {
    let id = provider.id();
    // The method follows from the request shape, so build one with a blank key.
    let method = provider.build_request("").method();
    format!(
        "{} ({}) [{} {}]",
        id,
        id.display_name(),
        method,
        provider.endpoint()
    )
}
