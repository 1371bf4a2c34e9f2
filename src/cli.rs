use crate::config::Settings;
use crate::download::github::GitHubClient;
use crate::generator::ScriptGenerator;
use crate::models::{Args, Commands};
use crate::registry::{all_tools, supported_tools};
use crate::server;
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Main CLI entry point
pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    tracing::debug!(?settings, "Loaded settings");

    match args.command {
        Commands::Script { tool } => {
            let generator = ScriptGenerator::new(GitHubClient::new(&settings));
            let script = generator.generate_script(&tool)?;
            print!("{script}");
        }
        Commands::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(all_tools())?);
            } else {
                for name in supported_tools() {
                    println!("{name}");
                }
            }
        }
        Commands::Serve { listen } => {
            if let Some(listen) = listen {
                settings.listen = listen;
            }
            let generator = Arc::new(ScriptGenerator::new(GitHubClient::new(&settings)));
            let runtime =
                tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            runtime.block_on(server::serve(generator, &settings.listen))?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays a clean script; `RUST_LOG` overrides `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
