//! `purgely` - purge Fastly caches from the command line or over HTTP

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use purgely::{Config, PurgeOptions, PurgeResponse, PurgelyModule};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "purgely", version, about = "Fastly purge dispatch")]
struct Cli {
    /// YAML configuration file (PURGELY_* environment variables override it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Purge a URL
    Url {
        /// URL to purge
        url: String,
        /// Also purge this URL in the same batch (repeatable)
        #[arg(long = "related-url")]
        related_urls: Vec<String>,
        /// Take the batched path even without extra URLs
        #[arg(long)]
        related: bool,
        #[command(flatten)]
        purge: PurgeFlags,
    },
    /// Purge a surrogate key
    Key {
        /// Surrogate key to purge
        key: String,
        #[command(flatten)]
        purge: PurgeFlags,
    },
    /// Purge the whole service
    All {
        /// Override the configured allow_purge_all setting
        #[arg(long)]
        allow_all: Option<bool>,
        #[command(flatten)]
        purge: PurgeFlags,
    },
    /// Print the surrogate headers a response would carry
    Headers {
        /// Surrogate key to add (repeatable)
        #[arg(long = "key")]
        keys: Vec<String>,
        /// Surrogate-control TTL in seconds
        #[arg(long)]
        ttl: Option<String>,
        /// stale-while-revalidate seconds
        #[arg(long)]
        stale_while_revalidate: Option<u64>,
        /// stale-while-error seconds
        #[arg(long)]
        stale_while_error: Option<u64>,
    },
    /// Print the resolved configuration
    Config,
    /// Serve the purge REST API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8087")]
        bind: SocketAddr,
    },
}

#[derive(Debug, Args)]
struct PurgeFlags {
    /// Mark content stale instead of evicting it
    #[arg(long)]
    soft: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "purgely=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_response(response: &PurgeResponse) {
    println!(
        "{}\t{}\t{}\t{}",
        response.kind,
        response.status,
        response.id.as_deref().unwrap_or("-"),
        response.target
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let module = PurgelyModule::default();
    module.init(config)?;
    let service = module.service()?;

    match cli.command {
        Command::Url {
            url,
            related_urls,
            related,
            purge,
        } => {
            let options = PurgeOptions {
                related: related || !related_urls.is_empty(),
                related_urls,
                ..PurgeOptions::default()
            }
            .with_soft(purge.soft);
            let outcome = service.purge_url(&url, options).await?;
            outcome.responses().iter().for_each(print_response);
        }
        Command::Key { key, purge } => {
            let options = PurgeOptions::default().with_soft(purge.soft);
            let response = service.purge_surrogate_key(&key, options).await?;
            print_response(&response);
        }
        Command::All { allow_all, purge } => {
            let mut options = PurgeOptions::default().with_soft(purge.soft);
            options.allow_all = allow_all;
            let response = service.purge_all(options).await?;
            print_response(&response);
        }
        Command::Headers {
            keys,
            ttl,
            stale_while_revalidate,
            stale_while_error,
        } => {
            let mut context = service.new_context();
            for key in &keys {
                service.add_surrogate_key(&mut context, key);
            }
            if let Some(ttl) = ttl {
                service.set_ttl_from_text(&mut context, &ttl);
            }
            if let Some(seconds) = stale_while_revalidate {
                service.set_stale_while_revalidate(&mut context, seconds);
            }
            if let Some(seconds) = stale_while_error {
                service.set_stale_while_error(&mut context, seconds);
            }

            if let Some(value) = context.surrogate_key_header() {
                println!("Surrogate-Key: {}", value);
            }
            println!("Surrogate-Control: {}", context.surrogate_control_header());
            if let Some(value) = context.cache_control_header() {
                println!("Cache-Control: {}", value);
            }
        }
        Command::Config => {
            println!("{:#?}", module.config());
        }
        Command::Serve { bind } => {
            let router = module.register_rest(axum::Router::new())?;
            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("failed to bind {}", bind))?;
            tracing::info!(%bind, "purge API listening");
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
