use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use informa_api::{router, AppState};
use informa_common::{Config, GeocodeRequest};

#[derive(Parser)]
#[command(name = "informa", about = "Crime-awareness backend: geocoding and wanted persons")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Scrape the wanted persons listing once and store it
    Scrape,
    /// Resolve location fields to coordinates once
    Geocode {
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        neighborhood: Option<String>,
        #[arg(long)]
        city_state: Option<String>,
        #[arg(long)]
        county: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("informa=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let state = Arc::new(AppState::from_config(&config));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, state).await,
        Command::Scrape => scrape(&state).await,
        Command::Geocode {
            address,
            neighborhood,
            city_state,
            county,
        } => {
            let request = GeocodeRequest {
                incident_address: address,
                neighborhood,
                city_state,
                county,
            };
            match state.resolver.resolve(&request).await {
                Some(result) => println!("{},{}", result.lat, result.lng),
                None => println!("no result"),
            }
            Ok(())
        }
    }
}

async fn serve(config: &Config, state: Arc<AppState>) -> Result<()> {
    let addr = format!("{}:{}", config.web_host, config.web_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "Informa API listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn scrape(state: &AppState) -> Result<()> {
    let scraper = state
        .scraper
        .as_ref()
        .context("FIRECRAWL_API_KEY is not configured; cannot run scrape")?;

    let scraped = scraper.scrape().await?;
    let payload = state.store.upsert(scraped.items, scraped.scraped_at).await?;
    info!(path = %state.store.path().display(), "Scrape stored");
    println!("{} wanted persons stored", payload.items.len());
    Ok(())
}
