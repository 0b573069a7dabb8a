use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::fs;
use std::path::PathBuf;
use store_index_scraper::{build_client, push_store_index, Config, StoreRecord};

/// Push an existing store_index.json to the Store Index webhook.
///
/// Relies on WEB_APP_URL in secret.env (same as scrape_store).
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Index file written by a previous scrape_store run
    #[arg(long, default_value = "data/store_index.json")]
    input: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::load();

    let push_url = match config.push_url {
        Some(url) => url,
        None => anyhow::bail!("WEB_APP_URL is not set. Populate secret.env."),
    };

    if !args.input.exists() {
        anyhow::bail!(
            "{} not found. Run scrape_store first.",
            args.input.display()
        );
    }

    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let records: Vec<StoreRecord> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON array of records", args.input.display()))?;

    let client = build_client()?;
    push_store_index(&client, &push_url, &records)?;

    println!(
        "Pushed {} records to Store Index via {}",
        records.len(),
        push_url
    );

    Ok(())
}
