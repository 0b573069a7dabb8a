use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::warn;
use std::path::PathBuf;
use store_index_scraper::{
    build_client, build_records, fetch_html, parse_product_list, push_store_index, write_csv,
    write_json, write_snippet, write_tsv, Config, SNIPPET_PATHS,
};

/// Scrape the filament storefront into data/store_index.{json,csv,tsv},
/// regenerate the Arduino material snippets and push the index to the
/// Store Index webhook when WEB_APP_URL is set.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Directory receiving the JSON/CSV/TSV index files
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    /// Skip the webhook push even when WEB_APP_URL is set
    #[arg(long)]
    no_push: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::load();
    let client = build_client()?;

    let collection_url = config.collection_url();
    println!("Navigating to {}...", collection_url);

    let html = fetch_html(&client, &collection_url)?;
    let products = parse_product_list(&html, &config.base_store)?;
    println!("Found {} products in collection feed", products.len());

    let records = build_records(&client, &config.base_store, &products);

    let json_path = args.out_dir.join("store_index.json");
    let csv_path = args.out_dir.join("store_index.csv");
    let tsv_path = args.out_dir.join("store_index.tsv");

    write_json(&json_path, &records)?;
    write_csv(&csv_path, &records)?;
    write_tsv(&tsv_path, &records)?;

    for path in SNIPPET_PATHS {
        let path = PathBuf::from(path);
        write_snippet(&path, &records)?;
        println!("Wrote Arduino snippet: {}", path.display());
    }

    if !args.no_push {
        if let Some(push_url) = &config.push_url {
            match push_store_index(&client, push_url, &records) {
                Ok(()) => println!(
                    "Pushed {} records to Store Index via webhook",
                    records.len()
                ),
                Err(why) => warn!("failed to push Store Index to webhook: {why:#}"),
            }
        }
    }

    println!(
        "Wrote {} records to {}, {}, and {}",
        records.len(),
        json_path.display(),
        csv_path.display(),
        tsv_path.display()
    );

    Ok(())
}
