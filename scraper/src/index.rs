use crate::catalog::Product;
use crate::fetch::fetch_html;
use crate::product::{guess_material, parse_color_options, ColorOption};
use crate::urls::normalize_product_url;
use log::warn;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

/// Pause between product page fetches to soften rate limits.
const PRODUCT_PAGE_DELAY: Duration = Duration::from_millis(250);

/// One color variant of the published store index.
///
/// Field defaults keep previously written index files readable even when
/// columns were pruned by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreRecord {
    pub code: String,
    pub name: String,
    pub color: String,
    pub material: String,
    pub variant_id: Option<u64>,
    pub image_url: Option<String>,
    pub product_url: String,
}

/// Aligns a product's scraped options with its color feed by position.
///
/// The feed is unordered relative to the storefront UI, so the scraped
/// option order is authoritative. Options beyond the feed length still
/// produce records (product-level media, no variant); feed entries beyond
/// the option count are ignored.
pub fn records_for_product(
    base_store: &str,
    product: &Product,
    options: &[ColorOption],
) -> Vec<StoreRecord> {
    let normalized_base = normalize_product_url(base_store, &product.product_url);
    let material = guess_material(&product.name, &product.slug);

    options
        .iter()
        .enumerate()
        .map(|(pos, option)| {
            let entry = product.color_list.get(pos);

            let media_files = match entry {
                Some(entry) if !entry.media_files.is_empty() => &entry.media_files,
                _ => &product.media_files,
            };
            let image_url = media_files.first().cloned();

            let variant_id = entry.and_then(|entry| entry.variant_id);

            // Shopify-style variant selection uses the `variant` query param.
            let product_url = match variant_id {
                Some(id) if !normalized_base.is_empty() => {
                    format!("{normalized_base}?variant={id}")
                }
                _ => normalized_base.clone(),
            };

            StoreRecord {
                code: option.code.clone(),
                name: product.name.clone(),
                color: option.color.clone(),
                material: material.clone(),
                variant_id,
                image_url,
                product_url,
            }
        })
        .collect()
}

/// The linear batch loop: fetch every product's detail page, scrape its
/// option labels and align them with the feed. Per-product failures are
/// logged and skipped so one broken page doesn't sink the run.
pub fn build_records(client: &Client, base_store: &str, products: &[Product]) -> Vec<StoreRecord> {
    let base = base_store.trim_end_matches('/');
    let mut records = Vec::new();

    for product in products {
        if product.slug.is_empty() {
            continue;
        }

        let url = match normalize_product_url(base_store, &product.product_url) {
            url if url.is_empty() => format!("{}/products/{}", base, product.slug),
            url => url,
        };

        let page_html = match fetch_html(client, &url) {
            Ok(html) => html,
            Err(why) => {
                warn!("failed to fetch product page {url}: {why:#}");
                continue;
            }
        };
        thread::sleep(PRODUCT_PAGE_DELAY);

        let options = parse_color_options(&page_html);
        if options.is_empty() {
            warn!("no color options found in {url}");
            continue;
        }

        if options.len() != product.color_list.len() {
            warn!(
                "color count mismatch for {} ({} options vs {} feed)",
                product.name,
                options.len(),
                product.color_list.len()
            );
        }

        records.extend(records_for_product(base_store, product, &options));
    }

    records
}
