use crate::index::StoreRecord;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Serialize;

/// Envelope understood by the Store Index webhook.
#[derive(Debug, Serialize)]
pub struct PushPayload {
    pub action: &'static str,
    pub records: Vec<PushRecord>,
}

/// The webhook only keeps the spreadsheet-facing columns, all as strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRecord {
    pub code: String,
    pub name: String,
    pub color: String,
    pub image_url: String,
    pub product_url: String,
}

pub fn build_payload(records: &[StoreRecord]) -> PushPayload {
    PushPayload {
        action: "uploadStoreIndex",
        records: records
            .iter()
            .map(|record| PushRecord {
                code: record.code.clone(),
                name: record.name.clone(),
                color: record.color.clone(),
                image_url: record.image_url.clone().unwrap_or_default(),
                product_url: record.product_url.clone(),
            })
            .collect(),
    }
}

/// Sends the scraped records to the webhook populating the Store Index.
pub fn push_store_index(client: &Client, push_url: &str, records: &[StoreRecord]) -> Result<()> {
    let payload = build_payload(records);

    let response = client
        .post(push_url)
        .json(&payload)
        .send()
        .with_context(|| format!("Failed to send push request to {push_url}"))?;

    response
        .error_for_status()
        .context("Push request rejected")?;

    Ok(())
}
