use anyhow::{Context, Result};
use log::debug;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::thread;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const FETCH_ATTEMPTS: u32 = 3;
const BACKOFF_BASE: f64 = 1.5;

pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// HTTP GET returning the body text.
///
/// Rate-limit and server errors (429/5xx) are retried with exponential
/// backoff; anything else non-successful fails immediately.
pub fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let mut attempt = 0;

    loop {
        let response = client
            .get(url)
            .send()
            .with_context(|| format!("Failed to send request to {url}"))?;

        let status = response.status();

        if is_retryable(status) {
            attempt += 1;
            if attempt == FETCH_ATTEMPTS {
                anyhow::bail!(
                    "Request to {url} failed with status {status} after {FETCH_ATTEMPTS} attempts"
                );
            }

            let delay = Duration::from_secs_f64(BACKOFF_BASE.powi(attempt as i32 - 1));
            debug!("retrying {url} in {delay:?} (status {status})");
            thread::sleep(delay);
            continue;
        }

        if !status.is_success() {
            anyhow::bail!("Request to {url} failed with status {status}");
        }

        return response.text().context("Failed to get response text");
    }
}

fn is_retryable(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}
