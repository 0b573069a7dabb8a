use std::env;
use std::path::Path;

/// Storefront origin used when `STORE_BASE` is not set.
pub const DEFAULT_STORE_BASE: &str = "https://us.store.bambulab.com";

/// Collection listing that embeds the product feed.
pub const COLLECTION_PATH: &str = "/collections/bambu-lab-3d-printer-filament";

const SECRETS_FILE: &str = "secret.env";

pub struct Config {
    /// Storefront origin, e.g. `https://us.store.bambulab.com`.
    pub base_store: String,

    /// Webhook receiving the scraped index. Pushing is skipped when unset.
    pub push_url: Option<String>,
}

impl Config {
    /// Reads `secret.env` (if present) and the environment.
    ///
    /// Variables already set in the environment win over the secrets file.
    pub fn load() -> Self {
        load_secrets();

        let base_store = env::var("STORE_BASE")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_BASE.to_string());

        let push_url = env::var("WEB_APP_URL").ok().filter(|value| !value.is_empty());

        Config {
            base_store,
            push_url,
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_store.trim_end_matches('/'), COLLECTION_PATH)
    }
}

fn load_secrets() {
    // dotenv never overrides variables that are already set.
    if Path::new(SECRETS_FILE).exists() {
        let _ = dotenv::from_filename(SECRETS_FILE);
    } else {
        // If executed within a sub-directory of the workspace.
        let _ = dotenv::from_filename(format!("../{SECRETS_FILE}"));
    }
}
