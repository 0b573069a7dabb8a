pub mod catalog;
pub mod config;
pub mod fetch;
pub mod index;
pub mod output;
pub mod product;
pub mod push;
pub mod urls;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::catalog::{
    decode_unicode_escapes, extract_product_list, parse_product_list, ColorEntry, Product,
};
pub use crate::config::{Config, COLLECTION_PATH, DEFAULT_STORE_BASE};
pub use crate::fetch::{build_client, fetch_html};
pub use crate::index::{build_records, records_for_product, StoreRecord};
pub use crate::output::{
    render_snippet, write_csv, write_json, write_snippet, write_tsv, SNIPPET_PATHS,
};
pub use crate::product::{guess_material, parse_color_options, ColorOption};
pub use crate::push::{build_payload, push_store_index};
pub use crate::urls::normalize_product_url;
