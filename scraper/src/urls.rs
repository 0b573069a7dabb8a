use url::Url;

/// Rewrites a product URL onto the configured storefront origin.
///
/// Absolute URLs keep their path, query and fragment but take the base's
/// scheme and host (the feed sometimes points at other regional hosts).
/// Anything that doesn't parse as an absolute URL is treated as a path and
/// joined onto the base. Empty input stays empty.
pub fn normalize_product_url(base_store: &str, url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    let base = match Url::parse(base_store) {
        Ok(base) => base,
        Err(_) => return url.to_string(),
    };

    match Url::parse(url) {
        Ok(parsed) if parsed.has_host() => {
            let mut normalized = base.clone();
            normalized.set_path(parsed.path());
            normalized.set_query(parsed.query());
            normalized.set_fragment(parsed.fragment());
            normalized.to_string()
        }
        _ => format!(
            "{}/{}",
            base_store.trim_end_matches('/'),
            url.trim_start_matches('/')
        ),
    }
}
