use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

lazy_static! {
    /// Option labels look like `Jade White (10100)`: color name plus the
    /// five-digit filament code.
    static ref OPTION_LABEL: Regex = Regex::new(r"^(.*) \((\d{5})\)$").unwrap();
}

/// A color choice scraped from a product detail page, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorOption {
    pub color: String,
    pub code: String,
    pub index: usize,
}

/// Collects the ordered color options from a product page.
///
/// The storefront renders the color picker as `<li value="Color (12345)">`
/// items; their document order is the display order the feed has to be
/// aligned against. List items without a matching `value` are skipped.
pub fn parse_color_options(html: &str) -> Vec<ColorOption> {
    let document = Html::parse_document(html);
    let li_selector = Selector::parse("li").unwrap();

    let mut options = Vec::new();

    for li in document.select(&li_selector) {
        let value = match li.value().attr("value") {
            Some(value) => value.trim(),
            None => continue,
        };

        if let Some(captures) = OPTION_LABEL.captures(value) {
            options.push(ColorOption {
                color: captures[1].trim().to_string(),
                code: captures[2].to_string(),
                index: options.len(),
            });
        }
    }

    options
}

/// Infers the material family from the product slug, falling back to the
/// name. Order matters: `pet-cf` before `petg`, and `pc` last because it
/// is a substring of other tokens.
pub fn guess_material(name: &str, slug: &str) -> String {
    let target = match slug.is_empty() {
        true => name.to_lowercase(),
        false => slug.to_lowercase(),
    };

    for (needle, material) in [
        ("pla", "PLA"),
        ("pet-cf", "PET-CF"),
        ("petcf", "PET-CF"),
        ("petg", "PETG"),
        ("paht", "PAHT"),
        ("abs", "ABS"),
        ("asa", "ASA"),
        ("tpu", "TPU"),
        ("pc", "PC"),
    ] {
        if target.contains(needle) {
            return material.to_string();
        }
    }

    name.split_whitespace().next().unwrap_or_default().to_string()
}
