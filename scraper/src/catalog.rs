use anyhow::{Context, Result};
use serde::Deserialize;

/// One entry of a product's color feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorEntry {
    pub position: i64,
    pub variant_id: Option<u64>,
    pub media_files: Vec<String>,
}

/// A product from the collection feed, colors sorted by feed position.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub slug: String,
    pub color_list: Vec<ColorEntry>,
    pub media_files: Vec<String>,
    pub product_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    #[serde(default)]
    name: String,
    #[serde(default)]
    seo_code: String,
    #[serde(default)]
    color_list: Option<Vec<RawColorEntry>>,
    #[serde(default)]
    media_files: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawColorEntry {
    #[serde(default)]
    color_position: i64,
    #[serde(default)]
    property_value_id: Option<u64>,
    #[serde(default)]
    media_files: Option<Vec<String>>,
}

/// Slices the `productList` array out of the collection page.
///
/// The array is embedded in page scripts and is not addressable as
/// standalone JSON, so it is located by marker search and cut out by
/// bracket matching. Brackets inside string literals don't count; the
/// matcher tracks quote and backslash-escape state for that.
pub fn extract_product_list(html: &str) -> Result<&str> {
    let marker = html
        .find("productList")
        .context("productList not found in collection page")?;

    let start = marker
        + html[marker..]
            .find('[')
            .context("productList has no array start")?;

    let mut level = 0i32;
    let mut in_str = false;
    let mut esc = false;

    for (pos, ch) in html[start..].char_indices() {
        if esc {
            esc = false;
            continue;
        }
        match ch {
            '\\' => esc = true,
            '"' => in_str = !in_str,
            '[' if !in_str => level += 1,
            ']' if !in_str => {
                level -= 1;
                if level == 0 {
                    return Ok(&html[start..start + pos + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    anyhow::bail!("could not bracket-match productList array")
}

/// Decodes backslash escape sequences in the sliced array text.
///
/// The feed may sit inside a script string with `\"`-escaped quotes; after
/// decoding it is plain JSON. Unknown or malformed escapes pass through
/// unchanged.
pub fn decode_unicode_escapes(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' || i + 1 == chars.len() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        match chars[i + 1] {
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'x' => {
                match parse_hex(&chars, i + 2, 2) {
                    Some(value) => {
                        out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
                        i += 4;
                        continue;
                    }
                    None => out.push_str("\\x"),
                }
            }
            'u' => {
                match parse_hex(&chars, i + 2, 4) {
                    Some(high) if (0xD800..=0xDBFF).contains(&high) => {
                        // Surrogate pair: the low half follows as another \uXXXX.
                        if chars.get(i + 6) == Some(&'\\') && chars.get(i + 7) == Some(&'u') {
                            if let Some(low) = parse_hex(&chars, i + 8, 4) {
                                if (0xDC00..=0xDFFF).contains(&low) {
                                    let combined =
                                        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                                    out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                                    i += 12;
                                    continue;
                                }
                            }
                        }
                        out.push('\u{FFFD}');
                        i += 6;
                        continue;
                    }
                    Some(value) => {
                        out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
                        i += 6;
                        continue;
                    }
                    None => out.push_str("\\u"),
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        i += 2;
    }

    out
}

fn parse_hex(chars: &[char], start: usize, len: usize) -> Option<u32> {
    if start + len > chars.len() || !chars[start..start + len].iter().all(|c| c.is_ascii_hexdigit())
    {
        return None;
    }
    let digits: String = chars[start..start + len].iter().collect();
    u32::from_str_radix(&digits, 16).ok()
}

/// Extracts and deserializes the product feed from the collection page.
pub fn parse_product_list(html: &str, base_store: &str) -> Result<Vec<Product>> {
    let raw = extract_product_list(html)?;
    let decoded = decode_unicode_escapes(raw);

    let feed: Vec<RawProduct> =
        serde_json::from_str(&decoded).context("Failed to deserialize productList array")?;

    let base = base_store.trim_end_matches('/');
    let mut products = Vec::with_capacity(feed.len());

    for item in feed {
        let mut color_list: Vec<ColorEntry> = item
            .color_list
            .unwrap_or_default()
            .into_iter()
            .map(|entry| ColorEntry {
                position: entry.color_position,
                variant_id: entry.property_value_id,
                media_files: entry.media_files.unwrap_or_default(),
            })
            .collect();
        color_list.sort_by_key(|entry| entry.position);

        let product_url = match item.seo_code.is_empty() {
            true => String::new(),
            false => format!("{}/products/{}", base, item.seo_code),
        };

        products.push(Product {
            name: item.name,
            slug: item.seo_code,
            color_list,
            media_files: item.media_files.unwrap_or_default(),
            product_url,
        });
    }

    Ok(products)
}
