use crate::catalog::{ColorEntry, Product};
use crate::index::{records_for_product, StoreRecord};
use crate::product::ColorOption;
use crate::urls::normalize_product_url;

const BASE: &str = "https://us.store.bambulab.com";

fn sample_product() -> Product {
    Product {
        name: "PLA Basic".to_string(),
        slug: "pla-basic-filament".to_string(),
        color_list: vec![
            ColorEntry {
                position: 0,
                variant_id: Some(40001200),
                media_files: vec!["https://cdn.example.com/jade-white.png".to_string()],
            },
            ColorEntry {
                position: 1,
                variant_id: Some(40001201),
                media_files: vec![],
            },
        ],
        media_files: vec!["https://cdn.example.com/cover.png".to_string()],
        product_url: format!("{BASE}/products/pla-basic-filament"),
    }
}

fn option(color: &str, code: &str, index: usize) -> ColorOption {
    ColorOption {
        color: color.to_string(),
        code: code.to_string(),
        index,
    }
}

#[test]
fn test_alignment_equal_counts() {
    let product = sample_product();
    let options = [option("Jade White", "10100", 0), option("Beige", "10201", 1)];

    let records = records_for_product(BASE, &product, &options);
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.code, "10100");
    assert_eq!(first.name, "PLA Basic");
    assert_eq!(first.color, "Jade White");
    assert_eq!(first.material, "PLA");
    assert_eq!(first.variant_id, Some(40001200));
    assert_eq!(
        first.image_url.as_deref(),
        Some("https://cdn.example.com/jade-white.png")
    );
    assert_eq!(
        first.product_url,
        format!("{BASE}/products/pla-basic-filament?variant=40001200")
    );

    // Second color has no media of its own: product-level media steps in
    let second = &records[1];
    assert_eq!(second.color, "Beige");
    assert_eq!(
        second.image_url.as_deref(),
        Some("https://cdn.example.com/cover.png")
    );
    assert_eq!(
        second.product_url,
        format!("{BASE}/products/pla-basic-filament?variant=40001201")
    );
}

#[test]
fn test_more_options_than_feed_entries() {
    let mut product = sample_product();
    product.color_list.truncate(1);

    let options = [
        option("Jade White", "10100", 0),
        option("Beige", "10201", 1),
        option("Sunflower Yellow", "10400", 2),
    ];

    // A mismatch never drops the product: trailing options still produce
    // records, with product media and no variant.
    let records = records_for_product(BASE, &product, &options);
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].variant_id, Some(40001200));

    for record in &records[1..] {
        assert_eq!(record.variant_id, None);
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://cdn.example.com/cover.png")
        );
        assert_eq!(
            record.product_url,
            format!("{BASE}/products/pla-basic-filament")
        );
    }
}

#[test]
fn test_more_feed_entries_than_options() {
    let product = sample_product();
    let options = [option("Jade White", "10100", 0)];

    // Feed entries beyond the scraped option count are ignored
    let records = records_for_product(BASE, &product, &options);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].code, "10100");
}

#[test]
fn test_product_without_url() {
    let mut product = sample_product();
    product.product_url = String::new();

    let options = [option("Jade White", "10100", 0)];

    // No base URL means no variant link either
    let records = records_for_product(BASE, &product, &options);
    assert_eq!(records[0].product_url, "");
    assert_eq!(records[0].variant_id, Some(40001200));
}

#[test]
fn test_record_serializes_with_camel_case_keys() {
    let record = StoreRecord {
        code: "10100".to_string(),
        name: "PLA Basic".to_string(),
        color: "Jade White".to_string(),
        material: "PLA".to_string(),
        variant_id: Some(40001200),
        image_url: None,
        product_url: format!("{BASE}/products/pla-basic-filament"),
    };

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["code"], "10100");
    assert_eq!(value["variantId"], 40001200);
    assert!(value["imageUrl"].is_null());
    assert_eq!(
        value["productUrl"],
        format!("{BASE}/products/pla-basic-filament")
    );
}

#[test]
fn test_record_deserializes_with_missing_fields() {
    // Hand-pruned index files still load; absent columns default
    let record: StoreRecord =
        serde_json::from_str(r#"{"code":"10100","name":"PLA Basic"}"#).unwrap();
    assert_eq!(record.code, "10100");
    assert_eq!(record.variant_id, None);
    assert_eq!(record.product_url, "");
}

#[test]
fn test_normalize_rehosts_absolute_urls() {
    assert_eq!(
        normalize_product_url(BASE, "https://cn.store.bambulab.com/products/x?variant=1#pic"),
        format!("{BASE}/products/x?variant=1#pic")
    );
}

#[test]
fn test_normalize_joins_relative_paths() {
    assert_eq!(
        normalize_product_url(BASE, "products/pla-basic-filament"),
        format!("{BASE}/products/pla-basic-filament")
    );
    assert_eq!(
        normalize_product_url(BASE, "/products/pla-basic-filament"),
        format!("{BASE}/products/pla-basic-filament")
    );
    assert_eq!(
        normalize_product_url(&format!("{BASE}/"), "/products/x"),
        format!("{BASE}/products/x")
    );
}

#[test]
fn test_normalize_empty_url() {
    assert_eq!(normalize_product_url(BASE, ""), "");
}
