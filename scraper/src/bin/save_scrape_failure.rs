use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use store_index_scraper::{build_client, extract_product_list, fetch_html, parse_color_options};

fn main() -> Result<()> {
    // Get URL from command line arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Please provide a URL and a test name");
        eprintln!("Usage: cargo run --bin save_scrape_failure <URL> <test_name>");
        std::process::exit(1);
    }

    let url = &args[1];
    let test_name = &args[2];

    println!("Fetching HTML from {}...", url);

    let client = build_client()?;
    let html = fetch_html(&client, url)?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    // Save the HTML for testing
    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    // Check the markers the scraper depends on before running the parsers.
    println!("\nAttempting to parse to confirm the failure:");

    let has_feed_marker = html.contains("productList");

    use scraper::{Html, Selector};
    let document = Html::parse_document(&html);
    let li_selector = Selector::parse("li").unwrap();
    let li_with_value = document
        .select(&li_selector)
        .filter(|li| li.value().attr("value").is_some())
        .count();

    println!("HTML analysis results:");
    println!("  - Has productList marker: {}", has_feed_marker);
    println!("  - <li> elements with a value attribute: {}", li_with_value);

    if has_feed_marker {
        match extract_product_list(&html) {
            Ok(raw) => println!(
                "⚠️ productList array extracted ({} bytes) - collection page parses",
                raw.len()
            ),
            Err(e) => println!("✅ productList extraction failed with error: {}", e),
        }
    }

    let options = parse_color_options(&html);
    if options.is_empty() {
        println!("✅ No color options parsed from the page");

        if li_with_value == 0 {
            println!("   No <li value=...> items - structural issue");
        } else {
            println!("   Items present but none match the 'Color (12345)' label pattern");
        }

        println!("\nThis test case has been saved and will be included in regression tests.");
    } else {
        println!(
            "⚠️ Parsed {} color options! This may not be a failure case.",
            options.len()
        );
    }

    Ok(())
}
