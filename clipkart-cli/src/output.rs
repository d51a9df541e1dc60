//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use rust_decimal::Decimal;

use clipkart_core::config::ColorMode;
use clipkart_core::Product;

/// Apply the stored colour preference to all later output
pub fn apply_color_mode(mode: ColorMode) {
    match mode {
        ColorMode::Auto => colored::control::unset_override(),
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
    }
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format a price as dollars with cents
pub fn format_price(price: Decimal) -> String {
    format!("${:.2}", price)
}

/// The struck-through "MRP" shown next to a price
pub fn format_list_price(product: &Product) -> String {
    format!("${}", product.list_price()).red().strikethrough().to_string()
}

/// Table of products with their position in the list
pub fn product_table(products: &[Product]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["#", "ID", "Title", "Category", "Price", "MRP", "Rating"]);
    for (index, product) in products.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(product.id),
            Cell::new(&product.title),
            Cell::new(&product.category),
            Cell::new(format_price(product.price)),
            Cell::new(format_list_price(product)),
            Cell::new(format!("{:.1} ({})", product.rating.rate, product.rating.count)),
        ]);
    }
    table
}
