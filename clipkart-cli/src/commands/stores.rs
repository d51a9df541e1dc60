//! Stores command - list store locations

use anyhow::Result;
use clipkart_core::services::StoreLocator;
use clipkart_core::{EntryPoint, OperationResult};
use colored::Colorize;

use super::EventLog;
use crate::output;

pub fn run(city: Option<String>, json: bool) -> Result<()> {
    EventLog::open(EntryPoint::Cli).command("stores");

    let mut locator = StoreLocator::default();

    if let Some(city) = city {
        let found = locator
            .locations()
            .iter()
            .find(|l| l.city_name.eq_ignore_ascii_case(&city))
            .cloned();
        let Some(location) = found else {
            anyhow::bail!("No store in {}", city);
        };
        locator.select(&location);
        locator.show_details(&location);
    }

    if json {
        let data = match locator.detail() {
            Some(detail) => serde_json::json!({
                "location": detail,
                "region": locator.region(),
            }),
            None => serde_json::json!({ "locations": locator.locations() }),
        };
        println!("{}", serde_json::to_string_pretty(&OperationResult::ok(data))?);
        return Ok(());
    }

    if let Some(detail) = locator.detail() {
        let region = locator.region();
        println!("{} ({})", detail.name.bold(), detail.city_name);
        println!();
        println!("{}", detail.description);
        println!();
        println!(
            "  Location: {:.4}, {:.4} (map span {}°)",
            region.center.latitude, region.center.longitude, region.latitude_delta
        );
        println!("  More: {}", detail.link.cyan());
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Store", "City", "Latitude", "Longitude"]);
    for location in locator.locations() {
        table.add_row(vec![
            location.name.clone(),
            location.city_name.clone(),
            format!("{:.4}", location.coordinates.latitude),
            format!("{:.4}", location.coordinates.longitude),
        ]);
    }
    println!("{}", table);
    println!("{}", "Run 'ck stores --city <name>' for details.".dimmed());
    Ok(())
}
