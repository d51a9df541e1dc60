//! Products command - list the catalog one page at a time

use std::time::Duration;

use anyhow::Result;
use clipkart_core::{EntryPoint, OperationResult};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use super::{block_on, get_context, EventLog};
use crate::output;

#[derive(Serialize)]
struct ProductsPage<'a> {
    source: &'a str,
    pages_loaded: usize,
    page_size: usize,
    total: usize,
    has_more: bool,
    products: &'a [clipkart_core::Product],
}

/// Spinner shown while the catalog downloads
pub fn fetch_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn run(pages: usize, json: bool) -> Result<()> {
    let log = EventLog::open(EntryPoint::Cli);
    log.command("products");

    let mut ctx = get_context()?;
    let source_name = ctx
        .catalog_source()
        .map(|s| s.name().to_string())
        .unwrap_or_default();

    let spinner = (!json && atty::is(atty::Stream::Stdout)).then(|| fetch_spinner("Loading products..."));
    let loaded = block_on(ctx.load_catalog())?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if let Err(e) = loaded {
        log.error("catalog_load_failed", &e.to_string(), Some(source_name.as_str()));
        if json {
            let op: OperationResult<()> = OperationResult::fail(e.to_string())
                .with_context("source", serde_json::json!(source_name))
                .with_context("catalog_url", serde_json::json!(ctx.config.catalog_url));
            println!("{}", serde_json::to_string_pretty(&op)?);
        }
        return Err(e.into());
    }

    // The first page came with the load
    for _ in 1..pages.max(1) {
        if ctx.catalog_service.load_next_page() == 0 {
            break;
        }
    }

    let catalog = &ctx.catalog_service;
    if json {
        let page = ProductsPage {
            source: &source_name,
            pages_loaded: catalog.current_page(),
            page_size: catalog.page_size(),
            total: catalog.products().len(),
            has_more: catalog.has_more(),
            products: catalog.displayed(),
        };
        println!("{}", serde_json::to_string_pretty(&OperationResult::ok(page))?);
        return Ok(());
    }

    if catalog.displayed().is_empty() {
        output::warning("The catalog is empty.");
        return Ok(());
    }

    println!("{}", output::product_table(catalog.displayed()));
    println!(
        "Showing {} of {} products ({} per page)",
        catalog.displayed().len(),
        catalog.products().len(),
        catalog.page_size()
    );
    if catalog.has_more() {
        println!(
            "{}",
            format!("Run 'ck products --pages {}' to see more.", catalog.current_page() + 1).dimmed()
        );
    }

    Ok(())
}
