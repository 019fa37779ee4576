use std::sync::Arc;

use clap::Args;

use crate::cli::{report_load, CatalogOpts, MatchArgs, OutputFormat};
use crate::matcher::ItemMatcher;
use crate::matching::report::{ListingEntry, MatchReport};
use crate::parsing::normalize::normalize;

#[derive(Args)]
pub struct IdentifyArgs {
    /// Detected text to identify. Use '-' to read it from stdin
    #[arg(required = true)]
    pub text: String,

    #[command(flatten)]
    pub catalog: CatalogOpts,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Only list items of this type (e.g. "case"); does not change the best match
    #[arg(long)]
    pub item_type: Option<String>,
}

/// Execute identify subcommand
///
/// # Errors
///
/// Returns an error if the options are invalid or the catalog cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IdentifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let text = read_text(&args.text)?;

    let matcher = ItemMatcher::with_config(args.catalog.source(), args.matching.config());
    let report = matcher.match_with_confidence(&text, &args.matching.options())?;

    if verbose {
        let catalog = matcher.catalog()?;
        report_load(&catalog);
        eprintln!("Normalized query: {:?}", normalize(&text));
    }

    let listing = report.listing_for(args.item_type.as_deref());

    match format {
        OutputFormat::Text => {
            if report.is_match() {
                print_text_report(&text, &report, &listing);
            } else {
                eprintln!("No matching items found.");
            }
        }
        OutputFormat::Json => print_json_report(&text, &report, &listing)?,
        OutputFormat::Tsv => print_tsv_listing(&listing),
    }

    Ok(())
}

fn read_text(arg: &str) -> anyhow::Result<String> {
    use std::io::{self, Read};

    if arg == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer.trim().to_string());
    }
    Ok(arg.to_string())
}

pub(crate) fn print_text_report(query: &str, report: &MatchReport, listing: &[ListingEntry]) {
    if let (Some(confidence), Some(score)) = (report.confidence, report.score) {
        println!(
            "\n\"{query}\": {} match ({:.1}%)",
            confidence,
            score * 100.0
        );
    }

    for (i, entry) in listing.iter().enumerate() {
        let strategy = report
            .matches
            .iter()
            .find(|m| Arc::ptr_eq(&m.item, &entry.item))
            .map(|m| format!(" via {:?}", m.strategy));

        println!("\n#{} {} ({})", i + 1, entry.item.name, entry.tier);
        if !entry.item.id.is_empty() {
            println!("   ID: {}", entry.item.id);
        }
        if !entry.item.item_type.is_empty() {
            println!("   Type: {}", entry.item.item_type);
        }
        if !entry.item.collection.is_empty() {
            println!("   Collection: {}", entry.item.collection);
        }
        if let Some(price) = entry.item.price {
            println!("   Price: {price:.2} {}", entry.item.price_type);
        }
        if let Some(strategy) = strategy {
            println!("   Score: {:.1}%{strategy}", entry.score * 100.0);
        }
    }

    if listing.is_empty() {
        println!("\n   (no items of the requested type)");
    }
}

pub(crate) fn listing_json(listing: &[ListingEntry]) -> serde_json::Value {
    serde_json::Value::Array(
        listing
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "id": entry.item.id,
                    "name": entry.item.name,
                    "collection": entry.item.collection,
                    "price": entry.item.price,
                    "price_type": entry.item.price_type,
                    "item_type": entry.item.item_type,
                    "score": entry.score,
                    "tier": entry.tier,
                })
            })
            .collect(),
    )
}

fn print_json_report(
    query: &str,
    report: &MatchReport,
    listing: &[ListingEntry],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "query": query,
        "normalized": normalize(query),
        "report": report,
        "listing": listing_json(listing),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_listing(listing: &[ListingEntry]) {
    println!("rank\tid\tname\titem_type\tprice\tscore\ttier");
    for (i, entry) in listing.iter().enumerate() {
        let price = entry
            .item
            .price
            .map(|p| format!("{p:.2}"))
            .unwrap_or_default();
        println!(
            "{}\t{}\t{}\t{}\t{}\t{:.4}\t{}",
            i + 1,
            entry.item.id,
            entry.item.name,
            entry.item.item_type,
            price,
            entry.score,
            entry.tier
        );
    }
}
