use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};

use crate::catalog::store::CatalogCache;
use crate::cli::{CatalogOpts, OutputFormat};
use crate::core::item::ItemRecord;
use crate::matching::variations::WearVariationResolver;

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all items in the catalog
    List {
        #[command(flatten)]
        catalog: CatalogOpts,

        /// Filter by item type (e.g., "case")
        #[arg(long)]
        item_type: Option<String>,
    },

    /// Summarize the catalog
    Stats {
        #[command(flatten)]
        catalog: CatalogOpts,
    },

    /// Show every wear tier of an item
    Variations {
        /// Exact item name, e.g. "AWP | Asiimov (Field-Tested)"
        #[arg(required = true)]
        name: String,

        #[command(flatten)]
        catalog: CatalogOpts,
    },

    /// Export the catalog to a versioned JSON file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        #[command(flatten)]
        catalog: CatalogOpts,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the command fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, item_type } => {
            run_list(&catalog.load(verbose)?, item_type.as_deref(), format)
        }
        CatalogCommands::Stats { catalog } => run_stats(&catalog.load(verbose)?, format),
        CatalogCommands::Variations { name, catalog } => {
            run_variations(&catalog.load(verbose)?, &name, format)
        }
        CatalogCommands::Export { output, catalog } => {
            run_export(&catalog.load(verbose)?, &output)
        }
    }
}

fn run_list(
    catalog: &CatalogCache,
    item_type_filter: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let filtered: Vec<&Arc<ItemRecord>> = catalog
        .items()
        .iter()
        .filter(|item| item_type_filter.map_or(true, |t| item.item_type.eq_ignore_ascii_case(t)))
        .collect();

    print_items(
        &format!("Item Catalog ({} items)", filtered.len()),
        &filtered,
        format,
    )
}

fn run_variations(catalog: &CatalogCache, name: &str, format: OutputFormat) -> anyhow::Result<()> {
    let item = catalog.find_by_name(name).ok_or_else(|| {
        anyhow::anyhow!("Item not found: {name}. Use 'skin-solver identify' for inexact names")
    })?;

    let variations = WearVariationResolver::new(catalog).variations(item);
    let refs: Vec<&Arc<ItemRecord>> = variations.iter().collect();

    print_items(
        &format!("{} | {} ({} variations)", item.weapon, item.skin_name, refs.len()),
        &refs,
        format,
    )
}

fn print_items(title: &str, items: &[&Arc<ItemRecord>], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            // Calculate column widths dynamically
            let id_width = items.iter().map(|i| i.id.0.len()).max().unwrap_or(2).max(2);
            let name_width = items
                .iter()
                .map(|i| i.name.chars().count().min(45))
                .max()
                .unwrap_or(4)
                .max(4);
            let type_width = items
                .iter()
                .map(|i| i.item_type.len())
                .max()
                .unwrap_or(4)
                .max(4);

            let total_width = id_width + name_width + type_width + 10 + 3;

            println!("{title}\n");
            println!(
                "{:<id_w$} {:<name_w$} {:<type_w$} {:>10}",
                "ID",
                "Name",
                "Type",
                "Price",
                id_w = id_width,
                name_w = name_width,
                type_w = type_width,
            );
            println!("{}", "-".repeat(total_width));

            for item in items {
                let price = item.price.map(|p| format!("{p:.2}")).unwrap_or_default();
                println!(
                    "{:<id_w$} {:<name_w$} {:<type_w$} {:>10}",
                    item.id.0,
                    truncate(&item.name, name_width),
                    item.item_type,
                    price,
                    id_w = id_width,
                    name_w = name_width,
                    type_w = type_width,
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Tsv => {
            println!("id\tname\tweapon\tskin\twear\titem_type\tcollection\tprice\tprice_type");
            for item in items {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    item.id,
                    item.name,
                    item.weapon,
                    item.skin_name,
                    item.wear.as_deref().unwrap_or(""),
                    item.item_type,
                    item.collection,
                    item.price.map(|p| p.to_string()).unwrap_or_default(),
                    item.price_type,
                );
            }
        }
    }

    Ok(())
}

fn run_stats(catalog: &CatalogCache, format: OutputFormat) -> anyhow::Result<()> {
    let stats = catalog.stats();

    match format {
        OutputFormat::Text => {
            let wear_pct = if stats.items == 0 {
                0.0
            } else {
                100.0 * count_to_f64(stats.with_wear_tier) / count_to_f64(stats.items)
            };

            println!("Catalog Summary\n");
            println!("   Items:         {}", stats.items);
            println!("   Skipped rows:  {}", stats.skipped_rows);
            println!("   Base names:    {}", stats.base_names);
            println!(
                "   With wear:     {} ({wear_pct:.0}%)",
                stats.with_wear_tier
            );
            if !stats.by_item_type.is_empty() {
                println!("\n   By type:");
                for (item_type, count) in &stats.by_item_type {
                    let label = if item_type.is_empty() {
                        "(none)"
                    } else {
                        item_type.as_str()
                    };
                    println!("   - {label}: {count}");
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "stats": stats,
                "skipped_rows": catalog.diagnostics().skipped_rows,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("metric\tvalue");
            println!("items\t{}", stats.items);
            println!("skipped_rows\t{}", stats.skipped_rows);
            println!("base_names\t{}", stats.base_names);
            println!("with_wear_tier\t{}", stats.with_wear_tier);
            for (item_type, count) in &stats.by_item_type {
                println!("type:{item_type}\t{count}");
            }
        }
    }

    Ok(())
}

fn run_export(catalog: &CatalogCache, output: &std::path::Path) -> anyhow::Result<()> {
    let json = catalog.to_json()?;
    std::fs::write(output, json)?;

    println!("Exported {} items to {}", catalog.len(), output.display());

    Ok(())
}

/// Truncate to `max_len` characters, marking the cut with "..."
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
