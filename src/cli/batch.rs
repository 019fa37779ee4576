use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::identify::{listing_json, print_text_report};
use crate::cli::{CatalogOpts, MatchArgs, OutputFormat};
use crate::matching::batch::{match_batch, BatchEntry, BatchStatus};
use crate::matching::engine::MatchingEngine;

#[derive(Args)]
pub struct BatchArgs {
    /// File with one detected string per line. Use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub catalog: CatalogOpts,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Only list items of this type (e.g. "case"); does not change the best match
    #[arg(long)]
    pub item_type: Option<String>,
}

/// Execute batch subcommand
///
/// # Errors
///
/// Returns an error if the input or catalog cannot be read, or the options are invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: BatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let lines = read_lines(&args.input)?;
    let catalog = args.catalog.load(verbose)?;

    if verbose {
        eprintln!("Matching {} detected strings", lines.len());
    }

    let engine = MatchingEngine::with_config(&catalog, args.matching.config());
    let entries = match_batch(&engine, &lines, &args.matching.options())?;
    let item_type = args.item_type.as_deref();

    match format {
        OutputFormat::Text => print_text_results(&entries, item_type),
        OutputFormat::Json => print_json_results(&entries, item_type)?,
        OutputFormat::Tsv => print_tsv_results(&entries),
    }

    Ok(())
}

fn read_lines(input: &Path) -> anyhow::Result<Vec<String>> {
    let content = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(input)?
    };
    Ok(content.lines().map(str::to_string).collect())
}

fn status_label(status: BatchStatus) -> &'static str {
    match status {
        BatchStatus::Found => "found",
        BatchStatus::NotFound => "not_found",
        BatchStatus::Empty => "empty",
    }
}

fn print_text_results(entries: &[BatchEntry], item_type: Option<&str>) {
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(60));
        }
        println!("\n[{}] {:?}: {}", i + 1, entry.original, status_label(entry.status));

        if entry.status == BatchStatus::Found {
            let listing = entry.report.listing_for(item_type);
            print_text_report(&entry.cleaned, &entry.report, &listing);
        }
    }

    let found = entries
        .iter()
        .filter(|e| e.status == BatchStatus::Found)
        .count();
    println!("\n{found} of {} detected strings matched", entries.len());
}

fn print_json_results(entries: &[BatchEntry], item_type: Option<&str>) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = entries
        .iter()
        .map(|entry| {
            serde_json::json!({
                "original": entry.original,
                "cleaned": entry.cleaned,
                "status": entry.status,
                "confidence": entry.report.confidence,
                "score": entry.report.score,
                "matches": listing_json(&entry.report.listing_for(item_type)),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(entries: &[BatchEntry]) {
    println!("line\toriginal\tcleaned\tstatus\tbest_id\tbest_name\tscore\tconfidence");
    for (i, entry) in entries.iter().enumerate() {
        let best = entry.report.best_match.as_ref();
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            i + 1,
            entry.original,
            entry.cleaned,
            status_label(entry.status),
            best.map(|b| b.id.to_string()).unwrap_or_default(),
            best.map(|b| b.name.as_str()).unwrap_or_default(),
            entry
                .report
                .score
                .map(|s| format!("{s:.4}"))
                .unwrap_or_default(),
            entry
                .report
                .confidence
                .map(|c| c.to_string())
                .unwrap_or_default(),
        );
    }
}
