//! Score command - compare two strings directly with the similarity scorer.
//!
//! Both strings are normalized the same way catalog names and detected text
//! are, so the numbers match what the matching engine sees.

use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::scoring::{
    SimilarityBreakdown, CONTAINMENT_WEIGHT, SEQUENCE_WEIGHT, TOKEN_WEIGHT,
};
use crate::parsing::normalize::normalize;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// First string, e.g. detected text
    #[arg(required = true)]
    pub first: String,

    /// Second string, e.g. a catalog name
    #[arg(required = true)]
    pub second: String,

    /// Compare the strings as given, without normalizing them first
    #[arg(long)]
    pub raw: bool,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if JSON output cannot be serialized.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (first, second) = if args.raw {
        (args.first.clone(), args.second.clone())
    } else {
        (normalize(&args.first), normalize(&args.second))
    };

    if verbose {
        eprintln!("Comparing {first:?} with {second:?}");
    }

    let breakdown = SimilarityBreakdown::calculate(&first, &second);

    match format {
        OutputFormat::Text => print_text_result(&first, &second, &breakdown),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "first": { "input": args.first, "compared": first },
                "second": { "input": args.second, "compared": second },
                "score": breakdown,
                "weights": {
                    "sequence": SEQUENCE_WEIGHT,
                    "token": TOKEN_WEIGHT,
                    "containment": CONTAINMENT_WEIGHT,
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("first\tsecond\tsequence\ttoken\tcontainment\tcombined");
            println!(
                "{first}\t{second}\t{:.4}\t{:.4}\t{:.4}\t{:.4}",
                breakdown.sequence, breakdown.token, breakdown.containment, breakdown.combined
            );
        }
    }

    Ok(())
}

fn print_text_result(first: &str, second: &str, breakdown: &SimilarityBreakdown) {
    println!("\nComparing: \"{first}\"");
    println!("     with: \"{second}\"");
    println!(
        "\n   Score: {:.1}% = {:.0}%×sequence + {:.0}%×token + {:.0}%×containment",
        breakdown.combined * 100.0,
        SEQUENCE_WEIGHT * 100.0,
        TOKEN_WEIGHT * 100.0,
        CONTAINMENT_WEIGHT * 100.0,
    );
    println!("   Sequence:    {:.1}%", breakdown.sequence * 100.0);
    println!("   Token:       {:.1}%", breakdown.token * 100.0);
    println!("   Containment: {:.1}%", breakdown.containment * 100.0);
}
