//! Turning text into something comparable.
//!
//! - **normalize**: Canonical lowercase form of names and detected text
//! - **name**: Splitting `weapon | skin (wear)` into its components
//! - **ocr**: Stripping detector labels and markers from raw OCR lines
//! - **tsv**: Reading catalog snapshots from TSV/CSV exports
//!
//! ## Example
//!
//! ```rust
//! use skin_solver::parsing::name::parse_item_name;
//! use skin_solver::parsing::normalize::normalize;
//!
//! let parsed = parse_item_name("AK-47 | Redline (Field-Tested)");
//! assert_eq!(parsed.weapon, "AK-47");
//! assert_eq!(parsed.wear.as_deref(), Some("Field-Tested"));
//!
//! assert_eq!(normalize("AK-47 | Redline (Field-Tested)"), "ak 47 redline");
//! ```

pub mod name;
pub mod normalize;
pub mod ocr;
pub mod tsv;
