//! Item catalog storage and indexing.
//!
//! The catalog is an in-memory index over a snapshot of the item store. Rows
//! are parsed and normalized once at build time; matching only ever reads.
//!
//! ## Snapshots
//!
//! A snapshot is an ordered list of rows with at least a `name`:
//!
//! - **JSON**: a bare array of rows, or `{ "version", "created_at", "items": [...] }`
//! - **TSV/CSV**: a header row naming the columns, `name` required
//!
//! Rows without a name are skipped and counted in [`store::LoadDiagnostics`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use skin_solver::{CatalogCache, ItemId};
//! use std::path::Path;
//!
//! // Load a snapshot exported from the item store
//! let catalog = CatalogCache::load_from_file(Path::new("items.json")).unwrap();
//! println!("{} items, {} rows skipped", catalog.len(), catalog.diagnostics().skipped());
//!
//! // Look up a specific item
//! let item = catalog.get(&ItemId::new("1042"));
//!
//! // Export to the versioned JSON form
//! let json = catalog.to_json().unwrap();
//! ```
//!
//! ## Sharing
//!
//! [`shared::SharedCatalog`] builds the cache lazily from a
//! [`shared::CatalogSource`] and hands out `Arc`s to it, so many threads can
//! match against the same snapshot while a rebuild swaps in the next one.

pub mod index;
pub mod shared;
pub mod store;
