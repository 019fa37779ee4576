use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::item::{ItemRecord, RawItemRecord};
use crate::core::types::ItemId;
use crate::parsing::tsv::parse_catalog_tsv;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    InvalidFormat(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub items: Vec<RawItemRecord>,
}

/// Accepted JSON snapshot shapes: the versioned document or a bare row array.
/// Rows stay untyped here so one bad row cannot fail the whole document.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Versioned {
        version: String,
        items: Vec<serde_json::Value>,
    },
    Rows(Vec<serde_json::Value>),
}

/// On-disk snapshot format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SnapshotFormat {
    Json,
    Tsv,
    Csv,
}

impl SnapshotFormat {
    /// Detect format from file extension, defaulting to JSON
    #[must_use]
    pub fn detect(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("tsv" | "txt") => Self::Tsv,
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Parse a JSON snapshot into raw rows
///
/// # Errors
///
/// Returns `CatalogError::ParseError` if the document is not valid JSON or
/// has neither supported shape. A row that does not fit the record shape is
/// returned as a nameless row, so the cache build skips and counts it.
pub fn parse_json_snapshot(json: &str) -> Result<Vec<RawItemRecord>, CatalogError> {
    let values = match serde_json::from_str(json)? {
        CatalogDocument::Rows(values) => values,
        CatalogDocument::Versioned { version, items } => {
            // Version check (warn but don't fail)
            if version != CATALOG_VERSION {
                warn!(
                    expected = CATALOG_VERSION,
                    found = %version,
                    "catalog version mismatch"
                );
            }
            items
        }
    };

    Ok(values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            serde_json::from_value(value).unwrap_or_else(|e| {
                debug!(row = i + 1, error = %e, "unreadable catalog row");
                RawItemRecord::default()
            })
        })
        .collect())
}

/// Read raw rows from a snapshot file
///
/// # Errors
///
/// Returns `CatalogError::ReadError` if the file cannot be read, or a parse
/// error if its content does not match `format`.
pub fn read_snapshot(path: &Path, format: SnapshotFormat) -> Result<Vec<RawItemRecord>, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    match format {
        SnapshotFormat::Json => parse_json_snapshot(&content),
        SnapshotFormat::Tsv => parse_catalog_tsv(&content, '\t'),
        SnapshotFormat::Csv => parse_catalog_tsv(&content, ','),
    }
}

/// What happened while building a cache from a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadDiagnostics {
    /// Records that made it into the cache
    pub loaded: usize,

    /// 1-based positions of rows skipped for lacking a usable name
    pub skipped_rows: Vec<usize>,
}

impl LoadDiagnostics {
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped_rows.len()
    }
}

/// Summary counts for `catalog stats`
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub items: usize,
    pub skipped_rows: usize,
    /// Distinct "{weapon} | {skin}" groups
    pub base_names: usize,
    /// Items whose wear suffix is one of the five canonical tiers
    pub with_wear_tier: usize,
    pub by_item_type: BTreeMap<String, usize>,
}

/// In-memory index of parsed and normalized catalog records
///
/// Read-only once built. Refreshing means building a new cache and swapping
/// it in (see [`crate::catalog::shared::SharedCatalog`]).
#[derive(Debug, Default)]
pub struct CatalogCache {
    /// All records, in snapshot order
    items: Vec<Arc<ItemRecord>>,

    /// Index: item ID -> index in items vec (first occurrence wins)
    id_to_index: HashMap<ItemId, usize>,

    /// Index: exact display name -> index in items vec (first occurrence wins)
    name_to_index: HashMap<String, usize>,

    diagnostics: LoadDiagnostics,
}

impl CatalogCache {
    /// Build the cache from a snapshot, skipping rows without a name
    pub fn build(snapshot: impl IntoIterator<Item = RawItemRecord>) -> Self {
        let mut cache = Self::default();

        for (i, raw) in snapshot.into_iter().enumerate() {
            match ItemRecord::from_raw(raw) {
                Some(item) => cache.push(item),
                None => {
                    let row = i + 1;
                    warn!(row, "skipping catalog row without a name");
                    cache.diagnostics.skipped_rows.push(row);
                }
            }
        }
        cache.diagnostics.loaded = cache.items.len();

        info!(
            loaded = cache.diagnostics.loaded,
            skipped = cache.diagnostics.skipped(),
            "built catalog cache"
        );
        cache
    }

    /// Build the cache from already constructed records
    pub fn from_items(items: impl IntoIterator<Item = ItemRecord>) -> Self {
        let mut cache = Self::default();
        for item in items {
            cache.push(item);
        }
        cache.diagnostics.loaded = cache.items.len();
        cache
    }

    /// Parse a JSON snapshot and build the cache
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::build(parse_json_snapshot(json)?))
    }

    /// Load a snapshot file, detecting its format from the extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        Ok(Self::build(read_snapshot(path, SnapshotFormat::detect(path))?))
    }

    fn push(&mut self, item: ItemRecord) {
        let index = self.items.len();
        if !item.id.is_empty() {
            self.id_to_index.entry(item.id.clone()).or_insert(index);
        }
        self.name_to_index.entry(item.name.clone()).or_insert(index);
        self.items.push(Arc::new(item));
    }

    /// All records in snapshot order
    #[must_use]
    pub fn items(&self) -> &[Arc<ItemRecord>] {
        &self.items
    }

    /// Get an item by ID
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Arc<ItemRecord>> {
        self.id_to_index.get(id).map(|&idx| &self.items[idx])
    }

    /// Get an item by its exact display name
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<ItemRecord>> {
        self.name_to_index.get(name).map(|&idx| &self.items[idx])
    }

    #[must_use]
    pub fn diagnostics(&self) -> &LoadDiagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let mut by_item_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut base_names: HashSet<&str> = HashSet::new();
        let mut with_wear_tier = 0;

        for item in &self.items {
            *by_item_type.entry(item.item_type.clone()).or_default() += 1;
            base_names.insert(item.base_name.as_str());
            if item.wear_tier().is_some() {
                with_wear_tier += 1;
            }
        }

        CatalogStats {
            items: self.items.len(),
            skipped_rows: self.diagnostics.skipped(),
            base_names: base_names.len(),
            with_wear_tier,
            by_item_type,
        }
    }

    /// Export catalog to the versioned JSON form
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            items: self.items.iter().map(|item| item.to_raw()).collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of items in catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
