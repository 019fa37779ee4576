use crate::catalog::store::CatalogError;
use crate::core::item::RawItemRecord;
use crate::core::types::ItemId;
use tracing::warn;

/// Columns a catalog table may carry. Only `name` is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Name,
    Collection,
    Price,
    PriceType,
    ItemType,
    Ignored,
}

impl Column {
    fn from_header(field: &str) -> Self {
        match field.trim().to_lowercase().as_str() {
            "id" => Self::Id,
            "name" => Self::Name,
            "collection" => Self::Collection,
            "price" => Self::Price,
            "price_type" => Self::PriceType,
            "item_type" | "type" => Self::ItemType,
            _ => Self::Ignored,
        }
    }
}

/// Parse a TSV/CSV catalog snapshot with a header row
///
/// Blank lines and lines starting with `#` are ignored. CSV fields may be
/// double-quoted (RFC 4180), TSV fields are taken literally. Rows with an
/// empty `name` are kept as nameless rows so the cache build can count them.
/// A `price` that is not a number is left empty.
///
/// # Errors
///
/// Returns `CatalogError::InvalidFormat` if there is no header row, the
/// header has no `name` column, or a row cannot be tokenized.
pub fn parse_catalog_tsv(text: &str, delimiter: char) -> Result<Vec<RawItemRecord>, CatalogError> {
    let delimiter = u8::try_from(delimiter).map_err(|_| {
        CatalogError::InvalidFormat(format!("Unsupported delimiter {delimiter:?}"))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quoting(delimiter == b',')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut columns: Option<Vec<Column>> = None;
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| CatalogError::InvalidFormat(e.to_string()))?;
        if record.iter().all(str::is_empty) || record.get(0).is_some_and(|f| f.starts_with('#')) {
            continue;
        }

        // First non-empty/non-comment line is the header
        if columns.is_none() {
            let header: Vec<Column> = record.iter().map(Column::from_header).collect();
            if !header.contains(&Column::Name) {
                return Err(CatalogError::InvalidFormat(
                    "Header row has no 'name' column".to_string(),
                ));
            }
            columns = Some(header);
            continue;
        }
        let Some(columns) = columns.as_ref() else {
            continue;
        };

        let line_num = record.position().map_or(0, csv::Position::line);
        let mut row = RawItemRecord::default();

        for (column, value) in columns.iter().zip(record.iter()) {
            if value.is_empty() {
                continue;
            }
            match column {
                Column::Id => row.id = Some(ItemId::new(value)),
                Column::Name => row.name = Some(value.to_string()),
                Column::Collection => row.collection = Some(value.to_string()),
                Column::Price => match value.parse() {
                    Ok(price) => row.price = Some(price),
                    Err(_) => warn!(line = line_num, value, "ignoring non-numeric price"),
                },
                Column::PriceType => row.price_type = Some(value.to_string()),
                Column::ItemType => row.item_type = Some(value.to_string()),
                Column::Ignored => {}
            }
        }

        rows.push(row);
    }

    if columns.is_none() {
        return Err(CatalogError::InvalidFormat(
            "No header row found in catalog".to_string(),
        ));
    }

    Ok(rows)
}
