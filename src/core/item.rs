use serde::{Deserialize, Deserializer, Serialize};

use crate::core::types::{ItemId, Wear};
use crate::parsing::name::parse_item_name;
use crate::parsing::normalize::normalize;

/// A catalog row as supplied by the external store. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// Pass-through value; anything that is not a number reads as absent
    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

impl RawItemRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Accept numbers and numeric strings, drop anything else
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// An item in the catalog cache
///
/// Derived fields are computed once from `name` in [`ItemRecord::from_raw`]
/// and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecord {
    /// Opaque identifier from the store (empty when the row had none)
    pub id: ItemId,

    /// Full display name, e.g. "Negev | Bulkhead (Factory New)"
    pub name: String,

    pub collection: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    pub price_type: String,

    /// Category such as "skin", "case" or "graffiti"
    pub item_type: String,

    // === Derived from `name` ===
    pub weapon: String,

    pub skin_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wear: Option<String>,

    /// "{weapon} | {skin_name}"
    pub base_name: String,

    #[serde(skip)]
    pub normalized: String,

    #[serde(skip)]
    pub base_normalized: String,

    #[serde(skip)]
    pub weapon_normalized: String,

    #[serde(skip)]
    pub skin_normalized: String,
}

impl ItemRecord {
    /// Build a record from a raw row. Returns `None` when the row has no name.
    #[must_use]
    pub fn from_raw(raw: RawItemRecord) -> Option<Self> {
        let name = raw.name.filter(|n| !n.trim().is_empty())?;
        let parsed = parse_item_name(&name);
        let base_name = format!("{} | {}", parsed.weapon, parsed.skin);

        Some(Self {
            id: raw.id.unwrap_or_default(),
            normalized: normalize(&name),
            base_normalized: normalize(&base_name),
            weapon_normalized: normalize(&parsed.weapon),
            skin_normalized: normalize(&parsed.skin),
            name,
            collection: raw.collection.unwrap_or_default(),
            price: raw.price,
            price_type: raw.price_type.unwrap_or_default(),
            item_type: raw.item_type.unwrap_or_default(),
            weapon: parsed.weapon,
            skin_name: parsed.skin,
            wear: parsed.wear,
            base_name,
        })
    }

    /// Convenience constructor used by tests and tools
    #[must_use]
    pub fn new(id: impl Into<String>, name: &str) -> Self {
        let id = ItemId::new(id);
        let raw = RawItemRecord {
            id: Some(id.clone()),
            ..RawItemRecord::named(name)
        };
        // An empty name still yields a record so callers never have to unwrap
        Self::from_raw(raw).unwrap_or_else(|| Self::empty(id))
    }

    #[must_use]
    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = item_type.into();
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Canonical wear tier, if the wear suffix names one
    #[must_use]
    pub fn wear_tier(&self) -> Option<Wear> {
        self.wear.as_deref().and_then(Wear::from_label)
    }

    /// Convert back to the store's row shape
    #[must_use]
    pub fn to_raw(&self) -> RawItemRecord {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        RawItemRecord {
            id: (!self.id.is_empty()).then(|| self.id.clone()),
            name: Some(self.name.clone()),
            collection: non_empty(&self.collection),
            price: self.price,
            price_type: non_empty(&self.price_type),
            item_type: non_empty(&self.item_type),
        }
    }

    fn empty(id: ItemId) -> Self {
        Self {
            id,
            name: String::new(),
            collection: String::new(),
            price: None,
            price_type: String::new(),
            item_type: String::new(),
            weapon: String::new(),
            skin_name: String::new(),
            wear: None,
            base_name: String::new(),
            normalized: String::new(),
            base_normalized: String::new(),
            weapon_normalized: String::new(),
            skin_normalized: String::new(),
        }
    }
}
