//! Core data types for item identification.
//!
//! - [`item::ItemRecord`]: A catalog item with its name parsed and normalized
//! - [`item::RawItemRecord`]: A row as it comes from the item store
//! - [`types::Wear`]: The five canonical wear tiers, in display order
//! - [`types::Confidence`], [`types::MatchStatus`]: Result classification types
//!
//! ## Item Names
//!
//! Catalog names follow `weapon | skin (wear)`:
//!
//! | Name | Weapon | Skin | Wear |
//! |------|--------|------|------|
//! | AK-47 \| Redline (Field-Tested) | AK-47 | Redline | Field-Tested |
//! | ★ Karambit \| Fade (Factory New) | ★ Karambit | Fade | Factory New |
//! | Chroma 2 Case | Chroma | 2 Case | - |
//!
//! Names without a pipe split at the first whitespace, so the components of
//! non-weapon items are only loosely meaningful.

pub mod item;
pub mod types;
