//! Packs of tables and item templates.
//!
//! A compendium file is JSON:
//!
//! ```text
//! {
//!   "packs": [
//!     {
//!       "id": "cairn.character-options",
//!       "label": "Character Options",
//!       "tables": [{ "name": "Names", "results": [{ "text": "Ardan" }] }],
//!       "items": [{ "name": "Torch", "type": "item" }]
//!     }
//!   ]
//! }
//! ```

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use cw_core::{ItemRecord, LookupError, PackSummary};

use crate::error::{CompendiumError, CompendiumResult};
use crate::table::RollTable;

/// A named collection of roll tables and item templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    /// Identifier used as the first component of a table address.
    pub id: String,
    /// Display label. Defaults to the id.
    #[serde(default)]
    pub label: String,
    /// Roll tables.
    #[serde(default)]
    pub tables: Vec<RollTable>,
    /// Item templates found by name without rolling.
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

impl Pack {
    /// An empty pack whose label equals its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            tables: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Add a table.
    pub fn with_table(mut self, table: RollTable) -> Self {
        self.tables.push(table);
        self
    }

    /// Add an item template.
    pub fn with_item(mut self, item: ItemRecord) -> Self {
        self.items.push(item);
        self
    }

    /// Find a table by exact name.
    pub fn table(&self, name: &str) -> Result<&RollTable, LookupError> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| self.not_found(name))
    }

    /// Find an item template by exact name.
    pub fn item(&self, name: &str) -> Result<&ItemRecord, LookupError> {
        self.items
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| self.not_found(name))
    }

    /// Names of every table and item in the pack.
    pub fn entry_names(&self) -> BTreeSet<String> {
        self.tables
            .iter()
            .map(|t| t.name.clone())
            .chain(self.items.iter().map(|i| i.name.clone()))
            .collect()
    }

    /// Identifier and label.
    pub fn summary(&self) -> PackSummary {
        PackSummary {
            id: self.id.clone(),
            label: self.label.clone(),
        }
    }

    fn not_found(&self, name: &str) -> LookupError {
        LookupError::TableNotFound {
            pack: self.id.clone(),
            table: name.to_string(),
        }
    }
}

/// A set of packs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compendium {
    /// The packs, in file order.
    #[serde(default)]
    pub packs: Vec<Pack>,
}

impl Compendium {
    /// An empty compendium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pack.
    pub fn with_pack(mut self, pack: Pack) -> Self {
        self.packs.push(pack);
        self
    }

    /// Parse a compendium from JSON, filling empty labels and rejecting
    /// duplicate pack ids.
    pub fn from_json(json: &str) -> CompendiumResult<Self> {
        let mut compendium: Self = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        for pack in &mut compendium.packs {
            if !seen.insert(pack.id.clone()) {
                return Err(CompendiumError::DuplicatePack(pack.id.clone()));
            }
            if pack.label.is_empty() {
                pack.label = pack.id.clone();
            }
        }
        Ok(compendium)
    }

    /// Load a compendium file.
    pub fn load(path: &Path) -> CompendiumResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Find a pack by id.
    pub fn pack(&self, id: &str) -> Result<&Pack, LookupError> {
        self.packs
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| LookupError::PackNotFound(id.to_string()))
    }

    /// Pack summaries sorted by label.
    pub fn summaries(&self) -> Vec<PackSummary> {
        let mut packs: Vec<PackSummary> = self.packs.iter().map(Pack::summary).collect();
        packs.sort_by(|a, b| a.label.cmp(&b.label));
        packs
    }
}
