//! Weighted roll tables.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use cw_core::{ItemRecord, LookupError};

/// One row of a roll table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableResult {
    /// Display text. Empty for rows that only carry an item.
    #[serde(default)]
    pub text: String,
    /// Relative draw weight. Zero-weight rows are never drawn.
    #[serde(default = "default_weight")]
    pub weight: u32,
    /// Item embedded in this row, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemRecord>,
}

fn default_weight() -> u32 {
    1
}

impl TableResult {
    /// A text-only row with weight 1.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: 1,
            item: None,
        }
    }

    /// An item row with weight 1, displayed by the item's name.
    pub fn item(item: ItemRecord) -> Self {
        Self {
            text: String::new(),
            weight: 1,
            item: Some(item),
        }
    }

    /// Set the weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// The row's text, falling back to the embedded item's name.
    pub fn display_text(&self) -> &str {
        match (&self.item, self.text.is_empty()) {
            (Some(item), true) => &item.name,
            _ => &self.text,
        }
    }
}

/// A named weighted list of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollTable {
    /// Table name, unique within its pack.
    pub name: String,
    /// Rows.
    #[serde(default)]
    pub results: Vec<TableResult>,
}

impl RollTable {
    /// An empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Vec::new(),
        }
    }

    /// Append a row.
    pub fn with_result(mut self, result: TableResult) -> Self {
        self.results.push(result);
        self
    }

    /// Draw one row, with probability proportional to its weight.
    pub fn draw(&self, rng: &mut StdRng) -> Result<&TableResult, LookupError> {
        self.results
            .choose_weighted(rng, |r| r.weight)
            .map_err(|_| LookupError::EmptyTable(self.name.clone()))
    }
}
