use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an item embedded in an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a new random item ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A flexible metadata value that supports common types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// A text value.
    String(String),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// An ordered list of metadata values.
    List(Vec<MetadataValue>),
    /// A string-keyed map of metadata values.
    Map(HashMap<String, MetadataValue>),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Map(_) => write!(f, "{{...}}"),
        }
    }
}

/// An item-like record as handed out by a table backend.
///
/// Backends return owned copies, so stamping a quantity or editing system
/// data on one record never reaches the backend's template or any other
/// generated character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Display name.
    pub name: String,
    /// Item type as understood by the game system (weapon, armor, item…).
    #[serde(rename = "type", default = "default_item_type")]
    pub item_type: String,
    /// Optional image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// System-specific data (damage, armor value, slots…).
    #[serde(default)]
    pub system: BTreeMap<String, MetadataValue>,
    /// Stack size, set when the item comes from a fixed starting-item address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

fn default_item_type() -> String {
    "item".to_string()
}

impl ItemRecord {
    /// Create a record with the given name and type and no system data.
    pub fn new(name: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_type: item_type.into(),
            img: None,
            system: BTreeMap::new(),
            quantity: None,
        }
    }

    /// Set a system data field.
    pub fn with_system(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.system.insert(key.into(), value);
        self
    }

    /// Set the image path.
    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = Some(img.into());
        self
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }
}
