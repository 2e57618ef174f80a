use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::item::{ItemId, ItemRecord};

/// Image used for actors that have not been given a portrait.
pub const DEFAULT_ACTOR_IMG: &str = "icons/svg/mystery-man.svg";

/// Unique identifier for every actor in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Generate a new random actor ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Unique identifier for a placed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(pub Uuid);

impl TokenId {
    /// Generate a new random token ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A tracked value with a current value and a maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Current value.
    pub value: i64,
    /// Maximum value.
    pub max: i64,
}

impl Resource {
    /// A resource at its maximum.
    pub fn full(max: i64) -> Self {
        Self { value: max, max }
    }
}

/// The three Cairn ability scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    /// Strength.
    #[serde(rename = "STR")]
    pub strength: Resource,
    /// Dexterity.
    #[serde(rename = "DEX")]
    pub dexterity: Resource,
    /// Willpower.
    #[serde(rename = "WIL")]
    pub willpower: Resource,
}

/// Game-system data stored on a character actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorSystem {
    /// Ability scores.
    pub abilities: Abilities,
    /// Hit protection.
    pub hp: Resource,
    /// Background text.
    pub background: String,
    /// Biography text.
    pub biography: String,
    /// Gold pieces.
    pub gold: i64,
}

/// How a token regards the party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenDisposition {
    /// Hostile to the party.
    Hostile,
    /// Neutral.
    Neutral,
    /// Friendly to the party.
    #[default]
    Friendly,
}

impl fmt::Display for TokenDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hostile => write!(f, "hostile"),
            Self::Neutral => write!(f, "neutral"),
            Self::Friendly => write!(f, "friendly"),
        }
    }
}

/// Template that placed tokens of an actor are created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrototypeToken {
    /// Name shown on the token.
    pub name: String,
    /// Disposition toward the party.
    pub disposition: TokenDisposition,
    /// Whether tokens share data with the actor.
    pub actor_link: bool,
    /// Whether the token has vision.
    pub vision: bool,
}

impl PrototypeToken {
    /// A linked, friendly token with vision.
    pub fn friendly(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disposition: TokenDisposition::Friendly,
            actor_link: true,
            vision: true,
        }
    }
}

/// The full set of fields written when creating or updating a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorData {
    /// Actor name.
    pub name: String,
    /// Actor type (always `character` for generated actors).
    #[serde(rename = "type")]
    pub actor_type: String,
    /// System data.
    pub system: ActorSystem,
    /// Embedded items, in sheet order.
    pub items: Vec<ItemRecord>,
    /// Prototype token.
    pub token: PrototypeToken,
}

/// An item embedded in an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedItem {
    /// Embedded item ID.
    pub id: ItemId,
    /// The item data.
    #[serde(flatten)]
    pub record: ItemRecord,
}

/// A persisted actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Unique identifier.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Portrait image.
    pub img: String,
    /// Actor type.
    #[serde(rename = "type")]
    pub actor_type: String,
    /// System data.
    pub system: ActorSystem,
    /// Embedded items.
    pub items: Vec<EmbeddedItem>,
    /// Prototype token.
    pub prototype_token: PrototypeToken,
    /// Timestamp when the actor was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the actor was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Actor {
    /// Build a new actor from creation data.
    pub fn from_data(data: ActorData) -> Self {
        let now = Utc::now();
        Self {
            id: ActorId::new(),
            name: data.name,
            img: DEFAULT_ACTOR_IMG.to_string(),
            actor_type: data.actor_type,
            system: data.system,
            items: embed(data.items),
            prototype_token: data.token,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite this actor's fields with `data`.
    ///
    /// Items in `data` are appended to the embedded collection; callers that
    /// want a replacement clear the collection first.
    pub fn apply(&mut self, data: ActorData) {
        self.name = data.name;
        self.actor_type = data.actor_type;
        self.system = data.system;
        self.items.extend(embed(data.items));
        self.prototype_token = data.token;
        self.updated_at = Utc::now();
    }

    /// The embedded item data, in sheet order.
    pub fn item_records(&self) -> impl Iterator<Item = &ItemRecord> {
        self.items.iter().map(|i| &i.record)
    }
}

fn embed(items: Vec<ItemRecord>) -> Vec<EmbeddedItem> {
    items
        .into_iter()
        .map(|record| EmbeddedItem {
            id: ItemId::new(),
            record,
        })
        .collect()
}

/// A placed visual representation of an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Unique identifier.
    pub id: TokenId,
    /// The actor this token represents.
    pub actor_id: ActorId,
    /// Displayed name.
    pub name: String,
    /// Displayed image.
    pub img: String,
    /// Disposition toward the party.
    pub disposition: TokenDisposition,
}

/// Fields re-synced onto a token from its actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUpdate {
    /// New displayed name.
    pub name: String,
    /// New displayed image.
    pub img: String,
}
