//! The assembled character.

use cw_core::ItemRecord;
use serde::{Deserialize, Serialize};

/// Rolled ability scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    /// Strength.
    #[serde(rename = "STR")]
    pub strength: i64,
    /// Dexterity.
    #[serde(rename = "DEX")]
    pub dexterity: i64,
    /// Willpower.
    #[serde(rename = "WIL")]
    pub willpower: i64,
}

/// A fully assembled character, ready to be written to an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Full name.
    pub name: String,
    /// Hit protection.
    pub hp: i64,
    /// Gold pieces.
    pub gold: i64,
    /// Ability scores.
    pub abilities: AbilityScores,
    /// Background text.
    pub background: String,
    /// Biography text.
    pub biography: String,
    /// Starting items followed by starting gear.
    pub items: Vec<ItemRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_output_schema() {
        let record = CharacterRecord {
            name: "Ardan Voss".to_string(),
            hp: 4,
            gold: 11,
            abilities: AbilityScores {
                strength: 10,
                dexterity: 12,
                willpower: 9,
            },
            background: "Cutpurse".to_string(),
            biography: "Short.".to_string(),
            items: vec![ItemRecord::new("Torch", "item").with_quantity(1)],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["abilities"]["STR"], 10);
        assert_eq!(json["abilities"]["WIL"], 9);
        assert_eq!(json["items"][0]["name"], "Torch");
        assert_eq!(json["hp"], 4);
    }
}
