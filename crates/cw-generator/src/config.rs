//! The explicit input to one generation request.
//!
//! Addresses are kept as strings and parsed during assembly, so a
//! malformed address aborts generation with [`AddressError`] rather than
//! being rejected when the configuration is built.
//!
//! [`AddressError`]: crate::error::AddressError

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::SEPARATOR;
use crate::settings::{GeneratorRules, ModuleSettings};

/// Template used for character names.
pub const NAME_TEMPLATE: &str = "{name} {surname}";

/// Biography placeholder keys and the trait tables they draw from.
pub const BIOGRAPHY_TRAITS: [(&str, &str); 10] = [
    ("clothing", "Clothing"),
    ("face", "Face"),
    ("hair", "Hair"),
    ("misfortune", "Misfortunes"),
    ("physique", "Physique"),
    ("reputation", "Reputation"),
    ("skin", "Skin"),
    ("speech", "Speech"),
    ("vice", "Vice"),
    ("virtue", "Virtue"),
];

/// Starting gear categories, in sheet order.
pub const GEAR_CATEGORIES: [&str; 7] = [
    "Armor",
    "Helmet & Shields",
    "Weapons",
    "Expeditionary Gear",
    "Tools",
    "Trinkets",
    "Bonus Item",
];

/// A template plus the table each placeholder draws from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpec {
    /// Text with `{key}` placeholders.
    pub text: String,
    /// Placeholder key to table address.
    pub items: BTreeMap<String, String>,
}

impl TemplateSpec {
    /// A template with no mapped placeholders yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            items: BTreeMap::new(),
        }
    }

    /// Map a placeholder key to a table address.
    pub fn with_item(mut self, key: impl Into<String>, address: impl Into<String>) -> Self {
        self.items.insert(key.into(), address.into());
        self
    }
}

/// Biography template, age formula and trait tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiographySpec {
    /// Formula for `{age}`.
    pub age: String,
    /// Text with `{age}` and trait placeholders.
    pub text: String,
    /// Trait key to table address.
    pub items: BTreeMap<String, String>,
}

impl BiographySpec {
    /// A biography with the given age formula and template.
    pub fn new(age: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            age: age.into(),
            text: text.into(),
            items: BTreeMap::new(),
        }
    }

    /// Map a trait key to a table address.
    pub fn with_item(mut self, key: impl Into<String>, address: impl Into<String>) -> Self {
        self.items.insert(key.into(), address.into());
        self
    }
}

/// Everything the assembler needs for one character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Formula rolled for each ability score.
    pub ability: String,
    /// Formula for hit protection.
    pub hit_points: String,
    /// Formula for starting gold.
    pub gold: String,
    /// Name template and tables.
    pub name: TemplateSpec,
    /// Biography template, age and traits.
    pub biography: BiographySpec,
    /// Background table address.
    pub background: String,
    /// Fixed item addresses, optionally with a quantity.
    pub starting_items: Vec<String>,
    /// Roll tables drawn once each for gear.
    pub starting_gear: Vec<String>,
}

impl GenerationConfig {
    /// Derive the configuration from the chosen packs and the system rules.
    pub fn from_settings(settings: &ModuleSettings, rules: &GeneratorRules) -> Self {
        let options = settings.character_creation_options.as_str();
        let traits = settings.character_traits.as_str();

        let name = TemplateSpec::new(NAME_TEMPLATE)
            .with_item("name", address(options, "Names"))
            .with_item("surname", address(traits, "Surnames"));

        let biography = BIOGRAPHY_TRAITS.iter().fold(
            BiographySpec::new(&rules.biography.age, &rules.biography.text),
            |spec, (key, table)| spec.with_item(*key, address(traits, table)),
        );

        let starting_gear = GEAR_CATEGORIES
            .iter()
            .map(|category| address(options, &format!("Starting Gear - {category}")))
            .collect();

        Self {
            ability: rules.ability.clone(),
            hit_points: rules.hit_protection.clone(),
            gold: rules.gold.clone(),
            name,
            biography,
            background: address(traits, "Background"),
            starting_items: rules.starting_items.clone(),
            starting_gear,
        }
    }
}

fn address(pack: &str, table: &str) -> String {
    format!("{pack}{SEPARATOR}{table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GenerationConfig {
        GenerationConfig::from_settings(
            &ModuleSettings::new("cairn.options", "cairn.traits"),
            &GeneratorRules::default(),
        )
    }

    #[test]
    fn name_draws_from_both_packs() {
        let config = config();
        assert_eq!(config.name.text, "{name} {surname}");
        assert_eq!(config.name.items["name"], "cairn.options;Names");
        assert_eq!(config.name.items["surname"], "cairn.traits;Surnames");
    }

    #[test]
    fn biography_maps_every_trait_to_the_traits_pack() {
        let config = config();
        assert_eq!(config.biography.items.len(), 10);
        assert_eq!(config.biography.items["misfortune"], "cairn.traits;Misfortunes");
        assert_eq!(config.biography.items["hair"], "cairn.traits;Hair");
        assert_eq!(config.biography.age, "2d20+10");
    }

    #[test]
    fn gear_follows_category_order() {
        let config = config();
        assert_eq!(
            config.starting_gear,
            vec![
                "cairn.options;Starting Gear - Armor",
                "cairn.options;Starting Gear - Helmet & Shields",
                "cairn.options;Starting Gear - Weapons",
                "cairn.options;Starting Gear - Expeditionary Gear",
                "cairn.options;Starting Gear - Tools",
                "cairn.options;Starting Gear - Trinkets",
                "cairn.options;Starting Gear - Bonus Item",
            ]
        );
    }

    #[test]
    fn formulas_and_items_come_from_rules() {
        let rules = GeneratorRules::default().with_starting_items(vec!["x;Rope;2".to_string()]);
        let config =
            GenerationConfig::from_settings(&ModuleSettings::new("o", "t"), &rules);
        assert_eq!(config.ability, "3d6");
        assert_eq!(config.hit_points, "1d6");
        assert_eq!(config.gold, "3d6");
        assert_eq!(config.background, "t;Background");
        assert_eq!(config.starting_items, vec!["x;Rope;2"]);
    }
}
