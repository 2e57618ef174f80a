//! Required-table checks for the configured packs.

use cw_core::TableLookupPort;

use crate::error::ValidationError;
use crate::settings::ModuleSettings;

/// Tables the character creation options pack must provide.
pub const REQUIRED_OPTION_TABLES: [&str; 16] = [
    "Names",
    "Starting Gear - Armor",
    "Starting Gear - Bonus Item",
    "Starting Gear - Bonus Item - Armor or Weapon",
    "Starting Gear - Bonus Item - Tool or Trinket",
    "Starting Gear - Expeditionary Gear",
    "Starting Gear - Helmet & Shields",
    "Starting Gear - Helmets",
    "Starting Gear - Spellbooks",
    "Starting Gear - Tools",
    "Starting Gear - Trinkets",
    "Starting Gear - Weapons",
    "Starting Gear - Weapons - One-Handed Melee",
    "Starting Gear - Weapons - Ranged",
    "Starting Gear - Weapons - Simple",
    "Starting Gear - Weapons - Two-Handed Melee",
];

/// Tables the character traits pack must provide.
pub const REQUIRED_TRAIT_TABLES: [&str; 14] = [
    "Background",
    "Clothing",
    "Face",
    "Female Names",
    "Hair",
    "Male Names",
    "Misfortunes",
    "Physique",
    "Reputation",
    "Skin",
    "Speech",
    "Surnames",
    "Vice",
    "Virtue",
];

/// Label used in messages about the options pack.
pub const OPTIONS_LABEL: &str = "character creation";
/// Label used in messages about the traits pack.
pub const TRAITS_LABEL: &str = "traits";

/// Check one pack against a required list.
///
/// Returns a single error naming every missing table, in required-list
/// order, or `None` when the pack is complete.
pub async fn validate_pack(
    tables: &dyn TableLookupPort,
    label: &str,
    pack: &str,
    required: &[&str],
) -> Option<ValidationError> {
    let names = match tables.list_entry_names(pack).await {
        Ok(names) => names,
        Err(err) => {
            tracing::debug!(pack, error = %err, "cannot list pack entries");
            return Some(ValidationError::PackNotFound {
                label: label.to_string(),
                pack: pack.to_string(),
            });
        }
    };

    let missing: Vec<String> = required
        .iter()
        .filter(|name| !names.contains(**name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        tracing::debug!(pack, label, "pack has every required table");
        None
    } else {
        Some(ValidationError::MissingTables {
            label: label.to_string(),
            pack: pack.to_string(),
            missing,
        })
    }
}

/// Check both configured packs independently.
pub async fn validate_settings(
    tables: &dyn TableLookupPort,
    settings: &ModuleSettings,
) -> Vec<ValidationError> {
    let options = validate_pack(
        tables,
        OPTIONS_LABEL,
        &settings.character_creation_options,
        &REQUIRED_OPTION_TABLES,
    )
    .await;
    let traits = validate_pack(
        tables,
        TRAITS_LABEL,
        &settings.character_traits,
        &REQUIRED_TRAIT_TABLES,
    )
    .await;
    options.into_iter().chain(traits).collect()
}
