//! Persisted module settings and the game system's generator rules.
//!
//! Both are plain JSON files. Settings use the host's setting keys
//! (`character-creation-options`, `character-traits`, `devMode`) so files
//! exported from a host can be read directly.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsResult;

/// User-chosen packs and developer mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleSettings {
    /// Log generation details at debug level.
    #[serde(rename = "devMode", default)]
    pub dev_mode: bool,
    /// Pack holding the names and starting-gear tables.
    #[serde(default)]
    pub character_creation_options: String,
    /// Pack holding the trait, background and surname tables.
    #[serde(default)]
    pub character_traits: String,
}

impl ModuleSettings {
    /// Settings pointing at the given option and trait packs.
    pub fn new(options: impl Into<String>, traits: impl Into<String>) -> Self {
        Self {
            dev_mode: false,
            character_creation_options: options.into(),
            character_traits: traits.into(),
        }
    }

    /// Enable or disable developer mode.
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// Load settings. A missing file yields defaults.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Write settings as pretty JSON.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Biography age formula and template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiographyRules {
    /// Formula for the character's age.
    pub age: String,
    /// Template with `{age}` and trait placeholders.
    pub text: String,
}

/// The game system's character-generator block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorRules {
    /// Formula rolled once per ability score.
    pub ability: String,
    /// Formula for hit protection.
    pub hit_protection: String,
    /// Formula for starting gold.
    pub gold: String,
    /// Biography generation.
    pub biography: BiographyRules,
    /// Fixed starting items as `pack;item[;quantity]` addresses.
    pub starting_items: Vec<String>,
}

/// Cairn's default biography template.
pub const DEFAULT_BIOGRAPHY: &str = "I am {age} years old. I have a {physique} physique, \
{skin} skin, {hair} hair and a {face} face. I speak with a {speech} voice and wear \
{clothing} clothes. I am {virtue} but {vice}, and I am generally regarded as {reputation}. \
I have been {misfortune} in the past.";

impl Default for GeneratorRules {
    fn default() -> Self {
        Self {
            ability: "3d6".to_string(),
            hit_protection: "1d6".to_string(),
            gold: "3d6".to_string(),
            biography: BiographyRules {
                age: "2d20+10".to_string(),
                text: DEFAULT_BIOGRAPHY.to_string(),
            },
            starting_items: vec![
                "cairn.items;Torch".to_string(),
                "cairn.items;Rations;3".to_string(),
            ],
        }
    }
}

impl GeneratorRules {
    /// Load rules. A missing file yields Cairn defaults; missing fields in
    /// the file fall back to the defaults individually.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Replace the fixed starting items.
    pub fn with_starting_items(mut self, items: Vec<String>) -> Self {
        self.starting_items = items;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn settings_use_host_keys() {
        let settings = ModuleSettings::new("cairn.options", "cairn.traits").with_dev_mode(true);
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["character-creation-options"], "cairn.options");
        assert_eq!(json["character-traits"], "cairn.traits");
        assert_eq!(json["devMode"], true);
    }

    #[test]
    fn settings_default_when_keys_missing() {
        let settings: ModuleSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ModuleSettings::default());
        assert!(!settings.dev_mode);
    }

    #[test]
    fn settings_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(ModuleSettings::load(&path).unwrap(), ModuleSettings::default());

        let settings = ModuleSettings::new("a", "b");
        settings.save(&path).unwrap();
        assert_eq!(ModuleSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn rules_partial_file_keeps_defaults() {
        let rules: GeneratorRules =
            serde_json::from_str(r#"{"ability": "4d6", "startingItems": []}"#).unwrap();
        assert_eq!(rules.ability, "4d6");
        assert_eq!(rules.hit_protection, "1d6");
        assert!(rules.starting_items.is_empty());
        assert_eq!(rules.biography.age, "2d20+10");
    }

    #[test]
    fn default_biography_mentions_every_trait() {
        for key in [
            "age", "clothing", "face", "hair", "misfortune", "physique", "reputation", "skin",
            "speech", "vice", "virtue",
        ] {
            assert!(DEFAULT_BIOGRAPHY.contains(&format!("{{{key}}}")), "missing {key}");
        }
    }
}
