pub mod configure;
pub mod generate;
pub mod packs;
pub mod regenerate;
pub mod show;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use cw_core::actor::ActorSystem;
use cw_core::{ActorDirectory, InMemoryActorRepository, ItemRecord};
use cw_generator::{CharacterGenerator, GenerationConfig, GeneratorRules, ModuleSettings};
use cw_mechanics::DiceOracle;
use cw_tables::{Compendium, CompendiumLookup};

/// File locations and seed shared by every command.
pub struct Context {
    pub compendium: PathBuf,
    pub settings: PathBuf,
    pub rules: Option<PathBuf>,
    pub store: PathBuf,
    pub seed: Option<u64>,
}

impl Context {
    pub fn load_settings(&self) -> Result<ModuleSettings, String> {
        ModuleSettings::load(&self.settings)
            .map_err(|e| format!("{}: {e}", self.settings.display()))
    }

    pub fn load_rules(&self) -> Result<GeneratorRules, String> {
        match &self.rules {
            Some(path) => {
                if !path.exists() {
                    return Err(format!("rules file not found: {}", path.display()));
                }
                GeneratorRules::load(path).map_err(|e| format!("{}: {e}", path.display()))
            }
            None => Ok(GeneratorRules::default()),
        }
    }

    pub fn open_lookup(&self) -> Result<CompendiumLookup, String> {
        if !self.compendium.exists() {
            return Err(format!(
                "compendium not found: {}",
                self.compendium.display()
            ));
        }
        let compendium = Compendium::load(&self.compendium)
            .map_err(|e| format!("{}: {e}", self.compendium.display()))?;
        Ok(match self.seed {
            Some(seed) => CompendiumLookup::seeded(compendium, seed),
            None => CompendiumLookup::from_entropy(compendium),
        })
    }

    pub fn oracle(&self) -> DiceOracle {
        match self.seed {
            Some(seed) => DiceOracle::seeded(seed),
            None => DiceOracle::from_entropy(),
        }
    }

    pub fn load_store(&self) -> Result<ActorDirectory, String> {
        ActorDirectory::load(&self.store).map_err(|e| format!("{}: {e}", self.store.display()))
    }

    pub fn save_store(&self, directory: &ActorDirectory) -> Result<(), String> {
        directory
            .save(&self.store)
            .map_err(|e| format!("{}: {e}", self.store.display()))
    }

    /// Build the generator plus the configuration derived from settings.
    ///
    /// Refuses to run until both packs have been configured.
    pub fn generator(
        &self,
        actors: Arc<InMemoryActorRepository>,
    ) -> Result<(CharacterGenerator, GenerationConfig), String> {
        let settings = self.load_settings()?;
        if settings.character_creation_options.is_empty() || settings.character_traits.is_empty()
        {
            return Err(
                "no packs configured. Run: cw configure --options <pack> --traits <pack>".into(),
            );
        }
        let config = GenerationConfig::from_settings(&settings, &self.load_rules()?);
        let generator = CharacterGenerator::new(
            Arc::new(self.open_lookup()?),
            Arc::new(self.oracle()),
            actors,
        );
        Ok((generator, config))
    }
}

/// Print a character sheet: header, scores, texts, then the item table.
pub fn print_sheet(name: &str, system: &ActorSystem, items: &[&ItemRecord]) {
    let abilities = &system.abilities;
    println!("  {}", name.bold());
    println!();
    println!(
        "  STR {:>2}   DEX {:>2}   WIL {:>2}   HP {:>2}   Gold {}",
        abilities.strength.max,
        abilities.dexterity.max,
        abilities.willpower.max,
        system.hp.max,
        system.gold
    );
    println!();
    println!("  {}  {}", "background:".dimmed(), system.background);
    println!("  {}   {}", "biography:".dimmed(), system.biography);
    println!();

    if items.is_empty() {
        println!("  No items.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Type", "Qty"]);
    for item in items {
        let quantity = item.quantity.map_or_else(|| "—".to_string(), |q| q.to_string());
        table.add_row(vec![item.name.as_str(), item.item_type.as_str(), quantity.as_str()]);
    }
    println!("{table}");
}

/// Pretty JSON for `--json` output.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("cannot serialize: {e}"))
}
