//! End-to-end generation against stub ports and the reference adapters.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use cw_core::{
    ActorRepository, FormulaContext, FormulaError, FormulaOracle, InMemoryActorRepository,
    ItemRecord, LookupError, MetadataValue, PackSummary, TableLookupPort,
};
use cw_generator::validate::{REQUIRED_OPTION_TABLES, REQUIRED_TRAIT_TABLES};
use cw_generator::{
    BiographySpec, CharacterAssembler, CharacterGenerator, CharacterMaterializer,
    CharacterRecord, GenerationConfig, GeneratorRules, ModuleSettings, TemplateSpec,
};
use cw_mechanics::DiceOracle;
use cw_tables::{Compendium, CompendiumLookup, Pack, RollTable, TableResult};

// --- Stub ports ---

/// Returns fixed text per table name and fixed items per name.
struct StubTables {
    texts: HashMap<&'static str, &'static str>,
}

impl StubTables {
    fn new(texts: &[(&'static str, &'static str)]) -> Self {
        Self {
            texts: texts.iter().copied().collect(),
        }
    }
}

#[async_trait]
impl TableLookupPort for StubTables {
    async fn draw_text(&self, pack: &str, table: &str) -> Result<String, LookupError> {
        self.texts
            .get(table)
            .map(|s| s.to_string())
            .ok_or_else(|| LookupError::TableNotFound {
                pack: pack.to_string(),
                table: table.to_string(),
            })
    }

    async fn draw_item(&self, _pack: &str, table: &str) -> Result<ItemRecord, LookupError> {
        Ok(ItemRecord::new(format!("{table} item"), "item"))
    }

    async fn find_item(&self, _pack: &str, name: &str) -> Result<ItemRecord, LookupError> {
        Ok(ItemRecord::new(name, "item"))
    }

    async fn list_entry_names(&self, _pack: &str) -> Result<BTreeSet<String>, LookupError> {
        Ok(self.texts.keys().map(|k| k.to_string()).collect())
    }

    async fn list_packs(&self) -> Vec<PackSummary> {
        Vec::new()
    }
}

/// Hands out queued totals in order, ignoring the formula.
struct StubOracle {
    totals: Mutex<VecDeque<i64>>,
}

impl StubOracle {
    fn new(totals: &[i64]) -> Self {
        Self {
            totals: Mutex::new(totals.iter().copied().collect()),
        }
    }
}

#[async_trait]
impl FormulaOracle for StubOracle {
    async fn evaluate(&self, formula: &str, _context: &FormulaContext) -> Result<i64, FormulaError> {
        self.totals
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| FormulaError::Syntax {
                formula: formula.to_string(),
                message: "stub oracle exhausted".to_string(),
            })
    }
}

// --- Fixtures ---

fn stub_config() -> GenerationConfig {
    GenerationConfig {
        ability: "3d6".to_string(),
        hit_points: "1d6".to_string(),
        gold: "3d6".to_string(),
        name: TemplateSpec::new("{name} {surname}")
            .with_item("name", "opts;Names")
            .with_item("surname", "traits;Surnames"),
        biography: BiographySpec::new("2d20+10", "A {age}-year-old with {hair} hair.")
            .with_item("hair", "traits;Hair"),
        background: "traits;Background".to_string(),
        starting_items: vec!["items;Torch".to_string(), "items;Rations;3".to_string()],
        starting_gear: vec!["opts;Armor".to_string(), "opts;Trinkets".to_string()],
    }
}

fn stub_tables() -> Arc<StubTables> {
    Arc::new(StubTables::new(&[
        ("Names", "Ardan"),
        ("Surnames", "Voss"),
        ("Hair", "silver"),
        ("Background", "Cutpurse"),
    ]))
}

fn text_table(name: &str, entries: &[&str]) -> RollTable {
    entries
        .iter()
        .fold(RollTable::new(name), |table, text| {
            table.with_result(TableResult::text(*text))
        })
}

fn gear_table(name: &str, item: &str) -> RollTable {
    RollTable::new(name).with_result(TableResult::item(
        ItemRecord::new(item, "item").with_system("slots", MetadataValue::Integer(1)),
    ))
}

/// A compendium holding every table the default configuration reads.
fn cairn_compendium() -> Compendium {
    let options = REQUIRED_OPTION_TABLES.iter().fold(
        Pack::new("cairn.options").with_label("Character Options"),
        |pack, name| {
            if *name == "Names" {
                pack.with_table(text_table(name, &["Ardan", "Beatrix", "Cosmo"]))
            } else {
                pack.with_table(gear_table(name, &format!("{name} kit")))
            }
        },
    );
    let traits = REQUIRED_TRAIT_TABLES.iter().fold(
        Pack::new("cairn.traits").with_label("Character Traits"),
        |pack, name| {
            let one = format!("{name} one");
            let two = format!("{name} two");
            pack.with_table(text_table(name, &[one.as_str(), two.as_str()]))
        },
    );
    let items = Pack::new("cairn.items")
        .with_label("Items")
        .with_item(ItemRecord::new("Torch", "item"))
        .with_item(ItemRecord::new("Rations", "item"));
    Compendium::new()
        .with_pack(options)
        .with_pack(traits)
        .with_pack(items)
}

fn cairn_config() -> GenerationConfig {
    GenerationConfig::from_settings(
        &ModuleSettings::new("cairn.options", "cairn.traits"),
        &GeneratorRules::default(),
    )
}

fn seeded_generator(seed: u64) -> (CharacterGenerator, Arc<InMemoryActorRepository>) {
    let actors = Arc::new(InMemoryActorRepository::new());
    let generator = CharacterGenerator::new(
        Arc::new(CompendiumLookup::seeded(cairn_compendium(), seed)),
        Arc::new(DiceOracle::seeded(seed)),
        actors.clone(),
    );
    (generator, actors)
}

fn record_of(actor: &cw_core::Actor) -> CharacterRecord {
    CharacterRecord {
        name: actor.name.clone(),
        hp: actor.system.hp.max,
        gold: actor.system.gold,
        abilities: cw_generator::AbilityScores {
            strength: actor.system.abilities.strength.max,
            dexterity: actor.system.abilities.dexterity.max,
            willpower: actor.system.abilities.willpower.max,
        },
        background: actor.system.background.clone(),
        biography: actor.system.biography.clone(),
        items: actor.item_records().cloned().collect(),
    }
}

// --- Stub-driven assembly ---

#[tokio::test]
async fn stub_values_flow_into_the_record() {
    let assembler = CharacterAssembler::new(
        stub_tables(),
        Arc::new(StubOracle::new(&[9, 14, 7, 3, 12, 34])),
    );
    let record = assembler.assemble(&stub_config()).await.unwrap();

    assert_eq!(record.name, "Ardan Voss");
    assert_eq!(record.biography, "A 34-year-old with silver hair.");
    assert_eq!(record.background, "Cutpurse");
    assert_eq!(record.abilities.strength, 9);
    assert_eq!(record.abilities.dexterity, 14);
    assert_eq!(record.abilities.willpower, 7);
    assert_eq!(record.hp, 3);
    assert_eq!(record.gold, 12);

    let items: Vec<(&str, Option<u32>)> = record
        .items
        .iter()
        .map(|i| (i.name.as_str(), i.quantity))
        .collect();
    assert_eq!(
        items,
        vec![
            ("Torch", Some(1)),
            ("Rations", Some(3)),
            ("Armor item", None),
            ("Trinkets item", None),
        ]
    );
}

#[tokio::test]
async fn unknown_table_aborts_with_lookup_error() {
    let mut config = stub_config();
    config.background = "traits;Nowhere".to_string();
    let assembler = CharacterAssembler::new(
        stub_tables(),
        Arc::new(StubOracle::new(&[10, 10, 10, 10, 10, 30])),
    );

    let err = assembler.assemble(&config).await.unwrap_err();
    assert_eq!(err.to_string(), "table not found: \"Nowhere\" in pack \"traits\"");
}

// --- Reference adapters ---

#[tokio::test]
async fn same_seed_same_character() {
    let (first, _) = seeded_generator(42);
    let (second, _) = seeded_generator(42);
    let config = cairn_config();

    let a = first.preview(&config).await.unwrap();
    let b = second.preview(&config).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn default_rules_produce_a_full_sheet() {
    let (generator, _) = seeded_generator(7);
    let record = generator.preview(&cairn_config()).await.unwrap();

    for score in [
        record.abilities.strength,
        record.abilities.dexterity,
        record.abilities.willpower,
    ] {
        assert!((3..=18).contains(&score), "ability {score} out of 3d6 range");
    }
    assert!((1..=6).contains(&record.hp));
    assert!((3..=18).contains(&record.gold));
    assert!(!record.biography.contains("undefined"));
    assert!(!record.biography.contains('{'));

    // torch, rations, then seven gear draws
    assert_eq!(record.items.len(), 9);
    assert_eq!(record.items[1].name, "Rations");
    assert_eq!(record.items[1].quantity, Some(3));
    assert_eq!(record.items[2].name, "Starting Gear - Armor kit");
    assert_eq!(record.items[8].name, "Starting Gear - Bonus Item kit");
}

#[tokio::test]
async fn drawn_gear_is_never_shared() {
    let (generator, _) = seeded_generator(3);
    let config = cairn_config();

    let mut first = generator.preview(&config).await.unwrap();
    let second = generator.preview(&config).await.unwrap();
    first.items[2]
        .system
        .insert("slots".to_string(), MetadataValue::Integer(99));

    assert_eq!(second.items[2].system["slots"], MetadataValue::Integer(1));
    let lookup = CompendiumLookup::seeded(cairn_compendium(), 3);
    let fresh = lookup
        .draw_item("cairn.options", "Starting Gear - Armor")
        .await
        .unwrap();
    assert_eq!(fresh.system["slots"], MetadataValue::Integer(1));
}

#[tokio::test]
async fn created_actor_reads_back_as_the_record() {
    let (generator, actors) = seeded_generator(11);
    let config = cairn_config();
    let record = generator.preview(&config).await.unwrap();

    let materializer = CharacterMaterializer::new(actors.clone());
    let actor = materializer.create_new(record.clone()).await.unwrap();
    let stored = actors.get_actor(actor.id).await.unwrap();

    assert_eq!(record_of(&stored), record);
    assert_eq!(stored.actor_type, "character");
    assert_eq!(stored.prototype_token.name, record.name);
    assert_eq!(stored.system.hp.value, stored.system.hp.max);
}

#[tokio::test]
async fn regenerate_replaces_items_and_renames_tokens() {
    let (generator, actors) = seeded_generator(5);
    let config = cairn_config();
    let actor = generator.create_character(&config).await.unwrap();
    let token = actors.place_token(actor.id).await.unwrap();

    let mut other = config.clone();
    other.name = TemplateSpec::new("{name} the Second").with_item("name", "cairn.options;Names");
    other.starting_items = vec!["cairn.items;Torch;2".to_string()];
    let regenerated = generator.regenerate_actor(actor.id, &other).await.unwrap();

    assert_eq!(regenerated.id, actor.id);
    assert!(regenerated.name.ends_with(" the Second"));
    let stored = actors.get_actor(actor.id).await.unwrap();
    assert_eq!(stored.items.len(), 8);
    assert_eq!(stored.items[0].record.quantity, Some(2));

    let tokens = actors.active_tokens(actor.id).await.unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].id, token);
    assert_eq!(tokens[0].name, regenerated.name);
}

#[tokio::test]
async fn regenerated_item_set_equals_the_record() {
    let (generator, actors) = seeded_generator(21);
    let config = cairn_config();
    let actor = generator.create_character(&config).await.unwrap();
    assert!(!actor.items.is_empty());

    let mut other = config.clone();
    other.starting_items = vec!["cairn.items;Rations;3".to_string()];
    let record = generator.preview(&other).await.unwrap();

    let materializer = CharacterMaterializer::new(actors.clone());
    materializer.regenerate(actor.id, record.clone()).await.unwrap();

    let stored = actors.get_actor(actor.id).await.unwrap();
    assert_eq!(stored.item_records().cloned().collect::<Vec<_>>(), record.items);
    assert_eq!(record_of(&stored), record);
}

#[tokio::test]
async fn failed_regeneration_leaves_actor_untouched() {
    let (generator, actors) = seeded_generator(9);
    let config = cairn_config();
    let actor = generator.create_character(&config).await.unwrap();

    let mut broken = config.clone();
    broken.background = "cairn.traits;Missing".to_string();
    assert!(generator.regenerate_actor(actor.id, &broken).await.is_err());

    let stored = actors.get_actor(actor.id).await.unwrap();
    assert_eq!(stored.items.len(), actor.items.len());
    assert_eq!(stored.name, actor.name);
}

#[tokio::test]
async fn validation_passes_for_complete_packs() {
    let (generator, _) = seeded_generator(1);
    let errors = generator
        .validate(&ModuleSettings::new("cairn.options", "cairn.traits"))
        .await;
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    let swapped = generator
        .validate(&ModuleSettings::new("cairn.traits", "cairn.options"))
        .await;
    assert_eq!(swapped.len(), 2);
}
