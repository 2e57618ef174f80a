//! Character assembly.
//!
//! Turns a [`GenerationConfig`] into a [`CharacterRecord`] by evaluating
//! formulas and drawing from tables. Every port call is awaited before the
//! next one is issued, so a seeded backend produces the same character for
//! the same configuration.

use std::collections::BTreeMap;
use std::sync::Arc;

use cw_core::{FormulaContext, FormulaOracle, ItemRecord, TableLookupPort};

use crate::address::TableAddress;
use crate::config::{BiographySpec, GenerationConfig, TemplateSpec};
use crate::error::GenerationResult;
use crate::record::{AbilityScores, CharacterRecord};
use crate::template::{self, placeholders};

/// Builds character records from table draws and formula rolls.
pub struct CharacterAssembler {
    tables: Arc<dyn TableLookupPort>,
    oracle: Arc<dyn FormulaOracle>,
}

impl CharacterAssembler {
    /// Create an assembler over the given lookup and formula ports.
    pub fn new(tables: Arc<dyn TableLookupPort>, oracle: Arc<dyn FormulaOracle>) -> Self {
        Self { tables, oracle }
    }

    /// Assemble one character.
    ///
    /// The first failing lookup, roll or address parse aborts the whole
    /// request; no partial record is returned.
    pub async fn assemble(&self, config: &GenerationConfig) -> GenerationResult<CharacterRecord> {
        let abilities = AbilityScores {
            strength: self.roll(&config.ability).await?,
            dexterity: self.roll(&config.ability).await?,
            willpower: self.roll(&config.ability).await?,
        };
        let hp = self.roll(&config.hit_points).await?;
        let gold = self.roll(&config.gold).await?;
        tracing::debug!(
            strength = abilities.strength,
            dexterity = abilities.dexterity,
            willpower = abilities.willpower,
            hp,
            gold,
            "rolled attributes"
        );

        let name = self.fill_template(&config.name).await?;
        let biography = self.biography(&config.biography).await?;
        let background = self.draw_text(&config.background).await?;
        tracing::debug!(%name, %background, "drew name and background");

        let mut items = self.starting_items(&config.starting_items).await?;
        items.extend(self.starting_gear(&config.starting_gear).await?);

        tracing::info!(%name, items = items.len(), "character assembled");

        Ok(CharacterRecord {
            name,
            hp,
            gold,
            abilities,
            background,
            biography,
            items,
        })
    }

    async fn roll(&self, formula: &str) -> GenerationResult<i64> {
        Ok(self.oracle.evaluate(formula, &FormulaContext::new()).await?)
    }

    async fn draw_text(&self, address: &str) -> GenerationResult<String> {
        let address = TableAddress::parse(address)?;
        Ok(self.tables.draw_text(&address.pack, &address.table).await?)
    }

    /// One draw per mapped placeholder, in key order.
    async fn draw_values(
        &self,
        items: &BTreeMap<String, String>,
        values: &mut BTreeMap<String, String>,
    ) -> GenerationResult<()> {
        for (key, address) in items {
            let value = self.draw_text(address).await?;
            tracing::debug!(key = %key, value = %value, "drew template value");
            values.insert(key.clone(), value);
        }
        Ok(())
    }

    async fn fill_template(&self, spec: &TemplateSpec) -> GenerationResult<String> {
        let mut values = BTreeMap::new();
        self.draw_values(&spec.items, &mut values).await?;
        warn_unmapped(&spec.text, &values);
        Ok(template::format(&spec.text, &values))
    }

    async fn biography(&self, spec: &BiographySpec) -> GenerationResult<String> {
        let age = self.roll(&spec.age).await?;
        let mut values = BTreeMap::from([("age".to_string(), age.to_string())]);
        self.draw_values(&spec.items, &mut values).await?;
        warn_unmapped(&spec.text, &values);
        Ok(template::format(&spec.text, &values))
    }

    async fn starting_items(&self, addresses: &[String]) -> GenerationResult<Vec<ItemRecord>> {
        let mut items = Vec::with_capacity(addresses.len());
        for address in addresses {
            let address = TableAddress::parse(address)?;
            let item = self
                .tables
                .find_item(&address.pack, &address.table)
                .await?
                .with_quantity(address.quantity);
            tracing::debug!(item = %item.name, quantity = address.quantity, "added starting item");
            items.push(item);
        }
        Ok(items)
    }

    async fn starting_gear(&self, addresses: &[String]) -> GenerationResult<Vec<ItemRecord>> {
        let mut items = Vec::with_capacity(addresses.len());
        for address in addresses {
            let address = TableAddress::parse(address)?;
            let item = self.tables.draw_item(&address.pack, &address.table).await?;
            tracing::debug!(table = %address.table, item = %item.name, "drew starting gear");
            items.push(item);
        }
        Ok(items)
    }
}

fn warn_unmapped(text: &str, values: &BTreeMap<String, String>) {
    for key in placeholders(text) {
        if !values.contains_key(key) {
            tracing::warn!(key, "template placeholder has no table, rendering as undefined");
        }
    }
}
