//! [`TableLookupPort`] over an in-memory [`Compendium`].

use std::collections::BTreeSet;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;

use cw_core::{ItemRecord, LookupError, PackSummary, TableLookupPort};

use crate::compendium::Compendium;

/// Serves a compendium, drawing with a shared seeded RNG.
///
/// Every returned [`ItemRecord`] is a fresh clone of the compendium's data.
#[derive(Debug)]
pub struct CompendiumLookup {
    compendium: Compendium,
    rng: Mutex<StdRng>,
}

impl CompendiumLookup {
    /// Serve `compendium` with a fixed seed.
    pub fn seeded(compendium: Compendium, seed: u64) -> Self {
        Self {
            compendium,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Serve `compendium` with an RNG seeded from the operating system.
    pub fn from_entropy(compendium: Compendium) -> Self {
        Self {
            compendium,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// The underlying compendium.
    pub fn compendium(&self) -> &Compendium {
        &self.compendium
    }
}

#[async_trait]
impl TableLookupPort for CompendiumLookup {
    async fn draw_text(&self, pack: &str, table: &str) -> Result<String, LookupError> {
        let table = self.compendium.pack(pack)?.table(table)?;
        let mut rng = self.rng.lock().await;
        let text = table.draw(&mut rng)?.display_text().to_string();
        tracing::debug!(pack, table = %table.name, %text, "drew text");
        Ok(text)
    }

    async fn draw_item(&self, pack: &str, table: &str) -> Result<ItemRecord, LookupError> {
        let table = self.compendium.pack(pack)?.table(table)?;
        let mut rng = self.rng.lock().await;
        let item = table
            .draw(&mut rng)?
            .item
            .clone()
            .ok_or_else(|| LookupError::NoItemResult(table.name.clone()))?;
        tracing::debug!(pack, table = %table.name, item = %item.name, "drew item");
        Ok(item)
    }

    async fn find_item(&self, pack: &str, name: &str) -> Result<ItemRecord, LookupError> {
        Ok(self.compendium.pack(pack)?.item(name)?.clone())
    }

    async fn list_entry_names(&self, pack: &str) -> Result<BTreeSet<String>, LookupError> {
        Ok(self.compendium.pack(pack)?.entry_names())
    }

    async fn list_packs(&self) -> Vec<PackSummary> {
        self.compendium.summaries()
    }
}
