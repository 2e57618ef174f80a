//! One-call character creation and regeneration.

use std::sync::Arc;

use cw_core::{Actor, ActorId, ActorRepository, FormulaOracle, TableLookupPort};

use crate::assembler::CharacterAssembler;
use crate::config::GenerationConfig;
use crate::error::{GenerationResult, ValidationError};
use crate::materializer::CharacterMaterializer;
use crate::record::CharacterRecord;
use crate::settings::ModuleSettings;
use crate::validate::validate_settings;

/// Assembles characters and writes them to the actor store.
pub struct CharacterGenerator {
    tables: Arc<dyn TableLookupPort>,
    assembler: CharacterAssembler,
    materializer: CharacterMaterializer,
}

impl CharacterGenerator {
    /// Wire a generator from its three ports.
    pub fn new(
        tables: Arc<dyn TableLookupPort>,
        oracle: Arc<dyn FormulaOracle>,
        actors: Arc<dyn ActorRepository>,
    ) -> Self {
        Self {
            assembler: CharacterAssembler::new(Arc::clone(&tables), oracle),
            materializer: CharacterMaterializer::new(actors),
            tables,
        }
    }

    /// Assemble a character without persisting it.
    pub async fn preview(&self, config: &GenerationConfig) -> GenerationResult<CharacterRecord> {
        self.assembler.assemble(config).await
    }

    /// Assemble a character and persist it as a new actor.
    pub async fn create_character(&self, config: &GenerationConfig) -> GenerationResult<Actor> {
        let record = self.assembler.assemble(config).await?;
        self.materializer.create_new(record).await
    }

    /// Assemble a character and overwrite an existing actor with it.
    ///
    /// Assembly runs first; if it fails the actor is left untouched.
    pub async fn regenerate_actor(
        &self,
        id: ActorId,
        config: &GenerationConfig,
    ) -> GenerationResult<Actor> {
        let record = self.assembler.assemble(config).await?;
        self.materializer.regenerate(id, record).await
    }

    /// Check that the configured packs hold every required table.
    pub async fn validate(&self, settings: &ModuleSettings) -> Vec<ValidationError> {
        validate_settings(self.tables.as_ref(), settings).await
    }
}
