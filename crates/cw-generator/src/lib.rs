//! Table-driven character generation engine.
//!
//! Given a [`GenerationConfig`] (formulas plus table addresses), the
//! [`CharacterAssembler`] rolls abilities, hit protection and gold, draws a
//! name, biography and background from roll tables, and collects starting
//! items and gear into a [`CharacterRecord`]. The [`CharacterMaterializer`]
//! writes that record to an actor store, either as a new actor or over an
//! existing one.
//!
//! All table data, dice and persistence sit behind the ports in
//! [`cw_core::ports`].

pub mod address;
pub mod assembler;
pub mod config;
pub mod error;
pub mod generator;
pub mod materializer;
pub mod record;
pub mod settings;
pub mod template;
pub mod validate;

pub use address::TableAddress;
pub use assembler::CharacterAssembler;
pub use config::{BiographySpec, GenerationConfig, TemplateSpec};
pub use error::{
    AddressError, GenerationError, GenerationResult, SettingsError, SettingsResult,
    ValidationError,
};
pub use generator::CharacterGenerator;
pub use materializer::{CharacterMaterializer, character_to_actor_data};
pub use record::{AbilityScores, CharacterRecord};
pub use settings::{BiographyRules, GeneratorRules, ModuleSettings};
pub use template::format;
pub use validate::{validate_pack, validate_settings};
