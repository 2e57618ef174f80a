//! Compendium packs and weighted roll tables.
//!
//! A [`Compendium`] is a set of packs, each holding named roll tables and
//! item templates. [`CompendiumLookup`] serves a compendium through the
//! generator's table lookup port, drawing with a seeded RNG.

pub mod compendium;
pub mod error;
pub mod lookup;
pub mod table;

pub use compendium::{Compendium, Pack};
pub use error::{CompendiumError, CompendiumResult};
pub use lookup::CompendiumLookup;
pub use table::{RollTable, TableResult};
