//! Dice and formula evaluation for Cairnwright.
//!
//! Provides polyhedral dice and pools, a small integer formula language
//! (`3d6`, `2d20+10`, `1d6*10`, `@str-1`), and [`DiceOracle`], the seeded
//! reference implementation of the generator's formula port.

pub mod dice;
pub mod formula;
pub mod oracle;

pub use dice::{DicePool, Die, DieResult, RollResult};
pub use formula::{Evaluation, Formula};
pub use oracle::DiceOracle;
