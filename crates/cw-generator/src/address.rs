//! Table addresses: `"<pack>;<table>[;<quantity>]"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AddressError;

/// Separator between address fields.
pub const SEPARATOR: char = ';';

/// A parsed table address.
///
/// `table` names a roll table for random draws, or an item entry for fixed
/// starting items. `quantity` only matters for the latter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableAddress {
    /// Pack identifier.
    pub pack: String,
    /// Table or entry name within the pack.
    pub table: String,
    /// Stack size, at least 1.
    pub quantity: u32,
}

impl TableAddress {
    /// An address with quantity 1.
    pub fn new(pack: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            pack: pack.into(),
            table: table.into(),
            quantity: 1,
        }
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Parse `"pack;table"` or `"pack;table;quantity"`.
    ///
    /// Fields after the third are ignored.
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        let mut fields = address.split(SEPARATOR);
        let (Some(pack), Some(table)) = (fields.next(), fields.next()) else {
            return Err(AddressError::Malformed(address.to_string()));
        };
        if pack.is_empty() || table.is_empty() {
            return Err(AddressError::Malformed(address.to_string()));
        }

        let quantity = match fields.next() {
            None => 1,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(q) if q >= 1 => q,
                _ => {
                    return Err(AddressError::InvalidQuantity {
                        address: address.to_string(),
                        quantity: raw.to_string(),
                    });
                }
            },
        };

        Ok(Self {
            pack: pack.to_string(),
            table: table.to_string(),
            quantity,
        })
    }
}

impl FromStr for TableAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TableAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity == 1 {
            write!(f, "{}{SEPARATOR}{}", self.pack, self.table)
        } else {
            write!(f, "{}{SEPARATOR}{}{SEPARATOR}{}", self.pack, self.table, self.quantity)
        }
    }
}
