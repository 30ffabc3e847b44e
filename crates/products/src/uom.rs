use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use salepack_core::ValueObject;

/// Unit of measure a line quantity is expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uom {
    pub name: String,
    pub symbol: String,
    /// Decimal places kept when rounding a quantity in this unit.
    pub digits: u32,
}

impl ValueObject for Uom {}

impl Uom {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, digits: u32) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            digits,
        }
    }

    /// The stock "Unit" uom: whole pieces.
    pub fn unit() -> Self {
        Self::new("Unit", "u", 0)
    }

    /// Round a quantity to this unit's precision (half away from zero).
    pub fn round(&self, quantity: Decimal) -> Decimal {
        quantity.round_dp_with_strategy(self.digits, RoundingStrategy::MidpointAwayFromZero)
    }
}
