//! Spare-Part Stock
//!
//! Parts consumed while closing tickets. Stock bookkeeping is best-effort:
//! write-offs floor at zero and never fail a ticket close.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CivilDateTime, EntityId};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StockPart {
    pub id: EntityId,
    pub name: String,
    pub quantity: u32,
    pub description: String,
    pub invoice_number: Option<String>,
    pub added_at: CivilDateTime,
}

impl StockPart {
    /// Deduct `quantity_used` units, flooring at zero. Returns the
    /// remaining quantity.
    pub fn write_off(&mut self, quantity_used: u32) -> u32 {
        self.quantity = self.quantity.saturating_sub(quantity_used);
        self.quantity
    }
}

/// One part consumed by one ticket
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PartConsumption {
    pub ticket_id: EntityId,
    pub part_name: String,
    pub used_at: CivilDateTime,
}
