//! Inventory Item
//!
//! A physical machine in the clinic network's equipment fleet, keyed by its
//! asset tag. Tickets, parts consumption and maintenance history cross-link
//! through the tag.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::AssetTag;

/// Operational status of a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineStatus {
    Active,
    InMaintenance,
    Inactive,
}

/// Whether the machine is owned by the network or leased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    Owned,
    Leased,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InventoryItem {
    pub asset_tag: AssetTag,
    pub kind: String,
    pub brand: String,
    pub model: String,
    pub serial_number: Option<String>,
    pub status: MachineStatus,
    pub clinic: String,
    pub sector: String,
    pub ownership: Ownership,
    pub acquired_on: Option<NaiveDate>,
    pub warranty_until: Option<NaiveDate>,
}

impl InventoryItem {
    /// Minimal record for an asset tag seen on a ticket before the machine
    /// was ever inventoried. Brand and model stay blank until an
    /// administrator fills them in.
    pub fn placeholder(asset_tag: AssetTag, clinic: &str, sector: &str) -> Self {
        Self {
            asset_tag,
            kind: "Unknown".to_string(),
            brand: String::new(),
            model: String::new(),
            serial_number: None,
            status: MachineStatus::Active,
            clinic: clinic.to_string(),
            sector: sector.to_string(),
            ownership: Ownership::Owned,
            acquired_on: None,
            warranty_until: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_defaults() {
        let tag = AssetTag::new("PAT-1").unwrap();
        let item = InventoryItem::placeholder(tag.clone(), "UBS Centro", "Reception");
        assert_eq!(item.asset_tag, tag);
        assert_eq!(item.kind, "Unknown");
        assert_eq!(item.status, MachineStatus::Active);
        assert!(item.serial_number.is_none());
    }
}
