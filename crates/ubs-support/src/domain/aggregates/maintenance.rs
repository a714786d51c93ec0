//! Maintenance History
//!
//! Repair log attached to an inventory item. Entries created when a ticket
//! closes are keyed by (asset tag, timestamp) so a reopen can drop the
//! matching record.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AssetTag, CivilDateTime};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub asset_tag: AssetTag,
    pub description: String,
    pub performed_at: CivilDateTime,
}

impl MaintenanceRecord {
    /// Standard summary line written when a ticket closes.
    pub fn summary(resolution: &str, parts_used: &[String]) -> String {
        let parts = if parts_used.is_empty() {
            "none".to_string()
        } else {
            parts_used.join(", ")
        };
        format!("Maintenance: {}. Parts used: {}.", resolution, parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_with_parts() {
        let text = MaintenanceRecord::summary(
            "Replaced the fuser",
            &["Fuser unit".to_string(), "Rollers".to_string()],
        );
        assert_eq!(
            text,
            "Maintenance: Replaced the fuser. Parts used: Fuser unit, Rollers."
        );
    }

    #[test]
    fn test_summary_without_parts() {
        let text = MaintenanceRecord::summary("Reinstalled the OS", &[]);
        assert_eq!(text, "Maintenance: Reinstalled the OS. Parts used: none.");
    }
}
