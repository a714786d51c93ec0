//! Data Transfer Objects (DTOs)
//!
//! Objects for transferring data across boundaries.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::{
    InventoryItem, MachineStatus, MaintenanceRecord, Ownership, PartConsumption, Ticket,
};
use crate::domain::value_objects::CivilDateTime;

/// Authenticated caller identity, passed explicitly into operations that
/// need authorization context. Authentication itself is an external
/// collaborator; the platform only consumes its outcome.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub is_admin: bool,
}

impl Session {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }
}

// =============================================================================
// Ticket Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpenTicketCommand {
    pub requester: String,
    pub clinic: String,
    pub sector: String,
    pub defect_category: String,
    pub description: String,
    pub asset_tag: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CloseTicketCommand {
    pub ticket_id: String,
    pub resolution: String,
    pub parts_used: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReopenTicketCommand {
    pub ticket_id: String,
    pub remove_maintenance_record: bool,
}

// =============================================================================
// Inventory Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterMachineCommand {
    pub asset_tag: String,
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

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateMachineCommand {
    pub asset_tag: String,
    pub kind: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub status: Option<MachineStatus>,
    pub clinic: Option<String>,
    pub sector: Option<String>,
    pub ownership: Option<Ownership>,
}

// =============================================================================
// Stock Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddPartCommand {
    pub name: String,
    pub quantity: u32,
    pub description: String,
    pub invoice_number: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdatePartCommand {
    pub part_id: String,
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub description: Option<String>,
    pub invoice_number: Option<String>,
}

// =============================================================================
// Views (Read Models)
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketView {
    pub id: String,
    pub protocol: u64,
    pub requester: String,
    pub clinic: String,
    pub sector: String,
    pub defect_category: String,
    pub description: String,
    pub asset_tag: Option<String>,
    pub opened_at: String,
    pub closed_at: Option<String>,
    pub resolution: Option<String>,
    pub parts_used: Vec<String>,
    pub status: String,
    pub working_time: String,
}

impl TicketView {
    pub fn from_ticket(ticket: &Ticket, now: CivilDateTime) -> Self {
        Self {
            id: ticket.id().to_string(),
            protocol: ticket.protocol().value(),
            requester: ticket.requester().to_string(),
            clinic: ticket.clinic().to_string(),
            sector: ticket.sector().to_string(),
            defect_category: ticket.defect_category().to_string(),
            description: ticket.description().to_string(),
            asset_tag: ticket.asset_tag().map(|t| t.to_string()),
            opened_at: ticket.opened_at().to_string(),
            closed_at: ticket.closed_at().map(|t| t.to_string()),
            resolution: ticket.resolution().map(str::to_string),
            parts_used: ticket.parts_used().to_vec(),
            status: if ticket.is_open() { "open" } else { "closed" }.to_string(),
            working_time: ticket.working_time(now).to_string(),
        }
    }
}

/// Full repair history of one machine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MachineHistoryView {
    pub item: InventoryItem,
    pub tickets: Vec<TicketView>,
    pub parts_used: Vec<PartConsumption>,
    pub maintenance: Vec<MaintenanceRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardView {
    pub total_tickets: usize,
    pub open_tickets: usize,
    pub tickets_by_clinic: HashMap<String, usize>,
    pub tickets_by_defect: HashMap<String, usize>,
    pub opened_by_month: BTreeMap<String, usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnaroundView {
    /// Mean working-time turnaround across all tickets, `None` when empty
    pub overall: Option<String>,
    pub by_clinic: HashMap<String, String>,
}
