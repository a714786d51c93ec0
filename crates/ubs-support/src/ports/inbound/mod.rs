//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces.

use async_trait::async_trait;

use crate::application::dto::*;
use crate::domain::aggregates::{
    InventoryItem, ReopenOutcome, StockPart, Ticket, UserAccount,
};
use crate::domain::value_objects::{AssetTag, EntityId, ProtocolNumber, WorkingDuration};

/// Ticket lifecycle use cases
#[async_trait]
pub trait TicketUseCases: Send + Sync {
    /// Open a new ticket, allocating the next protocol number
    async fn open_ticket(&self, command: OpenTicketCommand) -> Result<Ticket, UseCaseError>;

    /// Close an open ticket with a resolution and consumed parts
    async fn close_ticket(&self, command: CloseTicketCommand) -> Result<(), UseCaseError>;

    /// Reopen a closed ticket; reopening an open ticket is a no-op
    async fn reopen_ticket(
        &self,
        command: ReopenTicketCommand,
    ) -> Result<ReopenOutcome, UseCaseError>;

    /// Working time accrued by a ticket (open tickets measure against now)
    async fn working_time(&self, ticket_id: &EntityId) -> Result<WorkingDuration, UseCaseError>;

    /// Get ticket by storage id
    async fn get_ticket(&self, id: &EntityId) -> Result<Option<Ticket>, UseCaseError>;

    /// Get ticket by its human-facing protocol number
    async fn get_by_protocol(
        &self,
        protocol: ProtocolNumber,
    ) -> Result<Option<Ticket>, UseCaseError>;

    async fn list_tickets(&self) -> Result<Vec<Ticket>, UseCaseError>;

    async fn list_open_tickets(&self) -> Result<Vec<Ticket>, UseCaseError>;

    async fn list_for_asset(&self, tag: &AssetTag) -> Result<Vec<Ticket>, UseCaseError>;
}

/// Inventory management use cases
#[async_trait]
pub trait InventoryUseCases: Send + Sync {
    /// Register a machine; duplicate asset tags are rejected
    async fn register_machine(
        &self,
        command: RegisterMachineCommand,
    ) -> Result<InventoryItem, UseCaseError>;

    async fn update_machine(
        &self,
        command: UpdateMachineCommand,
    ) -> Result<InventoryItem, UseCaseError>;

    async fn remove_machine(&self, tag: &AssetTag) -> Result<(), UseCaseError>;

    /// Lookup used to pre-fill clinic/sector on the ticket form
    async fn find_machine(&self, tag: &AssetTag) -> Result<Option<InventoryItem>, UseCaseError>;

    async fn list_machines(&self) -> Result<Vec<InventoryItem>, UseCaseError>;

    /// Auto-register a placeholder for an asset tag seen on a ticket before
    /// the machine was inventoried; returns the existing item when known
    async fn ensure_registered(
        &self,
        tag: &AssetTag,
        clinic: &str,
        sector: &str,
    ) -> Result<InventoryItem, UseCaseError>;

    /// Full repair history of one machine: tickets, parts and maintenance
    async fn machine_history(&self, tag: &AssetTag) -> Result<MachineHistoryView, UseCaseError>;
}

/// Spare-part stock use cases
#[async_trait]
pub trait StockUseCases: Send + Sync {
    async fn add_part(&self, command: AddPartCommand) -> Result<StockPart, UseCaseError>;

    async fn update_part(&self, command: UpdatePartCommand) -> Result<StockPart, UseCaseError>;

    async fn remove_part(&self, id: &EntityId) -> Result<(), UseCaseError>;

    async fn list_parts(&self) -> Result<Vec<StockPart>, UseCaseError>;

    /// Best-effort stock deduction: `Some(remaining)` on success, `None`
    /// (logged) when the part is unknown
    async fn write_off(&self, part_name: &str, quantity: u32)
        -> Result<Option<u32>, UseCaseError>;
}

/// Clinic/sector directory use cases; mutations are admin-gated
#[async_trait]
pub trait DirectoryUseCases: Send + Sync {
    async fn add_clinic(&self, session: &Session, name: &str) -> Result<(), UseCaseError>;
    async fn rename_clinic(
        &self,
        session: &Session,
        old: &str,
        new: &str,
    ) -> Result<(), UseCaseError>;
    async fn remove_clinic(&self, session: &Session, name: &str) -> Result<(), UseCaseError>;
    async fn list_clinics(&self) -> Result<Vec<String>, UseCaseError>;

    async fn add_sector(&self, session: &Session, name: &str) -> Result<(), UseCaseError>;
    async fn rename_sector(
        &self,
        session: &Session,
        old: &str,
        new: &str,
    ) -> Result<(), UseCaseError>;
    async fn remove_sector(&self, session: &Session, name: &str) -> Result<(), UseCaseError>;
    async fn list_sectors(&self) -> Result<Vec<String>, UseCaseError>;
}

/// User administration use cases; every operation is admin-gated
#[async_trait]
pub trait UserAdminUseCases: Send + Sync {
    async fn register_user(
        &self,
        session: &Session,
        username: &str,
        is_admin: bool,
    ) -> Result<UserAccount, UseCaseError>;

    async fn remove_user(&self, session: &Session, username: &str) -> Result<(), UseCaseError>;

    async fn set_admin(
        &self,
        session: &Session,
        username: &str,
        is_admin: bool,
    ) -> Result<UserAccount, UseCaseError>;

    async fn list_users(&self, session: &Session) -> Result<Vec<UserAccount>, UseCaseError>;
}

/// Dashboard/turnaround reporting use cases
#[async_trait]
pub trait ReportUseCases: Send + Sync {
    async fn dashboard(&self) -> Result<DashboardView, UseCaseError>;

    async fn turnaround(&self) -> Result<TurnaroundView, UseCaseError>;
}

#[derive(Debug, Clone)]
pub enum UseCaseError {
    NotFound(String),
    ValidationError(String),
    DomainError(String),
    AllocationFailed(String),
    RepositoryError(String),
    Unauthorized,
}

impl std::error::Error for UseCaseError {}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(e) => write!(f, "Not found: {}", e),
            Self::ValidationError(e) => write!(f, "Validation error: {}", e),
            Self::DomainError(e) => write!(f, "Domain error: {}", e),
            Self::AllocationFailed(e) => write!(f, "Protocol allocation failed: {}", e),
            Self::RepositoryError(e) => write!(f, "Repository error: {}", e),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}
