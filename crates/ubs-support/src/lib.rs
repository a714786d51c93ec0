//! UBS Helpdesk Platform
//!
//! Self-hosted IT helpdesk for networks of public health clinics (UBS):
//! staff open tickets against inventoried equipment, technicians close them
//! with a resolution and consumed spare parts, and turnaround is measured in
//! business hours against the 08:00-12:00 / 13:00-17:00 Mon-Fri calendar.
//!
//! ## Architecture
//!
//! - **Domain Layer**: Rich aggregates, value objects, domain events,
//!   domain services (business-hours calculator, ticket metrics)
//! - **Application Layer**: Use case orchestration, DTOs
//! - **Ports Layer**: Hexagonal architecture interfaces
//! - **Infrastructure Layer**: In-memory adapters and clocks
//!
//! ## Key Aggregates
//!
//! - **Ticket**: Support request from opening through resolution, with
//!   sequential protocol numbers and derived working-time turnaround
//! - **InventoryItem**: Machine in the equipment fleet, keyed by asset tag
//! - **StockPart**: Spare part with best-effort consumption bookkeeping
//!
//! ## Features
//!
//! - Ticket lifecycle (open, close, reopen) with maintenance history
//! - Business-hours elapsed-time calculation (UTC-3 civil calendar)
//! - Sequential human-facing protocol allocation with retry on collision
//! - Parts consumption with stock write-off floored at zero
//! - Clinic/sector directories and admin-gated user management
//! - Dashboard aggregations (counts, monthly trend, mean turnaround)

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;

// Re-exports for convenience
pub use domain::aggregates::{
    InventoryItem, MachineStatus, MaintenanceRecord, Ownership, PartConsumption, ReopenOutcome,
    StockPart, Ticket, TicketError, TicketStatus, UserAccount,
};
pub use domain::events::{DomainEvent, TicketEvent};
pub use domain::services::{BusinessHours, TicketMetricsService};
pub use domain::value_objects::{
    AssetTag, CivilDateTime, EntityId, ProtocolNumber, WorkingDuration,
};
pub use application::commands::{
    DirectoryService, InventoryService, StockService, TicketService, UserAdminService,
};
pub use application::dto::{
    CloseTicketCommand, DashboardView, OpenTicketCommand, RegisterMachineCommand,
    ReopenTicketCommand, Session, TicketView,
};
pub use application::queries::ReportService;
pub use ports::inbound::{
    DirectoryUseCases, InventoryUseCases, ReportUseCases, StockUseCases, TicketUseCases,
    UseCaseError, UserAdminUseCases,
};
pub use ports::outbound::{
    Clock, EventPublisher, InventoryRepository, MaintenanceLog, NameDirectory, PartsStore,
    RepositoryError, TicketRepository, UserRepository,
};
