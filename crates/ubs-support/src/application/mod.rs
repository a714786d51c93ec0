//! Application layer
//!
//! Orchestrates use cases and coordinates domain objects.

pub mod commands;
pub mod dto;
pub mod queries;

pub use commands::{
    DirectoryService, InventoryService, StockService, TicketService, UserAdminService,
};
pub use dto::*;
pub use queries::ReportService;
