//! Infrastructure layer
//!
//! Concrete adapter implementations of the outbound ports.

pub mod persistence;

pub use persistence::{
    FixedClock, InMemoryEventPublisher, InMemoryInventoryRepository, InMemoryMaintenanceLog,
    InMemoryNameDirectory, InMemoryPartsStore, InMemoryTicketRepository, InMemoryUserRepository,
    NullEventPublisher, SystemClock,
};
