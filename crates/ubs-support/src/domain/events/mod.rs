//! Domain Events
//!
//! Events raised by aggregates to communicate state changes.

use crate::domain::value_objects::{CivilDateTime, EntityId, ProtocolNumber};

/// All domain events in the helpdesk bounded context
#[derive(Clone, Debug)]
pub enum DomainEvent {
    Ticket(TicketEvent),
}

/// Ticket-related domain events
#[derive(Clone, Debug)]
pub enum TicketEvent {
    Opened {
        ticket_id: EntityId,
        protocol: ProtocolNumber,
        opened_at: CivilDateTime,
    },

    Closed {
        ticket_id: EntityId,
        protocol: ProtocolNumber,
        closed_at: CivilDateTime,
    },

    Reopened {
        ticket_id: EntityId,
        protocol: ProtocolNumber,
    },
}
