//! Ticket Aggregate
//!
//! Support request tracked from opening through resolution. Status is
//! derived: a null closing timestamp means the ticket is open. Closing
//! timestamp and resolution are set together and cleared together.

use serde::{Deserialize, Serialize};

use crate::domain::events::{DomainEvent, TicketEvent};
use crate::domain::services::BusinessHours;
use crate::domain::value_objects::{
    AssetTag, CivilDateTime, EntityId, ProtocolNumber, WorkingDuration,
};

/// Ticket aggregate root
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ticket {
    id: EntityId,
    protocol: ProtocolNumber,
    requester: String,
    clinic: String,
    sector: String,
    defect_category: String,
    description: String,
    asset_tag: Option<AssetTag>,
    opened_at: CivilDateTime,
    closed_at: Option<CivilDateTime>,
    resolution: Option<String>,
    parts_used: Vec<String>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Ticket {
    /// Open a new ticket (factory method)
    pub fn open(
        protocol: ProtocolNumber,
        requester: &str,
        clinic: &str,
        sector: &str,
        defect_category: &str,
        description: &str,
        asset_tag: Option<AssetTag>,
        opened_at: CivilDateTime,
    ) -> Result<Self, TicketError> {
        let requester = required(requester, "requester")?;
        let clinic = required(clinic, "clinic")?;
        let sector = required(sector, "sector")?;
        let defect_category = required(defect_category, "defect category")?;
        let description = required(description, "description")?;

        let id = EntityId::new();
        let mut ticket = Self {
            id: id.clone(),
            protocol,
            requester,
            clinic,
            sector,
            defect_category,
            description,
            asset_tag,
            opened_at,
            closed_at: None,
            resolution: None,
            parts_used: vec![],
            events: vec![],
        };

        ticket.raise_event(DomainEvent::Ticket(TicketEvent::Opened {
            ticket_id: id,
            protocol,
            opened_at,
        }));

        Ok(ticket)
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }
    pub fn protocol(&self) -> ProtocolNumber {
        self.protocol
    }
    pub fn requester(&self) -> &str {
        &self.requester
    }
    pub fn clinic(&self) -> &str {
        &self.clinic
    }
    pub fn sector(&self) -> &str {
        &self.sector
    }
    pub fn defect_category(&self) -> &str {
        &self.defect_category
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn asset_tag(&self) -> Option<&AssetTag> {
        self.asset_tag.as_ref()
    }
    pub fn opened_at(&self) -> CivilDateTime {
        self.opened_at
    }
    pub fn closed_at(&self) -> Option<CivilDateTime> {
        self.closed_at
    }
    pub fn resolution(&self) -> Option<&str> {
        self.resolution.as_deref()
    }
    pub fn parts_used(&self) -> &[String] {
        &self.parts_used
    }

    pub fn status(&self) -> TicketStatus {
        if self.closed_at.is_some() {
            TicketStatus::Closed
        } else {
            TicketStatus::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    /// Close the ticket with a resolution and the parts consumed.
    ///
    /// Closing an already-closed ticket is rejected; the original closing
    /// timestamp is never overwritten.
    pub fn close(
        &mut self,
        resolution: &str,
        parts_used: Vec<String>,
        closed_at: CivilDateTime,
    ) -> Result<(), TicketError> {
        if self.closed_at.is_some() {
            return Err(TicketError::AlreadyClosed);
        }
        let resolution = required(resolution, "resolution")?;

        self.closed_at = Some(closed_at);
        self.resolution = Some(resolution);
        self.parts_used = parts_used;

        self.raise_event(DomainEvent::Ticket(TicketEvent::Closed {
            ticket_id: self.id.clone(),
            protocol: self.protocol,
            closed_at,
        }));

        Ok(())
    }

    /// Reopen a closed ticket, clearing the closing timestamp and resolution.
    ///
    /// Reopening an open ticket is an informational no-op, not an error.
    pub fn reopen(&mut self) -> ReopenOutcome {
        let previous_closed_at = match self.closed_at.take() {
            Some(at) => at,
            None => return ReopenOutcome::AlreadyOpen,
        };
        self.resolution = None;

        self.raise_event(DomainEvent::Ticket(TicketEvent::Reopened {
            ticket_id: self.id.clone(),
            protocol: self.protocol,
        }));

        ReopenOutcome::Reopened { previous_closed_at }
    }

    /// Working time accrued by this ticket.
    ///
    /// Open tickets are measured against `now`; the value is a view and is
    /// never stored.
    pub fn working_time(&self, now: CivilDateTime) -> WorkingDuration {
        match self.closed_at {
            Some(closed_at) => BusinessHours::between(self.opened_at, closed_at),
            None => BusinessHours::between(self.opened_at, now),
        }
    }

    /// Get and clear accumulated domain events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }
}

fn required(value: &str, field: &'static str) -> Result<String, TicketError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TicketError::MissingField(field));
    }
    Ok(value.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Closed,
}

/// Result of a reopen call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReopenOutcome {
    /// The ticket was open already; nothing changed.
    AlreadyOpen,
    /// The ticket went back to open; carries the cleared closing timestamp
    /// so callers can drop the matching maintenance record.
    Reopened { previous_closed_at: CivilDateTime },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    MissingField(&'static str),
    AlreadyClosed,
}

impl std::error::Error for TicketError {}

impl std::fmt::Display for TicketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Required field is empty: {}", field),
            Self::AlreadyClosed => write!(f, "Ticket is already closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> CivilDateTime {
        CivilDateTime::from_ymd_hms(2024, 2, day, hour, 0, 0).unwrap()
    }

    fn open_test_ticket() -> Ticket {
        Ticket::open(
            ProtocolNumber::new(1),
            "maria",
            "UBS Centro",
            "Reception",
            "Computer will not start",
            "Screen stays black after power on",
            None,
            at(5, 10),
        )
        .unwrap()
    }

    #[test]
    fn test_ticket_opens_in_open_state() {
        let ticket = open_test_ticket();
        assert_eq!(ticket.status(), TicketStatus::Open);
        assert!(ticket.closed_at().is_none());
        assert!(ticket.resolution().is_none());
    }

    #[test]
    fn test_opened_event_raised() {
        let mut ticket = open_test_ticket();
        let events = ticket.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            DomainEvent::Ticket(TicketEvent::Opened { .. })
        ));
    }

    #[test]
    fn test_required_fields_validated() {
        let result = Ticket::open(
            ProtocolNumber::new(1),
            "maria",
            "  ",
            "Reception",
            "Printer",
            "Out of toner",
            None,
            at(5, 10),
        );
        assert_eq!(result.unwrap_err(), TicketError::MissingField("clinic"));
    }

    #[test]
    fn test_close_records_resolution_and_parts() {
        let mut ticket = open_test_ticket();
        ticket
            .close("Replaced the power supply", vec!["PSU 500W".into()], at(5, 15))
            .unwrap();

        assert_eq!(ticket.status(), TicketStatus::Closed);
        assert_eq!(ticket.resolution(), Some("Replaced the power supply"));
        assert_eq!(ticket.parts_used(), ["PSU 500W".to_string()]);
        assert_eq!(ticket.closed_at(), Some(at(5, 15)));
    }

    #[test]
    fn test_close_requires_resolution() {
        let mut ticket = open_test_ticket();
        let result = ticket.close("   ", vec![], at(5, 15));
        assert_eq!(result.unwrap_err(), TicketError::MissingField("resolution"));
        assert_eq!(ticket.status(), TicketStatus::Open);
    }

    #[test]
    fn test_closing_twice_rejected() {
        let mut ticket = open_test_ticket();
        ticket.close("Fixed", vec![], at(5, 15)).unwrap();
        let result = ticket.close("Fixed again", vec![], at(5, 16));
        assert_eq!(result.unwrap_err(), TicketError::AlreadyClosed);
        // The original closing timestamp survives.
        assert_eq!(ticket.closed_at(), Some(at(5, 15)));
    }

    #[test]
    fn test_reopen_round_trip() {
        let mut ticket = open_test_ticket();
        ticket.close("Fixed", vec![], at(5, 15)).unwrap();

        let outcome = ticket.reopen();
        assert_eq!(
            outcome,
            ReopenOutcome::Reopened {
                previous_closed_at: at(5, 15)
            }
        );
        assert_eq!(ticket.status(), TicketStatus::Open);
        assert!(ticket.closed_at().is_none());
        assert!(ticket.resolution().is_none());
    }

    #[test]
    fn test_reopen_of_open_ticket_is_noop() {
        let mut ticket = open_test_ticket();
        ticket.take_events();
        assert_eq!(ticket.reopen(), ReopenOutcome::AlreadyOpen);
        assert!(ticket.take_events().is_empty());
    }

    #[test]
    fn test_working_time_of_closed_ticket() {
        let mut ticket = open_test_ticket();
        ticket.close("Fixed", vec![], at(5, 15)).unwrap();
        // Monday 10:00 -> 15:00 = 2h morning + 2h afternoon.
        let elapsed = ticket.working_time(at(9, 12));
        assert_eq!(elapsed.as_seconds(), 4 * 3600);
    }

    #[test]
    fn test_working_time_of_open_ticket_tracks_now() {
        let ticket = open_test_ticket();
        // Monday 10:00 -> Tuesday 10:00 = 8 working hours.
        let elapsed = ticket.working_time(at(6, 10));
        assert_eq!(elapsed.as_seconds(), 8 * 3600);
    }
}
