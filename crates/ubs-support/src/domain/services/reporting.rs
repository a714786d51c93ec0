//! Ticket Metrics
//!
//! Read-side aggregation over ticket collections: volume counts, monthly
//! trend buckets and mean working-time turnaround. Correctness reduces to
//! the business-hours calculator.

use std::collections::{BTreeMap, HashMap};

use crate::domain::aggregates::Ticket;
use crate::domain::value_objects::{CivilDateTime, WorkingDuration};

/// Ticket aggregation domain service
pub struct TicketMetricsService;

impl TicketMetricsService {
    /// Ticket count per clinic
    pub fn count_by_clinic(tickets: &[Ticket]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for ticket in tickets {
            *counts.entry(ticket.clinic().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Ticket count per defect category
    pub fn count_by_defect(tickets: &[Ticket]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for ticket in tickets {
            *counts.entry(ticket.defect_category().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Open-ticket count
    pub fn open_count(tickets: &[Ticket]) -> usize {
        tickets.iter().filter(|t| t.is_open()).count()
    }

    /// Mean working-time turnaround; open tickets are measured against `now`.
    /// `None` for an empty collection.
    pub fn mean_working_time(tickets: &[Ticket], now: CivilDateTime) -> Option<WorkingDuration> {
        if tickets.is_empty() {
            return None;
        }
        let total: i64 = tickets.iter().map(|t| t.working_time(now).as_seconds()).sum();
        Some(WorkingDuration::from_seconds(total / tickets.len() as i64))
    }

    /// Mean working-time turnaround per clinic
    pub fn mean_working_time_by_clinic(
        tickets: &[Ticket],
        now: CivilDateTime,
    ) -> HashMap<String, WorkingDuration> {
        let mut sums: HashMap<String, (i64, i64)> = HashMap::new();
        for ticket in tickets {
            let entry = sums.entry(ticket.clinic().to_string()).or_insert((0, 0));
            entry.0 += ticket.working_time(now).as_seconds();
            entry.1 += 1;
        }
        sums.into_iter()
            .map(|(clinic, (total, count))| (clinic, WorkingDuration::from_seconds(total / count)))
            .collect()
    }

    /// Opening timestamps bucketed into calendar months (`YYYY-MM`), sorted.
    pub fn opened_by_month(tickets: &[Ticket]) -> BTreeMap<String, usize> {
        let mut buckets = BTreeMap::new();
        for ticket in tickets {
            *buckets.entry(ticket.opened_at().month_bucket()).or_insert(0) += 1;
        }
        buckets
    }
}
