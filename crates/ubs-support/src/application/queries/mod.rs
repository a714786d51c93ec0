//! Query handlers
//!
//! Read-side services feeding dashboards and turnaround reports.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::{DashboardView, TurnaroundView};
use crate::domain::services::TicketMetricsService;
use crate::ports::inbound::{ReportUseCases, UseCaseError};
use crate::ports::outbound::{Clock, TicketRepository};

/// Reporting application service
pub struct ReportService {
    tickets: Arc<dyn TicketRepository>,
    clock: Arc<dyn Clock>,
}

impl ReportService {
    pub fn new(tickets: Arc<dyn TicketRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { tickets, clock }
    }
}

#[async_trait]
impl ReportUseCases for ReportService {
    async fn dashboard(&self) -> Result<DashboardView, UseCaseError> {
        let tickets = self
            .tickets
            .list_all()
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("listing tickets: {}", e)))?;

        Ok(DashboardView {
            total_tickets: tickets.len(),
            open_tickets: TicketMetricsService::open_count(&tickets),
            tickets_by_clinic: TicketMetricsService::count_by_clinic(&tickets),
            tickets_by_defect: TicketMetricsService::count_by_defect(&tickets),
            opened_by_month: TicketMetricsService::opened_by_month(&tickets),
        })
    }

    async fn turnaround(&self) -> Result<TurnaroundView, UseCaseError> {
        let tickets = self
            .tickets
            .list_all()
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("listing tickets: {}", e)))?;
        let now = self.clock.now();

        Ok(TurnaroundView {
            overall: TicketMetricsService::mean_working_time(&tickets, now)
                .map(|d| d.to_string()),
            by_clinic: TicketMetricsService::mean_working_time_by_clinic(&tickets, now)
                .into_iter()
                .map(|(clinic, duration)| (clinic, duration.to_string()))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Ticket;
    use crate::domain::value_objects::{CivilDateTime, ProtocolNumber};
    use crate::infrastructure::persistence::{FixedClock, InMemoryTicketRepository};
    use crate::ports::outbound::TicketRepository;

    fn at(day: u32, hour: u32) -> CivilDateTime {
        CivilDateTime::from_ymd_hms(2024, 2, day, hour, 0, 0).unwrap()
    }

    async fn seeded_repo() -> Arc<InMemoryTicketRepository> {
        let repo = Arc::new(InMemoryTicketRepository::new());
        let mut closed = Ticket::open(
            ProtocolNumber::new(1),
            "maria",
            "UBS Centro",
            "Reception",
            "Printer will not print",
            "Nothing comes out of the tray",
            None,
            at(5, 10),
        )
        .unwrap();
        closed.close("Cleared the paper jam", vec![], at(5, 11)).unwrap();
        repo.insert(&closed).await.unwrap();

        let open = Ticket::open(
            ProtocolNumber::new(2),
            "joao",
            "UBS Norte",
            "Pharmacy",
            "Slow computer",
            "Takes minutes to boot",
            None,
            at(5, 8),
        )
        .unwrap();
        repo.insert(&open).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let repo = seeded_repo().await;
        let service = ReportService::new(repo, Arc::new(FixedClock::at(at(5, 12))));

        let dashboard = service.dashboard().await.unwrap();
        assert_eq!(dashboard.total_tickets, 2);
        assert_eq!(dashboard.open_tickets, 1);
        assert_eq!(dashboard.tickets_by_clinic["UBS Centro"], 1);
        assert_eq!(dashboard.tickets_by_defect["Slow computer"], 1);
        assert_eq!(dashboard.opened_by_month["2024-02"], 2);
    }

    #[tokio::test]
    async fn test_turnaround_formats_working_time() {
        let repo = seeded_repo().await;
        // Monday noon: closed ticket took 1h, open ticket has accrued 4h.
        let service = ReportService::new(repo, Arc::new(FixedClock::at(at(5, 12))));

        let turnaround = service.turnaround().await.unwrap();
        assert_eq!(turnaround.overall.as_deref(), Some("2h 30m"));
        assert_eq!(turnaround.by_clinic["UBS Centro"], "1h 0m");
        assert_eq!(turnaround.by_clinic["UBS Norte"], "4h 0m");
    }
}
