//! Domain services module

pub mod business_hours;
pub mod reporting;

pub use business_hours::BusinessHours;
pub use reporting::TicketMetricsService;
