pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_support;

pub use application::{AfterSalesService, SupportPipeline, APOLOGY};
pub use domain::{DomainError, RescheduleOutcome, SupportAnswer};
pub use infrastructure::{AppConfig, SupportAgent};
