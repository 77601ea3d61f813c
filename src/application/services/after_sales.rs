use std::sync::Arc;

use chrono::NaiveTime;
use tracing::instrument;

use crate::domain::{
    ports::BookingRepository, Booking, DomainError, RescheduleOutcome, Result,
};

/// After-sales use cases over the booking repository. Validates inputs before
/// they reach the store; a missing booking stays a normal outcome.
pub struct AfterSalesService {
    repo: Arc<dyn BookingRepository>,
}

impl AfterSalesService {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn change_departure_time(
        &self,
        booking_id: &str,
        new_time: &str,
    ) -> Result<RescheduleOutcome> {
        if booking_id.trim().is_empty() {
            return Err(DomainError::validation("booking id must not be empty"));
        }
        if NaiveTime::parse_from_str(new_time, "%H:%M").is_err() {
            return Err(DomainError::validation(format!(
                "departure time {new_time:?} is not a 24-hour HH:MM time"
            )));
        }

        self.repo.change_departure_time(booking_id, new_time).await
    }

    pub async fn find_booking(&self, booking_id: &str) -> Result<Option<Booking>> {
        self.repo.find(booking_id).await
    }
}
