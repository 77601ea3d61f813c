use crate::domain::{errors::DomainError, Booking, RescheduleOutcome};
use async_trait::async_trait;

/// After-sales booking records. A missing id is a [`RescheduleOutcome::NotFound`],
/// never an `Err`; errors are reserved for an unreadable or unwritable store.
///
/// Implementations must serialize the read-modify-write inside
/// `change_departure_time` so concurrent calls cannot lose updates.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find(&self, booking_id: &str) -> Result<Option<Booking>, DomainError>;
    async fn change_departure_time(
        &self,
        booking_id: &str,
        new_time: &str,
    ) -> Result<RescheduleOutcome, DomainError>;
}
