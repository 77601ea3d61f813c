use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::{
    ports::BookingRepository, Booking, DomainError, RescheduleOutcome, Result,
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct BookingFile {
    bookings: Vec<Booking>,
}

/// Booking records in a JSON file, shared with the rest of the platform.
///
/// Every operation re-reads the file and runs under one async mutex, so two
/// concurrent reschedules cannot interleave their read-modify-write and lose
/// an update.
pub struct JsonBookingStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonBookingStore {
    /// Opens the store, verifying the file exists and parses. An unreadable
    /// store is a configuration error and fails fast here rather than at the
    /// first reschedule.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            lock: Mutex::new(()),
        };
        store.read_file().await?;
        info!(path = %store.path.display(), "opened booking store");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<BookingFile> {
        // Only absence is NotFound; any other read failure means the file is
        // there but inaccessible.
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            let detail = format!("booking store {}: {e}", self.path.display());
            if e.kind() == std::io::ErrorKind::NotFound {
                DomainError::not_found(detail)
            } else {
                DomainError::internal(detail)
            }
        })?;
        serde_json::from_str(&text).map_err(|e| {
            DomainError::validation(format!("booking store {}: {e}", self.path.display()))
        })
    }

    async fn write_file(&self, file: &BookingFile) -> Result<()> {
        let text = serde_json::to_string_pretty(file)
            .map_err(|e| DomainError::internal(e.to_string()))?;
        tokio::fs::write(&self.path, text).await.map_err(|e| {
            DomainError::internal(format!("booking store {}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl BookingRepository for JsonBookingStore {
    async fn find(&self, booking_id: &str) -> Result<Option<Booking>> {
        let _guard = self.lock.lock().await;
        let file = self.read_file().await?;
        Ok(file.bookings.into_iter().find(|b| b.id == booking_id))
    }

    async fn change_departure_time(
        &self,
        booking_id: &str,
        new_time: &str,
    ) -> Result<RescheduleOutcome> {
        let _guard = self.lock.lock().await;
        let mut file = self.read_file().await?;

        let Some(booking) = file.bookings.iter_mut().find(|b| b.id == booking_id) else {
            return Ok(RescheduleOutcome::NotFound {
                booking_id: booking_id.to_string(),
            });
        };

        let old_time = std::mem::replace(&mut booking.departure_time, new_time.to_string());
        booking.updated_at = Some(Utc::now());
        let changed = booking.clone();

        self.write_file(&file).await?;

        info!(booking_id, old_time = %old_time, new_time, "departure time changed");
        Ok(RescheduleOutcome::Changed {
            booking: changed,
            old_time,
            new_time: new_time.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_store(dir: &tempfile::TempDir) -> JsonBookingStore {
        let path = dir.path().join("bookings.json");
        let body = serde_json::json!({
            "bookings": [
                {
                    "id": "BKL2026001",
                    "route": "Hanoi - Da Nang",
                    "departure_date": "2026-09-01",
                    "departure_time": "08:00"
                },
                {
                    "id": "BKL2026002",
                    "route": "Saigon - Da Lat",
                    "departure_date": "2026-09-03",
                    "departure_time": "21:15"
                }
            ]
        });
        std::fs::write(&path, serde_json::to_string_pretty(&body).unwrap()).unwrap();
        JsonBookingStore::open(path).await.unwrap()
    }

    #[tokio::test]
    async fn open_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonBookingStore::open(dir.path().join("absent.json"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn open_fails_on_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.json");
        std::fs::write(&path, "not json").unwrap();
        let err = JsonBookingStore::open(path).await.err().unwrap();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unreadable_file_is_not_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.json");
        std::fs::write(&path, [0xffu8, 0xfe, 0x00]).unwrap();
        let err = JsonBookingStore::open(path).await.err().unwrap();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[tokio::test]
    async fn reschedule_round_trip_persists_the_new_time() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        let outcome = store
            .change_departure_time("BKL2026001", "15:00")
            .await
            .unwrap();

        let text = outcome.render();
        assert!(text.contains("08:00"));
        assert!(text.contains("15:00"));

        let booking = store.find("BKL2026001").await.unwrap().unwrap();
        assert_eq!(booking.departure_time, "15:00");
        assert!(booking.updated_at.is_some());
    }

    #[tokio::test]
    async fn unknown_id_reports_not_found_and_mutates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        let outcome = store
            .change_departure_time("UNKNOWN_ID", "15:00")
            .await
            .unwrap();

        assert!(matches!(outcome, RescheduleOutcome::NotFound { .. }));
        assert!(outcome.render().contains("UNKNOWN_ID"));

        let untouched = store.find("BKL2026001").await.unwrap().unwrap();
        assert_eq!(untouched.departure_time, "08:00");
        assert!(untouched.updated_at.is_none());
    }

    #[tokio::test]
    async fn concurrent_reschedules_both_land() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(seeded_store(&dir).await);

        let first = {
            let store = store.clone();
            tokio::spawn(async move { store.change_departure_time("BKL2026001", "09:30").await })
        };
        let second = {
            let store = store.clone();
            tokio::spawn(async move { store.change_departure_time("BKL2026002", "22:00").await })
        };

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let a = store.find("BKL2026001").await.unwrap().unwrap();
        let b = store.find("BKL2026002").await.unwrap().unwrap();
        assert_eq!(a.departure_time, "09:30");
        assert_eq!(b.departure_time, "22:00");
    }
}
