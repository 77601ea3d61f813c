use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A booking record as stored by the after-sales backend. Consumed here, not
/// owned: unknown fields are carried through `extra` so a read-modify-write
/// never drops data the rest of the platform put there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub route: String,
    pub departure_date: String,
    pub departure_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Result of a departure-time change. A missing booking is a normal outcome,
/// not an error; callers branch on the variant and only the presentation edge
/// turns it into user-facing text via [`render`](RescheduleOutcome::render).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RescheduleOutcome {
    Changed {
        booking: Booking,
        old_time: String,
        new_time: String,
    },
    NotFound {
        booking_id: String,
    },
}

impl RescheduleOutcome {
    pub fn render(&self) -> String {
        match self {
            Self::Changed {
                booking,
                old_time,
                new_time,
            } => format!(
                "Booking {} rescheduled.\nRoute: {}\nDate: {}\nDeparture: {} -> {}",
                booking.id, booking.route, booking.departure_date, old_time, new_time
            ),
            Self::NotFound { booking_id } => {
                format!("No booking found with id {booking_id}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking() -> Booking {
        Booking {
            id: "BKL2026001".into(),
            route: "Hanoi - Da Nang".into(),
            departure_date: "2026-09-01".into(),
            departure_time: "08:00".into(),
            updated_at: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn changed_render_names_both_times() {
        let outcome = RescheduleOutcome::Changed {
            booking: sample_booking(),
            old_time: "08:00".into(),
            new_time: "15:00".into(),
        };
        let text = outcome.render();
        assert!(text.contains("BKL2026001"));
        assert!(text.contains("08:00"));
        assert!(text.contains("15:00"));
    }

    #[test]
    fn not_found_render_names_the_id() {
        let outcome = RescheduleOutcome::NotFound {
            booking_id: "UNKNOWN_ID".into(),
        };
        assert!(outcome.render().contains("UNKNOWN_ID"));
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = serde_json::json!({
            "id": "BKL2026002",
            "route": "Hue - Hoi An",
            "departure_date": "2026-09-02",
            "departure_time": "10:30",
            "seat": "12A"
        });
        let booking: Booking = serde_json::from_value(raw).unwrap();
        let back = serde_json::to_value(&booking).unwrap();
        assert_eq!(back["seat"], "12A");
    }
}
