use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::json;

// ============================================================================
// Wire payloads
// ============================================================================
//
// Every leaf is optional so that missing or mistyped fields reach the
// validator, which owns the per-field rejection messages, instead of being
// rejected by serde with an opaque error.

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchPayload {
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    // The original web client sends the misspelled key.
    #[serde(alias = "traverlerDetails")]
    pub traveler_details: Option<TravelerDetails>,
    pub user_timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerDetails {
    pub adults: Option<i64>,
    pub children: Option<Vec<ChildTraveler>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChildTraveler {
    pub age: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchPayload {
    pub destination: Option<String>,
    pub check_in: Option<String>,
    #[serde(rename = "checkout")]
    pub check_out: Option<String>,
    pub guest_details: Option<GuestDetails>,
    pub room_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetails {
    pub adults: Option<i64>,
    pub children: Option<Vec<ChildTraveler>>,
    pub rooms: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSearchPayload {
    pub pick_up_location: Option<String>,
    pub pick_up_date: Option<String>,
    pub pick_up_time: Option<String>,
    pub drop_off_location: Option<String>,
    pub drop_off_date: Option<String>,
    pub drop_off_time: Option<String>,
    pub return_to_same_location: Option<bool>,
}

// ============================================================================
// Validated queries
// ============================================================================

#[derive(Debug, Clone)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub adults: u32,
    pub children_ages: Vec<u8>,
    pub timezone: Tz,
}

#[derive(Debug, Clone)]
pub struct HotelQuery {
    pub destination: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children_ages: Vec<u8>,
    pub rooms: u32,
}

#[derive(Debug, Clone)]
pub struct TransferQuery {
    pub pick_up_location: String,
    pub drop_off_location: String,
    pub pick_up_at: NaiveDateTime,
    pub drop_off_at: NaiveDateTime,
    pub return_to_same_location: bool,
}

impl FlightQuery {
    /// Input parameters as persisted in the audit record (never the results).
    pub fn audit_params(&self) -> serde_json::Value {
        json!({
            "fromLocation": self.origin,
            "toLocation": self.destination,
            "departureDate": self.departure_date.to_string(),
            "returnDate": self.return_date.map(|d| d.to_string()),
            "adults": self.adults,
            "childrenAges": self.children_ages,
            "userTimezone": self.timezone.name(),
        })
    }
}

impl HotelQuery {
    pub fn audit_params(&self) -> serde_json::Value {
        json!({
            "destination": self.destination,
            "checkIn": self.check_in.to_string(),
            "checkout": self.check_out.to_string(),
            "adults": self.adults,
            "childrenAges": self.children_ages,
            "rooms": self.rooms,
        })
    }
}

impl TransferQuery {
    pub fn audit_params(&self) -> serde_json::Value {
        json!({
            "pickUpLocation": self.pick_up_location,
            "dropOffLocation": self.drop_off_location,
            "pickUpDateTime": self.pick_up_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "dropOffDateTime": self.drop_off_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "returnToSameLocation": self.return_to_same_location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_payload_accepts_misspelled_traveler_key() {
        let json = r#"
            {
                "fromLocation": "JFK",
                "toLocation": "LHR",
                "departureDate": "2025-06-01",
                "traverlerDetails": { "adults": 2 },
                "userTimezone": "Europe/London"
            }
        "#;
        let payload: FlightSearchPayload = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(payload.traveler_details.unwrap().adults, Some(2));
    }

    #[test]
    fn hotel_payload_uses_lowercase_checkout_key() {
        let json = r#"
            {
                "destination": "PAR",
                "checkIn": "2025-07-10",
                "checkout": "2025-07-12",
                "guestDetails": { "adults": 1, "rooms": 1 }
            }
        "#;
        let payload: HotelSearchPayload = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(payload.check_out.as_deref(), Some("2025-07-12"));
    }
}
