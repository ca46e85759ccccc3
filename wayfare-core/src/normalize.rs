use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use serde_json::Value;

use crate::offer::{CarOffer, FlightOffer, HotelOffer};

// ============================================================================
// Fallbacks
// ============================================================================
//
// The provider's response shape is outside our control. Every normalized
// field is extracted as `provider field | fallback`, with each fallback a
// named constant so it stays testable instead of being scattered inline.

const FALLBACK_CURRENCY: &str = "EUR";
const FALLBACK_PRICE: &str = "0";
const FALLBACK_CABIN: &str = "N/A";
const FALLBACK_DURATION: &str = "0h 0m";

const FALLBACK_HOTEL_NAME: &str = "Unknown";
const FALLBACK_ROOM_CATEGORY: &str = "Not specified";
const FALLBACK_BED_COUNT: &str = "N/A";
const FALLBACK_BED_TYPE_INFO: &str = "Bed";
const FALLBACK_BED_TYPE: &str = "N/A";
const FALLBACK_ROOM_DESCRIPTION: &str = "No description provided";
const FALLBACK_GUESTS: u64 = 1;

const FALLBACK_PROVIDER_NAME: &str = "Unknown provider";
const FALLBACK_LOCATION: &str = "Unknown";
const FALLBACK_SEATS: u64 = 0;
const FALLBACK_DISTANCE: u64 = 0;
const FALLBACK_DISTANCE_UNIT: &str = "KM";
const FALLBACK_TRANSFER_TYPE: &str = "PRIVATE";

/// Provider value meaning "refundable up to the cancellation deadline".
const REFUNDABLE_SENTINEL: &str = "REFUNDABLE_UP_TO_DEADLINE";

/// `"Weekday, DD Mon YYYY, hh:mm AM/PM"`
const DISPLAY_TIME_FORMAT: &str = "%A, %d %b %Y, %I:%M %p";

/// Raised only when an offer's top-level shape (itineraries, room offers,
/// vehicle) is structurally absent. Missing leaf fields never error; they
/// take the fallbacks above.
#[derive(Debug, thiserror::Error)]
#[error("offer payload missing {0}")]
pub struct NormalizeError(pub &'static str);

// ============================================================================
// Flight
// ============================================================================

pub fn flight_offers(raw: &[Value], timezone: Tz) -> Result<Vec<FlightOffer>, NormalizeError> {
    raw.iter().map(|offer| flight_offer(offer, timezone)).collect()
}

fn flight_offer(offer: &Value, timezone: Tz) -> Result<FlightOffer, NormalizeError> {
    let itinerary = offer["itineraries"]
        .as_array()
        .and_then(|itineraries| itineraries.first())
        .ok_or(NormalizeError("itineraries"))?;
    let segments = itinerary["segments"]
        .as_array()
        .filter(|segments| !segments.is_empty())
        .ok_or(NormalizeError("segments"))?;

    let first = &segments[0];
    let last = &segments[segments.len() - 1];

    Ok(FlightOffer {
        airline: text(&first["carrierCode"], ""),
        from: text(&first["departure"]["iataCode"], ""),
        to: text(&last["arrival"]["iataCode"], ""),
        departure_time: format_instant(first["departure"]["at"].as_str(), timezone),
        arrival_time: format_instant(last["arrival"]["at"].as_str(), timezone),
        duration: format_duration(itinerary["duration"].as_str()),
        number_of_stops: segments.len() - 1,
        cabin_class: text(
            &offer["travelerPricings"][0]["fareDetailsBySegment"][0]["cabin"],
            FALLBACK_CABIN,
        ),
        price: amount(&offer["price"]["total"], FALLBACK_PRICE),
        currency: text(&offer["price"]["currency"], FALLBACK_CURRENCY),
    })
}

// ============================================================================
// Hotel
// ============================================================================

pub fn hotel_offers(raw: &[Value]) -> Result<Vec<HotelOffer>, NormalizeError> {
    raw.iter().map(hotel_offer).collect()
}

fn hotel_offer(entry: &Value) -> Result<HotelOffer, NormalizeError> {
    let room_offer = entry["offers"]
        .as_array()
        .and_then(|offers| offers.first())
        .ok_or(NormalizeError("offers"))?;

    let type_estimated = &room_offer["room"]["typeEstimated"];
    let beds = match type_estimated["beds"].as_u64() {
        Some(beds) => beds.to_string(),
        None => FALLBACK_BED_COUNT.to_string(),
    };
    let bed_info = format!(
        "{} {}(s)",
        beds,
        text(&type_estimated["bedType"], FALLBACK_BED_TYPE_INFO)
    );

    let refundable = room_offer["policies"]["refundable"]["cancellationRefund"]
        .as_str()
        .map(|value| value == REFUNDABLE_SENTINEL)
        .unwrap_or(false);

    Ok(HotelOffer {
        hotel_name: text(&entry["hotel"]["name"], FALLBACK_HOTEL_NAME),
        city_code: text(&entry["hotel"]["cityCode"], ""),
        room_category: text(&type_estimated["category"], FALLBACK_ROOM_CATEGORY),
        bed_info,
        description: text(
            &room_offer["room"]["description"]["text"],
            FALLBACK_ROOM_DESCRIPTION,
        ),
        check_in: text(&room_offer["checkInDate"], ""),
        check_out: text(&room_offer["checkOutDate"], ""),
        price: amount(&room_offer["price"]["total"], FALLBACK_PRICE),
        currency: text(&room_offer["price"]["currency"], FALLBACK_CURRENCY),
        refundable,
        bed_type: text(&type_estimated["bedType"], FALLBACK_BED_TYPE),
        guests: room_offer["guests"]["adults"].as_u64().unwrap_or(FALLBACK_GUESTS),
    })
}

// ============================================================================
// Car transfer
// ============================================================================

pub fn car_offers(raw: &[Value]) -> Result<Vec<CarOffer>, NormalizeError> {
    raw.iter().map(car_offer).collect()
}

fn car_offer(offer: &Value) -> Result<CarOffer, NormalizeError> {
    if !offer["vehicle"].is_object() {
        return Err(NormalizeError("vehicle"));
    }
    let vehicle = &offer["vehicle"];

    // Seats arrive either as `[{ "count": n }]` or as a bare number.
    let seats = vehicle["seats"]
        .as_array()
        .and_then(|seats| seats.first())
        .and_then(|seat| seat["count"].as_u64())
        .or_else(|| vehicle["seats"].as_u64())
        .unwrap_or(FALLBACK_SEATS);

    // Prefer the amount converted into the requested currency over the
    // supplier's own quotation.
    let (price, currency) = if offer["converted"].is_object() {
        (
            amount(&offer["converted"]["monetaryAmount"], FALLBACK_PRICE),
            text(&offer["converted"]["currencyCode"], FALLBACK_CURRENCY),
        )
    } else {
        (
            amount(&offer["quotation"]["monetaryAmount"], FALLBACK_PRICE),
            text(&offer["quotation"]["currencyCode"], FALLBACK_CURRENCY),
        )
    };

    Ok(CarOffer {
        transfer_type: text(&offer["transferType"], FALLBACK_TRANSFER_TYPE),
        // Transfer timestamps pass through unformatted.
        start_time: text(&offer["start"]["dateTime"], ""),
        start_location: text(&offer["start"]["locationCode"], FALLBACK_LOCATION),
        end_time: text(&offer["end"]["dateTime"], ""),
        end_location: text(&offer["end"]["locationCode"], FALLBACK_LOCATION),
        vehicle_description: text(&vehicle["description"], ""),
        seats,
        vehicle_image_url: text(&vehicle["imageURL"], ""),
        provider_name: text(&offer["serviceProvider"]["name"], FALLBACK_PROVIDER_NAME),
        provider_logo_url: text(&offer["serviceProvider"]["logoUrl"], ""),
        price,
        currency,
        distance: offer["distance"]["value"].as_u64().unwrap_or(FALLBACK_DISTANCE),
        distance_unit: text(&offer["distance"]["unit"], FALLBACK_DISTANCE_UNIT),
    })
}

// ============================================================================
// Field extraction helpers
// ============================================================================

fn text(value: &Value, fallback: &str) -> String {
    value.as_str().unwrap_or(fallback).to_string()
}

/// Monetary amounts arrive as strings or numbers depending on the endpoint.
fn amount(value: &Value, fallback: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => fallback.to_string(),
    }
}

fn format_instant(raw: Option<&str>, timezone: Tz) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    // Offset-carrying instants are converted into the caller's zone;
    // offset-less timestamps are already airport-local and render as given.
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return instant
            .with_timezone(&timezone)
            .format(DISPLAY_TIME_FORMAT)
            .to_string();
    }
    if let Ok(local) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return local.format(DISPLAY_TIME_FORMAT).to_string();
    }
    raw.to_string()
}

/// `"PT7H25M"` → `"7h 25m"`. Days fold into hours; anything unparseable
/// takes the fallback.
fn format_duration(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return FALLBACK_DURATION.to_string();
    };
    let mut hours: u64 = 0;
    let mut minutes: u64 = 0;
    let mut digits = String::new();
    let mut seen_t = false;
    for c in raw.chars() {
        match c {
            'P' => {}
            'T' => seen_t = true,
            '0'..='9' => digits.push(c),
            'D' if !seen_t => {
                hours += digits.parse::<u64>().unwrap_or(0) * 24;
                digits.clear();
            }
            'H' => {
                hours += digits.parse::<u64>().unwrap_or(0);
                digits.clear();
            }
            'M' if seen_t => {
                minutes = digits.parse::<u64>().unwrap_or(0);
                digits.clear();
            }
            _ => digits.clear(),
        }
    }
    format!("{}h {}m", hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn one_segment_flight() -> Value {
        json!({
            "itineraries": [{
                "duration": "PT7H25M",
                "segments": [{
                    "carrierCode": "BA",
                    "departure": { "iataCode": "JFK", "at": "2025-06-01T08:30:00Z" },
                    "arrival": { "iataCode": "LHR", "at": "2025-06-01T15:55:00Z" }
                }]
            }],
            "travelerPricings": [{
                "fareDetailsBySegment": [{ "cabin": "ECONOMY" }]
            }],
            "price": { "total": "523.40", "currency": "GBP" }
        })
    }

    #[test]
    fn flight_renders_in_caller_timezone() {
        let offers =
            flight_offers(&[one_segment_flight()], chrono_tz::Europe::London).unwrap();
        assert_eq!(offers.len(), 1);
        let offer = &offers[0];
        assert_eq!(offer.number_of_stops, 0);
        assert_eq!(offer.airline, "BA");
        assert_eq!(offer.from, "JFK");
        assert_eq!(offer.to, "LHR");
        // 08:30 UTC on 1 June is 09:30 in London (BST).
        assert_eq!(offer.departure_time, "Sunday, 01 Jun 2025, 09:30 AM");
        assert_eq!(offer.arrival_time, "Sunday, 01 Jun 2025, 04:55 PM");
        assert_eq!(offer.duration, "7h 25m");
        assert_eq!(offer.cabin_class, "ECONOMY");
        assert_eq!(offer.price, "523.40");
        assert_eq!(offer.currency, "GBP");
    }

    #[test]
    fn flight_counts_stops_from_segments() {
        let mut offer = one_segment_flight();
        let segment = offer["itineraries"][0]["segments"][0].clone();
        offer["itineraries"][0]["segments"] = json!([segment.clone(), segment]);
        let offers = flight_offers(&[offer], chrono_tz::UTC).unwrap();
        assert_eq!(offers[0].number_of_stops, 1);
    }

    #[test]
    fn flight_without_itineraries_is_structural() {
        let err = flight_offers(&[json!({"price": {}})], chrono_tz::UTC).unwrap_err();
        assert_eq!(err.0, "itineraries");
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = [one_segment_flight()];
        let first = flight_offers(&raw, chrono_tz::Europe::London).unwrap();
        let second = flight_offers(&raw, chrono_tz::Europe::London).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn duration_without_minutes() {
        assert_eq!(format_duration(Some("PT2H")), "2h 0m");
        assert_eq!(format_duration(Some("P1DT2H15M")), "26h 15m");
        assert_eq!(format_duration(None), "0h 0m");
    }

    fn full_hotel_entry() -> Value {
        json!({
            "hotel": { "name": "The Landmark", "cityCode": "LON" },
            "offers": [{
                "checkInDate": "2025-07-10",
                "checkOutDate": "2025-07-12",
                "room": {
                    "typeEstimated": { "category": "DELUXE_ROOM", "beds": 2, "bedType": "QUEEN" },
                    "description": { "text": "Deluxe room with park view" }
                },
                "guests": { "adults": 2 },
                "price": { "total": "412.00", "currency": "GBP" },
                "policies": { "refundable": { "cancellationRefund": "REFUNDABLE_UP_TO_DEADLINE" } }
            }]
        })
    }

    #[test]
    fn hotel_maps_room_and_policy_fields() {
        let offers = hotel_offers(&[full_hotel_entry()]).unwrap();
        let offer = &offers[0];
        assert_eq!(offer.hotel_name, "The Landmark");
        assert_eq!(offer.bed_info, "2 QUEEN(s)");
        assert!(offer.refundable);
        assert_eq!(offer.guests, 2);
    }

    #[test]
    fn hotel_missing_bed_fields_uses_fallbacks() {
        let entry = json!({
            "hotel": { "name": "The Landmark", "cityCode": "LON" },
            "offers": [{ "price": { "total": "99.00" } }]
        });
        let offers = hotel_offers(&[entry]).unwrap();
        let offer = &offers[0];
        assert_eq!(offer.bed_info, "N/A Bed(s)");
        assert_eq!(offer.bed_type, "N/A");
        assert_eq!(offer.room_category, "Not specified");
        assert_eq!(offer.description, "No description provided");
        assert_eq!(offer.currency, "EUR");
        assert_eq!(offer.guests, 1);
        assert!(!offer.refundable);
    }

    #[test]
    fn hotel_without_room_offers_is_structural() {
        let err = hotel_offers(&[json!({"hotel": {"name": "X"}})]).unwrap_err();
        assert_eq!(err.0, "offers");
    }

    #[test]
    fn hotel_non_sentinel_refund_value_is_not_refundable() {
        let mut entry = full_hotel_entry();
        entry["offers"][0]["policies"]["refundable"]["cancellationRefund"] =
            json!("NON_REFUNDABLE");
        let offers = hotel_offers(&[entry]).unwrap();
        assert!(!offers[0].refundable);
    }

    #[test]
    fn car_reads_nested_objects_defensively() {
        let offer = json!({
            "transferType": "PRIVATE",
            "start": { "dateTime": "2025-06-02T10:00:00", "locationCode": "CDG" },
            "end": { "dateTime": "2025-06-02T11:30:00" },
            "vehicle": {
                "description": "Business sedan",
                "seats": [{ "count": 3 }],
                "imageURL": "https://img.example/sedan.png"
            },
            "serviceProvider": { "name": "AcmeCars", "logoUrl": "https://img.example/logo.png" },
            "quotation": { "monetaryAmount": "63.70", "currencyCode": "USD" },
            "converted": { "monetaryAmount": "59.00", "currencyCode": "EUR" },
            "distance": { "value": 32, "unit": "KM" }
        });
        let offers = car_offers(&[offer]).unwrap();
        let offer = &offers[0];
        assert_eq!(offer.seats, 3);
        assert_eq!(offer.price, "59.00");
        assert_eq!(offer.currency, "EUR");
        assert_eq!(offer.start_location, "CDG");
        assert_eq!(offer.end_location, "Unknown");
        // Raw transfer timestamps pass through unformatted.
        assert_eq!(offer.start_time, "2025-06-02T10:00:00");
    }

    #[test]
    fn car_missing_optionals_take_fallbacks() {
        let offers = car_offers(&[json!({ "vehicle": {} })]).unwrap();
        let offer = &offers[0];
        assert_eq!(offer.seats, 0);
        assert_eq!(offer.provider_name, "Unknown provider");
        assert_eq!(offer.provider_logo_url, "");
        assert_eq!(offer.price, "0");
        assert_eq!(offer.currency, "EUR");
        assert_eq!(offer.distance, 0);
    }

    #[test]
    fn car_without_vehicle_is_structural() {
        let err = car_offers(&[json!({"serviceProvider": {}})]).unwrap_err();
        assert_eq!(err.0, "vehicle");
    }
}
