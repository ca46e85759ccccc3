use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::query::{
    ChildTraveler, FlightQuery, FlightSearchPayload, HotelQuery, HotelSearchPayload,
    TransferQuery, TransferSearchPayload,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

const MIN_DESTINATION_LEN: usize = 3;
const MAX_DESTINATION_LEN: usize = 100;
const MAX_CHILD_AGE: i64 = 17;

/// Validate a raw flight payload into a typed query, or return one
/// concatenated message with a clause per invalid field.
pub fn flight_query(payload: &FlightSearchPayload) -> Result<FlightQuery, String> {
    let mut errors = Vec::new();

    let origin = require_location_code(&payload.from_location, "fromLocation", &mut errors);
    let destination = require_location_code(&payload.to_location, "toLocation", &mut errors);
    let departure_date = require_date(&payload.departure_date, "departureDate", &mut errors);

    let return_date = match &payload.return_date {
        Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push("returnDate must be in YYYY-MM-DD format".to_string());
                None
            }
        },
        None => None,
    };

    let details = payload.traveler_details.as_ref();
    let adults = require_adults(
        details.and_then(|d| d.adults),
        "travelerDetails.adults",
        &mut errors,
    );
    let children_ages = collect_children_ages(
        details.and_then(|d| d.children.as_deref()),
        "travelerDetails.children",
        &mut errors,
    );

    let timezone = match payload.user_timezone.as_deref() {
        Some(raw) => match raw.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(_) => {
                errors.push("userTimezone must be a valid IANA timezone".to_string());
                None
            }
        },
        None => {
            errors.push("userTimezone is required".to_string());
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors.join("; "));
    }

    Ok(FlightQuery {
        origin: origin.unwrap_or_default(),
        destination: destination.unwrap_or_default(),
        departure_date: departure_date.unwrap_or_default(),
        return_date,
        adults,
        children_ages,
        timezone: timezone.unwrap_or(chrono_tz::UTC),
    })
}

pub fn hotel_query(payload: &HotelSearchPayload) -> Result<HotelQuery, String> {
    let mut errors = Vec::new();

    let destination = match payload.destination.as_deref().map(str::trim) {
        Some(dest)
            if (MIN_DESTINATION_LEN..=MAX_DESTINATION_LEN).contains(&dest.chars().count()) =>
        {
            Some(dest.to_string())
        }
        Some(_) => {
            errors.push(format!(
                "destination must be between {} and {} characters",
                MIN_DESTINATION_LEN, MAX_DESTINATION_LEN
            ));
            None
        }
        None => {
            errors.push("destination is required".to_string());
            None
        }
    };

    let check_in = require_date(&payload.check_in, "checkIn", &mut errors);
    let check_out = require_date(&payload.check_out, "checkout", &mut errors);

    let details = payload.guest_details.as_ref();
    let adults = require_adults(
        details.and_then(|d| d.adults),
        "guestDetails.adults",
        &mut errors,
    );
    let children_ages = collect_children_ages(
        details.and_then(|d| d.children.as_deref()),
        "guestDetails.children",
        &mut errors,
    );

    let rooms = match details.and_then(|d| d.rooms) {
        Some(rooms) if rooms >= 1 => match u32::try_from(rooms) {
            Ok(rooms) => rooms,
            Err(_) => {
                errors.push("guestDetails.rooms is out of range".to_string());
                0
            }
        },
        Some(_) => {
            errors.push("guestDetails.rooms must be at least 1".to_string());
            0
        }
        None => 1,
    };

    if !errors.is_empty() {
        return Err(errors.join("; "));
    }

    Ok(HotelQuery {
        destination: destination.unwrap_or_default(),
        check_in: check_in.unwrap_or_default(),
        check_out: check_out.unwrap_or_default(),
        adults,
        children_ages,
        rooms,
    })
}

pub fn transfer_query(payload: &TransferSearchPayload) -> Result<TransferQuery, String> {
    let mut errors = Vec::new();

    let pick_up_location =
        require_nonempty(&payload.pick_up_location, "pickUpLocation", &mut errors);
    let drop_off_location =
        require_nonempty(&payload.drop_off_location, "dropOffLocation", &mut errors);

    let pick_up_date = require_date(&payload.pick_up_date, "pickUpDate", &mut errors);
    let drop_off_date = require_date(&payload.drop_off_date, "dropOffDate", &mut errors);
    let pick_up_time = require_time(&payload.pick_up_time, "pickUpTime", &mut errors);
    let drop_off_time = require_time(&payload.drop_off_time, "dropOffTime", &mut errors);

    let return_to_same_location = match payload.return_to_same_location {
        Some(flag) => flag,
        None => {
            errors.push("returnToSameLocation is required and must be a boolean".to_string());
            false
        }
    };

    if !errors.is_empty() {
        return Err(errors.join("; "));
    }

    let pick_up_at = pick_up_date.unwrap_or_default().and_time(pick_up_time.unwrap_or_default());
    let drop_off_at =
        drop_off_date.unwrap_or_default().and_time(drop_off_time.unwrap_or_default());

    Ok(TransferQuery {
        pick_up_location: pick_up_location.unwrap_or_default(),
        drop_off_location: drop_off_location.unwrap_or_default(),
        pick_up_at,
        drop_off_at,
        return_to_same_location,
    })
}

fn require_location_code(
    value: &Option<String>,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(code) if code.chars().count() == 3 => Some(code.to_uppercase()),
        Some(_) => {
            errors.push(format!("{} must be a 3-letter location code", field));
            None
        }
        None => {
            errors.push(format!("{} is required", field));
            None
        }
    }
}

fn require_nonempty(
    value: &Option<String>,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => {
            errors.push(format!("{} must be a non-empty string", field));
            None
        }
    }
}

fn require_date(value: &Option<String>, field: &str, errors: &mut Vec<String>) -> Option<NaiveDate> {
    match value.as_deref() {
        Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(format!("{} must be in YYYY-MM-DD format", field));
                None
            }
        },
        None => {
            errors.push(format!("{} is required", field));
            None
        }
    }
}

fn require_time(value: &Option<String>, field: &str, errors: &mut Vec<String>) -> Option<NaiveTime> {
    match value.as_deref() {
        Some(raw) => match NaiveTime::parse_from_str(raw, TIME_FORMAT) {
            Ok(time) => Some(time),
            Err(_) => {
                errors.push(format!("{} must be in 24-hour HH:mm format", field));
                None
            }
        },
        None => {
            errors.push(format!("{} is required", field));
            None
        }
    }
}

fn require_adults(value: Option<i64>, field: &str, errors: &mut Vec<String>) -> u32 {
    match value {
        Some(adults) if adults >= 1 => match u32::try_from(adults) {
            Ok(adults) => adults,
            Err(_) => {
                errors.push(format!("{} is out of range", field));
                0
            }
        },
        Some(_) => {
            errors.push(format!("{} must be at least 1", field));
            0
        }
        None => {
            errors.push(format!("{} is required", field));
            0
        }
    }
}

fn collect_children_ages(
    children: Option<&[ChildTraveler]>,
    field: &str,
    errors: &mut Vec<String>,
) -> Vec<u8> {
    let mut ages = Vec::new();
    for child in children.unwrap_or_default() {
        match child.age {
            Some(age) if (0..=MAX_CHILD_AGE).contains(&age) => ages.push(age as u8),
            _ => {
                errors.push(format!("{} ages must be between 0 and 17", field));
                break;
            }
        }
    }
    ages
}
