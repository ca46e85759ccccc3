use serde::Serialize;

// Flat, render-ready view-models. Every field is a primitive the client can
// print directly; nothing of the provider's nesting leaks through.

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub airline: String,
    pub from: String,
    pub to: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub number_of_stops: usize,
    pub cabin_class: String,
    pub price: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelOffer {
    pub hotel_name: String,
    pub city_code: String,
    pub room_category: String,
    pub bed_info: String,
    pub description: String,
    pub check_in: String,
    pub check_out: String,
    pub price: String,
    pub currency: String,
    pub refundable: bool,
    pub bed_type: String,
    pub guests: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarOffer {
    pub transfer_type: String,
    pub start_time: String,
    pub start_location: String,
    pub end_time: String,
    pub end_location: String,
    pub vehicle_description: String,
    pub seats: u64,
    pub vehicle_image_url: String,
    pub provider_name: String,
    pub provider_logo_url: String,
    pub price: String,
    pub currency: String,
    pub distance: u64,
    pub distance_unit: String,
}
