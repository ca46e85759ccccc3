use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use wayfare_core::query::{FlightSearchPayload, HotelSearchPayload, TransferSearchPayload};
use wayfare_core::SearchError;

use crate::error::ApiError;
use crate::state::AppState;

/// Header set by the session layer when the caller is signed in; absent for
/// anonymous searches. Session issuance itself lives outside this service.
const USER_ID_HEADER: &str = "x-user-id";

/// POST /flight/unified-details
pub async fn flight_unified_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let payload: FlightSearchPayload = decode_payload(body)?;
    let offers = state.search.flight(payload, user_id(&headers)).await?;
    Ok(success(offers))
}

/// POST /hotel/unified-details
pub async fn hotel_unified_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let payload: HotelSearchPayload = decode_payload(body)?;
    let offers = state.search.hotel(payload, user_id(&headers)).await?;
    Ok(success(offers))
}

/// POST /car/unified-details
pub async fn car_unified_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let payload: TransferSearchPayload = decode_payload(body)?;
    let offers = state.search.transfer(payload, user_id(&headers)).await?;
    Ok(success(offers))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "success": true }))
}

fn decode_payload<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|err| {
        ApiError::Search(SearchError::InvalidInput(format!(
            "Invalid request body: {}",
            err
        )))
    })
}

fn success<T: serde::Serialize>(data: T) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": data,
    }))
}

fn user_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
