use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::audit::{AuditStore, SearchAuditRecord};
use crate::normalize;
use crate::offer::{CarOffer, FlightOffer, HotelOffer};
use crate::provider::{
    ProviderClient, DEFAULT_MAX_FLIGHT_OFFERS, DEFAULT_TRANSFER_TYPE, MAX_HOTEL_IDS,
};
use crate::query::{FlightSearchPayload, HotelSearchPayload, TransferSearchPayload};
use crate::validate;
use crate::{SearchError, SearchResult};

const NO_FLIGHT_OFFERS: &str = "No flights found for the given route and dates";
const NO_HOTELS_FOR_CITY: &str = "No hotels found for the given destination";
const NO_HOTEL_OFFERS: &str = "No hotel offers found for the given dates";
const NO_TRANSFER_OFFERS: &str = "No transfers found for the given route and times";

const TRANSFER_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Orchestrates one search per domain: validate, call the provider, map
/// failures, normalize, then dispatch a detached audit write. The audit
/// write never changes the outcome handed back to the caller.
pub struct SearchService {
    provider: Arc<dyn ProviderClient>,
    audit: Arc<dyn AuditStore>,
    currency: String,
}

impl SearchService {
    pub fn new(provider: Arc<dyn ProviderClient>, audit: Arc<dyn AuditStore>, currency: String) -> Self {
        Self {
            provider,
            audit,
            currency,
        }
    }

    pub async fn flight(
        &self,
        payload: FlightSearchPayload,
        user_id: Option<String>,
    ) -> SearchResult<Vec<FlightOffer>> {
        let query = validate::flight_query(&payload).map_err(SearchError::InvalidInput)?;
        if let Some(return_date) = query.return_date {
            if return_date < query.departure_date {
                return Err(SearchError::InvalidInput(
                    "returnDate must not be earlier than departureDate".to_string(),
                ));
            }
        }

        let raw = self
            .provider
            .search_flight_offers(
                &query.origin,
                &query.destination,
                query.departure_date,
                query.return_date,
                query.adults,
                DEFAULT_MAX_FLIGHT_OFFERS,
            )
            .await
            .map_err(SearchError::UpstreamUnavailable)?;
        let raw = require_offers(raw, NO_FLIGHT_OFFERS)?;

        let offers = normalize::flight_offers(&raw, query.timezone)
            .map_err(|err| no_results(err, NO_FLIGHT_OFFERS))?;

        self.dispatch_audit(SearchAuditRecord::flight(&query, user_id));
        Ok(offers)
    }

    pub async fn hotel(
        &self,
        payload: HotelSearchPayload,
        user_id: Option<String>,
    ) -> SearchResult<Vec<HotelOffer>> {
        let query = validate::hotel_query(&payload).map_err(SearchError::InvalidInput)?;
        if query.check_out < query.check_in {
            return Err(SearchError::InvalidInput(
                "checkout must not be earlier than checkIn".to_string(),
            ));
        }

        let hotel_ids = self
            .provider
            .hotel_ids_by_city(&query.destination)
            .await
            .map_err(SearchError::UpstreamUnavailable)?;
        if hotel_ids.is_empty() {
            return Err(SearchError::NoResults(NO_HOTELS_FOR_CITY.to_string()));
        }
        let capped = &hotel_ids[..hotel_ids.len().min(MAX_HOTEL_IDS)];

        let raw = self
            .provider
            .search_hotel_offers(
                capped,
                query.check_in,
                query.check_out,
                query.adults,
                query.children_ages.len() as u32,
                query.rooms,
                &self.currency,
            )
            .await
            .map_err(SearchError::UpstreamUnavailable)?;
        let raw = require_offers(raw, NO_HOTEL_OFFERS)?;

        let offers =
            normalize::hotel_offers(&raw).map_err(|err| no_results(err, NO_HOTEL_OFFERS))?;

        self.dispatch_audit(SearchAuditRecord::hotel(&query, user_id));
        Ok(offers)
    }

    pub async fn transfer(
        &self,
        payload: TransferSearchPayload,
        user_id: Option<String>,
    ) -> SearchResult<Vec<CarOffer>> {
        let query = validate::transfer_query(&payload).map_err(SearchError::InvalidInput)?;
        if query.drop_off_at <= query.pick_up_at {
            return Err(SearchError::InvalidInput(
                "dropOffDateTime must be later than pickUpDateTime".to_string(),
            ));
        }

        let raw = self
            .provider
            .search_transfer_offers(
                &query.pick_up_location,
                &query.drop_off_location,
                &query.pick_up_at.format(TRANSFER_DATETIME_FORMAT).to_string(),
                &query.drop_off_at.format(TRANSFER_DATETIME_FORMAT).to_string(),
                DEFAULT_TRANSFER_TYPE,
            )
            .await
            .map_err(SearchError::UpstreamUnavailable)?;
        let raw = require_offers(raw, NO_TRANSFER_OFFERS)?;

        let offers = normalize::car_offers(&raw).map_err(|err| no_results(err, NO_TRANSFER_OFFERS))?;

        self.dispatch_audit(SearchAuditRecord::transfer(&query, user_id));
        Ok(offers)
    }

    /// Fire-and-forget: the record is handed to a detached task once the
    /// success value is committed, so a slow or failing store can never
    /// block or fail the response.
    fn dispatch_audit(&self, record: SearchAuditRecord) {
        let store = Arc::clone(&self.audit);
        tokio::spawn(async move {
            if let Err(err) = store.insert(&record).await {
                tracing::warn!(domain = %record.domain, error = %err, "search audit write failed");
            }
        });
    }
}

fn require_offers(raw: Vec<Value>, message: &str) -> SearchResult<Vec<Value>> {
    if raw.is_empty() {
        return Err(SearchError::NoResults(message.to_string()));
    }
    Ok(raw)
}

fn no_results(err: normalize::NormalizeError, message: &str) -> SearchError {
    debug!(error = %err, "provider offer not normalizable, treating as no results");
    SearchError::NoResults(message.to_string())
}
