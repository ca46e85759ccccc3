use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use wayfare_core::provider::{ProviderClient, ProviderError};

const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";
const HOTELS_BY_CITY_PATH: &str = "/v1/reference-data/locations/hotels/by-city";
const HOTEL_OFFERS_PATH: &str = "/v3/shopping/hotel-offers";
const TRANSFER_OFFERS_PATH: &str = "/v1/shopping/transfer-offers";

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Bearer credential obtained out-of-band.
    pub api_key: String,
}

/// REST client for the travel-data provider. One outbound call per
/// operation; no retries, no caching. The provider rate-limits and
/// authenticates on its side.
pub struct AmadeusClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl AmadeusClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Every search endpoint wraps its offer list in a top-level `data`
    /// array; anything else is a malformed payload.
    async fn read_data_array(response: reqwest::Response) -> Result<Vec<Value>, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        payload["data"]
            .as_array()
            .cloned()
            .ok_or_else(|| ProviderError::Malformed("response has no data array".to_string()))
    }
}

#[async_trait]
impl ProviderClient for AmadeusClient {
    async fn search_flight_offers(
        &self,
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
        return_date: Option<NaiveDate>,
        adults: u32,
        max: u32,
    ) -> Result<Vec<Value>, ProviderError> {
        let mut query = vec![
            ("originLocationCode", origin.to_string()),
            ("destinationLocationCode", destination.to_string()),
            ("departureDate", departure_date.to_string()),
            ("adults", adults.to_string()),
            ("max", max.to_string()),
        ];
        if let Some(return_date) = return_date {
            query.push(("returnDate", return_date.to_string()));
        }

        debug!(origin, destination, %departure_date, "searching flight offers");
        let response = self
            .http
            .get(self.url(FLIGHT_OFFERS_PATH))
            .bearer_auth(&self.config.api_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Self::read_data_array(response).await
    }

    async fn hotel_ids_by_city(&self, city_code: &str) -> Result<Vec<String>, ProviderError> {
        debug!(city_code, "looking up hotel ids by city");
        let response = self
            .http
            .get(self.url(HOTELS_BY_CITY_PATH))
            .bearer_auth(&self.config.api_key)
            .query(&[("cityCode", city_code)])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let hotels = Self::read_data_array(response).await?;
        Ok(hotels
            .iter()
            .filter_map(|hotel| hotel["hotelId"].as_str().map(str::to_string))
            .collect())
    }

    async fn search_hotel_offers(
        &self,
        hotel_ids: &[String],
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: u32,
        children: u32,
        rooms: u32,
        currency: &str,
    ) -> Result<Vec<Value>, ProviderError> {
        let query = [
            ("hotelIds", hotel_ids.join(",")),
            ("checkInDate", check_in.to_string()),
            ("checkOutDate", check_out.to_string()),
            ("adults", adults.to_string()),
            ("children", children.to_string()),
            ("roomQuantity", rooms.to_string()),
            ("currency", currency.to_string()),
        ];

        debug!(hotels = hotel_ids.len(), %check_in, %check_out, "searching hotel offers");
        let response = self
            .http
            .get(self.url(HOTEL_OFFERS_PATH))
            .bearer_auth(&self.config.api_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Self::read_data_array(response).await
    }

    async fn search_transfer_offers(
        &self,
        start_location: &str,
        end_location: &str,
        start_date_time: &str,
        end_date_time: &str,
        transfer_type: &str,
    ) -> Result<Vec<Value>, ProviderError> {
        let body = json!({
            "startLocationCode": start_location,
            "endLocationCode": end_location,
            "startDateTime": start_date_time,
            "endDateTime": end_date_time,
            "transferType": transfer_type,
        });

        debug!(start_location, end_location, "searching transfer offers");
        let response = self
            .http
            .post(self.url(TRANSFER_OFFERS_PATH))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Self::read_data_array(response).await
    }
}
