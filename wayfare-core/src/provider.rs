use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

/// Default cap on flight offers requested from the provider.
pub const DEFAULT_MAX_FLIGHT_OFFERS: u32 = 5;

/// Cap on hotel IDs forwarded to the offers call after a city lookup.
pub const MAX_HOTEL_IDS: usize = 5;

/// Default ground-transfer product requested from the provider.
pub const DEFAULT_TRANSFER_TYPE: &str = "PRIVATE";

/// Failure raised by the outbound provider call. The client performs no
/// status-code mapping of its own; callers decide what each variant means.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(String),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected provider payload: {0}")]
    Malformed(String),
}

/// Outbound travel-data provider. One network call per operation, no
/// internal retries; the provider handles its own pooling and auth.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn search_flight_offers(
        &self,
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
        return_date: Option<NaiveDate>,
        adults: u32,
        max: u32,
    ) -> Result<Vec<Value>, ProviderError>;

    /// Hotel identifiers known to the provider for a destination city.
    async fn hotel_ids_by_city(&self, city_code: &str) -> Result<Vec<String>, ProviderError>;

    #[allow(clippy::too_many_arguments)]
    async fn search_hotel_offers(
        &self,
        hotel_ids: &[String],
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: u32,
        children: u32,
        rooms: u32,
        currency: &str,
    ) -> Result<Vec<Value>, ProviderError>;

    async fn search_transfer_offers(
        &self,
        start_location: &str,
        end_location: &str,
        start_date_time: &str,
        end_date_time: &str,
        transfer_type: &str,
    ) -> Result<Vec<Value>, ProviderError>;
}
