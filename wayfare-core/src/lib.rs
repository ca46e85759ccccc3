pub mod audit;
pub mod normalize;
pub mod offer;
pub mod provider;
pub mod query;
pub mod service;
pub mod validate;

pub use audit::{AuditStore, SearchAuditRecord, SearchDomain};
pub use offer::{CarOffer, FlightOffer, HotelOffer};
pub use provider::{ProviderClient, ProviderError};
pub use service::SearchService;

/// Failure taxonomy for a search request, in escalation order. The HTTP
/// layer maps each variant to exactly one status; the `Display` text is the
/// only detail that ever reaches a caller.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Request failed schema or cross-field validation. Never reaches the
    /// provider.
    #[error("{0}")]
    InvalidInput(String),

    /// The provider call itself failed (network, auth, rate limit,
    /// malformed payload).
    #[error("The travel data service is currently unavailable")]
    UpstreamUnavailable(#[source] ProviderError),

    /// The provider answered but had nothing to offer.
    #[error("{0}")]
    NoResults(String),

    /// Anything else. Detail is logged server-side only.
    #[error("Something went wrong while processing the search")]
    Internal(String),
}

pub type SearchResult<T> = Result<T, SearchError>;
