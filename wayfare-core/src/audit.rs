use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::query::{FlightQuery, HotelQuery, TransferQuery};

/// Which search product a request was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchDomain {
    Flight,
    Hotel,
    CarTransfer,
}

impl std::fmt::Display for SearchDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchDomain::Flight => write!(f, "FLIGHT"),
            SearchDomain::Hotel => write!(f, "HOTEL"),
            SearchDomain::CarTransfer => write!(f, "CAR_TRANSFER"),
        }
    }
}

/// One record per completed search attempt: the inputs, never the results.
/// Owned solely by the audit store once dispatched.
#[derive(Debug, Clone, Serialize)]
pub struct SearchAuditRecord {
    pub id: Uuid,
    pub domain: SearchDomain,
    pub params: Value,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SearchAuditRecord {
    fn new(domain: SearchDomain, params: Value, user_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            domain,
            params,
            user_id,
            created_at: Utc::now(),
        }
    }

    pub fn flight(query: &FlightQuery, user_id: Option<String>) -> Self {
        Self::new(SearchDomain::Flight, query.audit_params(), user_id)
    }

    pub fn hotel(query: &HotelQuery, user_id: Option<String>) -> Self {
        Self::new(SearchDomain::Hotel, query.audit_params(), user_id)
    }

    pub fn transfer(query: &TransferQuery, user_id: Option<String>) -> Self {
        Self::new(SearchDomain::CarTransfer, query.audit_params(), user_id)
    }
}

/// Persistence seam for search audit records.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn insert(
        &self,
        record: &SearchAuditRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
