use crate::core::{MatchError, OfferSource};
use crate::models::{RideOffer, RideRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Handles all communication with the ride document store:
/// - Fetching ride request documents
/// - Querying the open-offer candidate pool
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub ride_offers: String,
    pub ride_requests: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        }
    }

    /// Fetch a single ride request document by its document ID
    pub async fn get_request(&self, request_id: &str) -> Result<RideRequest, AppwriteError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents/{}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.ride_requests,
            request_id
        );

        tracing::debug!("Fetching ride request from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppwriteError::NotFound(format!(
                "Ride request {} not found",
                request_id
            )));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }
        if !status.is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to fetch ride request: {}",
                status
            )));
        }

        let doc: Value = response.json().await?;
        let data = doc.get("data").unwrap_or(&doc);

        let mut request: RideRequest = serde_json::from_value(data.clone()).map_err(|e| {
            AppwriteError::InvalidResponse(format!("Failed to parse ride request: {}", e))
        })?;

        if request.id.is_empty() {
            if let Some(id) = doc.get("$id").and_then(|v| v.as_str()) {
                request.id = id.to_string();
            }
        }

        Ok(request)
    }

    /// Query every open ride offer from the offer collection.
    ///
    /// Malformed documents are skipped with a warning; one bad offer never
    /// aborts the batch.
    pub async fn query_open_offers(&self) -> Result<Vec<RideOffer>, AppwriteError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.ride_offers
        );

        let queries = vec!["equal(\"status\", \"open\")".to_string()];
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);

        let full_url = format!("{}?query={}", url, encoded_queries);

        let response = self
            .client
            .get(&full_url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }

        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to query open offers: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let offers: Vec<RideOffer> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                match serde_json::from_value::<RideOffer>(data.clone()) {
                    Ok(mut offer) => {
                        if offer.id.is_empty() {
                            if let Some(id) = doc.get("$id").and_then(|v| v.as_str()) {
                                offer.id = id.to_string();
                            }
                        }
                        Some(offer)
                    }
                    Err(e) => {
                        let doc_id = doc
                            .get("$id")
                            .and_then(|v| v.as_str())
                            .unwrap_or("<unknown>");
                        tracing::warn!("Skipping malformed offer document {}: {}", doc_id, e);
                        None
                    }
                }
            })
            .collect();

        tracing::debug!("Queried {} open offers (total: {})", offers.len(), total);

        Ok(offers)
    }
}

#[async_trait]
impl OfferSource for AppwriteClient {
    async fn open_offers(&self) -> Result<Vec<RideOffer>, MatchError> {
        self.query_open_offers()
            .await
            .map_err(|e| MatchError::PoolUnavailable(e.to_string()))
    }
}
