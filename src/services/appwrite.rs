use crate::core::distance::calculate_bounding_box;
use crate::models::{ContactRecord, Coordinate, InstructorProfile, SearchFilters};
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
/// Handles all communication with the hosted backend including:
/// - Querying instructor listings
/// - Fetching a single instructor profile
/// - Incrementing view counters via the serverless function
/// - Recording contact requests
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
    functions: AppwriteFunctions,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub instructor_profiles: String,
    pub contact_requests: String,
}

/// Serverless function IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteFunctions {
    pub increment_views: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
        functions: AppwriteFunctions,
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
            functions,
        }
    }

    /// Query instructor listings matching the coarse filter predicates
    ///
    /// Only cheap predicates are pushed down (active flag, rate and experience
    /// bounds, a bounding box when a center is known); the exact criteria are
    /// re-checked in core. Malformed documents are skipped, not fatal.
    pub async fn list_instructors(
        &self,
        filters: &SearchFilters,
        center: Option<Coordinate>,
        limit: usize,
    ) -> Result<Vec<InstructorProfile>, AppwriteError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.instructor_profiles
        );

        let queries = search_queries(filters, center, limit);
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);

        let full_url = format!("{}?query={}", url, encoded_queries);

        tracing::debug!("Querying instructors with {} predicates", queries.len());

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
                "Failed to query instructors: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let instructors: Vec<InstructorProfile> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .collect();

        tracing::debug!("Queried {} instructors (total: {})", instructors.len(), total);

        Ok(instructors)
    }

    /// Get a single instructor listing by its ID
    pub async fn get_instructor(
        &self,
        instructor_id: &str,
    ) -> Result<InstructorProfile, AppwriteError> {
        let queries = vec![instructor_query(instructor_id)];
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);

        let url = format!(
            "{}/databases/{}/collections/{}/documents?query={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.instructor_profiles,
            encoded_queries
        );

        tracing::debug!("Fetching instructor: {}", instructor_id);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!(
                "Failed to fetch instructor {}: {} - {}",
                instructor_id,
                status,
                body
            );
            return Err(AppwriteError::ApiError(format!(
                "Failed to fetch instructor: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let doc = documents.first().ok_or_else(|| {
            AppwriteError::NotFound(format!("Instructor not found: {}", instructor_id))
        })?;

        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse instructor: {}", e)))
    }

    /// Increment an instructor's view counter
    ///
    /// Pass-through to the backend's serverless function; the function owns
    /// the read-modify-write on the counter.
    pub async fn increment_views(&self, instructor_id: &str) -> Result<(), AppwriteError> {
        let url = format!(
            "{}/functions/{}/executions",
            self.base_url.trim_end_matches('/'),
            self.functions.increment_views
        );

        let body = serde_json::json!({ "instructorId": instructor_id }).to_string();
        let payload = serde_json::json!({ "body": body });

        let response = self
            .client
            .post(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to increment views: {}",
                response.status()
            )));
        }

        tracing::debug!("Incremented views for instructor {}", instructor_id);

        Ok(())
    }

    /// Record a contact request against an instructor listing
    ///
    /// Returns the generated document ID.
    pub async fn record_contact(&self, contact: ContactRecord) -> Result<String, AppwriteError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.contact_requests
        );

        let document_id = uuid::Uuid::new_v4().to_string();

        let mut payload = serde_json::to_value(&contact)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        if let Some(obj) = payload.as_object_mut() {
            obj.insert("$id".to_string(), Value::String(document_id.clone()));
        }

        let response = self
            .client
            .post(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to record contact request: {}",
                response.status()
            )));
        }

        tracing::debug!(
            "Recorded contact request {} for instructor {}",
            document_id,
            contact.instructor_id
        );

        Ok(document_id)
    }
}

/// Build the single-listing lookup predicate
///
/// The id comes from the URL path, so it is JSON-encoded rather than
/// interpolated raw; a quote in the id must not rewrite the query.
fn instructor_query(instructor_id: &str) -> String {
    format!(
        "equal(\"instructorId\", {})",
        serde_json::Value::String(instructor_id.to_string())
    )
}

/// Build the Appwrite query predicates for an instructor search
///
/// Kept free of the client so the push-down set is testable without HTTP.
fn search_queries(filters: &SearchFilters, center: Option<Coordinate>, limit: usize) -> Vec<String> {
    let mut queries = vec![format!("equal(\"isActive\", true)")];

    if let Some(min_rate) = filters.min_rate {
        queries.push(format!("greaterThanEqual(\"hourlyRate\", {})", min_rate));
    }
    if let Some(max_rate) = filters.max_rate {
        queries.push(format!("lessThanEqual(\"hourlyRate\", {})", max_rate));
    }

    if let Some(min_experience) = filters.min_experience {
        queries.push(format!(
            "greaterThanEqual(\"yearsExperience\", {})",
            min_experience
        ));
    }
    if let Some(max_experience) = filters.max_experience {
        queries.push(format!(
            "lessThanEqual(\"yearsExperience\", {})",
            max_experience
        ));
    }

    // Geospatial pre-filter: a bounding box over-approximates the radius, the
    // exact Haversine check happens in core
    if let (Some(center), Some(radius_km)) = (center, filters.radius_km) {
        if radius_km > 0.0 {
            let bbox = calculate_bounding_box(center, radius_km);
            queries.push(format!("greaterThan(\"latitude\", {})", bbox.min_lat));
            queries.push(format!("lessThan(\"latitude\", {})", bbox.max_lat));
            queries.push(format!("greaterThan(\"longitude\", {})", bbox.min_lon));
            queries.push(format!("lessThan(\"longitude\", {})", bbox.max_lon));
        }
    }

    queries.push(format!("limit({})", limit));

    queries
}
