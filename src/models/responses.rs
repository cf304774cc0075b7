use crate::models::domain::{Coordinate, InstructorProfile};
use serde::{Deserialize, Serialize};

/// Response for the instructor search endpoint
///
/// `center` is the resolved coordinate of the request's zip code, or null
/// when no zip was given or it could not be resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInstructorsResponse {
    pub instructors: Vec<InstructorProfile>,
    pub pagination: PageInfo,
    pub center: Option<Coordinate>,
}

/// Pagination metadata for a result page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "totalItems")]
    pub total_items: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for the view-counter and contact helper endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub success: bool,
    #[serde(rename = "eventId")]
    pub event_id: String,
}
