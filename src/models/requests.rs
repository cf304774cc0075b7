use crate::models::SearchFilters;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to search the instructor directory
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchInstructorsRequest {
    #[serde(default)]
    pub filters: SearchFilters,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[serde(alias = "page_size", rename = "pageSize")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    crate::core::search::DEFAULT_PAGE_SIZE
}

/// Request to record a profile view
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordViewRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "instructor_id", rename = "instructorId")]
    pub instructor_id: String,
}

/// Request to contact an instructor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactInstructorRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "instructor_id", rename = "instructorId")]
    pub instructor_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "sender_name", rename = "senderName")]
    pub sender_name: String,
    #[validate(email)]
    #[serde(alias = "sender_email", rename = "senderEmail")]
    pub sender_email: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}
