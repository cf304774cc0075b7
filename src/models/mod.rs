// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BoundingBox, ContactRecord, Coordinate, InstructorProfile, SearchFilters, ViewMode};
pub use requests::{ContactInstructorRequest, RecordViewRequest, SearchInstructorsRequest};
pub use responses::{ErrorResponse, EventResponse, HealthResponse, PageInfo, SearchInstructorsResponse};
