//! Fairway Search - instructor search and discovery for the Fairway
//! golf-instruction marketplace
//!
//! This library provides the search core used by the marketplace directory:
//! zip-code geocoding, great-circle distance, radius filtering, and the
//! debounced search/pagination/view-mode coordinator.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, within_radius, Pagination, SearchController};
pub use crate::models::{Coordinate, InstructorProfile, SearchFilters, ViewMode};
