// Core search exports
pub mod distance;
pub mod filters;
pub mod pagination;
pub mod search;

pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
pub use filters::{matches_criteria, within_radius, Located};
pub use pagination::Pagination;
pub use search::{effective_view_mode, SearchController, SearchDispatch, SearchPhase};
