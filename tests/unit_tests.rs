// Unit tests for Fairway Search

use chrono::Utc;
use fairway_search::core::{
    distance::haversine_distance,
    filters::{matches_criteria, within_radius},
    pagination::Pagination,
    search::{effective_view_mode, SearchController, DEFAULT_DEBOUNCE, NARROW_VIEWPORT_PX},
};
use fairway_search::models::{Coordinate, InstructorProfile, SearchFilters, ViewMode};
use std::time::{Duration, Instant};

fn create_test_instructor(id: &str, lat: Option<f64>, lon: Option<f64>) -> InstructorProfile {
    InstructorProfile {
        instructor_id: id.to_string(),
        name: format!("Instructor {}", id),
        bio: Some("PGA professional".to_string()),
        location: Some("Phoenix, AZ".to_string()),
        zip_code: Some("85001".to_string()),
        latitude: lat,
        longitude: lon,
        specialties: vec!["putting".to_string()],
        services: vec!["private-lesson".to_string()],
        certifications: vec!["PGA Class A".to_string()],
        years_experience: Some(10),
        hourly_rate: Some(90.0),
        rating: Some(4.7),
        view_count: 0,
        is_active: true,
        is_verified: Some(true),
        photo_file_ids: vec![],
        created_at: Some(Utc::now()),
    }
}

#[test]
fn test_haversine_distance_zero() {
    let point = Coordinate::new(40.7128, -74.0060);
    let distance = haversine_distance(point, point);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_symmetric() {
    let a = Coordinate::new(38.8977, -77.0365);
    let b = Coordinate::new(40.7128, -74.0060);

    assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
}

#[test]
fn test_haversine_dc_to_nyc_fixture() {
    // Washington DC to New York City is approximately 327-328 km
    let dc = Coordinate::new(38.8977, -77.0365);
    let nyc = Coordinate::new(40.7128, -74.0060);

    let distance = haversine_distance(dc, nyc);
    assert!(
        (distance - 327.5).abs() < 4.0,
        "Expected ~327-328km, got {}",
        distance
    );
}

#[test]
fn test_haversine_monotonic_with_separation() {
    let origin = Coordinate::new(40.0, -74.0);

    let mut previous = 0.0;
    for step in 1..=8 {
        let point = Coordinate::new(40.0, -74.0 + step as f64);
        let distance = haversine_distance(origin, point);
        assert!(distance > previous, "Distance should grow with separation");
        previous = distance;
    }
}

#[test]
fn test_radius_filter_zero_radius_non_coincident() {
    let center = Coordinate::new(40.7128, -74.0060);
    let entities = vec![
        create_test_instructor("a", Some(40.72), Some(-74.01)),
        create_test_instructor("b", Some(40.80), Some(-74.10)),
    ];

    assert!(within_radius(entities, center, 0.0).is_empty());
}

#[test]
fn test_radius_filter_excludes_missing_coordinates() {
    let center = Coordinate::new(40.7128, -74.0060);
    let entities = vec![
        create_test_instructor("no_lat", None, Some(-74.0060)),
        create_test_instructor("no_lon", Some(40.7128), None),
        create_test_instructor("none", None, None),
    ];

    assert!(within_radius(entities, center, 10_000.0).is_empty());
}

#[test]
fn test_radius_filter_stable_order() {
    let center = Coordinate::new(40.7128, -74.0060);
    let entities = vec![
        create_test_instructor("far_first", Some(40.75), Some(-74.05)),
        create_test_instructor("near_second", Some(40.7128), Some(-74.0060)),
    ];

    let kept = within_radius(entities, center, 50.0);
    let ids: Vec<&str> = kept.iter().map(|p| p.instructor_id.as_str()).collect();
    assert_eq!(ids, vec!["far_first", "near_second"]);
}

#[test]
fn test_pagination_arithmetic() {
    let mut pagination = Pagination::new(10);
    pagination.reset(25);

    assert_eq!(pagination.total_pages(), 3);

    pagination.go_to(5);
    assert_eq!(pagination.current_page(), 3, "go_to(5) should clamp to 3");

    pagination.go_to(0);
    assert_eq!(pagination.current_page(), 1, "go_to(0) should clamp to 1");
}

#[test]
fn test_pagination_empty_result_set() {
    let mut pagination = Pagination::new(10);

    assert_eq!(pagination.total_pages(), 0);
    pagination.go_to(3);
    assert_eq!(pagination.current_page(), 1);
    assert_eq!(pagination.page_range(), 0..0);
}

#[test]
fn test_criteria_filter_term_and_sets() {
    let profile = create_test_instructor("1", Some(40.7), Some(-74.0));

    let mut filters = SearchFilters::default();
    assert!(matches_criteria(&profile, &filters));

    filters.term = Some("PUTTING".to_string());
    assert!(matches_criteria(&profile, &filters));

    filters.term = None;
    filters.specialties = vec!["driving".to_string()];
    assert!(!matches_criteria(&profile, &filters));
}

#[test]
fn test_criteria_filter_missing_experience_with_bound() {
    let mut profile = create_test_instructor("1", Some(40.7), Some(-74.0));
    profile.years_experience = None;

    let mut filters = SearchFilters::default();
    assert!(matches_criteria(&profile, &filters));

    filters.min_experience = Some(2);
    assert!(!matches_criteria(&profile, &filters));
}

#[test]
fn test_debounce_five_inputs_one_dispatch() {
    let mut controller = SearchController::with_defaults();
    let t0 = Instant::now();

    // Five rapid input events inside the quiet window
    for (i, offset_ms) in [0u64, 50, 100, 150, 200].iter().enumerate() {
        let mut filters = SearchFilters::default();
        filters.term = Some(format!("input-{}", i));
        controller.set_filters(filters, t0 + Duration::from_millis(*offset_ms));
    }

    // Poll across the whole window: exactly one dispatch, carrying the last value
    let mut dispatches = Vec::new();
    for tick_ms in (0..1000).step_by(10) {
        if let Some(dispatch) = controller.poll_commit(t0 + Duration::from_millis(tick_ms)) {
            dispatches.push(dispatch);
        }
    }

    assert_eq!(dispatches.len(), 1, "Expected exactly one dispatch");
    assert_eq!(dispatches[0].filters.term.as_deref(), Some("input-4"));
}

#[test]
fn test_default_debounce_interval() {
    assert_eq!(DEFAULT_DEBOUNCE, Duration::from_millis(300));
}

#[test]
fn test_view_mode_forced_grid_on_narrow_viewport() {
    let mut controller = SearchController::with_defaults();
    controller.set_view_mode(ViewMode::List);

    // Below the threshold the rendered mode is grid, but the preference holds
    assert_eq!(controller.effective_view_mode(NARROW_VIEWPORT_PX - 1), ViewMode::Grid);
    assert_eq!(controller.view_mode(), ViewMode::List);

    // Widening the viewport restores the stored preference without a new call
    assert_eq!(controller.effective_view_mode(1280), ViewMode::List);
}

#[test]
fn test_effective_view_mode_pure_derivation() {
    assert_eq!(effective_view_mode(ViewMode::List, 500), ViewMode::Grid);
    assert_eq!(effective_view_mode(ViewMode::List, 900), ViewMode::List);
    assert_eq!(effective_view_mode(ViewMode::Grid, 500), ViewMode::Grid);
    assert_eq!(effective_view_mode(ViewMode::Grid, 900), ViewMode::Grid);
}

#[test]
fn test_coordinate_bounds() {
    assert!(Coordinate::new(38.8977, -77.0365).in_bounds());
    assert!(Coordinate::new(-90.0, 180.0).in_bounds());
    assert!(!Coordinate::new(91.0, 0.0).in_bounds());
    assert!(!Coordinate::new(0.0, -181.0).in_bounds());
}
