use crate::core::distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
use crate::models::{Coordinate, InstructorProfile, SearchFilters};

/// An entity that may carry a geographic coordinate
///
/// Listings are geocoded lazily, so a coordinate is not guaranteed.
pub trait Located {
    fn coordinate(&self) -> Option<Coordinate>;
}

impl Located for InstructorProfile {
    fn coordinate(&self) -> Option<Coordinate> {
        InstructorProfile::coordinate(self)
    }
}

/// Narrow a collection to the entities within `max_km` of `center`
///
/// Entities without a coordinate cannot be evaluated and are dropped.
/// Relative input order is preserved. A non-positive radius retains only
/// entities coincident with the center (`distance <= 0`), so a negative
/// radius retains nothing.
pub fn within_radius<T: Located>(entities: Vec<T>, center: Coordinate, max_km: f64) -> Vec<T> {
    // Bounding-box pre-check before the Haversine evaluation; the box
    // over-approximates the radius, so no in-radius entity is cut here
    let bbox = calculate_bounding_box(center, max_km);

    entities
        .into_iter()
        .filter(|entity| match entity.coordinate() {
            Some(point) => {
                is_within_bounding_box(point, &bbox)
                    && haversine_distance(point, center) <= max_km
            }
            None => false,
        })
        .collect()
}

/// Check if a listing matches the user's search criteria
///
/// This is the exact re-check stage: the backend query only pushes coarse
/// predicates, everything here is authoritative.
#[inline]
pub fn matches_criteria(profile: &InstructorProfile, filters: &SearchFilters) -> bool {
    // Hidden listings never match
    if !profile.is_active {
        return false;
    }

    // Free-text term over name, bio, location and specialties
    if let Some(term) = filters.term.as_deref() {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !matches_term(profile, &term) {
            return false;
        }
    }

    // Specialty multi-select: at least one selected specialty must be offered
    if !filters.specialties.is_empty()
        && !filters
            .specialties
            .iter()
            .any(|wanted| contains_ignore_case(&profile.specialties, wanted))
    {
        return false;
    }

    // Certification multi-select, same any-of semantics
    if !filters.certifications.is_empty()
        && !filters
            .certifications
            .iter()
            .any(|wanted| contains_ignore_case(&profile.certifications, wanted))
    {
        return false;
    }

    // Experience range (inclusive); a listing without recorded experience
    // fails only when a bound is actually set
    if filters.min_experience.is_some() || filters.max_experience.is_some() {
        match profile.years_experience {
            Some(years) => {
                if years < filters.min_experience.unwrap_or(0) {
                    return false;
                }
                if years > filters.max_experience.unwrap_or(u8::MAX) {
                    return false;
                }
            }
            None => return false,
        }
    }

    // Hourly-rate range (inclusive)
    if filters.min_rate.is_some() || filters.max_rate.is_some() {
        match profile.hourly_rate {
            Some(rate) => {
                if rate < filters.min_rate.unwrap_or(0.0) {
                    return false;
                }
                if rate > filters.max_rate.unwrap_or(f64::MAX) {
                    return false;
                }
            }
            None => return false,
        }
    }

    true
}

/// Case-insensitive substring match over the listing's searchable text
fn matches_term(profile: &InstructorProfile, term: &str) -> bool {
    profile.name.to_lowercase().contains(term)
        || profile
            .bio
            .as_deref()
            .is_some_and(|bio| bio.to_lowercase().contains(term))
        || profile
            .location
            .as_deref()
            .is_some_and(|loc| loc.to_lowercase().contains(term))
        || profile
            .specialties
            .iter()
            .any(|specialty| specialty.to_lowercase().contains(term))
}

fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|item| item.eq_ignore_ascii_case(needle))
}
