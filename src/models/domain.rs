use serde::{Deserialize, Serialize};

/// Geographic coordinate pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether the pair lies within valid latitude/longitude bounds
    pub fn in_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Instructor listing with profile and location data
///
/// Latitude/longitude are optional: listings created before geocoding was
/// added, or with an unresolvable address, carry no coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorProfile {
    #[serde(rename = "instructorId")]
    pub instructor_id: String,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "zipCode", default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(rename = "yearsExperience", default)]
    pub years_experience: Option<u8>,
    #[serde(rename = "hourlyRate", default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "viewCount", default)]
    pub view_count: u32,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "isVerified", default)]
    pub is_verified: Option<bool>,
    #[serde(rename = "photoFileIds", default)]
    pub photo_file_ids: Vec<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl InstructorProfile {
    /// Coordinate pair if the listing has been geocoded
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }
}

fn default_true() -> bool { true }

/// User-supplied search criteria
///
/// Built fresh for each search interaction and swapped wholesale; there is no
/// partial-update contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub term: Option<String>,
    #[serde(rename = "zipCode", default)]
    pub zip_code: Option<String>,
    #[serde(rename = "radiusKm", default)]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(rename = "minExperience", default)]
    pub min_experience: Option<u8>,
    #[serde(rename = "maxExperience", default)]
    pub max_experience: Option<u8>,
    #[serde(rename = "minRate", default)]
    pub min_rate: Option<f64>,
    #[serde(rename = "maxRate", default)]
    pub max_rate: Option<f64>,
}

/// Directory display layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    List,
}

/// Contact request recorded against an instructor listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(rename = "instructorId")]
    pub instructor_id: String,
    #[serde(rename = "senderName")]
    pub sender_name: String,
    #[serde(rename = "senderEmail")]
    pub sender_email: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
