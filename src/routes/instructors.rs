use crate::core::filters::{matches_criteria, within_radius};
use crate::core::pagination::Pagination;
use crate::models::{
    ContactInstructorRequest, ContactRecord, ErrorResponse, EventResponse, HealthResponse,
    PageInfo, RecordViewRequest, SearchInstructorsRequest, SearchInstructorsResponse,
};
use crate::services::{AppwriteClient, AppwriteError, ZipGeocoder};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub geocoder: Arc<ZipGeocoder>,
    /// Cap on documents pulled per search before filtering
    pub list_limit: usize,
}

/// Configure all instructor-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/instructors/search", web::post().to(search_instructors))
        .route("/instructors/view", web::post().to(record_view))
        .route("/instructors/contact", web::post().to(contact_instructor))
        .route("/instructors/{id}", web::get().to(get_instructor));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search the instructor directory
///
/// POST /api/v1/instructors/search
///
/// Request body:
/// ```json
/// {
///   "filters": {
///     "term": "putting",
///     "zipCode": "20500",
///     "radiusKm": 40,
///     "specialties": ["short-game"],
///     "minRate": 50
///   },
///   "page": 1,
///   "pageSize": 9
/// }
/// ```
async fn search_instructors(
    state: web::Data<AppState>,
    req: web::Json<SearchInstructorsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let filters = &req.filters;

    // Resolve the zip code first; an unresolvable zip drops the radius
    // constraint rather than failing the search
    let center = match filters.zip_code.as_deref() {
        Some(zip) => state.geocoder.resolve(zip).await,
        None => None,
    };

    if filters.zip_code.is_some() && center.is_none() {
        tracing::info!(
            "Zip code {:?} did not resolve, searching without radius constraint",
            filters.zip_code
        );
    }

    let candidates = match state
        .appwrite
        .list_instructors(filters, center, state.list_limit)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query instructors: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query instructors".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Fetched {} candidates", candidates.len());

    // Exact criteria re-check, then the radius filter when a center resolved
    let mut results: Vec<_> = candidates
        .into_iter()
        .filter(|profile| matches_criteria(profile, filters))
        .collect();

    if let (Some(center), Some(radius_km)) = (center, filters.radius_km) {
        results = within_radius(results, center, radius_km);
    }

    let mut pagination = Pagination::new(req.page_size);
    pagination.reset(results.len());
    pagination.go_to(req.page);

    let page_info = PageInfo {
        page: pagination.current_page(),
        page_size: pagination.page_size(),
        total_items: pagination.total_items(),
        total_pages: pagination.total_pages(),
    };
    let page = results[pagination.page_range()].to_vec();

    tracing::info!(
        "Returning page {}/{} ({} of {} instructors)",
        page_info.page,
        page_info.total_pages.max(1),
        page.len(),
        page_info.total_items
    );

    HttpResponse::Ok().json(SearchInstructorsResponse {
        instructors: page,
        pagination: page_info,
        center,
    })
}

/// Fetch a single instructor listing
///
/// GET /api/v1/instructors/{id}
async fn get_instructor(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let instructor_id = path.into_inner();

    match state.appwrite.get_instructor(&instructor_id).await {
        Ok(instructor) => HttpResponse::Ok().json(instructor),
        Err(AppwriteError::NotFound(message)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Instructor not found".to_string(),
            message,
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch instructor {}: {}", instructor_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch instructor".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Record a profile view
///
/// POST /api/v1/instructors/view
async fn record_view(
    state: web::Data<AppState>,
    req: web::Json<RecordViewRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.appwrite.increment_views(&req.instructor_id).await {
        Ok(()) => HttpResponse::Ok().json(EventResponse {
            success: true,
            event_id: uuid::Uuid::new_v4().to_string(),
        }),
        Err(e) => {
            tracing::error!("Failed to record view for {}: {}", req.instructor_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record view".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Send a contact request to an instructor
///
/// POST /api/v1/instructors/contact
async fn contact_instructor(
    state: web::Data<AppState>,
    req: web::Json<ContactInstructorRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let contact = ContactRecord {
        instructor_id: req.instructor_id.clone(),
        sender_name: req.sender_name.clone(),
        sender_email: req.sender_email.clone(),
        message: req.message.clone(),
        created_at: chrono::Utc::now(),
    };

    match state.appwrite.record_contact(contact).await {
        Ok(document_id) => HttpResponse::Ok().json(EventResponse {
            success: true,
            event_id: document_id,
        }),
        Err(e) => {
            tracing::error!("Failed to record contact for {}: {}", req.instructor_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record contact request".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
