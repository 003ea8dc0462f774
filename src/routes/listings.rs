use crate::core;
use crate::models::{
    CreateReviewRequest, ErrorResponse, HealthResponse, ListingDetailResponse, ListingResult,
    MapResponse, NearbyParams, NearbyResponse, ReviewCreatedResponse, Role, SearchCriteria,
    SearchParams, SearchResponse, VisibilityClass,
};
use crate::services::{CacheKey, CacheManager, ListingStore, StoreError};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ListingStore>,
    pub cache: Arc<CacheManager>,
    pub default_radius_km: f64,
}

/// Configure all listing-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/search", web::get().to(search_listings))
        .route("/search/nearby", web::get().to(search_nearby))
        .route("/listings/map", web::get().to(map_data))
        .route("/listings/{id}", web::get().to(listing_detail))
        .route("/listings/{id}/reviews", web::post().to(add_review));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Resolve the caller's role from the gateway-supplied header.
///
/// Authentication happens upstream; this service only consumes the verified
/// role name. Anything absent or unrecognized is treated as general.
fn caller_role(req: &HttpRequest) -> Role {
    req.headers()
        .get("x-caller-role")
        .and_then(|value| value.to_str().ok())
        .map(Role::parse)
        .unwrap_or(Role::General)
}

/// Fetch the visibility-restricted listing catalog, through the cache.
///
/// Cache failures are logged and fall through to the store; they never fail
/// the request.
async fn visible_listings(
    state: &AppState,
    visibility: VisibilityClass,
) -> Result<Vec<crate::models::Listing>, StoreError> {
    let cache_key = CacheKey::listings(visibility);

    if let Ok(listings) = state.cache.get::<Vec<crate::models::Listing>>(&cache_key).await {
        return Ok(listings);
    }

    let listings = state.store.fetch_visible(visibility).await?;

    if let Err(e) = state.cache.set(&cache_key, &listings).await {
        tracing::warn!("Failed to cache listing catalog {}: {}", cache_key, e);
    }

    Ok(listings)
}

/// Search endpoint
///
/// GET /api/v1/search?q=&category=&user_lat=&user_lon=&radius=&min_rating=
///
/// Numeric parameters are parsed leniently: a malformed value behaves as if
/// the parameter were omitted and that filter stage is skipped. The one
/// rejected shape is an origin with only one coordinate.
async fn search_listings(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
    req: HttpRequest,
) -> impl Responder {
    if params.has_partial_origin() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_origin".to_string(),
            message: "Both user_lat and user_lon are required for proximity search".to_string(),
            status_code: 400,
        });
    }

    let role = caller_role(&req);
    let criteria = params.criteria();

    tracing::info!(
        "Search as {} role: keyword={:?}, category={:?}, origin={:?}, radius={:?}, min_rating={:?}",
        role.as_str(),
        criteria.keyword,
        criteria.category,
        criteria.origin,
        criteria.radius_km,
        criteria.min_rating
    );

    let listings = match visible_listings(&state, role.visibility()).await {
        Ok(listings) => listings,
        Err(e) => {
            tracing::error!("Failed to load listings: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load listings".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let results: Vec<ListingResult> = core::search(listings, &criteria)
        .into_iter()
        .map(ListingResult::from)
        .collect();

    tracing::debug!("Search returned {} results", results.len());

    HttpResponse::Ok().json(SearchResponse {
        total_results: results.len(),
        results,
        criteria,
    })
}

/// Nearby search endpoint
///
/// GET /api/v1/search/nearby?lat=&lng=&max_distance=
///
/// Returns approved listings within `max_distance` km of the supplied
/// point, nearest first, with each result's computed distance.
async fn search_nearby(
    state: web::Data<AppState>,
    params: web::Query<NearbyParams>,
) -> impl Responder {
    let origin = match params.origin() {
        Some(origin) => origin,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_origin".to_string(),
                message: "Latitude and longitude are required".to_string(),
                status_code: 400,
            });
        }
    };

    let max_distance = params.max_distance_km(state.default_radius_km);

    let listings = match visible_listings(&state, VisibilityClass::ApprovedOnly).await {
        Ok(listings) => listings,
        Err(e) => {
            tracing::error!("Failed to load listings: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load listings".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let criteria = SearchCriteria {
        origin: Some(origin),
        radius_km: Some(max_distance),
        ..Default::default()
    };

    let services: Vec<ListingResult> = core::search(listings, &criteria)
        .into_iter()
        .map(ListingResult::from)
        .collect();

    tracing::debug!(
        "Nearby search at ({}, {}) within {}km returned {} results",
        origin.lat,
        origin.lon,
        max_distance,
        services.len()
    );

    HttpResponse::Ok().json(NearbyResponse {
        services,
        user_location: origin,
        max_distance,
    })
}

/// Map endpoint
///
/// GET /api/v1/listings/map
///
/// Markers and viewport center for every approved, geocoded listing.
async fn map_data(state: web::Data<AppState>) -> impl Responder {
    let listings = match visible_listings(&state, VisibilityClass::ApprovedOnly).await {
        Ok(listings) => listings,
        Err(e) => {
            tracing::error!("Failed to load listings: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load listings".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let map_data = core::build_map_data(&listings);

    HttpResponse::Ok().json(MapResponse {
        total_results: map_data.markers.len(),
        map_data,
    })
}

/// Listing detail endpoint
///
/// GET /api/v1/listings/{id}
///
/// Unapproved listings are hidden from general callers.
async fn listing_detail(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> impl Responder {
    let listing_id = path.into_inner();
    let role = caller_role(&req);

    let listing = match state.store.get_listing(listing_id).await {
        Ok(listing) => listing,
        Err(StoreError::NotFound(_)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "not_found".to_string(),
                message: format!("Listing {} does not exist", listing_id),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch listing {}: {}", listing_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch listing".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    if !listing.is_approved && role == Role::General {
        return HttpResponse::Forbidden().json(ErrorResponse {
            error: "not_approved".to_string(),
            message: "This listing is not yet approved".to_string(),
            status_code: 403,
        });
    }

    let reviews = match state.store.list_reviews(listing_id).await {
        Ok(reviews) => reviews,
        Err(e) => {
            tracing::error!("Failed to fetch reviews for {}: {}", listing_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch reviews".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    HttpResponse::Ok().json(ListingDetailResponse { listing, reviews })
}

/// Review submission endpoint
///
/// POST /api/v1/listings/{id}/reviews
///
/// Request body:
/// ```json
/// {
///   "user_id": 123,
///   "rating": 4,
///   "comment": "string"
/// }
/// ```
///
/// Persists the review, recomputes the listing's mean rating, and records a
/// notification for the listing's provider in the same request.
async fn add_review(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<CreateReviewRequest>,
) -> impl Responder {
    if let Err(errors) = body.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let listing_id = path.into_inner();

    let listing = match state.store.get_listing(listing_id).await {
        Ok(listing) => listing,
        Err(StoreError::NotFound(_)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "not_found".to_string(),
                message: format!("Listing {} does not exist", listing_id),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch listing {}: {}", listing_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch listing".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let (review, listing_rating) = match state
        .store
        .add_review(listing_id, body.user_id, body.rating, body.comment.as_deref())
        .await
    {
        Ok(outcome) => outcome,
        Err(StoreError::InvalidInput(message)) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_review".to_string(),
                message,
                status_code: 400,
            });
        }
        Err(e) => {
            tracing::error!("Failed to record review for {}: {}", listing_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record review".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Notify the provider at the triggering action itself
    if let Some(provider_id) = listing.provider_id {
        let message = format!("You received a new review for {}.", listing.name);
        let url = format!("/listings/{}", listing.id);
        if let Err(e) = state
            .store
            .record_notification(provider_id, &message, Some(&url))
            .await
        {
            tracing::warn!("Review stored but provider notification failed: {}", e);
        }
    }

    // The listing's rating changed; cached catalogs are stale now
    if let Err(e) = state.cache.invalidate_listing(listing_id).await {
        tracing::warn!("Failed to invalidate cache for listing {}: {}", listing_id, e);
    }

    HttpResponse::Ok().json(ReviewCreatedResponse {
        review,
        listing_rating,
    })
}
