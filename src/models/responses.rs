use crate::core::MapData;
use crate::models::domain::{Coordinates, Notification, Review, SearchCriteria, SearchResult};
use serde::{Deserialize, Serialize};

/// One listing as returned by the search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResult {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: f64,
    pub is_approved: bool,
    pub distance_km: Option<f64>,
}

impl From<SearchResult> for ListingResult {
    fn from(result: SearchResult) -> Self {
        let listing = result.listing;
        Self {
            id: listing.id,
            name: listing.name,
            category: listing.category,
            description: listing.description,
            address: listing.address,
            latitude: listing.latitude,
            longitude: listing.longitude,
            rating: listing.rating,
            is_approved: listing.is_approved,
            distance_km: result.distance_km,
        }
    }
}

/// Response for the main search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<ListingResult>,
    pub total_results: usize,
    pub criteria: SearchCriteria,
}

/// Response for the nearby endpoint, echoing the query origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub services: Vec<ListingResult>,
    pub user_location: Coordinates,
    pub max_distance: f64,
}

/// Response for the map endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapResponse {
    pub map_data: MapData,
    pub total_results: usize,
}

/// Listing detail plus its reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDetailResponse {
    pub listing: crate::models::Listing,
    pub reviews: Vec<Review>,
}

/// Response after a review was accepted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreatedResponse {
    pub review: Review,
    pub listing_rating: f64,
}

/// Unread notifications for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub user_id: i64,
    pub notifications: Vec<Notification>,
    pub count: usize,
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
