// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Coordinates, Listing, Notification, Permission, Review, Role, SearchCriteria, SearchResult,
    VisibilityClass,
};
pub use requests::{CreateReviewRequest, NearbyParams, NotificationParams, SearchParams};
pub use responses::{
    ErrorResponse, HealthResponse, ListingDetailResponse, ListingResult, MapResponse,
    NearbyResponse, NotificationsResponse, ReviewCreatedResponse, SearchResponse,
};
