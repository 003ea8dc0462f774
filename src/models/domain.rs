use serde::{Deserialize, Serialize};

/// A community-service listing (food bank, shelter, clinic, ...)
///
/// Listings are owned by the storage layer; the search core treats them as
/// read-only records. Coordinates are optional because not every listing is
/// geocoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub provider_id: Option<i64>,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_held: bool,
    #[serde(default)]
    pub is_rejected: bool,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Listing {
    /// Both coordinates, or nothing. A listing with only one geocoded axis
    /// counts as not geocoded.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
            _ => None,
        }
    }
}

/// A point on the sphere, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Per-request search criteria. Every field is optional; an absent field
/// means "do not filter on this dimension".
///
/// `origin` carries latitude and longitude together, so a half-specified
/// origin cannot be represented here. Rejecting that case is the request
/// layer's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub min_rating: Option<f64>,
    pub origin: Option<Coordinates>,
    pub radius_km: Option<f64>,
}

/// A listing paired with its computed distance from the search origin.
///
/// `distance_km` is present only when the criteria carried an origin and the
/// listing has coordinates. The distance lives on the result, not on the
/// listing, so concurrent searches over a shared listing set never race.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub listing: Listing,
    pub distance_km: Option<f64>,
}

/// Caller roles, with behavior differences expressed as data rather than a
/// class hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    General,
    Provider,
    Admin,
}

/// Actions a role is allowed to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    SearchListings,
    ViewListingDetails,
    SubmitReviews,
    ViewMap,
    RegisterListings,
    UpdateListings,
    RespondToReviews,
    ApproveListings,
    RejectListings,
    ModerateReviews,
    ManageUsers,
    AuditListings,
}

const GENERAL_PERMISSIONS: &[Permission] = &[
    Permission::SearchListings,
    Permission::ViewListingDetails,
    Permission::SubmitReviews,
    Permission::ViewMap,
];

const PROVIDER_PERMISSIONS: &[Permission] = &[
    Permission::SearchListings,
    Permission::ViewListingDetails,
    Permission::SubmitReviews,
    Permission::ViewMap,
    Permission::RegisterListings,
    Permission::UpdateListings,
    Permission::RespondToReviews,
];

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::SearchListings,
    Permission::ViewListingDetails,
    Permission::SubmitReviews,
    Permission::ViewMap,
    Permission::RegisterListings,
    Permission::UpdateListings,
    Permission::RespondToReviews,
    Permission::ApproveListings,
    Permission::RejectListings,
    Permission::ModerateReviews,
    Permission::ManageUsers,
    Permission::AuditListings,
];

impl Role {
    /// Parse a role name as supplied by the gateway. Unknown values map to
    /// the least-privileged role.
    pub fn parse(value: &str) -> Role {
        match value.to_ascii_lowercase().as_str() {
            "provider" => Role::Provider,
            "admin" => Role::Admin,
            _ => Role::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::General => "general",
            Role::Provider => "provider",
            Role::Admin => "admin",
        }
    }

    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::General => GENERAL_PERMISSIONS,
            Role::Provider => PROVIDER_PERMISSIONS,
            Role::Admin => ADMIN_PERMISSIONS,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// Which subset of listings this role may ever be shown
    pub fn visibility(&self) -> VisibilityClass {
        match self {
            Role::General => VisibilityClass::ApprovedOnly,
            Role::Provider | Role::Admin => VisibilityClass::AllUnheld,
        }
    }
}

/// The subset of listings a caller is permitted to see.
///
/// The restriction is applied by the storage layer before listings ever
/// reach the search pipeline; the pipeline itself never inspects approval
/// or hold flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityClass {
    /// Approved and not held (general users and unauthenticated callers)
    ApprovedOnly,
    /// Everything not held, approved or not (providers and admins)
    AllUnheld,
}

/// A user review of a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub listing_id: i64,
    pub user_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A persisted notification record.
///
/// Notifications are written synchronously at the action that triggers them
/// and read back through the unread-notifications query; there is no
/// subscriber machinery and no delivery channel here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: uuid::Uuid,
    pub user_id: i64,
    pub message: String,
    pub url: Option<String>,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
