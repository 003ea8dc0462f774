use crate::models::{Coordinates, SearchCriteria};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the main search endpoint.
///
/// Numeric parameters arrive as raw strings and are parsed leniently: a
/// value that fails to parse is treated as if the parameter were never
/// supplied, and that stage of the filter pipeline is skipped. The sole
/// exception is a half-supplied origin, which the handler rejects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default, alias = "query")]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub user_lat: Option<String>,
    #[serde(default)]
    pub user_lon: Option<String>,
    #[serde(default)]
    pub radius: Option<String>,
    #[serde(default)]
    pub min_rating: Option<String>,
}

impl SearchParams {
    /// Whether exactly one of the two origin coordinates was usable.
    ///
    /// This is the one malformed input that is an error rather than a
    /// skipped criterion: an origin needs both axes.
    pub fn has_partial_origin(&self) -> bool {
        let lat = lenient_f64(self.user_lat.as_deref());
        let lon = lenient_f64(self.user_lon.as_deref());
        lat.is_some() != lon.is_some()
    }

    pub fn criteria(&self) -> SearchCriteria {
        let lat = lenient_f64(self.user_lat.as_deref());
        let lon = lenient_f64(self.user_lon.as_deref());
        let origin = match (lat, lon) {
            (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
            _ => None,
        };

        SearchCriteria {
            keyword: self.q.clone(),
            category: self.category.clone(),
            min_rating: lenient_f64(self.min_rating.as_deref()),
            origin,
            radius_km: lenient_f64(self.radius.as_deref()),
        }
    }
}

/// Query parameters for the nearby endpoint.
///
/// `lat` and `lng` are mandatory; `max_distance` falls back to the
/// configured default radius when absent or malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyParams {
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lng: Option<String>,
    #[serde(default)]
    pub max_distance: Option<String>,
}

impl NearbyParams {
    pub fn origin(&self) -> Option<Coordinates> {
        match (lenient_f64(self.lat.as_deref()), lenient_f64(self.lng.as_deref())) {
            (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
            _ => None,
        }
    }

    pub fn max_distance_km(&self, default_radius_km: f64) -> f64 {
        lenient_f64(self.max_distance.as_deref()).unwrap_or(default_radius_km)
    }
}

/// Body for submitting a review
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub user_id: i64,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Query parameters for notification endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationParams {
    pub user_id: i64,
}

/// Parse a numeric criterion, treating failures as absence
fn lenient_f64(value: Option<&str>) -> Option<f64> {
    value.and_then(|raw| raw.trim().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_f64_parses_numbers() {
        assert_eq!(lenient_f64(Some("4.5")), Some(4.5));
        assert_eq!(lenient_f64(Some(" 3 ")), Some(3.0));
        assert_eq!(lenient_f64(Some("-101.69")), Some(-101.69));
    }

    #[test]
    fn test_lenient_f64_skips_garbage() {
        assert_eq!(lenient_f64(Some("four")), None);
        assert_eq!(lenient_f64(Some("")), None);
        assert_eq!(lenient_f64(None), None);
    }

    #[test]
    fn test_bad_min_rating_drops_the_criterion() {
        let params = SearchParams {
            min_rating: Some("lots".to_string()),
            ..Default::default()
        };
        assert_eq!(params.criteria().min_rating, None);
    }

    #[test]
    fn test_origin_requires_both_coordinates() {
        let both = SearchParams {
            user_lat: Some("3.14".to_string()),
            user_lon: Some("101.69".to_string()),
            ..Default::default()
        };
        assert!(both.criteria().origin.is_some());
        assert!(!both.has_partial_origin());

        let lat_only = SearchParams {
            user_lat: Some("3.14".to_string()),
            ..Default::default()
        };
        assert!(lat_only.criteria().origin.is_none());
        assert!(lat_only.has_partial_origin());

        // A coordinate that fails to parse counts as missing
        let lon_garbled = SearchParams {
            user_lat: Some("3.14".to_string()),
            user_lon: Some("east".to_string()),
            ..Default::default()
        };
        assert!(lon_garbled.has_partial_origin());
    }

    #[test]
    fn test_nearby_default_radius() {
        let params = NearbyParams {
            lat: Some("3.14".to_string()),
            lng: Some("101.69".to_string()),
            max_distance: Some("nearish".to_string()),
        };
        assert!(params.origin().is_some());
        assert_eq!(params.max_distance_km(10.0), 10.0);

        let explicit = NearbyParams {
            max_distance: Some("2.5".to_string()),
            ..Default::default()
        };
        assert_eq!(explicit.max_distance_km(10.0), 2.5);
        assert!(explicit.origin().is_none());
    }
}
