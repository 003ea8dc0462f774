use crate::models::{Coordinates, Listing};
use serde::{Deserialize, Serialize};

/// A map pin for one geocoded listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
}

/// Marker set plus a viewport center for the frontend map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapData {
    pub markers: Vec<MapMarker>,
    pub center: Option<Coordinates>,
}

/// Project a listing set onto map data.
///
/// Listings without coordinates produce no marker. The center is the
/// arithmetic mean of the marker coordinates, `None` when nothing is
/// geocoded.
pub fn build_map_data(listings: &[Listing]) -> MapData {
    let markers: Vec<MapMarker> = listings
        .iter()
        .filter_map(|listing| {
            let point = listing.coordinates()?;
            Some(MapMarker {
                id: listing.id,
                name: listing.name.clone(),
                category: listing.category.clone(),
                latitude: point.lat,
                longitude: point.lon,
                rating: listing.rating,
            })
        })
        .collect();

    let center = if markers.is_empty() {
        None
    } else {
        let count = markers.len() as f64;
        let lat = markers.iter().map(|m| m.latitude).sum::<f64>() / count;
        let lon = markers.iter().map(|m| m.longitude).sum::<f64>() / count;
        Some(Coordinates { lat, lon })
    };

    MapData { markers, center }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: i64, lat: Option<f64>, lon: Option<f64>) -> Listing {
        Listing {
            id,
            name: format!("Listing {}", id),
            category: "clinic".to_string(),
            description: String::new(),
            address: "Kuala Lumpur".to_string(),
            latitude: lat,
            longitude: lon,
            phone: None,
            email: None,
            hours: None,
            rating: 3.5,
            provider_id: None,
            is_approved: true,
            is_held: false,
            is_rejected: false,
            created_at: None,
        }
    }

    #[test]
    fn test_ungeocoded_listings_get_no_marker() {
        let listings = vec![
            listing(1, Some(3.14), Some(101.69)),
            listing(2, None, None),
            listing(3, Some(3.16), Some(101.71)),
        ];

        let data = build_map_data(&listings);
        assert_eq!(data.markers.len(), 2);
        assert_eq!(data.markers[0].id, 1);
        assert_eq!(data.markers[1].id, 3);
    }

    #[test]
    fn test_center_is_mean_of_markers() {
        let listings = vec![
            listing(1, Some(3.0), Some(101.0)),
            listing(2, Some(4.0), Some(103.0)),
        ];

        let data = build_map_data(&listings);
        let center = data.center.unwrap();
        assert!((center.lat - 3.5).abs() < 1e-12);
        assert!((center.lon - 102.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_markers_means_no_center() {
        let data = build_map_data(&[listing(1, None, None)]);
        assert!(data.markers.is_empty());
        assert!(data.center.is_none());
    }
}
