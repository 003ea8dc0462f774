use crate::core::{
    distance::haversine_distance,
    filters::{matches_category, matches_keyword, matches_min_rating},
};
use crate::models::{Listing, SearchCriteria, SearchResult};
use std::cmp::Ordering;

/// Filter and rank a candidate listing set against the given criteria.
///
/// # Pipeline Stages
/// 1. Keyword filter (name / description / address)
/// 2. Category filter
/// 3. Minimum-rating filter
/// 4. Proximity filter (only when both origin and radius are present)
///
/// Stages whose criterion is absent pass everything; the stages are
/// independent, so the order only fixes determinism, not the final set.
///
/// When an origin is present, every coordinate-bearing result carries the
/// Haversine distance from that origin and the result list is sorted
/// ascending by distance (stable: equal distances keep input order, and
/// results without a distance sort last). Without an origin the input
/// order is preserved and no distances are attached.
///
/// Pure and synchronous: the inputs are never mutated, so concurrent
/// searches over a shared listing set need no coordination.
pub fn search(listings: Vec<Listing>, criteria: &SearchCriteria) -> Vec<SearchResult> {
    let keyword = criteria.keyword.as_deref();
    let category = criteria.category.as_deref();

    let mut results: Vec<SearchResult> = listings
        .into_iter()
        .filter(|listing| matches_keyword(listing, keyword))
        .filter(|listing| matches_category(listing, category))
        .filter(|listing| matches_min_rating(listing, criteria.min_rating))
        .filter_map(|listing| {
            let distance_km = match (criteria.origin, listing.coordinates()) {
                (Some(origin), Some(point)) => {
                    Some(haversine_distance(origin.lat, origin.lon, point.lat, point.lon))
                }
                _ => None,
            };

            // Stage 4: proximity cut, inclusive at the boundary. Listings
            // without coordinates cannot qualify once a radius is in play.
            if criteria.origin.is_some() {
                if let Some(radius_km) = criteria.radius_km {
                    match distance_km {
                        Some(d) if d <= radius_km => {}
                        _ => return None,
                    }
                }
            }

            Some(SearchResult { listing, distance_km })
        })
        .collect();

    if criteria.origin.is_some() {
        // Vec::sort_by is stable, which is what keeps equal-distance
        // results in input order
        results.sort_by(|a, b| match (a.distance_km, b.distance_km) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    results
}
