use crate::models::Listing;

/// Case-insensitive substring match of the keyword against name,
/// description, and address (logical OR across the three fields).
///
/// An absent or empty keyword passes every listing. Category text is
/// deliberately not consulted here; category is its own criterion.
#[inline]
pub fn matches_keyword(listing: &Listing, keyword: Option<&str>) -> bool {
    let needle = match keyword {
        Some(k) if !k.is_empty() => k.to_lowercase(),
        _ => return true,
    };

    listing.name.to_lowercase().contains(&needle)
        || listing.description.to_lowercase().contains(&needle)
        || listing.address.to_lowercase().contains(&needle)
}

/// Case-insensitive substring match against the listing category.
///
/// Substring, not exact: "food" matches "food bank". Callers that need an
/// exact match (e.g. a dropdown-selected category) pre-normalize.
#[inline]
pub fn matches_category(listing: &Listing, category: Option<&str>) -> bool {
    let needle = match category {
        Some(c) if !c.is_empty() => c.to_lowercase(),
        _ => return true,
    };

    listing.category.to_lowercase().contains(&needle)
}

/// Retain listings rated at or above the threshold (inclusive).
///
/// Every listing carries a numeric rating (0.0 when unreviewed), so this
/// never has missing data to worry about.
#[inline]
pub fn matches_min_rating(listing: &Listing, min_rating: Option<f64>) -> bool {
    match min_rating {
        Some(min) => listing.rating >= min,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(name: &str, category: &str, description: &str, address: &str, rating: f64) -> Listing {
        Listing {
            id: 1,
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            address: address.to_string(),
            latitude: None,
            longitude: None,
            phone: None,
            email: None,
            hours: None,
            rating,
            provider_id: None,
            is_approved: true,
            is_held: false,
            is_rejected: false,
            created_at: None,
        }
    }

    #[test]
    fn test_keyword_matches_name_description_or_address() {
        let l = listing(
            "Hope Shelter KL",
            "shelter",
            "Emergency shelter for homeless individuals",
            "456 Jalan Bukit Bintang",
            0.0,
        );

        assert!(matches_keyword(&l, Some("hope")));
        assert!(matches_keyword(&l, Some("homeless")));
        assert!(matches_keyword(&l, Some("bukit bintang")));
        assert!(!matches_keyword(&l, Some("clinic")));
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let l = listing("Health First Clinic", "clinic", "", "789 Jalan Petaling", 0.0);
        assert!(matches_keyword(&l, Some("HEALTH")));
        assert!(matches_keyword(&l, Some("petaling")));
    }

    #[test]
    fn test_keyword_does_not_match_on_category_alone() {
        // "clinic" appears only in the category field, which the keyword
        // stage must not consult
        let l = listing("Wellness Centre", "clinic", "Free checkups", "12 Jalan Ampang", 0.0);
        assert!(!matches_keyword(&l, Some("clinic")));
    }

    #[test]
    fn test_absent_or_empty_keyword_passes() {
        let l = listing("Anything", "misc", "", "Somewhere", 0.0);
        assert!(matches_keyword(&l, None));
        assert!(matches_keyword(&l, Some("")));
    }

    #[test]
    fn test_category_substring_match() {
        let l = listing("Community Food Bank", "food bank", "", "KL", 0.0);
        assert!(matches_category(&l, Some("food")));
        assert!(matches_category(&l, Some("Food Bank")));
        assert!(!matches_category(&l, Some("shelter")));
        assert!(matches_category(&l, None));
        assert!(matches_category(&l, Some("")));
    }

    #[test]
    fn test_min_rating_inclusive_lower_bound() {
        let exactly = listing("A", "clinic", "", "KL", 4.0);
        let just_below = listing("B", "clinic", "", "KL", 3.99);

        assert!(matches_min_rating(&exactly, Some(4.0)));
        assert!(!matches_min_rating(&just_below, Some(4.0)));
        assert!(matches_min_rating(&just_below, None));
    }

    #[test]
    fn test_unreviewed_listing_passes_zero_threshold() {
        let l = listing("New", "shelter", "", "KL", 0.0);
        assert!(matches_min_rating(&l, Some(0.0)));
        assert!(!matches_min_rating(&l, Some(0.1)));
    }
}
