use crate::catalog::CatalogSnapshot;
use crate::model::{ExtractedAttributes, MatchResult, Vehicle};
use tracing::debug;

// Weights sum to 10.
const WEIGHT_MAKE: i32 = 2;
const WEIGHT_MODEL: i32 = 2;
const WEIGHT_BADGE: i32 = 3;
const WEIGHT_FUEL: i32 = 1;
const WEIGHT_TRANSMISSION: i32 = 1;
const WEIGHT_DRIVE: i32 = 1;

pub trait Matcher {
    fn find_best_match(
        &self,
        attrs: &ExtractedAttributes,
        snapshot: &CatalogSnapshot,
    ) -> MatchResult;
}

pub struct ScoringMatcher;

impl ScoringMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Matcher for ScoringMatcher {
    /// Scores every catalog entry and keeps the highest. Ties fall to the
    /// higher listing count, then to the first-seen entry in catalog order.
    fn find_best_match(
        &self,
        attrs: &ExtractedAttributes,
        snapshot: &CatalogSnapshot,
    ) -> MatchResult {
        // Advisory make+model pre-filter. The candidate set never restricts
        // scoring; the full catalog is always walked (see DESIGN.md).
        if let (Some(make), Some(model)) = (&attrs.make, &attrs.model) {
            let candidates = snapshot
                .vehicles
                .iter()
                .filter(|v| {
                    v.make.eq_ignore_ascii_case(make) && v.model.eq_ignore_ascii_case(model)
                })
                .count();
            debug!("Pre-filter candidates for '{} {}': {}", make, model, candidates);
        }

        let mut best: Option<(&Vehicle, i32)> = None;

        for vehicle in &snapshot.vehicles {
            let score = score_vehicle(attrs, vehicle);
            match best {
                None => best = Some((vehicle, score)),
                Some((_, best_score)) if score > best_score => best = Some((vehicle, score)),
                Some((incumbent, best_score)) if score == best_score => {
                    if snapshot.listing_count(&vehicle.id) > snapshot.listing_count(&incumbent.id) {
                        best = Some((vehicle, score));
                    }
                }
                Some(_) => {}
            }
        }

        match best {
            Some((vehicle, score)) => MatchResult {
                vehicle_id: Some(vehicle.id.clone()),
                confidence: score.clamp(0, 10) as u8,
            },
            None => MatchResult {
                vehicle_id: None,
                confidence: 0,
            },
        }
    }
}

fn score_vehicle(attrs: &ExtractedAttributes, vehicle: &Vehicle) -> i32 {
    let mut score = 0;

    if let Some(make) = &attrs.make {
        if vehicle.make.eq_ignore_ascii_case(make) {
            score += WEIGHT_MAKE;
        }
    }
    if let Some(model) = &attrs.model {
        if vehicle.model.eq_ignore_ascii_case(model) {
            score += WEIGHT_MODEL;
        }
    }
    if let Some(badge) = &attrs.badge {
        if contains_word(&vehicle.badge.to_lowercase(), &badge.to_lowercase()) {
            score += WEIGHT_BADGE;
        }
    }
    if let Some(fuel) = &attrs.fuel_type {
        if vehicle.fuel_type.eq_ignore_ascii_case(fuel) {
            score += WEIGHT_FUEL;
        }
    }
    if let Some(transmission) = &attrs.transmission_type {
        if vehicle.transmission_type.eq_ignore_ascii_case(transmission) {
            score += WEIGHT_TRANSMISSION;
        }
    }
    if let Some(drive) = &attrs.drive_type {
        // Already canonicalized by the parser; exact comparison.
        if vehicle.drive_type.as_deref() == Some(drive.as_str()) {
            score += WEIGHT_DRIVE;
        }
    }

    score
}

/// Whole-phrase containment bounded by word boundaries: the needle must occur
/// in the haystack with no word character (alphanumeric or '_') adjacent on
/// either side. A single check of the phrase as a whole, not per word.
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut from = 0;
    while let Some(found) = haystack[from..].find(needle) {
        let start = from + found;
        let end = start + needle.len();

        let bounded_left = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !is_word_char(c));
        let bounded_right = haystack[end..].chars().next().is_none_or(|c| !is_word_char(c));

        if bounded_left && bounded_right {
            return true;
        }

        match haystack[start..].chars().next() {
            Some(c) => from = start + c.len_utf8(),
            None => break,
        }
    }

    false
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSnapshot;
    use std::collections::HashMap;

    fn vehicle(id: &str, make: &str, model: &str, badge: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            badge: badge.to_string(),
            fuel_type: "Petrol".to_string(),
            transmission_type: "Manual".to_string(),
            drive_type: None,
        }
    }

    fn snapshot(vehicles: Vec<Vehicle>, counts: &[(&str, u32)]) -> CatalogSnapshot {
        let counts: HashMap<String, u32> = counts
            .iter()
            .map(|(id, n)| (id.to_string(), *n))
            .collect();
        CatalogSnapshot::new(vehicles, counts)
    }

    fn attrs_make_model(make: &str, model: &str) -> ExtractedAttributes {
        ExtractedAttributes {
            make: Some(make.to_string()),
            model: Some(model.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_catalog_yields_no_match() {
        let matcher = ScoringMatcher::new();
        let result = matcher.find_best_match(
            &attrs_make_model("volkswagen", "golf"),
            &CatalogSnapshot::empty(),
        );
        assert_eq!(result.vehicle_id, None);
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn scores_are_bounded() {
        let attrs = ExtractedAttributes {
            make: Some("volkswagen".to_string()),
            model: Some("golf".to_string()),
            badge: Some("gti".to_string()),
            fuel_type: Some("petrol".to_string()),
            transmission_type: Some("manual".to_string()),
            drive_type: Some("Four Wheel Drive".to_string()),
        };
        let full = Vehicle {
            drive_type: Some("Four Wheel Drive".to_string()),
            ..vehicle("v1", "Volkswagen", "Golf", "GTI")
        };
        let disjoint = Vehicle {
            fuel_type: "Diesel".to_string(),
            transmission_type: "Automatic".to_string(),
            ..vehicle("v2", "Toyota", "Camry", "SX")
        };
        assert_eq!(score_vehicle(&attrs, &full), 10);
        assert_eq!(score_vehicle(&attrs, &disjoint), 0);
    }

    #[test]
    fn case_insensitive_equality() {
        let snap = snapshot(vec![vehicle("v1", "VOLKSWAGEN", "Golf", "")], &[]);
        let result = ScoringMatcher::new().find_best_match(
            &attrs_make_model("volkswagen", "golf"),
            &snap,
        );
        assert_eq!(result.vehicle_id.as_deref(), Some("v1"));
        assert_eq!(result.confidence, 4);
    }

    #[test]
    fn badge_matches_whole_word_only() {
        assert!(contains_word("gti performance", "gti"));
        assert!(contains_word("gti", "gti"));
        assert!(contains_word("golf gti performance", "gti performance"));
        // "gti" inside "gtis" is not a word match.
        assert!(!contains_word("gtis", "gti"));
        assert!(!contains_word("highline", "line"));
        assert!(!contains_word("", "gti"));
    }

    #[test]
    fn badge_phrase_checked_as_a_whole() {
        // Both words occur but not as the contiguous phrase.
        assert!(!contains_word("gti sport performance", "gti performance"));
    }

    #[test]
    fn tie_breaks_on_listing_count() {
        let snap = snapshot(
            vec![
                vehicle("first", "Volkswagen", "Golf", "GTI"),
                vehicle("popular", "Volkswagen", "Golf", "R"),
            ],
            &[("popular", 7), ("first", 2)],
        );
        let result = ScoringMatcher::new()
            .find_best_match(&attrs_make_model("volkswagen", "golf"), &snap);
        assert_eq!(result.vehicle_id.as_deref(), Some("popular"));
    }

    #[test]
    fn equal_counts_keep_first_seen() {
        let snap = snapshot(
            vec![
                vehicle("first", "Volkswagen", "Golf", "GTI"),
                vehicle("second", "Volkswagen", "Golf", "R"),
            ],
            &[("first", 3), ("second", 3)],
        );
        let result = ScoringMatcher::new()
            .find_best_match(&attrs_make_model("volkswagen", "golf"), &snap);
        assert_eq!(result.vehicle_id.as_deref(), Some("first"));
    }

    #[test]
    fn absent_count_means_zero() {
        let snap = snapshot(
            vec![
                vehicle("uncounted", "Volkswagen", "Golf", "GTI"),
                vehicle("counted", "Volkswagen", "Golf", "R"),
            ],
            &[("counted", 1)],
        );
        let result = ScoringMatcher::new()
            .find_best_match(&attrs_make_model("volkswagen", "golf"), &snap);
        assert_eq!(result.vehicle_id.as_deref(), Some("counted"));
    }

    #[test]
    fn winner_is_independent_of_catalog_order() {
        let gti = Vehicle {
            fuel_type: "Petrol".to_string(),
            transmission_type: "Manual".to_string(),
            ..vehicle("gti", "Volkswagen", "Golf", "GTI")
        };
        let r = Vehicle {
            transmission_type: "Automatic".to_string(),
            ..vehicle("r", "Volkswagen", "Golf", "R")
        };
        let attrs = ExtractedAttributes {
            badge: Some("gti".to_string()),
            fuel_type: Some("petrol".to_string()),
            transmission_type: Some("manual".to_string()),
            ..attrs_make_model("volkswagen", "golf")
        };

        let forward = snapshot(vec![gti.clone(), r.clone()], &[]);
        let backward = snapshot(vec![r, gti], &[]);
        let matcher = ScoringMatcher::new();

        let a = matcher.find_best_match(&attrs, &forward);
        let b = matcher.find_best_match(&attrs, &backward);
        assert_eq!(a.vehicle_id.as_deref(), Some("gti"));
        assert_eq!(a, b);
    }

    #[test]
    fn end_to_end_gti_beats_r() {
        // Attributes as parsed from "2019 VW Golf GTI 4Motion petrol manual".
        let attrs = ExtractedAttributes {
            badge: Some("gti 4motion".to_string()),
            fuel_type: Some("petrol".to_string()),
            transmission_type: Some("manual".to_string()),
            ..attrs_make_model("volkswagen", "golf")
        };
        let snap = snapshot(
            vec![
                vehicle("golf-gti", "Volkswagen", "Golf", "GTI"),
                Vehicle {
                    transmission_type: "Automatic".to_string(),
                    ..vehicle("golf-r", "Volkswagen", "Golf", "R")
                },
            ],
            &[],
        );

        let result = ScoringMatcher::new().find_best_match(&attrs, &snap);
        assert_eq!(result.vehicle_id.as_deref(), Some("golf-gti"));
        // make + model + fuel + transmission; the badge phrase "gti 4motion"
        // is not contained in "GTI" so it contributes nothing.
        assert_eq!(result.confidence, 6);
    }
}
