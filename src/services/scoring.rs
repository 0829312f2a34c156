use crate::constants::*;
use crate::models::{Destination, QuizAnswers, TravelStyle};
use std::cmp::Reverse;

/// Per-dimension sub-scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub traveler_type: f64,
    pub budget: f64,
    pub duration: f64,
    pub season: f64,
    pub interests: f64,
    pub alignment: f64,
}

impl ScoreBreakdown {
    pub fn weighted_sum(&self) -> f64 {
        self.traveler_type * WEIGHT_TRAVELER_TYPE
            + self.budget * WEIGHT_BUDGET_FIT
            + self.duration * WEIGHT_DURATION_FIT
            + self.season * WEIGHT_SEASON
            + self.interests * WEIGHT_INTERESTS
            + self.alignment * WEIGHT_STYLE_ALIGNMENT
    }
}

/// A catalog destination paired with its fit score for one traveler.
/// `score` is 0-100 before the query boost and may exceed 100 after it.
#[derive(Debug, Clone)]
pub struct ScoredDestination<'a> {
    pub destination: &'a Destination,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
}

impl ScoredDestination<'_> {
    /// Score for user-facing output.
    pub fn display_score(&self) -> u32 {
        self.score.min(100)
    }
}

fn traveler_type_match(destination: &Destination, answers: &QuizAnswers) -> f64 {
    let keywords = traveler_keywords(answers.group_type);
    if keywords.is_empty() {
        return 0.0;
    }

    let matches = destination
        .best_for
        .iter()
        .filter(|entry| {
            let entry = entry.to_lowercase();
            keywords.iter().any(|k| entry.contains(k))
        })
        .count();

    (matches as f64 / keywords.len() as f64).min(1.0)
}

fn budget_fit(destination: &Destination, answers: &QuizAnswers) -> f64 {
    if allowed_price_bands(answers.budget_style).contains(&destination.price_band) {
        1.0
    } else {
        BUDGET_MISMATCH_SCORE
    }
}

fn duration_fit(destination: &Destination, answers: &QuizAnswers) -> f64 {
    let (trip_min, trip_max) = trip_day_range(answers.duration);
    if destination.duration_days.overlaps(trip_min, trip_max) {
        return 1.0;
    }

    // Signed arithmetic: trip_min - 1 underflows for the weekend bucket.
    let dest_min = i64::from(destination.duration_days.min);
    let dest_max = i64::from(destination.duration_days.max);
    if dest_min <= i64::from(trip_max) + 1 || dest_max >= i64::from(trip_min) - 1 {
        DURATION_PARTIAL_SCORE
    } else {
        DURATION_MISS_SCORE
    }
}

fn season_suitability(destination: &Destination, answers: &QuizAnswers) -> f64 {
    match answers.travel_month {
        None => SEASON_FLEXIBLE_SCORE,
        Some(month) if destination.is_best_month(month) => 1.0,
        Some(_) => SEASON_OFF_SCORE,
    }
}

fn interest_overlap(destination: &Destination, answers: &QuizAnswers) -> f64 {
    if answers.interests.is_empty() {
        return NEUTRAL_SUB_SCORE;
    }

    let matches = answers
        .interests
        .iter()
        .filter(|i| destination.has_category(i.category()))
        .count();

    matches as f64 / answers.interests.len() as f64
}

fn style_alignment(destination: &Destination, answers: &QuizAnswers) -> f64 {
    let luxury = f64::from(destination.luxury_score);
    let adventure = f64::from(destination.adventure_score);
    let family = f64::from(destination.family_score);

    let raw = match answers.travel_style {
        TravelStyle::Backpacker => (6.0 - luxury) / 5.0 * 0.5 + adventure / 5.0 * 0.5,
        TravelStyle::Comfortable => (family + luxury) / 10.0,
        TravelStyle::Luxury => luxury / 5.0,
    };

    // Backpacker with luxury 0 and adventure 5 would otherwise reach 1.1
    raw.clamp(0.0, 1.0)
}

/// Score one destination against a traveler profile.
pub fn score_destination<'a>(
    destination: &'a Destination,
    answers: &QuizAnswers,
) -> ScoredDestination<'a> {
    let breakdown = ScoreBreakdown {
        traveler_type: traveler_type_match(destination, answers),
        budget: budget_fit(destination, answers),
        duration: duration_fit(destination, answers),
        season: season_suitability(destination, answers),
        interests: interest_overlap(destination, answers),
        alignment: style_alignment(destination, answers),
    };

    ScoredDestination {
        destination,
        score: (breakdown.weighted_sum() * 100.0).round() as u32,
        breakdown,
    }
}

fn apply_query_boost(scored: &mut ScoredDestination<'_>, query: &str) {
    let destination = scored.destination;
    let name = destination.name.to_lowercase();
    let id = destination.id.to_lowercase();

    let names_destination = name.contains(query)
        || query.contains(&name)
        || id.contains(query)
        || query.contains(&id);

    if names_destination {
        scored.score = scored.score.max(QUERY_NAME_MATCH_FLOOR);
        return;
    }

    let region = destination.region.to_string().to_lowercase();
    let in_context = region.contains(query)
        || query.contains(&region)
        || destination.summary.to_lowercase().contains(query);

    if in_context {
        scored.score += QUERY_CONTEXT_BONUS;
    }
}

/// Score every destination, apply the optional free-text boost, and return
/// the top `limit` by descending score. Ties keep catalog order.
pub fn rank_destinations<'a>(
    destinations: &'a [Destination],
    answers: &QuizAnswers,
    limit: usize,
    query: Option<&str>,
) -> Vec<ScoredDestination<'a>> {
    let mut scored: Vec<ScoredDestination<'a>> = destinations
        .iter()
        .map(|d| score_destination(d, answers))
        .collect();

    if let Some(query) = query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
    {
        for entry in scored.iter_mut() {
            apply_query_boost(entry, &query);
        }
    }

    // sort_by_key is stable
    scored.sort_by_key(|s| Reverse(s.score));
    scored.truncate(limit);

    tracing::debug!(
        ranked = scored.len(),
        top = scored.first().map(|s| s.destination.id.as_str()).unwrap_or("-"),
        "Ranked {} destinations",
        scored.len()
    );

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{
        BudgetStyle, GroupType, PriceBand, TravelInterest, TravelerOrigin, TripDuration,
    };
    use std::collections::HashSet;

    fn answers() -> QuizAnswers {
        QuizAnswers {
            origin: TravelerOrigin::International,
            group_type: GroupType::Couple,
            duration: TripDuration::OneWeek,
            budget_style: BudgetStyle::MidRange,
            interests: vec![TravelInterest::Wildlife, TravelInterest::Culture],
            travel_month: Some(7),
            travel_style: TravelStyle::Comfortable,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total = WEIGHT_TRAVELER_TYPE
            + WEIGHT_BUDGET_FIT
            + WEIGHT_DURATION_FIT
            + WEIGHT_SEASON
            + WEIGHT_INTERESTS
            + WEIGHT_STYLE_ALIGNMENT;
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scores_within_bounds() {
        let catalog = Catalog::embedded().unwrap();
        for style in [
            TravelStyle::Backpacker,
            TravelStyle::Comfortable,
            TravelStyle::Luxury,
        ] {
            let mut a = answers();
            a.travel_style = style;
            for destination in catalog.destinations() {
                let scored = score_destination(destination, &a);
                assert!(scored.score <= 100, "{} scored {}", destination.id, scored.score);
                let b = scored.breakdown;
                for v in [
                    b.traveler_type,
                    b.budget,
                    b.duration,
                    b.season,
                    b.interests,
                    b.alignment,
                ] {
                    assert!((0.0..=1.0).contains(&v));
                }
            }
        }
    }

    #[test]
    fn test_backpacker_alignment_clamped() {
        let catalog = Catalog::embedded().unwrap();
        let mut destination = catalog.get("jinja").unwrap().clone();
        destination.luxury_score = 0;
        destination.adventure_score = 5;

        let mut a = answers();
        a.travel_style = TravelStyle::Backpacker;
        assert_eq!(style_alignment(&destination, &a), 1.0);
    }

    #[test]
    fn test_budget_fit_penalizes_out_of_band() {
        let catalog = Catalog::embedded().unwrap();
        let bwindi = catalog.get("bwindi-impenetrable").unwrap();
        let jinja = catalog.get("jinja").unwrap();

        let a = answers();
        assert_eq!(budget_fit(jinja, &a), 1.0);
        assert_eq!(budget_fit(bwindi, &a), BUDGET_MISMATCH_SCORE);
    }

    #[test]
    fn test_budget_fit_table() {
        let catalog = Catalog::embedded().unwrap();
        let mut destination = catalog.get("jinja").unwrap().clone();

        // (style, band, expected)
        let table = [
            (BudgetStyle::Budget, PriceBand::Budget, 1.0),
            (BudgetStyle::Budget, PriceBand::MidRange, BUDGET_MISMATCH_SCORE),
            (BudgetStyle::Budget, PriceBand::Premium, BUDGET_MISMATCH_SCORE),
            (BudgetStyle::MidRange, PriceBand::Budget, 1.0),
            (BudgetStyle::MidRange, PriceBand::MidRange, 1.0),
            (BudgetStyle::MidRange, PriceBand::Premium, BUDGET_MISMATCH_SCORE),
            (BudgetStyle::Premium, PriceBand::Budget, BUDGET_MISMATCH_SCORE),
            (BudgetStyle::Premium, PriceBand::MidRange, 1.0),
            (BudgetStyle::Premium, PriceBand::Premium, 1.0),
            (BudgetStyle::Luxury, PriceBand::Budget, BUDGET_MISMATCH_SCORE),
            (BudgetStyle::Luxury, PriceBand::MidRange, BUDGET_MISMATCH_SCORE),
            (BudgetStyle::Luxury, PriceBand::Premium, 1.0),
        ];

        let mut a = answers();
        for (style, band, expected) in table {
            a.budget_style = style;
            destination.price_band = band;
            assert_eq!(
                budget_fit(&destination, &a),
                expected,
                "{:?} x {:?}",
                style,
                band
            );
        }
        assert_eq!(BUDGET_MISMATCH_SCORE, 0.3);
    }

    #[test]
    fn test_duration_fit_tiers() {
        let catalog = Catalog::embedded().unwrap();
        let rwenzori = catalog.get("rwenzori-mountains").unwrap(); // 4-8 days

        let mut a = answers();
        a.duration = TripDuration::OneWeek;
        assert_eq!(duration_fit(rwenzori, &a), 1.0);

        a.duration = TripDuration::Weekend;
        assert_eq!(duration_fit(rwenzori, &a), DURATION_PARTIAL_SCORE);
    }

    #[test]
    fn test_season_scores() {
        let catalog = Catalog::embedded().unwrap();
        let kidepo = catalog.get("kidepo-valley").unwrap();

        let mut a = answers();
        a.travel_month = None;
        assert_eq!(season_suitability(kidepo, &a), SEASON_FLEXIBLE_SCORE);
        a.travel_month = Some(1);
        assert_eq!(season_suitability(kidepo, &a), 1.0);
        a.travel_month = Some(7);
        assert_eq!(season_suitability(kidepo, &a), SEASON_OFF_SCORE);
    }

    #[test]
    fn test_interest_overlap_fraction() {
        let catalog = Catalog::embedded().unwrap();
        let bunyonyi = catalog.get("lake-bunyonyi").unwrap();
        // culture matches, wildlife does not
        assert_eq!(interest_overlap(bunyonyi, &answers()), 0.5);
    }

    #[test]
    fn test_rank_is_sorted_and_limited() {
        let catalog = Catalog::embedded().unwrap();
        let ranked = rank_destinations(catalog.destinations(), &answers(), 5, None);

        assert_eq!(ranked.len(), 5);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }

        let ids: HashSet<&str> = ranked.iter().map(|s| s.destination.id.as_str()).collect();
        assert_eq!(ids.len(), ranked.len());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::embedded().unwrap();
        let template = catalog.get("queen-elizabeth").unwrap();
        let destinations: Vec<Destination> = ["a", "b", "c"]
            .iter()
            .map(|id| {
                let mut d = template.clone();
                d.id = id.to_string();
                d
            })
            .collect();

        let ranked = rank_destinations(&destinations, &answers(), 3, None);
        let order: Vec<&str> = ranked.iter().map(|s| s.destination.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert!(ranked.windows(2).all(|p| p[0].score == p[1].score));

        // Reversed input, reversed output
        let reversed: Vec<Destination> = destinations.iter().rev().cloned().collect();
        let ranked = rank_destinations(&reversed, &answers(), 2, None);
        let order: Vec<&str> = ranked.iter().map(|s| s.destination.id.as_str()).collect();
        assert_eq!(order, vec!["c", "b"]);
    }

    #[test]
    fn test_rank_limit_larger_than_catalog() {
        let catalog = Catalog::embedded().unwrap();
        let ranked = rank_destinations(catalog.destinations(), &answers(), 50, None);
        assert_eq!(ranked.len(), catalog.len());
    }

    #[test]
    fn test_rank_is_deterministic() {
        let catalog = Catalog::embedded().unwrap();
        let a: Vec<_> = rank_destinations(catalog.destinations(), &answers(), 7, None)
            .iter()
            .map(|s| (s.destination.id.clone(), s.score))
            .collect();
        let b: Vec<_> = rank_destinations(catalog.destinations(), &answers(), 7, None)
            .iter()
            .map(|s| (s.destination.id.clone(), s.score))
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_query_naming_destination_floors_score() {
        let catalog = Catalog::embedded().unwrap();
        let ranked = rank_destinations(catalog.destinations(), &answers(), 3, Some("  Sipi "));

        let sipi = ranked
            .iter()
            .find(|s| s.destination.id == "sipi-falls")
            .expect("boosted destination survives truncation");
        assert!(sipi.score >= QUERY_NAME_MATCH_FLOOR);
        assert_eq!(ranked[0].destination.id, "sipi-falls");
    }

    #[test]
    fn test_query_region_adds_bonus() {
        let catalog = Catalog::embedded().unwrap();
        let base = rank_destinations(catalog.destinations(), &answers(), 12, None);
        let boosted = rank_destinations(catalog.destinations(), &answers(), 12, Some("eastern"));

        let score_of = |list: &[ScoredDestination<'_>], id: &str| {
            list.iter()
                .find(|s| s.destination.id == id)
                .map(|s| s.score)
                .unwrap()
        };

        assert_eq!(
            score_of(&boosted, "jinja"),
            score_of(&base, "jinja") + QUERY_CONTEXT_BONUS
        );
        assert_eq!(score_of(&boosted, "kibale-forest"), score_of(&base, "kibale-forest"));
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let catalog = Catalog::embedded().unwrap();
        let base: Vec<_> = rank_destinations(catalog.destinations(), &answers(), 12, None)
            .iter()
            .map(|s| s.score)
            .collect();
        let blank: Vec<_> = rank_destinations(catalog.destinations(), &answers(), 12, Some("   "))
            .iter()
            .map(|s| s.score)
            .collect();
        assert_eq!(base, blank);
    }

    #[test]
    fn test_display_score_clamped() {
        let catalog = Catalog::embedded().unwrap();
        let mut scored = score_destination(catalog.get("jinja").unwrap(), &answers());
        scored.score = 120;
        assert_eq!(scored.display_score(), 100);
    }
}
