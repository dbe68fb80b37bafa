//! Integration tests for the pipeline.
//!
//! These tests check the algebraic properties of the full filter pass
//! (subset, identity, idempotence, order independence) and the reference
//! scenarios against a small but varied dataset.

use chrono::NaiveTime;
use data_loader::{Listing, ListingId, ListingIndex, DEFAULT_TIME};
use pipeline::{
    DurationBucket, Filter, FilterCriteria, FilterPipeline, InclusiveRange, PriceBucket,
    TimeWindow,
};
use std::collections::HashSet;

fn at(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn row(
    id: ListingId,
    busname: &str,
    bustype: &str,
    route: &str,
    price: f64,
    rating: f64,
    seats: u32,
    duration: &str,
    depart: NaiveTime,
    arrive: NaiveTime,
    state: Option<&str>,
) -> Listing {
    Listing {
        id,
        route_name: route.to_string(),
        route_link: format!("https://www.redbus.in/bus-tickets/{id}"),
        busname: busname.to_string(),
        bustype: bustype.to_string(),
        departing_time: depart,
        duration: duration.to_string(),
        reaching_time: arrive,
        price,
        seats_available: seats,
        star_rating: rating,
        state: state.map(str::to_string),
    }
}

fn create_test_dataset() -> Vec<Listing> {
    let kochi = "Kochi to Bangalore";
    let hyd = "Hyderabad to Vijayawada";
    vec![
        row(1, "KSRTC", "Non AC Seater", kochi, 250.0, 3.2, 41, "1 hour 55 min", at(6, 0, 0), at(7, 55, 0), Some("Kerala")),
        row(2, "KSRTC", "AC Sleeper (2+1)", kochi, 500.0, 4.1, 12, "2 hours", at(12, 0, 0), at(14, 0, 0), Some("Kerala")),
        row(3, "Orange Tours", "AC Sleeper (2+1)", hyd, 500.01, 4.6, 0, "2 hours 40 min", at(18, 0, 0), at(20, 40, 0), None),
        row(4, "Orange Tours", "Volvo Multi-Axle", hyd, 1000.0, 4.8, 7, "3 hours", at(23, 59, 59), at(2, 59, 0), None),
        row(5, "APSRTC", "Non AC Seater", hyd, 1000.5, 2.0, 100, "13 hours", at(21, 15, 0), at(10, 15, 0), Some("Andhra Pradesh")),
        row(6, "APSRTC", "Volvo Multi-Axle", hyd, 1800.0, 5.0, 3, "5 hours 5 min", DEFAULT_TIME, DEFAULT_TIME, Some("Andhra Pradesh")),
        row(7, "SRS Travels", "AC Seater", kochi, 320.0, 1.0, 150, "1 hour", at(9, 30, 0), at(10, 30, 0), Some("Kerala")),
        row(8, "SRS Travels", "AC Seater", kochi, 720.0, 3.9, 25, "4 hours", at(15, 45, 0), at(19, 45, 0), Some("Karnataka")),
    ]
}

/// A spread of criteria touching every field, alone and combined
fn criteria_cases() -> Vec<FilterCriteria> {
    vec![
        FilterCriteria::new(),
        FilterCriteria::new().with_operator("KSRTC"),
        FilterCriteria::new().with_bus_type("AC Sleeper (2+1)"),
        FilterCriteria::new().with_route("Kochi to Bangalore"),
        FilterCriteria::new().with_state("Kerala"),
        FilterCriteria::new().with_price_bucket(PriceBucket::Budget),
        FilterCriteria::new().with_price_bucket(PriceBucket::Standard),
        FilterCriteria::new().with_price_bucket(PriceBucket::Premium),
        FilterCriteria::new().with_price_range(InclusiveRange::new("price", 300.0, 1000.0).unwrap()),
        FilterCriteria::new().with_star_rating(InclusiveRange::new("rating", 4.0, 5.0).unwrap()),
        FilterCriteria::new().with_seats_available(InclusiveRange::new("seats", 1, 100).unwrap()),
        FilterCriteria::new().with_duration(DurationBucket::TwoToThreeHours),
        FilterCriteria::new().with_departing(TimeWindow::Night),
        FilterCriteria::new().with_reaching(TimeWindow::Morning),
        FilterCriteria::new()
            .with_route("Hyderabad to Vijayawada")
            .with_price_bucket(PriceBucket::Standard)
            .with_departing(TimeWindow::Night)
            .with_duration(DurationBucket::TwoToThreeHours),
        FilterCriteria::new()
            .with_state("Kerala")
            .with_seats_available(InclusiveRange::new("seats", 1, 100).unwrap())
            .with_star_rating(InclusiveRange::new("rating", 3.0, 5.0).unwrap())
            .with_departing(TimeWindow::Morning),
    ]
}

fn ids(listings: &[Listing]) -> Vec<ListingId> {
    listings.iter().map(|l| l.id).collect()
}

#[test]
fn test_result_is_ordered_subset_without_duplicates() {
    let dataset = create_test_dataset();
    for criteria in criteria_cases() {
        let result = pipeline::apply(&dataset, &criteria);

        let result_ids = ids(&result);
        let unique: HashSet<_> = result_ids.iter().collect();
        assert_eq!(unique.len(), result_ids.len(), "duplicates for {criteria:?}");

        // every row is an unmodified dataset row, in dataset order
        let positions = result.iter().map(|r| {
            dataset
                .iter()
                .position(|d| d == r)
                .expect("row not in dataset")
        });
        let mut last: Option<usize> = None;
        for pos in positions {
            assert!(last.is_none_or(|l| l < pos), "order changed for {criteria:?}");
            last = Some(pos);
        }
    }
}

#[test]
fn test_unconstrained_criteria_is_identity() {
    let dataset = create_test_dataset();
    assert_eq!(pipeline::apply(&dataset, &FilterCriteria::default()), dataset);
}

#[test]
fn test_full_ranges_are_identity() {
    let dataset = create_test_dataset();
    let criteria = FilterCriteria::new()
        .with_price_range(InclusiveRange::new("price", 0.0, f64::MAX).unwrap())
        .with_star_rating(InclusiveRange::new("rating", 1.0, 5.0).unwrap())
        .with_seats_available(InclusiveRange::new("seats", 0, u32::MAX).unwrap());
    assert_eq!(pipeline::apply(&dataset, &criteria), dataset);
}

#[test]
fn test_idempotence() {
    let dataset = create_test_dataset();
    for criteria in criteria_cases() {
        let once = pipeline::apply(&dataset, &criteria);
        let twice = pipeline::apply(&once, &criteria);
        assert_eq!(once, twice, "not idempotent for {criteria:?}");
    }
}

#[test]
fn test_filter_order_does_not_matter() {
    let dataset = create_test_dataset();
    let count = FilterPipeline::standard().len();

    // reversed, every rotation, and an interleaving
    let mut orders: Vec<Vec<usize>> = vec![(0..count).rev().collect()];
    for shift in 1..count {
        orders.push((0..count).map(|i| (i + shift) % count).collect());
    }
    orders.push((0..count).step_by(2).chain((1..count).step_by(2)).collect());

    for criteria in criteria_cases() {
        let expected = FilterPipeline::standard().apply(dataset.clone(), &criteria);
        for order in &orders {
            let mut slots: Vec<Option<Box<dyn Filter>>> =
                FilterPipeline::standard_filters().into_iter().map(Some).collect();
            let permuted = order
                .iter()
                .map(|&i| slots[i].take().expect("index used twice"))
                .collect();
            let actual = FilterPipeline::from_filters(permuted).apply(dataset.clone(), &criteria);
            assert_eq!(ids(&actual), ids(&expected), "order {order:?} for {criteria:?}");
        }
    }
}

#[test]
fn test_price_bucket_boundaries() {
    let dataset = create_test_dataset();

    let budget = pipeline::apply(&dataset, &FilterCriteria::new().with_price_bucket(PriceBucket::Budget));
    assert_eq!(ids(&budget), vec![1, 2, 7]);

    let standard = pipeline::apply(&dataset, &FilterCriteria::new().with_price_bucket(PriceBucket::Standard));
    assert_eq!(ids(&standard), vec![3, 4, 8]);

    let premium = pipeline::apply(&dataset, &FilterCriteria::new().with_price_bucket(PriceBucket::Premium));
    assert_eq!(ids(&premium), vec![5, 6]);
}

#[test]
fn test_noon_departure_is_morning_and_afternoon() {
    let dataset = create_test_dataset();

    let morning = pipeline::apply(&dataset, &FilterCriteria::new().with_departing(TimeWindow::Morning));
    assert_eq!(ids(&morning), vec![1, 2, 7]);

    let afternoon = pipeline::apply(&dataset, &FilterCriteria::new().with_departing(TimeWindow::Afternoon));
    assert_eq!(ids(&afternoon), vec![2, 3, 8]);

    let night = pipeline::apply(&dataset, &FilterCriteria::new().with_departing(TimeWindow::Night));
    assert_eq!(ids(&night), vec![3, 4, 5]);
}

#[test]
fn test_combined_criteria() {
    let dataset = create_test_dataset();
    let criteria = criteria_cases().remove(14);

    // Orange Tours 500.01, 18:00, "2 hours 40 min" and 1000.0, 23:59:59, "3 hours"
    assert_eq!(ids(&pipeline::apply(&dataset, &criteria)), vec![3, 4]);
}

#[test]
fn test_reference_scenarios() {
    let dataset = vec![
        row(1, "A", "AC Sleeper", "X to Y", 400.0, 4.0, 10, "2 hours", at(7, 0, 0), at(9, 0, 0), None),
        row(2, "B", "AC Sleeper", "X to Y", 1500.0, 3.0, 0, "4 hours", at(20, 0, 0), at(0, 0, 0), None),
    ];

    let by_bucket = FilterCriteria::new().with_price_bucket(PriceBucket::Budget);
    assert_eq!(ids(&pipeline::apply(&dataset, &by_bucket)), vec![1]);

    let by_seats =
        FilterCriteria::new().with_seats_available(InclusiveRange::new("seats", 1, 100).unwrap());
    assert_eq!(ids(&pipeline::apply(&dataset, &by_seats)), vec![1]);
}

#[test]
fn test_pipeline_over_loaded_snapshot() {
    let index = ListingIndex::from_listings(create_test_dataset()).unwrap();
    let criteria = FilterCriteria::new().with_operator("APSRTC");

    let result = pipeline::apply(index.listings(), &criteria);
    assert_eq!(ids(&result), vec![5, 6]);
    assert_eq!(index.len(), 8);
}
