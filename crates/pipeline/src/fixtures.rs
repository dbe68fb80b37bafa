//! Listing builders shared by the unit tests.

use chrono::NaiveTime;
use data_loader::{Listing, ListingId};

pub fn at(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

/// A listing with neutral values; tests override what they care about.
pub fn listing(id: ListingId) -> Listing {
    Listing {
        id,
        route_name: "Hyderabad to Vijayawada".to_string(),
        route_link: format!("https://www.redbus.in/bus-tickets/route-{id}"),
        busname: "Orange Tours".to_string(),
        bustype: "AC Sleeper (2+1)".to_string(),
        departing_time: at(8, 0, 0),
        duration: "2 hours 30 min".to_string(),
        reaching_time: at(10, 30, 0),
        price: 450.0,
        seats_available: 20,
        star_rating: 4.0,
        state: None,
    }
}

pub fn ids(listings: &[Listing]) -> Vec<ListingId> {
    listings.iter().map(|l| l.id).collect()
}
