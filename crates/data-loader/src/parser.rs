//! Parser for CSV exports of the `bus_routes` table.
//!
//! Expected header:
//! `id,route_name,route_link,busname,bustype,departing_time,duration,reaching_time,price,seats_available,star_rating[,state]`
//!
//! Cell-level problems are recovered here rather than reported:
//! - times that don't parse become [`DEFAULT_TIME`]
//! - missing or null seat counts become 0
//! - missing or null prices and ratings become NaN, and the loader drops
//!   those rows

use crate::error::{DataLoadError, Result};
use crate::types::*;
use chrono::{NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const NULL_TOKENS: &[&str] = &["null", "none", "nan", "nat"];

/// One CSV record before normalisation
#[derive(Debug, Deserialize)]
struct RawListing {
    id: ListingId,
    route_name: String,
    route_link: String,
    busname: String,
    bustype: String,
    departing_time: Option<String>,
    #[serde(default)]
    duration: String,
    reaching_time: Option<String>,
    price: Option<String>,
    seats_available: Option<String>,
    star_rating: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// Parse a CSV export on disk.
pub fn parse_listings_file(path: &Path) -> Result<Vec<Listing>> {
    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_listings(file, &name)
}

/// Parse listings from any reader holding a headered CSV export.
///
/// `file` is only used to label errors.
pub fn parse_listings<R: Read>(reader: R, file: &str) -> Result<Vec<Listing>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut listings = Vec::new();
    for (idx, record) in csv_reader.deserialize::<RawListing>().enumerate() {
        // +1 for the header, +1 for 1-based numbering
        let fallback_line = idx + 2;
        let raw = record.map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(fallback_line),
            reason: e.to_string(),
        })?;
        listings.push(normalize(raw, file, fallback_line)?);
    }

    tracing::debug!("Parsed {} listings from {}", listings.len(), file);
    Ok(listings)
}

fn normalize(raw: RawListing, file: &str, line: usize) -> Result<Listing> {
    let seats_available = parse_seats(raw.seats_available.as_deref()).map_err(|value| {
        DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason: format!("Invalid seats_available: {}", value),
        }
    })?;
    let measure = |field: &str, value: Option<&str>| {
        parse_measure(value).map_err(|value| DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason: format!("Invalid {}: {}", field, value),
        })
    };
    let price = measure("price", raw.price.as_deref())?;
    let star_rating = measure("star_rating", raw.star_rating.as_deref())?;

    Ok(Listing {
        id: raw.id,
        route_name: raw.route_name,
        route_link: raw.route_link,
        busname: raw.busname,
        bustype: raw.bustype,
        departing_time: normalize_time(raw.departing_time.as_deref()),
        duration: raw.duration,
        reaching_time: normalize_time(raw.reaching_time.as_deref()),
        price,
        seats_available,
        star_rating,
        state: raw.state.filter(|s| !s.is_empty()),
    })
}

/// Parse a time-of-day cell.
///
/// Accepts a bare time (`07:00:00`, `07:00`) or a full datetime, of which
/// only the time part is kept.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.time())
        })
}

/// Time cell with the midnight fallback applied.
pub fn normalize_time(value: Option<&str>) -> NaiveTime {
    value.and_then(parse_time_of_day).unwrap_or(DEFAULT_TIME)
}

/// Seat count with the zero fallback applied.
///
/// Integral floats ("25.0") are accepted since exports of nullable integer
/// columns often come out that way. Negative counts are rejected; the
/// offending text is returned as the error.
fn parse_seats(value: Option<&str>) -> std::result::Result<u32, String> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(0),
        Some(v) if is_null_token(v) => return Ok(0),
        Some(v) => v,
    };

    if let Ok(seats) = value.parse::<u32>() {
        return Ok(seats);
    }
    match value.parse::<f64>() {
        Ok(f) if f.is_nan() => Ok(0),
        Ok(f) if f < 0.0 || f.is_infinite() || f.fract() != 0.0 || f > u32::MAX as f64 => {
            Err(value.to_string())
        }
        Ok(f) => Ok(f as u32),
        Err(_) => {
            tracing::debug!("Unreadable seats_available {:?}, using 0", value);
            Ok(0)
        }
    }
}

/// Price or rating cell; an empty or null cell is NaN.
fn parse_measure(value: Option<&str>) -> std::result::Result<f64, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(f64::NAN),
        Some(v) if is_null_token(v) => Ok(f64::NAN),
        Some(v) => v.parse().map_err(|_| v.to_string()),
    }
}

fn is_null_token(value: &str) -> bool {
    NULL_TOKENS.iter().any(|t| value.eq_ignore_ascii_case(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,route_name,route_link,busname,bustype,departing_time,duration,reaching_time,price,seats_available,star_rating";

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("07:05:09"), Some(time(7, 5, 9)));
        assert_eq!(parse_time_of_day("22:30"), Some(time(22, 30, 0)));
        assert_eq!(parse_time_of_day("2024-07-18 13:45:00"), Some(time(13, 45, 0)));
        assert_eq!(parse_time_of_day("soon"), None);
        assert_eq!(parse_time_of_day(""), None);
    }

    #[test]
    fn test_normalize_time_defaults_to_midnight() {
        assert_eq!(normalize_time(None), DEFAULT_TIME);
        assert_eq!(normalize_time(Some("25:99:00")), DEFAULT_TIME);
        assert_eq!(normalize_time(Some("06:00:00")), time(6, 0, 0));
    }

    #[test]
    fn test_parse_seats() {
        assert_eq!(parse_seats(None), Ok(0));
        assert_eq!(parse_seats(Some("")), Ok(0));
        assert_eq!(parse_seats(Some("NULL")), Ok(0));
        assert_eq!(parse_seats(Some("NaN")), Ok(0));
        assert_eq!(parse_seats(Some("31")), Ok(31));
        assert_eq!(parse_seats(Some("25.0")), Ok(25));
        assert_eq!(parse_seats(Some("-4")), Err("-4".to_string()));
        assert_eq!(parse_seats(Some("2.5")), Err("2.5".to_string()));
    }

    #[test]
    fn test_parse_measure() {
        assert_eq!(parse_measure(Some("799")), Ok(799.0));
        assert_eq!(parse_measure(Some(" 4.3 ")), Ok(4.3));
        assert!(parse_measure(None).unwrap().is_nan());
        assert!(parse_measure(Some("NULL")).unwrap().is_nan());
        assert_eq!(parse_measure(Some("cheap")), Err("cheap".to_string()));
    }

    #[test]
    fn test_parse_listings() {
        let csv = format!(
            "{HEADER}\n\
             1,Hyderabad to Vijayawada,https://example.com/r/1,Orange Tours,AC Sleeper (2+1),21:30:00,5 hours 45 min,03:15:00,799,12,4.3\n\
             2,Hyderabad to Vijayawada,https://example.com/r/1,APSRTC,Non AC Seater,,6 hours,bogus,350.5,,3.1\n"
        );

        let listings = parse_listings(csv.as_bytes(), "bus_routes.csv").unwrap();
        assert_eq!(listings.len(), 2);

        let first = &listings[0];
        assert_eq!(first.busname, "Orange Tours");
        assert_eq!(first.departing_time, time(21, 30, 0));
        assert_eq!(first.reaching_time, time(3, 15, 0));
        assert_eq!(first.seats_available, 12);
        assert_eq!(first.state, None);

        let second = &listings[1];
        assert_eq!(second.departing_time, DEFAULT_TIME);
        assert_eq!(second.reaching_time, DEFAULT_TIME);
        assert_eq!(second.seats_available, 0);
        assert_eq!(second.price, 350.5);
    }

    #[test]
    fn test_parse_listings_with_state_column() {
        let csv = format!(
            "{HEADER},state\n\
             7,Chandigarh to Delhi,https://example.com/r/7,HRTC,Volvo AC Seater,06:00:00,5 hours,11:00:00,620,30,4.0,Himachal Pradesh\n"
        );

        let listings = parse_listings(csv.as_bytes(), "bus_routes.csv").unwrap();
        assert_eq!(listings[0].state.as_deref(), Some("Himachal Pradesh"));
    }

    #[test]
    fn test_parse_listings_reports_line_of_bad_price() {
        let csv = format!(
            "{HEADER}\n\
             1,A to B,https://example.com,Op,Seater,07:00:00,2 hours,09:00:00,cheap,10,4.0\n"
        );

        let err = parse_listings(csv.as_bytes(), "bus_routes.csv").unwrap_err();
        match err {
            DataLoadError::ParseError { file, line, .. } => {
                assert_eq!(file, "bus_routes.csv");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_rating_row_is_dropped_at_load() {
        let csv = format!(
            "{HEADER}\n\
             1,A to B,https://example.com,Op,Seater,07:00:00,2 hours,09:00:00,450,10,\n\
             2,A to B,https://example.com,Op,Seater,08:00:00,2 hours,10:00:00,,10,4.0\n\
             3,A to B,https://example.com,Op,Seater,09:00:00,2 hours,11:00:00,480,10,3.5\n"
        );

        let listings = parse_listings(csv.as_bytes(), "bus_routes.csv").unwrap();
        assert_eq!(listings.len(), 3);
        assert!(listings[0].star_rating.is_nan());
        assert!(listings[1].price.is_nan());

        let index = ListingIndex::from_listings(listings).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.listings()[0].id, 3);
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_listings_file(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
