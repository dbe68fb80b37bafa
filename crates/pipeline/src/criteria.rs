//! User-selected filter criteria.
//!
//! A [`FilterCriteria`] is rebuilt for every interaction and describes one
//! filtering pass. Every field defaults to "no constraint", so
//! `FilterCriteria::default()` keeps every listing.

use crate::error::{CriteriaError, Result};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Labels that mean "no constraint" in selectors
const UNCONSTRAINED_LABELS: &[&str] = &["all", "any", "anytime"];

/// Whether a user-facing label means "don't filter on this field"
pub fn is_unconstrained_label(label: &str) -> bool {
    let label = label.trim();
    label.is_empty() || UNCONSTRAINED_LABELS.iter().any(|l| label.eq_ignore_ascii_case(l))
}

/// Parse an optional bucket label, mapping "All"/"Anytime" to `None`.
pub fn parse_optional<T: FromStr<Err = CriteriaError>>(label: &str) -> Result<Option<T>> {
    if is_unconstrained_label(label) {
        Ok(None)
    } else {
        label.parse().map(Some)
    }
}

fn unknown_label(kind: &'static str, value: &str, options: &[&str]) -> CriteriaError {
    CriteriaError::UnknownLabel {
        kind,
        value: value.to_string(),
        expected: options.join(", "),
    }
}

// =============================================================================
// Exact-match selector
// =============================================================================

/// Exact-match constraint on a text column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector<T> {
    #[default]
    Unconstrained,
    EqualTo(T),
}

impl Selector<String> {
    /// Build from a selector label; "All" means unconstrained. Any other
    /// label is kept verbatim.
    pub fn from_label(label: &str) -> Self {
        if is_unconstrained_label(label) {
            Selector::Unconstrained
        } else {
            Selector::EqualTo(label.to_string())
        }
    }

    /// Case-sensitive equality, no normalisation. A missing value only
    /// passes an unconstrained selector.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selector::Unconstrained => true,
            Selector::EqualTo(expected) => value == Some(expected.as_str()),
        }
    }
}

impl<T> Selector<T> {
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Selector::Unconstrained)
    }
}

impl<T> From<Option<T>> for Selector<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selector::Unconstrained, Selector::EqualTo)
    }
}

// =============================================================================
// Price buckets
// =============================================================================

/// Categorical price ranges offered by the dashboard.
///
/// Boundaries are deliberately asymmetric: the lowest bucket is closed on
/// both ends, later buckets are open at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBucket {
    /// [250, 500]
    #[serde(rename = "250-500")]
    Budget,
    /// (500, 1000]
    #[serde(rename = "500-1000")]
    Standard,
    /// (1000, inf)
    #[serde(rename = "1000+")]
    Premium,
}

impl PriceBucket {
    pub const ALL: [PriceBucket; 3] = [PriceBucket::Budget, PriceBucket::Standard, PriceBucket::Premium];

    pub fn label(self) -> &'static str {
        match self {
            PriceBucket::Budget => "250-500",
            PriceBucket::Standard => "500-1000",
            PriceBucket::Premium => "1000+",
        }
    }

    pub fn contains(self, price: f64) -> bool {
        match self {
            PriceBucket::Budget => (250.0..=500.0).contains(&price),
            PriceBucket::Standard => price > 500.0 && price <= 1000.0,
            PriceBucket::Premium => price > 1000.0,
        }
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceBucket {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        PriceBucket::ALL
            .into_iter()
            .find(|b| b.label() == s)
            .ok_or_else(|| {
                unknown_label("price bucket", s, &PriceBucket::ALL.map(PriceBucket::label))
            })
    }
}

// =============================================================================
// Duration buckets
// =============================================================================

/// Coarse trip length buckets.
///
/// Matching is a substring test against the free-text duration, so
/// "13 hours" contains "3 hours" and lands in [`DurationBucket::ThreePlusHours`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    #[serde(rename = "1-2 hours")]
    OneToTwoHours,
    #[serde(rename = "2-3 hours")]
    TwoToThreeHours,
    #[serde(rename = "3+ hours")]
    ThreePlusHours,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 3] = [
        DurationBucket::OneToTwoHours,
        DurationBucket::TwoToThreeHours,
        DurationBucket::ThreePlusHours,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DurationBucket::OneToTwoHours => "1-2 hours",
            DurationBucket::TwoToThreeHours => "2-3 hours",
            DurationBucket::ThreePlusHours => "3+ hours",
        }
    }

    /// Literal substrings any one of which puts a duration in this bucket
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            DurationBucket::OneToTwoHours => &["1 hour", "2 hours"],
            DurationBucket::TwoToThreeHours => &["2 hours", "3 hours"],
            DurationBucket::ThreePlusHours => &["3 hours"],
        }
    }

    pub fn matches(self, duration: &str) -> bool {
        self.tokens().iter().any(|token| duration.contains(token))
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DurationBucket {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        DurationBucket::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                unknown_label("duration bucket", s, &DurationBucket::ALL.map(DurationBucket::label))
            })
    }
}

// =============================================================================
// Time-of-day windows
// =============================================================================

const HOUR: u32 = 3600;

/// Named time-of-day windows. Both ends are inclusive, so the shared
/// boundaries (12:00:00, 18:00:00) belong to two windows.
///
/// Serialised as the dashboard label; the bare name is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeWindow {
    /// 06:00:00 - 12:00:00
    #[serde(rename = "Morning (06:00-12:00)", alias = "Morning", alias = "morning")]
    Morning,
    /// 12:00:00 - 18:00:00
    #[serde(rename = "Afternoon (12:00-18:00)", alias = "Afternoon", alias = "afternoon")]
    Afternoon,
    /// 18:00:00 - 23:59:59
    #[serde(rename = "Night (18:00-24:00)", alias = "Night", alias = "night")]
    Night,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [TimeWindow::Morning, TimeWindow::Afternoon, TimeWindow::Night];

    pub fn name(self) -> &'static str {
        match self {
            TimeWindow::Morning => "Morning",
            TimeWindow::Afternoon => "Afternoon",
            TimeWindow::Night => "Night",
        }
    }

    /// Label as shown in the dashboard selector
    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Morning => "Morning (06:00-12:00)",
            TimeWindow::Afternoon => "Afternoon (12:00-18:00)",
            TimeWindow::Night => "Night (18:00-24:00)",
        }
    }

    /// Window bounds in seconds from midnight, both inclusive
    pub fn bounds(self) -> (u32, u32) {
        match self {
            TimeWindow::Morning => (6 * HOUR, 12 * HOUR),
            TimeWindow::Afternoon => (12 * HOUR, 18 * HOUR),
            TimeWindow::Night => (18 * HOUR, 23 * HOUR + 59 * 60 + 59),
        }
    }

    pub fn contains(self, time: NaiveTime) -> bool {
        let (start, end) = self.bounds();
        let secs = time.num_seconds_from_midnight();
        // a fractional second past the end bound is already outside
        start <= secs && (secs < end || (secs == end && time.nanosecond() == 0))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeWindow {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        TimeWindow::ALL
            .into_iter()
            .find(|w| w.label().eq_ignore_ascii_case(s) || w.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| unknown_label("time window", s, &TimeWindow::ALL.map(TimeWindow::name)))
    }
}

// =============================================================================
// Inclusive numeric ranges
// =============================================================================

/// `lo <= value <= hi`
///
/// Deserialising goes through [`InclusiveRange::new`], so a saved range
/// with `lo > hi` is rejected just like one built from flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawRange<T>",
    bound(deserialize = "T: Deserialize<'de> + PartialOrd + Copy + fmt::Display")
)]
pub struct InclusiveRange<T> {
    pub lo: T,
    pub hi: T,
}

/// Unchecked wire form of [`InclusiveRange`]
#[derive(Deserialize)]
struct RawRange<T> {
    lo: T,
    hi: T,
}

impl<T: PartialOrd + Copy + fmt::Display> TryFrom<RawRange<T>> for InclusiveRange<T> {
    type Error = CriteriaError;

    fn try_from(raw: RawRange<T>) -> Result<Self> {
        InclusiveRange::new("range", raw.lo, raw.hi)
    }
}

impl<T: PartialOrd + Copy + fmt::Display> InclusiveRange<T> {
    /// Checked constructor; `field` only labels the error.
    pub fn new(field: &'static str, lo: T, hi: T) -> Result<Self> {
        // written so that a NaN bound is rejected too
        if !(lo <= hi) {
            return Err(CriteriaError::InvertedRange {
                field,
                lo: lo.to_string(),
                hi: hi.to_string(),
            });
        }
        Ok(Self { lo, hi })
    }

    pub fn contains(&self, value: T) -> bool {
        self.lo <= value && value <= self.hi
    }
}

// =============================================================================
// FilterCriteria
// =============================================================================

/// All constraints for one filtering pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub operator: Selector<String>,
    pub bus_type: Selector<String>,
    pub route: Selector<String>,
    pub state: Selector<String>,
    pub price_bucket: Option<PriceBucket>,
    pub price_range: Option<InclusiveRange<f64>>,
    pub star_rating: Option<InclusiveRange<f64>>,
    pub seats_available: Option<InclusiveRange<u32>>,
    pub duration: Option<DurationBucket>,
    pub departing: Option<TimeWindow>,
    pub reaching: Option<TimeWindow>,
}

impl FilterCriteria {
    /// Criteria that keep every listing
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Selector::EqualTo(operator.into());
        self
    }

    pub fn with_bus_type(mut self, bus_type: impl Into<String>) -> Self {
        self.bus_type = Selector::EqualTo(bus_type.into());
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Selector::EqualTo(route.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Selector::EqualTo(state.into());
        self
    }

    pub fn with_price_bucket(mut self, bucket: PriceBucket) -> Self {
        self.price_bucket = Some(bucket);
        self
    }

    pub fn with_price_range(mut self, range: InclusiveRange<f64>) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn with_star_rating(mut self, range: InclusiveRange<f64>) -> Self {
        self.star_rating = Some(range);
        self
    }

    pub fn with_seats_available(mut self, range: InclusiveRange<u32>) -> Self {
        self.seats_available = Some(range);
        self
    }

    pub fn with_duration(mut self, bucket: DurationBucket) -> Self {
        self.duration = Some(bucket);
        self
    }

    pub fn with_departing(mut self, window: TimeWindow) -> Self {
        self.departing = Some(window);
        self
    }

    pub fn with_reaching(mut self, window: TimeWindow) -> Self {
        self.reaching = Some(window);
        self
    }

    /// True when no field constrains anything
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}
