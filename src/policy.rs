//! Listing Policy
//!
//! Business thresholds used by the status deriver and the insight generator. The defaults
//! are the values the seller panel ships with; a YAML file can override any subset.

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use jiff::{civil::Date, fmt::strtime};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// IO error reading the policy file
    #[error("Failed to read policy file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse policy YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Date format that cannot render and read back a calendar date
    #[error("Invalid date format {format:?}: {reason}")]
    InvalidDateFormat {
        /// The rejected format
        format: String,

        /// Why it was rejected
        reason: String,
    },
}

/// Thresholds and advisory estimates applied to listings.
#[derive(Debug, Clone)]
pub struct ListingPolicy {
    /// A listing older than this many days needs reposting.
    pub stale_after_days: i64,

    /// Listings with fewer photos than this are flagged.
    pub min_photos: u32,

    /// Estimated engagement lift from adding photos.
    pub photo_lift: Percentage,

    /// How long a boost lasts once applied.
    pub boost_duration_days: i64,

    /// Engagement is only judged above this many views.
    pub engagement_min_views: u32,

    /// Favorites-per-view rate below which engagement is low.
    pub engagement_min_rate: Percentage,

    /// Offer gap is only judged above this many offers.
    pub offers_min_count: u32,

    /// Gap between asking price and average offer above which offers are low.
    pub offer_gap: Percentage,

    /// Descriptions shorter than this many characters are flagged.
    pub description_min_chars: usize,

    /// Estimated engagement lift from a longer description.
    pub description_lift: Percentage,

    /// `strftime` format used for dates shown to the seller.
    pub date_format: String,
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self {
            stale_after_days: 14,
            min_photos: 3,
            photo_lift: Percentage::from(Decimal::new(40, 2)),
            boost_duration_days: 7,
            engagement_min_views: 100,
            engagement_min_rate: Percentage::from(Decimal::new(15, 2)),
            offers_min_count: 5,
            offer_gap: Percentage::from(Decimal::new(15, 2)),
            description_min_chars: 80,
            description_lift: Percentage::from(Decimal::new(30, 2)),
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

impl ListingPolicy {
    /// Load a policy from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a percentage is invalid.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a policy from YAML. Keys that are absent keep their default value.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or if a percentage is invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PolicyError> {
        let overrides: PolicyOverrides = serde_norway::from_str(yaml)?;

        overrides.apply(Self::default())
    }
}

/// Policy as written in YAML; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PolicyOverrides {
    stale_after_days: Option<i64>,
    min_photos: Option<u32>,
    photo_lift: Option<String>,
    boost_duration_days: Option<i64>,
    engagement_min_views: Option<u32>,
    engagement_min_rate: Option<String>,
    offers_min_count: Option<u32>,
    offer_gap: Option<String>,
    description_min_chars: Option<usize>,
    description_lift: Option<String>,
    date_format: Option<String>,
}

impl PolicyOverrides {
    fn apply(self, mut policy: ListingPolicy) -> Result<ListingPolicy, PolicyError> {
        if let Some(days) = self.stale_after_days {
            policy.stale_after_days = days;
        }

        if let Some(photos) = self.min_photos {
            policy.min_photos = photos;
        }

        if let Some(lift) = self.photo_lift {
            policy.photo_lift = parse_lift(&lift)?;
        }

        if let Some(days) = self.boost_duration_days {
            policy.boost_duration_days = days;
        }

        if let Some(views) = self.engagement_min_views {
            policy.engagement_min_views = views;
        }

        if let Some(rate) = self.engagement_min_rate {
            policy.engagement_min_rate = parse_percentage(&rate)?;
        }

        if let Some(offers) = self.offers_min_count {
            policy.offers_min_count = offers;
        }

        if let Some(gap) = self.offer_gap {
            policy.offer_gap = parse_percentage(&gap)?;
        }

        if let Some(chars) = self.description_min_chars {
            policy.description_min_chars = chars;
        }

        if let Some(lift) = self.description_lift {
            policy.description_lift = parse_lift(&lift)?;
        }

        if let Some(format) = self.date_format {
            validate_date_format(&format)?;
            policy.date_format = format;
        }

        Ok(policy)
    }
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as a decimal.
pub fn parse_percentage(s: &str) -> Result<Percentage, PolicyError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        // "15%" -> 0.15
        let value = percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| PolicyError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value / Decimal::ONE_HUNDRED))
    } else {
        let value = trimmed
            .parse::<Decimal>()
            .map_err(|_err| PolicyError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}

/// Parse a lift estimate, which is shown to the seller in whole percentage points.
fn parse_lift(s: &str) -> Result<Percentage, PolicyError> {
    let lift = parse_percentage(s)?;

    checked_whole_points(lift).ok_or_else(|| PolicyError::InvalidPercentage(s.to_string()))?;

    Ok(lift)
}

/// Check that `format` renders a date that reads back as the same date.
///
/// # Errors
///
/// Returns [`PolicyError::InvalidDateFormat`] for unknown directives, for directives that
/// need a time or time zone, and for formats that leave out the day, month or year.
pub fn validate_date_format(format: &str) -> Result<(), PolicyError> {
    let invalid = |reason: String| PolicyError::InvalidDateFormat {
        format: format.to_string(),
        reason,
    };

    // Day and month differ so a swapped pair is caught.
    let sample = Date::new(2025, 12, 31).map_err(|err| invalid(err.to_string()))?;
    let rendered = strtime::format(format, sample).map_err(|err| invalid(err.to_string()))?;
    let parsed = Date::strptime(format, &rendered).map_err(|err| invalid(err.to_string()))?;

    if parsed != sample {
        return Err(invalid(format!("{rendered:?} reads back as {parsed}")));
    }

    Ok(())
}

/// The underlying fraction of a percentage, e.g. `0.15` for 15%.
pub(crate) fn fraction(percent: Percentage) -> Decimal {
    // decimal_percentage doesn't expose the underlying Decimal
    percent * Decimal::ONE
}

/// Whole percentage points of a percentage, e.g. `15` for 15%.
///
/// Saturates at the `i64` bounds; policies loaded from YAML never reach them.
pub(crate) fn whole_points(percent: Percentage) -> i64 {
    checked_whole_points(percent).unwrap_or_else(|| {
        if fraction(percent).is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

fn checked_whole_points(percent: Percentage) -> Option<i64> {
    fraction(percent)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
