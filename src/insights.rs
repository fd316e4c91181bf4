//! Insights
//!
//! Advisory signals surfaced to the seller about a listing's performance or completeness.
//! Every check runs independently, so one pass can raise several insights of different
//! severities. Insights are emitted in check order.

use std::fmt;

use jiff::{Timestamp, fmt::strtime};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use tracing::{debug, warn};

use crate::{
    clock,
    listings::{ListingAnalytics, ListingRecord, ListingState},
    policy::{ListingPolicy, fraction, whole_points},
};

/// Kinds of listing insight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InsightKind {
    /// Too few photos.
    Photos,

    /// Listed long enough to lose ranking.
    OldListing,

    /// Plenty of views but few favorites.
    LowEngagement,

    /// Offers are coming in well under the asking price.
    OffersLow,

    /// No brand set.
    MissingBrand,

    /// Description is too short.
    ShortDescription,

    /// Hidden from buyers.
    Hidden,

    /// A boost is running.
    BoostActive,
}

impl InsightKind {
    /// Machine-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            InsightKind::Photos => "photos",
            InsightKind::OldListing => "oldListing",
            InsightKind::LowEngagement => "lowEngagement",
            InsightKind::OffersLow => "offersLow",
            InsightKind::MissingBrand => "missingBrand",
            InsightKind::ShortDescription => "shortDescription",
            InsightKind::Hidden => "hidden",
            InsightKind::BoostActive => "boostActive",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently the seller should act on an insight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational
    Info,

    /// Worth fixing
    Warning,

    /// Hurting the listing now
    Critical,
}

impl Severity {
    /// Machine-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured payload attached to some insights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsightData {
    /// Days since the listing was published.
    Days(i64),

    /// A percentage in whole points.
    Percent(i64),

    /// When the running boost ends.
    BoostUntil {
        /// End of the boost
        date: Timestamp,

        /// End of the boost, formatted for display
        formatted: String,
    },
}

impl fmt::Display for InsightData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightData::Days(days) => write!(f, "{days} days"),
            InsightData::Percent(percent) => write!(f, "{percent}%"),
            InsightData::BoostUntil { formatted, .. } => write!(f, "until {formatted}"),
        }
    }
}

/// A computed advisory signal for a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingInsight {
    /// Insight kind
    pub kind: InsightKind,

    /// Severity
    pub severity: Severity,

    /// Optional payload
    pub data: Option<InsightData>,
}

impl ListingInsight {
    /// Creates an insight without a payload.
    #[must_use]
    pub fn new(kind: InsightKind, severity: Severity) -> Self {
        Self {
            kind,
            severity,
            data: None,
        }
    }

    /// Creates an insight with a payload.
    #[must_use]
    pub fn with_data(kind: InsightKind, severity: Severity, data: InsightData) -> Self {
        Self {
            kind,
            severity,
            data: Some(data),
        }
    }
}

impl fmt::Display for ListingInsight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.kind)?;

        if let Some(data) = &self.data {
            write!(f, " ({data})")?;
        }

        Ok(())
    }
}

/// Generate insights for a listing using the default policy.
pub fn generate_insights(
    listing: &ListingRecord<'_>,
    analytics: &ListingAnalytics<'_>,
    now: Timestamp,
) -> Vec<ListingInsight> {
    generate_insights_with(listing, analytics, now, &ListingPolicy::default())
}

/// Generate insights for a listing.
pub fn generate_insights_with(
    listing: &ListingRecord<'_>,
    analytics: &ListingAnalytics<'_>,
    now: Timestamp,
    policy: &ListingPolicy,
) -> Vec<ListingInsight> {
    let mut insights = Vec::new();

    if listing.is_hidden {
        insights.push(ListingInsight::new(InsightKind::Hidden, Severity::Warning));
    }

    if listing.status == ListingState::Active
        && clock::is_older_than(listing.published_at, now, policy.stale_after_days)
    {
        insights.push(ListingInsight::with_data(
            InsightKind::OldListing,
            Severity::Critical,
            InsightData::Days(clock::days_since(listing.published_at, now)),
        ));
    }

    if listing.photo_count < policy.min_photos {
        insights.push(ListingInsight::with_data(
            InsightKind::Photos,
            Severity::Warning,
            InsightData::Percent(whole_points(policy.photo_lift)),
        ));
    }

    if listing.boost_active {
        let date = clock::days_after(now, policy.boost_duration_days);

        insights.push(ListingInsight::with_data(
            InsightKind::BoostActive,
            Severity::Info,
            InsightData::BoostUntil {
                date,
                formatted: format_date(date, &policy.date_format),
            },
        ));
    }

    if has_low_engagement(analytics, policy) {
        insights.push(ListingInsight::new(
            InsightKind::LowEngagement,
            Severity::Info,
        ));
    }

    if let Some(percent) = low_offer_gap(listing, analytics, policy) {
        insights.push(ListingInsight::with_data(
            InsightKind::OffersLow,
            Severity::Warning,
            InsightData::Percent(percent),
        ));
    }

    if listing.brand().is_none() {
        insights.push(ListingInsight::new(
            InsightKind::MissingBrand,
            Severity::Info,
        ));
    }

    if listing.description_len() < policy.description_min_chars {
        insights.push(ListingInsight::with_data(
            InsightKind::ShortDescription,
            Severity::Info,
            InsightData::Percent(whole_points(policy.description_lift)),
        ));
    }

    debug!(
        listing_id = listing.id,
        insights = insights.len(),
        most_severe = ?most_severe(&insights),
        "generated listing insights"
    );

    insights
}

/// Render `date` with the policy format, falling back to RFC 3339 if the format is unusable.
fn format_date(date: Timestamp, format: &str) -> String {
    strtime::format(format, date).unwrap_or_else(|err| {
        warn!(%date, format, error = %err, "unusable date format");

        date.to_string()
    })
}

/// The highest severity among `insights`, if any.
pub fn most_severe(insights: &[ListingInsight]) -> Option<Severity> {
    insights.iter().map(|insight| insight.severity).max()
}

/// Views above the floor with a favorites rate under the minimum.
fn has_low_engagement(analytics: &ListingAnalytics<'_>, policy: &ListingPolicy) -> bool {
    if analytics.views <= policy.engagement_min_views {
        return false;
    }

    analytics
        .engagement_rate()
        .is_some_and(|rate| rate < fraction(policy.engagement_min_rate))
}

/// Gap between asking price and average offer, in whole percent, when it exceeds the policy.
///
/// Skipped for a zero price or when the offer currency differs from the asking currency.
fn low_offer_gap(
    listing: &ListingRecord<'_>,
    analytics: &ListingAnalytics<'_>,
    policy: &ListingPolicy,
) -> Option<i64> {
    if analytics.offers <= policy.offers_min_count {
        return None;
    }

    if listing.price.currency() != analytics.avg_offer_price.currency() {
        return None;
    }

    let price = *listing.price.amount();
    let avg = *analytics.avg_offer_price.amount();

    let gap = price
        .checked_sub(avg)?
        .checked_div(price)?
        .checked_mul(Decimal::ONE_HUNDRED)?;

    if gap <= fraction(policy.offer_gap) * Decimal::ONE_HUNDRED {
        return None;
    }

    gap.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
