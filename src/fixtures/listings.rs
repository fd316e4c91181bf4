//! Listing Fixtures

use jiff::Timestamp;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_decimal, parse_price},
    listings::{ListingAnalytics, ListingRecord, ListingState},
};

/// Wrapper for listings in YAML
#[derive(Debug, Deserialize)]
pub struct ListingsFixture {
    /// Listings, in display order
    pub listings: Vec<ListingFixture>,
}

/// Listing fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ListingFixture {
    /// Listing id
    pub id: u64,

    /// Stock keeping unit
    pub sku: String,

    /// Asking price (e.g., "45.00 EUR")
    pub price: String,

    /// Number of photos
    #[serde(default)]
    pub photo_count: u32,

    /// State label ("active" or "sold")
    #[serde(default = "default_status")]
    pub status: String,

    /// Publish time (RFC 3339)
    pub published_at: Timestamp,

    /// Last sync time; defaults to the publish time
    #[serde(default)]
    pub last_synced_at: Option<Timestamp>,

    /// Whether a boost is running
    #[serde(default)]
    pub boost_active: bool,

    /// Whether the listing is hidden
    #[serde(default)]
    pub is_hidden: bool,

    /// Brand
    #[serde(default)]
    pub brand: Option<String>,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Analytics; an absent block means no activity yet
    #[serde(default)]
    pub analytics: Option<AnalyticsFixture>,
}

/// Analytics fixture from YAML
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsFixture {
    /// Views
    pub views: u32,

    /// Favorites
    pub favorites: u32,

    /// Offers
    pub offers: u32,

    /// Average offer (e.g., "36.00 EUR")
    pub avg_offer_price: Option<String>,

    /// Best offer
    pub best_offer_price: Option<String>,

    /// Lowest offer
    pub lowest_offer_price: Option<String>,

    /// Views trend in percent (e.g., "-4.5")
    pub views_trend: Option<String>,

    /// Favorites trend in percent
    pub favorites_trend: Option<String>,
}

fn default_status() -> String {
    ListingState::Active.as_str().to_string()
}

impl ListingFixture {
    /// Convert to a listing record and its analytics
    ///
    /// # Errors
    ///
    /// Returns an error if a price, decimal or status label is invalid.
    pub fn try_into_records(
        self,
    ) -> Result<(ListingRecord<'static>, ListingAnalytics<'static>), FixtureError> {
        let price = parse_price(&self.price)?;
        let status = ListingState::from_label(&self.status)
            .ok_or_else(|| FixtureError::UnknownListingStatus(self.status.clone()))?;

        let listing = ListingRecord {
            id: self.id,
            sku: self.sku,
            price,
            photo_count: self.photo_count,
            status,
            published_at: self.published_at,
            last_synced_at: self.last_synced_at.unwrap_or(self.published_at),
            boost_active: self.boost_active,
            is_hidden: self.is_hidden,
            brand: self.brand,
            description: self.description,
        };

        let fixture = self.analytics.unwrap_or_default();
        let empty = ListingAnalytics::empty(price.currency());
        let money_or_empty = |value: Option<&String>| {
            value.map_or(Ok(empty.avg_offer_price), |s| parse_price(s))
        };

        let analytics = ListingAnalytics {
            views: fixture.views,
            favorites: fixture.favorites,
            offers: fixture.offers,
            avg_offer_price: money_or_empty(fixture.avg_offer_price.as_ref())?,
            best_offer_price: money_or_empty(fixture.best_offer_price.as_ref())?,
            lowest_offer_price: money_or_empty(fixture.lowest_offer_price.as_ref())?,
            views_trend: fixture
                .views_trend
                .as_deref()
                .map_or(Ok(empty.views_trend), parse_decimal)?,
            favorites_trend: fixture
                .favorites_trend
                .as_deref()
                .map_or(Ok(empty.favorites_trend), parse_decimal)?,
        };

        Ok((listing, analytics))
    }
}
