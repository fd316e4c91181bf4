//! Listings
//!
//! Raw attributes of a published marketplace listing, as persisted by the publish action and
//! refreshed by sync jobs.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};

pub mod analytics;

pub use analytics::ListingAnalytics;

/// Marketplace state of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListingState {
    /// Listed and available to buyers.
    Active,

    /// Sold; terminal.
    Sold,
}

impl ListingState {
    /// Parse a persisted state label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "active" => Some(Self::Active),
            "sold" => Some(Self::Sold),
            _ => None,
        }
    }

    /// The persisted label for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
        }
    }
}

/// A published listing.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingRecord<'a> {
    /// Listing id
    pub id: u64,

    /// Stock keeping unit of the underlying inventory item
    pub sku: String,

    /// Asking price
    pub price: Money<'a, Currency>,

    /// Number of photos attached
    pub photo_count: u32,

    /// Marketplace state
    pub status: ListingState,

    /// When the listing was published
    pub published_at: Timestamp,

    /// When a sync job last refreshed the listing
    pub last_synced_at: Timestamp,

    /// Whether a paid boost is running
    pub boost_active: bool,

    /// Whether the listing is hidden from buyers
    pub is_hidden: bool,

    /// Brand, if the seller filled it in
    pub brand: Option<String>,

    /// Free-text description
    pub description: String,
}

impl<'a> ListingRecord<'a> {
    /// Creates an active, visible, unboosted listing published (and last synced) at `published_at`.
    pub fn new(
        id: u64,
        sku: impl Into<String>,
        price: Money<'a, Currency>,
        published_at: Timestamp,
    ) -> Self {
        Self {
            id,
            sku: sku.into(),
            price,
            photo_count: 0,
            status: ListingState::Active,
            published_at,
            last_synced_at: published_at,
            boost_active: false,
            is_hidden: false,
            brand: None,
            description: String::new(),
        }
    }

    /// Whether the listing has been sold.
    pub fn is_sold(&self) -> bool {
        self.status == ListingState::Sold
    }

    /// The brand, treating an empty or whitespace-only value as absent.
    pub fn brand(&self) -> Option<&str> {
        self.brand
            .as_deref()
            .map(str::trim)
            .filter(|brand| !brand.is_empty())
    }

    /// Description length in characters.
    pub fn description_len(&self) -> usize {
        self.description.chars().count()
    }
}
