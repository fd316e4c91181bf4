//! Listing Analytics

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

/// Engagement and offer figures for a single listing.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingAnalytics<'a> {
    /// Total views
    pub views: u32,

    /// Total favorites
    pub favorites: u32,

    /// Offers received
    pub offers: u32,

    /// Average offer amount
    pub avg_offer_price: Money<'a, Currency>,

    /// Highest offer amount
    pub best_offer_price: Money<'a, Currency>,

    /// Lowest offer amount
    pub lowest_offer_price: Money<'a, Currency>,

    /// Signed percent change in views over the trend window
    pub views_trend: Decimal,

    /// Signed percent change in favorites over the trend window
    pub favorites_trend: Decimal,
}

impl<'a> ListingAnalytics<'a> {
    /// Analytics for a listing with no activity yet.
    pub fn empty(currency: &'a Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        Self {
            views: 0,
            favorites: 0,
            offers: 0,
            avg_offer_price: zero,
            best_offer_price: zero,
            lowest_offer_price: zero,
            views_trend: Decimal::ZERO,
            favorites_trend: Decimal::ZERO,
        }
    }

    /// Favorites per view, or `None` when there are no views.
    pub fn engagement_rate(&self) -> Option<Decimal> {
        if self.views == 0 {
            return None;
        }

        Some(Decimal::from(self.favorites) / Decimal::from(self.views))
    }

    /// Whether `lowest <= avg <= best` holds for the offer prices.
    ///
    /// Trivially true when there are no offers.
    pub fn offer_prices_ordered(&self) -> bool {
        if self.offers == 0 {
            return true;
        }

        let lowest = self.lowest_offer_price.amount();
        let avg = self.avg_offer_price.amount();
        let best = self.best_offer_price.amount();

        lowest <= avg && avg <= best
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;

    use super::*;

    #[test]
    fn engagement_rate_is_none_without_views() {
        let analytics = ListingAnalytics::empty(EUR);

        assert_eq!(analytics.engagement_rate(), None);
    }

    #[test]
    fn engagement_rate_divides_favorites_by_views() {
        let analytics = ListingAnalytics {
            views: 200,
            favorites: 20,
            ..ListingAnalytics::empty(EUR)
        };

        assert_eq!(analytics.engagement_rate(), Some(Decimal::new(1, 1)));
    }

    #[test]
    fn offer_prices_ordered_checks_bounds() {
        let mut analytics = ListingAnalytics {
            offers: 3,
            lowest_offer_price: Money::from_minor(6000, EUR),
            avg_offer_price: Money::from_minor(7000, EUR),
            best_offer_price: Money::from_minor(8000, EUR),
            ..ListingAnalytics::empty(EUR)
        };

        assert!(analytics.offer_prices_ordered());

        analytics.avg_offer_price = Money::from_minor(9000, EUR);
        assert!(!analytics.offer_prices_ordered());

        analytics.offers = 0;
        assert!(analytics.offer_prices_ordered());
    }
}
