//! Statuses
//!
//! Derives the display status tags of a listing from its raw fields. A listing can carry
//! several tags at once (hidden and in need of a repost, say); they are ordered by the fixed
//! priority table on [`StatusKind`], highest first, so the first tag is the one a compact
//! view shows.

use std::fmt;

use jiff::Timestamp;
use smallvec::{SmallVec, smallvec};
use tracing::trace;

use crate::{clock, listings::ListingRecord, policy::ListingPolicy};

/// Kinds of derived listing status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// The listing sold. Suppresses every other status.
    Sold,

    /// Hidden from buyers.
    Hidden,

    /// Old enough that reposting would refresh its ranking.
    NeedsRepost,

    /// Fewer photos than recommended.
    LowPhotos,

    /// A boost is running.
    BoostActive,

    /// Nothing to report.
    Active,
}

impl StatusKind {
    /// Every kind, in descending priority.
    pub const ALL: [StatusKind; 6] = [
        StatusKind::Sold,
        StatusKind::Hidden,
        StatusKind::NeedsRepost,
        StatusKind::LowPhotos,
        StatusKind::BoostActive,
        StatusKind::Active,
    ];

    /// Display priority; higher is shown first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            StatusKind::Sold => 100,
            StatusKind::Hidden => 90,
            StatusKind::NeedsRepost => 80,
            StatusKind::LowPhotos => 70,
            StatusKind::BoostActive => 60,
            StatusKind::Active => 0,
        }
    }

    /// Machine-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusKind::Sold => "sold",
            StatusKind::Hidden => "hidden",
            StatusKind::NeedsRepost => "needsRepost",
            StatusKind::LowPhotos => "lowPhotos",
            StatusKind::BoostActive => "boostActive",
            StatusKind::Active => "active",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status tag with its display priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DerivedStatus {
    /// Status kind
    pub kind: StatusKind,

    /// Display priority; higher is shown first
    pub priority: u8,
}

impl From<StatusKind> for DerivedStatus {
    fn from(kind: StatusKind) -> Self {
        DerivedStatus {
            kind,
            priority: kind.priority(),
        }
    }
}

/// Non-empty status list, highest priority first.
pub type DerivedStatuses = SmallVec<[DerivedStatus; 4]>;

/// Derive the statuses of a listing using the default policy.
pub fn derive_statuses(listing: &ListingRecord<'_>, now: Timestamp) -> DerivedStatuses {
    derive_statuses_with(listing, now, &ListingPolicy::default())
}

/// Derive the statuses of a listing.
///
/// A sold listing yields exactly `[sold]`. Otherwise every status whose condition holds is
/// collected; if none do, the result is `[active]`. The result is never empty.
pub fn derive_statuses_with(
    listing: &ListingRecord<'_>,
    now: Timestamp,
    policy: &ListingPolicy,
) -> DerivedStatuses {
    if listing.is_sold() {
        return smallvec![DerivedStatus::from(StatusKind::Sold)];
    }

    let mut statuses: DerivedStatuses = SmallVec::new();

    if listing.is_hidden {
        statuses.push(StatusKind::Hidden.into());
    }

    if clock::is_older_than(listing.published_at, now, policy.stale_after_days) {
        statuses.push(StatusKind::NeedsRepost.into());
    }

    if listing.photo_count < policy.min_photos {
        statuses.push(StatusKind::LowPhotos.into());
    }

    if listing.boost_active {
        statuses.push(StatusKind::BoostActive.into());
    }

    if statuses.is_empty() {
        statuses.push(StatusKind::Active.into());
    }

    // Stable, so equal priorities keep check order.
    statuses.sort_by(|a, b| b.priority.cmp(&a.priority));

    trace!(
        listing_id = listing.id,
        primary = %primary_kind(&statuses),
        count = statuses.len(),
        "derived listing statuses"
    );

    statuses
}

/// The status a compact view should show: the first, highest-priority entry.
pub fn primary_status(statuses: &[DerivedStatus]) -> Option<&DerivedStatus> {
    statuses.first()
}

fn primary_kind(statuses: &[DerivedStatus]) -> StatusKind {
    primary_status(statuses).map_or(StatusKind::Active, |status| status.kind)
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::listings::ListingState;

    use super::*;

    fn now() -> Result<Timestamp, jiff::Error> {
        "2025-06-30T12:00:00Z".parse()
    }

    /// A listing that triggers nothing: fresh, visible, enough photos, no boost.
    fn healthy_listing(now: Timestamp) -> ListingRecord<'static> {
        let mut listing = ListingRecord::new(
            1,
            "SKU-1",
            Money::from_minor(2500, EUR),
            clock::days_after(now, -2),
        );
        listing.photo_count = 5;
        listing
    }

    fn kinds(statuses: &[DerivedStatus]) -> Vec<StatusKind> {
        statuses.iter().map(|status| status.kind).collect()
    }

    #[test]
    fn priority_table_is_strictly_descending() {
        let priorities: Vec<u8> = StatusKind::ALL.iter().map(|kind| kind.priority()).collect();

        assert!(
            priorities.windows(2).all(|pair| matches!(pair, [a, b] if a > b)),
            "priorities should strictly descend: {priorities:?}"
        );
    }

    #[test]
    fn healthy_listing_is_active() -> TestResult {
        let now = now()?;
        let statuses = derive_statuses(&healthy_listing(now), now);

        assert_eq!(statuses.as_slice(), &[DerivedStatus::from(StatusKind::Active)]);
        assert_eq!(statuses.first().map(|status| status.priority), Some(0));

        Ok(())
    }

    #[test]
    fn sold_suppresses_everything_else() -> TestResult {
        let now = now()?;
        let mut listing = healthy_listing(now);
        listing.status = ListingState::Sold;
        listing.is_hidden = true;
        listing.boost_active = true;
        listing.photo_count = 0;
        listing.published_at = clock::days_after(now, -60);

        let statuses = derive_statuses(&listing, now);

        assert_eq!(
            statuses.as_slice(),
            &[DerivedStatus {
                kind: StatusKind::Sold,
                priority: 100
            }]
        );

        Ok(())
    }

    #[test]
    fn hidden_with_few_photos_orders_hidden_first() -> TestResult {
        let now = now()?;
        let mut listing = healthy_listing(now);
        listing.photo_count = 1;
        listing.is_hidden = true;

        let statuses = derive_statuses(&listing, now);

        assert_eq!(kinds(&statuses), [StatusKind::Hidden, StatusKind::LowPhotos]);
        assert_eq!(
            primary_status(&statuses).map(|status| status.kind),
            Some(StatusKind::Hidden)
        );

        Ok(())
    }

    #[test]
    fn old_listing_needs_repost() -> TestResult {
        let now = now()?;
        let mut listing = healthy_listing(now);
        listing.photo_count = 4;
        listing.published_at = clock::days_after(now, -16);

        let statuses = derive_statuses(&listing, now);

        assert_eq!(
            statuses.as_slice(),
            &[DerivedStatus {
                kind: StatusKind::NeedsRepost,
                priority: 80
            }]
        );

        Ok(())
    }

    #[test]
    fn repost_threshold_is_strict_to_the_second() -> TestResult {
        let now = now()?;
        let mut listing = healthy_listing(now);

        listing.published_at = clock::days_after(now, -14);
        assert_eq!(kinds(&derive_statuses(&listing, now)), [StatusKind::Active]);

        listing.published_at = listing
            .published_at
            .checked_sub(jiff::SignedDuration::from_secs(1))?;
        assert_eq!(
            kinds(&derive_statuses(&listing, now)),
            [StatusKind::NeedsRepost]
        );

        Ok(())
    }

    #[test]
    fn zero_photos_is_low_photos() -> TestResult {
        let now = now()?;
        let mut listing = healthy_listing(now);
        listing.photo_count = 0;

        assert_eq!(kinds(&derive_statuses(&listing, now)), [StatusKind::LowPhotos]);

        Ok(())
    }

    #[test]
    fn three_photos_is_not_low_photos() -> TestResult {
        let now = now()?;
        let mut listing = healthy_listing(now);

        listing.photo_count = 3;
        assert_eq!(kinds(&derive_statuses(&listing, now)), [StatusKind::Active]);

        listing.photo_count = 2;
        assert_eq!(kinds(&derive_statuses(&listing, now)), [StatusKind::LowPhotos]);

        Ok(())
    }

    #[test]
    fn every_condition_at_once_is_sorted() -> TestResult {
        let now = now()?;
        let mut listing = healthy_listing(now);
        listing.boost_active = true;
        listing.photo_count = 2;
        listing.is_hidden = true;
        listing.published_at = clock::days_after(now, -30);

        let statuses = derive_statuses(&listing, now);

        assert_eq!(
            kinds(&statuses),
            [
                StatusKind::Hidden,
                StatusKind::NeedsRepost,
                StatusKind::LowPhotos,
                StatusKind::BoostActive
            ]
        );
        assert!(
            statuses
                .windows(2)
                .all(|pair| matches!(pair, [a, b] if a.priority >= b.priority)),
            "statuses should be sorted by priority"
        );

        Ok(())
    }

    #[test]
    fn derivation_is_repeatable() -> TestResult {
        let now = now()?;
        let mut listing = healthy_listing(now);
        listing.is_hidden = true;
        listing.boost_active = true;

        assert_eq!(derive_statuses(&listing, now), derive_statuses(&listing, now));

        Ok(())
    }

    #[test]
    fn policy_thresholds_are_respected() -> TestResult {
        let now = now()?;
        let mut listing = healthy_listing(now);
        listing.photo_count = 4;
        listing.published_at = clock::days_after(now, -10);

        let policy = ListingPolicy {
            stale_after_days: 7,
            min_photos: 5,
            ..ListingPolicy::default()
        };

        assert_eq!(
            kinds(&derive_statuses_with(&listing, now, &policy)),
            [StatusKind::NeedsRepost, StatusKind::LowPhotos]
        );

        Ok(())
    }

    #[test]
    fn primary_status_of_empty_slice_is_none() {
        assert_eq!(primary_status(&[]), None);
    }
}
