//! Seller Panel prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    clock::days_since,
    insights::{
        InsightData, InsightKind, ListingInsight, Severity, generate_insights,
        generate_insights_with, most_severe,
    },
    listings::{ListingAnalytics, ListingRecord, ListingState},
    orders::{
        BundleItem, OrderCategory, OrderError, OrderFees, OrderKind, OrderRecord, OrderSource,
        OrderStatus, OrderTabs, classify,
    },
    policy::{ListingPolicy, PolicyError},
    statuses::{
        DerivedStatus, DerivedStatuses, StatusKind, derive_statuses, derive_statuses_with,
        primary_status,
    },
};
