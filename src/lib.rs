//! Seller Panel
//!
//! Seller Panel computes what a reseller sees about their marketplace listings and orders:
//! display status tags, actionable insights and dashboard buckets. Every computation is
//! pure and takes the current time as an argument.

pub mod clock;
pub mod fixtures;
pub mod insights;
pub mod listings;
pub mod orders;
pub mod policy;
pub mod prelude;
pub mod report;
pub mod statuses;
