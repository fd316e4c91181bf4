//! Report
//!
//! Console tables for the seller panel: one row per listing with its statuses and insights,
//! and the orders split into dashboard tabs.

use std::io;

use jiff::Timestamp;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    clock,
    insights::{ListingInsight, Severity, generate_insights_with, most_severe},
    listings::{ListingAnalytics, ListingRecord},
    orders::{OrderRecord, OrderTabs},
    policy::ListingPolicy,
    statuses::{derive_statuses_with, primary_status},
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Write the listings table.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_listing_report(
    mut out: impl io::Write,
    listings: &[(ListingRecord<'_>, ListingAnalytics<'_>)],
    now: Timestamp,
    policy: &ListingPolicy,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record([
        "SKU", "Price", "Age", "Views", "Status", "All Statuses", "Insights",
    ]);

    let mut severity_colors = Vec::new();

    for (row, (listing, analytics)) in listings.iter().enumerate() {
        let statuses = derive_statuses_with(listing, now, policy);
        let insights = generate_insights_with(listing, analytics, now, policy);

        let primary = primary_status(&statuses)
            .map(|status| status.kind.to_string())
            .unwrap_or_default();

        let all = statuses
            .iter()
            .map(|status| format!("{} ({})", status.kind, status.priority))
            .collect::<Vec<_>>()
            .join("\n");

        builder.push_record([
            listing.sku.clone(),
            listing.price.to_string(),
            format!("{}d", clock::days_since(listing.published_at, now)),
            analytics.views.to_string(),
            primary,
            all,
            insight_lines(&insights),
        ]);

        if let Some(color) = most_severe(&insights).and_then(severity_color) {
            severity_colors.push((row + 1, color));
        }
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..4), Alignment::right());

    for (row, color) in severity_colors {
        table.modify((row, 6), color);
    }

    writeln!(out, "\n{table}")?;

    Ok(())
}

/// Write the orders table, grouped into dashboard tabs.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_order_report(
    mut out: impl io::Write,
    orders: &[OrderRecord<'_>],
) -> Result<(), ReportError> {
    let tabs = OrderTabs::from_orders(orders);

    for (category, tab_orders) in tabs.iter() {
        writeln!(out, "\n{category} ({})", tab_orders.len())?;

        if tab_orders.is_empty() {
            continue;
        }

        let mut builder = Builder::default();

        builder.push_record(["Order", "Type", "Status", "Price", "Total", "Items"]);

        for order in tab_orders {
            let items = if order.is_bundle() {
                order
                    .bundle_items()
                    .iter()
                    .map(|item| item.sku.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            } else {
                String::from("-")
            };

            builder.push_record([
                order.order_id().to_string(),
                format!("{:?}", order.kind()),
                order.status().to_string(),
                order.price().to_string(),
                order.fees().total.to_string(),
                items,
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..5), Alignment::right());

        writeln!(out, "{table}")?;
    }

    Ok(())
}

fn insight_lines(insights: &[ListingInsight]) -> String {
    if insights.is_empty() {
        return String::from("-");
    }

    insights
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn severity_color(severity: Severity) -> Option<Color> {
    match severity {
        Severity::Info => None,
        Severity::Warning => Some(Color::FG_YELLOW),
        Severity::Critical => Some(Color::FG_RED),
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::orders::{OrderFees, OrderKind, OrderStatus};

    use super::*;

    #[test]
    fn listing_report_shows_statuses_and_insights() -> TestResult {
        let now: Timestamp = "2025-06-30T12:00:00Z".parse()?;
        let mut listing = ListingRecord::new(
            1,
            "JKT-001",
            Money::from_minor(4500, EUR),
            clock::days_after(now, -16),
        );
        listing.is_hidden = true;

        let listings = [(listing, ListingAnalytics::empty(EUR))];
        let mut out = Vec::new();

        write_listing_report(&mut out, &listings, now, &ListingPolicy::default())?;

        let report = String::from_utf8(out)?;

        assert!(report.contains("JKT-001"), "missing sku in:\n{report}");
        assert!(report.contains("16d"), "missing age in:\n{report}");
        assert!(report.contains("needsRepost (80)"), "missing status in:\n{report}");
        assert!(report.contains("oldListing (16 days)"), "missing insight in:\n{report}");

        Ok(())
    }

    #[test]
    fn order_report_lists_every_tab() -> TestResult {
        let price = Money::from_minor(2000, EUR);
        let fees = OrderFees::from_components(
            price,
            Money::from_minor(399, EUR),
            Money::from_minor(0, EUR),
        )?;
        let orders = [
            OrderRecord::new(1, "V-1", OrderKind::Sale, price, fees)?
                .with_status(OrderStatus::Shipped),
            OrderRecord::new(2, "V-2", OrderKind::Sale, price, fees)?
                .with_status(OrderStatus::CancelledSystem),
        ];
        let mut out = Vec::new();

        write_order_report(&mut out, &orders)?;

        let report = String::from_utf8(out)?;

        assert!(report.contains("in_progress (1)"), "missing tab in:\n{report}");
        assert!(report.contains("finished (0)"), "missing tab in:\n{report}");
        assert!(report.contains("cancelled (1)"), "missing tab in:\n{report}");
        assert!(report.contains("cancelled_system"), "missing status in:\n{report}");

        Ok(())
    }
}
