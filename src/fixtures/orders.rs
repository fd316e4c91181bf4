//! Order Fixtures

use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_price},
    orders::{BundleItem, OrderError, OrderFees, OrderKind, OrderRecord, OrderSource, OrderStatus},
};

/// Wrapper for orders in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Orders, in display order
    pub orders: Vec<OrderFixture>,
}

/// Order fixture from YAML
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Internal id
    pub id: u64,

    /// Marketplace order id
    pub order_id: String,

    /// "sale" or "purchase"
    #[serde(rename = "type")]
    pub kind: String,

    /// "vinted" or "manual"
    #[serde(default)]
    pub source: Option<String>,

    /// Lifecycle status label
    #[serde(default)]
    pub status: Option<String>,

    /// Order price (e.g., "20.00 EUR")
    pub price: String,

    /// Fee breakdown
    pub fees: FeesFixture,

    /// Bundle items; present only for bundle orders
    #[serde(default)]
    pub bundle_items: Option<Vec<BundleItemFixture>>,
}

/// Fee breakdown fixture from YAML
#[derive(Debug, Deserialize)]
pub struct FeesFixture {
    /// Item price
    pub item_price: String,

    /// Shipping fee
    pub shipping_fee: String,

    /// Service fee
    pub service_fee: String,

    /// Total; computed from the components when absent
    #[serde(default)]
    pub total: Option<String>,
}

/// Bundle item fixture from YAML
#[derive(Debug, Deserialize)]
pub struct BundleItemFixture {
    /// Title
    pub title: String,

    /// Stock keeping unit
    pub sku: String,

    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl TryFrom<FeesFixture> for OrderFees<'static> {
    type Error = FixtureError;

    fn try_from(fixture: FeesFixture) -> Result<Self, Self::Error> {
        let fees = OrderFees::from_components(
            parse_price(&fixture.item_price)?,
            parse_price(&fixture.shipping_fee)?,
            parse_price(&fixture.service_fee)?,
        )
        .map_err(OrderError::from)?;

        match fixture.total {
            Some(total) => Ok(OrderFees {
                total: parse_price(&total)?,
                ..fees
            }),
            None => Ok(fees),
        }
    }
}

impl TryFrom<OrderFixture> for OrderRecord<'static> {
    type Error = FixtureError;

    fn try_from(fixture: OrderFixture) -> Result<Self, Self::Error> {
        let kind = match fixture.kind.as_str() {
            "sale" => OrderKind::Sale,
            "purchase" => OrderKind::Purchase,
            other => return Err(FixtureError::UnknownOrderKind(other.to_string())),
        };

        let mut order = OrderRecord::new(
            fixture.id,
            fixture.order_id,
            kind,
            parse_price(&fixture.price)?,
            fixture.fees.try_into()?,
        )?;

        if let Some(source) = fixture.source {
            order = order.with_source(match source.as_str() {
                "vinted" => OrderSource::Vinted,
                "manual" => OrderSource::Manual,
                other => return Err(FixtureError::UnknownOrderSource(other.to_string())),
            });
        }

        if let Some(status) = fixture.status {
            order = order.with_status(status.parse::<OrderStatus>()?);
        }

        if let Some(items) = fixture.bundle_items {
            order = order.with_bundle(
                items
                    .into_iter()
                    .map(|item| BundleItem {
                        title: item.title,
                        sku: item.sku,
                        thumbnail: item.thumbnail,
                    })
                    .collect::<Vec<_>>(),
            )?;
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::orders::OrderCategory;

    use super::*;

    fn parse(yaml: &str) -> Result<OrderRecord<'static>, FixtureError> {
        let fixture: OrderFixture = serde_norway::from_str(yaml)?;

        OrderRecord::try_from(fixture)
    }

    #[test]
    fn order_with_defaults() -> TestResult {
        let order = parse(
            r#"
id: 1
order_id: V-1
type: sale
price: "20.00 EUR"
fees:
  item_price: "20.00 EUR"
  shipping_fee: "3.99 EUR"
  service_fee: "1.70 EUR"
"#,
        )?;

        assert_eq!(order.status(), OrderStatus::WaitingLabel);
        assert_eq!(order.source(), None);
        assert_eq!(order.fees().total, Money::from_minor(2569, EUR));
        assert!(!order.is_bundle());

        Ok(())
    }

    #[test]
    fn bundle_order_with_status_and_source() -> TestResult {
        let order = parse(
            r#"
id: 2
order_id: V-2
type: purchase
source: manual
status: cancelled_buyer
price: "30.00 EUR"
fees:
  item_price: "30.00 EUR"
  shipping_fee: "0 EUR"
  service_fee: "0 EUR"
  total: "29.00 EUR"
bundle_items:
  - title: Scarf
    sku: SC-1
  - title: Hat
    sku: HT-1
    thumbnail: https://img.example/ht-1.jpg
"#,
        )?;

        assert_eq!(order.kind(), OrderKind::Purchase);
        assert_eq!(order.source(), Some(OrderSource::Manual));
        assert_eq!(order.category(), OrderCategory::Cancelled);
        assert!(!order.fees().is_balanced());
        assert_eq!(order.bundle_items().len(), 2);

        Ok(())
    }

    #[test]
    fn empty_bundle_fails() -> TestResult {
        let fixture: OrderFixture = serde_norway::from_str(
            r#"
id: 3
order_id: V-3
type: sale
price: "5 EUR"
fees: { item_price: "5 EUR", shipping_fee: "0 EUR", service_fee: "0 EUR" }
bundle_items: []
"#,
        )?;

        let result = OrderRecord::try_from(fixture);

        assert!(
            matches!(result, Err(FixtureError::Order(OrderError::EmptyBundle(_)))),
            "expected EmptyBundle, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn unknown_status_fails() -> TestResult {
        let fixture: OrderFixture = serde_norway::from_str(
            r#"
id: 4
order_id: V-4
type: sale
status: lost
price: "5 EUR"
fees: { item_price: "5 EUR", shipping_fee: "0 EUR", service_fee: "0 EUR" }
"#,
        )?;

        let result = OrderRecord::try_from(fixture);

        assert!(
            matches!(result, Err(FixtureError::Order(OrderError::UnknownStatus(_)))),
            "expected UnknownStatus, got {result:?}"
        );

        Ok(())
    }
}
