//! Order Tabs
//!
//! Buckets orders into the dashboard's in-progress / finished / cancelled tabs.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::orders::{OrderCategory, OrderRecord};

/// Orders grouped by category, each tab keeping the input order.
#[derive(Debug, Default)]
pub struct OrderTabs<'o, 'a> {
    tabs: FxHashMap<OrderCategory, SmallVec<[&'o OrderRecord<'a>; 8]>>,
}

impl<'o, 'a> OrderTabs<'o, 'a> {
    /// Group `orders` by their current category.
    pub fn from_orders(orders: &'o [OrderRecord<'a>]) -> Self {
        let mut tabs: FxHashMap<OrderCategory, SmallVec<[&'o OrderRecord<'a>; 8]>> =
            FxHashMap::default();

        for order in orders {
            tabs.entry(order.category()).or_default().push(order);
        }

        Self { tabs }
    }

    /// Orders in a tab.
    pub fn get(&self, category: OrderCategory) -> &[&'o OrderRecord<'a>] {
        self.tabs
            .get(&category)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
    }

    /// Number of orders in a tab.
    pub fn count(&self, category: OrderCategory) -> usize {
        self.get(category).len()
    }

    /// Tabs in display order with their orders.
    pub fn iter(&self) -> impl Iterator<Item = (OrderCategory, &[&'o OrderRecord<'a>])> + '_ {
        OrderCategory::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::orders::{OrderError, OrderFees, OrderKind, OrderStatus};

    use super::*;

    fn order(id: u64, status: OrderStatus) -> Result<OrderRecord<'static>, OrderError> {
        let price = Money::from_minor(1000, EUR);
        let fees = OrderFees::from_components(
            price,
            Money::from_minor(0, EUR),
            Money::from_minor(0, EUR),
        )?;

        Ok(OrderRecord::new(id, format!("V-{id}"), OrderKind::Sale, price, fees)?.with_status(status))
    }

    fn ids(orders: &[&OrderRecord<'_>]) -> Vec<u64> {
        orders.iter().map(|order| order.id()).collect()
    }

    #[test]
    fn groups_orders_by_category() -> TestResult {
        let orders = [
            order(1, OrderStatus::Shipped)?,
            order(2, OrderStatus::Delivered)?,
            order(3, OrderStatus::CancelledBuyer)?,
            order(4, OrderStatus::WaitingLabel)?,
            order(5, OrderStatus::CancelledSystem)?,
            order(6, OrderStatus::ReturnInitiated)?,
        ];

        let tabs = OrderTabs::from_orders(&orders);

        assert_eq!(ids(tabs.get(OrderCategory::InProgress)), [1, 4, 6]);
        assert_eq!(ids(tabs.get(OrderCategory::Finished)), [2]);
        assert_eq!(ids(tabs.get(OrderCategory::Cancelled)), [3, 5]);

        Ok(())
    }

    #[test]
    fn empty_tabs_have_zero_count() -> TestResult {
        let orders = [order(1, OrderStatus::InTransit)?];

        let tabs = OrderTabs::from_orders(&orders);

        assert_eq!(tabs.count(OrderCategory::InProgress), 1);
        assert_eq!(tabs.count(OrderCategory::Finished), 0);
        assert!(tabs.get(OrderCategory::Cancelled).is_empty());

        Ok(())
    }

    #[test]
    fn iter_yields_tabs_in_display_order() {
        let tabs = OrderTabs::from_orders(&[]);

        let categories: Vec<OrderCategory> = tabs.iter().map(|(category, _)| category).collect();

        assert_eq!(categories, OrderCategory::ALL);
    }
}
