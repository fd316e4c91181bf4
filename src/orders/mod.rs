//! Orders
//!
//! Sales and purchases recorded by the seller panel.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::debug;

pub mod lifecycle;
pub mod tabs;

pub use lifecycle::{OrderCategory, OrderStatus, classify};
pub use tabs::OrderTabs;

/// Errors related to order construction or lifecycle changes.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Status label is not one of the known lifecycle states.
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    /// The requested status change is not in the transition table.
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Marketplace order id
        order_id: String,
        /// Current status
        from: OrderStatus,
        /// Requested status
        to: OrderStatus,
    },

    /// A bundle order was given no items.
    #[error("Order {0} is a bundle but has no bundle items")]
    EmptyBundle(String),

    /// A money field's currency differs from the order price currency (field, found, expected).
    #[error("Order field {0} has currency {1}, but order has currency {2}")]
    CurrencyMismatch(&'static str, &'static str, &'static str),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Direction of an order from the seller's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderKind {
    /// The seller sold an item.
    Sale,

    /// The seller bought an item.
    Purchase,
}

/// Where an order was recorded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderSource {
    /// Imported from the Vinted marketplace.
    Vinted,

    /// Entered by hand.
    Manual,
}

/// Price breakdown of an order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderFees<'a> {
    /// Item price
    pub item_price: Money<'a, Currency>,

    /// Shipping fee
    pub shipping_fee: Money<'a, Currency>,

    /// Marketplace service fee
    pub service_fee: Money<'a, Currency>,

    /// Total charged
    pub total: Money<'a, Currency>,
}

impl<'a> OrderFees<'a> {
    /// Builds a breakdown whose total is the sum of its components.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the components have different currencies.
    pub fn from_components(
        item_price: Money<'a, Currency>,
        shipping_fee: Money<'a, Currency>,
        service_fee: Money<'a, Currency>,
    ) -> Result<Self, MoneyError> {
        let total = item_price.add(shipping_fee)?.add(service_fee)?;

        Ok(Self {
            item_price,
            shipping_fee,
            service_fee,
            total,
        })
    }

    /// Sum of item price, shipping fee and service fee.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the components have different currencies.
    pub fn computed_total(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.item_price.add(self.shipping_fee)?.add(self.service_fee)
    }

    /// Whether the recorded total equals the sum of the components.
    pub fn is_balanced(&self) -> bool {
        self.computed_total()
            .is_ok_and(|computed| computed == self.total)
    }

    fn fields(&self) -> [(&'static str, &Money<'a, Currency>); 4] {
        [
            ("fees.item_price", &self.item_price),
            ("fees.shipping_fee", &self.shipping_fee),
            ("fees.service_fee", &self.service_fee),
            ("fees.total", &self.total),
        ]
    }
}

/// One item of a bundle order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleItem {
    /// Item title
    pub title: String,

    /// Stock keeping unit
    pub sku: String,

    /// Thumbnail URL
    pub thumbnail: Option<String>,
}

/// A sale or purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderRecord<'a> {
    id: u64,
    order_id: String,
    kind: OrderKind,
    source: Option<OrderSource>,
    status: OrderStatus,
    price: Money<'a, Currency>,
    fees: OrderFees<'a>,
    bundle: Option<Vec<BundleItem>>,
}

impl<'a> OrderRecord<'a> {
    /// Creates a single-item order in the initial `waiting_label` state.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::CurrencyMismatch`] if any fee is in a different currency from
    /// `price`.
    pub fn new(
        id: u64,
        order_id: impl Into<String>,
        kind: OrderKind,
        price: Money<'a, Currency>,
        fees: OrderFees<'a>,
    ) -> Result<Self, OrderError> {
        let currency = price.currency();

        fees.fields().into_iter().try_for_each(|(field, money)| {
            if money.currency() == currency {
                Ok(())
            } else {
                Err(OrderError::CurrencyMismatch(
                    field,
                    money.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Self {
            id,
            order_id: order_id.into(),
            kind,
            source: None,
            status: OrderStatus::default(),
            price,
            fees,
            bundle: None,
        })
    }

    /// Sets where the order came from.
    #[must_use]
    pub fn with_source(mut self, source: OrderSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the current status without checking the transition table, e.g. when loading a
    /// persisted record.
    #[must_use]
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// Marks the order as a bundle of `items`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyBundle`] if `items` is empty.
    pub fn with_bundle(mut self, items: impl Into<Vec<BundleItem>>) -> Result<Self, OrderError> {
        let items = items.into();

        if items.is_empty() {
            return Err(OrderError::EmptyBundle(self.order_id));
        }

        self.bundle = Some(items);

        Ok(self)
    }

    /// Move the order to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidTransition`] if `next` is not reachable in one step from
    /// the current status. The status is left unchanged.
    pub fn advance(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                order_id: self.order_id.clone(),
                from: self.status,
                to: next,
            });
        }

        debug!(
            order_id = %self.order_id,
            from = %self.status,
            to = %next,
            "advanced order status"
        );

        self.status = next;

        Ok(())
    }

    /// Internal id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Marketplace order id
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Sale or purchase
    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    /// Where the order came from, if known
    pub fn source(&self) -> Option<OrderSource> {
        self.source
    }

    /// Current status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Dashboard bucket of the current status
    pub fn category(&self) -> OrderCategory {
        self.status.category()
    }

    /// Order price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Price breakdown
    pub fn fees(&self) -> &OrderFees<'a> {
        &self.fees
    }

    /// Whether the order is a bundle of several items.
    pub fn is_bundle(&self) -> bool {
        self.bundle.is_some()
    }

    /// Bundle items in listing order; empty for single-item orders.
    pub fn bundle_items(&self) -> &[BundleItem] {
        self.bundle.as_deref().unwrap_or_default()
    }
}
