//! Order Lifecycle
//!
//! Shipping pipeline of a reseller order and the dashboard bucket each state falls in.
//!
//! ```text
//! waiting_label -> label_sent -> shipped -> in_transit -> delivered -> return_initiated
//! ```
//!
//! Every in-progress state can also move to `cancelled_{buyer,seller,system}`.

use std::{fmt, str::FromStr};

use crate::orders::OrderError;

/// Dashboard bucket of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderCategory {
    /// Still moving through the pipeline.
    InProgress,

    /// Delivered.
    Finished,

    /// Cancelled by anyone.
    Cancelled,
}

impl OrderCategory {
    /// Every category, in tab order.
    pub const ALL: [OrderCategory; 3] = [
        OrderCategory::InProgress,
        OrderCategory::Finished,
        OrderCategory::Cancelled,
    ];

    /// Machine-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderCategory::InProgress => "in_progress",
            OrderCategory::Finished => "finished",
            OrderCategory::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket a free-form status label.
///
/// `"delivered"` is finished, anything starting with `"cancelled"` is cancelled, and every
/// other label (including ones this crate has never heard of) is in progress. Use
/// [`OrderStatus`] for labels that parse; this exists for raw labels coming off older
/// records.
pub fn classify(status: &str) -> OrderCategory {
    if status == "delivered" {
        OrderCategory::Finished
    } else if status.starts_with("cancelled") {
        OrderCategory::Cancelled
    } else {
        OrderCategory::InProgress
    }
}

/// Lifecycle state of an order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Sold, waiting for the shipping label. Initial state.
    #[default]
    WaitingLabel,

    /// Label sent to the seller.
    LabelSent,

    /// Handed to the carrier.
    Shipped,

    /// Moving through the carrier network.
    InTransit,

    /// Delivered to the buyer.
    Delivered,

    /// Buyer started a return after delivery.
    ReturnInitiated,

    /// Cancelled by the buyer.
    CancelledBuyer,

    /// Cancelled by the seller.
    CancelledSeller,

    /// Cancelled by the marketplace.
    CancelledSystem,
}

impl OrderStatus {
    /// Every status, pipeline order first.
    pub const ALL: [OrderStatus; 9] = [
        OrderStatus::WaitingLabel,
        OrderStatus::LabelSent,
        OrderStatus::Shipped,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
        OrderStatus::ReturnInitiated,
        OrderStatus::CancelledBuyer,
        OrderStatus::CancelledSeller,
        OrderStatus::CancelledSystem,
    ];

    const CANCELLATIONS: &'static [OrderStatus] = &[
        OrderStatus::CancelledBuyer,
        OrderStatus::CancelledSeller,
        OrderStatus::CancelledSystem,
    ];

    /// The persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::WaitingLabel => "waiting_label",
            OrderStatus::LabelSent => "label_sent",
            OrderStatus::Shipped => "shipped",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::ReturnInitiated => "return_initiated",
            OrderStatus::CancelledBuyer => "cancelled_buyer",
            OrderStatus::CancelledSeller => "cancelled_seller",
            OrderStatus::CancelledSystem => "cancelled_system",
        }
    }

    /// Dashboard bucket.
    #[must_use]
    pub const fn category(self) -> OrderCategory {
        match self {
            OrderStatus::Delivered => OrderCategory::Finished,
            OrderStatus::CancelledBuyer
            | OrderStatus::CancelledSeller
            | OrderStatus::CancelledSystem => OrderCategory::Cancelled,
            OrderStatus::WaitingLabel
            | OrderStatus::LabelSent
            | OrderStatus::Shipped
            | OrderStatus::InTransit
            | OrderStatus::ReturnInitiated => OrderCategory::InProgress,
        }
    }

    /// Whether the order has left the shipping pipeline (delivered or cancelled).
    ///
    /// A delivered order can still start a return; see [`OrderStatus::next_states`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self.category(), OrderCategory::InProgress)
    }

    /// States reachable in one step from this one.
    #[must_use]
    pub fn next_states(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::WaitingLabel => &[
                OrderStatus::LabelSent,
                OrderStatus::CancelledBuyer,
                OrderStatus::CancelledSeller,
                OrderStatus::CancelledSystem,
            ],
            OrderStatus::LabelSent => &[
                OrderStatus::Shipped,
                OrderStatus::CancelledBuyer,
                OrderStatus::CancelledSeller,
                OrderStatus::CancelledSystem,
            ],
            OrderStatus::Shipped => &[
                OrderStatus::InTransit,
                OrderStatus::CancelledBuyer,
                OrderStatus::CancelledSeller,
                OrderStatus::CancelledSystem,
            ],
            OrderStatus::InTransit => &[
                OrderStatus::Delivered,
                OrderStatus::CancelledBuyer,
                OrderStatus::CancelledSeller,
                OrderStatus::CancelledSystem,
            ],
            OrderStatus::Delivered => &[OrderStatus::ReturnInitiated],
            OrderStatus::ReturnInitiated => &[
                OrderStatus::CancelledBuyer,
                OrderStatus::CancelledSeller,
                OrderStatus::CancelledSystem,
            ],
            OrderStatus::CancelledBuyer
            | OrderStatus::CancelledSeller
            | OrderStatus::CancelledSystem => &[],
        }
    }

    /// Whether `next` is a valid single step from this state.
    #[must_use]
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self.next_states().contains(&next)
    }

    /// Whether this is one of the cancelled states.
    #[must_use]
    pub fn is_cancelled(self) -> bool {
        Self::CANCELLATIONS.contains(&self)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| OrderError::UnknownStatus(s.to_string()))
    }
}
