//! Custom actions for the Order actor.
//!
//! Every status change goes through an action, so it is checked and applied inside
//! the order store's own message loop.

use crate::model::{OrderStatus, ProductId};
use chrono::{DateTime, Duration, Utc};

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Payment confirmed: `NOT_PAID -> PAID`.
    Pay,
    /// Fulfilment started: `PAID -> IN_PROGRESS`.
    StartProgress,
    /// Handed over: `IN_PROGRESS -> DELIVERED`.
    Deliver,
    /// `NOT_PAID -> OVERDUE` if, at `now`, more than `grace` has passed since
    /// checkout. Returns every reserved unit to stock. Does nothing otherwise.
    ExpireIfUnpaid {
        now: DateTime<Utc>,
        grace: Duration,
    },
}

/// What an `ExpireIfUnpaid` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expiry {
    /// Still unpaid within the grace period, or no longer unpaid at all.
    NotDue,
    /// Marked overdue. `restocked` units went back to stock during this call;
    /// `skipped` products no longer exist.
    Expired {
        restocked: u64,
        skipped: Vec<ProductId>,
    },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderActionResult {
    Pay(OrderStatus),
    StartProgress(OrderStatus),
    Deliver(OrderStatus),
    ExpireIfUnpaid(Expiry),
}
