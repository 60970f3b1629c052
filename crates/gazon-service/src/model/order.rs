/// Represents a customer order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](gazon_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](gazon_actor::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`]), i.e. checkout
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
use crate::model::{ProductId, UserId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Where an order is in its lifecycle.
///
/// ```text
/// NOT_PAID --pay--> PAID --start--> IN_PROGRESS --deliver--> DELIVERED
///     |
///     +--sweep--> OVERDUE
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    NotPaid,
    Paid,
    InProgress,
    Delivered,
    Overdue,
}

impl OrderStatus {
    /// Whether `self -> next` is an allowed transition.
    pub fn can_become(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (NotPaid, Paid) | (NotPaid, Overdue) | (Paid, InProgress) | (InProgress, Delivered)
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::NotPaid => "NOT_PAID",
            OrderStatus::Paid => "PAID",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Overdue => "OVERDUE",
        };
        f.write_str(name)
    }
}

/// A line item: `quantity` units of a product, reserved while the order is unpaid.
///
/// `returned` is set once expiry has given this line's units back to stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedProduct {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default)]
    pub returned: bool,
}

impl SelectedProduct {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
            returned: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<SelectedProduct>,
}

/// Payload for checkout.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub items: Vec<SelectedProduct>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new, unpaid order.
    pub fn new(
        id: OrderId,
        user_id: UserId,
        items: Vec<SelectedProduct>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            created_at,
            status: OrderStatus::NotPaid,
            items,
        }
    }

    /// True while the order is unpaid and strictly more than `grace` has passed
    /// since checkout.
    pub fn is_payment_overdue(&self, now: DateTime<Utc>, grace: Duration) -> bool {
        self.status == OrderStatus::NotPaid && now - self.created_at > grace
    }

    /// Units this order still holds, i.e. those not yet returned to stock.
    pub fn reserved_units(&self) -> u64 {
        self.items
            .iter()
            .filter(|item| !item.returned)
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// True once an expiry has returned at least one line to stock.
    pub fn expiry_started(&self) -> bool {
        self.items.iter().any(|item| item.returned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_at(created_at: DateTime<Utc>) -> Order {
        Order::new(OrderId(1), UserId(1), vec![], created_at)
    }

    #[test]
    fn test_overdue_threshold_is_strict() {
        let now = Utc::now();
        let grace = Duration::minutes(15);

        assert!(!order_at(now - Duration::minutes(5)).is_payment_overdue(now, grace));
        assert!(!order_at(now - grace).is_payment_overdue(now, grace));
        assert!(order_at(now - grace - Duration::seconds(1)).is_payment_overdue(now, grace));
    }

    #[test]
    fn test_only_unpaid_orders_become_overdue() {
        let now = Utc::now();
        let mut order = order_at(now - Duration::days(1));
        order.status = OrderStatus::Paid;
        assert!(!order.is_payment_overdue(now, Duration::minutes(15)));
    }

    #[test]
    fn test_status_transitions() {
        use OrderStatus::*;
        assert!(NotPaid.can_become(Paid));
        assert!(NotPaid.can_become(Overdue));
        assert!(Paid.can_become(InProgress));
        assert!(InProgress.can_become(Delivered));

        assert!(!Paid.can_become(Overdue));
        assert!(!Overdue.can_become(Paid));
        assert!(!Delivered.can_become(InProgress));
        assert!(!NotPaid.can_become(NotPaid));
    }

    #[test]
    fn test_returned_lines_no_longer_count_as_reserved() {
        let mut order = Order::new(
            OrderId(1),
            UserId(1),
            vec![
                SelectedProduct::new(ProductId(1), 2),
                SelectedProduct::new(ProductId(2), 3),
            ],
            Utc::now(),
        );
        assert_eq!(order.reserved_units(), 5);
        assert!(!order.expiry_started());

        order.items[0].returned = true;
        assert_eq!(order.reserved_units(), 3);
        assert!(order.expiry_started());
    }

    #[test]
    fn test_line_without_progress_field_deserializes() {
        let item: SelectedProduct =
            serde_json::from_str(r#"{"product_id": 4, "quantity": 2}"#).unwrap();
        assert_eq!(item, SelectedProduct::new(ProductId(4), 2));
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&OrderStatus::NotPaid).unwrap();
        assert_eq!(json, "\"NOT_PAID\"");
        assert_eq!(OrderStatus::InProgress.to_string(), "IN_PROGRESS");
    }
}
