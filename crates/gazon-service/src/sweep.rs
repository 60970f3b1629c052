//! # Overdue Sweep
//!
//! Background task that reclaims stock held by orders nobody paid for.
//!
//! Each pass lists the unpaid orders through the order store's status index and
//! sends `ExpireIfUnpaid` to every one older than the payment timeout. The order
//! store re-checks the status and age while handling that message, so an order
//! paid between the listing and the expiry is left alone, and a second pass (or a
//! second sweep) finds nothing left to restock.
//!
//! One order failing does not stop the pass; it is logged, reported in
//! [`SweepReport::failures`] and retried on the next tick. If the unpaid orders
//! cannot be listed at all, the pass is abandoned with [`SweepError::Query`].

use crate::clients::OrderClient;
use crate::config::{ConfigError, SweepConfig};
use crate::model::OrderId;
use crate::order_actor::{Expiry, OrderError};
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, instrument, warn};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("could not list unpaid orders: {0}")]
    Query(OrderError),
}

/// Outcome of one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    /// Unpaid orders looked at.
    pub examined: usize,
    /// Orders moved to `OVERDUE`.
    pub expired: usize,
    /// Orders still within their payment window (or paid meanwhile).
    pub not_due: usize,
    /// Units returned to stock.
    pub restocked_units: u64,
    /// Line items whose product no longer exists.
    pub skipped_items: usize,
    pub failures: Vec<(OrderId, OrderError)>,
}

pub struct OverdueSweep {
    orders: OrderClient,
    poll_interval: Duration,
    grace: chrono::Duration,
}

impl OverdueSweep {
    pub fn new(orders: OrderClient, config: &SweepConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            orders,
            poll_interval: config.poll_interval,
            grace: config.grace()?,
        })
    }

    /// Runs one pass as if the current time were `now`.
    #[instrument(name = "sweep", skip(self))]
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<SweepReport, SweepError> {
        let candidates = self
            .orders
            .find_not_paid()
            .await
            .map_err(SweepError::Query)?;

        let mut report = SweepReport {
            examined: candidates.len(),
            ..Default::default()
        };

        for order in candidates {
            if !order.is_payment_overdue(now, self.grace) {
                report.not_due += 1;
                continue;
            }
            match self.orders.expire_if_unpaid(order.id, now, self.grace).await {
                Ok(Expiry::Expired { restocked, skipped }) => {
                    report.expired += 1;
                    report.restocked_units += restocked;
                    report.skipped_items += skipped.len();
                }
                Ok(Expiry::NotDue) => report.not_due += 1,
                Err(e) => {
                    warn!(order_id = %order.id, error = %e, "Could not expire order");
                    if let OrderError::RestockFailed { restocked, .. } = &e {
                        report.restocked_units += restocked;
                    }
                    report.failures.push((order.id, e));
                }
            }
        }

        info!(
            examined = report.examined,
            expired = report.expired,
            restocked_units = report.restocked_units,
            failures = report.failures.len(),
            "Sweep finished"
        );
        Ok(report)
    }

    /// Sweeps every `poll_interval` until `shutdown` turns true or its sender is
    /// dropped. The first pass runs immediately; ticks missed during a slow pass
    /// are skipped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(poll_interval = ?self.poll_interval, grace = %self.grace, "Overdue sweep started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep_at(Utc::now()).await {
                        error!(error = %e, "Sweep pass failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Overdue sweep shutting down");
                        break;
                    }
                }
            }
        }
    }
}
