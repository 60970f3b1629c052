use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::config::{ConfigError, GazonConfig};
use crate::search::ProductSearch;
use crate::sweep::OverdueSweep;
use crate::{order_actor, product_actor, user_actor};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::info;

/// The running Gazon backend: three stores, product search and the overdue sweep.
pub struct GazonSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub search: ProductSearch,
    shutdown: watch::Sender<bool>,
    sweep_handle: Option<JoinHandle<()>>,
    handles: Vec<JoinHandle<()>>,
}

impl GazonSystem {
    /// Creates the stores, wires the order store to the other two, and starts the
    /// sweep if it is enabled. Must be called inside a Tokio runtime.
    pub fn start(config: GazonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let capacity = config.channel_capacity;

        // 1. Create actors (no dependencies yet)
        let (user_actor, user_client) = user_actor::new(capacity);
        let (product_actor, product_client) = product_actor::new(capacity);
        let (order_actor, order_client) = order_actor::new(capacity);

        // 2. Start actors with their dependencies injected
        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(order_actor.run((user_client.clone(), product_client.clone()))),
        ];

        // 3. Background work
        let (shutdown, shutdown_rx) = watch::channel(false);
        let sweep_handle = if config.sweep.enabled {
            let sweep = OverdueSweep::new(order_client.clone(), &config.sweep)?;
            Some(tokio::spawn(sweep.run(shutdown_rx)))
        } else {
            info!("Overdue sweep disabled");
            None
        };

        let search = ProductSearch::with_edit_distance(product_client.clone());
        info!(capacity, sweep = config.sweep.enabled, "Gazon system started");

        Ok(Self {
            user_client,
            product_client,
            order_client,
            search,
            shutdown,
            sweep_handle,
            handles,
        })
    }

    /// Stops the sweep, then lets every store drain and exit.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        let Self {
            user_client,
            product_client,
            order_client,
            search,
            shutdown,
            sweep_handle,
            handles,
        } = self;

        info!("Shutting down Gazon system");
        // The sweep may already have stopped, in which case nobody is listening.
        let _ = shutdown.send(true);
        if let Some(handle) = sweep_handle {
            handle.await?;
        }

        // The order store holds the other clients in its context, so the user and
        // product stores stop once the order store has.
        drop(search);
        drop(order_client);
        drop(user_client);
        drop(product_client);
        for handle in handles {
            handle.await?;
        }
        info!("All actors stopped");
        Ok(())
    }
}
