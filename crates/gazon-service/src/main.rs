//! # Gazon demo
//!
//! Starts the backend from `GAZON_*` environment settings and walks through one
//! shopping session:
//! 1. Register an admin and a customer, and check the admin's role.
//! 2. Stock the catalog and search it with a typo.
//! 3. Check out twice, pay for one order and let the sweep expire the other.
//! 4. Shut down.

use chrono::{Duration, Utc};
use gazon_actor::tracing::setup_tracing;
use gazon_actor::ActorClient;
use gazon_service::config::GazonConfig;
use gazon_service::lifecycle::GazonSystem;
use gazon_service::model::{ProductCreate, Role, SelectedProduct, UserCreate};
use gazon_service::sweep::OverdueSweep;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = GazonConfig::from_env().map_err(|e| e.to_string())?;
    let sweep_config = config.sweep.clone();
    info!(?config, "Starting Gazon");

    let system = GazonSystem::start(config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("registration");
    let (admin_id, customer_id) = async {
        let admin = system
            .user_client
            .create_user(UserCreate {
                name: "Ada".to_string(),
                email: "ada@gazon.io".to_string(),
                role: Role::Admin,
            })
            .await?;
        let customer = system
            .user_client
            .create_user(UserCreate {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                role: Role::Customer,
            })
            .await?;
        system.user_client.require_admin(admin).await?;
        Ok::<_, gazon_service::user_actor::UserError>((admin, customer))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;
    info!(%admin_id, %customer_id, "Users registered");

    let keyboard = system
        .product_client
        .create_product(ProductCreate {
            name: "Mechanical Keyboard".to_string(),
            price: 89.0,
            stock: 10,
        })
        .await
        .map_err(|e| e.to_string())?;
    let mug = system
        .product_client
        .create_product(ProductCreate {
            name: "Coffee Mug".to_string(),
            price: 7.5,
            stock: 40,
        })
        .await
        .map_err(|e| e.to_string())?;

    let hits = system
        .search
        .search("keybaord")
        .await
        .map_err(|e| e.to_string())?;
    info!(hits = hits.len(), "Searched for \"keybaord\"");

    let span = tracing::info_span!("checkout");
    let orders = async {
        let paid = system
            .order_client
            .checkout(customer_id, vec![SelectedProduct::new(keyboard, 1)])
            .await?;
        system.order_client.pay(paid).await?;

        let abandoned = system
            .order_client
            .checkout(
                customer_id,
                vec![SelectedProduct::new(keyboard, 2), SelectedProduct::new(mug, 3)],
            )
            .await?;
        Ok::<_, gazon_service::order_actor::OrderError>((paid, abandoned))
    }
    .instrument(span)
    .await;

    match orders {
        Ok((paid, abandoned)) => info!(%paid, %abandoned, "Orders placed"),
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    // Pretend the payment window has passed for the abandoned order.
    let sweep = OverdueSweep::new(system.order_client.clone(), &sweep_config)
        .map_err(|e| e.to_string())?;
    let later = Utc::now() + Duration::minutes(20);
    match sweep.sweep_at(later).await {
        Ok(report) => info!(
            expired = report.expired,
            restocked_units = report.restocked_units,
            "Sweep report"
        ),
        Err(e) => error!(error = %e, "Sweep failed"),
    }

    if let Ok(Some(product)) = system.product_client.get(keyboard).await {
        info!(product_id = %keyboard, stock = product.stock, "Keyboard stock after sweep");
    }
    drop(sweep);

    system.shutdown().await.map_err(|e| e.to_string())?;
    info!("Gazon stopped");
    Ok(())
}
