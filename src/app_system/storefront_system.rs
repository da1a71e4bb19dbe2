use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::{AdminConsole, Session};
use crate::actor_framework::ResourceActor;
use crate::catalog::{seed_if_absent, MenuIdGenerator};
use crate::clients::{CatalogClient, CouponClient, OrderClient};
use crate::config::StorefrontConfig;
use crate::coupons::coupon_id;
use crate::domain::{Coupon, CouponCreate, MenuItem, MenuItemDraft, Order, OrderCreate};
use crate::orders::new_order_id;
use crate::storage::{StoreAdapter, StoreError};

/// Owns the three collection actors and hands out sessions and admin consoles.
pub struct StorefrontSystem {
    pub catalog: CatalogClient,
    pub coupons: CouponClient,
    pub orders: OrderClient,
    store: StoreAdapter,
    handles: Vec<JoinHandle<()>>,
}

impl StorefrontSystem {
    pub async fn start(config: &StorefrontConfig) -> Result<Self, StoreError> {
        let store = config.open_store().await?;
        Self::with_store(store, config.channel_buffer).await
    }

    /// Seeds the menu if the store has none, then spawns one actor per collection.
    #[instrument(skip(store), fields(namespace = %store.namespace()))]
    pub async fn with_store(store: StoreAdapter, buffer_size: usize) -> Result<Self, StoreError> {
        let buffer_size = buffer_size.max(1);
        seed_if_absent(&store).await?;

        // 1. Menu
        let menu_ids = MenuIdGenerator::new();
        let (menu_actor, menu_client) = ResourceActor::<MenuItem>::new(
            buffer_size,
            store.clone(),
            move |_: &MenuItemDraft| menu_ids.next_id(),
        );
        let catalog = CatalogClient::new(menu_client);
        let menu_handle = tokio::spawn(menu_actor.run());

        // 2. Coupons
        let (coupon_actor, coupon_client) = ResourceActor::<Coupon>::new(
            buffer_size,
            store.clone(),
            |payload: &CouponCreate| coupon_id(payload),
        );
        let coupons = CouponClient::new(coupon_client);
        let coupon_handle = tokio::spawn(coupon_actor.run());

        // 3. Order history
        let (order_actor, order_client) = ResourceActor::<Order>::new(
            buffer_size,
            store.clone(),
            |_: &OrderCreate| new_order_id(),
        );
        let orders = OrderClient::new(order_client, store.clone());
        let order_handle = tokio::spawn(order_actor.run());

        info!("Storefront started");
        Ok(Self {
            catalog,
            coupons,
            orders,
            store,
            handles: vec![menu_handle, coupon_handle, order_handle],
        })
    }

    /// A fresh customer session with an empty cart.
    pub fn session(&self) -> Session {
        Session::new(self.catalog.clone(), self.coupons.clone(), self.orders.clone())
    }

    pub fn admin(&self) -> AdminConsole {
        AdminConsole::new(self.catalog.clone(), self.coupons.clone(), self.orders.clone())
    }

    pub fn store(&self) -> &StoreAdapter {
        &self.store
    }

    /// Stops every actor and waits for it to finish.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Shutting down storefront...");
        self.catalog.shutdown().await;
        self.coupons.shutdown().await;
        self.orders.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }

        info!("Storefront shutdown complete");
        Ok(())
    }
}
