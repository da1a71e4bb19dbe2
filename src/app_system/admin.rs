use std::collections::HashMap;
use tracing::{info, instrument};

use crate::catalog::CatalogError;
use crate::clients::{CatalogClient, CouponClient, OrderClient};
use crate::coupons::CouponError;
use crate::domain::{Coupon, CustomerAggregate, DashboardSummary, MenuItem, MenuItemDraft, Order, OrderStatus};
use crate::ledger;
use crate::orders::OrderError;

/// Administrator operations: catalog editing, coupons, order status and the
/// customer ledger.
#[derive(Clone)]
pub struct AdminConsole {
    catalog: CatalogClient,
    coupons: CouponClient,
    orders: OrderClient,
}

impl AdminConsole {
    pub fn new(catalog: CatalogClient, coupons: CouponClient, orders: OrderClient) -> Self {
        Self { catalog, coupons, orders }
    }

    // --- Catalog ---

    pub async fn menu(&self) -> Result<Vec<MenuItem>, CatalogError> {
        self.catalog.all().await
    }

    pub async fn upsert_menu_item(&self, draft: MenuItemDraft, existing_id: Option<u64>) -> Result<MenuItem, CatalogError> {
        self.catalog.upsert(draft, existing_id).await
    }

    pub async fn delete_menu_item(&self, id: u64) -> Result<bool, CatalogError> {
        self.catalog.delete(id).await
    }

    // --- Coupons ---

    pub async fn coupons(&self) -> Result<Vec<Coupon>, CouponError> {
        self.coupons.all().await
    }

    pub async fn create_coupon(&self, code: &str, discount: i64) -> Result<Coupon, CouponError> {
        self.coupons.create(code, discount).await
    }

    pub async fn delete_coupon(&self, code: &str) -> Result<bool, CouponError> {
        self.coupons.delete(code).await
    }

    // --- Orders ---

    pub async fn orders(&self) -> Result<Vec<Order>, OrderError> {
        self.orders.all().await
    }

    pub async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Option<Order>, OrderError> {
        self.orders.update_status(id.to_string(), status).await
    }

    pub async fn advance_order(&self, id: &str) -> Result<OrderStatus, OrderError> {
        self.orders.advance(id.to_string()).await
    }

    #[instrument(skip(self))]
    pub async fn clear_orders(&self) -> Result<(), OrderError> {
        self.orders.clear_history().await?;
        info!("Admin cleared order history");
        Ok(())
    }

    // --- Ledger ---

    pub async fn customers(&self) -> Result<HashMap<String, CustomerAggregate>, OrderError> {
        Ok(ledger::aggregate(&self.orders.all().await?))
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary, OrderError> {
        Ok(ledger::dashboard(&self.orders.all().await?))
    }
}
