use tracing::{error, info, Instrument};

use storefront::app_system::{setup_tracing, StorefrontSystem};
use storefront::config::StorefrontConfig;
use storefront::domain::{CategoryFilter, Contact, MenuItemDraft, OrderStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = StorefrontConfig::from_env()?;

    // Setup tracing once for the entire application
    setup_tracing(config.json_logs);

    info!(namespace = %config.namespace, data_dir = ?config.data_dir, "Starting storefront");
    let system = StorefrontSystem::start(&config).await?;
    let admin = system.admin();

    // Admin prepares the shop
    let span = tracing::info_span!("admin_setup");
    let garlic = async {
        let draft = MenuItemDraft::new("Garlic Bread", "veg", 199)
            .with_desc("Toasted with herb butter.")
            .with_image("https://images.unsplash.com/photo-1619535860434-ba1d8fa12536?auto=format&fit=crop&w=500&q=80");
        let item = admin.upsert_menu_item(draft, None).await?;
        admin.create_coupon("welcome10", 10).await?;
        anyhow::Ok(item)
    }
    .instrument(span)
    .await?;

    // A customer places an order
    let span = tracing::info_span!("customer_checkout");
    let order = async {
        let mut session = system.session();
        for item in session.menu(&CategoryFilter::All).await? {
            info!(item_id = item.id, name = %item.name, price = item.price, "On the menu");
        }
        session.add_to_cart(1).await?;
        session.add_to_cart(1).await?;
        session.add_to_cart(garlic.id).await?;
        session.apply_coupon("WELCOME10").await?;
        info!(
            subtotal = session.subtotal(),
            discount = session.discount(),
            payable = session.payable_total(),
            "Cart ready"
        );

        let contact = Contact::new("Ravi", "9876543210", "12 MG Road", "cash").with_landmark("Opposite the park");
        let order = session.checkout(contact).await?;
        anyhow::Ok(order)
    }
    .instrument(span)
    .await?;

    info!(order_id = %order.id, total = order.total, "Order placed");

    // The kitchen works through it
    match admin.update_status(&order.id, OrderStatus::Preparing).await {
        Ok(Some(order)) => info!(status = %order.status, step = order.status.step(), "Status updated"),
        Ok(None) => error!(order_id = %order.id, "Order vanished before its status could change"),
        Err(e) => error!(error = %e, "Status update failed"),
    }

    for customer in admin.customers().await?.values() {
        info!(
            phone = %customer.phone,
            name = %customer.name,
            orders = customer.order_count,
            lifetime_value = customer.lifetime_value,
            "Customer"
        );
    }
    let summary = admin.dashboard().await?;
    info!(
        total_orders = summary.total_orders,
        total_sales = summary.total_sales,
        unique_customers = summary.unique_customers,
        "Dashboard"
    );

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Storefront demo completed");
    Ok(())
}
