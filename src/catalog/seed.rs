use tracing::{info, instrument};

use crate::domain::{Category, MenuItem, Review};
use crate::storage::{StoreAdapter, StoreError, StoreKey};

/// The single item a fresh store starts with.
pub fn default_menu() -> Vec<MenuItem> {
    vec![MenuItem {
        id: 1,
        name: "Margherita".to_string(),
        category: Category::Veg,
        price: 299,
        rating: 4.8,
        desc: "Classic delight with 100% real mozzarella cheese.".to_string(),
        images: vec![
            "https://images.unsplash.com/photo-1574071318508-1cdbad80ad38?auto=format&fit=crop&w=500&q=80"
                .to_string(),
        ],
        reviews: vec![
            Review::new("Deepak", "Best margherita in town!"),
            Review::new("Suman", "Very cheesy."),
        ],
    }]
}

/// Writes [`default_menu`] when no menu record exists.
///
/// An existing record is never overwritten, even an empty list. Returns
/// whether the seed was written.
#[instrument(skip(store))]
pub async fn seed_if_absent(store: &StoreAdapter) -> Result<bool, StoreError> {
    if store.is_present(StoreKey::Menu).await? {
        return Ok(false);
    }
    store.write(StoreKey::Menu, &default_menu()).await?;
    info!("Seeded default menu");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_only_once() {
        let store = StoreAdapter::in_memory();
        assert!(seed_if_absent(&store).await.unwrap());
        let menu: Vec<MenuItem> = store.read(StoreKey::Menu, Vec::new()).await;
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].name, "Margherita");
        assert_eq!(menu[0].price, 299);

        assert!(!seed_if_absent(&store).await.unwrap());
    }

    #[tokio::test]
    async fn never_overwrites_an_empty_menu() {
        let store = StoreAdapter::in_memory();
        store.write(StoreKey::Menu, &Vec::<MenuItem>::new()).await.unwrap();
        assert!(!seed_if_absent(&store).await.unwrap());
        let menu: Vec<MenuItem> = store.read(StoreKey::Menu, default_menu()).await;
        assert!(menu.is_empty());
    }
}
