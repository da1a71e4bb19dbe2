use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::actor_framework::{Entity, Unsupported};
use crate::domain::{MenuItem, MenuItemDraft};
use crate::storage::StoreKey;

impl Entity for MenuItem {
    type Id = u64;
    type CreatePayload = MenuItemDraft;
    type Patch = MenuItemDraft;
    type Action = Unsupported;
    type ActionResult = ();

    const STORE_KEY: StoreKey = StoreKey::Menu;

    fn id(&self) -> &u64 {
        &self.id
    }

    /// Validates the admin form and builds the item.
    ///
    /// # Errors
    /// Rejects a negative price, a non-finite rating or an empty image list.
    fn from_create(id: u64, draft: MenuItemDraft) -> Result<Self, String> {
        draft.into_item(id)
    }

    /// Replaces every field but the id with the edited form.
    fn on_update(&mut self, draft: MenuItemDraft) -> Result<(), String> {
        *self = draft.into_item(self.id)?;
        Ok(())
    }

    fn handle_action(&mut self, action: Unsupported) -> Result<(), String> {
        match action {}
    }
}

/// Millisecond-timestamp id generator for admin-created items.
///
/// Ids never repeat within a process, even when two items are created in the
/// same millisecond.
#[derive(Debug, Default)]
pub struct MenuIdGenerator {
    last: AtomicU64,
}

impl MenuIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut current = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(current + 1);
            match self
                .last
                .compare_exchange(current, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let ids = MenuIdGenerator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        let third = ids.next_id();
        assert!(first < second && second < third);
        assert!(first > 1_600_000_000_000);
    }

    #[test]
    fn update_keeps_id() {
        let mut item = MenuItemDraft::new("Veggie", "veg", 250)
            .with_image("a.png")
            .into_item(10)
            .unwrap();
        let edit = MenuItemDraft::new("Veggie Supreme", "veg", 320).with_image("b.png");
        item.on_update(edit).unwrap();
        assert_eq!(item.id, 10);
        assert_eq!(item.name, "Veggie Supreme");
        assert_eq!(item.price, 320);

        let bad = MenuItemDraft::new("Veggie", "veg", 320);
        assert!(item.on_update(bad).is_err());
        assert_eq!(item.name, "Veggie Supreme");
    }
}
