//! In-memory item store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument};

use crate::error::ItemError;
use crate::metrics;

use super::model::{Item, ItemCreate, ItemId, ItemUpdate};

/// Items plus the next id to hand out. Guarded together so that id
/// allocation and insertion happen as one step.
#[derive(Debug)]
struct Inventory {
    items: BTreeMap<ItemId, Item>,
    next_id: ItemId,
}

/// Process-local item store.
///
/// Ids start at 1 and only ever increase; deleting an item does not free its
/// id. Every operation either succeeds completely or leaves the store as it
/// was.
#[derive(Debug)]
pub struct ItemStore {
    inner: Mutex<Inventory>,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inventory {
                items: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inventory> {
        // No operation can leave the inventory half-updated, so a poisoned
        // lock still guards consistent data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All stored items, ascending by id.
    pub fn list(&self) -> Vec<Item> {
        self.lock().items.values().cloned().collect()
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Fetch one item.
    pub fn get(&self, id: ItemId) -> Result<Item, ItemError> {
        self.lock()
            .items
            .get(&id)
            .cloned()
            .ok_or(ItemError::NotFound { id })
    }

    /// Validate and insert a new item under the next id.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn create(&self, input: ItemCreate) -> Result<Item, ItemError> {
        if let Err(errors) = input.validate() {
            metrics::inc_validation_failures();
            return Err(errors.into());
        }

        let mut inventory = self.lock();
        let id = inventory.next_id;
        let item = Item::from_create(id, input);
        inventory.items.insert(id, item.clone());
        inventory.next_id += 1;
        drop(inventory);

        metrics::inc_items_created();
        debug!(id, "Item created");
        Ok(item)
    }

    /// Validate and apply a partial update to an existing item.
    ///
    /// Input is checked before the item is looked up, so an invalid body is
    /// reported even for an unknown id.
    #[instrument(skip(self, update))]
    pub fn update(&self, id: ItemId, update: ItemUpdate) -> Result<Item, ItemError> {
        if let Err(errors) = update.validate() {
            metrics::inc_validation_failures();
            return Err(errors.into());
        }

        let mut inventory = self.lock();
        let item = inventory
            .items
            .get_mut(&id)
            .ok_or(ItemError::NotFound { id })?;
        item.apply(update);
        let updated = item.clone();
        drop(inventory);

        metrics::inc_items_updated();
        debug!(id, "Item updated");
        Ok(updated)
    }

    /// Remove an item. Its id is not reused.
    #[instrument(skip(self))]
    pub fn delete(&self, id: ItemId) -> Result<(), ItemError> {
        self.lock()
            .items
            .remove(&id)
            .ok_or(ItemError::NotFound { id })?;

        metrics::inc_items_deleted();
        debug!(id, "Item deleted");
        Ok(())
    }
}
