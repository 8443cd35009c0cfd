/// The stored block list and its CRUD operations
use crate::block_item::{BlockItem, BlockItemData, NewBlockItem};
use crate::block_set::BlockSet;
use crate::error::{BlockerError, Result};
use serde::{Deserialize, Serialize};

/// Storage key holding the block list
pub const BLOCK_ITEMS_KEY: &str = "BlockItems";

/// Root storage structure, stored as a bare array
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BlockList {
    pub items: Vec<BlockItem>,
}

/// Outcome of [`BlockList::add`]
#[derive(Debug, Clone, PartialEq)]
pub enum Insertion {
    Created(BlockItem),
    /// An item with the same identity was already stored
    Existing(BlockItem),
}

impl Insertion {
    pub fn item(&self) -> &BlockItem {
        match self {
            Insertion::Created(item) | Insertion::Existing(item) => item,
        }
    }
}

impl BlockList {
    pub fn new() -> Self {
        BlockList { items: Vec::new() }
    }

    /// Next id: one past the largest id in use
    pub fn next_id(&self) -> u32 {
        self.items.iter().map(|item| item.id).max().unwrap_or(0) + 1
    }

    pub fn add(&mut self, new_item: NewBlockItem) -> Result<Insertion> {
        let new_item = new_item.normalized();
        let identity = new_item.identity().ok_or(BlockerError::MissingIdentity)?;

        if let Some(existing) = self.items.iter().find(|item| item.identity() == Some(identity)) {
            return Ok(Insertion::Existing(existing.clone()));
        }

        let item = new_item.into_item(self.next_id());
        self.items.push(item.clone());
        Ok(Insertion::Created(item))
    }

    pub fn delete(&mut self, id: u32) -> Result<BlockItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(BlockerError::NotFound(id))?;
        Ok(self.items.remove(index))
    }

    pub fn update(&mut self, id: u32, data: BlockItemData) -> Result<&BlockItem> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(BlockerError::NotFound(id))?;

        let mut updated = item.clone();
        updated.apply(data);
        if updated.identity().is_none() {
            return Err(BlockerError::MissingIdentity);
        }

        *item = updated;
        Ok(&*item)
    }

    pub fn get(&self, id: u32) -> Option<&BlockItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn block_set(&self) -> BlockSet {
        BlockSet::from_items(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
