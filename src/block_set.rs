/// In-memory set of blocked channel identities
use crate::block_item::BlockItem;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockSet {
    identities: HashSet<String>,
}

impl BlockSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: &[BlockItem]) -> Self {
        let mut set = BlockSet::new();
        for item in items {
            set.insert(item);
        }
        set
    }

    /// Adds both the id and the name of an item; some layouts only expose one
    pub fn insert(&mut self, item: &BlockItem) {
        for key in [&item.channel_id, &item.channel_name].into_iter().flatten() {
            if !key.is_empty() {
                self.identities.insert(key.clone());
            }
        }
    }

    pub fn is_blocked(&self, identity: Option<&str>) -> bool {
        match identity {
            Some(key) if !key.is_empty() => self.identities.contains(key),
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
