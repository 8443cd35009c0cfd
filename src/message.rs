/// Messages exchanged with the background worker
use crate::block_item::{BlockItem, BlockItemData, NewBlockItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    AddNewBlockItem {
        #[serde(rename = "newBlockItem")]
        new_block_item: NewBlockItem,
    },
    DeleteBlockItem {
        id: u32,
    },
    UpdateBlockItem {
        id: u32,
        #[serde(rename = "blockItemData")]
        block_item_data: BlockItemData,
    },
    ListBlockItems,
}

/// Replies are told apart by their single field name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Added {
        #[serde(rename = "newBlockItem")]
        new_block_item: BlockItem,
    },
    Deleted {
        #[serde(rename = "deletedId")]
        deleted_id: u32,
    },
    Updated {
        #[serde(rename = "updatedBlockItem")]
        updated_block_item: BlockItem,
    },
    Listed {
        #[serde(rename = "blockItems")]
        block_items: Vec<BlockItem>,
    },
    Error {
        error: String,
    },
}

impl Response {
    pub fn error(message: impl ToString) -> Self {
        Response::Error {
            error: message.to_string(),
        }
    }
}
