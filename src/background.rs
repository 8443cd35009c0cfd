/// Background worker: owns writes to the block list
use crate::block_list::{BLOCK_ITEMS_KEY, BlockList, Insertion};
use crate::bridge;
use crate::error::Result;
use crate::message::{Request, Response};

/// Apply one request to the list. Returns the reply and whether the list changed.
pub fn apply(list: &mut BlockList, request: Request) -> (Response, bool) {
    match request {
        Request::AddNewBlockItem { new_block_item } => match list.add(new_block_item) {
            Ok(Insertion::Created(item)) => {
                log::info!("Blocked channel {} as item {}", item.display_name(), item.id);
                (Response::Added { new_block_item: item }, true)
            }
            Ok(Insertion::Existing(item)) => {
                log::debug!("Channel {} already blocked as item {}", item.display_name(), item.id);
                (Response::Added { new_block_item: item }, false)
            }
            Err(e) => (Response::error(e), false),
        },
        Request::DeleteBlockItem { id } => match list.delete(id) {
            Ok(item) => {
                log::info!("Unblocked channel {}", item.display_name());
                (Response::Deleted { deleted_id: item.id }, true)
            }
            Err(e) => (Response::error(e), false),
        },
        Request::UpdateBlockItem { id, block_item_data } => match list.update(id, block_item_data) {
            Ok(item) => (
                Response::Updated {
                    updated_block_item: item.clone(),
                },
                true,
            ),
            Err(e) => (Response::error(e), false),
        },
        Request::ListBlockItems => (
            Response::Listed {
                block_items: list.items.clone(),
            },
            false,
        ),
    }
}

/// Load the stored list, apply the request and persist the result
pub async fn handle(request: Request) -> Response {
    match try_handle(request).await {
        Ok(response) => response,
        Err(e) => {
            log::error!("Failed to handle request: {}", e);
            Response::error(e)
        }
    }
}

async fn try_handle(request: Request) -> Result<Response> {
    let mut list: BlockList = bridge::load(BLOCK_ITEMS_KEY).await?;
    let (response, changed) = apply(&mut list, request);

    if changed {
        bridge::save(BLOCK_ITEMS_KEY, &list).await?;
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_item::{BlockItemData, NewBlockItem};

    fn add_request(channel_id: Option<&str>, channel_name: Option<&str>) -> Request {
        Request::AddNewBlockItem {
            new_block_item: NewBlockItem {
                channel_id: channel_id.map(String::from),
                channel_name: channel_name.map(String::from),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_add_assigns_id_and_marks_changed() {
        let mut list = BlockList::new();

        let (response, changed) = apply(&mut list, add_request(Some("UCu9s6DRtR3AmKWLYq-RYcpg"), None));

        assert!(changed);
        match response {
            Response::Added { new_block_item } => {
                assert_eq!(new_block_item.id, 1);
                assert_eq!(new_block_item.channel_id.as_deref(), Some("UCu9s6DRtR3AmKWLYq-RYcpg"));
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_add_returns_existing_without_saving() {
        let mut list = BlockList::new();
        apply(&mut list, add_request(Some("UCu9s6DRtR3AmKWLYq-RYcpg"), Some("first")));

        let (response, changed) = apply(&mut list, add_request(Some("UCu9s6DRtR3AmKWLYq-RYcpg"), Some("second")));

        assert!(!changed);
        assert_eq!(list.len(), 1);
        match response {
            Response::Added { new_block_item } => {
                assert_eq!(new_block_item.id, 1);
                assert_eq!(new_block_item.channel_name.as_deref(), Some("first"));
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_add_without_identity_is_an_error_reply() {
        let mut list = BlockList::new();
        let (response, changed) = apply(&mut list, add_request(None, None));

        assert!(!changed);
        assert!(matches!(response, Response::Error { .. }));
    }

    #[test]
    fn test_delete_and_update() {
        let mut list = BlockList::new();
        apply(&mut list, add_request(None, Some("a")));
        apply(&mut list, add_request(None, Some("b")));

        let (response, changed) = apply(&mut list, Request::DeleteBlockItem { id: 1 });
        assert!(changed);
        assert_eq!(response, Response::Deleted { deleted_id: 1 });
        assert_eq!(list.len(), 1);

        let (response, changed) = apply(
            &mut list,
            Request::UpdateBlockItem {
                id: 2,
                block_item_data: BlockItemData {
                    reason: Some("annoying".to_string()),
                    ..Default::default()
                },
            },
        );
        assert!(changed);
        match response {
            Response::Updated { updated_block_item } => {
                assert_eq!(updated_block_item.id, 2);
                assert_eq!(updated_block_item.reason.as_deref(), Some("annoying"));
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_delete_missing_is_an_error_reply() {
        let mut list = BlockList::new();
        apply(&mut list, add_request(None, Some("a")));

        let (response, changed) = apply(&mut list, Request::DeleteBlockItem { id: 9 });

        assert!(!changed);
        assert_eq!(response, Response::error("block item 9 not found"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_list_does_not_change() {
        let mut list = BlockList::new();
        apply(&mut list, add_request(None, Some("a")));

        let (response, changed) = apply(&mut list, Request::ListBlockItems);

        assert!(!changed);
        match response {
            Response::Listed { block_items } => assert_eq!(block_items.len(), 1),
            other => panic!("unexpected response {:?}", other),
        }
    }
}
