/// In-page modal for blocking the channel of a video

use crate::block_item::BlockItem;
use crate::bridge;
use crate::channel::ChannelRef;
use crate::error::{BlockerError, Result};
use crate::message::{Request, Response};
use crate::ui::components::{Alert, Button, ButtonVariant, TextField};
use std::cell::RefCell;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::AppHandle;
use yew::prelude::*;

const HOST_CLASS: &str = "ytcb-modal-host";

#[derive(Clone, PartialEq)]
enum ModalState {
    Editing,
    Saving,
    Error(String),
}

#[derive(Properties, PartialEq)]
pub struct BlockModalProps {
    pub channel: ChannelRef,
    #[prop_or_default]
    pub video_title: Option<String>,
    /// Called with the stored item, or `None` when cancelled
    pub on_close: Callback<Option<BlockItem>>,
}

#[function_component(BlockModal)]
pub fn block_modal(props: &BlockModalProps) -> Html {
    let state = use_state(|| ModalState::Editing);
    let channel_name = use_state(|| props.channel.label().to_string());
    let video_title = use_state(|| props.video_title.clone().unwrap_or_default());
    let reason = use_state(String::new);

    let on_save = {
        let state = state.clone();
        let channel = props.channel.clone();
        let channel_name = channel_name.clone();
        let video_title = video_title.clone();
        let reason = reason.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |_| {
            let edited = ChannelRef {
                id: channel.id.clone(),
                name: Some((*channel_name).clone()),
            };
            let new_item = edited.to_new_item(Some((*video_title).clone()), Some((*reason).clone()));

            let state = state.clone();
            let on_close = on_close.clone();
            state.set(ModalState::Saving);

            spawn_local(async move {
                match submit(Request::AddNewBlockItem { new_block_item: new_item }).await {
                    Ok(item) => on_close.emit(Some(item)),
                    Err(e) => {
                        log::warn!("Failed to block channel: {}", e);
                        state.set(ModalState::Error(e.to_string()));
                    }
                }
            });
        })
    };

    let on_cancel = props.on_close.reform(|_: MouseEvent| None);

    let setter = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |value: String| handle.set(value))
    };

    let is_saving = *state == ModalState::Saving;

    html! {
        <div style="position: fixed; inset: 0; z-index: 9999; background: rgba(0, 0, 0, 0.6); display: flex; align-items: center; justify-content: center;">
            <div style="background: white; color: #0f0f0f; padding: 24px; border-radius: 4px; width: 420px; max-width: 90vw; font-family: Roboto, Arial, sans-serif;">
                <h2 style="margin: 0 0 16px 0; font-size: 18px;">
                    {format!("Block {}", props.channel.label())}
                </h2>

                if let ModalState::Error(err) = &*state {
                    <Alert message={err.clone()} />
                }

                <TextField label="Channel Name" value={(*channel_name).clone()} oninput={setter(&channel_name)} />
                <TextField label="Video Title" value={(*video_title).clone()} oninput={setter(&video_title)} />
                <TextField label="Reason" value={(*reason).clone()} placeholder="Optional" oninput={setter(&reason)} />

                <div style="display: flex; justify-content: flex-end; margin-top: 8px;">
                    <Button onclick={on_cancel} variant={ButtonVariant::Secondary} disabled={is_saving}>
                        {"Cancel"}
                    </Button>
                    <Button onclick={on_save} disabled={is_saving}>
                        {if is_saving { "Saving..." } else { "Block" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

async fn submit(request: Request) -> Result<BlockItem> {
    match bridge::send(&request).await? {
        Response::Added { new_block_item } => Ok(new_block_item),
        Response::Error { error } => Err(BlockerError::Message(error)),
        other => Err(BlockerError::Message(format!("unexpected reply {:?}", other))),
    }
}

thread_local! {
    static OPEN_MODAL: RefCell<Option<(AppHandle<BlockModal>, Element)>> = const { RefCell::new(None) };
}

/// Mount the modal over the page. `on_blocked` runs once the item is stored.
pub fn open(channel: ChannelRef, video_title: Option<String>, on_blocked: impl Fn(BlockItem) + 'static) -> Result<()> {
    close();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| BlockerError::Dom("no document".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| BlockerError::Dom("document has no body".to_string()))?;

    let host = document
        .create_element("div")
        .map_err(|e| BlockerError::dom("failed to create modal host", e))?;
    host.set_class_name(HOST_CLASS);
    body.append_child(&host)
        .map_err(|e| BlockerError::dom("failed to attach modal host", e))?;

    let on_close = Callback::from(move |item: Option<BlockItem>| {
        if let Some(item) = item {
            on_blocked(item);
        }
        // Unmounting from inside the component's own callback is not allowed
        spawn_local(async { close() });
    });

    let props = BlockModalProps {
        channel,
        video_title,
        on_close,
    };
    let handle = yew::Renderer::<BlockModal>::with_root_and_props(host.clone(), props).render();

    OPEN_MODAL.with(|open| *open.borrow_mut() = Some((handle, host)));
    Ok(())
}

pub fn close() {
    if let Some((handle, host)) = OPEN_MODAL.with(|open| open.borrow_mut().take()) {
        handle.destroy();
        host.remove();
    }
}
