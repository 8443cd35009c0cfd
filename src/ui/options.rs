/// Options page: manage the block list and content script settings

use crate::block_item::{BlockItem, BlockItemData};
use crate::bridge;
use crate::channel::ChannelRef;
use crate::config::{SETTINGS_KEY, Settings};
use crate::error::{BlockerError, Result};
use crate::message::{Request, Response};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum ViewState {
    Loading,
    Idle,
    Saving,
    Error(String),
}

/// Callback writing an input's value into a string state
fn bind(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            handle.set(input.value());
        }
    })
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let state = use_state(|| ViewState::Loading);
    let items = use_state(Vec::<BlockItem>::new);
    let settings = use_state(Settings::default);
    let settings_saved = use_state(|| false);

    let new_channel = use_state(String::new);
    let new_title = use_state(String::new);
    let new_reason = use_state(String::new);

    let editing = use_state(|| None::<u32>);
    let edit_channel = use_state(String::new);
    let edit_title = use_state(String::new);
    let edit_reason = use_state(String::new);

    // Load block list and settings on mount
    {
        let state = state.clone();
        let items = items.clone();
        let settings = settings.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match bridge::load_json(SETTINGS_KEY).await {
                    Ok(value) => settings.set(Settings::from_json(&value)),
                    Err(e) => log::warn!("Using default settings: {}", e),
                }

                match list_items().await {
                    Ok(loaded) => {
                        items.set(loaded);
                        state.set(ViewState::Idle);
                    }
                    Err(e) => {
                        state.set(ViewState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    // Save a new block item
    let on_add = {
        let state = state.clone();
        let items = items.clone();
        let new_channel = new_channel.clone();
        let new_title = new_title.clone();
        let new_reason = new_reason.clone();

        Callback::from(move |_| {
            let new_item = ChannelRef::from_input(&new_channel)
                .to_new_item(Some((*new_title).clone()), Some((*new_reason).clone()));
            if new_item.identity().is_none() {
                state.set(ViewState::Error("Enter a channel name or id".to_string()));
                return;
            }

            let state = state.clone();
            let items = items.clone();
            let new_channel = new_channel.clone();
            let new_title = new_title.clone();
            let new_reason = new_reason.clone();
            state.set(ViewState::Saving);

            spawn_local(async move {
                match send(Request::AddNewBlockItem { new_block_item: new_item }).await {
                    Ok(Response::Added { new_block_item }) => {
                        let mut updated = (*items).clone();
                        if !updated.iter().any(|item| item.id == new_block_item.id) {
                            updated.push(new_block_item);
                        }
                        items.set(updated);
                        new_channel.set(String::new());
                        new_title.set(String::new());
                        new_reason.set(String::new());
                        state.set(ViewState::Idle);
                    }
                    Ok(other) => state.set(ViewState::Error(format!("Unexpected reply: {:?}", other))),
                    Err(e) => state.set(ViewState::Error(format!("Failed to save: {}", e))),
                }
            });
        })
    };

    // Delete a row
    let on_delete = {
        let state = state.clone();
        let items = items.clone();

        Callback::from(move |id: u32| {
            let state = state.clone();
            let items = items.clone();

            spawn_local(async move {
                let reply = send(Request::DeleteBlockItem { id }).await;
                state.set(settled("delete", &reply, |r| matches!(r, Response::Deleted { .. })));
                if let Ok(Response::Deleted { deleted_id }) = reply {
                    let remaining: Vec<BlockItem> =
                        (*items).iter().filter(|item| item.id != deleted_id).cloned().collect();
                    items.set(remaining);
                }
            });
        })
    };

    // Switch a row into edit mode
    let on_start_edit = {
        let editing = editing.clone();
        let edit_channel = edit_channel.clone();
        let edit_title = edit_title.clone();
        let edit_reason = edit_reason.clone();

        Callback::from(move |item: BlockItem| {
            edit_channel.set(item.display_name().to_string());
            edit_title.set(item.video_title.clone().unwrap_or_default());
            edit_reason.set(item.reason.clone().unwrap_or_default());
            editing.set(Some(item.id));
        })
    };

    // Commit the edited row
    let on_commit_edit = {
        let state = state.clone();
        let items = items.clone();
        let editing = editing.clone();
        let edit_channel = edit_channel.clone();
        let edit_title = edit_title.clone();
        let edit_reason = edit_reason.clone();

        Callback::from(move |_| {
            let Some(id) = *editing else {
                return;
            };
            let block_item_data = BlockItemData {
                channel_id: None,
                channel_name: Some((*edit_channel).clone()),
                video_title: Some((*edit_title).clone()),
                reason: Some((*edit_reason).clone()),
            };

            let state = state.clone();
            let items = items.clone();
            let editing = editing.clone();

            spawn_local(async move {
                let reply = send(Request::UpdateBlockItem { id, block_item_data }).await;
                state.set(settled("update", &reply, |r| matches!(r, Response::Updated { .. })));
                if let Ok(Response::Updated { updated_block_item }) = reply {
                    let updated: Vec<BlockItem> = (*items)
                        .iter()
                        .map(|item| {
                            if item.id == updated_block_item.id {
                                updated_block_item.clone()
                            } else {
                                item.clone()
                            }
                        })
                        .collect();
                    items.set(updated);
                    editing.set(None);
                }
            });
        })
    };

    let on_cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };

    // Export the block list
    let on_export = {
        let items = items.clone();

        Callback::from(move |_| match serde_json::to_string_pretty(&*items) {
            Ok(json) => {
                let filename = format!("blocked-channels-{}.json", js_sys::Date::now() as i64);
                bridge::download(&json, &filename);
            }
            Err(e) => log::error!("Export failed: {:?}", e),
        })
    };

    // Settings form
    let on_throttle_input = {
        let settings = settings.clone();
        let settings_saved = settings_saved.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                if let Ok(ms) = input.value().parse::<u32>() {
                    let mut updated = (*settings).clone();
                    updated.throttle_ms = ms;
                    settings.set(updated);
                    settings_saved.set(false);
                }
            }
        })
    };

    let toggle = |apply: fn(&mut Settings)| {
        let settings = settings.clone();
        let settings_saved = settings_saved.clone();
        Callback::from(move |_: Event| {
            let mut updated = (*settings).clone();
            apply(&mut updated);
            settings.set(updated);
            settings_saved.set(false);
        })
    };

    let on_save_settings = {
        let settings = settings.clone();
        let settings_saved = settings_saved.clone();
        let state = state.clone();

        Callback::from(move |_| {
            let sanitized = (*settings).clone().sanitized();
            settings.set(sanitized.clone());

            let settings_saved = settings_saved.clone();
            let state = state.clone();
            spawn_local(async move {
                match bridge::save(SETTINGS_KEY, &sanitized).await {
                    Ok(()) => settings_saved.set(true),
                    Err(e) => state.set(ViewState::Error(format!("Failed to save settings: {}", e))),
                }
            });
        })
    };

    let is_busy = matches!(*state, ViewState::Loading | ViewState::Saving);

    html! {
        <div class="container">
            <div class="header">
                <h1 class="main-title">{"Blocked Channels"}</h1>
                <Button onclick={on_export} variant={ButtonVariant::Secondary}>
                    {"Export"}
                </Button>
            </div>

            {match &*state {
                ViewState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading block list..."}</p>
                    </div>
                },
                ViewState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                ViewState::Idle | ViewState::Saving => html! {}
            }}

            <table class="pf-v5-c-table pf-m-compact block-table">
                <thead>
                    <tr>
                        <th>{"Channel"}</th>
                        <th>{"Video Title"}</th>
                        <th>{"Reason"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody id="ChannelsBody">
                    {for items.iter().map(|item| {
                        if *editing == Some(item.id) {
                            html! {
                                <tr key={item.id}>
                                    <td><input class="pf-v5-c-form-control channel-name" type="text" placeholder="Channel Name"
                                        value={(*edit_channel).clone()} oninput={bind(&edit_channel)} /></td>
                                    <td><input class="pf-v5-c-form-control video-title" type="text" placeholder="Video Title"
                                        value={(*edit_title).clone()} oninput={bind(&edit_title)} /></td>
                                    <td><input class="pf-v5-c-form-control reason" type="text" placeholder="Reason"
                                        value={(*edit_reason).clone()} oninput={bind(&edit_reason)} /></td>
                                    <td class="row-actions">
                                        <Button onclick={on_commit_edit.clone()} size={ButtonSize::Small}>
                                            {"Save"}
                                        </Button>
                                        <Button onclick={on_cancel_edit.clone()} variant={ButtonVariant::Secondary} size={ButtonSize::Small}>
                                            {"Cancel"}
                                        </Button>
                                    </td>
                                </tr>
                            }
                        } else {
                            let onclick_row = on_start_edit.reform({
                                let item = item.clone();
                                move |_: MouseEvent| item.clone()
                            });
                            let onclick_delete = {
                                let on_delete = on_delete.clone();
                                let id = item.id;
                                Callback::from(move |e: MouseEvent| {
                                    e.prevent_default();
                                    e.stop_propagation();
                                    on_delete.emit(id);
                                })
                            };

                            html! {
                                <tr key={item.id} class="block-row" onclick={onclick_row}>
                                    <td>{item.display_name()}</td>
                                    <td>{item.video_title.clone().unwrap_or_default()}</td>
                                    <td>{item.reason.clone().unwrap_or_default()}</td>
                                    <td class="delete-cell">
                                        <a href="#" onclick={onclick_delete}>{"X"}</a>
                                    </td>
                                </tr>
                            }
                        }
                    })}
                </tbody>
                <tfoot>
                    <tr>
                        <td><input id="NewChannelName" class="pf-v5-c-form-control" type="text" placeholder="Channel Name or ID"
                            value={(*new_channel).clone()} oninput={bind(&new_channel)} /></td>
                        <td><input id="NewVideoTitle" class="pf-v5-c-form-control" type="text" placeholder="Video Title"
                            value={(*new_title).clone()} oninput={bind(&new_title)} /></td>
                        <td><input id="NewReason" class="pf-v5-c-form-control" type="text" placeholder="Reason"
                            value={(*new_reason).clone()} oninput={bind(&new_reason)} /></td>
                        <td>
                            <Button onclick={on_add} disabled={is_busy}>
                                {"Save"}
                            </Button>
                        </td>
                    </tr>
                </tfoot>
            </table>

            if items.is_empty() && !is_busy {
                <div class="empty-state">
                    <p>{"No blocked channels yet."}</p>
                    <p class="empty-state-hint">{"Add one above, or use the block button on a video."}</p>
                </div>
            }

            <div class="settings">
                <h2 class="settings-title">{"Settings"}</h2>
                <label class="settings-row">
                    {"Rescan interval (ms) "}
                    <input class="pf-v5-c-form-control settings-number" type="number" min="50" max="10000"
                        value={settings.throttle_ms.to_string()} oninput={on_throttle_input} />
                </label>
                <label class="settings-row">
                    <input type="checkbox" checked={settings.hide_endscreen}
                        onchange={toggle(|s| s.hide_endscreen = !s.hide_endscreen)} />
                    {" Hide end screen recommendations"}
                </label>
                <label class="settings-row">
                    <input type="checkbox" checked={settings.instrument}
                        onchange={toggle(|s| s.instrument = !s.instrument)} />
                    {" Show a block button on videos"}
                </label>
                <label class="settings-row">
                    <input type="checkbox" checked={settings.log_blocks}
                        onchange={toggle(|s| s.log_blocks = !s.log_blocks)} />
                    {" Log blocked videos to the console"}
                </label>
                <Button onclick={on_save_settings} variant={ButtonVariant::Secondary}>
                    {if *settings_saved { "Saved" } else { "Save Settings" }}
                </Button>
            </div>

            <div class="footer">
                {format!("{} blocked channels", items.len())}
            </div>
        </div>
    }
}

// Helper functions

/// View state once a reply arrives; a successful reply clears any earlier error
fn settled(action: &str, reply: &Result<Response>, expected: impl Fn(&Response) -> bool) -> ViewState {
    match reply {
        Ok(response) if expected(response) => ViewState::Idle,
        Ok(other) => ViewState::Error(format!("Unexpected reply: {:?}", other)),
        Err(e) => ViewState::Error(format!("Failed to {}: {}", action, e)),
    }
}

async fn send(request: Request) -> Result<Response> {
    match bridge::send(&request).await? {
        Response::Error { error } => Err(BlockerError::Message(error)),
        response => Ok(response),
    }
}

async fn list_items() -> Result<Vec<BlockItem>> {
    match send(Request::ListBlockItems).await? {
        Response::Listed { block_items } => Ok(block_items),
        other => Err(BlockerError::Message(format!("unexpected reply {:?}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_deleted(reply: &Response) -> bool {
        matches!(reply, Response::Deleted { .. })
    }

    #[test]
    fn test_successful_reply_clears_error() {
        let reply = Ok(Response::Deleted { deleted_id: 3 });
        assert_eq!(settled("delete", &reply, is_deleted), ViewState::Idle);
    }

    #[test]
    fn test_failed_reply_reports_action() {
        let reply = Err(BlockerError::Message("no block item with id 9".to_string()));
        assert_eq!(
            settled("delete", &reply, is_deleted),
            ViewState::Error("Failed to delete: message error: no block item with id 9".to_string())
        );
    }

    #[test]
    fn test_unexpected_reply_is_an_error() {
        let reply = Ok(Response::Listed { block_items: Vec::new() });
        assert!(matches!(settled("delete", &reply, is_deleted), ViewState::Error(_)));
    }
}
