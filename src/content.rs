/// Content script: hide blocked videos on the page and keep them hidden
use crate::block_item::BlockItem;
use crate::block_list::{BLOCK_ITEMS_KEY, BlockList};
use crate::block_set::BlockSet;
use crate::bridge;
use crate::config::{SETTINGS_KEY, Settings};
use crate::error::{BlockerError, Result};
use crate::matcher::{Candidate, HideReason, Matcher};
use crate::page::PageNode;
use crate::reactor::{Throttle, WindowScheduler, observe_body};
use crate::ui::modal;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent};

/// Marks a video that already carries a block button
const INSTRUMENTED_CLASS: &str = "ytcb-instrumented";
const BUTTON_CLASS: &str = "ytcb-block-button";

/// The memoized block set, so the page is not re-read from storage on every scan
struct ContentState {
    blocks: RefCell<BlockSet>,
    settings: Settings,
}

pub fn start() {
    spawn_local(async {
        let settings = match bridge::load_json(SETTINGS_KEY).await {
            Ok(value) => Settings::from_json(&value),
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Settings::default()
            }
        };

        let list: BlockList = match bridge::load(BLOCK_ITEMS_KEY).await {
            Ok(list) => list,
            Err(e) => {
                log::error!("Failed to load block list: {}", e);
                BlockList::new()
            }
        };

        let state = Rc::new(ContentState {
            blocks: RefCell::new(list.block_set()),
            settings,
        });
        log::debug!("Loaded {} blocked identities", state.blocks.borrow().len());

        scan(&state);
        watch_block_list(&state);

        let throttled = {
            let state = state.clone();
            Throttle::new(WindowScheduler, state.settings.throttle_ms, move || scan(&state))
        };
        if let Err(e) = observe_body(throttled) {
            log::error!("Failed to watch page changes: {}", e);
        }
    });
}

/// Rebuild the block set when the list changes in another context
fn watch_block_list(state: &Rc<ContentState>) {
    let state = state.clone();
    bridge::watch(BLOCK_ITEMS_KEY, move |value: JsValue| {
        let list: BlockList = if value.is_null() || value.is_undefined() {
            BlockList::new()
        } else {
            match serde_wasm_bindgen::from_value(value) {
                Ok(list) => list,
                Err(e) => {
                    log::warn!("Ignoring unreadable block list update: {}", e);
                    return;
                }
            }
        };

        *state.blocks.borrow_mut() = list.block_set();
        scan(&state);
    });
}

fn scan(state: &Rc<ContentState>) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        log::warn!("No document body to scan");
        return;
    };

    let root: Element = body.into();
    let report = {
        let blocks = state.blocks.borrow();
        Matcher::new(&blocks, &state.settings).scan(&root)
    };

    if !report.hidden.is_empty() {
        log::debug!(
            "Hid {} shelves, {} videos, {} endscreens",
            report.hidden_count(HideReason::Shelf),
            report.hidden_count(HideReason::Video),
            report.hidden_count(HideReason::Endscreen)
        );
    }

    if state.settings.instrument {
        for candidate in report.candidates {
            if let Err(e) = instrument(state, candidate) {
                log::warn!("Failed to add block button: {}", e);
            }
        }
    }
}

/// Add a "block channel" button to a visible video, once
fn instrument(state: &Rc<ContentState>, candidate: Candidate<Element>) -> Result<()> {
    if candidate.node.has_class(INSTRUMENTED_CLASS) {
        return Ok(());
    }

    let document = candidate
        .node
        .owner_document()
        .ok_or_else(|| BlockerError::Dom("detached node".to_string()))?;
    let button = document
        .create_element("button")
        .map_err(|e| BlockerError::dom("failed to create button", e))?;
    button.set_class_name(BUTTON_CLASS);
    button.set_text_content(Some("\u{2298}"));
    button
        .set_attribute("title", &format!("Block {}", candidate.channel.label()))
        .map_err(|e| BlockerError::dom("failed to set title", e))?;

    let onclick = {
        let state = state.clone();
        let channel = candidate.channel.clone();
        let video_title = candidate.video_title.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            event.prevent_default();
            event.stop_propagation();

            let state = state.clone();
            let on_blocked = move |item: BlockItem| {
                state.blocks.borrow_mut().insert(&item);
                scan(&state);
            };
            if let Err(e) = modal::open(channel.clone(), video_title.clone(), on_blocked) {
                log::error!("Failed to open block dialog: {}", e);
            }
        })
    };
    button
        .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())
        .map_err(|e| BlockerError::dom("failed to attach click handler", e))?;
    onclick.forget();

    candidate
        .node
        .append_child(&button)
        .map_err(|e| BlockerError::dom("failed to attach button", e))?;
    candidate.node.add_class(INSTRUMENTED_CLASS);
    Ok(())
}
