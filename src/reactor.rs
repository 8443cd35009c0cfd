/// Re-running the matcher as the page mutates
use crate::error::{BlockerError, Result};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{MutationObserver, MutationObserverInit};

/// Runs a callback once after a delay
pub trait Scheduler {
    /// Returns false if the task could not be scheduled and will never run
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> bool;
}

/// `window.setTimeout`
pub struct WindowScheduler;

impl Scheduler for WindowScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> bool {
        let Some(window) = web_sys::window() else {
            log::warn!("No window to schedule on");
            return false;
        };

        let callback = Closure::once_into_js(move || task());
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay_ms.min(i32::MAX as u32) as i32,
        ) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("setTimeout failed: {:?}", e);
                false
            }
        }
    }
}

/// Throttles a task so it runs at most once per interval.
///
/// The first trigger schedules the task; triggers arriving before it runs
/// are absorbed by that pending run.
pub struct Throttle<S: Scheduler> {
    scheduler: S,
    interval_ms: u32,
    pending: Rc<Cell<bool>>,
    task: Rc<dyn Fn()>,
}

impl<S: Scheduler> Throttle<S> {
    pub fn new(scheduler: S, interval_ms: u32, task: impl Fn() + 'static) -> Self {
        Throttle {
            scheduler,
            interval_ms,
            pending: Rc::new(Cell::new(false)),
            task: Rc::new(task),
        }
    }

    /// Returns true if this call scheduled a run
    pub fn trigger(&self) -> bool {
        if self.pending.get() {
            return false;
        }

        self.pending.set(true);
        let pending = self.pending.clone();
        let task = self.task.clone();
        let scheduled = self.scheduler.schedule(
            self.interval_ms,
            Box::new(move || {
                pending.set(false);
                task();
            }),
        );

        // Nothing will clear the flag, so let the next trigger retry
        if !scheduled {
            self.pending.set(false);
        }
        scheduled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

/// Watch `document.body` for added or removed nodes and trigger `throttle`
pub fn observe_body<S: Scheduler + 'static>(throttle: Throttle<S>) -> Result<MutationObserver> {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .ok_or_else(|| BlockerError::Dom("document has no body".to_string()))?;

    let callback = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |_records: JsValue, _observer: JsValue| {
        throttle.trigger();
    });

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| BlockerError::dom("failed to create MutationObserver", e))?;
    callback.forget();

    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);

    observer
        .observe_with_options(&body, &options)
        .map_err(|e| BlockerError::dom("failed to observe body", e))?;

    Ok(observer)
}
