//! Browser bindings with scoped lifetimes
//!
//! Every listener and animation-frame registration made through this module
//! is owned by a value that removes it on drop, so closing the game view
//! leaves nothing running.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

use crate::renderer::RenderError;

/// Host precondition failures (never raised by the simulation)
#[derive(Error, Debug)]
pub enum HostError {
    #[error("No window available")]
    MissingWindow,

    #[error("No document available")]
    MissingDocument,

    #[error("Element not found: #{0}")]
    MissingElement(String),

    #[error("Element #{0} is not a canvas")]
    NotACanvas(String),

    #[error("Failed to attach {kind} listener: {reason}")]
    Listener { kind: &'static str, reason: String },

    #[error("GPU setup failed: {0}")]
    Gpu(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Look up the window and document
pub fn document() -> Result<web_sys::Document, HostError> {
    web_sys::window()
        .ok_or(HostError::MissingWindow)?
        .document()
        .ok_or(HostError::MissingDocument)
}

/// An event listener that is removed when dropped
pub struct EventSubscription {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventSubscription {
    pub fn new<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, HostError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| HostError::Listener {
                kind,
                reason: format!("{:?}", e),
            })?;

        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
        log::debug!("Removed {} listener", self.kind);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Re-arming `requestAnimationFrame` loop, cancelled when dropped
pub struct FrameLoop {
    window: web_sys::Window,
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Call `on_frame` with the frame timestamp (ms) on every display refresh
    pub fn start<F>(mut on_frame: F) -> Result<Self, HostError>
    where
        F: FnMut(f64) + 'static,
    {
        let window = web_sys::window().ok_or(HostError::MissingWindow)?;
        let handle = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        {
            let window = window.clone();
            let handle = handle.clone();
            // The closure holds its own slot; Drop empties the slot to break the cycle
            let slot = callback.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                on_frame(time);
                if let Some(cb) = slot.borrow().as_ref() {
                    handle.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
                }
            }));
        }

        let first = callback
            .borrow()
            .as_ref()
            .map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()));
        match first {
            Some(Ok(id)) => handle.set(Some(id)),
            Some(Err(e)) => {
                return Err(HostError::Listener {
                    kind: "animationframe",
                    reason: format!("{:?}", e),
                });
            }
            None => {}
        }

        Ok(Self {
            window,
            handle,
            callback,
        })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
        log::debug!("Frame loop cancelled");
    }
}
