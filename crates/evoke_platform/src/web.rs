//! Browser implementations over `web-sys`
//!
//! Compiled only with the `web` feature on `wasm32`. Every lookup that can
//! fail (no window, storage blocked, `CSS` namespace missing) degrades to an
//! absent capability instead of an error.

use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, MediaQueryList, MediaQueryListEvent, Storage, Window};

use crate::css::CssSupport;
use crate::env::Environment;
use crate::error::{PlatformError, Result};
use crate::media::{MediaListener, MediaQueries, MediaWatch};
use crate::root::StyleRoot;
use crate::storage::KeyValueStore;
use crate::timer::{Scheduler, SystemClock, Task, TimerId};

fn js_error(err: JsValue) -> PlatformError {
    PlatformError::Js(
        err.as_string()
            .unwrap_or_else(|| format!("{err:?}")),
    )
}

impl Environment {
    /// Capabilities of the current browser window
    ///
    /// Falls back to [`Environment::server`] when there is no `window`.
    pub fn browser() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::server();
        };

        let mut env = Self::server()
            .media(Rc::new(BrowserMediaQueries::new(window.clone())))
            .css(Rc::new(BrowserCssSupport))
            .scheduler(Rc::new(BrowserScheduler::new(window.clone())))
            .clock(Rc::new(SystemClock));

        if let Some(root) = ElementRoot::document_element(&window) {
            env = env.root(Rc::new(root));
        }
        // Accessing localStorage throws in some privacy modes
        if let Ok(Some(storage)) = window.local_storage() {
            env = env.store(Rc::new(BrowserStorage::new(storage)));
        }
        env
    }
}

/// A DOM element used as the style root
#[derive(Clone, Debug)]
pub struct ElementRoot {
    element: HtmlElement,
}

impl ElementRoot {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    /// The document's `<html>` element
    pub fn document_element(window: &Window) -> Option<Self> {
        window
            .document()?
            .document_element()?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(Self::new)
    }
}

impl StyleRoot for ElementRoot {
    fn set_property(&self, name: &str, value: &str) -> Result<()> {
        self.element
            .style()
            .set_property(name, value)
            .map_err(js_error)
    }

    fn property(&self, name: &str) -> Option<String> {
        self.element
            .style()
            .get_property_value(name)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn remove_property(&self, name: &str) -> Result<()> {
        self.element
            .style()
            .remove_property(name)
            .map(|_| ())
            .map_err(js_error)
    }

    fn property_names(&self) -> Vec<String> {
        let style = self.element.style();
        (0..style.length()).map(|idx| style.item(idx)).collect()
    }

    fn add_class(&self, class: &str) -> Result<()> {
        self.element.class_list().add_1(class).map_err(js_error)
    }

    fn remove_class(&self, class: &str) -> Result<()> {
        self.element.class_list().remove_1(class).map_err(js_error)
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.element.set_attribute(name, value).map_err(js_error)
    }

    fn remove_attribute(&self, name: &str) -> Result<()> {
        self.element.remove_attribute(name).map_err(js_error)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }
}

/// `window.localStorage`
#[derive(Clone, Debug)]
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(|err| {
            let message = js_error(err).to_string();
            if message.contains("Quota") {
                PlatformError::QuotaExceeded(message)
            } else {
                PlatformError::Storage(message)
            }
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let len = self.storage.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for idx in 0..len {
            if let Some(key) = self.storage.key(idx).map_err(js_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// `window.matchMedia`
///
/// Older engines expose `MediaQueryList` without `EventTarget`, so watching
/// falls back from `addEventListener("change")` to `addListener`.
#[derive(Clone, Debug)]
pub struct BrowserMediaQueries {
    window: Window,
}

impl BrowserMediaQueries {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn query_list(&self, query: &str) -> Option<MediaQueryList> {
        self.window.match_media(query).ok().flatten()
    }
}

impl MediaQueries for BrowserMediaQueries {
    fn matches(&self, query: &str) -> Option<bool> {
        self.query_list(query).map(|mql| mql.matches())
    }

    fn watch(&self, query: &str, listener: MediaListener) -> Option<MediaWatch> {
        let mql = self.query_list(query)?;
        let closure = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |event: MediaQueryListEvent| listener(event.matches()),
        );
        let callback: js_sys::Function =
            closure.as_ref().unchecked_ref::<js_sys::Function>().clone();

        let modern = mql
            .add_event_listener_with_callback("change", &callback)
            .is_ok();
        if !modern {
            if let Err(err) = mql.add_listener_with_opt_callback(Some(&callback)) {
                tracing::debug!("media query `{}` can't be watched: {:?}", query, err);
                return None;
            }
        }

        let query = query.to_string();
        Some(MediaWatch::new(move || {
            let removed = if modern {
                mql.remove_event_listener_with_callback("change", &callback)
            } else {
                mql.remove_listener_with_opt_callback(Some(&callback))
            };
            if let Err(err) = removed {
                tracing::debug!("media query `{}` listener can't be removed: {:?}", query, err);
            }
            drop(closure);
        }))
    }
}

/// `CSS.supports`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCssSupport;

impl CssSupport for BrowserCssSupport {
    fn supports(&self, property: &str, value: &str) -> Result<bool> {
        web_sys::css::supports_with_value(property, value).map_err(js_error)
    }
}

/// `window.setTimeout`
#[derive(Clone, Debug)]
pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) -> Option<TimerId> {
        let callback = Closure::once_into_js(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            )
            .map(|handle| TimerId(handle as u64))
            .map_err(|err| tracing::debug!("setTimeout failed: {:?}", err))
            .ok()
    }

    fn clear_timeout(&self, id: TimerId) {
        self.window.clear_timeout_with_handle(id.0 as i32);
    }
}
