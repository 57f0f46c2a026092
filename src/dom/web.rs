//! Browser host (wasm32 only).
//!
//! `WebDom` implements the page contract over web-sys. `start` mounts a
//! `Page` on the live document and wires browser events, timers and
//! intersection observers to it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollToOptions, Window,
};

use super::handles::{HandleTable, InstalledTimers};
use super::{Content, Dom, NewElement, ScrollBehavior};
use crate::config::Config;
use crate::core::observers::ObserverCommand;
use crate::core::timers::TimerSpec;
use crate::core::{Clock, ObserverId, Page, PageEvent, TimerKind};

/// Attribute carrying an element's handle.
const HANDLE_ATTRIBUTE: &str = "data-site-node";

/// Key into the host's element table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WebNode(u32);

pub struct WebDom {
    window: Window,
    document: Document,
    body: WebNode,
    table: RefCell<HandleTable<Element>>,
}

impl WebDom {
    pub fn new(window: Window) -> Option<Self> {
        let document = window.document()?;
        let body: Element = document.body()?.into();
        let dom = Self {
            window,
            document,
            body: WebNode(0),
            table: RefCell::new(HandleTable::new()),
        };
        dom.intern(body);
        Some(dom)
    }

    /// Handle for `element`, assigning a new one on first sight.
    ///
    /// The handle is stored on the element itself, so lookups are a
    /// single attribute read.
    pub fn intern(&self, element: Element) -> WebNode {
        let mut table = self.table.borrow_mut();
        let stored = element.get_attribute(HANDLE_ATTRIBUTE);
        if let Some(key) = table.lookup(stored.as_deref(), &element) {
            return WebNode(key);
        }

        let key = table.insert(element.clone());
        let _ = element.set_attribute(HANDLE_ATTRIBUTE, &key.to_string());
        WebNode(key)
    }

    pub fn element(&self, node: WebNode) -> Option<Element> {
        self.table.borrow().get(node.0).cloned()
    }

    /// Forget the handles of every interned element below `root`.
    fn forget_descendants(&self, root: &Element) {
        let Ok(list) = root.query_selector_all(&format!("[{HANDLE_ATTRIBUTE}]")) else {
            return;
        };
        let mut table = self.table.borrow_mut();
        for index in 0..list.length() {
            let stored = list
                .get(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
                .and_then(|element| element.get_attribute(HANDLE_ATTRIBUTE));
            if let Some(stored) = stored {
                table.forget(&stored);
            }
        }
    }

    /// Number of live handles.
    pub fn handle_count(&self) -> usize {
        self.table.borrow().len()
    }

    fn html(&self, node: WebNode) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }

    fn collect(&self, list: Option<web_sys::NodeList>) -> Vec<WebNode> {
        let Some(list) = list else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(element))
            .collect()
    }
}

impl Dom for WebDom {
    type Node = WebNode;

    fn body(&self) -> WebNode {
        self.body
    }

    fn query(&self, selector: &str) -> Option<WebNode> {
        let element = self.document.query_selector(selector).ok()??;
        Some(self.intern(element))
    }

    fn query_all(&self, selector: &str) -> Vec<WebNode> {
        self.collect(self.document.query_selector_all(selector).ok())
    }

    fn query_within(&self, root: WebNode, selector: &str) -> Option<WebNode> {
        let element = self.element(root)?.query_selector(selector).ok()??;
        Some(self.intern(element))
    }

    fn query_all_within(&self, root: WebNode, selector: &str) -> Vec<WebNode> {
        let list = self
            .element(root)
            .and_then(|root| root.query_selector_all(selector).ok());
        self.collect(list)
    }

    fn element_by_id(&self, id: &str) -> Option<WebNode> {
        let element = self.document.get_element_by_id(id)?;
        Some(self.intern(element))
    }

    fn parent(&self, node: WebNode) -> Option<WebNode> {
        let parent = self.element(node)?.parent_element()?;
        Some(self.intern(parent))
    }

    fn tag_name(&self, node: WebNode) -> String {
        self.element(node)
            .map(|element| element.tag_name().to_ascii_lowercase())
            .unwrap_or_default()
    }

    fn has_class(&self, node: WebNode, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn add_class(&mut self, node: WebNode, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, node: WebNode, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn attribute(&self, node: WebNode, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&mut self, node: WebNode, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.set_attribute(name, value);
        }
    }

    fn has_attribute(&self, node: WebNode, name: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.has_attribute(name))
    }

    fn value(&self, node: WebNode) -> String {
        let Some(element) = self.element(node) else {
            return String::new();
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_value(&mut self, node: WebNode, value: &str) {
        let Some(element) = self.element(node) else {
            return;
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn set_text(&mut self, node: WebNode, text: &str) {
        if let Some(element) = self.element(node) {
            self.forget_descendants(&element);
            element.set_text_content(Some(text));
        }
    }

    fn set_inner_html(&mut self, node: WebNode, html: &str) {
        if let Some(element) = self.element(node) {
            self.forget_descendants(&element);
            element.set_inner_html(html);
        }
    }

    fn append_element(&mut self, parent: WebNode, spec: &NewElement<'_>) -> Option<WebNode> {
        let parent = self.element(parent)?;
        let element = self.document.create_element(spec.tag).ok()?;
        if let Some(class) = spec.class {
            element.set_class_name(class);
        }
        for (name, value) in &spec.attributes {
            let _ = element.set_attribute(name, value);
        }
        match spec.content {
            Content::Empty => {}
            Content::Text(text) => element.set_text_content(Some(text)),
            Content::Html(html) => element.set_inner_html(html),
        }
        parent.append_child(&element).ok()?;
        Some(self.intern(element))
    }

    fn clear_children(&mut self, node: WebNode) {
        if let Some(element) = self.element(node) {
            self.forget_descendants(&element);
            element.set_inner_html("");
        }
    }

    fn remove(&mut self, node: WebNode) {
        if node == self.body {
            return;
        }
        if let Some(element) = self.element(node) {
            self.forget_descendants(&element);
            self.table.borrow_mut().forget(&node.0.to_string());
            element.remove();
        }
    }

    fn set_style(&mut self, node: WebNode, property: &str, value: Option<&str>) {
        let Some(element) = self.html(node) else {
            return;
        };
        let style = element.style();
        let _ = match value {
            Some(value) => style.set_property(property, value),
            None => style.remove_property(property).map(|_| ()),
        };
    }

    fn offset_top(&self, node: WebNode) -> f64 {
        self.html(node).map_or(0.0, |element| f64::from(element.offset_top()))
    }

    fn offset_height(&self, node: WebNode) -> f64 {
        self.html(node)
            .map_or(0.0, |element| f64::from(element.offset_height()))
    }

    fn scroll_height(&self, node: WebNode) -> f64 {
        self.element(node)
            .map_or(0.0, |element| f64::from(element.scroll_height()))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn reset_form(&mut self, form: WebNode) {
        if let Some(form) = self
            .element(form)
            .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }
}

struct Host {
    page: Page<WebDom>,
    window: Window,
    timers: InstalledTimers,
    observers: HashMap<ObserverId, IntersectionObserver>,
}

type SharedHost = Rc<RefCell<Host>>;

fn fire(shared: &SharedHost, spec: TimerSpec) {
    {
        let mut host = shared.borrow_mut();
        host.timers.fired(spec.id);
        host.page.fire_timer(spec.id);
    }
    sync(shared);
}

/// Install browser timers and observers the controllers asked for since the
/// last call.
fn sync(shared: &SharedHost) {
    let mut guard = shared.borrow_mut();
    let host = &mut *guard;

    for spec in host.page.context_mut().timers.take_created() {
        let timer_host = Rc::clone(shared);
        let period = i32::try_from(spec.period_ms).unwrap_or(i32::MAX);
        let handle = match spec.kind {
            TimerKind::Interval => {
                let callback = Closure::<dyn FnMut()>::new(move || fire(&timer_host, spec));
                let handle = host
                    .window
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        callback.as_ref().unchecked_ref(),
                        period,
                    );
                callback.forget();
                handle
            }
            TimerKind::Timeout => {
                // Freed by the browser after its single call.
                let callback = Closure::once_into_js(move || fire(&timer_host, spec));
                host.window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        callback.unchecked_ref(),
                        period,
                    )
            }
        };
        match handle {
            Ok(handle) => {
                host.timers.install(spec.id, spec.kind, handle);
            }
            Err(err) => tracing::warn!(?err, "timer not installed"),
        }
    }

    for id in host.page.context_mut().timers.take_cancelled() {
        match host.timers.cancel(id) {
            Some((TimerKind::Interval, handle)) => host.window.clear_interval_with_handle(handle),
            Some((TimerKind::Timeout, handle)) => host.window.clear_timeout_with_handle(handle),
            None => {}
        }
    }

    for command in host.page.context_mut().observers.take_commands() {
        match command {
            ObserverCommand::Create {
                observer,
                threshold,
            } => {
                let observer_host = Rc::clone(shared);
                let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                    move |entries: js_sys::Array, _: IntersectionObserver| {
                        for entry in entries.iter() {
                            let entry: IntersectionObserverEntry = entry.unchecked_into();
                            {
                                let mut host = observer_host.borrow_mut();
                                let target = host.page.dom().intern(entry.target());
                                host.page.dispatch(PageEvent::intersection(
                                    observer,
                                    target,
                                    entry.is_intersecting(),
                                ));
                            }
                            sync(&observer_host);
                        }
                    },
                );
                let init = IntersectionObserverInit::new();
                init.set_threshold(&JsValue::from_f64(threshold));
                match IntersectionObserver::new_with_options(
                    callback.as_ref().unchecked_ref(),
                    &init,
                ) {
                    Ok(browser_observer) => {
                        host.observers.insert(observer, browser_observer);
                    }
                    Err(err) => tracing::warn!(?err, "intersection observer not created"),
                }
                callback.forget();
            }
            ObserverCommand::Observe { observer, node } => {
                if let (Some(browser_observer), Some(element)) =
                    (host.observers.get(&observer), host.page.dom().element(node))
                {
                    browser_observer.observe(&element);
                }
            }
            ObserverCommand::Unobserve { observer, node } => {
                if let (Some(browser_observer), Some(element)) =
                    (host.observers.get(&observer), host.page.dom().element(node))
                {
                    browser_observer.unobserve(&element);
                }
            }
        }
    }
}

/// Forward one DOM event type to the page.
fn listen(
    target: &EventTarget,
    kind: &str,
    shared: &SharedHost,
    to_event: fn(Option<WebNode>) -> Option<PageEvent<WebNode>>,
) -> Result<(), JsValue> {
    let listener_host = Rc::clone(shared);
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let result = {
            let mut host = listener_host.borrow_mut();
            let node = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .map(|element| host.page.dom().intern(element));
            let Some(page_event) = to_event(node) else {
                return;
            };
            host.page.dispatch(page_event)
        };
        if result.prevents_default() {
            event.prevent_default();
        }
        sync(&listener_host);
    });
    target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn mount(window: Window) -> Result<(), JsValue> {
    let config = Config::embedded().map_err(|err| JsValue::from_str(&format!("{err:#}")))?;
    let dom = WebDom::new(window.clone()).ok_or_else(|| JsValue::from_str("no document body"))?;
    let document = dom.document.clone();

    let shared: SharedHost = Rc::new(RefCell::new(Host {
        page: Page::mount_for_host(dom, &config, Clock::System),
        window: window.clone(),
        timers: InstalledTimers::new(),
        observers: HashMap::new(),
    }));

    listen(&document, "click", &shared, |node| node.map(PageEvent::click))?;
    listen(&document, "submit", &shared, |node| node.map(PageEvent::submit))?;
    listen(&document, "input", &shared, |node| node.map(PageEvent::input))?;
    listen(&document, "change", &shared, |node| node.map(PageEvent::change))?;
    listen(&window, "scroll", &shared, |_| Some(PageEvent::Scroll))?;
    sync(&shared);
    Ok(())
}

/// Entry point called when the module loads.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != "loading" {
        return mount(window);
    }

    let callback = Closure::<dyn FnMut()>::once(move || {
        if let Err(err) = mount(window) {
            web_sys::console::error_1(&err);
        }
    });
    document.add_event_listener_with_callback(
        "DOMContentLoaded",
        callback.as_ref().unchecked_ref(),
    )?;
    callback.forget();
    Ok(())
}
