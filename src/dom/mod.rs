//! DOM abstraction layer
//!
//! This module defines the `Dom` trait every controller talks to. It is the
//! whole page contract: queries by selector, class toggles, attributes,
//! field values, injected content, inline styles and a few layout reads.
//! `MemoryDom` implements it for headless runs and tests; on wasm32 the
//! browser host implements it over web-sys.

pub mod classes;
pub mod fixture;
pub mod handles;
pub mod memory;
pub mod selector;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::fmt::Debug;
use std::hash::Hash;

pub use fixture::{ElementSpec, PageFixture};
pub use memory::MemoryDom;

/// How `scroll_to` should move the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// Body of an element created by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content<'a> {
    Empty,
    Text(&'a str),
    Html(&'a str),
}

/// Description of an element to create and append.
#[derive(Debug, Clone)]
pub struct NewElement<'a> {
    pub tag: &'a str,
    pub class: Option<&'a str>,
    pub content: Content<'a>,
    pub attributes: Vec<(&'a str, &'a str)>,
}

impl<'a> NewElement<'a> {
    pub fn new(tag: &'a str) -> Self {
        Self {
            tag,
            class: None,
            content: Content::Empty,
            attributes: Vec::new(),
        }
    }

    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn text(mut self, text: &'a str) -> Self {
        self.content = Content::Text(text);
        self
    }

    pub fn html(mut self, html: &'a str) -> Self {
        self.content = Content::Html(html);
        self
    }

    pub fn attribute(mut self, name: &'a str, value: &'a str) -> Self {
        self.attributes.push((name, value));
        self
    }
}

/// The page as seen by controllers.
///
/// Reads never fail: a selector that matches nothing yields `None` or an
/// empty list, and writes to a node that has gone away are ignored.
pub trait Dom {
    /// Stable handle to one element.
    type Node: Copy + Eq + Hash + Debug + 'static;

    fn body(&self) -> Self::Node;

    /// First match in document order.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn query_within(&self, root: Self::Node, selector: &str) -> Option<Self::Node>;
    fn query_all_within(&self, root: Self::Node, selector: &str) -> Vec<Self::Node>;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    fn tag_name(&self, node: Self::Node) -> String;

    /// True when `node` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent(candidate);
        }
        false
    }

    fn has_class(&self, node: Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: Self::Node, class: &str);
    fn remove_class(&mut self, node: Self::Node, class: &str);

    fn set_class(&mut self, node: Self::Node, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    fn has_attribute(&self, node: Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Current value of a form control.
    fn value(&self, node: Self::Node) -> String;
    fn set_value(&mut self, node: Self::Node, value: &str);

    fn set_text(&mut self, node: Self::Node, text: &str);
    fn set_inner_html(&mut self, node: Self::Node, html: &str);

    fn append_element(&mut self, parent: Self::Node, element: &NewElement<'_>) -> Option<Self::Node>;
    fn clear_children(&mut self, node: Self::Node);
    fn remove(&mut self, node: Self::Node);

    /// Set an inline style property, or clear it with `None`.
    fn set_style(&mut self, node: Self::Node, property: &str, value: Option<&str>);

    fn offset_top(&self, node: Self::Node) -> f64;
    fn offset_height(&self, node: Self::Node) -> f64;
    fn scroll_height(&self, node: Self::Node) -> f64;

    fn scroll_y(&self) -> f64;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Restore every control of a form to its default value.
    fn reset_form(&mut self, form: Self::Node);
}
