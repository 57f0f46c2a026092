//! In-memory page used for headless simulation and tests.

use indextree::{Arena, NodeId};
use serde::Serialize;
use std::collections::BTreeMap;

use super::fixture::{ElementSpec, PageFixture};
use super::selector::{ElementAdapter, SelectorList};
use super::{Content, Dom, NewElement, ScrollBehavior};

#[derive(Debug, Clone, Default)]
struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    html: Option<String>,
    style: BTreeMap<String, String>,
    value: String,
    default_value: String,
    top: f64,
    height: f64,
    scroll_height: f64,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        if name == "class" {
            self.classes = value.split_whitespace().map(str::to_string).collect();
            return;
        }
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }
}

/// A scroll request recorded by `scroll_to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// JSON-friendly view of one element, produced by [`MemoryDom::snapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub scroll_y: f64,
    pub body: NodeSnapshot,
}

/// Arena-backed DOM tree rooted at `<body>`.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    arena: Arena<ElementData>,
    body: NodeId,
    scroll_y: f64,
    scroll_log: Vec<ScrollRequest>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let body = arena.new_node(ElementData::new("body"));
        Self {
            arena,
            body,
            scroll_y: 0.0,
            scroll_log: Vec::new(),
        }
    }

    pub fn from_fixture(fixture: &PageFixture) -> Self {
        let mut dom = Self::new();
        dom.scroll_y = fixture.scroll_y;
        let body = dom.body;
        for spec in &fixture.elements {
            dom.insert_spec(body, spec);
        }
        dom
    }

    /// Append an element (and its subtree) described by a fixture spec.
    pub fn insert_spec(&mut self, parent: NodeId, spec: &ElementSpec) -> NodeId {
        let mut data = ElementData::new(&spec.tag);
        if let Some(id) = &spec.id {
            data.set_attr("id", id);
        }
        if let Some(class) = &spec.class {
            data.set_attr("class", class);
        }
        for (name, value) in &spec.attrs {
            data.set_attr(name, value);
        }
        if let Some(text) = &spec.text {
            data.text = text.clone();
        }
        if let Some(value) = &spec.value {
            data.value = value.clone();
            data.default_value = value.clone();
        }
        data.top = spec.top;
        data.height = spec.height;
        data.scroll_height = spec.scroll_height;

        let node = self.arena.new_node(data);
        parent.append(node, &mut self.arena);
        for child in &spec.children {
            self.insert_spec(node, child);
        }
        node
    }

    fn data(&self, node: NodeId) -> Option<&ElementData> {
        self.arena
            .get(node)
            .filter(|entry| !entry.is_removed())
            .map(|entry| entry.get())
    }

    fn data_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        self.arena
            .get_mut(node)
            .filter(|entry| !entry.is_removed())
            .map(|entry| entry.get_mut())
    }

    fn live(&self, node: NodeId) -> bool {
        self.data(node).is_some()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        if !self.live(node) {
            return Vec::new();
        }
        node.children(&self.arena).collect()
    }

    /// Text content, or the raw HTML if the element was filled with markup.
    pub fn content(&self, node: NodeId) -> String {
        self.data(node)
            .map(|data| data.html.clone().unwrap_or_else(|| data.text.clone()))
            .unwrap_or_default()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.data(node)
            .and_then(|data| data.style.get(property).cloned())
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn last_scroll(&self) -> Option<ScrollRequest> {
        self.scroll_log.last().copied()
    }

    pub fn scroll_log(&self) -> &[ScrollRequest] {
        &self.scroll_log
    }

    fn adapter(&self) -> TreeAdapter<'_> {
        TreeAdapter { arena: &self.arena }
    }

    fn select(&self, root: NodeId, selector: &str, include_root: bool) -> Vec<NodeId> {
        if !self.live(root) {
            return Vec::new();
        }
        let list = SelectorList::parse(selector);
        let adapter = self.adapter();
        root.descendants(&self.arena)
            .skip(usize::from(!include_root))
            .filter(|&node| list.matches(&adapter, node))
            .collect()
    }

    fn snapshot_node(&self, node: NodeId) -> NodeSnapshot {
        let data = self.data(node).cloned().unwrap_or_default();
        NodeSnapshot {
            tag: data.tag,
            classes: data.classes,
            attrs: data.attrs.into_iter().collect(),
            text: data.text,
            html: data.html,
            value: data.value,
            style: data.style,
            children: self
                .children(node)
                .into_iter()
                .map(|child| self.snapshot_node(child))
                .collect(),
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            scroll_y: self.scroll_y,
            body: self.snapshot_node(self.body),
        }
    }
}

/// Read-only view of the arena for selector matching.
struct TreeAdapter<'a> {
    arena: &'a Arena<ElementData>,
}

impl TreeAdapter<'_> {
    fn data(&self, element: NodeId) -> Option<&ElementData> {
        self.arena
            .get(element)
            .filter(|entry| !entry.is_removed())
            .map(|entry| entry.get())
    }
}

impl ElementAdapter for TreeAdapter<'_> {
    type Handle = NodeId;

    fn parent(&self, element: NodeId) -> Option<NodeId> {
        self.arena
            .get(element)
            .filter(|entry| !entry.is_removed())
            .and_then(|entry| entry.parent())
    }

    fn tag_name(&self, element: NodeId) -> &str {
        self.data(element).map_or("", |data| data.tag.as_str())
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.data(element)
            .is_some_and(|data| data.classes.iter().any(|c| c == class))
    }

    fn attr(&self, element: NodeId, name: &str) -> Option<&str> {
        self.data(element).and_then(|data| data.attr(name))
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn body(&self) -> NodeId {
        self.body
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.select(self.body, selector, true).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.body, selector, true)
    }

    fn query_within(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        self.select(root, selector, false).into_iter().next()
    }

    fn query_all_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        self.select(root, selector, false)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.body
            .descendants(&self.arena)
            .find(|&node| self.data(node).and_then(|data| data.attr("id")) == Some(id))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.adapter().parent(node)
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.adapter().tag_name(node).to_string()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.adapter().has_class(node, class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.data_mut(node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.data_mut(node) {
            data.classes.retain(|c| c != class);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let data = self.data(node)?;
        if name == "class" {
            return Some(data.classes.join(" "));
        }
        data.attr(name).map(str::to_string)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.data_mut(node) {
            data.set_attr(name, value);
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.data(node).map(|data| data.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(data) = self.data_mut(node) {
            data.value = value.to_string();
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        if let Some(data) = self.data_mut(node) {
            data.text = text.to_string();
            data.html = None;
        }
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        self.clear_children(node);
        if let Some(data) = self.data_mut(node) {
            data.text.clear();
            data.html = Some(html.to_string());
        }
    }

    fn append_element(&mut self, parent: NodeId, element: &NewElement<'_>) -> Option<NodeId> {
        if !self.live(parent) {
            return None;
        }
        let mut data = ElementData::new(element.tag);
        if let Some(class) = element.class {
            data.set_attr("class", class);
        }
        for (name, value) in &element.attributes {
            data.set_attr(name, value);
            if *name == "value" {
                data.value = value.to_string();
                data.default_value = value.to_string();
            }
        }
        match element.content {
            Content::Empty => {}
            Content::Text(text) => data.text = text.to_string(),
            Content::Html(html) => data.html = Some(html.to_string()),
        }
        let node = self.arena.new_node(data);
        parent.append(node, &mut self.arena);
        Some(node)
    }

    fn clear_children(&mut self, node: NodeId) {
        for child in self.children(node) {
            child.remove_subtree(&mut self.arena);
        }
    }

    fn remove(&mut self, node: NodeId) {
        if node != self.body && self.live(node) {
            node.remove_subtree(&mut self.arena);
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: Option<&str>) {
        if let Some(data) = self.data_mut(node) {
            match value {
                Some(value) => {
                    data.style.insert(property.to_string(), value.to_string());
                }
                None => {
                    data.style.remove(property);
                }
            }
        }
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.data(node).map_or(0.0, |data| data.top)
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.data(node).map_or(0.0, |data| data.height)
    }

    fn scroll_height(&self, node: NodeId) -> f64 {
        self.data(node).map_or(0.0, |data| data.scroll_height)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_log.push(ScrollRequest { top, behavior });
        self.scroll_y = top.max(0.0);
    }

    fn reset_form(&mut self, form: NodeId) {
        for field in self.select(form, "input, textarea, select", false) {
            if let Some(data) = self.data_mut(field) {
                data.value = data.default_value.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryDom {
        let fixture = PageFixture {
            elements: vec![
                ElementSpec::new("nav").with_class("nav-menu").with_child(
                    ElementSpec::new("a")
                        .with_attr("href", "#faq")
                        .with_class("link"),
                ),
                ElementSpec::new("section")
                    .with_id("faq")
                    .with_layout(900.0, 300.0)
                    .with_child(ElementSpec::new("p").with_class("link")),
                ElementSpec::new("form").with_child(
                    ElementSpec::new("div").with_child(
                        ElementSpec::new("input")
                            .with_attr("type", "tel")
                            .with_value("555"),
                    ),
                ),
            ],
            scroll_y: 0.0,
        };
        MemoryDom::from_fixture(&fixture)
    }

    #[test]
    fn test_queries() {
        let dom = sample();
        assert_eq!(dom.query_all(".link").len(), 2);
        assert_eq!(dom.query_all(".nav-menu a").len(), 1);
        assert_eq!(dom.query_all("a[href^=\"#\"]").len(), 1);
        assert_eq!(dom.query_all("form > input").len(), 0);
        assert_eq!(dom.query_all("form input[type=\"tel\"]").len(), 1);
        assert!(dom.query(".missing").is_none());

        let faq = dom.element_by_id("faq").unwrap();
        assert_eq!(dom.offset_top(faq), 900.0);
        assert!(dom.element_by_id("").is_none());
    }

    #[test]
    fn test_query_within_excludes_root() {
        let dom = sample();
        let section = dom.element_by_id("faq").unwrap();
        assert!(dom.query_within(section, "section").is_none());
        assert!(dom.query_within(section, "p").is_some());
    }

    #[test]
    fn test_contains_walks_ancestors() {
        let dom = sample();
        let nav = dom.query(".nav-menu").unwrap();
        let link = dom.query(".nav-menu a").unwrap();
        assert!(dom.contains(nav, link));
        assert!(dom.contains(link, link));
        assert!(!dom.contains(link, nav));
    }

    #[test]
    fn test_append_remove_and_reset() {
        let mut dom = sample();
        let form = dom.query("form").unwrap();
        let input = dom.query("input").unwrap();
        dom.set_value(input, "5551234567");

        let msg = dom
            .append_element(form, &NewElement::new("div").class("note").text("hi"))
            .unwrap();
        assert_eq!(dom.query_all_within(form, ".note").len(), 1);
        assert_eq!(dom.content(msg), "hi");

        dom.remove(msg);
        assert!(dom.query_within(form, ".note").is_none());

        dom.reset_form(form);
        assert_eq!(dom.value(input), "555");
    }

    #[test]
    fn test_classes_and_styles() {
        let mut dom = sample();
        let body = dom.body();
        dom.add_class(body, "nav-open");
        dom.add_class(body, "nav-open");
        assert_eq!(dom.attribute(body, "class").as_deref(), Some("nav-open"));
        dom.set_class(body, "nav-open", false);
        assert!(!dom.has_class(body, "nav-open"));

        dom.set_style(body, "max-height", Some("40px"));
        assert_eq!(dom.style(body, "max-height").as_deref(), Some("40px"));
        dom.set_style(body, "max-height", None);
        assert!(dom.style(body, "max-height").is_none());
    }

    #[test]
    fn test_scroll_log() {
        let mut dom = sample();
        dom.scroll_to(-10.0, ScrollBehavior::Smooth);
        assert_eq!(dom.scroll_y(), 0.0);
        assert_eq!(
            dom.last_scroll(),
            Some(ScrollRequest {
                top: -10.0,
                behavior: ScrollBehavior::Smooth
            })
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let dom = sample();
        let json = serde_json::to_value(dom.snapshot()).unwrap();
        assert_eq!(json["body"]["tag"], "body");
        assert_eq!(json["body"]["children"][0]["classes"][0], "nav-menu");
    }
}
