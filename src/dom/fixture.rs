//! TOML page fixtures for headless runs.
//!
//! A fixture is the markup contract written as nested tables:
//!
//! ```toml
//! [[elements]]
//! tag = "header"
//! height = 80.0
//!
//! [[elements.children]]
//! tag = "button"
//! class = "mobile-menu-btn"
//! ```
//!
//! Layout numbers (`top`, `height`, `scroll_height`) stand in for the
//! values a browser would compute.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DEMO_PAGE: &str = include_str!("../../defaults/page.toml");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageFixture {
    /// Children of `<body>`.
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    /// Initial viewport scroll offset.
    #[serde(default)]
    pub scroll_y: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Space-separated class list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Initial (and default) value of a form control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub scroll_height: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_layout(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    pub fn with_child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

impl PageFixture {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse page fixture")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read page fixture: {:?}", path))?;
        Self::from_toml(&contents).with_context(|| format!("In page fixture {:?}", path))
    }

    /// The bundled marketing page used by `simulate` and the tests.
    pub fn demo() -> Result<Self> {
        Self::from_toml(DEMO_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_page_parses() {
        let page = PageFixture::demo().unwrap();
        assert!(!page.elements.is_empty());
    }

    #[test]
    fn test_nested_fixture() {
        let page = PageFixture::from_toml(
            r#"
            scroll_y = 40.0

            [[elements]]
            tag = "form"

            [[elements.children]]
            tag = "input"
            attrs = { type = "email", required = "" }
            value = "a@b.com"
            "#,
        )
        .unwrap();
        assert_eq!(page.scroll_y, 40.0);
        let input = &page.elements[0].children[0];
        assert_eq!(input.attrs.get("type").map(String::as_str), Some("email"));
        assert_eq!(input.value.as_deref(), Some("a@b.com"));
    }
}
