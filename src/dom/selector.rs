//! CSS selector subset used by the page contract.
//!
//! Supported: type, `.class`, `#id`, `[attr]`, `[attr=value]`,
//! `[attr^=prefix]`, `*`, descendant (whitespace) and child (`>`)
//! combinators, and comma-separated lists.

/// DOM access needed to match selectors. Implemented by `MemoryDom`.
pub trait ElementAdapter {
    type Handle: Copy + Eq;

    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;
    /// Tag name in ASCII lowercase.
    fn tag_name(&self, element: Self::Handle) -> &str;
    fn has_class(&self, element: Self::Handle, class: &str) -> bool;
    fn attr(&self, element: Self::Handle, name: &str) -> Option<&str>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Type(String),
    Class(String),
    Id(String),
    AttrExists(String),
    AttrEquals { name: String, value: String },
    AttrPrefix { name: String, prefix: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// Compounds left to right; `combinators[i]` sits between
/// `compounds[i]` and `compounds[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse a comma-separated list. Any part using unsupported syntax
    /// (pseudo-classes, sibling combinators, ...) empties the whole list.
    pub fn parse(input: &str) -> Self {
        let parsed: Option<Vec<ComplexSelector>> = input
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_complex)
            .collect();
        let selectors = parsed
            .unwrap_or_default()
            .into_iter()
            .filter(|sel| !sel.compounds.is_empty())
            .collect();
        Self { selectors }
    }

    /// True when nothing usable was parsed, so the list can never match.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn matches<A: ElementAdapter>(&self, adapter: &A, element: A::Handle) -> bool {
        self.selectors
            .iter()
            .any(|sel| matches_complex(adapter, element, sel))
    }
}

struct Tokenizer<'a> {
    bytes: &'a [u8],
    index: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            index: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.index).copied()
    }

    fn bump(&mut self) {
        self.index += 1;
    }

    fn skip_spaces(&mut self) -> bool {
        let start = self.index;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.bump();
        }
        self.index > start
    }

    fn ident(&mut self) -> String {
        let start = self.index;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            self.bump();
        }
        String::from_utf8_lossy(&self.bytes[start..self.index]).into_owned()
    }

    fn attr_value(&mut self) -> String {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.bump();
                let start = self.index;
                while self.peek().is_some_and(|b| b != quote) {
                    self.bump();
                }
                let value = String::from_utf8_lossy(&self.bytes[start..self.index]).into_owned();
                if self.peek().is_some() {
                    self.bump();
                }
                value
            }
            _ => {
                let start = self.index;
                while self
                    .peek()
                    .is_some_and(|b| !b.is_ascii_whitespace() && b != b']')
                {
                    self.bump();
                }
                String::from_utf8_lossy(&self.bytes[start..self.index]).into_owned()
            }
        }
    }

    fn attribute(&mut self) -> SimpleSelector {
        // past '['
        self.skip_spaces();
        let name = self.ident().to_ascii_lowercase();
        self.skip_spaces();
        let selector = match self.peek() {
            Some(b'=') => {
                self.bump();
                self.skip_spaces();
                SimpleSelector::AttrEquals {
                    name,
                    value: self.attr_value(),
                }
            }
            Some(b'^') if self.bytes.get(self.index + 1) == Some(&b'=') => {
                self.index += 2;
                self.skip_spaces();
                SimpleSelector::AttrPrefix {
                    name,
                    prefix: self.attr_value(),
                }
            }
            _ => SimpleSelector::AttrExists(name),
        };
        self.skip_spaces();
        if self.peek() == Some(b']') {
            self.bump();
        }
        selector
    }
}

fn parse_complex(input: &str) -> Option<ComplexSelector> {
    let mut tokens = Tokenizer::new(input);
    let mut selector = ComplexSelector::default();
    let mut current = CompoundSelector::default();
    let mut pending: Option<Combinator> = None;

    tokens.skip_spaces();
    while let Some(byte) = tokens.peek() {
        if byte.is_ascii_whitespace() {
            tokens.skip_spaces();
            if pending.is_none() && !current.simples.is_empty() {
                pending = Some(Combinator::Descendant);
            }
            continue;
        }

        if byte == b'>' {
            tokens.bump();
            pending = Some(Combinator::Child);
            continue;
        }

        // A new simple selector after a combinator starts a new compound.
        if let Some(comb) = pending.take() {
            if !current.simples.is_empty() {
                selector.compounds.push(std::mem::take(&mut current));
                selector.combinators.push(comb);
            }
        }

        let simple = match byte {
            b'*' => {
                tokens.bump();
                SimpleSelector::Universal
            }
            b'.' => {
                tokens.bump();
                SimpleSelector::Class(tokens.ident())
            }
            b'#' => {
                tokens.bump();
                SimpleSelector::Id(tokens.ident())
            }
            b'[' => {
                tokens.bump();
                tokens.attribute()
            }
            _ => {
                let ident = tokens.ident();
                if ident.is_empty() {
                    tracing::debug!(selector = input, "unsupported selector syntax");
                    return None;
                }
                SimpleSelector::Type(ident.to_ascii_lowercase())
            }
        };
        current.simples.push(simple);
    }

    if !current.simples.is_empty() {
        selector.compounds.push(current);
    } else if !selector.compounds.is_empty() {
        // Trailing combinator with nothing after it.
        selector.combinators.pop();
    }
    Some(selector)
}

fn matches_compound<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    compound: &CompoundSelector,
) -> bool {
    compound.simples.iter().all(|simple| match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(tag) => adapter.tag_name(element) == tag,
        SimpleSelector::Class(class) => adapter.has_class(element, class),
        SimpleSelector::Id(id) => adapter.attr(element, "id") == Some(id.as_str()),
        SimpleSelector::AttrExists(name) => adapter.attr(element, name).is_some(),
        SimpleSelector::AttrEquals { name, value } => {
            adapter.attr(element, name) == Some(value.as_str())
        }
        SimpleSelector::AttrPrefix { name, prefix } => adapter
            .attr(element, name)
            .is_some_and(|value| value.starts_with(prefix.as_str())),
    })
}

/// Right-to-left matching with backtracking over descendant combinators.
fn matches_complex<A: ElementAdapter>(adapter: &A, element: A::Handle, sel: &ComplexSelector) -> bool {
    match sel.compounds.len() {
        0 => false,
        n => matches_from(adapter, element, sel, n - 1),
    }
}

fn matches_from<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    sel: &ComplexSelector,
    position: usize,
) -> bool {
    if !matches_compound(adapter, element, &sel.compounds[position]) {
        return false;
    }
    if position == 0 {
        return true;
    }

    match sel.combinators[position - 1] {
        Combinator::Child => adapter
            .parent(element)
            .is_some_and(|parent| matches_from(adapter, parent, sel, position - 1)),
        Combinator::Descendant => {
            let mut ancestor = adapter.parent(element);
            while let Some(candidate) = ancestor {
                if matches_from(adapter, candidate, sel, position - 1) {
                    return true;
                }
                ancestor = adapter.parent(candidate);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound_and_combinators() {
        let list = SelectorList::parse("nav .menu > a[href^=\"#\"], img[data-src]");
        assert_eq!(list.selectors.len(), 2);

        let first = &list.selectors[0];
        assert_eq!(first.compounds.len(), 3);
        assert_eq!(
            first.combinators,
            vec![Combinator::Descendant, Combinator::Child]
        );
        assert_eq!(
            first.compounds[2].simples,
            vec![
                SimpleSelector::Type("a".to_string()),
                SimpleSelector::AttrPrefix {
                    name: "href".to_string(),
                    prefix: "#".to_string()
                }
            ]
        );

        assert_eq!(
            list.selectors[1].compounds[0].simples[1],
            SimpleSelector::AttrExists("data-src".to_string())
        );
    }

    #[test]
    fn test_parse_attr_equals_quoted() {
        let list = SelectorList::parse("input[type=\"tel\"]");
        assert_eq!(
            list.selectors[0].compounds[0].simples[1],
            SimpleSelector::AttrEquals {
                name: "type".to_string(),
                value: "tel".to_string()
            }
        );
    }

    #[test]
    fn test_parse_ignores_empty_parts() {
        let list = SelectorList::parse(" , .a ,");
        assert_eq!(list.selectors.len(), 1);
    }

    #[test]
    fn test_unsupported_syntax_rejects_list() {
        assert!(SelectorList::parse("a:hover").is_empty());
        assert!(SelectorList::parse(".faq-item, li + li").is_empty());
        assert!(SelectorList::parse("h2 ~ p").is_empty());
        assert!(!SelectorList::parse(".faq-item, li > a").is_empty());
    }
}
