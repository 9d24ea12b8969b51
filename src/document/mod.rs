//! Parsed document tree
//!
//! Markup is parsed once into an immutable arena of elements and text nodes.
//! Extractors only ever see [`Document`] and [`Element`]; the HTML parsing
//! library stays behind the [`HtmlParser`] trait.
//!
//! The tree owns all of its strings, so it is `Send + Sync` and can be shared
//! between extractor tasks through an `Arc`.

mod scraper_backend;

pub use scraper_backend::ScraperParser;

/// Elements whose text is never page content
pub const NOISE_TAGS: &[&str] = &["script", "style", "noscript", "nav", "footer", "aside"];

/// Parses raw markup into a document tree
pub trait HtmlParser: Send + Sync {
    /// Parses markup; never fails, malformed input yields a best-effort tree
    fn parse(&self, markup: &str) -> Document;
}

/// Parses markup with the default backend
///
/// # Example
///
/// ```
/// use sumi_lens::document::parse_document;
///
/// let doc = parse_document("<title>Test</title><p>Hello <b>world</b>");
/// let title = doc.select_first("title").unwrap();
/// assert_eq!(doc.text(title), "Test");
/// assert_eq!(doc.count("p"), 1);
/// ```
pub fn parse_document(markup: &str) -> Document {
    ScraperParser.parse(markup)
}

/// Index of a node inside a [`Document`]
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Element(Element),
    Text(String),
}

/// A single element: tag name, attributes and child node ids
#[derive(Debug, Clone)]
pub struct Element {
    id: NodeId,
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<NodeId>,
}

impl Element {
    pub(crate) fn new(id: NodeId, name: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            id,
            name,
            attributes,
            children: Vec::new(),
        }
    }

    /// Position of the element in its document
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Lowercase tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute value, matching the name case-insensitively
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// True when the attribute exists and equals `value` (trimmed, ASCII case-insensitive)
    pub fn attr_is(&self, name: &str, value: &str) -> bool {
        self.attr(name)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
    }

    /// True when the attribute exists and starts with `prefix` (ASCII case-insensitive)
    pub fn attr_starts_with(&self, name: &str, prefix: &str) -> bool {
        self.attr(name).is_some_and(|v| {
            let v = v.trim_start();
            v.len() >= prefix.len()
                && v.is_char_boundary(prefix.len())
                && v[..prefix.len()].eq_ignore_ascii_case(prefix)
        })
    }

    /// True when a whitespace-separated attribute (like `rel`) contains `token`
    pub fn attr_has_token(&self, name: &str, token: &str) -> bool {
        self.attr(name).is_some_and(|v| {
            v.split_ascii_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
    }

    /// All attributes in source order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn is(&self, tag: &str) -> bool {
        tag == "*" || self.name.eq_ignore_ascii_case(tag)
    }
}

/// Immutable, queryable document tree
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    elements: Vec<NodeId>,
    content_text: String,
    has_doctype: bool,
}

impl Document {
    /// Builds a document from pre-order nodes; the first node must be the root
    pub(crate) fn from_nodes(nodes: Vec<Node>, has_doctype: bool) -> Self {
        let elements = nodes
            .iter()
            .enumerate()
            .filter_map(|(id, node)| matches!(node, Node::Element(_)).then_some(id))
            .collect();

        let mut document = Self {
            nodes,
            elements,
            content_text: String::new(),
            has_doctype,
        };
        document.content_text = document.collect_content_text();
        document
    }

    /// An empty document (no elements, no text)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of elements in the tree
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter_map(|&id| self.element(id))
    }

    /// All elements with the given tag (`*` matches any tag)
    pub fn select_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |el| el.is(tag))
    }

    /// First element with the given tag
    pub fn select_first(&self, tag: &str) -> Option<&Element> {
        self.elements().find(|el| el.is(tag))
    }

    /// Elements with the given tag that satisfy `predicate`
    pub fn select_where<'a, P>(
        &'a self,
        tag: &'a str,
        predicate: P,
    ) -> impl Iterator<Item = &'a Element> + 'a
    where
        P: Fn(&Element) -> bool + 'a,
    {
        self.select_all(tag).filter(move |el| predicate(el))
    }

    /// First element with the given tag that satisfies `predicate`
    pub fn first_where<P>(&self, tag: &str, predicate: P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        self.elements().find(|el| el.is(tag) && predicate(el))
    }

    /// Number of elements with the given tag
    pub fn count(&self, tag: &str) -> usize {
        self.select_all(tag).count()
    }

    /// The root `<html>` element, if any
    pub fn root(&self) -> Option<&Element> {
        self.select_first("html")
    }

    /// Concatenated descendant text of an element
    pub fn text(&self, element: &Element) -> String {
        let mut out = String::new();
        let mut stack: Vec<NodeId> = element.children.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            match self.nodes.get(id) {
                Some(Node::Text(text)) => out.push_str(text),
                Some(Node::Element(child)) => stack.extend(child.children.iter().rev()),
                None => {}
            }
        }

        out
    }

    /// Descendant elements of `element` in document order
    pub fn descendants<'a>(&'a self, element: &Element) -> impl Iterator<Item = &'a Element> + 'a {
        let mut stack: Vec<NodeId> = element.children.iter().rev().copied().collect();

        std::iter::from_fn(move || {
            while let Some(id) = stack.pop() {
                if let Some(child) = self.element(id) {
                    stack.extend(child.children.iter().rev());
                    return Some(child);
                }
            }
            None
        })
    }

    /// Body text with noise elements removed and whitespace collapsed
    pub fn content_text(&self) -> &str {
        &self.content_text
    }

    /// True when the markup declared a doctype
    pub fn has_doctype(&self) -> bool {
        self.has_doctype
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id) {
            Some(Node::Element(el)) => Some(el),
            _ => None,
        }
    }

    fn collect_content_text(&self) -> String {
        let Some(body) = self.select_first("body") else {
            return String::new();
        };

        let mut pieces: Vec<&str> = Vec::new();
        let mut stack: Vec<NodeId> = body.children.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            match self.nodes.get(id) {
                Some(Node::Text(text)) => pieces.push(text),
                Some(Node::Element(el)) if !NOISE_TAGS.contains(&el.name()) => {
                    stack.extend(el.children.iter().rev())
                }
                _ => {}
            }
        }

        pieces
            .iter()
            .flat_map(|piece| piece.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Mutable access used only while a backend builds the tree
pub(crate) fn push_child(nodes: &mut [Node], parent: NodeId, child: NodeId) {
    if let Some(Node::Element(el)) = nodes.get_mut(parent) {
        el.children.push(child);
    }
}
