//! `scraper`-backed implementation of [`HtmlParser`]

use super::{push_child, Document, Element, HtmlParser, Node, NodeId};
use scraper::Html;

/// HTML5 parser backed by the `scraper` crate (html5ever)
///
/// html5ever recovers from any input the way browsers do: unclosed tags,
/// stray end tags and missing `<html>`/`<body>` are all repaired, so the
/// resulting tree always has a root and a body.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScraperParser;

impl HtmlParser for ScraperParser {
    fn parse(&self, markup: &str) -> Document {
        let html = Html::parse_document(markup);

        let has_doctype = html.tree.root().children().any(|n| n.value().is_doctype());
        let nodes = flatten(&html);

        tracing::trace!(nodes = nodes.len(), "Parsed document");
        Document::from_nodes(nodes, has_doctype)
    }
}

/// Copies the scraper tree into owned, pre-ordered nodes
///
/// Iterative so that pathologically deep markup cannot exhaust the stack.
fn flatten(html: &Html) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut stack: Vec<_> = html
        .tree
        .root()
        .children()
        .rev()
        .map(|child| (child, None::<NodeId>))
        .collect();

    while let Some((node, parent)) = stack.pop() {
        let id = nodes.len();

        match node.value() {
            scraper::Node::Element(el) => {
                let attributes = el
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect();
                nodes.push(Node::Element(Element::new(
                    id,
                    el.name().to_string(),
                    attributes,
                )));
                stack.extend(node.children().rev().map(|child| (child, Some(id))));
            }
            scraper::Node::Text(text) => nodes.push(Node::Text(text.to_string())),
            _ => continue,
        }

        if let Some(parent) = parent {
            push_child(&mut nodes, parent, id);
        }
    }

    nodes
}
