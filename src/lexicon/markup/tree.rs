//! Arena-backed document tree built from `quick-xml` events.
//!
//! Both export dialects are parsed into this one tree type. The builder is
//! lenient in the ways an HTML-flavoured export needs:
//!
//! - void elements (`br`, `meta`, `img`, ...) never receive children
//! - an end tag closes up to the nearest open element with the same name,
//!   and is ignored when no such element is open
//! - elements still open at end of input are closed there
//! - common HTML named entities are resolved, unknown ones are kept verbatim
//!
//! Nodes are stored in document (pre-)order, so a node's index doubles as its
//! position in document order and every subtree is a contiguous index range.

use std::borrow::Cow;
use std::ops::Range;
use log::{debug, trace};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::lexicon::types::error::{LexiconError, Result};

/// Index of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

/// An element with its local name and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the whitespace-separated `class` attribute contains `token`.
    pub fn has_class(&self, token: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_ascii_whitespace().any(|c| c == token))
            .unwrap_or(false)
    }
}

#[derive(Debug)]
enum NodeKind {
    Root,
    Element(Element),
    Text(String),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    children: Vec<NodeId>,
    /// One past the index of the last node in this subtree.
    subtree_end: usize,
}

/// A parsed, read-only markup document.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Resolves the named HTML entities that show up in dictionary exports.
fn html_entity(name: &str) -> Option<&'static str> {
    match name {
        "nbsp" => Some("\u{a0}"),
        "ndash" => Some("\u{2013}"),
        "mdash" => Some("\u{2014}"),
        "lsquo" => Some("\u{2018}"),
        "rsquo" => Some("\u{2019}"),
        "ldquo" => Some("\u{201c}"),
        "rdquo" => Some("\u{201d}"),
        "hellip" => Some("\u{2026}"),
        "middot" => Some("\u{b7}"),
        "copy" => Some("\u{a9}"),
        _ => None,
    }
}

/// The five predefined XML entities first, then the HTML names above.
fn resolve_entity(name: &str) -> Option<&'static str> {
    resolve_predefined_entity(name).or_else(|| html_entity(name))
}

impl Document {
    /// Parses `source` into a tree.
    ///
    /// # Errors
    /// Returns [`LexiconError::Markup`] if the tokenizer cannot make sense of
    /// the input (for example an unterminated tag or attribute).
    pub fn parse(source: &str) -> Result<Self> {
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut builder = TreeBuilder::new();

        loop {
            let event = reader.read_event().map_err(|e| LexiconError::Markup {
                position: reader.error_position() as u64,
                message: e.to_string(),
            })?;
            match event {
                Event::Start(e) => {
                    let element = element_from(&e, reader.buffer_position() as u64)?;
                    if VOID_ELEMENTS.contains(&element.name.as_str()) {
                        builder.leaf(NodeKind::Element(element));
                    } else {
                        builder.open(element);
                    }
                }
                Event::Empty(e) => {
                    let element = element_from(&e, reader.buffer_position() as u64)?;
                    builder.leaf(NodeKind::Element(element));
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    builder.close(&name);
                }
                Event::Text(e) => builder.text(decode_text(&e)),
                Event::CData(e) => builder.text(String::from_utf8_lossy(&e).into_owned()),
                Event::Eof => break,
                // Comments, declarations, processing instructions and doctype carry no content.
                _ => {}
            }
        }

        let document = builder.finish();
        debug!("Parsed markup tree with {} nodes", document.nodes.len());
        Ok(document)
    }

    /// The synthetic root node that owns every top-level node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The element at `id`, or `None` for the root and text nodes.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// The text content of a text node, or `None` for any other node.
    pub fn text_node(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Index range of every descendant of `id`, in document order.
    pub(crate) fn descendants(&self, id: NodeId) -> Range<usize> {
        match self.nodes.get(id.0) {
            Some(node) => id.0 + 1..node.subtree_end,
            None => 0..0,
        }
    }
}

/// `position` is the reader offset just past the tag, used for error reports.
fn element_from(start: &BytesStart<'_>, position: u64) -> Result<Element> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr_result in start.html_attributes() {
        let attr = attr_result.map_err(|e| LexiconError::Markup {
            position,
            message: format!("Failed to parse attribute of <{}>: {}", name, e),
        })?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = match attr.unescape_value_with(resolve_entity) {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        attributes.push((key, value));
    }
    Ok(Element { name, attributes })
}

fn decode_text(text: &BytesText<'_>) -> String {
    match text.unescape_with(resolve_entity) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(e) => {
            trace!("Keeping undecodable text verbatim: {}", e);
            String::from_utf8_lossy(text).into_owned()
        }
    }
}

struct TreeBuilder {
    nodes: Vec<Node>,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                children: Vec::new(),
                subtree_end: 1,
            }],
            open: vec![NodeId(0)],
        }
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = *self.open.last().unwrap_or(&NodeId(0));
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
            subtree_end: id.0 + 1,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn open(&mut self, element: Element) {
        let id = self.push(NodeKind::Element(element));
        self.open.push(id);
    }

    fn leaf(&mut self, kind: NodeKind) {
        self.push(kind);
    }

    fn text(&mut self, text: String) {
        if !text.is_empty() {
            self.push(NodeKind::Text(text));
        }
    }

    fn close(&mut self, name: &str) {
        let position = self.open.iter().skip(1).rposition(|id| {
            matches!(&self.nodes[id.0].kind, NodeKind::Element(e) if e.name == name)
        });
        match position {
            // `skip(1)` shifted the index by one
            Some(pos) => self.close_from(pos + 1),
            None => trace!("Ignoring unmatched end tag </{}>", name),
        }
    }

    fn close_from(&mut self, depth: usize) {
        let end = self.nodes.len();
        for id in self.open.drain(depth..) {
            self.nodes[id.0].subtree_end = end;
        }
    }

    fn finish(mut self) -> Document {
        self.close_from(1);
        let end = self.nodes.len();
        self.nodes[0].subtree_end = end;
        Document { nodes: self.nodes }
    }
}
