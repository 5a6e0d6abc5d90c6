//! Read-only tree queries used by both extractors.

use super::tree::{Document, Element, NodeId};

/// Matches an element by tag name, class token and attribute values.
///
/// An empty selector matches every element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    class: Option<String>,
    attrs: Vec<(String, String)>,
}

impl Selector {
    /// Matches elements with local name `name`.
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            tag: Some(name.into()),
            ..Self::default()
        }
    }

    /// Shorthand for `span` elements carrying the class token `class`.
    pub fn span(class: impl Into<String>) -> Self {
        Self::tag("span").class(class)
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if element.name() != tag {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !element.has_class(class) {
                return false;
            }
        }
        self.attrs
            .iter()
            .all(|(name, value)| element.attr(name) == Some(value.as_str()))
    }
}

/// Queries over a parsed tree.
///
/// "Document order" is the order in which elements open in the source.
/// Every search is confined to a scope node so a lookup for one record can
/// never wander into the next one.
pub trait TreeQuery {
    /// The node that owns every top-level node.
    fn root(&self) -> NodeId;

    /// Whether `node` is an element matching `selector`.
    fn matches(&self, node: NodeId, selector: &Selector) -> bool;

    /// First descendant of `scope` matching `selector`.
    fn find_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId>;

    /// All descendants of `scope` matching `selector`, in document order.
    fn find_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId>;

    /// First direct child of `scope` matching `selector`.
    fn find_child(&self, scope: NodeId, selector: &Selector) -> Option<NodeId>;

    /// All direct children of `scope` matching `selector`.
    fn find_children(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId>;

    /// Follows a chain of direct-child steps, like the path `./a/b/c`.
    ///
    /// Backtracks over siblings, so `a[1]/b` is found even if `a[0]` has no `b`.
    fn find_path(&self, scope: NodeId, steps: &[Selector]) -> Option<NodeId>;

    /// Nearest element before `from` in document order that lies inside `bound`.
    fn find_previous(&self, from: NodeId, selector: &Selector, bound: NodeId) -> Option<NodeId>;

    /// Nearest element after `from` in document order that lies inside `bound`.
    ///
    /// Descendants of `from` come first, since they open after it.
    fn find_next(&self, from: NodeId, selector: &Selector, bound: NodeId) -> Option<NodeId>;

    /// Concatenated text of every text node under `node`.
    fn text(&self, node: NodeId) -> String;

    /// Attribute value of an element node.
    fn attr(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Whether `node` lies strictly inside the subtree of `ancestor`.
    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool;
}

impl Document {
    fn matches_at(&self, index: usize, selector: &Selector) -> bool {
        self.element(NodeId(index))
            .map(|element| selector.matches(element))
            .unwrap_or(false)
    }

    fn path_from(&self, scope: NodeId, steps: &[Selector]) -> Option<NodeId> {
        let Some((step, rest)) = steps.split_first() else {
            return Some(scope);
        };
        self.find_children(scope, step)
            .into_iter()
            .find_map(|child| self.path_from(child, rest))
    }
}

impl TreeQuery for Document {
    fn root(&self) -> NodeId {
        Document::root(self)
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.matches_at(node.0, selector)
    }

    fn find_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .find(|&i| self.matches_at(i, selector))
            .map(NodeId)
    }

    fn find_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&i| self.matches_at(i, selector))
            .map(NodeId)
            .collect()
    }

    fn find_child(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.children(scope)
            .iter()
            .copied()
            .find(|id| self.matches_at(id.0, selector))
    }

    fn find_children(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.children(scope)
            .iter()
            .copied()
            .filter(|id| self.matches_at(id.0, selector))
            .collect()
    }

    fn find_path(&self, scope: NodeId, steps: &[Selector]) -> Option<NodeId> {
        if steps.is_empty() {
            return None;
        }
        self.path_from(scope, steps)
    }

    fn find_previous(&self, from: NodeId, selector: &Selector, bound: NodeId) -> Option<NodeId> {
        let start = bound.0 + 1;
        if from.0 <= start {
            return None;
        }
        (start..from.0)
            .rev()
            .find(|&i| self.matches_at(i, selector))
            .map(NodeId)
    }

    fn find_next(&self, from: NodeId, selector: &Selector, bound: NodeId) -> Option<NodeId> {
        let end = self.descendants(bound).end;
        (from.0 + 1..end)
            .find(|&i| self.matches_at(i, selector))
            .map(NodeId)
    }

    fn text(&self, node: NodeId) -> String {
        if let Some(text) = self.text_node(node) {
            return text.to_string();
        }
        self.descendants(node)
            .filter_map(|i| self.text_node(NodeId(i)))
            .collect()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attr(name)
    }

    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.descendants(ancestor).contains(&node.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<div class="entry">
        <span class="sensenumber">1</span>
        <span class="sense"><span class="example">a</span></span>
        <span class="translation">A</span>
        <span class="example">b</span>
        <span class="example">c</span>
        <span class="translation">C</span>
    </div>"#;

    #[test]
    fn find_next_returns_nearest_following_match() {
        let doc = Document::parse(SAMPLE).expect("parse");
        let entry = doc.find_first(doc.root(), &Selector::tag("div")).expect("entry");
        let examples = doc.find_all(entry, &Selector::span("example"));
        assert_eq!(examples.len(), 3);

        let translation = Selector::span("translation");
        let texts: Vec<Option<String>> = examples
            .iter()
            .map(|ex| doc.find_next(*ex, &translation, entry).map(|t| doc.text(t)))
            .collect();
        assert_eq!(
            texts,
            [Some("A".to_string()), Some("C".to_string()), Some("C".to_string())]
        );
    }

    #[test]
    fn find_next_stays_inside_bound() {
        let doc = Document::parse(SAMPLE).expect("parse");
        let entry = doc.find_first(doc.root(), &Selector::tag("div")).expect("entry");
        let sense = doc.find_first(entry, &Selector::span("sense")).expect("sense");
        let example = doc.find_first(sense, &Selector::span("example")).expect("example");
        assert_eq!(doc.find_next(example, &Selector::span("translation"), sense), None);
    }

    #[test]
    fn find_previous_stays_inside_bound() {
        let doc = Document::parse(SAMPLE).expect("parse");
        let entry = doc.find_first(doc.root(), &Selector::tag("div")).expect("entry");
        let sense = doc.find_first(entry, &Selector::span("sense")).expect("sense");
        let number = doc.find_previous(sense, &Selector::span("sensenumber"), entry);
        assert_eq!(number.map(|n| doc.text(n)), Some("1".to_string()));
        assert_eq!(doc.find_previous(sense, &Selector::span("sensenumber"), sense), None);
    }

    #[test]
    fn find_path_backtracks_over_siblings() {
        let doc = Document::parse(
            "<entry><sense><note/></sense><sense><gloss lang=\"en\"><text>run</text></gloss></sense></entry>",
        )
        .expect("parse");
        let entry = doc.find_first(doc.root(), &Selector::tag("entry")).expect("entry");
        let text = doc.find_path(
            entry,
            &[
                Selector::tag("sense"),
                Selector::tag("gloss").attr("lang", "en"),
                Selector::tag("text"),
            ],
        );
        assert_eq!(text.map(|t| doc.text(t)), Some("run".to_string()));
    }
}
