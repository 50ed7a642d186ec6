//! Editable page tree on top of scraper's parsed document.
//!
//! scraper only reads; edits go straight to the underlying node arena.
//! New nodes are produced by parsing a markup fragment and grafting its
//! nodes into the page, and attribute edits swap in a re-parsed element.

use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};

/// Position of an element in the document arena. Edits only append to the
/// arena or detach nodes, so positions stay valid for the life of a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(usize);

pub struct Page {
    html: Html,
}

impl Page {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    pub fn to_html(&self) -> String {
        self.html.html()
    }

    /// Attached elements matching `selector`, in document arena order.
    pub fn select(&self, selector: &Selector) -> Vec<NodeHandle> {
        let root = self.html.tree.root().id();
        self.html
            .tree
            .nodes()
            .enumerate()
            .filter(|(_, node)| {
                ElementRef::wrap(*node).is_some_and(|el| selector.matches(&el))
                    && node.ancestors().any(|a| a.id() == root)
            })
            .map(|(index, _)| NodeHandle(index))
            .collect()
    }

    /// Descendants of `scope` matching `selector`.
    pub fn select_within(&self, scope: NodeHandle, selector: &Selector) -> Vec<NodeHandle> {
        let Some(scope) = self.element(scope).map(|el| el.id()) else {
            return Vec::new();
        };
        self.html
            .tree
            .nodes()
            .enumerate()
            .filter(|(_, node)| {
                ElementRef::wrap(*node).is_some_and(|el| selector.matches(&el))
                    && node.ancestors().any(|a| a.id() == scope)
            })
            .map(|(index, _)| NodeHandle(index))
            .collect()
    }

    pub fn parent(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let parent = self.element(handle)?.parent().and_then(ElementRef::wrap)?;
        self.html
            .tree
            .nodes()
            .position(|n| n.id() == parent.id())
            .map(NodeHandle)
    }

    pub fn attr(&self, handle: NodeHandle, name: &str) -> Option<String> {
        self.element(handle)?.value().attr(name).map(str::to_string)
    }

    /// Concatenated text of the element and its descendants.
    pub fn text(&self, handle: NodeHandle) -> String {
        self.element(handle)
            .map(|el| el.text().collect())
            .unwrap_or_default()
    }

    /// Set (or add) an attribute. Elements that cannot be re-created from a
    /// body fragment (e.g. table parts) are left unchanged.
    pub fn set_attr(&mut self, handle: NodeHandle, name: &str, value: &str) {
        let Some(element) = self.element(handle) else {
            return;
        };
        let id = element.id();
        let tag = element.value().name().to_string();
        let mut attrs: Vec<(String, String)> = element
            .value()
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }

        let Some(replacement) = rebuild_element(&tag, &attrs) else {
            tracing::debug!(tag = %tag, attr = %name, "cannot rebuild element, attribute unchanged");
            return;
        };
        if let Some(mut node) = self.html.tree.get_mut(id) {
            *node.value() = scraper::Node::Element(replacement);
        }
    }

    /// Replace all children with the given text.
    pub fn set_text(&mut self, handle: NodeHandle, text: &str) {
        self.set_inner_html(handle, &escape(text));
    }

    /// Replace all children with the nodes parsed from `markup`.
    pub fn set_inner_html(&mut self, handle: NodeHandle, markup: &str) {
        let Some(element) = self.element(handle) else {
            return;
        };
        let children: Vec<_> = element.children().map(|c| c.id()).collect();
        for child in children {
            if let Some(mut node) = self.html.tree.get_mut(child) {
                node.detach();
            }
        }
        self.append_html(handle, markup);
    }

    pub fn prepend_html(&mut self, handle: NodeHandle, markup: &str) {
        self.insert_html(handle, markup, true);
    }

    pub fn append_html(&mut self, handle: NodeHandle, markup: &str) {
        self.insert_html(handle, markup, false);
    }

    fn element(&self, handle: NodeHandle) -> Option<ElementRef<'_>> {
        self.html.tree.nodes().nth(handle.0).and_then(ElementRef::wrap)
    }

    fn insert_html(&mut self, handle: NodeHandle, markup: &str, at_start: bool) {
        let Some(parent) = self.element(handle).map(|el| el.id()) else {
            return;
        };
        let fragment = Html::parse_fragment(markup);
        let mut roots: Vec<_> = fragment.root_element().children().collect();
        if at_start {
            roots.reverse();
        }

        let mut pending = Vec::new();
        for source in roots {
            let Some(mut target) = self.html.tree.get_mut(parent) else {
                return;
            };
            let value = source.value().clone();
            let id = if at_start {
                target.prepend(value).id()
            } else {
                target.append(value).id()
            };
            pending.push((id, source));
        }

        while let Some((target_id, source)) = pending.pop() {
            for child in source.children() {
                let Some(mut target) = self.html.tree.get_mut(target_id) else {
                    break;
                };
                let id = target.append(child.value().clone()).id();
                pending.push((id, child));
            }
        }
    }
}

fn rebuild_element(tag: &str, attrs: &[(String, String)]) -> Option<Element> {
    let mut markup = format!("<{}", tag);
    for (name, value) in attrs {
        markup.push_str(&format!(" {}=\"{}\"", name, escape(value)));
    }
    markup.push_str(&format!("></{}>", tag));

    let fragment = Html::parse_fragment(&markup);
    let selector = Selector::parse(tag).ok()?;
    let element = fragment.select(&selector).next()?.value().clone();
    Some(element)
}

/// Escape text for use in markup content or a double-quoted attribute.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
