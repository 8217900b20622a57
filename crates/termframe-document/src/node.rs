#![forbid(unsafe_code)]

//! Tagged document nodes and the owning parent/child tree.
//!
//! A [`Node`] is a cheap handle (`Rc<RefCell<NodeData>>`) to shared node
//! state. The owning edge runs parent to child (a parent's `children` vec
//! holds strong references); the back-link to the parent is a [`Weak`]
//! reference, used only to walk up to the [`crate::Document`] root for
//! update-hook notification.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use termframe_style::NamedColor;

use crate::document::{Document, DocumentShared};
use crate::error::NodeError;

/// Layout attributes shared by every node variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes {
    pub absolute: bool,
    pub pos_x: i32,
    pub pos_y: i32,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub margin_left: u16,
    pub margin_right: u16,
    pub margin_top: u16,
    pub margin_bottom: u16,
    pub id: Option<String>,
}

/// Resolved fg/bg color pair carried by `Style` and `StyleOverride`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleColors {
    pub color: Option<NamedColor>,
    pub bg_color: Option<NamedColor>,
    pub bright: bool,
    pub bg_bright: bool,
}

/// The tagged variant of a node, per spec §3.
#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Block,
    Text(String),
    Newline,
    Tab,
    Style(StyleColors),
    StyleOverride(StyleColors),
}

/// An owned, renderer-facing snapshot of a node's variant, pulled out of the
/// `RefCell` so the layout walker can match on it without holding a borrow.
#[derive(Debug, Clone)]
pub enum NodeSnapshot {
    Block,
    Text(String),
    Newline,
    Tab,
    Style(StyleColors),
    StyleOverride(StyleColors),
}

#[derive(Clone)]
pub(crate) enum ParentLink {
    Node(Weak<RefCell<NodeData>>),
    Document(Weak<DocumentShared>),
}

pub(crate) struct NodeData {
    kind: NodeKind,
    attrs: Attributes,
    parent: Option<ParentLink>,
    children: Vec<Node>,
}

/// A handle to a node in the document tree.
///
/// Cloning a `Node` clones the handle, not the subtree — both clones refer
/// to the same underlying node.
#[derive(Clone)]
pub struct Node(pub(crate) Rc<RefCell<NodeData>>);

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Node")
            .field("kind", &data.kind)
            .field("id", &data.attrs.id)
            .field("children", &data.children.len())
            .finish()
    }
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            kind,
            attrs: Attributes::default(),
            parent: None,
            children: Vec::new(),
        })))
    }

    // ── Constructors (spec §3 variants) ───────────────────────────────

    #[must_use]
    pub fn block() -> Self {
        Self::new(NodeKind::Block)
    }

    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(content.into()))
    }

    #[must_use]
    pub fn newline() -> Self {
        Self::new(NodeKind::Newline)
    }

    #[must_use]
    pub fn tab() -> Self {
        Self::new(NodeKind::Tab)
    }

    #[must_use]
    pub fn style(colors: StyleColors) -> Self {
        Self::new(NodeKind::Style(colors))
    }

    #[must_use]
    pub fn style_override(colors: StyleColors) -> Self {
        Self::new(NodeKind::StyleOverride(colors))
    }

    // ── Builder-style attribute setters (pre-attach construction) ─────
    //
    // These consume and return `self`, matching the fluent construction
    // style used before a node joins a tree. They do not notify — use the
    // `set_*` family below to mutate an already-attached node.

    #[must_use]
    pub fn with_absolute(self, pos_x: i32, pos_y: i32) -> Self {
        {
            let mut data = self.0.borrow_mut();
            data.attrs.absolute = true;
            data.attrs.pos_x = pos_x;
            data.attrs.pos_y = pos_y;
        }
        self
    }

    #[must_use]
    pub fn with_size(self, width: Option<u16>, height: Option<u16>) -> Self {
        {
            let mut data = self.0.borrow_mut();
            data.attrs.width = width;
            data.attrs.height = height;
        }
        self
    }

    #[must_use]
    pub fn with_margins(self, left: u16, right: u16, top: u16, bottom: u16) -> Self {
        {
            let mut data = self.0.borrow_mut();
            data.attrs.margin_left = left;
            data.attrs.margin_right = right;
            data.attrs.margin_top = top;
            data.attrs.margin_bottom = bottom;
        }
        self
    }

    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.0.borrow_mut().attrs.id = Some(id.into());
        self
    }

    // ── Mutators (post-attach; each notifies the root exactly once) ───

    /// Replace a `Text` node's content. No-op on other variants.
    pub fn set_content(&self, content: impl Into<String>) {
        {
            let mut data = self.0.borrow_mut();
            if let NodeKind::Text(existing) = &mut data.kind {
                *existing = content.into();
            }
        }
        self.notify();
    }

    /// Replace a `Style`/`StyleOverride` node's colors. No-op on other
    /// variants.
    pub fn set_colors(&self, colors: StyleColors) {
        {
            let mut data = self.0.borrow_mut();
            match &mut data.kind {
                NodeKind::Style(c) | NodeKind::StyleOverride(c) => *c = colors,
                _ => {}
            }
        }
        self.notify();
    }

    pub fn set_absolute(&self, absolute: bool, pos_x: i32, pos_y: i32) {
        {
            let mut data = self.0.borrow_mut();
            data.attrs.absolute = absolute;
            data.attrs.pos_x = pos_x;
            data.attrs.pos_y = pos_y;
        }
        self.notify();
    }

    pub fn set_size(&self, width: Option<u16>, height: Option<u16>) {
        {
            let mut data = self.0.borrow_mut();
            data.attrs.width = width;
            data.attrs.height = height;
        }
        self.notify();
    }

    pub fn set_margins(&self, left: u16, right: u16, top: u16, bottom: u16) {
        {
            let mut data = self.0.borrow_mut();
            data.attrs.margin_left = left;
            data.attrs.margin_right = right;
            data.attrs.margin_top = top;
            data.attrs.margin_bottom = bottom;
        }
        self.notify();
    }

    // ── Accessors ──────────────────────────────────────────────────────

    #[must_use]
    pub fn attributes(&self) -> Attributes {
        self.0.borrow().attrs.clone()
    }

    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.0.borrow().attrs.id.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> NodeSnapshot {
        match &self.0.borrow().kind {
            NodeKind::Block => NodeSnapshot::Block,
            NodeKind::Text(s) => NodeSnapshot::Text(s.clone()),
            NodeKind::Newline => NodeSnapshot::Newline,
            NodeKind::Tab => NodeSnapshot::Tab,
            NodeKind::Style(c) => NodeSnapshot::Style(*c),
            NodeKind::StyleOverride(c) => NodeSnapshot::StyleOverride(*c),
        }
    }

    #[must_use]
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(
            self.0.borrow().kind,
            NodeKind::Text(_) | NodeKind::Newline | NodeKind::Tab
        )
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.0.borrow().parent.is_some()
    }

    /// Walk parent links up to the owning [`Document`], if any.
    #[must_use]
    pub fn top(&self) -> Option<Document> {
        let mut link = self.0.borrow().parent.clone();
        loop {
            match link? {
                ParentLink::Document(weak) => return weak.upgrade().map(Document::from_shared),
                ParentLink::Node(weak) => {
                    let parent = weak.upgrade()?;
                    link = parent.borrow().parent.clone();
                }
            }
        }
    }

    // ── Tree mutation (spec §4.3) ──────────────────────────────────────

    /// Attach `child` at `index` (end of the children list if `None`).
    pub fn attach(&self, child: Node, index: Option<usize>) -> Result<(), NodeError> {
        self.attach_sequence(vec![child], index)
    }

    /// Attach each of `children` at consecutive indices starting at
    /// `index` (end of the list if `None`), notifying exactly once.
    pub fn attach_sequence(&self, children: Vec<Node>, index: Option<usize>) -> Result<(), NodeError> {
        if self.is_leaf() {
            return Err(NodeError::AttachToLeaf);
        }
        let mut at = index.unwrap_or_else(|| self.0.borrow().children.len());
        for child in children {
            self.attach_one(child, at)?;
            at += 1;
        }
        self.notify();
        Ok(())
    }

    fn attach_one(&self, child: Node, at: usize) -> Result<(), NodeError> {
        if child.is_attached() {
            return Err(NodeError::AlreadyAttached);
        }
        child.0.borrow_mut().parent = Some(ParentLink::Node(Rc::downgrade(&self.0)));
        let mut data = self.0.borrow_mut();
        let at = at.min(data.children.len());
        data.children.insert(at, child);
        Ok(())
    }

    /// Detach exactly one of `child` (by reference) or `index` (negative
    /// counts from the end). Notifies once on success.
    pub fn detach(&self, child: Option<&Node>, index: Option<isize>) -> Result<Node, NodeError> {
        if self.is_leaf() {
            return Err(NodeError::AttachToLeaf);
        }
        let removed = match (child, index) {
            (Some(c), None) => self.detach_by_ref(c)?,
            (None, Some(i)) => self.detach_by_index(i)?,
            _ => return Err(NodeError::AmbiguousDetachArgs),
        };
        removed.0.borrow_mut().parent = None;
        self.notify();
        Ok(removed)
    }

    fn detach_by_ref(&self, child: &Node) -> Result<Node, NodeError> {
        let mut data = self.0.borrow_mut();
        let pos = data
            .children
            .iter()
            .position(|n| n == child)
            .ok_or(NodeError::NotAChild)?;
        Ok(data.children.remove(pos))
    }

    fn detach_by_index(&self, index: isize) -> Result<Node, NodeError> {
        let mut data = self.0.borrow_mut();
        let len = data.children.len() as isize;
        let resolved = if index < 0 { len + index } else { index };
        if resolved < 0 || resolved >= len {
            return Err(NodeError::NotAChild);
        }
        Ok(data.children.remove(resolved as usize))
    }

    fn notify(&self) {
        if let Some(doc) = self.top() {
            doc.invoke_update_hook(self.clone());
        }
    }

    pub(crate) fn set_parent_link(&self, link: ParentLink) {
        self.0.borrow_mut().parent = Some(link);
    }

    pub(crate) fn clear_parent_link(&self) {
        self.0.borrow_mut().parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_starts_empty_and_detached() {
        let block = Node::block();
        assert_eq!(block.child_count(), 0);
        assert!(!block.is_attached());
    }

    #[test]
    fn attach_sets_single_parent_and_membership() {
        let parent = Node::block();
        let child = Node::text("hi");
        parent.attach(child.clone(), None).unwrap();
        assert!(child.is_attached());
        assert_eq!(parent.children(), vec![child]);
    }

    #[test]
    fn attach_detach_round_trip_restores_state() {
        let parent = Node::block();
        let child = Node::text("hi");
        parent.attach(child.clone(), None).unwrap();
        let removed = parent.detach(Some(&child), None).unwrap();
        assert_eq!(removed, child);
        assert!(!child.is_attached());
        assert_eq!(parent.child_count(), 0);
    }

    #[test]
    fn attaching_already_attached_node_fails() {
        let a = Node::block();
        let b = Node::block();
        let child = Node::text("x");
        a.attach(child.clone(), None).unwrap();
        assert_eq!(b.attach(child, None), Err(NodeError::AlreadyAttached));
    }

    #[test]
    fn attach_to_leaf_fails() {
        let leaf = Node::text("x");
        assert_eq!(
            leaf.attach(Node::text("y"), None),
            Err(NodeError::AttachToLeaf)
        );
    }

    #[test]
    fn detach_with_both_or_neither_arg_is_ambiguous() {
        let parent = Node::block();
        let child = Node::text("x");
        parent.attach(child.clone(), None).unwrap();
        assert_eq!(
            parent.detach(Some(&child), Some(0)),
            Err(NodeError::AmbiguousDetachArgs)
        );
        assert_eq!(parent.detach(None, None), Err(NodeError::AmbiguousDetachArgs));
    }

    #[test]
    fn detach_non_child_fails() {
        let parent = Node::block();
        let stranger = Node::text("x");
        assert_eq!(parent.detach(Some(&stranger), None), Err(NodeError::NotAChild));
        assert_eq!(parent.detach(None, Some(0)), Err(NodeError::NotAChild));
    }

    #[test]
    fn negative_index_counts_from_the_end() {
        let parent = Node::block();
        let a = Node::text("a");
        let b = Node::text("b");
        parent.attach_sequence(vec![a.clone(), b.clone()], None).unwrap();
        let removed = parent.detach(None, Some(-1)).unwrap();
        assert_eq!(removed, b);
        assert_eq!(parent.children(), vec![a]);
    }

    #[test]
    fn attach_sequence_inserts_in_order_at_consecutive_indices() {
        let parent = Node::block();
        let a = Node::text("a");
        let b = Node::text("b");
        let c = Node::text("c");
        parent.attach_sequence(vec![a.clone(), b.clone(), c.clone()], None).unwrap();
        assert_eq!(parent.children(), vec![a, b, c]);
    }
}
