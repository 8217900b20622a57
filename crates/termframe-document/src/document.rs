#![forbid(unsafe_code)]

//! The document root: owns the body node, current dimensions, the
//! renderer's update hook, and the view layer's event listeners.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use termframe_core::InputEvent;

use crate::error::NodeError;
use crate::node::{Node, ParentLink};

type UpdateHook = Box<dyn FnMut(Node)>;
type ListenerFn = Rc<RefCell<dyn FnMut(InputEvent)>>;

/// An opaque handle returned by [`Document::attach_event`], used to remove
/// that listener later via [`Document::detach_event`].
#[derive(Clone)]
pub struct ListenerHandle(ListenerFn);

pub(crate) struct DocumentShared {
    body: RefCell<Option<Node>>,
    width: Cell<u16>,
    height: Cell<u16>,
    listeners: RefCell<Vec<ListenerFn>>,
    update_hook: RefCell<Option<UpdateHook>>,
}

/// The root of a document tree.
///
/// A `Document` is a cheap, cloneable handle: every clone refers to the
/// same underlying body, dimensions, and listener list. Attaching it to a
/// node is impossible by construction — `attach` takes a [`Node`], and
/// `Document` is not one.
#[derive(Clone)]
pub struct Document(pub(crate) Rc<DocumentShared>);

impl Document {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self(Rc::new(DocumentShared {
            body: RefCell::new(None),
            width: Cell::new(width),
            height: Cell::new(height),
            listeners: RefCell::new(Vec::new()),
            update_hook: RefCell::new(None),
        }))
    }

    pub(crate) fn from_shared(shared: Rc<DocumentShared>) -> Self {
        Self(shared)
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.0.width.get()
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.0.height.get()
    }

    /// Set current terminal dimensions. Does not itself notify or render —
    /// the shell drives the resulting full redraw (spec §4.5).
    pub fn set_dimensions(&self, width: u16, height: u16) {
        self.0.width.set(width);
        self.0.height.set(height);
    }

    #[must_use]
    pub fn body(&self) -> Option<Node> {
        self.0.body.borrow().clone()
    }

    /// Attach `node` as the body, detaching and replacing any existing
    /// body. Fails if `node` is already attached elsewhere.
    pub fn set_body(&self, node: Node) -> Result<(), NodeError> {
        if node.is_attached() {
            return Err(NodeError::AlreadyAttached);
        }
        self.detach_body();
        node.link_to_document(Rc::downgrade(&self.0));
        *self.0.body.borrow_mut() = Some(node.clone());
        self.invoke_update_hook(node);
        Ok(())
    }

    /// Detach and return the current body, if any.
    pub fn detach_body(&self) -> Option<Node> {
        let old = self.0.body.borrow_mut().take()?;
        old.unlink();
        self.invoke_update_hook(old.clone());
        Some(old)
    }

    /// Search the body's direct children (first level only) for a node
    /// carrying `id` — matches the source semantics, not a deep search.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<Node> {
        let body = self.body()?;
        body.children().into_iter().find(|n| n.id().as_deref() == Some(id))
    }

    /// Register the renderer/shell's single update hook, replacing any
    /// previous one.
    pub fn set_update_hook(&self, hook: impl FnMut(Node) + 'static) {
        *self.0.update_hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn clear_update_hook(&self) {
        *self.0.update_hook.borrow_mut() = None;
    }

    /// Called after a mutation has been fully applied (spec §4.3). Takes
    /// the hook out for the duration of the call so a mutation performed
    /// from within the hook itself does not panic on a held `RefCell`
    /// borrow; the hook is restored afterward.
    pub(crate) fn invoke_update_hook(&self, origin: Node) {
        let mut hook = self.0.update_hook.borrow_mut().take();
        if let Some(h) = hook.as_mut() {
            #[cfg(feature = "tracing")]
            tracing::debug!("document mutated, invoking update hook");
            h(origin);
        }
        let mut slot = self.0.update_hook.borrow_mut();
        if slot.is_none() {
            *slot = hook;
        }
    }

    /// Register an event listener, notified in registration order by
    /// [`Document::event`]. Returns a handle for later removal.
    pub fn attach_event(&self, listener: impl FnMut(InputEvent) + 'static) -> ListenerHandle {
        let listener: ListenerFn = Rc::new(RefCell::new(listener));
        self.0.listeners.borrow_mut().push(listener.clone());
        ListenerHandle(listener)
    }

    /// Remove a previously registered listener. Returns `false` if it was
    /// already removed or never registered.
    pub fn detach_event(&self, handle: &ListenerHandle) -> bool {
        let mut listeners = self.0.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| !Rc::ptr_eq(l, &handle.0));
        listeners.len() != before
    }

    /// Dispatch `event` to every registered listener, in registration
    /// order. Listeners are snapshotted before dispatch so a listener that
    /// attaches or detaches another listener mid-dispatch cannot corrupt
    /// the list being iterated.
    pub fn event(&self, event: InputEvent) {
        let listeners = self.0.listeners.borrow().clone();
        for listener in listeners {
            listener.borrow_mut()(event);
        }
    }
}

impl Node {
    pub(crate) fn link_to_document(&self, weak: std::rc::Weak<DocumentShared>) {
        self.set_parent_link(ParentLink::Document(weak));
    }

    pub(crate) fn unlink(&self) {
        self.clear_parent_link();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell as StdRefCell;

    #[test]
    fn set_body_notifies_once() {
        let doc = Document::new(10, 4);
        let calls = Rc::new(StdRefCell::new(0));
        let calls_clone = calls.clone();
        doc.set_update_hook(move |_| *calls_clone.borrow_mut() += 1);
        doc.set_body(Node::block()).unwrap();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn attach_sequence_notifies_exactly_once() {
        let doc = Document::new(10, 4);
        let body = Node::block();
        doc.set_body(body.clone()).unwrap();
        let calls = Rc::new(StdRefCell::new(0));
        let calls_clone = calls.clone();
        doc.set_update_hook(move |_| *calls_clone.borrow_mut() += 1);
        body.attach_sequence(vec![Node::text("a"), Node::text("b"), Node::text("c")], None)
            .unwrap();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn get_by_id_is_first_level_only() {
        let doc = Document::new(10, 4);
        let body = Node::block();
        doc.set_body(body.clone()).unwrap();
        let inner = Node::block();
        let grandchild = Node::text("x").with_id("deep");
        inner.attach(grandchild, None).unwrap();
        let direct = Node::text("y").with_id("shallow");
        body.attach_sequence(vec![inner, direct], None).unwrap();

        assert!(doc.get_by_id("shallow").is_some());
        assert!(doc.get_by_id("deep").is_none());
    }

    #[test]
    fn top_returns_owning_document() {
        let doc = Document::new(10, 4);
        let body = Node::block();
        doc.set_body(body.clone()).unwrap();
        let child = Node::text("x");
        body.attach(child.clone(), None).unwrap();
        assert!(child.top().is_some());
    }

    #[test]
    fn detached_subtree_has_no_top() {
        let orphan = Node::block();
        let child = Node::text("x");
        orphan.attach(child.clone(), None).unwrap();
        assert!(child.top().is_none());
    }

    #[test]
    fn event_dispatch_runs_listeners_in_registration_order() {
        let doc = Document::new(10, 4);
        let log = Rc::new(StdRefCell::new(Vec::new()));
        let log1 = log.clone();
        let log2 = log.clone();
        doc.attach_event(move |_| log1.borrow_mut().push(1));
        doc.attach_event(move |_| log2.borrow_mut().push(2));
        doc.event(InputEvent::Linefeed);
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn detach_event_stops_further_dispatch() {
        let doc = Document::new(10, 4);
        let count = Rc::new(StdRefCell::new(0));
        let count_clone = count.clone();
        let handle = doc.attach_event(move |_| *count_clone.borrow_mut() += 1);
        doc.event(InputEvent::Tab);
        assert!(doc.detach_event(&handle));
        doc.event(InputEvent::Tab);
        assert_eq!(*count.borrow(), 1);
    }
}
