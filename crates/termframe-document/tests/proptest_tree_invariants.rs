//! Property-based invariant tests for the document tree.
//!
//! 1. Attach/detach round trip: children list and parent link return to
//!    their pre-attach state.
//! 2. Single-parent invariant: a node appears in its parent's children
//!    exactly once.
//! 3. Notification count: attaching a batch of k nodes fires the update
//!    hook exactly once, regardless of k.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use termframe_document::{Document, Node};

proptest! {
    #[test]
    fn attach_detach_round_trip(count in 0usize..8) {
        let parent = Node::block();
        let pre_attach_count = parent.child_count();
        let child = Node::text("x");

        parent.attach(child.clone(), None).unwrap();
        for i in 0..count {
            parent.attach(Node::text(format!("pad-{i}")), None).unwrap();
        }
        parent.detach(Some(&child), None).unwrap();
        for sibling in parent.children() {
            if sibling != child {
                parent.detach(Some(&sibling), None).unwrap();
            }
        }

        prop_assert_eq!(parent.child_count(), pre_attach_count);
        prop_assert!(!child.is_attached());
    }

    #[test]
    fn single_parent_invariant(count in 1usize..16) {
        let parent = Node::block();
        let children: Vec<Node> = (0..count).map(|i| Node::text(format!("n{i}"))).collect();
        parent.attach_sequence(children.clone(), None).unwrap();

        for child in &children {
            let occurrences = parent.children().iter().filter(|n| *n == child).count();
            prop_assert_eq!(occurrences, 1);
        }
    }

    #[test]
    fn notification_count_is_one_per_batch(count in 1usize..32) {
        let doc = Document::new(80, 24);
        let body = Node::block();
        doc.set_body(body.clone()).unwrap();

        let calls = Rc::new(RefCell::new(0));
        let calls_clone = calls.clone();
        doc.set_update_hook(move |_| *calls_clone.borrow_mut() += 1);

        let children: Vec<Node> = (0..count).map(|i| Node::text(format!("n{i}"))).collect();
        body.attach_sequence(children, None).unwrap();

        prop_assert_eq!(*calls.borrow(), 1);
    }
}
