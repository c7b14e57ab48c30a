//! Reference cycles: traversal must terminate, matching cycles compare
//! equal, and a cycle against a non-cycle is a reported divergence.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use deepeq_compare::{MismatchKind, compare_to_report, reflective_eq};
use deepeq_reflect::reflect_record;

#[derive(Debug)]
struct Node {
    next: RefCell<Option<Rc<Node>>>,
}
reflect_record!(Node { next });

fn node(next: Option<Rc<Node>>) -> Rc<Node> {
    Rc::new(Node {
        next: RefCell::new(next),
    })
}

fn self_cycle() -> Rc<Node> {
    let n = node(None);
    *n.next.borrow_mut() = Some(Rc::clone(&n));
    n
}

#[test]
fn matching_self_cycles_are_equal() {
    let a = self_cycle();
    let b = self_cycle();
    assert!(reflective_eq(&a, &b));
}

#[test]
fn a_cycle_compared_with_itself_is_equal() {
    let a = self_cycle();
    assert!(reflective_eq(&a, &Rc::clone(&a)));
}

#[test]
fn a_cycle_against_a_finite_chain_reports_a_loop() {
    let cyclic = self_cycle();
    let chain = node(Some(node(Some(node(None)))));
    let report = compare_to_report(&cyclic, &chain, Vec::new());
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.count_of(MismatchKind::Loop), 1);
}

#[test]
fn cycles_of_different_period_terminate_with_a_loop_report() {
    // One node pointing at itself against a two-node ring. The self-cycle
    // revisits a node before the ring does, which must end the walk rather
    // than spin forever.
    let short = self_cycle();
    let first = node(None);
    let second = node(Some(Rc::clone(&first)));
    *first.next.borrow_mut() = Some(Rc::clone(&second));
    let report = compare_to_report(&short, &first, Vec::new());
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.count_of(MismatchKind::Loop), 1);
}

#[test]
fn sibling_comparisons_continue_after_a_matching_cycle() {
    #[derive(Debug)]
    struct Pair {
        ring: Rc<Node>,
        tag: i32,
    }
    reflect_record!(Pair { ring, tag });

    let a = Pair {
        ring: self_cycle(),
        tag: 1,
    };
    let b = Pair {
        ring: self_cycle(),
        tag: 2,
    };
    let report = compare_to_report(&a, &b, Vec::new());
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.count_of(MismatchKind::Leaf), 1);
}

#[test]
fn weak_back_references_terminate_and_compare() {
    #[derive(Debug)]
    struct TreeNode {
        value: i32,
        parent: RefCell<Weak<TreeNode>>,
        children: RefCell<Vec<Rc<TreeNode>>>,
    }
    reflect_record!(TreeNode {
        value,
        parent,
        children
    });

    fn tree(root_value: i32, child_value: i32) -> Rc<TreeNode> {
        let root = Rc::new(TreeNode {
            value: root_value,
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        });
        let child = Rc::new(TreeNode {
            value: child_value,
            parent: RefCell::new(Rc::downgrade(&root)),
            children: RefCell::new(Vec::new()),
        });
        root.children.borrow_mut().push(child);
        root
    }

    assert!(reflective_eq(&tree(1, 2), &tree(1, 2)));
    assert!(!reflective_eq(&tree(1, 2), &tree(1, 3)));
}
