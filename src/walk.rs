use crate::ast::{Node, NodeKind};

/// What a visitor wants done with the node it was just shown. Effects apply to
/// the parent's child slot after the visit returns, so traversal is safe under
/// in-place mutation.
pub enum Visit {
    /// Leave the node where it is.
    Keep,
    /// Unlink this slot. Variadic parents drop the slot; positional parents
    /// null it.
    Remove,
    /// Take ownership of the slot, dropping the old node. The replacement
    /// inherits the old node's line number if it has none.
    Replace(Node),
    /// Replace, then immediately dispatch on the replacement so one rewrite
    /// can trigger cascading ones.
    Revisit(Node),
}

/// A tree rewriter. The walk is depth-first in child order; `visit` runs after
/// a node's children have been walked (and possibly rewritten).
pub trait Walker {
    fn visit(&mut self, node: &mut Node, parent: Option<&NodeKind>) -> Visit;
}

enum SlotAction {
    Keep,
    Remove,
}

fn apply_replacement(slot: &mut Node, mut new: Node) -> () {
    if new.lineno() == 0 {
        new.set_lineno(slot.lineno());
    };
    *slot = new;
}

fn walk_slot<W: Walker>(walker: &mut W, node: &mut Node, parent: Option<&NodeKind>) -> SlotAction {
    loop {
        walk_children(walker, node);
        match walker.visit(node, parent) {
            Visit::Keep => return SlotAction::Keep,
            Visit::Remove => return SlotAction::Remove,
            Visit::Replace(new) => {
                apply_replacement(node, new);
                return SlotAction::Keep;
            }
            Visit::Revisit(new) => {
                apply_replacement(node, new);
                // Loop: the replacement's subtree is walked again, then the
                // replacement itself is offered to the visitor.
            }
        };
    }
}

fn walk_children<W: Walker>(walker: &mut W, node: &mut Node) -> () {
    let variadic = node.kind().is_variadic();
    // Children are detached while walked so the visitor may inspect the
    // parent's kind without aliasing.
    let mut children = node.take_children();
    let mut i = 0;
    while i < children.len() {
        let child = match children[i].as_mut() {
            None => {
                i += 1;
                continue;
            }
            Some(child) => child,
        };
        match walk_slot(walker, child, Some(node.kind())) {
            SlotAction::Keep => {
                i += 1;
            }
            SlotAction::Remove => {
                if variadic {
                    // The next sibling shifts into this index.
                    children.remove(i);
                } else {
                    children[i] = None;
                    i += 1;
                }
            }
        };
    }
    node.set_children(children);
}

/// Walks `root`, applying the walker's rewrites, and returns the (possibly
/// replaced) root. `None` means the root itself was removed.
pub fn walk<W: Walker>(walker: &mut W, mut root: Node) -> Option<Node> {
    match walk_slot(walker, &mut root, None) {
        SlotAction::Keep => Some(root),
        SlotAction::Remove => None,
    }
}
