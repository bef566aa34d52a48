//! Structural edit primitives.
//!
//! These are the only operations that rearrange existing links between
//! attached nodes. Stale ids are hard errors, checked before anything changes.
//! Restructures that make no sense (a root as anchor, a node moved under its
//! own descendant) are soft failures: they are reported through the tree's
//! diagnostics level and leave the tree as it was, returning `None`/`false`.

use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeId, Tree};
use crate::domain::content::NodeContent;
use crate::domain::error::TreeResult;

/// Puts `new` in `old`'s position. `old` is detached with its children.
///
/// A `new` that already has a parent is copied first. Returns the node now
/// in the slot.
#[instrument(level = "debug", skip(tree))]
pub fn replace<C: NodeContent>(tree: &mut Tree<C>, old: NodeId, new: NodeId) -> TreeResult<Option<NodeId>> {
    if !accepts_replacement(tree, "replace", old, new)? {
        return Ok(None);
    }
    let attached = tree.sanitize(new)?;
    put_in_slot(tree, old, attached)?;
    Ok(Some(attached))
}

/// Like [`replace`], but `old`'s children are moved over to the new node,
/// replacing the children it had.
#[instrument(level = "debug", skip(tree))]
pub fn set<C: NodeContent>(tree: &mut Tree<C>, old: NodeId, new: NodeId) -> TreeResult<Option<NodeId>> {
    if !accepts_replacement(tree, "set", old, new)? {
        return Ok(None);
    }
    let target = tree.sanitize(new)?;
    let moved = tree.remove_children(old)?;
    trace!(%old, %target, count = moved.len(), "moving children to new node");
    tree.set_children(target, moved)?;
    put_in_slot(tree, old, target)?;
    Ok(Some(target))
}

/// Inserts `node` as the left sibling of `base`.
///
/// With `remove_first`, a parented `node` is detached and moved; otherwise it
/// is copied. Returns the inserted id.
pub fn insert_before<C: NodeContent>(
    tree: &mut Tree<C>,
    base: NodeId,
    node: NodeId,
    remove_first: bool,
) -> TreeResult<Option<NodeId>> {
    insert_relative(tree, "insert-before", base, node, remove_first, 0)
}

/// Inserts `node` as the right sibling of `base`.
pub fn insert_after<C: NodeContent>(
    tree: &mut Tree<C>,
    base: NodeId,
    node: NodeId,
    remove_first: bool,
) -> TreeResult<Option<NodeId>> {
    insert_relative(tree, "insert-after", base, node, remove_first, 1)
}

/// Detaches `node` from its parent. Children stay with `node`.
#[instrument(level = "debug", skip(tree))]
pub fn delete<C>(tree: &mut Tree<C>, node: NodeId) -> TreeResult<()> {
    tree.ensure(node)?;
    match tree.unlink(node) {
        Some((parent, index)) => trace!(%node, %parent, index, "deleted node"),
        None => trace!(%node, "node is a root, nothing to delete"),
    }
    Ok(())
}

/// Exchanges two nodes. Returns false when nothing changed.
///
/// With `swap_subtrees` each node moves into the other's slot carrying its
/// subtree; pairs where one contains the other are refused. Otherwise the two
/// nodes trade places and the children stay where they are, which also works
/// for a parent and its descendant.
#[instrument(level = "debug", skip(tree))]
pub fn swap<C>(tree: &mut Tree<C>, a: NodeId, b: NodeId, swap_subtrees: bool) -> TreeResult<bool> {
    tree.ensure(a)?;
    tree.ensure(b)?;
    if a == b {
        debug!(%a, "swapping a node with itself");
        return Ok(false);
    }
    if !swap_subtrees {
        tree.exchange_nodes(a, b)?;
        return Ok(true);
    }
    if tree.is_ancestor(a, b) || tree.is_ancestor(b, a) {
        tree.soft_failure(
            "swap",
            format_args!("{a} and {b} are in an ancestor relation, cannot swap subtrees"),
        );
        return Ok(false);
    }
    if tree.parent_of(a)?.is_none() && tree.parent_of(b)?.is_none() {
        tree.soft_failure("swap", format_args!("{a} and {b} are both roots"));
        return Ok(false);
    }
    tree.exchange_slots(a, b)?;
    Ok(true)
}

fn accepts_replacement<C>(
    tree: &Tree<C>,
    operation: &'static str,
    old: NodeId,
    new: NodeId,
) -> TreeResult<bool> {
    tree.ensure(old)?;
    tree.ensure(new)?;
    if old == new {
        tree.soft_failure(operation, format_args!("{old} would replace itself"));
        return Ok(false);
    }
    if tree.parent_of(old)?.is_none() {
        tree.soft_failure(operation, format_args!("{old} has no parent"));
        return Ok(false);
    }
    if tree.parent_of(new)?.is_none() && tree.is_ancestor(new, old) {
        tree.soft_failure(
            operation,
            format_args!("{new} is an ancestor of {old}"),
        );
        return Ok(false);
    }
    Ok(true)
}

/// Links the parentless `new` into `old`'s slot and detaches `old`.
fn put_in_slot<C>(tree: &mut Tree<C>, old: NodeId, new: NodeId) -> TreeResult<()> {
    if let Some((parent, index)) = tree.unlink(old) {
        tree.link_at(parent, index, new)?;
    }
    Ok(())
}

#[instrument(level = "debug", skip(tree))]
fn insert_relative<C: NodeContent>(
    tree: &mut Tree<C>,
    operation: &'static str,
    base: NodeId,
    node: NodeId,
    remove_first: bool,
    offset: usize,
) -> TreeResult<Option<NodeId>> {
    tree.ensure(base)?;
    tree.ensure(node)?;
    if node == base {
        tree.soft_failure(operation, format_args!("{node} cannot be its own sibling"));
        return Ok(None);
    }
    if tree.parent_of(base)?.is_none() {
        tree.soft_failure(operation, format_args!("anchor {base} has no parent"));
        return Ok(None);
    }
    let moves = remove_first || tree.parent_of(node)?.is_none();
    if moves && tree.is_ancestor(node, base) {
        tree.soft_failure(
            operation,
            format_args!("{node} would become a descendant of itself"),
        );
        return Ok(None);
    }
    if remove_first {
        tree.unlink(node);
    }
    let Some((parent, index)) = tree.slot(base) else {
        return Ok(None);
    };
    let attached = tree.sanitize(node)?;
    tree.link_at(parent, index + offset, attached)?;
    Ok(Some(attached))
}
