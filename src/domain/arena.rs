//! Arena-owned tree nodes with single-parent ownership.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, info, instrument, trace, warn};

use crate::config::{DiagnosticsConfig, RenderConfig, Settings, SoftFailureLevel};
use crate::domain::content::NodeContent;
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node_ref::NodeRef;

/// Stable handle of a node inside a [`Tree`].
///
/// Ids are generational: once a node is discarded its id never resolves
/// again, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "n{slot}.{generation}")
    }
}

/// Storage record of one node.
#[derive(Debug)]
pub(crate) struct TreeNode<C> {
    pub(crate) content: C,
    /// Non-owning back-reference, None for roots
    pub(crate) parent: Option<NodeId>,
    /// Owned children in insertion order
    pub(crate) children: Vec<NodeId>,
}

/// Arena of nodes forming a forest.
///
/// Every node is listed by at most one parent. Any parentless node is a root;
/// detached subtrees stay allocated until [`Tree::discard`] drops them.
#[derive(Debug)]
pub struct Tree<C> {
    arena: Arena<TreeNode<C>>,
    diagnostics: DiagnosticsConfig,
    render: RenderConfig,
}

impl<C> Default for Tree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Tree<C> {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            arena: Arena::new(),
            diagnostics: settings.diagnostics,
            render: settings.render,
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        self.render
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, C>> {
        self.arena.get(id.0).map(|node| NodeRef::new(self, id, node))
    }

    pub fn node(&self, id: NodeId) -> TreeResult<NodeRef<'_, C>> {
        self.get(id).ok_or(TreeError::InvalidOperand(id))
    }

    pub fn content(&self, id: NodeId) -> TreeResult<&C> {
        Ok(&self.entry(id)?.content)
    }

    pub fn content_mut(&mut self, id: NodeId) -> TreeResult<&mut C> {
        Ok(&mut self.entry_mut(id)?.content)
    }

    pub fn children_of(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        Ok(&self.entry(id)?.children)
    }

    pub fn parent_of(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.entry(id)?.parent)
    }

    /// All parentless nodes, in arena order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| NodeId(index))
    }

    /// Returns the child at `index`.
    ///
    /// A node without children yields `Ok(None)`; a node with children rejects
    /// a bad index with [`TreeError::IndexOutOfRange`].
    pub fn child(&self, parent: NodeId, index: usize) -> TreeResult<Option<NodeId>> {
        let node = self.entry(parent)?;
        if node.children.is_empty() {
            warn!(%parent, index, "tried to get a child of a node without children");
            return Ok(None);
        }
        node.children
            .get(index)
            .copied()
            .map(Some)
            .ok_or(TreeError::IndexOutOfRange {
                parent,
                index,
                len: node.children.len(),
            })
    }

    /// Removes the node from its parent. Calling it on a root is a no-op.
    #[instrument(level = "trace", skip(self))]
    pub fn detach(&mut self, id: NodeId) -> TreeResult<()> {
        self.ensure(id)?;
        if self.unlink(id).is_none() {
            trace!(%id, "node has no parent, nothing to detach");
        }
        Ok(())
    }

    /// Removes and returns the child at `index`.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, index: usize) -> TreeResult<NodeId> {
        let node = self.entry(parent)?;
        if node.children.is_empty() {
            return Err(TreeError::NoChildren { parent, index });
        }
        let child = *node.children.get(index).ok_or(TreeError::IndexOutOfRange {
            parent,
            index,
            len: node.children.len(),
        })?;
        self.entry_mut(parent)?.children.remove(index);
        self.entry_mut(child)?.parent = None;
        Ok(child)
    }

    /// Removes `child` by identity and returns the index it had, or `None` if
    /// it is not a child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_child_node(
        &mut self,
        parent: NodeId,
        child: NodeId,
    ) -> TreeResult<Option<usize>> {
        let position = self.entry(parent)?.children.iter().position(|&c| c == child);
        match position {
            Some(index) => {
                self.remove_child(parent, index)?;
                Ok(Some(index))
            }
            None => {
                warn!(%parent, %child, "could not find child to remove");
                Ok(None)
            }
        }
    }

    /// Removes all children, returning them in their former order.
    pub fn remove_children(&mut self, parent: NodeId) -> TreeResult<Vec<NodeId>> {
        let children = std::mem::take(&mut self.entry_mut(parent)?.children);
        for &child in &children {
            self.entry_mut(child)?.parent = None;
        }
        Ok(children)
    }

    /// Removes the children in `start..end`.
    pub fn remove_children_range(
        &mut self,
        parent: NodeId,
        start: usize,
        end: usize,
    ) -> TreeResult<Vec<NodeId>> {
        let len = self.entry(parent)?.children.len();
        if end < start || end > len {
            return Err(TreeError::IndexOutOfRange {
                parent,
                index: end,
                len,
            });
        }
        let removed: Vec<NodeId> = self.entry_mut(parent)?.children.drain(start..end).collect();
        for &child in &removed {
            self.entry_mut(child)?.parent = None;
        }
        Ok(removed)
    }

    /// Drops a subtree from the arena, detaching it first if needed.
    ///
    /// Returns the content of `id`; every id in the subtree becomes stale.
    #[instrument(level = "debug", skip(self))]
    pub fn discard(&mut self, id: NodeId) -> TreeResult<C> {
        self.ensure(id)?;
        self.unlink(id);
        let mut content = None;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current.0) {
                stack.extend(node.children);
                if current == id {
                    content = Some(node.content);
                }
            }
        }
        content.ok_or(TreeError::InvalidOperand(id))
    }

    /// Checks the single-ownership and acyclicity invariants over the arena.
    pub fn verify_links(&self) -> TreeResult<()> {
        for (index, node) in self.arena.iter() {
            let id = NodeId(index);
            if let Some(parent) = node.parent {
                let owner = self.arena.get(parent.0).ok_or_else(|| {
                    TreeError::InconsistentLinks(format!("{id} points to missing parent {parent}"))
                })?;
                let listed = owner.children.iter().filter(|&&c| c == id).count();
                if listed != 1 {
                    return Err(TreeError::InconsistentLinks(format!(
                        "{id} is listed {listed} times by its parent {parent}"
                    )));
                }
            }
            for &child in &node.children {
                let back = self.arena.get(child.0).and_then(|c| c.parent);
                if back != Some(id) {
                    return Err(TreeError::InconsistentLinks(format!(
                        "{id} lists {child} whose parent is {back:?}"
                    )));
                }
            }
            let mut steps = 0;
            let mut current = node.parent;
            while let Some(p) = current {
                steps += 1;
                if steps > self.arena.len() {
                    return Err(TreeError::InconsistentLinks(format!(
                        "{id} is its own ancestor"
                    )));
                }
                current = self.arena.get(p.0).and_then(|n| n.parent);
            }
        }
        Ok(())
    }

    // Raw link helpers. Callers validate operands first; these keep both
    // directions of a link in sync.

    pub(crate) fn entry(&self, id: NodeId) -> TreeResult<&TreeNode<C>> {
        self.arena.get(id.0).ok_or(TreeError::InvalidOperand(id))
    }

    pub(crate) fn entry_mut(&mut self, id: NodeId) -> TreeResult<&mut TreeNode<C>> {
        self.arena.get_mut(id.0).ok_or(TreeError::InvalidOperand(id))
    }

    pub(crate) fn ensure(&self, id: NodeId) -> TreeResult<()> {
        self.entry(id).map(|_| ())
    }

    /// True if `candidate` is a strict ancestor of `node`.
    pub(crate) fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = self.arena.get(node.0).and_then(|n| n.parent);
        while let Some(parent) = current {
            if parent == candidate {
                return true;
            }
            current = self.arena.get(parent.0).and_then(|n| n.parent);
        }
        false
    }

    /// Parent and position of `id`, if attached.
    pub(crate) fn slot(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.arena.get(id.0)?.parent?;
        let index = self
            .arena
            .get(parent.0)?
            .children
            .iter()
            .position(|&c| c == id)?;
        Some((parent, index))
    }

    /// Removes `id` from its parent's list and clears its back-reference.
    pub(crate) fn unlink(&mut self, id: NodeId) -> Option<(NodeId, usize)> {
        let (parent, index) = self.slot(id)?;
        self.arena.get_mut(parent.0)?.children.remove(index);
        self.arena.get_mut(id.0)?.parent = None;
        Some((parent, index))
    }

    /// Inserts a parentless `child` at `index` of `parent`.
    pub(crate) fn link_at(&mut self, parent: NodeId, index: usize, child: NodeId) -> TreeResult<()> {
        let len = self.entry(parent)?.children.len();
        if index > len {
            return Err(TreeError::IndexOutOfRange { parent, index, len });
        }
        self.ensure(child)?;
        self.entry_mut(parent)?.children.insert(index, child);
        self.entry_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Puts `b` where `a` was and `a` where `b` was, subtrees included.
    pub(crate) fn exchange_slots(&mut self, a: NodeId, b: NodeId) -> TreeResult<()> {
        let slot_a = self.slot(a);
        let slot_b = self.slot(b);
        if let Some((parent, index)) = slot_a {
            self.entry_mut(parent)?.children[index] = b;
        }
        if let Some((parent, index)) = slot_b {
            self.entry_mut(parent)?.children[index] = a;
        }
        self.entry_mut(a)?.parent = slot_b.map(|(parent, _)| parent);
        self.entry_mut(b)?.parent = slot_a.map(|(parent, _)| parent);
        Ok(())
    }

    /// Trades the identities of `a` and `b` in the structure: each takes the
    /// other's parent, position and children.
    pub(crate) fn exchange_nodes(&mut self, a: NodeId, b: NodeId) -> TreeResult<()> {
        let swap = |x: NodeId| {
            if x == a {
                b
            } else if x == b {
                a
            } else {
                x
            }
        };
        let a_parent = self.entry(a)?.parent;
        let b_parent = self.entry(b)?.parent;
        let a_children = std::mem::take(&mut self.entry_mut(a)?.children);
        let b_children = std::mem::take(&mut self.entry_mut(b)?.children);

        let mut outer: Vec<NodeId> = Vec::with_capacity(2);
        for parent in [a_parent, b_parent].into_iter().flatten() {
            if parent != a && parent != b && !outer.contains(&parent) {
                outer.push(parent);
            }
        }
        for parent in outer {
            for slot in self.entry_mut(parent)?.children.iter_mut() {
                *slot = swap(*slot);
            }
        }

        let new_a_children: Vec<NodeId> = b_children.into_iter().map(swap).collect();
        let new_b_children: Vec<NodeId> = a_children.into_iter().map(swap).collect();
        for &child in &new_a_children {
            self.entry_mut(child)?.parent = Some(a);
        }
        for &child in &new_b_children {
            self.entry_mut(child)?.parent = Some(b);
        }
        self.entry_mut(a)?.children = new_a_children;
        self.entry_mut(b)?.children = new_b_children;
        self.entry_mut(a)?.parent = b_parent.map(swap);
        self.entry_mut(b)?.parent = a_parent.map(swap);
        Ok(())
    }

    /// Reports a refused edit at the configured level.
    pub(crate) fn soft_failure(&self, operation: &'static str, reason: fmt::Arguments<'_>) {
        match self.diagnostics.soft_failure_level {
            SoftFailureLevel::Warn => warn!(operation, "{}", reason),
            SoftFailureLevel::Info => info!(operation, "{}", reason),
            SoftFailureLevel::Debug => debug!(operation, "{}", reason),
            SoftFailureLevel::Off => {}
        }
    }
}

impl<C: NodeContent> Tree<C> {
    /// Creates a parentless node.
    #[instrument(level = "trace", skip_all)]
    pub fn new_node(&mut self, content: C) -> NodeId {
        NodeId(self.arena.insert(TreeNode {
            content,
            parent: None,
            children: Vec::new(),
        }))
    }

    /// Creates a node and attaches `children` to it in order.
    ///
    /// A stale id fails the whole construction before anything is created.
    /// Children that already have a parent are attached as copies.
    pub fn new_node_with_children<I>(&mut self, content: C, children: I) -> TreeResult<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let children: Vec<NodeId> = children.into_iter().collect();
        for &child in &children {
            self.ensure(child)?;
        }
        let id = self.new_node(content);
        for child in children {
            let attached = self.sanitize(child)?;
            let end = self.entry(id)?.children.len();
            self.link_at(id, end, attached)?;
        }
        Ok(id)
    }

    /// Appends `child`; returns the id actually inserted (a copy if `child`
    /// already had a parent).
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<NodeId> {
        let end = self.entry(parent)?.children.len();
        self.add_child_at(parent, end, child)
    }

    /// Inserts `child` at `index` (`0..=len`).
    #[instrument(level = "trace", skip(self))]
    pub fn add_child_at(&mut self, parent: NodeId, index: usize, child: NodeId) -> TreeResult<NodeId> {
        let len = self.entry(parent)?.children.len();
        self.ensure(child)?;
        if index > len {
            return Err(TreeError::IndexOutOfRange { parent, index, len });
        }
        self.check_attachable(parent, child)?;
        let attached = self.sanitize(child)?;
        self.link_at(parent, index, attached)?;
        Ok(attached)
    }

    /// Appends every node of `children`, returning the inserted ids.
    pub fn add_children<I>(&mut self, parent: NodeId, children: I) -> TreeResult<Vec<NodeId>>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let children: Vec<NodeId> = children.into_iter().collect();
        self.ensure(parent)?;
        for &child in &children {
            self.ensure(child)?;
            self.check_attachable(parent, child)?;
        }
        children
            .into_iter()
            .map(|child| self.add_child(parent, child))
            .collect()
    }

    /// Inserts `child` immediately before its sibling-to-be `sibling`.
    pub fn add_child_left_of(
        &mut self,
        parent: NodeId,
        child: NodeId,
        sibling: NodeId,
    ) -> TreeResult<NodeId> {
        let index = self.position_of(parent, sibling)?;
        self.add_child_at(parent, index, child)
    }

    /// Inserts `child` immediately after `sibling`.
    pub fn add_child_right_of(
        &mut self,
        parent: NodeId,
        child: NodeId,
        sibling: NodeId,
    ) -> TreeResult<NodeId> {
        let index = self.position_of(parent, sibling)?;
        self.add_child_at(parent, index + 1, child)
    }

    /// Replaces the whole child list.
    ///
    /// Previous children become roots. An empty `children` clears the node.
    /// Returns the ids actually inserted.
    #[instrument(level = "trace", skip(self, children))]
    pub fn set_children<I>(&mut self, parent: NodeId, children: I) -> TreeResult<Vec<NodeId>>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let children: Vec<NodeId> = children.into_iter().collect();
        self.ensure(parent)?;
        for &child in &children {
            self.ensure(child)?;
            if self.parent_of(child)? != Some(parent) {
                self.check_attachable(parent, child)?;
            }
        }
        self.remove_children(parent)?;
        let mut inserted = Vec::with_capacity(children.len());
        for child in children {
            let attached = self.sanitize(child)?;
            let end = self.entry(parent)?.children.len();
            self.link_at(parent, end, attached)?;
            inserted.push(attached);
        }
        Ok(inserted)
    }

    /// Puts `child` at `index`, returning the child that was there.
    pub fn set_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> TreeResult<NodeId> {
        let node = self.entry(parent)?;
        if node.children.is_empty() {
            return Err(TreeError::NoChildren { parent, index });
        }
        let previous = *node.children.get(index).ok_or(TreeError::IndexOutOfRange {
            parent,
            index,
            len: node.children.len(),
        })?;
        self.ensure(child)?;
        if child == previous {
            return Ok(previous);
        }
        self.check_attachable(parent, child)?;
        let attached = self.sanitize(child)?;
        self.entry_mut(parent)?.children[index] = attached;
        self.entry_mut(attached)?.parent = Some(parent);
        self.entry_mut(previous)?.parent = None;
        Ok(previous)
    }

    /// Swaps `old` for `new` in `parent`'s child list, returning `old`.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> TreeResult<NodeId> {
        let index = self.position_of(parent, old)?;
        self.set_child(parent, index, new)
    }

    /// Deep copy of the subtree rooted at `id`, returned as a new root.
    #[instrument(level = "trace", skip(self))]
    pub fn copy(&mut self, id: NodeId) -> TreeResult<NodeId> {
        let (content, children) = {
            let node = self.entry(id)?;
            (node.content.clone(), node.children.clone())
        };
        let copy = self.new_node(content);
        for child in children {
            let child_copy = self.copy(child)?;
            let end = self.entry(copy)?.children.len();
            self.link_at(copy, end, child_copy)?;
        }
        Ok(copy)
    }

    /// Returns a node that can be linked without creating a second owner:
    /// `id` itself when parentless, otherwise a deep copy.
    pub(crate) fn sanitize(&mut self, id: NodeId) -> TreeResult<NodeId> {
        match self.parent_of(id)? {
            None => Ok(id),
            Some(owner) => {
                let copy = self.copy(id)?;
                debug!(%id, %owner, %copy, "node already has a parent, attaching a copy");
                Ok(copy)
            }
        }
    }

    /// Refuses to link a parentless `child` under itself or a descendant.
    fn check_attachable(&self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        if self.parent_of(child)?.is_none() && (child == parent || self.is_ancestor(child, parent)) {
            return Err(TreeError::CycleDetected { node: child, parent });
        }
        Ok(())
    }

    fn position_of(&self, parent: NodeId, child: NodeId) -> TreeResult<usize> {
        self.entry(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(TreeError::NotAChild { parent, child })
    }
}
