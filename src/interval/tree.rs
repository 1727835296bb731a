//! Arena-backed AVL tree of disjoint intervals.
//!
//! Nodes are ordered by `(lower, slot)` and every node carries the largest upper
//! bound found in its subtree, so an overlap probe only descends into a subtree
//! that can still contain a match. Nodes live in a `Vec` arena and are addressed
//! by slot index; a [`NodeHandle`] pairs the slot with a generation counter so a
//! handle to a removed node never resolves to whatever reuses its slot.

use super::key::IntervalKey;
use std::cmp::Ordering;
use std::collections::VecDeque;
use tracing::trace;

/// Stable reference to a node inserted into an [`IntervalIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    slot: u32,
    generation: u32,
}

/// A key and its payload, as taken out of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry<T> {
    /// The interval the node was inserted with
    pub key: IntervalKey,
    /// The payload the node was inserted with
    pub value: T,
}

/// Result of [`IntervalIndex::insert_or_find_overlap`].
#[derive(Debug, PartialEq, Eq)]
pub enum Probe<T> {
    /// No overlapping node existed; the new node is now in the index
    Inserted(NodeHandle),
    /// An overlapping node was found and removed; the new node was not inserted
    Overlap(IndexEntry<T>),
}

#[derive(Debug)]
struct Node<T> {
    key: IntervalKey,
    // None while the slot sits on the free list
    value: Option<T>,
    generation: u32,
    left: Option<u32>,
    right: Option<u32>,
    height: u8,
    max_upper: u32,
}

/// Overlap index over closed rating intervals.
///
/// No two intervals present at the same time overlap: an insert that would
/// overlap resolves the collision instead.
#[derive(Debug)]
pub struct IntervalIndex<T> {
    nodes: Vec<Node<T>>,
    free: Vec<u32>,
    root: Option<u32>,
    len: usize,
}

impl<T> IntervalIndex<T> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Number of nodes currently in the index
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no nodes
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Whether `handle` still refers to a node in the index
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes
            .get(handle.slot as usize)
            .is_some_and(|node| node.generation == handle.generation && node.value.is_some())
    }

    /// Key and payload of a live node
    pub fn get(&self, handle: NodeHandle) -> Option<(IntervalKey, &T)> {
        if !self.contains(handle) {
            return None;
        }
        let node = &self.nodes[handle.slot as usize];
        node.value.as_ref().map(|value| (node.key, value))
    }

    /// Insert `key` unless it overlaps a node already present.
    ///
    /// On overlap the existing node is removed from the index and returned, and
    /// `value` is dropped without being inserted.
    pub fn insert_or_find_overlap(&mut self, key: IntervalKey, value: T) -> Probe<T> {
        if let Some(entry) = self.find_overlap_slot(&key).and_then(|slot| self.detach(slot)) {
            trace!("Interval {} collided with {}", key, entry.key);
            return Probe::Overlap(entry);
        }

        let handle = self.allocate(key, value);
        let root = self.insert_at(self.root, handle.slot);
        self.root = Some(root);
        self.len += 1;
        trace!("Interval {} inserted, {} nodes in index", key, self.len);
        Probe::Inserted(handle)
    }

    /// Remove the node behind `handle`.
    ///
    /// Returns `None` if the node is no longer in the index, which makes a
    /// second removal of the same handle harmless.
    pub fn remove(&mut self, handle: NodeHandle) -> Option<T> {
        if !self.contains(handle) {
            trace!("Remove of stale handle {:?} ignored", handle);
            return None;
        }
        self.detach(handle.slot).map(|entry| entry.value)
    }

    /// Key and payload of some node overlapping `key`, without removing it.
    pub fn find_overlap(&self, key: &IntervalKey) -> Option<(IntervalKey, &T)> {
        let node = &self.nodes[self.find_overlap_slot(key)? as usize];
        node.value.as_ref().map(|value| (node.key, value))
    }

    /// All nodes in ascending order of their lower bound
    pub fn entries(&self) -> Vec<(IntervalKey, &T)> {
        let mut result = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut cursor = self.root;

        while cursor.is_some() || !stack.is_empty() {
            while let Some(slot) = cursor {
                stack.push(slot);
                cursor = self.nodes[slot as usize].left;
            }
            if let Some(slot) = stack.pop() {
                let node = &self.nodes[slot as usize];
                if let Some(value) = node.value.as_ref() {
                    result.push((node.key, value));
                }
                cursor = node.right;
            }
        }

        result
    }

    /// All nodes level by level, starting at the root. Diagnostic helper.
    pub fn breadth_first(&self) -> Vec<(IntervalKey, &T)> {
        let mut result = Vec::with_capacity(self.len);
        let mut queue: VecDeque<u32> = self.root.into_iter().collect();

        while let Some(slot) = queue.pop_front() {
            let node = &self.nodes[slot as usize];
            if let Some(value) = node.value.as_ref() {
                result.push((node.key, value));
            }
            queue.extend(node.left);
            queue.extend(node.right);
        }

        result
    }

    /// Remove every node. Outstanding handles become stale.
    pub fn clear(&mut self) {
        for slot in 0..self.nodes.len() as u32 {
            if self.nodes[slot as usize].value.is_some() {
                self.release(slot);
            }
        }
        self.root = None;
        self.len = 0;
    }

    fn find_overlap_slot(&self, key: &IntervalKey) -> Option<u32> {
        let mut cursor = self.root;

        while let Some(slot) = cursor {
            let node = &self.nodes[slot as usize];
            if node.key.overlaps(key) {
                return Some(slot);
            }
            // If the left subtree reaches key.lower but holds no overlap, nothing to
            // the right can overlap either, since those nodes start even later.
            cursor = match node.left {
                Some(left) if self.nodes[left as usize].max_upper >= key.lower() => Some(left),
                _ if node.key.lower() > key.upper() => None,
                _ => node.right,
            };
        }

        None
    }

    fn allocate(&mut self, key: IntervalKey, value: T) -> NodeHandle {
        if let Some(slot) = self.free.pop() {
            let node = &mut self.nodes[slot as usize];
            node.key = key;
            node.value = Some(value);
            node.left = None;
            node.right = None;
            node.height = 1;
            node.max_upper = key.upper();
            return NodeHandle {
                slot,
                generation: node.generation,
            };
        }

        let slot = self.nodes.len() as u32;
        self.nodes.push(Node {
            key,
            value: Some(value),
            generation: 0,
            left: None,
            right: None,
            height: 1,
            max_upper: key.upper(),
        });
        NodeHandle {
            slot,
            generation: 0,
        }
    }

    fn release(&mut self, slot: u32) -> Option<IndexEntry<T>> {
        let node = &mut self.nodes[slot as usize];
        let value = node.value.take()?;
        node.generation = node.generation.wrapping_add(1);
        node.left = None;
        node.right = None;
        self.free.push(slot);
        Some(IndexEntry {
            key: node.key,
            value,
        })
    }

    fn detach(&mut self, slot: u32) -> Option<IndexEntry<T>> {
        let target = self.order(slot);
        self.root = self.remove_at(self.root, target);
        self.len = self.len.saturating_sub(1);
        self.release(slot)
    }

    fn order(&self, slot: u32) -> (u32, u32) {
        (self.nodes[slot as usize].key.lower(), slot)
    }

    fn height(&self, slot: Option<u32>) -> u8 {
        slot.map_or(0, |slot| self.nodes[slot as usize].height)
    }

    fn balance_factor(&self, slot: u32) -> i16 {
        let node = &self.nodes[slot as usize];
        i16::from(self.height(node.left)) - i16::from(self.height(node.right))
    }

    fn refresh(&mut self, slot: u32) {
        let (left, right, upper) = {
            let node = &self.nodes[slot as usize];
            (node.left, node.right, node.key.upper())
        };
        let height = 1 + self.height(left).max(self.height(right));
        let max_upper = [left, right]
            .into_iter()
            .flatten()
            .map(|child| self.nodes[child as usize].max_upper)
            .fold(upper, u32::max);

        let node = &mut self.nodes[slot as usize];
        node.height = height;
        node.max_upper = max_upper;
    }

    fn rotate_right(&mut self, slot: u32) -> u32 {
        let Some(pivot) = self.nodes[slot as usize].left else {
            return slot;
        };
        self.nodes[slot as usize].left = self.nodes[pivot as usize].right;
        self.nodes[pivot as usize].right = Some(slot);
        self.refresh(slot);
        self.refresh(pivot);
        pivot
    }

    fn rotate_left(&mut self, slot: u32) -> u32 {
        let Some(pivot) = self.nodes[slot as usize].right else {
            return slot;
        };
        self.nodes[slot as usize].right = self.nodes[pivot as usize].left;
        self.nodes[pivot as usize].left = Some(slot);
        self.refresh(slot);
        self.refresh(pivot);
        pivot
    }

    fn rebalance(&mut self, slot: u32) -> u32 {
        self.refresh(slot);
        let balance = self.balance_factor(slot);

        if balance > 1 {
            if let Some(left) = self.nodes[slot as usize].left {
                if self.balance_factor(left) < 0 {
                    let left = self.rotate_left(left);
                    self.nodes[slot as usize].left = Some(left);
                }
            }
            return self.rotate_right(slot);
        }

        if balance < -1 {
            if let Some(right) = self.nodes[slot as usize].right {
                if self.balance_factor(right) > 0 {
                    let right = self.rotate_right(right);
                    self.nodes[slot as usize].right = Some(right);
                }
            }
            return self.rotate_left(slot);
        }

        slot
    }

    fn insert_at(&mut self, root: Option<u32>, slot: u32) -> u32 {
        let Some(current) = root else {
            return slot;
        };

        if self.order(slot) < self.order(current) {
            let left = self.insert_at(self.nodes[current as usize].left, slot);
            self.nodes[current as usize].left = Some(left);
        } else {
            let right = self.insert_at(self.nodes[current as usize].right, slot);
            self.nodes[current as usize].right = Some(right);
        }

        self.rebalance(current)
    }

    fn remove_at(&mut self, root: Option<u32>, target: (u32, u32)) -> Option<u32> {
        let current = root?;

        match target.cmp(&self.order(current)) {
            Ordering::Less => {
                let left = self.remove_at(self.nodes[current as usize].left, target);
                self.nodes[current as usize].left = left;
            }
            Ordering::Greater => {
                let right = self.remove_at(self.nodes[current as usize].right, target);
                self.nodes[current as usize].right = right;
            }
            Ordering::Equal => {
                let node = &self.nodes[current as usize];
                return match (node.left, node.right) {
                    (None, None) => None,
                    (Some(child), None) | (None, Some(child)) => Some(child),
                    (Some(left), Some(right)) => {
                        let (rest, successor) = self.detach_min(right);
                        self.nodes[successor as usize].left = Some(left);
                        self.nodes[successor as usize].right = rest;
                        Some(self.rebalance(successor))
                    }
                };
            }
        }

        Some(self.rebalance(current))
    }

    /// Unlink the leftmost node of the subtree at `slot`.
    /// Returns the new subtree root and the unlinked slot.
    fn detach_min(&mut self, slot: u32) -> (Option<u32>, u32) {
        match self.nodes[slot as usize].left {
            None => (self.nodes[slot as usize].right, slot),
            Some(left) => {
                let (rest, min) = self.detach_min(left);
                self.nodes[slot as usize].left = rest;
                (Some(self.rebalance(slot)), min)
            }
        }
    }

    /// Checks ordering, balance, subtree annotations, size and disjointness.
    #[cfg(test)]
    pub(crate) fn validate(&self) -> Result<(), String> {
        fn walk<T>(
            index: &IntervalIndex<T>,
            slot: Option<u32>,
            count: &mut usize,
        ) -> Result<(u8, Option<u32>), String> {
            let Some(slot) = slot else {
                return Ok((0, None));
            };
            let node = &index.nodes[slot as usize];
            if node.value.is_none() {
                return Err(format!("slot {slot} is linked but free"));
            }
            *count += 1;

            for (child, is_left) in [(node.left, true), (node.right, false)] {
                if let Some(child) = child {
                    let ordered = if is_left {
                        index.order(child) < index.order(slot)
                    } else {
                        index.order(child) > index.order(slot)
                    };
                    if !ordered {
                        return Err(format!("slot {child} is on the wrong side of {slot}"));
                    }
                }
            }

            let (left_height, left_max) = walk(index, node.left, count)?;
            let (right_height, right_max) = walk(index, node.right, count)?;
            if left_height.abs_diff(right_height) > 1 {
                return Err(format!("slot {slot} is unbalanced"));
            }
            if node.height != 1 + left_height.max(right_height) {
                return Err(format!("slot {slot} has a stale height"));
            }
            let max_upper = [left_max, right_max]
                .into_iter()
                .flatten()
                .fold(node.key.upper(), u32::max);
            if node.max_upper != max_upper {
                return Err(format!("slot {slot} has a stale max upper bound"));
            }
            Ok((node.height, Some(max_upper)))
        }

        let mut count = 0;
        walk(self, self.root, &mut count)?;
        if count != self.len {
            return Err(format!("reachable {count} nodes, len says {}", self.len));
        }

        let entries = self.entries();
        for pair in entries.windows(2) {
            if pair[0].0.overlaps(&pair[1].0) {
                return Err(format!("{} overlaps {}", pair[0].0, pair[1].0));
            }
        }
        Ok(())
    }
}

impl<T> Default for IntervalIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
