//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::HashMap;

use generational_arena::{Arena, Index};

#[derive(Debug)]
struct Node {
    key: String,
    prev: Option<Index>,
    next: Option<Index>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Nodes live in an arena and link to each other by index, so there are no
/// owning cycles and freed slots get reused. The lookup map makes every
/// operation O(1).
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
#[derive(Debug, Default)]
pub struct LruTracker {
    nodes: Arena<Node>,
    lookup: HashMap<String, Index>,
    head: Option<Index>,
    tail: Option<Index>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            lookup: HashMap::new(),
            head: None,
            tail: None,
        }
    }

    fn unlink(&mut self, index: Index) {
        let (prev, next) = match self.nodes.get(index) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
    }

    fn link_front(&mut self, index: Index) {
        let old_head = self.head;
        if let Some(node) = self.nodes.get_mut(index) {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(h) = old_head {
            self.nodes[h].prev = Some(index);
        }
        self.head = Some(index);
        if self.tail.is_none() {
            self.tail = Some(index);
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to front).
    ///
    /// If key is new, it is inserted at the front.
    pub fn touch(&mut self, key: &str) {
        match self.lookup.get(key).copied() {
            Some(index) => {
                if self.head != Some(index) {
                    self.unlink(index);
                    self.link_front(index);
                }
            }
            None => {
                let index = self.nodes.insert(Node {
                    key: key.to_string(),
                    prev: None,
                    next: None,
                });
                self.lookup.insert(key.to_string(), index);
                self.link_front(index);
            }
        }
    }

    // == Remove ==
    /// Removes a key from the tracker. Returns whether it was tracked.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.lookup.remove(key) {
            Some(index) => {
                self.unlink(index);
                self.nodes.remove(index);
                true
            }
            None => false,
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let tail = self.tail?;
        self.unlink(tail);
        let node = self.nodes.remove(tail)?;
        self.lookup.remove(&node.key);
        Some(node.key)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lookup.clear();
        self.head = None;
        self.tail = None;
    }

    // == Iteration ==
    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::successors(self.head.and_then(|h| self.nodes.get(h)), move |node| {
            node.next.and_then(|n| self.nodes.get(n))
        })
        .map(|node| node.key.as_str())
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Sizes of the lookup map, the arena, and a front-to-back walk.
    #[cfg(test)]
    pub(crate) fn structure_sizes(&self) -> (usize, usize, usize) {
        (self.lookup.len(), self.nodes.len(), self.iter().count())
    }
}
