//! Recency list whose nodes live in a [`SlotArena`] and link by [`SlotId`].
//!
//! The list is the ordering half of an LRU shard: the head is the most
//! recently used entry, the tail the least. Because every node has a stable
//! `SlotId`, an external index can address a node directly and splice it to
//! the head in O(1) without walking the list.
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────┐
//!   │ SlotId │ Node { value, links: { prev, next } }    │
//!   ├────────┼──────────────────────────────────────────┤
//!   │ 0      │ { A, prev: -, next: 2 }                  │
//!   │ 1      │ { C, prev: 2, next: - }                  │
//!   │ 2      │ { B, prev: 0, next: 1 }                  │
//!   └────────┴──────────────────────────────────────────┘
//!
//!   head ─► [0:A] ◄──► [2:B] ◄──► [1:C] ◄── tail
//!            MRU                    LRU
//! ```
//!
//! Only the operations an LRU needs are provided: insert at the head,
//! unlink anywhere, pop the tail, and splice to the head.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Links {
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    links: Links,
}

/// Doubly linked list stored in a slot arena.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Arena slots allocated so far, occupied or free.
    pub(crate) fn slot_count(&self) -> usize {
        self.arena.slot_count()
    }

    /// Value at the head (most recently used).
    pub fn front(&self) -> Option<&T> {
        self.get(self.head?)
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Value at the tail (least recently used).
    pub fn back(&self) -> Option<&T> {
        self.get(self.tail?)
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts `value` at the head and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            links: Links::default(),
        });
        self.link_front(id);
        id
    }

    /// Unlinks and returns the tail value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks `id` and returns its value; `None` if `id` is not in the list.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Splices `id` to the head. Returns `false` if `id` is not in the list.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.head == Some(id) {
            return true;
        }
        if self.unlink(id).is_none() {
            return false;
        }
        self.link_front(id);
        true
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter_entries().map(|(_, value)| value)
    }

    /// Iterates `(SlotId, &T)` pairs from head to tail.
    pub fn iter_entries(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    /// Walks the list and checks link symmetry, head/tail placement, and that
    /// the walk visits exactly the occupied arena slots.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if self.head.is_none() != self.tail.is_none() {
            return Err(InvariantError::new(format!(
                "head {:?} and tail {:?} disagree on emptiness",
                self.head, self.tail
            )));
        }

        let mut visited = 0usize;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            visited += 1;
            if visited > self.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dangling link to {id:?}")))?;
            if node.links.prev != prev {
                return Err(InvariantError::new(format!(
                    "{id:?} has prev {:?}, expected {prev:?}",
                    node.links.prev
                )));
            }
            if node.links.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::new(format!(
                    "list ends at {id:?} but tail is {:?}",
                    self.tail
                )));
            }
            prev = Some(id);
            cursor = node.links.next;
        }

        if visited != self.len() {
            return Err(InvariantError::new(format!(
                "walked {visited} nodes, arena holds {}",
                self.len()
            )));
        }
        Ok(())
    }

    fn links_mut(&mut self, id: SlotId) -> Option<&mut Links> {
        self.arena.get_mut(id).map(|node| &mut node.links)
    }

    /// Detaches `id` from its neighbours, leaving the node in the arena.
    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let Links { prev, next } = self.arena.get(id)?.links;

        match prev.and_then(|p| self.links_mut(p)) {
            Some(links) => links.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.links_mut(n)) {
            Some(links) => links.prev = prev,
            None => self.tail = prev,
        }
        if let Some(links) = self.links_mut(id) {
            *links = Links::default();
        }
        Some(())
    }

    /// Attaches a detached node at the head.
    fn link_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(links) = self.links_mut(id) {
            links.prev = None;
            links.next = old_head;
        }
        match old_head.and_then(|h| self.links_mut(h)) {
            Some(links) => links.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-to-tail iterator over `(SlotId, &T)`.
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    cursor: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.arena.get(id)?;
        self.cursor = node.links.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((id, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(values(&list), vec!["c", "b", "a"]);
        assert_eq!(list.front_id(), Some(c));
        assert_eq!(list.back_id(), Some(a));
        assert_eq!(list.len(), 3);
        list.validate().unwrap();
    }

    #[test]
    fn move_to_front_from_tail_middle_and_head() {
        let mut list = IntrusiveList::new();
        let a = list.push_front(1);
        let b = list.push_front(2);
        let c = list.push_front(3);

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec![1, 3, 2]);
        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec![3, 1, 2]);
        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec![3, 1, 2]);
        assert_eq!(list.back_id(), Some(b));
        list.validate().unwrap();
    }

    #[test]
    fn pop_back_drains_in_lru_order() {
        let mut list = IntrusiveList::new();
        for v in 0..4 {
            list.push_front(v);
        }
        assert_eq!(list.pop_back(), Some(0));
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        list.validate().unwrap();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["c", "a"]);
        assert_eq!(list.remove(b), None);

        assert_eq!(list.remove(c), Some("c"));
        assert_eq!(list.front(), Some(&"a"));
        assert_eq!(list.back(), Some(&"a"));

        assert_eq!(list.remove(a), Some("a"));
        assert!(list.is_empty());
        assert!(!list.contains(a));
        list.validate().unwrap();
    }

    #[test]
    fn stale_id_is_not_moved() {
        let mut list = IntrusiveList::new();
        let a = list.push_front(1);
        list.remove(a);
        assert!(!list.move_to_front(a));
        assert_eq!(list.front_id(), None);
    }

    #[test]
    fn get_mut_and_entries() {
        let mut list = IntrusiveList::with_capacity(2);
        let a = list.push_front(10);
        let b = list.push_front(20);
        if let Some(v) = list.get_mut(a) {
            *v += 1;
        }
        let entries: Vec<_> = list.iter_entries().map(|(id, v)| (id, *v)).collect();
        assert_eq!(entries, vec![(b, 20), (a, 11)]);
    }

    #[test]
    fn freed_slots_are_reused_before_growing() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        assert_eq!(list.slot_count(), 2);

        for v in 3..50 {
            list.pop_back();
            list.push_front(v);
        }
        assert_eq!(list.len(), 2);
        assert_eq!(list.slot_count(), 2);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![49, 48]);
        list.validate().unwrap();
    }

    #[test]
    fn clear_resets_state() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_back(), None);
        list.validate().unwrap();
    }
}
