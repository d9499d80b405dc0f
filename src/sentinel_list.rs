//! Doubly-linked list stored in an [`Arena`], bounded by two sentinel nodes.
//!
//! ```text
//!   <head> <--> [a] <--> [b] <--> [c] <--> <tail>
//! ```
//!
//! The head and tail sentinels never carry a value and are never removed, so
//! every live node always has both a predecessor and a successor and no
//! operation needs to special-case the ends of the list.
//!
//! Node ids stay valid until the node is removed, which lets callers (the LRU
//! cache) keep an id per key and move or remove that node in `O(1)`.

use std::iter::FusedIterator;

use crate::arena::{Arena, NodeId};

#[derive(Debug, Clone)]
struct Link<T> {
    // `None` only for the two sentinels.
    value: Option<T>,
    prev: NodeId,
    next: NodeId,
}

#[derive(Debug, Clone)]
pub(crate) struct SentinelList<T> {
    arena: Arena<Link<T>>,
    head: NodeId,
    tail: NodeId,
}

impl<T> SentinelList<T> {
    pub(crate) fn new() -> Self {
        let mut arena = Arena::new();
        let head = arena.insert_with(|id| Link {
            value: None,
            prev: id,
            next: id,
        });
        let tail = arena.insert_with(|id| Link {
            value: None,
            prev: head,
            next: id,
        });
        arena[head].next = tail;
        SentinelList { arena, head, tail }
    }

    /// Number of values, sentinels excluded.
    pub(crate) fn len(&self) -> usize {
        self.arena.len() - 2
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push_front(&mut self, value: T) -> NodeId {
        let id = self.arena.insert(Link {
            value: Some(value),
            prev: self.head,
            next: self.head,
        });
        self.attach_after(self.head, id);
        id
    }

    pub(crate) fn push_back(&mut self, value: T) -> NodeId {
        let id = self.arena.insert(Link {
            value: Some(value),
            prev: self.tail,
            next: self.tail,
        });
        let last = self.arena[self.tail].prev;
        self.attach_after(last, id);
        id
    }

    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let id = self.front_id()?;
        self.remove(id)
    }

    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let id = self.back_id()?;
        self.remove(id)
    }

    /// Moves an existing node right behind the head sentinel.
    pub(crate) fn move_to_front(&mut self, id: NodeId) {
        if !self.is_value_node(id) || self.arena[self.head].next == id {
            return;
        }
        self.detach(id);
        self.attach_after(self.head, id);
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.is_value_node(id) {
            return None;
        }
        self.detach(id);
        self.arena.remove(id).and_then(|link| link.value)
    }

    pub(crate) fn front_id(&self) -> Option<NodeId> {
        self.value_id(self.arena[self.head].next)
    }

    pub(crate) fn back_id(&self) -> Option<NodeId> {
        self.value_id(self.arena[self.tail].prev)
    }

    /// The node after `id`, or `None` when `id` is the last value.
    pub(crate) fn next_id(&self, id: NodeId) -> Option<NodeId> {
        self.value_id(self.arena.get(id)?.next)
    }

    /// The node before `id`, or `None` when `id` is the first value.
    pub(crate) fn prev_id(&self, id: NodeId) -> Option<NodeId> {
        self.value_id(self.arena.get(id)?.prev)
    }

    pub(crate) fn front(&self) -> Option<&T> {
        self.get(self.front_id()?)
    }

    pub(crate) fn back(&self) -> Option<&T> {
        self.get(self.back_id()?)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        self.arena.get(id).and_then(|link| link.value.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.arena.get_mut(id).and_then(|link| link.value.as_mut())
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.front_id(),
            back: self.back_id(),
            remaining: self.len(),
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }

    fn value_id(&self, id: NodeId) -> Option<NodeId> {
        self.is_value_node(id).then_some(id)
    }

    fn is_value_node(&self, id: NodeId) -> bool {
        id != self.head && id != self.tail && self.arena.get(id).is_some()
    }

    /// Splice `id` in between `prev` and its current successor.
    fn attach_after(&mut self, prev: NodeId, id: NodeId) {
        let next = self.arena[prev].next;
        {
            let link = &mut self.arena[id];
            link.prev = prev;
            link.next = next;
        }
        self.arena[prev].next = id;
        self.arena[next].prev = id;
    }

    /// Unlink `id` from its neighbours, leaving its slot allocated.
    fn detach(&mut self, id: NodeId) {
        let (prev, next) = {
            let link = &self.arena[id];
            (link.prev, link.next)
        };
        self.arena[prev].next = next;
        self.arena[next].prev = prev;
    }

    /// Checks the integrity of the list.
    #[cfg(test)]
    pub(crate) fn check(&self) {
        let mut count = 0;
        let mut prev = self.head;
        let mut current = self.arena[self.head].next;
        while current != self.tail {
            assert_eq!(self.arena[current].prev, prev, "broken back link");
            assert!(self.arena[current].value.is_some(), "sentinel in list body");
            count += 1;
            prev = current;
            current = self.arena[current].next;
        }
        assert_eq!(self.arena[self.tail].prev, prev, "broken tail link");
        assert_eq!(count, self.len(), "length mismatch");
    }
}

impl<T> Default for SentinelList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// /////////////////////////////////
// Iterators
// /////////////////////////////////

pub(crate) struct Iter<'a, T> {
    list: &'a SentinelList<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.front = self.list.next_id(id);
        self.remaining -= 1;
        self.list.get(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.back = self.list.prev_id(id);
        self.remaining -= 1;
        self.list.get(id)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::SentinelList;

    fn collect<T: Clone>(list: &SentinelList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn empty() {
        let list: SentinelList<u8> = SentinelList::new();
        list.check();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.front_id(), None);
        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn push_and_pop_both_ends() {
        let mut list = SentinelList::new();
        list.push_back(2);
        list.push_back(3);
        list.push_front(1);
        list.check();
        assert_eq!(collect(&list), vec![1, 2, 3]);
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), None);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));

        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);
        list.check();
    }

    #[test]
    fn move_to_front() {
        let mut list = SentinelList::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');

        list.move_to_front(c);
        list.check();
        assert_eq!(collect(&list), vec!['c', 'a', 'b']);

        list.move_to_front(c);
        list.move_to_front(b);
        list.check();
        assert_eq!(collect(&list), vec!['b', 'c', 'a']);
        assert_eq!(list.back_id(), Some(a));
        assert_eq!(list.prev_id(a), Some(c));
        assert_eq!(list.next_id(a), None);
    }

    #[test]
    fn remove_middle_and_stale_ids() {
        let mut list = SentinelList::new();
        list.push_back(1);
        let mid = list.push_back(2);
        list.push_back(3);

        assert_eq!(list.remove(mid), Some(2));
        assert_eq!(list.remove(mid), None);
        list.check();
        assert_eq!(collect(&list), vec![1, 3]);

        // The sentinels can never be removed through a value id.
        let head = list.head;
        assert_eq!(list.remove(head), None);
        list.move_to_front(head);
        list.check();
    }

    #[test]
    fn get_mut_and_clear() {
        let mut list = SentinelList::new();
        let id = list.push_back(String::from("x"));
        if let Some(value) = list.get_mut(id) {
            value.push('y');
        }
        assert_eq!(list.get(id).map(String::as_str), Some("xy"));

        list.clear();
        list.check();
        assert!(list.is_empty());
    }
}
