//! Slot arena handing out stable [`NodeId`] handles.
//!
//! Linked containers store their nodes here and link them by id instead of by
//! pointer. Freed slots are recycled through a free list, so ids are only
//! stable while the node they name is alive.

/// Handle to a slot in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn insert(&mut self, value: T) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(value);
            idx
        } else {
            self.slots.push(Some(value));
            self.slots.len() - 1
        };
        self.len += 1;
        NodeId(idx)
    }

    /// Insert a value built from the id it is about to be stored under, for
    /// nodes which must link to themselves.
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(NodeId) -> T) -> NodeId {
        let idx = self.free_list.last().copied().unwrap_or(self.slots.len());
        let id = self.insert(build(NodeId(idx)));
        debug_assert_eq!(id, NodeId(idx));
        id
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<NodeId> for Arena<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if the slot is vacant, which means a container broke its own
    /// linking invariant.
    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("dangling node id {id:?}"),
        }
    }
}

impl<T> std::ops::IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("dangling node id {id:?}"),
        }
    }
}
