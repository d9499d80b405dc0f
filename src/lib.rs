//! In-memory containers for ordering, caching and buffering values.
//!
//! The ordered containers are parameterized by a [comparator][compare]:
//!
//! - [`Heap`] is a binary heap. [`MinHeap`] and [`MaxHeap`] fix the order to
//!   ascending and descending respectively.
//! - [`StableHeap`] is a heap which releases equal values in the order they
//!   were pushed.
//! - [`PriorityQueue`] is a queue facade over a [`Heap`].
//! - [`SkipList`] keeps every value in sorted order, with insertion, search and
//!   deletion in `O(log(n))` on average.
//!
//! [`LruCache`] is a key-value cache bounded by total entry size and entry age,
//! which notifies listeners whenever it disposes of a value. It is configured
//! through an [`LruCacheBuilder`], and can be wrapped in a [`Recorder`] to
//! count hits and misses.
//!
//! Finally, a handful of sequence containers round out the crate:
//! [`CircularBuffer`], [`Deque`], [`Queue`], [`SinglyLinkedList`] and
//! [`DoublyLinkedList`].
//!
//! # Examples
//!
//! ```
//! use stowage::{LruCache, MaxHeap, SkipList};
//!
//! let mut heap: MaxHeap<_> = [3, 1, 4, 1, 5].into_iter().collect();
//! assert_eq!(heap.pop(), Some(5));
//!
//! let mut skiplist: SkipList<_> = ["pear", "apple", "fig"].into_iter().collect();
//! skiplist.delete(&"fig");
//! assert_eq!(skiplist.to_vec(), vec!["apple", "pear"]);
//!
//! let mut cache = LruCache::builder().max_size(2).build();
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.get(&"a");
//! cache.set("c", 3);
//! assert!(!cache.has(&"b"));
//! ```
//!
//! None of the containers are thread-safe; wrap them in a lock to share them
//! between threads.

mod arena;
pub mod circular_buffer;
pub mod compare;
pub mod deque;
pub mod doubly_linked_list;
pub mod error;
pub mod heap;
pub mod level_generator;
pub mod lru_cache;
pub mod priority_queue;
pub mod queue;
mod sentinel_list;
pub mod singly_linked_list;
pub mod skiplist;
pub mod stable_heap;

pub use circular_buffer::CircularBuffer;
pub use compare::{Ascending, Compare, Descending};
pub use deque::Deque;
pub use doubly_linked_list::DoublyLinkedList;
pub use error::{Error, Result};
pub use heap::{Heap, MaxHeap, MinHeap};
pub use lru_cache::{LruCache, LruCacheBuilder, Recorder};
pub use priority_queue::PriorityQueue;
pub use queue::Queue;
pub use singly_linked_list::SinglyLinkedList;
pub use skiplist::SkipList;
pub use stable_heap::{StableHeap, StableMaxHeap, StableMinHeap};
