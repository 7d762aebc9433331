//! Ordered id queues
//!
//! [`IdQueue`] is a plain min-heap on `(timestamp, value)`. [`SharedQueue`]
//! wraps it for many producers and one consumer: producers push and finally
//! close their slot, the consumer blocks in [`SharedQueue::pop_wait`] until an
//! id is ready or every producer has closed.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use parking_lot::{Condvar, Mutex};

use crate::id::Id;

/// Min-heap of ids, earliest timestamp first, ties by value.
/// Not synchronized.
#[derive(Debug, Default, Clone)]
pub struct IdQueue {
    heap: BinaryHeap<Reverse<Id>>,
}

impl IdQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// O(log n)
    pub fn push(&mut self, id: Id) {
        self.heap.push(Reverse(id));
    }

    /// Remove the smallest id. O(log n)
    pub fn pop(&mut self) -> Option<Id> {
        self.heap.pop().map(|Reverse(id)| id)
    }

    pub fn peek(&self) -> Option<&Id> {
        self.heap.peek().map(|Reverse(id)| id)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Outcome of a blocking pop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popped {
    Item(Id),
    /// Every producer closed and nothing is left
    Drained,
}

#[derive(Debug)]
struct Inner {
    ids: IdQueue,
    open_producers: usize,
}

/// Lock-protected [`IdQueue`] with producer accounting
#[derive(Debug)]
pub struct SharedQueue {
    inner: Mutex<Inner>,
    ready: Condvar,
}

impl SharedQueue {
    pub fn new(producers: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                ids: IdQueue::new(),
                open_producers: producers,
            }),
            ready: Condvar::new(),
        }
    }

    pub fn push(&self, id: Id) {
        self.inner.lock().ids.push(id);
        self.ready.notify_one();
    }

    /// A producer is finished, successfully or not
    pub fn close_producer(&self) {
        let mut inner = self.inner.lock();
        inner.open_producers = inner.open_producers.saturating_sub(1);
        drop(inner);
        self.ready.notify_all();
    }

    /// Close every remaining producer slot
    pub fn close_all(&self) {
        self.inner.lock().open_producers = 0;
        self.ready.notify_all();
    }

    pub fn try_pop(&self) -> Option<Id> {
        self.inner.lock().ids.pop()
    }

    /// Pop the smallest id, waiting for one if producers are still open.
    /// The lock is released while waiting.
    pub fn pop_wait(&self) -> Popped {
        let mut inner = self.inner.lock();
        loop {
            if let Some(id) = inner.ids.pop() {
                return Popped::Item(id);
            }
            if inner.open_producers == 0 {
                return Popped::Drained;
            }
            self.ready.wait(&mut inner);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().ids.is_empty()
    }

    pub fn open_producers(&self) -> usize {
        self.inner.lock().open_producers
    }
}
