use crate::error::Error;
use crate::item::{generate_item, IdSource, Item};
use log::debug;
use std::num::NonZeroUsize;

pub const DEFAULT_CAPACITY: usize = 5;

/// Fixed-capacity FIFO of items over a ring of slots.
///
/// `count` alone decides full versus empty, so `head == tail` is never
/// ambiguous. Storage is allocated once and never resized.
pub struct CircularQueue<G: IdSource> {
    slots: Vec<Item>,
    head: usize,
    tail: usize,
    count: usize,
    capacity: usize,
    ids: G,
}

impl<G: IdSource> CircularQueue<G> {
    /// Build a queue already holding `capacity` freshly generated items.
    ///
    /// Fails only if `ids` runs out before every slot is filled.
    pub fn initialize(capacity: NonZeroUsize, mut ids: G) -> Result<Self, Error> {
        let capacity = capacity.get();
        let slots = (0..capacity)
            .map(|_| generate_item(&mut ids).ok_or(Error::IdsExhausted))
            .collect::<Result<Vec<Item>, Error>>()?;
        debug!("Queue initialized with {} items", capacity);
        Ok(Self {
            slots,
            head: 0,
            tail: 0,
            count: capacity,
            capacity,
            ids,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn tail(&self) -> usize {
        self.tail
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity
    }

    /// Generate a new item and append it at the tail. Returns its id.
    ///
    /// A full queue is checked first, so no id is consumed on `QueueFull`.
    pub fn enqueue(&mut self) -> Result<u64, Error> {
        if self.is_full() {
            return Err(Error::QueueFull);
        }

        let item = generate_item(&mut self.ids).ok_or(Error::IdsExhausted)?;
        self.slots[self.tail] = item;
        self.tail = self.advance(self.tail);
        self.count += 1;

        debug!("Enqueued id {} (head={}, tail={}, count={})", item.id, self.head, self.tail, self.count);
        Ok(item.id)
    }

    /// Remove the oldest item.
    ///
    /// The vacated slot keeps its old item until a later enqueue overwrites
    /// it; it is outside the occupied run so nothing reads it.
    pub fn dequeue(&mut self) -> Result<Item, Error> {
        if self.is_empty() {
            return Err(Error::QueueEmpty);
        }

        let item = self.slots[self.head];
        self.head = self.advance(self.head);
        self.count -= 1;

        debug!("Dequeued id {} (head={}, tail={}, count={})", item.id, self.head, self.tail, self.count);
        Ok(item)
    }

    /// Occupied items, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        (0..self.count).map(move |step| &self.slots[(self.head + step) % self.capacity])
    }

    /// Ids of the occupied items, oldest first. Empty when the queue is.
    pub fn snapshot(&self) -> Vec<u64> {
        self.iter().map(|item| item.id).collect()
    }
}
