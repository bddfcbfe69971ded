use log::trace;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::iter::FusedIterator;

use crate::error::{QueueError, Result};

const MIN_CAPACITY: usize = 2;

/// The `RandomizedQueue` struct is a bag whose removals pick an item uniformly at random.
///
/// Items live in a resizing array. The array doubles when it is full and halves when
/// it drops to a quarter of its capacity, so enqueue and dequeue are amortized O(1).
/// Slot order carries no meaning, which lets a removal swap the last item into the hole.
///
/// # Fields
///
/// * `items`: The live items, `items.len()` is the number of items on the queue.
/// * `capacity`: The logical size of the backing array, a power of two never below 2.
/// * `rng`: The source of uniform indexes.
#[derive(Debug)]
pub struct RandomizedQueue<T, R = Pcg64Mcg> {
    items: Vec<T>,
    capacity: usize,
    rng: R,
}

impl<T> RandomizedQueue<T> {
    /// Creates an empty queue whose draws are reproducible from `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg64Mcg::seed_from_u64(seed))
    }

    /// Creates an empty queue seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(Pcg64Mcg::from_entropy())
    }
}

impl<T, R: Rng> RandomizedQueue<T, R> {
    /// Creates an empty queue drawing its indexes from `rng`.
    pub fn with_rng(rng: R) -> Self {
        RandomizedQueue {
            items: Vec::with_capacity(MIN_CAPACITY),
            capacity: MIN_CAPACITY,
            rng,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Move the live items into a fresh array of the given capacity
    fn resize(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.items.len());
        trace!(
            "resizing queue from {} to {} slots with {} items",
            self.capacity,
            capacity,
            self.items.len()
        );
        let mut items = Vec::with_capacity(capacity);
        items.extend(self.items.drain(..));
        self.items = items;
        self.capacity = capacity;
    }

    pub fn enqueue(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.resize(2 * self.capacity);
        }
        self.items.push(item);
    }

    /// Adds an item that may be absent.
    ///
    /// Fails with [`QueueError::InvalidArgument`] when `item` is `None`, leaving the queue untouched.
    pub fn offer(&mut self, item: Option<T>) -> Result<()> {
        let item = item.ok_or(QueueError::InvalidArgument)?;
        self.enqueue(item);
        Ok(())
    }

    /// Removes and returns an item chosen uniformly at random.
    ///
    /// Fails with [`QueueError::Underflow`] when the queue is empty.
    pub fn dequeue(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(QueueError::Underflow);
        }
        let index = self.rng.gen_range(0..self.items.len());
        let item = self.items.swap_remove(index);

        let len = self.items.len();
        if len > 0 && len == self.capacity / 4 {
            self.resize((self.capacity / 2).max(MIN_CAPACITY));
        }
        Ok(item)
    }

    /// Returns, without removing, an item chosen uniformly at random.
    ///
    /// Every call is an independent draw, so the same item may come back repeatedly.
    pub fn sample(&mut self) -> Result<&T> {
        if self.is_empty() {
            return Err(QueueError::Underflow);
        }
        let index = self.rng.gen_range(0..self.items.len());
        Ok(&self.items[index])
    }

    /// Returns an iterator over every item in a fresh random order.
    ///
    /// The iterator gets its own generator, seeded from the queue's one.
    pub fn iter(&mut self) -> Iter<'_, T> {
        let rng = Pcg64Mcg::seed_from_u64(self.rng.gen());
        Iter::new(&self.items, rng)
    }

    /// Returns an iterator over every item, ordered by draws from `rng`.
    ///
    /// Only borrows the queue immutably, so several iterators can be alive at once.
    pub fn iter_with<G: Rng>(&self, rng: G) -> Iter<'_, T, G> {
        Iter::new(&self.items, rng)
    }
}

impl<T, R: Rng> Extend<T> for RandomizedQueue<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<T, R: Rng> IntoIterator for RandomizedQueue<T, R> {
    type Item = T;
    type IntoIter = IntoIter<T, R>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

/// A random-order iterator over the items of a [`RandomizedQueue`].
///
/// It keeps a permutation of the slot indexes and shuffles it lazily: each step draws
/// one of the indexes not yet produced and swaps it past the end of the live range.
/// The number of items is frozen when the iterator is created.
#[derive(Debug)]
pub struct Iter<'a, T, R = Pcg64Mcg> {
    items: &'a [T],
    indexes: Vec<usize>,
    cursor: usize,
    rng: R,
}

impl<'a, T, R: Rng> Iter<'a, T, R> {
    fn new(items: &'a [T], rng: R) -> Self {
        Iter {
            items,
            indexes: (0..items.len()).collect(),
            cursor: 0,
            rng,
        }
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.indexes.len()
    }

    /// Produces the next item, failing with [`QueueError::EndOfSequence`] once all were produced.
    pub fn try_next(&mut self) -> Result<&'a T> {
        if !self.has_next() {
            return Err(QueueError::EndOfSequence);
        }
        let remaining = self.indexes.len() - self.cursor;
        let pick = self.rng.gen_range(0..remaining);
        let index = self.indexes[pick];
        self.indexes.swap(pick, remaining - 1);
        self.cursor += 1;
        Ok(&self.items[index])
    }

    /// Items can't be removed through the iterator.
    pub fn remove(&mut self) -> Result<()> {
        Err(QueueError::Unsupported)
    }
}

impl<'a, T, R: Rng> Iterator for Iter<'a, T, R> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.indexes.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl<T, R: Rng> ExactSizeIterator for Iter<'_, T, R> {}

impl<T, R: Rng> FusedIterator for Iter<'_, T, R> {}

/// Drains a [`RandomizedQueue`] by repeated dequeues.
#[derive(Debug)]
pub struct IntoIter<T, R = Pcg64Mcg> {
    queue: RandomizedQueue<T, R>,
}

impl<T, R: Rng> Iterator for IntoIter<T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<T, R: Rng> ExactSizeIterator for IntoIter<T, R> {}

impl<T, R: Rng> FusedIterator for IntoIter<T, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn filled(seed: u64, n: u32) -> RandomizedQueue<u32> {
        let mut queue = RandomizedQueue::new(seed);
        queue.extend(0..n);
        queue
    }

    #[test]
    fn starts_empty_with_minimum_capacity() {
        let queue = RandomizedQueue::<String>::new(7);
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), MIN_CAPACITY);
    }

    #[test]
    fn capacity_doubles_when_full() {
        let mut queue = RandomizedQueue::new(1);
        let mut seen = Vec::new();
        for i in 0..9 {
            queue.enqueue(i);
            seen.push(queue.capacity());
        }
        assert_eq!(seen, vec![2, 2, 4, 4, 8, 8, 8, 8, 16]);
    }

    #[test]
    fn capacity_halves_at_a_quarter() {
        let mut queue = filled(3, 16);
        assert_eq!(queue.capacity(), 16);

        let mut seen = Vec::new();
        while !queue.is_empty() {
            queue.dequeue().unwrap();
            seen.push((queue.len(), queue.capacity()));
        }
        assert_eq!(seen[11], (4, 8));
        assert_eq!(seen[13], (2, 4));
        assert_eq!(seen[14], (1, 2));
        // empty queue keeps its last capacity
        assert_eq!(seen[15], (0, 2));
        assert!(seen.iter().all(|&(len, cap)| cap >= MIN_CAPACITY && len <= cap));
    }

    #[test]
    fn growth_copies_are_linear() {
        let n = 1000;
        let mut queue = RandomizedQueue::new(11);
        let mut copies = 0;
        for i in 0..n {
            let before = queue.capacity();
            queue.enqueue(i);
            if queue.capacity() != before {
                copies += before;
            }
        }
        assert!(copies < 2 * n, "copied {} items for {} enqueues", copies, n);
    }

    #[test]
    fn dequeue_returns_every_item_once() {
        let mut queue = filled(5, 50);
        let mut out = HashSet::new();
        while let Ok(item) = queue.dequeue() {
            assert!(out.insert(item));
        }
        assert_eq!(out, (0..50).collect());
        assert_eq!(queue.dequeue(), Err(QueueError::Underflow));
    }

    #[test]
    fn sample_leaves_queue_untouched() {
        let mut queue = filled(9, 3);
        for _ in 0..20 {
            assert!(*queue.sample().unwrap() < 3);
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.capacity(), 4);
    }

    #[test]
    fn empty_queue_underflows() {
        let mut queue = RandomizedQueue::<u8>::new(0);
        assert_eq!(queue.sample().err(), Some(QueueError::Underflow));
        assert_eq!(queue.dequeue(), Err(QueueError::Underflow));
    }

    #[test]
    fn offer_rejects_absent_items() {
        let mut queue = RandomizedQueue::new(0);
        assert_eq!(queue.offer(None), Err(QueueError::InvalidArgument));
        assert!(queue.is_empty());
        assert_eq!(queue.offer(Some("a")), Ok(()));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn iterator_is_exhausted_after_every_item() {
        let mut queue = RandomizedQueue::new(2);
        queue.extend(["A", "B", "C"]);

        let mut iter = queue.iter();
        assert_eq!(iter.len(), 3);
        let mut seen = HashSet::new();
        while iter.has_next() {
            assert!(seen.insert(*iter.try_next().unwrap()));
        }
        assert_eq!(seen, HashSet::from(["A", "B", "C"]));
        assert_eq!(iter.try_next(), Err(QueueError::EndOfSequence));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iterator_refuses_removal() {
        let mut queue = filled(4, 2);
        let mut iter = queue.iter();
        assert_eq!(iter.remove(), Err(QueueError::Unsupported));
        assert_eq!(iter.count(), 2);
    }

    #[test]
    fn iterators_are_independent() {
        let queue = filled(8, 5);
        let mut first = queue.iter_with(Pcg64Mcg::seed_from_u64(100));
        let orders: HashSet<Vec<u32>> = (0..20)
            .map(|seed| queue.iter_with(Pcg64Mcg::seed_from_u64(seed)).copied().collect())
            .collect();
        assert!(orders.len() > 1);
        // a live iterator is unaffected by the others
        assert_eq!(first.by_ref().count(), 5);
    }

    #[test]
    fn into_iter_drains_everything() {
        let queue = filled(6, 10);
        let mut drained: Vec<u32> = queue.into_iter().collect();
        drained.sort_unstable();
        assert_eq!(drained, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = filled(42, 20);
        let mut b = filled(42, 20);
        for _ in 0..20 {
            assert_eq!(a.dequeue(), b.dequeue());
        }
    }
}
