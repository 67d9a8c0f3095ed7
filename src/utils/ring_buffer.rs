//! A fixed-capacity ring buffer (circular buffer) for O(1) push operations.

use std::iter::FusedIterator;

// ============================================================================
// RingBuffer
// ============================================================================

/// A fixed-capacity circular buffer with O(1) push operations.
///
/// When the buffer reaches capacity, new elements overwrite the oldest ones.
/// Used for the transcript and the command history, both of which keep only
/// their most recent entries.
#[derive(Clone)]
pub struct RingBuffer<T> {
    data: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a new ring buffer with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be greater than 0");

        Self {
            data: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
        }
    }

    /// Adds an element to the back of the buffer. O(1).
    ///
    /// If at capacity, the oldest element is overwritten and returned.
    pub fn push(&mut self, item: T) -> Option<T> {
        let capacity = self.capacity();
        let slot = (self.head + self.len) % capacity;
        let evicted = self.data[slot].replace(item);

        if self.len == capacity {
            self.head = (self.head + 1) % capacity;
            evicted
        } else {
            self.len += 1;
            None
        }
    }

    /// Returns a reference to the element at the given logical index.
    ///
    /// Index 0 is the oldest element, index `len - 1` is the newest.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.data[(self.head + index) % self.capacity()].as_ref()
    }

    /// The newest element.
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Clears all elements from the buffer.
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }

    /// Returns an iterator over references to the elements (oldest to newest).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: self,
            front: 0,
            back: self.len,
        }
    }

    /// Collects all elements into a `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

// ============================================================================
// Iterator Implementation
// ============================================================================

/// An iterator over references to elements in a `RingBuffer`.
pub struct Iter<'a, T> {
    buffer: &'a RingBuffer<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.buffer.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.buffer.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
