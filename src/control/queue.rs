//=========================================================================
// Frame Queue
//=========================================================================
//
// Frame-scoped value queue.
//
// Controls and screens queue values (emitted actions, pending screen
// transitions) here during a tick. The game drains or clears the queue
// at the tick boundary so nothing leaks across frames.
//
//=========================================================================

//=== Frame Queue =========================================================

/// Queue of values scoped to a single tick.
///
/// Used for pending UI actions and pending screen transitions. Values
/// pushed during a tick are processed (or discarded) at its boundary.
pub struct FrameQueue<T> {
    queue: Vec<T>,
}

impl<T> FrameQueue<T> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a value to be processed at the next tick boundary.
    pub fn push(&mut self, value: T) {
        self.queue.push(value);
    }

    /// Returns an iterator over the queued values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.iter()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued values.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Clears all queued values, preserving allocated capacity.
    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Returns an iterator that drains all values from the queue.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.queue.drain(..)
    }

    /// Takes all values from the queue, leaving it empty.
    ///
    /// Efficient operation using mem::take internally. Used by the
    /// director to process queued transitions while the queue stays
    /// borrowable for new pushes.
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.queue)
    }
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
