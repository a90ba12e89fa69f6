//! Three-buffer priority bucket scheduler.
//!
//! Approximates bucket-sorted Dijkstra expansion without a heap. Cells
//! whose effective priority falls below the running threshold go into the
//! `next` buffer and are processed on the following cycle; the rest wait in
//! `overflow` until the threshold has risen past them. A `pending` bitmap
//! keeps each cell in at most one buffer.

/// Default capacity of each bucket buffer.
pub const DEFAULT_BUCKET_CAPACITY: usize = 10_000;

/// Target buffer for an enqueue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BucketKind {
    /// The buffer drained this cycle. Only used when seeding.
    Current,
    /// Cells below the priority threshold, processed next cycle.
    Next,
    /// Cells above the threshold, processed after it rises.
    Overflow,
}

/// Bucket scheduler state: three index buffers plus the rising threshold.
#[derive(Clone, Debug)]
pub struct PriorityBuckets {
    cur: Vec<usize>,
    next: Vec<usize>,
    over: Vec<usize>,
    pending: Vec<bool>,
    threshold: f32,
    increment: f32,
    capacity: usize,
}

impl PriorityBuckets {
    /// Create a scheduler for `ncells` grid cells.
    ///
    /// `capacity` bounds each buffer; enqueues beyond it are silently
    /// dropped (dropped cells are re-relaxed through other neighbours).
    /// `increment` is the per-rotation threshold step.
    pub fn new(ncells: usize, capacity: usize, increment: f32) -> Self {
        Self {
            cur: Vec::with_capacity(capacity),
            next: Vec::with_capacity(capacity),
            over: Vec::with_capacity(capacity),
            pending: vec![false; ncells],
            threshold: 0.0,
            increment,
            capacity,
        }
    }

    /// Current priority threshold separating `next` from `overflow`.
    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Per-rotation threshold increment.
    #[inline]
    pub fn increment(&self) -> f32 {
        self.increment
    }

    /// Raise the threshold without rotating. The A* driver pre-seeds the
    /// threshold with the goal-to-start heuristic this way.
    #[inline]
    pub fn raise_threshold(&mut self, delta: f32) {
        self.threshold += delta;
    }

    /// Whether a cell currently sits in one of the buffers.
    #[inline]
    pub fn is_pending(&self, n: usize) -> bool {
        self.pending[n]
    }

    /// Number of cells in the current buffer.
    #[inline]
    pub fn current_len(&self) -> usize {
        self.cur.len()
    }

    /// True when both drainable buffers are empty. The overflow buffer can
    /// only hold cells if `next` fed it this cycle, so this is the
    /// exhaustion test the propagation loop uses.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.cur.is_empty() && self.next.is_empty()
    }

    /// Clear all buffers and the pending map, and set a fresh threshold.
    pub fn reset(&mut self, threshold: f32) {
        self.cur.clear();
        self.next.clear();
        self.over.clear();
        self.pending.fill(false);
        self.threshold = threshold;
    }

    /// Reallocate the pending map for a new cell count.
    pub fn resize(&mut self, ncells: usize) {
        self.cur.clear();
        self.next.clear();
        self.over.clear();
        self.pending.clear();
        self.pending.resize(ncells, false);
    }

    /// Enqueue a cell into the given buffer.
    ///
    /// Skips cells already pending and silently drops the enqueue when the
    /// buffer is full. Callers guarantee `n` is in bounds and traversable.
    #[inline]
    pub fn push(&mut self, which: BucketKind, n: usize) {
        if self.pending[n] {
            return;
        }
        let buf = match which {
            BucketKind::Current => &mut self.cur,
            BucketKind::Next => &mut self.next,
            BucketKind::Overflow => &mut self.over,
        };
        if buf.len() < self.capacity {
            buf.push(n);
            self.pending[n] = true;
        }
    }

    /// Take the current buffer for processing, clearing the pending flag of
    /// every cell in it (processed cells may be re-enqueued by their
    /// neighbours' updates).
    pub fn begin_cycle(&mut self) -> Vec<usize> {
        let batch = std::mem::take(&mut self.cur);
        for &n in &batch {
            self.pending[n] = false;
        }
        batch
    }

    /// Return the drained batch storage and rotate buffers: `next` becomes
    /// `current`; when that leaves `current` empty, the threshold advances
    /// and `overflow` graduates to `current`. Returns true when the
    /// threshold advanced.
    pub fn end_cycle(&mut self, mut batch: Vec<usize>) -> bool {
        batch.clear();
        self.cur = batch;
        std::mem::swap(&mut self.cur, &mut self.next);
        if self.cur.is_empty() {
            self.threshold += self.increment;
            std::mem::swap(&mut self.cur, &mut self.over);
            return true;
        }
        false
    }

    #[cfg(test)]
    fn bucket_occurrences(&self, n: usize) -> usize {
        self.cur.iter().filter(|&&k| k == n).count()
            + self.next.iter().filter(|&&k| k == n).count()
            + self.over.iter().filter(|&&k| k == n).count()
    }
}
