//! Fixed-capacity circular sample storage feeding the renderer.
//!
//! Each curve owns one [`StreamBuffer`]. Producers push through a shared
//! [`BufferHandle`]; the frame pass drains an ordered snapshot only when
//! new samples arrived since the last export.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use parking_lot::{Mutex, MutexGuard};

use crate::error::{ChartError, Result};

/// One 2-D data sample. Immutable once stored; only buffer wraparound
/// overwrites it.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Circular buffer with overwrite-on-full semantics. Capacity is fixed at
/// construction and never changes.
#[derive(Debug)]
pub struct StreamBuffer {
    buf: Box<[Sample]>,
    /// `(tail, head)` physical indices of the oldest and newest sample;
    /// `None` when empty.
    occupied: Option<(usize, usize)>,
    dirty: bool,
}

impl StreamBuffer {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ChartError::InvalidCapacity);
        }
        Ok(Self {
            buf: vec![Sample::ZERO; capacity].into_boxed_slice(),
            occupied: None,
            dirty: false,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        match self.occupied {
            None => 0,
            Some((tail, head)) => {
                if head >= tail {
                    head - tail + 1
                } else {
                    self.buf.len() - tail + head + 1
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_none()
    }

    /// Whether samples arrived since the last [`export_ordered`].
    ///
    /// [`export_ordered`]: StreamBuffer::export_ordered
    pub fn has_undrawn(&self) -> bool {
        self.dirty
    }

    /// Append a sample, overwriting the oldest one if the buffer is full.
    pub fn push(&mut self, sample: Sample) {
        let cap = self.buf.len();
        let head = match self.occupied {
            None => {
                self.occupied = Some((0, 0));
                0
            }
            Some((tail, head)) => {
                let head = (head + 1) % cap;
                let tail = if head == tail { (tail + 1) % cap } else { tail };
                self.occupied = Some((tail, head));
                head
            }
        };
        self.buf[head] = sample;
        self.dirty = true;
    }

    pub fn push_xy(&mut self, x: f64, y: f64) {
        self.push(Sample::new(x, y));
    }

    /// The most recently added sample, or a zero sample when empty so
    /// auto-follow queries are safe before any data exists.
    pub fn peek(&self) -> Sample {
        match self.occupied {
            None => Sample::ZERO,
            Some((_, head)) => self.buf[head],
        }
    }

    /// Remove and return the newest sample.
    pub fn pop(&mut self) -> Result<Sample> {
        let (tail, head) = self.occupied.ok_or(ChartError::EmptyBuffer)?;
        let sample = self.buf[head];
        if tail == head {
            self.occupied = None;
        } else {
            let head = if head == 0 { self.buf.len() - 1 } else { head - 1 };
            self.occupied = Some((tail, head));
        }
        self.dirty = true;
        Ok(sample)
    }

    /// Remove and return the oldest sample (FIFO order).
    pub fn remove_first(&mut self) -> Result<Sample> {
        let (tail, head) = self.occupied.ok_or(ChartError::EmptyBuffer)?;
        let sample = self.buf[tail];
        if tail == head {
            self.occupied = None;
        } else {
            self.occupied = Some(((tail + 1) % self.buf.len(), head));
        }
        self.dirty = true;
        Ok(sample)
    }

    /// Sample at logical index `i`, counted from the oldest element.
    pub fn get(&self, index: usize) -> Result<Sample> {
        let phys = self.physical_index(index)?;
        Ok(self.buf[phys])
    }

    /// Overwrite the sample at logical index `i`.
    pub fn set(&mut self, index: usize, sample: Sample) -> Result<()> {
        let phys = self.physical_index(index)?;
        self.buf[phys] = sample;
        self.dirty = true;
        Ok(())
    }

    /// Remove the sample at logical index `i`, shifting all later samples
    /// back by one. O(n) in the number of samples after `i`.
    pub fn remove_at(&mut self, index: usize) -> Result<Sample> {
        let len = self.len();
        if index >= len {
            return Err(ChartError::OutOfRange { index, len });
        }
        let removed = self.get(index)?;
        for i in index..len - 1 {
            let next = self.get(i + 1)?;
            self.set(i, next)?;
        }
        // The last slot is now duplicated; drop it.
        self.pop()?;
        Ok(removed)
    }

    /// Remove `count` samples starting at logical index `index`.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<()> {
        let len = self.len();
        if index >= len || count > len - index {
            return Err(ChartError::OutOfRange { index, len });
        }
        for _ in 0..count {
            self.remove_at(index)?;
        }
        Ok(())
    }

    /// All valid samples in chronological (tail to head) order. Clears the
    /// dirty flag; callers export at most once per frame.
    pub fn export_ordered(&mut self) -> Vec<Sample> {
        self.dirty = false;
        match self.occupied {
            None => Vec::new(),
            Some((tail, head)) => {
                let mut out = Vec::with_capacity(self.len());
                if tail <= head {
                    // Contiguous region, single copy.
                    out.extend_from_slice(&self.buf[tail..=head]);
                } else {
                    out.extend_from_slice(&self.buf[tail..]);
                    out.extend_from_slice(&self.buf[..=head]);
                }
                out
            }
        }
    }

    /// Reset to empty. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.occupied = None;
        self.dirty = true;
    }

    /// Componentwise minimum and maximum over all stored samples, without
    /// touching the dirty flag. `None` when empty.
    pub fn bounds(&self) -> Option<(Sample, Sample)> {
        let (tail, _) = self.occupied?;
        let mut min = self.buf[tail];
        let mut max = min;
        for i in 0..self.len() {
            let s = self.buf[(tail + i) % self.buf.len()];
            min.x = min.x.min(s.x);
            min.y = min.y.min(s.y);
            max.x = max.x.max(s.x);
            max.y = max.y.max(s.y);
        }
        Some((min, max))
    }

    fn physical_index(&self, index: usize) -> Result<usize> {
        let len = self.len();
        if index >= len {
            return Err(ChartError::OutOfRange { index, len });
        }
        let (tail, _) = self.occupied.expect("len > 0 implies occupied");
        Ok((tail + index) % self.buf.len())
    }
}

/// Cheaply clonable shared handle to a [`StreamBuffer`].
///
/// A data producer may push from outside the frame-tick thread while the
/// frame pass exports; the mutex makes the single-writer/single-reader
/// pattern safe without any cooperation from the caller.
#[derive(Clone, Debug)]
pub struct BufferHandle {
    inner: Arc<Mutex<StreamBuffer>>,
}

impl BufferHandle {
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(StreamBuffer::new(capacity)?)),
        })
    }

    pub fn push(&self, sample: Sample) {
        self.inner.lock().push(sample);
    }

    pub fn push_xy(&self, x: f64, y: f64) {
        self.inner.lock().push_xy(x, y);
    }

    pub fn peek(&self) -> Sample {
        self.inner.lock().peek()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Ordered snapshot when new samples arrived since the last export,
    /// `None` otherwise. The frame pass calls this once per curve.
    pub fn export_ordered_if_dirty(&self) -> Option<Vec<Sample>> {
        let mut buf = self.inner.lock();
        if buf.has_undrawn() {
            Some(buf.export_ordered())
        } else {
            None
        }
    }

    /// Componentwise data bounds, or `None` when empty.
    pub fn bounds(&self) -> Option<(Sample, Sample)> {
        self.inner.lock().bounds()
    }

    /// Full access for operations not covered by the convenience methods.
    pub fn lock(&self) -> MutexGuard<'_, StreamBuffer> {
        self.inner.lock()
    }
}
