/// Fixed-capacity trailing window.
///
/// Non-finite values occupy a slot and are counted; while any of them is
/// inside the window the mean is undefined.
#[derive(Clone, Debug)]
pub(crate) struct RollingWindow {
    buffer: Vec<f64>,
    head: usize,
    len: usize,
    non_finite: usize,
}

impl RollingWindow {
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be positive");
        Self {
            buffer: vec![0.0; capacity],
            head: 0,
            len: 0,
            non_finite: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Push a value, returning the evicted one once the window is full
    pub(crate) fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.is_full() {
            let old = self.buffer[self.head];
            self.buffer[self.head] = value;
            self.head = (self.head + 1) % self.capacity();
            self.forget(old);
            Some(old)
        } else {
            let slot = (self.head + self.len) % self.capacity();
            self.buffer[slot] = value;
            self.len += 1;
            None
        };

        if !value.is_finite() {
            self.non_finite += 1;
        }

        evicted
    }

    fn forget(&mut self, value: f64) {
        if !value.is_finite() {
            self.non_finite -= 1;
        }
    }

    /// Mean of a full window with no non-finite values.
    ///
    /// Recomputed from the stored values on every call, offset by the oldest
    /// one, so nothing evicted can leak into later results and a window of
    /// equal values averages to exactly that value.
    pub(crate) fn mean(&self) -> Option<f64> {
        if !self.is_full() || self.non_finite > 0 {
            return None;
        }
        let base = self.buffer[self.head];
        let offset: f64 = self.iter().map(|v| v - base).sum();
        #[allow(clippy::cast_precision_loss)]
        Some(base + offset / self.len as f64)
    }

    /// Values currently in the window, oldest first
    pub(crate) fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.buffer[(self.head + i) % self.capacity()])
    }
}
