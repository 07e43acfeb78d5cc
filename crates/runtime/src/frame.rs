use foundation::time::Time;

/// Render-tick metadata.
///
/// Pointer events are stamped with the frame they arrive in, so an event log
/// can be replayed against the same frame sequence.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, time: Time) -> Self {
        Self { index, time }
    }

    /// The frame after this one, `dt_s` seconds later.
    pub fn next(self, dt_s: f64) -> Self {
        Self::new(self.index + 1, self.time.advanced(dt_s))
    }
}
