/// Opaque handle a renderer uses to find the drawable backing a scene record.
///
/// Handles are handed out sequentially by the owning world and are never
/// reused within a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle(u64);

impl RenderHandle {
    pub fn new(raw: u64) -> Self {
        RenderHandle(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        RenderHandle(self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::RenderHandle;

    #[test]
    fn next_is_sequential() {
        let h = RenderHandle::new(7);
        assert_eq!(h.next().raw(), 8);
        assert!(h < h.next());
    }
}
