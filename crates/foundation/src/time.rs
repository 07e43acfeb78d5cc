/// Engine time in seconds since the session started.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64);

impl Time {
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Advance by `dt_s` seconds. Negative or non-finite deltas are ignored.
    pub fn advanced(self, dt_s: f64) -> Self {
        if dt_s.is_finite() && dt_s > 0.0 {
            Time(self.0 + dt_s)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn advance_ignores_bad_deltas() {
        let t = Time(1.0);
        assert_eq!(t.advanced(0.5), Time(1.5));
        assert_eq!(t.advanced(-1.0), t);
        assert_eq!(t.advanced(f64::NAN), t);
    }
}
