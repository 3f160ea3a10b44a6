use std::fmt;

/// Per-timer-tick allowance of internal events.
///
/// Reset to the configured quota whenever a timer event begins processing and
/// only decremented in between. A negative value means it was spent more
/// times than granted, which the dispatcher treats as fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Budget {
    remaining: i64,
}

impl Budget {
    pub fn new(quota: u32) -> Self {
        Self {
            remaining: i64::from(quota),
        }
    }

    pub fn reset(&mut self, quota: u32) {
        self.remaining = i64::from(quota);
    }

    pub fn has_remaining(&self) -> bool {
        self.remaining > 0
    }

    /// Consume one unit. Callers check `has_remaining` first.
    pub fn spend(&mut self) {
        self.remaining -= 1;
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn is_underflowed(&self) -> bool {
        self.remaining < 0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let budget = Budget::default();
        assert!(!budget.has_remaining());
        assert!(!budget.is_underflowed());
    }

    #[test]
    fn spend_until_exhausted_then_reset() {
        let mut budget = Budget::new(2);
        budget.spend();
        assert_eq!(budget.remaining(), 1);
        budget.spend();
        assert!(!budget.has_remaining());
        assert!(!budget.is_underflowed());

        budget.reset(2);
        assert_eq!(budget.remaining(), 2);
    }

    #[test]
    fn overspend_is_detectable() {
        let mut budget = Budget::new(0);
        budget.spend();
        assert!(budget.is_underflowed());
    }
}
