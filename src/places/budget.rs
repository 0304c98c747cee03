use std::sync::atomic::{AtomicU64, Ordering};

/// Process-lifetime ceiling on outbound Places API calls.
///
/// Shared across requests behind an `Arc`. Reservations go through a
/// compare-and-swap loop, so concurrent requests cannot push the count
/// past `max`.
#[derive(Debug)]
pub struct ApiBudget {
    used: AtomicU64,
    max: u64,
}

impl ApiBudget {
    pub fn new(max: u64) -> Self {
        Self {
            used: AtomicU64::new(0),
            max,
        }
    }

    /// Reserve one call. Returns `false` when the budget is spent.
    pub fn try_acquire(&self) -> bool {
        self.used
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |used| {
                (used < self.max).then_some(used + 1)
            })
            .is_ok()
    }

    /// Hand back a reservation for a call that failed
    pub fn release(&self) {
        let _ = self
            .used
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |used| used.checked_sub(1));
    }

    pub fn is_exhausted(&self) -> bool {
        self.used() >= self.max
    }

    pub fn used(&self) -> u64 {
        self.used.load(Ordering::SeqCst)
    }

    pub fn max(&self) -> u64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn stops_at_the_ceiling() {
        let budget = ApiBudget::new(2);

        assert!(budget.try_acquire());
        assert!(budget.try_acquire());
        assert!(!budget.try_acquire());
        assert!(budget.is_exhausted());
        assert_eq!(budget.used(), 2);
    }

    #[test]
    fn released_call_can_be_reused() {
        let budget = ApiBudget::new(1);

        assert!(budget.try_acquire());
        budget.release();
        assert_eq!(budget.used(), 0);
        assert!(budget.try_acquire());
    }

    #[test]
    fn release_never_goes_below_zero() {
        let budget = ApiBudget::new(3);
        budget.release();
        assert_eq!(budget.used(), 0);
    }

    #[test]
    fn zero_budget_is_exhausted_from_the_start() {
        let budget = ApiBudget::new(0);
        assert!(budget.is_exhausted());
        assert!(!budget.try_acquire());
        assert_eq!(budget.used(), 0);
    }

    #[test]
    fn concurrent_acquires_never_overshoot() {
        let budget = Arc::new(ApiBudget::new(100));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let budget = Arc::clone(&budget);
                std::thread::spawn(move || (0..50).filter(|_| budget.try_acquire()).count())
            })
            .collect();

        let granted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(granted, 100);
        assert_eq!(budget.used(), 100);
    }
}
