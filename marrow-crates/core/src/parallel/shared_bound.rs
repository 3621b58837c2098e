use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// The best objective value found by any worker of a parallel minimisation.
///
/// Clones share the same value. Workers which maximise offer negated values, so the bound is
/// always minimised.
#[derive(Clone, Debug)]
pub struct SharedBound {
    best: Arc<AtomicI64>,
}

impl Default for SharedBound {
    fn default() -> Self {
        SharedBound {
            best: Arc::new(AtomicI64::new(i64::MAX)),
        }
    }
}

impl SharedBound {
    pub fn new() -> SharedBound {
        SharedBound::default()
    }

    /// Records `value` if it improves on the current bound; returns whether it did.
    pub fn offer(&self, value: i32) -> bool {
        let previous = self.best.fetch_min(i64::from(value), Ordering::AcqRel);
        i64::from(value) < previous
    }

    pub fn best(&self) -> Option<i32> {
        let best = self.best.load(Ordering::Acquire);
        (best != i64::MAX).then(|| best as i32)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn only_improvements_are_recorded() {
        let bound = SharedBound::new();
        assert_eq!(None, bound.best());

        assert!(bound.offer(10));
        assert!(!bound.offer(12));
        assert!(bound.offer(-3));
        assert_eq!(Some(-3), bound.best());
    }

    #[test]
    fn concurrent_offers_keep_the_minimum() {
        let bound = SharedBound::new();

        thread::scope(|scope| {
            for worker in 0..8 {
                let bound = bound.clone();
                let _ = scope.spawn(move || {
                    for value in (0..100).rev() {
                        let _ = bound.offer(value * 8 + worker);
                    }
                });
            }
        });

        assert_eq!(Some(0), bound.best());
    }
}
