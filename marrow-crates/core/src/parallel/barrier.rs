use std::sync::Condvar;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::marrow_assert_simple;

/// Blocks waiters until a fixed number of workers have arrived.
///
/// The barrier releases exactly once, after exactly `expected` calls to
/// [`CompletionBarrier::arrive`]; arriving more often is a structural error and panics.
#[derive(Debug)]
pub struct CompletionBarrier {
    expected: usize,
    arrived: Mutex<usize>,
    released: Condvar,
}

impl CompletionBarrier {
    pub fn new(expected: usize) -> CompletionBarrier {
        CompletionBarrier {
            expected,
            arrived: Mutex::new(0),
            released: Condvar::new(),
        }
    }

    /// Registers the completion of one worker.
    pub fn arrive(&self) {
        let mut arrived = self.arrived.lock().unwrap_or_else(PoisonError::into_inner);
        marrow_assert_simple!(
            *arrived < self.expected,
            "the barrier expects {} arrivals, but more arrived",
            self.expected
        );

        *arrived += 1;
        if *arrived == self.expected {
            self.released.notify_all();
        }
    }

    /// Blocks until every worker has arrived. Returns immediately once the barrier is released.
    pub fn wait(&self) {
        let arrived = self.arrived.lock().unwrap_or_else(PoisonError::into_inner);
        let _released = self
            .released
            .wait_while(arrived, |arrived| *arrived < self.expected)
            .unwrap_or_else(PoisonError::into_inner);
    }

    pub fn num_arrived(&self) -> usize {
        *self.arrived.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_released(&self) -> bool {
        self.num_arrived() == self.expected
    }
}

/// Arrives at the barrier when dropped, so a panicking worker still releases the master.
#[derive(Debug)]
pub(super) struct ArrivalGuard<'a> {
    pub(super) barrier: &'a CompletionBarrier,
}

impl Drop for ArrivalGuard<'_> {
    fn drop(&mut self) {
        self.barrier.arrive();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn releases_after_all_arrivals() {
        let barrier = Arc::new(CompletionBarrier::new(4));

        let workers = (0..4)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || barrier.arrive())
            })
            .collect::<Vec<_>>();

        barrier.wait();
        assert!(barrier.is_released());
        assert_eq!(4, barrier.num_arrived());

        for worker in workers {
            worker.join().expect("worker does not panic");
        }
    }

    #[test]
    fn not_released_before_the_last_arrival() {
        let barrier = CompletionBarrier::new(2);
        barrier.arrive();
        assert!(!barrier.is_released());

        barrier.arrive();
        assert!(barrier.is_released());
        barrier.wait();
    }

    #[test]
    fn zero_workers_release_immediately() {
        let barrier = CompletionBarrier::new(0);
        barrier.wait();
        assert!(barrier.is_released());
    }

    #[test]
    #[should_panic]
    fn extra_arrivals_panic() {
        let barrier = CompletionBarrier::new(1);
        barrier.arrive();
        barrier.arrive();
    }
}
