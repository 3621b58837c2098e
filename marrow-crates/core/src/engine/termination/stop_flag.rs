use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use log::debug;

use super::TerminationCondition;

/// A [`TerminationCondition`] backed by a shared flag which can be raised from another thread.
///
/// The flag is monotone: once raised it is never lowered. Clones share the same flag, which makes
/// it suitable for stopping a portfolio of workers, or for wiring up to an OS signal handler
/// through [`StopFlag::shared`].
#[derive(Clone, Debug, Default)]
pub struct StopFlag {
    raised: Arc<AtomicBool>,
}

impl StopFlag {
    pub fn new() -> StopFlag {
        StopFlag::default()
    }

    /// Creates a flag which is raised by a watcher thread once `deadline` has passed.
    pub fn deadline(deadline: Instant) -> StopFlag {
        let flag = StopFlag::new();
        let watched = flag.clone();

        let _ = thread::spawn(move || {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
            debug!("Deadline reached, raising the stop flag");
            watched.raise();
        });

        flag
    }

    /// Raises the flag; every clone observes it.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// The underlying atomic, e.g. for `signal_hook::flag::register`.
    pub fn shared(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.raised)
    }
}

impl TerminationCondition for StopFlag {
    fn should_stop(&mut self) -> bool {
        self.is_raised()
    }
}
