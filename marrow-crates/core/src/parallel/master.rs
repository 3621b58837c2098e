use std::thread;

use log::debug;

use super::barrier::ArrivalGuard;
use super::CompletionBarrier;
use super::SharedBound;
use crate::termination::StopFlag;

/// What a worker of a [`ParallelMaster`] gets to build and run its own solver.
#[derive(Clone, Debug)]
pub struct WorkerContext {
    /// The index of this worker, in `0..num_workers`.
    pub index: usize,
    pub num_workers: usize,
    /// Raised when the search of every worker should stop.
    pub stop: StopFlag,
    /// The best objective value over all workers.
    pub bound: SharedBound,
}

/// Runs a fixed number of independent searches, each on its own thread with its own solver.
///
/// The workers decide for themselves how to split the work, typically based on
/// [`WorkerContext::index`]. The master waits on a [`CompletionBarrier`] until every worker has
/// finished.
#[derive(Clone, Debug)]
pub struct ParallelMaster {
    num_workers: usize,
    stop: StopFlag,
    bound: SharedBound,
}

impl ParallelMaster {
    pub fn new(num_workers: usize) -> ParallelMaster {
        ParallelMaster {
            num_workers,
            stop: StopFlag::new(),
            bound: SharedBound::new(),
        }
    }

    /// Use an externally controlled stop flag, e.g. one raised by a signal handler.
    pub fn with_stop_flag(mut self, stop: StopFlag) -> ParallelMaster {
        self.stop = stop;
        self
    }

    pub fn stop_flag(&self) -> &StopFlag {
        &self.stop
    }

    pub fn shared_bound(&self) -> &SharedBound {
        &self.bound
    }

    /// Runs `work` on every worker and returns their results in worker order.
    ///
    /// For a portfolio, a worker raises [`WorkerContext::stop`] as soon as it has a definitive
    /// answer; the others observe it at their next search node.
    pub fn run<Output, Work>(&self, work: Work) -> Vec<Output>
    where
        Output: Send,
        Work: Fn(WorkerContext) -> Output + Sync,
    {
        let barrier = CompletionBarrier::new(self.num_workers);

        thread::scope(|scope| {
            let handles = (0..self.num_workers)
                .map(|index| {
                    let context = WorkerContext {
                        index,
                        num_workers: self.num_workers,
                        stop: self.stop.clone(),
                        bound: self.bound.clone(),
                    };
                    let barrier = &barrier;
                    let work = &work;

                    scope.spawn(move || {
                        let _arrival = ArrivalGuard { barrier };
                        debug!("Worker {index} started");
                        work(context)
                    })
                })
                .collect::<Vec<_>>();

            barrier.wait();
            debug!("All {} workers completed", self.num_workers);

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(output) => output,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::termination::TerminationCondition;

    #[test]
    fn every_worker_runs_once() {
        let calls = AtomicUsize::new(0);
        let master = ParallelMaster::new(5);

        let indices = master.run(|context| {
            let _ = calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(5, context.num_workers);
            context.index
        });

        assert_eq!(vec![0, 1, 2, 3, 4], indices);
        assert_eq!(5, calls.load(Ordering::SeqCst));
    }

    #[test]
    fn workers_share_the_stop_flag() {
        let master = ParallelMaster::new(3);

        let _ = master.run(|context| {
            if context.index == 0 {
                context.stop.raise();
            }
        });

        let mut stop = master.stop_flag().clone();
        assert!(stop.should_stop());
    }

    #[test]
    fn workers_share_the_bound() {
        let master = ParallelMaster::new(4);
        let _ = master.run(|context| context.bound.offer(10 - context.index as i32));

        assert_eq!(Some(7), master.shared_bound().best());
    }
}
