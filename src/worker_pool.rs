//! Fixed-size pool of match worker threads.
//!
//! Results are not funneled through one shared channel: each submitted job
//! gets its own receiver, so the controller can drain results in
//! submission order no matter how workers interleave. That draining
//! discipline is the only ordering the tournament report needs.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

pub(crate) struct WorkerPool {
    jobs: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `size` workers. Panics if `size` is zero.
    pub(crate) fn new(size: usize) -> WorkerPool {
        assert!(size > 0, "worker pool needs at least one worker");
        let (jobs, queue) = channel::<Job>();
        let queue = Arc::new(Mutex::new(queue));
        let workers = (0..size)
            .map(|index| {
                let queue = Arc::clone(&queue);
                thread::Builder::new()
                    .name(format!("match-worker-{index}"))
                    .spawn(move || loop {
                        // The guard is released before the job runs.
                        let job = queue.lock().expect("queue poisoned").recv();
                        match job {
                            Ok(job) => job(),
                            Err(_) => break,
                        }
                    })
                    .expect("cannot spawn worker thread")
            })
            .collect();
        WorkerPool {
            jobs: Some(jobs),
            workers,
        }
    }

    /// Queues `work` and hands back the receiver its result will arrive
    /// on. Receivers from consecutive calls form the submission order.
    pub(crate) fn submit<T, F>(&self, work: F) -> Receiver<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = channel();
        let job: Job = Box::new(move || {
            // The controller may have dropped the receiver already.
            let _ = tx.send(work());
        });
        self.jobs
            .as_ref()
            .expect("pool already shut down")
            .send(job)
            .expect("workers stopped early");
        rx
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        drop(self.jobs.take());
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[test]
    fn drains_in_submission_order_despite_finish_order() {
        let pool = WorkerPool::new(2);
        let finished = Arc::new(AtomicUsize::new(0));

        let seen_by_first = Arc::clone(&finished);
        let first = pool.submit(move || {
            thread::sleep(Duration::from_millis(200));
            seen_by_first.load(Ordering::SeqCst)
        });
        let counter = Arc::clone(&finished);
        let second = pool.submit(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            2usize
        });
        let counter = Arc::clone(&finished);
        let third = pool.submit(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            3usize
        });

        // Draining in submission order still works when the first job
        // finishes last.
        assert_eq!(first.recv().unwrap(), 2, "later jobs finished first");
        assert_eq!(second.recv().unwrap(), 2);
        assert_eq!(third.recv().unwrap(), 3);
    }

    #[test]
    fn shutdown_finishes_queued_jobs() {
        let pool = WorkerPool::new(4);
        let result = pool.submit(|| 7);
        drop(pool);
        assert_eq!(result.recv().unwrap(), 7);
    }
}
