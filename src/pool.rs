use crate::error::Result;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Fixed set of worker threads; at most `workers` jobs run at any moment.
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("gitfame-worker-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    /// Runs `job` once per task and returns when every started job is done.
    ///
    /// After the first error no further tasks are started; jobs already running finish,
    /// then that error is returned.
    pub fn run<T, F>(&self, tasks: &[T], job: F) -> Result<()>
    where
        T: Sync,
        F: Fn(&T) -> Result<()> + Sync + Send,
    {
        self.pool
            .install(|| tasks.par_iter().with_max_len(1).try_for_each(|task| job(task)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FameError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn every_task_runs_once() {
        let pool = WorkerPool::new(4).unwrap();
        let tasks: Vec<usize> = (0..100).collect();
        let sum = AtomicUsize::new(0);
        let calls = AtomicUsize::new(0);
        pool.run(&tasks, |t| {
            sum.fetch_add(*t, Ordering::SeqCst);
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 100);
        assert_eq!(sum.load(Ordering::SeqCst), (0..100).sum::<usize>());
    }

    #[test]
    fn concurrency_never_exceeds_worker_count() {
        let pool = WorkerPool::new(2).unwrap();
        let tasks: Vec<usize> = (0..16).collect();
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        pool.run(&tasks, |_| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(5));
            active.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(pool.pool.current_num_threads(), 2);
    }

    #[test]
    fn zero_workers_means_one() {
        assert_eq!(WorkerPool::new(0).unwrap().pool.current_num_threads(), 1);
    }

    #[test]
    fn first_error_is_returned() {
        let pool = WorkerPool::new(3).unwrap();
        let tasks: Vec<usize> = (0..20).collect();
        let result = pool.run(&tasks, |t| {
            if *t == 7 {
                Err(FameError::Parse("boom".to_string()))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(FameError::Parse(msg)) if msg == "boom"));
    }
}
