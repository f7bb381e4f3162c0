use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;

use eg_core::{Error, RasterViewMut};
use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Strip;

/// How independent strip jobs are run. Every variant returns only after all
/// jobs have finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Schedule {
    /// In order on the calling thread.
    Serial,
    /// One scoped OS thread per job.
    #[default]
    ScopedThreads,
    /// Rayon's global pool.
    Rayon,
}

/// A strip together with the output rows it exclusively owns.
#[derive(Debug)]
pub struct StripJob<'a> {
    pub strip: Strip,
    pub output: RasterViewMut<'a>,
}

/// Runs every job and waits for all of them. Returns the first error in job
/// order; a panicking job is reported as [`Error::WorkerPanicked`], and an
/// OS thread that cannot be started as [`Error::SpawnFailed`]. Jobs after a
/// failed spawn are not run.
pub fn run_jobs<T, F>(jobs: Vec<T>, schedule: Schedule, work: F) -> Result<(), Error>
where
    T: Send,
    F: Fn(T) -> Result<(), Error> + Sync + Send,
{
    match schedule {
        Schedule::Serial => jobs.into_iter().try_for_each(&work),
        Schedule::ScopedThreads => {
            let work = &work;
            thread::scope(|s| {
                let mut first = Ok(());
                let mut handles = Vec::with_capacity(jobs.len());
                for (i, job) in jobs.into_iter().enumerate() {
                    let spawned = thread::Builder::new()
                        .name(format!("eg-strip-{i}"))
                        .spawn_scoped(s, move || work(job));
                    match spawned {
                        Ok(handle) => handles.push(handle),
                        Err(err) => {
                            warn!("could not spawn strip worker {i}: {err}");
                            first = Err(Error::SpawnFailed);
                            break;
                        }
                    }
                }

                // Already-spawned workers are joined even when a spawn failed.
                for handle in handles {
                    let res = handle.join().unwrap_or(Err(Error::WorkerPanicked));
                    if first.is_ok() {
                        first = res;
                    }
                }
                first
            })
        }
        Schedule::Rayon => catch_unwind(AssertUnwindSafe(|| {
            jobs.into_par_iter().try_for_each(&work)
        }))
        .unwrap_or(Err(Error::WorkerPanicked)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use eg_core::Error;

    use super::{Schedule, run_jobs};

    const ALL: [Schedule; 3] = [Schedule::Serial, Schedule::ScopedThreads, Schedule::Rayon];

    #[test]
    fn every_job_runs_before_return() {
        for schedule in ALL {
            let hits = AtomicUsize::new(0);
            run_jobs((0..17).collect(), schedule, |_: usize| {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .expect("all jobs succeed");
            assert_eq!(hits.load(Ordering::SeqCst), 17, "{schedule:?}");
        }
    }

    #[test]
    fn jobs_fill_disjoint_slices() {
        for schedule in ALL {
            let mut buf = vec![0u8; 40];
            let jobs: Vec<(u8, &mut [u8])> = buf
                .chunks_mut(10)
                .enumerate()
                .map(|(i, c)| (i as u8 + 1, c))
                .collect();
            run_jobs(jobs, schedule, |(tag, chunk): (u8, &mut [u8])| {
                chunk.fill(tag);
                Ok(())
            })
            .expect("all jobs succeed");

            for (i, chunk) in buf.chunks(10).enumerate() {
                assert!(chunk.iter().all(|&v| v == i as u8 + 1), "{schedule:?}");
            }
        }
    }

    #[test]
    fn failing_job_is_reported() {
        for schedule in ALL {
            let res = run_jobs((0..8).collect(), schedule, |i: usize| {
                if i == 5 {
                    Err(Error::InvalidStride)
                } else {
                    Ok(())
                }
            });
            assert_eq!(res, Err(Error::InvalidStride), "{schedule:?}");
        }
    }

    #[test]
    fn panicking_job_is_reported() {
        for schedule in [Schedule::ScopedThreads, Schedule::Rayon] {
            let res = run_jobs((0..4).collect(), schedule, |i: usize| {
                assert_ne!(i, 2, "job 2 fails");
                Ok(())
            });
            assert_eq!(res, Err(Error::WorkerPanicked), "{schedule:?}");
        }
    }

    #[test]
    fn scoped_workers_are_named_threads() {
        let names = Mutex::new(Vec::new());
        run_jobs((0..3).collect(), Schedule::ScopedThreads, |_: usize| {
            let name = thread::current().name().map(str::to_owned);
            names.lock().expect("names lock").push(name);
            Ok(())
        })
        .expect("all jobs succeed");

        let mut names = names.into_inner().expect("names lock");
        names.sort();
        assert_eq!(
            names,
            ["eg-strip-0", "eg-strip-1", "eg-strip-2"].map(|n| Some(n.to_owned()))
        );
    }

    #[test]
    fn many_scoped_workers_all_join() {
        let hits = AtomicUsize::new(0);
        run_jobs((0..256).collect(), Schedule::ScopedThreads, |_: usize| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .expect("all jobs succeed");
        assert_eq!(hits.load(Ordering::SeqCst), 256);
    }

    #[test]
    fn schedule_names_are_kebab_case() {
        let s: Schedule = serde_json::from_str("\"scoped-threads\"").expect("valid name");
        assert_eq!(s, Schedule::ScopedThreads);
        assert_eq!(
            serde_json::to_string(&Schedule::Rayon).expect("serializable"),
            "\"rayon\""
        );
    }
}
