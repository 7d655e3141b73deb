//! Run scheduler
//!
//! Executes a filtered set of checks once, sequentially or as parallel
//! tasks, applying the per-check timeout and fail-fast policy from
//! [`RunConfig`]. Every dispatched check yields exactly one result: a check
//! that errors, panics or times out gets a synthesized Critical result so
//! aggregate counts always reconcile.
//!
//! The shared result collection is the only state parallel tasks mutate;
//! appends happen under a mutex. Everything else (checks, config, accessor)
//! is read-only for the duration of the run.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::check::Check;
use crate::cluster::ClusterAccessor;
use crate::models::{CheckResult, ResultKey, RunConfig, Status};

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    /// Every selected check was dispatched, regardless of verdicts.
    Completed,
    /// Fail-fast stopped dispatch after a Critical result.
    Aborted,
}

/// Diagnostic error retained alongside a synthesized Critical result.
#[derive(Debug, Clone)]
pub struct CheckFailure {
    pub check_id: String,
    pub error: String,
}

/// Everything a run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// One result per dispatched check, in dispatch order.
    pub results: Vec<CheckResult>,
    /// Errors from checks that could not complete; these never replace
    /// the corresponding result.
    pub failures: Vec<CheckFailure>,
    pub state: RunState,
}

/// Executes checks under a [`RunConfig`]. One-shot: build, run, read.
pub struct Runner {
    checks: Vec<Arc<dyn Check>>,
    config: RunConfig,
    accessor: Arc<dyn ClusterAccessor>,
    state: RunState,
}

impl Runner {
    pub fn new(
        checks: Vec<Arc<dyn Check>>,
        config: RunConfig,
        accessor: Arc<dyn ClusterAccessor>,
    ) -> Self {
        Runner {
            checks,
            config,
            accessor,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of checks the runner will dispatch.
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    pub fn run(&mut self) -> RunOutcome {
        self.run_with_progress(|_| {})
    }

    /// Run all checks, invoking `on_result` as each result lands (streaming
    /// UI hook; called from the coordinating thread in both modes).
    pub fn run_with_progress<F>(&mut self, on_result: F) -> RunOutcome
    where
        F: FnMut(&CheckResult),
    {
        self.state = RunState::Running;
        let outcome = if self.config.parallel {
            self.run_parallel(on_result)
        } else {
            self.run_sequential(on_result)
        };
        self.state = outcome.state;
        outcome
    }

    fn run_sequential<F>(&self, mut on_result: F) -> RunOutcome
    where
        F: FnMut(&CheckResult),
    {
        let mut results = Vec::with_capacity(self.checks.len());
        let mut failures = Vec::new();
        let mut state = RunState::Completed;

        for check in &self.checks {
            let (result, failure) = execute_one(check, &self.accessor, self.config.timeout);
            if let Some(failure) = failure {
                if self.config.verbose {
                    eprintln!("check {} failed: {}", failure.check_id, failure.error);
                }
                failures.push(failure);
            }
            let critical = result.status == Status::Critical;
            on_result(&result);
            results.push(result);

            if self.config.fail_fast && critical {
                state = RunState::Aborted;
                break;
            }
        }

        RunOutcome {
            results,
            failures,
            state,
        }
    }

    fn run_parallel<F>(&self, mut on_result: F) -> RunOutcome
    where
        F: FnMut(&CheckResult),
    {
        let stop = Arc::new(AtomicBool::new(false));
        let collected: Arc<Mutex<Vec<(usize, CheckResult)>>> =
            Arc::new(Mutex::new(Vec::with_capacity(self.checks.len())));
        let failures: Arc<Mutex<Vec<CheckFailure>>> = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = mpsc::channel::<CheckResult>();

        let mut handles = Vec::with_capacity(self.checks.len());
        for (index, check) in self.checks.iter().enumerate() {
            let check = check.clone();
            let accessor = self.accessor.clone();
            let stop = stop.clone();
            let collected = collected.clone();
            let failures = failures.clone();
            let tx = tx.clone();
            let timeout = self.config.timeout;
            let fail_fast = self.config.fail_fast;
            let verbose = self.config.verbose;

            handles.push(thread::spawn(move || {
                // Fail-fast gate: a task that has not started yet is skipped.
                if stop.load(Ordering::Acquire) {
                    return;
                }

                let (result, failure) = execute_one(&check, &accessor, timeout);
                if fail_fast && result.status == Status::Critical {
                    stop.store(true, Ordering::Release);
                }
                if let Some(failure) = failure {
                    if verbose {
                        eprintln!("check {} failed: {}", failure.check_id, failure.error);
                    }
                    failures.lock().unwrap().push(failure);
                }
                let _ = tx.send(result.clone());
                collected.lock().unwrap().push((index, result));
            }));
        }
        drop(tx);

        // Stream progress from the coordinating thread while tasks finish.
        for result in rx {
            on_result(&result);
        }
        for handle in handles {
            let _ = handle.join();
        }

        let mut indexed = Arc::try_unwrap(collected)
            .expect("all tasks joined")
            .into_inner()
            .unwrap();
        // Re-sort to dispatch order so report output does not depend on
        // task scheduling.
        indexed.sort_by_key(|(index, _)| *index);

        let failures = Arc::try_unwrap(failures)
            .expect("all tasks joined")
            .into_inner()
            .unwrap();

        let state = if self.config.fail_fast && stop.load(Ordering::Acquire) {
            RunState::Aborted
        } else {
            RunState::Completed
        };

        RunOutcome {
            results: indexed.into_iter().map(|(_, result)| result).collect(),
            failures,
            state,
        }
    }
}

/// Execute a single check, stamping its execution time. Returns the result
/// plus the retained diagnostic error when the check could not complete.
fn execute_one(
    check: &Arc<dyn Check>,
    accessor: &Arc<dyn ClusterAccessor>,
    timeout: Duration,
) -> (CheckResult, Option<CheckFailure>) {
    if timeout.is_zero() {
        let started = Instant::now();
        // catch_unwind keeps a panicking check from taking down the run
        // (sequential) or silently losing its result slot (parallel).
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| check.run(accessor.as_ref())));
        let elapsed = started.elapsed();
        return match outcome {
            Ok(outcome) => settle(check, outcome, elapsed),
            Err(_) => panicked(check, elapsed),
        };
    }

    let (tx, rx) = mpsc::channel();
    let worker_check = check.clone();
    let worker_accessor = accessor.clone();
    thread::spawn(move || {
        let started = Instant::now();
        let outcome = worker_check.run(worker_accessor.as_ref());
        let _ = tx.send((outcome, started.elapsed()));
    });

    match rx.recv_timeout(timeout) {
        Ok((outcome, elapsed)) => settle(check, outcome, elapsed),
        Err(RecvTimeoutError::Timeout) => {
            // The worker thread is abandoned, not terminated; cleanup of a
            // check that ignores the deadline is the check's own problem.
            let mut result = CheckResult::new(
                check.id(),
                check.name(),
                check.category(),
                Status::Critical,
                format!("timed out after {}", format_duration(timeout)),
            )
            .with_key(ResultKey::Required)
            .with_recommendation("re-run with a higher --timeout or investigate cluster responsiveness");
            result.execution_time = format_duration(timeout);
            let failure = CheckFailure {
                check_id: check.id().to_string(),
                error: format!("timed out after {}", format_duration(timeout)),
            };
            (result, Some(failure))
        }
        // Worker died without sending: the check panicked.
        Err(RecvTimeoutError::Disconnected) => panicked(check, Duration::ZERO),
    }
}

/// Synthesize the Critical result for a check that panicked.
fn panicked(check: &Arc<dyn Check>, elapsed: Duration) -> (CheckResult, Option<CheckFailure>) {
    let mut result = CheckResult::new(
        check.id(),
        check.name(),
        check.category(),
        Status::Critical,
        "check panicked before producing a result",
    )
    .with_key(ResultKey::Required);
    result.execution_time = format_duration(elapsed);
    let failure = CheckFailure {
        check_id: check.id().to_string(),
        error: "check panicked before producing a result".to_string(),
    };
    (result, Some(failure))
}

fn settle(
    check: &Arc<dyn Check>,
    outcome: anyhow::Result<CheckResult>,
    elapsed: Duration,
) -> (CheckResult, Option<CheckFailure>) {
    match outcome {
        Ok(mut result) => {
            result.execution_time = format_duration(elapsed);
            (result, None)
        }
        Err(error) => {
            let text = format!("{error:#}");
            let mut result = CheckResult::new(
                check.id(),
                check.name(),
                check.category(),
                Status::Critical,
                format!("check failed: {text}"),
            )
            .with_key(ResultKey::Required)
            .with_detail(text.clone());
            result.execution_time = format_duration(elapsed);
            let failure = CheckFailure {
                check_id: check.id().to_string(),
                error: text,
            };
            (result, Some(failure))
        }
    }
}

/// Wall-clock duration as short text (`853ms`, `1.24s`).
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
