//! Running parse-and-highlight passes.
//!
//! A pass turns one [`DocumentSnapshot`] into everything the view needs
//! from it. [`PassExecutor`]s decide where passes run: on a dedicated
//! thread for the editor, or synchronously for tests and one-shot tools.

use std::{
    any::Any,
    collections::VecDeque,
    io,
    panic::{self, AssertUnwindSafe},
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use log::{debug, warn};

use crate::{
    document::DocumentSnapshot,
    error::PassError,
    highlight::{HighlightRange, highlight},
    outline::{OutlineEntry, outline},
    parsing::{Anomaly, parse_with_diagnostics},
};

/// Guards applied to every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassLimits {
    pub max_document_bytes: usize,
}

impl PassLimits {
    pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 8 * 1024 * 1024;
}

impl Default for PassLimits {
    fn default() -> Self {
        Self {
            max_document_bytes: Self::DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

/// Result of a successful pass.
#[derive(Debug, Clone)]
pub struct PassOutput {
    pub version: u64,
    pub ranges: Vec<HighlightRange>,
    pub outline: Vec<OutlineEntry>,
    pub anomalies: Vec<Anomaly>,
    pub elapsed: Duration,
}

/// A finished pass as reported by an executor.
#[derive(Debug, Clone)]
pub struct Completed {
    pub version: u64,
    pub result: Result<PassOutput, PassError>,
}

/// Parses and highlights `snapshot`.
///
/// Documents over the size limit are refused, and a panic anywhere in the
/// pass is caught and reported rather than taking the caller down.
pub fn run_pass(snapshot: &DocumentSnapshot, limits: &PassLimits) -> Result<PassOutput, PassError> {
    let version = snapshot.version();
    let len = snapshot.len();
    if len > limits.max_document_bytes {
        warn!(
            "refusing pass for v{version}: {len} bytes over limit {}",
            limits.max_document_bytes
        );
        return Err(PassError::InputTooLarge {
            len,
            limit: limits.max_document_bytes,
        });
    }

    let started = Instant::now();
    let text = snapshot.to_text();
    let (ranges, outline, anomalies) = guarded(version, || {
        let outcome = parse_with_diagnostics(&text);
        let ast = outcome.ast();
        (
            highlight(ast),
            outline(ast, &text),
            outcome.anomalies().to_vec(),
        )
    })?;
    let elapsed = started.elapsed();
    debug!(
        "pass v{version}: {len} bytes, {} ranges, {} anomalies in {elapsed:?}",
        ranges.len(),
        anomalies.len()
    );
    Ok(PassOutput {
        version,
        ranges,
        outline,
        anomalies,
        elapsed,
    })
}

fn guarded<T>(version: u64, f: impl FnOnce() -> T) -> Result<T, PassError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        warn!("pass for v{version} panicked: {message}");
        PassError::Panicked { version, message }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Somewhere passes run.
pub trait PassExecutor {
    /// Queues a pass for `snapshot`.
    fn submit(&mut self, snapshot: DocumentSnapshot) -> Result<(), PassError>;

    /// Takes the next finished pass, if any, without blocking.
    fn poll_completed(&mut self) -> Option<Completed>;
}

/// Runs passes on a dedicated worker thread.
///
/// Snapshots go in and completions come out over channels; dropping the
/// executor closes the job channel and joins the thread.
#[derive(Debug)]
pub struct BackgroundExecutor {
    jobs: Option<Sender<DocumentSnapshot>>,
    completed: Receiver<Completed>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundExecutor {
    pub fn spawn(limits: PassLimits) -> io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<DocumentSnapshot>();
        let (done_tx, done_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("cybermd-pass".to_string())
            .spawn(move || {
                for snapshot in job_rx {
                    let version = snapshot.version();
                    let result = run_pass(&snapshot, &limits);
                    if done_tx.send(Completed { version, result }).is_err() {
                        break;
                    }
                }
                debug!("pass worker exiting");
            })?;
        Ok(Self {
            jobs: Some(job_tx),
            completed: done_rx,
            handle: Some(handle),
        })
    }

    /// Blocks up to `timeout` for the next finished pass.
    pub fn wait_completed(&mut self, timeout: Duration) -> Option<Completed> {
        match self.completed.recv_timeout(timeout) {
            Ok(done) => Some(done),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl PassExecutor for BackgroundExecutor {
    fn submit(&mut self, snapshot: DocumentSnapshot) -> Result<(), PassError> {
        let jobs = self.jobs.as_ref().ok_or(PassError::WorkerGone)?;
        jobs.send(snapshot).map_err(|_| PassError::WorkerGone)
    }

    fn poll_completed(&mut self) -> Option<Completed> {
        self.completed.try_recv().ok()
    }
}

impl Drop for BackgroundExecutor {
    fn drop(&mut self) {
        self.jobs.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("pass worker panicked on shutdown");
        }
    }
}

/// Runs each pass synchronously inside [`submit`](PassExecutor::submit).
#[derive(Debug, Default)]
pub struct InlineExecutor {
    limits: PassLimits,
    completed: VecDeque<Completed>,
}

impl InlineExecutor {
    pub fn new(limits: PassLimits) -> Self {
        Self {
            limits,
            completed: VecDeque::new(),
        }
    }
}

impl PassExecutor for InlineExecutor {
    fn submit(&mut self, snapshot: DocumentSnapshot) -> Result<(), PassError> {
        let version = snapshot.version();
        let result = run_pass(&snapshot, &self.limits);
        self.completed.push_back(Completed { version, result });
        Ok(())
    }

    fn poll_completed(&mut self) -> Option<Completed> {
        self.completed.pop_front()
    }
}
