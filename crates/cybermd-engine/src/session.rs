//! One editor's view of the pipeline.
//!
//! [`EditorSession`] is what a UI loop talks to: it is told about edits,
//! ticked with the current time, and answers with the [`ViewOp`]s to
//! apply. Everything it does on the calling thread is cheap; parsing
//! happens wherever its [`PassExecutor`] runs passes.

use std::{
    fmt,
    time::{Duration, Instant},
};

use log::{debug, warn};

use crate::{
    document::DocumentSnapshot,
    error::PassError,
    highlight::HighlightRange,
    outline::OutlineEntry,
    parsing::Anomaly,
    reconcile::{HighlightState, ViewOp},
    schedule::{Completed, Completion, PassExecutor, ReparseScheduler},
};

/// What the status line shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Modified,
    Parsed { ranges: usize },
    Failed(PassError),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "Ready"),
            Status::Modified => write!(f, "Modified"),
            Status::Parsed { ranges } => {
                write!(f, "Parsed successfully - {ranges} highlight ranges")
            }
            Status::Failed(err) => write!(f, "Parse failed: {err}"),
        }
    }
}

pub struct EditorSession<E: PassExecutor> {
    scheduler: ReparseScheduler,
    highlights: HighlightState,
    executor: E,
    status: Status,
    outline: Vec<OutlineEntry>,
    anomalies: Vec<Anomaly>,
}

impl<E: PassExecutor> EditorSession<E> {
    pub fn new(executor: E, debounce: Duration) -> Self {
        Self {
            scheduler: ReparseScheduler::new(debounce),
            highlights: HighlightState::new(),
            executor,
            status: Status::Ready,
            outline: vec![],
            anomalies: vec![],
        }
    }

    /// Records an edit. Never parses.
    pub fn on_text_changed(&mut self, snapshot: DocumentSnapshot, now: Instant) {
        if self.scheduler.on_edit(snapshot, now) {
            self.status = Status::Modified;
        }
    }

    /// Collects finished passes, starts a due one, and returns the view
    /// operations for every result delivered.
    pub fn tick(&mut self, now: Instant) -> Vec<ViewOp> {
        let mut ops = vec![];
        self.drain(&mut ops);
        if let Some(snapshot) = self.scheduler.poll(now) {
            let version = snapshot.version();
            if let Err(err) = self.executor.submit(snapshot) {
                warn!("could not start pass for v{version}: {err}");
                self.scheduler.complete(version);
                self.status = Status::Failed(err);
            }
            // Executors that run passes synchronously have already finished.
            self.drain(&mut ops);
        }
        ops
    }

    fn drain(&mut self, ops: &mut Vec<ViewOp>) {
        while let Some(Completed { version, result }) = self.executor.poll_completed() {
            if self.scheduler.complete(version) == Completion::Discard {
                continue;
            }
            match result {
                Ok(output) => {
                    let Some(mut delivered) = self.highlights.accept(output.version, output.ranges)
                    else {
                        continue;
                    };
                    debug!("delivered v{version} after {:?}", output.elapsed);
                    ops.append(&mut delivered);
                    self.outline = output.outline;
                    self.anomalies = output.anomalies;
                    self.status = Status::Parsed {
                        ranges: self.highlights.ranges().len(),
                    };
                }
                Err(err) => {
                    warn!("pass for v{version} failed: {err}");
                    self.status = Status::Failed(err);
                }
            }
        }
    }

    /// When [`tick`](Self::tick) must next be called, if a pass is waiting
    /// on the debounce interval.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// True while an edit has not yet been reflected in the highlights.
    pub fn is_busy(&self) -> bool {
        self.scheduler.is_running() || self.scheduler.next_deadline().is_some()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn outline(&self) -> &[OutlineEntry] {
        &self.outline
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    pub fn highlights(&self) -> &[HighlightRange] {
        self.highlights.ranges()
    }

    /// Document version the current highlights were computed from.
    pub fn highlight_version(&self) -> Option<u64> {
        self.highlights.version()
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }
}
